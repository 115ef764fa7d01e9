//! Collision classification and scoring
//!
//! Every overlapping pair of squares either bounces or blows up. The split is
//! decided by impact speed against a threshold that depends on how the
//! overlap was found and whether the held square is involved.

use glam::Vec2;

use super::physics::{bounce_response, is_colliding, relative_speed};
use super::spawner::update_rain_intensity;
use super::state::{GameState, Square};
use crate::settings::Tuning;

/// How an overlap was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionContext {
    /// One of the pair is held by the pointer (drag-smash)
    Drag,
    /// Per-frame scan over all pairs
    Scan,
    /// Single-square check outside the frame scan, no square held
    Probe,
}

impl CollisionContext {
    /// Impact speed a pair must exceed to be destroyed
    pub fn threshold(self, tuning: &Tuning, game_speed: f32) -> f32 {
        let base = match self {
            CollisionContext::Drag => tuning.drag_speed_threshold,
            CollisionContext::Scan => tuning.scan_speed_threshold,
            CollisionContext::Probe => tuning.drag_path_speed_threshold,
        };
        base * game_speed
    }

    /// Score multiplier for a destroy in this context
    pub fn multiplier(self, tuning: &Tuning) -> u64 {
        match self {
            CollisionContext::Drag => tuning.drag_smash_multiplier,
            CollisionContext::Scan | CollisionContext::Probe => 1,
        }
    }
}

/// What happened to a colliding pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Destroyed { points: u64 },
    Bounced,
}

/// Summary of one frame scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub destroyed_pairs: usize,
    pub bounces: usize,
    pub points: u64,
}

fn pair_mut(squares: &mut [Square], i: usize, j: usize) -> (&mut Square, &mut Square) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = squares.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = squares.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

fn overlaps(a: &Square, b: &Square) -> bool {
    is_colliding(a.pos, a.size, b.pos, b.size)
}

/// Impact speed of a pair, using pointer motion for the held square
pub fn impact_speed(state: &GameState, a: &Square, b: &Square) -> f32 {
    relative_speed(state.impact_velocity(a), state.impact_velocity(b))
}

/// Apply a bounce between squares `i` and `j`. Returns false when the pair
/// is separating or has coincident centers and nothing changed.
pub fn bounce(state: &mut GameState, i: usize, j: usize) -> bool {
    let restitution = state.tuning.restitution;
    let held = state.drag.map(|d| d.square_id);
    let (a, b) = pair_mut(&mut state.squares, i, j);

    let Some(response) = bounce_response(a.body(), b.body(), restitution) else {
        return false;
    };
    a.vel -= response.dv;
    b.vel += response.dv;
    a.pos -= response.push;
    b.pos += response.push;

    // The held square stays pinned to the pointer
    for square in [a, b] {
        if Some(square.id) == held {
            square.vel = Vec2::ZERO;
        }
    }
    true
}

/// Explode both squares and award their points. Removal is left to the caller.
fn destroy(state: &mut GameState, i: usize, j: usize, context: CollisionContext) -> u64 {
    let (a, b) = (&state.squares[i], &state.squares[j]);
    let (a_id, a_center, a_color) = (a.id, a.center(), a.color);
    let (b_id, b_center, b_color) = (b.id, b.center(), b.color);
    let base = a.points() as u64 + b.points() as u64;

    state.explode(a_center, a_color);
    state.explode(b_center, b_color);

    let points = base * context.multiplier(&state.tuning);
    state.award(points);

    if state.is_dragged(a_id) || state.is_dragged(b_id) {
        state.drag = None;
    }

    log::debug!("Smash {:?}: squares {} and {} for {} points", context, a_id, b_id, points);
    points
}

/// Judge one overlapping pair and apply the result (apart from removal)
fn resolve_pair(
    state: &mut GameState,
    i: usize,
    j: usize,
    context: CollisionContext,
) -> (Outcome, bool) {
    let speed = impact_speed(state, &state.squares[i], &state.squares[j]);
    if speed > context.threshold(&state.tuning, state.game_speed) {
        let points = destroy(state, i, j, context);
        (Outcome::Destroyed { points }, true)
    } else {
        let moved = bounce(state, i, j);
        (Outcome::Bounced, moved)
    }
}

/// Per-frame scan over every unordered pair.
///
/// Destroyed squares are only marked during the scan and compacted
/// afterwards, so indices stay valid and no square is skipped or counted
/// twice. After a destroy the rest of that row is skipped.
pub fn scan_collisions(state: &mut GameState) -> ScanReport {
    let mut report = ScanReport::default();
    let count = state.squares.len();
    let mut removed = vec![false; count];

    for i in 0..count {
        if removed[i] {
            continue;
        }
        for j in (i + 1)..count {
            if removed[j] || !overlaps(&state.squares[i], &state.squares[j]) {
                continue;
            }

            let (a_id, b_id) = (state.squares[i].id, state.squares[j].id);
            let context = if state.is_dragged(a_id) || state.is_dragged(b_id) {
                CollisionContext::Drag
            } else {
                CollisionContext::Scan
            };

            match resolve_pair(state, i, j, context) {
                (Outcome::Destroyed { points }, _) => {
                    removed[i] = true;
                    removed[j] = true;
                    report.destroyed_pairs += 1;
                    report.points += points;
                    break;
                }
                (Outcome::Bounced, true) => report.bounces += 1,
                (Outcome::Bounced, false) => {}
            }
        }
    }

    if report.destroyed_pairs > 0 {
        let mut index = 0;
        state.squares.retain(|_| {
            let keep = !removed[index];
            index += 1;
            keep
        });
        update_rain_intensity(state);
    }

    report
}

/// Check one square against the others right away (used while dragging).
///
/// The first overlapping square, topmost first, decides the outcome; a
/// destroyed pair is removed immediately.
pub fn check_collisions_for(state: &mut GameState, index: usize) -> Option<Outcome> {
    let id = state.squares.get(index)?.id;
    let context = if state.is_dragged(id) {
        CollisionContext::Drag
    } else {
        CollisionContext::Probe
    };

    let other = (0..state.squares.len())
        .rev()
        .find(|&j| j != index && overlaps(&state.squares[index], &state.squares[j]))?;
    let other_id = state.squares[other].id;

    let (outcome, _) = resolve_pair(state, index, other, context);
    if let Outcome::Destroyed { .. } = outcome {
        state.squares.retain(|s| s.id != id && s.id != other_id);
        update_rain_intensity(state);
    }
    Some(outcome)
}

//! Pointer interaction
//!
//! Two independent gestures:
//! - Double-click explodes the topmost square under the pointer.
//! - Press-drag-release picks a square up, smashes it into others while
//!   held, and throws it on release.

use glam::Vec2;

use super::scoring::{Outcome, check_collisions_for};
use super::spawner::update_rain_intensity;
use super::state::{DragState, GamePhase, GameState, Square};

/// Index of the topmost (last inserted) square containing `point`
pub fn hit_test(squares: &[Square], point: Vec2) -> Option<usize> {
    squares.iter().rposition(|s| s.contains(point))
}

/// Click at `pos`. A click within the double-click window of the previous
/// one explodes the square under the pointer and returns the points awarded.
///
/// An exploding click does not restart the window, so rapid repeated clicks
/// keep exploding.
pub fn click(state: &mut GameState, pos: Vec2, now_ms: f64) -> Option<u64> {
    state.pointer = pos;
    if state.phase != GamePhase::Running {
        return None;
    }

    let window = state.tuning.double_click_window_ms;
    let is_double = state
        .last_click_ms
        .is_some_and(|last| now_ms - last <= window);

    if is_double {
        if let Some(index) = hit_test(&state.squares, pos) {
            let square = state.squares.remove(index);
            if state.is_dragged(square.id) {
                state.drag = None;
            }
            let points = square.points() as u64;
            state.award(points);
            state.explode(square.center(), square.color);
            update_rain_intensity(state);
            log::debug!("Double-click on square {} for {} points", square.id, points);
            return Some(points);
        }
    }

    state.last_click_ms = Some(now_ms);
    None
}

/// Press at `pos`: pick up the topmost square under the pointer.
///
/// Returns true when a drag started.
pub fn pointer_down(state: &mut GameState, pos: Vec2) -> bool {
    state.pointer = pos;
    if state.phase != GamePhase::Running || state.drag.is_some() {
        return false;
    }
    let Some(index) = hit_test(&state.squares, pos) else {
        return false;
    };

    let square = &mut state.squares[index];
    square.saved_vel = square.vel;
    square.vel = Vec2::ZERO;
    state.drag = Some(DragState {
        square_id: square.id,
        offset: pos - square.pos,
        motion: Vec2::ZERO,
    });
    log::debug!("Picked up square {}", square.id);
    true
}

/// Pointer moved to `pos`. A held square follows it and is checked for
/// collisions immediately.
pub fn pointer_move(state: &mut GameState, pos: Vec2) -> Option<Outcome> {
    state.pointer = pos;
    let drag = state.drag?;
    if state.phase != GamePhase::Running {
        return None;
    }
    let Some(index) = state.square_index(drag.square_id) else {
        state.drag = None;
        return None;
    };

    let square = &mut state.squares[index];
    let target = pos - drag.offset;
    let motion = target - square.pos;
    square.pos = target;
    if let Some(drag) = state.drag.as_mut() {
        drag.motion = motion;
    }

    check_collisions_for(state, index)
}

/// Release: throw the held square with its saved velocity boosted.
pub fn pointer_up(state: &mut GameState) {
    let Some(drag) = state.drag.take() else {
        return;
    };
    let throw = state.tuning.throw_multiplier;
    if let Some(index) = state.square_index(drag.square_id) {
        let square = &mut state.squares[index];
        square.vel = square.saved_vel * throw;
        log::debug!("Released square {}", square.id);
    }
}

//! Per-frame simulation tick and session lifecycle
//!
//! One tick per display refresh. Movement is applied before the collision
//! scan, so collisions are judged on post-move positions.

use glam::Vec2;

use super::scoring::scan_collisions;
use super::spawner::{schedule_timers, update_rain_intensity};
use super::state::{GameEvent, GamePhase, GameState};

/// Begin the countdown at `now_ms` with a clean board
pub fn start_game(state: &mut GameState, now_ms: f64) {
    state.clear_session();
    state.started_at_ms = now_ms;
    state.phase = GamePhase::Running;
    schedule_timers(state, now_ms);
    log::info!("Game started (seed {})", state.seed);
}

/// Discard the current session and start a new one
pub fn reset_game(state: &mut GameState, now_ms: f64) {
    log::info!("Game reset (previous score {})", state.score);
    start_game(state, now_ms);
}

/// Enter the terminal phase: stop timers, drop any drag, announce the result
pub fn end_game(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    state.remaining_secs = 0.0;
    state.timers.cancel_all();
    state.drag = None;
    state.events.push(GameEvent::GameOver {
        final_score: state.score,
        high_score: state.high_score,
    });
    log::info!(
        "Game over: score {}, best {}",
        state.score,
        state.high_score
    );
}

/// Advance the session by one frame at `now_ms`.
///
/// Returns false when nothing moved (not running, or time just ran out).
pub fn tick(state: &mut GameState, now_ms: f64) -> bool {
    if state.phase != GamePhase::Running {
        return false;
    }

    let remaining = (state.tuning.game_duration_secs - state.elapsed_secs(now_ms)).max(0.0);
    state.remaining_secs = remaining;
    if remaining <= 0.0 {
        end_game(state);
        return false;
    }

    update_rain_intensity(state);

    let speed = state.game_speed;
    let bounds = state.bounds;

    for drop in &mut state.raindrops {
        drop.step(speed);
    }
    state.raindrops.retain(|d| !d.is_below(bounds.y));

    let life_step = state.tuning.particle_life_step;
    for particle in &mut state.particles {
        particle.step(life_step);
    }
    state.particles.retain(|p| !p.is_dead());

    let held = state.drag.map(|d| d.square_id);
    for square in &mut state.squares {
        if Some(square.id) == held {
            square.vel = Vec2::ZERO;
        }
        square.step(speed, bounds);
    }

    scan_collisions(state);

    // Pointer motion only counts for the frame it happened in
    if let Some(drag) = state.drag.as_mut() {
        drag.motion = Vec2::ZERO;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawner::run_due_timers;
    use crate::sim::state::{Particle, Raindrop, Square, SquareColor};
    use crate::sim::timers::TimerKind;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);
    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[test]
    fn test_ready_until_started() {
        let mut state = GameState::new(1, BOUNDS);
        assert_eq!(state.phase, GamePhase::Ready);
        assert!(!tick(&mut state, 0.0));

        start_game(&mut state, 500.0);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.timers.get(TimerKind::RainSpawn).is_some());
        assert!(tick(&mut state, 516.0));
        assert!((state.remaining_secs - 59.984).abs() < 1e-3);
    }

    #[test]
    fn test_moves_then_prunes() {
        let mut state = GameState::new(2, BOUNDS);
        start_game(&mut state, 0.0);
        state.raindrops.push(Raindrop {
            pos: Vec2::new(10.0, 595.0),
            speed: 8.0,
            width: 2.0,
            height: 6.0,
        });
        state.raindrops.push(Raindrop {
            pos: Vec2::new(20.0, 0.0),
            speed: 8.0,
            width: 2.0,
            height: 6.0,
        });
        state.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ONE,
            size: 4.0,
            color: SquareColor::Red,
            life: 0.01,
        });
        state.push_square(Square::new(
            1,
            Vec2::new(100.0, 100.0),
            Vec2::new(2.0, 1.0),
            30.0,
            SquareColor::Green,
        ));

        assert!(tick(&mut state, FRAME_MS));
        assert_eq!(state.raindrops.len(), 1);
        assert_eq!(state.raindrops[0].pos.y, 8.0);
        assert!(state.particles.is_empty());
        assert_eq!(state.squares[0].pos, Vec2::new(102.0, 101.0));
    }

    #[test]
    fn test_collisions_use_post_move_positions() {
        let mut state = GameState::new(3, BOUNDS);
        start_game(&mut state, 0.0);
        // One pixel apart before moving, overlapping after
        state.push_square(Square::new(1, Vec2::new(100.0, 100.0), Vec2::new(3.0, 0.0), 30.0, SquareColor::Red));
        state.push_square(Square::new(2, Vec2::new(131.0, 100.0), Vec2::new(-3.0, 0.0), 30.0, SquareColor::Blue));

        tick(&mut state, FRAME_MS);
        assert!(state.squares.is_empty());
        assert_eq!(state.score, 800);
    }

    #[test]
    fn test_game_over_after_duration() {
        let mut state = GameState::new(4, BOUNDS);
        start_game(&mut state, 0.0);
        state.push_square(Square::new(1, Vec2::new(100.0, 100.0), Vec2::new(1.0, 1.0), 30.0, SquareColor::Red));
        state.score = 1234;
        state.high_score = 1234;

        assert!(!tick(&mut state, 65_000.0));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.remaining_secs, 0.0);
        assert!(state.timers.is_empty());
        assert_eq!(
            state.events.last(),
            Some(&GameEvent::GameOver {
                final_score: 1234,
                high_score: 1234
            })
        );

        // Frozen afterwards
        let before = state.squares.clone();
        assert!(!tick(&mut state, 65_016.0));
        assert_eq!(run_due_timers(&mut state, 70_000.0), 0);
        assert_eq!(state.squares, before);

        // Only one notification
        end_game(&mut state);
        let overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_held_square_does_not_drift() {
        let mut state = GameState::new(5, BOUNDS);
        start_game(&mut state, 0.0);
        state.push_square(Square::new(1, Vec2::new(100.0, 100.0), Vec2::new(2.0, 2.0), 30.0, SquareColor::Red));
        assert!(crate::sim::interaction::pointer_down(&mut state, Vec2::new(110.0, 110.0)));
        state.squares[0].vel = Vec2::new(5.0, 5.0);

        tick(&mut state, FRAME_MS);
        assert_eq!(state.squares[0].pos, Vec2::new(100.0, 100.0));
        assert_eq!(state.squares[0].vel, Vec2::ZERO);
    }

    #[test]
    fn test_reset_matches_fresh_session() {
        let mut state = GameState::new(6, BOUNDS);
        start_game(&mut state, 0.0);
        let mut now = 0.0;
        while now < 20_000.0 {
            now += FRAME_MS;
            run_due_timers(&mut state, now);
            tick(&mut state, now);
        }
        state.score = 999;
        assert!(!state.squares.is_empty());
        assert!(state.game_speed > 1.0);

        reset_game(&mut state, now);
        let fresh = GameState::new(6, BOUNDS);
        assert_eq!(state.score, fresh.score);
        assert_eq!(state.game_speed, fresh.game_speed);
        assert_eq!(state.rain_intensity, fresh.rain_intensity);
        assert_eq!(state.rain_intensity, 5);
        assert_eq!(state.rain_speed_multiplier, fresh.rain_speed_multiplier);
        assert!(state.squares.is_empty());
        assert!(state.raindrops.is_empty());
        assert!(state.particles.is_empty());
        assert!(state.drag.is_none());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.started_at_ms, now);
    }

    #[test]
    fn test_reset_from_game_over() {
        let mut state = GameState::new(7, BOUNDS);
        start_game(&mut state, 0.0);
        tick(&mut state, 61_000.0);
        assert!(state.is_over());

        reset_game(&mut state, 70_000.0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.remaining_secs, 60.0);
        assert!(tick(&mut state, 70_016.0));
        run_due_timers(&mut state, 71_000.0);
        assert_eq!(state.squares.len(), 1);
    }

    #[test]
    fn test_same_seed_same_session() {
        let run = |seed| {
            let mut state = GameState::new(seed, BOUNDS);
            start_game(&mut state, 0.0);
            let mut now = 0.0;
            for _ in 0..600 {
                now += FRAME_MS;
                run_due_timers(&mut state, now);
                tick(&mut state, now);
            }
            state
        };
        let a = run(99);
        let b = run(99);
        assert_eq!(a.squares, b.squares);
        assert_eq!(a.score, b.score);
        assert_eq!(a.raindrops.len(), b.raindrops.len());
    }
}

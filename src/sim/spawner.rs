//! Spawning and difficulty progression
//!
//! Squares and rain arrive on timers; every difficulty tick speeds the game
//! up, drops a wave of extra squares and shortens the square spawn interval.

use glam::Vec2;

use super::state::{GamePhase, GameState, Raindrop, Square};
use super::timers::TimerKind;
use crate::consts::*;
use crate::settings::Tuning;

/// Rain intensity and speed multiplier for a live square count
pub fn rain_levels(square_count: usize, tuning: &Tuning) -> (u32, f32) {
    let intensity = (tuning.base_rain_intensity + (square_count / 2) as u32)
        .min(tuning.max_rain_intensity);
    let speed_multiplier = (1.0 + square_count as f32 * tuning.rain_speed_per_square)
        .min(tuning.max_rain_speed_multiplier);
    (intensity, speed_multiplier)
}

/// Recompute rain from the current square count
pub fn update_rain_intensity(state: &mut GameState) {
    let (intensity, speed_multiplier) = rain_levels(state.squares.len(), &state.tuning);
    state.rain_intensity = intensity;
    state.rain_speed_multiplier = speed_multiplier;
}

/// Square spawn interval for a game speed
pub fn square_spawn_rate_ms(game_speed: f32, tuning: &Tuning) -> f64 {
    (tuning.initial_spawn_rate_ms - game_speed as f64 * 100.0).max(tuning.min_spawn_rate_ms)
}

/// How many squares a difficulty tick drops after `elapsed_secs`
pub fn difficulty_wave_size(elapsed_secs: f32) -> u32 {
    let extra = (elapsed_secs / DIFFICULTY_EXTRA_SQUARE_SECS).floor() as u32;
    (DIFFICULTY_BASE_SQUARES + extra).min(DIFFICULTY_MAX_SQUARES)
}

/// Spawn one square at a random spot with a random velocity
pub fn spawn_square(state: &mut GameState) -> u32 {
    let size = state.uniform(MIN_SQUARE_SIZE, MAX_SQUARE_SIZE);
    let speed = state.game_speed;
    let vel = Vec2::new(state.uniform(-speed, speed), state.uniform(-speed, speed));
    let pos = Vec2::new(
        state.uniform(0.0, state.bounds.x - size),
        state.uniform(0.0, state.bounds.y - size),
    );
    let color = state.random_color();
    let id = state.next_entity_id();

    state.push_square(Square::new(id, pos, vel, size, color));
    update_rain_intensity(state);
    id
}

/// Spawn one raindrop just above the top edge
pub fn spawn_raindrop(state: &mut GameState) {
    let x = state.uniform(0.0, state.bounds.x);
    let speed = state.uniform(5.0, 10.0) * state.rain_speed_multiplier;
    let width = state.uniform(1.0, 3.0);
    let height = state.uniform(5.0, 12.0);
    state.raindrops.push(Raindrop {
        pos: Vec2::new(x, -5.0),
        speed,
        width,
        height,
    });
}

/// Rain tick: spawn `rain_intensity` drops
pub fn spawn_rain(state: &mut GameState) {
    for _ in 0..state.rain_intensity {
        spawn_raindrop(state);
    }
}

/// Difficulty tick at `now_ms`
pub fn increase_difficulty(state: &mut GameState, now_ms: f64) {
    state.game_speed += state.tuning.game_speed_step;

    let wave = difficulty_wave_size(state.elapsed_secs(now_ms));
    for _ in 0..wave {
        spawn_square(state);
    }
    update_rain_intensity(state);

    let rate = square_spawn_rate_ms(state.game_speed, &state.tuning);
    state.timers.schedule(TimerKind::SquareSpawn, rate, now_ms);

    log::info!(
        "Difficulty up: speed {:.2}, +{} squares, spawn every {:.0}ms",
        state.game_speed,
        wave,
        rate
    );
}

/// Arm all three periodic timers from `now_ms`
pub fn schedule_timers(state: &mut GameState, now_ms: f64) {
    let tuning = &state.tuning;
    let (square_rate, rain_rate, difficulty_rate) = (
        tuning.initial_spawn_rate_ms,
        tuning.rain_spawn_interval_ms,
        tuning.difficulty_interval_ms,
    );
    state.timers.schedule(TimerKind::SquareSpawn, square_rate, now_ms);
    state.timers.schedule(TimerKind::RainSpawn, rain_rate, now_ms);
    state.timers.schedule(TimerKind::Difficulty, difficulty_rate, now_ms);
}

/// Run every timer firing due by `now_ms`, oldest first.
///
/// Each firing sees the time it was scheduled for, so a late pump replays
/// the same sequence an on-time one would have. Firings at or past the
/// session deadline never run. Returns the number of firings processed.
pub fn run_due_timers(state: &mut GameState, now_ms: f64) -> usize {
    if state.phase != GamePhase::Running {
        return 0;
    }
    let deadline = state.deadline_ms();
    let mut fired = 0;
    while let Some((kind, at)) = state.timers.pop_due(now_ms.min(deadline)) {
        if at >= deadline {
            break;
        }
        match kind {
            TimerKind::SquareSpawn => {
                spawn_square(state);
            }
            TimerKind::RainSpawn => spawn_rain(state),
            TimerKind::Difficulty => increase_difficulty(state, at),
        }
        fired += 1;
    }
    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::points_for_size;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, BOUNDS);
        state.phase = GamePhase::Running;
        state
    }

    #[test]
    fn test_rain_levels() {
        let tuning = Tuning::default();
        assert_eq!(rain_levels(0, &tuning), (5, 1.0));
        assert_eq!(rain_levels(7, &tuning).0, 8);
        assert!((rain_levels(7, &tuning).1 - 1.7).abs() < 1e-5);
        // Both cap
        assert_eq!(rain_levels(100, &tuning), (30, 3.0));
    }

    #[test]
    fn test_rain_speed_step_comes_from_tuning() {
        let tuning = Tuning {
            rain_speed_per_square: 0.25,
            ..Tuning::default()
        };
        assert!((rain_levels(4, &tuning).1 - 2.0).abs() < 1e-5);
        assert_eq!(rain_levels(20, &tuning).1, 3.0);
    }

    #[test]
    fn test_spawned_square_properties() {
        let mut state = running_state(42);
        state.game_speed = 1.5;
        for _ in 0..200 {
            spawn_square(&mut state);
        }
        for square in &state.squares {
            assert!((MIN_SQUARE_SIZE..MAX_SQUARE_SIZE).contains(&square.size));
            assert!(square.vel.x.abs() <= 1.5 && square.vel.y.abs() <= 1.5);
            assert!(square.pos.x >= 0.0 && square.pos.x <= BOUNDS.x - square.size);
            assert!(square.pos.y >= 0.0 && square.pos.y <= BOUNDS.y - square.size);
            assert_eq!(square.points(), points_for_size(square.size));
        }
        // Rain follows the count
        assert_eq!(state.rain_intensity, 30);
    }

    #[test]
    fn test_raindrop_speed_uses_multiplier() {
        let mut state = running_state(3);
        state.rain_speed_multiplier = 2.0;
        spawn_raindrop(&mut state);
        let drop = &state.raindrops[0];
        assert_eq!(drop.pos.y, -5.0);
        assert!((10.0..20.0).contains(&drop.speed));
        assert!((1.0..3.0).contains(&drop.width));
        assert!((5.0..12.0).contains(&drop.height));
    }

    #[test]
    fn test_difficulty_wave_size() {
        assert_eq!(difficulty_wave_size(5.0), 2);
        assert_eq!(difficulty_wave_size(10.0), 3);
        assert_eq!(difficulty_wave_size(35.0), 5);
        assert_eq!(difficulty_wave_size(90.0), 8);
    }

    #[test]
    fn test_spawn_rate_floor() {
        let tuning = Tuning::default();
        assert_eq!(square_spawn_rate_ms(1.0, &tuning), 900.0);
        assert_eq!(square_spawn_rate_ms(8.0, &tuning), 300.0);
    }

    #[test]
    fn test_increase_difficulty() {
        let mut state = running_state(9);
        state.started_at_ms = 0.0;
        increase_difficulty(&mut state, 20_000.0);

        assert!((state.game_speed - 1.05).abs() < 1e-6);
        // 20s elapsed: 2 + 2 squares
        assert_eq!(state.squares.len(), 4);
        assert_eq!(state.rain_intensity, 7);
        let timer = state.timers.get(TimerKind::SquareSpawn).copied().expect("rescheduled");
        assert!((timer.interval_ms - 895.0).abs() < 1e-3);
        assert!((timer.next_due_ms - 20_895.0).abs() < 1e-3);
    }

    #[test]
    fn test_timers_drive_spawns() {
        let mut state = running_state(11);
        schedule_timers(&mut state, 0.0);

        // Up to 999ms: 9 rain ticks at 5 drops each, no square yet
        run_due_timers(&mut state, 999.0);
        assert_eq!(state.squares.len(), 0);
        assert_eq!(state.raindrops.len(), 45);

        run_due_timers(&mut state, 1000.0);
        assert_eq!(state.squares.len(), 1);
    }

    #[test]
    fn test_difficulty_reschedules_square_timer_mid_pump() {
        let mut state = running_state(12);
        schedule_timers(&mut state, 0.0);
        run_due_timers(&mut state, 5000.0);

        // 5 square ticks (1000..=5000) plus the 2-square difficulty wave
        assert_eq!(state.squares.len(), 7);
        let timer = state.timers.get(TimerKind::SquareSpawn).copied().expect("armed");
        assert!((timer.next_due_ms - (5000.0 + 895.0)).abs() < 1e-3);
    }

    #[test]
    fn test_timers_stop_at_deadline() {
        let mut state = running_state(13);
        schedule_timers(&mut state, 0.0);
        run_due_timers(&mut state, 59_990.0);
        let before = (state.squares.len(), state.raindrops.len(), state.game_speed);

        // Rain and difficulty are both due exactly at 60s; neither runs
        assert_eq!(run_due_timers(&mut state, 65_000.0), 0);
        assert_eq!(
            (state.squares.len(), state.raindrops.len(), state.game_speed),
            before
        );
    }

    #[test]
    fn test_deadline_follows_tuning_and_start() {
        let mut state = running_state(14);
        state.tuning.game_duration_secs = 10.0;
        state.started_at_ms = 2_000.0;
        schedule_timers(&mut state, 2_000.0);
        run_due_timers(&mut state, 30_000.0);

        // One difficulty step at 7000; the next one lands on the 12000 deadline.
        // Squares: 3000..=7000 every 1000, the wave of 2, then every 895 up to 11475
        assert!((state.game_speed - 1.05).abs() < 1e-6);
        assert_eq!(state.squares.len(), 5 + 2 + 5);
    }

    #[test]
    fn test_timers_idle_outside_running() {
        let mut state = GameState::new(1, BOUNDS);
        schedule_timers(&mut state, 0.0);
        assert_eq!(run_due_timers(&mut state, 10_000.0), 0);
        assert!(state.squares.is_empty());
    }
}

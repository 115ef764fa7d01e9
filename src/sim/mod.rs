//! Simulation module
//!
//! All gameplay logic lives here. This module stays platform-free:
//! - Time comes in as explicit millisecond readings
//! - Seeded RNG only
//! - No rendering, audio or storage dependencies; side effects are
//!   reported as `GameEvent`s

pub mod interaction;
pub mod physics;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timers;

pub use interaction::{click, hit_test, pointer_down, pointer_move, pointer_up};
pub use physics::{Body, BounceResponse, bounce_response, is_colliding, relative_speed};
pub use scoring::{CollisionContext, Outcome, ScanReport, check_collisions_for, scan_collisions};
pub use spawner::{
    increase_difficulty, rain_levels, run_due_timers, schedule_timers, spawn_raindrop,
    spawn_square, update_rain_intensity,
};
pub use state::{
    DragState, GameEvent, GamePhase, GameState, Particle, Raindrop, Square, SquareColor,
    points_for_size,
};
pub use tick::{end_game, reset_game, start_game, tick};
pub use timers::{TimerKind, Timers};

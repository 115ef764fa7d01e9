//! Smashing Squares - a 60 second arcade game
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, scoring, spawning, game state)
//! - `renderer`: Abstract 2D drawing surface and frame composition
//! - `platform`: Clock, HUD and storage collaborators
//! - `audio`: Explosion sound playback
//! - `app`: Lifecycle and per-frame orchestration
//! - `settings`: Player preferences and balance tuning

pub mod app;
pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::Game;
pub use highscores::HighScore;
pub use settings::{Settings, Tuning};

/// Game configuration constants
pub mod consts {
    /// Canvas size used when no display is attached (headless runs)
    pub const DEFAULT_CANVAS_WIDTH: f32 = 1280.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 720.0;

    /// Session length
    pub const GAME_DURATION_SECS: f32 = 60.0;
    /// Two clicks closer than this count as a double-click
    pub const DOUBLE_CLICK_WINDOW_MS: f64 = 300.0;

    /// Square spawn timer (starts here, shrinks with game speed)
    pub const INITIAL_SPAWN_RATE_MS: f64 = 1000.0;
    pub const MIN_SPAWN_RATE_MS: f64 = 300.0;
    /// Rain spawn timer
    pub const RAIN_SPAWN_INTERVAL_MS: f64 = 100.0;
    /// Difficulty timer
    pub const DIFFICULTY_INTERVAL_MS: f64 = 5000.0;
    /// Game speed added on every difficulty tick
    pub const GAME_SPEED_STEP: f32 = 0.05;
    /// Squares spawned per difficulty tick: base + one per elapsed interval, capped
    pub const DIFFICULTY_BASE_SQUARES: u32 = 2;
    pub const DIFFICULTY_MAX_SQUARES: u32 = 8;
    pub const DIFFICULTY_EXTRA_SQUARE_SECS: f32 = 10.0;

    /// Square dimensions (points derive from size)
    pub const MIN_SQUARE_SIZE: f32 = 20.0;
    pub const MAX_SQUARE_SIZE: f32 = 50.0;
    pub const POINTS_PER_PIXEL: f32 = 20.0;

    /// Rain scaling with live square count
    pub const BASE_RAIN_INTENSITY: u32 = 5;
    pub const MAX_RAIN_INTENSITY: u32 = 30;
    pub const RAIN_SPEED_PER_SQUARE: f32 = 0.1;
    pub const MAX_RAIN_SPEED_MULTIPLIER: f32 = 3.0;

    /// Relative-speed thresholds (multiplied by game speed)
    pub const DRAG_SPEED_THRESHOLD: f32 = 0.5;
    pub const SCAN_SPEED_THRESHOLD: f32 = 5.0;
    pub const DRAG_PATH_SPEED_THRESHOLD: f32 = 12.0;
    /// Score multiplier for drag-smash destroys
    pub const DRAG_SMASH_MULTIPLIER: u64 = 5;
    /// Velocity multiplier applied when a dragged square is released
    pub const THROW_MULTIPLIER: f32 = 1.8;
    /// Bounce restitution (slightly above 1 adds energy)
    pub const RESTITUTION: f32 = 1.2;

    /// Explosion particles
    pub const EXPLOSION_PARTICLES: usize = 30;
    pub const PARTICLE_MAX_SPEED: f32 = 7.5;
    pub const PARTICLE_MIN_SIZE: f32 = 3.0;
    pub const PARTICLE_MAX_SIZE: f32 = 9.0;
    pub const PARTICLE_LIFE_STEP: f32 = 0.02;

    /// Explosion sound
    pub const EXPLOSION_VOLUME: f32 = 0.15;
    pub const EXPLOSION_MIN_PITCH: f32 = 0.8;
    pub const EXPLOSION_MAX_PITCH: f32 = 1.2;
}

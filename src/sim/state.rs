//! Game state and core simulation types
//!
//! One `GameState` per play session. Entity collections, score, difficulty
//! and drag state all live here; timers are explicit scheduled events.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::physics::Body;
use super::timers::Timers;
use crate::consts::*;
use crate::settings::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Welcome screen, clock not started
    Ready,
    /// Countdown running
    Running,
    /// Time ran out; only a reset leaves this phase
    GameOver,
}

/// The six square colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SquareColor {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
}

impl SquareColor {
    pub const ALL: [SquareColor; 6] = [
        SquareColor::Red,
        SquareColor::Green,
        SquareColor::Blue,
        SquareColor::Yellow,
        SquareColor::Magenta,
        SquareColor::Cyan,
    ];

    /// CSS hex color
    pub fn hex(self) -> &'static str {
        match self {
            SquareColor::Red => "#FF0000",
            SquareColor::Green => "#00FF00",
            SquareColor::Blue => "#0000FF",
            SquareColor::Yellow => "#FFFF00",
            SquareColor::Magenta => "#FF00FF",
            SquareColor::Cyan => "#00FFFF",
        }
    }
}

/// Points awarded for destroying a square of the given size.
///
/// Smaller squares are worth more: `ceil((50 - size) * 20)`.
#[inline]
pub fn points_for_size(size: f32) -> u32 {
    ((MAX_SQUARE_SIZE - size) * POINTS_PER_PIXEL).ceil().max(0.0) as u32
}

/// A colored square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Square {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: SquareColor,
    /// Fixed at creation from `size`
    points: u32,
    /// Velocity saved while the square is held by the pointer
    #[serde(default)]
    pub saved_vel: Vec2,
}

impl Square {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, size: f32, color: SquareColor) -> Self {
        Self {
            id,
            pos,
            vel,
            size,
            color,
            points: points_for_size(size),
            saved_vel: Vec2::ZERO,
        }
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Inclusive point-in-box test
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.x <= self.pos.x + self.size
            && point.y >= self.pos.y
            && point.y <= self.pos.y + self.size
    }

    pub fn body(&self) -> Body {
        Body {
            center: self.center(),
            vel: self.vel,
            size: self.size,
        }
    }

    /// Integrate one frame and reflect off the canvas edges.
    ///
    /// A velocity component is flipped only while it points out through the
    /// edge being touched, and the position is clamped back inside, so a
    /// square can never stay outside `[0, bounds - size]`.
    pub fn step(&mut self, game_speed: f32, bounds: Vec2) {
        self.pos += self.vel * game_speed;

        let max = (bounds - Vec2::splat(self.size)).max(Vec2::ZERO);

        if self.pos.x <= 0.0 {
            if self.vel.x < 0.0 {
                self.vel.x = -self.vel.x;
            }
        } else if self.pos.x >= max.x && self.vel.x > 0.0 {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y <= 0.0 {
            if self.vel.y < 0.0 {
                self.vel.y = -self.vel.y;
            }
        } else if self.pos.y >= max.y && self.vel.y > 0.0 {
            self.vel.y = -self.vel.y;
        }

        self.pos = self.pos.clamp(Vec2::ZERO, max);
    }
}

/// A decorative rain streak
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raindrop {
    pub pos: Vec2,
    pub speed: f32,
    pub width: f32,
    pub height: f32,
}

impl Raindrop {
    pub fn step(&mut self, game_speed: f32) {
        self.pos.y += self.speed * game_speed;
    }

    pub fn is_below(&self, canvas_height: f32) -> bool {
        self.pos.y > canvas_height
    }
}

/// A particle for explosion effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: SquareColor,
    /// 1 at birth, drawn with alpha = life
    pub life: f32,
}

impl Particle {
    pub fn step(&mut self, life_step: f32) {
        self.pos += self.vel;
        self.life -= life_step;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

/// Pointer hold on a square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub square_id: u32,
    /// Pointer position minus square origin at pickup
    pub offset: Vec2,
    /// Displacement applied by the latest pointer move; stands in for the
    /// held square's velocity when judging impact speed
    pub motion: Vec2,
}

/// Notifications for platform collaborators (audio, HUD, storage)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Explosion {
        pos: Vec2,
        color: SquareColor,
        pitch: f32,
    },
    ScoreChanged {
        score: u64,
    },
    NewHighScore {
        high_score: u64,
    },
    GameOver {
        final_score: u64,
        high_score: u64,
    },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    /// Canvas width and height
    pub bounds: Vec2,
    pub phase: GamePhase,
    pub score: u64,
    /// Best score across sessions
    pub high_score: u64,
    /// Global velocity multiplier, rises with difficulty
    pub game_speed: f32,
    /// Raindrops spawned per rain tick
    pub rain_intensity: u32,
    pub rain_speed_multiplier: f32,
    /// Clock reading when the countdown started
    pub started_at_ms: f64,
    /// Seconds left, refreshed every tick
    pub remaining_secs: f32,
    /// Live squares in insertion order (last is topmost)
    pub squares: Vec<Square>,
    pub raindrops: Vec<Raindrop>,
    pub particles: Vec<Particle>,
    pub drag: Option<DragState>,
    /// Latest pointer position
    pub pointer: Vec2,
    /// Time of the last click that did not explode a square
    pub last_click_ms: Option<f64>,
    pub timers: Timers,
    /// Pending notifications, drained by the app layer
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a session in the `Ready` phase
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        Self::with_tuning(seed, bounds, Tuning::default())
    }

    pub fn with_tuning(seed: u64, bounds: Vec2, tuning: Tuning) -> Self {
        let rain_intensity = tuning.base_rain_intensity;
        let remaining_secs = tuning.game_duration_secs;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            bounds,
            phase: GamePhase::Ready,
            score: 0,
            high_score: 0,
            game_speed: 1.0,
            rain_intensity,
            rain_speed_multiplier: 1.0,
            started_at_ms: 0.0,
            remaining_secs,
            squares: Vec::new(),
            raindrops: Vec::new(),
            particles: Vec::new(),
            drag: None,
            pointer: Vec2::ZERO,
            last_click_ms: None,
            timers: Timers::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniform sample in `[lo, hi)`; collapses to `lo` for an empty range
    pub fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        if hi > lo {
            self.rng.random_range(lo..hi)
        } else {
            lo
        }
    }

    pub fn random_color(&mut self) -> SquareColor {
        SquareColor::ALL[self.rng.random_range(0..SquareColor::ALL.len())]
    }

    /// Add a square and return its index
    pub fn push_square(&mut self, square: Square) -> usize {
        self.squares.push(square);
        self.squares.len() - 1
    }

    pub fn square_index(&self, id: u32) -> Option<usize> {
        self.squares.iter().position(|s| s.id == id)
    }

    pub fn is_dragged(&self, id: u32) -> bool {
        self.drag.is_some_and(|d| d.square_id == id)
    }

    /// Velocity used when judging impact speed: the pointer motion for the
    /// held square, the live velocity otherwise
    pub fn impact_velocity(&self, square: &Square) -> Vec2 {
        match self.drag {
            Some(drag) if drag.square_id == square.id => drag.motion,
            _ => square.vel,
        }
    }

    /// Add points, raise the high score if beaten, and notify
    pub fn award(&mut self, points: u64) {
        self.score += points;
        self.events.push(GameEvent::ScoreChanged { score: self.score });
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore {
                high_score: self.high_score,
            });
        }
    }

    /// Burst of particles plus a sound cue at `pos`
    pub fn explode(&mut self, pos: Vec2, color: SquareColor) {
        let count = self.tuning.explosion_particles;
        self.particles.reserve(count);
        for _ in 0..count {
            let vel = Vec2::new(
                self.uniform(-PARTICLE_MAX_SPEED, PARTICLE_MAX_SPEED),
                self.uniform(-PARTICLE_MAX_SPEED, PARTICLE_MAX_SPEED),
            );
            let size = self.uniform(PARTICLE_MIN_SIZE, PARTICLE_MAX_SIZE);
            self.particles.push(Particle {
                pos,
                vel,
                size,
                color,
                life: 1.0,
            });
        }
        let pitch = self.uniform(EXPLOSION_MIN_PITCH, EXPLOSION_MAX_PITCH);
        self.events.push(GameEvent::Explosion { pos, color, pitch });
        log::debug!("Explosion at ({:.0}, {:.0})", pos.x, pos.y);
    }

    /// Elapsed session time in seconds
    pub fn elapsed_secs(&self, now_ms: f64) -> f32 {
        ((now_ms - self.started_at_ms) / 1000.0).max(0.0) as f32
    }

    /// Clock reading at which the countdown reaches zero
    pub fn deadline_ms(&self) -> f64 {
        self.started_at_ms + self.tuning.game_duration_secs as f64 * 1000.0
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Restore a fresh session, keeping seed stream, tuning, bounds and high score
    pub fn clear_session(&mut self) {
        self.score = 0;
        self.game_speed = 1.0;
        self.rain_intensity = self.tuning.base_rain_intensity;
        self.rain_speed_multiplier = 1.0;
        self.remaining_secs = self.tuning.game_duration_secs;
        self.squares.clear();
        self.raindrops.clear();
        self.particles.clear();
        self.drag = None;
        self.last_click_ms = None;
        self.timers.cancel_all();
        self.events.clear();
    }
}

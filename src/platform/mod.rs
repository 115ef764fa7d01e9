//! Platform abstraction layer
//!
//! Collaborators the game is handed at construction:
//! - `Clock`: monotonic millisecond readings
//! - `Hud`: text readouts and the game-over notice
//! - `ScoreStore`: a small string key/value slot for persistence

pub mod clock;
pub mod hud;
pub mod storage;

pub use clock::{Clock, ManualClock};
#[cfg(target_arch = "wasm32")]
pub use clock::PerformanceClock;
#[cfg(not(target_arch = "wasm32"))]
pub use clock::SystemClock;
#[cfg(target_arch = "wasm32")]
pub use hud::DomHud;
pub use hud::{Hud, HudText, TextHud};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;
pub use storage::{MemoryStore, ScoreStore};

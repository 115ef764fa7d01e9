//! Best score across sessions
//!
//! Stored as a plain decimal integer under a single key.

use crate::platform::ScoreStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Raise the best score; returns true if `score` beat it
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Read from the store. Missing or unreadable values count as 0.
    pub fn load(store: &dyn ScoreStore) -> Self {
        let Some(raw) = store.get(Self::STORAGE_KEY) else {
            log::info!("No high score found, starting fresh");
            return Self::default();
        };
        match raw.trim().parse::<u64>() {
            Ok(best) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            Err(_) => {
                log::warn!("Ignoring unreadable high score {:?}", raw);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn ScoreStore) {
        store.set(Self::STORAGE_KEY, &self.best.to_string());
    }
}

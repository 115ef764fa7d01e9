//! Game settings and balance tuning
//!
//! Persisted in LocalStorage on the web. Native builds read an optional JSON
//! file named by `SMASHING_SQUARES_CONFIG`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance constants. Every field defaults to the matching `consts` value, so
/// a partial JSON document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub game_duration_secs: f32,
    pub double_click_window_ms: f64,

    // === Spawning ===
    pub initial_spawn_rate_ms: f64,
    pub min_spawn_rate_ms: f64,
    pub rain_spawn_interval_ms: f64,
    pub difficulty_interval_ms: f64,
    pub game_speed_step: f32,

    // === Rain ===
    pub base_rain_intensity: u32,
    pub max_rain_intensity: u32,
    pub rain_speed_per_square: f32,
    pub max_rain_speed_multiplier: f32,

    // === Collisions ===
    pub drag_speed_threshold: f32,
    pub scan_speed_threshold: f32,
    pub drag_path_speed_threshold: f32,
    pub drag_smash_multiplier: u64,
    pub throw_multiplier: f32,
    pub restitution: f32,

    // === Particles ===
    pub explosion_particles: usize,
    pub particle_life_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            game_duration_secs: GAME_DURATION_SECS,
            double_click_window_ms: DOUBLE_CLICK_WINDOW_MS,

            initial_spawn_rate_ms: INITIAL_SPAWN_RATE_MS,
            min_spawn_rate_ms: MIN_SPAWN_RATE_MS,
            rain_spawn_interval_ms: RAIN_SPAWN_INTERVAL_MS,
            difficulty_interval_ms: DIFFICULTY_INTERVAL_MS,
            game_speed_step: GAME_SPEED_STEP,

            base_rain_intensity: BASE_RAIN_INTENSITY,
            max_rain_intensity: MAX_RAIN_INTENSITY,
            rain_speed_per_square: RAIN_SPEED_PER_SQUARE,
            max_rain_speed_multiplier: MAX_RAIN_SPEED_MULTIPLIER,

            drag_speed_threshold: DRAG_SPEED_THRESHOLD,
            scan_speed_threshold: SCAN_SPEED_THRESHOLD,
            drag_path_speed_threshold: DRAG_PATH_SPEED_THRESHOLD,
            drag_smash_multiplier: DRAG_SMASH_MULTIPLIER,
            throw_multiplier: THROW_MULTIPLIER,
            restitution: RESTITUTION,

            explosion_particles: EXPLOSION_PARTICLES,
            particle_life_step: PARTICLE_LIFE_STEP,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0), scales the fixed explosion volume
    pub master_volume: f32,
    /// Silence all sound effects
    pub muted: bool,

    // === Balance ===
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            muted: false,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "smashing_squares_settings";

    /// Environment variable naming a JSON settings file (native only)
    pub const CONFIG_ENV: &'static str = "SMASHING_SQUARES_CONFIG";

    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Effective volume for sound effects (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0)
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring malformed settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `SMASHING_SQUARES_CONFIG`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::CONFIG_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read settings file {}: {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "muted": true, "tuning": { "game_duration_secs": 30.0 } }"#)
            .expect("valid json");
        assert!(settings.muted);
        assert_eq!(settings.tuning.game_duration_secs, 30.0);
        assert_eq!(settings.tuning.restitution, RESTITUTION);
        assert_eq!(settings.master_volume, 1.0);
    }

    #[test]
    fn test_rain_tuning_from_json() {
        let settings =
            Settings::from_json(r#"{ "tuning": { "rain_speed_per_square": 0.25 } }"#)
                .expect("valid json");
        assert_eq!(settings.tuning.rain_speed_per_square, 0.25);
        assert_eq!(settings.tuning.max_rain_speed_multiplier, MAX_RAIN_SPEED_MULTIPLIER);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        settings.master_volume = 1.5;
        assert_eq!(settings.effective_volume(), 1.0);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }
}

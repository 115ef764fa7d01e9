//! Explosion sound playback
//!
//! One sampled clip, replayed at a random pitch per explosion. Each play
//! gets its own voice so overlapping explosions sound together.

use crate::consts::{EXPLOSION_MAX_PITCH, EXPLOSION_MIN_PITCH, EXPLOSION_VOLUME};
use crate::settings::Settings;

/// Candidate clip files, most preferred first
pub const EXPLOSION_SOURCES: [&str; 3] = [
    "assets/explosion.mp3",
    "assets/explosion.ogg",
    "assets/explosion.wav",
];

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundEffect {
    /// Square destroyed; `pitch` is the playback rate
    Explosion { pitch: f32 },
}

/// Anything that can play sound effects
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Backend voice: plays the loaded clip once at `volume` and `rate`.
/// Returns false if playback could not be started.
pub trait ClipPlayer {
    fn play_clip(&mut self, volume: f32, rate: f32) -> bool;
}

/// MIME type for a clip path, by extension
pub fn mime_type(source: &str) -> &'static str {
    let ext = source
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "wav" => "audio/wav",
        _ => "",
    }
}

/// Audio manager for the game
pub struct AudioManager {
    player: Option<Box<dyn ClipPlayer>>,
    master_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(player: Box<dyn ClipPlayer>) -> Self {
        Self {
            player: Some(player),
            master_volume: 1.0,
            muted: false,
        }
    }

    /// No backend; every play is dropped
    pub fn silent() -> Self {
        Self {
            player: None,
            master_volume: 1.0,
            muted: false,
        }
    }

    /// Apply volume and mute from settings
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.set_master_volume(settings.effective_volume());
        self.set_muted(settings.muted);
        self
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Clip volume after master scaling
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            EXPLOSION_VOLUME * self.master_volume
        }
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(player) = self.player.as_mut() else {
            return;
        };

        match effect {
            SoundEffect::Explosion { pitch } => {
                let rate = pitch.clamp(EXPLOSION_MIN_PITCH, EXPLOSION_MAX_PITCH);
                if !player.play_clip(vol, rate) {
                    log::debug!("Explosion sound failed to start");
                }
            }
        }
    }
}

/// `HTMLAudioElement` voice. The template element is cloned per play.
#[cfg(target_arch = "wasm32")]
pub struct HtmlAudioClip {
    template: web_sys::HtmlAudioElement,
}

#[cfg(target_arch = "wasm32")]
impl HtmlAudioClip {
    /// Pick the first source the browser claims it can play, else the last one
    pub fn load(sources: &[&str]) -> Option<Self> {
        let template = web_sys::HtmlAudioElement::new().ok()?;
        for source in sources {
            template.set_src(source);
            if !template.can_play_type(mime_type(source)).is_empty() {
                log::info!("Explosion sound: {}", source);
                return Some(Self { template });
            }
        }
        log::warn!("No supported explosion sound format");
        Some(Self { template })
    }
}

#[cfg(target_arch = "wasm32")]
impl ClipPlayer for HtmlAudioClip {
    fn play_clip(&mut self, volume: f32, rate: f32) -> bool {
        use wasm_bindgen::JsCast;

        let Ok(node) = self.template.clone_node() else {
            return false;
        };
        let Ok(voice) = node.dyn_into::<web_sys::HtmlAudioElement>() else {
            return false;
        };
        voice.set_volume(volume as f64);
        voice.set_playback_rate(rate as f64);
        voice.play().is_ok()
    }
}

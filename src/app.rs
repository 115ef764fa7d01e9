//! Game orchestrator
//!
//! Owns the session state and the platform collaborators, and routes
//! simulation events to audio, HUD and storage.

use glam::Vec2;

use crate::audio::{AudioSink, SoundEffect};
use crate::highscores::HighScore;
use crate::platform::{Clock, Hud, ScoreStore};
use crate::renderer::{Surface, draw_frame};
use crate::settings::Tuning;
use crate::sim::{
    GameEvent, GamePhase, GameState, Outcome, click, pointer_down, pointer_move, pointer_up,
    reset_game, run_due_timers, start_game, tick,
};

/// Collaborators handed to the game at construction
pub struct Platform {
    pub clock: Box<dyn Clock>,
    pub store: Box<dyn ScoreStore>,
    pub audio: Box<dyn AudioSink>,
    pub hud: Box<dyn Hud>,
}

pub struct Game {
    state: GameState,
    high_score: HighScore,
    clock: Box<dyn Clock>,
    store: Box<dyn ScoreStore>,
    audio: Box<dyn AudioSink>,
    hud: Box<dyn Hud>,
}

impl Game {
    /// Build a session in the `Ready` phase with the stored high score loaded
    pub fn new(seed: u64, bounds: Vec2, tuning: Tuning, platform: Platform) -> Self {
        let Platform {
            clock,
            store,
            audio,
            mut hud,
        } = platform;

        let high_score = HighScore::load(store.as_ref());
        let mut state = GameState::with_tuning(seed, bounds, tuning);
        state.high_score = high_score.best();

        hud.set_score(0);
        hud.set_high_score(high_score.best());
        hud.set_time_left(state.remaining_secs);

        Self {
            state,
            high_score,
            clock,
            store,
            audio,
            hud,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    /// Leave the welcome screen and start the countdown
    pub fn start(&mut self) {
        let now = self.clock.now_ms();
        self.hud.hide_overlay();
        start_game(&mut self.state, now);
        self.refresh_hud();
    }

    /// Throw away the current session and start over
    pub fn reset(&mut self) {
        let now = self.clock.now_ms();
        self.hud.hide_overlay();
        reset_game(&mut self.state, now);
        self.refresh_hud();
    }

    /// Canvas was resized
    pub fn resize(&mut self, bounds: Vec2) {
        self.state.bounds = bounds;
    }

    /// One display frame: fire due timers, advance, draw, update the HUD.
    ///
    /// Nothing is drawn once the game is over; the last frame stays up.
    pub fn frame(&mut self, surface: &mut dyn Surface) {
        let now = self.clock.now_ms();
        run_due_timers(&mut self.state, now);
        tick(&mut self.state, now);

        if self.state.phase != GamePhase::GameOver {
            draw_frame(surface, &self.state);
        }
        if self.state.phase != GamePhase::Ready {
            self.hud.set_time_left(self.state.remaining_secs);
        }
        self.dispatch_events();
    }

    /// Click at `pos`; returns points if it was an exploding double-click
    pub fn click(&mut self, pos: Vec2) -> Option<u64> {
        let now = self.clock.now_ms();
        let points = click(&mut self.state, pos, now);
        self.dispatch_events();
        points
    }

    pub fn pointer_down(&mut self, pos: Vec2) -> bool {
        pointer_down(&mut self.state, pos)
    }

    pub fn pointer_move(&mut self, pos: Vec2) -> Option<Outcome> {
        let outcome = pointer_move(&mut self.state, pos);
        self.dispatch_events();
        outcome
    }

    pub fn pointer_up(&mut self) {
        pointer_up(&mut self.state);
    }

    fn refresh_hud(&mut self) {
        self.hud.set_score(self.state.score);
        self.hud.set_high_score(self.high_score.best());
        self.hud.set_time_left(self.state.remaining_secs);
    }

    /// Route pending simulation events to the collaborators
    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Explosion { pitch, .. } => {
                    self.audio.play(SoundEffect::Explosion { pitch });
                }
                GameEvent::ScoreChanged { score } => {
                    self.hud.set_score(score);
                }
                GameEvent::NewHighScore { high_score } => {
                    if self.high_score.record(high_score) {
                        self.high_score.save(self.store.as_mut());
                        self.hud.set_high_score(high_score);
                    }
                }
                GameEvent::GameOver {
                    final_score,
                    high_score,
                } => {
                    self.hud.show_game_over(final_score, high_score);
                }
            }
        }
    }
}

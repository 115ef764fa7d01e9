//! HUD readouts and overlays

use std::cell::RefCell;
use std::rc::Rc;

pub fn score_text(score: u64) -> String {
    format!("YOUR SCORE: {}", score)
}

pub fn high_score_text(high_score: u64) -> String {
    format!("YOUR HIGHEST: {}", high_score)
}

/// Whole seconds left, rounded up
pub fn time_left_text(remaining_secs: f32) -> String {
    format!("TIME LEFT: {}", remaining_secs.max(0.0).ceil() as u32)
}

pub fn final_score_text(score: u64) -> String {
    format!("FINAL SCORE: {}", score)
}

pub fn best_score_text(high_score: u64) -> String {
    format!("YOUR BEST SCORE: {}", high_score)
}

/// Text sinks for the score panel plus the game-over notice
pub trait Hud {
    fn set_score(&mut self, score: u64);
    fn set_high_score(&mut self, high_score: u64);
    fn set_time_left(&mut self, remaining_secs: f32);
    fn show_game_over(&mut self, final_score: u64, high_score: u64);
    /// Dismiss any welcome or game-over overlay
    fn hide_overlay(&mut self);
}

/// Latest rendered HUD strings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HudText {
    pub score: String,
    pub high_score: String,
    pub time_left: String,
    /// Final score and best score lines while the notice is up
    pub game_over: Option<(String, String)>,
    /// How many times the game-over notice was raised
    pub game_over_count: u32,
}

/// HUD that keeps text in memory. Clones share the same text.
#[derive(Debug, Clone, Default)]
pub struct TextHud {
    text: Rc<RefCell<HudText>>,
}

impl TextHud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> HudText {
        self.text.borrow().clone()
    }
}

impl Hud for TextHud {
    fn set_score(&mut self, score: u64) {
        self.text.borrow_mut().score = score_text(score);
    }

    fn set_high_score(&mut self, high_score: u64) {
        self.text.borrow_mut().high_score = high_score_text(high_score);
    }

    fn set_time_left(&mut self, remaining_secs: f32) {
        self.text.borrow_mut().time_left = time_left_text(remaining_secs);
    }

    fn show_game_over(&mut self, final_score: u64, high_score: u64) {
        let mut text = self.text.borrow_mut();
        text.game_over = Some((final_score_text(final_score), best_score_text(high_score)));
        text.game_over_count += 1;
    }

    fn hide_overlay(&mut self) {
        self.text.borrow_mut().game_over = None;
    }
}

/// Element IDs used by `DomHud` and the page wiring
#[cfg(target_arch = "wasm32")]
pub mod ids {
    pub const SCORE: &str = "current-score";
    pub const HIGH_SCORE: &str = "high-score";
    pub const TIMER: &str = "timer";
    pub const POPUP: &str = "gameOverPopup";
    pub const START_BUTTON: &str = "startButton";
    pub const RESTART_BUTTON: &str = "restartButton";
}

/// HUD writing into page elements; overlays are built on demand
#[cfg(target_arch = "wasm32")]
pub struct DomHud {
    document: web_sys::Document,
}

#[cfg(target_arch = "wasm32")]
impl DomHud {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show_popup(&mut self, html: &str) {
        self.hide_overlay();
        let Ok(popup) = self.document.create_element("div") else {
            return;
        };
        popup.set_id(ids::POPUP);
        popup.set_inner_html(html);
        if let Some(body) = self.document.body() {
            let _ = body.append_child(&popup);
        }
    }

    /// Rules screen with the start button
    pub fn show_welcome(&mut self) {
        let html = format!(
            r#"<div class="popup-content">
    <h2>SMASHING SQUARES</h2>
    <div class="rules">
        <p>DESTROY SQUARES TO SCORE!</p>
        <p>&rarr; DOUBLE CLICK: Explode squares</p>
        <p>&rarr; DRAG &amp; SMASH: Grab squares and crash them!</p>
        <p>You have 60 seconds...</p>
    </div>
    <button id="{}">START GAME</button>
</div>"#,
            ids::START_BUTTON
        );
        self.show_popup(&html);
    }
}

#[cfg(target_arch = "wasm32")]
impl Hud for DomHud {
    fn set_score(&mut self, score: u64) {
        self.set_text(ids::SCORE, &score_text(score));
    }

    fn set_high_score(&mut self, high_score: u64) {
        self.set_text(ids::HIGH_SCORE, &high_score_text(high_score));
    }

    fn set_time_left(&mut self, remaining_secs: f32) {
        self.set_text(ids::TIMER, &time_left_text(remaining_secs));
    }

    fn show_game_over(&mut self, final_score: u64, high_score: u64) {
        let html = format!(
            r#"<div class="popup-content">
    <h2>GAME OVER</h2>
    <p>{}</p>
    <p>{}</p>
    <button id="{}">PLAY AGAIN</button>
</div>"#,
            final_score_text(final_score),
            best_score_text(high_score),
            ids::RESTART_BUTTON
        );
        self.show_popup(&html);
    }

    fn hide_overlay(&mut self) {
        if let Some(el) = self.document.get_element_by_id(ids::POPUP) {
            el.remove();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_left_rounds_up() {
        assert_eq!(time_left_text(60.0), "TIME LEFT: 60");
        assert_eq!(time_left_text(59.2), "TIME LEFT: 60");
        assert_eq!(time_left_text(0.01), "TIME LEFT: 1");
        assert_eq!(time_left_text(0.0), "TIME LEFT: 0");
    }

    #[test]
    fn test_text_hud_game_over_notice() {
        let hud = TextHud::new();
        let mut sink = hud.clone();
        sink.set_score(140);
        sink.set_high_score(900);
        sink.show_game_over(140, 900);

        let text = hud.snapshot();
        assert_eq!(text.score, "YOUR SCORE: 140");
        assert_eq!(text.high_score, "YOUR HIGHEST: 900");
        assert_eq!(
            text.game_over,
            Some(("FINAL SCORE: 140".to_string(), "YOUR BEST SCORE: 900".to_string()))
        );

        sink.hide_overlay();
        assert_eq!(hud.snapshot().game_over, None);
        assert_eq!(hud.snapshot().game_over_count, 1);
    }
}

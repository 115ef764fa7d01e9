//! Rendering module
//!
//! The game draws through the small `Surface` trait: filled rectangles,
//! gradient rectangles, rounded rectangles, dashed lines and a global alpha.
//! On the web it is backed by a Canvas 2D context.

pub mod frame;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::Canvas2dSurface;
pub use frame::draw_frame;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

use crate::sim::SquareColor;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// From a packed `0xRRGGBB` value
    pub const fn hex(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// CSS color string, e.g. `#0066FF`
    pub fn css(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<SquareColor> for Rgb {
    fn from(color: SquareColor) -> Self {
        match color {
            SquareColor::Red => Rgb::hex(0xFF0000),
            SquareColor::Green => Rgb::hex(0x00FF00),
            SquareColor::Blue => Rgb::hex(0x0000FF),
            SquareColor::Yellow => Rgb::hex(0xFFFF00),
            SquareColor::Magenta => Rgb::hex(0xFF00FF),
            SquareColor::Cyan => Rgb::hex(0x00FFFF),
        }
    }
}

/// Palette
pub const BACKGROUND: Rgb = Rgb::hex(0x000000);
pub const RAIN_TOP: Rgb = Rgb::hex(0x0066FF);
pub const RAIN_BOTTOM: Rgb = Rgb::hex(0x003399);

/// 2D drawing target
pub trait Surface {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Rgb);

    /// Rectangle with a vertical linear gradient from `top` to `bottom`
    fn fill_gradient_rect(&mut self, pos: Vec2, size: Vec2, top: Rgb, bottom: Rgb);

    /// Square of side `size` with rounded corners
    fn fill_round_rect(&mut self, pos: Vec2, size: f32, radius: f32, color: Rgb);

    /// Stroked line with an on/off dash pattern
    fn dashed_line(&mut self, from: Vec2, to: Vec2, width: f32, dash: [f32; 2], color: Rgb);

    /// Opacity for subsequent fills (0.0 - 1.0)
    fn set_alpha(&mut self, alpha: f32);
}

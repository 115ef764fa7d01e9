//! A surface that records draw calls instead of painting
//!
//! Used by headless runs and tests.

use glam::Vec2;

use super::{Rgb, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        pos: Vec2,
        size: Vec2,
        color: Rgb,
    },
    GradientRect {
        pos: Vec2,
        size: Vec2,
        top: Rgb,
        bottom: Rgb,
    },
    RoundRect {
        pos: Vec2,
        size: f32,
        radius: f32,
        color: Rgb,
    },
    DashedLine {
        from: Vec2,
        to: Vec2,
        width: f32,
        dash: [f32; 2],
        color: Rgb,
    },
    Alpha(f32),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Rgb) {
        self.commands.push(DrawCommand::FillRect { pos, size, color });
    }

    fn fill_gradient_rect(&mut self, pos: Vec2, size: Vec2, top: Rgb, bottom: Rgb) {
        self.commands.push(DrawCommand::GradientRect {
            pos,
            size,
            top,
            bottom,
        });
    }

    fn fill_round_rect(&mut self, pos: Vec2, size: f32, radius: f32, color: Rgb) {
        self.commands.push(DrawCommand::RoundRect {
            pos,
            size,
            radius,
            color,
        });
    }

    fn dashed_line(&mut self, from: Vec2, to: Vec2, width: f32, dash: [f32; 2], color: Rgb) {
        self.commands.push(DrawCommand::DashedLine {
            from,
            to,
            width,
            dash,
            color,
        });
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::Alpha(alpha));
    }
}

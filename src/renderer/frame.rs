//! Frame composition: background, rain, particles, squares, drag line

use glam::Vec2;

use super::{BACKGROUND, RAIN_BOTTOM, RAIN_TOP, Rgb, Surface};
use crate::sim::GameState;

/// Square corner radius as a fraction of size
const SQUARE_CORNER: f32 = 0.2;
/// Particles are drawn as near-circles
const PARTICLE_CORNER: f32 = 0.5;
const DRAG_LINE_WIDTH: f32 = 2.0;
const DRAG_LINE_DASH: [f32; 2] = [5.0, 5.0];

/// Draw the whole scene
pub fn draw_frame(surface: &mut dyn Surface, state: &GameState) {
    surface.fill_rect(Vec2::ZERO, state.bounds, BACKGROUND);

    for drop in &state.raindrops {
        surface.fill_gradient_rect(
            drop.pos,
            Vec2::new(drop.width, drop.height),
            RAIN_TOP,
            RAIN_BOTTOM,
        );
    }

    for particle in &state.particles {
        surface.set_alpha(particle.life.clamp(0.0, 1.0));
        surface.fill_round_rect(
            particle.pos,
            particle.size,
            particle.size * PARTICLE_CORNER,
            particle.color.into(),
        );
    }
    surface.set_alpha(1.0);

    for square in &state.squares {
        surface.fill_round_rect(
            square.pos,
            square.size,
            square.size * SQUARE_CORNER,
            square.color.into(),
        );
    }

    if let Some(drag) = state.drag {
        if let Some(square) = state.squares.iter().find(|s| s.id == drag.square_id) {
            surface.dashed_line(
                square.center(),
                state.pointer,
                DRAG_LINE_WIDTH,
                DRAG_LINE_DASH,
                Rgb::from(square.color),
            );
        }
    }
}

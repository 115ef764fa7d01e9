//! Collision geometry for axis-aligned squares
//!
//! Squares are boxes anchored at their top-left corner. Overlap tests use the
//! box edges; bounce response works on centers, treating each square like a
//! disc whose radius is half its size.

use glam::Vec2;

/// A square reduced to what collision response needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub center: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

/// Velocity and position corrections from a bounce.
///
/// Apply as `a.vel -= dv; b.vel += dv; a.pos -= push; b.pos += push`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceResponse {
    pub dv: Vec2,
    pub push: Vec2,
}

/// Axis-aligned overlap test, inclusive at the boundaries.
///
/// True unless the boxes are fully separated on either axis.
#[inline]
pub fn is_colliding(a_pos: Vec2, a_size: f32, b_pos: Vec2, b_size: f32) -> bool {
    !(a_pos.x + a_size < b_pos.x
        || a_pos.x > b_pos.x + b_size
        || a_pos.y + a_size < b_pos.y
        || a_pos.y > b_pos.y + b_size)
}

/// Magnitude of the velocity difference
#[inline]
pub fn relative_speed(a_vel: Vec2, b_vel: Vec2) -> f32 {
    (a_vel - b_vel).length()
}

/// Impulse-based bounce between two bodies.
///
/// Returns `None` when the centers coincide (no usable normal) or when the
/// bodies are already separating along the normal.
pub fn bounce_response(a: Body, b: Body, restitution: f32) -> Option<BounceResponse> {
    let delta = b.center - a.center;
    let distance = delta.length();
    if distance <= f32::EPSILON {
        return None;
    }
    let normal = delta / distance;

    // Positive when B recedes from A
    let velocity_along_normal = (b.vel - a.vel).dot(normal);
    if velocity_along_normal > 0.0 {
        return None;
    }

    let impulse = -(1.0 + restitution) * velocity_along_normal;

    let overlap = (a.size + b.size) / 2.0 - distance;
    let push = if overlap > 0.0 {
        normal * (overlap / 2.0)
    } else {
        Vec2::ZERO
    };

    Some(BounceResponse {
        dv: normal * impulse,
        push,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body(center: (f32, f32), vel: (f32, f32), size: f32) -> Body {
        Body {
            center: Vec2::new(center.0, center.1),
            vel: Vec2::new(vel.0, vel.1),
            size,
        }
    }

    #[test]
    fn test_overlap_is_inclusive_at_edges() {
        // Right edge of A exactly touches left edge of B
        assert!(is_colliding(Vec2::ZERO, 20.0, Vec2::new(20.0, 0.0), 20.0));
        // One pixel apart
        assert!(!is_colliding(Vec2::ZERO, 20.0, Vec2::new(20.5, 0.0), 20.0));
        // Separated on y only
        assert!(!is_colliding(Vec2::ZERO, 20.0, Vec2::new(5.0, 30.0), 20.0));
    }

    #[test]
    fn test_relative_speed() {
        let speed = relative_speed(Vec2::new(3.0, 0.0), Vec2::new(0.0, -4.0));
        assert!((speed - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_head_on_bounce_reverses_and_separates() {
        // A moving right into stationary B, overlapping by 10
        let a = body((0.0, 0.0), (2.0, 0.0), 40.0);
        let b = body((30.0, 0.0), (0.0, 0.0), 40.0);

        let response = bounce_response(a, b, 1.2).expect("approaching pair bounces");
        // impulse = -(2.2) * 2 along +x
        assert!((response.dv.x - 4.4).abs() < 1e-5);
        assert!(response.dv.y.abs() < 1e-5);
        // overlap = 40 - 30 = 10, each moves 5
        assert!((response.push.x - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_coincident_centers_skip_resolution() {
        let a = body((10.0, 10.0), (1.0, 0.0), 30.0);
        let b = body((10.0, 10.0), (-1.0, 0.0), 30.0);
        assert!(bounce_response(a, b, 1.2).is_none());
    }

    #[test]
    fn test_no_push_without_overlap() {
        let a = body((0.0, 0.0), (1.0, 0.0), 20.0);
        let b = body((25.0, 0.0), (0.0, 0.0), 20.0);
        let response = bounce_response(a, b, 1.0).expect("approaching");
        assert_eq!(response.push, Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_is_colliding_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, asz in 1.0f32..60.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bsz in 1.0f32..60.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(is_colliding(a, asz, b, bsz), is_colliding(b, bsz, a, asz));
        }

        #[test]
        fn prop_separating_pairs_never_bounce(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            dx in 1.0f32..40.0, dy in -40.0f32..40.0,
            speed in 0.01f32..10.0,
        ) {
            let a_center = Vec2::new(ax, ay);
            let b_center = a_center + Vec2::new(dx, dy);
            let normal = (b_center - a_center).normalize();
            // A retreats from a stationary B
            let a = Body { center: a_center, vel: -normal * speed, size: 30.0 };
            let b = Body { center: b_center, vel: Vec2::ZERO, size: 30.0 };
            prop_assert!(bounce_response(a, b, 1.2).is_none());
        }
    }
}

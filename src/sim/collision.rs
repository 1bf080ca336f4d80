//! Collision tests
//!
//! Everything in the arena is a circle, so hits are plain distance checks.
//! Target drift uses a sign-flip wall bounce rather than a true reflection.

use glam::Vec2;

/// Strict overlap of two circles (touching edges do not count)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Flip `vel` when `pos` is outside `[min, max]`.
///
/// The velocity is negated without moving the position back inside, so a
/// body that overshoots can flip again on the next frame. Drift speeds are
/// small enough that this settles within a frame or two.
#[inline]
pub fn bounce_axis(pos: f32, vel: f32, min: f32, max: f32) -> f32 {
    if pos < min || pos > max { -vel } else { vel }
}

/// Apply [`bounce_axis`] to both axes of a box
pub fn bounce_in_box(pos: Vec2, vel: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(
        bounce_axis(pos.x, vel.x, min.x, max.x),
        bounce_axis(pos.y, vel.y, min.y, max.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_hit_and_miss() {
        let p = Vec2::new(0.0, 0.0);
        assert!(circles_overlap(p, 20.0, Vec2::new(30.0, 0.0), 15.0));
        assert!(!circles_overlap(p, 20.0, Vec2::new(40.0, 0.0), 15.0));
    }

    #[test]
    fn test_touching_is_not_a_hit() {
        assert!(!circles_overlap(Vec2::ZERO, 20.0, Vec2::new(35.0, 0.0), 15.0));
    }

    #[test]
    fn test_bounce_axis() {
        assert_eq!(bounce_axis(5.0, -0.3, 10.0, 100.0), 0.3);
        assert_eq!(bounce_axis(105.0, 0.3, 10.0, 100.0), -0.3);
        assert_eq!(bounce_axis(50.0, 0.3, 10.0, 100.0), 0.3);
    }

    #[test]
    fn test_bounce_in_box_axes_independent() {
        let v = bounce_in_box(
            Vec2::new(5.0, 50.0),
            Vec2::new(-0.2, 0.4),
            Vec2::new(10.0, 10.0),
            Vec2::new(100.0, 100.0),
        );
        assert_eq!(v, Vec2::new(0.2, 0.4));
    }

    proptest! {
        #[test]
        fn prop_overlap_iff_closer_than_radii(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            ra in 1.0f32..40.0, rb in 1.0f32..40.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(circles_overlap(a, ra, b, rb), a.distance(b) < ra + rb);
            prop_assert_eq!(circles_overlap(a, ra, b, rb), circles_overlap(b, rb, a, ra));
        }
    }
}

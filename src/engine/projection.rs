//! Camera-space → screen-space maths.
//!
//! ```text
//! world ──translate──▶ camera-relative ──project──▶ [-1, 1]² ──scale──▶ pixels
//! ```
//!
//! Everything is pure: no state lives here besides the [`Camera`] passed in.

use glam::{Vec2, Vec3, vec2, vec3};

use crate::{engine::types::Viewport, world::Camera};

/// Smallest depth handed to [`project`].
pub const MIN_DEPTH: f32 = 1e-3;

/// Move `p` into camera-relative coordinates.
///
/// Depth is taken as `|Δz|` (floored at [`MIN_DEPTH`]) so anchors just
/// behind the camera, e.g. right after a wraparound, still land in front
/// of it instead of flipping sign.
#[inline]
pub fn translate(cam: &Camera, p: Vec3) -> Vec3 {
    let d = p - cam.pos;
    vec3(d.x, d.y, d.z.abs().max(MIN_DEPTH))
}

/// Perspective divide into normalised device space.
#[inline]
pub fn project(cam: &Camera, p: Vec3) -> Vec2 {
    debug_assert!(p.z > 0.0, "degenerate projection: depth {} <= 0", p.z);
    let k = cam.focal() / p.z;
    vec2(p.x * k, p.y * k)
}

/// `[-1, 1]²` → viewport pixels, y growing downwards.
#[inline]
pub fn scale(p: Vec2, vp: &Viewport) -> Vec2 {
    vec2(vp.width * 0.5 * (1.0 + p.x), vp.height * 0.5 * (1.0 - p.y))
}

/// The one call every renderer uses.  Result is viewport-local.
#[inline]
pub fn transform_point(cam: &Camera, p: Vec3, vp: &Viewport) -> Vec2 {
    scale(project(cam, translate(cam, p)), vp)
}

/// Screen row of the road point `distance` units straight ahead.
pub fn horizon(cam: &Camera, distance: f32, vp: &Viewport) -> f32 {
    transform_point(cam, vec3(0.0, 0.0, cam.pos.z + distance), vp).y
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn cam() -> Camera {
        Camera::new(vec3(133.3, 150.0, 159_800.0), 120.0)
    }

    #[test]
    fn straight_ahead_lands_on_centre_column() {
        let c = cam();
        let vp = Viewport::new(640.0, 480.0);
        for dz in [1.0_f32, 200.0, 5_000.0, 80_000.0] {
            let p = vec3(c.pos.x, 0.0, c.pos.z + dz);
            assert_eq!(project(&c, translate(&c, p)).x, 0.0);
            assert_eq!(transform_point(&c, p, &vp).x, 320.0);
        }
    }

    #[test]
    fn depth_is_unsigned_and_never_zero() {
        let c = cam();
        let ahead = translate(&c, vec3(0.0, 0.0, c.pos.z + 300.0));
        let behind = translate(&c, vec3(0.0, 0.0, c.pos.z - 300.0));
        assert_eq!(ahead.z, behind.z);
        assert_eq!(translate(&c, c.pos).z, MIN_DEPTH);
    }

    #[test]
    fn scale_maps_unit_square_to_viewport() {
        let vp = Viewport::new(200.0, 100.0);
        assert_eq!(scale(vec2(-1.0, 1.0), &vp), vec2(0.0, 0.0));
        assert_eq!(scale(vec2(1.0, -1.0), &vp), vec2(200.0, 100.0));
        assert_eq!(scale(Vec2::ZERO, &vp), vec2(100.0, 50.0));
    }

    #[test]
    fn horizon_sits_below_centre_by_eye_height() {
        // focal = 1 at 90°: y = h/2 · (1 + eye / distance)
        let c = Camera::new(vec3(0.0, 150.0, 1_000.0), 90.0);
        let vp = Viewport::new(800.0, 600.0);
        let y = horizon(&c, 8_000.0, &vp);
        assert!((y - 305.625).abs() < 1e-3);
        // farther horizon creeps toward the centre row
        assert!(horizon(&c, 80_000.0, &vp) < y);
    }
}

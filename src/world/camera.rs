use glam::Vec3;

/// Viewer riding down the road.
///
/// * Only **translation** is simulated – the camera always looks down +Z.
/// * `pos.x` = lateral offset, `pos.y` = eye height above the road,
///   `pos.z` = distance travelled.
/// * `focal` is derived from `fov` and only ever written by [`Camera::set_fov`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec3,
    fov: f32,   // degrees, 0 < fov < 180
    focal: f32, // 1 / tan(fov/2)
}

impl Camera {
    /// Create a camera at `pos` with a field of view of `fov` degrees.
    pub fn new(pos: Vec3, fov: f32) -> Self {
        Self {
            pos,
            fov,
            focal: focal_factor(fov),
        }
    }

    /// Field of view in degrees.
    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Perspective divisor scale, always consistent with the last `fov`.
    #[inline]
    pub fn focal(&self) -> f32 {
        self.focal
    }

    /// Change the field of view and re-derive the focal factor in one step.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
        self.focal = focal_factor(fov);
    }
}

/// ```text
/// focal = 1 / tan(π · fov / 360)
/// ```
#[inline]
pub fn focal_factor(fov_deg: f32) -> f32 {
    1.0 / (std::f32::consts::PI * fov_deg / 360.0).tan()
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/

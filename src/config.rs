// Start-up parameters.  Everything here is read once; runtime changes go
// through `sim::Settings`.

use crate::{
    sim::{Settings, Tunable, WrapPolicy},
    world::{Road, RoadError},
};

pub const SEGMENT_COUNT: usize = 1000;
pub const SEGMENT_LENGTH: f32 = 200.0;
pub const ROAD_WIDTH: f32 = 400.0;
pub const CAMERA_HEIGHT: f32 = 150.0;
pub const CAMERA_FOV: f32 = 120.0;
pub const DRAW_COUNT: usize = 40;
pub const MAX_DRAW_COUNT: usize = 100;
pub const SPEED: f32 = 500.0;
pub const MAX_SPEED: f32 = 2000.0;
/// Slider range of the field of view; the open extremes 0 and 180 blow up
/// the focal factor.
pub const FOV_RANGE: (f32, f32) = (1.0, 179.0);
pub const MAX_CAMERA_HEIGHT: f32 = 1000.0;

/// Shape of the generated road table.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum RoadShape {
    #[default]
    Straight,
    /// `lateral(i) = cos(i / period) · amplitude`
    Winding { amplitude: f32, period: f32 },
}

/// Rear-view inset size as a fraction of the shorter surface side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MirrorLayout {
    pub width: f32,
    pub height: f32,
}

impl Default for MirrorLayout {
    fn default() -> Self {
        Self {
            width: 0.2,
            height: 0.07,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("field of view must lie in [1, 179] degrees, got {0}")]
    BadFov(f32),

    #[error("road width must be finite and positive, got {0}")]
    BadRoadWidth(f32),

    #[error("camera x {x} lies outside the road half-width range ±{width}")]
    BadCameraX { x: f32, width: f32 },

    #[error("camera height must lie in [0, 1000], got {0}")]
    BadCameraHeight(f32),

    #[error("draw count {draw_count} exceeds its maximum {max}")]
    DrawCountTooLarge { draw_count: usize, max: usize },

    #[error("speed must be finite and non-negative, got {0}")]
    BadSpeed(f32),

    #[error("winding period must be positive, got {0}")]
    BadWinding(f32),

    /// Restart window (`max_draw_count`) plus a full window must fit.
    #[error("road of {len} segments too short: window needs more than {needed}")]
    RoadTooShort { len: usize, needed: usize },

    #[error(transparent)]
    Road(#[from] RoadError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub segment_count: usize,
    pub segment_length: f32,
    pub road_width: f32,
    pub shape: RoadShape,

    pub camera_x: f32,
    pub camera_height: f32,
    pub fov: f32,
    pub draw_count: usize,
    /// Upper bound of the draw-count setting, also the wrap restart offset.
    pub max_draw_count: usize,
    pub speed: f32,

    pub wrap: WrapPolicy,
    pub mirror: MirrorLayout,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            segment_count: SEGMENT_COUNT,
            segment_length: SEGMENT_LENGTH,
            road_width: ROAD_WIDTH,
            shape: RoadShape::Straight,
            camera_x: ROAD_WIDTH / 3.0,
            camera_height: CAMERA_HEIGHT,
            fov: CAMERA_FOV,
            draw_count: DRAW_COUNT,
            max_draw_count: MAX_DRAW_COUNT,
            speed: SPEED,
            wrap: WrapPolicy::PhaseLocked,
            mirror: MirrorLayout::default(),
        }
    }
}

impl SimConfig {
    /// Reject parameters the window maths cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_for(self.segment_count)
    }

    /// Same checks against a road table of `road_len` anchors.
    ///
    /// Everything [`SimConfig::settings`] seeds a tunable from must already
    /// lie inside that tunable's range.
    pub fn validate_for(&self, road_len: usize) -> Result<(), ConfigError> {
        let (fov_min, fov_max) = FOV_RANGE;
        if !(fov_min..=fov_max).contains(&self.fov) {
            return Err(ConfigError::BadFov(self.fov));
        }
        if !(self.road_width.is_finite() && self.road_width > 0.0) {
            return Err(ConfigError::BadRoadWidth(self.road_width));
        }
        if !(-self.road_width..=self.road_width).contains(&self.camera_x) {
            return Err(ConfigError::BadCameraX {
                x: self.camera_x,
                width: self.road_width,
            });
        }
        if !(0.0..=MAX_CAMERA_HEIGHT).contains(&self.camera_height) {
            return Err(ConfigError::BadCameraHeight(self.camera_height));
        }
        if self.draw_count > self.max_draw_count {
            return Err(ConfigError::DrawCountTooLarge {
                draw_count: self.draw_count,
                max: self.max_draw_count,
            });
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(ConfigError::BadSpeed(self.speed));
        }
        if let RoadShape::Winding { period, .. } = self.shape {
            if !(period > 0.0) {
                return Err(ConfigError::BadWinding(period));
            }
        }
        // restart + max_draw_count + 1 < N
        let needed = 2 * self.max_draw_count + 1;
        if road_len <= needed {
            return Err(ConfigError::RoadTooShort {
                len: road_len,
                needed,
            });
        }
        Ok(())
    }

    pub fn build_road(&self) -> Result<Road, RoadError> {
        match self.shape {
            RoadShape::Straight => Road::straight(self.segment_count, self.segment_length),
            RoadShape::Winding { amplitude, period } => {
                Road::winding(self.segment_count, self.segment_length, amplitude, period)
            }
        }
    }

    /// Tunables seeded from this config.
    pub fn settings(&self) -> Settings {
        let w = self.road_width;
        Settings::new(
            Tunable::new(self.camera_x, -w, w, w / 20.0),
            Tunable::new(self.camera_height, 0.0, MAX_CAMERA_HEIGHT, 10.0),
            Tunable::new(self.fov, FOV_RANGE.0, FOV_RANGE.1, 2.0),
            Tunable::new(self.draw_count as f32, 0.0, self.max_draw_count as f32, 1.0),
            Tunable::new(self.speed, 0.0, MAX_SPEED.max(self.speed), 50.0),
        )
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = SimConfig::default();
        cfg.validate().unwrap();
        let road = cfg.build_road().unwrap();
        assert_eq!(road.len(), 1000);
        assert_eq!(road.segment_length(), 200.0);
    }

    #[test]
    fn rejects_bad_parameters() {
        let bad = |f: fn(&mut SimConfig)| {
            let mut cfg = SimConfig::default();
            f(&mut cfg);
            cfg.validate().unwrap_err()
        };
        assert_eq!(bad(|c| c.fov = 180.0), ConfigError::BadFov(180.0));
        assert_eq!(bad(|c| c.fov = 0.0), ConfigError::BadFov(0.0));
        assert_eq!(bad(|c| c.fov = 0.5), ConfigError::BadFov(0.5));
        assert_eq!(bad(|c| c.road_width = -400.0), ConfigError::BadRoadWidth(-400.0));
        assert!(matches!(
            bad(|c| c.road_width = f32::NAN),
            ConfigError::BadRoadWidth(w) if w.is_nan()
        ));
        assert_eq!(
            bad(|c| c.camera_x = 500.0),
            ConfigError::BadCameraX {
                x: 500.0,
                width: 400.0
            }
        );
        assert_eq!(
            bad(|c| c.camera_height = 5000.0),
            ConfigError::BadCameraHeight(5000.0)
        );
        assert_eq!(
            bad(|c| c.camera_height = -1.0),
            ConfigError::BadCameraHeight(-1.0)
        );
        assert_eq!(
            bad(|c| c.draw_count = 101),
            ConfigError::DrawCountTooLarge {
                draw_count: 101,
                max: 100
            }
        );
        assert_eq!(bad(|c| c.speed = -1.0), ConfigError::BadSpeed(-1.0));
        assert_eq!(
            bad(|c| {
                c.shape = RoadShape::Winding {
                    amplitude: 400.0,
                    period: 0.0,
                }
            }),
            ConfigError::BadWinding(0.0)
        );
        assert_eq!(
            bad(|c| c.segment_count = 201),
            ConfigError::RoadTooShort {
                len: 201,
                needed: 201
            }
        );
    }

    #[test]
    fn settings_follow_config() {
        let cfg = SimConfig {
            camera_height: 300.0,
            draw_count: 25,
            ..SimConfig::default()
        };
        let s = cfg.settings();
        assert_eq!(s.draw_count(), 25);
        assert_eq!(s.max_draw_count(), 100);
        assert_eq!(s.value(crate::sim::SettingId::CameraHeight), 300.0);
        assert_eq!(s.get(crate::sim::SettingId::CameraX).min, -400.0);
    }

    #[test]
    fn accepted_config_seeds_settings_unchanged() {
        let cfg = SimConfig {
            fov: 1.0,
            camera_height: 1000.0,
            camera_x: -400.0,
            ..SimConfig::default()
        };
        cfg.validate().unwrap();
        let s = cfg.settings();
        assert_eq!(s.value(crate::sim::SettingId::CameraFov), 1.0);
        assert_eq!(s.value(crate::sim::SettingId::CameraHeight), 1000.0);
        assert_eq!(s.value(crate::sim::SettingId::CameraX), -400.0);
    }

    #[test]
    fn bad_road_width_is_an_error_not_a_panic() {
        for road_width in [-400.0, f32::NAN, 0.0] {
            let cfg = SimConfig {
                road_width,
                ..SimConfig::default()
            };
            assert!(matches!(
                crate::engine::Simulation::new(&cfg),
                Err(ConfigError::BadRoadWidth(_))
            ));
        }
    }

    #[test]
    fn default_wrap_is_phase_locked() {
        assert_eq!(SimConfig::default().wrap, WrapPolicy::PhaseLocked);
    }
}

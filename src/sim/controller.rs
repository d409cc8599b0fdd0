use crate::world::{Camera, Road};

/// Where the controller ended up on the last [`CameraController::resolve_window`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Motion {
    /// `camera.z` advanced normally.
    #[default]
    Cruising,
    /// The window would have run off the table; depth was rewritten.
    Wrapping,
}

/// How `camera.z` is rewritten when the window wraps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum WrapPolicy {
    /// `z' = restart·L + z/L` – old position folded in as a fraction.
    /// Road edges land back on the same screen lines but the dashes jump.
    Blend,
    /// `z' = restart·L + (z mod L)` – keeps the phase inside a segment, so
    /// the frame after a wrap matches the unwrapped one.
    #[default]
    PhaseLocked,
}

/// Contiguous range of segment indices rendered this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Window {
    pub offset: usize,
    pub draw_count: usize,
    pub motion: Motion,
}

/// Owns the camera and drives it down the road.
///
/// * `advance` is the only time-driven mutation.
/// * `resolve_window` keeps `offset + draw_count + 1 < N`.
#[derive(Clone, Debug)]
pub struct CameraController {
    camera: Camera,
    speed: f32,     // z units per second
    restart: usize, // window offset after a wrap
    policy: WrapPolicy,
    motion: Motion,
    wraps: u64,
}

impl CameraController {
    pub fn new(camera: Camera, speed: f32, restart: usize, policy: WrapPolicy) -> Self {
        Self {
            camera,
            speed,
            restart,
            policy,
            motion: Motion::Cruising,
            wraps: 0,
        }
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// State left behind by the last window resolution.
    #[inline]
    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Number of wraps since construction.
    #[inline]
    pub fn wraps(&self) -> u64 {
        self.wraps
    }

    /// Move forward by `dt` seconds of travel.
    pub fn advance(&mut self, dt: f32) {
        debug_assert!(dt >= 0.0, "negative frame time {dt}");
        self.camera.pos.z += dt * self.speed;
    }

    /// Pick the segment window for this frame, wrapping if it would run past
    /// the end of `road`.
    pub fn resolve_window(&mut self, road: &Road, draw_count: usize) -> Window {
        let len = road.segment_length();
        let z = self.camera.pos.z;
        let mut offset = (z / len).floor().max(0.0) as usize;

        if offset >= road.len().saturating_sub(draw_count + 1) {
            offset = self.restart;
            let base = offset as f32 * len;
            self.camera.pos.z = match self.policy {
                WrapPolicy::Blend => base + z / len,
                WrapPolicy::PhaseLocked => base + z.rem_euclid(len),
            };
            self.motion = Motion::Wrapping;
            self.wraps += 1;
            log::debug!(
                "wrap #{}: z {:.1} -> {:.1}, offset -> {}",
                self.wraps,
                z,
                self.camera.pos.z,
                offset
            );
        } else {
            self.motion = Motion::Cruising;
        }

        debug_assert!(
            offset + draw_count + 1 < road.len(),
            "window {offset}+{draw_count} overruns road of {}",
            road.len()
        );

        Window {
            offset,
            draw_count,
            motion: self.motion,
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/

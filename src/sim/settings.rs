// User-tunable parameters.  The UI side (sliders, keys) only ever produces
// a `SettingChange`; the simulation applies it synchronously.

use std::fmt;

/// Name of one tunable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SettingId {
    CameraX,
    CameraHeight,
    CameraFov,
    DrawCount,
    Speed,
}

impl SettingId {
    pub const ALL: [SettingId; 5] = [
        SettingId::CameraX,
        SettingId::CameraHeight,
        SettingId::CameraFov,
        SettingId::DrawCount,
        SettingId::Speed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SettingId::CameraX => "cameraX",
            SettingId::CameraHeight => "cameraHeight",
            SettingId::CameraFov => "cameraFOV",
            SettingId::DrawCount => "drawCount",
            SettingId::Speed => "speed",
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

/// Current value plus its allowed range and the nudge increment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tunable {
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Tunable {
    pub fn new(value: f32, min: f32, max: f32, step: f32) -> Self {
        Self {
            value: value.clamp(min, max),
            min,
            max,
            step,
        }
    }
}

/// Typed update produced by [`Settings`], consumed by the simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SettingChange {
    CameraX(f32),
    CameraHeight(f32),
    CameraFov(f32),
    DrawCount(usize),
    Speed(f32),
}

/// The five tunables, always kept inside `[min, max]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    tunables: [Tunable; 5],
}

impl Settings {
    pub fn new(
        camera_x: Tunable,
        camera_height: Tunable,
        camera_fov: Tunable,
        draw_count: Tunable,
        speed: Tunable,
    ) -> Self {
        Self {
            tunables: [camera_x, camera_height, camera_fov, draw_count, speed],
        }
    }

    #[inline]
    pub fn get(&self, id: SettingId) -> &Tunable {
        &self.tunables[id.slot()]
    }

    #[inline]
    pub fn value(&self, id: SettingId) -> f32 {
        self.get(id).value
    }

    pub fn draw_count(&self) -> usize {
        self.value(SettingId::DrawCount) as usize
    }

    /// Largest draw count the slider allows; doubles as the wrap restart.
    pub fn max_draw_count(&self) -> usize {
        self.get(SettingId::DrawCount).max as usize
    }

    /// Clamp `value` into range, store it and describe the change.
    pub fn set(&mut self, id: SettingId, value: f32) -> SettingChange {
        let t = &mut self.tunables[id.slot()];
        t.value = value.clamp(t.min, t.max);
        if id == SettingId::DrawCount {
            t.value = t.value.round();
        }
        self.change(id)
    }

    /// Move by `steps` increments.
    pub fn nudge(&mut self, id: SettingId, steps: f32) -> SettingChange {
        let t = self.get(id);
        self.set(id, t.value + t.step * steps)
    }

    /// Store a change produced elsewhere.  No clamping: the producer owns
    /// the range check.
    pub fn record(&mut self, change: SettingChange) {
        let (id, value) = match change {
            SettingChange::CameraX(v) => (SettingId::CameraX, v),
            SettingChange::CameraHeight(v) => (SettingId::CameraHeight, v),
            SettingChange::CameraFov(v) => (SettingId::CameraFov, v),
            SettingChange::DrawCount(n) => (SettingId::DrawCount, n as f32),
            SettingChange::Speed(v) => (SettingId::Speed, v),
        };
        self.tunables[id.slot()].value = value;
    }

    /// Current value of `id` expressed as a change.
    pub fn change(&self, id: SettingId) -> SettingChange {
        let v = self.value(id);
        match id {
            SettingId::CameraX => SettingChange::CameraX(v),
            SettingId::CameraHeight => SettingChange::CameraHeight(v),
            SettingId::CameraFov => SettingChange::CameraFov(v),
            SettingId::DrawCount => SettingChange::DrawCount(v as usize),
            SettingId::Speed => SettingChange::Speed(v),
        }
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in SettingId::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str("  ")?;
            }
            write!(f, "{}: {}", id.name(), self.value(*id))?;
        }
        Ok(())
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/

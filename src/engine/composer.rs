use glam::{vec2, vec3};

use crate::{
    config::{ConfigError, MirrorLayout, SimConfig},
    engine::{
        frame::{FrameRenderer, Readout},
        types::Viewport,
    },
    renderer::{DrawCall, Layers, Line, StrokeKind},
    sim::{CameraController, SettingChange, SettingId, Settings, Window},
    world::{Camera, Road, RoadError},
};

/// Split a `width × height` surface into the forward view and the
/// rear-view inset.
///
/// * forward: whole surface, pushed down by `max(0, height − size)`
/// * mirror:  `size·w × size·h`, anchored at `(width/2, size/4)` of the
///   forward view
pub fn layout(width: f32, height: f32, mirror: &MirrorLayout) -> (Viewport, Viewport) {
    let size = width.min(height);
    let main = Viewport::at(vec2(0.0, (height - size).max(0.0)), width, height);
    let inset = Viewport::at(
        main.origin + vec2(width * 0.5, size * 0.25),
        size * mirror.width,
        size * mirror.height,
    );
    (main, inset)
}

/// Owns everything that lives for the whole session and runs the
/// per-frame `advance → resolve → forward pass → mirror pass` cycle.
pub struct Simulation {
    road: Road,
    controller: CameraController,
    settings: Settings,
    frame: FrameRenderer,
    mirror: MirrorLayout,
    window: Window,
    calls: Vec<DrawCall>,
}

impl Simulation {
    /// Build the road described by `cfg` and park the camera at the
    /// restart offset.
    pub fn new(cfg: &SimConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let road = cfg.build_road()?;
        Self::with_road(cfg, road)
    }

    /// Same as [`Simulation::new`] but with an externally authored table.
    pub fn with_road(cfg: &SimConfig, road: Road) -> Result<Self, ConfigError> {
        cfg.validate_for(road.len())?;
        let settings = cfg.settings();
        let restart = settings.max_draw_count();
        let camera = Camera::new(
            vec3(
                settings.value(SettingId::CameraX),
                settings.value(SettingId::CameraHeight),
                restart as f32 * road.segment_length(),
            ),
            settings.value(SettingId::CameraFov),
        );
        let controller = CameraController::new(
            camera,
            settings.value(SettingId::Speed),
            restart,
            cfg.wrap,
        );
        log::info!(
            "road: {} segments × {}, restart offset {}, wrap {:?}",
            road.len(),
            road.segment_length(),
            restart,
            cfg.wrap
        );
        Ok(Self {
            road,
            controller,
            settings,
            frame: FrameRenderer::new(cfg.road_width),
            mirror: cfg.mirror,
            window: Window::default(),
            calls: Vec::new(),
        })
    }

    /*──────────────────────── accessors ───────────────────────*/

    #[inline]
    pub fn camera(&self) -> &Camera {
        self.controller.camera()
    }

    #[inline]
    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Window chosen by the last [`Simulation::render`].
    #[inline]
    pub fn window(&self) -> Window {
        self.window
    }

    pub fn readout(&self) -> Readout {
        Readout {
            pos: self.camera().pos,
            offset: self.window.offset,
        }
    }

    #[inline]
    pub fn layers(&self) -> Layers {
        self.frame.layers
    }

    pub fn toggle(&mut self, layers: Layers) {
        self.frame.layers.toggle(layers);
    }

    /*──────────────────────── settings ───────────────────────*/

    /// Clamp through the settings surface, then apply.
    pub fn set(&mut self, id: SettingId, value: f32) -> SettingChange {
        let change = self.settings.set(id, value);
        self.apply(change);
        change
    }

    pub fn nudge(&mut self, id: SettingId, steps: f32) -> SettingChange {
        let change = self.settings.nudge(id, steps);
        self.apply(change);
        change
    }

    /// Apply a change synchronously.  Values are trusted as given.
    pub fn apply(&mut self, change: SettingChange) {
        self.settings.record(change);
        match change {
            SettingChange::CameraX(x) => self.controller.camera_mut().pos.x = x,
            SettingChange::CameraHeight(y) => self.controller.camera_mut().pos.y = y,
            SettingChange::CameraFov(fov) => self.controller.camera_mut().set_fov(fov),
            SettingChange::DrawCount(_) => {} // read from settings each frame
            SettingChange::Speed(v) => self.controller.set_speed(v),
        }
        log::info!("setting {change:?}");
    }

    /*──────────────────────── frame cycle ───────────────────────*/

    /// Advance the camera by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.controller.advance(dt);
    }

    /// Resolve the window and emit both passes for a surface of the given
    /// size.  Call once per frame after [`Simulation::update`].
    pub fn render(&mut self, width: f32, height: f32) -> Result<&[DrawCall], RoadError> {
        self.calls.clear();
        self.window = self
            .controller
            .resolve_window(&self.road, self.settings.draw_count());

        let cam = *self.controller.camera();
        let (main, inset) = layout(width, height, &self.mirror);

        self.frame
            .render_view(&cam, &self.road, &main, self.window, false, &mut self.calls)
            .inspect_err(|e| log::warn!("forward pass aborted: {e}"))?;

        if self.frame.layers.contains(Layers::MIRROR) {
            self.calls.push(DrawCall::Fill(inset));
            let (lo, hi) = (inset.origin, inset.max());
            let corners = [lo, vec2(hi.x, lo.y), hi, vec2(lo.x, hi.y)];
            for (i, &from) in corners.iter().enumerate() {
                self.calls.push(DrawCall::Stroke(Line {
                    from,
                    to: corners[(i + 1) % corners.len()],
                    kind: StrokeKind::MirrorFrame,
                }));
            }
            self.calls.push(DrawCall::Clip(Some(inset)));
            self.frame
                .render_view(&cam, &self.road, &inset, self.window, true, &mut self.calls)
                .inspect_err(|e| log::warn!("mirror pass aborted: {e}"))?;
            self.calls.push(DrawCall::Clip(None));
        }
        Ok(&self.calls)
    }

    /// `update` then `render`.
    pub fn tick(&mut self, dt: f32, width: f32, height: f32) -> Result<&[DrawCall], RoadError> {
        self.update(dt);
        self.render(width, height)
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Motion, WrapPolicy};

    const W: f32 = 1024.0;
    const H: f32 = 768.0;

    fn sim(cfg: &SimConfig, z: f32) -> Simulation {
        let mut s = Simulation::new(cfg).unwrap();
        s.controller.camera_mut().pos.z = z;
        s
    }

    fn forward_strokes(calls: &[DrawCall], draw_count: usize) -> Vec<Line> {
        calls[..draw_count * 3 + 1]
            .iter()
            .map(|c| match c {
                DrawCall::Stroke(l) => *l,
                other => panic!("unexpected {other:?} in forward pass"),
            })
            .collect()
    }

    #[test]
    fn layout_matches_surface() {
        let (main, inset) = layout(W, H, &MirrorLayout::default());
        assert_eq!(main, Viewport::new(W, H));
        assert_eq!(inset.origin, vec2(512.0, 192.0));
        assert!((inset.width - 153.6).abs() < 1e-3);
        assert!((inset.height - 53.76).abs() < 1e-3);

        // portrait: forward view pushed down so the road sits at the bottom
        let (main, inset) = layout(400.0, 700.0, &MirrorLayout::default());
        assert_eq!(main.origin, vec2(0.0, 300.0));
        assert_eq!(inset.origin, vec2(200.0, 400.0));
    }

    #[test]
    fn starts_at_restart_offset() {
        let s = Simulation::new(&SimConfig::default()).unwrap();
        assert_eq!(s.camera().pos, vec3(400.0 / 3.0, 150.0, 20_000.0));
        assert!((s.camera().focal() - 0.577_350_3).abs() < 1e-5);
    }

    #[test]
    fn cruising_tick_scenario() {
        let mut s = sim(&SimConfig::default(), 159_800.0);
        s.set(SettingId::CameraX, 133.3);
        let calls = s.tick(0.1, W, H).unwrap().len();

        assert_eq!(s.camera().pos.z, 159_850.0);
        assert_eq!(s.window().offset, 799);
        assert_eq!(s.window().motion, Motion::Cruising);
        // forward 40·3 + horizon, mirror fill + 4 frame + clip + 40·3 + horizon + clip
        assert_eq!(calls, 121 + 1 + 4 + 1 + 121 + 1);
        assert_eq!(s.readout().to_string(), "Camera: 133.30, 150.00, 159900 (799)");
    }

    #[test]
    fn wrapping_tick_scenario() {
        let cfg = SimConfig {
            wrap: WrapPolicy::Blend,
            ..SimConfig::default()
        };
        let mut s = sim(&cfg, 960.0 * 200.0);
        s.set(SettingId::Speed, 0.0);
        s.tick(0.0, W, H).unwrap();
        assert_eq!(s.window().motion, Motion::Wrapping);
        assert_eq!(s.window().offset, 100);
        assert_eq!(s.camera().pos.z, 20_960.0);
    }

    #[test]
    fn resize_between_frames_is_honoured() {
        let mut s = Simulation::new(&SimConfig::default()).unwrap();
        let small = s.tick(0.0, 320.0, 240.0).unwrap().to_vec();
        let large = s.tick(0.0, 1280.0, 960.0).unwrap().to_vec();
        // third segment: far enough from the camera to be well conditioned
        let (DrawCall::Stroke(a), DrawCall::Stroke(b)) = (&small[6], &large[6]) else {
            panic!("forward pass is all strokes");
        };
        assert!((a.from * 4.0 - b.from).length() < 1e-2);
    }

    #[test]
    fn fov_change_applies_before_next_frame() {
        let mut s = Simulation::new(&SimConfig::default()).unwrap();
        assert_eq!(s.set(SettingId::CameraFov, 90.0), SettingChange::CameraFov(90.0));
        assert!((s.camera().focal() - 1.0).abs() < 1e-6);

        // out-of-range input is clamped by the settings surface
        assert_eq!(s.set(SettingId::CameraFov, 180.0), SettingChange::CameraFov(179.0));
        assert!(s.camera().focal().is_finite());
    }

    #[test]
    fn applied_changes_reach_camera_and_settings() {
        let mut s = Simulation::new(&SimConfig::default()).unwrap();
        s.apply(SettingChange::CameraHeight(320.0));
        s.apply(SettingChange::DrawCount(12));
        s.apply(SettingChange::Speed(900.0));
        assert_eq!(s.camera().pos.y, 320.0);
        assert_eq!(s.settings().draw_count(), 12);
        assert_eq!(s.controller().speed(), 900.0);

        s.tick(0.0, W, H).unwrap();
        assert_eq!(s.window().draw_count, 12);
    }

    #[test]
    fn mirror_layer_can_be_switched_off() {
        let mut s = Simulation::new(&SimConfig::default()).unwrap();
        s.toggle(Layers::MIRROR);
        assert!(!s.layers().contains(Layers::MIRROR));
        let calls = s.tick(0.0, W, H).unwrap();
        assert_eq!(calls.len(), 121);
        assert!(!calls.iter().any(|c| matches!(c, DrawCall::Clip(_))));
    }

    /// Largest endpoint distance between two forward passes, ignoring the
    /// two nearest segments where sub-unit depth noise is amplified.
    fn forward_drift(a: &[Line], b: &[Line]) -> f32 {
        a[6..]
            .iter()
            .zip(&b[6..])
            .map(|(la, lb)| (la.from - lb.from).length().max((la.to - lb.to).length()))
            .fold(0.0, f32::max)
    }

    /// Drive `cfg` and the same config on a road that never wraps side by
    /// side across the wrap point; returns the per-frame forward drift and
    /// whether that frame wrapped.
    fn drive_across_wrap(cfg: &SimConfig) -> Vec<(bool, f32)> {
        let endless = SimConfig {
            segment_count: 5000,
            ..cfg.clone()
        };
        let start = 959.0 * 200.0 - 60.0;
        let mut a = sim(cfg, start);
        let mut b = sim(&endless, start);
        let dt = 1.0 / 60.0;

        (0..30)
            .map(|_| {
                let fa = forward_strokes(a.tick(dt, W, H).unwrap(), 40);
                let fb = forward_strokes(b.tick(dt, W, H).unwrap(), 40);
                assert_eq!(b.window().motion, Motion::Cruising);
                (a.window().motion == Motion::Wrapping, forward_drift(&fa, &fb))
            })
            .collect()
    }

    #[test]
    fn default_wrap_is_invisible() {
        let frames = drive_across_wrap(&SimConfig::default());
        assert_eq!(frames.iter().filter(|(w, _)| *w).count(), 1);
        // dashes and near-edge rows included: both depend on camera z
        for (i, &(_, drift)) in frames.iter().enumerate() {
            assert!(drift < 0.5, "frame {i} drifted {drift}px");
        }
    }

    #[test]
    fn blend_wrap_shifts_segment_phase() {
        let frames = drive_across_wrap(&SimConfig {
            wrap: WrapPolicy::Blend,
            ..SimConfig::default()
        });
        let wrap = frames.iter().position(|(w, _)| *w).unwrap();
        assert!(frames[..wrap].iter().all(|&(_, d)| d < 0.5));
        let (_, drift) = frames[wrap];
        assert!(drift > 5.0, "blend wrap drifted only {drift}px");
    }

    #[test]
    fn authored_table_is_accepted() {
        let cfg = SimConfig::default();
        let road = Road::from_waypoints(
            200.0,
            (0..400).map(|i| ((i as f32 * 0.05).sin() * 200.0, i as f32 * 200.0)),
        )
        .unwrap();
        let mut s = Simulation::with_road(&cfg, road).unwrap();
        s.tick(1.0 / 60.0, W, H).unwrap();
        assert_eq!(s.window().offset, 100);

        let short = Road::straight(150, 200.0).unwrap();
        assert!(matches!(
            Simulation::with_road(&cfg, short),
            Err(ConfigError::RoadTooShort { len: 150, .. })
        ));
    }
}

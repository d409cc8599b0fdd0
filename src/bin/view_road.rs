//! Interactive pseudo-3D highway with a rear-view mirror.
//!
//! Controls  ←/→ = camera x   PgUp/PgDn = height   [ / ] = fov
//!           - / = = draw count   ↓/↑ = speed
//!           E/C/H/M = toggle edges / centre line / horizon / mirror
//!           Esc = quit
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- --winding 400
//! ```

use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::time::{Duration, Instant};

use chill_road::{
    config::{self, RoadShape, SimConfig},
    engine::Simulation,
    renderer::{Layers, RendererExt, Software},
    sim::{SettingId, WrapPolicy},
};

#[derive(Parser, Debug)]
#[command(about = "Pseudo-3D highway renderer")]
struct Args {
    /// Initial window width in pixels
    #[arg(long, default_value_t = 1024)]
    width: usize,
    /// Initial window height in pixels
    #[arg(long, default_value_t = 768)]
    height: usize,
    #[arg(long, default_value_t = 60)]
    fps: usize,
    /// Number of anchors in the road table
    #[arg(long, default_value_t = config::SEGMENT_COUNT)]
    segments: usize,
    /// Lateral swing of a winding road (straight if omitted)
    #[arg(long)]
    winding: Option<f32>,
    /// Segments per radian of the winding road
    #[arg(long, default_value_t = 10.0)]
    period: f32,
    #[arg(long, value_enum, default_value_t = WrapPolicy::PhaseLocked)]
    wrap: WrapPolicy,
    #[arg(long, default_value_t = config::SPEED)]
    speed: f32,
    #[arg(long, default_value_t = config::CAMERA_FOV)]
    fov: f32,
    #[arg(long, default_value_t = config::CAMERA_HEIGHT)]
    height_above_road: f32,
}

impl Args {
    fn sim_config(&self) -> SimConfig {
        SimConfig {
            segment_count: self.segments,
            shape: match self.winding {
                Some(amplitude) => RoadShape::Winding {
                    amplitude,
                    period: self.period,
                },
                None => RoadShape::Straight,
            },
            speed: self.speed,
            fov: self.fov,
            camera_height: self.height_above_road,
            wrap: self.wrap,
            ..SimConfig::default()
        }
    }
}

/// Key → (setting, nudge direction).
const NUDGES: [(Key, SettingId, f32); 10] = [
    (Key::Left, SettingId::CameraX, -1.0),
    (Key::Right, SettingId::CameraX, 1.0),
    (Key::PageDown, SettingId::CameraHeight, -1.0),
    (Key::PageUp, SettingId::CameraHeight, 1.0),
    (Key::LeftBracket, SettingId::CameraFov, -1.0),
    (Key::RightBracket, SettingId::CameraFov, 1.0),
    (Key::Minus, SettingId::DrawCount, -1.0),
    (Key::Equal, SettingId::DrawCount, 1.0),
    (Key::Down, SettingId::Speed, -1.0),
    (Key::Up, SettingId::Speed, 1.0),
];

const TOGGLES: [(Key, Layers); 4] = [
    (Key::E, Layers::EDGES),
    (Key::C, Layers::CENTER_LINE),
    (Key::H, Layers::HORIZON),
    (Key::M, Layers::MIRROR),
];

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut sim = Simulation::new(&args.sim_config())?;
    log::info!("{}", sim.settings());

    let mut renderer = Software::default();
    let mut win = Window::new(
        "chill road",
        args.width,
        args.height,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )?;
    win.set_target_fps(args.fps);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    let mut title = String::new();
    let mut last_frame = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        /* settings ---------------------------------------------------------- */
        for &(key, id, dir) in &NUDGES {
            if win.is_key_pressed(key, KeyRepeat::Yes) {
                sim.nudge(id, dir);
            }
        }
        for &(key, layer) in &TOGGLES {
            if win.is_key_pressed(key, KeyRepeat::No) {
                sim.toggle(layer);
            }
        }

        /* advance + draw ---------------------------------------------------- */
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        let (w, h) = win.get_size();
        if w == 0 || h == 0 {
            // minimised: keep time flowing, skip the frame
            sim.update(dt);
            win.update();
            continue;
        }

        let t0 = Instant::now();
        let calls = sim.tick(dt, w as f32, h as f32)?;

        let mut shown = Ok(());
        renderer.draw_frame(w, h, calls, |fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            shown = win.update_with_buffer(fb, w, h);
        });
        shown?;

        let readout = sim.readout().to_string();
        if readout != title {
            win.set_title(&readout);
            title = readout;
        }

        if last_print.elapsed() >= Duration::from_secs(3) && acc_frames > 0 {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            println!(
                "avg render: {:.2} ms  ({} wraps)  {}",
                avg_ms,
                sim.controller().wraps(),
                title
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

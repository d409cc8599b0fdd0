//! Headless drive: runs the frame cycle at a fixed step without a window
//! and prints the camera readout once per simulated second.
//!
//! ```bash
//! cargo run --bin road_trace -- --seconds 600 --wrap phase-locked
//! ```

use clap::Parser;

use chill_road::{
    config::{RoadShape, SimConfig},
    engine::Simulation,
    renderer::{RendererExt, Software},
    sim::{Motion, WrapPolicy},
};

#[derive(Parser, Debug)]
#[command(about = "Drive the road without a window and trace the camera")]
struct Args {
    /// Simulated seconds to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,
    /// Fixed frame step in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    #[arg(long, default_value_t = 2000.0)]
    speed: f32,
    #[arg(long, value_enum, default_value_t = WrapPolicy::PhaseLocked)]
    wrap: WrapPolicy,
    /// Lateral swing of a winding road (straight if omitted)
    #[arg(long)]
    winding: Option<f32>,
    /// Also rasterise every frame into a `width × height` buffer
    #[arg(long)]
    raster: bool,
    #[arg(long, default_value_t = 640)]
    width: usize,
    #[arg(long, default_value_t = 480)]
    height: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    anyhow::ensure!(args.dt > 0.0, "--dt must be positive");

    let cfg = SimConfig {
        speed: args.speed,
        wrap: args.wrap,
        shape: args.winding.map_or(RoadShape::Straight, |amplitude| {
            RoadShape::Winding {
                amplitude,
                period: 10.0,
            }
        }),
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(&cfg)?;
    let mut renderer = Software::default();

    let frames = (args.seconds / args.dt).ceil() as u64;
    let per_second = (1.0 / args.dt).round().max(1.0) as u64;
    let (w, h) = (args.width as f32, args.height as f32);
    let mut strokes = 0usize;
    let mut inked = 0usize;

    for frame in 1..=frames {
        let calls = sim.tick(args.dt, w, h)?;
        strokes += calls.len();
        if args.raster {
            renderer.draw_frame(args.width, args.height, calls, |fb, _, _| {
                inked += fb
                    .iter()
                    .filter(|&&px| px != chill_road::renderer::software::BACKGROUND)
                    .count();
            });
        }
        if sim.window().motion == Motion::Wrapping {
            println!("frame {frame}: wrapped -> {}", sim.readout());
        }
        if frame % per_second == 0 {
            println!("t={:>5}s  {}", frame / per_second, sim.readout());
        }
    }

    println!(
        "{frames} frames, {} wraps, {:.1} draw calls/frame",
        sim.controller().wraps(),
        strokes as f64 / frames.max(1) as f64
    );
    if args.raster {
        println!(
            "{:.1} inked pixels/frame",
            inked as f64 / frames.max(1) as f64
        );
    }
    Ok(())
}

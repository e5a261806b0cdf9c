use clap::Parser;
use fire_effect_core::{EffectSettings, FireSimulation, FrameBuffer, InputIntent, SimulationConfig};
use image::RgbaImage;
use std::error::Error;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Headless fire effect runner
#[derive(Parser, Debug)]
#[command(name = "fire-effect-demo")]
#[command(about = "Runs the procedural fire effect without a window", long_about = None)]
struct Args {
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 300)]
    frames: u64,

    /// Grid width in cells
    #[arg(long, default_value_t = 320)]
    width: usize,

    /// Visible grid height in cells
    #[arg(long, default_value_t = 240)]
    height: usize,

    /// Hotspots per frame (0-300)
    #[arg(long, default_value_t = 152)]
    hotspots: usize,

    /// Cooling rows scrolled per frame (0-5)
    #[arg(short, long, default_value_t = 2)]
    power: usize,

    /// Palette to start with, by name
    #[arg(long)]
    palette: Option<String>,

    /// Keep the first hotspot set for the whole run
    #[arg(long)]
    pin: bool,

    /// Random seed (omit for an OS-seeded run)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Hold the pointer at X,Y during every frame, e.g. "160,120"
    #[arg(long, value_parser = parse_point)]
    ignite: Option<(i32, i32)>,

    /// Simulated frame rate, used for the session clock
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Report interval in frames
    #[arg(short, long, default_value_t = 60)]
    report_interval: u64,

    /// Save the final frame as an image; the format follows the extension (e.g. fire.png)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_point(value: &str) -> Result<(i32, i32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{value}'"))?;
    let x = x.trim().parse().map_err(|e| format!("bad X: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad Y: {e}"))?;
    Ok((x, y))
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    println!("=== Fire Effect Demo ===\n");

    let settings = EffectSettings::with_size(args.width, args.height);
    let config = SimulationConfig {
        num_hotspots: args.hotspots,
        fire_power: args.power,
        hotspots_pinned: args.pin,
        paused: false,
    };
    let mut sim = match args.seed {
        Some(seed) => FireSimulation::seeded(settings, config, seed)?,
        None => FireSimulation::with_config(settings, config)?,
    };

    if let Some(name) = &args.palette {
        match sim.palettes().index_of(name) {
            Some(index) => sim.select_palette(index),
            None => warn!(
                "Unknown palette '{}', keeping {}",
                name,
                sim.palettes().name_at(sim.active_palette())
            ),
        }
    }

    let snapshot = sim.snapshot();
    println!(
        "Grid: {}x{}, hotspots: {}, fire power: {}, palette: {}",
        args.width, args.height, snapshot.num_hotspots, snapshot.fire_power, snapshot.palette_name
    );
    println!("Running {} frames...\n", args.frames);
    println!("  Frame | Flame height | Scroll | Step (ms) | Avg step (ms)");
    println!("--------|--------------|--------|-----------|--------------");

    let intent = match args.ignite {
        Some((x, y)) => InputIntent::press_at(x, y),
        None => InputIntent::none(),
    };
    let dt = 1.0 / args.fps.max(1.0);
    let report_interval = args.report_interval.max(1);

    let mut total_step_ms = 0.0;
    for frame in 1..=args.frames {
        sim.advance(&intent, dt);
        let snapshot = sim.snapshot();
        total_step_ms += snapshot.last_step_ms;

        if frame % report_interval == 0 || frame == args.frames {
            println!(
                "{:7} | {:12} | {:6} | {:9.3} | {:13.3}",
                frame,
                snapshot.flame_height,
                sim.scroll_offset(),
                snapshot.last_step_ms,
                total_step_ms / frame as f64
            );
        }
    }

    let hot_cells = sim
        .intensity()
        .visible()
        .iter()
        .filter(|&&v| v > sim.settings().flame_threshold)
        .count();
    println!("\n=== Run Complete ===");
    println!("Simulated time: {:.2}s", sim.clock());
    println!("Final flame height: {}", sim.flame_height());
    println!("Cells above flame threshold: {hot_cells}");

    if let Some(path) = &args.output {
        frame_image(sim.frame())?.save(path)?;
        info!("Wrote final frame to {}", path.display());
    }

    Ok(())
}

/// Copy a finished frame into an `image` buffer for encoding.
fn frame_image(frame: &FrameBuffer) -> Result<RgbaImage, Box<dyn Error>> {
    let width = u32::try_from(frame.width())?;
    let height = u32::try_from(frame.height())?;
    RgbaImage::from_raw(width, height, frame.pixels().to_vec())
        .ok_or_else(|| "frame buffer does not match its dimensions".into())
}

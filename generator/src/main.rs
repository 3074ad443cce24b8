use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use slope_track::{ChanceSpawnPolicy, OrthographicViewport, ScrollController, TerrainSlot, TrackConfig};

mod markers;
mod visualizer;

use markers::MarkerSpawner;
use visualizer::TerrainVisualizer;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML track configuration; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// The seed for terrain generation, overriding the configuration
    #[arg(short, long)]
    seed: Option<i32>,

    /// Number of frames to scroll
    #[arg(short, long, default_value_t = 120)]
    frames: u32,

    /// Camera movement per frame, in world units
    #[arg(long, default_value_t = 1.5)]
    speed: f64,

    /// Viewport width in world units
    #[arg(short, long, default_value_t = 80.0)]
    width: f64,

    /// The output PNG file path
    #[arg(short, long, default_value = "target/terrain.png")]
    output: PathBuf,

    /// Pixels per world unit when rendering the image
    #[arg(long, default_value_t = 10)]
    scale: u32,

    /// Overlay the front-face triangle edges
    #[arg(long)]
    wireframe: bool,

    /// Also dump the final mesh as JSON to this path
    #[arg(long)]
    mesh_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => TrackConfig::load(path)
            .with_context(|| format!("loading track configuration from {}", path.display()))?,
        None => TrackConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut viewport = OrthographicViewport::new(args.width / 2.0, args.width);
    let mut controller = ScrollController::new(config, &viewport)?;
    let mut policy = ChanceSpawnPolicy::new(controller.rng(), controller.config()).with_variants(3, 3);
    let mut spawner = MarkerSpawner::default();
    let mut slot = TerrainSlot::default();

    info!(
        "Scrolling {} frames at {} units/frame over a {}-unit viewport...",
        args.frames, args.speed, args.width
    );
    for frame in 0..args.frames {
        let regenerated = controller.tick(&viewport, &mut slot);
        let spawned = controller.populate(&mut policy, &mut spawner);
        let pruned = controller.prune_spawned(&viewport, &mut spawner);
        debug!(
            "frame {}: camera_x={:.2} regenerated={} spawned={} pruned={}",
            frame, viewport.camera_x, regenerated, spawned, pruned
        );
        viewport = viewport.with_camera_x(viewport.camera_x + args.speed);
    }
    info!(
        "{} mesh uploads, {} objects spawned, {} pruned",
        slot.uploads, spawner.spawned, spawner.destroyed
    );

    let mesh = slot.mesh.clone().unwrap_or_else(|| controller.mesh());
    let outline = slot.outline.clone().unwrap_or_else(|| controller.outline());

    if let Some(path) = &args.mesh_json {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &*mesh)?;
        info!("Wrote mesh ({} vertices) to {}", mesh.vertex_count(), path.display());
    }

    info!("Saving terrain visualization to {}...", args.output.display());
    let visualizer = TerrainVisualizer::new(args.scale)?;
    let img = visualizer.render(&mesh, &outline, spawner.live(), args.wireframe)?;
    if let Some(parent) = args.output.parent() {
        fs::create_dir_all(parent)?;
    }
    img.save(&args.output)
        .with_context(|| format!("saving {}", args.output.display()))?;
    info!("Done!");
    Ok(())
}

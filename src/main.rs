//! glowfield - headless scene runner
//!
//! Runs the simulation for a fixed number of frames against a backend that
//! only counts what it is handed, and logs what happened.

use std::path::PathBuf;
use std::sync::Arc;

use glowfield::core::logging;
use glowfield::core::Result;
use glowfield::render::{BufferTarget, CameraUniform, MaterialSlot, RenderBackend};
use glowfield::scene::{JsonModelLoader, SceneConfig, Simulation};
use glowfield::shading::HologramUniform;

/// Frames to simulate
const FRAMES: u64 = 600;

/// Simulated display refresh
const FRAME_DELTA: f32 = 1.0 / 60.0;

/// Log a summary every this many frames
const REPORT_INTERVAL: u64 = 120;

/// Backend that tallies uploads instead of drawing.
#[derive(Default)]
struct CountingBackend {
    uploaded_bytes: usize,
    uploads: usize,
    draws: u64,
}

impl RenderBackend for CountingBackend {
    fn upload(&mut self, target: BufferTarget, bytes: &[u8]) {
        log::trace!("upload {:?}: {} bytes", target, bytes.len());
        self.uploads += 1;
        self.uploaded_bytes += bytes.len();
    }

    fn set_material(&mut self, _slot: MaterialSlot, _uniform: &HologramUniform) {}

    fn set_camera(&mut self, _camera: &CameraUniform) {}

    fn draw(&mut self) {
        self.draws += 1;
    }
}

fn main() {
    logging::init();
    log::info!("glowfield starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = match parse_config_arg(&args) {
        Some(path) => SceneConfig::load(&path)?,
        None => SceneConfig::default(),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;

    let model_path = config.model_path.clone();
    let mut sim = Simulation::new(config)?;
    if let Some(path) = model_path {
        log::info!("Loading model from: {}", path.display());
        sim.begin_load(runtime.handle(), Arc::new(JsonModelLoader), path);
    }

    let mut backend = CountingBackend::default();
    for _ in 0..FRAMES {
        let stats = sim.frame(FRAME_DELTA);
        sim.submit(&mut backend);

        if stats.frame % REPORT_INTERVAL == 0 {
            log::info!(
                "frame {:>4} t={:.2}s visible blades={} live particles={} model={}",
                stats.frame,
                stats.time,
                stats.visible_blades,
                stats.live_particles,
                stats.has_model
            );
        }
    }

    log::info!(
        "Done: {} draws, {} uploads, {:.1} MiB uploaded, {} particles emitted",
        backend.draws,
        backend.uploads,
        backend.uploaded_bytes as f64 / (1024.0 * 1024.0),
        sim.trail().total_emitted()
    );
    Ok(())
}

/// Config path: first positional argument, or `--config <path>`
fn parse_config_arg(args: &[String]) -> Option<PathBuf> {
    for i in 1..args.len() {
        if args[i] == "--config" || args[i] == "-c" {
            return args.get(i + 1).map(PathBuf::from);
        }
    }
    args.get(1).filter(|a| !a.starts_with('-')).map(PathBuf::from)
}

//! Head-coupled parallax viewer driven by face tracking.

use anyhow::{Context, Result};
use clap::Parser;
use head_parallax::{
    animation::ClockMode,
    app::{AppConfig, ParallaxApp},
    config::{Config, EXAMPLE_CONFIG},
    profile::ProfileKind,
    renderer::LogRenderer,
    scene::ModelKind,
    source::{DetectionSource, SyntheticHeadPath, TraceSource},
    utils::parse_size,
};
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Initial model (cube, character, room)
    #[arg(short, long)]
    model: Option<String>,

    /// Calibration profile (gentle, dramatic, custom)
    #[arg(short, long)]
    profile: Option<String>,

    /// Number of frames to run (0 runs until the trace ends; requires --trace)
    #[arg(short, long, default_value = "600")]
    frames: u64,

    /// Target framerate
    #[arg(long)]
    fps: Option<u32>,

    /// Run frames back to back instead of pacing to the framerate
    #[arg(long)]
    no_pace: bool,

    /// Replay detections from a YAML trace instead of the synthetic head
    #[arg(short, long)]
    trace: Option<String>,

    /// Cycle to the next model every N frames
    #[arg(long)]
    switch_every: Option<u64>,

    /// Start fullscreen with the given surface size, e.g. 1920x1080
    #[arg(long)]
    fullscreen: Option<String>,

    /// Advance animation by measured frame time instead of a fixed step
    #[arg(long)]
    measured_clock: bool,

    /// Seed for model placement and the synthetic head path
    #[arg(long)]
    seed: Option<u64>,

    /// Log a frame summary every N frames
    #[arg(long, default_value = "60")]
    log_every: u64,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Head Parallax Viewer");

    // Load configuration if provided
    let mut settings = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Command line overrides
    if let Some(model) = &args.model {
        settings.session.initial_model = model.parse::<ModelKind>()?;
    }
    if let Some(profile) = &args.profile {
        settings.profile = profile.parse::<ProfileKind>()?;
    }
    if let Some(fps) = args.fps {
        settings.display.target_fps = fps;
    }
    if let Some(seed) = args.seed {
        settings.session.seed = seed;
    }
    if args.measured_clock {
        settings.clock.mode = ClockMode::Measured;
    }

    let fullscreen = args
        .fullscreen
        .as_deref()
        .map(parse_size)
        .transpose()
        .context("Invalid --fullscreen size")?;

    let source: Box<dyn DetectionSource> = if let Some(trace) = &args.trace {
        Box::new(TraceSource::from_file(trace).with_context(|| format!("Failed to load trace {trace}"))?)
    } else {
        Box::new(SyntheticHeadPath::new(settings.session.seed, settings.display.target_fps))
    };

    let config = AppConfig {
        max_frames: (args.frames > 0).then_some(args.frames),
        pace: !args.no_pace,
        switch_every: args.switch_every,
        fullscreen,
    };

    // Create and run application
    let mut app = ParallaxApp::new(config, &settings, LogRenderer::new(args.log_every), source)?;
    let summary = app.run()?;

    if let Some(last) = summary.last_frame {
        info!(
            "Final camera position ({:.3}, {:.3}, {:.3})",
            last.camera.position.x, last.camera.position.y, last.camera.position.z
        );
    }

    Ok(())
}

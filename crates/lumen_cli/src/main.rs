//! Command line entry point: build the scene, render it, write the image.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use lumen_render::{render, save_png, save_ppm, RenderConfig};

mod scenes;

/// Log levels selectable from the command line.
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments.
#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "A recursive CPU ray tracer")]
struct Args {
    /// Output image path (.png selects PNG, anything else PPM)
    #[arg(default_value = "result.ppm")]
    output: PathBuf,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    debug_level: LogLevel,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.debug_level.into())
        .init();

    let (scene, camera) = scenes::build_scene();
    info!(
        "Scene: {} objects, {} lights",
        scene.object_count(),
        scene.light_count()
    );

    let start = Instant::now();
    let image = render(&scene, &camera, &RenderConfig::default());
    info!("Rendered in {:.2?}", start.elapsed());

    let is_png = args
        .output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png {
        save_png(&image, &args.output)?;
    } else {
        save_ppm(&image, &args.output)?;
    }

    Ok(())
}

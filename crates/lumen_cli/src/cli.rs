use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
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

/// Built-in scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    /// Ground plane covered in small random spheres, some of them moving
    BouncingSpheres,
    /// Diffuse, hollow glass and metal spheres side by side
    ThreeSpheres,
    /// One diffuse sphere in front of the camera
    SingleSphere,
}

#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "A CPU path tracer that writes plain-text PPM images")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "bouncing-spheres")]
    pub scene: SceneChoice,

    /// JSON file of camera settings; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum ray bounce depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for both scene generation and pixel sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file; the image goes to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,
}

//! `lumen` - render a built-in scene to a PPM image.

mod cli;
mod scenes;

use std::fs;
use std::io::{self, BufWriter};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use lumen_renderer::{render_with_progress, save_ppm, write_ppm, Camera, CameraConfig};
use serde_json::Value;

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let start = Instant::now();
    let (scene, scene_camera) = scenes::build(args.scene, args.seed.unwrap_or(0))
        .with_context(|| format!("Failed to build scene {:?}", args.scene))?;
    log::info!("Scene built in {:?}", start.elapsed());

    let config = resolve_config(scene_camera, &args)?;
    let mut camera = Camera::from_config(config);
    let height = camera.config().image_height();

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(height as u64);
        bar.set_style(
            ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} rows ({eta})")
                .context("Invalid progress bar template")?
                .progress_chars("=> "),
        );
        bar.set_message("Rendering");
        bar
    };

    let image = render_with_progress(&mut camera, &scene, &|remaining| {
        progress.set_position((height - remaining) as u64);
    })
    .context("Render failed")?;
    progress.finish_with_message("Done");

    match &args.output {
        Some(path) => {
            save_ppm(path, &image)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Saved to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_ppm(&mut writer, &image).context("Failed to write image to stdout")?;
        }
    }

    Ok(())
}

/// Layer the camera settings: scene defaults, then the JSON file, then
/// command-line flags.
fn resolve_config(scene_camera: CameraConfig, args: &Args) -> Result<CameraConfig> {
    let mut config = match &args.config {
        Some(path) => overlay_json(scene_camera, path)?,
        None => scene_camera,
    };

    if let Some(width) = args.width {
        config.image_width = width;
    }
    if let Some(samples) = args.samples {
        config.samples_per_pixel = samples;
    }
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    config.validate().context("Invalid camera configuration")?;
    Ok(config)
}

/// Apply only the keys present in a JSON object on top of `base`.
fn overlay_json(base: CameraConfig, path: &Path) -> Result<CameraConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let overrides: Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;

    let Value::Object(overrides) = overrides else {
        anyhow::bail!("Config {} must be a JSON object", path.display());
    };

    let mut merged = serde_json::to_value(base)?;
    if let Value::Object(fields) = &mut merged {
        for (key, value) in overrides {
            if !fields.contains_key(&key) {
                log::warn!("Ignoring unknown config key '{}'", key);
                continue;
            }
            fields.insert(key, value);
        }
    }

    serde_json::from_value(merged)
        .with_context(|| format!("Invalid camera settings in {}", path.display()))
}

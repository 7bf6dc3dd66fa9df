//! Blend command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::blender::{BlendOptions, Blender};
use crate::config::BlendConfig;
use crate::output::{load_rgba, output_path, save_png};
use crate::region::RegionRequest;

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the blend command
pub fn run_blend(
    source: &Path,
    dest: &Path,
    output: Option<&Path>,
    region: RegionRequest,
    config: &BlendConfig,
    json: bool,
) -> ExitCode {
    let source_image = match load_rgba(source) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: Cannot read source '{}': {}", source.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let mut dest_image = match load_rgba(dest) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: Cannot read destination '{}': {}", dest.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mode = config.blend_mode();
    let options = BlendOptions {
        region,
        opacity: config.defaults.opacity,
        operator: config.composite_operator(),
    };

    let mut blender = Blender::new()
        .with_parallel(config.engine.parallel)
        .with_min_parallel_pixels(config.engine.min_parallel_pixels);

    let outcome = match blender.blend_onto(&source_image, &mut dest_image, mode, &options) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    log::info!(
        "Blended {} with {} under {}: {}x{} pixels ({:?})",
        source.display(),
        mode,
        options.operator,
        outcome.region.width(),
        outcome.region.height(),
        outcome.path
    );

    let out_path = output_path(dest, output);
    if let Err(e) = save_png(&dest_image, &out_path) {
        eprintln!("Error: Failed to save '{}': {}", out_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    if json {
        let report = serde_json::json!({
            "mode": mode,
            "operator": options.operator,
            "opacity": options.opacity,
            "path": outcome.path,
            "region": outcome.region,
            "output": out_path.display().to_string(),
        });
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        println!(
            "Saved: {} ({} {}x{})",
            out_path.display(),
            mode,
            outcome.region.width(),
            outcome.region.height()
        );
    }

    ExitCode::from(EXIT_SUCCESS)
}

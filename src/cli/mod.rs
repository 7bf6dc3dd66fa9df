//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod blend;
mod modes;
mod pixel;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, BlendConfig, CliOverrides};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Pxblend - Blend one image onto another with W3C blend modes
#[derive(Parser)]
#[command(name = "pxblend")]
#[command(about = "Pxblend - Blend one image onto another with W3C blend modes")]
#[command(version)]
pub struct Cli {
    /// Path to a pxblend.toml (default: search upward from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Blend a source image onto a destination image
    Blend {
        /// Source image (drawn on top)
        source: PathBuf,

        /// Destination image (backdrop)
        dest: PathBuf,

        /// Output file or directory (default: overwrite the destination)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Blend mode (normal, multiply, screen, ..., luminosity)
        #[arg(short, long)]
        mode: Option<String>,

        /// Compositing operator (default: source-over)
        #[arg(long)]
        operator: Option<String>,

        /// Source opacity (0.0-1.0)
        #[arg(long)]
        opacity: Option<f32>,

        /// Width of the blended region (default: source width)
        #[arg(long)]
        width: Option<u32>,

        /// Height of the blended region (default: source height)
        #[arg(long)]
        height: Option<u32>,

        /// Left edge of the region in the source
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        source_x: i64,

        /// Top edge of the region in the source
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        source_y: i64,

        /// Left edge of the region in the destination
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        dest_x: i64,

        /// Top edge of the region in the destination
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        dest_y: i64,

        /// Run the pixel loop on a single thread
        #[arg(long)]
        sequential: bool,

        /// Print the blend outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Composite a single pixel and print the result
    Pixel {
        /// Source pixel as R,G,B,A (0-255)
        #[arg(long)]
        src: String,

        /// Destination pixel as R,G,B,A (0-255)
        #[arg(long)]
        dst: String,

        /// Blend mode
        #[arg(short, long)]
        mode: Option<String>,

        /// Compositing operator
        #[arg(long)]
        operator: Option<String>,

        /// Source opacity (0.0-1.0)
        #[arg(long)]
        opacity: Option<f32>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the available blend modes and compositing operators
    Modes {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Load config, apply CLI overrides and start logging.
pub(crate) fn prepare_config(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<BlendConfig, ExitCode> {
    let loaded = load_config(config_path);
    // Logging starts before the config error is reported so the level applies
    // to everything after this point.
    let level = loaded.as_ref().map(|c| c.log.level.clone()).unwrap_or_else(|_| "warn".into());
    init_logging(&level);

    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };

    merge_cli_overrides(&mut config, overrides);
    if let Some(err) = config.validate().into_iter().next() {
        eprintln!("Error: {}", err);
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }
    Ok(config)
}

fn init_logging(level: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Blend {
            source,
            dest,
            output,
            mode,
            operator,
            opacity,
            width,
            height,
            source_x,
            source_y,
            dest_x,
            dest_y,
            sequential,
            json,
        } => {
            let overrides = CliOverrides {
                mode,
                operator,
                opacity,
                parallel: if sequential { Some(false) } else { None },
            };
            let config = match prepare_config(config_path, &overrides) {
                Ok(config) => config,
                Err(code) => return code,
            };
            let region = crate::region::RegionRequest {
                width,
                height,
                source_x,
                source_y,
                dest_x,
                dest_y,
            };
            blend::run_blend(&source, &dest, output.as_deref(), region, &config, json)
        }
        Commands::Pixel { src, dst, mode, operator, opacity, json } => {
            let overrides = CliOverrides { mode, operator, opacity, parallel: None };
            let config = match prepare_config(config_path, &overrides) {
                Ok(config) => config,
                Err(code) => return code,
            };
            pixel::run_pixel(&src, &dst, &config, json)
        }
        Commands::Modes { json } => modes::run_modes(json),
    }
}

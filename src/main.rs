//! Pxblend - Command-line tool for blending images with W3C blend modes

use std::process::ExitCode;

use pixelblend::cli;

fn main() -> ExitCode {
    cli::run()
}

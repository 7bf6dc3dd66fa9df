//! CLI integration tests for `pxblend`
//!
//! Runs the binary against PNGs written to temporary directories and checks
//! the images and text/JSON output it produces.

use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Get the path to the pxblend binary.
fn pxblend_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pxblend"))
}

/// Run pxblend with the given arguments and return (stdout, stderr, exit code).
fn run(args: &[&str], cwd: &Path) -> (String, String, i32) {
    let output = Command::new(pxblend_binary())
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", cwd)
        .output()
        .expect("Failed to execute pxblend");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.code().unwrap_or(-1))
}

fn write_solid(dir: &Path, name: &str, width: u32, height: u32, px: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(width, height, Rgba(px)).save(&path).expect("should write png");
    path
}

fn pixel_at(path: &Path, x: u32, y: u32) -> [u8; 4] {
    image::open(path).expect("should open output").to_rgba8().get_pixel(x, y).0
}

// ============================================================================
// blend
// ============================================================================

#[test]
fn test_blend_difference_writes_output() {
    let temp = TempDir::new().expect("should create temp dir");
    let src = write_solid(temp.path(), "src.png", 2, 2, [100, 100, 100, 255]);
    let dst = write_solid(temp.path(), "dst.png", 2, 2, [40, 40, 40, 255]);
    let out = temp.path().join("out.png");

    let (stdout, stderr, code) = run(
        &[
            "blend",
            src.to_str().unwrap(),
            dst.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--mode",
            "difference",
        ],
        temp.path(),
    );
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("Saved"));
    assert_eq!(pixel_at(&out, 1, 1), [60, 60, 60, 255]);
    // Destination untouched when -o is given
    assert_eq!(pixel_at(&dst, 1, 1), [40, 40, 40, 255]);
}

#[test]
fn test_blend_overwrites_destination_by_default() {
    let temp = TempDir::new().expect("should create temp dir");
    let src = write_solid(temp.path(), "src.png", 1, 1, [255, 0, 0, 255]);
    let dst = write_solid(temp.path(), "dst.png", 1, 1, [0, 255, 0, 255]);

    let (_, stderr, code) = run(
        &["blend", src.to_str().unwrap(), dst.to_str().unwrap(), "-m", "multiply"],
        temp.path(),
    );
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(pixel_at(&dst, 0, 0), [0, 0, 0, 255]);
}

#[test]
fn test_blend_json_reports_clipped_region() {
    let temp = TempDir::new().expect("should create temp dir");
    let src = write_solid(temp.path(), "src.png", 4, 4, [255, 255, 255, 255]);
    let dst = write_solid(temp.path(), "dst.png", 4, 4, [0, 0, 0, 255]);
    let out = temp.path().join("out.png");

    let (stdout, stderr, code) = run(
        &[
            "blend",
            src.to_str().unwrap(),
            dst.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--dest-x",
            "3",
            "--width",
            "10",
            "--json",
        ],
        temp.path(),
    );
    assert_eq!(code, 0, "stderr: {}", stderr);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["mode"], "normal");
    assert_eq!(json["operator"], "source-over");
    assert_eq!(json["path"], "software");
    assert_eq!(json["region"]["dest"]["x"], 3);
    assert_eq!(json["region"]["dest"]["width"], 1);
    assert_eq!(json["region"]["dest"]["height"], 4);

    assert_eq!(pixel_at(&out, 3, 0), [255, 255, 255, 255]);
    assert_eq!(pixel_at(&out, 2, 0), [0, 0, 0, 255]);
}

#[test]
fn test_blend_negative_offset_is_noop() {
    let temp = TempDir::new().expect("should create temp dir");
    let src = write_solid(temp.path(), "src.png", 2, 2, [255, 255, 255, 255]);
    let dst = write_solid(temp.path(), "dst.png", 2, 2, [0, 0, 0, 255]);
    let out = temp.path().join("out.png");

    let (stdout, _, code) = run(
        &[
            "blend",
            src.to_str().unwrap(),
            dst.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--source-x",
            "-2",
            "--json",
        ],
        temp.path(),
    );
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["path"], "skipped");
    assert_eq!(pixel_at(&out, 0, 0), [0, 0, 0, 255]);
}

#[test]
fn test_blend_missing_source_fails() {
    let temp = TempDir::new().expect("should create temp dir");
    let dst = write_solid(temp.path(), "dst.png", 1, 1, [0, 0, 0, 255]);

    let (_, stderr, code) = run(&["blend", "nope.png", dst.to_str().unwrap()], temp.path());
    assert_eq!(code, 1);
    assert!(stderr.contains("Cannot read source"));
}

#[test]
fn test_blend_uses_config_defaults() {
    let temp = TempDir::new().expect("should create temp dir");
    std::fs::write(temp.path().join("pxblend.toml"), "[defaults]\nmode = \"screen\"\n")
        .expect("should write config");
    let src = write_solid(temp.path(), "src.png", 1, 1, [128, 128, 128, 255]);
    let dst = write_solid(temp.path(), "dst.png", 1, 1, [128, 128, 128, 255]);

    let (_, stderr, code) =
        run(&["blend", src.to_str().unwrap(), dst.to_str().unwrap(), "--sequential"], temp.path());
    assert_eq!(code, 0, "stderr: {}", stderr);
    let px = pixel_at(&dst, 0, 0);
    assert!((191..=192).contains(&px[0]), "screen result {:?}", px);
}

#[test]
fn test_blend_invalid_config_fails() {
    let temp = TempDir::new().expect("should create temp dir");
    std::fs::write(temp.path().join("pxblend.toml"), "[defaults]\nopacity = 4.0\n")
        .expect("should write config");
    let src = write_solid(temp.path(), "src.png", 1, 1, [1, 1, 1, 255]);
    let dst = write_solid(temp.path(), "dst.png", 1, 1, [1, 1, 1, 255]);

    let (_, stderr, code) =
        run(&["blend", src.to_str().unwrap(), dst.to_str().unwrap()], temp.path());
    assert_eq!(code, 1);
    assert!(stderr.contains("defaults.opacity"));
}

// ============================================================================
// pixel
// ============================================================================

#[test]
fn test_pixel_normal_half_alpha() {
    let temp = TempDir::new().expect("should create temp dir");
    let (stdout, _, code) =
        run(&["pixel", "--src", "10,20,30,128", "--dst", "200,200,200,255"], temp.path());
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "105,110,115,255");
}

#[test]
fn test_pixel_unknown_mode_is_normal() {
    let temp = TempDir::new().expect("should create temp dir");
    let (stdout, _, code) =
        run(&["pixel", "-m", "sparkle", "--src", "1,2,3,255", "--dst", "9,9,9,255"], temp.path());
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1,2,3,255");
}

#[test]
fn test_pixel_json_output() {
    let temp = TempDir::new().expect("should create temp dir");
    let (stdout, _, code) = run(
        &["pixel", "-m", "multiply", "--src", "255,0,0,255", "--dst", "0,255,0,255", "--json"],
        temp.path(),
    );
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["mode"], "multiply");
    assert_eq!(json["result"], serde_json::json!([0, 0, 0, 255]));
}

#[test]
fn test_pixel_bad_channel_is_invalid_args() {
    let temp = TempDir::new().expect("should create temp dir");
    let (_, stderr, code) = run(&["pixel", "--src", "1,2,999", "--dst", "0,0,0"], temp.path());
    assert_eq!(code, 2);
    assert!(stderr.contains("999"));
}

#[test]
fn test_pixel_opacity_out_of_range_is_invalid_args() {
    let temp = TempDir::new().expect("should create temp dir");
    let (_, _, code) =
        run(&["pixel", "--src", "1,2,3", "--dst", "0,0,0", "--opacity", "1.5"], temp.path());
    assert_eq!(code, 2);
}

// ============================================================================
// modes
// ============================================================================

#[test]
fn test_modes_lists_all_sixteen() {
    let temp = TempDir::new().expect("should create temp dir");
    let (stdout, _, code) = run(&["modes", "--json"], temp.path());
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let modes = json["modes"].as_array().expect("modes array");
    assert_eq!(modes.len(), 16);
    let non_separable: Vec<_> = modes
        .iter()
        .filter(|m| m["separable"] == false)
        .map(|m| m["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(non_separable, vec!["hue", "saturation", "color", "luminosity"]);
    assert!(json["operators"].as_array().expect("operators array").contains(&"source-over".into()));
}

#[test]
fn test_modes_text_output() {
    let temp = TempDir::new().expect("should create temp dir");
    let (stdout, _, code) = run(&["modes"], temp.path());
    assert_eq!(code, 0);
    assert!(stdout.contains("color-dodge"));
    assert!(stdout.contains("non-separable"));
}

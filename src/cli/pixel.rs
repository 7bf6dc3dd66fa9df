//! Pixel command implementation

use std::process::ExitCode;

use crate::config::BlendConfig;
use crate::transform::PixelTransform;

use super::{EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Parse an `R,G,B,A` pixel. Alpha may be omitted and defaults to 255.
pub(crate) fn parse_pixel(s: &str) -> Result<[u8; 4], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(format!("expected R,G,B or R,G,B,A, got '{}'", s));
    }

    let mut pixel = [0, 0, 0, 255];
    for (i, part) in parts.iter().enumerate() {
        pixel[i] =
            part.parse::<u8>().map_err(|_| format!("'{}' is not a channel value (0-255)", part))?;
    }
    Ok(pixel)
}

/// Execute the pixel command
pub fn run_pixel(src: &str, dst: &str, config: &BlendConfig, json: bool) -> ExitCode {
    let (src_px, dst_px) = match (parse_pixel(src), parse_pixel(dst)) {
        (Ok(s), Ok(d)) => (s, d),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let mode = config.blend_mode();
    let operator = config.composite_operator();
    let out = PixelTransform::new(mode, &operator)
        .with_opacity(config.defaults.opacity)
        .blend_pixel(src_px, dst_px);

    if json {
        let report = serde_json::json!({
            "mode": mode,
            "operator": operator,
            "src": src_px,
            "dst": dst_px,
            "result": out,
        });
        println!("{}", report);
    } else {
        println!("{},{},{},{}", out[0], out[1], out[2], out[3]);
    }

    ExitCode::from(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pixel_rgba() {
        assert_eq!(parse_pixel("10,20,30,40"), Ok([10, 20, 30, 40]));
        assert_eq!(parse_pixel(" 1, 2 ,3 , 4"), Ok([1, 2, 3, 4]));
    }

    #[test]
    fn test_parse_pixel_rgb_defaults_opaque() {
        assert_eq!(parse_pixel("1,2,3"), Ok([1, 2, 3, 255]));
    }

    #[test]
    fn test_parse_pixel_errors() {
        assert!(parse_pixel("1,2").is_err());
        assert!(parse_pixel("1,2,3,4,5").is_err());
        assert!(parse_pixel("1,2,300").is_err());
        assert!(parse_pixel("a,b,c").is_err());
    }
}

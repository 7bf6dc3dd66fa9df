//! Configuration schema types for `pxblend.toml`
//!
//! Defines the structure and validation rules for blend defaults, engine
//! settings and logging.

use serde::{Deserialize, Serialize};

use crate::blend::BlendMode;
use crate::composite::CompositeOperator;
use crate::transform::DEFAULT_MIN_PARALLEL_PIXELS;

/// Log levels accepted by `[log] level`
pub const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Blend defaults used when the command line does not say otherwise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Blend mode name; unknown names resolve to `normal`
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Compositing operator name; unknown names resolve to `source-over`
    #[serde(default = "default_operator")]
    pub operator: String,
    /// Source opacity (0.0-1.0)
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { mode: default_mode(), operator: default_operator(), opacity: default_opacity() }
    }
}

fn default_mode() -> String {
    BlendMode::Normal.name().to_string()
}

fn default_operator() -> String {
    CompositeOperator::SourceOver.name().to_string()
}

fn default_opacity() -> f32 {
    1.0
}

/// Pixel engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Split large regions across threads
    #[serde(default = "default_true")]
    pub parallel: bool,
    /// Smallest region, in pixels, worth splitting
    #[serde(default = "default_min_parallel_pixels")]
    pub min_parallel_pixels: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { parallel: true, min_parallel_pixels: default_min_parallel_pixels() }
    }
}

fn default_true() -> bool {
    true
}

fn default_min_parallel_pixels() -> usize {
    DEFAULT_MIN_PARALLEL_PIXELS
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter level; `RUST_LOG` still takes precedence
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: default_level() }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

/// Complete pxblend.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlendConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "defaults.opacity")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pxblend.toml: '{}' {}", self.field, self.message)
    }
}

impl BlendConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        let opacity = self.defaults.opacity;
        if !(0.0..=1.0).contains(&opacity) {
            errors.push(ConfigValidationError {
                field: "defaults.opacity".to_string(),
                message: format!("must be between 0.0 and 1.0 (got {})", opacity),
            });
        }

        if !LOG_LEVELS.contains(&self.log.level.to_lowercase().as_str()) {
            errors.push(ConfigValidationError {
                field: "log.level".to_string(),
                message: format!(
                    "must be one of {} (got '{}')",
                    LOG_LEVELS.join(", "),
                    self.log.level
                ),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Resolved default blend mode
    pub fn blend_mode(&self) -> BlendMode {
        BlendMode::from_str_or_normal(&self.defaults.mode)
    }

    /// Resolved default compositing operator
    pub fn composite_operator(&self) -> CompositeOperator {
        CompositeOperator::from_str_or_default(&self.defaults.operator)
    }
}

//! Conversion parameters.
//!
//! `GuideConfig` holds the knobs exposed to the analysis core. It is
//! validated once at startup; a bad value is a fatal `Config` error.

use serde::{Deserialize, Serialize};

use crate::error::{GuideError, Result};

/// Parameters controlling one image conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Pixels with luma at or below this are "dark".
    pub luma_threshold: i32,

    /// Pixels with alpha above this are opaque.
    pub alpha_threshold: i32,

    /// Stroke width of contour paths, in pixels.
    pub outline_width: u32,

    /// Stroke width as a fraction of a blob's shorter side.
    pub fill_factor: f64,

    /// Maximum number of strokes per blob.
    pub fill_lines: u32,

    /// Jitter amplitude relative to stroke width.
    pub fill_jitter: f64,

    /// Number of hue buckets.
    pub palette_k: u32,

    /// Seed for the per-conversion jitter source.
    pub seed: u64,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            luma_threshold: 60,
            alpha_threshold: 5,
            outline_width: 6,
            fill_factor: 0.6,
            fill_lines: 3,
            fill_jitter: 0.3,
            palette_k: 20,
            seed: 0,
        }
    }
}

impl GuideConfig {
    /// Check every knob, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        check_byte("luma_threshold", self.luma_threshold)?;
        check_byte("alpha_threshold", self.alpha_threshold)?;

        if self.palette_k < 1 || self.palette_k > 360 {
            return Err(config_error(
                format!("palette_k must be between 1 and 360, got {}", self.palette_k),
                "Hue buckets are 360 / palette_k degrees wide and must be at least 1 degree",
            ));
        }

        if self.fill_lines < 1 {
            return Err(config_error(
                "fill_lines must be at least 1".to_string(),
                "Every blob receives at least one stroke",
            ));
        }

        if self.outline_width < 1 {
            return Err(config_error(
                "outline_width must be at least 1".to_string(),
                "Contour strokes need a visible width",
            ));
        }

        check_fraction("fill_factor", self.fill_factor)?;
        check_fraction("fill_jitter", self.fill_jitter)?;

        Ok(())
    }
}

fn check_byte(name: &str, value: i32) -> Result<()> {
    if !(0..=255).contains(&value) {
        return Err(config_error(
            format!("{} must be between 0 and 255, got {}", name, value),
            "Thresholds compare against 8-bit channel values",
        ));
    }
    Ok(())
}

fn check_fraction(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(config_error(
            format!("{} must be a non-negative number, got {}", name, value),
            "Use a value such as 0.3",
        ));
    }
    Ok(())
}

fn config_error(message: String, help: &str) -> GuideError {
    GuideError::Config {
        message,
        help: Some(help.to_string()),
    }
}

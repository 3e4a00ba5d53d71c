pub mod completions;
pub mod convert;
pub mod init;
pub mod inspect;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::GuideConfig;

/// paintguide - SVG paint guides from raster images
#[derive(Parser, Debug)]
#[command(name = "paintguide")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a directory of images into SVG paint guides
    Convert(convert::ConvertArgs),

    /// Analyze one image and report its guide without writing SVG
    Inspect(inspect::InspectArgs),

    /// Write a default paintguide.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Conversion parameters that override the manifest.
#[derive(Args, Debug, Default, Clone)]
pub struct GuideArgs {
    /// Manifest file (default: ./paintguide.yaml if present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Luma at or below which opaque pixels are dark
    #[arg(long, allow_negative_numbers = true)]
    pub luma_th: Option<i32>,

    /// Alpha above which pixels are opaque
    #[arg(long, allow_negative_numbers = true)]
    pub alpha_th: Option<i32>,

    /// Contour stroke width in pixels
    #[arg(long)]
    pub outline_w: Option<u32>,

    /// Stroke width as a fraction of the blob's shorter side
    #[arg(long, allow_negative_numbers = true)]
    pub fill_factor: Option<f64>,

    /// Maximum strokes per blob
    #[arg(long)]
    pub fill_lines: Option<u32>,

    /// Stroke jitter relative to stroke width
    #[arg(long, allow_negative_numbers = true)]
    pub fill_jitter: Option<f64>,

    /// Number of hue buckets (colour order)
    #[arg(long)]
    pub palette_k: Option<u32>,

    /// Seed for stroke jitter
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GuideArgs {
    /// Apply every flag that was given on top of `config`.
    pub fn apply(&self, config: &mut GuideConfig) {
        if let Some(v) = self.luma_th {
            config.luma_threshold = v;
        }
        if let Some(v) = self.alpha_th {
            config.alpha_threshold = v;
        }
        if let Some(v) = self.outline_w {
            config.outline_width = v;
        }
        if let Some(v) = self.fill_factor {
            config.fill_factor = v;
        }
        if let Some(v) = self.fill_lines {
            config.fill_lines = v;
        }
        if let Some(v) = self.fill_jitter {
            config.fill_jitter = v;
        }
        if let Some(v) = self.palette_k {
            config.palette_k = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
    }
}

//! Image analysis for paint guides.
//!
//! This module decides where guide strokes go:
//! - `classify` - opaque/dark/colour masks and per-pixel hue
//! - `bin_hues` - hue buckets that fix the colour paint order
//! - `extract_blobs` - 4-connected regions of a bucket mask
//! - `synthesize_strokes` - jittered parallel strokes per blob

mod blobs;
mod classify;
mod hue;
mod strokes;

pub use blobs::extract_blobs;
pub use classify::{classify, hue_degrees, luma, Classification};
pub use hue::{bin_hues, bucket_of, bucket_width, HueBins};
pub use strokes::{plan_strokes, synthesize_strokes, StrokePlan, MIN_STROKE_WIDTH};

//! Core domain types for paintguide.
//!
//! This module contains the values that flow through the pipeline:
//! - `Mask` - boolean pixel grids (opaque, dark, colour, per hue bucket)
//! - `Blob` - bounding box of one connected region
//! - `GuideStroke` - one jittered colour stroke in output space
//! - `GuideDocument` - the ordered list of guide paths for an image

mod blob;
mod document;
mod mask;
mod stroke;

pub use blob::Blob;
pub use document::{GuideDocument, GuidePath, GuideStats, Phase};
pub use mask::Mask;
pub use stroke::{GuideStroke, Orientation};

/// Decoded RGBA input, 8 bits per channel.
pub type PixelGrid = image::RgbaImage;

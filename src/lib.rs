//! paintguide - SVG paint guides from raster images
//!
//! A library for turning a raster image into a set of invisible guide
//! strokes overlaid on the image: a dark contour pass first, then colour
//! strokes ordered by hue, ready to be revealed as a painting sequence.

pub mod analysis;
pub mod assemble;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod trace;
pub mod types;

pub use analysis::{
    bin_hues, classify, extract_blobs, plan_strokes, synthesize_strokes, Classification, HueBins,
    StrokePlan,
};
pub use assemble::{assemble, BucketStrokes};
pub use config::GuideConfig;
pub use discovery::{load_manifest, scan_inputs, Manifest};
pub use error::{GuideError, Result};
pub use pipeline::{convert_batch, convert_file, convert_image, ConvertOptions, FileReport};
pub use render::{render_svg, write_svg, RasterRef};
pub use trace::{trace_contours, ContourPath, ContourTracer, PotraceTracer};
pub use types::{
    Blob, GuideDocument, GuidePath, GuideStats, GuideStroke, Mask, Orientation, Phase, PixelGrid,
};

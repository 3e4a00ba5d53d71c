//! Rendering module for paintguide.
//!
//! This module serializes guide documents to SVG with the source raster
//! as background.

mod svg;

pub use svg::{render_svg, write_svg, RasterRef};

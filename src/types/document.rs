//! The ordered guide document handed to the SVG serializer.

use serde::Serialize;

/// Which painting pass a guide path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Dark outline pass, drawn first.
    Contour,
    /// Hue-ordered colour fill pass.
    Colour,
}

/// One path of the guide: path data, stroke width and phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuidePath {
    pub data: String,
    pub stroke_width: u32,
    pub phase: Phase,
}

/// Counters describing a converted image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GuideStats {
    pub contour_paths: usize,
    pub colour_strokes: usize,
    pub hue_buckets: usize,
    pub blobs: usize,
}

/// Ordered guide paths for one image.
///
/// Contour entries always precede colour entries; the list order is the
/// reveal order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideDocument {
    pub width: u32,
    pub height: u32,
    pub paths: Vec<GuidePath>,
    pub stats: GuideStats,
}

impl GuideDocument {
    /// Paths belonging to one phase, in document order.
    pub fn phase(&self, phase: Phase) -> impl Iterator<Item = &GuidePath> {
        self.paths.iter().filter(move |p| p.phase == phase)
    }

    /// Path data strings in document order.
    pub fn path_data(&self) -> Vec<&str> {
        self.paths.iter().map(|p| p.data.as_str()).collect()
    }
}

//! Colour guide strokes.

use std::fmt;

use serde::Serialize;

/// Direction of the parallel strokes laid over a blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
    Diagonal,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
            Orientation::Diagonal => "diagonal",
        };
        f.write_str(name)
    }
}

/// A straight guide segment in output space (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GuideStroke {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Stroke width in pixels.
    pub width: u32,
}

impl GuideStroke {
    /// SVG path data for the segment, two decimals per coordinate.
    pub fn path_data(&self) -> String {
        format!(
            "M{:.2} {:.2} L{:.2} {:.2}",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}

//! Stroke synthesis for colour blobs.
//!
//! Each blob gets a handful of parallel strokes whose direction follows the
//! blob's aspect ratio. Strokes are jittered by a caller-owned random source
//! and emitted in output space (Y flipped, origin bottom-left).

use rand::Rng;

use crate::config::GuideConfig;
use crate::types::{Blob, GuideStroke, Orientation};

/// Minimum stroke width in pixels.
pub const MIN_STROKE_WIDTH: u32 = 3;

/// Aspect ratio above which a blob counts as elongated.
const ELONGATION: f64 = 1.3;

/// Layout decided for a blob before jitter is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokePlan {
    pub orientation: Orientation,
    pub stroke_width: u32,
    pub count: u32,
}

/// Choose orientation, stroke width and stroke count for a blob.
pub fn plan_strokes(blob: &Blob, config: &GuideConfig) -> StrokePlan {
    let bw = blob.width() as f64;
    let bh = blob.height() as f64;

    let stroke_width = ((bw.min(bh) * config.fill_factor).floor() as u32).max(MIN_STROKE_WIDTH);

    let orientation = if bw > bh * ELONGATION {
        Orientation::Vertical
    } else if bh > bw * ELONGATION {
        Orientation::Horizontal
    } else {
        Orientation::Diagonal
    };

    let span = match orientation {
        Orientation::Vertical => bw,
        _ => bh,
    };
    let needed = (span / (stroke_width as f64 * ELONGATION)).ceil() as u32;
    let count = needed.min(config.fill_lines).max(1);

    StrokePlan {
        orientation,
        stroke_width,
        count,
    }
}

/// Generate the guide strokes for one blob.
///
/// One jitter sample is drawn per stroke, diagonal strokes included, so the
/// random stream advances identically regardless of orientation.
pub fn synthesize_strokes<R: Rng>(
    blob: &Blob,
    image_height: u32,
    config: &GuideConfig,
    rng: &mut R,
) -> Vec<GuideStroke> {
    let plan = plan_strokes(blob, config);
    let h = image_height as f64;
    let sw = plan.stroke_width as f64;
    let n = plan.count as f64;

    let min_x = blob.min_x as f64;
    let max_x = blob.max_x as f64;
    let min_y = blob.min_y as f64;
    let max_y = blob.max_y as f64;
    let bw = blob.width() as f64;
    let bh = blob.height() as f64;

    (0..plan.count)
        .map(|i| {
            let jitter = uniform(rng, config.fill_jitter) * sw;
            let slot = i as f64 + 0.5;

            let (x1, y1, x2, y2) = match plan.orientation {
                Orientation::Horizontal => {
                    let y = min_y + slot * bh / n + jitter;
                    (min_x + 0.5, y, max_x - 0.5, y)
                }
                Orientation::Vertical => {
                    let x = min_x + slot * bw / n + jitter;
                    (x, min_y + 0.5, x, max_y - 0.5)
                }
                Orientation::Diagonal => {
                    let t = slot / n;
                    (min_x + 0.5, max_y - t * bh, min_x + t * bw, max_y - 0.5)
                }
            };

            GuideStroke {
                x1,
                y1: h - y1,
                x2,
                y2: h - y2,
                width: plan.stroke_width,
            }
        })
        .collect()
}

/// Uniform sample in `[-amplitude, amplitude)`.
fn uniform<R: Rng>(rng: &mut R, amplitude: f64) -> f64 {
    -amplitude + 2.0 * amplitude * rng.gen::<f64>()
}

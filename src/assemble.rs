//! Merging contour and colour guides into paint order.

use crate::trace::ContourPath;
use crate::types::{GuideDocument, GuidePath, GuideStats, GuideStroke, Phase};

/// Strokes produced for one hue bucket, in blob enumeration order.
#[derive(Debug, Clone, Default)]
pub struct BucketStrokes {
    pub bucket: u16,
    pub blobs: usize,
    pub strokes: Vec<GuideStroke>,
}

/// Build the guide document: every contour path, then colour strokes bucket
/// by bucket in ascending bucket order.
///
/// The sort is stable, so strokes within a bucket keep their blob and stroke
/// index order.
pub fn assemble(
    width: u32,
    height: u32,
    contours: Vec<ContourPath>,
    mut buckets: Vec<BucketStrokes>,
) -> GuideDocument {
    buckets.sort_by_key(|b| b.bucket);

    let stats = GuideStats {
        contour_paths: contours.len(),
        colour_strokes: buckets.iter().map(|b| b.strokes.len()).sum(),
        hue_buckets: buckets.len(),
        blobs: buckets.iter().map(|b| b.blobs).sum(),
    };

    let mut paths = Vec::with_capacity(stats.contour_paths + stats.colour_strokes);
    paths.extend(contours.into_iter().map(|c| GuidePath {
        data: c.data,
        stroke_width: c.stroke_width,
        phase: Phase::Contour,
    }));
    for bucket in &buckets {
        paths.extend(bucket.strokes.iter().map(|s| GuidePath {
            data: s.path_data(),
            stroke_width: s.width,
            phase: Phase::Colour,
        }));
    }

    GuideDocument {
        width,
        height,
        paths,
        stats,
    }
}

//! Hue bucketing for paint order.

use std::collections::BTreeSet;

use super::classify::Classification;
use crate::types::Mask;

/// Colour pixels grouped into hue buckets.
#[derive(Debug, Clone)]
pub struct HueBins {
    width: usize,
    height: usize,
    bins: Vec<Option<u16>>,
    buckets: Vec<u16>,
}

impl HueBins {
    /// Bucket of the pixel at (x, y), if it is a colour pixel.
    pub fn bin(&self, x: usize, y: usize) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.bins[y * self.width + x]
    }

    /// Buckets that occur, ascending.
    pub fn buckets(&self) -> &[u16] {
        &self.buckets
    }

    /// Mask of the colour pixels in `bucket`.
    pub fn mask_for(&self, bucket: u16) -> Mask {
        Mask::from_fn(self.width, self.height, |x, y| {
            self.bins[y * self.width + x] == Some(bucket)
        })
    }
}

/// Width of one hue bucket in degrees, `360 / k` with integer division.
///
/// `k` must be in `1..=360`, which `GuideConfig::validate` enforces.
pub fn bucket_width(k: u32) -> u32 {
    360 / k
}

/// Bucket index for a hue angle: `min(hue / bucket_width(k), k - 1)`.
///
/// When `k` does not divide 360 the last bucket absorbs the remainder.
pub fn bucket_of(hue: u16, k: u32) -> u16 {
    (hue as u32 / bucket_width(k)).min(k - 1) as u16
}

/// Assign every colour pixel to one of `k` hue buckets.
pub fn bin_hues(classes: &Classification, k: u32) -> HueBins {
    let mut present = BTreeSet::new();
    let bins: Vec<Option<u16>> = classes
        .hues()
        .iter()
        .map(|hue| {
            hue.map(|h| {
                let bucket = bucket_of(h, k);
                present.insert(bucket);
                bucket
            })
        })
        .collect();

    HueBins {
        width: classes.width(),
        height: classes.height(),
        bins,
        buckets: present.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classify;
    use crate::types::PixelGrid;
    use image::Rgba;

    #[test]
    fn test_bucket_width() {
        assert_eq!(bucket_width(20), 18);
        assert_eq!(bucket_width(7), 51);
        assert_eq!(bucket_width(360), 1);
    }

    #[test]
    fn test_bucket_of_even_split() {
        assert_eq!(bucket_of(0, 20), 0);
        assert_eq!(bucket_of(17, 20), 0);
        assert_eq!(bucket_of(18, 20), 1);
        assert_eq!(bucket_of(359, 20), 19);
    }

    #[test]
    fn test_bucket_of_uneven_split_clamps_last() {
        // 360 / 7 = 51, so 357..359 would be bucket 7 without the clamp.
        assert_eq!(bucket_of(356, 7), 6);
        assert_eq!(bucket_of(359, 7), 6);
        assert_eq!(bucket_of(305, 7), 5);
    }

    #[test]
    fn test_single_bucket() {
        assert_eq!(bucket_of(0, 1), 0);
        assert_eq!(bucket_of(359, 1), 0);
    }

    #[test]
    fn test_buckets_ascending_and_unique() {
        let mut grid = PixelGrid::from_pixel(3, 2, Rgba([80, 80, 255, 255]));
        grid.put_pixel(0, 0, Rgba([0, 255, 0, 255]));
        grid.put_pixel(2, 1, Rgba([255, 0, 0, 255]));
        grid.put_pixel(1, 1, Rgba([0, 0, 0, 255]));

        let classes = classify(&grid, 5, 60).unwrap();
        let bins = bin_hues(&classes, 20);

        assert_eq!(bins.buckets(), &[0, 6, 13]);
        assert_eq!(bins.bin(0, 0), Some(6));
        assert_eq!(bins.bin(2, 1), Some(0));
        assert_eq!(bins.bin(1, 1), None);
    }

    #[test]
    fn test_mask_for_bucket() {
        let mut grid = PixelGrid::from_pixel(2, 2, Rgba([80, 80, 255, 255]));
        grid.put_pixel(1, 0, Rgba([255, 0, 0, 255]));

        let classes = classify(&grid, 5, 60).unwrap();
        let bins = bin_hues(&classes, 20);
        let blue = bins.mask_for(13);

        assert_eq!(blue.count(), 3);
        assert!(!blue.get(1, 0));
        assert_eq!(bins.mask_for(0).count(), 1);
    }
}

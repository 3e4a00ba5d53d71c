//! Pixel classification into opaque, dark and colour masks.

use crate::types::{Mask, PixelGrid};

/// Masks and hue angles derived from one pixel grid.
#[derive(Debug, Clone)]
pub struct Classification {
    /// `alpha > alpha_threshold`.
    pub opaque: Mask,
    /// Opaque pixels with luma at or below the luma threshold.
    pub dark: Mask,
    /// Opaque pixels that are not dark.
    pub colour: Mask,
    /// Hue angle in whole degrees, present only where `colour` is set.
    hue: Vec<Option<u16>>,
}

impl Classification {
    pub fn width(&self) -> usize {
        self.opaque.width()
    }

    pub fn height(&self) -> usize {
        self.opaque.height()
    }

    /// Hue angle at (x, y), if that pixel is a colour pixel.
    pub fn hue(&self, x: usize, y: usize) -> Option<u16> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.hue[y * self.width() + x]
    }

    /// Row-major hue angles.
    pub fn hues(&self) -> &[Option<u16>] {
        &self.hue
    }
}

/// Rec. 601 luma of an 8-bit RGB triple.
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

/// HSV hue of an 8-bit RGB triple, truncated to whole degrees in `[0, 360)`.
///
/// Computed in `f64` on channels scaled to `[0, 1]`, then truncated. Single
/// precision drifts across integer angles (`(0, 10, 1)` is exactly 126°), so
/// the arithmetic stays in double precision throughout. Achromatic colours
/// report 0.
pub fn hue_degrees(r: u8, g: u8, b: u8) -> u16 {
    let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return 0;
    }

    let span = max - min;
    let rc = (max - r) / span;
    let gc = (max - g) / span;
    let bc = (max - b) / span;
    let sector = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    let turns = (sector / 6.0).rem_euclid(1.0);
    ((turns * 360.0) as u16).min(359)
}

/// Classify every pixel of `grid`.
///
/// Returns `None` when no pixel passes the alpha threshold, meaning there is
/// nothing to draw. Hue is only computed for colour pixels.
pub fn classify(grid: &PixelGrid, alpha_threshold: i32, luma_threshold: i32) -> Option<Classification> {
    let width = grid.width() as usize;
    let height = grid.height() as usize;

    let opaque = Mask::from_fn(width, height, |x, y| {
        grid.get_pixel(x as u32, y as u32)[3] as i32 > alpha_threshold
    });
    if !opaque.any() {
        return None;
    }

    let dark = Mask::from_fn(width, height, |x, y| {
        let [r, g, b, _] = grid.get_pixel(x as u32, y as u32).0;
        opaque.get(x, y) && luma(r, g, b) <= luma_threshold as f64
    });
    let colour = Mask::from_fn(width, height, |x, y| opaque.get(x, y) && !dark.get(x, y));

    let hue = grid
        .pixels()
        .zip(colour.as_slice())
        .map(|(px, &is_colour)| is_colour.then(|| hue_degrees(px[0], px[1], px[2])))
        .collect();

    Some(Classification {
        opaque,
        dark,
        colour,
        hue,
    })
}

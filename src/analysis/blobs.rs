//! 4-connected region extraction.

use crate::types::{Blob, Mask};

/// Find every maximal 4-connected region of `mask` and return its bounding box.
///
/// Regions are seeded in row-major order, so the result order is
/// deterministic. The flood fill uses an explicit stack; a fresh visited
/// grid is allocated per call.
pub fn extract_blobs(mask: &Mask) -> Vec<Blob> {
    let width = mask.width();
    let height = mask.height();
    let cells = mask.as_slice();
    let mut visited = vec![false; width * height];
    let mut blobs = Vec::new();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if !cells[idx] || visited[idx] {
                continue;
            }

            let mut blob = Blob::at(x, y);
            visited[idx] = true;
            stack.push((x, y));

            while let Some((cx, cy)) = stack.pop() {
                for (nx, ny) in neighbours(cx, cy, width, height) {
                    let nidx = ny * width + nx;
                    if cells[nidx] && !visited[nidx] {
                        visited[nidx] = true;
                        blob.include(nx, ny);
                        stack.push((nx, ny));
                    }
                }
            }

            blobs.push(blob);
        }
    }

    blobs
}

/// In-bounds 4-neighbours of (x, y): down, up, right, left.
fn neighbours(
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> impl Iterator<Item = (usize, usize)> {
    let down = (y + 1 < height).then(|| (x, y + 1));
    let up = y.checked_sub(1).map(|ny| (x, ny));
    let right = (x + 1 < width).then(|| (x + 1, y));
    let left = x.checked_sub(1).map(|nx| (nx, y));
    [down, up, right, left].into_iter().flatten()
}

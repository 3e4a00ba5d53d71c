//! Image-to-guide conversion.
//!
//! `convert_image` is the pure core: classify, trace the dark mask, stroke
//! each colour blob bucket by bucket, assemble. The file-level functions add
//! decoding, SVG output and batch fan-out.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::analysis::{bin_hues, classify, extract_blobs, synthesize_strokes, Classification};
use crate::assemble::{assemble, BucketStrokes};
use crate::config::GuideConfig;
use crate::error::{GuideError, Result};
use crate::render::{write_svg, RasterRef};
use crate::trace::{trace_contours, ContourTracer};
use crate::types::{GuideDocument, GuideStats, PixelGrid};

/// Options for converting files on disk.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub config: GuideConfig,
    /// Inline the source raster as a data URI instead of linking to it.
    pub embed_raster: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            config: GuideConfig::default(),
            embed_raster: true,
        }
    }
}

/// Outcome of converting one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub stats: GuideStats,
}

/// Convert a decoded image into a guide document.
///
/// Returns `Ok(None)` when no pixel passes the alpha threshold. The jitter
/// source is created here from `config.seed`, so identical inputs always
/// produce identical documents.
pub fn convert_image(
    grid: &PixelGrid,
    config: &GuideConfig,
    tracer: &dyn ContourTracer,
) -> Result<Option<GuideDocument>> {
    config.validate()?;

    let Some(classes) = classify(grid, config.alpha_threshold, config.luma_threshold) else {
        return Ok(None);
    };

    let contours = trace_contours(tracer, &classes.dark, config.outline_width)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let buckets = colour_strokes(&classes, grid.height(), config, &mut rng);

    Ok(Some(assemble(grid.width(), grid.height(), contours, buckets)))
}

/// Stroke every colour blob, bucket by bucket in ascending hue order.
///
/// The random source is consumed in exactly this enumeration order.
pub fn colour_strokes<R: Rng>(
    classes: &Classification,
    image_height: u32,
    config: &GuideConfig,
    rng: &mut R,
) -> Vec<BucketStrokes> {
    let bins = bin_hues(classes, config.palette_k);

    bins.buckets()
        .iter()
        .map(|&bucket| {
            let blobs = extract_blobs(&bins.mask_for(bucket));
            let strokes = blobs
                .iter()
                .flat_map(|blob| synthesize_strokes(blob, image_height, config, rng))
                .collect();
            BucketStrokes {
                bucket,
                blobs: blobs.len(),
                strokes,
            }
        })
        .collect()
}

/// Decode an image file, returning the pixels and the raw bytes' MIME type.
pub fn load_image(path: &Path) -> Result<(PixelGrid, Vec<u8>, &'static str)> {
    let bytes = std::fs::read(path).map_err(|e| GuideError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read image: {}", e),
    })?;

    let format = image::guess_format(&bytes).map_err(|e| GuideError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let grid = image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| GuideError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .to_rgba8();

    Ok((grid, bytes, format.to_mime_type()))
}

/// Output path for an input file.
///
/// The input's location below `input_root` is mirrored under `output_dir`
/// with the extension replaced by `.svg`, so `art/a/rose.png` lands at
/// `out/a/rose.svg`. Inputs outside `input_root` keep only their file name.
pub fn output_path(input: &Path, input_root: &Path, output_dir: &Path) -> PathBuf {
    let relative = match input.strip_prefix(input_root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => input
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("guide")),
    };
    output_dir.join(relative).with_extension("svg")
}

/// Convert one file and write its SVG guide to `output`.
///
/// Missing parent directories of `output` are created. Nothing is written if
/// decoding, tracing or the empty-image check fails.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
    tracer: &dyn ContourTracer,
) -> Result<FileReport> {
    let (grid, bytes, mime) = load_image(input)?;

    let doc = convert_image(&grid, &options.config, tracer)?.ok_or_else(|| {
        GuideError::EmptyImage {
            path: input.to_path_buf(),
        }
    })?;

    let output_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(output_dir).map_err(|e| GuideError::Io {
        path: output_dir.to_path_buf(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let raster = if options.embed_raster {
        RasterRef::Embedded {
            mime: mime.to_string(),
            bytes,
        }
    } else {
        RasterRef::Linked(relative_href(output_dir, input))
    };

    write_svg(&doc, &raster, output)?;

    Ok(FileReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        stats: doc.stats,
    })
}

/// Convert many files, one independent conversion per file.
///
/// Outputs mirror each input's path below `input_root`. When two inputs map
/// to the same SVG (`rose.png` next to `rose.webp`), the first in input order
/// is converted and the later ones fail with `OutputConflict` before any work
/// starts. Results come back in input order. Each conversion seeds its own
/// random source, so the outcome does not depend on scheduling.
pub fn convert_batch(
    inputs: &[PathBuf],
    input_root: &Path,
    output_dir: &Path,
    options: &ConvertOptions,
    tracer: &dyn ContourTracer,
) -> Vec<(PathBuf, Result<FileReport>)> {
    let mut claimed: HashMap<PathBuf, &PathBuf> = HashMap::new();
    let targets: Vec<Result<PathBuf>> = inputs
        .iter()
        .map(|input| {
            let output = output_path(input, input_root, output_dir);
            if let Some(first) = claimed.get(&output).copied() {
                return Err(GuideError::OutputConflict {
                    path: input.clone(),
                    first: first.clone(),
                    output,
                });
            }
            claimed.insert(output.clone(), input);
            Ok(output)
        })
        .collect();

    inputs
        .par_iter()
        .zip(targets)
        .map(|(input, target)| {
            let result = target.and_then(|output| convert_file(input, &output, options, tracer));
            (input.clone(), result)
        })
        .collect()
}

/// Href from files in `from_dir` to `target`, using `/` separators.
///
/// Falls back to the target's absolute path when no relative path exists.
fn relative_href(from_dir: &Path, target: &Path) -> String {
    let (Ok(from), Ok(to)) = (std::fs::canonicalize(from_dir), std::fs::canonicalize(target)) else {
        return target.display().to_string();
    };

    let from: Vec<Component> = from.components().collect();
    let to: Vec<Component> = to.components().collect();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();
    if common == 0 {
        return target.display().to_string();
    }

    let mut parts: Vec<String> = vec!["..".to_string(); from.len() - common];
    parts.extend(
        to[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    parts.join("/")
}

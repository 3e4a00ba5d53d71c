//! Convert command implementation.
//!
//! Scans an input directory and writes one SVG paint guide per image.
//! Per-file failures are reported and the batch carries on.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::discovery::{load_manifest, scan_inputs, Manifest};
use crate::error::{GuideError, Result};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{convert_batch, ConvertOptions, FileReport};
use crate::trace::PotraceTracer;

use super::GuideArgs;

/// Convert a directory of images into SVG paint guides
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Input directory of raster images
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Output directory for SVG guides
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Descend into subdirectories
    #[arg(long)]
    pub recursive: bool,

    /// Reference the source image by path instead of embedding it
    #[arg(long)]
    pub link_raster: bool,

    /// potrace executable
    #[arg(long)]
    pub potrace: Option<String>,

    /// Number of images converted in parallel (default: all cores)
    #[arg(long, short)]
    pub jobs: Option<usize>,

    #[command(flatten)]
    pub guide: GuideArgs,
}

/// Counts reported at the end of a batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Merge manifest values with command-line flags and validate the result.
pub fn resolve(args: &ConvertArgs) -> Result<Manifest> {
    let (mut manifest, _) = load_manifest(args.guide.config.as_deref())?;

    if let Some(input) = &args.input {
        manifest.input = input.clone();
    }
    if let Some(output) = &args.output {
        manifest.output = output.clone();
    }
    if args.recursive {
        manifest.recursive = true;
    }
    if args.link_raster {
        manifest.embed_raster = false;
    }
    if let Some(potrace) = &args.potrace {
        manifest.potrace = potrace.clone();
    }
    args.guide.apply(&mut manifest.guide);

    manifest.guide.validate()?;
    Ok(manifest)
}

pub fn run(args: ConvertArgs, printer: &Printer) -> Result<BatchSummary> {
    let manifest = resolve(&args)?;

    if !manifest.input.is_dir() {
        return Err(GuideError::Io {
            path: manifest.input.clone(),
            message: "Input directory not found".to_string(),
        });
    }

    if !manifest.output.exists() {
        fs::create_dir_all(&manifest.output).map_err(|e| GuideError::Io {
            path: manifest.output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let inputs = scan_inputs(&manifest.input, &manifest);
    if inputs.is_empty() {
        printer.warning(
            "Warning",
            &format!("no images found in {}", display_path(&manifest.input)),
        );
        return Ok(BatchSummary::default());
    }
    printer.info(
        "Found",
        &format!(
            "{} in {}",
            plural(inputs.len(), "image", "images"),
            display_path(&manifest.input)
        ),
    );

    let options = ConvertOptions {
        config: manifest.guide.clone(),
        embed_raster: manifest.embed_raster,
    };
    let tracer = PotraceTracer::new(manifest.potrace.clone());

    let convert = || convert_batch(&inputs, &manifest.input, &manifest.output, &options, &tracer);
    let results = match args.jobs {
        Some(jobs) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .map_err(|e| GuideError::Config {
                    message: format!("Cannot start {} worker threads: {}", jobs, e),
                    help: None,
                })?;
            pool.install(convert)
        }
        None => convert(),
    };

    let mut summary = BatchSummary::default();
    for (input, result) in results {
        match result {
            Ok(report) => {
                report_success(printer, &report);
                summary.converted += 1;
            }
            Err(e) if e.is_skip() => {
                printer.warning(
                    "Skipped",
                    &format!("{} (nothing to draw)", display_path(&input)),
                );
                summary.skipped += 1;
            }
            Err(e) => {
                printer.error("Error", &format!("{}: {}", display_path(&input), e));
                summary.failed += 1;
            }
        }
    }

    printer.status(
        "Finished",
        &format!(
            "{} to {} ({} skipped, {} failed)",
            plural(summary.converted, "guide", "guides"),
            display_path(&manifest.output),
            summary.skipped,
            summary.failed
        ),
    );

    Ok(summary)
}

fn report_success(printer: &Printer, report: &FileReport) {
    printer.status(
        "Converted",
        &format!(
            "{} -> {} ({}, {})",
            display_path(&report.input),
            display_path(&report.output),
            plural(report.stats.contour_paths, "contour", "contours"),
            plural(report.stats.colour_strokes, "stroke", "strokes")
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn args_for(input: PathBuf, output: PathBuf, config: PathBuf) -> ConvertArgs {
        ConvertArgs {
            input: Some(input),
            output: Some(output),
            guide: GuideArgs {
                config: Some(config),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_convert_directory() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("art");
        let output = dir.path().join("guides");
        fs::create_dir_all(&input).unwrap();
        let config = dir.path().join("paintguide.yaml");
        fs::write(&config, "").unwrap();

        RgbaImage::from_pixel(20, 20, Rgba([255, 0, 0, 255]))
            .save(input.join("red.png"))
            .unwrap();
        RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0]))
            .save(input.join("blank.png"))
            .unwrap();
        fs::write(input.join("junk.png"), b"not an image").unwrap();

        let summary = run(args_for(input, output.clone(), config), &Printer::plain()).unwrap();

        assert_eq!(
            summary,
            BatchSummary {
                converted: 1,
                skipped: 1,
                failed: 1,
            }
        );
        assert!(output.join("red.svg").exists());
        assert!(!output.join("blank.svg").exists());
        assert!(!output.join("junk.svg").exists());
    }

    #[test]
    fn test_convert_with_jobs() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("art");
        let output = dir.path().join("guides");
        fs::create_dir_all(&input).unwrap();
        let config = dir.path().join("paintguide.yaml");
        fs::write(&config, "").unwrap();

        for (i, colour) in [[255, 0, 0, 255], [0, 200, 0, 255], [80, 80, 255, 255]]
            .into_iter()
            .enumerate()
        {
            RgbaImage::from_pixel(6, 6, Rgba(colour))
                .save(input.join(format!("swatch-{}.png", i)))
                .unwrap();
        }

        let mut args = args_for(input, output.clone(), config);
        args.jobs = Some(2);
        let summary = run(args, &Printer::plain()).unwrap();

        assert_eq!(summary.converted, 3);
        assert!(output.join("swatch-2.svg").exists());
    }

    #[test]
    fn test_recursive_convert_keeps_same_named_images_apart() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("art");
        let output = dir.path().join("guides");
        fs::create_dir_all(input.join("roses")).unwrap();
        fs::create_dir_all(input.join("tulips")).unwrap();
        let config = dir.path().join("paintguide.yaml");
        fs::write(&config, "recursive: true\n").unwrap();

        RgbaImage::from_pixel(6, 6, Rgba([255, 0, 0, 255]))
            .save(input.join("roses").join("petal.png"))
            .unwrap();
        RgbaImage::from_pixel(6, 6, Rgba([0, 200, 0, 255]))
            .save(input.join("tulips").join("petal.png"))
            .unwrap();

        let summary = run(args_for(input, output.clone(), config), &Printer::plain()).unwrap();

        assert_eq!(summary.converted, 2);
        assert_eq!(summary.failed, 0);
        assert!(output.join("roses").join("petal.svg").exists());
        assert!(output.join("tulips").join("petal.svg").exists());
    }

    #[test]
    fn test_shared_output_name_counts_as_failure() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("art");
        let output = dir.path().join("guides");
        fs::create_dir_all(&input).unwrap();
        let config = dir.path().join("paintguide.yaml");
        fs::write(&config, "extensions: [png, jpg]\n").unwrap();

        RgbaImage::from_pixel(6, 6, Rgba([255, 0, 0, 255]))
            .save(input.join("rose.png"))
            .unwrap();
        fs::copy(input.join("rose.png"), input.join("rose.jpg")).unwrap();

        let summary = run(args_for(input, output.clone(), config), &Printer::plain()).unwrap();

        assert_eq!(summary.converted, 1);
        assert_eq!(summary.failed, 1);
        assert!(output.join("rose.svg").exists());
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("paintguide.yaml");
        fs::write(&config, "guide:\n  palette_k: 0\n").unwrap();

        let args = args_for(dir.path().to_path_buf(), dir.path().join("out"), config);
        let err = run(args, &Printer::plain()).unwrap_err();

        assert!(matches!(err, GuideError::Config { .. }));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_flags_override_manifest() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("paintguide.yaml");
        fs::write(&config, "recursive: false\nguide:\n  palette_k: 8\n  seed: 4\n").unwrap();

        let mut args = args_for(dir.path().to_path_buf(), dir.path().join("out"), config);
        args.recursive = true;
        args.link_raster = true;
        args.guide.palette_k = Some(30);

        let manifest = resolve(&args).unwrap();

        assert!(manifest.recursive);
        assert!(!manifest.embed_raster);
        assert_eq!(manifest.guide.palette_k, 30);
        assert_eq!(manifest.guide.seed, 4);
    }

    #[test]
    fn test_missing_input_directory() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("paintguide.yaml");
        fs::write(&config, "").unwrap();

        let args = args_for(dir.path().join("nope"), dir.path().join("out"), config);
        assert!(matches!(
            run(args, &Printer::plain()),
            Err(GuideError::Io { .. })
        ));
    }
}

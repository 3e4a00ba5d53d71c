//! Inspect command implementation.
//!
//! Runs the analysis on a single image and reports what the guide would
//! contain. With `--json` the full guide document is printed to stdout.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::load_manifest;
use crate::error::{GuideError, Result};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{convert_image, load_image};
use crate::trace::{ContourTracer, PotraceTracer};
use crate::types::{GuideDocument, Mask};

use super::GuideArgs;

/// Analyze one image and report its guide without writing SVG
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Image to analyze
    #[arg(required = true)]
    pub file: PathBuf,

    /// Print the guide document as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Skip contour tracing (no potrace needed)
    #[arg(long)]
    pub no_contours: bool,

    /// potrace executable
    #[arg(long)]
    pub potrace: Option<String>,

    #[command(flatten)]
    pub guide: GuideArgs,
}

/// Tracer that never finds a contour.
struct NoContours;

impl ContourTracer for NoContours {
    fn trace(&self, _mask: &Mask) -> Result<String> {
        Ok("<svg></svg>".to_string())
    }
}

/// Analyze the image; `None` means nothing to draw.
pub fn analyze(args: &InspectArgs) -> Result<Option<GuideDocument>> {
    let (mut manifest, _) = load_manifest(args.guide.config.as_deref())?;
    args.guide.apply(&mut manifest.guide);
    manifest.guide.validate()?;

    let (grid, _, _) = load_image(&args.file)?;

    if args.no_contours {
        convert_image(&grid, &manifest.guide, &NoContours)
    } else {
        let program = args.potrace.clone().unwrap_or(manifest.potrace);
        convert_image(&grid, &manifest.guide, &PotraceTracer::new(program))
    }
}

pub fn run(args: InspectArgs, printer: &Printer) -> Result<()> {
    let display = display_path(&args.file);

    let Some(doc) = analyze(&args)? else {
        printer.warning("Skipped", &format!("{} (nothing to draw)", display));
        return Ok(());
    };

    if args.json {
        let json = serde_json::to_string_pretty(&doc).map_err(|e| GuideError::Parse {
            message: format!("Cannot serialize guide: {}", e),
            help: None,
        })?;
        println!("{}", json);
        return Ok(());
    }

    let stats = doc.stats;
    printer.info("Analyzed", &format!("{} ({}x{})", display, doc.width, doc.height));
    printer.info("Contours", &plural(stats.contour_paths, "path", "paths"));
    printer.info(
        "Colour",
        &format!(
            "{} over {} in {}",
            plural(stats.colour_strokes, "stroke", "strokes"),
            plural(stats.blobs, "blob", "blobs"),
            plural(stats.hue_buckets, "hue bucket", "hue buckets")
        ),
    );

    Ok(())
}

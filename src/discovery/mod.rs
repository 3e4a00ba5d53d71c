//! Input discovery and project configuration.
//!
//! A project is a directory of raster images plus an optional
//! `paintguide.yaml` manifest holding defaults for the conversion.

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use manifest::Manifest;
pub use scanner::scan_inputs;

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "paintguide.yaml";

/// Load the manifest at `explicit`, or `paintguide.yaml` in the current
/// directory if present, or the defaults.
///
/// Returns the manifest and the path it came from.
pub fn load_manifest(explicit: Option<&Path>) -> Result<(Manifest, Option<PathBuf>)> {
    if let Some(path) = explicit {
        return Ok((Manifest::load(path)?, Some(path.to_path_buf())));
    }

    let default_path = PathBuf::from(MANIFEST_FILENAME);
    if default_path.exists() {
        let manifest = Manifest::load(&default_path)?;
        return Ok((manifest, Some(default_path)));
    }

    Ok((Manifest::default(), None))
}

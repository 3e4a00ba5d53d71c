//! Project manifest (paintguide.yaml) parsing.
//!
//! The manifest defines where images come from, where guides go, and the
//! default conversion parameters.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::GuideConfig;
use crate::error::{GuideError, Result};
use crate::trace::DEFAULT_POTRACE;

/// Project manifest loaded from paintguide.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directory scanned for input images.
    pub input: PathBuf,

    /// Directory receiving one SVG per input.
    pub output: PathBuf,

    /// Descend into subdirectories of `input`.
    pub recursive: bool,

    /// File extensions treated as images (case-insensitive, no dot).
    pub extensions: Vec<String>,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,

    /// Contour tracer executable.
    pub potrace: String,

    /// Inline the source raster in each SVG.
    pub embed_raster: bool,

    /// Conversion parameters.
    pub guide: GuideConfig,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            input: PathBuf::from("."),
            output: PathBuf::from("guides"),
            recursive: false,
            extensions: vec!["png".to_string()],
            excludes: vec![],
            potrace: DEFAULT_POTRACE.to_string(),
            embed_raster: true,
            guide: GuideConfig::default(),
        }
    }
}

impl Manifest {
    /// Load manifest from a paintguide.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GuideError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| GuideError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check paintguide.yaml syntax".to_string()),
        })
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| GuideError::Parse {
            message: format!("Cannot serialize manifest: {}", e),
            help: None,
        })
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes
            .iter()
            .any(|pattern| Self::matches_pattern(&path_str, pattern))
    }

    /// Whether `path` has one of the configured image extensions.
    pub fn is_image(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
    }

    /// Simple glob pattern matching.
    fn matches_pattern(path: &str, pattern: &str) -> bool {
        if let Some(suffix) = pattern.strip_prefix("**/") {
            // **/dir/* matches anything inside dir anywhere in the path
            if let Some(dir) = suffix.strip_suffix("/*") {
                return path.contains(&format!("/{}/", dir)) || path.starts_with(&format!("{}/", dir));
            }
            return path.contains(suffix);
        }

        if let Some(suffix) = pattern.strip_prefix('*') {
            if !pattern.contains('/') {
                return path.ends_with(suffix);
            }
        }

        if let Some(prefix) = pattern.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", prefix))
                || path.contains(&format!("/{}/", prefix));
        }

        path.contains(pattern)
    }
}

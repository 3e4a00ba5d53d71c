//! File system scanner for input images.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::Manifest;

/// Collect the images under `root`, sorted by path.
///
/// Only the top level is scanned unless the manifest asks for recursion.
pub fn scan_inputs(root: &Path, manifest: &Manifest) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }

    let max_depth = if manifest.recursive { usize::MAX } else { 1 };

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| manifest.is_image(p) && !manifest.is_excluded(p))
        .collect();

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_scan_sorted_top_level() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("b.png"));
        touch(&dir.path().join("a.png"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("nested/c.png"));

        let files = scan_inputs(dir.path(), &Manifest::default());

        assert_eq!(
            files,
            vec![dir.path().join("a.png"), dir.path().join("b.png")]
        );
    }

    #[test]
    fn test_scan_recursive() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a.png"));
        touch(&dir.path().join("nested/c.png"));

        let manifest = Manifest {
            recursive: true,
            ..Default::default()
        };
        let files = scan_inputs(dir.path(), &manifest);

        assert_eq!(files.len(), 2);
        assert!(files.contains(&dir.path().join("nested/c.png")));
    }

    #[test]
    fn test_scan_respects_excludes() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("keep.png"));
        touch(&dir.path().join("skip.bak.png"));

        let manifest = Manifest {
            excludes: vec!["*.bak.png".to_string()],
            ..Default::default()
        };
        let files = scan_inputs(dir.path(), &manifest);

        assert_eq!(files, vec![dir.path().join("keep.png")]);
    }

    #[test]
    fn test_scan_missing_dir() {
        let files = scan_inputs(Path::new("/nonexistent/paintguide"), &Manifest::default());
        assert!(files.is_empty());
    }
}

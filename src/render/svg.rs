//! SVG output for guide documents.
//!
//! The SVG carries the original raster as a background and one flipped group
//! holding every guide path with zero stroke opacity, ready to be revealed
//! path by path.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{GuideError, Result};
use crate::types::{GuideDocument, Phase};

/// How the background raster is referenced from the SVG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterRef {
    /// Inline `data:` URI.
    Embedded { mime: String, bytes: Vec<u8> },
    /// Plain href, usually a path relative to the SVG.
    Linked(String),
}

impl RasterRef {
    /// Value for the `<image>` href attribute.
    pub fn href(&self) -> String {
        match self {
            RasterRef::Embedded { mime, bytes } => {
                format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
            }
            RasterRef::Linked(href) => href.clone(),
        }
    }
}

/// Render a guide document as SVG text.
pub fn render_svg(doc: &GuideDocument, raster: &RasterRef) -> String {
    let (w, h) = (doc.width, doc.height);
    let mut out = String::new();

    let _ = writeln!(out, r#"<?xml version="1.0" encoding="utf-8" ?>"#);
    let _ = writeln!(
        out,
        r#"<svg baseProfile="tiny" version="1.2" width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">"#
    );
    let _ = writeln!(
        out,
        r#"<image x="0" y="0" width="{w}" height="{h}" xlink:href="{}"/>"#,
        xml_escape(&raster.href())
    );
    let _ = writeln!(out, r#"<g transform="matrix(1 0 0 -1 0 {h})">"#);

    for path in &doc.paths {
        let cap = match path.phase {
            Phase::Contour => r#"stroke-linecap="round" stroke-linejoin="round""#,
            Phase::Colour => r#"stroke-linecap="butt""#,
        };
        let _ = writeln!(
            out,
            r##"<path d="{}" fill="none" stroke="#000" stroke-width="{}" {} stroke-opacity="0"/>"##,
            xml_escape(&path.data),
            path.stroke_width,
            cap
        );
    }

    let _ = writeln!(out, "</g>");
    let _ = writeln!(out, "</svg>");
    out
}

/// Render and write a guide document.
///
/// The SVG is written to a temporary file next to `path` and renamed into
/// place, so a failed write never leaves a truncated document behind.
pub fn write_svg(doc: &GuideDocument, raster: &RasterRef, path: &Path) -> Result<()> {
    let io_error = |message: String| GuideError::Io {
        path: path.to_path_buf(),
        message,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = tempfile::Builder::new()
        .prefix(".paintguide-")
        .suffix(".svg.tmp")
        .tempfile_in(dir)
        .map_err(|e| io_error(format!("Failed to create temporary file: {}", e)))?;

    staged
        .write_all(render_svg(doc, raster).as_bytes())
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| io_error(format!("Failed to write SVG: {}", e)))?;

    staged
        .persist(path)
        .map_err(|e| io_error(format!("Failed to move SVG into place: {}", e.error)))?;
    Ok(())
}

fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GuidePath, GuideStats};
    use tempfile::tempdir;

    fn sample_doc() -> GuideDocument {
        GuideDocument {
            width: 20,
            height: 10,
            paths: vec![
                GuidePath {
                    data: "M0 0 L5 5z".to_string(),
                    stroke_width: 6,
                    phase: Phase::Contour,
                },
                GuidePath {
                    data: "M0.50 6.00 L5.00 1.50".to_string(),
                    stroke_width: 12,
                    phase: Phase::Colour,
                },
            ],
            stats: GuideStats::default(),
        }
    }

    #[test]
    fn test_embedded_href() {
        let raster = RasterRef::Embedded {
            mime: "image/png".to_string(),
            bytes: b"abc".to_vec(),
        };
        assert_eq!(raster.href(), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_render_structure() {
        let svg = render_svg(&sample_doc(), &RasterRef::Linked("a&b.png".to_string()));

        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 20 10""#));
        assert!(svg.contains(r#"xlink:href="a&amp;b.png""#));
        assert!(svg.contains(r#"<g transform="matrix(1 0 0 -1 0 10)">"#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_phase_styles_in_order() {
        let svg = render_svg(&sample_doc(), &RasterRef::Linked("x.png".to_string()));
        let lines: Vec<&str> = svg.lines().filter(|l| l.starts_with("<path")).collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(r#"d="M0 0 L5 5z""#));
        assert!(lines[0].contains(r#"stroke-linecap="round""#));
        assert!(lines[0].contains(r#"stroke-width="6""#));
        assert!(lines[1].contains(r#"stroke-linecap="butt""#));
        assert!(lines[1].contains(r#"stroke-width="12""#));
        assert!(lines.iter().all(|l| l.contains(r#"stroke-opacity="0""#)));
        assert!(lines.iter().all(|l| l.contains(r#"fill="none""#)));
    }

    #[test]
    fn test_write_svg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("guide.svg");

        write_svg(&sample_doc(), &RasterRef::Linked("x.png".to_string()), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_svg_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("guide.svg");
        std::fs::write(&path, "stale").unwrap();

        write_svg(&sample_doc(), &RasterRef::Linked("x.png".to_string()), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<?xml"));
        assert!(written.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_write_svg_failure_leaves_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("guide.svg");

        let err = write_svg(&sample_doc(), &RasterRef::Linked("x.png".to_string()), &path)
            .unwrap_err();

        assert!(matches!(err, GuideError::Io { .. }));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&apos;&amp;&apos;&lt;/a&gt;");
    }
}

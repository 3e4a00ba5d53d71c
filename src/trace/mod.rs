//! Contour tracing of the dark mask.
//!
//! Tracing itself is delegated to a [`ContourTracer`], normally the external
//! `potrace` binary. This module normalizes whatever SVG the tracer returns
//! into a list of path-data strings.

mod potrace;

use serde::Serialize;

use crate::error::{GuideError, Result};
use crate::types::Mask;

pub use potrace::{encode_pbm, PotraceTracer, DEFAULT_POTRACE};

/// Something that turns a binary mask into SVG text.
///
/// Implementations return the raw SVG document; set pixels are ink.
pub trait ContourTracer: Sync {
    fn trace(&self, mask: &Mask) -> Result<String>;
}

/// One traced boundary, already in output space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContourPath {
    pub data: String,
    pub stroke_width: u32,
}

/// Trace `dark` and return one contour path per `<path>` element.
///
/// An empty mask is not sent to the tracer.
pub fn trace_contours(
    tracer: &dyn ContourTracer,
    dark: &Mask,
    outline_width: u32,
) -> Result<Vec<ContourPath>> {
    if !dark.any() {
        return Ok(Vec::new());
    }

    let svg = tracer.trace(dark)?;
    if !svg.contains("<svg") {
        return Err(GuideError::Tracer {
            message: "tracer output is not an SVG document".to_string(),
            help: Some("Check that the tracer was invoked with --svg".to_string()),
        });
    }

    Ok(extract_path_data(&svg)
        .into_iter()
        .map(|data| ContourPath {
            data,
            stroke_width: outline_width,
        })
        .collect())
}

/// Pull the `d` attribute out of every `<path>` element, collapsing whitespace.
///
/// Paths whose data is blank are dropped.
pub fn extract_path_data(svg: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut rest = svg;

    while let Some(start) = rest.find("<path") {
        let tag_start = &rest[start + "<path".len()..];
        let tag_end = tag_start.find('>').unwrap_or(tag_start.len());
        let tag = &tag_start[..tag_end];

        if let Some(data) = attribute(tag, "d") {
            let normalized = collapse_whitespace(data);
            if !normalized.is_empty() {
                paths.push(normalized);
            }
        }

        rest = &tag_start[tag_end..];
    }

    paths
}

/// Value of `name="..."` within a tag body, requiring whitespace before the name.
fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{}=\"", name);
    let mut offset = 0;

    while let Some(pos) = tag[offset..].find(&needle) {
        let at = offset + pos;
        let preceded_by_space = tag[..at]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_whitespace());
        let value_start = at + needle.len();

        if preceded_by_space {
            let value = &tag[value_start..];
            let end = value.find('"')?;
            return Some(&value[..end]);
        }
        offset = value_start;
    }

    None
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedTracer {
        svg: String,
        calls: AtomicUsize,
    }

    impl FixedTracer {
        fn new(svg: &str) -> Self {
            Self {
                svg: svg.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl ContourTracer for FixedTracer {
        fn trace(&self, _mask: &Mask) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.svg.clone())
        }
    }

    struct FailingTracer;

    impl ContourTracer for FailingTracer {
        fn trace(&self, _mask: &Mask) -> Result<String> {
            Err(GuideError::Tracer {
                message: "potrace exited with status 2".to_string(),
                help: None,
            })
        }
    }

    const POTRACE_SVG: &str = r##"<?xml version="1.0" standalone="no"?>
<svg version="1.0" xmlns="http://www.w3.org/2000/svg" width="10pt" height="4pt">
<g transform="translate(0,4) scale(1,-1)" fill="#000000" stroke="none">
<path d="M0 2 l0
  -2 5 0
  5 0 0 4 -10 0 0 -2z"/>
</g>
</svg>
"##;

    #[test]
    fn test_extract_collapses_whitespace() {
        assert_eq!(
            extract_path_data(POTRACE_SVG),
            vec!["M0 2 l0 -2 5 0 5 0 0 4 -10 0 0 -2z"]
        );
    }

    #[test]
    fn test_extract_multiple_paths() {
        let svg = r#"<svg><path fill="none" d="M1 1 L2 2"/><path id="x"
            d=" M3 3  L4 4 "/></svg>"#;
        assert_eq!(extract_path_data(svg), vec!["M1 1 L2 2", "M3 3 L4 4"]);
    }

    #[test]
    fn test_extract_ignores_paths_without_d() {
        let svg = r#"<svg><path id="empty"/><path data-d="x" d=""/></svg>"#;
        assert!(extract_path_data(svg).is_empty());
    }

    #[test]
    fn test_empty_mask_skips_tracer() {
        let tracer = FixedTracer::new(POTRACE_SVG);
        let paths = trace_contours(&tracer, &Mask::new(4, 4), 6).unwrap();

        assert!(paths.is_empty());
        assert_eq!(tracer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_contours_carry_outline_width() {
        let tracer = FixedTracer::new(POTRACE_SVG);
        let dark = Mask::from_fn(10, 4, |_, _| true);
        let paths = trace_contours(&tracer, &dark, 6).unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].stroke_width, 6);
        assert_eq!(tracer.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_non_svg_output_is_tracer_error() {
        let tracer = FixedTracer::new("potrace: unknown option");
        let dark = Mask::from_rows(&["#"]);
        let err = trace_contours(&tracer, &dark, 6).unwrap_err();
        assert!(matches!(err, GuideError::Tracer { .. }));
    }

    #[test]
    fn test_tracer_failure_propagates() {
        let dark = Mask::from_rows(&["#"]);
        let err = trace_contours(&FailingTracer, &dark, 6).unwrap_err();
        assert!(err.to_string().contains("status 2"));
    }
}

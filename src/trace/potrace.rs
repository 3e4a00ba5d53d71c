//! `potrace` subprocess tracer.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::{GuideError, Result};
use crate::types::Mask;

use super::ContourTracer;

/// Executable looked up on PATH when none is configured.
pub const DEFAULT_POTRACE: &str = "potrace";

/// Traces masks by piping a PBM bitmap through the `potrace` binary.
#[derive(Debug, Clone)]
pub struct PotraceTracer {
    program: String,
}

impl PotraceTracer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PotraceTracer {
    fn default() -> Self {
        Self::new(DEFAULT_POTRACE)
    }
}

impl ContourTracer for PotraceTracer {
    fn trace(&self, mask: &Mask) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(["--svg", "--flat", "--invert", "--unit", "1", "--output", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| GuideError::Tracer {
                message: format!("failed to spawn {}: {}", self.program, e),
                help: Some("Install potrace or pass --potrace with its path".to_string()),
            })?;

        let bitmap = encode_pbm(mask);
        {
            let mut stdin = child.stdin.take().ok_or_else(|| GuideError::Tracer {
                message: format!("failed to open {} stdin", self.program),
                help: None,
            })?;
            stdin.write_all(&bitmap).map_err(|e| GuideError::Tracer {
                message: format!("failed to write bitmap to {}: {}", self.program, e),
                help: None,
            })?;
        }

        let output = child.wait_with_output().map_err(|e| GuideError::Tracer {
            message: format!("failed to wait for {}: {}", self.program, e),
            help: None,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GuideError::Tracer {
                message: format!("{} exited with {}: {}", self.program, output.status, stderr.trim()),
                help: None,
            });
        }

        String::from_utf8(output.stdout).map_err(|_| GuideError::Tracer {
            message: format!("{} produced non-UTF-8 output", self.program),
            help: None,
        })
    }
}

/// Encode a mask as a binary PBM (P4) with set pixels white.
///
/// Combined with `--invert`, potrace then traces the set pixels. Rows are
/// packed most significant bit first and padded to a whole byte.
pub fn encode_pbm(mask: &Mask) -> Vec<u8> {
    let width = mask.width();
    let height = mask.height();
    let row_bytes = width.div_ceil(8);

    let mut out = format!("P4\n{} {}\n", width, height).into_bytes();
    out.reserve(row_bytes * height);

    for y in 0..height {
        let mut row = vec![0u8; row_bytes];
        for x in 0..width {
            // PBM: 1 is black
            if !mask.get(x, y) {
                row[x / 8] |= 0x80 >> (x % 8);
            }
        }
        out.extend_from_slice(&row);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_pbm_header_and_bits() {
        let mask = Mask::from_rows(&["#.#", "..."]);
        let pbm = encode_pbm(&mask);

        let header = b"P4\n3 2\n";
        assert_eq!(&pbm[..header.len()], header);
        // Row 0: 0 1 0 then padding zeros; row 1: 1 1 1.
        assert_eq!(&pbm[header.len()..], &[0b0100_0000, 0b1110_0000]);
    }

    #[test]
    fn test_encode_pbm_pads_rows() {
        let mask = Mask::from_fn(9, 1, |_, _| true);
        let pbm = encode_pbm(&mask);
        assert_eq!(pbm.len(), b"P4\n9 1\n".len() + 2);
        assert!(pbm.ends_with(&[0, 0]));
    }

    #[test]
    fn test_missing_binary_is_tracer_error() {
        let tracer = PotraceTracer::new("paintguide-no-such-potrace");
        let err = tracer.trace(&Mask::from_rows(&["#"])).unwrap_err();
        assert!(matches!(err, GuideError::Tracer { .. }));
    }
}

//! Status lines for the paintguide CLI.
//!
//! Every line is a right-aligned verb followed by a message, written to
//! stderr. stdout stays free for `inspect --json` and shell completions.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Width of the verb column; "Converted" and "Skipped" line up under it.
const VERB_WIDTH: usize = 12;

/// How a status line is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// A guide was written or a file created.
    Done,
    /// Counts and analysis results.
    Note,
    /// An image was skipped or nothing was found.
    Skip,
    /// A per-file failure.
    Fail,
}

impl Tone {
    fn ansi(self) -> &'static str {
        match self {
            Tone::Done => "\x1b[32m",
            Tone::Note => "\x1b[36m",
            Tone::Skip => "\x1b[33m",
            Tone::Fail => "\x1b[31m",
        }
    }
}

/// Writes batch progress to stderr, coloured when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// A printer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// `Converted art/rose.png -> guides/rose.svg (1 contour, 4 strokes)`
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(Tone::Done, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.emit(Tone::Note, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.emit(Tone::Skip, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.emit(Tone::Fail, verb, message);
    }

    /// Format one status line without the trailing newline.
    pub fn line(&self, tone: Tone, verb: &str, message: &str) -> String {
        if self.color {
            format!("{BOLD}{}{verb:>VERB_WIDTH$}{RESET} {message}", tone.ansi())
        } else {
            format!("{verb:>VERB_WIDTH$} {message}")
        }
    }

    fn emit(&self, tone: Tone, verb: &str, message: &str) {
        let line = self.line(tone, verb, message);
        // a closed stderr is not worth failing a batch over
        let _ = writeln!(io::stderr().lock(), "{}", line);
    }
}

/// `plural(1, "guide", "guides")` is "1 guide", any other count takes the plural.
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    let word = if n == 1 { singular } else { pluralized };
    format!("{} {}", n, word)
}

/// Path relative to the working directory when it lies below it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));

    match relative {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}

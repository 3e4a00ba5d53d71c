use miette::Diagnostic;
use thiserror::Error;

/// Main error type for paintguide operations
#[derive(Error, Diagnostic, Debug)]
pub enum GuideError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(paintguide::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Cannot decode {path}: {message}")]
    #[diagnostic(code(paintguide::decode))]
    Decode {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Nothing to draw in {path}: no pixel passes the alpha threshold")]
    #[diagnostic(code(paintguide::empty))]
    EmptyImage { path: std::path::PathBuf },

    #[error("{path} and {first} would both write {output}")]
    #[diagnostic(
        code(paintguide::output_conflict),
        help("Rename one of the inputs or narrow the manifest's extensions")
    )]
    OutputConflict {
        path: std::path::PathBuf,
        first: std::path::PathBuf,
        output: std::path::PathBuf,
    },

    #[error("Tracer error: {message}")]
    #[diagnostic(code(paintguide::tracer))]
    Tracer {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(paintguide::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(paintguide::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl GuideError {
    /// Whether this error means "skip the file" rather than a failure.
    pub fn is_skip(&self) -> bool {
        matches!(self, GuideError::EmptyImage { .. })
    }
}

pub type Result<T> = std::result::Result<T, GuideError>;

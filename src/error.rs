use miette::Diagnostic;
use thiserror::Error;

/// Main error type for smiley operations
#[derive(Error, Diagnostic, Debug)]
pub enum ThemeError {
    #[error("IO error: {0}")]
    #[diagnostic(code(smiley::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(smiley::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(smiley::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Encoding error: {message}")]
    #[diagnostic(code(smiley::encode))]
    Encode { message: String },

    #[error("Build error: {message}")]
    #[diagnostic(code(smiley::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, ThemeError>;

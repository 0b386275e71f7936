//! Error types for the editing engine.
//!
//! Almost nothing in the engine fails: positions are clamped, rejected
//! characters are ignored and empty undo history is reported as `false`.
//! The variants below cover the few operations that can genuinely fail.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for engine operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error while loading text.
    Io(io::Error),
    /// Loaded file is not valid UTF-8.
    InvalidUtf8 { path: PathBuf },
    /// A keyword rule was registered with an empty pattern.
    EmptyPattern,
    /// Invalid color format (e.g., malformed hex string).
    InvalidColor(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidUtf8 { path } => {
                write!(f, "file is not valid UTF-8: {}", path.display())
            }
            Self::EmptyPattern => write!(f, "keyword pattern must not be empty"),
            Self::InvalidColor(s) => write!(f, "invalid color format: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidColor("not-a-color".to_string());
        assert!(err.to_string().contains("invalid color format"));

        let err = Error::EmptyPattern;
        assert!(err.to_string().contains("empty"));

        let err = Error::InvalidUtf8 {
            path: PathBuf::from("notes.txt"),
        };
        assert!(err.to_string().contains("notes.txt"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}

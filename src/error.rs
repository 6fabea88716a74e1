use thiserror::Error;

/// Custom error types for the binstream library.
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying I/O errors reported by the wrapped channel.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A byte buffer does not have the length required by the requested types.
    #[error("Size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The text converter rejected the encoding name or the text itself.
    #[error("Encoding error ({encoding}): {message}")]
    Encoding { encoding: String, message: String },

    /// The channel ran out of data before a read completed.
    #[error("Unexpected end of file while reading stream")]
    UnexpectedEof,

    /// A capability has no implementation on the current platform.
    #[error("{capability} is not supported on {platform}")]
    UnsupportedPlatform {
        capability: &'static str,
        platform: &'static str,
    },
}

impl Error {
    /// Create a new `SizeMismatch` error with the expected and actual lengths.
    pub fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::SizeMismatch { expected, actual }
    }

    /// Create a new `Encoding` error carrying the converter's diagnostic.
    pub fn encoding(encoding: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encoding {
            encoding: encoding.into(),
            message: message.into(),
        }
    }

    /// Create a new `UnsupportedPlatform` error for the running OS.
    pub fn unsupported(capability: &'static str) -> Self {
        Self::UnsupportedPlatform {
            capability,
            platform: std::env::consts::OS,
        }
    }
}

/// Result type alias for the library operations.
pub type Result<T> = std::result::Result<T, Error>;

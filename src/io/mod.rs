#[cfg(feature = "svg-io")]
pub mod svg;

#[cfg(feature = "stl-io")]
pub mod stl;

use crate::errors::RenderError;

/// Codec and file errors.
///
/// The codecs sit behind cargo feature flags; with a feature disabled the
/// matching variants are simply never constructed.
#[derive(Debug)]
pub enum IoError {
    StdIo(std::io::Error),

    MalformedInput(String),
    /// A binary STL whose length is too short for its header or for the
    /// triangle count it declares.
    TruncatedStl { expected: usize, actual: usize },

    /// Rendering failed before anything was written.
    Render(RenderError),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use IoError::*;

        match self {
            StdIo(error) => write!(f, "std::io::Error: {error}"),

            MalformedInput(msg) => write!(f, "Input is malformed: {msg}"),
            TruncatedStl { expected, actual } => {
                write!(f, "STL data is truncated: expected {expected} bytes, got {actual}")
            },

            Render(error) => write!(f, "Render failed: {error}"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IoError::StdIo(error) => Some(error),
            IoError::Render(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for IoError {
    fn from(value: std::io::Error) -> Self {
        Self::StdIo(value)
    }
}

impl From<RenderError> for IoError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

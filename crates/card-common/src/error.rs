//! Error types for review card generation.

use thiserror::Error;

/// Result type alias using CardError.
pub type CardResult<T> = Result<T, CardError>;

/// Primary error type for card operations.
#[derive(Debug, Error)]
pub enum CardError {
    // === Validation Errors ===
    #[error("Unknown palette: '{0}'")]
    UnknownPalette(String),

    #[error("Invalid card dimensions {width}x{height}: width and height must be positive")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Score {score} is outside the display range {min}-{max}")]
    InvalidScore { score: f32, min: f32, max: f32 },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unknown platform: '{0}' (expected none, backloggd or letterboxd)")]
    UnknownPlatform(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    RenderFailure(String),

    #[error("Image encoding failed: {0}")]
    Encode(String),

    // === Output Errors ===
    #[error("I/O error: {0}")]
    Io(String),
}

impl CardError {
    /// Whether this error was caused by user input rather than by the
    /// rendering machinery.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CardError::UnknownPalette(_)
                | CardError::InvalidDimensions { .. }
                | CardError::InvalidScore { .. }
                | CardError::InvalidColor(_)
                | CardError::UnknownPlatform(_)
        )
    }

    /// Short user-facing hint for the shell.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CardError::UnknownPalette(_) => {
                Some("run `cardgen palettes` to list the built-in palettes")
            }
            CardError::InvalidDimensions { .. } => Some("width and height must both be at least 1"),
            CardError::InvalidScore { .. } => Some("scores are given out of 10, e.g. 7.5"),
            CardError::InvalidColor(_) => Some("colors are hex strings like #12121a"),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CardError {
    fn from(err: std::io::Error) -> Self {
        CardError::Io(err.to_string())
    }
}

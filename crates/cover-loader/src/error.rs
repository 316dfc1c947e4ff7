//! Cover loading failures.
//!
//! None of these are fatal to a render: the loader turns every failure into a
//! placeholder outcome and logs it.

use thiserror::Error;

/// Why a cover could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoverLoadFailure {
    // === Request Errors ===
    #[error("No cover requested")]
    Missing,

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Server returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Cover load timed out after {0} ms")]
    Timeout(u64),

    // === File Errors ===
    #[error("Cover file not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(String),

    // === Content Errors ===
    #[error("Cover is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },

    #[error("Failed to decode cover image: {0}")]
    Decode(String),
}

impl CoverLoadFailure {
    /// Short user-facing explanation.
    pub fn user_message(&self) -> &'static str {
        match self {
            CoverLoadFailure::Missing => "no cover image was given",
            CoverLoadFailure::Http(_) | CoverLoadFailure::Status { .. } => {
                "the cover image could not be downloaded"
            }
            CoverLoadFailure::Timeout(_) => "the cover image took too long to download",
            CoverLoadFailure::NotFound(_) => "the cover image file does not exist",
            CoverLoadFailure::Io(_) => "the cover image file could not be read",
            CoverLoadFailure::TooLarge { .. } => "the cover image is too large",
            CoverLoadFailure::Decode(_) => "the cover is not a supported image",
        }
    }
}

impl From<std::io::Error> for CoverLoadFailure {
    fn from(err: std::io::Error) -> Self {
        CoverLoadFailure::Io(err.to_string())
    }
}

impl From<reqwest::Error> for CoverLoadFailure {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return CoverLoadFailure::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }
        CoverLoadFailure::Http(err.to_string())
    }
}

impl From<image::ImageError> for CoverLoadFailure {
    fn from(err: image::ImageError) -> Self {
        CoverLoadFailure::Decode(err.to_string())
    }
}

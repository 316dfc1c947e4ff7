//! Errors surfaced by the card generator shell.

use std::path::{Path, PathBuf};

use card_common::CardError;
use cover_loader::CoverLoadFailure;
use renderer::StyleError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CardgenError>;

#[derive(Debug, Error)]
pub enum CardgenError {
    // === Input Errors ===
    #[error("Failed to read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Missing {0}: give a request file or pass it as a flag")]
    MissingArgument(&'static str),

    #[error("Invalid style: {0}")]
    Style(#[from] StyleError),

    // === Card Errors ===
    #[error(transparent)]
    Card(#[from] CardError),

    #[error("Cover loader could not start: {0}")]
    Loader(#[from] CoverLoadFailure),

    // === Output Errors ===
    #[error("Failed to write {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },
}

impl CardgenError {
    pub(crate) fn read(path: &Path, err: impl std::fmt::Display) -> Self {
        CardgenError::Read {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub(crate) fn parse(path: &Path, err: impl std::fmt::Display) -> Self {
        CardgenError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub(crate) fn write(path: &Path, err: impl std::fmt::Display) -> Self {
        CardgenError::Write {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Whether the user can fix this by changing their input.
    pub fn is_user_error(&self) -> bool {
        match self {
            CardgenError::Card(e) => e.is_validation(),
            CardgenError::Read { .. }
            | CardgenError::Parse { .. }
            | CardgenError::MissingArgument(_)
            | CardgenError::Style(_) => true,
            CardgenError::Loader(_) | CardgenError::Write { .. } => false,
        }
    }

    /// Message for the terminal, with a hint when one applies.
    pub fn user_message(&self) -> String {
        match self {
            CardgenError::Card(e) => match e.hint() {
                Some(hint) => format!("{} ({})", e, hint),
                None => e.to_string(),
            },
            other => other.to_string(),
        }
    }
}

//! Typed error hierarchy for roster.
//!
//! A single `CmsError` covers every way a session can end abnormally. None of
//! the variants are recovered from inside a handler; they all propagate to
//! `main`, which logs them and exits non-zero.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = CmsError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum CmsError {
    #[error("Failed to open database at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to {action}: {source}")]
    Store {
        action: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Nothing to select: no {what} exist yet")]
    EmptyChoices { what: &'static str },

    #[error("Selection {index} is outside a list of {len} choices")]
    SelectionOutOfRange { index: usize, len: usize },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Attach a statement description to a `rusqlite` failure.
pub(crate) trait StoreContext<T> {
    fn store_context(self, action: &'static str) -> Result<T>;
}

impl<T> StoreContext<T> for std::result::Result<T, rusqlite::Error> {
    fn store_context(self, action: &'static str) -> Result<T> {
        self.map_err(|source| CmsError::Store { action, source })
    }
}

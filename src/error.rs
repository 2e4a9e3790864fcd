use thiserror::Error;

use crate::quiz::SessionPhase;

/// Problems found while loading or validating a page dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[cfg(feature = "serde_json")]
    #[error("dataset json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("page 0 is reserved; pages start at 1")]
    ReservedPageZero,
    #[error("dataset has no pages")]
    NoPages,
    #[error("page numbers must be contiguous: expected {expected}, found {found}")]
    PageGap { expected: u32, found: u32 },
    #[error("page {page} has an empty question")]
    EmptyQuestion { page: u32 },
    #[error("page {page}: question item '{item}' is not among the options")]
    MissingOption { page: u32, item: String },
}

/// Submissions the session refuses to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("feedback still showing ({phase:?}); submit ignored")]
    Busy { phase: SessionPhase },
    #[error("all pages completed")]
    Finished,
}

use notever_types::{NoteId, VersionNumber};

/// Errors produced by history operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),

    #[error("version {version} not found for note {note}")]
    VersionNotFound { note: NoteId, version: VersionNumber },

    #[error("integrity violation for note {note} at version {version}: {reason}")]
    IntegrityViolation {
        note: NoteId,
        version: VersionNumber,
        reason: String,
    },

    #[error("no snapshot at or below version {version} for note {note}")]
    MissingBaseSnapshot { note: NoteId, version: VersionNumber },

    #[error("storage error: {0}")]
    Storage(String),
}

/// Result alias for history operations.
pub type HistoryResult<T> = Result<T, HistoryError>;

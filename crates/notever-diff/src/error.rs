//! Error types for the diff crate.

/// Errors that can occur while computing or applying an edit script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// The configured cap on the edit distance was reached before the
    /// search found the end of the edit graph.
    #[error("edit distance exceeds the configured limit of {limit}")]
    EditDistanceExceeded { limit: usize },

    /// A text is too long for the search to index.
    #[error("text of {len} chars exceeds the diffable maximum of {max}")]
    InputTooLarge { len: usize, max: usize },

    /// The search ran through every distance level without reaching the end.
    #[error("edit graph search exhausted without reaching ({old_len}, {new_len})")]
    SearchExhausted { old_len: usize, new_len: usize },

    /// Backtracking found no predecessor on a recorded level.
    #[error("trace has no predecessor for diagonal {diagonal} at level {level}")]
    CorruptTrace { level: usize, diagonal: isize },

    /// An operation points outside the working buffer.
    #[error("operation {index} out of bounds: position {position}, length {len}, buffer holds {buffer_len}")]
    OutOfBounds {
        index: usize,
        position: i128,
        len: usize,
        buffer_len: usize,
    },

    /// A delete removes text different from what it recorded.
    #[error("operation {index} deletes {expected:?} but the buffer holds {actual:?}")]
    DeleteMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;

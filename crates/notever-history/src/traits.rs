use notever_types::{NoteId, VersionNumber};

use crate::error::HistoryResult;
use crate::record::{ContentSnapshot, NoteContentVersion};

/// Storage boundary for note content history.
///
/// Snapshots and diff versions of one note share a single version-number
/// sequence. Implementations must satisfy:
/// - An append carries exactly `head + 1`, or [`notever_types::BASE_VERSION`]
///   for a note with no history; anything else is an integrity violation.
/// - The first record of a note is a snapshot.
/// - Records are never mutated once appended.
/// - Deleting a note removes all of its records.
pub trait VersionStore: Send + Sync {
    /// Highest version number stored for `note`, if any.
    fn head_version_number(&self, note: &NoteId) -> HistoryResult<Option<VersionNumber>>;

    fn append_snapshot(&self, snapshot: ContentSnapshot) -> HistoryResult<()>;

    fn append_version(&self, version: NoteContentVersion) -> HistoryResult<()>;

    /// All snapshots of `note`, ascending by version number.
    fn snapshots(&self, note: &NoteId) -> HistoryResult<Vec<ContentSnapshot>>;

    /// All diff versions of `note`, ascending by version number.
    fn versions(&self, note: &NoteId) -> HistoryResult<Vec<NoteContentVersion>>;

    /// Remove every record of `note`. Returns how many records were removed.
    fn delete_note(&self, note: &NoteId) -> HistoryResult<usize>;

    /// Notes that have at least one record.
    fn notes(&self) -> HistoryResult<Vec<NoteId>>;
}

//! Persisted history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notever_types::{NoteId, VersionId, VersionNumber};

/// A note version stored as a diff against the previous version.
///
/// Immutable once written; removed only together with its note.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteContentVersion {
    pub version_id: VersionId,
    pub note_id: NoteId,
    pub version_number: VersionNumber,
    /// Serialized edit script. Only the diff engine interprets it.
    pub diff_data: String,
    /// Length in chars of the text this version represents.
    pub content_length: usize,
    pub created_at: DateTime<Utc>,
}

impl NoteContentVersion {
    pub fn new(
        note_id: NoteId,
        version_number: VersionNumber,
        diff_data: String,
        content_length: usize,
    ) -> Self {
        Self {
            version_id: VersionId::new(),
            note_id,
            version_number,
            diff_data,
            content_length,
            created_at: Utc::now(),
        }
    }
}

/// A note version stored in full.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSnapshot {
    pub note_id: NoteId,
    pub version_number: VersionNumber,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ContentSnapshot {
    pub fn new(note_id: NoteId, version_number: VersionNumber, content: impl Into<String>) -> Self {
        Self {
            note_id,
            version_number,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn content_length(&self) -> usize {
        self.content.chars().count()
    }
}

/// How a version is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    Snapshot,
    Delta,
}

/// Listing entry for one version of a note.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSummary {
    pub version_number: VersionNumber,
    pub kind: StorageKind,
    pub content_length: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&NoteContentVersion> for VersionSummary {
    fn from(v: &NoteContentVersion) -> Self {
        Self {
            version_number: v.version_number,
            kind: StorageKind::Delta,
            content_length: v.content_length,
            created_at: v.created_at,
        }
    }
}

impl From<&ContentSnapshot> for VersionSummary {
    fn from(s: &ContentSnapshot) -> Self {
        Self {
            version_number: s.version_number,
            kind: StorageKind::Snapshot,
            content_length: s.content_length(),
            created_at: s.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_record_round_trips_through_json() {
        let version = NoteContentVersion::new(
            NoteId::new(),
            2,
            r#"[{"type":"INSERT","position":0,"text":"x"}]"#.into(),
            6,
        );
        let json = serde_json::to_string(&version).unwrap();
        let back: NoteContentVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, version);
    }

    #[test]
    fn summaries_carry_kind() {
        let note = NoteId::new();
        let snap = ContentSnapshot::new(note, 1, "héllo");
        let summary = VersionSummary::from(&snap);
        assert_eq!(summary.kind, StorageKind::Snapshot);
        assert_eq!(summary.content_length, 5);

        let delta = NoteContentVersion::new(note, 2, "[]".into(), 5);
        assert_eq!(VersionSummary::from(&delta).kind, StorageKind::Delta);
    }
}

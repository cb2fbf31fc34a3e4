use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use notever_types::{NoteId, VersionNumber, BASE_VERSION};

use crate::error::{HistoryError, HistoryResult};
use crate::record::{ContentSnapshot, NoteContentVersion};
use crate::traits::VersionStore;

/// In-memory history store for tests, local tools, and embedding.
pub struct InMemoryVersionStore {
    inner: RwLock<HashMap<NoteId, NoteStream>>,
}

#[derive(Default)]
struct NoteStream {
    snapshots: Vec<ContentSnapshot>,
    versions: Vec<NoteContentVersion>,
}

impl NoteStream {
    fn head(&self) -> Option<VersionNumber> {
        let snap = self.snapshots.last().map(|s| s.version_number);
        let delta = self.versions.last().map(|v| v.version_number);
        snap.max(delta)
    }

    fn len(&self) -> usize {
        self.snapshots.len() + self.versions.len()
    }
}

impl InMemoryVersionStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Total number of records across all notes.
    pub fn record_count(&self) -> HistoryResult<usize> {
        Ok(self.read_state()?.values().map(NoteStream::len).sum())
    }

    fn read_state(&self) -> HistoryResult<RwLockReadGuard<'_, HashMap<NoteId, NoteStream>>> {
        self.inner
            .read()
            .map_err(|_| HistoryError::Storage("history read lock poisoned".into()))
    }

    fn write_state(&self) -> HistoryResult<RwLockWriteGuard<'_, HashMap<NoteId, NoteStream>>> {
        self.inner
            .write()
            .map_err(|_| HistoryError::Storage("history write lock poisoned".into()))
    }

    fn check_next(
        stream: Option<&NoteStream>,
        note: &NoteId,
        version: VersionNumber,
    ) -> HistoryResult<()> {
        let expected = stream
            .and_then(NoteStream::head)
            .map_or(BASE_VERSION, |head| head + 1);
        if version != expected {
            return Err(HistoryError::IntegrityViolation {
                note: *note,
                version,
                reason: format!("append out of order; expected version {expected}"),
            });
        }
        Ok(())
    }
}

impl Default for InMemoryVersionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionStore for InMemoryVersionStore {
    fn head_version_number(&self, note: &NoteId) -> HistoryResult<Option<VersionNumber>> {
        let map = self.read_state()?;
        Ok(map.get(note).and_then(NoteStream::head))
    }

    fn append_snapshot(&self, snapshot: ContentSnapshot) -> HistoryResult<()> {
        let mut map = self.write_state()?;
        Self::check_next(map.get(&snapshot.note_id), &snapshot.note_id, snapshot.version_number)?;
        map.entry(snapshot.note_id).or_default().snapshots.push(snapshot);
        Ok(())
    }

    fn append_version(&self, version: NoteContentVersion) -> HistoryResult<()> {
        let mut map = self.write_state()?;
        let stream = map.get(&version.note_id);
        if stream.map_or(true, |s| s.snapshots.is_empty()) {
            return Err(HistoryError::MissingBaseSnapshot {
                note: version.note_id,
                version: version.version_number,
            });
        }
        Self::check_next(stream, &version.note_id, version.version_number)?;
        map.entry(version.note_id).or_default().versions.push(version);
        Ok(())
    }

    fn snapshots(&self, note: &NoteId) -> HistoryResult<Vec<ContentSnapshot>> {
        let map = self.read_state()?;
        Ok(map.get(note).map(|s| s.snapshots.clone()).unwrap_or_default())
    }

    fn versions(&self, note: &NoteId) -> HistoryResult<Vec<NoteContentVersion>> {
        let map = self.read_state()?;
        Ok(map.get(note).map(|s| s.versions.clone()).unwrap_or_default())
    }

    fn delete_note(&self, note: &NoteId) -> HistoryResult<usize> {
        let mut map = self.write_state()?;
        Ok(map.remove(note).map_or(0, |s| s.len()))
    }

    fn notes(&self) -> HistoryResult<Vec<NoteId>> {
        let map = self.read_state()?;
        let mut notes: Vec<NoteId> = map.keys().copied().collect();
        notes.sort();
        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(note: NoteId, version: VersionNumber) -> NoteContentVersion {
        NoteContentVersion::new(note, version, "[]".into(), 0)
    }

    #[test]
    fn empty_store() {
        let store = InMemoryVersionStore::new();
        let note = NoteId::new();
        assert_eq!(store.head_version_number(&note).unwrap(), None);
        assert!(store.snapshots(&note).unwrap().is_empty());
        assert!(store.versions(&note).unwrap().is_empty());
        assert!(store.notes().unwrap().is_empty());
    }

    #[test]
    fn head_tracks_both_record_kinds() {
        let store = InMemoryVersionStore::new();
        let note = NoteId::new();
        store.append_snapshot(ContentSnapshot::new(note, 1, "a")).unwrap();
        store.append_version(delta(note, 2)).unwrap();
        store.append_version(delta(note, 3)).unwrap();
        assert_eq!(store.head_version_number(&note).unwrap(), Some(3));
        store.append_snapshot(ContentSnapshot::new(note, 4, "b")).unwrap();
        assert_eq!(store.head_version_number(&note).unwrap(), Some(4));
        assert_eq!(store.record_count().unwrap(), 4);
    }

    #[test]
    fn first_record_must_be_base_version() {
        let store = InMemoryVersionStore::new();
        let note = NoteId::new();
        let err = store.append_snapshot(ContentSnapshot::new(note, 2, "a")).unwrap_err();
        assert!(matches!(err, HistoryError::IntegrityViolation { version: 2, .. }));
    }

    #[test]
    fn first_record_must_be_snapshot() {
        let store = InMemoryVersionStore::new();
        let note = NoteId::new();
        let err = store.append_version(delta(note, 1)).unwrap_err();
        assert!(matches!(err, HistoryError::MissingBaseSnapshot { .. }));
    }

    #[test]
    fn rejects_gaps_and_duplicates() {
        let store = InMemoryVersionStore::new();
        let note = NoteId::new();
        store.append_snapshot(ContentSnapshot::new(note, 1, "a")).unwrap();
        assert!(store.append_version(delta(note, 3)).is_err());
        assert!(store.append_version(delta(note, 1)).is_err());
        store.append_version(delta(note, 2)).unwrap();
    }

    #[test]
    fn delete_cascades_to_all_records() {
        let store = InMemoryVersionStore::new();
        let note = NoteId::new();
        let other = NoteId::new();
        store.append_snapshot(ContentSnapshot::new(note, 1, "a")).unwrap();
        store.append_version(delta(note, 2)).unwrap();
        store.append_snapshot(ContentSnapshot::new(other, 1, "b")).unwrap();

        assert_eq!(store.delete_note(&note).unwrap(), 2);
        assert_eq!(store.head_version_number(&note).unwrap(), None);
        assert_eq!(store.notes().unwrap(), vec![other]);
        assert_eq!(store.delete_note(&note).unwrap(), 0);
    }

    #[test]
    fn notes_are_independent_streams() {
        let store = InMemoryVersionStore::new();
        let a = NoteId::new();
        let b = NoteId::new();
        store.append_snapshot(ContentSnapshot::new(a, 1, "a")).unwrap();
        store.append_snapshot(ContentSnapshot::new(b, 1, "b")).unwrap();
        store.append_version(delta(a, 2)).unwrap();
        assert_eq!(store.head_version_number(&a).unwrap(), Some(2));
        assert_eq!(store.head_version_number(&b).unwrap(), Some(1));
    }

    #[test]
    fn poisoned_lock_is_a_storage_error() {
        let store = InMemoryVersionStore::new();
        let note = NoteId::new();
        store.append_snapshot(ContentSnapshot::new(note, 1, "a")).unwrap();

        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.inner.write().unwrap();
            panic!("writer died holding the lock");
        }));
        assert!(poisoned.is_err());

        assert!(matches!(store.head_version_number(&note), Err(HistoryError::Storage(_))));
        assert!(matches!(store.record_count(), Err(HistoryError::Storage(_))));
        assert!(matches!(
            store.append_version(delta(note, 2)),
            Err(HistoryError::Storage(_))
        ));
        assert!(matches!(store.delete_note(&note), Err(HistoryError::Storage(_))));
    }
}

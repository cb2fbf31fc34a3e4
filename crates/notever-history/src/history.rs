//! Save and load workflow over a [`VersionStore`].

use tracing::{debug, warn};

use notever_diff::{payload, DiffEngine};
use notever_types::{NoteId, VersionNumber, BASE_VERSION};

use crate::config::HistoryConfig;
use crate::error::{HistoryError, HistoryResult};
use crate::record::{ContentSnapshot, NoteContentVersion, VersionSummary};
use crate::traits::VersionStore;

/// What [`NoteHistory::save`] stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The text was stored in full.
    Snapshot { version: VersionNumber },
    /// The text was stored as a diff against the previous version.
    Delta { version: VersionNumber },
    /// The text equals the latest version; nothing was stored.
    Unchanged { version: VersionNumber },
}

impl SaveOutcome {
    pub fn version(&self) -> VersionNumber {
        match self {
            Self::Snapshot { version } | Self::Delta { version } | Self::Unchanged { version } => {
                *version
            }
        }
    }
}

/// Result of rebuilding a version from its base snapshot and diffs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconstruction {
    pub text: String,
    /// The version that was asked for.
    pub requested: VersionNumber,
    /// The last version whose diff applied cleanly. Lower than `requested`
    /// when a stored diff is corrupt; `text` is then that version's text.
    pub reached: VersionNumber,
}

impl Reconstruction {
    pub fn is_complete(&self) -> bool {
        self.reached == self.requested
    }
}

/// Versioned note content.
///
/// Long texts are stored as diffs against the previous version; short
/// texts, the first version, and every `snapshot_interval`-th version are
/// stored in full. Concurrent saves to the same note are not serialized
/// here: the store rejects the losing append with an integrity violation.
pub struct NoteHistory<S> {
    store: S,
    engine: DiffEngine,
    config: HistoryConfig,
}

impl<S: VersionStore> NoteHistory<S> {
    pub fn new(store: S, config: HistoryConfig) -> Self {
        Self {
            store,
            engine: DiffEngine::new(config.engine.clone()),
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Record `text` as the newest version of `note`.
    pub fn save(&self, note: &NoteId, text: &str) -> HistoryResult<SaveOutcome> {
        let Some(head) = self.store.head_version_number(note)? else {
            return self.save_snapshot(note, BASE_VERSION, text);
        };

        let current = self.rebuild(note, head)?;
        if current.is_complete() && current.text == text {
            return Ok(SaveOutcome::Unchanged { version: head });
        }

        let next = head + 1;
        if !current.is_complete() {
            warn!(note = %note, head, reached = current.reached, "history chain is broken; storing snapshot");
            return self.save_snapshot(note, next, text);
        }
        if !self.engine.should_use_diff_storage(text) {
            return self.save_snapshot(note, next, text);
        }
        if let Some(interval) = self.config.snapshot_interval {
            if self.deltas_since_snapshot(note, head)? >= interval {
                debug!(note = %note, interval, "snapshot interval reached");
                return self.save_snapshot(note, next, text);
            }
        }

        let diff_data = match self
            .engine
            .try_generate(&current.text, text)
            .and_then(|script| payload::encode(&script))
        {
            Ok(diff_data) => diff_data,
            Err(e) => {
                warn!(note = %note, error = %e, "diff generation failed; storing snapshot");
                return self.save_snapshot(note, next, text);
            }
        };

        let version = NoteContentVersion::new(*note, next, diff_data, text.chars().count());
        self.store.append_version(version)?;
        debug!(note = %note, version = next, "stored diff version");
        Ok(SaveOutcome::Delta { version: next })
    }

    /// Text of the newest version of `note`.
    pub fn load_latest(&self, note: &NoteId) -> HistoryResult<String> {
        let head = self
            .store
            .head_version_number(note)?
            .ok_or(HistoryError::NoteNotFound(*note))?;
        self.load_version(note, head)
    }

    /// Text of version `version` of `note`.
    ///
    /// If a stored diff is corrupt the text of the last version before it
    /// is returned; use [`NoteHistory::rebuild`] to detect that.
    pub fn load_version(&self, note: &NoteId, version: VersionNumber) -> HistoryResult<String> {
        Ok(self.rebuild(note, version)?.text)
    }

    /// Rebuild version `version` from the newest snapshot at or below it.
    pub fn rebuild(&self, note: &NoteId, version: VersionNumber) -> HistoryResult<Reconstruction> {
        let head = self
            .store
            .head_version_number(note)?
            .ok_or(HistoryError::NoteNotFound(*note))?;
        if version < BASE_VERSION || version > head {
            return Err(HistoryError::VersionNotFound {
                note: *note,
                version,
            });
        }

        let base = self
            .store
            .snapshots(note)?
            .into_iter()
            .rev()
            .find(|s| s.version_number <= version)
            .ok_or(HistoryError::MissingBaseSnapshot {
                note: *note,
                version,
            })?;

        let base_version = base.version_number;
        let mut text = base.content;
        let mut reached = base_version;
        let deltas = self
            .store
            .versions(note)?
            .into_iter()
            .filter(|v| v.version_number > base_version && v.version_number <= version);

        for delta in deltas {
            if delta.version_number != reached + 1 {
                warn!(note = %note, expected = reached + 1, found = delta.version_number, "gap in diff chain");
                break;
            }
            match self.engine.try_apply(&text, &delta.diff_data) {
                Ok(next) if next.chars().count() == delta.content_length => {
                    text = next;
                    reached = delta.version_number;
                }
                Ok(next) => {
                    warn!(
                        note = %note,
                        version = delta.version_number,
                        expected = delta.content_length,
                        actual = next.chars().count(),
                        "diff result length mismatch; keeping last good text"
                    );
                    break;
                }
                Err(e) => {
                    warn!(note = %note, version = delta.version_number, error = %e, "diff failed to apply; keeping last good text");
                    break;
                }
            }
        }

        Ok(Reconstruction {
            text,
            requested: version,
            reached,
        })
    }

    /// All versions of `note`, ascending.
    pub fn versions(&self, note: &NoteId) -> HistoryResult<Vec<VersionSummary>> {
        let mut summaries: Vec<VersionSummary> = self
            .store
            .snapshots(note)?
            .iter()
            .map(VersionSummary::from)
            .chain(self.store.versions(note)?.iter().map(VersionSummary::from))
            .collect();
        if summaries.is_empty() {
            return Err(HistoryError::NoteNotFound(*note));
        }
        summaries.sort_by_key(|s| s.version_number);
        Ok(summaries)
    }

    /// Delete every version of `note`. Returns how many records were removed.
    pub fn delete_note(&self, note: &NoteId) -> HistoryResult<usize> {
        let removed = self.store.delete_note(note)?;
        if removed == 0 {
            return Err(HistoryError::NoteNotFound(*note));
        }
        debug!(note = %note, removed, "deleted note history");
        Ok(removed)
    }

    fn save_snapshot(
        &self,
        note: &NoteId,
        version: VersionNumber,
        text: &str,
    ) -> HistoryResult<SaveOutcome> {
        self.store
            .append_snapshot(ContentSnapshot::new(*note, version, text))?;
        debug!(note = %note, version, "stored snapshot");
        Ok(SaveOutcome::Snapshot { version })
    }

    fn deltas_since_snapshot(&self, note: &NoteId, head: VersionNumber) -> HistoryResult<usize> {
        let last_snapshot = self
            .store
            .snapshots(note)?
            .last()
            .map_or(0, |s| s.version_number);
        Ok((head - last_snapshot) as usize)
    }
}

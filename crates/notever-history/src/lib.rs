//! Note content history for notever.
//!
//! Stores each saved version of a note either as a full
//! [`ContentSnapshot`] or, for long notes, as a [`NoteContentVersion`]
//! holding a diff against the previous version, and rebuilds any version
//! on demand.
//!
//! # Design Rules
//!
//! 1. Version numbers are per note, start at [`notever_types::BASE_VERSION`],
//!    and increase by one with every stored record of either kind.
//! 2. The first record of a note is always a snapshot.
//! 3. Records are immutable; deleting a note deletes all of its records.
//! 4. Reading never fails because of a corrupt diff: the text of the last
//!    version that rebuilt cleanly is returned instead.

pub mod config;
pub mod error;
pub mod history;
pub mod memory;
pub mod record;
pub mod traits;

pub use config::{HistoryConfig, DEFAULT_MAX_EDIT_DISTANCE};
pub use error::{HistoryError, HistoryResult};
pub use history::{NoteHistory, Reconstruction, SaveOutcome};
pub use memory::InMemoryVersionStore;
pub use record::{ContentSnapshot, NoteContentVersion, StorageKind, VersionSummary};
pub use traits::VersionStore;

#[cfg(test)]
mod tests {
    use super::*;
    use notever_types::{NoteId, VersionNumber};
    use proptest::prelude::*;

    fn diff_everything() -> HistoryConfig {
        let mut config = HistoryConfig::default();
        config.engine.diff_threshold = 0;
        config.snapshot_interval = Some(4);
        config
    }

    proptest! {
        #[test]
        fn any_edit_sequence_reloads(texts in prop::collection::vec("[ab\n ]{1,30}", 1..12)) {
            let history = NoteHistory::new(InMemoryVersionStore::new(), diff_everything());
            let note = NoteId::new();
            let mut saved: Vec<(VersionNumber, String)> = Vec::new();
            for text in &texts {
                match history.save(&note, text).unwrap() {
                    SaveOutcome::Unchanged { .. } => {}
                    outcome => saved.push((outcome.version(), text.clone())),
                }
            }
            for (version, text) in &saved {
                prop_assert_eq!(&history.load_version(&note, *version).unwrap(), text);
            }
            let listed: Vec<VersionNumber> =
                history.versions(&note).unwrap().iter().map(|s| s.version_number).collect();
            let expected: Vec<VersionNumber> = (1..=saved.len() as VersionNumber).collect();
            prop_assert_eq!(listed, expected);
        }
    }

    #[test]
    fn histories_of_different_notes_do_not_mix() {
        let history = NoteHistory::new(InMemoryVersionStore::new(), diff_everything());
        let a = NoteId::new();
        let b = NoteId::new();
        history.save(&a, "alpha").unwrap();
        history.save(&b, "beta").unwrap();
        history.save(&a, "alpha two").unwrap();
        assert_eq!(history.load_latest(&a).unwrap(), "alpha two");
        assert_eq!(history.load_latest(&b).unwrap(), "beta");
        assert_eq!(history.store().notes().unwrap().len(), 2);
    }
}

use serde::{Deserialize, Serialize};

use notever_diff::EngineConfig;

/// Default cap on the edit distance of a stored diff.
///
/// The search trace grows with the square of the distance; at this cap it
/// stays near 16 MiB. A save that needs more edits is stored as a snapshot.
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2048;

/// Configuration for [`crate::NoteHistory`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Diff engine settings, including the diff-storage threshold.
    pub engine: EngineConfig,
    /// Store a full snapshot after this many consecutive diff versions,
    /// bounding the number of diffs a load has to apply. `None` never
    /// forces a snapshot.
    pub snapshot_interval: Option<usize>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig {
                max_edit_distance: Some(DEFAULT_MAX_EDIT_DISTANCE),
                ..EngineConfig::default()
            },
            snapshot_interval: Some(32),
        }
    }
}

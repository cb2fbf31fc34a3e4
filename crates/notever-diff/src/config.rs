use serde::{Deserialize, Serialize};

/// Notes longer than this many chars are stored as diffs.
pub const DIFF_STORAGE_THRESHOLD: usize = 5000;

/// Configuration for the diff engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Texts strictly longer than this (in chars) use diff storage.
    pub diff_threshold: usize,
    /// Give up once the edit distance would exceed this many chars.
    /// `None` searches until the end of the edit graph.
    pub max_edit_distance: Option<usize>,
    /// Check that every delete removes exactly the text it recorded.
    pub verify_deletes: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            diff_threshold: DIFF_STORAGE_THRESHOLD,
            max_edit_distance: None,
            verify_deletes: false,
        }
    }
}

impl EngineConfig {
    /// A configuration that rejects payloads whose deletes do not match
    /// the base text they are applied to.
    pub fn strict() -> Self {
        Self {
            verify_deletes: true,
            ..Default::default()
        }
    }
}

//! The diff engine: storage decision, diff generation, and diff application.
//!
//! [`DiffEngine`] holds only its [`EngineConfig`] and is safe to share
//! between threads. The `generate_diff` / `apply_diff` entry points never
//! fail: a generation failure yields [`EMPTY_PAYLOAD`] and an application
//! failure yields the base text unchanged, both logged at `warn`. Callers
//! that need to tell failure apart use the `try_*` variants.

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::edit::EditScript;
use crate::error::DiffResult;
use crate::myers::shortest_edit_script;
use crate::patch::apply_script;
use crate::payload::{self, EMPTY_PAYLOAD};

/// Stateless text diff engine.
#[derive(Clone, Debug, Default)]
pub struct DiffEngine {
    config: EngineConfig,
}

impl DiffEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether `text` is long enough to be stored as a diff rather than a
    /// full snapshot.
    ///
    /// Length is counted in Unicode scalar values (`char`), not bytes or
    /// UTF-16 code units, and must strictly exceed `diff_threshold`.
    pub fn should_use_diff_storage(&self, text: &str) -> bool {
        text.chars().count() > self.config.diff_threshold
    }

    /// Compute the edit script turning `old` into `new`.
    pub fn try_generate(&self, old: &str, new: &str) -> DiffResult<EditScript> {
        let script = shortest_edit_script(old, new, self.config.max_edit_distance)?;
        debug!(
            ops = script.len(),
            inserted = script.inserted_chars(),
            deleted = script.deleted_chars(),
            "generated edit script"
        );
        Ok(script)
    }

    /// Compute the serialized diff turning `old` into `new`.
    ///
    /// Returns [`EMPTY_PAYLOAD`] if generation fails.
    pub fn generate_diff(&self, old: &str, new: &str) -> String {
        match self
            .try_generate(old, new)
            .and_then(|script| payload::encode(&script))
        {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "diff generation failed; returning empty payload");
                EMPTY_PAYLOAD.to_string()
            }
        }
    }

    /// Apply an already decoded script to `base`.
    pub fn apply_script(&self, base: &str, script: &EditScript) -> DiffResult<String> {
        apply_script(base, script, self.config.verify_deletes)
    }

    /// Decode `diff_payload` and apply it to `base`.
    pub fn try_apply(&self, base: &str, diff_payload: &str) -> DiffResult<String> {
        let script = payload::decode(diff_payload)?;
        self.apply_script(base, &script)
    }

    /// Reconstruct a text from `base` and a stored payload.
    ///
    /// Returns `base` unchanged if the payload is malformed or does not fit
    /// the base text.
    pub fn apply_diff(&self, base: &str, diff_payload: &str) -> String {
        match self.try_apply(base, diff_payload) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "diff application failed; keeping base text");
                base.to_string()
            }
        }
    }
}

/// [`DiffEngine::should_use_diff_storage`] with the default configuration:
/// true above [`crate::DIFF_STORAGE_THRESHOLD`] chars.
pub fn should_use_diff_storage(text: &str) -> bool {
    DiffEngine::default().should_use_diff_storage(text)
}

/// [`DiffEngine::generate_diff`] with the default configuration.
pub fn generate_diff(old: &str, new: &str) -> String {
    DiffEngine::default().generate_diff(old, new)
}

/// [`DiffEngine::apply_diff`] with the default configuration.
pub fn apply_diff(base: &str, diff_payload: &str) -> String {
    DiffEngine::default().apply_diff(base, diff_payload)
}

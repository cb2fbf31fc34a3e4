//! Diff engine for notever.
//!
//! Long note bodies are stored as incremental edit scripts instead of full
//! snapshots. This crate computes the shortest edit script between two
//! texts (Myers' O((N+M)D) algorithm), serializes it to a compact JSON
//! payload, and reconstructs a text by applying a payload to its base.
//!
//! The engine owns no persistent state; version numbering and storage
//! belong to the caller.
//!
//! # Key Types
//!
//! - [`DiffEngine`] / [`EngineConfig`] -- the engine and its tunables
//! - [`EditScript`] / [`Diff`] / [`DiffKind`] -- an edit script and its operations
//!
//! # Quick Start
//!
//! ```rust
//! use notever_diff::{apply_diff, generate_diff, should_use_diff_storage};
//!
//! let old = "The quick brown fox";
//! let new = "The slow brown fox jumps";
//! let payload = generate_diff(old, new);
//! assert_eq!(apply_diff(old, &payload), new);
//! assert!(!should_use_diff_storage(new));
//! ```

pub mod config;
pub mod edit;
pub mod engine;
pub mod error;
pub mod myers;
pub mod patch;
pub mod payload;

pub use config::{EngineConfig, DIFF_STORAGE_THRESHOLD};
pub use edit::{Diff, DiffKind, EditScript};
pub use engine::{apply_diff, generate_diff, should_use_diff_storage, DiffEngine};
pub use error::{DiffError, DiffResult};
pub use payload::EMPTY_PAYLOAD;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use similar::{Algorithm, DiffTag, TextDiff};

    /// Edit distance found by an independent Myers implementation.
    fn oracle_distance(old: &str, new: &str) -> usize {
        let diff = TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_chars(old, new);
        diff.ops()
            .iter()
            .map(|op| op.as_tag_tuple())
            .filter(|(tag, _, _)| *tag != DiffTag::Equal)
            .map(|(_, old_range, new_range)| old_range.len() + new_range.len())
            .sum()
    }

    fn engine_script(old: &str, new: &str) -> EditScript {
        DiffEngine::default().try_generate(old, new).unwrap()
    }

    // -----------------------------------------------------------------------
    // Fixed cases
    // -----------------------------------------------------------------------

    #[test]
    fn paragraph_edit_round_trips() {
        let old = "Shopping list\n- milk\n- eggs\n- bread\n\nCall the plumber on Monday.";
        let new = "Shopping list\n- oat milk\n- eggs\n\nCall the plumber on Tuesday.\nPay rent.";
        assert_eq!(apply_diff(old, &generate_diff(old, new)), new);
    }

    #[test]
    fn long_note_small_edit_produces_small_payload() {
        let body = "Lorem ipsum dolor sit amet. ".repeat(300);
        assert!(should_use_diff_storage(&body));
        let edited = body.replacen("dolor", "DOLOR", 1);

        let payload = generate_diff(&body, &edited);
        assert!(payload.len() < 200, "payload was {} bytes", payload.len());
        assert_eq!(apply_diff(&body, &payload), edited);
    }

    #[test]
    fn scripts_are_ordered_left_to_right() {
        let script = engine_script("one two three four", "one 2 three 4 five");
        let positions: Vec<usize> = script.iter().map(|op| op.position).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn round_trip_small_alphabet(a in "[abc\n]{0,40}", b in "[abc\n]{0,40}") {
            prop_assert_eq!(apply_diff(&a, &generate_diff(&a, &b)), b);
        }

        #[test]
        fn round_trip_any_text(a in "\\PC{0,30}", b in "\\PC{0,30}") {
            prop_assert_eq!(apply_diff(&a, &generate_diff(&a, &b)), b);
        }

        #[test]
        fn strict_apply_accepts_generated_scripts(a in "[ab ]{0,30}", b in "[ab ]{0,30}") {
            let strict = DiffEngine::new(EngineConfig::strict());
            let payload = strict.generate_diff(&a, &b);
            prop_assert_eq!(strict.try_apply(&a, &payload).unwrap(), b);
        }

        #[test]
        fn self_diff_is_empty(a in "\\PC{0,50}") {
            prop_assert!(engine_script(&a, &a).is_empty());
        }

        #[test]
        fn distance_is_minimal(a in "[abcd]{0,25}", b in "[abcd]{0,25}") {
            let script = engine_script(&a, &b);
            prop_assert!(script.edit_distance() <= oracle_distance(&a, &b));
        }

        #[test]
        fn no_empty_operations(a in "[xy]{0,20}", b in "[xy]{0,20}") {
            let script = engine_script(&a, &b);
            prop_assert!(script.iter().all(|op| !op.text.is_empty()));
        }
    }
}

//! Foundation types for notever.
//!
//! Identifiers shared by the diff engine's callers and the version history
//! layer. Every other notever crate that stores or addresses note content
//! depends on `notever-types`.
//!
//! # Key Types
//!
//! - [`NoteId`] -- Identity of the note that owns a version chain
//! - [`VersionId`] -- Surrogate key of a single stored version (UUID v7)
//! - [`VersionNumber`] -- Per-note, strictly increasing version counter

pub mod ids;

pub use ids::{NoteId, VersionId, VersionNumber, BASE_VERSION};

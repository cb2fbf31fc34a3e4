//! Edit operations and edit scripts.
//!
//! An [`EditScript`] is the ordered list of [`Diff`] operations that turns
//! one text into another. Positions and lengths count Unicode scalar values
//! (`char`), never bytes.

use serde::{Deserialize, Serialize};

/// Kind of a single edit operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiffKind {
    /// Text present only in the new version.
    Insert,
    /// Text present only in the old version.
    Delete,
}

/// A single edit operation.
///
/// `position` is measured in the original text. While a script is applied,
/// a running offset (inserted minus deleted chars so far) maps it onto the
/// working buffer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff {
    #[serde(rename = "type")]
    pub kind: DiffKind,
    pub position: usize,
    pub text: String,
}

impl Diff {
    pub fn insert(position: usize, text: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Insert,
            position,
            text: text.into(),
        }
    }

    pub fn delete(position: usize, text: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Delete,
            position,
            text: text.into(),
        }
    }

    /// Length of `text` in chars.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// An ordered sequence of edit operations, in application order.
///
/// Serializes as a bare JSON array of operations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditScript {
    ops: Vec<Diff>,
}

impl EditScript {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ops(ops: Vec<Diff>) -> Self {
        Self { ops }
    }

    /// Returns `true` if the script holds no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns `true` if applying the script changes nothing. Unlike
    /// [`EditScript::is_empty`] this also holds for operations whose text
    /// is empty.
    pub fn is_noop(&self) -> bool {
        self.ops.iter().all(|op| op.text.is_empty())
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn ops(&self) -> &[Diff] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<Diff> {
        self.ops
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diff> {
        self.ops.iter()
    }

    /// Total chars inserted across all operations.
    pub fn inserted_chars(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| op.kind == DiffKind::Insert)
            .map(Diff::char_len)
            .sum()
    }

    /// Total chars deleted across all operations.
    pub fn deleted_chars(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| op.kind == DiffKind::Delete)
            .map(Diff::char_len)
            .sum()
    }

    /// Number of single-char inserts and deletes (the Myers distance `D`).
    pub fn edit_distance(&self) -> usize {
        self.inserted_chars() + self.deleted_chars()
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a Diff;
    type IntoIter = std::slice::Iter<'a, Diff>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

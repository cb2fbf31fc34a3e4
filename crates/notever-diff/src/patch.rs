//! Applying an edit script to a base text.

use crate::edit::{DiffKind, EditScript};
use crate::error::{DiffError, DiffResult};

/// Apply `script` to `base`, in order, with running offset correction.
///
/// Each operation lands at `position + offset`, where `offset` is the number
/// of chars inserted minus the number deleted by earlier operations. With
/// `verify_deletes`, a delete must remove exactly the text it recorded.
pub fn apply_script(base: &str, script: &EditScript, verify_deletes: bool) -> DiffResult<String> {
    let mut buf: Vec<char> = base.chars().collect();
    let mut offset: i128 = 0;

    for (index, op) in script.iter().enumerate() {
        let len = op.char_len();
        let at = op.position as i128 + offset;
        let out_of_bounds = |buffer_len: usize| DiffError::OutOfBounds {
            index,
            position: at,
            len,
            buffer_len,
        };
        if at < 0 || at > buf.len() as i128 {
            return Err(out_of_bounds(buf.len()));
        }
        let at = at as usize;

        match op.kind {
            DiffKind::Insert => {
                buf.splice(at..at, op.text.chars());
                offset += len as i128;
            }
            DiffKind::Delete => {
                let end = at + len;
                if end > buf.len() {
                    return Err(out_of_bounds(buf.len()));
                }
                if verify_deletes && !buf[at..end].iter().copied().eq(op.text.chars()) {
                    return Err(DiffError::DeleteMismatch {
                        index,
                        expected: op.text.clone(),
                        actual: buf[at..end].iter().collect(),
                    });
                }
                buf.drain(at..end);
                offset -= len as i128;
            }
        }
    }

    Ok(buf.into_iter().collect())
}

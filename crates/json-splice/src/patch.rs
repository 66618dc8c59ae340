//! Edit descriptors and their application.

use serde::Serialize;

use crate::error::PatchBoundsError;

/// A single splice against the original text: remove `length` bytes at
/// `offset` and put `content` in their place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditDescriptor {
    pub offset: usize,
    pub length: usize,
    pub content: String,
}

impl EditDescriptor {
    pub fn replace(offset: usize, length: usize, content: impl Into<String>) -> Self {
        Self {
            offset,
            length,
            content: content.into(),
        }
    }

    pub fn insert(offset: usize, content: impl Into<String>) -> Self {
        Self::replace(offset, 0, content)
    }

    pub fn delete(offset: usize, length: usize) -> Self {
        Self::replace(offset, length, String::new())
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Applies `edits` to `text`.
///
/// All offsets refer to the original text. Edits are validated up front and
/// applied from the highest offset down, so earlier spans never move. The
/// result does not depend on the order of `edits`; inserts sharing an offset
/// are ordered by content.
///
/// # Errors
///
/// Any span past the end of `text`, splitting a UTF-8 character, or
/// overlapping another span rejects the whole set.
///
/// ```
/// use json_splice::patch::{apply_edits, EditDescriptor};
///
/// let text = r#"{"a":1,"b":2}"#;
/// let edits = [
///     EditDescriptor::replace(5, 1, "10"),
///     EditDescriptor::replace(11, 1, "20"),
/// ];
/// assert_eq!(apply_edits(text, &edits).unwrap(), r#"{"a":10,"b":20}"#);
/// ```
pub fn apply_edits(text: &str, edits: &[EditDescriptor]) -> Result<String, PatchBoundsError> {
    let mut sorted: Vec<&EditDescriptor> = edits.iter().collect();
    sorted.sort_by(|a, b| {
        b.offset
            .cmp(&a.offset)
            .then(b.length.cmp(&a.length))
            .then(b.content.cmp(&a.content))
    });

    for edit in &sorted {
        let end = edit
            .offset
            .checked_add(edit.length)
            .filter(|&end| end <= text.len())
            .ok_or(PatchBoundsError::OutOfBounds {
                offset: edit.offset,
                length: edit.length,
                text_len: text.len(),
            })?;
        if !text.is_char_boundary(edit.offset) || !text.is_char_boundary(end) {
            return Err(PatchBoundsError::CharBoundary {
                offset: edit.offset,
                length: edit.length,
            });
        }
    }
    for pair in sorted.windows(2) {
        let (later, earlier) = (pair[0], pair[1]);
        if earlier.end() > later.offset {
            return Err(PatchBoundsError::Overlap {
                offset: earlier.offset,
                next_offset: later.offset,
            });
        }
    }

    let mut result = text.to_string();
    for edit in sorted {
        result.replace_range(edit.offset..edit.end(), &edit.content);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_edit_set() {
        assert_eq!(apply_edits("abc", &[]).unwrap(), "abc");
    }

    #[test]
    fn test_order_independent() {
        let text = "0123456789";
        let a = EditDescriptor::replace(1, 2, "AB");
        let b = EditDescriptor::insert(5, "++");
        let c = EditDescriptor::delete(8, 2);
        let forward = apply_edits(text, &[a.clone(), b.clone(), c.clone()]).unwrap();
        let backward = apply_edits(text, &[c, b, a]).unwrap();
        assert_eq!(forward, "0AB34++567");
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_same_offset_inserts_are_deterministic() {
        let x = EditDescriptor::insert(1, "x");
        let y = EditDescriptor::insert(1, "y");
        let one = apply_edits("ab", &[x.clone(), y.clone()]).unwrap();
        let two = apply_edits("ab", &[y, x]).unwrap();
        assert_eq!(one, two);
        assert_eq!(one, "axyb");
    }

    #[test]
    fn test_insert_before_replacement_at_same_offset() {
        let edits = [
            EditDescriptor::insert(1, "<"),
            EditDescriptor::replace(1, 1, "B"),
        ];
        assert_eq!(apply_edits("abc", &edits).unwrap(), "a<Bc");
    }

    #[test]
    fn test_out_of_bounds() {
        let err = apply_edits("abc", &[EditDescriptor::replace(2, 5, "")]).unwrap_err();
        assert_eq!(
            err,
            PatchBoundsError::OutOfBounds {
                offset: 2,
                length: 5,
                text_len: 3
            }
        );
        let err = apply_edits("abc", &[EditDescriptor::replace(usize::MAX, 1, "")]).unwrap_err();
        assert!(matches!(err, PatchBoundsError::OutOfBounds { .. }));
    }

    #[test]
    fn test_append_at_end_is_in_bounds() {
        assert_eq!(apply_edits("ab", &[EditDescriptor::insert(2, "c")]).unwrap(), "abc");
    }

    #[test]
    fn test_char_boundary() {
        let err = apply_edits("é", &[EditDescriptor::insert(1, "x")]).unwrap_err();
        assert!(matches!(err, PatchBoundsError::CharBoundary { .. }));
    }

    #[test]
    fn test_overlap_rejected() {
        let edits = [
            EditDescriptor::replace(0, 3, "x"),
            EditDescriptor::replace(2, 2, "y"),
        ];
        let err = apply_edits("abcdef", &edits).unwrap_err();
        assert_eq!(
            err,
            PatchBoundsError::Overlap {
                offset: 0,
                next_offset: 2
            }
        );
    }
}

//! Error types for text edits.
//!
//! None of these cross [`crate::apply_edit`]; they surface only through
//! [`crate::apply_edit_with`] in strict mode and the lower-level APIs.

use thiserror::Error;

/// Any failure of a single edit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    PatchBounds(#[from] PatchBoundsError),
}

/// The path cannot be resolved against the document structure.
///
/// Paths are carried in their display form (`$["a"][0]`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("cannot address into {found} at {path}")]
    NotAContainer { path: String, found: &'static str },
    #[error("parent {path} does not exist")]
    MissingParent { path: String },
    #[error("index {index} out of bounds (len: {len}) at {path}")]
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },
    #[error("key {key:?} cannot address an array at {path}")]
    KeyOnArray { path: String, key: String },
    #[error("the document root cannot be removed")]
    RootRemoval,
}

/// The document text is not valid JSON.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid JSON at byte {offset}: expected {expected}")]
pub struct SyntaxError {
    pub offset: usize,
    pub expected: &'static str,
}

/// An edit descriptor does not fit the text it is applied to.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchBoundsError {
    #[error("span {offset}+{length} exceeds text length {text_len}")]
    OutOfBounds {
        offset: usize,
        length: usize,
        text_len: usize,
    },
    #[error("span {offset}+{length} splits a UTF-8 character")]
    CharBoundary { offset: usize, length: usize },
    #[error("span at {offset} overlaps the span at {next_offset}")]
    Overlap { offset: usize, next_offset: usize },
}

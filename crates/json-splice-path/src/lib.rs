//! Structural paths into JSON documents.
//!
//! A [`Path`] is a sequence of [`PathSegment`]s, each an object key or an array
//! index. Paths render as `$["customer"][0]["name"]` for display and convert to
//! and from [JSON Pointer (RFC 6901)](https://tools.ietf.org/html/rfc6901)
//! strings.
//!
//! # Example
//!
//! ```
//! use json_splice_path::{Path, PathSegment};
//!
//! let path = Path::from_pointer("/customer/0/name").unwrap();
//! assert_eq!(path.to_pointer(), "/customer/0/name");
//!
//! // Pointer components are always keys; resolvers decide whether "0"
//! // addresses an array element.
//! assert_eq!(path[1], PathSegment::key("0"));
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Path, PathSegment};

pub mod validate;
pub use validate::{validate_json_pointer, validate_path};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("POINTER_INVALID")]
    PointerInvalid,
    #[error("POINTER_TOO_LONG")]
    PointerTooLong,
    #[error("Path too long")]
    PathTooLong,
}

/// Unescapes a JSON Pointer component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// ```
/// use json_splice_path::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, otherwise "~01" would decode to "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer component.
///
/// ```
/// use json_splice_path::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Check if a string is a canonical non-negative array index (no sign, no
/// leading zeros).
///
/// ```
/// use json_splice_path::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index(""));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

impl Path {
    /// Parse a JSON Pointer. The empty pointer is the root; every component
    /// becomes a key segment.
    ///
    /// # Errors
    ///
    /// Fails when the pointer does not start with `/` or is too long.
    pub fn from_pointer(pointer: &str) -> Result<Path, PathError> {
        validate_json_pointer(pointer)?;
        if pointer.is_empty() {
            return Ok(Path::root());
        }
        let path: Path = pointer[1..]
            .split('/')
            .map(|c| PathSegment::Key(unescape_component(c)))
            .collect();
        validate_path(&path)?;
        Ok(path)
    }

    /// Format as a JSON Pointer. Returns an empty string for the root.
    ///
    /// ```
    /// use json_splice_path::Path;
    ///
    /// assert_eq!(Path::root().to_pointer(), "");
    /// assert_eq!(Path::root().key("a/b").index(2).to_pointer(), "/a~1b/2");
    /// ```
    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for segment in self {
            out.push('/');
            match segment {
                PathSegment::Key(k) => out.push_str(&escape_component(k)),
                PathSegment::Index(i) => out.push_str(&i.to_string()),
            }
        }
        out
    }
}

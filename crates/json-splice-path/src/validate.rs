//! Validation for pointers and paths.

use crate::{Path, PathError};

/// Maximum allowed pointer string length.
pub const MAX_POINTER_LENGTH: usize = 1024;

/// Maximum allowed path depth.
pub const MAX_PATH_LENGTH: usize = 256;

/// Validate a JSON Pointer string.
///
/// # Errors
///
/// Returns an error if:
/// - The pointer is non-empty but doesn't start with `/`
/// - The pointer exceeds [`MAX_POINTER_LENGTH`] bytes
///
/// # Example
///
/// ```
/// use json_splice_path::validate_json_pointer;
///
/// validate_json_pointer("").unwrap();
/// validate_json_pointer("/foo/bar").unwrap();
/// validate_json_pointer("foo").unwrap_err();
/// ```
pub fn validate_json_pointer(pointer: &str) -> Result<(), PathError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(PathError::PointerInvalid);
    }
    if pointer.len() > MAX_POINTER_LENGTH {
        return Err(PathError::PointerTooLong);
    }
    Ok(())
}

/// Validate a path's depth.
///
/// ```
/// use json_splice_path::{validate_path, Path, PathSegment};
///
/// validate_path(&Path::root().key("a").index(0)).unwrap();
/// let deep: Path = (0..300).map(PathSegment::Index).collect();
/// validate_path(&deep).unwrap_err();
/// ```
pub fn validate_path(path: &Path) -> Result<(), PathError> {
    if path.len() > MAX_PATH_LENGTH {
        return Err(PathError::PathTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathSegment;

    #[test]
    fn test_validate_empty_pointer() {
        assert!(validate_json_pointer("").is_ok());
    }

    #[test]
    fn test_validate_absolute_pointer() {
        assert!(validate_json_pointer("/").is_ok());
        assert!(validate_json_pointer("/foo/0").is_ok());
    }

    #[test]
    fn test_validate_relative_pointer() {
        assert_eq!(validate_json_pointer("foo"), Err(PathError::PointerInvalid));
    }

    #[test]
    fn test_validate_long_pointer() {
        let long_pointer = "/".to_string() + &"a".repeat(2000);
        assert_eq!(
            validate_json_pointer(&long_pointer),
            Err(PathError::PointerTooLong)
        );
    }

    #[test]
    fn test_validate_max_length_path() {
        let path: Path = (0..MAX_PATH_LENGTH).map(PathSegment::Index).collect();
        assert!(validate_path(&path).is_ok());
        let path: Path = (0..=MAX_PATH_LENGTH).map(PathSegment::Index).collect();
        assert_eq!(validate_path(&path), Err(PathError::PathTooLong));
    }
}

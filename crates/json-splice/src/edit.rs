//! Edit entry points.

use json_splice_path::Path;
use serde_json::Value;

use crate::coerce::{coerce_value, serialize_root};
use crate::error::EditError;
use crate::format::line_ending;
use crate::options::EditOptions;
use crate::patch::apply_edits;
use crate::resolve::{resolve, resolve_removal, Resolution};

/// Writes `raw` at `path` in `text`.
///
/// `raw` is coerced first: valid JSON is inserted structurally, anything else
/// as a string. An empty path replaces the whole document. Any failure yields
/// `text` unchanged.
///
/// ```
/// use json_splice::{apply_edit, path};
///
/// assert_eq!(apply_edit(r#"{"a":1}"#, &path!["a"], "hello"), r#"{"a":"hello"}"#);
/// assert_eq!(apply_edit(r#"{"a":1}"#, &path!["a", "b"], "2"), r#"{"a":1}"#);
/// ```
pub fn apply_edit(text: &str, path: &Path, raw: &str) -> String {
    apply_edit_with(text, path, raw, &EditOptions::default()).unwrap_or_else(|_| text.to_string())
}

/// Like [`apply_edit`], but honours `options`.
///
/// # Errors
///
/// Only in [`FailureMode::Strict`](crate::FailureMode::Strict): the
/// resolution or patch error that stopped the edit.
pub fn apply_edit_with(
    text: &str,
    path: &Path,
    raw: &str,
    options: &EditOptions,
) -> Result<String, EditError> {
    let value = coerce_value(raw);
    set_value(text, path, &value, options)
}

/// Writes an already parsed `value` at `path`.
pub fn set_value(
    text: &str,
    path: &Path,
    value: &Value,
    options: &EditOptions,
) -> Result<String, EditError> {
    settle(text, path, options, edit_value(text, path, value, options))
}

/// Removes the member at `path` along with its separating comma.
///
/// Removing an absent member leaves the text as it is.
///
/// ```
/// use json_splice::{path, remove_at, EditOptions};
///
/// let out = remove_at(r#"{"a":1,"b":2}"#, &path!["a"], &EditOptions::default()).unwrap();
/// assert_eq!(out, r#"{"b":2}"#);
/// ```
pub fn remove_at(text: &str, path: &Path, options: &EditOptions) -> Result<String, EditError> {
    let result = resolve_removal(text, path)
        .and_then(|edits| apply_edits(text, &edits).map_err(EditError::from));
    settle(text, path, options, result)
}

fn edit_value(
    text: &str,
    path: &Path,
    value: &Value,
    options: &EditOptions,
) -> Result<String, EditError> {
    match resolve(text, path, value, options)? {
        Resolution::Root => {
            let unit = options.indent.unwrap_or_default();
            let document = serialize_root(value, &unit);
            Ok(match line_ending(text) {
                "\n" => document,
                newline => document.replace('\n', newline),
            })
        }
        Resolution::Edits(edits) => {
            for edit in &edits {
                tracing::debug!(
                    target: "json_splice::patch",
                    offset = edit.offset,
                    length = edit.length,
                    content = %edit.content,
                    "applying edit"
                );
            }
            Ok(apply_edits(text, &edits)?)
        }
    }
}

fn settle(
    text: &str,
    path: &Path,
    options: &EditOptions,
    result: Result<String, EditError>,
) -> Result<String, EditError> {
    match result {
        Ok(edited) => Ok(edited),
        Err(err) if options.is_strict() => Err(err),
        Err(err) => {
            tracing::warn!(
                target: "json_splice::edit",
                path = %path,
                error = %err,
                "edit failed, keeping the original text"
            );
            Ok(text.to_string())
        }
    }
}

//! Edit configuration.

use serde::Deserialize;

/// What to do when an edit cannot be performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Return the input text unchanged.
    #[default]
    Fallback,
    /// Return the error to the caller.
    Strict,
}

/// One level of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndentUnit {
    Spaces(usize),
    Tab,
}

impl Default for IndentUnit {
    fn default() -> Self {
        IndentUnit::Spaces(2)
    }
}

impl IndentUnit {
    pub fn as_string(&self) -> String {
        match self {
            IndentUnit::Spaces(n) => " ".repeat(*n),
            IndentUnit::Tab => "\t".to_string(),
        }
    }
}

/// Options for [`crate::apply_edit_with`] and [`crate::remove_at`].
///
/// Deserializable so embedding tools can keep it in their own config files:
///
/// ```
/// use json_splice::{EditOptions, FailureMode, IndentUnit};
///
/// let options: EditOptions =
///     serde_json::from_str(r#"{"mode": "strict", "indent": {"spaces": 4}}"#).unwrap();
/// assert_eq!(options.mode, FailureMode::Strict);
/// assert_eq!(options.indent, Some(IndentUnit::Spaces(4)));
/// assert!(!options.create_missing);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditOptions {
    pub mode: FailureMode,
    /// Indent unit for new content. `None` infers it from the document.
    pub indent: Option<IndentUnit>,
    /// Create missing intermediate objects/arrays instead of failing.
    pub create_missing: bool,
}

impl EditOptions {
    pub fn strict() -> Self {
        Self {
            mode: FailureMode::Strict,
            ..Self::default()
        }
    }

    pub fn is_strict(&self) -> bool {
        self.mode == FailureMode::Strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = EditOptions::default();
        assert_eq!(options.mode, FailureMode::Fallback);
        assert_eq!(options.indent, None);
        assert!(!options.create_missing);
        assert!(EditOptions::strict().is_strict());
    }

    #[test]
    fn test_deserialize_partial() {
        let options: EditOptions =
            serde_json::from_str(r#"{"indent": "tab", "create_missing": true}"#).unwrap();
        assert_eq!(options.mode, FailureMode::Fallback);
        assert_eq!(options.indent, Some(IndentUnit::Tab));
        assert!(options.create_missing);
    }

    #[test]
    fn test_indent_unit_string() {
        assert_eq!(IndentUnit::default().as_string(), "  ");
        assert_eq!(IndentUnit::Spaces(4).as_string(), "    ");
        assert_eq!(IndentUnit::Tab.as_string(), "\t");
    }
}

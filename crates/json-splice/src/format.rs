//! Layout helpers: indentation detection and value rendering.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::options::IndentUnit;

/// Infers the indent unit of `text`.
///
/// A tab at the start of any indented line selects [`IndentUnit::Tab`];
/// otherwise the smallest leading run of spaces wins. Unindented text yields
/// the default of two spaces.
///
/// ```
/// use json_splice::format::infer_indent;
/// use json_splice::IndentUnit;
///
/// assert_eq!(infer_indent("{\n    \"a\": 1\n}"), IndentUnit::Spaces(4));
/// assert_eq!(infer_indent("{\n\t\"a\": 1\n}"), IndentUnit::Tab);
/// assert_eq!(infer_indent("{\"a\": 1}"), IndentUnit::Spaces(2));
/// ```
pub fn infer_indent(text: &str) -> IndentUnit {
    let mut smallest: Option<usize> = None;
    for line in text.lines() {
        let rest = line.trim_start_matches([' ', '\t']);
        if rest.is_empty() {
            continue;
        }
        let lead = &line[..line.len() - rest.len()];
        if lead.starts_with('\t') {
            return IndentUnit::Tab;
        }
        if !lead.is_empty() {
            smallest = Some(smallest.map_or(lead.len(), |s| s.min(lead.len())));
        }
    }
    smallest.map(IndentUnit::Spaces).unwrap_or_default()
}

/// The line ending used by `text`: `"\r\n"` if its first line break is
/// CRLF, otherwise `"\n"`.
pub fn line_ending(text: &str) -> &'static str {
    match text.find('\n') {
        Some(i) if text[..i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Returns true if `text` holds nothing but JSON whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim_matches([' ', '\t', '\n', '\r']).is_empty()
}

/// Byte offset of the start of the line containing `offset`.
pub fn line_start(text: &str, offset: usize) -> usize {
    text[..offset].rfind('\n').map_or(0, |i| i + 1)
}

/// Leading whitespace of the line containing `offset`.
pub fn line_indent(text: &str, offset: usize) -> &str {
    let start = line_start(text, offset);
    let line = &text[start..];
    let rest = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - rest.len()]
}

/// Returns true if only indentation precedes `offset` on its line.
pub fn starts_line(text: &str, offset: usize) -> bool {
    text[line_start(text, offset)..offset]
        .bytes()
        .all(|b| b == b' ' || b == b'\t')
}

/// The run of whitespace immediately before `offset`.
pub fn prior_whitespace(text: &str, offset: usize) -> &str {
    let bytes = text.as_bytes();
    let mut start = offset;
    while start > 0 && matches!(bytes[start - 1], b' ' | b'\t' | b'\n' | b'\r') {
        start -= 1;
    }
    &text[start..offset]
}

/// Serializes `value` over multiple lines with `unit` per nesting level.
pub fn to_pretty(value: &Value, unit: &str) -> String {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(
        &mut out,
        PrettyFormatter::with_indent(unit.as_bytes()),
    );
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8(out).unwrap_or_else(|_| value.to_string())
}

/// Renders `value` for placement in a document.
///
/// With `indent == None` the value is written compactly. Otherwise composite
/// values are pretty-printed, lines are broken with `newline` and every
/// continuation line is prefixed with `indent`, so the closing bracket lines
/// up with the line the value starts on.
pub fn render_value(value: &Value, unit: &str, newline: &str, indent: Option<&str>) -> String {
    let Some(indent) = indent else {
        return value.to_string();
    };
    let composite = match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    };
    if !composite {
        return value.to_string();
    }
    let pretty = to_pretty(value, unit);
    if indent.is_empty() && newline == "\n" {
        return pretty;
    }
    pretty.replace('\n', &format!("{newline}{indent}"))
}

/// A JSON string literal for `key`.
pub fn quote_key(key: &str) -> String {
    Value::String(key.to_owned()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infer_indent_smallest_run() {
        let text = "{\n  \"a\": {\n    \"b\": 1\n  }\n}";
        assert_eq!(infer_indent(text), IndentUnit::Spaces(2));
    }

    #[test]
    fn test_line_helpers() {
        let text = "{\n    \"a\": 1\n}";
        let a = text.find("\"a\"").unwrap();
        let one = text.find('1').unwrap();
        assert_eq!(line_start(text, a), 2);
        assert_eq!(line_indent(text, one), "    ");
        assert!(starts_line(text, a));
        assert!(!starts_line(text, one));
        assert!(starts_line(text, 0));
    }

    #[test]
    fn test_prior_whitespace() {
        let text = "{\n  \"a\": 1,\n  \"b\": 2}";
        let b = text.find("\"b\"").unwrap();
        assert_eq!(prior_whitespace(text, b), "\n  ");
        assert_eq!(prior_whitespace("{\"a\":1}", 1), "");
        assert_eq!(prior_whitespace("x", 0), "");
    }

    #[test]
    fn test_render_compact() {
        let v = json!({"x": [1, 2], "y": null});
        assert_eq!(render_value(&v, "  ", "\n", None), r#"{"x":[1,2],"y":null}"#);
    }

    #[test]
    fn test_render_reindented() {
        let v = json!({"x": [1]});
        assert_eq!(
            render_value(&v, "  ", "\n", Some("  ")),
            "{\n    \"x\": [\n      1\n    ]\n  }"
        );
        assert_eq!(render_value(&v, "\t", "\n", Some("")), "{\n\t\"x\": [\n\t\t1\n\t]\n}");
    }

    #[test]
    fn test_render_crlf() {
        let v = json!({"x": [1]});
        assert_eq!(
            render_value(&v, "  ", "\r\n", Some("")),
            "{\r\n  \"x\": [\r\n    1\r\n  ]\r\n}"
        );
        assert_eq!(
            render_value(&json!([true]), "\t", "\r\n", Some("\t")),
            "[\r\n\t\ttrue\r\n\t]"
        );
    }

    #[test]
    fn test_line_ending() {
        assert_eq!(line_ending("{\r\n  \"a\": 1\r\n}"), "\r\n");
        assert_eq!(line_ending("{\n  \"a\": 1\n}"), "\n");
        assert_eq!(line_ending("{}"), "\n");
        assert_eq!(line_ending("\n\r\n"), "\n");
    }

    #[test]
    fn test_is_blank_only_json_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\r\n"));
        assert!(!is_blank("\u{a0}"));
        assert!(!is_blank("\u{2003}"));
        assert!(!is_blank(" {} "));
    }

    #[test]
    fn test_render_scalars_and_empty_inline() {
        assert_eq!(render_value(&json!("s"), "  ", "\n", Some("    ")), "\"s\"");
        assert_eq!(render_value(&json!({}), "  ", "\n", Some("  ")), "{}");
        assert_eq!(render_value(&json!([]), "  ", "\n", Some("  ")), "[]");
    }

    #[test]
    fn test_quote_key() {
        assert_eq!(quote_key("a\"b"), r#""a\"b""#);
        assert_eq!(quote_key("plain"), "\"plain\"");
    }
}

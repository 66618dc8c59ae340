//! Raw value coercion and whole-document serialization.

use serde::Deserialize;
use serde_json::Value;

use crate::format::to_pretty;
use crate::options::IndentUnit;
use crate::syntax::parse_tree;

/// Interprets user-supplied text as a JSON value.
///
/// Valid JSON literals are taken structurally; anything else becomes a JSON
/// string holding the raw text verbatim. Numbers keep their exact digits, and
/// values may nest as deeply as documents do
/// ([`MAX_DEPTH`](crate::syntax::MAX_DEPTH)).
///
/// ```
/// use json_splice::coerce::coerce_value;
/// use serde_json::json;
///
/// assert_eq!(coerce_value("true"), json!(true));
/// assert_eq!(coerce_value("123"), json!(123));
/// assert_eq!(coerce_value(r#"{"a":1}"#), json!({"a": 1}));
/// assert_eq!(coerce_value("hello world"), json!("hello world"));
/// ```
pub fn coerce_value(raw: &str) -> Value {
    // the scanner bounds the nesting before the recursion limit is lifted
    if let Err(err) = parse_tree(raw) {
        return raw_string(raw, &err);
    }
    let mut de = serde_json::Deserializer::from_str(raw);
    de.disable_recursion_limit();
    match Value::deserialize(&mut de).and_then(|value| de.end().map(|()| value)) {
        Ok(value) => value,
        Err(err) => raw_string(raw, &err),
    }
}

fn raw_string(raw: &str, err: &dyn std::fmt::Display) -> Value {
    tracing::trace!(
        target: "json_splice::coerce",
        error = %err,
        "raw value is not JSON, using it as a string"
    );
    Value::String(raw.to_owned())
}

/// Canonical compact serialization of a coerced raw value.
pub fn serialize_value(raw: &str) -> String {
    coerce_value(raw).to_string()
}

/// Serializes a value as a complete document.
pub fn serialize_root(value: &Value, unit: &IndentUnit) -> String {
    to_pretty(value, &unit.as_string())
}

/// Serializes a node set for display; empty or absent sets become `{}`.
///
/// ```
/// use json_splice::coerce::serialize_node_set;
/// use serde_json::json;
///
/// assert_eq!(serialize_node_set(None), "{}");
/// assert_eq!(serialize_node_set(Some(&json!({}))), "{}");
/// assert_eq!(serialize_node_set(Some(&json!({"a": 1}))), "{\n  \"a\": 1\n}");
/// ```
pub fn serialize_node_set(nodes: Option<&Value>) -> String {
    match nodes {
        None | Some(Value::Null) => "{}".to_string(),
        Some(value) => serialize_root(value, &IndentUnit::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::MAX_DEPTH;
    use serde_json::json;

    #[test]
    fn test_coerce_literals() {
        assert_eq!(coerce_value("42"), json!(42));
        assert_eq!(coerce_value("-1.5"), json!(-1.5));
        assert_eq!(coerce_value("false"), json!(false));
        assert_eq!(coerce_value("null"), json!(null));
        assert_eq!(coerce_value("\"quoted\""), json!("quoted"));
        assert_eq!(coerce_value("[1, \"two\"]"), json!([1, "two"]));
    }

    #[test]
    fn test_coerce_falls_back_to_string() {
        assert_eq!(coerce_value("hello"), json!("hello"));
        assert_eq!(coerce_value(""), json!(""));
        assert_eq!(coerce_value("{broken"), json!("{broken"));
        assert_eq!(coerce_value("42 apples"), json!("42 apples"));
        assert_eq!(coerce_value("'single'"), json!("'single'"));
    }

    #[test]
    fn test_coerce_keeps_number_digits() {
        let huge = coerce_value("1e400");
        assert!(huge.is_number());
        assert_eq!(huge.to_string(), "1e400");

        let id = coerce_value("18446744073709551616");
        assert!(id.is_number());
        assert_eq!(id.to_string(), "18446744073709551616");

        assert_eq!(serialize_value("0.30000000000000000001"), "0.30000000000000000001");
    }

    #[test]
    fn test_coerce_deep_nesting() {
        let deep = "[".repeat(200) + &"]".repeat(200);
        let value = coerce_value(&deep);
        assert!(value.is_array());
        assert_eq!(value.to_string(), deep);

        let too_deep = "[".repeat(MAX_DEPTH + 2) + &"]".repeat(MAX_DEPTH + 2);
        assert!(coerce_value(&too_deep).is_string());
    }

    #[test]
    fn test_coerce_rejects_document_only_syntax() {
        assert_eq!(coerce_value("[1,]"), json!("[1,]"));
        assert_eq!(coerce_value("1 // one"), json!("1 // one"));
    }

    #[test]
    fn test_coerce_trims_around_literals() {
        assert_eq!(coerce_value("  42\n"), json!(42));
    }

    #[test]
    fn test_coerce_preserves_key_order() {
        let v = coerce_value(r#"{"z": 1, "a": 2}"#);
        assert_eq!(v.to_string(), r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn test_serialize_value_canonical() {
        assert_eq!(serialize_value(r#"{ "a" : [ 1 , 2 ] }"#), r#"{"a":[1,2]}"#);
        assert_eq!(serialize_value("hello"), "\"hello\"");
        assert_eq!(serialize_value("say \"hi\""), r#""say \"hi\"""#);
    }

    #[test]
    fn test_serialize_root_indentation() {
        let v = json!({"a": [1]});
        assert_eq!(
            serialize_root(&v, &IndentUnit::default()),
            "{\n  \"a\": [\n    1\n  ]\n}"
        );
        assert_eq!(serialize_root(&json!(7), &IndentUnit::Tab), "7");
    }

    #[test]
    fn test_serialize_node_set_null() {
        assert_eq!(serialize_node_set(Some(&Value::Null)), "{}");
        assert_eq!(serialize_node_set(Some(&json!([]))), "[]");
    }
}

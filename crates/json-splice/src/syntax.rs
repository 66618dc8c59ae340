//! Span-tracking JSON scanner.
//!
//! Produces a tree of [`Node`]s carrying byte offsets into the source text,
//! which is all the resolver needs: scalar values are not decoded, object keys
//! are. Line comments, block comments and trailing commas are tolerated.

use crate::error::SyntaxError;

/// Nesting deeper than this is rejected instead of recursing further.
pub const MAX_DEPTH: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Object(Vec<Member>),
    Array(Vec<Node>),
    String,
    Number,
    Boolean,
    Null,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Object(_) => "object",
            NodeKind::Array(_) => "array",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Boolean => "boolean",
            NodeKind::Null => "null",
        }
    }
}

/// A value and its span in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub offset: usize,
    pub length: usize,
}

impl Node {
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Object(_) | NodeKind::Array(_))
    }

    /// Spans of the direct children, from the first byte of each member
    /// (its key, for objects) to the end of its value.
    pub fn child_spans(&self) -> Vec<(usize, usize)> {
        match &self.kind {
            NodeKind::Object(members) => members.iter().map(|m| (m.key_offset, m.end())).collect(),
            NodeKind::Array(items) => items.iter().map(|n| (n.offset, n.end())).collect(),
            _ => Vec::new(),
        }
    }
}

/// An object property: decoded key, key span and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub key: String,
    pub key_offset: usize,
    pub key_length: usize,
    pub value: Node,
}

impl Member {
    pub fn key_end(&self) -> usize {
        self.key_offset + self.key_length
    }

    pub fn end(&self) -> usize {
        self.value.end()
    }
}

/// Parse `text` into a span tree.
///
/// ```
/// use json_splice::syntax::{parse_tree, NodeKind};
///
/// let root = parse_tree(r#"{"a": [1, 2]}"#).unwrap();
/// let NodeKind::Object(members) = &root.kind else { panic!() };
/// assert_eq!(members[0].key, "a");
/// assert_eq!((members[0].value.offset, members[0].value.length), (6, 6));
/// ```
pub fn parse_tree(text: &str) -> Result<Node, SyntaxError> {
    let mut scanner = Scanner::new(text);
    scanner.skip_whitespace()?;
    let root = scanner.read_any(0)?;
    scanner.skip_whitespace()?;
    if scanner.x < scanner.data.len() {
        return Err(scanner.error("end of input"));
    }
    Ok(root)
}

struct Scanner<'a> {
    text: &'a str,
    data: &'a [u8],
    x: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            data: text.as_bytes(),
            x: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.x).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.data.get(self.x + ahead).copied()
    }

    fn error(&self, expected: &'static str) -> SyntaxError {
        SyntaxError {
            offset: self.x,
            expected,
        }
    }

    fn skip_whitespace(&mut self) -> Result<(), SyntaxError> {
        while let Some(ch) = self.peek() {
            match ch {
                b' ' | b'\t' | b'\n' | b'\r' => self.x += 1,
                b'/' if self.peek_at(1) == Some(b'/') => {
                    while self.x < self.data.len() && self.data[self.x] != b'\n' {
                        self.x += 1;
                    }
                }
                b'/' if self.peek_at(1) == Some(b'*') => {
                    let start = self.x;
                    self.x += 2;
                    loop {
                        if self.x + 1 >= self.data.len() {
                            return Err(SyntaxError {
                                offset: start,
                                expected: "end of comment",
                            });
                        }
                        if self.data[self.x] == b'*' && self.data[self.x + 1] == b'/' {
                            self.x += 2;
                            break;
                        }
                        self.x += 1;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn read_any(&mut self, depth: usize) -> Result<Node, SyntaxError> {
        if depth > MAX_DEPTH {
            return Err(self.error("shallower nesting"));
        }
        match self.peek() {
            Some(b'"') => {
                let (start, end) = self.read_str_span()?;
                Ok(Node {
                    kind: NodeKind::String,
                    offset: start,
                    length: end - start,
                })
            }
            Some(b'{') => self.read_obj(depth),
            Some(b'[') => self.read_arr(depth),
            Some(b't') => self.read_keyword("true", NodeKind::Boolean),
            Some(b'f') => self.read_keyword("false", NodeKind::Boolean),
            Some(b'n') => self.read_keyword("null", NodeKind::Null),
            Some(b'-' | b'0'..=b'9') => self.read_num(),
            _ => Err(self.error("value")),
        }
    }

    fn read_keyword(&mut self, word: &'static str, kind: NodeKind) -> Result<Node, SyntaxError> {
        let start = self.x;
        let end = start + word.len();
        if end > self.data.len() || &self.data[start..end] != word.as_bytes() {
            return Err(self.error(word));
        }
        self.x = end;
        Ok(Node {
            kind,
            offset: start,
            length: word.len(),
        })
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.x;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.x += 1;
        }
        self.x - start
    }

    fn read_num(&mut self) -> Result<Node, SyntaxError> {
        let start = self.x;
        if self.peek() == Some(b'-') {
            self.x += 1;
        }
        match self.peek() {
            Some(b'0') => self.x += 1,
            Some(b'1'..=b'9') => {
                self.skip_digits();
            }
            _ => return Err(self.error("digit")),
        }
        if self.peek() == Some(b'.') {
            self.x += 1;
            if self.skip_digits() == 0 {
                return Err(self.error("digit"));
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.x += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.x += 1;
            }
            if self.skip_digits() == 0 {
                return Err(self.error("digit"));
            }
        }
        Ok(Node {
            kind: NodeKind::Number,
            offset: start,
            length: self.x - start,
        })
    }

    /// Consume a string literal; returns its span including both quotes.
    fn read_str_span(&mut self) -> Result<(usize, usize), SyntaxError> {
        let start = self.x;
        if self.peek() != Some(b'"') {
            return Err(self.error("'\"'"));
        }
        self.x += 1;
        loop {
            match self.peek() {
                None => {
                    return Err(SyntaxError {
                        offset: start,
                        expected: "closing quote",
                    })
                }
                Some(b'"') => {
                    self.x += 1;
                    return Ok((start, self.x));
                }
                Some(b'\\') => self.x += 2,
                Some(c) if c < 0x20 => return Err(self.error("string character")),
                Some(_) => self.x += 1,
            }
        }
    }

    fn decode_key(&self, start: usize, end: usize) -> Result<String, SyntaxError> {
        let literal = &self.text[start..end];
        let body = &literal[1..literal.len() - 1];
        if !body.contains('\\') {
            return Ok(body.to_string());
        }
        serde_json::from_str::<String>(literal).map_err(|_| SyntaxError {
            offset: start,
            expected: "valid string escape",
        })
    }

    fn read_obj(&mut self, depth: usize) -> Result<Node, SyntaxError> {
        let start = self.x;
        self.x += 1;
        let mut members = Vec::new();
        loop {
            self.skip_whitespace()?;
            match self.peek() {
                Some(b'}') => {
                    self.x += 1;
                    break;
                }
                Some(b'"') => {}
                _ => return Err(self.error("property name or '}'")),
            }
            let (key_offset, key_end) = self.read_str_span()?;
            let key = self.decode_key(key_offset, key_end)?;
            self.skip_whitespace()?;
            if self.peek() != Some(b':') {
                return Err(self.error("':'"));
            }
            self.x += 1;
            self.skip_whitespace()?;
            let value = self.read_any(depth + 1)?;
            members.push(Member {
                key,
                key_offset,
                key_length: key_end - key_offset,
                value,
            });
            self.skip_whitespace()?;
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b'}') => {
                    self.x += 1;
                    break;
                }
                _ => return Err(self.error("',' or '}'")),
            }
        }
        Ok(Node {
            kind: NodeKind::Object(members),
            offset: start,
            length: self.x - start,
        })
    }

    fn read_arr(&mut self, depth: usize) -> Result<Node, SyntaxError> {
        let start = self.x;
        self.x += 1;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace()?;
            if self.peek() == Some(b']') {
                self.x += 1;
                break;
            }
            items.push(self.read_any(depth + 1)?);
            self.skip_whitespace()?;
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b']') => {
                    self.x += 1;
                    break;
                }
                _ => return Err(self.error("',' or ']'")),
            }
        }
        Ok(Node {
            kind: NodeKind::Array(items),
            offset: start,
            length: self.x - start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(node: &Node) -> &[Member] {
        match &node.kind {
            NodeKind::Object(members) => members,
            other => panic!("expected object, got {}", other.name()),
        }
    }

    #[test]
    fn test_scalar_roots() {
        for (text, name) in [
            ("42", "number"),
            ("-0.5e+3", "number"),
            ("\"s\"", "string"),
            ("true", "boolean"),
            ("false", "boolean"),
            ("null", "null"),
        ] {
            let node = parse_tree(text).unwrap();
            assert_eq!(node.kind.name(), name);
            assert_eq!((node.offset, node.length), (0, text.len()));
        }
    }

    #[test]
    fn test_object_spans() {
        let text = r#"{ "a" : 1, "b":"x" }"#;
        let root = parse_tree(text).unwrap();
        let m = members(&root);
        assert_eq!(m.len(), 2);
        assert_eq!(&text[m[0].key_offset..m[0].key_end()], "\"a\"");
        assert_eq!(&text[m[0].value.offset..m[0].value.end()], "1");
        assert_eq!(&text[m[1].value.offset..m[1].value.end()], "\"x\"");
        assert_eq!(root.length, text.len());
    }

    #[test]
    fn test_escaped_key_is_decoded() {
        let root = parse_tree(r#"{"a\"bA": 1}"#).unwrap();
        assert_eq!(members(&root)[0].key, "a\"bA");
    }

    #[test]
    fn test_nested_array_spans() {
        let text = "[1, [2, 3], {}]";
        let root = parse_tree(text).unwrap();
        let NodeKind::Array(items) = &root.kind else {
            panic!("expected array");
        };
        assert_eq!(items.len(), 3);
        assert_eq!(&text[items[1].offset..items[1].end()], "[2, 3]");
        assert_eq!(root.child_spans(), vec![(1, 2), (4, 10), (12, 14)]);
    }

    #[test]
    fn test_comments_and_trailing_commas() {
        let text = "{\n  // note\n  \"a\": 1, /* b */\n  \"c\": [1,],\n}";
        let root = parse_tree(text).unwrap();
        let m = members(&root);
        assert_eq!(m.len(), 2);
        assert_eq!(m[1].key, "c");
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(parse_tree("").unwrap_err().expected, "value");
        assert_eq!(parse_tree("{\"a\" 1}").unwrap_err().expected, "':'");
        assert_eq!(parse_tree("[1 2]").unwrap_err().expected, "',' or ']'");
        assert_eq!(parse_tree("{} x").unwrap_err().offset, 3);
        assert_eq!(parse_tree("\"open").unwrap_err().expected, "closing quote");
        assert_eq!(parse_tree("01").unwrap_err().expected, "end of input");
        assert_eq!(parse_tree("1.").unwrap_err().expected, "digit");
        assert_eq!(parse_tree("tru").unwrap_err().expected, "true");
        assert_eq!(parse_tree("/* open").unwrap_err().expected, "end of comment");
        assert_eq!(parse_tree("{,}").unwrap_err().expected, "property name or '}'");
    }

    #[test]
    fn test_depth_limit() {
        let deep = "[".repeat(MAX_DEPTH + 2) + &"]".repeat(MAX_DEPTH + 2);
        assert_eq!(parse_tree(&deep).unwrap_err().expected, "shallower nesting");
        let ok = "[".repeat(MAX_DEPTH) + &"]".repeat(MAX_DEPTH);
        assert!(parse_tree(&ok).is_ok());
    }
}

//! Path resolution: turns (document, path, value) into edit descriptors.
//!
//! Existing values are replaced in place. Absent members are inserted after
//! the last member of their parent, copying that member's separator
//! whitespace and key/value spacing; empty containers are opened onto new
//! lines when the document is laid out over multiple lines.

use std::borrow::Cow;

use json_splice_path::{is_valid_index, Path, PathSegment};
use serde_json::{Map, Value};

use crate::error::{AddressError, EditError};
use crate::format::{
    infer_indent, is_blank, line_ending, line_indent, prior_whitespace, quote_key, render_value,
    starts_line,
};
use crate::options::EditOptions;
use crate::patch::{apply_edits, EditDescriptor};
use crate::syntax::{parse_tree, Member, Node, NodeKind};

/// What the caller has to do to place a value at a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path is empty: replace the whole document.
    Root,
    /// Splice these descriptors into the original text.
    Edits(Vec<EditDescriptor>),
}

/// Resolves `path` in `text` for writing `value`.
///
/// A blank document is treated as an absent root: the edit is computed
/// against `{}` and returned as one descriptor covering the whole text.
///
/// ```
/// use json_splice::resolve::{resolve, Resolution};
/// use json_splice::{EditDescriptor, EditOptions};
/// use json_splice_path::path;
/// use serde_json::json;
///
/// let text = r#"{"a": 1}"#;
/// let res = resolve(text, &path!["a"], &json!(2), &EditOptions::default()).unwrap();
/// assert_eq!(res, Resolution::Edits(vec![EditDescriptor::replace(6, 1, "2")]));
/// ```
pub fn resolve(
    text: &str,
    path: &Path,
    value: &Value,
    options: &EditOptions,
) -> Result<Resolution, EditError> {
    if path.is_root() {
        return Ok(Resolution::Root);
    }
    if is_blank(text) {
        let seeded = resolve_in(EMPTY_DOCUMENT, path, value, options)?;
        let mut filled = apply_edits(EMPTY_DOCUMENT, &seeded)?;
        if line_ending(text) != "\n" {
            filled = filled.replace('\n', line_ending(text));
        }
        return Ok(Resolution::Edits(vec![EditDescriptor::replace(
            0,
            text.len(),
            filled,
        )]));
    }
    let edits = resolve_in(text, path, value, options)?;
    tracing::debug!(
        target: "json_splice::resolve",
        path = %path,
        edits = edits.len(),
        "resolved edit"
    );
    Ok(Resolution::Edits(edits))
}

/// Resolves the descriptors that remove the member at `path`, together with
/// the comma separating it from its siblings.
///
/// An absent member resolves to no descriptors.
pub fn resolve_removal(text: &str, path: &Path) -> Result<Vec<EditDescriptor>, EditError> {
    if path.is_root() {
        return Err(AddressError::RootRemoval.into());
    }
    if is_blank(text) {
        return Ok(Vec::new());
    }
    let root = parse_tree(text)?;
    let found = match locate(&root, path) {
        Ok(Location::Found(found)) => found,
        Ok(Location::Missing { .. }) | Err(AddressError::IndexOutOfBounds { .. }) => {
            return Ok(Vec::new())
        }
        Err(err) => return Err(err.into()),
    };
    let Some((parent, position)) = found.parent else {
        return Err(AddressError::RootRemoval.into());
    };

    let spans = parent.child_spans();
    let (start, end) = spans[position];
    let edit = if spans.len() == 1 {
        let open = parent.offset + 1;
        let close = parent.end() - 1;
        EditDescriptor::delete(open, close - open)
    } else if position == 0 {
        EditDescriptor::delete(start, spans[1].0 - start)
    } else {
        let previous_end = spans[position - 1].1;
        EditDescriptor::delete(previous_end, end - previous_end)
    };
    Ok(vec![edit])
}

const EMPTY_DOCUMENT: &str = "{}";

struct Found<'n> {
    node: &'n Node,
    /// First byte of the member holding `node` (its key, inside objects).
    member_start: usize,
    parent: Option<(&'n Node, usize)>,
}

enum Location<'n> {
    Found(Found<'n>),
    /// `path[depth]` is not present in `parent`.
    Missing { parent: &'n Node, depth: usize },
}

fn locate<'n>(root: &'n Node, path: &Path) -> Result<Location<'n>, AddressError> {
    let mut found = Found {
        node: root,
        member_start: root.offset,
        parent: None,
    };
    for (depth, segment) in path.iter().enumerate() {
        let current = found.node;
        let child = match &current.kind {
            NodeKind::Object(members) => {
                let key = segment.to_key_string();
                members
                    .iter()
                    .rposition(|m| m.key == key)
                    .map(|i| (&members[i].value, members[i].key_offset, i))
            }
            NodeKind::Array(items) => {
                let index = array_index(segment, path, depth)?;
                if index > items.len() {
                    return Err(AddressError::IndexOutOfBounds {
                        path: path.prefix(depth).to_string(),
                        index,
                        len: items.len(),
                    });
                }
                items.get(index).map(|item| (item, item.offset, index))
            }
            other => {
                return Err(AddressError::NotAContainer {
                    path: path.prefix(depth).to_string(),
                    found: other.name(),
                })
            }
        };
        match child {
            Some((node, member_start, position)) => {
                found = Found {
                    node,
                    member_start,
                    parent: Some((current, position)),
                };
            }
            None => {
                return Ok(Location::Missing {
                    parent: current,
                    depth,
                })
            }
        }
    }
    Ok(Location::Found(found))
}

fn array_index(segment: &PathSegment, path: &Path, depth: usize) -> Result<usize, AddressError> {
    let key_error = |key: &str| AddressError::KeyOnArray {
        path: path.prefix(depth).to_string(),
        key: key.to_string(),
    };
    match segment {
        PathSegment::Index(i) => Ok(*i),
        PathSegment::Key(k) if is_valid_index(k) => k.parse().map_err(|_| key_error(k)),
        PathSegment::Key(k) => Err(key_error(k)),
    }
}

fn resolve_in(
    text: &str,
    path: &Path,
    value: &Value,
    options: &EditOptions,
) -> Result<Vec<EditDescriptor>, EditError> {
    let root = parse_tree(text)?;
    let unit = options.indent.unwrap_or_else(|| infer_indent(text)).as_string();
    let writer = Writer {
        text,
        unit,
        newline: line_ending(text),
    };

    match locate(&root, path)? {
        Location::Found(found) => Ok(vec![writer.replace(found.node, found.member_start, value)]),
        Location::Missing { parent, depth } => {
            let rest = &path.segments()[depth + 1..];
            let value = if rest.is_empty() {
                Cow::Borrowed(value)
            } else if options.create_missing {
                Cow::Owned(wrap(value, rest, path, depth + 1)?)
            } else {
                return Err(AddressError::MissingParent {
                    path: path.prefix(depth + 1).to_string(),
                }
                .into());
            };
            let is_root = depth == 0;
            let edit = match &parent.kind {
                NodeKind::Object(members) => {
                    let key = path[depth].to_key_string();
                    writer.insert_member(parent, members, &key, &value, is_root)
                }
                NodeKind::Array(items) => writer.append_item(parent, items, &value, is_root),
                other => {
                    return Err(AddressError::NotAContainer {
                        path: path.prefix(depth).to_string(),
                        found: other.name(),
                    }
                    .into())
                }
            };
            Ok(vec![edit])
        }
    }
}

/// Wraps `value` in the containers named by `rest`, innermost last.
fn wrap(
    value: &Value,
    rest: &[PathSegment],
    path: &Path,
    first_depth: usize,
) -> Result<Value, AddressError> {
    let mut wrapped = value.clone();
    for (offset, segment) in rest.iter().enumerate().rev() {
        wrapped = match segment {
            PathSegment::Key(k) => {
                let mut map = Map::new();
                map.insert(k.clone(), wrapped);
                Value::Object(map)
            }
            PathSegment::Index(0) => Value::Array(vec![wrapped]),
            PathSegment::Index(index) => {
                return Err(AddressError::IndexOutOfBounds {
                    path: path.prefix(first_depth + offset).to_string(),
                    index: *index,
                    len: 0,
                })
            }
        };
    }
    Ok(wrapped)
}

struct Writer<'a> {
    text: &'a str,
    unit: String,
    newline: &'static str,
}

impl Writer<'_> {
    fn render(&self, value: &Value, indent: Option<&str>) -> String {
        render_value(value, &self.unit, self.newline, indent)
    }

    fn replace(&self, node: &Node, member_start: usize, value: &Value) -> EditDescriptor {
        let indent =
            starts_line(self.text, member_start).then(|| line_indent(self.text, member_start));
        EditDescriptor::replace(node.offset, node.length, self.render(value, indent))
    }

    fn insert_member(
        &self,
        parent: &Node,
        members: &[Member],
        key: &str,
        value: &Value,
        is_root: bool,
    ) -> EditDescriptor {
        let key_text = quote_key(key);
        let Some(last) = members.last() else {
            return self.fill_empty(parent, Some(&key_text), value, is_root);
        };
        let separator = prior_whitespace(self.text, last.key_offset);
        let colon = self.colon_style(members);
        let indent = separator.rfind('\n').map(|i| &separator[i + 1..]);
        let content = format!(
            ",{separator}{key_text}{colon}{}",
            self.render(value, indent)
        );
        EditDescriptor::insert(last.end(), content)
    }

    fn append_item(
        &self,
        parent: &Node,
        items: &[Node],
        value: &Value,
        is_root: bool,
    ) -> EditDescriptor {
        let Some(last) = items.last() else {
            return self.fill_empty(parent, None, value, is_root);
        };
        let separator = prior_whitespace(self.text, last.offset);
        let indent = separator.rfind('\n').map(|i| &separator[i + 1..]);
        let content = format!(",{separator}{}", self.render(value, indent));
        EditDescriptor::insert(last.end(), content)
    }

    /// Writes the first member of an empty object or array.
    fn fill_empty(
        &self,
        parent: &Node,
        key_text: Option<&str>,
        value: &Value,
        is_root: bool,
    ) -> EditDescriptor {
        let open = parent.offset + 1;
        let close = parent.end() - 1;
        let interior = &self.text[open..close];
        let length = if is_blank(interior) {
            interior.len()
        } else {
            0
        };
        let prefix = key_text.map(|k| format!("{k}: ")).unwrap_or_default();

        let expanded = is_root || self.text.contains('\n');
        let content = if expanded {
            let outer = line_indent(self.text, parent.offset);
            let inner = format!("{outer}{}", self.unit);
            let newline = self.newline;
            format!(
                "{newline}{inner}{prefix}{}{newline}{outer}",
                self.render(value, Some(&inner))
            )
        } else {
            format!("{prefix}{}", self.render(value, None))
        };
        EditDescriptor::replace(open, length, content)
    }

    /// The key/value separator used by existing members, e.g. `": "` or `":"`.
    fn colon_style(&self, members: &[Member]) -> String {
        members
            .first()
            .map(|m| &self.text[m.key_end()..m.value.offset])
            .filter(|s| !s.contains(['\n', '\r', '/']))
            .map(str::to_string)
            .unwrap_or_else(|| ": ".to_string())
    }
}

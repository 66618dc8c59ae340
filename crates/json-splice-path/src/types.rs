//! Path and segment types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single step in a [`Path`].
///
/// Serialized untagged, so a path reads as `["customer", 0, "name"]` in JSON.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object property name.
    Key(String),
    /// Array position.
    Index(usize),
}

impl PathSegment {
    #[inline]
    pub fn key(k: impl Into<String>) -> Self {
        PathSegment::Key(k.into())
    }

    #[inline]
    pub fn index(i: usize) -> Self {
        PathSegment::Index(i)
    }

    /// The segment in its textual key form, as used for object lookup.
    ///
    /// ```
    /// use json_splice_path::PathSegment;
    ///
    /// assert_eq!(PathSegment::key("name").to_key_string(), "name");
    /// assert_eq!(PathSegment::index(3).to_key_string(), "3");
    /// ```
    pub fn to_key_string(&self) -> String {
        match self {
            PathSegment::Key(k) => k.clone(),
            PathSegment::Index(i) => i.to_string(),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => {
                // Keys are shown as JSON string literals so quotes and control
                // characters stay unambiguous.
                let quoted = serde_json::Value::String(k.clone()).to_string();
                write!(f, "[{quoted}]")
            }
            PathSegment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

impl From<String> for PathSegment {
    fn from(s: String) -> Self {
        PathSegment::Key(s)
    }
}

impl From<&str> for PathSegment {
    fn from(s: &str) -> Self {
        PathSegment::Key(s.to_owned())
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        PathSegment::Index(i)
    }
}

/// An address into a JSON document. The empty path is the document root.
///
/// # Examples
///
/// ```
/// use json_splice_path::Path;
///
/// let path = Path::root().key("customer").index(0).key("name");
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.to_string(), r#"$["customer"][0]["name"]"#);
/// assert_eq!(Path::root().to_string(), "$");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<PathSegment>);

impl Path {
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    /// Append a key segment and return self.
    #[inline]
    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(PathSegment::Key(k.into()));
        self
    }

    /// Append an index segment and return self.
    #[inline]
    pub fn index(mut self, i: usize) -> Self {
        self.0.push(PathSegment::Index(i));
        self
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    /// The first `len` segments of this path.
    pub fn prefix(&self, len: usize) -> Path {
        Path(self.0[..len.min(self.0.len())].to_vec())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathSegment> {
        self.0.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Path(segments)
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for Path {
    type Output = PathSegment;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Build a [`Path`] from a mix of keys and indices.
///
/// ```
/// use json_splice_path::{path, Path};
///
/// let p = path!["customer", 0, "name"];
/// assert_eq!(p, Path::root().key("customer").index(0).key("name"));
/// ```
#[macro_export]
macro_rules! path {
    () => { $crate::Path::root() };
    ($($seg:expr),+ $(,)?) => {
        $crate::Path::from_segments(vec![$($crate::PathSegment::from($seg)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_root() {
        assert_eq!(Path::root().to_string(), "$");
    }

    #[test]
    fn test_display_mixed() {
        let p = Path::root().key("customer").index(0).key("name");
        assert_eq!(p.to_string(), r#"$["customer"][0]["name"]"#);
    }

    #[test]
    fn test_display_escapes_quotes() {
        let p = Path::root().key("say \"hi\"");
        assert_eq!(p.to_string(), r#"$["say \"hi\""]"#);
    }

    #[test]
    fn test_prefix() {
        let p = Path::root().key("a").index(1).key("b");
        assert_eq!(p.prefix(0), Path::root());
        assert_eq!(p.prefix(1), Path::root().key("a"));
        assert_eq!(p.prefix(10), p);
    }

    #[test]
    fn test_serde_untagged() {
        let p: Path = serde_json::from_str(r#"["customer", 0, "name"]"#).unwrap();
        assert_eq!(p, Path::root().key("customer").index(0).key("name"));
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"["customer",0,"name"]"#);
    }

    #[test]
    fn test_segment_key_form() {
        assert_eq!(PathSegment::index(0).to_key_string(), "0");
        assert_eq!(PathSegment::key("7").to_key_string(), "7");
    }
}

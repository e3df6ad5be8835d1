//! Structural paths addressing nodes within a value tree.
//!
//! Issue-to-node matching is done with these, never with joined strings.

use serde::Deserialize;
use std::fmt;

/// One step into a value: an object key or an array index.
///
/// The tag is part of equality: `Key("0")` never equals `Index(0)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum PathSeg {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSeg::Key(k) => write!(f, "{}", k),
            PathSeg::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Structural address of a node within a value tree. The root is empty.
///
/// Deserializes from the validator's mixed string/number JSON arrays,
/// e.g. `["person", 0, "age"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Path(Vec<PathSeg>);

impl Path {
    /// The empty path, addressing the root value.
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn segments(&self) -> &[PathSeg] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&PathSeg> {
        self.0.last()
    }

    /// New path extended by one segment.
    pub fn child(&self, segment: PathSeg) -> Path {
        let mut segments = self.0.clone();
        segments.push(segment);
        Path(segments)
    }

    /// Chainable key step, mainly for building paths in tests and hosts.
    pub fn key(self, key: impl Into<String>) -> Path {
        self.child(PathSeg::Key(key.into()))
    }

    /// Chainable index step.
    pub fn index(self, index: usize) -> Path {
        self.child(PathSeg::Index(index))
    }

    /// True when `prefix` matches the leading segments of this path,
    /// segment-by-segment. Every path starts with the root path.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        prefix.0.len() <= self.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }

    /// True when this path addresses a direct child of `parent`.
    pub fn is_child_of(&self, parent: &Path) -> bool {
        self.0.len() == parent.0.len() + 1 && self.starts_with(parent)
    }
}

/// Display form like `users[2].email`. For UI only; equality between
/// paths is always structural.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            match seg {
                PathSeg::Key(k) => {
                    if i == 0 {
                        write!(f, "{}", k)?;
                    } else {
                        write!(f, ".{}", k)?;
                    }
                }
                PathSeg::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = Path::root().key("person").index(0).key("age");
        let b = Path::root().key("person").index(0).key("age");
        assert_eq!(a, b);

        // A dotted key is a single segment, not a nested path
        let dotted = Path::root().key("a.b");
        let nested = Path::root().key("a").key("b");
        assert_ne!(dotted, nested);

        // Numeric-looking keys never collide with indices
        let key_zero = Path::root().key("0");
        let index_zero = Path::root().index(0);
        assert_ne!(key_zero, index_zero);
    }

    #[test]
    fn test_starts_with() {
        let root = Path::root();
        let items = Path::root().key("items");
        let item = Path::root().key("items").index(3);
        let deep = Path::root().key("items").index(3).key("name");

        assert!(item.starts_with(&root));
        assert!(item.starts_with(&items));
        assert!(item.starts_with(&item));
        assert!(deep.starts_with(&item));
        assert!(!items.starts_with(&item));
        assert!(!Path::root().key("other").index(3).starts_with(&items));
    }

    #[test]
    fn test_is_child_of() {
        let parent = Path::root().key("person");
        let child = Path::root().key("person").key("age");

        assert!(child.is_child_of(&parent));
        assert!(!child.is_child_of(&Path::root()));
        assert!(!parent.is_child_of(&parent));
        assert!(parent.is_child_of(&Path::root()));
    }

    #[test]
    fn test_deserialize_mixed_segments() {
        let path: Path = serde_json::from_str(r#"["person", 0, "age"]"#).unwrap();
        assert_eq!(path, Path::root().key("person").index(0).key("age"));
    }

    #[test]
    fn test_display() {
        let path = Path::root().key("users").index(2).key("email");
        assert_eq!(path.to_string(), "users[2].email");
        assert_eq!(Path::root().to_string(), "");
        assert_eq!(Path::root().index(0).to_string(), "[0]");
    }
}

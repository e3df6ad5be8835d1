//! The nested value being visualized.

use serde::{Deserialize, Deserializer};

use crate::path::{Path, PathSeg};

/// A JSON-like value: scalars plus ordered containers. Object entries
/// preserve insertion order. `Undefined` has no JSON spelling; it exists
/// so hosts can hand over data where a key was present-but-unset, and it
/// renders as a literal `undefined` token.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Undefined,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Look up the value at `path`. `None` is the absent sentinel: the
    /// path leads through a missing key, an out-of-range index, or into
    /// a scalar.
    pub fn at_path(&self, path: &Path) -> Option<&Value> {
        let mut current = self;
        for seg in path.segments() {
            current = match (current, seg) {
                (Value::Object(entries), PathSeg::Key(key)) => {
                    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)?
                }
                (Value::Array(items), PathSeg::Index(i)) => items.get(*i)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// True when `path` does not resolve to a present value. An explicit
    /// `Undefined` counts as absent.
    pub fn is_absent_at(&self, path: &Path) -> bool {
        matches!(self.at_path(path), None | Some(Value::Undefined))
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            // serde_json stores numbers specially; f64 covers what we display
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        Value::from(json.clone())
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Value::from(serde_json::Value::deserialize(deserializer)?))
    }
}

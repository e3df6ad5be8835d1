//! Display-line counting for pretty-printed values.
//!
//! A scalar occupies one line; a container occupies its two bracket
//! lines plus everything inside. Counts are memoized per node path for
//! the lifetime of one render session, so collapsed spans and repeated
//! passes never recount a subtree.

use std::collections::HashMap;
use std::ops::Range;

use crate::path::{Path, PathSeg};
use crate::value::Value;

/// Session-scoped line-count cache. Owned by exactly one render session
/// and discarded with it; entries are only valid for the value tree the
/// session was created for.
#[derive(Debug, Default)]
pub struct LineCounter {
    cache: HashMap<Path, usize>,
}

impl LineCounter {
    pub fn new() -> Self {
        LineCounter {
            cache: HashMap::new(),
        }
    }

    /// Number of display lines `value` occupies when rendered at `path`.
    pub fn count(&mut self, value: &Value, path: &Path) -> usize {
        if let Some(&cached) = self.cache.get(path) {
            return cached;
        }

        let count = match value {
            Value::Array(items) => {
                2 + items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.count(item, &path.child(PathSeg::Index(i))))
                    .sum::<usize>()
            }
            Value::Object(entries) => {
                2 + entries
                    .iter()
                    .map(|(key, value)| self.count(value, &path.child(PathSeg::Key(key.clone()))))
                    .sum::<usize>()
            }
            _ => 1,
        };

        self.cache.insert(path.clone(), count);
        count
    }

    /// Total lines of a contiguous run of array items, e.g. the lines a
    /// collapsed ellipsis stands in for.
    pub fn count_span(&mut self, items: &[Value], array_path: &Path, span: Range<usize>) -> usize {
        span.map(|i| self.count(&items[i], &array_path.child(PathSeg::Index(i))))
            .sum()
    }
}

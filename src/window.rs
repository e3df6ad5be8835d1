//! Truncation windowing for long arrays.
//!
//! An array with issues is split into a leading span, a middle span
//! bracketing the first through last flagged items, and a trailing span.
//! The outer spans can collapse to a single ellipsis line each; the
//! middle never collapses.

use std::ops::Range;

/// Spans longer than this collapse when their end is toggled closed.
pub const COLLAPSE_THRESHOLD: usize = 5;

/// Partition of an array's index range around its flagged items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayWindow {
    pub leading: Range<usize>,
    pub middle: Range<usize>,
    pub trailing: Range<usize>,
}

impl ArrayWindow {
    /// Compute the window for an array of `len` items. `flagged(i)` is
    /// true when item `i` (or anything beneath it) carries an issue.
    /// With nothing flagged the middle covers the whole array.
    pub fn compute(len: usize, mut flagged: impl FnMut(usize) -> bool) -> Self {
        let Some(first) = (0..len).find(|&i| flagged(i)) else {
            return ArrayWindow {
                leading: 0..0,
                middle: 0..len,
                trailing: len..len,
            };
        };
        let last = (0..len).rev().find(|&i| flagged(i)).unwrap_or(first);

        ArrayWindow {
            leading: 0..first,
            middle: first..last + 1,
            trailing: last + 1..len,
        }
    }
}

/// Whether a leading/trailing span renders as one ellipsis line.
pub fn collapses(span: &Range<usize>, collapsed: bool) -> bool {
    span.len() > COLLAPSE_THRESHOLD && collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flagged_items() {
        let window = ArrayWindow::compute(8, |_| false);
        assert_eq!(window.leading, 0..0);
        assert_eq!(window.middle, 0..8);
        assert_eq!(window.trailing, 8..8);
    }

    #[test]
    fn test_single_flagged_item() {
        let window = ArrayWindow::compute(26, |i| i == 14);
        assert_eq!(window.leading, 0..14);
        assert_eq!(window.middle, 14..15);
        assert_eq!(window.trailing, 15..26);
    }

    #[test]
    fn test_flagged_range() {
        let window = ArrayWindow::compute(10, |i| i == 2 || i == 7);
        assert_eq!(window.leading, 0..2);
        assert_eq!(window.middle, 2..8);
        assert_eq!(window.trailing, 8..10);
    }

    #[test]
    fn test_flagged_at_edges() {
        let window = ArrayWindow::compute(4, |i| i == 0 || i == 3);
        assert_eq!(window.leading, 0..0);
        assert_eq!(window.middle, 0..4);
        assert_eq!(window.trailing, 4..4);
    }

    #[test]
    fn test_empty_array() {
        let window = ArrayWindow::compute(0, |_| true);
        assert_eq!(window.leading, 0..0);
        assert_eq!(window.middle, 0..0);
        assert_eq!(window.trailing, 0..0);
    }

    #[test]
    fn test_collapse_policy() {
        // Exactly at the threshold stays expanded
        assert!(!collapses(&(0..5), true));
        assert!(collapses(&(0..6), true));
        assert!(!collapses(&(0..6), false));
        assert!(!collapses(&(0..0), true));
    }
}

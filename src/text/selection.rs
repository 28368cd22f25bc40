//! Selection range in buffer offsets.

use std::ops::Range;

/// The current selection, as a pair of absolute offsets.
///
/// A selection exists only when `end > start`; the ends are not reordered.
/// Both ends are inclusive for [`contains`](Self::contains), which is how the
/// console highlights the cell under the drag anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    start: usize,
    end: usize,
}

impl SelectionRange {
    /// Create a selection from `start` to `end`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Selection start offset.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Selection end offset.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Set the start offset.
    pub fn set_start(&mut self, start: usize) {
        self.start = start;
    }

    /// Set the end offset.
    pub fn set_end(&mut self, end: usize) {
        self.end = end;
    }

    /// Whether anything is selected.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.end > self.start
    }

    /// Whether `pos` lies within the selection, ends included.
    ///
    /// Always false when nothing is selected.
    #[must_use]
    pub fn contains(&self, pos: usize) -> bool {
        self.is_selected() && self.start <= pos && pos <= self.end
    }

    /// Selected range, if any.
    #[must_use]
    pub fn range(&self) -> Option<Range<usize>> {
        self.is_selected().then_some(self.start..self.end)
    }

    /// Reset to an empty selection at offset 0.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Pull both ends back to at most `len`.
    pub(crate) fn clamp_to(&mut self, len: usize) {
        self.start = self.start.min(len);
        self.end = self.end.min(len);
    }

    /// Move both ends forward by `delta`.
    pub(crate) fn shifted(self, delta: usize) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let sel = SelectionRange::default();
        assert!(!sel.is_selected());
        assert!(!sel.contains(0));
        assert_eq!(sel.range(), None);
    }

    #[test]
    fn test_contains_inclusive() {
        let sel = SelectionRange::new(2, 5);
        assert!(sel.is_selected());
        assert!(!sel.contains(1));
        assert!(sel.contains(2));
        assert!(sel.contains(5));
        assert!(!sel.contains(6));
        assert_eq!(sel.range(), Some(2..5));
    }

    #[test]
    fn test_reversed_is_not_selected() {
        let mut sel = SelectionRange::default();
        sel.set_start(5);
        sel.set_end(2);
        assert!(!sel.is_selected());
        for pos in 0..8 {
            assert!(!sel.contains(pos));
        }

        sel.set_end(5);
        assert!(!sel.is_selected(), "equal ends select nothing");
    }

    #[test]
    fn test_instances_are_independent() {
        let mut a = SelectionRange::default();
        let b = SelectionRange::default();
        a.set_end(4);
        assert!(a.is_selected());
        assert!(!b.is_selected());
    }

    #[test]
    fn test_clamp_and_shift() {
        let mut sel = SelectionRange::new(3, 9);
        sel.clamp_to(5);
        assert_eq!((sel.start(), sel.end()), (3, 5));
        let moved = sel.shifted(2);
        assert_eq!((moved.start(), moved.end()), (5, 7));
        sel.clear();
        assert_eq!(sel, SelectionRange::default());
    }
}

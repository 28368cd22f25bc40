//! Memoized offset <-> visual cursor mapping.

use crate::error::{Error, Result};
use crate::text::lines::LineIndex;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Hit/miss counters for the mapper caches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Converts between absolute offsets and `(col, row)` positions.
///
/// Results are memoized per argument. The caches are only valid for the
/// [`LineIndex`] they were filled from; the owner must call
/// [`invalidate`](Self::invalidate) whenever that index changes.
///
/// Interior mutability keeps the query methods `&self`, which also makes the
/// mapper `!Sync`: reads and writes must stay on one thread.
#[derive(Clone, Debug, Default)]
pub struct CoordinateMapper {
    to_index: RefCell<HashMap<(usize, usize), usize>>,
    to_cursor: RefCell<HashMap<usize, (usize, usize)>>,
    stats: Cell<CacheStats>,
}

impl CoordinateMapper {
    /// Create a mapper with empty caches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset of visual position `(col, row)`.
    ///
    /// `row` is 1-based. `col` must not be negative and is clamped to the
    /// length of the row.
    pub fn cursor_to_index(&self, lines: &LineIndex, col: isize, row: usize) -> Result<usize> {
        let total = lines.total_rows();
        if row == 0 || row > total {
            return Err(Error::RowOutOfRange { row, total });
        }
        let col = usize::try_from(col).map_err(|_| Error::InvalidColumn { col })?;

        if let Some(&index) = self.to_index.borrow().get(&(col, row)) {
            self.record(true);
            return Ok(index);
        }
        self.record(false);

        let index = lines.offset_of(col, row)?;
        self.to_index.borrow_mut().insert((col, row), index);
        Ok(index)
    }

    /// Visual `(col, row)` of `index`; row is 1-based.
    pub fn index_to_cursor(&self, lines: &LineIndex, index: usize) -> Result<(usize, usize)> {
        if let Some(&cursor) = self.to_cursor.borrow().get(&index) {
            self.record(true);
            return Ok(cursor);
        }

        let cursor = lines.position_of(index)?;
        self.record(false);
        self.to_cursor.borrow_mut().insert(index, cursor);
        Ok(cursor)
    }

    /// Drop all memoized results.
    pub fn invalidate(&mut self) {
        self.to_index.get_mut().clear();
        self.to_cursor.get_mut().clear();
    }

    /// Number of memoized entries across both directions.
    #[must_use]
    pub fn cached_entries(&self) -> usize {
        self.to_index.borrow().len() + self.to_cursor.borrow().len()
    }

    /// Cache hit/miss counters since creation.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats.get()
    }

    fn record(&self, hit: bool) {
        let mut stats = self.stats.get();
        if hit {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }
        self.stats.set(stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::content::RawContent;

    fn setup(text: &str, limit: Option<usize>) -> (RawContent, LineIndex) {
        let content = RawContent::from_text(text);
        let lines = LineIndex::build(&content, "\n", limit);
        (content, lines)
    }

    #[test]
    fn test_cursor_to_index_unwrapped() {
        let (_, lines) = setup("Hello\nWorld", None);
        let mapper = CoordinateMapper::new();
        assert_eq!(mapper.cursor_to_index(&lines, 0, 1), Ok(0));
        assert_eq!(mapper.cursor_to_index(&lines, 0, 2), Ok(6));
        assert_eq!(mapper.cursor_to_index(&lines, 3, 2), Ok(9));
    }

    #[test]
    fn test_cursor_to_index_clamps_column() {
        let (_, lines) = setup("ab\ncdef", None);
        let mapper = CoordinateMapper::new();
        assert_eq!(mapper.cursor_to_index(&lines, 50, 1), Ok(3));
        assert_eq!(mapper.cursor_to_index(&lines, 50, 2), Ok(7));
    }

    #[test]
    fn test_cursor_to_index_errors() {
        let (_, lines) = setup("ab\ncd", None);
        let mapper = CoordinateMapper::new();
        assert_eq!(
            mapper.cursor_to_index(&lines, 0, 0),
            Err(Error::RowOutOfRange { row: 0, total: 2 })
        );
        assert_eq!(
            mapper.cursor_to_index(&lines, 0, 3),
            Err(Error::RowOutOfRange { row: 3, total: 2 })
        );
        assert_eq!(
            mapper.cursor_to_index(&lines, -1, 1),
            Err(Error::InvalidColumn { col: -1 })
        );
        assert_eq!(mapper.cached_entries(), 0);
    }

    #[test]
    fn test_index_to_cursor_errors() {
        let (_, lines) = setup("abc", None);
        let mapper = CoordinateMapper::new();
        assert_eq!(
            mapper.index_to_cursor(&lines, 4),
            Err(Error::InvalidIndex { index: 4, len: 3 })
        );
        assert_eq!(mapper.index_to_cursor(&lines, 3), Ok((3, 1)));
    }

    #[test]
    fn test_memoization_counts_hits() {
        let (_, lines) = setup("Hello World", Some(5));
        let mapper = CoordinateMapper::new();
        assert_eq!(mapper.index_to_cursor(&lines, 7), Ok((2, 2)));
        assert_eq!(mapper.index_to_cursor(&lines, 7), Ok((2, 2)));
        assert_eq!(mapper.cursor_to_index(&lines, 2, 2), Ok(7));
        assert_eq!(mapper.cursor_to_index(&lines, 2, 2), Ok(7));
        assert_eq!(mapper.stats(), CacheStats { hits: 2, misses: 2 });
        assert_eq!(mapper.cached_entries(), 2);
    }

    #[test]
    fn test_invalidate_clears_entries() {
        let (mut content, mut lines) = setup("abc", None);
        let mut mapper = CoordinateMapper::new();
        assert_eq!(mapper.index_to_cursor(&lines, 3), Ok((3, 1)));

        let summary = content.append("\nxy");
        lines.rescan(&content, summary.first_changed);
        mapper.invalidate();

        assert_eq!(mapper.cached_entries(), 0);
        assert_eq!(mapper.index_to_cursor(&lines, 3), Ok((3, 1)));
        assert_eq!(mapper.index_to_cursor(&lines, 4), Ok((0, 2)));
    }
}

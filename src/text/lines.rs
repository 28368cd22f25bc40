//! Logical line splitting and wrap-row decomposition.
//!
//! A [`LineIndex`] keeps one [`LogicalLine`] span per separator-terminated run
//! of content plus a cumulative row count per line. Rows themselves are never
//! stored: a row's span follows from its line span and its position within
//! the line, using the same [`rows_for`] formula everywhere.

use crate::error::{Error, Result};
use crate::text::content::RawContent;
use std::collections::VecDeque;
use std::ops::Range;

/// A maximal run of content ending at a separator token or end of buffer.
///
/// The separator is part of the line. Only the last line of a buffer can lack
/// one, and only the last line can be empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogicalLine {
    /// Offset of the first char.
    pub start: usize,
    /// Length in chars, separator included.
    pub len: usize,
    /// Length in chars without the trailing separator and any whitespace
    /// right before it. Equal to `len` on an unterminated line.
    pub visible_len: usize,
}

impl LogicalLine {
    /// Offset one past the last char (separator included).
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Char range of the whole line.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Whether the line is terminated by a separator.
    #[must_use]
    pub fn has_separator(&self) -> bool {
        self.len > self.visible_len
    }
}

/// A rendered sub-span of a logical line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WrapRow {
    /// Global row number, 1-based.
    pub row: usize,
    /// Index of the owning logical line, 0-based.
    pub line: usize,
    /// Offset of the first char.
    pub start: usize,
    /// Length in chars. Includes the separator on a line's last row.
    pub len: usize,
}

impl WrapRow {
    /// Offset one past the last char.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Char range of the row.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// Number of rows a line with `visible_len` chars occupies.
///
/// `limit` is `None` when wrapping is off. An empty line still takes one row.
#[must_use]
pub fn rows_for(visible_len: usize, limit: Option<usize>) -> usize {
    match limit {
        None => 1,
        Some(limit) => visible_len.div_ceil(limit.max(1)).max(1),
    }
}

/// Start offset and length of row `k` (0-based, within the line).
fn row_span(line: &LogicalLine, k: usize, limit: Option<usize>) -> (usize, usize) {
    let Some(limit) = limit else {
        return (line.start, line.len);
    };
    let rows = rows_for(line.visible_len, Some(limit));
    let first = k * limit;
    let end = if k + 1 >= rows {
        line.len
    } else {
        ((k + 1) * limit).min(line.visible_len)
    };
    (line.start + first, end - first)
}

/// Split `text` into logical lines on `separator`.
///
/// Concatenating the returned slices reproduces `text`. The run after the
/// last separator is always returned, so the result is never empty.
///
/// ```
/// use console_buffer::text::split_lines;
///
/// assert_eq!(split_lines("a\nb", "\n"), vec!["a\n", "b"]);
/// assert_eq!(split_lines("a\n", "\n"), vec!["a\n", ""]);
/// ```
#[must_use]
pub fn split_lines<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return vec![text];
    }
    let mut out: Vec<&str> = text.split_inclusive(separator).collect();
    if out.last().is_none_or(|last| last.ends_with(separator)) {
        out.push("");
    }
    out
}

/// Line spans and cumulative row counts for one content/layout pair.
#[derive(Clone, Debug)]
pub struct LineIndex {
    lines: Vec<LogicalLine>,
    /// Rows before each line; `first_rows[i]` is the 0-based global row of
    /// line `i`'s first row.
    first_rows: Vec<usize>,
    total_rows: usize,
    limit: Option<usize>,
    separator: Vec<char>,
}

impl LineIndex {
    /// Build the index for `content` from scratch.
    #[must_use]
    pub fn build(content: &RawContent, separator: &str, limit: Option<usize>) -> Self {
        let mut index = Self {
            lines: Vec::new(),
            first_rows: Vec::new(),
            total_rows: 0,
            limit,
            separator: separator.chars().collect(),
        };
        index.scan_from(content, 0);
        index.relayout_from(0);
        index
    }

    /// Refresh after content changed at or after `first_changed`.
    ///
    /// Lines that end with a complete separator before the change are kept
    /// as is; the rest of the content is rescanned.
    pub fn rescan(&mut self, content: &RawContent, first_changed: usize) {
        let keep = self
            .lines
            .partition_point(|line| line.has_separator() && line.end() <= first_changed);
        self.lines.truncate(keep);
        self.first_rows.truncate(keep);
        let from = self.lines.last().map_or(0, LogicalLine::end);
        self.scan_from(content, from);
        self.relayout_from(keep);
    }

    /// Change the wrap limit (`None` disables wrapping) and recount rows.
    ///
    /// Line spans do not depend on wrapping, so only row counts change.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
        self.first_rows.clear();
        self.relayout_from(0);
    }

    fn scan_from(&mut self, content: &RawContent, from: usize) {
        let sep_len = self.separator.len();
        // Each window entry carries the end of the line's visible text as it
        // stood before that char, so a match knows where the text stopped.
        let mut recent: VecDeque<(char, usize)> = VecDeque::with_capacity(sep_len + 1);
        let mut line_start = from;
        let mut text_end = from;
        let mut pos = from;

        for ch in content.chars_at(from) {
            recent.push_back((ch, text_end));
            pos += 1;
            if !ch.is_whitespace() {
                text_end = pos;
            }
            if recent.len() > sep_len {
                recent.pop_front();
            }
            let matched = sep_len > 0
                && recent.len() == sep_len
                && recent.iter().map(|&(c, _)| c).eq(self.separator.iter().copied());
            if matched {
                // Whitespace before the separator (the `\r` of CRLF output)
                // rides on the final row with the separator.
                let visible_end = recent.front().map_or(line_start, |&(_, end)| end);
                self.lines.push(LogicalLine {
                    start: line_start,
                    len: pos - line_start,
                    visible_len: visible_end - line_start,
                });
                line_start = pos;
                text_end = pos;
                recent.clear();
            }
        }

        self.lines.push(LogicalLine {
            start: line_start,
            len: pos - line_start,
            visible_len: pos - line_start,
        });
    }

    fn relayout_from(&mut self, first_line: usize) {
        let mut rows = if first_line == 0 {
            0
        } else {
            let prev = &self.lines[first_line - 1];
            self.first_rows[first_line - 1] + rows_for(prev.visible_len, self.limit)
        };
        for line in &self.lines[first_line..] {
            self.first_rows.push(rows);
            rows += rows_for(line.visible_len, self.limit);
        }
        self.total_rows = rows;
    }

    /// Wrap limit in effect, `None` when wrapping is off.
    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Total chars covered by the index.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.lines.last().map_or(0, LogicalLine::end)
    }

    /// Number of logical lines (always at least one).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total number of wrap rows.
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// All logical lines in document order.
    #[must_use]
    pub fn lines(&self) -> &[LogicalLine] {
        &self.lines
    }

    /// Number of rows line `line` occupies.
    #[must_use]
    pub fn rows_in_line(&self, line: usize) -> Option<usize> {
        self.lines
            .get(line)
            .map(|l| rows_for(l.visible_len, self.limit))
    }

    /// Look up a row by its 1-based global number.
    pub fn row(&self, row: usize) -> Result<WrapRow> {
        if row == 0 || row > self.total_rows {
            return Err(Error::RowOutOfRange {
                row,
                total: self.total_rows,
            });
        }
        let zero_based = row - 1;
        let line = self.first_rows.partition_point(|&first| first <= zero_based) - 1;
        Ok(self.make_row(line, zero_based - self.first_rows[line]))
    }

    fn make_row(&self, line: usize, k: usize) -> WrapRow {
        let (start, len) = row_span(&self.lines[line], k, self.limit);
        WrapRow {
            row: self.first_rows[line] + k + 1,
            line,
            start,
            len,
        }
    }

    /// Visual `(col, row)` of `index`; row is 1-based.
    ///
    /// Rows are half-open: an offset on a row boundary belongs to the later
    /// row, and the end-of-buffer offset belongs to the last row.
    pub fn position_of(&self, index: usize) -> Result<(usize, usize)> {
        let len = self.len_chars();
        if index > len {
            return Err(Error::InvalidIndex { index, len });
        }
        let line_idx = self.lines.partition_point(|line| line.start <= index) - 1;
        let line = &self.lines[line_idx];
        let offset = index - line.start;
        let (k, col) = match self.limit {
            None => (0, offset),
            Some(limit) => {
                let last = rows_for(line.visible_len, self.limit) - 1;
                let k = (offset / limit).min(last);
                (k, offset - k * limit)
            }
        };
        Ok((col, self.first_rows[line_idx] + k + 1))
    }

    /// Offset at visual `(col, row)`, with `col` clamped to the row length.
    pub fn offset_of(&self, col: usize, row: usize) -> Result<usize> {
        let row = self.row(row)?;
        Ok(row.start + col.min(row.len))
    }

    /// Iterate all rows in document order.
    #[must_use]
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            index: self,
            line: 0,
            k: 0,
            remaining: self.total_rows,
        }
    }
}

/// Iterator over the wrap rows of a [`LineIndex`].
///
/// Each call to [`LineIndex::rows`] starts a fresh, independent iteration.
#[derive(Clone, Debug)]
pub struct Rows<'a> {
    index: &'a LineIndex,
    line: usize,
    k: usize,
    remaining: usize,
}

impl Iterator for Rows<'_> {
    type Item = WrapRow;

    fn next(&mut self) -> Option<WrapRow> {
        if self.remaining == 0 {
            return None;
        }
        let row = self.index.make_row(self.line, self.k);
        self.remaining -= 1;
        self.k += 1;
        if self.index.rows_in_line(self.line).is_some_and(|n| self.k >= n) {
            self.line += 1;
            self.k = 0;
        }
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}

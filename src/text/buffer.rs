//! Console text buffer with wrapping and cursor mapping.
//!
//! [`ConsoleBuffer`] is the one object a console widget talks to. The
//! transport side appends device output; the rendering and pointer side ask
//! for rows, coordinates and the selected text.

use crate::error::{Error, Result};
use crate::event::{
    EVENT_APPEND, EVENT_LAYOUT, LogLevel, emit_event, emit_log, events_enabled, logging_enabled,
};
use crate::text::content::{AppendSummary, RawContent};
use crate::text::lines::{LineIndex, LogicalLine, Rows, WrapRow};
use crate::text::mapper::{CacheStats, CoordinateMapper};
use crate::text::options::LayoutOptions;
use crate::text::selection::SelectionRange;
use std::fmt;
use std::ops::Range;

/// Growing console text with line/row layout and a selection.
///
/// Offsets are char indices into the normalized content. Rows are numbered
/// from 1 in document order across all logical lines.
///
/// The line index is refreshed on every mutation and layout change, and the
/// coordinate caches are cleared at the same time, so queries never see a
/// stale layout.
///
/// # Examples
///
/// ```
/// use console_buffer::ConsoleBuffer;
///
/// let mut buffer = ConsoleBuffer::new();
/// buffer.set_layout(true, 5).unwrap();
/// buffer.append("Hello World");
///
/// assert_eq!(buffer.total_rows(), 3);
/// assert_eq!(buffer.row_content(2).unwrap(), " Worl");
/// assert_eq!(buffer.index_to_cursor(7).unwrap(), (2, 2));
/// assert_eq!(buffer.cursor_to_index(2, 2).unwrap(), 7);
/// ```
#[derive(Clone, Debug)]
pub struct ConsoleBuffer {
    content: RawContent,
    options: LayoutOptions,
    lines: LineIndex,
    mapper: CoordinateMapper,
    selection: SelectionRange,
    revision: u64,
    wide_warned: bool,
}

impl Default for ConsoleBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleBuffer {
    /// Create an empty buffer with default layout options.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(RawContent::new(), LayoutOptions::default())
    }

    /// Create a buffer with initial text (backspaces applied).
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self::from_parts(RawContent::from_text(text), LayoutOptions::default())
    }

    /// Create an empty buffer with the given layout options.
    pub fn with_options(options: LayoutOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::from_parts(RawContent::new(), options))
    }

    fn from_parts(content: RawContent, options: LayoutOptions) -> Self {
        let lines = LineIndex::build(&content, &options.line_separator, options.effective_limit());
        Self {
            content,
            options,
            lines,
            mapper: CoordinateMapper::new(),
            selection: SelectionRange::default(),
            revision: 0,
            wide_warned: false,
        }
    }

    /// New buffer holding this content followed by `text`.
    ///
    /// Layout options and the selection carry over; the selection is pulled
    /// back if backspaces in `text` shorten the content.
    #[must_use]
    pub fn concat(&self, text: &str) -> Self {
        let mut copy = self.clone();
        copy.append(text);
        copy
    }

    /// New buffer holding `text` followed by this content.
    ///
    /// Layout options carry over. The selection moves with the text it
    /// covered. Backspaces in `text` never reach into this content.
    #[must_use]
    pub fn prepend(&self, text: &str) -> Self {
        let mut content = RawContent::from_text(text);
        let shift = content.len_chars();
        content.append(&self.content.to_string());
        let mut copy = Self::from_parts(content, self.options.clone());
        copy.selection = self.selection.shifted(shift);
        copy
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Append device output, applying backspaces across the boundary.
    pub fn append(&mut self, text: &str) -> AppendSummary {
        let summary = self.content.append(text);

        if summary.changed() {
            self.lines.rescan(&self.content, summary.first_changed);
            self.selection.clamp_to(self.content.len_chars());
            self.revision = self.revision.wrapping_add(1);
        }
        self.mapper.invalidate();

        if summary.stray_backspaces > 0 && logging_enabled() {
            emit_log(
                LogLevel::Debug,
                &format!(
                    "dropped {} backspace(s) with no preceding character",
                    summary.stray_backspaces
                ),
            );
        }
        if self.content.has_wide_chars() && !self.wide_warned {
            self.wide_warned = true;
            emit_log(
                LogLevel::Warn,
                "buffer contains multi-column characters; wrap counts one column per char",
            );
        }
        if events_enabled() {
            emit_event(
                EVENT_APPEND,
                &format!(
                    "inserted={} erased={} lines={} rows={}",
                    summary.inserted,
                    summary.erased,
                    self.lines.line_count(),
                    self.lines.total_rows()
                ),
            );
        }

        summary
    }

    /// Enable or disable wrapping.
    pub fn set_wrap(&mut self, wrap: bool) {
        self.options.wrap = wrap;
        self.relayout();
    }

    /// Set the wrap limit. Fails if `limit` is zero.
    pub fn set_wrap_limit(&mut self, limit: usize) -> Result<()> {
        if limit == 0 {
            return Err(Error::InvalidWrapLimit(limit));
        }
        self.options.wrap_limit = limit;
        self.relayout();
        Ok(())
    }

    /// Set wrap flag and limit together.
    ///
    /// Both are validated before either is stored, so the buffer never holds
    /// one new value alongside one old one.
    pub fn set_layout(&mut self, wrap: bool, limit: usize) -> Result<()> {
        if limit == 0 {
            return Err(Error::InvalidWrapLimit(limit));
        }
        self.options.wrap = wrap;
        self.options.wrap_limit = limit;
        self.relayout();
        Ok(())
    }

    /// Change the line separator and re-split the content.
    pub fn set_line_separator(&mut self, separator: &str) -> Result<()> {
        if separator.is_empty() {
            return Err(Error::InvalidSeparator);
        }
        self.options.line_separator = separator.to_string();
        self.rebuild();
        Ok(())
    }

    /// Replace all layout options at once.
    pub fn set_options(&mut self, options: LayoutOptions) -> Result<()> {
        options.validate()?;
        let resplit = options.line_separator != self.options.line_separator;
        self.options = options;
        if resplit {
            self.rebuild();
        } else {
            self.relayout();
        }
        Ok(())
    }

    fn relayout(&mut self) {
        self.lines.set_limit(self.options.effective_limit());
        self.mapper.invalidate();
        self.emit_layout();
    }

    fn rebuild(&mut self) {
        self.lines = LineIndex::build(
            &self.content,
            &self.options.line_separator,
            self.options.effective_limit(),
        );
        self.mapper.invalidate();
        self.emit_layout();
    }

    fn emit_layout(&self) {
        if logging_enabled() {
            emit_log(
                LogLevel::Debug,
                &format!(
                    "layout wrap={} limit={} -> {} rows",
                    self.options.wrap,
                    self.options.wrap_limit,
                    self.lines.total_rows()
                ),
            );
        }
        if events_enabled() {
            emit_event(
                EVENT_LAYOUT,
                &format!(
                    "wrap={} limit={} rows={}",
                    self.options.wrap,
                    self.options.wrap_limit,
                    self.lines.total_rows()
                ),
            );
        }
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Current layout options.
    #[must_use]
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Whether wrapping is on.
    #[must_use]
    pub fn wrap(&self) -> bool {
        self.options.wrap
    }

    /// Wrap limit (kept even while wrapping is off).
    #[must_use]
    pub fn wrap_limit(&self) -> usize {
        self.options.wrap_limit
    }

    // ------------------------------------------------------------------
    // Content queries
    // ------------------------------------------------------------------

    /// Get the number of characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.content.len_chars()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Text in the char range `range`.
    ///
    /// A reversed range yields an empty string; an end past the buffer is an
    /// error.
    pub fn text(&self, range: Range<usize>) -> Result<String> {
        let len = self.len_chars();
        if range.end > len {
            return Err(Error::InvalidIndex {
                index: range.end,
                len,
            });
        }
        if range.start >= range.end {
            return Ok(String::new());
        }
        Ok(self.content.slice(range).unwrap_or_default())
    }

    /// Whether `needle` occurs in the content, e.g. a device prompt.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.content.contains(needle)
    }

    /// Buffer revision; increments whenever the content changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether any appended char is wider or narrower than one column.
    ///
    /// Layout still counts one column per char.
    #[must_use]
    pub fn has_wide_chars(&self) -> bool {
        self.content.has_wide_chars()
    }

    /// Number of logical lines (an empty buffer has one).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    /// Iterate logical line texts, separators included.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.lines
            .lines()
            .iter()
            .map(|line| self.content.slice(line.range()).unwrap_or_default())
    }

    /// Iterate logical line spans.
    pub fn line_spans(&self) -> std::slice::Iter<'_, LogicalLine> {
        self.lines.lines().iter()
    }

    /// Iterate wrap rows in document order.
    #[must_use]
    pub fn rows(&self) -> Rows<'_> {
        self.lines.rows()
    }

    // ------------------------------------------------------------------
    // Row and coordinate queries
    // ------------------------------------------------------------------

    /// Total number of wrap rows.
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.lines.total_rows()
    }

    /// Row by 1-based global number.
    pub fn row(&self, row: usize) -> Result<WrapRow> {
        self.lines.row(row)
    }

    /// Text of a row by 1-based global number.
    pub fn row_content(&self, row: usize) -> Result<String> {
        let row = self.lines.row(row)?;
        Ok(self.content.slice(row.range()).unwrap_or_default())
    }

    /// Offset of visual position `(col, row)`.
    ///
    /// `row` is 1-based; `col` is clamped to the row's length but must not
    /// be negative.
    pub fn cursor_to_index(&self, col: isize, row: usize) -> Result<usize> {
        self.mapper.cursor_to_index(&self.lines, col, row)
    }

    /// Visual `(col, row)` of `index`.
    pub fn index_to_cursor(&self, index: usize) -> Result<(usize, usize)> {
        self.mapper.index_to_cursor(&self.lines, index)
    }

    /// Mapper cache counters.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.mapper.stats()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &SelectionRange {
        &self.selection
    }

    /// Set the selection start. Fails past the end of the buffer.
    pub fn set_selection_start(&mut self, start: usize) -> Result<()> {
        self.check_offset(start)?;
        self.selection.set_start(start);
        Ok(())
    }

    /// Set the selection end. Fails past the end of the buffer.
    pub fn set_selection_end(&mut self, end: usize) -> Result<()> {
        self.check_offset(end)?;
        self.selection.set_end(end);
        Ok(())
    }

    /// Set both selection ends.
    pub fn set_selection(&mut self, start: usize, end: usize) -> Result<()> {
        self.check_offset(start)?;
        self.check_offset(end)?;
        self.selection = SelectionRange::new(start, end);
        Ok(())
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected text, if anything is selected.
    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        let range = self.selection.range()?;
        self.content.slice(range)
    }

    fn check_offset(&self, index: usize) -> Result<()> {
        let len = self.len_chars();
        if index > len {
            return Err(Error::InvalidIndex { index, len });
        }
        Ok(())
    }
}

impl fmt::Display for ConsoleBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.content, f)
    }
}

impl From<&str> for ConsoleBuffer {
    fn from(text: &str) -> Self {
        Self::with_text(text)
    }
}

//! Rope-backed character storage with backspace normalization.

use ropey::Rope;
use ropey::iter::Chars;
use std::borrow::Cow;
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

/// The in-band backspace control code.
pub const BACKSPACE: char = '\u{8}';

/// Apply backspaces in `text`.
///
/// Each backspace deletes itself and the character before it, after any
/// earlier deletions (`"ab\x08\x08c"` becomes `"c"`). A backspace with nothing
/// before it is dropped.
///
/// ```
/// use console_buffer::text::normalize;
///
/// assert_eq!(normalize("ab\u{8}c"), "ac");
/// assert_eq!(normalize("\u{8}x"), "x");
/// ```
#[must_use]
pub fn normalize(text: &str) -> Cow<'_, str> {
    if !text.contains(BACKSPACE) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == BACKSPACE {
            out.pop();
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// What a single append did to the stored content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppendSummary {
    /// Chars added to the end of the content.
    pub inserted: usize,
    /// Chars of pre-existing content removed by backspaces.
    pub erased: usize,
    /// Backspaces that had no character left to delete.
    pub stray_backspaces: usize,
    /// First offset whose character may differ from before the append.
    pub first_changed: usize,
}

impl AppendSummary {
    /// Whether the content changed at all.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.inserted > 0 || self.erased > 0
    }
}

/// Normalized character storage.
///
/// Never contains a backspace. Offsets are char indices.
#[derive(Clone, Debug, Default)]
pub struct RawContent {
    rope: Rope,
    wide_chars: bool,
}

impl RawContent {
    /// Create empty content.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create content from `text`, normalizing it first.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut content = Self::new();
        content.append(text);
        content
    }

    /// Append `text`, applying its backspaces across the append boundary.
    ///
    /// The result is identical to normalizing the old content followed by
    /// `text` as a whole.
    pub fn append(&mut self, text: &str) -> AppendSummary {
        let mut pending = String::with_capacity(text.len());
        let mut erased = 0;
        let mut stray_backspaces = 0;

        for ch in text.chars() {
            if ch != BACKSPACE {
                pending.push(ch);
                continue;
            }
            if pending.pop().is_some() {
                continue;
            }
            // Nothing pending: the backspace reaches into stored content.
            let len = self.rope.len_chars();
            if len == 0 {
                stray_backspaces += 1;
            } else {
                self.rope.remove(len - 1..len);
                erased += 1;
            }
        }

        let first_changed = self.rope.len_chars();
        let inserted = pending.chars().count();
        if !self.wide_chars {
            self.wide_chars = pending.chars().any(is_multi_column);
        }
        if inserted > 0 {
            self.rope.insert(first_changed, &pending);
        }

        AppendSummary {
            inserted,
            erased,
            stray_backspaces,
            first_changed,
        }
    }

    /// Get the number of characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Whether any stored character does not occupy exactly one column.
    #[must_use]
    pub fn has_wide_chars(&self) -> bool {
        self.wide_chars
    }

    /// Copy out a char range. `None` if the range is reversed or out of bounds.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Option<String> {
        self.rope.get_slice(range).map(|s| s.to_string())
    }

    /// Whether `needle` occurs anywhere in the content.
    ///
    /// Borrows the text when the rope is a single chunk.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        Cow::<str>::from(&self.rope).contains(needle)
    }

    /// Iterate chars starting at `char_idx` (clamped to the end).
    pub fn chars_at(&self, char_idx: usize) -> Chars<'_> {
        self.rope.chars_at(char_idx.min(self.rope.len_chars()))
    }
}

impl std::fmt::Display for RawContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

/// Printable chars whose display width is not one column.
///
/// Control codes (separators, tabs) are not counted.
fn is_multi_column(ch: char) -> bool {
    !ch.is_control() && ch.width() != Some(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_borrows_clean_text() {
        assert!(matches!(normalize("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_normalize_stack_semantics() {
        assert_eq!(normalize("ab\u{8}c"), "ac");
        assert_eq!(normalize("ab\u{8}\u{8}c"), "c");
        assert_eq!(normalize("abc\u{8}\u{8}\u{8}"), "");
        assert!(!normalize("x\u{8}\u{8}\u{8}yz\u{8}").contains(BACKSPACE));
    }

    #[test]
    fn test_normalize_leading_backspace_is_noop() {
        assert_eq!(normalize("\u{8}abc"), "abc");
        assert_eq!(normalize("\u{8}\u{8}"), "");
    }

    #[test]
    fn test_append_across_boundary() {
        let mut content = RawContent::from_text("abc");
        let summary = content.append("\u{8}\u{8}X");
        assert_eq!(content.to_string(), "aX");
        assert_eq!(
            summary,
            AppendSummary {
                inserted: 1,
                erased: 2,
                stray_backspaces: 0,
                first_changed: 1,
            }
        );
    }

    #[test]
    fn test_append_matches_whole_normalization() {
        let mut content = RawContent::from_text("hello\nwor");
        content.append("ld\u{8}\u{8}\u{8}\u{8}X");
        assert_eq!(content.to_string(), normalize("hello\nworld\u{8}\u{8}\u{8}\u{8}X"));
        assert_eq!(content.to_string(), "hello\nwX");
    }

    #[test]
    fn test_append_stray_backspace() {
        let mut content = RawContent::new();
        let summary = content.append("\u{8}a");
        assert_eq!(content.to_string(), "a");
        assert_eq!(summary.stray_backspaces, 1);
        assert_eq!(summary.erased, 0);
        assert!(summary.changed());
    }

    #[test]
    fn test_append_noop() {
        let mut content = RawContent::new();
        let summary = content.append("x\u{8}");
        assert!(!summary.changed());
        assert!(content.is_empty());
    }

    #[test]
    fn test_slice_bounds() {
        let content = RawContent::from_text("Hello");
        assert_eq!(content.slice(1..4).as_deref(), Some("ell"));
        assert_eq!(content.slice(0..5).as_deref(), Some("Hello"));
        assert_eq!(content.slice(3..9), None);
    }

    #[test]
    fn test_wide_char_detection() {
        let mut content = RawContent::from_text("ascii\tonly\n");
        assert!(!content.has_wide_chars());
        content.append("你好");
        assert!(content.has_wide_chars());
    }

    #[test]
    fn test_chars_at() {
        let content = RawContent::from_text("abc");
        assert_eq!(content.chars_at(1).collect::<String>(), "bc");
        assert_eq!(content.chars_at(10).count(), 0);
    }
}

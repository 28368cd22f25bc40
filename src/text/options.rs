//! Layout configuration for a console buffer.

use crate::error::{Error, Result};

/// Default wrap limit, in columns.
pub const DEFAULT_WRAP_LIMIT: usize = 80;

/// Default logical line separator.
pub const DEFAULT_LINE_SEPARATOR: &str = "\n";

/// How buffer content is split into lines and rows.
///
/// Wrap flag and wrap limit travel together so that a change to both is
/// applied as one step (see [`ConsoleBuffer::set_layout`]).
///
/// [`ConsoleBuffer::set_layout`]: crate::ConsoleBuffer::set_layout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Split long lines into rows of at most `wrap_limit` chars.
    pub wrap: bool,
    /// Maximum row length when wrapping. Must be at least 1.
    pub wrap_limit: usize,
    /// Token that terminates a logical line. Must not be empty.
    pub line_separator: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            wrap: false,
            wrap_limit: DEFAULT_WRAP_LIMIT,
            line_separator: DEFAULT_LINE_SEPARATOR.to_string(),
        }
    }
}

impl LayoutOptions {
    /// Options with wrapping enabled at `limit` columns.
    #[must_use]
    pub fn wrapped(limit: usize) -> Self {
        Self {
            wrap: true,
            wrap_limit: limit,
            ..Self::default()
        }
    }

    /// Set the wrap flag.
    #[must_use]
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set the wrap limit.
    #[must_use]
    pub fn wrap_limit(mut self, limit: usize) -> Self {
        self.wrap_limit = limit;
        self
    }

    /// Set the line separator.
    #[must_use]
    pub fn line_separator(mut self, separator: impl Into<String>) -> Self {
        self.line_separator = separator.into();
        self
    }

    /// Check the invariants: `wrap_limit >= 1` and a non-empty separator.
    pub fn validate(&self) -> Result<()> {
        if self.wrap_limit == 0 {
            return Err(Error::InvalidWrapLimit(self.wrap_limit));
        }
        if self.line_separator.is_empty() {
            return Err(Error::InvalidSeparator);
        }
        Ok(())
    }

    /// Row limit in effect, or `None` when wrapping is off.
    #[must_use]
    pub(crate) fn effective_limit(&self) -> Option<usize> {
        self.wrap.then_some(self.wrap_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = LayoutOptions::default();
        assert!(!opts.wrap);
        assert_eq!(opts.wrap_limit, 80);
        assert_eq!(opts.line_separator, "\n");
        assert!(opts.validate().is_ok());
        assert_eq!(opts.effective_limit(), None);
    }

    #[test]
    fn test_builder() {
        let opts = LayoutOptions::default()
            .wrap(true)
            .wrap_limit(5)
            .line_separator("\r\n");
        assert_eq!(opts.effective_limit(), Some(5));
        assert_eq!(opts.line_separator, "\r\n");
        assert_eq!(LayoutOptions::wrapped(5).effective_limit(), Some(5));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert_eq!(
            LayoutOptions::wrapped(0).validate(),
            Err(Error::InvalidWrapLimit(0))
        );
        assert_eq!(
            LayoutOptions::default().line_separator("").validate(),
            Err(Error::InvalidSeparator)
        );
    }
}

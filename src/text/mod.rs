//! Console text storage, line layout and coordinate mapping.
//!
//! Content arrives as an append-only stream from a remote device. Backspace
//! control codes in that stream are applied on arrival, so stored content
//! never contains one. The content is split into logical lines on a
//! configurable separator, and each line into one or more wrap rows.
//!
//! Key types:
//!
//! - [`ConsoleBuffer`]: the facade a console widget owns
//! - [`RawContent`]: rope-backed normalized storage
//! - [`LineIndex`]: logical lines and cumulative row counts
//! - [`CoordinateMapper`]: memoized offset <-> `(col, row)` conversion
//! - [`SelectionRange`]: the current selection in offsets
//!
//! One char counts as one column. Double-width glyphs are not accounted for;
//! [`ConsoleBuffer::has_wide_chars`] tells a host when that assumption is
//! broken.
//!
//! # Examples
//!
//! ```
//! use console_buffer::ConsoleBuffer;
//!
//! let mut buffer = ConsoleBuffer::with_text("Hello\nWorld");
//! assert_eq!(buffer.total_rows(), 2);
//! assert_eq!(buffer.cursor_to_index(0, 2).unwrap(), 6);
//!
//! buffer.append("\u{8}\u{8}ms");
//! assert_eq!(buffer.to_string(), "Hello\nWorms");
//! ```

mod buffer;
mod content;
mod lines;
mod mapper;
mod options;
mod selection;

pub use buffer::ConsoleBuffer;
pub use content::{AppendSummary, BACKSPACE, RawContent, normalize};
pub use lines::{LineIndex, LogicalLine, Rows, WrapRow, rows_for, split_lines};
pub use mapper::{CacheStats, CoordinateMapper};
pub use options::{DEFAULT_LINE_SEPARATOR, DEFAULT_WRAP_LIMIT, LayoutOptions};
pub use selection::SelectionRange;

//! `console_buffer` - text layout engine for serial console displays
//!
//! Stores the character stream received from a remote device, applies
//! in-band backspaces, splits the text into logical lines and wrapped rows,
//! and maps between buffer offsets and visual `(col, row)` positions.
//! Rendering, input handling and transport belong to the host.

// Crate-level lint configuration
#![allow(clippy::module_name_repetitions)] // LineIndex in lines, etc.
#![allow(clippy::missing_errors_doc)] // Error variants are documented on the enum
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::must_use_candidate)] // Query methods already carry #[must_use] where it matters

pub mod error;
pub mod event;
pub mod text;

// Re-export core types at crate root
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use text::{
    AppendSummary, CacheStats, ConsoleBuffer, LayoutOptions, LogicalLine, SelectionRange, WrapRow,
};

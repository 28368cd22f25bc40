//! Diagnostic log and event hooks.
//!
//! The buffer has no logger of its own. Hosts that want diagnostics install
//! process-wide callbacks here and forward them to whatever logging stack
//! they use. Without callbacks every emit is a cheap no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};

/// Log level for diagnostic callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Emitted after every [`ConsoleBuffer::append`](crate::ConsoleBuffer::append).
pub const EVENT_APPEND: &str = "buffer.append";
/// Emitted after a layout option change that caused a re-layout.
pub const EVENT_LAYOUT: &str = "buffer.layout";

type EventCallback = Box<dyn Fn(&str, &str) + Send + Sync + 'static>;
type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

static EVENT_INSTALLED: AtomicBool = AtomicBool::new(false);
static LOG_INSTALLED: AtomicBool = AtomicBool::new(false);

fn event_callback() -> &'static Mutex<Option<EventCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<EventCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global event callback. Receives `(name, data)`.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&str, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = event_callback().lock() {
        *guard = Some(Box::new(callback));
        EVENT_INSTALLED.store(true, Ordering::Release);
    }
}

/// Remove the global event callback.
pub fn clear_event_callback() {
    if let Ok(mut guard) = event_callback().lock() {
        *guard = None;
        EVENT_INSTALLED.store(false, Ordering::Release);
    }
}

/// Whether an event callback is installed.
///
/// Callers use this to skip building payload strings nobody will read.
#[must_use]
pub fn events_enabled() -> bool {
    EVENT_INSTALLED.load(Ordering::Acquire)
}

/// Emit an event to the registered callback.
pub fn emit_event(name: &str, data: &str) {
    if !events_enabled() {
        return;
    }
    if let Ok(guard) = event_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(name, data);
        }
    }
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
        LOG_INSTALLED.store(true, Ordering::Release);
    }
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    if let Ok(mut guard) = log_callback().lock() {
        *guard = None;
        LOG_INSTALLED.store(false, Ordering::Release);
    }
}

/// Whether a log callback is installed.
#[must_use]
pub fn logging_enabled() -> bool {
    LOG_INSTALLED.load(Ordering::Acquire)
}

/// Emit a log message.
pub fn emit_log(level: LogLevel, message: &str) {
    if !logging_enabled() {
        return;
    }
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    // Callbacks are process-wide; keep every assertion that installs one
    // inside a single test so parallel tests cannot race on them.
    #[test]
    fn test_callbacks_roundtrip() {
        let events = Arc::new(AtomicUsize::new(0));
        let events_clone = Arc::clone(&events);
        set_event_callback(move |name, data| {
            if name == "test.event" && data == "k=v" {
                events_clone.fetch_add(1, Ordering::SeqCst);
            }
        });
        assert!(events_enabled());
        emit_event("test.event", "k=v");
        assert_eq!(events.load(Ordering::SeqCst), 1);

        let logs = Arc::new(AtomicUsize::new(0));
        let logs_clone = Arc::clone(&logs);
        set_log_callback(move |level, msg| {
            if level == LogLevel::Warn && msg == "hello" {
                logs_clone.fetch_add(1, Ordering::SeqCst);
            }
        });
        emit_log(LogLevel::Warn, "hello");
        assert_eq!(logs.load(Ordering::SeqCst), 1);

        clear_log_callback();
        clear_event_callback();
        assert!(!logging_enabled());
        assert!(!events_enabled());
        emit_log(LogLevel::Warn, "hello");
        emit_event("test.event", "k=v");
        assert_eq!(logs.load(Ordering::SeqCst), 1);
        assert_eq!(events.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }
}

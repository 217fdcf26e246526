#![deny(missing_docs)]
//! Shared logging utilities for the webloc workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every message is
//! prefixed with the position of the shortcut currently being processed, when
//! the pipeline has set one for this thread.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the record currently being processed, as `(index, total)`.
    static RECORD_POSITION: Cell<Option<(usize, usize)>> = const { Cell::new(None) };
}

/// Sets the record position for the current thread.
///
/// `index` is zero-based; it is rendered one-based. Pass `None` between stages
/// so that run-level messages carry no prefix.
pub fn set_record_position(position: Option<(usize, usize)>) {
    RECORD_POSITION.with(|v| v.set(position));
}

/// Retrieves the record position for the current thread, if one is set.
pub fn record_position() -> Option<(usize, usize)> {
    RECORD_POSITION.with(|v| v.get())
}

/// Renders the message prefix for the current record position (`"[3/17] "`), or
/// an empty string when no record is in progress.
pub fn position_prefix() -> String {
    match record_position() {
        Some((index, total)) => format!("[{}/{}] ", index + 1, total),
        None => String::new(),
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!("{}{}", $crate::position_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!("{}{}", $crate::position_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!("{}{}", $crate::position_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!("{}{}", $crate::position_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!("{}{}", $crate::position_prefix(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::{position_prefix, record_position, set_record_position};

    #[test]
    fn prefix_is_empty_without_position() {
        set_record_position(None);
        assert_eq!(position_prefix(), "");
    }

    #[test]
    fn prefix_renders_one_based_position() {
        set_record_position(Some((2, 17)));
        assert_eq!(record_position(), Some((2, 17)));
        assert_eq!(position_prefix(), "[3/17] ");
        set_record_position(None);
    }
}

#![deny(missing_docs)]
//! Shared logging utilities for the list filter workspace.
//!
//! This crate provides the `filter_*` logging macros used across the codebase,
//! a per-thread virtual clock that the session runner advances, and a minimal
//! test initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the session runner's virtual clock, in milliseconds.
    static VIRTUAL_MILLIS: Cell<u64> = const { Cell::new(0) };
}

/// Sets the virtual clock for the current thread.
/// The session runner calls this every time it advances its timer queue.
pub fn set_virtual_millis(millis: u64) {
    VIRTUAL_MILLIS.with(|v| v.set(millis));
}

/// Retrieves the virtual clock for the current thread.
/// Returns 0 if no runner has advanced time yet.
pub fn virtual_millis() -> u64 {
    VIRTUAL_MILLIS.with(|v| v.get())
}

/// Logs a trace-level message prefixed with the virtual clock.
#[macro_export]
macro_rules! filter_trace {
    ($($arg:tt)*) => {{
        log::trace!("[t+{}ms] {}", $crate::virtual_millis(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message prefixed with the virtual clock.
#[macro_export]
macro_rules! filter_debug {
    ($($arg:tt)*) => {{
        log::debug!("[t+{}ms] {}", $crate::virtual_millis(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message prefixed with the virtual clock.
#[macro_export]
macro_rules! filter_info {
    ($($arg:tt)*) => {{
        log::info!("[t+{}ms] {}", $crate::virtual_millis(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message prefixed with the virtual clock.
#[macro_export]
macro_rules! filter_warn {
    ($($arg:tt)*) => {{
        log::warn!("[t+{}ms] {}", $crate::virtual_millis(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message prefixed with the virtual clock.
#[macro_export]
macro_rules! filter_error {
    ($($arg:tt)*) => {{
        log::error!("[t+{}ms] {}", $crate::virtual_millis(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Trace in debug builds so state machine transitions show up in failing tests.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Trace
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

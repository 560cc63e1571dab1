//! FILENAME: core/parser/src/logging.rs
//! PURPOSE: ENTER/EXIT tracing macros for the formula pipeline.
//! CONTEXT: Messages go through the `log` facade. The category ("LEX",
//! "PARSE", "VALIDATE", "EVAL") is used as the log target so callers can
//! filter per stage. The library never installs a logger.

/// Debug-level ENTER line for a pipeline stage.
#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        ::log::debug!(target: $cat, "ENTER {}", $func)
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        ::log::debug!(target: $cat, "ENTER {} {}", $func, format_args!($($arg)*))
    };
}

/// Debug-level EXIT line for a pipeline stage.
#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        ::log::debug!(target: $cat, "EXIT {}", $func)
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        ::log::debug!(target: $cat, "EXIT {} {}", $func, format_args!($($arg)*))
    };
}

pub use crate::log_enter;
pub use crate::log_exit;

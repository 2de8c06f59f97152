//! Logging facade.
//!
//! The router never talks to a logging backend directly. Every diagnostic
//! goes through the macros below, which forward to the [`log`](https://docs.rs/log)
//! crate or to [`tracing`](https://docs.rs/tracing) depending on the enabled
//! feature. Enable at most one of the two.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! Level conventions used inside the crate:
//!
//! - `trace_log!`: per-node misses while searching the tree.
//! - `debug_log!`: delegation and active-child transitions.
//! - `info_log!`: a resolver action being performed on a surface.
//! - `warn_log!`: dropped requests and unsupported surface operations.
//! - `error_log!`: contract violations (misconfigured tree, defective resolver).
//!
//! ```ignore
//! use surface_navigator::{debug_log, error_log};
//!
//! debug_log!("Router {} activating child {}", parent, child);
//! error_log!("Resolver returned no action for '{}'", identifier);
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __emit_log {
    ($level:ident, $($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
    };
}

/// Trace-level event.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => { $crate::__emit_log!(trace, $($arg)*); };
}

#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => { $crate::__emit_log!(debug, $($arg)*); };
}

#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => { $crate::__emit_log!(info, $($arg)*); };
}

#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => { $crate::__emit_log!(warn, $($arg)*); };
}

/// Error-level event. Contract violations land here before
/// [`RouterOptions::strict_contracts`](crate::RouterOptions::strict_contracts)
/// decides whether to panic.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => { $crate::__emit_log!(error, $($arg)*); };
}

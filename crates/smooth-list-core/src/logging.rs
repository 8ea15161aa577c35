//! Logging facilities for smooth-list.
//!
//! smooth-list uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("smooth_list=debug")
//!     .init();
//! ```
//!
//! Every subsystem logs under its own target (see [`targets`]) so diffing,
//! changeset application and controller events can be filtered separately.

/// Target names for log filtering.
pub mod targets {
    /// Signal emission target.
    pub const SIGNAL: &str = "smooth_list_core::signal";
    /// Snapshot update queue target.
    pub const QUEUE: &str = "smooth_list_core::queue";
    /// Diff engine target.
    pub const DIFF: &str = "smooth_list::diff";
    /// Changeset applier target.
    pub const APPLY: &str = "smooth_list::apply";
    /// List controller target.
    pub const CONTROLLER: &str = "smooth_list::controller";
    /// Public facade target.
    pub const FACADE: &str = "smooth_list::list";
    /// Performance spans.
    pub const PERF: &str = "smooth_list::perf";
}

/// A guard that keeps a performance span entered until dropped.
///
/// ```
/// use smooth_list_core::PerfSpan;
///
/// let _span = PerfSpan::new("diff");
/// // ... timed work ...
/// ```
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a span named after `operation`.
    pub fn new(operation: &'static str) -> Self {
        let span = tracing::info_span!(target: "smooth_list::perf", "perf", operation);
        Self {
            _span: span.entered(),
        }
    }
}

/// Debug-level event under the core target.
#[macro_export]
macro_rules! list_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "smooth_list_core", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        // Just ensure it doesn't panic without a subscriber.
        let _span = PerfSpan::new("test_operation");
        crate::list_debug!(value = 1, "inside span");
    }
}

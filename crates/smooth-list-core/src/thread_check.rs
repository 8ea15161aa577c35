//! UI-thread affinity checks.
//!
//! Diffing, changeset application and every controller mutation run on the
//! UI thread. [`ThreadAffinity`] records the thread an object was created on
//! and verifies later calls happen there.
//!
//! Checks are enabled by default in debug builds only; call
//! [`set_thread_checks_enabled`] to override.
//!
//! ```
//! use smooth_list_core::thread_check::ThreadAffinity;
//!
//! let affinity = ThreadAffinity::current();
//! affinity.debug_assert_same_thread();
//! assert!(affinity.is_same_thread());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::ThreadId;

static THREAD_CHECKS_ENABLED: AtomicBool = AtomicBool::new(cfg!(debug_assertions));

/// Enable or disable runtime thread checks.
pub fn set_thread_checks_enabled(enabled: bool) {
    THREAD_CHECKS_ENABLED.store(enabled, Ordering::SeqCst);
}

/// Check if runtime thread checks are currently enabled.
#[inline]
pub fn are_thread_checks_enabled() -> bool {
    THREAD_CHECKS_ENABLED.load(Ordering::Relaxed)
}

/// The thread an object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl ThreadAffinity {
    /// Bind to the calling thread.
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Returns `true` if the calling thread is the owning thread.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Panic if called from another thread and checks are enabled.
    #[track_caller]
    pub fn assert_same_thread(&self) {
        if are_thread_checks_enabled() && !self.is_same_thread() {
            let location = std::panic::Location::caller();
            panic!(
                "thread affinity violation at {}:{}: owned by {:?}, called from {:?}",
                location.file(),
                location.line(),
                self.thread_id,
                std::thread::current().id()
            );
        }
    }

    /// Like [`assert_same_thread`](Self::assert_same_thread), debug builds only.
    #[inline]
    #[track_caller]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_thread() {
        let affinity = ThreadAffinity::current();
        assert!(affinity.is_same_thread());
        affinity.assert_same_thread();
    }

    #[test]
    fn test_other_thread_detected() {
        let affinity = ThreadAffinity::current();
        let same = std::thread::spawn(move || affinity.is_same_thread())
            .join()
            .unwrap();
        assert!(!same);
    }
}

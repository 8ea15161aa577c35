//! Reactive properties with change detection.
//!
//! A [`Property<T>`] stores one value and reports whether a write actually
//! changed it. Lists use properties for the caller-visible bindings that are
//! not structural data: the search text, the scroll-to-top trigger, the
//! presentation style.
//!
//! [`EdgeTrigger`] builds on a boolean property to turn a flag flip into a
//! single event, the way the scroll-to-top command works.
//!
//! # Example
//!
//! ```
//! use smooth_list_core::Property;
//!
//! let search_text = Property::new(String::new());
//! assert!(search_text.set("emp 1".to_string()));
//! assert!(!search_text.set("emp 1".to_string()));
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value cell that tracks changes.
///
/// `set()` compares the new value with the current one and returns `true`
/// only when it differs, so callers emit change notifications exactly once
/// per real change.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if it changed.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }

    /// Set the value, returning the previous value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &*self.value.read())
            .finish()
    }
}

/// Turns flips of a boolean flag into one-shot events.
///
/// The trigger fires when the observed flag goes from `false` to `true`, and
/// re-arms only after the flag has been observed `false` again. Observing
/// the same `true` value twice fires once.
///
/// ```
/// use smooth_list_core::EdgeTrigger;
///
/// let trigger = EdgeTrigger::new();
/// assert!(trigger.observe(true));
/// assert!(!trigger.observe(true));
/// assert!(!trigger.observe(false));
/// assert!(trigger.observe(true));
/// ```
#[derive(Debug, Default)]
pub struct EdgeTrigger {
    last: Property<bool>,
}

impl EdgeTrigger {
    /// Create a trigger whose last observed value is `false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the flag, returning `true` on a rising edge.
    pub fn observe(&self, value: bool) -> bool {
        self.last.replace(value) == Some(false)
    }

    /// The last observed value.
    pub fn last(&self) -> bool {
        self.last.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_text_changes_once() {
        let text = Property::new(String::new());
        assert!(text.set("emp".to_string()));
        assert!(!text.set("emp".to_string()));
        assert_eq!(text.replace("emp 2".to_string()).as_deref(), Some("emp"));
        assert_eq!(text.replace("emp 2".to_string()), None);
        assert_eq!(text.get(), "emp 2");
    }

    #[test]
    fn test_with_borrows_the_value() {
        let titles = Property::new(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(titles.with(|t| t.join(",")), "A,B");
    }

    #[test]
    fn test_edge_trigger_fires_once_per_flip() {
        let trigger = EdgeTrigger::new();
        let fired: Vec<bool> = [false, true, true, false, false, true]
            .into_iter()
            .map(|v| trigger.observe(v))
            .collect();
        assert_eq!(fired, vec![false, true, false, false, false, true]);
        assert!(trigger.last());
    }
}

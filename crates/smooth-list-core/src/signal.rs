//! Signal/slot callbacks for list events.
//!
//! A [`Signal<Args>`] is the hook a list exposes for one kind of event
//! (load-more, refresh, row deleted, search text changed). Callers connect
//! slots (closures); the list emits the signal and every connected slot runs
//! synchronously on the emitting thread.
//!
//! The list pipeline is single-threaded and driven by the UI event loop, so
//! there is no queued delivery: a slot that wants to do asynchronous work
//! spawns it itself and hands the result back through an
//! [`UpdateSender`](crate::queue::UpdateSender).
//!
//! # Re-entrancy
//!
//! Emission snapshots the connected slots before invoking them, so a slot may
//! connect or disconnect slots (on this or any other signal) while running.
//! Changes made during an emission take effect from the next emission.
//!
//! # Example
//!
//! ```
//! use smooth_list_core::Signal;
//!
//! let load_more = Signal::<()>::new();
//! let conn_id = load_more.connect(|_| println!("fetch next page"));
//!
//! load_more.emit(());
//! load_more.disconnect(conn_id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Identifier of a slot connected to a [`Signal`].
    ///
    /// Pass it to [`Signal::disconnect`] to remove the slot. It stays valid
    /// until the slot is disconnected or the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe event hook with any number of connected slots.
///
/// # Type Parameter
///
/// - `Args`: the payload handed to every slot. Use `()` for events without a
///   payload, or a tuple/struct for richer events.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a signal with no connections.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot to this signal.
    ///
    /// Returns a [`ConnectionId`] that can be used to disconnect the slot.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Arc::new(slot))
    }

    /// Connect a slot that is disconnected when the returned guard drops.
    ///
    /// # Example
    ///
    /// ```
    /// use smooth_list_core::Signal;
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    ///
    /// let refresh = Signal::<()>::new();
    /// let count = Arc::new(AtomicUsize::new(0));
    /// {
    ///     let count = count.clone();
    ///     let _guard = refresh.connect_scoped(move |_| {
    ///         count.fetch_add(1, Ordering::SeqCst);
    ///     });
    ///     refresh.emit(());
    /// }
    /// refresh.emit(());
    /// assert_eq!(count.load(Ordering::SeqCst), 1);
    /// ```
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard { signal: self, id }
    }

    /// Disconnect a slot by its connection ID.
    ///
    /// Returns `true` if the connection existed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// Disconnect every slot.
    pub fn disconnect_all(&self) {
        self.slots.lock().clear();
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Returns `true` if at least one slot is connected.
    pub fn is_connected(&self) -> bool {
        !self.slots.lock().is_empty()
    }

    /// Block or unblock emission.
    ///
    /// While blocked, [`emit`](Self::emit) does nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check whether emission is blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking every connected slot in connection order.
    ///
    /// Returns the number of slots that ran (0 when blocked).
    #[tracing::instrument(skip_all, target = "smooth_list_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) -> usize {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return 0;
        }

        // Release the lock before running slots so they can reconnect.
        let slots: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, slot_count = slots.len(), "emitting signal");

        for slot in &slots {
            slot(&args);
        }
        slots.len()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.slots.lock().len())
            .field("blocked", &self.blocked.load(Ordering::Relaxed))
            .finish()
    }
}

/// A connection that disconnects itself when dropped.
///
/// Created by [`Signal::connect_scoped`].
pub struct ConnectionGuard<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args: 'static> ConnectionGuard<'_, Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: 'static> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        self.signal.disconnect(self.id);
    }
}

impl<Args: 'static> std::fmt::Debug for ConnectionGuard<'_, Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGuard").field("id", &self.id).finish()
    }
}

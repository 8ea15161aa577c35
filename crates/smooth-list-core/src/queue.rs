//! Ordered delivery of snapshots back onto the UI thread.
//!
//! Load-more and refresh handlers may fetch data off the UI thread. They hand
//! the resulting snapshot to an [`UpdateSender`]; the UI thread drains the
//! paired [`UpdateQueue`] and processes every snapshot in arrival order.
//!
//! Snapshots are never coalesced: ten sends produce ten deliveries. Callers
//! that produce updates faster than they want animated should debounce on
//! their side.
//!
//! ```
//! use smooth_list_core::UpdateQueue;
//!
//! let queue = UpdateQueue::<u32>::new();
//! let sender = queue.sender();
//! std::thread::spawn(move || {
//!     sender.send(1).unwrap();
//!     sender.send(2).unwrap();
//! })
//! .join()
//! .unwrap();
//!
//! let mut seen = Vec::new();
//! queue.drain(|value| seen.push(value));
//! assert_eq!(seen, vec![1, 2]);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};

use crate::error::{Error, Result};
use crate::logging::targets;

/// Sequence number stamped on each queued update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UpdateId(u64);

impl UpdateId {
    /// Get the raw u64 value of this update ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Cloneable, `Send` handle for posting updates to an [`UpdateQueue`].
#[derive(Debug)]
pub struct UpdateSender<T> {
    tx: Sender<(UpdateId, T)>,
    next_id: Arc<AtomicU64>,
}

impl<T> Clone for UpdateSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            next_id: self.next_id.clone(),
        }
    }
}

impl<T> UpdateSender<T> {
    /// Post an update.
    ///
    /// Fails with [`Error::Disconnected`] once the receiving queue was closed
    /// or dropped (the list was torn down); the value is dropped in that
    /// case.
    pub fn send(&self, value: T) -> Result<UpdateId> {
        let id = UpdateId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.tx.send((id, value)).map_err(|_| Error::Disconnected)?;
        tracing::trace!(target: targets::QUEUE, update = id.0, "update posted");
        Ok(id)
    }
}

/// The UI-thread side of the update channel.
#[derive(Debug)]
pub struct UpdateQueue<T> {
    rx: Receiver<(UpdateId, T)>,
    tx: Sender<(UpdateId, T)>,
    next_id: Arc<AtomicU64>,
}

impl<T> Default for UpdateQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> UpdateQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            rx,
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// A new sender for this queue.
    pub fn sender(&self) -> UpdateSender<T> {
        UpdateSender {
            tx: self.tx.clone(),
            next_id: self.next_id.clone(),
        }
    }

    /// Number of updates waiting to be processed.
    pub fn pending_count(&self) -> usize {
        self.rx.len()
    }

    /// Check if any update is waiting.
    pub fn has_pending(&self) -> bool {
        !self.rx.is_empty()
    }

    /// Take the oldest pending update, if any.
    pub fn try_next(&self) -> Option<(UpdateId, T)> {
        match self.rx.try_recv() {
            Ok(entry) => Some(entry),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Disconnects every sender and drops the updates still pending.
    ///
    /// Later sends, from existing senders or ones taken after closing, fail
    /// with [`Error::Disconnected`]. Returns the number of updates dropped.
    pub fn close(&mut self) -> usize {
        let dropped = self.rx.len();
        let (_, rx) = unbounded();
        let (tx, _) = unbounded();
        self.rx = rx;
        self.tx = tx;
        tracing::debug!(target: targets::QUEUE, dropped, "update queue closed");
        dropped
    }

    /// Process every pending update in arrival order.
    ///
    /// Updates posted by `handler` itself are processed in the same call,
    /// after the ones already queued. Returns the number processed.
    pub fn drain<F>(&self, mut handler: F) -> usize
    where
        F: FnMut(T),
    {
        let mut count = 0;
        while let Some((id, value)) = self.try_next() {
            tracing::trace!(target: targets::QUEUE, update = id.0, "processing update");
            handler(value);
            count += 1;
        }
        count
    }
}

//! Recycled containers for rendered cell, header and footer content.

use std::collections::HashMap;
use std::fmt;

/// The structurally distinct kinds of container the list recycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReuseIdentifier {
    Cell,
    SectionHeader,
    SectionFooter,
}

impl fmt::Display for ReuseIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell => f.write_str("cell"),
            Self::SectionHeader => f.write_str("section-header"),
            Self::SectionFooter => f.write_str("section-footer"),
        }
    }
}

/// A recyclable container hosting rendered content of type `V`.
#[derive(Debug)]
pub struct HostedView<V> {
    serial: u64,
    reuse_id: ReuseIdentifier,
    content: Option<V>,
    configure_count: usize,
}

impl<V> HostedView<V> {
    fn new(serial: u64, reuse_id: ReuseIdentifier) -> Self {
        Self {
            serial,
            reuse_id,
            content: None,
            configure_count: 0,
        }
    }

    /// Identifies the container itself, stable across reuse.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn reuse_id(&self) -> ReuseIdentifier {
        self.reuse_id
    }

    /// The hosted content, if configured.
    pub fn content(&self) -> Option<&V> {
        self.content.as_ref()
    }

    /// How many times this container has been configured.
    pub fn configure_count(&self) -> usize {
        self.configure_count
    }

    /// Replace the hosted content.
    pub fn configure(&mut self, content: V) {
        self.content = Some(content);
        self.configure_count += 1;
    }

    fn prepare_for_reuse(&mut self) {
        self.content = None;
    }
}

/// Per-identifier free lists of containers.
///
/// Containers are only allocated when the free list of their identifier is
/// empty.
#[derive(Debug)]
pub struct ReusePool<V> {
    free: HashMap<ReuseIdentifier, Vec<HostedView<V>>>,
    next_serial: u64,
}

impl<V> Default for ReusePool<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ReusePool<V> {
    pub fn new() -> Self {
        Self {
            free: HashMap::new(),
            next_serial: 0,
        }
    }

    /// Take a free container, allocating one if none is available.
    pub fn dequeue(&mut self, reuse_id: ReuseIdentifier) -> HostedView<V> {
        if let Some(view) = self.free.get_mut(&reuse_id).and_then(Vec::pop) {
            return view;
        }
        let serial = self.next_serial;
        self.next_serial += 1;
        HostedView::new(serial, reuse_id)
    }

    /// Return a container to its free list.
    pub fn enqueue(&mut self, mut view: HostedView<V>) {
        view.prepare_for_reuse();
        self.free.entry(view.reuse_id).or_default().push(view);
    }

    /// Number of containers ever allocated.
    pub fn allocated(&self) -> usize {
        self.next_serial as usize
    }

    /// Number of free containers for `reuse_id`.
    pub fn available(&self, reuse_id: ReuseIdentifier) -> usize {
        self.free.get(&reuse_id).map_or(0, Vec::len)
    }

    /// Drop every free container.
    pub fn clear(&mut self) {
        self.free.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reuse_before_allocating() {
        let mut pool: ReusePool<String> = ReusePool::new();
        let mut view = pool.dequeue(ReuseIdentifier::Cell);
        view.configure("a".to_string());
        let serial = view.serial();
        pool.enqueue(view);

        assert_eq!(pool.available(ReuseIdentifier::Cell), 1);
        let view = pool.dequeue(ReuseIdentifier::Cell);
        assert_eq!(view.serial(), serial);
        assert!(view.content().is_none());
        assert_eq!(view.configure_count(), 1);
        assert_eq!(pool.allocated(), 1);
    }

    #[test]
    fn test_identifiers_do_not_share_containers() {
        let mut pool: ReusePool<()> = ReusePool::new();
        let header = pool.dequeue(ReuseIdentifier::SectionHeader);
        pool.enqueue(header);
        let cell = pool.dequeue(ReuseIdentifier::Cell);
        assert_eq!(cell.reuse_id(), ReuseIdentifier::Cell);
        assert_eq!(pool.allocated(), 2);
        assert_eq!(ReuseIdentifier::SectionFooter.to_string(), "section-footer");
    }
}

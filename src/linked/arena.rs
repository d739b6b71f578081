//! Index-linked node storage.
//!
//! Nodes live in a `Vec` of slots and point at their neighbours by slot
//! number instead of by reference, which keeps the doubly-linked sequence
//! free of `unsafe` while still giving O(1) append and O(1) unlink.
//! Vacated slots are threaded onto a free list and reused by later pushes.

use std::mem;

/// Handle to a node in a [`NodeArena`].
///
/// A handle stays valid until the node it names is unlinked or the arena is
/// cleared; the slot may then be reused for an unrelated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeIndex(usize);

impl NodeIndex {
    #[inline]
    pub(crate) const fn new(slot: usize) -> Self {
        Self(slot)
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self.0
    }
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) previous: Option<NodeIndex>,
    pub(crate) next: Option<NodeIndex>,
}

#[derive(Clone)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

/// Doubly-linked sequence of values stored in a slot arena.
#[derive(Clone)]
pub(crate) struct NodeArena<T> {
    slots: Vec<Slot<T>>,
    head: Option<NodeIndex>,
    tail: Option<NodeIndex>,
    free: Option<usize>,
    length: usize,
}

impl<T> NodeArena<T> {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: None,
            tail: None,
            free: None,
            length: 0,
        }
    }

    #[inline]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub(crate) const fn head(&self) -> Option<NodeIndex> {
        self.head
    }

    #[inline]
    pub(crate) const fn tail(&self) -> Option<NodeIndex> {
        self.tail
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[inline]
    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    /// Returns the node at `index`, or `None` if the slot is vacant.
    #[inline]
    pub(crate) fn node(&self, index: NodeIndex) -> Option<&Node<T>> {
        match self.slots.get(index.slot()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn value(&self, index: NodeIndex) -> Option<&T> {
        self.node(index).map(|node| &node.value)
    }

    #[inline]
    fn node_mut(&mut self, index: NodeIndex) -> Option<&mut Node<T>> {
        match self.slots.get_mut(index.slot()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Appends `value` as the new tail and returns its handle.
    pub(crate) fn push_back(&mut self, value: T) -> NodeIndex {
        let node = Slot::Occupied(Node {
            value,
            previous: self.tail,
            next: None,
        });

        let index = match self.free {
            Some(slot) => {
                let vacated = mem::replace(&mut self.slots[slot], node);
                if let Slot::Vacant { next_free } = vacated {
                    self.free = next_free;
                }
                NodeIndex::new(slot)
            }
            None => {
                self.slots.push(node);
                NodeIndex::new(self.slots.len() - 1)
            }
        };

        match self.tail.and_then(|tail| self.node_mut(tail)) {
            Some(tail) => tail.next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.length += 1;
        index
    }

    /// Detaches the node at `index` from the sequence and returns its value.
    ///
    /// Returns `None` if `index` does not name a live node.
    pub(crate) fn unlink(&mut self, index: NodeIndex) -> Option<T> {
        let slot = self.slots.get_mut(index.slot())?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }

        let Slot::Occupied(node) = mem::replace(
            slot,
            Slot::Vacant {
                next_free: self.free,
            },
        ) else {
            return None;
        };
        self.free = Some(index.slot());

        match node.previous.and_then(|previous| self.node_mut(previous)) {
            Some(previous) => previous.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|next| self.node_mut(next)) {
            Some(next) => next.previous = node.previous,
            None => self.tail = node.previous,
        }

        self.length -= 1;
        if self.length == 0 {
            debug_assert!(self.head.is_none() && self.tail.is_none());
            self.clear();
        }
        Some(node.value)
    }

    /// Drops every node. Retains the allocated capacity.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.tail = None;
        self.free = None;
        self.length = 0;
    }

    /// Removes and returns the head value.
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        self.head.and_then(|head| self.unlink(head))
    }

    /// Removes and returns the tail value.
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        self.tail.and_then(|tail| self.unlink(tail))
    }

    /// Returns a cursor over the sequence from head to tail.
    #[inline]
    pub(crate) fn cursor(&self) -> Cursor<'_, T> {
        Cursor {
            arena: self,
            front: self.head,
            back: self.tail,
            remaining: self.length,
        }
    }
}

/// Borrowing walk over a [`NodeArena`] from both ends.
pub(crate) struct Cursor<'a, T> {
    arena: &'a NodeArena<T>,
    front: Option<NodeIndex>,
    back: Option<NodeIndex>,
    remaining: usize,
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Cursor<'a, T> {
    #[inline]
    pub(crate) fn next_front(&mut self) -> Option<(NodeIndex, &'a T)> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front?;
        let node = self.arena.node(index)?;
        self.front = node.next;
        self.remaining -= 1;
        Some((index, &node.value))
    }

    #[inline]
    pub(crate) fn next_back(&mut self) -> Option<(NodeIndex, &'a T)> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back?;
        let node = self.arena.node(index)?;
        self.back = node.previous;
        self.remaining -= 1;
        Some((index, &node.value))
    }

    #[inline]
    pub(crate) const fn remaining(&self) -> usize {
        self.remaining
    }
}

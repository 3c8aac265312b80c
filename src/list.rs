use crate::{
    errors::ListError,
    handle::{Handle, ListId, NodeRef},
    node::Node,
    restrictor::AccessRestrictor,
};
use core::fmt;
use log::{debug, trace};
use std::collections::HashMap;

/// A doubly linked list with stable handles and read-only navigation.
///
/// The list is the only owner of its nodes and the only code that rewrites
/// their links. Callers see nodes as [`Handle`]s and [`NodeRef`] views and
/// hand them back to target [`append_after`](List::append_after) and
/// [`remove`](List::remove).
pub struct List<T> {
    nodes: HashMap<usize, Node<T>>,
    restrictor: AccessRestrictor,
    next_id: usize,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

/// Iterator over values, head to tail.
pub struct Iter<'a, T> {
    chain: Chain<'a, T>,
}

/// Iterator over `(Handle, &T)`, head to tail.
pub struct IterHandles<'a, T> {
    chain: Chain<'a, T>,
    restrictor: AccessRestrictor,
}

struct Chain<'a, T> {
    nodes: &'a HashMap<usize, Node<T>>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> List<T> {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty list with room for `capacity` nodes before the arena
    /// reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: HashMap::with_capacity(capacity),
            restrictor: AccessRestrictor::new(ListId::next()),
            next_id: 0,
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is the list empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The first node, or `None` if the list is empty.
    pub fn head(&self) -> Option<NodeRef<'_, T>> {
        self.view(self.head)
    }

    /// The last node, or `None` if the list is empty.
    pub fn tail(&self) -> Option<NodeRef<'_, T>> {
        self.view(self.tail)
    }

    /// Resolve a handle to a view of its node, if it is live in this list.
    pub fn get(&self, handle: Handle) -> Option<NodeRef<'_, T>> {
        let id = self.restrictor.grant_access(&self.nodes, handle).ok()?;
        self.view(Some(id))
    }

    /// Mutable access to the payload behind `handle`.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let id = self.restrictor.grant_access(&self.nodes, handle).ok()?;
        self.nodes.get_mut(&id).map(|n| &mut n.data)
    }

    /// Swap in a new payload, returning the old one.
    pub fn replace(&mut self, handle: Handle, data: T) -> Option<T> {
        self.get_mut(handle)
            .map(|slot| std::mem::replace(slot, data))
    }

    /// Is `handle` a live node of this list?
    pub fn contains(&self, handle: Handle) -> bool {
        self.restrictor.grant_access(&self.nodes, handle).is_ok()
    }

    /// Append a value after the current tail. Returns the new element handle.
    pub fn push(&mut self, data: T) -> Handle {
        self.link_after(self.tail, data)
    }

    /// Prepend a value; it becomes the new head.
    pub fn unshift(&mut self, data: T) -> Handle {
        let id = self.alloc_id();
        let old_head = self.head.replace(id);
        match old_head {
            Some(h) => {
                if let Some(n) = self.nodes.get_mut(&h) {
                    n.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.len += 1;
        trace!("linked node {id} before {old_head:?}");
        self.store(Node::with_links(id, data, None, old_head))
    }

    /// Insert a value right after `target`. Returns the new element handle.
    ///
    /// `None` is only a valid target while the list is empty, in which case
    /// the new node becomes both head and tail.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidPosition`] for `None` on a non-empty list,
    /// [`ListError::InvalidHandle`] or [`ListError::ForeignHandle`] if
    /// `target` does not name a live node of this list. The list is left
    /// untouched on error.
    pub fn append_after(
        &mut self,
        target: impl Into<Option<Handle>>,
        data: T,
    ) -> Result<Handle, ListError> {
        let left = match target.into() {
            None if !self.is_empty() => return Err(ListError::InvalidPosition),
            None => None,
            Some(handle) => Some(self.restrictor.grant_access(&self.nodes, handle)?),
        };
        Ok(self.link_after(left, data))
    }

    /// Detach the node behind `target` from the chain.
    ///
    /// Returns `false` without touching the list when `target` is `None`,
    /// already removed, or minted by another list.
    pub fn remove(&mut self, target: impl Into<Option<Handle>>) -> bool {
        let Some(handle) = target.into() else {
            return false;
        };
        match self.restrictor.grant_access(&self.nodes, handle) {
            Ok(id) => self.unlink(id).is_some(),
            Err(_) => false,
        }
    }

    /// Remove an element by handle, returning its value.
    pub fn take(&mut self, handle: Handle) -> Option<T> {
        let id = self.restrictor.grant_access(&self.nodes, handle).ok()?;
        self.unlink(id).map(|n| n.data)
    }

    /// Remove the head and return its value, or `None` if the list is empty.
    pub fn shift(&mut self) -> Option<T> {
        let id = self.head?;
        self.unlink(id).map(|n| n.data)
    }

    /// Call `f` with every value and its 0-based position, head to tail.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T, usize),
    {
        for (i, data) in self.iter().enumerate() {
            f(data, i);
        }
    }

    /// Like [`for_each`](List::for_each), collecting the results in order.
    pub fn map<U, F>(&self, mut f: F) -> Vec<U>
    where
        F: FnMut(&T, usize) -> U,
    {
        self.iter()
            .enumerate()
            .map(|(i, data)| f(data, i))
            .collect()
    }

    /// Drop every node and return to the empty state.
    ///
    /// Ids keep counting, so handles taken before the clear stay invalid.
    pub fn clear(&mut self) {
        let dropped = self.len;
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
        debug!("cleared {dropped} nodes");
    }

    /// Iterate values in order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            chain: self.chain(),
        }
    }

    /// Iterate `(Handle, &T)` in order.
    pub fn iter_handles(&self) -> IterHandles<'_, T> {
        IterHandles {
            chain: self.chain(),
            restrictor: self.restrictor,
        }
    }

    /// Wrap the node behind `id`, if any, for the outside world.
    pub(crate) fn view(&self, id: Option<usize>) -> Option<NodeRef<'_, T>> {
        let node = id.and_then(|id| self.nodes.get(&id));
        let handle = self.restrictor.revoke_access(node)?;
        Some(NodeRef::new(self, node?, handle))
    }

    fn chain(&self) -> Chain<'_, T> {
        Chain {
            nodes: &self.nodes,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn alloc_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn store(&mut self, node: Node<T>) -> Handle {
        let handle = self.restrictor.revoke_access(&node);
        self.nodes.insert(node.id, node);
        handle
    }

    /// Splice a new node after `left`, or make it the sole node when `left`
    /// is `None`. `left` must be live, and `None` only on an empty list.
    fn link_after(&mut self, left: Option<usize>, data: T) -> Handle {
        let id = self.alloc_id();
        let node = match left {
            None => {
                debug_assert!(self.is_empty(), "null position on a non-empty list");
                self.head = Some(id);
                self.tail = Some(id);
                Node::new(id, data)
            }
            Some(l) => {
                let right = self.nodes.get_mut(&l).and_then(|n| n.next.replace(id));
                match right {
                    Some(r) => {
                        if let Some(n) = self.nodes.get_mut(&r) {
                            n.prev = Some(id);
                        }
                    }
                    None => self.tail = Some(id),
                }
                Node::with_links(id, data, left, right)
            }
        };
        self.len += 1;
        trace!("linked node {id} after {left:?}");
        self.store(node)
    }

    /// Take a live node out of the chain, relinking its neighbours.
    fn unlink(&mut self, id: usize) -> Option<Node<T>> {
        let mut node = self.nodes.remove(&id)?;

        match node.prev {
            Some(p) => {
                if let Some(n) = self.nodes.get_mut(&p) {
                    n.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        match node.next {
            Some(nx) => {
                if let Some(n) = self.nodes.get_mut(&nx) {
                    n.prev = node.prev;
                }
            }
            None => self.tail = node.prev,
        }

        node.detach();
        self.len -= 1;
        trace!("unlinked node {id}");
        Some(node)
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for data in iter {
            self.push(data);
        }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> Iterator for Chain<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(&self.cursor?)?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.chain.next().map(|n| &n.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chain.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> Iterator for IterHandles<'a, T> {
    type Item = (Handle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.chain.next()?;
        Some((self.restrictor.revoke_access(node), &node.data))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chain.size_hint()
    }
}

impl<T> ExactSizeIterator for IterHandles<'_, T> {}

use crate::{list::List, node::Node};
use core::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Identity tag of one list instance, stamped into every handle it hands out.
/// The counter behind it only allocates identities and holds no list state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ListId(usize);

impl ListId {
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        ListId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// An opaque reference to a node of a [`List`].
///
/// Handles are cheap to copy and may outlive the node they name. They carry
/// no access to the node's links; only the list that minted a handle can
/// resolve it, and it refuses handles whose node has since been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub(crate) owner: ListId,
    pub(crate) id: usize,
}

impl Handle {
    pub(crate) fn new(owner: ListId, id: usize) -> Self {
        Self { owner, id }
    }

    /// Returns the raw numeric identifier for debugging or external maps.
    pub fn as_raw(&self) -> usize {
        self.id
    }
}

/// Read-only view of a live node.
///
/// Navigation through [`prev`](NodeRef::prev) and [`next`](NodeRef::next)
/// yields new views, never the node itself, so the chain cannot be relinked
/// from outside the list. Payload writes go through [`List::get_mut`].
pub struct NodeRef<'a, T> {
    list: &'a List<T>,
    node: &'a Node<T>,
    handle: Handle,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(list: &'a List<T>, node: &'a Node<T>, handle: Handle) -> Self {
        Self { list, node, handle }
    }

    /// The payload.
    pub fn data(&self) -> &'a T {
        &self.node.data
    }

    /// The predecessor, or `None` at the head.
    pub fn prev(&self) -> Option<NodeRef<'a, T>> {
        self.list.view(self.node.prev)
    }

    /// The successor, or `None` at the tail.
    pub fn next(&self) -> Option<NodeRef<'a, T>> {
        self.list.view(self.node.next)
    }

    /// A handle that can later be passed back to the owning list.
    pub fn handle(&self) -> Handle {
        self.handle
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.handle() == other.handle()
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T> PartialEq<Handle> for NodeRef<'_, T> {
    fn eq(&self, other: &Handle) -> bool {
        self.handle() == *other
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.node.id)
            .field("data", &self.node.data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_ids_are_distinct() {
        let a = ListId::next();
        let b = ListId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn handle_equality_includes_owner() {
        let a = ListId::next();
        let b = ListId::next();
        assert_eq!(Handle::new(a, 3), Handle::new(a, 3));
        assert_ne!(Handle::new(a, 3), Handle::new(b, 3));
        assert_eq!(Handle::new(b, 3).as_raw(), 3);
    }

    #[derive(Debug, PartialEq)]
    struct Person {
        name: &'static str,
        age: u32,
    }

    #[test]
    fn view_reads_data_and_neighbours() {
        let mut list = List::new();
        list.push(Person { name: "prev", age: 1 });
        let mid = list.push(Person { name: "test1", age: 21 });
        list.push(Person { name: "next", age: 2 });

        let view = list.get(mid).unwrap();
        assert_eq!(view.data().name, "test1");
        assert_eq!(view.prev().unwrap().data().name, "prev");
        assert_eq!(view.next().unwrap().data().name, "next");
        assert!(view.prev().unwrap().prev().is_none());
        assert!(view.next().unwrap().next().is_none());
        assert_eq!(view, mid);
    }

    #[test]
    fn payload_is_writable_through_the_list() {
        let mut list = List::new();
        let h = list.push(Person { name: "test", age: 21 });

        list.get_mut(h).unwrap().name = "changed";
        let view = list.get(h).unwrap();
        assert_eq!(view.data().name, "changed");
        assert_eq!(view.data().age, 21);

        let old = list.replace(h, Person { name: "test2", age: 3 });
        assert_eq!(old, Some(Person { name: "changed", age: 21 }));
        assert_eq!(list.get(h).unwrap().data().name, "test2");
    }

    #[test]
    fn views_of_same_node_compare_equal() {
        let mut list = List::new();
        let h = list.push(7);
        let a = list.head().unwrap();
        let b = list.tail().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.handle(), h);
        assert_eq!(format!("{:?}", a), format!("NodeRef {{ id: {}, data: 7 }}", h.as_raw()));
    }
}

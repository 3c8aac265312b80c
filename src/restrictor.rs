use crate::{
    errors::ListError,
    handle::{Handle, ListId},
    node::Node,
};
use std::collections::HashMap;

/// Converts between raw nodes and the handles callers are allowed to hold.
///
/// Every node crossing the list boundary is wrapped here, and every handle
/// coming back in is resolved here. Resolution checks that the handle was
/// minted by the same list and that its node is still linked.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AccessRestrictor {
    owner: ListId,
}

impl AccessRestrictor {
    pub(crate) fn new(owner: ListId) -> Self {
        Self { owner }
    }

    /// Wrap a node in a handle. A present node yields a [`Handle`], an
    /// absent one (`None`) yields `None`.
    pub(crate) fn revoke_access<N: Revocable>(&self, node: N) -> N::Handle {
        node.revoke(self.owner)
    }

    /// Resolve `handle` back to the id of its live node.
    pub(crate) fn grant_access<T>(
        &self,
        nodes: &HashMap<usize, Node<T>>,
        handle: Handle,
    ) -> Result<usize, ListError> {
        if handle.owner != self.owner {
            return Err(ListError::ForeignHandle);
        }
        match nodes.get(&handle.id) {
            Some(n) => Ok(n.id),
            None => Err(ListError::InvalidHandle),
        }
    }
}

/// Nodes, or absent nodes, that can be turned into handles.
pub(crate) trait Revocable {
    type Handle;

    fn revoke(self, owner: ListId) -> Self::Handle;
}

impl<T> Revocable for &Node<T> {
    type Handle = Handle;

    fn revoke(self, owner: ListId) -> Handle {
        Handle::new(owner, self.id)
    }
}

impl<T> Revocable for Option<&Node<T>> {
    type Handle = Option<Handle>;

    fn revoke(self, owner: ListId) -> Option<Handle> {
        self.map(|n| n.revoke(owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> HashMap<usize, Node<&'static str>> {
        let mut nodes = HashMap::new();
        nodes.insert(0, Node::with_links(0, "prev", None, Some(1)));
        nodes.insert(1, Node::with_links(1, "test1", Some(0), Some(2)));
        nodes.insert(2, Node::with_links(2, "next", Some(1), None));
        nodes
    }

    #[test]
    fn revoke_none_is_none() {
        let restrictor = AccessRestrictor::new(ListId::next());
        assert_eq!(restrictor.revoke_access(None::<&Node<u8>>), None);
    }

    #[test]
    fn wrapping_twice_yields_identical_handles() {
        let restrictor = AccessRestrictor::new(ListId::next());
        let nodes = arena();
        let a = restrictor.revoke_access(nodes.get(&1)).unwrap();
        let b = restrictor.revoke_access(nodes.get(&1)).unwrap();
        assert_eq!(a, b);
        assert_eq!(restrictor.grant_access(&nodes, a), Ok(1));
        assert_eq!(restrictor.grant_access(&nodes, b), Ok(1));

        let direct = restrictor.revoke_access(&nodes[&1]);
        assert_eq!(direct, a);
    }

    #[test]
    fn grant_rejects_foreign_and_stale_handles() {
        let restrictor = AccessRestrictor::new(ListId::next());
        let other = AccessRestrictor::new(ListId::next());
        let mut nodes = arena();

        let foreign = other.revoke_access(&nodes[&1]);
        assert_eq!(
            restrictor.grant_access(&nodes, foreign),
            Err(ListError::ForeignHandle)
        );

        let stale = restrictor.revoke_access(&nodes[&2]);
        nodes.remove(&2);
        assert_eq!(
            restrictor.grant_access(&nodes, stale),
            Err(ListError::InvalidHandle)
        );
    }
}

/// One element of the chain. Links are arena ids owned by the list.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) id: usize,
    pub(crate) data: T,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

impl<T> Node<T> {
    /// A detached node.
    pub(crate) fn new(id: usize, data: T) -> Self {
        Self::with_links(id, data, None, None)
    }

    pub(crate) fn with_links(id: usize, data: T, prev: Option<usize>, next: Option<usize>) -> Self {
        Self {
            id,
            data,
            prev,
            next,
        }
    }

    /// Null both links.
    pub(crate) fn detach(&mut self) {
        self.prev = None;
        self.next = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_sets_links() {
        let node = Node::with_links(5, "test1", Some(3), Some(8));
        assert_eq!(node.id, 5);
        assert_eq!(node.data, "test1");
        assert_eq!(node.prev, Some(3));
        assert_eq!(node.next, Some(8));

        let lone = Node::new(1, 'x');
        assert_eq!(lone.prev, None);
        assert_eq!(lone.next, None);
    }

    #[test]
    fn detach_nulls_links() {
        let mut node = Node::with_links(2, 0u8, Some(1), Some(3));
        node.detach();
        assert_eq!((node.prev, node.next), (None, None));
    }
}

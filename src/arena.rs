//! Node storage for [`Tree`][crate::Tree].
//!
//! Nodes live in a `Vec` and refer to each other by index. A child link owns the node it points
//! at (in the sense that the tree frees it when the link is cut for good) while the parent link
//! is only ever followed upwards. Indices never dangle because a slot is only vacated by
//! [`Arena::free`] after the tree has unlinked it from every neighbour.

use std::ops::{Index, IndexMut, Not};

/// Index of a live node in an [`Arena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// A possibly absent node. `None` plays the part of the empty subtree.
pub(crate) type Link = Option<NodeId>;

/// Which side of its parent a node hangs from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    Left,
    Right,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) value: i32,
    /// Length of the longest path down to a leaf. A leaf has height 0 and the empty subtree
    /// has height -1.
    pub(crate) height: i32,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) parent: Link,
}

impl Node {
    fn new(value: i32) -> Self {
        Self {
            value,
            height: 0,
            left: None,
            right: None,
            parent: None,
        }
    }

    pub(crate) fn child(&self, dir: Dir) -> Link {
        match dir {
            Dir::Left => self.left,
            Dir::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, dir: Dir) -> &mut Link {
        match dir {
            Dir::Left => &mut self.left,
            Dir::Right => &mut self.right,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Arena {
    slots: Vec<Option<Node>>,
    /// Vacant slots, reused before the `Vec` grows.
    free: Vec<NodeId>,
}

impl Arena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stores a fresh, unlinked node holding `value`.
    pub(crate) fn alloc(&mut self, value: i32) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(Node::new(value));
                id
            }
            None => {
                self.slots.push(Some(Node::new(value)));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Vacates the slot of `id` and hands back the node that lived there. The caller must have
    /// already unlinked it from the tree.
    pub(crate) fn free(&mut self, id: NodeId) -> Node {
        let node = self.slots[id.0]
            .take()
            .expect("Freeing a vacant arena slot");
        self.free.push(id);
        node
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl Index<NodeId> for Arena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.slots[id.0]
            .as_ref()
            .expect("Link points at a vacant arena slot")
    }
}

impl IndexMut<NodeId> for Arena {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        self.slots[id.0]
            .as_mut()
            .expect("Link points at a vacant arena slot")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freed_slots_are_reused() {
        let mut arena = Arena::new();
        let one = arena.alloc(1);
        let two = arena.alloc(2);
        assert_eq!(arena.len(), 2);

        let node = arena.free(one);
        assert_eq!(node.value, 1);
        assert_eq!(arena.len(), 1);

        let three = arena.alloc(3);
        assert_eq!(three, one);
        assert_eq!(arena[three].value, 3);
        assert_eq!(arena[two].value, 2);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn new_nodes_are_unlinked_leaves() {
        let mut arena = Arena::new();
        let id = arena.alloc(7);

        assert_eq!(arena[id].height, 0);
        assert!(arena[id].left.is_none());
        assert!(arena[id].right.is_none());
        assert!(arena[id].parent.is_none());
    }

    #[test]
    #[should_panic(expected = "vacant")]
    fn indexing_a_freed_node_panics() {
        let mut arena = Arena::new();
        let id = arena.alloc(7);
        arena.free(id);

        let _ = arena[id].value;
    }

    #[test]
    fn mirrored_directions() {
        assert_eq!(!Dir::Left, Dir::Right);
        assert_eq!(!Dir::Right, Dir::Left);
    }
}

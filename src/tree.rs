//! The AVL tree itself: plain BST placement and removal plus the link and height bookkeeping
//! shared with the rebalancing code.
//!
//! # Examples
//!
//! ```
//! use avl::Tree;
//!
//! let mut tree = Tree::new();
//! assert!(tree.is_empty());
//!
//! // Inserting in order would degenerate a plain BST into a list.
//! for value in 1..=7 {
//!     tree.insert(value);
//! }
//! assert_eq!(tree.height(), 2);
//!
//! // Deleting returns whether anything was removed.
//! assert!(tree.delete(4));
//! assert!(!tree.delete(4));
//! assert_eq!(tree.iter().collect::<Vec<_>>(), vec![1, 2, 3, 5, 6, 7]);
//! ```

use std::fmt;

use crate::arena::{Arena, Dir, Link, NodeId};

/// A self-balancing Binary Search Tree (specifically, an AVL tree) of `i32`s.
///
/// Values equal to a node's value are stored in its right subtree, so the same value may be
/// inserted many times and each [`delete`][Tree::delete] removes one copy.
#[derive(Clone, Default)]
pub struct Tree {
    pub(crate) arena: Arena,
    pub(crate) root: Link,
}

/// Outcome of the structural part of a delete.
enum DeleteResult {
    /// The value wasn't found so nothing was deleted.
    NotFound,
    /// A node was unlinked and freed. Rebalancing starts at the given node and walks up to the
    /// root. `None` means the tree is now empty.
    Deleted(Link),
}

impl Tree {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Number of values stored, counting duplicates.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree: -1 when empty, 0 for a single node.
    pub fn height(&self) -> i32 {
        self.height_of(self.root)
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Returns `true` if some node holds `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree = [3, 1, 2].into_iter().collect();
    ///
    /// assert!(tree.contains(2));
    /// assert!(!tree.contains(42));
    /// ```
    pub fn contains(&self, value: i32) -> bool {
        self.find(self.root, value).is_some()
    }

    /// Inserts `value`, rebalancing on the way back up. This always succeeds and performs at
    /// most one single or double rotation.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(10);
    /// tree.insert(20);
    /// tree.insert(30);
    ///
    /// // The right-right case rotated 20 up to the root.
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn insert(&mut self, value: i32) {
        let new = self.arena.alloc(value);
        match self.root {
            Some(root) => {
                self.insert_bst(new, root);
                self.rebalance_after_insert(new);
            }
            None => self.root = Some(new),
        }
        log::debug!("inserted {value}, tree height is now {}", self.height());

        self.debug_check_root();
    }

    /// Deletes one node holding `value` and rebalances every ancestor of the removal point.
    /// Returns `false`, leaving the tree untouched, if the value is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree: Tree = [50, 30, 70].into_iter().collect();
    ///
    /// assert!(tree.delete(50));
    /// assert!(!tree.delete(50));
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![30, 70]);
    /// ```
    pub fn delete(&mut self, value: i32) -> bool {
        match self.delete_bst(value, self.root) {
            DeleteResult::NotFound => {
                log::debug!("delete of {value} found nothing");
                false
            }
            DeleteResult::Deleted(action_position) => {
                self.rebalance_after_delete(action_position);
                log::debug!("deleted {value}, tree height is now {}", self.height());

                self.debug_check_root();
                true
            }
        }
    }

    /// Walks down from `node` by the ordering rule and returns the first node holding `value`.
    fn find(&self, node: Link, value: i32) -> Link {
        let node = node?;
        let current = self.arena[node].value;
        if current > value {
            self.find(self.arena[node].left, value)
        } else if current < value {
            self.find(self.arena[node].right, value)
        } else {
            Some(node)
        }
    }

    /// Hangs `new` off the first empty slot below `node`. Greater values go left, everything
    /// else (including equal values) goes right.
    fn insert_bst(&mut self, new: NodeId, node: NodeId) {
        let dir = if self.arena[node].value > self.arena[new].value {
            Dir::Left
        } else {
            Dir::Right
        };

        match self.arena[node].child(dir) {
            Some(child) => self.insert_bst(new, child),
            None => self.set_child(node, dir, Some(new)),
        }
    }

    /// Unlinks a node holding `value` from the subtree rooted at `node`. See [`DeleteResult`]
    /// for what comes back.
    fn delete_bst(&mut self, value: i32, node: Link) -> DeleteResult {
        match self.find(node, value) {
            Some(found) => DeleteResult::Deleted(self.unlink(found)),
            None => DeleteResult::NotFound,
        }
    }

    /// Removes `node` from the tree, frees it, and returns the action position: the lowest node
    /// whose subtree changed shape.
    fn unlink(&mut self, node: NodeId) -> Link {
        let parent = self.arena[node].parent;

        let action_position = match (self.arena[node].left, self.arena[node].right) {
            (None, None) => {
                self.replace_child_or_set_root(parent, node, None);
                parent
            }
            (Some(only), None) | (None, Some(only)) => {
                self.replace_child_or_set_root(parent, node, Some(only));
                parent
            }
            (Some(left), Some(right)) => {
                let successor = self.leftmost(right);
                let successor_parent = self.arena[successor]
                    .parent
                    .expect("The successor is below the deleted node");

                // The successor has no left child, so its right child takes its place.
                let successor_right = self.arena[successor].right;
                self.replace_child_or_set_root(Some(successor_parent), successor, successor_right);

                // NB re-read the right child: if the successor *was* the right child it has
                // just been replaced by its own right child.
                let right = self.arena[node].right;
                self.set_child(successor, Dir::Left, Some(left));
                self.set_child(successor, Dir::Right, right);
                self.replace_child_or_set_root(parent, node, Some(successor));

                if successor_parent == node {
                    // The old parent is the node being freed.
                    Some(successor)
                } else {
                    Some(successor_parent)
                }
            }
        };

        self.arena.free(node);
        action_position
    }

    /// The node holding the smallest value below `node`.
    fn leftmost(&self, mut node: NodeId) -> NodeId {
        while let Some(left) = self.arena[node].left {
            node = left;
        }
        node
    }

    /// Height of a possibly empty subtree.
    pub(crate) fn height_of(&self, link: Link) -> i32 {
        link.map_or(-1, |id| self.arena[id].height)
    }

    /// Adjusts the height of `node` to be the max of its children's heights + 1.
    pub(crate) fn update_height(&mut self, node: NodeId) {
        let left_height = self.height_of(self.arena[node].left);
        let right_height = self.height_of(self.arena[node].right);
        self.arena[node].height = left_height.max(right_height) + 1;
    }

    /// Left height minus right height.
    pub(crate) fn balance_factor(&self, node: NodeId) -> i32 {
        self.height_of(self.arena[node].left) - self.height_of(self.arena[node].right)
    }

    pub(crate) fn is_balanced(&self, node: NodeId) -> bool {
        self.balance_factor(node).abs() <= 1
    }

    /// Which side of its parent `node` hangs from, or `None` for the root.
    pub(crate) fn dir_of(&self, node: NodeId) -> Option<Dir> {
        let parent = self.arena[node].parent?;
        if self.arena[parent].left == Some(node) {
            Some(Dir::Left)
        } else {
            Some(Dir::Right)
        }
    }

    /// Makes `child` the `dir` child of `node`, fixing the child's parent link.
    pub(crate) fn set_child(&mut self, node: NodeId, dir: Dir, child: Link) {
        *self.arena[node].child_mut(dir) = child;
        if let Some(child) = child {
            self.arena[child].parent = Some(node);
        }
    }

    /// Puts `new_child` in whichever slot of `parent` holds `old_child`, or makes it the root
    /// when there is no parent. `new_child`'s parent link follows.
    ///
    /// `old_child` keeps its own (now stale) parent link; callers relink or free it.
    pub(crate) fn replace_child_or_set_root(
        &mut self,
        parent: Link,
        old_child: NodeId,
        new_child: Link,
    ) {
        match parent {
            Some(parent) => {
                let dir = if self.arena[parent].left == Some(old_child) {
                    Dir::Left
                } else {
                    debug_assert_eq!(self.arena[parent].right, Some(old_child));
                    Dir::Right
                };
                self.set_child(parent, dir, new_child);
            }
            None => {
                self.root = new_child;
                if let Some(new_child) = new_child {
                    self.arena[new_child].parent = None;
                }
            }
        }
    }

    /// In debug builds, cheaply check that the root is balanced and has no parent.
    fn debug_check_root(&self) {
        if cfg!(debug_assertions) {
            let Some(root) = self.root else {
                return;
            };
            assert!(self.arena[root].parent.is_none());
            assert!(self.is_balanced(root));
        }
    }

    /// Panics if any node breaks the BST order, height, balance or parent invariants.
    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        let mut count = 0;
        if let Some(root) = self.root {
            assert!(
                self.arena[root].parent.is_none(),
                "root {} has a parent",
                self.arena[root].value
            );
            self.assert_invariants_at(root, None, None, &mut count);
        }
        assert_eq!(count, self.len(), "arena holds unreachable nodes");
    }

    /// Checks the subtree at `node`, whose values must lie in `[low, high]`.
    ///
    /// Both ends are inclusive: equal values are inserted to the right, but a rotation over
    /// equal values can lift one of them above the other and leave a copy on the left.
    fn assert_invariants_at(
        &self,
        node: NodeId,
        low: Option<i32>,
        high: Option<i32>,
        count: &mut usize,
    ) {
        *count += 1;
        let n = &self.arena[node];

        if let Some(low) = low {
            assert!(
                n.value >= low,
                "{} is in the right subtree of a node holding {low}",
                n.value
            );
        }
        if let Some(high) = high {
            assert!(
                n.value <= high,
                "{} is in the left subtree of a node holding {high}",
                n.value
            );
        }

        let left_height = self.height_of(n.left);
        let right_height = self.height_of(n.right);
        assert_eq!(
            n.height,
            left_height.max(right_height) + 1,
            "stale height at {}",
            n.value
        );
        assert!(
            left_height.abs_diff(right_height) <= 1,
            "{} is unbalanced ({left_height} vs {right_height})",
            n.value
        );

        for (child, low, high) in [
            (n.left, low, Some(n.value)),
            (n.right, Some(n.value), high),
        ] {
            if let Some(child) = child {
                assert_eq!(
                    self.arena[child].parent,
                    Some(node),
                    "{} has the wrong parent",
                    self.arena[child].value
                );
                self.assert_invariants_at(child, low, high, count);
            }
        }
    }
}

impl FromIterator<i32> for Tree {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<i32> for Tree {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// Borrowed view of one node for `Debug` output.
struct DebugNode<'a> {
    tree: &'a Tree,
    node: NodeId,
}

impl fmt::Debug for DebugNode<'_> {
    // TODO stack based Debug
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.tree.arena[self.node];
        let child = |link: Link| {
            link.map(|node| DebugNode {
                tree: self.tree,
                node,
            })
        };
        f.debug_struct("Node")
            .field("value", &node.value)
            .field("height", &node.height)
            .field("left", &child(node.left))
            .field("right", &child(node.right))
            .finish()
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.root.map(|node| DebugNode { tree: self, node });
        f.debug_struct("Tree").field("root", &root).finish()
    }
}

//! Restoring the AVL invariant after a mutation.
//!
//! Insertion and deletion both walk from the lowest changed node up to the root, recomputing
//! heights as they go. They differ in how they fix an unbalanced node `z`:
//!
//! * After an insert the path just walked tells us which child `y` and grandchild `x` of `z`
//!   grew, and one single or double rotation at `z` restores the subtree to its height before
//!   the insert. Nothing above it can be unbalanced after that.
//! * After a delete `y` and `x` are picked by height and a trinode restructure is applied. `y`
//!   is the taller child of `z`, and `x` the taller child of `y`, taken on the same side as `y`
//!   when both of `y`'s children are equally tall. The restructured subtree may end up shorter
//!   than before, so the walk keeps fixing ancestors all the way to the root.
//!
//! See <https://en.wikipedia.org/wiki/AVL_tree#Rebalancing> for terminology.

use crate::arena::{Dir, Link, NodeId};
use crate::tree::Tree;

impl Tree {
    /// Walks from the freshly inserted `node` to the root, rotating at the first unbalanced
    /// ancestor.
    pub(crate) fn rebalance_after_insert(&mut self, node: NodeId) {
        // `z` is the node being looked at, `y` its child on the walked path and `x` its
        // grandchild on the walked path.
        let (mut y, mut z): (Link, Link) = (None, None);
        let mut cursor = Some(node);

        while let Some(current) = cursor {
            let x = y;
            y = z;
            z = Some(current);

            self.update_height(current);
            if self.is_balanced(current) {
                cursor = self.arena[current].parent;
                continue;
            }

            // An unbalanced node is at least two levels above the new node.
            let child = y.expect("Unbalanced node has a child on the insert path");
            let grandchild = x.expect("Unbalanced node has a grandchild on the insert path");
            let top = self.rotate_for_insert(current, child, grandchild);

            // The walk goes on from above the rotated subtree, which is now rooted at `top`.
            z = Some(top);
            y = self.taller_child(top);
            cursor = self.arena[top].parent;
        }
    }

    /// Applies the single or double rotation matching the shape of `z -> y -> x` and returns
    /// the new root of the subtree.
    fn rotate_for_insert(&mut self, z: NodeId, y: NodeId, x: NodeId) -> NodeId {
        match (self.dir_of(y), self.dir_of(x)) {
            (Some(Dir::Left), Some(Dir::Left)) => {
                log::trace!("left-left case at {}", self.arena[z].value);
                self.rotate_right(z)
            }
            (Some(Dir::Left), Some(Dir::Right)) => {
                log::trace!("left-right case at {}", self.arena[z].value);
                self.rotate_left(y);
                self.rotate_right(z)
            }
            (Some(Dir::Right), Some(Dir::Right)) => {
                log::trace!("right-right case at {}", self.arena[z].value);
                self.rotate_left(z)
            }
            (Some(Dir::Right), Some(Dir::Left)) => {
                log::trace!("right-left case at {}", self.arena[z].value);
                self.rotate_right(y);
                self.rotate_left(z)
            }
            _ => unreachable!("`y` and `x` hang below `z`"),
        }
    }

    /// Rotate `node` to the right. This moves the left child up vertically and `node` down
    /// vertically. Used to rebalance the tree when the left child is too tall.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///    Option<parent>            Option<parent>
    ///      /                         /
    ///     node                     left
    ///    /    \                   /    \
    ///  left    z     rotate ->   x     node
    ///  / \                             /  \
    /// x   y                           y    z
    /// ```
    pub(crate) fn rotate_right(&mut self, node: NodeId) -> NodeId {
        self.rotate(node, Dir::Right)
    }

    /// The mirror image of [`rotate_right`][Tree::rotate_right].
    pub(crate) fn rotate_left(&mut self, node: NodeId) -> NodeId {
        self.rotate(node, Dir::Left)
    }

    /// Moves `node` down in direction `dir` and its `!dir` child up into its slot. Heights of
    /// `node`, the promoted child and `node`'s old parent are recomputed. Returns the promoted
    /// child.
    fn rotate(&mut self, node: NodeId, dir: Dir) -> NodeId {
        let parent = self.arena[node].parent;
        let up = self.arena[node]
            .child(!dir)
            .expect("Rotation needs a child to promote");
        let across = self.arena[up].child(dir);

        self.set_child(node, !dir, across);
        self.replace_child_or_set_root(parent, node, Some(up));
        self.set_child(up, dir, Some(node));

        self.update_height(node);
        self.update_height(up);
        if let Some(parent) = parent {
            self.update_height(parent);
        }
        up
    }

    /// Walks from the action position of a delete to the root, restructuring at every
    /// unbalanced node on the way.
    pub(crate) fn rebalance_after_delete(&mut self, action_position: Link) {
        let mut cursor = action_position;

        while let Some(z) = cursor {
            self.update_height(z);

            let mut top = z;
            if !self.is_balanced(z) {
                let y = self
                    .taller_child(z)
                    .expect("Unbalanced node has a child");
                // On a tie `x` must sit on the same side as `y`: the zig-zag shape would leave
                // `c` two levels out of balance.
                let side = self.dir_of(y).expect("`y` hangs below `z`");
                let x = self
                    .taller_child_or(y, side)
                    .expect("Taller child of an unbalanced node has a child");
                top = self.restructure(z, y, x);
            }
            cursor = self.arena[top].parent;
        }
    }

    /// The child with the larger height, preferring the left one on ties.
    pub(crate) fn taller_child(&self, node: NodeId) -> Link {
        self.taller_child_or(node, Dir::Left)
    }

    /// The child with the larger height, preferring the `tie` side when both are equal.
    pub(crate) fn taller_child_or(&self, node: NodeId, tie: Dir) -> Link {
        let node = &self.arena[node];
        let left_height = self.height_of(node.left);
        let right_height = self.height_of(node.right);
        if left_height > right_height {
            node.left
        } else if left_height < right_height {
            node.right
        } else {
            node.child(tie)
        }
    }

    /// Trinode restructuring. `z` is the unbalanced node, `y` one of its children and `x` one of
    /// `y`'s children. Relabelling them in order as `a < b < c`, `b` takes `z`'s place with `a`
    /// and `c` as children, and the four subtrees hanging off the trio are reattached in order
    /// below `a` and `c`:
    ///
    /// ```text
    ///        z                      b
    ///       / \                   /   \
    ///      y   t4                a     c
    ///     / \        ->         / \   / \
    ///    t1  x                 t1 t2 t3 t4
    ///       / \
    ///      t2  t3
    /// ```
    ///
    /// The four path shapes cover both single and both double rotations. Returns `b`.
    fn restructure(&mut self, z: NodeId, y: NodeId, x: NodeId) -> NodeId {
        let (a, b, c, [t1, t2, t3, t4]) = match (self.dir_of(y), self.dir_of(x)) {
            (Some(Dir::Left), Some(Dir::Left)) => (
                x,
                y,
                z,
                [
                    self.arena[x].left,
                    self.arena[x].right,
                    self.arena[y].right,
                    self.arena[z].right,
                ],
            ),
            (Some(Dir::Left), Some(Dir::Right)) => (
                y,
                x,
                z,
                [
                    self.arena[y].left,
                    self.arena[x].left,
                    self.arena[x].right,
                    self.arena[z].right,
                ],
            ),
            (Some(Dir::Right), Some(Dir::Right)) => (
                z,
                y,
                x,
                [
                    self.arena[z].left,
                    self.arena[y].left,
                    self.arena[x].left,
                    self.arena[x].right,
                ],
            ),
            (Some(Dir::Right), Some(Dir::Left)) => (
                z,
                x,
                y,
                [
                    self.arena[z].left,
                    self.arena[x].left,
                    self.arena[x].right,
                    self.arena[y].right,
                ],
            ),
            _ => unreachable!("`y` and `x` hang below `z`"),
        };
        log::trace!(
            "restructuring at {}: {} becomes the local root",
            self.arena[z].value,
            self.arena[b].value
        );

        let parent = self.arena[z].parent;
        self.replace_child_or_set_root(parent, z, Some(b));

        self.set_child(a, Dir::Left, t1);
        self.set_child(a, Dir::Right, t2);
        self.set_child(c, Dir::Left, t3);
        self.set_child(c, Dir::Right, t4);
        self.set_child(b, Dir::Left, Some(a));
        self.set_child(b, Dir::Right, Some(c));

        self.update_height(a);
        self.update_height(c);
        self.update_height(b);
        b
    }
}

//! In-order iteration over a [`Tree`].

use crate::arena::{Link, NodeId};
use crate::tree::Tree;

/// In-order iterator over the values of a [`Tree`], created by [`Tree::iter`].
///
/// Values come out in non-decreasing order, duplicates included.
pub struct Iter<'tree> {
    tree: &'tree Tree,
    /// Nodes whose left subtree is being visited, deepest last.
    stack: Vec<NodeId>,
    len: usize,
}

impl<'tree> Iter<'tree> {
    fn new(tree: &'tree Tree) -> Self {
        let mut iter = Iter {
            tree,
            stack: Vec::new(),
            len: tree.len(),
        };
        iter.push_left_spine(tree.root);
        iter
    }

    /// Upon entering a new subtree, stack up the path to its minimum.
    fn push_left_spine(&mut self, mut link: Link) {
        while let Some(node) = link {
            self.stack.push(node);
            link = self.tree.arena[node].left;
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(self.tree.arena[node].right);
        self.len -= 1;

        Some(self.tree.arena[node].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl Tree {
    /// Returns an iterator over the stored values in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree = [3, 1, 2, 1].into_iter().collect();
    ///
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![1, 1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }
}

impl<'tree> IntoIterator for &'tree Tree {
    type Item = i32;
    type IntoIter = Iter<'tree>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let tree = Tree::new();
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn sorted_after_rotations_and_deletes() {
        let mut tree: Tree = [9, 4, 7, 1, 8, 2, 6, 3, 5, 0].into_iter().collect();
        assert_eq!(tree.iter().collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());

        tree.delete(4);
        tree.delete(0);
        assert_eq!(
            (&tree).into_iter().collect::<Vec<_>>(),
            vec![1, 2, 3, 5, 6, 7, 8, 9]
        );
    }

    #[test]
    fn exact_size() {
        let tree: Tree = (0..20).collect();
        let mut iter = tree.iter();

        assert_eq!(iter.len(), 20);
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 18);
        assert_eq!(iter.count(), 18);
    }
}

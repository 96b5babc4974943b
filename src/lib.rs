//! This crate exposes a self-balancing Binary Search Tree (an AVL tree) of integers, mostly for
//! educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored records. BSTs are typically defined recursively using the notion of a `Node`. A `Node`
//! will typically store some sort of value and will sometimes have child `Node`s. The most
//! important invariants of this BST are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a value less than its own
//!    value.
//! 2. For every `Node`, all the `Node`s in its right subtree have a value greater than or equal
//!    to its own value. Inserting a value twice stores it twice.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)` (where `height` is the longest path from the root `Node` to a
//! leaf `Node`).
//!
//! ## AVL Tree
//!
//! An AVL tree additionally keeps, for every `Node`, the heights of its two subtrees within one
//! of each other. After every insert or delete the tree walks from the changed `Node` back up
//! to the root and rotates wherever that balance broke, which bounds the height by roughly
//! `1.44 * lg N` for `N` nodes.
//!
//! Nodes keep a link to their parent for that upward walk. To avoid shared ownership between
//! parents and children, [`Tree`] stores its nodes in an arena and links them by index.
//!
//! # Examples
//!
//! ```
//! use avl::Tree;
//!
//! let mut tree = Tree::new();
//! tree.insert(30);
//! tree.insert(10);
//! tree.insert(20);
//!
//! // 30 -> 10 -> 20 was rebalanced with a double rotation.
//! assert_eq!(tree.height(), 1);
//! assert!(tree.delete(20));
//! assert_eq!(tree.iter().collect::<Vec<_>>(), vec![10, 30]);
//! ```

#![deny(missing_docs)]

mod arena;
mod iter;
mod rebalance;
mod render;
mod tree;


pub use iter::Iter;
pub use tree::Tree;

//! Text rendering of a [`Tree`] for humans. Each node gets one line showing its value, its
//! parent's value and its height; the right subtree is drawn above a node and the left subtree
//! below it, so the picture reads like the tree turned on its side.
//!
//! ```
//! use avl::Tree;
//!
//! let tree: Tree = [10, 20, 30].into_iter().collect();
//!
//! let lines: Vec<_> = tree.render().lines().map(str::to_owned).collect();
//! assert_eq!(
//!     lines,
//!     ["|   ┌── 30(20{0})", "└── 20({1})", "    └── 10(20{0})"]
//! );
//! ```

use std::fmt::{self, Write};

use crate::arena::NodeId;
use crate::tree::Tree;

impl Tree {
    /// Draws the tree, one line per node. The empty tree renders as the empty string.
    pub fn render(&self) -> String {
        self.to_string()
    }

    // TODO stack based rendering
    fn render_at<W: Write>(
        &self,
        node: NodeId,
        prefix: &str,
        is_tail: bool,
        w: &mut W,
    ) -> fmt::Result {
        let n = &self.arena[node];

        if let Some(right) = n.right {
            let prefix = format!("{prefix}{}", if is_tail { "|   " } else { "    " });
            self.render_at(right, &prefix, false, w)?;
        }

        let branch = if is_tail { "└── " } else { "┌── " };
        match n.parent {
            Some(parent) => writeln!(
                w,
                "{prefix}{branch}{}({}{{{}}})",
                n.value, self.arena[parent].value, n.height
            )?,
            None => writeln!(w, "{prefix}{branch}{}({{{}}})", n.value, n.height)?,
        }

        if let Some(left) = n.left {
            let prefix = format!("{prefix}{}", if is_tail { "    " } else { "|   " });
            self.render_at(left, &prefix, true, w)?;
        }
        Ok(())
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => self.render_at(root, "", true, f),
            None => Ok(()),
        }
    }
}

//! Bounds-pruned in-order iterator over the index.
//!
//! The iterator keeps an explicit stack of slab keys instead of recursing.
//! A node below `low` contributes nothing from its left subtree and a node
//! above `high` nothing from its right subtree, so those subtrees are never
//! entered.

use slab::Slab;

use crate::catalog::Book;
use crate::index::IndexNode;
use crate::types::BookId;

/// Iterator over books with `low <= id <= high`, in ascending id order.
#[derive(Debug, Clone)]
pub struct Range<'a> {
    nodes: &'a Slab<IndexNode>,
    stack: Vec<usize>,
    low: BookId,
    high: BookId,
}

impl<'a> Range<'a> {
    pub(crate) fn new(
        nodes: &'a Slab<IndexNode>,
        root: Option<usize>,
        low: BookId,
        high: BookId,
    ) -> Self {
        let mut range = Self {
            nodes,
            stack: Vec::new(),
            low,
            high,
        };
        range.descend(root);
        range
    }

    /// Push the in-bounds nodes along the left spine starting at `cursor`
    fn descend(&mut self, mut cursor: Option<usize>) {
        let nodes = self.nodes;
        while let Some(key) = cursor {
            let node = &nodes[key];
            let id = node.id();
            if id < self.low {
                cursor = node.right;
            } else if id > self.high {
                cursor = node.left;
            } else {
                self.stack.push(key);
                cursor = node.left;
            }
        }
    }
}

impl<'a> Iterator for Range<'a> {
    type Item = &'a Book;

    fn next(&mut self) -> Option<&'a Book> {
        let key = self.stack.pop()?;
        let nodes = self.nodes;
        let node = &nodes[key];
        self.descend(node.right);
        Some(&node.book)
    }
}

//! Index node for slab-based storage.
//!
//! ## Design
//!
//! `IndexNode` wraps a `Book` with red-black tree links. Links are slab
//! keys (`usize`), not references: the slab owns every node, children are
//! reached through `left`/`right`, and `parent` is a back-reference used
//! only for walking upward during rebalancing.
//!
//! A missing child (`None`) is an implicit BLACK nil leaf.

use crate::catalog::Book;
use crate::types::BookId;

/// Red-black color tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// Child direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Left,
    Right,
}

impl Dir {
    /// Returns the other direction
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Node stored in the index slab.
#[derive(Debug, Clone)]
pub struct IndexNode {
    /// The record; swapped between nodes only during deletion
    pub book: Book,

    /// Parent node (slab key), None for the root
    pub parent: Option<usize>,

    /// Left child (slab key)
    pub left: Option<usize>,

    /// Right child (slab key)
    pub right: Option<usize>,

    pub color: Color,
}

impl IndexNode {
    /// Create a new unlinked RED node
    #[inline]
    pub fn new(book: Book) -> Self {
        Self {
            book,
            parent: None,
            left: None,
            right: None,
            color: Color::Red,
        }
    }

    #[inline]
    pub fn id(&self) -> BookId {
        self.book.id()
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    /// Child in the given direction
    #[inline]
    pub fn child(&self, dir: Dir) -> Option<usize> {
        match dir {
            Dir::Left => self.left,
            Dir::Right => self.right,
        }
    }

    #[inline]
    pub fn set_child(&mut self, dir: Dir, child: Option<usize>) {
        match dir {
            Dir::Left => self.left = child,
            Dir::Right => self.right = child,
        }
    }

    /// Check if this node has no children
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_node_new() {
        let node = IndexNode::new(Book::new(42, "T", "A"));

        assert_eq!(node.id(), 42);
        assert!(node.is_red());
        assert!(node.parent.is_none());
        assert!(node.is_leaf());
    }

    #[test]
    fn test_index_node_children() {
        let mut node = IndexNode::new(Book::new(1, "T", "A"));

        node.set_child(Dir::Left, Some(3));
        assert_eq!(node.child(Dir::Left), Some(3));
        assert!(node.right.is_none());
        assert!(!node.is_leaf());

        node.set_child(Dir::Right, Some(4));
        assert_eq!(node.child(Dir::Right), Some(4));

        node.set_child(Dir::Left, None);
        node.set_child(Dir::Right, None);
        assert!(node.is_leaf());
    }

    #[test]
    fn test_dir_opposite() {
        assert_eq!(Dir::Left.opposite(), Dir::Right);
        assert_eq!(Dir::Right.opposite(), Dir::Left);
    }
}

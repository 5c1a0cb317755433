//! Rotations and red-black repair for [`OrderedIndex`].
//!
//! Every color assignment goes through `set_color`, which bumps the flip
//! counter only when the tag actually changes. Left and right cases are
//! written once, parameterized by [`Dir`].

use log::trace;

use crate::catalog::Book;
use crate::index::{Color, Dir, OrderedIndex};

impl OrderedIndex {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Color of an optional node; nil leaves are BLACK
    #[inline]
    fn color_of(&self, key: Option<usize>) -> Color {
        key.map_or(Color::Black, |k| self.nodes[k].color)
    }

    #[inline]
    fn set_color(&mut self, key: usize, color: Color) {
        let node = &mut self.nodes[key];
        if node.color != color {
            node.color = color;
            self.color_flips += 1;
        }
    }

    /// Side of its parent that `key` hangs from. Must not be the root.
    #[inline]
    fn side_of(&self, key: usize) -> Dir {
        match self.nodes[key].parent {
            Some(parent) if self.nodes[parent].left == Some(key) => Dir::Left,
            _ => Dir::Right,
        }
    }

    /// Point `parent`'s link to `old` (or the root) at `new`
    fn replace_child(&mut self, parent: Option<usize>, old: usize, new: Option<usize>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                if self.nodes[p].left == Some(old) {
                    self.nodes[p].left = new;
                } else {
                    self.nodes[p].right = new;
                }
            }
        }
    }

    fn swap_books(&mut self, a: usize, b: usize) {
        if let Some((first, second)) = self.nodes.get2_mut(a, b) {
            std::mem::swap(&mut first.book, &mut second.book);
        }
    }

    // ========================================================================
    // Rotations
    // ========================================================================

    /// Rotate `x` down towards `dir`; its child on the opposite side rises.
    ///
    /// `rotate(x, Dir::Left)` is a left rotation. A node without the rising
    /// child is left untouched.
    fn rotate(&mut self, x: usize, dir: Dir) {
        let rising = dir.opposite();
        let Some(y) = self.nodes[x].child(rising) else {
            return;
        };

        let inner = self.nodes[y].child(dir);
        self.nodes[x].set_child(rising, inner);
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(x);
        }

        let parent = self.nodes[x].parent;
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, Some(y));

        self.nodes[y].set_child(dir, Some(x));
        self.nodes[x].parent = Some(y);

        trace!("rotated {:?} at book {}", dir, self.nodes[x].id());
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Restore the red-black invariants after attaching the RED node `key`
    pub(super) fn fix_insert(&mut self, mut key: usize) {
        while let Some(parent) = self.nodes[key].parent {
            if !self.nodes[parent].is_red() {
                break;
            }
            // A RED parent is never the root
            let Some(grand) = self.nodes[parent].parent else {
                break;
            };

            let side = self.side_of(parent);
            let uncle = self.nodes[grand].child(side.opposite());

            if let Some(uncle) = uncle.filter(|&u| self.nodes[u].is_red()) {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grand, Color::Red);
                key = grand;
                continue;
            }

            // Zig-zag: straighten into zig-zig first
            if self.side_of(key) != side {
                key = parent;
                self.rotate(key, side);
            }

            let Some(parent) = self.nodes[key].parent else {
                break;
            };
            let Some(grand) = self.nodes[parent].parent else {
                break;
            };
            self.set_color(parent, Color::Black);
            self.set_color(grand, Color::Red);
            self.rotate(grand, side.opposite());
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Unlink the node at `key` and return its book.
    ///
    /// A node with two children trades records with its in-order successor,
    /// and the successor's node is removed instead, so the physically
    /// removed node always has at most one child.
    pub(super) fn delete_node(&mut self, key: usize) -> Book {
        let (left, right) = (self.nodes[key].left, self.nodes[key].right);

        if let (Some(_), Some(right)) = (left, right) {
            let successor = self.leftmost(right);
            self.swap_books(key, successor);
            return self.delete_node(successor);
        }

        let replacement = left.or(right);
        let both_black =
            self.color_of(replacement) == Color::Black && self.nodes[key].color == Color::Black;
        let parent = self.nodes[key].parent;

        match (replacement, parent) {
            (None, None) => {
                self.root = None;
                self.nodes.remove(key).book
            }
            (None, Some(_)) => {
                if both_black {
                    // Repair while the leaf still stands in its slot
                    self.fix_double_black(key);
                }
                let parent = self.nodes[key].parent;
                self.replace_child(parent, key, None);
                self.nodes.remove(key).book
            }
            (Some(child), None) => {
                // Root with a single RED leaf: the leaf's record moves up
                self.swap_books(key, child);
                self.nodes[key].left = None;
                self.nodes[key].right = None;
                self.nodes.remove(child).book
            }
            (Some(child), Some(_)) => {
                self.replace_child(parent, key, Some(child));
                self.nodes[child].parent = parent;
                let book = self.nodes.remove(key).book;
                if both_black {
                    self.fix_double_black(child);
                } else {
                    self.set_color(child, Color::Black);
                }
                book
            }
        }
    }

    /// Repair a double-black deficiency at `key`
    fn fix_double_black(&mut self, mut key: usize) {
        loop {
            if self.root == Some(key) {
                return;
            }
            let Some(parent) = self.nodes[key].parent else {
                return;
            };

            let side = self.side_of(key);
            let sibling_side = side.opposite();
            let Some(sibling) = self.nodes[parent].child(sibling_side) else {
                key = parent;
                continue;
            };

            if self.nodes[sibling].is_red() {
                self.set_color(parent, Color::Red);
                self.set_color(sibling, Color::Black);
                self.rotate(parent, side);
                continue;
            }

            let sibling_left = self.nodes[sibling].left;
            let sibling_right = self.nodes[sibling].right;
            let red_child = if self.color_of(sibling_left) == Color::Red {
                sibling_left.map(|k| (k, Dir::Left))
            } else if self.color_of(sibling_right) == Color::Red {
                sibling_right.map(|k| (k, Dir::Right))
            } else {
                None
            };

            match red_child {
                Some((nephew, nephew_side)) => {
                    let parent_color = self.nodes[parent].color;
                    if nephew_side == sibling_side {
                        // Outer nephew: left-left / right-right
                        let sibling_color = self.nodes[sibling].color;
                        self.set_color(nephew, sibling_color);
                        self.set_color(sibling, parent_color);
                        self.rotate(parent, side);
                    } else {
                        // Inner nephew: left-right / right-left
                        self.set_color(nephew, parent_color);
                        self.rotate(sibling, sibling_side);
                        self.rotate(parent, side);
                    }
                    self.set_color(parent, Color::Black);
                    return;
                }
                None => {
                    self.set_color(sibling, Color::Red);
                    if self.nodes[parent].is_red() {
                        self.set_color(parent, Color::Black);
                        return;
                    }
                    key = parent;
                }
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

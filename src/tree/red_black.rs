//! `RedBlackTree` — an ordered map backed by an index arena.
//!
//! Nodes live in a single `Vec` and link to each other through `u32` indices
//! with a `NIL` sentinel, so child and parent ownership is explicit and every
//! rotation and fixup is a loop rather than a recursive call. Removing a node
//! swap-removes its arena slot and relinks whichever node moved into it,
//! keeping the arena dense with no free list or `Option` wrappers.
//!
//! Balance invariants (checked by `assert_invariants` in tests):
//! - the root is black
//! - a red node never has a red child
//! - every root-to-leaf path crosses the same number of black nodes
//!
//! Together these bound the height at \(2\log_2(n+1)\), so `insert`, `get`
//! and `remove` are all O(log n).

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;

const NIL: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

struct Node<K, V> {
    key: K,
    value: V,
    color: Color,
    parent: u32,
    left: u32,
    right: u32,
}

/// An ordered map with logarithmic insert, lookup, and removal.
///
/// Iteration order is ascending by key. The tree owns all nodes exclusively;
/// there is no internal synchronization.
pub struct RedBlackTree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: u32,
}

impl<K, V> RedBlackTree<K, V> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: NIL,
        }
    }

    /// Creates an empty tree with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: NIL,
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = NIL;
    }

    /// Returns a lazy in-order iterator over `(key, value)` pairs in
    /// ascending key order.
    ///
    /// The iterator borrows the tree; calling `iter` again restarts the
    /// traversal from the smallest key.
    pub fn iter(&self) -> InOrderIter<'_, K, V> {
        let mut iter = InOrderIter {
            tree: self,
            stack: Vec::new(),
            remaining: self.len(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    // NIL-safe link accessors. `color(NIL)` is black, matching the sentinel
    // leaf convention.

    fn color(&self, n: u32) -> Color {
        if n == NIL {
            Color::Black
        } else {
            self.nodes[n as usize].color
        }
    }

    fn set_color(&mut self, n: u32, color: Color) {
        if n != NIL {
            self.nodes[n as usize].color = color;
        }
    }

    fn parent(&self, n: u32) -> u32 {
        self.nodes[n as usize].parent
    }

    fn left(&self, n: u32) -> u32 {
        self.nodes[n as usize].left
    }

    fn right(&self, n: u32) -> u32 {
        self.nodes[n as usize].right
    }

    /// Rotates left around `x`; `x.right` must not be `NIL`.
    fn rotate_left(&mut self, x: u32) {
        let y = self.right(x);
        debug_assert_ne!(y, NIL);
        let inner = self.left(y);

        self.nodes[x as usize].right = inner;
        if inner != NIL {
            self.nodes[inner as usize].parent = x;
        }

        let up = self.parent(x);
        self.nodes[y as usize].parent = up;
        if up == NIL {
            self.root = y;
        } else if self.left(up) == x {
            self.nodes[up as usize].left = y;
        } else {
            self.nodes[up as usize].right = y;
        }

        self.nodes[y as usize].left = x;
        self.nodes[x as usize].parent = y;
    }

    /// Rotates right around `x`; `x.left` must not be `NIL`.
    fn rotate_right(&mut self, x: u32) {
        let y = self.left(x);
        debug_assert_ne!(y, NIL);
        let inner = self.right(y);

        self.nodes[x as usize].left = inner;
        if inner != NIL {
            self.nodes[inner as usize].parent = x;
        }

        let up = self.parent(x);
        self.nodes[y as usize].parent = up;
        if up == NIL {
            self.root = y;
        } else if self.right(up) == x {
            self.nodes[up as usize].right = y;
        } else {
            self.nodes[up as usize].left = y;
        }

        self.nodes[y as usize].right = x;
        self.nodes[x as usize].parent = y;
    }

    /// Replaces the subtree rooted at `u` with the one rooted at `v`
    /// (either may become the root; `v` may be `NIL`).
    fn transplant(&mut self, u: u32, v: u32) {
        let up = self.parent(u);
        if up == NIL {
            self.root = v;
        } else if self.left(up) == u {
            self.nodes[up as usize].left = v;
        } else {
            self.nodes[up as usize].right = v;
        }
        if v != NIL {
            self.nodes[v as usize].parent = up;
        }
    }

    fn min_index(&self, mut n: u32) -> u32 {
        while self.left(n) != NIL {
            n = self.left(n);
        }
        n
    }
}

impl<K: Ord, V> RedBlackTree<K, V> {
    /// Inserts a key-value pair, returning the previous value for the key
    /// if one was present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut parent = NIL;
        let mut cursor = self.root;
        let mut went_left = false;

        while cursor != NIL {
            match key.cmp(&self.nodes[cursor as usize].key) {
                Ordering::Less => {
                    parent = cursor;
                    went_left = true;
                    cursor = self.left(cursor);
                }
                Ordering::Greater => {
                    parent = cursor;
                    went_left = false;
                    cursor = self.right(cursor);
                }
                Ordering::Equal => {
                    return Some(core::mem::replace(
                        &mut self.nodes[cursor as usize].value,
                        value,
                    ));
                }
            }
        }

        debug_assert!(self.nodes.len() < NIL as usize);
        let fresh = self.nodes.len() as u32;
        self.nodes.push(Node {
            key,
            value,
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
        });
        if parent == NIL {
            self.root = fresh;
        } else if went_left {
            self.nodes[parent as usize].left = fresh;
        } else {
            self.nodes[parent as usize].right = fresh;
        }

        self.insert_fixup(fresh);
        None
    }

    /// Restores the red-black invariants after inserting red node `z`.
    fn insert_fixup(&mut self, mut z: u32) {
        while self.color(self.parent(z)) == Color::Red {
            let p = self.parent(z);
            // A red parent is never the root, so the grandparent exists.
            let g = self.parent(p);
            if p == self.left(g) {
                let uncle = self.right(g);
                if self.color(uncle) == Color::Red {
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    if z == self.right(p) {
                        z = p;
                        self.rotate_left(z);
                    }
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_right(g);
                }
            } else {
                let uncle = self.left(g);
                if self.color(uncle) == Color::Red {
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    if z == self.left(p) {
                        z = p;
                        self.rotate_right(z);
                    }
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_left(g);
                }
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Returns a reference to the value associated with `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_index(key)
            .map(|n| &self.nodes[n as usize].value)
    }

    /// Returns a mutable reference to the value associated with `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_index(key)
            .map(|n| &mut self.nodes[n as usize].value)
    }

    /// Returns `true` if the tree contains `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_index(key).is_some()
    }

    /// Returns the smallest `(key, value)` pair.
    pub fn first(&self) -> Option<(&K, &V)> {
        if self.root == NIL {
            return None;
        }
        let n = self.min_index(self.root) as usize;
        Some((&self.nodes[n].key, &self.nodes[n].value))
    }

    /// Removes `key` from the tree, returning its value if present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let target = self.find_index(key)?;
        Some(self.remove_at(target))
    }

    fn find_index<Q>(&self, key: &Q) -> Option<u32>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = self.root;
        while cursor != NIL {
            cursor = match key.cmp(self.nodes[cursor as usize].key.borrow()) {
                Ordering::Less => self.left(cursor),
                Ordering::Greater => self.right(cursor),
                Ordering::Equal => return Some(cursor),
            };
        }
        None
    }

    /// Unlinks node `z`, rebalances, and releases its arena slot.
    fn remove_at(&mut self, z: u32) -> V {
        // `fill` is the node moving into the vacated tree position (may be
        // NIL) and `fill_parent` its parent, tracked separately because NIL
        // carries no parent link.
        let fill;
        let fill_parent;
        let mut removed_color = self.nodes[z as usize].color;

        if self.left(z) == NIL {
            fill = self.right(z);
            fill_parent = self.parent(z);
            self.transplant(z, fill);
        } else if self.right(z) == NIL {
            fill = self.left(z);
            fill_parent = self.parent(z);
            self.transplant(z, fill);
        } else {
            // Two children: the in-order successor takes z's place.
            let succ = self.min_index(self.right(z));
            removed_color = self.nodes[succ as usize].color;
            fill = self.right(succ);

            if self.parent(succ) == z {
                fill_parent = succ;
            } else {
                fill_parent = self.parent(succ);
                self.transplant(succ, fill);
                let zr = self.right(z);
                self.nodes[succ as usize].right = zr;
                self.nodes[zr as usize].parent = succ;
            }

            self.transplant(z, succ);
            let zl = self.left(z);
            self.nodes[succ as usize].left = zl;
            self.nodes[zl as usize].parent = succ;
            let zc = self.nodes[z as usize].color;
            self.nodes[succ as usize].color = zc;
        }

        if removed_color == Color::Black {
            self.remove_fixup(fill, fill_parent);
        }
        self.release(z)
    }

    /// Restores the red-black invariants after removing a black node.
    ///
    /// `x` is the node inheriting the missing black height (possibly `NIL`)
    /// and `xp` its parent.
    fn remove_fixup(&mut self, mut x: u32, mut xp: u32) {
        #[cfg(feature = "tracing")]
        tracing::trace!(node = x, "red-black remove fixup");

        while x != self.root && self.color(x) == Color::Black {
            if xp == NIL {
                break;
            }
            if x == self.left(xp) {
                let mut sibling = self.right(xp);
                if self.color(sibling) == Color::Red {
                    self.set_color(sibling, Color::Black);
                    self.set_color(xp, Color::Red);
                    self.rotate_left(xp);
                    sibling = self.right(xp);
                }
                if self.color(self.left(sibling)) == Color::Black
                    && self.color(self.right(sibling)) == Color::Black
                {
                    self.set_color(sibling, Color::Red);
                    x = xp;
                    xp = self.parent(x);
                } else {
                    if self.color(self.right(sibling)) == Color::Black {
                        let inner = self.left(sibling);
                        self.set_color(inner, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self.right(xp);
                    }
                    let parent_color = self.color(xp);
                    self.set_color(sibling, parent_color);
                    self.set_color(xp, Color::Black);
                    let outer = self.right(sibling);
                    self.set_color(outer, Color::Black);
                    self.rotate_left(xp);
                    x = self.root;
                    xp = NIL;
                }
            } else {
                let mut sibling = self.left(xp);
                if self.color(sibling) == Color::Red {
                    self.set_color(sibling, Color::Black);
                    self.set_color(xp, Color::Red);
                    self.rotate_right(xp);
                    sibling = self.left(xp);
                }
                if self.color(self.right(sibling)) == Color::Black
                    && self.color(self.left(sibling)) == Color::Black
                {
                    self.set_color(sibling, Color::Red);
                    x = xp;
                    xp = self.parent(x);
                } else {
                    if self.color(self.left(sibling)) == Color::Black {
                        let inner = self.right(sibling);
                        self.set_color(inner, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self.left(xp);
                    }
                    let parent_color = self.color(xp);
                    self.set_color(sibling, parent_color);
                    self.set_color(xp, Color::Black);
                    let outer = self.left(sibling);
                    self.set_color(outer, Color::Black);
                    self.rotate_right(xp);
                    x = self.root;
                    xp = NIL;
                }
            }
        }
        self.set_color(x, Color::Black);
    }

    /// Swap-removes the detached node `z` from the arena and relinks the
    /// node that moved into its slot.
    fn release(&mut self, z: u32) -> V {
        let last = (self.nodes.len() - 1) as u32;
        let node = self.nodes.swap_remove(z as usize);
        if z != last {
            // The node formerly at `last` now lives at `z`; its neighbors
            // still point at `last`.
            let (p, l, r) = {
                let moved = &self.nodes[z as usize];
                (moved.parent, moved.left, moved.right)
            };
            if p == NIL {
                self.root = z;
            } else if self.left(p) == last {
                self.nodes[p as usize].left = z;
            } else {
                self.nodes[p as usize].right = z;
            }
            if l != NIL {
                self.nodes[l as usize].parent = z;
            }
            if r != NIL {
                self.nodes[r as usize].parent = z;
            }
        }
        node.value
    }
}

impl<K, V> Default for RedBlackTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V> fmt::Debug for RedBlackTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedBlackTree")
            .field("len", &self.len())
            .finish()
    }
}

/// Lazy in-order iterator over a [`RedBlackTree`].
///
/// Holds an explicit stack of the left spine instead of recursing; yields
/// `(key, value)` pairs in ascending key order.
pub struct InOrderIter<'a, K, V> {
    tree: &'a RedBlackTree<K, V>,
    stack: Vec<u32>,
    remaining: usize,
}

impl<K, V> InOrderIter<'_, K, V> {
    fn push_left_spine(&mut self, mut n: u32) {
        while n != NIL {
            self.stack.push(n);
            n = self.tree.left(n);
        }
    }
}

impl<'a, K, V> Iterator for InOrderIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.stack.pop()?;
        self.push_left_spine(self.tree.right(n));
        self.remaining -= 1;
        let node = &self.tree.nodes[n as usize];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for InOrderIter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a RedBlackTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = InOrderIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

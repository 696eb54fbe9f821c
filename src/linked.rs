//! A linked BST. Every node exclusively owns its children through a `Box` so the tree is acyclic
//! by construction and no parent pointers are kept. Insertion never rebalances; call
//! [`Tree::rebalance`] to rebuild the tree into a minimal-height shape when it has degenerated.
//!
//! # Examples
//!
//! ```
//! use linked_bst::{Error, Tree};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.add(1);
//! tree.add(2);
//! assert_eq!(tree.find(&1), Some(&1));
//! assert_eq!(tree.len(), 2);
//!
//! // Removing an item hands it back.
//! assert_eq!(tree.remove(&1), Ok(1));
//! assert_eq!(tree.remove(&1), Err(Error::NotFound));
//! assert_eq!(tree.find(&1), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use tracing::{debug, enabled, trace, Level};

use crate::error::{Error, Result};
use crate::iter::{Inorder, Iter, Levelorder, Postorder};

/// An owned, possibly empty, subtree.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// An unbalanced Binary Search Tree storing ordered items. Equal items are allowed: `add` routes
/// them to the right of the first equal node it meets, and the lookups act on the first equal
/// node on the search path.
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

/// A `Node` holds one item and up to two children.
pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(item: T) -> Box<Self> {
        Box::new(Self {
            item,
            left: None,
            right: None,
        })
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Tree<T> {
    /// Copies the tree node by node, keeping its shape. The source is walked in post-order with
    /// an explicit stack so both copied children are ready by the time their parent is copied.
    fn clone(&self) -> Self {
        let mut copied: Vec<Box<Node<T>>> = Vec::new();
        let mut pending: Vec<(&Node<T>, bool)> =
            self.root.as_deref().map(|n| (n, false)).into_iter().collect();
        while let Some((node, expanded)) = pending.pop() {
            if !expanded {
                pending.push((node, true));
                pending.extend(node.right.as_deref().map(|n| (n, false)));
                pending.extend(node.left.as_deref().map(|n| (n, false)));
                continue;
            }

            // The right copy was finished last, so it sits on top.
            let right = node.right.as_ref().and_then(|_| copied.pop());
            let left = node.left.as_ref().and_then(|_| copied.pop());
            copied.push(Box::new(Node {
                item: node.item.clone(),
                left,
                right,
            }));
        }

        Self {
            root: copied.pop(),
            len: self.len,
        }
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of items stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Potentially finds the stored item equal to `item`. If no node holds an equal item, `None`
    /// is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match item.cmp(&node.item) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Some(&node.item),
                Ordering::Greater => node.right.as_deref(),
            };
        }

        None
    }

    /// Whether an item equal to `item` is stored in the tree.
    pub fn contains(&self, item: &T) -> bool
    where
        T: Ord,
    {
        self.find(item).is_some()
    }

    /// Adds `item` as a new leaf. Items that compare equal to an existing item are kept and go to
    /// its right. The tree is never rebalanced as a side effect.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(1);
    /// tree.add(1);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.inorder().collect::<Vec<_>>(), [&1, &1]);
    /// ```
    pub fn add(&mut self, item: T)
    where
        T: Ord,
    {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = if item < node.item {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        *link = Some(Node::new_boxed(item));
        self.len += 1;
    }

    /// Removes the first node holding an item equal to `item` and returns the stored item. If the
    /// tree holds no such item, [`Error::NotFound`] is returned and the tree is left untouched.
    ///
    /// A node with two children keeps its place: the largest item of its left subtree is moved
    /// into it and that item's node is spliced out instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Error, Tree};
    ///
    /// let mut tree: Tree<_> = [5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&5), Ok(5));
    /// assert_eq!(tree.remove(&5), Err(Error::NotFound));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove(&mut self, item: &T) -> Result<T>
    where
        T: Ord,
    {
        // `link` is the parent's slot for the matching node, which for the root is the tree's
        // own `root` field, so removing the root needs no special case.
        let link = locate_mut(&mut self.root, item);
        let Some(mut node) = link.take() else {
            return Err(Error::NotFound);
        };

        let removed = if node.right.is_some() {
            match pop_max(&mut node.left) {
                Some(max) => {
                    let removed = mem::replace(&mut node.item, max);
                    *link = Some(node);
                    removed
                }
                None => {
                    let Node { item, right, .. } = *node;
                    *link = right;
                    item
                }
            }
        } else {
            let Node { item, left, .. } = *node;
            *link = left;
            item
        };

        self.len -= 1;
        Ok(removed)
    }

    /// Overwrites the first stored item equal to `item` with `new_item` and returns the previous
    /// item. The shape of the tree is not changed, so `new_item` must order the same way as the
    /// item it replaces.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.replace(&3, 3), Some(3));
    /// assert_eq!(tree.replace(&4, 4), None);
    /// ```
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T>
    where
        T: Ord,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match item.cmp(&node.item) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Equal => return Some(mem::replace(&mut node.item, new_item)),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }

        None
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        trace!(len = self.len, "clearing tree");
        release(self.root.take());
        self.len = 0;
    }

    /// The number of edges on the longest path from the root to a leaf. A single node has a
    /// height of 0 and the empty tree has a height of -1.
    pub fn height(&self) -> isize {
        let mut height = -1;
        let mut stack: Vec<(&Node<T>, isize)> =
            self.root.as_deref().map(|n| (n, 0)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }

        height
    }

    /// Whether the tree is reasonably close to a perfect tree, i.e.
    /// `height <= 2 * log2(len + 1) - 1`. This is a check only. Nothing enforces it.
    pub fn is_balanced(&self) -> bool {
        let bound = 2.0 * ((self.len + 1) as f64).log2() - 1.0;
        self.height() as f64 <= bound
    }

    /// Rebuilds the tree into a minimal-height shape holding the same items. The middle item of
    /// the sorted items becomes the root and each half is built the same way, so the resulting
    /// height is `floor(log2(len))`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = (0..15).collect();
    /// assert_eq!(tree.height(), 14);
    /// assert!(!tree.is_balanced());
    ///
    /// tree.rebalance();
    /// assert_eq!(tree.height(), 3);
    /// assert!(tree.is_balanced());
    /// assert!(tree.inorder().copied().eq(0..15));
    /// ```
    pub fn rebalance(&mut self) {
        // Both heights are full walks and only feed the debug event.
        let height_before = enabled!(Level::DEBUG).then(|| self.height());
        let items = drain_inorder(self.root.take(), self.len);
        self.len = items.len();
        self.root = build_balanced(items.len(), &mut items.into_iter());

        if let Some(height_before) = height_before {
            debug!(
                len = self.len,
                height_before,
                height_after = self.height(),
                "rebalanced tree"
            );
        }
    }

    /// Returns, in ascending order, every stored item within `low..=high`. Subtrees entirely
    /// outside the range are not visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.range_find(&3, &7), [&3, &4, &5, &7]);
    /// assert!(tree.range_find(&10, &20).is_empty());
    /// ```
    pub fn range_find(&self, low: &T, high: &T) -> Vec<&T>
    where
        T: Ord,
    {
        let mut found = Vec::new();
        let mut stack = Vec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                // Everything left of an item below `low` is below `low` as well.
                if node.item < *low {
                    current = node.right.as_deref();
                } else {
                    stack.push(node);
                    current = node.left.as_deref();
                }
            }

            let Some(node) = stack.pop() else {
                break;
            };
            if node.item > *high {
                break;
            }
            found.push(&node.item);
            current = node.right.as_deref();
        }

        found
    }

    /// The smallest stored item strictly greater than `item`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&3), Some(&5));
    /// assert_eq!(tree.successor(&4), Some(&5));
    /// assert_eq!(tree.successor(&8), None);
    /// ```
    pub fn successor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut candidate = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.item > *item {
                candidate = Some(&node.item);
                current = node.left.as_deref();
            } else {
                current = node.right.as_deref();
            }
        }

        candidate
    }

    /// The largest stored item strictly less than `item`, if any.
    pub fn predecessor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut candidate = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.item < *item {
                candidate = Some(&node.item);
                current = node.right.as_deref();
            } else {
                current = node.left.as_deref();
            }
        }

        candidate
    }

    /// Iterates over the items in pre-order (node, left subtree, right subtree). This is the
    /// default iteration order of a `Tree`.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref())
    }

    /// Iterates over the items in ascending order.
    pub fn inorder(&self) -> Inorder<'_, T> {
        Inorder::new(self.root.as_deref())
    }

    /// Iterates over the items in post-order (left subtree, right subtree, node).
    pub fn postorder(&self) -> Postorder<'_, T> {
        Postorder::new(self.root.as_deref())
    }

    /// Iterates over the items level by level, left to right within a level.
    pub fn levelorder(&self) -> Levelorder<'_, T> {
        Levelorder::new(self.root.as_deref())
    }
}

/// Follows the search path for `item` and returns the slot holding the first node with an equal
/// item, or the empty slot where the search ended.
fn locate_mut<'a, T: Ord>(mut link: &'a mut Link<T>, item: &T) -> &'a mut Link<T> {
    loop {
        let ordering = match link.as_deref() {
            Some(node) => item.cmp(&node.item),
            None => return link,
        };
        if ordering == Ordering::Equal {
            return link;
        }

        let Some(node) = link else {
            return link;
        };
        link = if ordering == Ordering::Less {
            &mut node.left
        } else {
            &mut node.right
        };
    }
}

/// Splices the rightmost node out of the subtree in `link` and returns its item. The node has no
/// right child so its left child takes its place.
fn pop_max<T>(mut link: &mut Link<T>) -> Option<T> {
    while link.as_ref().is_some_and(|node| node.right.is_some()) {
        link = &mut link.as_mut()?.right;
    }

    let Node { item, left, .. } = *link.take()?;
    *link = left;
    Some(item)
}

/// Moves every item out of the subtree in ascending order.
fn drain_inorder<T>(root: Link<T>, len: usize) -> Vec<T> {
    let mut items = Vec::with_capacity(len);
    let mut stack = Vec::new();
    let mut current = root;
    loop {
        while let Some(mut node) = current {
            current = node.left.take();
            stack.push(node);
        }

        let Some(node) = stack.pop() else {
            break;
        };
        let Node { item, right, .. } = *node;
        items.push(item);
        current = right;
    }

    items
}

/// Builds a minimal-height subtree from the next `len` items of the sorted `items`.
fn build_balanced<T, I>(len: usize, items: &mut I) -> Link<T>
where
    I: Iterator<Item = T>,
{
    if len == 0 {
        return None;
    }

    let mid = len / 2;
    let left = build_balanced(mid, items);
    let item = items.next()?;
    let right = build_balanced(len - mid - 1, items);

    Some(Box::new(Node { item, left, right }))
}

/// Drops a subtree without recursing, so degenerate trees can't overflow the stack.
fn release<T>(root: Link<T>) {
    let mut stack: Vec<Box<Node<T>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inorder()).finish()
    }
}

/// Draws the tree rotated 90 degrees counter-clockwise: one item per line, the right subtree
/// above its parent, each line indented by one `"| "` per level of depth.
impl<T: fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = Vec::new();
        let mut current = self.root.as_deref();
        let mut level = 0;
        loop {
            if let Some(node) = current {
                stack.push((node, level));
                current = node.right.as_deref();
                level += 1;
            } else if let Some((node, depth)) = stack.pop() {
                writeln!(f, "{}{}", "| ".repeat(depth), node.item)?;
                current = node.left.as_deref();
                level = depth + 1;
            } else {
                break;
            }
        }

        Ok(())
    }
}

//! Borrowing traversals over a [`Tree`][crate::Tree]. Each one keeps its own explicit stack (or
//! queue) instead of recursing, so degenerate trees are walked in constant call-stack space.

use std::collections::VecDeque;

use crate::linked::Node;

/// Pre-order iterator: a node, then its left subtree, then its right subtree. Created by
/// [`Tree::iter`][crate::Tree::iter].
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so the left subtree is popped first.
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some(&node.item)
    }
}

/// In-order (ascending) iterator. Created by [`Tree::inorder`][crate::Tree::inorder].
pub struct Inorder<'a, T> {
    stack: Vec<&'a Node<T>>,
    current: Option<&'a Node<T>>,
}

impl<'a, T> Inorder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: Vec::new(),
            current: root,
        }
    }
}

impl<'a, T> Iterator for Inorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = node.left.as_deref();
        }

        let node = self.stack.pop()?;
        self.current = node.right.as_deref();
        Some(&node.item)
    }
}

/// Post-order iterator: left subtree, right subtree, then the node. Created by
/// [`Tree::postorder`][crate::Tree::postorder].
pub struct Postorder<'a, T> {
    /// Nodes paired with whether their children have already been scheduled.
    stack: Vec<(&'a Node<T>, bool)>,
}

impl<'a, T> Postorder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: root.map(|n| (n, false)).into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for Postorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded {
                return Some(&node.item);
            }

            self.stack.push((node, true));
            self.stack.extend(node.right.as_deref().map(|n| (n, false)));
            self.stack.extend(node.left.as_deref().map(|n| (n, false)));
        }
    }
}

/// Breadth-first iterator. Created by [`Tree::levelorder`][crate::Tree::levelorder].
pub struct Levelorder<'a, T> {
    queue: VecDeque<&'a Node<T>>,
}

impl<'a, T> Levelorder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for Levelorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left.as_deref());
        self.queue.extend(node.right.as_deref());
        Some(&node.item)
    }
}

#[cfg(test)]
mod tests {
    use crate::Tree;

    #[test]
    fn traversals_of_a_single_branch() {
        let tree: Tree<_> = [3, 2, 1].into_iter().collect();

        assert_eq!(tree.iter().collect::<Vec<_>>(), [&3, &2, &1]);
        assert_eq!(tree.inorder().collect::<Vec<_>>(), [&1, &2, &3]);
        assert_eq!(tree.postorder().collect::<Vec<_>>(), [&1, &2, &3]);
        assert_eq!(tree.levelorder().collect::<Vec<_>>(), [&3, &2, &1]);
    }

    #[test]
    fn traversals_are_restartable() {
        let tree: Tree<_> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();

        let first: Vec<_> = tree.inorder().collect();
        let second: Vec<_> = tree.inorder().collect();
        assert_eq!(first, second);
        assert_eq!(tree.iter().count(), 7);
        assert_eq!(tree.postorder().count(), 7);
        assert_eq!(tree.levelorder().count(), 7);
    }

    #[test]
    fn empty_traversals() {
        let tree = Tree::<u8>::new();

        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.inorder().next(), None);
        assert_eq!(tree.postorder().next(), None);
        assert_eq!(tree.levelorder().next(), None);
    }
}

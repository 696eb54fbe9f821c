//! This crate exposes a linked, on-demand balanced Binary Search Tree (BST).
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! add, find, and remove stored items. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores one item and
//! may have up to two child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have an
//!    item that does not follow its own item.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have an
//!    item that does not precede its own item.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for items in the tree takes `O(height)` (where `height` is defined as
//! the longest path from the root `Node` to a leaf `Node`). The tree in this crate
//! never rebalances itself: adding items in sorted order degenerates it into a
//! linked list of height `N - 1`. [`Tree::rebalance`] rebuilds it in `O(N)` into a
//! tree of height `floor(lg N)`, and [`Tree::is_balanced`] tells whether that is
//! worth doing. BSTs also naturally support sorted iteration by visiting the
//! left subtree, then the subtree root, then the right subtree.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod iter;
pub mod linked;

pub use error::{Error, Result};
pub use linked::Tree;

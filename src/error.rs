//! Error type shared by the fallible tree operations.

use thiserror::Error;

/// Result type alias for fallible tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by [`Tree`][crate::linked::Tree] operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested item is not stored in the tree (this includes every lookup on an empty
    /// tree).
    #[error("item not found in tree")]
    NotFound,
}

use thiserror::Error;

/// Errors that can occur when operating on the list.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// `None` was given as the insertion point of a non-empty list.
    #[error("cannot append to null position in a non-empty list")]
    InvalidPosition,

    #[error("invalid handle")]
    InvalidHandle,

    #[error("handle belongs to another list")]
    ForeignHandle,
}

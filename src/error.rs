//! Tree error types.

use crate::view::ViewId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no such view: {0}")]
    NoSuchView(ViewId),

    #[error("view is not a container: {0}")]
    NotAContainer(ViewId),

    #[error("view is not a scrolling container: {0}")]
    NotScrolling(ViewId),

    #[error("view already has a superview: {0}")]
    AlreadyAttached(ViewId),

    #[error("adding {subview} to {superview} would create a cycle")]
    WouldCycle { superview: ViewId, subview: ViewId },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Tree invariant violations.

use thiserror::Error;

use crate::node::NodeId;

/// A refused tree operation.
///
/// Every variant is logged at [`LogLevel::Fatal`](pliant_common::LogLevel)
/// through the node's config logger before it is returned. The tree is left
/// unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The child is still attached to another owner.
    #[error("child {child:?} already has an owner, it must be removed first")]
    ChildHasOwner {
        /// The node being inserted.
        child: NodeId,
    },

    /// Nodes with a measure callback are leaves.
    #[error("cannot add child to {owner:?}: nodes with measure functions cannot have children")]
    MeasuredNodeCannotHaveChildren {
        /// The would-be owner.
        owner: NodeId,
    },

    /// A measure callback was set on a node that already has children.
    #[error("cannot set measure function on {node:?}: nodes with measure functions cannot have children")]
    CannotSetMeasureWithChildren {
        /// The node with children.
        node: NodeId,
    },

    /// Reset requires a detached, childless node.
    #[error("cannot reset {node:?}: it still has children attached")]
    ResetWithChildren {
        /// The node being reset.
        node: NodeId,
    },

    /// Reset requires a detached, childless node.
    #[error("cannot reset {node:?}: it is still attached to an owner")]
    ResetWithOwner {
        /// The node being reset.
        node: NodeId,
    },

    /// Only measured leaves may be marked dirty by hand.
    #[error("only leaf nodes with custom measure functions should manually mark themselves as dirty ({node:?})")]
    MarkDirtyWithoutMeasure {
        /// The node without a measure callback.
        node: NodeId,
    },

    /// The id was never allocated or has been freed.
    #[error("unknown or freed node {0:?}")]
    UnknownNode(NodeId),

    /// A child index past the end of the children list.
    #[error("child index {index} out of bounds for {owner:?} with {len} children")]
    IndexOutOfBounds {
        /// The owner.
        owner: NodeId,
        /// The requested index.
        index: usize,
        /// The owner's child count.
        len: usize,
    },

    /// Point scale factors must be zero (rounding off) or positive.
    #[error("scale factor should not be less than zero")]
    NegativeScaleFactor,
}

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

//! State threaded through one top-level layout call.

use std::any::Any;

use pliant_tree::{LayoutStats, Tree};

/// One run of the algorithm over a tree.
///
/// Holds the tree exclusively for the duration of the call, the generation
/// stamp used to age caches, the caller's layout context and the counters
/// reported back to the caller.
pub(crate) struct LayoutPass<'a> {
    pub(crate) tree: &'a mut Tree,
    pub(crate) context: Option<&'a dyn Any>,
    pub(crate) generation: u32,
    pub(crate) stats: LayoutStats,
    pub(crate) depth: u32,
}

impl<'a> LayoutPass<'a> {
    pub(crate) fn new(tree: &'a mut Tree, context: Option<&'a dyn Any>, generation: u32) -> Self {
        Self {
            tree,
            context,
            generation,
            stats: LayoutStats::default(),
            depth: 0,
        }
    }
}

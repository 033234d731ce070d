//! Front end for the `pliant` binary.
//!
//! Reads a JSON [`document::Document`], builds the tree, lays it out and
//! renders the result with [`report`].

pub mod document;
pub mod report;

use anyhow::Result;
use pliant_layout::compute_layout;
use pliant_style::Direction;
use pliant_tree::{ConfigId, LayoutStats, NodeId, Tree};

use crate::document::{Document, build};

/// Space offered to the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Owner width; NaN lets the root size itself.
    pub width: f32,
    /// Owner height; NaN lets the root size itself.
    pub height: f32,
    /// Direction the root inherits.
    pub direction: Direction,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: f32::NAN,
            height: f32::NAN,
            direction: Direction::Ltr,
        }
    }
}

/// A tree after one layout pass.
pub struct LaidOut {
    /// The built tree.
    pub tree: Tree,
    /// Its root.
    pub root: NodeId,
    /// Counters from the pass.
    pub stats: LayoutStats,
}

/// Build `document` and lay it out inside `viewport`.
///
/// # Errors
///
/// Returns an error if the document describes an invalid tree or a
/// negative scale factor.
pub fn lay_out(document: &Document, viewport: Viewport) -> Result<LaidOut> {
    let scale = document.config.point_scale_factor;
    let mut tree = Tree::with_settings(document.config.clone());
    tree.set_point_scale_factor(ConfigId::DEFAULT, scale)?;
    let root = build(&mut tree, &document.root)?;
    let stats = compute_layout(
        &mut tree,
        root,
        viewport.width,
        viewport.height,
        viewport.direction,
    );
    Ok(LaidOut { tree, root, stats })
}

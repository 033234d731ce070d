//! Rendering computed layouts for the terminal or as JSON.

use std::fmt::Write;

use owo_colors::OwoColorize;
use pliant_style::Edge;
use pliant_tree::{LayoutStats, NodeId, Tree};
use serde::Serialize;

use crate::document::node_name;

/// Computed geometry of one node and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeReport {
    /// Label from the input document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Offset from the owner's left edge.
    pub left: f32,
    /// Offset from the owner's top edge.
    pub top: f32,
    /// Border-box width.
    pub width: f32,
    /// Border-box height.
    pub height: f32,
    /// Children in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeReport>,
}

impl NodeReport {
    /// Collect the layout of the subtree rooted at `id`.
    #[must_use]
    pub fn collect(tree: &Tree, id: NodeId) -> Self {
        let layout = &tree[id].layout;
        Self {
            name: node_name(tree, id),
            left: layout.left(),
            top: layout.top(),
            width: layout.width(),
            height: layout.height(),
            children: tree
                .children(id)
                .iter()
                .map(|&child| Self::collect(tree, child))
                .collect(),
        }
    }
}

/// Summary of a run, serialised by `--json`.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// The laid-out tree.
    pub layout: NodeReport,
    /// Whether disabling legacy stretch would change the result.
    pub legacy_stretch_affects_layout: bool,
    /// Counters from the pass.
    pub stats: StatsReport,
}

/// Serialisable copy of [`LayoutStats`].
#[derive(Debug, Serialize)]
pub struct StatsReport {
    layouts: u32,
    measures: u32,
    cached_layouts: u32,
    cached_measures: u32,
    measure_callbacks: u32,
    max_depth: u32,
}

impl From<LayoutStats> for StatsReport {
    fn from(stats: LayoutStats) -> Self {
        Self {
            layouts: stats.layouts,
            measures: stats.measures,
            cached_layouts: stats.cached_layouts,
            cached_measures: stats.cached_measures,
            measure_callbacks: stats.measure_callbacks,
            max_depth: stats.max_depth,
        }
    }
}

/// Indented, colored outline of the subtree rooted at `id`.
#[must_use]
pub fn outline(tree: &Tree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(&mut out, tree, id, 0);
    out
}

fn write_node(out: &mut String, tree: &Tree, id: NodeId, depth: usize) {
    let indent = "  ".repeat(depth);
    let layout = &tree[id].layout;
    let name = node_name(tree, id).unwrap_or_else(|| format!("{id:?}"));
    let geometry = format!(
        "x={:.1} y={:.1} w={:.1} h={:.1}",
        layout.left(),
        layout.top(),
        layout.width(),
        layout.height()
    );
    let _ = writeln!(out, "{indent}{} {}", name.bold(), geometry.dimmed());

    let edges = [
        ("margin", layout.margin(Edge::Left), layout.margin(Edge::Top)),
        ("padding", layout.padding(Edge::Left), layout.padding(Edge::Top)),
        ("border", layout.border(Edge::Left), layout.border(Edge::Top)),
    ];
    for (label, left, top) in edges {
        let (left, top) = (left.unwrap_or(0.0), top.unwrap_or(0.0));
        if left != 0.0 || top != 0.0 {
            let _ = writeln!(out, "{indent}    {}: l={left:.1} t={top:.1}", label.cyan());
        }
    }
    if layout.had_overflow {
        let _ = writeln!(out, "{indent}    {}", "overflow".yellow());
    }

    for &child in tree.children(id) {
        write_node(out, tree, child, depth + 1);
    }
}

/// One-line pass summary.
#[must_use]
pub fn stats_line(stats: &LayoutStats) -> String {
    format!(
        "{} layouts, {} measures, {} cache hits, {} measure callbacks, depth {}",
        stats.layouts,
        stats.measures,
        stats.cached_layouts + stats.cached_measures,
        stats.measure_callbacks,
        stats.max_depth
    )
    .green()
    .to_string()
}

//! JSON input documents.
//!
//! ```json
//! {
//!   "config": { "point_scale_factor": 2.0 },
//!   "root": {
//!     "name": "root",
//!     "style": { "flex-direction": "row", "dimensions": { "width": 300 } },
//!     "children": [
//!       { "name": "label", "measure": { "width": 120, "height": 18 }, "baseline": 14 }
//!     ]
//!   }
//! }
//! ```
//!
//! `style` keys are merged over the node's default style, so a document
//! written for web defaults only lists what differs from them.

use std::rc::Rc;

use anyhow::{Context, Result};
use pliant_style::{MeasureMode, Style};
use pliant_tree::{BaselineRequest, ConfigSettings, MeasureRequest, NodeId, Size, Tree};
use serde::Deserialize;
use serde_json::{Map, Value as Json};

/// A whole input file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    /// Engine settings; every field is optional.
    #[serde(default)]
    pub config: ConfigSettings,
    /// The tree to lay out.
    pub root: NodeSpec,
}

/// One node of an input document.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeSpec {
    /// Label shown in the output.
    pub name: Option<String>,
    /// Style properties in their serialised form.
    pub style: Map<String, Json>,
    /// Intrinsic size of a leaf, as a text run would report it.
    pub measure: Option<FixedSize>,
    /// Baseline distance from the top.
    pub baseline: Option<f32>,
    /// Children in order.
    pub children: Vec<NodeSpec>,
}

/// Preferred size returned by a leaf's measure callback.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FixedSize {
    /// Preferred width.
    pub width: f32,
    /// Preferred height.
    pub height: f32,
}

impl FixedSize {
    /// Fit the preferred size into the offered constraints.
    #[must_use]
    pub fn fit(self, request: &MeasureRequest<'_>) -> Size {
        Size::new(
            fit_axis(self.width, request.width, request.width_mode),
            fit_axis(self.height, request.height, request.height_mode),
        )
    }
}

fn fit_axis(wanted: f32, available: f32, mode: MeasureMode) -> f32 {
    match mode {
        MeasureMode::Exactly => available,
        MeasureMode::AtMost => wanted.min(available),
        MeasureMode::Undefined => wanted,
    }
}

impl Document {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid layout document")
    }
}

/// Overlay the keys of `patch` on `base`.
///
/// # Errors
///
/// Returns an error if a key is unknown or a value does not parse.
pub fn merge_style(base: &Style, patch: &Map<String, Json>) -> Result<Style> {
    let mut merged = match serde_json::to_value(base)? {
        Json::Object(map) => map,
        _ => Map::new(),
    };
    for (key, value) in patch {
        anyhow::ensure!(
            merged.contains_key(key) || is_optional_key(key),
            "unknown style key `{key}`"
        );
        let _ = merged.insert(key.clone(), value.clone());
    }
    serde_json::from_value(Json::Object(merged)).context("invalid style value")
}

/// Keys skipped when unset, so they are absent from the serialised base.
fn is_optional_key(key: &str) -> bool {
    matches!(key, "flex" | "flex-grow" | "flex-shrink" | "aspect-ratio")
}

/// Create the nodes of `node` under `tree` and return the root.
///
/// On failure every node created so far is freed again.
///
/// # Errors
///
/// Returns an error if a style does not parse or the tree rejects the
/// structure, such as a measured node with children.
pub fn build(tree: &mut Tree, node: &NodeSpec) -> Result<NodeId> {
    let id = tree.new_node();
    if let Err(err) = populate(tree, id, node) {
        let _ = tree.free_recursive(id);
        return Err(err);
    }
    Ok(id)
}

fn populate(tree: &mut Tree, id: NodeId, node: &NodeSpec) -> Result<()> {
    let label = node.name.as_deref().unwrap_or("node");
    let style = merge_style(tree[id].style(), &node.style)
        .with_context(|| format!("style of `{label}`"))?;
    tree.update_style(id, |s| *s = style)?;
    if let Some(name) = &node.name {
        tree.set_context(id, Some(Rc::new(name.clone())))?;
    }
    if let Some(size) = node.measure {
        tree.set_measure_func(
            id,
            Some(Rc::new(move |request: &MeasureRequest<'_>| size.fit(request))),
        )?;
    }
    if let Some(baseline) = node.baseline {
        tree.set_baseline_func(id, Some(Rc::new(move |_: &BaselineRequest<'_>| baseline)))?;
    }
    for child_node in &node.children {
        let child = build(tree, child_node)?;
        if let Err(err) = tree.add_child(id, child) {
            let _ = tree.free_recursive(child);
            return Err(err).with_context(|| format!("adding a child to `{label}`"));
        }
    }
    Ok(())
}

/// The label a node was built with.
#[must_use]
pub fn node_name(tree: &Tree, id: NodeId) -> Option<String> {
    tree[id]
        .context()
        .and_then(|context| context.downcast_ref::<String>().cloned())
}

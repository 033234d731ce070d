//! A single box in the layout tree.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use pliant_style::{Dimension, DimensionValues, MeasureMode, NodeType, Style, Value};

use crate::config::ConfigId;
use crate::layout_result::LayoutResult;

/// A type-safe index into the node arena.
///
/// Ids are never reused. Using an id after its node was freed yields
/// [`TreeError::UnknownNode`](crate::TreeError::UnknownNode) from fallible
/// operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A width/height pair returned by measure callbacks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// A size of `width` by `height`.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Constraints handed to a measure callback.
#[derive(Clone, Copy)]
pub struct MeasureRequest<'a> {
    /// The node being measured.
    pub node: NodeId,
    /// Available inner width; NaN when `width_mode` is undefined.
    pub width: f32,
    /// How `width` constrains the result.
    pub width_mode: MeasureMode,
    /// Available inner height; NaN when `height_mode` is undefined.
    pub height: f32,
    /// How `height` constrains the result.
    pub height_mode: MeasureMode,
    /// Data attached to the node with `set_context`.
    pub node_context: Option<&'a dyn Any>,
    /// Data passed to `compute_layout_with_context`.
    pub layout_context: Option<&'a dyn Any>,
}

/// Arguments handed to a baseline callback.
#[derive(Clone, Copy)]
pub struct BaselineRequest<'a> {
    /// The node whose baseline is requested.
    pub node: NodeId,
    /// The node's measured width.
    pub width: f32,
    /// The node's measured height.
    pub height: f32,
    /// Data attached to the node with `set_context`.
    pub node_context: Option<&'a dyn Any>,
    /// Data passed to `compute_layout_with_context`.
    pub layout_context: Option<&'a dyn Any>,
}

/// Intrinsic sizing of a leaf, typically text.
pub type MeasureFunc = Rc<dyn Fn(&MeasureRequest<'_>) -> Size>;

/// Distance from the top of the node to its first baseline.
pub type BaselineFunc = Rc<dyn Fn(&BaselineRequest<'_>) -> f32>;

/// Called once each time the node transitions into the dirty state.
pub type DirtiedFunc = Rc<dyn Fn(NodeId)>;

/// A box: style, computed layout, links and callbacks.
///
/// Links and the dirty flag are changed through [`Tree`](crate::Tree) so
/// that ownership and dirty propagation stay consistent.
#[derive(Clone)]
pub struct Node {
    pub(crate) style: Style,
    /// The computed layout. Written by the layout engine.
    pub layout: LayoutResult,
    pub(crate) children: Vec<NodeId>,
    pub(crate) owner: Option<NodeId>,
    pub(crate) config: ConfigId,
    pub(crate) measure: Option<MeasureFunc>,
    pub(crate) baseline: Option<BaselineFunc>,
    pub(crate) dirtied: Option<DirtiedFunc>,
    pub(crate) context: Option<Rc<dyn Any>>,
    pub(crate) dirty: bool,
    pub(crate) has_new_layout: bool,
    pub(crate) is_reference_baseline: bool,
    pub(crate) node_type: NodeType,
    pub(crate) use_web_defaults: bool,
    line_index: usize,
    resolved_dimensions: DimensionValues,
}

impl Node {
    pub(crate) fn new(config: ConfigId, use_web_defaults: bool) -> Self {
        Self {
            style: Style::initial(use_web_defaults),
            layout: LayoutResult::default(),
            children: Vec::new(),
            owner: None,
            config,
            measure: None,
            baseline: None,
            dirtied: None,
            context: None,
            dirty: false,
            has_new_layout: true,
            is_reference_baseline: false,
            node_type: NodeType::Default,
            use_web_defaults,
            line_index: 0,
            resolved_dimensions: DimensionValues::UNDEFINED,
        }
    }

    /// The node's style.
    #[must_use]
    pub const fn style(&self) -> &Style {
        &self.style
    }

    /// Ordered children.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The node this one is attached to.
    #[must_use]
    pub const fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    /// The config this node reads settings from.
    #[must_use]
    pub const fn config(&self) -> ConfigId {
        self.config
    }

    /// The measure callback, if any.
    #[must_use]
    pub fn measure_func(&self) -> Option<MeasureFunc> {
        self.measure.clone()
    }

    /// Whether a measure callback is installed.
    #[must_use]
    pub const fn has_measure_func(&self) -> bool {
        self.measure.is_some()
    }

    /// The baseline callback, if any.
    #[must_use]
    pub fn baseline_func(&self) -> Option<BaselineFunc> {
        self.baseline.clone()
    }

    /// Whether a baseline callback is installed.
    #[must_use]
    pub const fn has_baseline_func(&self) -> bool {
        self.baseline.is_some()
    }

    /// Caller data attached to the node.
    #[must_use]
    pub fn context(&self) -> Option<Rc<dyn Any>> {
        self.context.clone()
    }

    /// Style or subtree changed since the last layout.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Layout changed and the caller has not acknowledged it yet.
    #[must_use]
    pub const fn has_new_layout(&self) -> bool {
        self.has_new_layout
    }

    /// Set or acknowledge the new-layout flag.
    pub const fn set_has_new_layout(&mut self, value: bool) {
        self.has_new_layout = value;
    }

    /// Whether this child defines its owner's baseline.
    #[must_use]
    pub const fn is_reference_baseline(&self) -> bool {
        self.is_reference_baseline
    }

    /// Default or text.
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Whether the node was created under web defaults.
    #[must_use]
    pub const fn use_web_defaults(&self) -> bool {
        self.use_web_defaults
    }

    /// Index of the flex line this node was placed on.
    #[must_use]
    pub const fn line_index(&self) -> usize {
        self.line_index
    }

    /// Record the flex line this node was placed on.
    pub const fn set_line_index(&mut self, index: usize) {
        self.line_index = index;
    }

    /// Style dimension as last resolved by [`resolve_dimensions`](Self::resolve_dimensions).
    #[must_use]
    pub fn resolved_dimension(&self, dimension: Dimension) -> Value {
        self.resolved_dimensions[dimension]
    }

    /// Refresh the resolved dimensions from the style.
    pub fn resolve_dimensions(&mut self) {
        self.resolved_dimensions = self.style.resolve_dimensions();
    }

    /// A root has no owner.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.owner.is_none()
    }

    /// Resolved grow factor.
    #[must_use]
    pub fn flex_grow(&self) -> f32 {
        self.style.resolved_flex_grow(self.is_root())
    }

    /// Resolved shrink factor.
    #[must_use]
    pub fn flex_shrink(&self) -> f32 {
        self.style.resolved_flex_shrink(self.is_root(), self.use_web_defaults)
    }

    /// Resolved flex basis.
    #[must_use]
    pub fn flex_basis(&self) -> Value {
        self.style.resolved_flex_basis(self.use_web_defaults)
    }

    /// In flow with a non-zero grow or shrink factor.
    #[must_use]
    pub fn is_flexible(&self) -> bool {
        self.style.is_flexible(self.is_root(), self.use_web_defaults)
    }

    /// Whether the resolved style dimension is usable as a definite size
    /// against `owner_size`.
    #[must_use]
    pub fn is_style_dim_defined(&self, dimension: Dimension, owner_size: f32) -> bool {
        match self.resolved_dimensions[dimension] {
            Value::Point(v) => v >= 0.0,
            Value::Percent(v) => v >= 0.0 && !owner_size.is_nan(),
            Value::Auto | Value::Undefined => false,
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("children", &self.children)
            .field("owner", &self.owner)
            .field("config", &self.config)
            .field("dirty", &self.dirty)
            .field("node_type", &self.node_type)
            .field("has_measure", &self.measure.is_some())
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

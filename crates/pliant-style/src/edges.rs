//! Per-edge and per-dimension value tables.
//!
//! [§ 6 The box model](https://www.w3.org/TR/css-box-4/#box-model)
//!
//! Each edge property (margin, padding, border, position) stores nine slots:
//! four physical edges, the row-axis logical `start`/`end`, and the
//! `horizontal`/`vertical`/`all` shorthands. Lookups walk a precedence
//! chain so a shorthand only applies where no more specific slot is set.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::enums::{Dimension, Edge};
use crate::value::Value;

/// Nine-slot edge table, indexed by [`Edge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "EdgesRepr", into = "EdgesRepr")]
pub struct Edges([Value; 9]);

impl Edges {
    /// A table with every slot undefined.
    #[must_use]
    pub const fn new() -> Self {
        Self([Value::Undefined; 9])
    }

    /// Set one slot, returning the table (builder form).
    #[must_use]
    pub const fn with(mut self, edge: Edge, value: Value) -> Self {
        self.0[edge.index()] = value;
        self
    }

    /// Set one slot. Returns `true` if the stored value changed.
    pub fn set(&mut self, edge: Edge, value: Value) -> bool {
        let slot = &mut self.0[edge.index()];
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    /// Effective value for an edge on the row axis.
    ///
    /// Precedence: `row_edge` (logical start/end), then the physical `edge`,
    /// then `horizontal`, then `all`, then `default`.
    #[must_use]
    pub fn compute_for_row(&self, row_edge: Edge, edge: Edge, default: Value) -> Value {
        [row_edge, edge, Edge::Horizontal, Edge::All]
            .into_iter()
            .map(|e| self[e])
            .find(|v| !v.is_undefined())
            .unwrap_or(default)
    }

    /// Effective value for an edge on the column axis.
    ///
    /// Precedence: the physical `edge`, then `vertical`, then `all`, then
    /// `default`.
    #[must_use]
    pub fn compute_for_column(&self, edge: Edge, default: Value) -> Value {
        [edge, Edge::Vertical, Edge::All]
            .into_iter()
            .map(|e| self[e])
            .find(|v| !v.is_undefined())
            .unwrap_or(default)
    }

    /// Iterate `(edge, value)` pairs for slots that are set.
    pub fn defined(&self) -> impl Iterator<Item = (Edge, Value)> + '_ {
        ALL_EDGES
            .into_iter()
            .map(|e| (e, self[e]))
            .filter(|(_, v)| !v.is_undefined())
    }
}

const ALL_EDGES: [Edge; 9] = [
    Edge::Left,
    Edge::Top,
    Edge::Right,
    Edge::Bottom,
    Edge::Start,
    Edge::End,
    Edge::Horizontal,
    Edge::Vertical,
    Edge::All,
];

impl Index<Edge> for Edges {
    type Output = Value;

    fn index(&self, edge: Edge) -> &Value {
        &self.0[edge.index()]
    }
}

impl IndexMut<Edge> for Edges {
    fn index_mut(&mut self, edge: Edge) -> &mut Value {
        &mut self.0[edge.index()]
    }
}

const fn is_unset(value: &Value) -> bool {
    value.is_undefined()
}

/// Named-field form used for (de)serialisation: `{"left": 10, "all": "5%"}`.
#[derive(Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
struct EdgesRepr {
    #[serde(skip_serializing_if = "is_unset")]
    left: Value,
    #[serde(skip_serializing_if = "is_unset")]
    top: Value,
    #[serde(skip_serializing_if = "is_unset")]
    right: Value,
    #[serde(skip_serializing_if = "is_unset")]
    bottom: Value,
    #[serde(skip_serializing_if = "is_unset")]
    start: Value,
    #[serde(skip_serializing_if = "is_unset")]
    end: Value,
    #[serde(skip_serializing_if = "is_unset")]
    horizontal: Value,
    #[serde(skip_serializing_if = "is_unset")]
    vertical: Value,
    #[serde(skip_serializing_if = "is_unset")]
    all: Value,
}

impl From<EdgesRepr> for Edges {
    fn from(r: EdgesRepr) -> Self {
        Self([
            r.left,
            r.top,
            r.right,
            r.bottom,
            r.start,
            r.end,
            r.horizontal,
            r.vertical,
            r.all,
        ])
    }
}

impl From<Edges> for EdgesRepr {
    fn from(e: Edges) -> Self {
        let [left, top, right, bottom, start, end, horizontal, vertical, all] = e.0;
        Self {
            left,
            top,
            right,
            bottom,
            start,
            end,
            horizontal,
            vertical,
            all,
        }
    }
}

/// A width/height pair of style values, indexed by [`Dimension`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionValues {
    /// Horizontal value.
    #[serde(skip_serializing_if = "is_unset")]
    pub width: Value,
    /// Vertical value.
    #[serde(skip_serializing_if = "is_unset")]
    pub height: Value,
}

impl DimensionValues {
    /// Both dimensions undefined.
    pub const UNDEFINED: Self = Self::splat(Value::Undefined);
    /// Both dimensions `auto`.
    pub const AUTO: Self = Self::splat(Value::Auto);

    /// The same value in both dimensions.
    #[must_use]
    pub const fn splat(value: Value) -> Self {
        Self {
            width: value,
            height: value,
        }
    }
}

impl Index<Dimension> for DimensionValues {
    type Output = Value;

    fn index(&self, dimension: Dimension) -> &Value {
        match dimension {
            Dimension::Width => &self.width,
            Dimension::Height => &self.height,
        }
    }
}

impl IndexMut<Dimension> for DimensionValues {
    fn index_mut(&mut self, dimension: Dimension) -> &mut Value {
        match dimension {
            Dimension::Width => &mut self.width,
            Dimension::Height => &mut self.height,
        }
    }
}

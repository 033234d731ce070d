//! The per-node style record and its axis-aware lookups.
//!
//! Lookups here take an axis that is already resolved for direction
//! (`Row` under RTL has become `RowReverse`), so the physical leading edge
//! is always the one items start from. The logical `start`/`end` slots are
//! consulted first on row axes.

use pliant_common::float::{float_max, or_undefined};
use serde::{Deserialize, Serialize};

use crate::edges::{DimensionValues, Edges};
use crate::enums::{
    Align, Dimension, Direction, Display, Edge, FlexDirection, Justify, Overflow, PositionType,
    Wrap,
};
use crate::value::Value;

/// All style properties of one node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Style {
    /// Inline base direction.
    pub direction: Direction,
    /// Main axis of the container.
    pub flex_direction: FlexDirection,
    /// Main-axis distribution of free space.
    pub justify_content: Justify,
    /// Cross-axis distribution of lines.
    pub align_content: Align,
    /// Default cross-axis alignment of children.
    pub align_items: Align,
    /// Cross-axis alignment of this node within its owner.
    pub align_self: Align,
    /// In flow or absolutely positioned.
    pub position_type: PositionType,
    /// Single- or multi-line container.
    pub flex_wrap: Wrap,
    /// Overflow behaviour.
    pub overflow: Overflow,
    /// Whether the node takes part in layout.
    pub display: Display,
    /// The `flex` shorthand factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<f32>,
    /// Explicit grow factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_grow: Option<f32>,
    /// Explicit shrink factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_shrink: Option<f32>,
    /// Hypothetical main size.
    pub flex_basis: Value,
    /// Outer spacing.
    pub margin: Edges,
    /// Offsets; relative to the normal position or to the owner for
    /// absolute nodes.
    pub position: Edges,
    /// Inner spacing.
    pub padding: Edges,
    /// Border widths. Only the magnitude is used.
    pub border: Edges,
    /// Width and height.
    pub dimensions: DimensionValues,
    /// Lower bounds.
    pub min_dimensions: DimensionValues,
    /// Upper bounds.
    pub max_dimensions: DimensionValues,
    /// Width divided by height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f32>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            direction: Direction::Inherit,
            flex_direction: FlexDirection::Column,
            justify_content: Justify::FlexStart,
            align_content: Align::FlexStart,
            align_items: Align::Stretch,
            align_self: Align::Auto,
            position_type: PositionType::Relative,
            flex_wrap: Wrap::NoWrap,
            overflow: Overflow::Visible,
            display: Display::Flex,
            flex: None,
            flex_grow: None,
            flex_shrink: None,
            flex_basis: Value::Auto,
            margin: Edges::new(),
            position: Edges::new(),
            padding: Edges::new(),
            border: Edges::new(),
            dimensions: DimensionValues::AUTO,
            min_dimensions: DimensionValues::UNDEFINED,
            max_dimensions: DimensionValues::UNDEFINED,
            aspect_ratio: None,
        }
    }
}

impl Style {
    /// Defaults used when the config asks for web behaviour: row main axis
    /// and stretched lines.
    #[must_use]
    pub fn web_defaults() -> Self {
        Self {
            flex_direction: FlexDirection::Row,
            align_content: Align::Stretch,
            ..Self::default()
        }
    }

    /// The defaults this node starts from.
    #[must_use]
    pub fn initial(use_web_defaults: bool) -> Self {
        if use_web_defaults {
            Self::web_defaults()
        } else {
            Self::default()
        }
    }

    // ========== Flex factors ==========

    /// Resolved grow factor. A root node never grows.
    #[must_use]
    pub fn resolved_flex_grow(&self, is_root: bool) -> f32 {
        if is_root {
            return 0.0;
        }
        if let Some(grow) = self.flex_grow {
            return grow;
        }
        match self.flex {
            Some(flex) if flex > 0.0 => flex,
            _ => 0.0,
        }
    }

    /// Resolved shrink factor. A root node never shrinks.
    #[must_use]
    pub fn resolved_flex_shrink(&self, is_root: bool, use_web_defaults: bool) -> f32 {
        if is_root {
            return 0.0;
        }
        if let Some(shrink) = self.flex_shrink {
            return shrink;
        }
        match self.flex {
            Some(flex) if !use_web_defaults && flex < 0.0 => -flex,
            _ if use_web_defaults => 1.0,
            _ => 0.0,
        }
    }

    /// Resolved flex basis.
    #[must_use]
    pub fn resolved_flex_basis(&self, use_web_defaults: bool) -> Value {
        let basis = self.flex_basis;
        if !basis.is_auto() && !basis.is_undefined() {
            return basis;
        }
        match self.flex {
            Some(flex) if flex > 0.0 => {
                if use_web_defaults {
                    Value::Auto
                } else {
                    Value::ZERO
                }
            }
            _ => Value::Auto,
        }
    }

    /// In flow with a non-zero grow or shrink factor.
    #[must_use]
    pub fn is_flexible(&self, is_root: bool, use_web_defaults: bool) -> bool {
        self.position_type != PositionType::Absolute
            && (self.resolved_flex_grow(is_root) != 0.0
                || self.resolved_flex_shrink(is_root, use_web_defaults) != 0.0)
    }

    // ========== Position ==========

    fn leading_value(edges: &Edges, axis: FlexDirection, default: Value) -> Value {
        if axis.is_row() {
            edges.compute_for_row(Edge::Start, axis.leading_edge(), default)
        } else {
            edges.compute_for_column(axis.leading_edge(), default)
        }
    }

    fn trailing_value(edges: &Edges, axis: FlexDirection, default: Value) -> Value {
        if axis.is_row() {
            edges.compute_for_row(Edge::End, axis.trailing_edge(), default)
        } else {
            edges.compute_for_column(axis.trailing_edge(), default)
        }
    }

    /// Leading offset on `axis`, or NaN if it does not resolve.
    #[must_use]
    pub fn leading_position(&self, axis: FlexDirection, axis_size: f32) -> f32 {
        or_undefined(Self::leading_value(&self.position, axis, Value::ZERO).resolve(axis_size))
    }

    /// Trailing offset on `axis`, or NaN if it does not resolve.
    #[must_use]
    pub fn trailing_position(&self, axis: FlexDirection, axis_size: f32) -> f32 {
        or_undefined(Self::trailing_value(&self.position, axis, Value::ZERO).resolve(axis_size))
    }

    /// Whether any slot supplies a leading offset on `axis`.
    #[must_use]
    pub fn is_leading_position_defined(&self, axis: FlexDirection) -> bool {
        !Self::leading_value(&self.position, axis, Value::Undefined).is_undefined()
    }

    /// Whether any slot supplies a trailing offset on `axis`.
    #[must_use]
    pub fn is_trailing_position_defined(&self, axis: FlexDirection) -> bool {
        !Self::trailing_value(&self.position, axis, Value::Undefined).is_undefined()
    }

    /// Offset applied to an in-flow node: the leading offset if set,
    /// otherwise the negated trailing offset.
    #[must_use]
    pub fn relative_position(&self, axis: FlexDirection, axis_size: f32) -> f32 {
        if self.is_leading_position_defined(axis) {
            return self.leading_position(axis, axis_size);
        }
        -self.trailing_position(axis, axis_size)
    }

    // ========== Margin ==========

    /// Leading margin on `axis`; `auto` counts as zero.
    #[must_use]
    pub fn leading_margin(&self, axis: FlexDirection, width_size: f32) -> f32 {
        or_undefined(
            Self::leading_value(&self.margin, axis, Value::ZERO).resolve_margin(width_size),
        )
    }

    /// Trailing margin on `axis`; `auto` counts as zero.
    #[must_use]
    pub fn trailing_margin(&self, axis: FlexDirection, width_size: f32) -> f32 {
        or_undefined(
            Self::trailing_value(&self.margin, axis, Value::ZERO).resolve_margin(width_size),
        )
    }

    /// Sum of both margins on `axis`.
    #[must_use]
    pub fn margin_for_axis(&self, axis: FlexDirection, width_size: f32) -> f32 {
        self.leading_margin(axis, width_size) + self.trailing_margin(axis, width_size)
    }

    /// The raw leading margin value, used to detect `auto` margins.
    /// Shorthands are not consulted.
    #[must_use]
    pub fn margin_leading_value(&self, axis: FlexDirection) -> Value {
        if axis.is_row() && !self.margin[Edge::Start].is_undefined() {
            self.margin[Edge::Start]
        } else {
            self.margin[axis.leading_edge()]
        }
    }

    /// The raw trailing margin value, used to detect `auto` margins.
    #[must_use]
    pub fn margin_trailing_value(&self, axis: FlexDirection) -> Value {
        if axis.is_row() && !self.margin[Edge::End].is_undefined() {
            self.margin[Edge::End]
        } else {
            self.margin[axis.trailing_edge()]
        }
    }

    // ========== Border and padding ==========

    /// Leading border width, never negative.
    #[must_use]
    pub fn leading_border(&self, axis: FlexDirection) -> f32 {
        float_max(
            Self::leading_value(&self.border, axis, Value::Undefined).magnitude(),
            0.0,
        )
    }

    /// Trailing border width, never negative.
    #[must_use]
    pub fn trailing_border(&self, axis: FlexDirection) -> f32 {
        float_max(
            Self::trailing_value(&self.border, axis, Value::Undefined).magnitude(),
            0.0,
        )
    }

    /// Leading padding, never negative; unresolvable padding is zero.
    #[must_use]
    pub fn leading_padding(&self, axis: FlexDirection, width_size: f32) -> f32 {
        let value = Self::leading_value(&self.padding, axis, Value::Undefined);
        float_max(or_undefined(value.resolve(width_size)), 0.0)
    }

    /// Trailing padding, never negative; unresolvable padding is zero.
    #[must_use]
    pub fn trailing_padding(&self, axis: FlexDirection, width_size: f32) -> f32 {
        let value = Self::trailing_value(&self.padding, axis, Value::Undefined);
        float_max(or_undefined(value.resolve(width_size)), 0.0)
    }

    /// Leading padding plus leading border.
    #[must_use]
    pub fn leading_padding_and_border(&self, axis: FlexDirection, width_size: f32) -> f32 {
        self.leading_padding(axis, width_size) + self.leading_border(axis)
    }

    /// Trailing padding plus trailing border.
    #[must_use]
    pub fn trailing_padding_and_border(&self, axis: FlexDirection, width_size: f32) -> f32 {
        self.trailing_padding(axis, width_size) + self.trailing_border(axis)
    }

    /// Padding and border on both sides of `axis`.
    #[must_use]
    pub fn padding_and_border_for_axis(&self, axis: FlexDirection, width_size: f32) -> f32 {
        self.leading_padding_and_border(axis, width_size)
            + self.trailing_padding_and_border(axis, width_size)
    }

    // ========== Dimensions ==========

    /// Width and height as the layout sees them: a defined max that equals
    /// the min wins over the styled dimension.
    #[must_use]
    pub fn resolve_dimensions(&self) -> DimensionValues {
        let pick = |dimension: Dimension| {
            let max = self.max_dimensions[dimension];
            if !max.is_undefined() && max == self.min_dimensions[dimension] {
                max
            } else {
                self.dimensions[dimension]
            }
        };
        DimensionValues {
            width: pick(Dimension::Width),
            height: pick(Dimension::Height),
        }
    }
}

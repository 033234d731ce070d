//! Axis-aware sizing helpers shared by every step of the algorithm.
//!
//! All of these read a node's style or computed layout and never recurse.

use pliant_common::float::{float_max, float_min, or_undefined};
use pliant_style::{Align, Dimension, Direction, FlexDirection, MeasureMode, Style};
use pliant_tree::Node;

/// Resolve `inherit` against the owner, falling back to LTR at the root.
#[must_use]
pub(crate) fn resolve_direction(style: &Style, owner_direction: Direction) -> Direction {
    match style.direction {
        Direction::Inherit if owner_direction != Direction::Inherit => owner_direction,
        Direction::Inherit => Direction::Ltr,
        explicit => explicit,
    }
}

/// The alignment a child actually uses inside `owner`.
///
/// `align-self: auto` defers to the owner's `align-items`. Baseline has no
/// meaning in a column container and degrades to flex-start.
#[must_use]
pub(crate) fn align_item(owner: &Style, child: &Style) -> Align {
    let align = if child.align_self == Align::Auto {
        owner.align_items
    } else {
        child.align_self
    };
    if align == Align::Baseline && owner.flex_direction.is_column() {
        return Align::FlexStart;
    }
    align
}

/// Whether the node's resolved style size on `axis` is definite.
#[must_use]
pub(crate) fn is_style_dim_defined(node: &Node, axis: FlexDirection, owner_size: f32) -> bool {
    node.is_style_dim_defined(axis.dimension(), owner_size)
}

/// Whether the measured size on `axis` is usable.
#[must_use]
pub(crate) fn is_layout_dim_defined(node: &Node, axis: FlexDirection) -> bool {
    let value = node.layout.measured(axis.dimension());
    !value.is_nan() && value >= 0.0
}

/// Measured size on `axis` plus both margins.
#[must_use]
pub(crate) fn dim_with_margin(node: &Node, axis: FlexDirection, width_size: f32) -> f32 {
    let style = node.style();
    node.layout.measured(axis.dimension())
        + style.leading_margin(axis, width_size)
        + style.trailing_margin(axis, width_size)
}

/// Resolved style value for `dimension`, NaN when it does not resolve.
#[must_use]
pub(crate) fn resolved_size(node: &Node, dimension: Dimension, owner_size: f32) -> f32 {
    or_undefined(node.resolved_dimension(dimension).resolve(owner_size))
}

/// Clamp `value` to the min/max style bounds on `axis`. Bounds that are
/// negative or do not resolve are ignored.
#[must_use]
pub(crate) fn bound_axis_within_min_and_max(
    style: &Style,
    axis: FlexDirection,
    value: f32,
    axis_size: f32,
) -> f32 {
    let dimension = axis.dimension();
    let min = style.min_dimensions[dimension].resolve(axis_size);
    let max = style.max_dimensions[dimension].resolve(axis_size);

    if let Some(max) = max
        && max >= 0.0
        && value > max
    {
        return max;
    }
    if let Some(min) = min
        && min >= 0.0
        && value < min
    {
        return min;
    }
    value
}

/// Like [`bound_axis_within_min_and_max`], but never smaller than the
/// node's padding and border on that axis.
#[must_use]
pub(crate) fn bound_axis(
    style: &Style,
    axis: FlexDirection,
    value: f32,
    axis_size: f32,
    width_size: f32,
) -> f32 {
    float_max(
        bound_axis_within_min_and_max(style, axis, value, axis_size),
        style.padding_and_border_for_axis(axis, width_size),
    )
}

/// Apply a defined max size (plus margins) to a child's offered size.
///
/// An undefined offer becomes an at-most offer of the max size.
pub(crate) fn constrain_max_size_for_mode(
    style: &Style,
    axis: FlexDirection,
    owner_axis_size: f32,
    owner_width: f32,
    mode: &mut MeasureMode,
    size: &mut f32,
) {
    let Some(max) = style.max_dimensions[axis.dimension()].resolve(owner_axis_size) else {
        return;
    };
    let max_size = max + style.margin_for_axis(axis, owner_width);
    match *mode {
        MeasureMode::Exactly | MeasureMode::AtMost => {
            if max_size.is_nan() || *size < max_size {
                return;
            }
            *size = max_size;
        }
        MeasureMode::Undefined => {
            if !max_size.is_nan() {
                *mode = MeasureMode::AtMost;
                *size = max_size;
            }
        }
    }
}

/// Available inner size after padding and border, clamped to the node's
/// own min/max inner bounds.
#[must_use]
pub(crate) fn calculate_available_inner_dim(
    style: &Style,
    dimension: Dimension,
    available_dim: f32,
    padding_and_border: f32,
    owner_dim: f32,
) -> f32 {
    let inner = available_dim - padding_and_border;
    if inner.is_nan() {
        return inner;
    }
    let min_inner = style.min_dimensions[dimension]
        .resolve(owner_dim)
        .map_or(0.0, |min| min - padding_and_border);
    let max_inner = style.max_dimensions[dimension]
        .resolve(owner_dim)
        .map_or(f32::MAX, |max| max - padding_and_border);
    float_max(float_min(inner, max_inner), min_inner)
}

/// Set the leading and trailing positions from margins and relative
/// offsets. A root always resolves its axes as LTR.
pub(crate) fn set_position(
    node: &mut Node,
    direction: Direction,
    main_size: f32,
    cross_size: f32,
    owner_width: f32,
) {
    let direction = if node.is_root() {
        Direction::Ltr
    } else {
        direction
    };
    let style = node.style();
    let main_axis = style.flex_direction.resolve(direction);
    let cross_axis = main_axis.cross(direction);
    let relative_main = style.relative_position(main_axis, main_size);
    let relative_cross = style.relative_position(cross_axis, cross_size);

    let positions = [
        (
            main_axis.leading_edge(),
            style.leading_margin(main_axis, owner_width) + relative_main,
        ),
        (
            main_axis.trailing_edge(),
            style.trailing_margin(main_axis, owner_width) + relative_main,
        ),
        (
            cross_axis.leading_edge(),
            style.leading_margin(cross_axis, owner_width) + relative_cross,
        ),
        (
            cross_axis.trailing_edge(),
            style.trailing_margin(cross_axis, owner_width) + relative_cross,
        ),
    ];
    for (edge, value) in positions {
        node.layout.position[edge.index()] = value;
    }
}

//! Snapping computed geometry to the physical pixel grid.
//!
//! Edges are rounded in absolute coordinates and sizes are recomputed from
//! the rounded edges, so adjacent boxes never overlap or leave gaps.

use pliant_common::float::doubles_equal;
use pliant_style::{Dimension, Edge, NodeType};
use pliant_tree::{NodeId, Tree};

/// Round `value` (in points) to the nearest multiple of
/// `1 / point_scale_factor`.
///
/// Halves round up. `force_ceil` and `force_floor` override the nearest
/// rule for values that are not already on the grid. NaN stays NaN.
///
/// # Example
/// ```
/// use pliant_layout::round_value_to_pixel_grid;
///
/// assert_eq!(round_value_to_pixel_grid(10.33, 2.0, false, false), 10.5);
/// assert_eq!(round_value_to_pixel_grid(10.2, 1.0, true, false), 11.0);
/// ```
#[must_use]
pub fn round_value_to_pixel_grid(
    value: f64,
    point_scale_factor: f64,
    force_ceil: bool,
    force_floor: bool,
) -> f32 {
    let mut scaled = value * point_scale_factor;
    let mut fraction = scaled % 1.0;
    if fraction < 0.0 {
        fraction += 1.0;
    }
    scaled = if doubles_equal(fraction, 0.0) {
        scaled - fraction
    } else if doubles_equal(fraction, 1.0) {
        scaled - fraction + 1.0
    } else if force_ceil {
        scaled - fraction + 1.0
    } else if force_floor {
        scaled - fraction
    } else {
        let up = !fraction.is_nan() && (fraction > 0.5 || doubles_equal(fraction, 0.5));
        scaled - fraction + if up { 1.0 } else { 0.0 }
    };
    if scaled.is_nan() || point_scale_factor.is_nan() {
        return f32::NAN;
    }
    (scaled / point_scale_factor) as f32
}

fn has_fractional_part(value: f64) -> bool {
    let fraction = value % 1.0;
    !doubles_equal(fraction, 0.0) && !doubles_equal(fraction, 1.0)
}

/// Round the subtree rooted at `node`, whose owner sits at
/// (`absolute_left`, `absolute_top`). A zero scale leaves it untouched.
///
/// Text nodes floor their leading edges and ceil their trailing edges when
/// the size is fractional, so glyphs never get clipped.
pub(crate) fn round_to_pixel_grid(
    tree: &mut Tree,
    node: NodeId,
    point_scale_factor: f64,
    absolute_left: f64,
    absolute_top: f64,
) {
    if point_scale_factor == 0.0 {
        return;
    }
    let Some(current) = tree.get_mut(node) else {
        return;
    };
    let text = current.node_type() == NodeType::Text;
    let layout = &mut current.layout;
    let left = f64::from(layout.position[Edge::Left.index()]);
    let top = f64::from(layout.position[Edge::Top.index()]);
    let width = f64::from(layout.dimensions[Dimension::Width.index()]);
    let height = f64::from(layout.dimensions[Dimension::Height.index()]);

    let absolute_node_left = absolute_left + left;
    let absolute_node_top = absolute_top + top;
    let absolute_node_right = absolute_node_left + width;
    let absolute_node_bottom = absolute_node_top + height;

    layout.position[Edge::Left.index()] =
        round_value_to_pixel_grid(left, point_scale_factor, false, text);
    layout.position[Edge::Top.index()] =
        round_value_to_pixel_grid(top, point_scale_factor, false, text);

    let fractional_width = has_fractional_part(width * point_scale_factor);
    let fractional_height = has_fractional_part(height * point_scale_factor);
    layout.dimensions[Dimension::Width.index()] = round_value_to_pixel_grid(
        absolute_node_right,
        point_scale_factor,
        text && fractional_width,
        text && !fractional_width,
    ) - round_value_to_pixel_grid(absolute_node_left, point_scale_factor, false, text);
    layout.dimensions[Dimension::Height.index()] = round_value_to_pixel_grid(
        absolute_node_bottom,
        point_scale_factor,
        text && fractional_height,
        text && !fractional_height,
    ) - round_value_to_pixel_grid(absolute_node_top, point_scale_factor, false, text);

    for index in 0..tree.child_count(node) {
        if let Some(child) = tree.child(node, index) {
            round_to_pixel_grid(
                tree,
                child,
                point_scale_factor,
                absolute_node_left,
                absolute_node_top,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_half_up() {
        assert_eq!(round_value_to_pixel_grid(1.5, 1.0, false, false), 2.0);
        assert_eq!(round_value_to_pixel_grid(1.49, 1.0, false, false), 1.0);
    }

    #[test]
    fn test_negative_values_round_toward_grid() {
        assert_eq!(round_value_to_pixel_grid(-1.2, 1.0, false, false), -1.0);
        assert_eq!(round_value_to_pixel_grid(-1.7, 1.0, false, false), -2.0);
    }

    #[test]
    fn test_forced_directions() {
        assert_eq!(round_value_to_pixel_grid(3.1, 1.0, true, false), 4.0);
        assert_eq!(round_value_to_pixel_grid(3.9, 1.0, false, true), 3.0);
        assert_eq!(round_value_to_pixel_grid(3.0, 1.0, true, false), 3.0);
    }

    #[test]
    fn test_undefined_stays_undefined() {
        assert!(round_value_to_pixel_grid(f64::NAN, 2.0, false, false).is_nan());
    }
}

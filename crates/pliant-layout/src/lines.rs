//! Breaking children into flex lines.

use pliant_style::{Display, FlexDirection, PositionType, Wrap};
use pliant_tree::{NodeId, Tree};

use crate::sizing::bound_axis_within_min_and_max;

/// One flex line and the running values of the passes that fill it.
#[derive(Debug, Clone, Default)]
pub(crate) struct FlexLine {
    /// In-flow children placed on the line.
    pub(crate) items_on_line: usize,
    /// Sum of clamped bases plus main margins.
    pub(crate) size_consumed_on_current_line: f32,
    pub(crate) total_flex_grow_factors: f32,
    /// Sum of `shrink * basis`, stored negated.
    pub(crate) total_flex_shrink_scaled_factors: f32,
    /// One past the last child index belonging to the line.
    pub(crate) end_of_line_index: usize,
    /// In-flow children in order.
    pub(crate) relative_children: Vec<NodeId>,
    pub(crate) remaining_free_space: f32,
    /// Main-axis extent once justified, including padding and border.
    pub(crate) main_dim: f32,
    /// Cross-axis extent of the line.
    pub(crate) cross_dim: f32,
}

/// Collect the children of `node` that fit on the line starting at
/// `start_of_line_index`.
///
/// Hidden and absolute children are skipped but still advance the index.
/// A line always takes at least one item. Grow and shrink totals between
/// zero and one are raised to one so a line never distributes more space
/// than it has.
pub(crate) fn collect_line(
    tree: &mut Tree,
    node: NodeId,
    main_axis: FlexDirection,
    main_axis_owner_size: f32,
    available_inner_width: f32,
    available_inner_main_dim: f32,
    start_of_line_index: usize,
    line_count: usize,
) -> FlexLine {
    let mut line = FlexLine {
        relative_children: Vec::with_capacity(tree.child_count(node)),
        ..FlexLine::default()
    };
    let wraps = tree[node].style().flex_wrap != Wrap::NoWrap;
    let mut size_consumed_including_min_constraint = 0.0;

    let mut end_of_line_index = start_of_line_index;
    while let Some(child) = tree.child(node, end_of_line_index) {
        let current = &mut tree[child];
        let style = *current.style();
        if style.display == Display::None || style.position_type == PositionType::Absolute {
            end_of_line_index += 1;
            continue;
        }
        current.set_line_index(line_count);
        let margin_main = style.margin_for_axis(main_axis, available_inner_width);
        let basis = bound_axis_within_min_and_max(
            &style,
            main_axis,
            current.layout.computed_flex_basis,
            main_axis_owner_size,
        );
        if size_consumed_including_min_constraint + basis + margin_main > available_inner_main_dim
            && wraps
            && line.items_on_line > 0
        {
            break;
        }
        size_consumed_including_min_constraint += basis + margin_main;
        line.size_consumed_on_current_line += basis + margin_main;
        line.items_on_line += 1;
        if current.is_flexible() {
            line.total_flex_grow_factors += current.flex_grow();
            line.total_flex_shrink_scaled_factors +=
                -current.flex_shrink() * current.layout.computed_flex_basis;
        }
        line.relative_children.push(child);
        end_of_line_index += 1;
    }

    if line.total_flex_grow_factors > 0.0 && line.total_flex_grow_factors < 1.0 {
        line.total_flex_grow_factors = 1.0;
    }
    if line.total_flex_shrink_scaled_factors > 0.0 && line.total_flex_shrink_scaled_factors < 1.0 {
        line.total_flex_shrink_scaled_factors = 1.0;
    }
    line.end_of_line_index = end_of_line_index;
    line
}

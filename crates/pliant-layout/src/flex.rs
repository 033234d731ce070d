//! The flexbox algorithm for one container.
//!
//! [`LayoutPass::layout_impl`] sizes a node under the given constraints and,
//! when `perform_layout` is set, positions its children. Leaves and empty
//! containers are handled directly; everything else runs through the steps
//! below:
//!
//! 1. resolve axes, padding and border;
//! 2. compute the space available to children;
//! 3. compute each child's flex basis;
//! 4. break children into lines;
//! 5. resolve flexible lengths on the main axis;
//! 6. justify along the main axis and size the line on the cross axis;
//! 7. align children on the cross axis within the line;
//! 8. distribute lines by align-content;
//! 9. settle the container's own size;
//! 10. lay out absolute children;
//! 11. mirror positions for reversed axes.

use pliant_common::LogLevel;
use pliant_common::float::{float_max, float_min, or_undefined};
use pliant_style::{
    Dimension, Direction, Display, Edge, FlexDirection, MeasureMode, Overflow, PositionType, Wrap,
};
use pliant_tree::{LayoutPassReason, NodeId};

use crate::lines::collect_line;
use crate::pass::LayoutPass;
use crate::sizing::{
    bound_axis, bound_axis_within_min_and_max, calculate_available_inner_dim, resolve_direction,
};

/// Reorder a `(row, column)` pair into `(main, cross)`; the mapping is its
/// own inverse.
fn main_and_cross<T>(is_main_axis_row: bool, row: T, column: T) -> (T, T) {
    if is_main_axis_row {
        (row, column)
    } else {
        (column, row)
    }
}

/// Values fixed once per container and read by every step that follows.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FlexFrame {
    pub(crate) node: NodeId,
    pub(crate) direction: Direction,
    pub(crate) main_axis: FlexDirection,
    pub(crate) cross_axis: FlexDirection,
    pub(crate) main_axis_owner_size: f32,
    pub(crate) cross_axis_owner_size: f32,
    pub(crate) owner_width: f32,
    pub(crate) available_inner_width: f32,
    pub(crate) available_inner_height: f32,
    /// Narrowed to the content size or the min/max bound by step 5.
    pub(crate) available_inner_main_dim: f32,
    pub(crate) available_inner_cross_dim: f32,
    pub(crate) measure_mode_main: MeasureMode,
    pub(crate) measure_mode_cross: MeasureMode,
    pub(crate) flex_basis_overflows: bool,
    pub(crate) perform_layout: bool,
}

impl LayoutPass<'_> {
    /// Compute the size of `node`, and its children's layout when
    /// `perform_layout` is set. Results land in `node.layout`.
    pub(crate) fn layout_impl(
        &mut self,
        node: NodeId,
        available_width: f32,
        available_height: f32,
        owner_direction: Direction,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
        owner_width: f32,
        owner_height: f32,
        perform_layout: bool,
        reason: LayoutPassReason,
    ) {
        if available_width.is_nan() && width_mode != MeasureMode::Undefined {
            self.tree.log(
                Some(node),
                LogLevel::Fatal,
                "availableWidth is indefinite so widthMeasureMode must be undefined",
            );
        }
        if available_height.is_nan() && height_mode != MeasureMode::Undefined {
            self.tree.log(
                Some(node),
                LogLevel::Fatal,
                "availableHeight is indefinite so heightMeasureMode must be undefined",
            );
        }
        if perform_layout {
            self.stats.layouts += 1;
        } else {
            self.stats.measures += 1;
        }

        // STEP 1: resolve direction and the box model on physical edges.
        let style = *self.tree[node].style();
        let direction = resolve_direction(&style, owner_direction);
        let row = FlexDirection::Row.resolve(direction);
        let column = FlexDirection::Column.resolve(direction);
        let (start, end) = if direction == Direction::Rtl {
            (Edge::Right, Edge::Left)
        } else {
            (Edge::Left, Edge::Right)
        };
        let margin_axis_row = style.margin_for_axis(row, owner_width);
        let margin_axis_column = style.margin_for_axis(column, owner_width);
        {
            let layout = &mut self.tree[node].layout;
            layout.direction = direction;
            for (edge, axis, leading) in [
                (start, row, true),
                (end, row, false),
                (Edge::Top, column, true),
                (Edge::Bottom, column, false),
            ] {
                let slot = edge.index();
                if leading {
                    layout.margin[slot] = style.leading_margin(axis, owner_width);
                    layout.border[slot] = style.leading_border(axis);
                    layout.padding[slot] = style.leading_padding(axis, owner_width);
                } else {
                    layout.margin[slot] = style.trailing_margin(axis, owner_width);
                    layout.border[slot] = style.trailing_border(axis);
                    layout.padding[slot] = style.trailing_padding(axis, owner_width);
                }
            }
        }

        let inner_available_width = available_width - margin_axis_row;
        let inner_available_height = available_height - margin_axis_column;
        if self.tree[node].has_measure_func() {
            self.measure_leaf(
                node,
                inner_available_width,
                inner_available_height,
                width_mode,
                height_mode,
                owner_width,
                owner_height,
                reason,
            );
            return;
        }
        if self.tree.child_count(node) == 0 {
            self.measure_empty_container(
                node,
                inner_available_width,
                inner_available_height,
                width_mode,
                height_mode,
                owner_width,
                owner_height,
            );
            return;
        }
        if !perform_layout
            && self.measure_fixed_size(
                node,
                inner_available_width,
                inner_available_height,
                width_mode,
                height_mode,
                owner_width,
                owner_height,
            )
        {
            return;
        }

        self.tree.clone_children_if_needed(node);
        self.tree[node].layout.had_overflow = false;

        let main_axis = style.flex_direction.resolve(direction);
        let cross_axis = main_axis.cross(direction);
        let is_main_axis_row = main_axis.is_row();
        let padding_and_border_main = style.padding_and_border_for_axis(main_axis, owner_width);
        let padding_and_border_cross = style.padding_and_border_for_axis(cross_axis, owner_width);
        let (padding_and_border_row, padding_and_border_column) =
            main_and_cross(is_main_axis_row, padding_and_border_main, padding_and_border_cross);

        // STEP 2: space available to children.
        let available_inner_width = calculate_available_inner_dim(
            &style,
            Dimension::Width,
            inner_available_width,
            padding_and_border_row,
            owner_width,
        );
        let available_inner_height = calculate_available_inner_dim(
            &style,
            Dimension::Height,
            inner_available_height,
            padding_and_border_column,
            owner_height,
        );

        let (main_axis_owner_size, cross_axis_owner_size) =
            main_and_cross(is_main_axis_row, owner_width, owner_height);
        let (measure_mode_main, measure_mode_cross) =
            main_and_cross(is_main_axis_row, width_mode, height_mode);
        let (available_inner_main_dim, available_inner_cross_dim) =
            main_and_cross(is_main_axis_row, available_inner_width, available_inner_height);

        // STEP 3: flex basis of every child.
        let total_outer_flex_basis = self.compute_flex_basis_for_children(
            node,
            available_inner_width,
            available_inner_height,
            width_mode,
            height_mode,
            direction,
            main_axis,
            perform_layout,
        );
        let flex_basis_overflows = measure_mode_main != MeasureMode::Undefined
            && total_outer_flex_basis > available_inner_main_dim;
        let wraps = style.flex_wrap != Wrap::NoWrap;

        let mut frame = FlexFrame {
            node,
            direction,
            main_axis,
            cross_axis,
            main_axis_owner_size,
            cross_axis_owner_size,
            owner_width,
            available_inner_width,
            available_inner_height,
            available_inner_main_dim,
            available_inner_cross_dim,
            measure_mode_main,
            measure_mode_cross,
            flex_basis_overflows,
            perform_layout,
        };
        if wraps && flex_basis_overflows && measure_mode_main == MeasureMode::AtMost {
            frame.measure_mode_main = MeasureMode::Exactly;
        }

        #[cfg(feature = "layout-trace")]
        {
            let message = format!(
                "flex {} main={main_axis:?} inner={available_inner_width}x{available_inner_height} \
                 basis={total_outer_flex_basis}",
                reason.as_str(),
            );
            self.tree.log(Some(node), LogLevel::Verbose, &message);
        }

        // STEP 4-7: one line at a time.
        let child_count = self.tree.child_count(node);
        let mut start_of_line_index = 0;
        let mut line_count = 0;
        let mut total_line_cross_dim = 0.0;
        let mut max_line_main_dim = 0.0;
        while start_of_line_index < child_count {
            let mut line = collect_line(
                self.tree,
                node,
                main_axis,
                main_axis_owner_size,
                available_inner_width,
                frame.available_inner_main_dim,
                start_of_line_index,
                line_count,
            );
            let can_skip_flex =
                !perform_layout && frame.measure_mode_cross == MeasureMode::Exactly;

            // STEP 5: free space under the min/max bounds of the container.
            let mut size_based_on_content = false;
            if frame.measure_mode_main != MeasureMode::Exactly {
                let dimension = main_axis.dimension();
                let min_inner_main_dim = or_undefined(
                    style.min_dimensions[dimension].resolve(main_axis_owner_size),
                ) - padding_and_border_main;
                let max_inner_main_dim = or_undefined(
                    style.max_dimensions[dimension].resolve(main_axis_owner_size),
                ) - padding_and_border_main;
                let consumed = line.size_consumed_on_current_line;
                let legacy = self.tree.config_of(node).settings.use_legacy_stretch_behaviour;
                if !min_inner_main_dim.is_nan() && consumed < min_inner_main_dim {
                    frame.available_inner_main_dim = min_inner_main_dim;
                } else if !max_inner_main_dim.is_nan() && consumed > max_inner_main_dim {
                    frame.available_inner_main_dim = max_inner_main_dim;
                } else {
                    let current = &self.tree[node];
                    if !legacy
                        && (line.total_flex_grow_factors == 0.0 || current.flex_grow() == 0.0)
                    {
                        // Nothing grows into extra space; the content size is all it takes.
                        frame.available_inner_main_dim = consumed;
                    }
                    if legacy {
                        self.tree[node].layout.did_use_legacy_flag = true;
                    }
                    size_based_on_content = !legacy;
                }
            }
            if !size_based_on_content && !frame.available_inner_main_dim.is_nan() {
                line.remaining_free_space =
                    frame.available_inner_main_dim - line.size_consumed_on_current_line;
            } else if line.size_consumed_on_current_line < 0.0 {
                line.remaining_free_space = -line.size_consumed_on_current_line;
            }
            if !can_skip_flex {
                self.resolve_flexible_length(&mut line, &frame);
            }
            self.tree[node].layout.had_overflow |= line.remaining_free_space < 0.0;

            // STEP 6: main-axis justification and the line's cross size.
            self.justify_main_axis(&mut line, start_of_line_index, &frame);

            let mut container_cross_axis = available_inner_cross_dim;
            if matches!(
                frame.measure_mode_cross,
                MeasureMode::Undefined | MeasureMode::AtMost
            ) {
                container_cross_axis = bound_axis(
                    &style,
                    cross_axis,
                    line.cross_dim + padding_and_border_cross,
                    cross_axis_owner_size,
                    owner_width,
                ) - padding_and_border_cross;
            }
            if !wraps && frame.measure_mode_cross == MeasureMode::Exactly {
                line.cross_dim = available_inner_cross_dim;
            }
            line.cross_dim = bound_axis(
                &style,
                cross_axis,
                line.cross_dim + padding_and_border_cross,
                cross_axis_owner_size,
                owner_width,
            ) - padding_and_border_cross;

            // STEP 7: cross-axis alignment within the line.
            if perform_layout {
                self.align_line_cross_axis(
                    &frame,
                    start_of_line_index..line.end_of_line_index,
                    container_cross_axis,
                    line.cross_dim,
                    total_line_cross_dim,
                );
            }

            total_line_cross_dim += line.cross_dim;
            max_line_main_dim = float_max(max_line_main_dim, line.main_dim);
            line_count += 1;
            start_of_line_index = line.end_of_line_index;
        }

        // STEP 8: multi-line content alignment.
        if perform_layout && (wraps || self.is_baseline_layout(node)) {
            self.align_content(&frame, line_count, total_line_cross_dim);
        }

        // STEP 9: the container's own size.
        self.settle_container_size(
            &frame,
            inner_available_width,
            inner_available_height,
            owner_height,
            max_line_main_dim,
            total_line_cross_dim,
        );

        if !perform_layout {
            return;
        }
        let cross_edge = cross_axis.leading_edge().index();
        let cross_dimension = cross_axis.dimension();
        if style.flex_wrap == Wrap::WrapReverse {
            let container_cross = self.tree[node].layout.measured(cross_dimension);
            for index in 0..child_count {
                let Some(child) = self.tree.child(node, index) else {
                    continue;
                };
                let current = &mut self.tree[child];
                if current.style().position_type == PositionType::Absolute {
                    continue;
                }
                let layout = &mut current.layout;
                layout.position[cross_edge] = container_cross
                    - layout.position[cross_edge]
                    - layout.measured(cross_dimension);
            }
        }

        // STEP 10: absolute children against the final size.
        let absolute_width_mode = if is_main_axis_row {
            frame.measure_mode_main
        } else {
            frame.measure_mode_cross
        };
        for index in 0..child_count {
            let Some(child) = self.tree.child(node, index) else {
                continue;
            };
            let child_style = self.tree[child].style();
            if child_style.display == Display::None
                || child_style.position_type != PositionType::Absolute
            {
                continue;
            }
            self.absolute_layout_child(
                node,
                child,
                available_inner_width,
                absolute_width_mode,
                available_inner_height,
                direction,
            );
        }

        // STEP 11: trailing positions for reversed axes.
        let reversed: Vec<FlexDirection> = [main_axis, cross_axis]
            .into_iter()
            .filter(|axis| axis.is_reverse())
            .collect();
        if reversed.is_empty() {
            return;
        }
        let measured = self.tree[node].layout.measured_dimensions;
        for index in 0..child_count {
            let Some(child) = self.tree.child(node, index) else {
                continue;
            };
            let current = &mut self.tree[child];
            if current.style().display == Display::None {
                continue;
            }
            let layout = &mut current.layout;
            for axis in &reversed {
                let dimension = axis.dimension();
                layout.position[axis.trailing_edge().index()] = measured[dimension.index()]
                    - layout.measured(dimension)
                    - layout.position[axis.leading_edge().index()];
            }
        }
    }

    /// Size the container from its constraints, falling back to the
    /// content extent on axes it is free to choose.
    fn settle_container_size(
        &mut self,
        frame: &FlexFrame,
        available_width: f32,
        available_height: f32,
        owner_height: f32,
        max_line_main_dim: f32,
        total_line_cross_dim: f32,
    ) {
        let FlexFrame {
            node,
            main_axis,
            cross_axis,
            main_axis_owner_size,
            cross_axis_owner_size,
            owner_width,
            available_inner_main_dim,
            available_inner_cross_dim,
            measure_mode_main,
            measure_mode_cross,
            ..
        } = *frame;
        let style = *self.tree[node].style();
        let scrolls = style.overflow == Overflow::Scroll;
        let padding_and_border_main = style.padding_and_border_for_axis(main_axis, owner_width);
        let padding_and_border_cross = style.padding_and_border_for_axis(cross_axis, owner_width);

        let mut measured = [
            bound_axis(&style, FlexDirection::Row, available_width, owner_width, owner_width),
            bound_axis(&style, FlexDirection::Column, available_height, owner_height, owner_width),
        ];

        let axes = [
            (
                main_axis,
                measure_mode_main,
                max_line_main_dim,
                main_axis_owner_size,
                available_inner_main_dim + padding_and_border_main,
                padding_and_border_main,
            ),
            (
                cross_axis,
                measure_mode_cross,
                total_line_cross_dim + padding_and_border_cross,
                cross_axis_owner_size,
                available_inner_cross_dim + padding_and_border_cross,
                padding_and_border_cross,
            ),
        ];
        for (axis, mode, content, owner_size, available, padding_and_border) in axes {
            let slot = axis.dimension().index();
            if mode == MeasureMode::Undefined || (!scrolls && mode == MeasureMode::AtMost) {
                measured[slot] = bound_axis(&style, axis, content, owner_size, owner_width);
            } else if mode == MeasureMode::AtMost && scrolls {
                measured[slot] = float_max(
                    float_min(
                        available,
                        bound_axis_within_min_and_max(&style, axis, content, owner_size),
                    ),
                    padding_and_border,
                );
            }
        }
        self.tree[node].layout.measured_dimensions = measured;
    }
}

//! Out-of-flow children: sized from their own style or from offsets on
//! both edges, then placed against the owner's padding box.

use pliant_style::{Align, Dimension, Direction, FlexDirection, Justify, MeasureMode, Wrap};
use pliant_tree::{LayoutPassReason, NodeId};

use crate::pass::LayoutPass;
use crate::sizing::{align_item, bound_axis, is_style_dim_defined, resolved_size};

impl LayoutPass<'_> {
    /// Lay out the absolute `child` of `node` once `node` has its final
    /// size.
    pub(crate) fn absolute_layout_child(
        &mut self,
        node: NodeId,
        child: NodeId,
        width: f32,
        width_mode: MeasureMode,
        height: f32,
        direction: Direction,
    ) {
        let style = *self.tree[node].style();
        let main_axis = style.flex_direction.resolve(direction);
        let cross_axis = main_axis.cross(direction);
        let is_main_axis_row = main_axis.is_row();
        let owner_measured = self.tree[node].layout.measured_dimensions;

        let current = &self.tree[child];
        let child_style = *current.style();
        let margin_row = child_style.margin_for_axis(FlexDirection::Row, width);
        let margin_column = child_style.margin_for_axis(FlexDirection::Column, width);

        let mut child_width = f32::NAN;
        let mut child_height = f32::NAN;
        if is_style_dim_defined(current, FlexDirection::Row, width) {
            child_width = resolved_size(current, Dimension::Width, width) + margin_row;
        } else if child_style.is_leading_position_defined(FlexDirection::Row)
            && child_style.is_trailing_position_defined(FlexDirection::Row)
        {
            let stretched = owner_measured[Dimension::Width.index()]
                - (style.leading_border(FlexDirection::Row)
                    + style.trailing_border(FlexDirection::Row))
                - (child_style.leading_position(FlexDirection::Row, width)
                    + child_style.trailing_position(FlexDirection::Row, width));
            child_width = bound_axis(&child_style, FlexDirection::Row, stretched, width, width);
        }
        if is_style_dim_defined(current, FlexDirection::Column, height) {
            child_height = resolved_size(current, Dimension::Height, height) + margin_column;
        } else if child_style.is_leading_position_defined(FlexDirection::Column)
            && child_style.is_trailing_position_defined(FlexDirection::Column)
        {
            let stretched = owner_measured[Dimension::Height.index()]
                - (style.leading_border(FlexDirection::Column)
                    + style.trailing_border(FlexDirection::Column))
                - (child_style.leading_position(FlexDirection::Column, height)
                    + child_style.trailing_position(FlexDirection::Column, height));
            child_height =
                bound_axis(&child_style, FlexDirection::Column, stretched, height, width);
        }

        if child_width.is_nan() != child_height.is_nan()
            && let Some(ratio) = child_style.aspect_ratio
        {
            if child_width.is_nan() {
                child_width = margin_row + (child_height - margin_column) * ratio;
            } else {
                child_height = margin_column + (child_width - margin_row) / ratio;
            }
        }

        // Anything still unknown comes from measuring the child's content.
        if child_width.is_nan() || child_height.is_nan() {
            let mut width_measure_mode = if child_width.is_nan() {
                MeasureMode::Undefined
            } else {
                MeasureMode::Exactly
            };
            let height_measure_mode = if child_height.is_nan() {
                MeasureMode::Undefined
            } else {
                MeasureMode::Exactly
            };
            if !is_main_axis_row
                && child_width.is_nan()
                && width_mode != MeasureMode::Undefined
                && !width.is_nan()
                && width > 0.0
            {
                child_width = width;
                width_measure_mode = MeasureMode::AtMost;
            }
            let _ = self.layout_node(
                child,
                child_width,
                child_height,
                direction,
                width_measure_mode,
                height_measure_mode,
                child_width,
                child_height,
                false,
                LayoutPassReason::AbsMeasure,
            );
            let measured = &self.tree[child].layout;
            child_width = measured.measured_width() + margin_row;
            child_height = measured.measured_height() + margin_column;
        }

        let _ = self.layout_node(
            child,
            child_width,
            child_height,
            direction,
            MeasureMode::Exactly,
            MeasureMode::Exactly,
            child_width,
            child_height,
            true,
            LayoutPassReason::AbsLayout,
        );

        let align = align_item(&style, &child_style);
        let main_end_aligned = style.justify_content == Justify::FlexEnd;
        let main_centered = style.justify_content == Justify::Center;
        let cross_end_aligned = (align == Align::FlexEnd) ^ (style.flex_wrap == Wrap::WrapReverse);
        let cross_centered = align == Align::Center;
        let (main_size, cross_size) = if is_main_axis_row {
            (width, height)
        } else {
            (height, width)
        };

        for (axis, axis_size, centered, end_aligned) in [
            (main_axis, main_size, main_centered, main_end_aligned),
            (cross_axis, cross_size, cross_centered, cross_end_aligned),
        ] {
            let dimension = axis.dimension().index();
            let child_measured = self.tree[child].layout.measured_dimensions[dimension];
            let free = owner_measured[dimension] - child_measured;
            let leading_defined = child_style.is_leading_position_defined(axis);
            let position = if child_style.is_trailing_position_defined(axis) && !leading_defined {
                Some(
                    free - style.trailing_border(axis)
                        - child_style.trailing_margin(axis, width)
                        - child_style.trailing_position(axis, axis_size),
                )
            } else if !leading_defined && centered {
                Some(free / 2.0)
            } else if !leading_defined && end_aligned {
                Some(free)
            } else {
                None
            };
            if let Some(position) = position {
                self.tree[child].layout.position[axis.leading_edge().index()] = position;
            }
        }
    }
}

//! Main-axis placement of one line: justify-content, auto margins, and the
//! line's cross extent.

use pliant_common::float::float_max;
use pliant_style::{Display, FlexDirection, Justify, MeasureMode, PositionType, Unit};

use crate::flex::FlexFrame;
use crate::lines::FlexLine;
use crate::pass::LayoutPass;
use crate::sizing::dim_with_margin;

impl LayoutPass<'_> {
    /// Position the line's children along the main axis and compute
    /// `line.main_dim` and `line.cross_dim`.
    ///
    /// Auto margins absorb the free space before justify-content gets any.
    /// An at-most container only keeps free space up to its min size.
    pub(crate) fn justify_main_axis(
        &mut self,
        line: &mut FlexLine,
        start_of_line_index: usize,
        frame: &FlexFrame,
    ) {
        let FlexFrame {
            node,
            main_axis,
            cross_axis,
            measure_mode_main,
            measure_mode_cross,
            main_axis_owner_size,
            owner_width,
            available_inner_main_dim,
            available_inner_cross_dim,
            available_inner_width,
            perform_layout,
            ..
        } = *frame;
        let style = *self.tree[node].style();
        let leading_padding_and_border_main =
            style.leading_padding_and_border(main_axis, owner_width);
        let trailing_padding_and_border_main =
            style.trailing_padding_and_border(main_axis, owner_width);

        if measure_mode_main == MeasureMode::AtMost && line.remaining_free_space > 0.0 {
            let min = style.min_dimensions[main_axis.dimension()].resolve(main_axis_owner_size);
            line.remaining_free_space = match min {
                Some(min) => {
                    let min_available_main_dim =
                        min - leading_padding_and_border_main - trailing_padding_and_border_main;
                    let occupied = available_inner_main_dim - line.remaining_free_space;
                    float_max(0.0, min_available_main_dim - occupied)
                }
                None => 0.0,
            };
        }

        let mut auto_margins = 0_usize;
        for index in start_of_line_index..line.end_of_line_index {
            let Some(child) = self.tree.child(node, index) else {
                continue;
            };
            let child_style = self.tree[child].style();
            if child_style.position_type == PositionType::Absolute {
                continue;
            }
            if child_style.margin_leading_value(main_axis).unit() == Unit::Auto {
                auto_margins += 1;
            }
            if child_style.margin_trailing_value(main_axis).unit() == Unit::Auto {
                auto_margins += 1;
            }
        }

        let mut leading_main_dim = 0.0;
        let mut between_main_dim = 0.0;
        if auto_margins == 0 {
            let free = line.remaining_free_space;
            let items = line.items_on_line as f32;
            match style.justify_content {
                Justify::FlexStart => {}
                Justify::Center => leading_main_dim = free / 2.0,
                Justify::FlexEnd => leading_main_dim = free,
                Justify::SpaceBetween => {
                    if line.items_on_line > 1 {
                        between_main_dim = float_max(free, 0.0) / (items - 1.0);
                    }
                }
                Justify::SpaceEvenly => {
                    between_main_dim = free / (items + 1.0);
                    leading_main_dim = between_main_dim;
                }
                Justify::SpaceAround => {
                    between_main_dim = free / items;
                    leading_main_dim = between_main_dim / 2.0;
                }
            }
        }

        line.main_dim = leading_padding_and_border_main + leading_main_dim;
        line.cross_dim = 0.0;
        let mut max_ascent = 0.0_f32;
        let mut max_descent = 0.0_f32;
        let is_baseline_layout = self.is_baseline_layout(node);
        let main_edge = main_axis.leading_edge().index();
        let auto_share = line.remaining_free_space / auto_margins as f32;

        for index in start_of_line_index..line.end_of_line_index {
            let Some(child) = self.tree.child(node, index) else {
                continue;
            };
            let child_style = *self.tree[child].style();
            if child_style.display == Display::None {
                continue;
            }
            if child_style.position_type == PositionType::Absolute {
                if child_style.is_leading_position_defined(main_axis) {
                    if perform_layout {
                        self.tree[child].layout.position[main_edge] = child_style
                            .leading_position(main_axis, available_inner_main_dim)
                            + style.leading_border(main_axis)
                            + child_style.leading_margin(main_axis, available_inner_width);
                    }
                } else if perform_layout {
                    self.tree[child].layout.position[main_edge] +=
                        style.leading_border(main_axis) + leading_main_dim;
                }
                continue;
            }

            if child_style.margin_leading_value(main_axis).unit() == Unit::Auto {
                line.main_dim += auto_share;
            }
            if perform_layout {
                self.tree[child].layout.position[main_edge] += line.main_dim;
            }
            if child_style.margin_trailing_value(main_axis).unit() == Unit::Auto {
                line.main_dim += auto_share;
            }

            let can_skip_flex = !perform_layout && measure_mode_cross == MeasureMode::Exactly;
            if can_skip_flex {
                line.main_dim += between_main_dim
                    + child_style.margin_for_axis(main_axis, available_inner_width)
                    + self.tree[child].layout.computed_flex_basis;
                line.cross_dim = available_inner_cross_dim;
            } else {
                line.main_dim += between_main_dim
                    + dim_with_margin(&self.tree[child], main_axis, available_inner_width);
                if is_baseline_layout {
                    let ascent = self.baseline(child)
                        + child_style.leading_margin(FlexDirection::Column, available_inner_width);
                    let descent = self.tree[child].layout.measured_height()
                        + child_style.margin_for_axis(FlexDirection::Column, available_inner_width)
                        - ascent;
                    max_ascent = float_max(max_ascent, ascent);
                    max_descent = float_max(max_descent, descent);
                } else {
                    line.cross_dim = float_max(
                        line.cross_dim,
                        dim_with_margin(&self.tree[child], cross_axis, available_inner_width),
                    );
                }
            }
        }

        line.main_dim += trailing_padding_and_border_main;
        if is_baseline_layout {
            line.cross_dim = max_ascent + max_descent;
        }
    }
}

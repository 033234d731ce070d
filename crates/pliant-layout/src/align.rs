//! Cross-axis placement: align-items/align-self within a line,
//! align-content across lines, and baselines.

use pliant_common::LogLevel;
use pliant_common::float::{float_max, floats_equal};
use std::ops::Range;

use pliant_style::{
    Align, Dimension, Display, Edge, FlexDirection, MeasureMode, PositionType, Unit, Wrap,
};
use pliant_tree::{BaselineRequest, LayoutPassReason, NodeId};

use crate::flex::FlexFrame;
use crate::pass::LayoutPass;
use crate::sizing::{
    align_item, constrain_max_size_for_mode, dim_with_margin, is_layout_dim_defined,
    is_style_dim_defined,
};

impl LayoutPass<'_> {
    /// Place the children of one line on the cross axis and re-lay out
    /// stretched children at the line's cross size.
    ///
    /// `children` is the index range of the line, `line_cross_dim` its
    /// cross extent and `line_offset` the cross extent of earlier lines.
    pub(crate) fn align_line_cross_axis(
        &mut self,
        frame: &FlexFrame,
        children: Range<usize>,
        container_cross_axis: f32,
        line_cross_dim: f32,
        line_offset: f32,
    ) {
        let FlexFrame {
            node,
            direction,
            main_axis,
            cross_axis,
            owner_width,
            available_inner_main_dim,
            available_inner_cross_dim,
            available_inner_width,
            available_inner_height,
            ..
        } = *frame;
        let is_main_axis_row = main_axis.is_row();
        let style = *self.tree[node].style();
        let cross_edge = cross_axis.leading_edge().index();
        let wraps = style.flex_wrap != Wrap::NoWrap;

        for index in children {
            let Some(child) = self.tree.child(node, index) else {
                continue;
            };
            let child_style = *self.tree[child].style();
            if child_style.display == Display::None {
                continue;
            }

            if child_style.position_type == PositionType::Absolute {
                let leading_defined = child_style.is_leading_position_defined(cross_axis);
                let fallback = style.leading_border(cross_axis)
                    + child_style.leading_margin(cross_axis, available_inner_width);
                let layout = &mut self.tree[child].layout;
                if leading_defined {
                    layout.position[cross_edge] = child_style
                        .leading_position(cross_axis, available_inner_cross_dim)
                        + fallback;
                }
                if !leading_defined || layout.position[cross_edge].is_nan() {
                    layout.position[cross_edge] = fallback;
                }
                continue;
            }

            let mut leading_cross_dim = style.leading_padding_and_border(cross_axis, owner_width);
            let align = align_item(&style, &child_style);
            let leading_auto = child_style.margin_leading_value(cross_axis).unit() == Unit::Auto;
            let trailing_auto = child_style.margin_trailing_value(cross_axis).unit() == Unit::Auto;

            if align == Align::Stretch && !leading_auto && !trailing_auto {
                if !is_style_dim_defined(&self.tree[child], cross_axis, available_inner_cross_dim) {
                    let measured_main = self.tree[child].layout.measured(main_axis.dimension());
                    let mut child_cross_size = match child_style.aspect_ratio {
                        Some(ratio) => {
                            child_style.margin_for_axis(cross_axis, available_inner_width)
                                + if is_main_axis_row {
                                    measured_main / ratio
                                } else {
                                    measured_main * ratio
                                }
                        }
                        None => line_cross_dim,
                    };
                    let mut child_main_size = measured_main
                        + child_style.margin_for_axis(main_axis, available_inner_width);

                    let mut exact = MeasureMode::Exactly;
                    constrain_max_size_for_mode(
                        &child_style,
                        main_axis,
                        available_inner_main_dim,
                        available_inner_width,
                        &mut exact,
                        &mut child_main_size,
                    );
                    let mut exact = MeasureMode::Exactly;
                    constrain_max_size_for_mode(
                        &child_style,
                        cross_axis,
                        available_inner_cross_dim,
                        available_inner_width,
                        &mut exact,
                        &mut child_cross_size,
                    );

                    let (child_width, child_height) = if is_main_axis_row {
                        (child_main_size, child_cross_size)
                    } else {
                        (child_cross_size, child_main_size)
                    };
                    let cross_axis_does_not_grow = style.align_content != Align::Stretch && wraps;
                    let width_mode = if child_width.is_nan()
                        || (!is_main_axis_row && cross_axis_does_not_grow)
                    {
                        MeasureMode::Undefined
                    } else {
                        MeasureMode::Exactly
                    };
                    let height_mode = if child_height.is_nan()
                        || (is_main_axis_row && cross_axis_does_not_grow)
                    {
                        MeasureMode::Undefined
                    } else {
                        MeasureMode::Exactly
                    };
                    let _ = self.layout_node(
                        child,
                        child_width,
                        child_height,
                        direction,
                        width_mode,
                        height_mode,
                        available_inner_width,
                        available_inner_height,
                        true,
                        LayoutPassReason::Stretch,
                    );
                }
            } else {
                let remaining_cross_dim = container_cross_axis
                    - dim_with_margin(&self.tree[child], cross_axis, available_inner_width);
                leading_cross_dim += if leading_auto && trailing_auto {
                    float_max(0.0, remaining_cross_dim / 2.0)
                } else if trailing_auto {
                    0.0
                } else if leading_auto {
                    float_max(0.0, remaining_cross_dim)
                } else {
                    match align {
                        Align::FlexStart => 0.0,
                        Align::Center => remaining_cross_dim / 2.0,
                        _ => remaining_cross_dim,
                    }
                };
            }
            self.tree[child].layout.position[cross_edge] += line_offset + leading_cross_dim;
        }
    }

    /// Distribute lines along the cross axis by align-content, then align
    /// each child within its line's final cross size.
    pub(crate) fn align_content(
        &mut self,
        frame: &FlexFrame,
        line_count: usize,
        total_line_cross_dim: f32,
    ) {
        let FlexFrame {
            node,
            direction,
            main_axis,
            cross_axis,
            owner_width,
            available_inner_cross_dim,
            available_inner_width,
            available_inner_height,
            ..
        } = *frame;
        let is_main_axis_row = main_axis.is_row();
        let style = *self.tree[node].style();
        let cross_edge = cross_axis.leading_edge().index();
        let lines = line_count as f32;

        let mut cross_dim_lead = 0.0;
        let mut current_lead = style.leading_padding_and_border(cross_axis, owner_width);
        if !available_inner_cross_dim.is_nan() {
            let remaining = available_inner_cross_dim - total_line_cross_dim;
            let has_room = available_inner_cross_dim > total_line_cross_dim;
            match style.align_content {
                Align::FlexEnd => current_lead += remaining,
                Align::Center => current_lead += remaining / 2.0,
                Align::Stretch => {
                    if has_room {
                        cross_dim_lead = remaining / lines;
                    }
                }
                Align::SpaceAround => {
                    if has_room {
                        current_lead += remaining / (2.0 * lines);
                        if line_count > 1 {
                            cross_dim_lead = remaining / lines;
                        }
                    } else {
                        current_lead += remaining / 2.0;
                    }
                }
                Align::SpaceBetween => {
                    if has_room && line_count > 1 {
                        cross_dim_lead = remaining / (lines - 1.0);
                    }
                }
                Align::Auto | Align::FlexStart | Align::Baseline => {}
            }
        }

        let child_count = self.tree.child_count(node);
        let mut end_index = 0;
        for line_index in 0..line_count {
            let start_index = end_index;

            let mut line_height = 0.0_f32;
            let mut max_ascent = 0.0_f32;
            let mut max_descent = 0.0_f32;
            let mut index = start_index;
            while index < child_count {
                let Some(child) = self.tree.child(node, index) else {
                    break;
                };
                let current = &self.tree[child];
                let child_style = *current.style();
                if child_style.display == Display::None
                    || child_style.position_type == PositionType::Absolute
                {
                    index += 1;
                    continue;
                }
                if current.line_index() != line_index {
                    break;
                }
                if is_layout_dim_defined(current, cross_axis) {
                    line_height = float_max(
                        line_height,
                        current.layout.measured(cross_axis.dimension())
                            + child_style.margin_for_axis(cross_axis, available_inner_width),
                    );
                }
                if align_item(&style, &child_style) == Align::Baseline {
                    let measured_height = current.layout.measured_height();
                    let ascent = self.baseline(child)
                        + child_style.leading_margin(FlexDirection::Column, available_inner_width);
                    let descent = measured_height
                        + child_style.margin_for_axis(FlexDirection::Column, available_inner_width)
                        - ascent;
                    max_ascent = float_max(max_ascent, ascent);
                    max_descent = float_max(max_descent, descent);
                    line_height = float_max(line_height, max_ascent + max_descent);
                }
                index += 1;
            }
            end_index = index;
            line_height += cross_dim_lead;

            for index in start_index..end_index {
                let Some(child) = self.tree.child(node, index) else {
                    continue;
                };
                let child_style = *self.tree[child].style();
                if child_style.display == Display::None
                    || child_style.position_type == PositionType::Absolute
                {
                    continue;
                }
                match align_item(&style, &child_style) {
                    Align::FlexStart => {
                        self.tree[child].layout.position[cross_edge] = current_lead
                            + child_style.leading_margin(cross_axis, available_inner_width);
                    }
                    Align::FlexEnd => {
                        let layout = &mut self.tree[child].layout;
                        layout.position[cross_edge] = current_lead + line_height
                            - child_style.trailing_margin(cross_axis, available_inner_width)
                            - layout.measured(cross_axis.dimension());
                    }
                    Align::Center => {
                        let layout = &mut self.tree[child].layout;
                        layout.position[cross_edge] = current_lead
                            + (line_height - layout.measured(cross_axis.dimension())) / 2.0;
                    }
                    Align::Stretch => {
                        self.tree[child].layout.position[cross_edge] = current_lead
                            + child_style.leading_margin(cross_axis, available_inner_width);
                        let current = &self.tree[child];
                        if is_style_dim_defined(current, cross_axis, available_inner_cross_dim) {
                            continue;
                        }
                        let layout = &current.layout;
                        let measured_width = layout.measured(Dimension::Width);
                        let measured_height = layout.measured(Dimension::Height);
                        let child_width = if is_main_axis_row {
                            measured_width
                                + child_style.margin_for_axis(main_axis, available_inner_width)
                        } else {
                            line_height
                        };
                        let child_height = if is_main_axis_row {
                            line_height
                        } else {
                            measured_height
                                + child_style.margin_for_axis(cross_axis, available_inner_width)
                        };
                        if !(floats_equal(child_width, measured_width)
                            && floats_equal(child_height, measured_height))
                        {
                            let _ = self.layout_node(
                                child,
                                child_width,
                                child_height,
                                direction,
                                MeasureMode::Exactly,
                                MeasureMode::Exactly,
                                available_inner_width,
                                available_inner_height,
                                true,
                                LayoutPassReason::MultilineStretch,
                            );
                        }
                    }
                    Align::Baseline => {
                        let offset = child_style
                            .leading_position(FlexDirection::Column, available_inner_cross_dim);
                        let top = current_lead + max_ascent - self.baseline(child) + offset;
                        self.tree[child].layout.position[Edge::Top.index()] = top;
                    }
                    Align::Auto | Align::SpaceBetween | Align::SpaceAround => {}
                }
            }
            current_lead += line_height;
        }
    }

    /// Distance from the top of `node` to its first baseline.
    ///
    /// Uses the baseline callback if one is installed. Otherwise follows
    /// the first child on the first line that is baseline-aligned or marked
    /// as the reference baseline, falling back to the first in-flow child,
    /// and finally to the node's own height.
    pub(crate) fn baseline(&self, node: NodeId) -> f32 {
        let current = &self.tree[node];
        if let Some(baseline) = current.baseline_func() {
            let context = current.context();
            self.tree.publish(|events| events.node_baseline_start(node));
            let value = baseline(&BaselineRequest {
                node,
                width: current.layout.measured_width(),
                height: current.layout.measured_height(),
                node_context: context.as_deref(),
                layout_context: self.context,
            });
            self.tree.publish(|events| events.node_baseline_end(node));
            if value.is_nan() {
                self.tree.log(
                    Some(node),
                    LogLevel::Fatal,
                    "Expect custom baseline function to not return NaN",
                );
            }
            return value;
        }

        let style = current.style();
        let mut baseline_child = None;
        for &child in current.children() {
            let candidate = &self.tree[child];
            if candidate.line_index() > 0 {
                break;
            }
            if candidate.style().position_type == PositionType::Absolute {
                continue;
            }
            if align_item(style, candidate.style()) == Align::Baseline
                || candidate.is_reference_baseline()
            {
                baseline_child = Some(child);
                break;
            }
            if baseline_child.is_none() {
                baseline_child = Some(child);
            }
        }
        match baseline_child {
            Some(child) => self.baseline(child) + self.tree[child].layout.top(),
            None => current.layout.measured_height(),
        }
    }

    /// Whether `node` lays its lines out by baseline: a row container whose
    /// items, or some in-flow child, align to the baseline.
    pub(crate) fn is_baseline_layout(&self, node: NodeId) -> bool {
        let current = &self.tree[node];
        let style = current.style();
        if style.flex_direction.is_column() {
            return false;
        }
        if style.align_items == Align::Baseline {
            return true;
        }
        current.children().iter().any(|&child| {
            let child_style = self.tree[child].style();
            child_style.position_type != PositionType::Absolute
                && child_style.align_self == Align::Baseline
        })
    }
}

//! Resolving flexible lengths: distributing a line's free space among its
//! items and laying each item out at its final main size.

use pliant_common::float::or_undefined;
use pliant_style::{Align, FlexDirection, MeasureMode, Unit, Value, Wrap};
use pliant_tree::{LayoutPassReason, Tree};

use crate::flex::FlexFrame;
use crate::lines::FlexLine;
use crate::pass::LayoutPass;
use crate::sizing::{
    align_item, bound_axis, bound_axis_within_min_and_max, constrain_max_size_for_mode,
    is_style_dim_defined,
};

fn is_auto(value: Value) -> bool {
    value.unit() == Unit::Auto
}

/// First pass: find items whose flexed size would violate a min or max
/// bound, freeze them at the bound, and take them out of the factor totals
/// so the second pass shares the rest among the others.
pub(crate) fn distribute_free_space_first_pass(
    tree: &Tree,
    line: &mut FlexLine,
    main_axis: FlexDirection,
    main_axis_owner_size: f32,
    available_inner_main_dim: f32,
    available_inner_width: f32,
) {
    let mut delta_free_space = 0.0;
    for &child in &line.relative_children {
        let current = &tree[child];
        let style = current.style();
        let child_flex_basis = bound_axis_within_min_and_max(
            style,
            main_axis,
            current.layout.computed_flex_basis,
            main_axis_owner_size,
        );

        if line.remaining_free_space < 0.0 {
            let flex_shrink_scaled_factor = -current.flex_shrink() * child_flex_basis;
            if !flex_shrink_scaled_factor.is_nan() && flex_shrink_scaled_factor != 0.0 {
                let base_main_size = child_flex_basis
                    + line.remaining_free_space / line.total_flex_shrink_scaled_factors
                        * flex_shrink_scaled_factor;
                let bound_main_size = bound_axis(
                    style,
                    main_axis,
                    base_main_size,
                    available_inner_main_dim,
                    available_inner_width,
                );
                if !base_main_size.is_nan()
                    && !bound_main_size.is_nan()
                    && base_main_size != bound_main_size
                {
                    delta_free_space += bound_main_size - child_flex_basis;
                    line.total_flex_shrink_scaled_factors -=
                        -current.flex_shrink() * current.layout.computed_flex_basis;
                }
            }
        } else if !line.remaining_free_space.is_nan() && line.remaining_free_space > 0.0 {
            let flex_grow_factor = current.flex_grow();
            if !flex_grow_factor.is_nan() && flex_grow_factor != 0.0 {
                let base_main_size = child_flex_basis
                    + line.remaining_free_space / line.total_flex_grow_factors * flex_grow_factor;
                let bound_main_size = bound_axis(
                    style,
                    main_axis,
                    base_main_size,
                    available_inner_main_dim,
                    available_inner_width,
                );
                if !base_main_size.is_nan()
                    && !bound_main_size.is_nan()
                    && base_main_size != bound_main_size
                {
                    delta_free_space += bound_main_size - child_flex_basis;
                    line.total_flex_grow_factors -= flex_grow_factor;
                }
            }
        }
    }
    line.remaining_free_space -= delta_free_space;
}

impl LayoutPass<'_> {
    /// Second pass: give every item its share of the free space, pick its
    /// cross size, and lay it out. Returns the space actually consumed.
    pub(crate) fn distribute_free_space_second_pass(
        &mut self,
        line: &FlexLine,
        frame: &FlexFrame,
    ) -> f32 {
        let FlexFrame {
            node,
            main_axis,
            cross_axis,
            main_axis_owner_size,
            available_inner_main_dim,
            available_inner_cross_dim,
            available_inner_width,
            available_inner_height,
            flex_basis_overflows,
            measure_mode_cross,
            perform_layout,
            ..
        } = *frame;
        let is_main_axis_row = main_axis.is_row();
        let owner_style = *self.tree[node].style();
        let wraps = owner_style.flex_wrap != Wrap::NoWrap;
        let owner_direction = self.tree[node].layout.direction;
        let mut delta_free_space = 0.0;

        for &child in &line.relative_children {
            let current = &self.tree[child];
            let style = *current.style();
            let child_flex_basis = bound_axis_within_min_and_max(
                &style,
                main_axis,
                current.layout.computed_flex_basis,
                main_axis_owner_size,
            );
            let mut updated_main_size = child_flex_basis;

            if !line.remaining_free_space.is_nan() && line.remaining_free_space < 0.0 {
                let flex_shrink_scaled_factor = -current.flex_shrink() * child_flex_basis;
                if flex_shrink_scaled_factor != 0.0 {
                    let child_size = if !line.total_flex_shrink_scaled_factors.is_nan()
                        && line.total_flex_shrink_scaled_factors == 0.0
                    {
                        child_flex_basis + flex_shrink_scaled_factor
                    } else {
                        child_flex_basis
                            + line.remaining_free_space / line.total_flex_shrink_scaled_factors
                                * flex_shrink_scaled_factor
                    };
                    updated_main_size = bound_axis(
                        &style,
                        main_axis,
                        child_size,
                        available_inner_main_dim,
                        available_inner_width,
                    );
                }
            } else if !line.remaining_free_space.is_nan() && line.remaining_free_space > 0.0 {
                let flex_grow_factor = current.flex_grow();
                if !flex_grow_factor.is_nan() && flex_grow_factor != 0.0 {
                    updated_main_size = bound_axis(
                        &style,
                        main_axis,
                        child_flex_basis
                            + line.remaining_free_space / line.total_flex_grow_factors
                                * flex_grow_factor,
                        available_inner_main_dim,
                        available_inner_width,
                    );
                }
            }
            delta_free_space += updated_main_size - child_flex_basis;

            let margin_main = style.margin_for_axis(main_axis, available_inner_width);
            let margin_cross = style.margin_for_axis(cross_axis, available_inner_width);
            let mut child_main_size = updated_main_size + margin_main;
            let mut child_main_mode = MeasureMode::Exactly;
            let cross_defined =
                is_style_dim_defined(current, cross_axis, available_inner_cross_dim);
            let no_auto_cross_margins = !is_auto(style.margin_leading_value(cross_axis))
                && !is_auto(style.margin_trailing_value(cross_axis));
            let stretches = align_item(&owner_style, &style) == Align::Stretch;

            let cross_constraint = if let Some(ratio) = style.aspect_ratio {
                let cross = if is_main_axis_row {
                    (child_main_size - margin_main) / ratio
                } else {
                    (child_main_size - margin_main) * ratio
                };
                (cross + margin_cross, MeasureMode::Exactly)
            } else if !available_inner_cross_dim.is_nan()
                && !cross_defined
                && measure_mode_cross == MeasureMode::Exactly
                && !(wraps && flex_basis_overflows)
                && stretches
                && no_auto_cross_margins
            {
                (available_inner_cross_dim, MeasureMode::Exactly)
            } else if !cross_defined {
                let mode = if available_inner_cross_dim.is_nan() {
                    MeasureMode::Undefined
                } else {
                    MeasureMode::AtMost
                };
                (available_inner_cross_dim, mode)
            } else {
                let resolved = current.resolved_dimension(cross_axis.dimension());
                let size = or_undefined(resolved.resolve(available_inner_cross_dim)) + margin_cross;
                let is_loose_percentage = resolved.unit() == Unit::Percent
                    && measure_mode_cross != MeasureMode::Exactly;
                let mode = if size.is_nan() || is_loose_percentage {
                    MeasureMode::Undefined
                } else {
                    MeasureMode::Exactly
                };
                (size, mode)
            };
            let (mut child_cross_size, mut child_cross_mode) = cross_constraint;

            constrain_max_size_for_mode(
                &style,
                main_axis,
                available_inner_main_dim,
                available_inner_width,
                &mut child_main_mode,
                &mut child_main_size,
            );
            constrain_max_size_for_mode(
                &style,
                cross_axis,
                available_inner_cross_dim,
                available_inner_width,
                &mut child_cross_mode,
                &mut child_cross_size,
            );

            let requires_stretch_layout = !cross_defined && stretches && no_auto_cross_margins;
            let (child_width, child_height) = if is_main_axis_row {
                (child_main_size, child_cross_size)
            } else {
                (child_cross_size, child_main_size)
            };
            let (child_width_mode, child_height_mode) = if is_main_axis_row {
                (child_main_mode, child_cross_mode)
            } else {
                (child_cross_mode, child_main_mode)
            };

            let is_layout_pass = perform_layout && !requires_stretch_layout;
            let _ = self.layout_node(
                child,
                child_width,
                child_height,
                owner_direction,
                child_width_mode,
                child_height_mode,
                available_inner_width,
                available_inner_height,
                is_layout_pass,
                if is_layout_pass {
                    LayoutPassReason::FlexLayout
                } else {
                    LayoutPassReason::FlexMeasure
                },
            );
            let child_overflow = self.tree[child].layout.had_overflow;
            self.tree[node].layout.had_overflow |= child_overflow;
        }
        delta_free_space
    }

    /// Distribute the line's free space in two passes and leave the space
    /// that is still unclaimed in `line.remaining_free_space`.
    pub(crate) fn resolve_flexible_length(&mut self, line: &mut FlexLine, frame: &FlexFrame) {
        let original_free_space = line.remaining_free_space;
        distribute_free_space_first_pass(
            self.tree,
            line,
            frame.main_axis,
            frame.main_axis_owner_size,
            frame.available_inner_main_dim,
            frame.available_inner_width,
        );
        let distributed_free_space = self.distribute_free_space_second_pass(line, frame);
        line.remaining_free_space = original_free_space - distributed_free_space;
    }
}

//! Flex basis of each child: the hypothetical main size before free space
//! is distributed.

use pliant_common::float::{float_max, floats_equal};
use pliant_style::{
    Align, Dimension, Direction, Display, ExperimentalFeature, FlexDirection, MeasureMode, Overflow,
    PositionType,
};
use pliant_tree::{LayoutPassReason, NodeId};

use crate::pass::LayoutPass;
use crate::sizing::{
    align_item, constrain_max_size_for_mode, resolve_direction, resolved_size, set_position,
};

/// Constraints of the owner, shared by every child's basis computation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BasisConstraints {
    pub(crate) width: f32,
    pub(crate) width_mode: MeasureMode,
    pub(crate) height: f32,
    pub(crate) height_mode: MeasureMode,
    pub(crate) direction: Direction,
}

impl LayoutPass<'_> {
    /// Compute and store `child`'s flex basis inside `node`.
    ///
    /// A definite `flex-basis` wins, then a definite main-axis size.
    /// Otherwise the child is measured under the owner's constraints and
    /// its measured main size becomes the basis. The basis never drops
    /// below the child's padding and border.
    pub(crate) fn compute_flex_basis_for_child(
        &mut self,
        node: NodeId,
        child: NodeId,
        constraints: BasisConstraints,
    ) {
        let BasisConstraints {
            width,
            width_mode,
            height,
            height_mode,
            direction,
        } = constraints;
        let owner_width = width;
        let owner_height = height;
        let owner_style = *self.tree[node].style();
        let main_axis = owner_style.flex_direction.resolve(direction);
        let is_main_axis_row = main_axis.is_row();
        let main_axis_size = if is_main_axis_row { width } else { height };
        let main_axis_owner_size = if is_main_axis_row {
            owner_width
        } else {
            owner_height
        };

        let generation = self.generation;
        let web_flex_basis = self
            .tree
            .config_of(child)
            .is_experimental_feature_enabled(ExperimentalFeature::WebFlexBasis);

        let current = &self.tree[child];
        let child_style = *current.style();
        let resolved_flex_basis = current.flex_basis().resolve(main_axis_owner_size);
        let is_row_style_dim_defined = current.is_style_dim_defined(Dimension::Width, owner_width);
        let is_column_style_dim_defined =
            current.is_style_dim_defined(Dimension::Height, owner_height);

        if let Some(basis) = resolved_flex_basis
            && !main_axis_size.is_nan()
        {
            let layout = &current.layout;
            let stale = layout.computed_flex_basis.is_nan()
                || (web_flex_basis && layout.computed_flex_basis_generation != generation);
            if stale {
                let padding_and_border =
                    child_style.padding_and_border_for_axis(main_axis, owner_width);
                self.tree[child].layout.computed_flex_basis = float_max(basis, padding_and_border);
            }
        } else if is_main_axis_row && is_row_style_dim_defined {
            let padding_and_border =
                child_style.padding_and_border_for_axis(FlexDirection::Row, owner_width);
            let size = resolved_size(current, Dimension::Width, owner_width);
            self.tree[child].layout.computed_flex_basis = float_max(size, padding_and_border);
        } else if !is_main_axis_row && is_column_style_dim_defined {
            let padding_and_border =
                child_style.padding_and_border_for_axis(FlexDirection::Column, owner_width);
            let size = resolved_size(current, Dimension::Height, owner_height);
            self.tree[child].layout.computed_flex_basis = float_max(size, padding_and_border);
        } else {
            let mut child_width = f32::NAN;
            let mut child_height = f32::NAN;
            let mut child_width_mode = MeasureMode::Undefined;
            let mut child_height_mode = MeasureMode::Undefined;
            let margin_row = child_style.margin_for_axis(FlexDirection::Row, owner_width);
            let margin_column = child_style.margin_for_axis(FlexDirection::Column, owner_width);

            if is_row_style_dim_defined {
                child_width = resolved_size(current, Dimension::Width, owner_width) + margin_row;
                child_width_mode = MeasureMode::Exactly;
            }
            if is_column_style_dim_defined {
                child_height =
                    resolved_size(current, Dimension::Height, owner_height) + margin_column;
                child_height_mode = MeasureMode::Exactly;
            }

            // A scroll container does not constrain its children on the main axis.
            let scrolls = owner_style.overflow == Overflow::Scroll;
            if (!is_main_axis_row || !scrolls) && child_width.is_nan() && !width.is_nan() {
                child_width = width;
                child_width_mode = MeasureMode::AtMost;
            }
            if (is_main_axis_row || !scrolls) && child_height.is_nan() && !height.is_nan() {
                child_height = height;
                child_height_mode = MeasureMode::AtMost;
            }

            if let Some(ratio) = child_style.aspect_ratio {
                if !is_main_axis_row && child_width_mode == MeasureMode::Exactly {
                    child_height = margin_column + (child_width - margin_row) / ratio;
                    child_height_mode = MeasureMode::Exactly;
                } else if is_main_axis_row && child_height_mode == MeasureMode::Exactly {
                    child_width = margin_row + (child_height - margin_column) * ratio;
                    child_width_mode = MeasureMode::Exactly;
                }
            }

            // Stretched children take the owner's exact cross size.
            let stretches = align_item(&owner_style, &child_style) == Align::Stretch;
            let has_exact_width = !width.is_nan() && width_mode == MeasureMode::Exactly;
            if !is_main_axis_row
                && !is_row_style_dim_defined
                && has_exact_width
                && stretches
                && child_width_mode != MeasureMode::Exactly
            {
                child_width = width;
                child_width_mode = MeasureMode::Exactly;
                if let Some(ratio) = child_style.aspect_ratio {
                    child_height = (child_width - margin_row) / ratio;
                    child_height_mode = MeasureMode::Exactly;
                }
            }
            let has_exact_height = !height.is_nan() && height_mode == MeasureMode::Exactly;
            if is_main_axis_row
                && !is_column_style_dim_defined
                && has_exact_height
                && stretches
                && child_height_mode != MeasureMode::Exactly
            {
                child_height = height;
                child_height_mode = MeasureMode::Exactly;
                if let Some(ratio) = child_style.aspect_ratio {
                    child_width = (child_height - margin_column) * ratio;
                    child_width_mode = MeasureMode::Exactly;
                }
            }

            constrain_max_size_for_mode(
                &child_style,
                FlexDirection::Row,
                owner_width,
                owner_width,
                &mut child_width_mode,
                &mut child_width,
            );
            constrain_max_size_for_mode(
                &child_style,
                FlexDirection::Column,
                owner_height,
                owner_width,
                &mut child_height_mode,
                &mut child_height,
            );

            let _ = self.layout_node(
                child,
                child_width,
                child_height,
                direction,
                child_width_mode,
                child_height_mode,
                owner_width,
                owner_height,
                false,
                LayoutPassReason::Measure,
            );

            let measured = &self.tree[child];
            let basis = float_max(
                measured.layout.measured(main_axis.dimension()),
                measured.style().padding_and_border_for_axis(main_axis, owner_width),
            );
            self.tree[child].layout.computed_flex_basis = basis;
        }
        self.tree[child].layout.computed_flex_basis_generation = generation;
    }

    /// Compute every child's flex basis and return the sum of bases plus
    /// main-axis margins.
    ///
    /// Hidden children are zeroed out here. When the main axis is exact and
    /// exactly one child can both grow and shrink, that child's basis is
    /// forced to zero so it absorbs all remaining space without a measure.
    pub(crate) fn compute_flex_basis_for_children(
        &mut self,
        node: NodeId,
        available_inner_width: f32,
        available_inner_height: f32,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
        direction: Direction,
        main_axis: FlexDirection,
        perform_layout: bool,
    ) -> f32 {
        let main_mode = if main_axis.is_row() {
            width_mode
        } else {
            height_mode
        };
        let single_flex_child = if main_mode == MeasureMode::Exactly {
            self.single_flex_child(node)
        } else {
            None
        };

        let mut total_outer_flex_basis = 0.0;
        for index in 0..self.tree.child_count(node) {
            let Some(child) = self.tree.child(node, index) else {
                continue;
            };
            self.tree[child].resolve_dimensions();
            let child_style = *self.tree[child].style();
            if child_style.display == Display::None {
                self.zero_out_layout_recursively(child);
                self.tree[child].set_has_new_layout(true);
                self.tree.set_dirty(child, false);
                continue;
            }
            if perform_layout {
                let child_direction = resolve_direction(&child_style, direction);
                let (main_size, cross_size) = if main_axis.is_row() {
                    (available_inner_width, available_inner_height)
                } else {
                    (available_inner_height, available_inner_width)
                };
                set_position(
                    &mut self.tree[child],
                    child_direction,
                    main_size,
                    cross_size,
                    available_inner_width,
                );
            }
            if child_style.position_type == PositionType::Absolute {
                continue;
            }
            if Some(child) == single_flex_child {
                let layout = &mut self.tree[child].layout;
                layout.computed_flex_basis_generation = self.generation;
                layout.computed_flex_basis = 0.0;
            } else {
                self.compute_flex_basis_for_child(
                    node,
                    child,
                    BasisConstraints {
                        width: available_inner_width,
                        width_mode,
                        height: available_inner_height,
                        height_mode,
                        direction,
                    },
                );
            }
            total_outer_flex_basis += self.tree[child].layout.computed_flex_basis
                + child_style.margin_for_axis(main_axis, available_inner_width);
        }
        total_outer_flex_basis
    }

    /// The only flexible child, provided it has non-zero grow and shrink.
    fn single_flex_child(&self, node: NodeId) -> Option<NodeId> {
        let mut single = None;
        for &child in self.tree.children(node) {
            let current = &self.tree[child];
            if !current.is_flexible() {
                continue;
            }
            if single.is_some()
                || floats_equal(current.flex_grow(), 0.0)
                || floats_equal(current.flex_shrink(), 0.0)
            {
                return None;
            }
            single = Some(child);
        }
        single
    }
}

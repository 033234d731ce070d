//! Sizing of nodes that need no flex pass: measured leaves, empty
//! containers, fully constrained nodes and hidden subtrees.

use pliant_style::{Dimension, Edge, FlexDirection, MeasureMode};
use pliant_tree::{
    LayoutPassReason, LayoutResult, MeasureCallbackEnd, MeasureRequest, NodeId, Size,
};

use crate::pass::LayoutPass;
use crate::sizing::bound_axis;

/// Padding plus border on (row, column), read from the resolved layout.
fn resolved_padding_and_border(layout: &LayoutResult) -> (f32, f32) {
    let sum = |a: Edge, b: Edge| {
        layout.padding[a.index()]
            + layout.padding[b.index()]
            + layout.border[a.index()]
            + layout.border[b.index()]
    };
    (sum(Edge::Left, Edge::Right), sum(Edge::Top, Edge::Bottom))
}

fn fits_content(mode: MeasureMode) -> bool {
    matches!(mode, MeasureMode::Undefined | MeasureMode::AtMost)
}

impl LayoutPass<'_> {
    fn set_measured(
        &mut self,
        node: NodeId,
        width: f32,
        height: f32,
        owner_width: f32,
        owner_height: f32,
    ) {
        let current = &mut self.tree[node];
        let style = *current.style();
        current.layout.measured_dimensions[Dimension::Width.index()] =
            bound_axis(&style, FlexDirection::Row, width, owner_width, owner_width);
        current.layout.measured_dimensions[Dimension::Height.index()] =
            bound_axis(&style, FlexDirection::Column, height, owner_height, owner_width);
    }

    /// Size a leaf through its measure callback.
    ///
    /// Both axes exact skips the callback. Otherwise the callback gets the
    /// inner size and its answer is padded back out on the axes it was
    /// free to choose.
    pub(crate) fn measure_leaf(
        &mut self,
        node: NodeId,
        available_width: f32,
        available_height: f32,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
        owner_width: f32,
        owner_height: f32,
        reason: LayoutPassReason,
    ) {
        let available_width = if width_mode == MeasureMode::Undefined {
            f32::NAN
        } else {
            available_width
        };
        let available_height = if height_mode == MeasureMode::Undefined {
            f32::NAN
        } else {
            available_height
        };

        let (pb_row, pb_column) = resolved_padding_and_border(&self.tree[node].layout);
        let inner_width = if available_width.is_nan() {
            available_width
        } else {
            (available_width - pb_row).max(0.0)
        };
        let inner_height = if available_height.is_nan() {
            available_height
        } else {
            (available_height - pb_column).max(0.0)
        };

        if width_mode == MeasureMode::Exactly && height_mode == MeasureMode::Exactly {
            self.set_measured(node, available_width, available_height, owner_width, owner_height);
            return;
        }

        let Some(measure) = self.tree[node].measure_func() else {
            return;
        };
        let node_context = self.tree[node].context();
        self.tree.publish(|events| events.measure_callback_start(node));
        let measured: Size = measure(&MeasureRequest {
            node,
            width: inner_width,
            width_mode,
            height: inner_height,
            height_mode,
            node_context: node_context.as_deref(),
            layout_context: self.context,
        });
        self.stats.measure_callbacks += 1;
        self.stats.measure_callback_reasons[reason] += 1;
        let end = MeasureCallbackEnd {
            width: inner_width,
            width_mode,
            height: inner_height,
            height_mode,
            measured,
            reason,
        };
        self.tree.publish(|events| events.measure_callback_end(node, &end));

        let width = if fits_content(width_mode) {
            measured.width + pb_row
        } else {
            available_width
        };
        let height = if fits_content(height_mode) {
            measured.height + pb_column
        } else {
            available_height
        };
        self.set_measured(node, width, height, owner_width, owner_height);
    }

    /// A container without children is as large as its padding and border
    /// on every axis it is free to size.
    pub(crate) fn measure_empty_container(
        &mut self,
        node: NodeId,
        available_width: f32,
        available_height: f32,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
        owner_width: f32,
        owner_height: f32,
    ) {
        let (pb_row, pb_column) = resolved_padding_and_border(&self.tree[node].layout);
        let width = if fits_content(width_mode) {
            pb_row
        } else {
            available_width
        };
        let height = if fits_content(height_mode) {
            pb_column
        } else {
            available_height
        };
        self.set_measured(node, width, height, owner_width, owner_height);
    }

    /// Settle the size without looking at children when the constraints
    /// already decide it: both axes exact, or an at-most bound of zero or
    /// less. Returns whether the size was settled.
    pub(crate) fn measure_fixed_size(
        &mut self,
        node: NodeId,
        available_width: f32,
        available_height: f32,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
        owner_width: f32,
        owner_height: f32,
    ) -> bool {
        let collapsed = |size: f32, mode: MeasureMode| {
            !size.is_nan() && mode == MeasureMode::AtMost && size <= 0.0
        };
        let fixed = collapsed(available_width, width_mode)
            || collapsed(available_height, height_mode)
            || (width_mode == MeasureMode::Exactly && height_mode == MeasureMode::Exactly);
        if !fixed {
            return false;
        }
        let clamp = |size: f32, mode: MeasureMode| {
            if size.is_nan() || (mode == MeasureMode::AtMost && size < 0.0) {
                0.0
            } else {
                size
            }
        };
        self.set_measured(
            node,
            clamp(available_width, width_mode),
            clamp(available_height, height_mode),
            owner_width,
            owner_height,
        );
        true
    }

    /// Reset a `display: none` subtree to an empty box at the origin.
    pub(crate) fn zero_out_layout_recursively(&mut self, node: NodeId) {
        {
            let current = &mut self.tree[node];
            current.layout = LayoutResult::default();
            current.layout.dimensions = [0.0, 0.0];
            current.set_has_new_layout(true);
        }
        self.tree.clone_children_if_needed(node);
        for index in 0..self.tree.child_count(node) {
            if let Some(child) = self.tree.child(node, index) {
                self.zero_out_layout_recursively(child);
            }
        }
    }
}

//! Top-level layout entry points.

use std::any::Any;

use pliant_common::LogLevel;
use pliant_style::{Direction, FlexDirection, MeasureMode};
use pliant_tree::{LayoutPassReason, LayoutStats, Node, NodeId, PrintOptions, Tree};

use crate::pass::LayoutPass;
use crate::rounding::round_to_pixel_grid;
use crate::sizing::{is_style_dim_defined, resolved_size, set_position};

/// Root constraints of one axis: a definite style size, a max bound, or
/// whatever the caller offers.
fn root_constraint(
    node: &Node,
    axis: FlexDirection,
    owner_size: f32,
    owner_width: f32,
) -> (f32, MeasureMode) {
    let dimension = axis.dimension();
    if is_style_dim_defined(node, axis, owner_size) {
        let size = resolved_size(node, dimension, owner_size)
            + node.style().margin_for_axis(axis, owner_width);
        return (size, MeasureMode::Exactly);
    }
    if let Some(max) = node.style().max_dimensions[dimension].resolve(owner_size) {
        return (max, MeasureMode::AtMost);
    }
    if owner_size.is_nan() {
        (owner_size, MeasureMode::Undefined)
    } else {
        (owner_size, MeasureMode::Exactly)
    }
}

/// Lay out the tree rooted at `root` inside an owner of the given size.
///
/// Either size may be `f32::NAN` to let the root size itself to its
/// content on that axis. Results are written to every node's
/// [`pliant_tree::LayoutResult`] and rounded to the pixel grid of the
/// root's config.
///
/// # Example
/// ```ignore
/// let mut tree = Tree::new();
/// let root = tree.new_node();
/// tree.update_style(root, |s| s.dimensions[Dimension::Width] = Value::Point(100.0))?;
/// let stats = compute_layout(&mut tree, root, f32::NAN, f32::NAN, Direction::Ltr);
/// assert_eq!(tree[root].layout.width(), 100.0);
/// ```
pub fn compute_layout(
    tree: &mut Tree,
    root: NodeId,
    owner_width: f32,
    owner_height: f32,
    owner_direction: Direction,
) -> LayoutStats {
    compute_layout_with_context(tree, root, owner_width, owner_height, owner_direction, None)
}

/// [`compute_layout`] with a caller value handed to every measure and
/// baseline callback of this pass.
pub fn compute_layout_with_context(
    tree: &mut Tree,
    root: NodeId,
    owner_width: f32,
    owner_height: f32,
    owner_direction: Direction,
    context: Option<&dyn Any>,
) -> LayoutStats {
    if !tree.contains(root) {
        let message = format!("cannot lay out unknown node {root:?}");
        tree.log(None, LogLevel::Error, &message);
        return LayoutStats::default();
    }
    tree.publish(|events| events.layout_pass_start(root));

    let generation = tree.next_generation();
    tree[root].resolve_dimensions();
    let (width, width_mode) =
        root_constraint(&tree[root], FlexDirection::Row, owner_width, owner_width);
    let (height, height_mode) =
        root_constraint(&tree[root], FlexDirection::Column, owner_height, owner_width);
    let constraints = RootConstraints {
        width,
        height,
        width_mode,
        height_mode,
        owner_width,
        owner_height,
        owner_direction,
    };

    let stats = run_root(tree, root, constraints, context, generation);
    if tree.config_of(root).settings.print_tree {
        tree.print(root, PrintOptions::default());
    }
    tree.publish(|events| events.layout_pass_end(root, &stats));

    let settings = &tree.config_of(root).settings;
    if settings.should_diff_layout_without_legacy_stretch_behaviour
        && tree.did_use_legacy_flag(root)
    {
        diff_without_legacy_stretch(tree, root, constraints, context);
    }
    stats
}

#[derive(Debug, Clone, Copy)]
struct RootConstraints {
    width: f32,
    height: f32,
    width_mode: MeasureMode,
    height_mode: MeasureMode,
    owner_width: f32,
    owner_height: f32,
    owner_direction: Direction,
}

/// One full pass from the root: layout, root position, rounding.
fn run_root(
    tree: &mut Tree,
    root: NodeId,
    constraints: RootConstraints,
    context: Option<&dyn Any>,
    generation: u32,
) -> LayoutStats {
    let RootConstraints {
        width,
        height,
        width_mode,
        height_mode,
        owner_width,
        owner_height,
        owner_direction,
    } = constraints;
    let mut pass = LayoutPass::new(tree, context, generation);
    let changed = pass.layout_node(
        root,
        width,
        height,
        owner_direction,
        width_mode,
        height_mode,
        owner_width,
        owner_height,
        true,
        LayoutPassReason::Initial,
    );
    let stats = pass.stats;
    if changed {
        let node = &mut tree[root];
        let direction = node.layout.direction;
        set_position(node, direction, owner_width, owner_height, owner_width);
        let scale = f64::from(tree.config_of(root).point_scale_factor());
        round_to_pixel_grid(tree, root, scale, 0.0, 0.0);
    }
    stats
}

/// Lay out a copy of the tree without legacy stretch and record on the
/// root whether the result differs.
fn diff_without_legacy_stretch(
    tree: &mut Tree,
    root: NodeId,
    constraints: RootConstraints,
    context: Option<&dyn Any>,
) {
    let config = tree.clone_config(tree[root].config());
    if let Some(settings) = tree.config_mut(config).map(|c| &mut c.settings) {
        settings.use_legacy_stretch_behaviour = false;
    }
    let copy = match tree.deep_clone_with_config(root, config) {
        Ok(copy) => copy,
        Err(err) => {
            let message = format!("legacy stretch diff skipped: {err}");
            tree.log(Some(root), LogLevel::Error, &message);
            tree.free_config(config);
            return;
        }
    };
    tree[copy].resolve_dimensions();
    tree.mark_dirty_downwards(copy);
    let generation = tree.next_generation();
    let _ = run_root(tree, copy, constraints, context, generation);

    let affects_layout = !tree.layout_trees_equal(copy, root);
    tree[root].layout.does_legacy_stretch_flag_affect_layout = affects_layout;
    if let Err(err) = tree.free_recursive(copy) {
        let message = format!("failed to free legacy diff copy: {err}");
        tree.log(Some(root), LogLevel::Warn, &message);
    }
    tree.free_config(config);
}

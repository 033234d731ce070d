//! Tests for tree mutation: ownership, dirty propagation, cloning and freeing.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pliant_common::LogLevel;
use pliant_style::{Edge, FlexDirection, NodeType, Value};
use pliant_tree::{
    ConfigId, ConfigSettings, LayoutEvents, MeasureFunc, MeasureRequest, NodeId, PrintOptions, Size, Tree,
    TreeError,
};

/// Helper to build an owner with `n` fresh children.
fn owner_with_children(tree: &mut Tree, n: usize) -> (NodeId, Vec<NodeId>) {
    let owner = tree.new_node();
    let children: Vec<NodeId> = (0..n)
        .map(|_| {
            let child = tree.new_node();
            tree.add_child(owner, child).unwrap();
            child
        })
        .collect();
    (owner, children)
}

fn fixed_measure(width: f32, height: f32) -> MeasureFunc {
    Rc::new(move |_: &MeasureRequest<'_>| Size::new(width, height))
}

/// Collect log lines on the default config.
fn capture_logs(tree: &mut Tree) -> Rc<RefCell<Vec<(LogLevel, String)>>> {
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&lines);
    tree[ConfigId::DEFAULT].set_logger(Some(Rc::new(move |_: Option<NodeId>, level: LogLevel, message: &str| {
        sink.borrow_mut().push((level, message.to_string()));
    })));
    lines
}

fn clear_dirty(tree: &mut Tree, ids: &[NodeId]) {
    for &id in ids {
        tree.set_dirty(id, false);
    }
}

// ========== insert / remove ==========

#[test]
fn test_insert_child_sets_owner_and_order() {
    let mut tree = Tree::new();
    let (owner, children) = owner_with_children(&mut tree, 2);
    let extra = tree.new_node();
    tree.insert_child(owner, extra, 1).unwrap();

    assert_eq!(tree.children(owner), &[children[0], extra, children[1]]);
    assert_eq!(tree.owner(extra), Some(owner));
    assert_eq!(tree.child(owner, 1), Some(extra));
    assert_eq!(tree.child_count(owner), 3);
}

#[test]
fn test_insert_owned_child_is_refused() {
    let mut tree = Tree::new();
    let logs = capture_logs(&mut tree);
    let (_, children) = owner_with_children(&mut tree, 1);
    let other = tree.new_node();

    let err = tree.add_child(other, children[0]).unwrap_err();
    assert_eq!(err, TreeError::ChildHasOwner { child: children[0] });
    assert_eq!(tree.child_count(other), 0);
    assert_eq!(logs.borrow()[0].0, LogLevel::Fatal);
}

#[test]
fn test_insert_into_measured_node_is_refused() {
    let mut tree = Tree::new();
    let _logs = capture_logs(&mut tree);
    let leaf = tree.new_node();
    tree.set_measure_func(leaf, Some(fixed_measure(1.0, 1.0))).unwrap();
    let child = tree.new_node();

    assert_eq!(
        tree.add_child(leaf, child),
        Err(TreeError::MeasuredNodeCannotHaveChildren { owner: leaf })
    );
}

#[test]
fn test_insert_past_end_is_refused() {
    let mut tree = Tree::new();
    let _logs = capture_logs(&mut tree);
    let owner = tree.new_node();
    let child = tree.new_node();
    assert!(matches!(
        tree.insert_child(owner, child, 3),
        Err(TreeError::IndexOutOfBounds { index: 3, len: 0, .. })
    ));
}

#[test]
fn test_remove_child_resets_layout_and_owner() {
    let mut tree = Tree::new();
    let (owner, children) = owner_with_children(&mut tree, 3);
    tree[children[1]].layout.dimensions = [10.0, 10.0];

    tree.remove_child(owner, children[1]).unwrap();

    assert_eq!(tree.children(owner), &[children[0], children[2]]);
    assert_eq!(tree.owner(children[1]), None);
    assert!(tree[children[1]].layout.width().is_nan());
}

#[test]
fn test_remove_non_child_is_a_no_op() {
    let mut tree = Tree::new();
    let (owner, _) = owner_with_children(&mut tree, 1);
    let stranger = tree.new_node();
    tree.set_dirty(owner, false);

    tree.remove_child(owner, stranger).unwrap();
    assert!(!tree[owner].is_dirty());
}

#[test]
fn test_remove_all_children_detaches_owned_children() {
    let mut tree = Tree::new();
    let (owner, children) = owner_with_children(&mut tree, 2);
    tree.remove_all_children(owner).unwrap();

    assert_eq!(tree.child_count(owner), 0);
    assert!(children.iter().all(|&c| tree.owner(c).is_none()));
}

#[test]
fn test_set_children_keeps_common_children() {
    let mut tree = Tree::new();
    let (owner, children) = owner_with_children(&mut tree, 2);
    let fresh = tree.new_node();
    tree[children[1]].layout.dimensions = [5.0, 5.0];

    tree.set_children(owner, &[children[1], fresh]).unwrap();

    assert_eq!(tree.children(owner), &[children[1], fresh]);
    assert_eq!(tree.owner(children[0]), None);
    assert_eq!(tree.owner(fresh), Some(owner));
    assert_eq!(tree[children[1]].layout.width(), 5.0);
}

#[test]
fn test_replace_child_swaps_in_place() {
    let mut tree = Tree::new();
    let (owner, children) = owner_with_children(&mut tree, 2);
    let fresh = tree.new_node();
    tree.replace_child(owner, fresh, 0).unwrap();

    assert_eq!(tree.children(owner), &[fresh, children[1]]);
    assert_eq!(tree.owner(fresh), Some(owner));
}

// ========== dirty propagation ==========

#[test]
fn test_marking_leaf_dirty_propagates_to_root_only() {
    let mut tree = Tree::new();
    let (root, branches) = owner_with_children(&mut tree, 2);
    let leaf = tree.new_node();
    let cousin = tree.new_node();
    tree.add_child(branches[0], leaf).unwrap();
    tree.add_child(branches[1], cousin).unwrap();
    tree.set_measure_func(leaf, Some(fixed_measure(1.0, 1.0))).unwrap();
    clear_dirty(&mut tree, &[root, branches[0], branches[1], leaf, cousin]);

    tree.mark_dirty(leaf).unwrap();

    assert!(tree[leaf].is_dirty());
    assert!(tree.ancestors(leaf).all(|id| tree[id].is_dirty()));
    assert!(!tree[branches[1]].is_dirty());
    assert!(!tree[cousin].is_dirty());
}

#[test]
fn test_mark_dirty_requires_measure_func() {
    let mut tree = Tree::new();
    let _logs = capture_logs(&mut tree);
    let node = tree.new_node();
    assert_eq!(
        tree.mark_dirty(node),
        Err(TreeError::MarkDirtyWithoutMeasure { node })
    );
}

#[test]
fn test_dirtied_callback_fires_once_per_transition() {
    let mut tree = Tree::new();
    let node = tree.new_node();
    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    tree.set_dirtied_func(node, Some(Rc::new(move |_: NodeId| seen.set(seen.get() + 1))))
        .unwrap();

    tree.update_style(node, |s| s.dimensions.width = Value::points(10.0))
        .unwrap();
    tree.update_style(node, |s| s.dimensions.height = Value::points(10.0))
        .unwrap();
    assert_eq!(count.get(), 1);

    tree.set_dirty(node, false);
    tree.update_style(node, |s| s.dimensions.height = Value::points(20.0))
        .unwrap();
    assert_eq!(count.get(), 2);
}

#[test]
fn test_unchanged_style_does_not_dirty() {
    let mut tree = Tree::new();
    let node = tree.new_node();
    tree.update_style(node, |s| s.margin[Edge::Left] = Value::points(4.0))
        .unwrap();
    tree.set_dirty(node, false);

    tree.update_style(node, |s| s.margin[Edge::Left] = Value::points(4.0))
        .unwrap();
    assert!(!tree[node].is_dirty());
}

#[test]
fn test_copy_style_marks_dirty_on_change() {
    let mut tree = Tree::new();
    let src = tree.new_node();
    let dst = tree.new_node();
    tree.update_style(src, |s| s.flex_direction = FlexDirection::Row)
        .unwrap();
    tree.copy_style(dst, src).unwrap();

    assert_eq!(tree[dst].style().flex_direction, FlexDirection::Row);
    assert!(tree[dst].is_dirty());
}

#[test]
fn test_mark_dirty_downwards_reaches_every_descendant() {
    let mut tree = Tree::new();
    let (root, children) = owner_with_children(&mut tree, 2);
    let grandchild = tree.new_node();
    tree.add_child(children[0], grandchild).unwrap();
    clear_dirty(&mut tree, &[root, children[0], children[1], grandchild]);

    tree.mark_dirty_downwards(root);
    assert!([root, children[0], children[1], grandchild]
        .iter()
        .all(|&id| tree[id].is_dirty()));
}

#[test]
fn test_reference_baseline_change_marks_dirty() {
    let mut tree = Tree::new();
    let (owner, children) = owner_with_children(&mut tree, 1);
    clear_dirty(&mut tree, &[owner, children[0]]);

    tree.set_is_reference_baseline(children[0], true).unwrap();
    assert!(tree[owner].is_dirty());
}

// ========== measure functions ==========

#[test]
fn test_measure_func_sets_node_type() {
    let mut tree = Tree::new();
    let node = tree.new_node();
    tree.set_measure_func(node, Some(fixed_measure(1.0, 2.0))).unwrap();
    assert_eq!(tree[node].node_type(), NodeType::Text);

    tree.set_measure_func(node, None).unwrap();
    assert_eq!(tree[node].node_type(), NodeType::Default);
}

#[test]
fn test_measure_func_on_node_with_children_is_refused() {
    let mut tree = Tree::new();
    let _logs = capture_logs(&mut tree);
    let (owner, _) = owner_with_children(&mut tree, 1);
    assert_eq!(
        tree.set_measure_func(owner, Some(fixed_measure(1.0, 1.0))),
        Err(TreeError::CannotSetMeasureWithChildren { node: owner })
    );
}

// ========== clone / reset / free ==========

#[test]
fn test_clone_node_shares_children_without_owning_them() {
    let mut tree = Tree::new();
    let (owner, children) = owner_with_children(&mut tree, 2);
    let copy = tree.clone_node(owner).unwrap();

    assert_eq!(tree.children(copy), children.as_slice());
    assert!(children.iter().all(|&c| tree.owner(c) == Some(owner)));
    assert_eq!(tree.owner(copy), None);
}

#[test]
fn test_deep_clone_copies_the_subtree() {
    let mut tree = Tree::new();
    let (owner, children) = owner_with_children(&mut tree, 2);
    tree.update_style(children[0], |s| s.flex_grow = Some(3.0))
        .unwrap();
    let copy = tree.deep_clone(owner).unwrap();

    let copied = tree.children(copy).to_vec();
    assert_eq!(copied.len(), 2);
    assert!(copied.iter().all(|c| !children.contains(c)));
    assert!(copied.iter().all(|&c| tree.owner(c) == Some(copy)));
    assert_eq!(tree[copied[0]].style().flex_grow, Some(3.0));
    assert_ne!(tree[copy].config(), tree[owner].config());
}

#[test]
fn test_clone_children_if_needed_adopts_shared_children() {
    let mut tree = Tree::new();
    let (owner, children) = owner_with_children(&mut tree, 2);
    let copy = tree.clone_node(owner).unwrap();

    tree.clone_children_if_needed(copy);

    let adopted = tree.children(copy).to_vec();
    assert!(adopted.iter().all(|c| !children.contains(c)));
    assert!(adopted.iter().all(|&c| tree.owner(c) == Some(copy)));
    assert_eq!(tree.children(owner), children.as_slice());
}

#[test]
fn test_clone_callback_is_used() {
    let mut tree = Tree::new();
    let (owner, _) = owner_with_children(&mut tree, 1);
    let copy = tree.clone_node(owner).unwrap();
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    tree[ConfigId::DEFAULT].set_clone_node_func(Some(Rc::new(
        move |tree: &mut Tree, child: NodeId, _owner: NodeId, index: usize| {
            seen.set(seen.get() + 1);
            assert_eq!(index, 0);
            tree.clone_node(child).ok()
        },
    )));

    tree.clone_children_if_needed(copy);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_reset_requires_detached_leaf() {
    let mut tree = Tree::new();
    let _logs = capture_logs(&mut tree);
    let (owner, children) = owner_with_children(&mut tree, 1);

    assert_eq!(
        tree.reset(owner),
        Err(TreeError::ResetWithChildren { node: owner })
    );
    assert_eq!(
        tree.reset(children[0]),
        Err(TreeError::ResetWithOwner { node: children[0] })
    );
}

#[test]
fn test_reset_restores_web_defaults() {
    let mut tree = Tree::with_settings(ConfigSettings {
        use_web_defaults: true,
        ..ConfigSettings::default()
    });
    let node = tree.new_node();
    tree.update_style(node, |s| s.flex_direction = FlexDirection::Column)
        .unwrap();
    tree.reset(node).unwrap();
    assert_eq!(tree[node].style().flex_direction, FlexDirection::Row);
}

#[test]
fn test_free_recursive_skips_shared_children() {
    let mut tree = Tree::new();
    let (owner, children) = owner_with_children(&mut tree, 2);
    let copy = tree.clone_node(owner).unwrap();

    tree.free_recursive(copy).unwrap();
    assert!(!tree.contains(copy));
    assert!(children.iter().all(|&c| tree.contains(c)));

    tree.free_recursive(owner).unwrap();
    assert!(tree.is_empty());
}

#[test]
fn test_freed_node_is_unknown() {
    let mut tree = Tree::new();
    let _logs = capture_logs(&mut tree);
    let (owner, children) = owner_with_children(&mut tree, 1);
    tree.free(children[0]).unwrap();

    assert_eq!(tree.child_count(owner), 0);
    assert_eq!(
        tree.set_style(children[0], Default::default()),
        Err(TreeError::UnknownNode(children[0]))
    );
}

#[test]
fn test_freed_ids_are_not_recycled() {
    let mut tree = Tree::new();
    let _logs = capture_logs(&mut tree);
    let first = tree.new_node();
    tree.free(first).unwrap();
    let second = tree.new_node();

    assert_ne!(first, second);
    assert!(!tree.contains(first));
    assert_eq!(tree.len(), 1);
    assert_eq!(
        tree.update_style(first, |s| s.flex_grow = Some(1.0)),
        Err(TreeError::UnknownNode(first))
    );
}

#[test]
fn test_freeing_a_shared_child_is_reported() {
    let mut tree = Tree::new();
    let logs = capture_logs(&mut tree);
    let (owner, children) = owner_with_children(&mut tree, 2);
    let copy = tree.clone_node(owner).unwrap();

    tree.free(children[0]).unwrap();

    assert_eq!(tree.children(owner), &children[1..]);
    assert_eq!(tree.children(copy), children.as_slice());
    let logs = logs.borrow();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].0, LogLevel::Error);
    assert!(logs[0].1.contains(&format!("{copy:?}")));
}

#[test]
fn test_freeing_an_unshared_child_is_silent() {
    let mut tree = Tree::new();
    let logs = capture_logs(&mut tree);
    let (owner, children) = owner_with_children(&mut tree, 2);

    tree.free(children[0]).unwrap();

    assert_eq!(tree.children(owner), &children[1..]);
    assert!(logs.borrow().is_empty());
}

// ========== config / events / printing ==========

#[test]
fn test_negative_scale_factor_is_refused() {
    let mut tree = Tree::new();
    let logs = capture_logs(&mut tree);
    assert_eq!(
        tree.set_point_scale_factor(ConfigId::DEFAULT, -1.0),
        Err(TreeError::NegativeScaleFactor)
    );
    assert_eq!(logs.borrow().len(), 1);
    tree.set_point_scale_factor(ConfigId::DEFAULT, 0.0).unwrap();
    assert_eq!(tree[ConfigId::DEFAULT].point_scale_factor(), 0.0);
}

#[test]
fn test_settings_from_json() {
    let settings: ConfigSettings = serde_json::from_str(
        r#"{"use_web_defaults": true, "experimental_features": ["web-flex-basis"]}"#,
    )
    .unwrap();
    assert!(settings.use_web_defaults);
    assert_eq!(settings.point_scale_factor, 1.0);
    assert!(settings.is_experimental_feature_enabled(pliant_style::ExperimentalFeature::WebFlexBasis));
}

#[derive(Default)]
struct CountingEvents {
    allocated: Cell<u32>,
    deallocated: Cell<u32>,
}

impl LayoutEvents for CountingEvents {
    fn node_allocated(&self, _node: NodeId, _config: ConfigId) {
        self.allocated.set(self.allocated.get() + 1);
    }

    fn node_deallocated(&self, _node: NodeId, _config: ConfigId) {
        self.deallocated.set(self.deallocated.get() + 1);
    }
}

#[test]
fn test_events_see_allocation_and_deallocation() {
    let mut tree = Tree::new();
    let events = Rc::new(CountingEvents::default());
    tree.set_events(Some(events.clone()));
    let (owner, _) = owner_with_children(&mut tree, 2);
    tree.free_recursive(owner).unwrap();

    assert_eq!(events.allocated.get(), 3);
    assert_eq!(events.deallocated.get(), 3);
}

#[test]
fn test_print_lists_only_changed_style() {
    let mut tree = Tree::new();
    let (owner, _) = owner_with_children(&mut tree, 1);
    tree.update_style(owner, |s| {
        s.flex_direction = FlexDirection::Row;
        s.padding[Edge::All] = Value::points(2.0);
    })
    .unwrap();

    let text = tree.print_to_string(
        owner,
        PrintOptions {
            layout: false,
            ..PrintOptions::default()
        },
    );
    assert_eq!(
        text,
        "<div style=\"flex-direction: row; padding: 2px; \" >\n  <div style=\"\" ></div>\n</div>"
    );
}

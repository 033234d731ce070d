//! Tests for whole layout passes: caching, measure callbacks, pixel-grid
//! rounding, events and the legacy stretch diff.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pliant_common::LogLevel;
use pliant_layout::{compute_layout, compute_layout_with_context, round_value_to_pixel_grid};
use pliant_style::{Dimension, Direction, FlexDirection, MeasureMode, Style, Value};
use pliant_tree::{
    ConfigId, ConfigSettings, LayoutEvents, LayoutStats, LayoutType, MeasureRequest, NodeId, Size,
    Tree,
};
use quickcheck_macros::quickcheck;

/// Helper: a node with the given style tweaks.
fn node(tree: &mut Tree, f: impl FnOnce(&mut Style)) -> NodeId {
    let id = tree.new_node();
    tree.update_style(id, f).unwrap();
    id
}

/// Helper: a child appended to `owner`.
fn child(tree: &mut Tree, owner: NodeId, f: impl FnOnce(&mut Style)) -> NodeId {
    let id = node(tree, f);
    tree.add_child(owner, id).unwrap();
    id
}

fn sized(style: &mut Style, width: f32, height: f32) {
    style.dimensions[Dimension::Width] = Value::points(width);
    style.dimensions[Dimension::Height] = Value::points(height);
}

/// Helper: a leaf whose measure callback counts its calls.
fn counting_leaf(tree: &mut Tree, owner: NodeId, size: Size) -> (NodeId, Rc<Cell<u32>>) {
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let leaf = child(tree, owner, |_| {});
    tree.set_measure_func(
        leaf,
        Some(Rc::new(move |_: &MeasureRequest<'_>| {
            seen.set(seen.get() + 1);
            size
        })),
    )
    .unwrap();
    (leaf, calls)
}

fn layout(tree: &mut Tree, root: NodeId) -> LayoutStats {
    compute_layout(tree, root, f32::NAN, f32::NAN, Direction::Ltr)
}

// ========== caching ==========

#[test]
fn test_second_pass_is_served_from_cache() {
    let mut tree = Tree::new();
    let root = node(&mut tree, |s| sized(s, 100.0, 100.0));
    let _ = child(&mut tree, root, |s| s.flex_grow = Some(1.0));

    let first = layout(&mut tree, root);
    let snapshot = tree[root].layout.clone();
    let second = layout(&mut tree, root);

    assert!(first.layouts > 0);
    assert_eq!(second.layouts, 0);
    assert_eq!(second.cached_layouts, 1);
    assert!(tree[root].layout.geometry_eq(&snapshot));
}

#[test]
fn test_style_change_invalidates_cache() {
    let mut tree = Tree::new();
    let root = node(&mut tree, |s| sized(s, 100.0, 100.0));
    let a = child(&mut tree, root, |s| s.dimensions[Dimension::Height] = Value::points(10.0));
    let _ = layout(&mut tree, root);

    tree.update_style(a, |s| s.dimensions[Dimension::Height] = Value::points(30.0))
        .unwrap();
    let stats = layout(&mut tree, root);

    assert!(stats.layouts > 0);
    assert_eq!(tree[a].layout.height(), 30.0);
}

#[test]
fn test_direction_change_forces_relayout() {
    let mut tree = Tree::new();
    let root = node(&mut tree, |s| {
        s.flex_direction = FlexDirection::Row;
        sized(s, 100.0, 10.0);
    });
    let a = child(&mut tree, root, |s| sized(s, 10.0, 10.0));
    let _ = layout(&mut tree, root);

    let stats = compute_layout(&mut tree, root, f32::NAN, f32::NAN, Direction::Rtl);

    assert!(stats.layouts > 0);
    assert_eq!(tree[a].layout.left(), 90.0);
}

#[test]
fn test_measure_callback_is_reused_across_passes() {
    let mut tree = Tree::new();
    let root = node(&mut tree, |s| s.dimensions[Dimension::Width] = Value::points(100.0));
    let (leaf, calls) = counting_leaf(&mut tree, root, Size::new(50.0, 10.0));

    let stats = layout(&mut tree, root);
    let after_first = calls.get();
    let _ = layout(&mut tree, root);

    assert!(after_first >= 1);
    assert_eq!(stats.measure_callbacks, after_first);
    assert_eq!(calls.get(), after_first);
    assert_eq!(tree[leaf].layout.width(), 100.0);
    assert_eq!(tree[leaf].layout.height(), 10.0);
}

#[test]
fn test_exact_leaf_skips_measure_callback() {
    let mut tree = Tree::new();
    let root = node(&mut tree, |s| sized(s, 100.0, 100.0));
    let (leaf, calls) = counting_leaf(&mut tree, root, Size::new(1.0, 1.0));
    tree.update_style(leaf, |s| sized(s, 20.0, 20.0)).unwrap();

    let _ = layout(&mut tree, root);

    assert_eq!(calls.get(), 0);
    assert_eq!(tree[leaf].layout.width(), 20.0);
}

#[test]
fn test_measure_receives_layout_context() {
    let mut tree = Tree::new();
    let root = node(&mut tree, |s| s.dimensions[Dimension::Width] = Value::points(100.0));
    let leaf = child(&mut tree, root, |_| {});
    let seen = Rc::new(Cell::new(0.0_f32));
    let sink = Rc::clone(&seen);
    tree.set_measure_func(
        leaf,
        Some(Rc::new(move |request: &MeasureRequest<'_>| {
            let scale = request
                .layout_context
                .and_then(|c| c.downcast_ref::<f32>())
                .copied()
                .unwrap_or(0.0);
            sink.set(scale);
            Size::new(10.0 * scale, 10.0)
        })),
    )
    .unwrap();

    let scale = 3.0_f32;
    let _ = compute_layout_with_context(
        &mut tree,
        root,
        f32::NAN,
        f32::NAN,
        Direction::Ltr,
        Some(&scale),
    );

    assert_eq!(seen.get(), 3.0);
    assert_eq!(tree[leaf].layout.height(), 10.0);
}

// ========== rounding ==========

#[test]
fn test_round_value_to_half_pixels() {
    assert_eq!(round_value_to_pixel_grid(10.33, 2.0, false, false), 10.5);
    assert_eq!(round_value_to_pixel_grid(10.2, 1.0, true, false), 11.0);
    assert_eq!(round_value_to_pixel_grid(10.8, 1.0, false, true), 10.0);
}

#[test]
fn test_scale_two_snaps_to_half_points() {
    let mut tree = Tree::new();
    tree.set_point_scale_factor(ConfigId::DEFAULT, 2.0).unwrap();
    let root = node(&mut tree, |s| {
        s.flex_direction = FlexDirection::Row;
        sized(s, 100.0, 10.0);
    });
    let items: Vec<NodeId> = (0..3)
        .map(|_| child(&mut tree, root, |s| s.flex_grow = Some(1.0)))
        .collect();

    let _ = layout(&mut tree, root);

    let lefts: Vec<f32> = items.iter().map(|&id| tree[id].layout.left()).collect();
    let widths: Vec<f32> = items.iter().map(|&id| tree[id].layout.width()).collect();
    assert_eq!(lefts, vec![0.0, 33.5, 66.5]);
    assert_eq!(widths, vec![33.5, 33.0, 33.5]);
}

#[test]
fn test_layout_from_serialised_styles() {
    let settings: ConfigSettings = serde_json::from_str(r#"{"point_scale_factor": 2.0}"#).unwrap();
    let mut tree = Tree::with_settings(settings);
    let root = tree.new_node();
    let root_style: Style = serde_json::from_str(
        r#"{
            "flex-direction": "row",
            "dimensions": { "width": 100, "height": 10 },
            "padding": { "horizontal": 10 }
        }"#,
    )
    .unwrap();
    tree.set_style(root, root_style).unwrap();
    let items: Vec<NodeId> = [1, 3]
        .iter()
        .map(|grow| {
            let style: Style = serde_json::from_str(&format!(r#"{{"flex-grow": {grow}}}"#)).unwrap();
            child(&mut tree, root, |s| *s = style)
        })
        .collect();

    let _ = layout(&mut tree, root);

    let lefts: Vec<f32> = items.iter().map(|&id| tree[id].layout.left()).collect();
    let widths: Vec<f32> = items.iter().map(|&id| tree[id].layout.width()).collect();
    assert_eq!(lefts, vec![10.0, 30.0]);
    assert_eq!(widths, vec![20.0, 60.0]);
    assert_eq!(tree[items[0]].layout.height(), 10.0);
}

#[quickcheck]
fn prop_grown_children_fill_the_row(width: u16, grows: Vec<u8>) -> bool {
    let width = f32::from(width % 1000 + 1);
    let grows: Vec<f32> = grows.iter().take(8).map(|g| f32::from(g % 4 + 1)).collect();
    if grows.is_empty() {
        return true;
    }
    let mut tree = Tree::with_settings(ConfigSettings {
        point_scale_factor: 0.0,
        ..ConfigSettings::default()
    });
    let root = node(&mut tree, |s| {
        s.flex_direction = FlexDirection::Row;
        sized(s, width, 10.0);
    });
    let items: Vec<NodeId> = grows
        .iter()
        .map(|&g| child(&mut tree, root, |s| s.flex_grow = Some(g)))
        .collect();

    let _ = layout(&mut tree, root);

    let total: f32 = items.iter().map(|&id| tree[id].layout.width()).sum();
    (total - width).abs() < 1e-2
}

#[quickcheck]
fn prop_relayout_is_idempotent(width: u16, height: u16, count: u8) -> bool {
    let mut tree = Tree::new();
    let root = node(&mut tree, |s| sized(s, f32::from(width % 500), f32::from(height % 500)));
    for i in 0..(count % 6) {
        let _ = child(&mut tree, root, |s| {
            s.flex_grow = Some(f32::from(i % 3));
            s.dimensions[Dimension::Height] = Value::points(f32::from(i) * 7.0);
        });
    }
    let _ = layout(&mut tree, root);
    let before: Vec<_> = tree.children(root).iter().map(|&c| tree[c].layout.clone()).collect();
    let stats = layout(&mut tree, root);
    let after: Vec<_> = tree.children(root).iter().map(|&c| tree[c].layout.clone()).collect();

    stats.layouts == 0 && before.iter().zip(&after).all(|(a, b)| a.geometry_eq(b))
}

// ========== events and logging ==========

#[derive(Default)]
struct Recorder {
    passes: Cell<u32>,
    kinds: RefCell<Vec<LayoutType>>,
    ended_with: Cell<Option<LayoutStats>>,
}

impl LayoutEvents for Recorder {
    fn layout_pass_start(&self, _root: NodeId) {
        self.passes.set(self.passes.get() + 1);
    }

    fn layout_pass_end(&self, _root: NodeId, stats: &LayoutStats) {
        self.ended_with.set(Some(*stats));
    }

    fn node_layout(&self, _node: NodeId, kind: LayoutType) {
        self.kinds.borrow_mut().push(kind);
    }
}

#[test]
fn test_events_report_pass_and_node_visits() {
    let mut tree = Tree::new();
    let recorder = Rc::new(Recorder::default());
    tree.set_events(Some(Rc::clone(&recorder) as Rc<dyn LayoutEvents>));
    let root = node(&mut tree, |s| sized(s, 100.0, 100.0));
    let _ = child(&mut tree, root, |s| s.dimensions[Dimension::Height] = Value::points(10.0));

    let stats = layout(&mut tree, root);

    assert_eq!(recorder.passes.get(), 1);
    assert_eq!(recorder.ended_with.get(), Some(stats));
    assert_eq!(*recorder.kinds.borrow(), vec![LayoutType::Layout, LayoutType::Layout]);
}

#[test]
fn test_unknown_root_is_logged() {
    let mut tree = Tree::new();
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&lines);
    tree[ConfigId::DEFAULT].set_logger(Some(Rc::new(
        move |_: Option<NodeId>, level: LogLevel, message: &str| {
            sink.borrow_mut().push((level, message.to_string()));
        },
    )));
    let root = tree.new_node();
    tree.free(root).unwrap();

    let stats = layout(&mut tree, root);

    assert_eq!(stats, LayoutStats::default());
    assert_eq!(lines.borrow()[0].0, LogLevel::Error);
}

// ========== legacy stretch ==========

#[test]
fn test_legacy_stretch_diff_flags_changed_layout() {
    let mut tree = Tree::with_settings(ConfigSettings {
        use_legacy_stretch_behaviour: true,
        should_diff_layout_without_legacy_stretch_behaviour: true,
        ..ConfigSettings::default()
    });
    let root = node(&mut tree, |s| {
        s.dimensions[Dimension::Width] = Value::points(100.0);
        s.max_dimensions[Dimension::Height] = Value::points(200.0);
    });
    let a = child(&mut tree, root, |s| s.flex_grow = Some(1.0));
    let live_before = tree.len();

    let _ = layout(&mut tree, root);

    assert_eq!(tree[a].layout.height(), 200.0);
    assert!(tree[root].layout.did_use_legacy_flag);
    assert!(tree[root].layout.does_legacy_stretch_flag_affect_layout);
    assert_eq!(tree.len(), live_before);
}

#[test]
fn test_content_sizing_without_legacy_stretch() {
    let mut tree = Tree::new();
    let root = node(&mut tree, |s| {
        s.dimensions[Dimension::Width] = Value::points(100.0);
        s.max_dimensions[Dimension::Height] = Value::points(200.0);
    });
    let a = child(&mut tree, root, |s| s.flex_grow = Some(1.0));

    let _ = layout(&mut tree, root);

    assert_eq!(tree[a].layout.height(), 0.0);
    assert_eq!(tree[root].layout.height(), 0.0);
    assert!(!tree[root].layout.does_legacy_stretch_flag_affect_layout);
}

#[test]
fn test_measure_modes_follow_constraints() {
    let mut tree = Tree::new();
    let root = node(&mut tree, |s| s.dimensions[Dimension::Width] = Value::points(100.0));
    let leaf = child(&mut tree, root, |_| {});
    let modes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&modes);
    tree.set_measure_func(
        leaf,
        Some(Rc::new(move |request: &MeasureRequest<'_>| {
            sink.borrow_mut().push((request.width_mode, request.height_mode));
            Size::new(10.0, 10.0)
        })),
    )
    .unwrap();

    let _ = layout(&mut tree, root);

    assert_eq!(
        modes.borrow().first(),
        Some(&(MeasureMode::Exactly, MeasureMode::Undefined))
    );
}

//! Tests for reading layout documents and reporting their layout.

use std::rc::Rc;

use pliant_cli::document::{Document, FixedSize, build, merge_style};
use pliant_cli::report::{NodeReport, outline};
use pliant_cli::{Viewport, lay_out};
use pliant_common::LogLevel;
use pliant_style::{FlexDirection, MeasureMode, Style, Value};
use pliant_tree::{ConfigId, MeasureRequest, NodeId, Tree};
use serde_json::json;

/// Helper: parse a document from a JSON value.
fn document(value: &serde_json::Value) -> Document {
    Document::from_json(&value.to_string()).unwrap()
}

fn names(report: &NodeReport) -> Vec<String> {
    report
        .children
        .iter()
        .filter_map(|child| child.name.clone())
        .collect()
}

// ========== styles ==========

#[test]
fn test_merge_style_keeps_unlisted_defaults() {
    let patch = json!({ "flex-direction": "row", "flex-grow": 2 });
    let style = merge_style(&Style::default(), patch.as_object().unwrap()).unwrap();

    assert_eq!(style.flex_direction, FlexDirection::Row);
    assert_eq!(style.flex_grow, Some(2.0));
    assert_eq!(style.flex_basis, Style::default().flex_basis);
}

#[test]
fn test_merge_style_parses_value_text() {
    let patch = json!({ "dimensions": { "width": "50%", "height": 12 } });
    let style = merge_style(&Style::default(), patch.as_object().unwrap()).unwrap();

    assert_eq!(style.dimensions.width, Value::percent(50.0));
    assert_eq!(style.dimensions.height, Value::points(12.0));
}

#[test]
fn test_merge_style_rejects_unknown_key() {
    let patch = json!({ "colour": "red" });
    let err = merge_style(&Style::default(), patch.as_object().unwrap()).unwrap_err();

    assert!(err.to_string().contains("colour"));
}

#[test]
fn test_unknown_document_field_is_rejected() {
    assert!(Document::from_json(r#"{ "root": {}, "viewport": 3 }"#).is_err());
}

// ========== layout ==========

#[test]
fn test_lays_out_named_tree() {
    let doc = document(&json!({
        "root": {
            "name": "row",
            "style": { "flex-direction": "row", "dimensions": { "width": 100, "height": 10 } },
            "children": [
                { "name": "a", "style": { "flex-grow": 1 } },
                { "name": "b", "style": { "flex-grow": 1 } }
            ]
        }
    }));

    let laid_out = lay_out(&doc, Viewport::default()).unwrap();
    let report = NodeReport::collect(&laid_out.tree, laid_out.root);

    assert_eq!(report.name.as_deref(), Some("row"));
    assert_eq!(names(&report), vec!["a", "b"]);
    assert_eq!(report.children[0].width, 50.0);
    assert_eq!(report.children[1].left, 50.0);
    assert!(outline(&laid_out.tree, laid_out.root).contains("row"));
}

#[test]
fn test_web_defaults_lay_children_in_a_row() {
    let doc = document(&json!({
        "config": { "use_web_defaults": true },
        "root": {
            "style": { "dimensions": { "width": 100 } },
            "children": [
                { "style": { "dimensions": { "width": 10, "height": 10 } } },
                { "style": { "dimensions": { "width": 10, "height": 10 } } }
            ]
        }
    }));

    let laid_out = lay_out(&doc, Viewport::default()).unwrap();
    let report = NodeReport::collect(&laid_out.tree, laid_out.root);

    assert_eq!(report.children[1].left, 10.0);
    assert_eq!(report.children[1].top, 0.0);
}

#[test]
fn test_viewport_sizes_the_root() {
    let doc = document(&json!({ "root": {} }));
    let viewport = Viewport {
        width: 320.0,
        height: 480.0,
        ..Viewport::default()
    };

    let laid_out = lay_out(&doc, viewport).unwrap();

    assert_eq!(laid_out.tree[laid_out.root].layout.width(), 320.0);
    assert_eq!(laid_out.tree[laid_out.root].layout.height(), 480.0);
}

#[test]
fn test_measured_node_with_children_is_rejected() {
    let doc = document(&json!({
        "root": {
            "name": "label",
            "measure": { "width": 10, "height": 10 },
            "children": [{}]
        }
    }));

    assert!(lay_out(&doc, Viewport::default()).is_err());
}

#[test]
fn test_failed_build_frees_partial_subtree() {
    let doc = document(&json!({
        "root": {
            "children": [
                { "name": "ok", "children": [{}] },
                { "name": "label", "measure": { "width": 10, "height": 10 }, "children": [{}] }
            ]
        }
    }));
    let mut tree = Tree::new();
    tree[ConfigId::DEFAULT].set_logger(Some(Rc::new(|_: Option<NodeId>, _: LogLevel, _: &str| {})));

    assert!(build(&mut tree, &doc.root).is_err());
    assert!(tree.is_empty());
}

#[test]
fn test_negative_scale_is_rejected() {
    let doc = document(&json!({ "config": { "point_scale_factor": -1.0 }, "root": {} }));

    assert!(lay_out(&doc, Viewport::default()).is_err());
}

#[test]
fn test_fixed_size_fits_constraints() {
    let mut tree = Tree::new();
    let node = tree.new_node();
    let size = FixedSize {
        width: 180.0,
        height: 20.0,
    };
    let request = MeasureRequest {
        node,
        width: 100.0,
        width_mode: MeasureMode::AtMost,
        height: f32::NAN,
        height_mode: MeasureMode::Undefined,
        node_context: None,
        layout_context: None,
    };

    let fitted = size.fit(&request);

    assert_eq!(fitted.width, 100.0);
    assert_eq!(fitted.height, 20.0);
}

#[test]
fn test_report_json_omits_missing_names() {
    let doc = document(&json!({ "root": { "style": { "dimensions": { "width": 5, "height": 5 } } } }));
    let laid_out = lay_out(&doc, Viewport::default()).unwrap();

    let value = serde_json::to_value(NodeReport::collect(&laid_out.tree, laid_out.root)).unwrap();

    assert_eq!(value, json!({ "left": 0.0, "top": 0.0, "width": 5.0, "height": 5.0 }));
}

//! Tests for edge precedence, flex factor resolution and style defaults.

use pliant_style::{Align, Edge, Edges, FlexDirection, PositionType, Style, Value};

fn style_with_margin(edges: Edges) -> Style {
    Style {
        margin: edges,
        ..Style::default()
    }
}

// ========== edge precedence ==========

#[test]
fn test_row_edge_prefers_start_over_left() {
    let edges = Edges::new()
        .with(Edge::Left, Value::points(1.0))
        .with(Edge::Start, Value::points(2.0));
    assert_eq!(
        edges.compute_for_row(Edge::Start, Edge::Left, Value::ZERO),
        Value::points(2.0)
    );
}

#[test]
fn test_row_edge_falls_back_to_horizontal_then_all() {
    let edges = Edges::new()
        .with(Edge::Horizontal, Value::points(3.0))
        .with(Edge::All, Value::points(4.0));
    assert_eq!(
        edges.compute_for_row(Edge::End, Edge::Right, Value::ZERO),
        Value::points(3.0)
    );
    assert_eq!(
        edges.compute_for_column(Edge::Top, Value::ZERO),
        Value::points(4.0)
    );
}

#[test]
fn test_column_edge_ignores_horizontal() {
    let edges = Edges::new().with(Edge::Horizontal, Value::points(3.0));
    assert_eq!(
        edges.compute_for_column(Edge::Bottom, Value::Undefined),
        Value::Undefined
    );
}

#[test]
fn test_set_reports_change() {
    let mut edges = Edges::new();
    assert!(edges.set(Edge::Top, Value::points(1.0)));
    assert!(!edges.set(Edge::Top, Value::points(1.0)));
}

#[test]
fn test_start_applies_to_leading_edge_of_rtl_row() {
    let style = style_with_margin(Edges::new().with(Edge::Start, Value::points(5.0)));
    let axis = FlexDirection::Row.resolve(pliant_style::Direction::Rtl);
    assert_eq!(axis, FlexDirection::RowReverse);
    assert_eq!(style.leading_margin(axis, 100.0), 5.0);
    assert_eq!(style.trailing_margin(axis, 100.0), 0.0);
}

#[test]
fn test_percent_margin_resolves_against_width() {
    let style = style_with_margin(Edges::new().with(Edge::Top, Value::percent(10.0)));
    assert_eq!(style.leading_margin(FlexDirection::Column, 200.0), 20.0);
}

#[test]
fn test_negative_border_and_padding_floor_at_zero() {
    let style = Style {
        border: Edges::new().with(Edge::All, Value::points(-3.0)),
        padding: Edges::new().with(Edge::Left, Value::points(-2.0)),
        ..Style::default()
    };
    assert_eq!(style.leading_border(FlexDirection::Row), 0.0);
    assert_eq!(style.leading_padding(FlexDirection::Row, 100.0), 0.0);
    assert_eq!(style.padding_and_border_for_axis(FlexDirection::Column, 100.0), 0.0);
}

#[test]
fn test_relative_position_uses_negated_trailing() {
    let style = Style {
        position: Edges::new().with(Edge::Right, Value::points(7.0)),
        ..Style::default()
    };
    assert!(!style.is_leading_position_defined(FlexDirection::Row));
    assert!(style.is_trailing_position_defined(FlexDirection::Row));
    assert_eq!(style.relative_position(FlexDirection::Row, 100.0), -7.0);
}

#[test]
fn test_auto_margin_value_is_visible_raw() {
    let style = style_with_margin(Edges::new().with(Edge::Left, Value::Auto));
    assert!(style.margin_leading_value(FlexDirection::Row).is_auto());
    assert_eq!(style.leading_margin(FlexDirection::Row, 100.0), 0.0);
}

// ========== flex factors ==========

#[test]
fn test_flex_shorthand_positive() {
    let style = Style {
        flex: Some(2.0),
        ..Style::default()
    };
    assert_eq!(style.resolved_flex_grow(false), 2.0);
    assert_eq!(style.resolved_flex_shrink(false, false), 0.0);
    assert_eq!(style.resolved_flex_basis(false), Value::ZERO);
    assert_eq!(style.resolved_flex_basis(true), Value::Auto);
}

#[test]
fn test_flex_shorthand_negative_shrinks() {
    let style = Style {
        flex: Some(-1.5),
        ..Style::default()
    };
    assert_eq!(style.resolved_flex_grow(false), 0.0);
    assert_eq!(style.resolved_flex_shrink(false, false), 1.5);
    assert_eq!(style.resolved_flex_shrink(false, true), 1.0);
}

#[test]
fn test_root_never_flexes() {
    let style = Style {
        flex_grow: Some(1.0),
        flex_shrink: Some(1.0),
        ..Style::default()
    };
    assert_eq!(style.resolved_flex_grow(true), 0.0);
    assert!(!style.is_flexible(true, false));
    assert!(style.is_flexible(false, false));
}

#[test]
fn test_absolute_nodes_are_not_flexible() {
    let style = Style {
        flex_grow: Some(1.0),
        position_type: PositionType::Absolute,
        ..Style::default()
    };
    assert!(!style.is_flexible(false, false));
}

// ========== defaults ==========

#[test]
fn test_defaults_and_web_defaults() {
    let style = Style::default();
    assert_eq!(style.flex_direction, FlexDirection::Column);
    assert_eq!(style.align_items, Align::Stretch);
    assert_eq!(style.align_content, Align::FlexStart);
    assert!(style.dimensions.width.is_auto());

    let web = Style::web_defaults();
    assert_eq!(web.flex_direction, FlexDirection::Row);
    assert_eq!(web.align_content, Align::Stretch);
}

#[test]
fn test_resolve_dimensions_prefers_equal_min_max() {
    let mut style = Style::default();
    style.dimensions.width = Value::points(50.0);
    style.min_dimensions.width = Value::points(80.0);
    style.max_dimensions.width = Value::points(80.0);
    style.max_dimensions.height = Value::points(30.0);
    let resolved = style.resolve_dimensions();
    assert_eq!(resolved.width, Value::points(80.0));
    assert!(resolved.height.is_auto());
}

#[test]
fn test_style_from_json() {
    let style: Style = serde_json::from_str(
        r#"{"flex-direction": "row-reverse", "margin": {"all": 4}, "dimensions": {"width": "50%"}}"#,
    )
    .unwrap();
    assert_eq!(style.flex_direction, FlexDirection::RowReverse);
    assert_eq!(style.margin[Edge::All], Value::points(4.0));
    assert_eq!(style.dimensions.width, Value::percent(50.0));
}

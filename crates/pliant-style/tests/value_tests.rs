//! Tests for style values: construction, clamping, resolution, text form and serde.

use pliant_style::value::{LOWER_BOUND, UPPER_BOUND_PERCENT, UPPER_BOUND_POINT};
use pliant_style::{Unit, Value};
use quickcheck_macros::quickcheck;

// ========== construction ==========

#[test]
fn test_points_keeps_magnitude() {
    let v = Value::points(12.5);
    assert_eq!(v.unit(), Unit::Point);
    assert_eq!(v.magnitude(), 12.5);
}

#[test]
fn test_non_finite_input_is_undefined() {
    assert!(Value::points(f32::NAN).is_undefined());
    assert!(Value::points(f32::INFINITY).is_undefined());
    assert!(Value::percent(f32::NEG_INFINITY).is_undefined());
}

#[test]
fn test_tiny_magnitudes_collapse_to_zero() {
    assert_eq!(Value::points(LOWER_BOUND / 2.0), Value::Point(0.0));
    assert_eq!(Value::percent(-LOWER_BOUND / 2.0), Value::Percent(0.0));
}

#[test]
fn test_huge_magnitudes_clamp_with_sign() {
    assert_eq!(Value::points(1e30).magnitude(), UPPER_BOUND_POINT);
    assert_eq!(Value::points(-1e30).magnitude(), -UPPER_BOUND_POINT);
    assert_eq!(Value::percent(1e30).magnitude(), UPPER_BOUND_PERCENT);
}

#[quickcheck]
fn prop_points_stay_within_bounds(v: f32) -> bool {
    match Value::points(v) {
        Value::Point(m) => m.abs() <= UPPER_BOUND_POINT && (m == 0.0 || m.abs() >= LOWER_BOUND),
        Value::Undefined => !v.is_finite(),
        _ => false,
    }
}

// ========== equality ==========

#[test]
fn test_equality_tolerance() {
    assert_eq!(Value::points(10.0), Value::points(10.000_05));
    assert_ne!(Value::points(10.0), Value::points(10.001));
}

#[test]
fn test_equality_requires_same_unit() {
    assert_ne!(Value::points(10.0), Value::percent(10.0));
    assert_ne!(Value::Auto, Value::Undefined);
    assert_eq!(Value::Auto, Value::AUTO);
}

// ========== resolve ==========

#[test]
fn test_resolve_percent_of_owner() {
    assert_eq!(Value::percent(50.0).resolve(200.0), Some(100.0));
    assert_eq!(Value::points(7.0).resolve(200.0), Some(7.0));
}

#[test]
fn test_resolve_percent_of_undefined_owner_is_none() {
    assert_eq!(Value::percent(50.0).resolve(f32::NAN), None);
    assert_eq!(Value::Auto.resolve(100.0), None);
    assert_eq!(Value::Undefined.resolve(100.0), None);
}

#[test]
fn test_resolve_margin_treats_auto_as_zero() {
    assert_eq!(Value::Auto.resolve_margin(100.0), Some(0.0));
    assert_eq!(Value::percent(10.0).resolve_margin(100.0), Some(10.0));
}

// ========== text form ==========

#[test]
fn test_parse_text_forms() {
    assert_eq!("10".parse::<Value>(), Ok(Value::points(10.0)));
    assert_eq!("10pt".parse::<Value>(), Ok(Value::points(10.0)));
    assert_eq!("4px".parse::<Value>(), Ok(Value::points(4.0)));
    assert_eq!(" 50% ".parse::<Value>(), Ok(Value::percent(50.0)));
    assert_eq!("auto".parse::<Value>(), Ok(Value::Auto));
    assert_eq!("undefined".parse::<Value>(), Ok(Value::Undefined));
}

#[test]
fn test_parse_rejects_garbage() {
    assert!("ten".parse::<Value>().is_err());
    assert!("%".parse::<Value>().is_err());
}

#[test]
fn test_display() {
    assert_eq!(Value::points(10.0).to_string(), "10pt");
    assert_eq!(Value::percent(25.5).to_string(), "25.5%");
    assert_eq!(Value::Auto.to_string(), "auto");
}

// ========== serde ==========

#[test]
fn test_deserialize_number_string_and_null() {
    let values: Vec<Value> = serde_json::from_str(r#"[12, "50%", "auto", null]"#).unwrap();
    assert_eq!(
        values,
        vec![
            Value::points(12.0),
            Value::percent(50.0),
            Value::Auto,
            Value::Undefined
        ]
    );
}

#[test]
fn test_serialize_forms() {
    let json = serde_json::to_string(&[Value::points(3.0), Value::percent(5.0), Value::Auto])
        .unwrap();
    assert_eq!(json, r#"[3.0,"5%","auto"]"#);
}

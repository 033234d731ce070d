//! Float helpers built around the undefined sentinel.
//!
//! Geometry flowing through the engine is plain `f32`. A missing length is
//! represented by NaN ([`UNDEFINED`]) so that arithmetic on unknown sizes
//! stays unknown without branching at every step.

/// The sentinel for "no value". Always compare with [`is_undefined`].
pub const UNDEFINED: f32 = f32::NAN;

/// Tolerance used by every approximate comparison in the engine.
pub const EPSILON: f32 = 0.0001;

/// Returns `true` if `value` is the undefined sentinel.
#[must_use]
#[inline]
pub const fn is_undefined(value: f32) -> bool {
    value.is_nan()
}

/// Approximate equality: two defined values within [`EPSILON`], or both
/// undefined.
#[must_use]
pub fn floats_equal(a: f32, b: f32) -> bool {
    if !is_undefined(a) && !is_undefined(b) {
        (a - b).abs() < EPSILON
    } else {
        is_undefined(a) && is_undefined(b)
    }
}

/// Same as [`floats_equal`] at double precision, used by pixel rounding.
#[must_use]
pub fn doubles_equal(a: f64, b: f64) -> bool {
    if !a.is_nan() && !b.is_nan() {
        (a - b).abs() < 0.0001
    } else {
        a.is_nan() && b.is_nan()
    }
}

/// Maximum where an undefined operand means "no constraint".
#[must_use]
pub fn float_max(a: f32, b: f32) -> f32 {
    if !is_undefined(a) && !is_undefined(b) {
        return a.max(b);
    }
    if is_undefined(a) { b } else { a }
}

/// Minimum where an undefined operand means "no constraint".
#[must_use]
pub fn float_min(a: f32, b: f32) -> f32 {
    if !is_undefined(a) && !is_undefined(b) {
        return a.min(b);
    }
    if is_undefined(a) { b } else { a }
}

/// Converts an optional float into the sentinel representation.
#[must_use]
pub fn or_undefined(value: Option<f32>) -> f32 {
    value.unwrap_or(UNDEFINED)
}

/// Pairwise [`floats_equal`] over two equally sized slices.
#[must_use]
pub fn float_slices_equal(a: &[f32], b: &[f32]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| floats_equal(x, y))
}

//! Style values: points, percentages, auto and undefined.
//!
//! [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
//! "Lengths refer to distance measurements"
//!
//! [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
//! "Percentage values are always relative to another quantity"
//!
//! A [`Value`] never stores an unbounded magnitude. Constructors clamp to
//! the representable range and collapse denormal-sized input to zero, so that
//! equality and hashing of styles stay stable.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::Unit;

/// Magnitudes below this collapse to exactly zero (2^-63).
pub const LOWER_BOUND: f32 = 1.084_202_2e-19;

/// Largest point magnitude kept (2^65 - 2^41).
pub const UPPER_BOUND_POINT: f32 = 3.689_348_6e19;

/// Largest percent magnitude kept (2^64 - 2^40).
pub const UPPER_BOUND_PERCENT: f32 = 1.844_674_3e19;

/// A style length.
///
/// `Undefined` is distinct from a zero length: it means the property was
/// never set and lets edge lookups fall through to the next candidate.
#[derive(Debug, Clone, Copy, Default)]
pub enum Value {
    /// Not set.
    #[default]
    Undefined,
    /// `auto`; meaning depends on the property.
    Auto,
    /// An absolute length in points.
    Point(f32),
    /// A percentage of the owner's size along the relevant axis.
    Percent(f32),
}

impl Value {
    /// The undefined value.
    pub const UNDEFINED: Self = Self::Undefined;
    /// The `auto` value.
    pub const AUTO: Self = Self::Auto;
    /// Zero points.
    pub const ZERO: Self = Self::Point(0.0);

    /// A point length. NaN or infinite input yields [`Value::Undefined`].
    #[must_use]
    pub fn points(value: f32) -> Self {
        if value.is_finite() {
            Self::Point(clamp(value, UPPER_BOUND_POINT))
        } else {
            Self::Undefined
        }
    }

    /// A percentage. NaN or infinite input yields [`Value::Undefined`].
    #[must_use]
    pub fn percent(value: f32) -> Self {
        if value.is_finite() {
            Self::Percent(clamp(value, UPPER_BOUND_PERCENT))
        } else {
            Self::Undefined
        }
    }

    /// The unit tag of this value.
    #[must_use]
    pub const fn unit(self) -> Unit {
        match self {
            Self::Undefined => Unit::Undefined,
            Self::Auto => Unit::Auto,
            Self::Point(_) => Unit::Point,
            Self::Percent(_) => Unit::Percent,
        }
    }

    /// The stored magnitude, or NaN for `auto` and undefined.
    #[must_use]
    pub const fn magnitude(self) -> f32 {
        match self {
            Self::Point(v) | Self::Percent(v) => v,
            Self::Undefined | Self::Auto => f32::NAN,
        }
    }

    /// Returns `true` for [`Value::Undefined`].
    #[must_use]
    pub const fn is_undefined(self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns `true` for [`Value::Auto`].
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Resolve against the owner's size on the relevant axis.
    ///
    /// Points resolve to themselves, percentages to `percent * owner / 100`.
    /// `auto`, undefined, and a percentage of an undefined owner size resolve
    /// to `None`.
    #[must_use]
    pub fn resolve(self, owner_size: f32) -> Option<f32> {
        let resolved = match self {
            Self::Point(v) => v,
            Self::Percent(v) => v * owner_size * 0.01,
            Self::Undefined | Self::Auto => return None,
        };
        (!resolved.is_nan()).then_some(resolved)
    }

    /// Resolve a margin: `auto` margins count as zero here.
    #[must_use]
    pub fn resolve_margin(self, owner_size: f32) -> Option<f32> {
        if self.is_auto() {
            Some(0.0)
        } else {
            self.resolve(owner_size)
        }
    }
}

fn clamp(value: f32, upper: f32) -> f32 {
    if value < LOWER_BOUND && value > -LOWER_BOUND {
        return 0.0;
    }
    if value > upper || value < -upper {
        return upper.copysign(value);
    }
    value
}

/// Same tag, and magnitudes within 1e-4 for points and percentages.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Self::Undefined, Self::Undefined) | (Self::Auto, Self::Auto) => true,
            (Self::Point(a), Self::Point(b)) | (Self::Percent(a), Self::Percent(b)) => {
                (a.is_nan() && b.is_nan()) || (a - b).abs() < 0.0001
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Auto => f.write_str("auto"),
            Self::Point(v) => write!(f, "{v}pt"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// Error returned when a string is not a valid [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid style value `{0}`: expected a number, `<n>pt`, `<n>%`, `auto` or `undefined`")]
pub struct ParseValueError(pub String);

impl FromStr for Value {
    type Err = ParseValueError;

    /// Accepts `10`, `10pt`, `10px`, `50%`, `auto` and `undefined`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || ParseValueError(s.to_string());
        match text {
            "auto" => return Ok(Self::Auto),
            "undefined" => return Ok(Self::Undefined),
            _ => {}
        }
        if let Some(number) = text.strip_suffix('%') {
            return number
                .trim()
                .parse::<f32>()
                .map(Self::percent)
                .map_err(|_| invalid());
        }
        let number = text
            .strip_suffix("pt")
            .or_else(|| text.strip_suffix("px"))
            .unwrap_or(text);
        number
            .trim()
            .parse::<f32>()
            .map(Self::points)
            .map_err(|_| invalid())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Undefined => serializer.serialize_none(),
            Self::Point(v) => serializer.serialize_f32(*v),
            Self::Auto | Self::Percent(_) => serializer.collect_str(self),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f32),
            Text(String),
        }

        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(Self::Undefined),
            Some(Repr::Number(v)) => Ok(Self::points(v)),
            Some(Repr::Text(s)) => s.parse().map_err(de::Error::custom),
        }
    }
}

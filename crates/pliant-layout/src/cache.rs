//! Reuse of earlier results for a node.
//!
//! Every node keeps one full-layout entry and a ring of eight measurement
//! entries. A measure-function leaf may also reuse an entry whose
//! constraints differ but provably produce the same size.

use pliant_common::float::floats_equal;
use pliant_style::MeasureMode;
use pliant_tree::{CachedMeasurement, LayoutResult};

use crate::rounding::round_value_to_pixel_grid;

/// Which entry a lookup hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheSlot {
    /// The full-layout entry.
    Layout,
    /// An entry of the measurement ring.
    Measurement(usize),
}

impl CacheSlot {
    pub(crate) fn entry(self, layout: &LayoutResult) -> CachedMeasurement {
        match self {
            Self::Layout => layout.cached_layout,
            Self::Measurement(i) => layout.cached_measurements[i],
        }
    }
}

fn size_is_exact_and_matches_old_measured_size(
    mode: MeasureMode,
    size: f32,
    last_computed_size: f32,
) -> bool {
    mode == MeasureMode::Exactly && floats_equal(size, last_computed_size)
}

fn old_size_is_unspecified_and_still_fits(
    mode: MeasureMode,
    size: f32,
    last_mode: MeasureMode,
    last_computed_size: f32,
) -> bool {
    mode == MeasureMode::AtMost
        && last_mode == MeasureMode::Undefined
        && (size >= last_computed_size || floats_equal(size, last_computed_size))
}

fn new_size_is_stricter_and_still_valid(
    mode: MeasureMode,
    size: f32,
    last_mode: MeasureMode,
    last_size: f32,
    last_computed_size: f32,
) -> bool {
    last_mode == MeasureMode::AtMost
        && mode == MeasureMode::AtMost
        && !last_size.is_nan()
        && !size.is_nan()
        && !last_computed_size.is_nan()
        && last_size > size
        && (last_computed_size <= size || floats_equal(size, last_computed_size))
}

fn axis_is_compatible(
    mode: MeasureMode,
    size: f32,
    last_mode: MeasureMode,
    last_size: f32,
    last_computed: f32,
    margin: f32,
    scale: f32,
) -> bool {
    let (effective, effective_last) = if scale == 0.0 {
        (size, last_size)
    } else {
        let scale = f64::from(scale);
        (
            round_value_to_pixel_grid(f64::from(size), scale, false, false),
            round_value_to_pixel_grid(f64::from(last_size), scale, false, false),
        )
    };
    let inner = size - margin;
    (last_mode == mode && floats_equal(effective_last, effective))
        || size_is_exact_and_matches_old_measured_size(mode, inner, last_computed)
        || old_size_is_unspecified_and_still_fits(mode, inner, last_mode, last_computed)
        || new_size_is_stricter_and_still_valid(mode, inner, last_mode, last_size, last_computed)
}

/// Whether a measurement taken under `last` is valid for a request of
/// `width`/`height` under the given modes.
///
/// `margin_row` and `margin_column` are the node's margins; the sizes
/// offered include them while the cached results do not. With a non-zero
/// `point_scale_factor`, the offered sizes are compared after snapping to
/// the pixel grid.
///
/// An entry whose computed size is negative has never been filled and is
/// never usable.
#[must_use]
pub fn can_use_cached_measurement(
    width_mode: MeasureMode,
    width: f32,
    height_mode: MeasureMode,
    height: f32,
    last: &CachedMeasurement,
    margin_row: f32,
    margin_column: f32,
    point_scale_factor: f32,
) -> bool {
    if (!last.computed_height.is_nan() && last.computed_height < 0.0)
        || (!last.computed_width.is_nan() && last.computed_width < 0.0)
    {
        return false;
    }
    axis_is_compatible(
        width_mode,
        width,
        last.width_mode,
        last.available_width,
        last.computed_width,
        margin_row,
        point_scale_factor,
    ) && axis_is_compatible(
        height_mode,
        height,
        last.height_mode,
        last.available_height,
        last.computed_height,
        margin_column,
        point_scale_factor,
    )
}

/// Arguments of one cache lookup.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Lookup {
    pub(crate) available_width: f32,
    pub(crate) available_height: f32,
    pub(crate) width_mode: MeasureMode,
    pub(crate) height_mode: MeasureMode,
    pub(crate) perform_layout: bool,
}

/// Find a reusable entry.
///
/// `measure_margins` carries the row and column margins of a node with a
/// measure function; such nodes use the relaxed compatibility rules,
/// everything else needs an exact constraint match.
pub(crate) fn find(
    layout: &LayoutResult,
    lookup: Lookup,
    measure_margins: Option<(f32, f32)>,
    point_scale_factor: f32,
) -> Option<CacheSlot> {
    let mut ring = 0..layout.next_cached_measurements_index;
    if let Some((margin_row, margin_column)) = measure_margins {
        let usable = |entry: &CachedMeasurement| {
            can_use_cached_measurement(
                lookup.width_mode,
                lookup.available_width,
                lookup.height_mode,
                lookup.available_height,
                entry,
                margin_row,
                margin_column,
                point_scale_factor,
            )
        };
        if usable(&layout.cached_layout) {
            return Some(CacheSlot::Layout);
        }
        return ring
            .find(|&i| usable(&layout.cached_measurements[i]))
            .map(CacheSlot::Measurement);
    }

    let exact = |entry: &CachedMeasurement| {
        entry.matches(
            lookup.available_width,
            lookup.available_height,
            lookup.width_mode,
            lookup.height_mode,
        )
    };
    if lookup.perform_layout {
        return exact(&layout.cached_layout).then_some(CacheSlot::Layout);
    }
    ring.find(|&i| exact(&layout.cached_measurements[i]))
        .map(CacheSlot::Measurement)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(
        aw: f32,
        wm: MeasureMode,
        cw: f32,
        ah: f32,
        hm: MeasureMode,
        ch: f32,
    ) -> CachedMeasurement {
        CachedMeasurement {
            available_width: aw,
            available_height: ah,
            width_mode: wm,
            height_mode: hm,
            computed_width: cw,
            computed_height: ch,
        }
    }

    #[test]
    fn test_unfilled_entry_is_never_usable() {
        let last = CachedMeasurement::default();
        assert!(!can_use_cached_measurement(
            MeasureMode::Undefined,
            -1.0,
            MeasureMode::Undefined,
            -1.0,
            &last,
            0.0,
            0.0,
            1.0,
        ));
    }

    #[test]
    fn test_exact_request_matching_old_result() {
        let undefined = MeasureMode::Undefined;
        let last = entry(f32::NAN, undefined, 80.0, f32::NAN, undefined, 20.0);
        assert!(can_use_cached_measurement(
            MeasureMode::Exactly,
            90.0,
            MeasureMode::Exactly,
            30.0,
            &last,
            10.0,
            10.0,
            1.0,
        ));
    }

    #[test]
    fn test_at_most_still_fits_unconstrained_result() {
        let undefined = MeasureMode::Undefined;
        let last = entry(f32::NAN, undefined, 50.0, f32::NAN, undefined, 10.0);
        assert!(can_use_cached_measurement(
            MeasureMode::AtMost,
            60.0,
            MeasureMode::Undefined,
            f32::NAN,
            &last,
            0.0,
            0.0,
            0.0,
        ));
        assert!(!can_use_cached_measurement(
            MeasureMode::AtMost,
            40.0,
            MeasureMode::Undefined,
            f32::NAN,
            &last,
            0.0,
            0.0,
            0.0,
        ));
    }

    #[test]
    fn test_stricter_at_most_still_valid() {
        let last = entry(100.0, MeasureMode::AtMost, 50.0, 100.0, MeasureMode::AtMost, 50.0);
        assert!(can_use_cached_measurement(
            MeasureMode::AtMost,
            60.0,
            MeasureMode::AtMost,
            50.0,
            &last,
            0.0,
            0.0,
            1.0,
        ));
        assert!(!can_use_cached_measurement(
            MeasureMode::AtMost,
            40.0,
            MeasureMode::AtMost,
            50.0,
            &last,
            0.0,
            0.0,
            1.0,
        ));
    }

    #[test]
    fn test_rounded_comparison_of_offered_sizes() {
        let last = entry(100.2, MeasureMode::Exactly, 10.0, 50.0, MeasureMode::Exactly, 10.0);
        assert!(can_use_cached_measurement(
            MeasureMode::Exactly,
            99.9,
            MeasureMode::Exactly,
            50.0,
            &last,
            0.0,
            0.0,
            1.0,
        ));
        assert!(!can_use_cached_measurement(
            MeasureMode::Exactly,
            99.9,
            MeasureMode::Exactly,
            50.0,
            &last,
            0.0,
            0.0,
            0.0,
        ));
    }
}

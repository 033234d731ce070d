//! Computed geometry and the per-node measurement cache.
//!
//! Positions are offsets from the owner's border box. Margins, borders and
//! paddings are stored per physical edge after logical edges have been
//! resolved for the node's direction.

use pliant_common::float::{UNDEFINED, float_slices_equal, floats_equal};
use pliant_style::{Dimension, Direction, Edge, MeasureMode};

/// Number of measurement entries kept per node before the ring wraps.
pub const MAX_CACHED_MEASUREMENTS: usize = 8;

/// One remembered `(constraints -> result)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedMeasurement {
    /// Available width the node was laid out with.
    pub available_width: f32,
    /// Available height the node was laid out with.
    pub available_height: f32,
    /// Width mode of that call.
    pub width_mode: MeasureMode,
    /// Height mode of that call.
    pub height_mode: MeasureMode,
    /// Resulting measured width; negative means the entry is unused.
    pub computed_width: f32,
    /// Resulting measured height; negative means the entry is unused.
    pub computed_height: f32,
}

impl Default for CachedMeasurement {
    fn default() -> Self {
        Self {
            available_width: -1.0,
            available_height: -1.0,
            width_mode: MeasureMode::Undefined,
            height_mode: MeasureMode::Undefined,
            computed_width: -1.0,
            computed_height: -1.0,
        }
    }
}

impl CachedMeasurement {
    /// Same constraints, compared with float tolerance and exact modes.
    #[must_use]
    pub fn matches(
        &self,
        available_width: f32,
        available_height: f32,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
    ) -> bool {
        floats_equal(self.available_width, available_width)
            && floats_equal(self.available_height, available_height)
            && self.width_mode == width_mode
            && self.height_mode == height_mode
    }
}

/// The computed layout of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// Offsets per physical edge: left, top, right, bottom.
    pub position: [f32; 4],
    /// Final width and height.
    pub dimensions: [f32; 2],
    /// Resolved margins per physical edge.
    pub margin: [f32; 4],
    /// Resolved borders per physical edge.
    pub border: [f32; 4],
    /// Resolved paddings per physical edge.
    pub padding: [f32; 4],
    /// Resolved inline direction.
    pub direction: Direction,
    /// Generation the flex basis was computed in.
    pub computed_flex_basis_generation: u32,
    /// The flex basis computed by the owner's last pass, or undefined.
    pub computed_flex_basis: f32,
    /// Children did not fit in the main axis.
    pub had_overflow: bool,
    /// Generation the node was last laid out in.
    pub generation_count: u32,
    /// Owner direction of the last layout; `None` before the first one.
    pub last_owner_direction: Option<Direction>,
    /// Next ring slot to write.
    pub next_cached_measurements_index: usize,
    /// Ring of measurement results.
    pub cached_measurements: [CachedMeasurement; MAX_CACHED_MEASUREMENTS],
    /// Dimensions of the latest measurement or layout.
    pub measured_dimensions: [f32; 2],
    /// The last full layout.
    pub cached_layout: CachedMeasurement,
    /// A node in this subtree took the legacy stretch path.
    pub did_use_legacy_flag: bool,
    /// The legacy diff pass produced a different tree.
    pub does_legacy_stretch_flag_affect_layout: bool,
}

impl Default for LayoutResult {
    fn default() -> Self {
        Self {
            position: [0.0; 4],
            dimensions: [UNDEFINED; 2],
            margin: [0.0; 4],
            border: [0.0; 4],
            padding: [0.0; 4],
            direction: Direction::Inherit,
            computed_flex_basis_generation: 0,
            computed_flex_basis: UNDEFINED,
            had_overflow: false,
            generation_count: 0,
            last_owner_direction: None,
            next_cached_measurements_index: 0,
            cached_measurements: [CachedMeasurement::default(); MAX_CACHED_MEASUREMENTS],
            measured_dimensions: [UNDEFINED; 2],
            cached_layout: CachedMeasurement::default(),
            did_use_legacy_flag: false,
            does_legacy_stretch_flag_affect_layout: false,
        }
    }
}

impl LayoutResult {
    /// Left offset from the owner.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.position[Edge::Left.index()]
    }

    /// Top offset from the owner.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.position[Edge::Top.index()]
    }

    /// Right offset from the owner's right edge.
    #[must_use]
    pub const fn right(&self) -> f32 {
        self.position[Edge::Right.index()]
    }

    /// Bottom offset from the owner's bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> f32 {
        self.position[Edge::Bottom.index()]
    }

    /// Final width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.dimensions[Dimension::Width.index()]
    }

    /// Final height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.dimensions[Dimension::Height.index()]
    }

    /// Measured width.
    #[must_use]
    pub const fn measured_width(&self) -> f32 {
        self.measured_dimensions[Dimension::Width.index()]
    }

    /// Measured height.
    #[must_use]
    pub const fn measured_height(&self) -> f32 {
        self.measured_dimensions[Dimension::Height.index()]
    }

    /// Measured size along `dimension`.
    #[must_use]
    pub const fn measured(&self, dimension: Dimension) -> f32 {
        self.measured_dimensions[dimension.index()]
    }

    /// Map a physical or logical edge to a physical slot. Shorthands have
    /// no slot.
    const fn physical_slot(&self, edge: Edge) -> Option<usize> {
        let rtl = matches!(self.direction, Direction::Rtl);
        match edge {
            Edge::Left | Edge::Top | Edge::Right | Edge::Bottom => Some(edge.index()),
            Edge::Start if rtl => Some(Edge::Right.index()),
            Edge::Start => Some(Edge::Left.index()),
            Edge::End if rtl => Some(Edge::Left.index()),
            Edge::End => Some(Edge::Right.index()),
            Edge::Horizontal | Edge::Vertical | Edge::All => None,
        }
    }

    /// Resolved margin on `edge`; `Start`/`End` follow the layout direction.
    #[must_use]
    pub fn margin(&self, edge: Edge) -> Option<f32> {
        self.physical_slot(edge).map(|i| self.margin[i])
    }

    /// Resolved border on `edge`; `Start`/`End` follow the layout direction.
    #[must_use]
    pub fn border(&self, edge: Edge) -> Option<f32> {
        self.physical_slot(edge).map(|i| self.border[i])
    }

    /// Resolved padding on `edge`; `Start`/`End` follow the layout direction.
    #[must_use]
    pub fn padding(&self, edge: Edge) -> Option<f32> {
        self.physical_slot(edge).map(|i| self.padding[i])
    }

    /// Compare the visible geometry of two results with float tolerance.
    ///
    /// Cache state and generation stamps are ignored.
    #[must_use]
    pub fn geometry_eq(&self, other: &Self) -> bool {
        self.direction == other.direction
            && self.had_overflow == other.had_overflow
            && float_slices_equal(&self.position, &other.position)
            && float_slices_equal(&self.dimensions, &other.dimensions)
            && float_slices_equal(&self.margin, &other.margin)
            && float_slices_equal(&self.border, &other.border)
            && float_slices_equal(&self.padding, &other.padding)
            && float_slices_equal(&self.measured_dimensions, &other.measured_dimensions)
    }
}

//! Optional observation hooks and per-pass statistics.
//!
//! Observers never influence layout. A tree without an observer pays only
//! an `Option` check at each hook.

use std::ops::{Index, IndexMut};

use pliant_style::MeasureMode;

use crate::config::ConfigId;
use crate::node::{NodeId, Size};

/// Why a node was laid out or measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutPassReason {
    /// The top-level call.
    Initial,
    /// Laying out an absolutely positioned child.
    AbsLayout,
    /// Re-laying out a stretched child.
    Stretch,
    /// Re-laying out a child stretched across a wrapped line.
    MultilineStretch,
    /// Laying out a flex item at its resolved size.
    FlexLayout,
    /// Measuring a child for its flex basis.
    Measure,
    /// Measuring an absolutely positioned child.
    AbsMeasure,
    /// Measuring a flex item at its resolved size.
    FlexMeasure,
}

impl LayoutPassReason {
    /// Number of reasons.
    pub const COUNT: usize = 8;

    /// Every reason, in counter order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Initial,
        Self::AbsLayout,
        Self::Stretch,
        Self::MultilineStretch,
        Self::FlexLayout,
        Self::Measure,
        Self::AbsMeasure,
        Self::FlexMeasure,
    ];

    /// Short lowercase name used in trace output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::AbsLayout => "abs-layout",
            Self::Stretch => "stretch",
            Self::MultilineStretch => "multiline-stretch",
            Self::FlexLayout => "flex-layout",
            Self::Measure => "measure",
            Self::AbsMeasure => "abs-measure",
            Self::FlexMeasure => "flex-measure",
        }
    }
}

/// What a node visit turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutType {
    /// Full layout was computed.
    Layout,
    /// Only the size was computed.
    Measure,
    /// Full layout served from the cache.
    CachedLayout,
    /// Size served from the cache.
    CachedMeasure,
}

/// Counters indexed by [`LayoutPassReason`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReasonCounts([u32; LayoutPassReason::COUNT]);

impl Index<LayoutPassReason> for ReasonCounts {
    type Output = u32;

    fn index(&self, reason: LayoutPassReason) -> &u32 {
        &self.0[reason as usize]
    }
}

impl IndexMut<LayoutPassReason> for ReasonCounts {
    fn index_mut(&mut self, reason: LayoutPassReason) -> &mut u32 {
        &mut self.0[reason as usize]
    }
}

/// Statistics for one top-level layout call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Full layouts computed.
    pub layouts: u32,
    /// Measurements computed.
    pub measures: u32,
    /// Highest ring slot used by any node.
    pub max_measure_cache: u32,
    /// Full layouts served from the cache.
    pub cached_layouts: u32,
    /// Measurements served from the cache.
    pub cached_measures: u32,
    /// Measure callback invocations.
    pub measure_callbacks: u32,
    /// Measure callback invocations per reason.
    pub measure_callback_reasons: ReasonCounts,
    /// Deepest recursion level reached.
    pub max_depth: u32,
}

/// Arguments and result of one measure callback invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureCallbackEnd {
    /// Inner width offered to the callback.
    pub width: f32,
    /// Width mode offered to the callback.
    pub width_mode: MeasureMode,
    /// Inner height offered to the callback.
    pub height: f32,
    /// Height mode offered to the callback.
    pub height_mode: MeasureMode,
    /// What the callback returned.
    pub measured: Size,
    /// Why the node was being measured.
    pub reason: LayoutPassReason,
}

/// Observer of tree and layout activity. Every hook defaults to a no-op.
pub trait LayoutEvents {
    /// A node was created.
    fn node_allocated(&self, _node: NodeId, _config: ConfigId) {}

    /// A node was freed.
    fn node_deallocated(&self, _node: NodeId, _config: ConfigId) {}

    /// A top-level layout call started.
    fn layout_pass_start(&self, _root: NodeId) {}

    /// A top-level layout call finished.
    fn layout_pass_end(&self, _root: NodeId, _stats: &LayoutStats) {}

    /// A node was visited by the layout algorithm.
    fn node_layout(&self, _node: NodeId, _kind: LayoutType) {}

    /// A measure callback is about to run.
    fn measure_callback_start(&self, _node: NodeId) {}

    /// A measure callback returned.
    fn measure_callback_end(&self, _node: NodeId, _end: &MeasureCallbackEnd) {}

    /// A baseline callback is about to run.
    fn node_baseline_start(&self, _node: NodeId) {}

    /// A baseline callback returned.
    fn node_baseline_end(&self, _node: NodeId) {}
}

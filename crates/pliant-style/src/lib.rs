//! Style model for the Pliant layout engine.
//!
//! This crate provides the data a node is laid out from:
//! - **Values** - points, percentages, `auto` and undefined, with clamping
//! - **Keywords** - flex direction, justification, alignment and the rest
//! - **Edge tables** - nine-slot margin/padding/border/position storage
//! - **Style** - the per-node record plus axis-aware edge lookups

pub mod edges;
pub mod enums;
pub mod style;
pub mod value;

pub use edges::{DimensionValues, Edges};
pub use enums::{
    Align, Dimension, Direction, Display, Edge, ExperimentalFeature, FlexDirection, Justify,
    MeasureMode, NodeType, Overflow, PositionType, Unit, Wrap,
};
pub use style::Style;
pub use value::{ParseValueError, Value};

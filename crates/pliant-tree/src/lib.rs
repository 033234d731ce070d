//! Node tree for the Pliant layout engine.
//!
//! This crate provides an arena-based tree of layout nodes.
//!
//! # Design
//!
//! Nodes and configs live in a [`Tree`] and are addressed by [`NodeId`] and
//! [`ConfigId`]. Each node has at most one owner, recorded by index, so
//! trees can be cloned and shared without reference cycles. Mutations that
//! change layout inputs mark the node dirty and propagate upward.

pub mod config;
pub mod error;
pub mod events;
pub mod layout_result;
pub mod node;
pub mod print;
pub mod tree;

pub use config::{CloneNodeFunc, Config, ConfigId, ConfigSettings, Logger};
pub use error::TreeError;
pub use events::{
    LayoutEvents, LayoutPassReason, LayoutStats, LayoutType, MeasureCallbackEnd, ReasonCounts,
};
pub use layout_result::{CachedMeasurement, LayoutResult, MAX_CACHED_MEASUREMENTS};
pub use node::{
    BaselineFunc, BaselineRequest, DirtiedFunc, MeasureFunc, MeasureRequest, Node, NodeId,
    Size,
};
pub use print::PrintOptions;
pub use tree::{Ancestors, Tree};

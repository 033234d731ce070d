//! Flexbox layout for the Pliant engine.
//!
//! This crate computes sizes and positions for a [`pliant_tree::Tree`]:
//! - **Flex algorithm** - basis, line breaking, flexible lengths, justify
//!   and align, absolute children
//! - **Caching** - per-node layout and measurement reuse across passes
//! - **Rounding** - snapping the final geometry to the physical pixel grid
//!
//! # Usage
//!
//! ```ignore
//! use pliant_layout::compute_layout;
//!
//! let stats = compute_layout(&mut tree, root, 375.0, f32::NAN, Direction::Ltr);
//! println!("{} layouts, {} cache hits", stats.layouts, stats.cached_layouts);
//! ```
//!
//! A pass visits a node only when it is dirty or its owner's direction
//! changed; otherwise the cached size from an earlier pass is reused.

mod absolute;
mod align;
mod basis;
mod cache;
mod compute;
mod flex;
mod flexible;
mod justify;
mod leaf;
mod lines;
mod node_layout;
mod pass;
mod rounding;
mod sizing;

pub use cache::can_use_cached_measurement;
pub use compute::{compute_layout, compute_layout_with_context};
pub use rounding::round_value_to_pixel_grid;

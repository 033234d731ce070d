//! Common utilities for the Pliant layout engine.
//!
//! This crate provides shared infrastructure used by all engine components:
//! - **Float helpers** - the undefined sentinel and tolerant comparisons
//! - **Diagnostics** - log levels and the default colored stderr sink

pub mod float;
pub mod log;

pub use float::{UNDEFINED, float_max, float_min, floats_equal, is_undefined};
pub use log::{LogLevel, default_log};

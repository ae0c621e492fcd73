//! Foundation module - Core utilities and types
//!
//! - Math type aliases shared by layout and meshing
//! - Logging utilities

pub mod logging;
pub mod math;

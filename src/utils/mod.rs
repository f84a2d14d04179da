//! Utility modules for pickup_planner

pub mod interpolation;
pub mod visualization;

pub use visualization::{Visualizer, PathStyle, PointStyle, colors};

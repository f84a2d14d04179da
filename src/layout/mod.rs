//! Target layout generation for simulation and test input

pub mod layout_generator;

pub use layout_generator::*;

//! Common types, traits, and error definitions for pickup_planner
//!
//! This module provides the foundational building blocks shared by the
//! layout generator, the sequencer and the path planner.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;

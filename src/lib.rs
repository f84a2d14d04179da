//! pickup_planner - pick-up sequencing and obstacle avoidance for a robot arm
//!
//! Given a set of targets on a table and one circular obstacle, this crate
//! decides in which order to visit the targets and produces, for every leg
//! of the tour, a collision-free list of waypoints at a fixed altitude.
//! Kinematics and motion execution are left to the caller.
//!
//! ```text
//! LayoutGenerator -> PickupSequencer -> ObstacleAwarePlanner -> motion executor
//! ```

// Core modules
pub mod common;
pub mod utils;

// Algorithm modules
pub mod layout;
pub mod mission_planning;
pub mod path_planning;

// Re-export common types for convenience
pub use common::{Point2D, Point3D, Path3D, Leg, Target, ShapeKind, WorkspaceBounds};
pub use common::{LegPlanner, Visualizable};
pub use common::{PlannerError, PlannerResult};
pub use layout::{LayoutGenerator, LayoutConfig, ExhaustionPolicy};
pub use mission_planning::{PickupSequencer, Tour};
pub use path_planning::{Obstacle, ObstacleAwarePlanner, AvoidanceConfig, MiddleSegment, TourPlan, plan_tour};

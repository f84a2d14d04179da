//! Common traits defining interfaces for the planners

use crate::common::error::PlannerResult;
use crate::common::types::*;

/// Trait for single-leg path planners
pub trait LegPlanner {
    /// Check the planner settings before any leg is planned
    fn validate(&self) -> PlannerResult<()> {
        Ok(())
    }

    /// Plan a waypoint path from `from` to `to`
    fn plan_leg(&self, from: Point3D, to: Point3D) -> PlannerResult<Path3D>;
}

/// Trait for visualizable planning artefacts
pub trait Visualizable {
    /// Draw to visualizer
    fn visualize(&self, vis: &mut crate::utils::Visualizer);
}

//! Error types for pickup_planner

use crate::common::types::{Point2D, Point3D};

/// Main error type for layout, sequencing and path planning
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlannerError {
    /// Layout generation ran out of attempts under the fail-fast policy.
    /// `placed` holds the items accepted before giving up.
    #[error("partial layout: placed {} of {requested} items", .placed.len())]
    PartialLayout {
        placed: Vec<Point3D>,
        requested: usize,
    },
    /// A leg endpoint lies inside the obstacle's safety disk, so no tangent exists
    #[error(
        "unreachable target: ({:.4}, {:.4}) is {distance:.4} from the obstacle centre, inside safe radius {safe_radius:.4}",
        .point.x, .point.y
    )]
    UnreachableTarget {
        point: Point2D,
        distance: f64,
        safe_radius: f64,
    },
    /// Malformed bounds, radius, resolution or other parameter
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type alias for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;

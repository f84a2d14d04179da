//! Full pick-up tour: visiting order plus one waypoint path per leg

use crate::common::{LegPlanner, Leg, Path3D, PlannerResult, Point3D, Target};
use crate::mission_planning::{PickupSequencer, Tour};

/// A sequenced tour together with the planned path of every leg.
///
/// `paths[i]` leads to `tour.targets()[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TourPlan<T = ()> {
    pub start: Point3D,
    pub tour: Tour<T>,
    pub paths: Vec<Path3D>,
}

impl<T> TourPlan<T> {
    pub fn legs(&self) -> Vec<Leg> {
        self.tour.legs(self.start)
    }

    /// Every waypoint of the tour in execution order
    pub fn waypoints(&self) -> Vec<Point3D> {
        self.paths.iter().flat_map(|p| p.points.iter().copied()).collect()
    }

    /// Number of legs that had to go around the obstacle
    pub fn detour_count(&self) -> usize {
        self.paths.iter().filter(|p| !p.is_direct()).count()
    }

    pub fn total_length(&self) -> f64 {
        self.paths.iter().map(Path3D::total_length).sum()
    }
}

/// Sequence `targets` from `start` and plan every leg with `planner`.
///
/// The planner settings are checked first, even when there is nothing to
/// visit. Legs are planned in tour order; the first failing leg aborts the
/// plan and its error is returned unchanged.
pub fn plan_tour<T, P>(
    start: Point3D,
    targets: &[Target<T>],
    sequencer: &PickupSequencer,
    planner: &P,
) -> PlannerResult<TourPlan<T>>
where
    T: Clone,
    P: LegPlanner + ?Sized,
{
    planner.validate()?;
    let tour = sequencer.sequence(start, targets);
    let paths = tour
        .legs(start)
        .into_iter()
        .map(|leg| planner.plan_leg(leg.from, leg.to))
        .collect::<PlannerResult<Vec<_>>>()?;

    Ok(TourPlan { start, tour, paths })
}

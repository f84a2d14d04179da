//! Greedy nearest-neighbour ordering of pick-up targets
//!
//! Starting from the robot pose, the sequencer repeatedly walks to the
//! closest target it has not visited yet. Distances are measured in the XY
//! plane only. Ties go to the target that came first in the input.
//!
//! This is a heuristic: the tour is built in O(n^2) and is not guaranteed
//! to be the shortest tour through the targets.

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::common::{Leg, Point3D, Target};

/// Ordered visit of every target, each exactly once
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour<T = ()> {
    stops: Vec<Target<T>>,
}

impl<T> Tour<T> {
    pub fn targets(&self) -> &[Target<T>] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Target ids in visiting order
    pub fn ids(&self) -> Vec<usize> {
        self.stops.iter().map(|t| t.id).collect()
    }

    /// Legs of the tour; the first leaves `start`, every later one leaves
    /// the previous target.
    pub fn legs(&self, start: Point3D) -> Vec<Leg> {
        std::iter::once(start)
            .chain(self.stops.iter().map(|t| t.position))
            .tuple_windows()
            .map(|(from, to)| Leg::new(from, to))
            .collect()
    }

    /// Sum of the planar leg lengths
    pub fn planar_length(&self, start: Point3D) -> f64 {
        self.legs(start).iter().map(Leg::planar_length).sum()
    }
}

/// Nearest-neighbour pick-up sequencer
#[derive(Debug, Clone, Copy, Default)]
pub struct PickupSequencer;

impl PickupSequencer {
    pub fn new() -> Self {
        PickupSequencer
    }

    /// Order `targets` for a robot starting at `start`
    pub fn sequence<T: Clone>(&self, start: Point3D, targets: &[Target<T>]) -> Tour<T> {
        let mut remaining: Vec<usize> = (0..targets.len()).collect();
        let mut stops = Vec::with_capacity(targets.len());
        let mut current = start;

        while let Some(pos) = Self::nearest(current, targets, &remaining) {
            // `remove` keeps input order, which the tie-break depends on
            let index = remaining.remove(pos);
            let next = &targets[index];
            current = next.position;
            stops.push(next.clone());
        }

        Tour { stops }
    }

    /// Position in `remaining` of the target closest to `current`.
    /// `position_min_by_key` returns the first of equal minima.
    fn nearest<T>(current: Point3D, targets: &[Target<T>], remaining: &[usize]) -> Option<usize> {
        remaining
            .iter()
            .position_min_by_key(|&&i| OrderedFloat(current.planar_distance(&targets[i].position)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn untagged(points: &[(f64, f64, f64)]) -> Vec<Target> {
        points
            .iter()
            .enumerate()
            .map(|(i, &p)| Target::untagged(i, Point3D::from(p)))
            .collect()
    }

    #[test]
    fn test_nearest_neighbour_order() {
        let targets = untagged(&[(0.4, 0.2, 0.0), (0.1, 0.5, 0.0), (0.3, 0.3, 0.0)]);
        let tour = PickupSequencer::new().sequence(Point3D::origin(), &targets);
        assert_eq!(tour.ids(), vec![2, 0, 1]);
    }

    #[test]
    fn test_empty_input() {
        let tour = PickupSequencer::new().sequence::<()>(Point3D::origin(), &[]);
        assert!(tour.is_empty());
        assert!(tour.legs(Point3D::origin()).is_empty());
        assert_eq!(tour.planar_length(Point3D::origin()), 0.0);
    }

    #[test]
    fn test_tie_goes_to_first_input() {
        let targets = untagged(&[(1.0, 0.0, 0.0), (-1.0, 0.0, 0.0), (0.0, 1.0, 0.0)]);
        let tour = PickupSequencer::new().sequence(Point3D::origin(), &targets);
        assert_eq!(tour.ids()[0], 0);
    }

    #[test]
    fn test_z_is_ignored_for_distance() {
        let targets = untagged(&[(0.5, 0.0, 0.0), (0.2, 0.0, 10.0)]);
        let tour = PickupSequencer::new().sequence(Point3D::origin(), &targets);
        assert_eq!(tour.ids(), vec![1, 0]);
    }

    #[test]
    fn test_tour_is_permutation() {
        let targets = untagged(&[
            (0.3, -0.2, 0.0),
            (-0.1, 0.4, 0.0),
            (0.3, -0.2, 0.0),
            (0.9, 0.9, 0.0),
            (-0.5, -0.5, 0.0),
            (0.0, 0.0, 0.0),
        ]);
        let tour = PickupSequencer::new().sequence(Point3D::new(0.1, 0.1, 0.0), &targets);
        let mut ids = tour.ids();
        ids.sort_unstable();
        assert_eq!(ids, (0..targets.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_legs_chain_positions() {
        let targets = untagged(&[(1.0, 0.0, 0.0), (2.0, 0.0, 0.0)]);
        let start = Point3D::origin();
        let tour = PickupSequencer::new().sequence(start, &targets);
        let legs = tour.legs(start);
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].from, start);
        assert_eq!(legs[1].from, legs[0].to);
        assert_abs_diff_eq!(tour.planar_length(start), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tags_travel_with_targets() {
        let targets = vec![
            Target::new(7, Point3D::new(2.0, 0.0, 0.0), "red"),
            Target::new(3, Point3D::new(1.0, 0.0, 0.0), "blue"),
        ];
        let tour = PickupSequencer::new().sequence(Point3D::origin(), &targets);
        let tags: Vec<&str> = tour.targets().iter().map(|t| t.tag).collect();
        assert_eq!(tags, vec!["blue", "red"]);
        assert_eq!(tour.ids(), vec![3, 7]);
    }
}

//! Tangent-line avoidance of a single circular obstacle
//!
//! The obstacle is a vertical cylinder seen from above: a disk inflated by a
//! clearance margin (the safety disk). A leg whose straight segment stays
//! outside the safety disk is flown directly. Otherwise the leg is bent
//! around the disk through two tangent points:
//!
//! ```text
//!   from ──> T1 ──(chord or arc)──> T3 ──> to
//! ```
//!
//! All waypoints are emitted at a fixed planning altitude.

use itertools::iproduct;
use ordered_float::OrderedFloat;
use tracing::debug;

use crate::common::{
    normalize_angle, LegPlanner, Path3D, PlannerError, PlannerResult, Point2D, Point3D,
};
use crate::utils::interpolation::{arc, linspace, linspace_to_end};

/// Fewest waypoints a detour can be split into (one per sub-path)
pub const MIN_RESOLUTION: usize = 3;

// Share of the waypoints spent on the approach and on the bypass.
// The departure gets whatever is left.
const APPROACH_SHARE: f64 = 0.3;
const BYPASS_SHARE: f64 = 0.4;

/// Below this squared length a segment is treated as a point
const DEGENERATE_SEGMENT_EPS: f64 = 1e-18;

/// Circular obstacle with a clearance margin
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub center: Point2D,
    pub base_radius: f64,
    pub clearance_margin: f64,
}

impl Obstacle {
    pub fn new(center: Point2D, base_radius: f64, clearance_margin: f64) -> Self {
        Self { center, base_radius, clearance_margin }
    }

    /// Radius of the safety disk
    pub fn safe_radius(&self) -> f64 {
        self.base_radius + self.clearance_margin
    }

    /// True when `p` lies strictly inside the safety disk
    pub fn contains(&self, p: &Point2D) -> bool {
        p.distance(&self.center) < self.safe_radius()
    }

    /// Distance from the centre to the closest point of segment `a`-`b`
    pub fn distance_to_segment(&self, a: Point2D, b: Point2D) -> f64 {
        closest_point_on_segment(a, b, self.center).distance(&self.center)
    }

    pub fn validate(&self) -> PlannerResult<()> {
        if !self.center.is_finite() {
            return Err(PlannerError::InvalidConfiguration(format!(
                "obstacle centre must be finite, got {:?}",
                self.center
            )));
        }
        if !self.base_radius.is_finite() || self.base_radius < 0.0 {
            return Err(PlannerError::InvalidConfiguration(format!(
                "obstacle base radius must be finite and non-negative, got {}",
                self.base_radius
            )));
        }
        if !self.clearance_margin.is_finite() || self.clearance_margin < 0.0 {
            return Err(PlannerError::InvalidConfiguration(format!(
                "obstacle clearance margin must be finite and non-negative, got {}",
                self.clearance_margin
            )));
        }
        if self.safe_radius() <= 0.0 {
            return Err(PlannerError::InvalidConfiguration(format!(
                "obstacle safe radius must be positive, got {}",
                self.safe_radius()
            )));
        }
        Ok(())
    }
}

/// Closest point to `p` on the segment `from`-`to` (not the infinite line)
pub fn closest_point_on_segment(from: Point2D, to: Point2D, p: Point2D) -> Point2D {
    let a = from.to_vector();
    let d = to.to_vector() - a;
    let len2 = d.norm_squared();
    if len2 < DEGENERATE_SEGMENT_EPS {
        return from;
    }
    let t = ((p.to_vector() - a).dot(&d) / len2).clamp(0.0, 1.0);
    Point2D::from(a + d * t)
}

/// True when the segment `from`-`to` passes through the obstacle's safety disk
pub fn segment_intersects_disk(from: Point2D, to: Point2D, obstacle: &Obstacle) -> bool {
    obstacle.distance_to_segment(from, to) < obstacle.safe_radius()
}

/// How the detour gets from the first tangent point to the second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MiddleSegment {
    /// Straight chord between the tangent points. Can cut slightly into the
    /// safety disk when the tangent points are far apart.
    Chord,
    /// Samples along the safety circle itself
    Arc,
}

impl Default for MiddleSegment {
    fn default() -> Self {
        MiddleSegment::Chord
    }
}

/// Configuration for the obstacle-aware planner
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvoidanceConfig {
    /// Waypoints per detour path
    pub resolution: usize,
    /// Planning altitude given to every waypoint
    pub z_constant: f64,
    /// Bypass shape between the tangent points
    pub middle_segment: MiddleSegment,
}

impl Default for AvoidanceConfig {
    fn default() -> Self {
        Self {
            resolution: 50,
            z_constant: 0.1,
            middle_segment: MiddleSegment::Chord,
        }
    }
}

impl AvoidanceConfig {
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_z_constant(mut self, z_constant: f64) -> Self {
        self.z_constant = z_constant;
        self
    }

    pub fn with_middle_segment(mut self, middle_segment: MiddleSegment) -> Self {
        self.middle_segment = middle_segment;
        self
    }

    pub fn validate(&self) -> PlannerResult<()> {
        if self.resolution < MIN_RESOLUTION {
            return Err(PlannerError::InvalidConfiguration(format!(
                "resolution must be at least {}, got {}",
                MIN_RESOLUTION, self.resolution
            )));
        }
        if !self.z_constant.is_finite() {
            return Err(PlannerError::InvalidConfiguration(format!(
                "planning altitude must be finite, got {}",
                self.z_constant
            )));
        }
        Ok(())
    }
}

/// Waypoint counts for approach, bypass and departure.
///
/// The three counts always sum to `resolution`.
pub fn split_resolution(resolution: usize) -> (usize, usize, usize) {
    let approach = (APPROACH_SHARE * resolution as f64).round() as usize;
    let bypass = (BYPASS_SHARE * resolution as f64).round() as usize;
    let departure = resolution.saturating_sub(approach + bypass);
    (approach, bypass, departure)
}

/// The tangent points chosen for a detour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentPair {
    /// First tangent point, reached from the leg start (T1)
    pub entry: Point2D,
    /// Second tangent point, left towards the leg end (T3)
    pub exit: Point2D,
    /// Angle of `entry` around the obstacle centre
    pub entry_angle: f64,
    /// Signed angle from `entry` to `exit`, in [-pi, pi]
    pub sweep: f64,
}

/// Single-obstacle leg planner using tangent detours
#[derive(Debug, Clone)]
pub struct ObstacleAwarePlanner {
    obstacle: Obstacle,
    config: AvoidanceConfig,
}

impl ObstacleAwarePlanner {
    pub fn new(obstacle: Obstacle, config: AvoidanceConfig) -> Self {
        ObstacleAwarePlanner { obstacle, config }
    }

    pub fn obstacle(&self) -> &Obstacle {
        &self.obstacle
    }

    pub fn config(&self) -> &AvoidanceConfig {
        &self.config
    }

    /// Select the tangent points for a leg from `from` to `to`.
    ///
    /// Each endpoint sees the safety circle under two tangent angles
    /// `theta +/- acos(r / d)`. The pair with the smallest wrapped angular
    /// separation is kept, which gives the shorter way round.
    pub fn tangent_points(&self, from: Point2D, to: Point2D) -> PlannerResult<TangentPair> {
        self.obstacle.validate()?;
        check_endpoint("start", &from, from.is_finite())?;
        check_endpoint("end", &to, to.is_finite())?;

        let center = self.obstacle.center;
        let radius = self.obstacle.safe_radius();
        let from_candidates = self.tangent_angles(from)?;
        let to_candidates = self.tangent_angles(to)?;

        let (entry_angle, exit_angle) = iproduct!(from_candidates.iter(), to_candidates.iter())
            .min_by_key(|&(a, b)| OrderedFloat(normalize_angle(b - a).abs()))
            .map(|(&a, &b)| (a, b))
            .unwrap_or((from_candidates[0], to_candidates[0]));

        let on_circle = |angle: f64| {
            Point2D::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        };

        Ok(TangentPair {
            entry: on_circle(entry_angle),
            exit: on_circle(exit_angle),
            entry_angle,
            sweep: normalize_angle(exit_angle - entry_angle),
        })
    }

    fn tangent_angles(&self, p: Point2D) -> PlannerResult<[f64; 2]> {
        let center = self.obstacle.center;
        let radius = self.obstacle.safe_radius();
        let d = p.distance(&center);
        if d < radius {
            return Err(PlannerError::UnreachableTarget {
                point: p,
                distance: d,
                safe_radius: radius,
            });
        }
        let theta = p.angle_from(&center);
        let alpha = (radius / d).min(1.0).acos();
        Ok([theta + alpha, theta - alpha])
    }

    fn direct_path(&self, from: Point2D, to: Point2D) -> Path3D {
        let z = self.config.z_constant;
        Path3D::from_points(vec![from.with_z(z), to.with_z(z)])
    }

    fn detour_path(&self, from: Point2D, to: Point2D) -> PlannerResult<Path3D> {
        let tangents = self.tangent_points(from, to)?;
        let (n_approach, n_bypass, n_departure) = split_resolution(self.config.resolution);

        debug!(
            "leg ({:.3}, {:.3}) -> ({:.3}, {:.3}) crosses the safety disk, detouring via ({:.3}, {:.3}) and ({:.3}, {:.3})",
            from.x, from.y, to.x, to.y,
            tangents.entry.x, tangents.entry.y, tangents.exit.x, tangents.exit.y
        );

        let approach = linspace(from, tangents.entry, n_approach);
        let bypass = match self.config.middle_segment {
            MiddleSegment::Chord => linspace(tangents.entry, tangents.exit, n_bypass),
            MiddleSegment::Arc => arc(
                self.obstacle.center,
                self.obstacle.safe_radius(),
                tangents.entry_angle,
                tangents.sweep,
                n_bypass,
            ),
        };
        let departure = linspace_to_end(tangents.exit, to, n_departure);

        let z = self.config.z_constant;
        let points = approach
            .into_iter()
            .chain(bypass)
            .chain(departure)
            .map(|p| p.with_z(z))
            .collect();
        Ok(Path3D::from_points(points))
    }

}

fn check_endpoint<P: std::fmt::Debug>(name: &str, p: &P, finite: bool) -> PlannerResult<()> {
    if finite {
        Ok(())
    } else {
        Err(PlannerError::InvalidConfiguration(format!(
            "leg {} must be finite, got {:?}",
            name, p
        )))
    }
}

impl LegPlanner for ObstacleAwarePlanner {
    fn validate(&self) -> PlannerResult<()> {
        self.config.validate()?;
        self.obstacle.validate()
    }

    fn plan_leg(&self, from: Point3D, to: Point3D) -> PlannerResult<Path3D> {
        self.validate()?;
        check_endpoint("start", &from, from.is_finite())?;
        check_endpoint("end", &to, to.is_finite())?;
        let (from, to) = (from.xy(), to.xy());
        if segment_intersects_disk(from, to, &self.obstacle) {
            self.detour_path(from, to)
        } else {
            Ok(self.direct_path(from, to))
        }
    }
}

impl Path3D {
    /// Smallest planar distance between the obstacle centre and any segment
    /// of the path. Infinite for an empty path.
    pub fn min_clearance(&self, obstacle: &Obstacle) -> f64 {
        match self.points.len() {
            0 => f64::INFINITY,
            1 => self.points[0].xy().distance(&obstacle.center),
            _ => self
                .points
                .windows(2)
                .map(|w| obstacle.distance_to_segment(w[0].xy(), w[1].xy()))
                .fold(f64::INFINITY, f64::min),
        }
    }
}

//! Common types used throughout pickup_planner

use nalgebra::Vector2;
use std::f64::consts::PI;

use crate::common::error::{PlannerError, PlannerResult};

/// 2D point representation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Angle of `self` seen from `center`, in [-pi, pi]
    pub fn angle_from(&self, center: &Point2D) -> f64 {
        (self.y - center.y).atan2(self.x - center.x)
    }

    /// Lift to 3D at altitude `z`
    pub fn with_z(&self, z: f64) -> Point3D {
        Point3D::new(self.x, self.y, z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<Vector2<f64>> for Point2D {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

/// 3D point representation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn distance(&self, other: &Point3D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2)).sqrt()
    }

    /// Distance in the XY plane, z ignored
    pub fn planar_distance(&self, other: &Point3D) -> f64 {
        self.xy().distance(&other.xy())
    }

    /// Projection onto the XY plane
    pub fn xy(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<(f64, f64, f64)> for Point3D {
    fn from(tuple: (f64, f64, f64)) -> Self {
        Self { x: tuple.0, y: tuple.1, z: tuple.2 }
    }
}

/// Wrap an angle to [-pi, pi]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle;
    while a > PI {
        a -= 2.0 * PI;
    }
    while a < -PI {
        a += 2.0 * PI;
    }
    a
}

/// Axis-aligned workspace box, one `[min, max]` interval per axis
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkspaceBounds {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub zmin: f64,
    pub zmax: f64,
}

impl WorkspaceBounds {
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64, zmin: f64, zmax: f64) -> Self {
        WorkspaceBounds { xmin, xmax, ymin, ymax, zmin, zmax }
    }

    /// Flat bounds lying on the plane `z`
    pub fn planar(xmin: f64, xmax: f64, ymin: f64, ymax: f64, z: f64) -> Self {
        Self::new(xmin, xmax, ymin, ymax, z, z)
    }

    pub fn from_array(area: [f64; 6]) -> Self {
        Self::new(area[0], area[1], area[2], area[3], area[4], area[5])
    }

    pub fn contains(&self, p: &Point3D) -> bool {
        p.x >= self.xmin && p.x <= self.xmax
            && p.y >= self.ymin && p.y <= self.ymax
            && p.z >= self.zmin && p.z <= self.zmax
    }

    pub fn validate(&self) -> PlannerResult<()> {
        let axes = [
            ("x", self.xmin, self.xmax),
            ("y", self.ymin, self.ymax),
            ("z", self.zmin, self.zmax),
        ];
        for (name, min, max) in axes.iter() {
            if !min.is_finite() || !max.is_finite() {
                return Err(PlannerError::InvalidConfiguration(format!(
                    "workspace bounds on {} must be finite, got [{}, {}]",
                    name, min, max
                )));
            }
            if min > max {
                return Err(PlannerError::InvalidConfiguration(format!(
                    "workspace bounds on {} have min {} > max {}",
                    name, min, max
                )));
            }
            if !(max - min).is_finite() {
                return Err(PlannerError::InvalidConfiguration(format!(
                    "workspace bounds on {} span [{}, {}] overflows",
                    name, min, max
                )));
            }
        }
        Ok(())
    }
}

/// Model shape of a scattered target.
///
/// Only used for rendering and bookkeeping; planning never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    Cube,
    Sphere,
    Pyramid,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Cube, ShapeKind::Sphere, ShapeKind::Pyramid];

    /// Round-robin shape for the `index`-th item
    pub fn cycle(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

/// A position to visit, with an opaque tag (colour, shape, ...)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target<T = ()> {
    pub id: usize,
    pub position: Point3D,
    pub tag: T,
}

impl<T> Target<T> {
    pub fn new(id: usize, position: Point3D, tag: T) -> Self {
        Self { id, position, tag }
    }
}

impl Target<()> {
    pub fn untagged(id: usize, position: Point3D) -> Self {
        Self::new(id, position, ())
    }
}

/// One hop of a tour: the previous position and the next target position
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    pub from: Point3D,
    pub to: Point3D,
}

impl Leg {
    pub fn new(from: Point3D, to: Point3D) -> Self {
        Self { from, to }
    }

    pub fn planar_length(&self) -> f64 {
        self.from.planar_distance(&self.to)
    }
}

/// Waypoint path for one leg
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path3D {
    pub points: Vec<Point3D>,
}

impl Path3D {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<Point3D>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point3D> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point3D> {
        self.points.last()
    }

    /// A straight start/end pair, as produced when nothing is in the way
    pub fn is_direct(&self) -> bool {
        self.points.len() == 2
    }

    pub fn x_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn y_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    pub fn total_length(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        self.points.windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }
}

impl Default for Path3D {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_point2d_distance() {
        let p1 = Point2D::new(0.0, 0.0);
        let p2 = Point2D::new(3.0, 4.0);
        assert_abs_diff_eq!(p1.distance(&p2), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_planar_distance_ignores_z() {
        let a = Point3D::new(0.0, 0.0, 0.0);
        let b = Point3D::new(3.0, 4.0, 12.0);
        assert_abs_diff_eq!(a.planar_distance(&b), 5.0, epsilon = 1e-10);
        assert_abs_diff_eq!(a.distance(&b), 13.0, epsilon = 1e-10);
    }

    #[test]
    fn test_normalize_angle() {
        assert_abs_diff_eq!(normalize_angle(3.0 * PI / 2.0), -PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(-3.0 * PI / 2.0), PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(0.25), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_bounds_validation() {
        assert!(WorkspaceBounds::planar(-1.0, 1.0, -1.0, 1.0, 0.0).validate().is_ok());
        let bad = WorkspaceBounds::new(1.0, -1.0, 0.0, 1.0, 0.0, 0.0);
        assert!(matches!(bad.validate(), Err(PlannerError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_bounds_with_overflowing_span_rejected() {
        let huge = WorkspaceBounds::planar(-f64::MAX, f64::MAX, -1.0, 1.0, 0.0);
        assert!(matches!(huge.validate(), Err(PlannerError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_path3d_total_length() {
        let path = Path3D::from_points(vec![
            Point3D::new(0.0, 0.0, 0.1),
            Point3D::new(1.0, 0.0, 0.1),
            Point3D::new(1.0, 1.0, 0.1),
        ]);
        assert_abs_diff_eq!(path.total_length(), 2.0, epsilon = 1e-10);
        assert!(!path.is_direct());
    }

    #[test]
    fn test_shape_cycle() {
        assert_eq!(ShapeKind::cycle(0), ShapeKind::Cube);
        assert_eq!(ShapeKind::cycle(4), ShapeKind::Sphere);
    }
}

//! Waypoint samplers used to discretize path segments

use crate::common::Point2D;

/// `n` evenly spaced points from `start` to `end`, both included.
///
/// `n == 1` yields just `start`, `n == 0` yields nothing.
pub fn linspace(start: Point2D, end: Point2D, n: usize) -> Vec<Point2D> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let steps = (n - 1) as f64;
            (0..n)
                .map(|i| {
                    let t = i as f64 / steps;
                    Point2D::new(
                        start.x + t * (end.x - start.x),
                        start.y + t * (end.y - start.y),
                    )
                })
                .collect()
        }
    }
}

/// Like [`linspace`] but a single sample sits on `end` instead of `start`
pub fn linspace_to_end(start: Point2D, end: Point2D, n: usize) -> Vec<Point2D> {
    if n == 1 {
        vec![end]
    } else {
        linspace(start, end, n)
    }
}

/// `n` points along a circle of `radius` around `center`, starting at
/// `start_angle` and sweeping `sweep` radians (signed).
pub fn arc(center: Point2D, radius: f64, start_angle: f64, sweep: f64, n: usize) -> Vec<Point2D> {
    let at = |angle: f64| {
        Point2D::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
    };
    match n {
        0 => Vec::new(),
        1 => vec![at(start_angle)],
        _ => {
            let steps = (n - 1) as f64;
            (0..n)
                .map(|i| at(start_angle + sweep * i as f64 / steps))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_linspace_endpoints() {
        let pts = linspace(Point2D::new(0.0, 0.0), Point2D::new(1.0, 2.0), 5);
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[0], Point2D::new(0.0, 0.0));
        assert_eq!(pts[4], Point2D::new(1.0, 2.0));
        assert_abs_diff_eq!(pts[2].x, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(pts[2].y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_sample_anchor() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(1.0, 1.0);
        assert_eq!(linspace(a, b, 1), vec![a]);
        assert_eq!(linspace_to_end(a, b, 1), vec![b]);
        assert!(linspace(a, b, 0).is_empty());
    }

    #[test]
    fn test_arc_stays_on_circle() {
        let center = Point2D::new(1.0, -1.0);
        let pts = arc(center, 0.5, 0.0, PI / 2.0, 7);
        assert_eq!(pts.len(), 7);
        for p in &pts {
            assert_abs_diff_eq!(p.distance(&center), 0.5, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(pts[6].x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pts[6].y, -0.5, epsilon = 1e-12);
    }
}

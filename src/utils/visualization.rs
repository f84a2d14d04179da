//! Visualization utilities for pickup_planner
//!
//! Top-down gnuplot rendering of a pick-up plan: obstacle disks, targets,
//! the start pose and the planned paths.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};
use std::f64::consts::PI;

use crate::common::{Path3D, Point2D, Point3D, Target, Visualizable};
use crate::path_planning::{Obstacle, TourPlan};

/// Samples used to draw a circle
const CIRCLE_SEGMENTS: usize = 72;

/// Plot colours, by what they mark
pub mod colors {
    pub const OBSTACLE: &str = "#000000";
    pub const SAFETY_MARGIN: &str = "#808080";
    pub const START: &str = "#00AA00";
    pub const TARGET: &str = "#0000FF";
    pub const PATH: &str = "#FF0000";
    pub const DETOUR: &str = "#FFA500";
}

/// Line style of a path or circle
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    /// Legend entry of the `index`-th leg; detours get their own colour
    pub fn for_leg(index: usize, path: &Path3D) -> Self {
        if path.is_direct() {
            Self::new(colors::PATH, &format!("Leg {}", index + 1))
        } else {
            Self::new(colors::DETOUR, &format!("Leg {} (detour)", index + 1))
        }
    }
}

/// Marker style of targets and the start pose
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub color: String,
    pub size: f64,
    pub symbol: char,
    pub caption: String,
}

impl PointStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            size: 1.5,
            symbol: 'O',
            caption: caption.to_string(),
        }
    }

    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }
}

/// Top-down plot of a table, in metres, with a fixed 1:1 aspect ratio
pub struct Visualizer {
    figure: Figure,
    title: String,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
}

impl Visualizer {
    pub fn new() -> Self {
        Self {
            figure: Figure::new(),
            title: String::new(),
            x_range: None,
            y_range: None,
        }
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    pub fn set_x_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.x_range = Some((min, max));
        self
    }

    pub fn set_y_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.y_range = Some((min, max));
        self
    }

    /// Plot a path projected onto the XY plane
    pub fn plot_path(&mut self, path: &Path3D, style: &PathStyle) -> &mut Self {
        self.polyline(&path.x_coords(), &path.y_coords(), style)
    }

    /// Plot a closed circle outline
    pub fn plot_circle(&mut self, center: Point2D, radius: f64, style: &PathStyle) -> &mut Self {
        let (x, y): (Vec<f64>, Vec<f64>) = circle_outline(center, radius).into_iter().unzip();
        self.polyline(&x, &y, style)
    }

    /// Obstacle body plus the thinner safety disk around it
    pub fn plot_obstacle(&mut self, obstacle: &Obstacle) -> &mut Self {
        self.plot_circle(
            obstacle.center,
            obstacle.base_radius,
            &PathStyle::new(colors::OBSTACLE, "Obstacle"),
        );
        self.plot_circle(
            obstacle.center,
            obstacle.safe_radius(),
            &PathStyle::new(colors::SAFETY_MARGIN, "Safety disk").with_line_width(1.0),
        )
    }

    pub fn plot_points(&mut self, points: &[Point3D], style: &PointStyle) -> &mut Self {
        let x: Vec<f64> = points.iter().map(|p| p.x).collect();
        let y: Vec<f64> = points.iter().map(|p| p.y).collect();

        self.figure.axes2d()
            .points(&x, &y, &[
                Caption(&style.caption),
                Color(&style.color),
                PointSymbol(style.symbol),
                PointSize(style.size),
            ]);
        self
    }

    pub fn plot_targets<T>(&mut self, targets: &[Target<T>]) -> &mut Self {
        let positions: Vec<Point3D> = targets.iter().map(|t| t.position).collect();
        self.plot_points(&positions, &PointStyle::new(colors::TARGET, "Targets").with_symbol('S'))
    }

    pub fn plot_start(&mut self, point: Point3D) -> &mut Self {
        self.plot_points(&[point], &PointStyle::new(colors::START, "Start"))
    }

    /// Save plot to PNG file
    pub fn save_png(&mut self, path: &str, width: u32, height: u32) -> Result<(), String> {
        self.apply_settings();
        self.figure.save_to_png(path, width, height).map_err(|e| e.to_string())
    }

    fn polyline(&mut self, x: &[f64], y: &[f64], style: &PathStyle) -> &mut Self {
        self.figure.axes2d()
            .lines(x, y, &[
                Caption(&style.caption),
                Color(&style.color),
                LineWidth(style.line_width),
            ]);
        self
    }

    fn apply_settings(&mut self) {
        let axes = self.figure.axes2d();

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label("X [m]", &[]);
        axes.set_y_label("Y [m]", &[]);

        if let Some((min, max)) = self.x_range {
            axes.set_x_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some((min, max)) = self.y_range {
            axes.set_y_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        axes.set_aspect_ratio(AutoOption::Fix(1.0));
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Closed outline of a circle; the first and last samples coincide
fn circle_outline(center: Point2D, radius: f64) -> Vec<(f64, f64)> {
    (0..=CIRCLE_SEGMENTS)
        .map(|i| {
            let a = 2.0 * PI * i as f64 / CIRCLE_SEGMENTS as f64;
            (center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect()
}

impl Visualizable for Obstacle {
    fn visualize(&self, vis: &mut Visualizer) {
        vis.plot_obstacle(self);
    }
}

impl<T> Visualizable for TourPlan<T> {
    fn visualize(&self, vis: &mut Visualizer) {
        vis.plot_start(self.start);
        vis.plot_targets(self.tour.targets());
        for (i, path) in self.paths.iter().enumerate() {
            vis.plot_path(path, &PathStyle::for_leg(i, path));
        }
    }
}

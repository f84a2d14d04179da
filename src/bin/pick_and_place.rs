//! Pick and place planning demo
//!
//! Scatters cubes on a table, orders them nearest-first and plans a path
//! around the obstacle for each leg. The result is printed and plotted.

use rand::rngs::StdRng;
use rand::SeedableRng;

use pickup_planner::common::{Point2D, Point3D, ShapeKind, Visualizable, WorkspaceBounds};
use pickup_planner::layout::{LayoutConfig, LayoutGenerator};
use pickup_planner::mission_planning::PickupSequencer;
use pickup_planner::path_planning::{plan_tour, AvoidanceConfig, MiddleSegment, Obstacle, ObstacleAwarePlanner};
use pickup_planner::utils::Visualizer;

// Table area in front of the arm [m]
const TABLE: [f64; 6] = [-0.6, 0.6, -0.6, 0.6, 0.02, 0.3];
const NUM_CUBES: usize = 6;
const SEED: u64 = 20;

fn main() {
    println!("Pick and place planning start!!");

    let bounds = WorkspaceBounds::from_array(TABLE);
    let obstacle = Obstacle::new(Point2D::new(0.0, -0.3), 0.05, 0.01);
    let start = Point3D::new(0.0, 0.0, 0.1);

    let generator = LayoutGenerator::new(LayoutConfig::default().with_min_separation(0.15));
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut cubes = match generator.generate_targets(NUM_CUBES, &bounds, &mut rng, ShapeKind::cycle) {
        Ok(cubes) => cubes,
        Err(e) => {
            println!("Layout failed: {}", e);
            return;
        }
    };

    // Cubes dropped inside the safety disk cannot be reached
    let before = cubes.len();
    cubes.retain(|c| !obstacle.contains(&c.position.xy()));
    if cubes.len() < before {
        println!("Dropped {} cube(s) inside the safety disk", before - cubes.len());
    }

    for cube in &cubes {
        println!(
            "{:?} {} at ({:.3}, {:.3})",
            cube.tag, cube.id, cube.position.x, cube.position.y
        );
    }

    let planner = ObstacleAwarePlanner::new(
        obstacle,
        AvoidanceConfig::default()
            .with_resolution(40)
            .with_middle_segment(MiddleSegment::Arc),
    );

    match plan_tour(start, &cubes, &PickupSequencer::new(), &planner) {
        Ok(plan) => {
            println!("Visiting order: {:?}", plan.tour.ids());
            for (i, path) in plan.paths.iter().enumerate() {
                println!(
                    "Leg {}: {} waypoints, length {:.3} m, clearance {:.3} m",
                    i + 1,
                    path.len(),
                    path.total_length(),
                    path.min_clearance(&obstacle)
                );
            }
            println!(
                "{} detour(s), total length {:.3} m",
                plan.detour_count(),
                plan.total_length()
            );

            let mut vis = Visualizer::new();
            vis.set_title("Pick and Place Planning");
            vis.set_x_range(TABLE[0], TABLE[1]);
            vis.set_y_range(TABLE[2], TABLE[3]);
            obstacle.visualize(&mut vis);
            plan.visualize(&mut vis);

            if let Err(e) = std::fs::create_dir_all("img/pick_and_place") {
                println!("Cannot create output directory: {}", e);
                return;
            }
            match vis.save_png("img/pick_and_place/pick_and_place.png", 800, 800) {
                Ok(()) => println!("Plot saved to: img/pick_and_place/pick_and_place.png"),
                Err(e) => println!("Plot failed: {}", e),
            }
        }
        Err(e) => {
            println!("Planning failed: {}", e);
        }
    }

    println!("Pick and place planning finish!!");
}

//! End-to-end pick-up scenarios: layout, sequencing and leg planning together

use approx::assert_relative_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use pickup_planner::path_planning::segment_intersects_disk;
use pickup_planner::{
    plan_tour, AvoidanceConfig, LayoutConfig, LayoutGenerator, LegPlanner, Obstacle,
    ObstacleAwarePlanner, PickupSequencer, Point2D, Point3D, Target, WorkspaceBounds,
};

const RESOLUTION: usize = 30;

fn obstacle() -> Obstacle {
    Obstacle::new(Point2D::new(0.0, -0.3), 0.05, 0.01)
}

fn planner() -> ObstacleAwarePlanner {
    ObstacleAwarePlanner::new(obstacle(), AvoidanceConfig::default().with_resolution(RESOLUTION))
}

#[test]
fn leg_through_obstacle_gets_tangent_detour() {
    let from = Point3D::new(0.0, 0.0, 0.0);
    let to = Point3D::new(0.0, -0.6, 0.0);

    assert!(segment_intersects_disk(from.xy(), to.xy(), &obstacle()));

    let path = planner().plan_leg(from, to).unwrap();
    assert!(!path.is_direct());
    assert_eq!(path.len(), RESOLUTION);

    let tangents = planner().tangent_points(from.xy(), to.xy()).unwrap();
    let center = obstacle().center;
    assert_relative_eq!(tangents.entry.distance(&center), 0.06, max_relative = 1e-9);
    assert_relative_eq!(tangents.exit.distance(&center), 0.06, max_relative = 1e-9);
}

#[test]
fn clear_tour_uses_direct_legs() {
    let targets = vec![
        Target::untagged(0, Point3D::new(0.4, 0.2, 0.0)),
        Target::untagged(1, Point3D::new(0.1, 0.5, 0.0)),
        Target::untagged(2, Point3D::new(0.3, 0.3, 0.0)),
    ];
    let start = Point3D::origin();
    let plan = plan_tour(start, &targets, &PickupSequencer::new(), &planner()).unwrap();

    assert_eq!(plan.tour.ids(), vec![2, 0, 1]);
    assert_eq!(plan.detour_count(), 0);
    for (leg, path) in plan.legs().iter().zip(plan.paths.iter()) {
        assert!(obstacle().distance_to_segment(leg.from.xy(), leg.to.xy()) > 0.06);
        assert_eq!(path.len(), 2);
    }
}

#[test]
fn greedy_choice_is_locally_nearest() {
    let bounds = WorkspaceBounds::planar(-1.0, 1.0, -1.0, 1.0, 0.0);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let targets = LayoutGenerator::new(LayoutConfig::default().with_min_separation(0.05))
        .generate_targets(15, &bounds, &mut rng, |_| ())
        .unwrap();

    let start = Point3D::new(0.2, -0.1, 0.0);
    let tour = PickupSequencer::new().sequence(start, &targets);
    assert_eq!(tour.len(), targets.len());

    // Heuristic tour: each step is locally nearest, the total is not claimed optimal
    let mut current = start;
    let mut remaining: Vec<usize> = (0..targets.len()).collect();
    for chosen in tour.targets() {
        let chosen_distance = current.planar_distance(&chosen.position);
        for &i in &remaining {
            assert!(chosen_distance <= current.planar_distance(&targets[i].position) + 1e-12);
        }
        remaining.retain(|&i| targets[i].id != chosen.id);
        current = chosen.position;
    }
    assert!(remaining.is_empty());
}

#[test]
fn generated_layout_plans_end_to_end() {
    let bounds = WorkspaceBounds::planar(-0.6, 0.6, -0.6, 0.6, 0.02);
    let obstacle = obstacle();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut targets = LayoutGenerator::new(LayoutConfig::default().with_min_separation(0.15))
        .generate_targets(8, &bounds, &mut rng, |_| ())
        .unwrap();
    targets.retain(|t| !obstacle.contains(&t.position.xy()));

    let plan = plan_tour(Point3D::new(0.0, 0.0, 0.1), &targets, &PickupSequencer::new(), &planner()).unwrap();
    assert_eq!(plan.paths.len(), targets.len());
    for (leg, path) in plan.legs().iter().zip(plan.paths.iter()) {
        let first = path.first().unwrap();
        let last = path.last().unwrap();
        assert_relative_eq!(first.x, leg.from.x, epsilon = 1e-9);
        assert_relative_eq!(first.y, leg.from.y, epsilon = 1e-9);
        assert_relative_eq!(last.x, leg.to.x, epsilon = 1e-9);
        assert_relative_eq!(last.y, leg.to.y, epsilon = 1e-9);
        assert!(path.len() == 2 || path.len() == RESOLUTION);
        assert!(path.points.iter().all(|p| p.z == 0.1));
    }
}

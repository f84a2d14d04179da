// Path Planning algorithms module

pub mod obstacle_avoidance;
pub mod tour_planner;

pub use obstacle_avoidance::*;
pub use tour_planner::*;

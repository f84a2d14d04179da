//! Random non-overlapping placement of targets in a workspace
//!
//! Rejection sampling: each item is drawn uniformly from the workspace and
//! kept once it is at least `min_separation` away (in XY) from every item
//! already placed. All items share the workspace floor height so nothing is
//! stacked. When the attempt budget for an item runs out the
//! [`ExhaustionPolicy`] decides what happens.
//!
//! The random source is passed in, so a seeded generator reproduces the same
//! layout bit for bit.

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use tracing::warn;

use crate::common::{PlannerError, PlannerResult, Point3D, Target, WorkspaceBounds};

/// What to do when an item cannot be placed within its attempt budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExhaustionPolicy {
    /// Stop and return [`PlannerError::PartialLayout`] with the items placed so far
    FailFast,
    /// Keep the last sample even though it is too close to a neighbour
    BestEffort,
}

impl Default for ExhaustionPolicy {
    fn default() -> Self {
        ExhaustionPolicy::BestEffort
    }
}

/// Configuration for layout generation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig {
    /// Minimum planar distance between two items
    pub min_separation: f64,
    /// Samples drawn per item before the policy kicks in
    pub max_attempts_per_item: usize,
    pub policy: ExhaustionPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_separation: 0.1,
            max_attempts_per_item: 100,
            policy: ExhaustionPolicy::BestEffort,
        }
    }
}

impl LayoutConfig {
    pub fn with_min_separation(mut self, min_separation: f64) -> Self {
        self.min_separation = min_separation;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts_per_item: usize) -> Self {
        self.max_attempts_per_item = max_attempts_per_item;
        self
    }

    pub fn with_policy(mut self, policy: ExhaustionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn validate(&self) -> PlannerResult<()> {
        if !self.min_separation.is_finite() || self.min_separation < 0.0 {
            return Err(PlannerError::InvalidConfiguration(format!(
                "minimum separation must be finite and non-negative, got {}",
                self.min_separation
            )));
        }
        if self.max_attempts_per_item == 0 {
            return Err(PlannerError::InvalidConfiguration(
                "at least one placement attempt per item is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Rejection-sampling layout generator
#[derive(Debug, Clone, Default)]
pub struct LayoutGenerator {
    config: LayoutConfig,
}

impl LayoutGenerator {
    pub fn new(config: LayoutConfig) -> Self {
        LayoutGenerator { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Place `count` items inside `bounds`, drawing from `rng`
    pub fn generate<R: Rng + ?Sized>(
        &self,
        count: usize,
        bounds: &WorkspaceBounds,
        rng: &mut R,
    ) -> PlannerResult<Vec<Point3D>> {
        self.config.validate()?;
        bounds.validate()?;

        let x_dist = Uniform::new_inclusive(bounds.xmin, bounds.xmax);
        let y_dist = Uniform::new_inclusive(bounds.ymin, bounds.ymax);
        let z = bounds.zmin;

        let mut placed: Vec<Point3D> = Vec::with_capacity(count);
        for item in 0..count {
            let mut candidate = None;
            let mut last_sample = Point3D::new(bounds.xmin, bounds.ymin, z);

            for _ in 0..self.config.max_attempts_per_item {
                let sample = Point3D::new(x_dist.sample(rng), y_dist.sample(rng), z);
                if self.is_separated(&sample, &placed) {
                    candidate = Some(sample);
                    break;
                }
                last_sample = sample;
            }

            match (candidate, self.config.policy) {
                (Some(p), _) => placed.push(p),
                (None, ExhaustionPolicy::BestEffort) => {
                    warn!(
                        "item {} could not be placed {} apart after {} attempts, accepting overlapping position ({:.3}, {:.3})",
                        item, self.config.min_separation, self.config.max_attempts_per_item,
                        last_sample.x, last_sample.y
                    );
                    placed.push(last_sample);
                }
                (None, ExhaustionPolicy::FailFast) => {
                    return Err(PlannerError::PartialLayout { placed, requested: count });
                }
            }
        }

        Ok(placed)
    }

    /// Like [`generate`](Self::generate), wrapping each position in a
    /// [`Target`] with id `0..count` and the tag produced by `tag_fn`.
    pub fn generate_targets<T, R, F>(
        &self,
        count: usize,
        bounds: &WorkspaceBounds,
        rng: &mut R,
        mut tag_fn: F,
    ) -> PlannerResult<Vec<Target<T>>>
    where
        R: Rng + ?Sized,
        F: FnMut(usize) -> T,
    {
        let positions = self.generate(count, bounds, rng)?;
        Ok(positions
            .into_iter()
            .enumerate()
            .map(|(id, position)| Target::new(id, position, tag_fn(id)))
            .collect())
    }

    fn is_separated(&self, sample: &Point3D, placed: &[Point3D]) -> bool {
        placed
            .iter()
            .all(|p| p.planar_distance(sample) >= self.config.min_separation)
    }
}

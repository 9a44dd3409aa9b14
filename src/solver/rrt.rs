//! [RRT](https://en.wikipedia.org/wiki/Rapidly_exploring_random_tree) over the free cells of a
//! grid. The tree lives in continuous space; a position is blocked when the cell it rounds to is
//! an obstacle or outside the grid.
use grid_util::point::Point;
use itertools::Itertools;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pathing_grid::PathingGrid;
use crate::solver::{SearchResult, Solver};
use crate::tree::{segment_is_free, Position, Tree};
use crate::{
    DEFAULT_GOAL_BIAS, DEFAULT_GOAL_TOLERANCE, DEFAULT_MAX_ITERATIONS, DEFAULT_REWIRE_RADIUS,
    DEFAULT_STEP_SIZE,
};

/// Configuration shared by [RrtSolver] and [RrtStarSolver](super::rrt_star::RrtStarSolver).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RrtConfig {
    /// Sampling iterations before giving up.
    pub max_iterations: usize,
    /// Probability of sampling the goal instead of a random cell.
    pub goal_bias: f64,
    /// Distance every extension moves from the nearest tree node.
    pub step_size: f64,
    /// A node strictly closer than this to the goal completes the path.
    pub goal_tolerance: f64,
    /// Neighbourhood considered by RRT* for parent choice and rewiring.
    pub rewire_radius: f64,
    /// Seed for the sampler, [None] draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for RrtConfig {
    fn default() -> Self {
        RrtConfig {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            goal_bias: DEFAULT_GOAL_BIAS,
            step_size: DEFAULT_STEP_SIZE,
            goal_tolerance: DEFAULT_GOAL_TOLERANCE,
            rewire_radius: DEFAULT_REWIRE_RADIUS,
            seed: None,
        }
    }
}

impl RrtConfig {
    pub fn with_seed(seed: u64) -> RrtConfig {
        RrtConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// `goal_bias` as a probability. NaN counts as 0.
    pub fn goal_probability(&self) -> f64 {
        if self.goal_bias.is_nan() {
            0.0
        } else {
            self.goal_bias.clamp(0.0, 1.0)
        }
    }

    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RrtSolver {
    pub config: RrtConfig,
}

impl RrtSolver {
    pub fn new(config: RrtConfig) -> RrtSolver {
        RrtSolver { config }
    }
}

impl Solver for RrtSolver {
    fn name(&self) -> &'static str {
        "RRT"
    }

    fn solve(&self, grid: &PathingGrid, start: Point, goal: Point) -> SearchResult {
        grow_tree(grid, start, goal, &self.config, |tree, nearest, position| {
            tree.push(position, nearest)
        })
    }
}

/// The goal with probability `goal_bias`, otherwise a uniformly drawn cell.
fn sample_target<R: Rng>(rng: &mut R, grid: &PathingGrid, goal: &Position, bias: f64) -> Position {
    if rng.gen_bool(bias) {
        *goal
    } else {
        Position::new(
            rng.gen_range(0..grid.width()) as f64,
            rng.gen_range(0..grid.height()) as f64,
        )
    }
}

/// Sampling loop shared by RRT and RRT*. `insert` attaches an accepted position to the tree
/// given the index of its nearest node, and returns the index of the new node.
pub(crate) fn grow_tree<FI>(
    grid: &PathingGrid,
    start: Point,
    goal: Point,
    config: &RrtConfig,
    mut insert: FI,
) -> SearchResult
where
    FI: FnMut(&mut Tree, usize, Position) -> usize,
{
    let goal_position = Position::from_point(goal);
    let mut tree = Tree::new(Position::from_point(start));
    if start == goal {
        return tree_result(&tree, Some(0), start, goal, 0);
    }
    let mut rng = config.rng();
    let goal_probability = config.goal_probability();
    if config.goal_bias.is_nan() {
        warn!("Goal bias is NaN, sampling without goal bias");
    }

    for iteration in 1..=config.max_iterations {
        let target = sample_target(&mut rng, grid, &goal_position, goal_probability);
        let nearest = tree.nearest(&target);
        let position = match tree.node(nearest).position.step_towards(&target, config.step_size) {
            Some(position) if position.is_free(grid) => position,
            // Zero-length step or blocked landing spot
            _ => continue,
        };
        let ix = insert(&mut tree, nearest, position);
        let distance = position.distance(&goal_position);
        if distance == 0.0 {
            return tree_result(&tree, Some(ix), start, goal, iteration);
        }
        // The final hop can be longer than a step
        if distance < config.goal_tolerance && segment_is_free(grid, &position, &goal_position) {
            let terminal = tree.push(goal_position, ix);
            return tree_result(&tree, Some(terminal), start, goal, iteration);
        }
    }
    warn!(
        "No path from {} to {} within {} iterations",
        start, goal, config.max_iterations
    );
    tree_result(&tree, None, start, goal, config.max_iterations)
}

fn tree_result(
    tree: &Tree,
    terminal: Option<usize>,
    start: Point,
    goal: Point,
    iterations: usize,
) -> SearchResult {
    let waypoints = terminal.map(|ix| tree.path_to(ix)).unwrap_or_default();
    let path = waypoints.iter().map(Position::cell).dedup().collect::<Vec<_>>();
    debug!(
        "Grew {} tree nodes in {} iterations, path of {} waypoints",
        tree.len(),
        iterations,
        waypoints.len()
    );
    SearchResult {
        path,
        waypoints,
        visited: tree
            .nodes()
            .iter()
            .map(|node| node.position.cell())
            .unique()
            .filter(|&p| p != start && p != goal)
            .collect(),
        expanded: iterations,
    }
}

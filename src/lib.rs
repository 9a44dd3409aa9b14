//! # grid_planners
//!
//! Path planning on a 4-connected occupancy grid. A [PathingGrid] holds obstacle flags and the
//! designated start and end cells; [search] runs one of six interchangeable strategies on it:
//!
//! - [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the Manhattan heuristic,
//! - [Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm),
//! - breadth-first and depth-first search,
//! - [RRT](https://en.wikipedia.org/wiki/Rapidly_exploring_random_tree) and RRT*, which grow a
//!   tree of continuous positions by random sampling.
//!
//! Every search owns its scratch state, so a grid can be searched repeatedly (or by several
//! algorithms in turn) without resetting anything. Connected components of the free cells are
//! maintained alongside the grid and can be used to skip searches that cannot succeed.
//!
//! ```
//! use grid_planners::{search, Algorithm, PathingGrid};
//!
//! let mut grid = PathingGrid::new(3, 3);
//! grid.set_obstacle(1, 1, true).unwrap();
//! grid.set_start(0, 0).unwrap();
//! grid.set_end(2, 2).unwrap();
//! let result = search(&grid, Algorithm::AStar).unwrap();
//! assert_eq!(result.path.len(), 5);
//! ```
pub mod error;
pub mod pathing_grid;
pub mod priority_queue;
pub mod search_context;
pub mod solver;
pub mod tree;

use core::fmt;
use std::str::FromStr;

use grid_util::point::Point;
use itertools::Itertools;
use log::{info, warn};

pub use crate::error::{PathfindingError, Result};
pub use crate::pathing_grid::PathingGrid;
pub use crate::priority_queue::PriorityQueue;
pub use crate::solver::astar::AstarSolver;
pub use crate::solver::bfs::BfsSolver;
pub use crate::solver::dfs::DfsSolver;
pub use crate::solver::dijkstra::DijkstraSolver;
pub use crate::solver::rrt::{RrtConfig, RrtSolver};
pub use crate::solver::rrt_star::RrtStarSolver;
pub use crate::solver::{SearchResult, Solver};
pub use crate::tree::{Position, Tree, TreeNode};

const HEURISTIC_FACTOR: f32 = 1.0;

pub const DEFAULT_MAX_ITERATIONS: usize = 5000;
pub const DEFAULT_GOAL_BIAS: f64 = 0.1;
pub const DEFAULT_STEP_SIZE: f64 = 1.0;
pub const DEFAULT_GOAL_TOLERANCE: f64 = 1.0;
pub const DEFAULT_REWIRE_RADIUS: f64 = 5.0;

/// The available search strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[cfg_attr(feature = "serde", serde(rename = "aStar"))]
    AStar,
    #[cfg_attr(feature = "serde", serde(rename = "dijkstra"))]
    Dijkstra,
    #[cfg_attr(feature = "serde", serde(rename = "bfs"))]
    Bfs,
    #[cfg_attr(feature = "serde", serde(rename = "dfs"))]
    Dfs,
    #[cfg_attr(feature = "serde", serde(rename = "rrt"))]
    Rrt,
    #[cfg_attr(feature = "serde", serde(rename = "rrtStar"))]
    RrtStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::AStar,
        Algorithm::Dijkstra,
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Rrt,
        Algorithm::RrtStar,
    ];

    /// The identifier [FromStr] accepts.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::AStar => "aStar",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Rrt => "rrt",
            Algorithm::RrtStar => "rrtStar",
        }
    }

    /// Whether the strategy always returns a shortest path when one exists.
    pub fn is_optimal(&self) -> bool {
        matches!(
            self,
            Algorithm::AStar | Algorithm::Dijkstra | Algorithm::Bfs
        )
    }

    /// Whether the strategy samples randomly and may miss existing paths.
    pub fn is_sampling(&self) -> bool {
        matches!(self, Algorithm::Rrt | Algorithm::RrtStar)
    }

    /// A solver for this strategy configured from `options`.
    pub fn solver(&self, options: &SearchOptions) -> Box<dyn Solver> {
        let config = &options.rrt;
        match self {
            Algorithm::AStar => Box::new(AstarSolver {
                heuristic_factor: options.heuristic_factor,
            }),
            Algorithm::Dijkstra => Box::new(DijkstraSolver),
            Algorithm::Bfs => Box::new(BfsSolver),
            Algorithm::Dfs => Box::new(DfsSolver),
            Algorithm::Rrt => Box::new(RrtSolver::new(config.clone())),
            Algorithm::RrtStar => Box::new(RrtStarSolver::new(config.clone())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = PathfindingError;

    fn from_str(s: &str) -> Result<Algorithm> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| PathfindingError::UnknownAlgorithm(s.to_owned()))
    }
}

/// Options for [search_with].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchOptions {
    /// Parameters of the sampling planners.
    pub rrt: RrtConfig,
    /// Return an empty result right away if the components show the goal is unreachable.
    /// Has no effect while the grid's components are dirty.
    pub component_check: bool,
    /// Heuristic scale used by A*, see [AstarSolver::heuristic_factor].
    pub heuristic_factor: f32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            rrt: RrtConfig::default(),
            component_check: false,
            heuristic_factor: HEURISTIC_FACTOR,
        }
    }
}

/// Runs `algorithm` from the grid's start to its end with default options.
pub fn search(grid: &PathingGrid, algorithm: Algorithm) -> Result<SearchResult> {
    search_with(grid, algorithm, &SearchOptions::default())
}

/// Runs `algorithm` from the grid's start to its end. Fails if either endpoint is missing or
/// blocked; an unreachable goal is reported as an empty path instead.
pub fn search_with(
    grid: &PathingGrid,
    algorithm: Algorithm,
    options: &SearchOptions,
) -> Result<SearchResult> {
    let (start, end) = grid.endpoints().map_err(|e| {
        warn!("Refusing to run {}: {}", algorithm, e);
        e
    })?;
    if options.component_check && !grid.components_dirty && grid.unreachable(&start, &end) {
        info!("{} is not reachable from {}", end, start);
        return Ok(SearchResult::default());
    }
    let solver = algorithm.solver(options);
    info!("Running {} from {} to {}", solver.name(), start, end);
    let result = solver.solve(grid, start, end);
    if result.is_found() {
        info!("{} found a path of {} cells", solver.name(), result.len());
    } else {
        info!("{} found no path", solver.name());
    }
    Ok(result)
}

/// Number of unit steps along a cell path, 0 for an empty or single-cell path.
pub fn path_cost(path: &[Point]) -> i32 {
    path.iter()
        .tuple_windows()
        .map(|(a, b)| a.manhattan_distance(b))
        .sum()
}

/// Euclidean length of a waypoint path.
pub fn waypoint_cost(waypoints: &[Position]) -> f64 {
    waypoints
        .iter()
        .tuple_windows()
        .map(|(a, b)| a.distance(b))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_grid() -> PathingGrid {
        let mut grid = PathingGrid::new(5, 5);
        grid.set_start(0, 0).unwrap();
        grid.set_end(4, 4).unwrap();
        grid
    }

    #[test]
    fn names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
            assert_eq!(algorithm.to_string(), algorithm.name());
        }
        assert_eq!(
            "astar".parse::<Algorithm>(),
            Err(PathfindingError::UnknownAlgorithm("astar".to_owned()))
        );
    }

    #[test]
    fn search_requires_endpoints() {
        let mut grid = PathingGrid::new(3, 3);
        grid.set_end(2, 2).unwrap();
        for algorithm in Algorithm::ALL {
            assert_eq!(
                search(&grid, algorithm),
                Err(PathfindingError::NotReady {
                    missing_start: true,
                    missing_end: false
                })
            );
        }
    }

    #[test]
    fn search_rejects_blocked_endpoint() {
        let mut grid = ready_grid();
        grid.set_obstacle(0, 0, true).unwrap();
        assert_eq!(
            search(&grid, Algorithm::Bfs),
            Err(PathfindingError::Blocked {
                point: Point::new(0, 0)
            })
        );
    }

    #[test]
    fn every_algorithm_finds_the_corner() {
        let grid = ready_grid();
        let options = SearchOptions {
            rrt: RrtConfig::with_seed(0),
            ..Default::default()
        };
        for algorithm in Algorithm::ALL {
            let result = search_with(&grid, algorithm, &options).unwrap();
            assert_eq!(result.path.first(), Some(&Point::new(0, 0)));
            assert_eq!(result.path.last(), Some(&Point::new(4, 4)));
            if algorithm.is_optimal() {
                assert_eq!(path_cost(&result.path), 8);
            }
        }
    }

    #[test]
    fn component_check_skips_hopeless_search() {
        let mut grid = ready_grid();
        for y in 0..5 {
            grid.set_obstacle(2, y, true).unwrap();
        }
        grid.update();
        let options = SearchOptions {
            component_check: true,
            ..Default::default()
        };
        let result = search_with(&grid, Algorithm::Rrt, &options).unwrap();
        assert_eq!(result, SearchResult::default());
        let unchecked = search_with(&grid, Algorithm::Bfs, &SearchOptions::default()).unwrap();
        assert!(!unchecked.is_found());
        assert!(!unchecked.visited.is_empty());
    }

    #[test]
    fn costs() {
        let path = [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)];
        assert_eq!(path_cost(&path), 2);
        assert_eq!(path_cost(&path[..1]), 0);
        let waypoints = [Position::new(0.0, 0.0), Position::new(3.0, 4.0)];
        assert!((waypoint_cost(&waypoints) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn heuristic_factor_reaches_astar() {
        // |S......|
        // |.#####.|
        // |......E|
        let mut grid = PathingGrid::new(7, 3);
        for x in 1..6 {
            grid.set_obstacle(x, 1, true).unwrap();
        }
        grid.set_start(0, 0).unwrap();
        grid.set_end(6, 2).unwrap();
        let admissible = search(&grid, Algorithm::AStar).unwrap();
        let options = SearchOptions {
            heuristic_factor: 0.0,
            ..Default::default()
        };
        let uninformed = search_with(&grid, Algorithm::AStar, &options).unwrap();
        assert_eq!(path_cost(&admissible.path), 8);
        assert_eq!(path_cost(&uninformed.path), 8);
        // With no heuristic A* expands like Dijkstra
        let dijkstra = search(&grid, Algorithm::Dijkstra).unwrap();
        assert_eq!(uninformed.expanded, dijkstra.expanded);
        assert!(admissible.expanded < uninformed.expanded);
    }
}

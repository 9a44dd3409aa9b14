use grid_util::point::Point;

use crate::pathing_grid::PathingGrid;
use crate::solver::{best_first, SearchResult, Solver};

/// A* with the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as
/// heuristic, which is admissible on a 4-connected unit-cost grid.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    /// Scales the heuristic. Values above 1 expand fewer cells but may return longer paths.
    pub heuristic_factor: f32,
}

impl Default for AstarSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: crate::HEURISTIC_FACTOR,
        }
    }

    /// Just the Manhattan distance times the heuristic factor.
    pub fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        (p1.manhattan_distance(p2) as f32 * self.heuristic_factor) as i32
    }
}

impl Solver for AstarSolver {
    fn name(&self) -> &'static str {
        "A*"
    }

    fn solve(&self, grid: &PathingGrid, start: Point, goal: Point) -> SearchResult {
        best_first(grid, start, goal, |p| self.heuristic(p, &goal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::test_util::*;

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let grid = PathingGrid::new(1, 1);
        let start = Point::new(0, 0);
        let result = AstarSolver::new().solve(&grid, start, start);
        assert_eq!(result.path, vec![start]);
        assert!(result.visited.is_empty());
    }

    /// The monotone staircase along the top row and down the right column.
    #[test]
    fn open_grid_staircase() {
        let grid = PathingGrid::new(5, 5);
        let result = AstarSolver::new().solve(&grid, Point::new(0, 0), Point::new(4, 4));
        assert_eq!(
            result.path,
            points(&[
                (0, 0),
                (1, 0),
                (2, 0),
                (3, 0),
                (4, 0),
                (4, 1),
                (4, 2),
                (4, 3),
                (4, 4)
            ])
        );
    }

    /// Asserts that the optimal 4 step solution is found.
    #[test]
    fn solve_simple_problem() {
        let mut grid = PathingGrid::new(3, 3);
        grid.set_obstacle(1, 1, true).unwrap();
        let start = Point::new(0, 0);
        let end = Point::new(2, 2);
        let result = AstarSolver::new().solve(&grid, start, end);
        assert_eq!(result.len(), 5);
        assert!(!result.path.contains(&Point::new(1, 1)));
        assert_valid_grid_path(&grid, &result.path, start, end);
    }

    #[test]
    fn test_complex() {
        let mut grid = PathingGrid::new(10, 10);
        for (x, y) in [(1, 1), (5, 0), (0, 5), (8, 8)] {
            grid.set_obstacle(x, y, true).unwrap();
        }
        let start = Point::new(0, 0);
        let end = Point::new(7, 7);
        let result = AstarSolver::new().solve(&grid, start, end);
        assert_eq!(result.len(), 15);
        assert_valid_grid_path(&grid, &result.path, start, end);
    }

    #[test]
    fn heuristic_guides_expansion() {
        // Without obstacles A* only expands cells on the path
        let grid = PathingGrid::new(10, 10);
        let astar = AstarSolver::new().solve(&grid, Point::new(0, 0), Point::new(9, 0));
        assert_eq!(astar.expanded, 10);
        let mut greedy = AstarSolver::new();
        greedy.heuristic_factor = 2.0;
        assert_eq!(greedy.heuristic(&Point::new(0, 0), &Point::new(2, 3)), 10);
    }

    #[test]
    fn walled_off_goal() {
        let grid = walled_grid();
        let result = AstarSolver::new().solve(&grid, Point::new(0, 0), Point::new(4, 4));
        assert!(!result.is_found());
        // Every cell left of the wall was reached
        assert_eq!(result.visited.len(), 9);
    }
}

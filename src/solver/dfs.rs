use grid_util::point::Point;

use crate::pathing_grid::PathingGrid;
use crate::solver::{uninformed, SearchResult, Solver};

/// Depth-first search. Returns the first path found by following the most recently discovered
/// cell, which is generally not the shortest one.
#[derive(Clone, Debug, Default)]
pub struct DfsSolver;

impl Solver for DfsSolver {
    fn name(&self) -> &'static str {
        "DFS"
    }

    fn solve(&self, grid: &PathingGrid, start: Point, goal: Point) -> SearchResult {
        uninformed(grid, start, goal, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::bfs::BfsSolver;
    use crate::solver::test_util::*;

    #[test]
    fn dives_down_first() {
        // The last enumerated neighbour (down) is popped first
        let grid = PathingGrid::new(3, 3);
        let start = Point::new(0, 0);
        let end = Point::new(2, 0);
        let result = DfsSolver.solve(&grid, start, end);
        assert_valid_grid_path(&grid, &result.path, start, end);
        assert_eq!(result.path[1], Point::new(0, 1));
        let bfs = BfsSolver.solve(&grid, start, end);
        assert!(result.len() > bfs.len());
    }

    #[test]
    fn corridor() {
        let mut grid = PathingGrid::new(4, 3);
        for x in 0..4 {
            grid.set_obstacle(x, 1, true).unwrap();
        }
        grid.set_obstacle(3, 1, false).unwrap();
        let start = Point::new(0, 0);
        let end = Point::new(0, 2);
        let result = DfsSolver.solve(&grid, start, end);
        assert_eq!(
            result.path,
            points(&[(0, 0), (1, 0), (2, 0), (3, 0), (3, 1), (3, 2), (2, 2), (1, 2), (0, 2)])
        );
    }

    #[test]
    fn repeated_runs_agree() {
        let mut grid = PathingGrid::new(6, 6);
        grid.set_obstacle(2, 2, true).unwrap();
        grid.set_obstacle(3, 2, true).unwrap();
        let start = Point::new(0, 0);
        let end = Point::new(5, 5);
        let first = DfsSolver.solve(&grid, start, end);
        let second = DfsSolver.solve(&grid, start, end);
        assert_eq!(first, second);
        assert_valid_grid_path(&grid, &first.path, start, end);
    }

    #[test]
    fn walled_off_goal() {
        let grid = walled_grid();
        let result = DfsSolver.solve(&grid, Point::new(0, 0), Point::new(4, 4));
        assert!(result.path.is_empty());
    }
}

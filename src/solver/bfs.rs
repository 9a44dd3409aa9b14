use grid_util::point::Point;
use std::collections::VecDeque;

use crate::pathing_grid::PathingGrid;
use crate::solver::{uninformed, SearchResult, Solver};

/// Breadth-first search. Expands cells level by level, so the first path reaching the goal has
/// the fewest steps.
#[derive(Clone, Debug, Default)]
pub struct BfsSolver;

impl Solver for BfsSolver {
    fn name(&self) -> &'static str {
        "BFS"
    }

    fn solve(&self, grid: &PathingGrid, start: Point, goal: Point) -> SearchResult {
        uninformed(grid, start, goal, VecDeque::new())
    }
}

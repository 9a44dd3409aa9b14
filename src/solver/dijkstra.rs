use grid_util::point::Point;

use crate::pathing_grid::PathingGrid;
use crate::solver::{best_first, SearchResult, Solver};

/// Uniform-cost search: best-first expansion on cost from the start alone.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl Solver for DijkstraSolver {
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn solve(&self, grid: &PathingGrid, start: Point, goal: Point) -> SearchResult {
        best_first(grid, start, goal, |_| 0)
    }
}

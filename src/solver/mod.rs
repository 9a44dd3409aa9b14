use crate::pathing_grid::PathingGrid;
use crate::priority_queue::PriorityQueue;
use crate::search_context::SearchContext;
use crate::tree::Position;
use grid_util::point::Point;
use log::debug;
use std::collections::VecDeque;

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod rrt;
pub mod rrt_star;

/// Outcome of a single search. An empty `path` means no path was found.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResult {
    /// Cells from start to goal, both inclusive.
    pub path: Vec<Point>,
    /// Continuous tree path of the sampling planners, empty for the graph searches.
    pub waypoints: Vec<Position>,
    /// Cells reached by the search in discovery order, start and goal excluded.
    pub visited: Vec<Point>,
    /// Frontier pops for graph searches, iterations for sampling planners.
    pub expanded: usize,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of cells on the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// A strategy computing a path between two free cells of a [PathingGrid].
pub trait Solver {
    fn name(&self) -> &'static str;

    fn solve(&self, grid: &PathingGrid, start: Point, goal: Point) -> SearchResult;
}

/// Best-first expansion shared by A* and Dijkstra. The frontier is ordered by `(f, h)` and then
/// by insertion, so among equally promising cells the one closer to the goal is expanded first.
/// A cell's parent and cost are only replaced when a strictly cheaper route is found.
pub(crate) fn best_first<FH>(
    grid: &PathingGrid,
    start: Point,
    goal: Point,
    mut heuristic: FH,
) -> SearchResult
where
    FH: FnMut(&Point) -> i32,
{
    let mut context: SearchContext<i32> = SearchContext::new(grid);
    let mut frontier: PriorityQueue<usize, (i32, i32)> = PriorityQueue::new();
    let start_ix = grid.index_of(start);
    let goal_ix = grid.index_of(goal);
    context.discover_root(start_ix);
    frontier.insert(start_ix, (0, 0));
    let mut expanded = 0;

    while let Some(current) = frontier.extract_min() {
        expanded += 1;
        if current == goal_ix {
            return graph_result(grid, &context, start, goal, Some(current), expanded);
        }
        context.close(current);
        let current_g = context.get(current).g;
        for neighbour in grid.free_neighbours(&grid.point_of(current)) {
            let n_ix = grid.index_of(neighbour);
            if context.is_closed(n_ix) {
                continue;
            }
            let tentative_g = current_g + 1;
            if frontier.contains(&n_ix) && tentative_g >= context.get(n_ix).g {
                continue;
            }
            let h = heuristic(&neighbour);
            context.relax(n_ix, current, tentative_g, h);
            frontier.insert(n_ix, (tentative_g + h, h));
        }
    }
    graph_result(grid, &context, start, goal, None, expanded)
}

/// Frontier discipline of the uninformed searches.
pub(crate) trait Frontier {
    fn push(&mut self, ix: usize);
    fn pop(&mut self) -> Option<usize>;
}

/// First in, first out: breadth-first.
impl Frontier for VecDeque<usize> {
    fn push(&mut self, ix: usize) {
        self.push_back(ix);
    }
    fn pop(&mut self) -> Option<usize> {
        self.pop_front()
    }
}

/// Last in, first out: depth-first.
impl Frontier for Vec<usize> {
    fn push(&mut self, ix: usize) {
        Vec::push(self, ix);
    }
    fn pop(&mut self) -> Option<usize> {
        Vec::pop(self)
    }
}

/// Expansion shared by BFS and DFS. Cells are marked visited when they enter the frontier and
/// their parent is never revised afterwards.
pub(crate) fn uninformed<F: Frontier>(
    grid: &PathingGrid,
    start: Point,
    goal: Point,
    mut frontier: F,
) -> SearchResult {
    let mut context: SearchContext<i32> = SearchContext::new(grid);
    let start_ix = grid.index_of(start);
    let goal_ix = grid.index_of(goal);
    context.discover_root(start_ix);
    frontier.push(start_ix);
    let mut expanded = 0;

    while let Some(current) = frontier.pop() {
        expanded += 1;
        if current == goal_ix {
            return graph_result(grid, &context, start, goal, Some(current), expanded);
        }
        let depth = context.get(current).g + 1;
        for neighbour in grid.free_neighbours(&grid.point_of(current)) {
            let n_ix = grid.index_of(neighbour);
            if !context.is_discovered(n_ix) {
                context.relax(n_ix, current, depth, 0);
                frontier.push(n_ix);
            }
        }
    }
    graph_result(grid, &context, start, goal, None, expanded)
}

fn graph_result(
    grid: &PathingGrid,
    context: &SearchContext<i32>,
    start: Point,
    goal: Point,
    terminal: Option<usize>,
    expanded: usize,
) -> SearchResult {
    let path = terminal
        .map(|ix| context.reconstruct_points(grid, ix))
        .unwrap_or_default();
    debug!(
        "Expanded {} cells and discovered {}, path of {} cells",
        expanded,
        context.discovered_count(),
        path.len()
    );
    SearchResult {
        path,
        waypoints: Vec::new(),
        visited: context.visited(grid, start, goal),
        expanded,
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;
    use itertools::Itertools;

    /// Asserts that a graph-search path runs from start to goal through free, adjacent cells.
    pub fn assert_valid_grid_path(grid: &PathingGrid, path: &[Point], start: Point, goal: Point) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert!(path.iter().all(|p| grid.is_free(*p)));
        for (a, b) in path.iter().tuple_windows() {
            assert_eq!(a.manhattan_distance(b), 1, "{a} -> {b}");
        }
    }

    pub fn points(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    /// Start and goal separated by a full wall in column 2 of a 5x5 grid.
    pub fn walled_grid() -> PathingGrid {
        let mut grid = PathingGrid::new(5, 5);
        for y in 0..5 {
            grid.set_obstacle(2, y, true).unwrap();
        }
        grid.update();
        grid
    }
}

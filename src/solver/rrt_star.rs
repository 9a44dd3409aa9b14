use grid_util::point::Point;

use crate::pathing_grid::PathingGrid;
use crate::solver::rrt::{grow_tree, RrtConfig};
use crate::solver::{SearchResult, Solver};
use crate::tree::{segment_is_free, Position, Tree};

/// RRT* grows the same tree as [RrtSolver](super::rrt::RrtSolver) but attaches every new node
/// to the cheapest collision-free parent within `rewire_radius`, then re-parents nearby nodes
/// through it where that shortens their route to the root.
#[derive(Clone, Debug, Default)]
pub struct RrtStarSolver {
    pub config: RrtConfig,
}

impl RrtStarSolver {
    pub fn new(config: RrtConfig) -> RrtStarSolver {
        RrtStarSolver { config }
    }

    /// Near node minimising the cost through it, the nearest node if none connects.
    fn choose_parent(
        grid: &PathingGrid,
        tree: &Tree,
        near: &[usize],
        nearest: usize,
        position: &Position,
    ) -> usize {
        let mut best = None;
        let mut min_cost = f64::INFINITY;
        for &candidate in near {
            let node = tree.node(candidate);
            let cost = node.cost + node.position.distance(position);
            if cost < min_cost && segment_is_free(grid, &node.position, position) {
                min_cost = cost;
                best = Some(candidate);
            }
        }
        best.unwrap_or(nearest)
    }

    fn rewire(grid: &PathingGrid, tree: &mut Tree, near: &[usize], new_ix: usize) {
        for &other in near {
            let new_node = *tree.node(new_ix);
            if Some(other) == new_node.parent {
                continue;
            }
            let other_node = tree.node(other);
            let cost = new_node.cost + new_node.position.distance(&other_node.position);
            if cost < other_node.cost
                && !tree.is_ancestor(other, new_ix)
                && segment_is_free(grid, &new_node.position, &other_node.position)
            {
                tree.reparent(other, new_ix);
            }
        }
    }
}

impl Solver for RrtStarSolver {
    fn name(&self) -> &'static str {
        "RRT*"
    }

    fn solve(&self, grid: &PathingGrid, start: Point, goal: Point) -> SearchResult {
        let radius = self.config.rewire_radius;
        grow_tree(grid, start, goal, &self.config, |tree, nearest, position| {
            let near = tree.near(&position, radius);
            let parent = Self::choose_parent(grid, tree, &near, nearest, &position);
            let ix = tree.push(position, parent);
            Self::rewire(grid, tree, &near, ix);
            ix
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::rrt::tests::assert_valid_tree_path;
    use crate::solver::rrt::RrtSolver;
    use crate::solver::test_util::*;
    use crate::waypoint_cost;

    #[test]
    fn finds_path_on_open_grid() {
        let grid = PathingGrid::new(10, 10);
        let start = Point::new(0, 0);
        let goal = Point::new(9, 9);
        let result = RrtStarSolver::new(RrtConfig::with_seed(0)).solve(&grid, start, goal);
        assert!(result.is_found());
        assert_valid_tree_path(&grid, &result, start, goal);
        // Nothing beats the straight line
        let straight = 9f64.hypot(9.0);
        assert!(waypoint_cost(&result.waypoints) >= straight - 1e-9);
    }

    #[test]
    fn parent_choice_prefers_cheaper_route() {
        // Root at the origin with a detour branch; the new node should hang off the root
        let grid = PathingGrid::new(6, 6);
        let mut tree = Tree::new(Position::new(0.0, 0.0));
        let a = tree.push(Position::new(0.0, 2.0), 0);
        let b = tree.push(Position::new(1.0, 2.0), a);
        let target = Position::new(1.0, 1.0);
        let near = tree.near(&target, 5.0);
        assert_eq!(near, vec![0, a, b]);
        assert_eq!(RrtStarSolver::choose_parent(&grid, &tree, &near, b, &target), 0);
    }

    #[test]
    fn parent_choice_respects_obstacles() {
        let mut grid = PathingGrid::new(6, 6);
        grid.set_obstacle(2, 0, true).unwrap();
        let mut tree = Tree::new(Position::new(0.0, 0.0));
        let a = tree.push(Position::new(0.0, 1.0), 0);
        let b = tree.push(Position::new(1.0, 1.0), a);
        let c = tree.push(Position::new(2.0, 1.0), b);
        let target = Position::new(3.0, 0.0);
        let near = tree.near(&target, 5.0);
        // Segments from the root, a and b all clip (2, 0)
        assert_eq!(RrtStarSolver::choose_parent(&grid, &tree, &near, 0, &target), c);
    }

    #[test]
    fn rewire_shortens_existing_nodes() {
        let grid = PathingGrid::new(6, 6);
        let mut tree = Tree::new(Position::new(0.0, 0.0));
        let a = tree.push(Position::new(0.0, 3.0), 0);
        let b = tree.push(Position::new(3.0, 3.0), a);
        let c = tree.push(Position::new(3.0, 2.0), b);
        // A new node next to the root offers a shortcut to b and c
        let n = tree.push(Position::new(2.0, 1.0), 0);
        let near = tree.near(&Position::new(2.0, 1.0), 5.0);
        let before = tree.node(c).cost;
        RrtStarSolver::rewire(&grid, &mut tree, &near, n);
        assert_eq!(tree.node(c).parent, Some(n));
        assert!(tree.node(c).cost < before);
        assert_eq!(tree.node(b).parent, Some(n));
        assert!(tree.node(b).cost < 6.0);
        assert_eq!(tree.node(a).parent, Some(0));
    }

    #[test]
    fn not_longer_than_rrt_on_average() {
        let mut grid = PathingGrid::new(12, 12);
        for y in 0..9 {
            grid.set_obstacle(6, y, true).unwrap();
        }
        let start = Point::new(0, 0);
        let goal = Point::new(11, 0);
        let mut rrt_total = 0.0;
        let mut star_total = 0.0;
        for seed in 0..10 {
            let config = RrtConfig::with_seed(seed);
            let rrt = RrtSolver::new(config.clone()).solve(&grid, start, goal);
            let star = RrtStarSolver::new(config).solve(&grid, start, goal);
            assert!(rrt.is_found() && star.is_found());
            assert_valid_tree_path(&grid, &star, start, goal);
            rrt_total += waypoint_cost(&rrt.waypoints);
            star_total += waypoint_cost(&star.waypoints);
        }
        assert!(star_total <= rrt_total);
    }

    #[test]
    fn walled_off_goal() {
        let grid = walled_grid();
        let config = RrtConfig {
            max_iterations: 300,
            ..RrtConfig::with_seed(5)
        };
        let result = RrtStarSolver::new(config).solve(&grid, Point::new(0, 0), Point::new(4, 4));
        assert!(result.path.is_empty());
    }

    #[test]
    fn goal_hop_does_not_cross_walls() {
        let mut grid = PathingGrid::new(7, 1);
        grid.set_obstacle(3, 0, true).unwrap();
        let config = RrtConfig {
            max_iterations: 200,
            goal_bias: 1.0,
            goal_tolerance: 3.5,
            ..RrtConfig::with_seed(0)
        };
        let result = RrtStarSolver::new(config).solve(&grid, Point::new(0, 0), Point::new(5, 0));
        assert!(result.path.is_empty());
        assert!(result.visited.iter().all(|p| p.x < 3));
    }
}

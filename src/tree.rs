//! Continuous positions and the search tree grown by the sampling planners.
use crate::pathing_grid::PathingGrid;
use grid_util::point::Point;
use smallvec::SmallVec;

const LENGTH_EPSILON: f64 = 1e-9;

/// A real-valued position in grid units. Cell `(x, y)` covers the positions that round to it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Position {
        Position { x, y }
    }

    pub fn from_point(point: Point) -> Position {
        Position::new(point.x as f64, point.y as f64)
    }

    pub fn distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// The grid cell nearest to this position.
    pub fn cell(&self) -> Point {
        Point::new(self.x.round() as i32, self.y.round() as i32)
    }

    /// Moves exactly `step` from this position towards `target`. Returns [None] if the two
    /// coincide, since there is no direction to move in.
    pub fn step_towards(&self, target: &Position, step: f64) -> Option<Position> {
        let length = self.distance(target);
        if length == 0.0 {
            return None;
        }
        let scale = step / length;
        Some(Position::new(
            self.x + (target.x - self.x) * scale,
            self.y + (target.y - self.y) * scale,
        ))
    }

    /// Whether the position lies inside the grid and its cell is free.
    pub fn is_free(&self, grid: &PathingGrid) -> bool {
        let inside = self.x >= 0.0
            && self.y >= 0.0
            && self.x < grid.width() as f64
            && self.y < grid.height() as f64;
        inside && grid.is_free(self.cell())
    }
}

/// Rasterizes the straight segment from `a` to `b` with `ceil(length)` steps and checks that
/// every sampled cell, both endpoints included, is in bounds and free.
pub fn segment_is_free(grid: &PathingGrid, a: &Position, b: &Position) -> bool {
    // A unit step may come out a rounding error longer than 1
    let steps = (a.distance(b) - LENGTH_EPSILON).ceil().max(1.0) as usize;
    (0..=steps).all(|i| {
        let t = i as f64 / steps as f64;
        let sample = Position::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y));
        grid.is_free(sample.cell())
    })
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeNode {
    pub position: Position,
    /// Index of the parent in the same tree, [None] for the root.
    pub parent: Option<usize>,
    /// Length of the path from the root through the parent links.
    pub cost: f64,
}

/// Tree of [TreeNode]s rooted at index 0. Nodes are only ever appended; re-parenting keeps the
/// cached costs of the whole affected subtree up to date.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    children: Vec<SmallVec<[usize; 4]>>,
}

impl Tree {
    pub fn new(root: Position) -> Tree {
        Tree {
            nodes: vec![TreeNode {
                position: root,
                parent: None,
                cost: 0.0,
            }],
            children: vec![SmallVec::new()],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn node(&self, ix: usize) -> &TreeNode {
        &self.nodes[ix]
    }

    pub fn into_nodes(self) -> Vec<TreeNode> {
        self.nodes
    }

    /// Index of the node closest to `target`, the earliest one on ties.
    pub fn nearest(&self, target: &Position) -> usize {
        let mut nearest = 0;
        let mut min_distance = f64::INFINITY;
        for (ix, node) in self.nodes.iter().enumerate() {
            let distance = node.position.distance(target);
            if distance < min_distance {
                min_distance = distance;
                nearest = ix;
            }
        }
        nearest
    }

    /// Indices of all nodes strictly closer than `radius` to `target`, in tree order.
    pub fn near(&self, target: &Position, radius: f64) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.position.distance(target) < radius)
            .map(|(ix, _)| ix)
            .collect()
    }

    /// Appends a node below `parent` and returns its index.
    pub fn push(&mut self, position: Position, parent: usize) -> usize {
        let parent_node = self.nodes[parent];
        let ix = self.nodes.len();
        self.nodes.push(TreeNode {
            position,
            parent: Some(parent),
            cost: parent_node.cost + parent_node.position.distance(&position),
        });
        self.children.push(SmallVec::new());
        self.children[parent].push(ix);
        ix
    }

    /// Whether `ancestor` lies on the parent chain of `ix`, `ix` itself included.
    pub fn is_ancestor(&self, ancestor: usize, ix: usize) -> bool {
        self.chain(ix).any(|a| a == ancestor)
    }

    /// Moves `ix` below `new_parent` and refreshes the costs of its subtree.
    pub fn reparent(&mut self, ix: usize, new_parent: usize) {
        debug_assert!(ix != 0, "the root has no parent");
        debug_assert!(!self.is_ancestor(ix, new_parent), "re-parenting would form a cycle");
        if let Some(old_parent) = self.nodes[ix].parent {
            self.children[old_parent].retain(|c| *c != ix);
        }
        self.nodes[ix].parent = Some(new_parent);
        self.children[new_parent].push(ix);

        let mut stack = vec![ix];
        while let Some(current) = stack.pop() {
            if let Some(parent) = self.nodes[current].parent {
                let parent_node = self.nodes[parent];
                let node = &mut self.nodes[current];
                node.cost = parent_node.cost + parent_node.position.distance(&node.position);
            }
            stack.extend(self.children[current].iter().copied());
        }
    }

    /// Indices from `ix` up to the root.
    fn chain(&self, ix: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(ix), |&c| self.nodes[c].parent).take(self.nodes.len() + 1)
    }

    /// Positions from the root to `ix`.
    pub fn path_to(&self, ix: usize) -> Vec<Position> {
        let mut path: Vec<Position> = self.chain(ix).map(|c| self.nodes[c].position).collect();
        debug_assert!(path.len() <= self.nodes.len(), "cycle in parent links");
        path.reverse();
        path
    }
}

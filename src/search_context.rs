//! Per-search scratch state for the graph searches. Every invocation owns a fresh
//! [SearchContext], so consecutive searches on the same grid never see each other's costs or
//! parent links.
use crate::pathing_grid::PathingGrid;
use grid_util::point::Point;
use num_traits::Zero;

/// Scratch record of a single cell, addressed by its flat grid index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRecord<C> {
    /// Cost from the start.
    pub g: C,
    /// Heuristic estimate to the goal.
    pub h: C,
    /// `g + h`.
    pub f: C,
    pub parent: Option<usize>,
    pub discovered: bool,
    pub closed: bool,
}

impl<C: Zero> Default for CellRecord<C> {
    fn default() -> Self {
        CellRecord {
            g: Zero::zero(),
            h: Zero::zero(),
            f: Zero::zero(),
            parent: None,
            discovered: false,
            closed: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SearchContext<C> {
    records: Vec<CellRecord<C>>,
    discovery_order: Vec<usize>,
}

impl<C> SearchContext<C>
where
    C: Zero + Ord + Copy,
{
    pub fn new(grid: &PathingGrid) -> SearchContext<C> {
        SearchContext {
            records: (0..grid.len()).map(|_| CellRecord::default()).collect(),
            discovery_order: Vec::new(),
        }
    }

    pub fn get(&self, ix: usize) -> &CellRecord<C> {
        &self.records[ix]
    }

    pub fn is_discovered(&self, ix: usize) -> bool {
        self.records[ix].discovered
    }

    pub fn is_closed(&self, ix: usize) -> bool {
        self.records[ix].closed
    }

    pub fn close(&mut self, ix: usize) {
        self.records[ix].closed = true;
    }

    /// Records the search root, which has zero cost and no parent.
    pub fn discover_root(&mut self, ix: usize) {
        self.discover(ix);
    }

    /// Sets the parent and costs of a cell, marking it discovered the first time around.
    pub fn relax(&mut self, ix: usize, parent: usize, g: C, h: C) {
        debug_assert!(self.records[parent].discovered);
        self.discover(ix);
        let record = &mut self.records[ix];
        record.parent = Some(parent);
        record.g = g;
        record.h = h;
        record.f = g + h;
    }

    fn discover(&mut self, ix: usize) {
        let record = &mut self.records[ix];
        if !record.discovered {
            record.discovered = true;
            self.discovery_order.push(ix);
        }
    }

    /// Walks parent links from `terminal` back to the root and returns the indices in
    /// root-to-terminal order.
    pub fn reconstruct(&self, terminal: usize) -> Vec<usize> {
        let mut path: Vec<usize> =
            std::iter::successors(Some(terminal), |&ix| self.records[ix].parent)
                .take(self.records.len() + 1)
                .collect();
        debug_assert!(path.len() <= self.records.len(), "cycle in parent links");
        path.reverse();
        path
    }

    /// Reconstructed path as grid points.
    pub fn reconstruct_points(&self, grid: &PathingGrid, terminal: usize) -> Vec<Point> {
        self.reconstruct(terminal)
            .into_iter()
            .map(|ix| grid.point_of(ix))
            .collect()
    }

    /// Cells that received a parent, in the order they were first discovered, leaving out the
    /// given endpoints.
    pub fn visited(&self, grid: &PathingGrid, start: Point, goal: Point) -> Vec<Point> {
        self.discovery_order
            .iter()
            .filter(|&&ix| self.records[ix].parent.is_some())
            .map(|&ix| grid.point_of(ix))
            .filter(|&p| p != start && p != goal)
            .collect()
    }

    /// Number of cells discovered so far, the root included.
    pub fn discovered_count(&self) -> usize {
        self.discovery_order.len()
    }
}

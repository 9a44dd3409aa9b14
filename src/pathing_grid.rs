use crate::error::{PathfindingError, Result};
use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// [PathingGrid] stores the obstacle flags of a fixed-size 4-connected grid together with the
/// designated start and end cells. Connected components of free cells are tracked in a
/// [UnionFind] structure so that reachability can be answered without searching.
///
/// Cells are addressed by [Point]s with `0 <= x < width` and `0 <= y < height`. Flat indices are
/// the row-major ones of the underlying [BoolGrid].
#[derive(Clone, Debug)]
pub struct PathingGrid {
    grid: BoolGrid,
    start: Option<Point>,
    end: Option<Point>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid::new(0, 0)
    }
}

impl PathingGrid {
    /// Creates a grid where every cell is free and no start or end is set.
    pub fn new(width: usize, height: usize) -> PathingGrid {
        let mut grid = PathingGrid {
            grid: BoolGrid::new(width, height, false),
            start: None,
            end: None,
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn end(&self) -> Option<Point> {
        self.end
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.point_in_bounds(Point::new(x, y))
    }

    pub fn point_in_bounds(&self, point: Point) -> bool {
        self.grid.point_in_bounds(point)
    }

    /// Flat index of an in-bounds point.
    pub fn index_of(&self, point: Point) -> usize {
        debug_assert!(self.point_in_bounds(point));
        self.grid.get_ix_point(&point)
    }

    /// Inverse of [index_of](Self::index_of).
    pub fn point_of(&self, index: usize) -> Point {
        let width = self.width();
        Point::new((index % width) as i32, (index / width) as i32)
    }

    fn check_bounds(&self, x: i32, y: i32) -> Result<Point> {
        if self.in_bounds(x, y) {
            Ok(Point::new(x, y))
        } else {
            Err(PathfindingError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    /// Returns whether the point is an obstacle. Out-of-bounds points count as blocked.
    pub fn is_obstacle(&self, point: Point) -> bool {
        !self.point_in_bounds(point) || self.grid.get_point(point)
    }

    /// Returns whether the point lies in the grid and is not an obstacle.
    pub fn is_free(&self, point: Point) -> bool {
        !self.is_obstacle(point)
    }

    /// The orthogonal in-bounds neighbours of a point in the fixed order left, right, up, down.
    /// Searches depend on this order for their tie-breaking.
    pub fn neighbours(&self, point: &Point) -> SmallVec<[Point; 4]> {
        [
            Point::new(point.x - 1, point.y),
            Point::new(point.x + 1, point.y),
            Point::new(point.x, point.y - 1),
            Point::new(point.x, point.y + 1),
        ]
        .into_iter()
        .filter(|p| self.point_in_bounds(*p))
        .collect()
    }

    /// Like [neighbours](Self::neighbours) but without obstacles.
    pub fn free_neighbours(&self, point: &Point) -> SmallVec<[Point; 4]> {
        let mut neighbours = self.neighbours(point);
        neighbours.retain(|p| self.is_free(*p));
        neighbours
    }

    /// Marks a cell as blocked or free. Freeing a cell joins it with its free neighbours right
    /// away while blocking one flags the components as dirty, as it may split a component.
    pub fn set_obstacle(&mut self, x: i32, y: i32, blocked: bool) -> Result<()> {
        let p = self.check_bounds(x, y)?;
        let ix = self.index_of(p);
        if blocked {
            if !self.grid.get_point(p) {
                self.components_dirty = true;
            }
        } else {
            for n in self.free_neighbours(&p) {
                let n_ix = self.index_of(n);
                self.components.union(ix, n_ix);
            }
        }
        self.grid.set_point(p, blocked);
        Ok(())
    }

    /// Flips the obstacle flag of a cell and returns the new value.
    pub fn toggle_obstacle(&mut self, x: i32, y: i32) -> Result<bool> {
        let p = self.check_bounds(x, y)?;
        let blocked = !self.grid.get_point(p);
        self.set_obstacle(x, y, blocked)?;
        Ok(blocked)
    }

    pub fn set_start(&mut self, x: i32, y: i32) -> Result<()> {
        self.start = Some(self.check_bounds(x, y)?);
        Ok(())
    }

    pub fn set_end(&mut self, x: i32, y: i32) -> Result<()> {
        self.end = Some(self.check_bounds(x, y)?);
        Ok(())
    }

    pub fn clear_start(&mut self) {
        self.start = None;
    }

    pub fn clear_end(&mut self) {
        self.end = None;
    }

    /// Returns the designated endpoints, checking that both are set and free.
    pub fn endpoints(&self) -> Result<(Point, Point)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                for point in [start, end] {
                    if self.is_obstacle(point) {
                        return Err(PathfindingError::Blocked { point });
                    }
                }
                Ok((start, end))
            }
            (start, end) => Err(PathfindingError::NotReady {
                missing_start: start.is_none(),
                missing_end: end.is_none(),
            }),
        }
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.index_of(*point))
    }

    /// Checks if start and goal are free and on the same component. Only meaningful while the
    /// components are not dirty, see [update](Self::update).
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        self.is_free(*start)
            && self.is_free(*goal)
            && self
                .components
                .equiv(self.index_of(*start), self.index_of(*goal))
    }

    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free grid neighbours to the same
    /// components. Looking right and down is enough to cover every edge once.
    pub fn generate_components(&mut self) {
        let w = self.width();
        let h = self.height();
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let point = Point::new(x, y);
                if self.is_obstacle(point) {
                    continue;
                }
                let ix = self.index_of(point);
                for n in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if self.is_free(n) {
                        let n_ix = self.index_of(n);
                        self.components.union(ix, n_ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() as i32 {
            let row = (0..self.width() as i32)
                .map(|x| {
                    let p = Point::new(x, y);
                    if self.start == Some(p) {
                        'S'
                    } else if self.end == Some(p) {
                        'E'
                    } else if self.is_obstacle(p) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

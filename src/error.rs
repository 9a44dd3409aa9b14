//! Errors reported at the grid editing and search boundary.
//!
//! A search that finds no path is not an error; it yields an empty
//! [SearchResult](crate::SearchResult) instead.
use grid_util::point::Point;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathfindingError {
    /// Search was requested before both endpoints were designated.
    #[error("grid is not ready for search (missing start: {missing_start}, missing end: {missing_end})")]
    NotReady {
        missing_start: bool,
        missing_end: bool,
    },
    /// Coordinates outside `[0, width) x [0, height)`.
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    /// The start or end cell is an obstacle.
    #[error("endpoint {point} is an obstacle")]
    Blocked { point: Point },
    #[error("unknown algorithm `{0}`")]
    UnknownAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, PathfindingError>;

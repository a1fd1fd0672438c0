//! Common types for the board and the coordinator: coordinates, directions,
//! strike results and board errors.

use core::fmt;

use crate::bitgrid::GridError;
use crate::config::{GRID_HEIGHT, GRID_WIDTH};

/// A cell on the 5×7 matrix; `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Whether the cell lies on the grid.
    pub const fn in_bounds(&self) -> bool {
        (self.x as usize) < GRID_WIDTH && (self.y as usize) < GRID_HEIGHT
    }

    /// One step in `dir`, clamped so that a footprint `extent` cells wide and
    /// tall (counting this cell) stays on the grid.
    pub(crate) fn step_within(self, dir: Direction, extent: (u8, u8)) -> Self {
        let max_x = (GRID_WIDTH as u8).saturating_sub(extent.0);
        let max_y = (GRID_HEIGHT as u8).saturating_sub(extent.1);
        let Coord { x, y } = self;
        match dir {
            Direction::West => Coord::new(x.saturating_sub(1), y),
            Direction::East => Coord::new(if x < max_x { x + 1 } else { x }, y),
            Direction::North => Coord::new(x, y.saturating_sub(1)),
            Direction::South => Coord::new(x, if y < max_y { y + 1 } else { y }),
        }
    }
}

impl From<(u8, u8)> for Coord {
    fn from((x, y): (u8, u8)) -> Self {
        Coord::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Compass direction of the five-way switch. North is row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

/// Outcome of this peer's last strike, as reported by the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum StrikeResult {
    Hit,
    Miss,
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying grid error (index out of range).
    Grid(GridError),
    /// Ship footprint would leave the grid.
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Every ship in the sequence has already been placed.
    NoShipToPlace,
}

impl From<GridError> for BoardError {
    fn from(err: GridError) -> Self {
        BoardError::Grid(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Grid(e) => write!(f, "Grid error: {}", e),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::NoShipToPlace => write!(f, "All ships have already been placed"),
        }
    }
}

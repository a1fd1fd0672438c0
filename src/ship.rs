//! The ship being placed, and its footprint on the grid.

use core::fmt;

use crate::board::Grid;
use crate::common::{BoardError, Coord, Direction};
use crate::config::{GRID_HEIGHT, GRID_WIDTH, NEW_SHIP_ANCHOR, ROTATE_ORIGIN};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// A straight ship of `length` cells running east or south from `anchor`.
///
/// Only exists during placement: once committed, the board keeps the cells
/// and forgets the ship.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    length: u8,
    anchor: Coord,
    orientation: Orientation,
}

impl Ship {
    /// Place a ship at `anchor`; fails if any cell would leave the grid.
    pub fn new(length: u8, anchor: Coord, orientation: Orientation) -> Result<Self, BoardError> {
        let ship = Ship {
            length,
            anchor,
            orientation,
        };
        let (w, h) = ship.extent();
        if length == 0
            || anchor.x as usize + w as usize > GRID_WIDTH
            || anchor.y as usize + h as usize > GRID_HEIGHT
        {
            return Err(BoardError::ShipOutOfBounds);
        }
        Ok(ship)
    }

    /// A fresh ship as handed out at the start of each placement step.
    pub(crate) fn fresh(length: u8) -> Self {
        Ship {
            length,
            anchor: NEW_SHIP_ANCHOR.into(),
            orientation: Orientation::Vertical,
        }
    }

    pub fn length(&self) -> u8 {
        self.length
    }

    pub fn anchor(&self) -> Coord {
        self.anchor
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Columns and rows covered by the footprint.
    fn extent(&self) -> (u8, u8) {
        match self.orientation {
            Orientation::Horizontal => (self.length, 1),
            Orientation::Vertical => (1, self.length),
        }
    }

    /// Cells covered by the ship, starting at the anchor.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        let Coord { x, y } = self.anchor;
        (0..self.length).map(move |i| match self.orientation {
            Orientation::Horizontal => Coord::new(x + i, y),
            Orientation::Vertical => Coord::new(x, y + i),
        })
    }

    /// Footprint of the ship as a grid.
    pub fn mask(&self) -> Result<Grid, BoardError> {
        let mut mask = Grid::new();
        for c in self.cells() {
            mask.set(c.x as usize, c.y as usize)?;
        }
        Ok(mask)
    }

    /// Move one cell, stopping where the whole footprint still fits.
    pub(crate) fn step(&mut self, dir: Direction) {
        self.anchor = self.anchor.step_within(dir, self.extent());
    }

    /// Turn 90 degrees and go back to the rotate origin, where every ship
    /// length fits in either orientation.
    pub(crate) fn rotate(&mut self) {
        self.orientation = self.orientation.rotated();
        self.anchor = ROTATE_ORIGIN.into();
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ length: {}, anchor: {}, orientation: {:?} }}",
            self.length, self.anchor, self.orientation
        )
    }
}

//! Board model: own ship layout, record of strikes reported as hits, the ship
//! being placed, the aim cursor and the score.

use core::fmt;

use crate::bitgrid::BitGrid;
use crate::common::{BoardError, Coord, Direction};
use crate::config::{CURSOR_START, GRID_HEIGHT, GRID_WIDTH, NUM_SHIPS, SHIP_LENGTHS, WINNING_SCORE};
use crate::ship::Ship;

/// One bit per cell, one byte per matrix column.
pub type Grid = BitGrid<u8, GRID_WIDTH, GRID_HEIGHT>;

/// Which of the two grids a view refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardKind {
    /// This peer's ship layout.
    OwnShips,
    /// Cells of the opponent this peer has been told were hit.
    OpponentRecord,
}

pub struct Board {
    own_ships: Grid,
    opponent_record: Grid,
    ship_index: usize,
    ship: Option<Ship>,
    cursor: Coord,
    pending_strike: Option<Coord>,
    score: u8,
}

impl Board {
    /// A board ready for the first placement step.
    pub fn new() -> Self {
        let mut board = Board {
            own_ships: Grid::new(),
            opponent_record: Grid::new(),
            ship_index: 0,
            ship: None,
            cursor: CURSOR_START.into(),
            pending_strike: None,
            score: 0,
        };
        board.initialize();
        board
    }

    /// Clear both grids, restart the ship sequence, recentre the cursor and
    /// zero the score.
    pub fn initialize(&mut self) {
        self.own_ships.clear_all();
        self.opponent_record.clear_all();
        self.ship_index = 0;
        self.ship = Some(Ship::fresh(SHIP_LENGTHS[0]));
        self.cursor = CURSOR_START.into();
        self.pending_strike = None;
        self.score = 0;
    }

    /// True iff no cell of `candidate` is already occupied by a placed ship.
    pub fn is_valid_position(&self, candidate: &Ship) -> bool {
        match candidate.mask() {
            Ok(mask) => (self.own_ships & mask).is_empty(),
            Err(_) => false,
        }
    }

    /// Commit `candidate` to the own-ships grid. Nothing is written on failure.
    pub fn place_ship(&mut self, candidate: &Ship) -> Result<(), BoardError> {
        let mask = candidate.mask()?;
        if !(self.own_ships & mask).is_empty() {
            return Err(BoardError::ShipOverlaps);
        }
        self.own_ships |= mask;
        Ok(())
    }

    /// Commit the ship currently in placement.
    pub fn place_current_ship(&mut self) -> Result<(), BoardError> {
        let ship = self.ship.ok_or(BoardError::NoShipToPlace)?;
        self.place_ship(&ship)
    }

    /// Hand out the next ship in the sequence. Returns `false` once every
    /// ship has been issued, which ends placement.
    pub fn next_ship(&mut self) -> bool {
        if self.ship.is_none() {
            return false;
        }
        self.ship_index += 1;
        match SHIP_LENGTHS.get(self.ship_index) {
            Some(&len) => {
                self.ship = Some(Ship::fresh(len));
                true
            }
            None => {
                self.ship = None;
                false
            }
        }
    }

    /// Move the ship in placement one cell; clamped at the edges.
    pub fn move_ship(&mut self, dir: Direction) {
        if let Some(ship) = self.ship.as_mut() {
            ship.step(dir);
        }
    }

    /// Rotate the ship in placement and return it to the rotate origin.
    pub fn rotate_ship(&mut self) {
        if let Some(ship) = self.ship.as_mut() {
            ship.rotate();
        }
    }

    /// Move the aim cursor one cell; clamped at the edges.
    pub fn move_cursor(&mut self, dir: Direction) {
        self.cursor = self.cursor.step_within(dir, (1, 1));
    }

    /// Whether the cell under the cursor has not been recorded as hit yet.
    /// Latches the cursor as the pending strike target either way.
    pub fn is_valid_strike(&mut self) -> bool {
        self.pending_strike = Some(self.cursor);
        !self.is_recorded(self.cursor)
    }

    /// Whether `coord` is already in the opponent record.
    pub fn is_recorded(&self, coord: Coord) -> bool {
        self.opponent_record
            .get(coord.x as usize, coord.y as usize)
            .unwrap_or(false)
    }

    /// Record the latched strike as a hit and bump the score.
    ///
    /// Only call after the opponent confirmed a hit. Returns `false` and
    /// changes nothing if no strike is latched or the cell is already
    /// recorded, so the score can never pass [`WINNING_SCORE`].
    pub fn add_hit(&mut self) -> bool {
        let Some(target) = self.pending_strike.take() else {
            return false;
        };
        if self.is_recorded(target) {
            return false;
        }
        if self
            .opponent_record
            .set(target.x as usize, target.y as usize)
            .is_err()
        {
            return false;
        }
        self.score += 1;
        true
    }

    /// Whether an incoming strike at `coord` lands on one of our ships.
    pub fn is_hit(&self, coord: Coord) -> bool {
        self.own_ships
            .get(coord.x as usize, coord.y as usize)
            .unwrap_or(false)
    }

    /// True once every enemy ship cell has been hit.
    pub fn is_winner(&self) -> bool {
        self.score == WINNING_SCORE
    }

    pub fn current_ship(&self) -> Option<Ship> {
        self.ship
    }

    /// Ships committed so far in this placement round.
    pub fn ships_placed(&self) -> usize {
        if self.ship.is_none() {
            NUM_SHIPS
        } else {
            self.ship_index
        }
    }

    /// Whether the ship in placement is the last of the sequence.
    pub fn is_last_ship(&self) -> bool {
        self.ship.is_some() && self.ship_index + 1 == NUM_SHIPS
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    pub fn pending_strike(&self) -> Option<Coord> {
        self.pending_strike
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn own_ships(&self) -> Grid {
        self.own_ships
    }

    pub fn opponent_record(&self) -> Grid {
        self.opponent_record
    }

    pub fn grid(&self, kind: BoardKind) -> Grid {
        match kind {
            BoardKind::OwnShips => self.own_ships,
            BoardKind::OpponentRecord => self.opponent_record,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  own_ships: {:?},\n  opponent_record: {:?},\n  ship: {:?},\n  cursor: {},\n  score: {}\n}}",
            self.own_ships, self.opponent_record, self.ship, self.cursor, self.score
        )
    }
}

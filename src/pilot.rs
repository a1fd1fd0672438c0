//! Automatic players that press keys the way a person at the device would.
//! Used by the host simulation; no heap allocations.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::Grid;
use crate::common::{Coord, Direction};
use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::display::Snapshot;
use crate::game::Phase;
use crate::input::{InputEvent, Keys};
use crate::ship::{Orientation, Ship};

/// Interface implemented by anything that operates a peer's keys.
pub trait Pilot: Send {
    /// Key levels to hold for this input sample.
    fn keys(&mut self, rng: &mut SmallRng, snapshot: &Snapshot) -> Keys;
}

/// Where the pilot wants the ship in placement to end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PlacementPlan {
    length: u8,
    anchor: Coord,
    orientation: Orientation,
}

/// Samples a leader holds back in `Ready` and `PlayAgain`, enough for a
/// following pilot to finish placing all ships. Its first strike would
/// otherwise overwrite the `PlayerTwo` byte still waiting in the link.
pub const LEADER_SETTLE: u32 = 120;

/// Random placement, hunt-then-target aiming.
///
/// Every press is followed by a release on the next sample, so each action
/// is seen as a fresh edge. A leading pilot confirms in `Ready` and
/// `PlayAgain` after `settle` plus a random number of samples; a following
/// pilot never does and lets the link move it on.
pub struct AutoPilot {
    leads: bool,
    settle: u32,
    max_delay: u32,
    delay: Option<u32>,
    placement: Option<PlacementPlan>,
    target: Option<Coord>,
    fired: Grid,
    last: Keys,
}

impl AutoPilot {
    pub fn new(leads: bool, settle: u32, max_delay: u32) -> Self {
        Self {
            leads,
            settle,
            max_delay,
            delay: None,
            placement: None,
            target: None,
            fired: Grid::new(),
            last: Keys::default(),
        }
    }

    pub fn leader() -> Self {
        Self::new(true, LEADER_SETTLE, 8)
    }

    pub fn follower() -> Self {
        Self::new(false, 0, 0)
    }

    fn decide(&mut self, rng: &mut SmallRng, snap: &Snapshot) -> Option<InputEvent> {
        match snap.phase {
            Phase::Splash => Some(InputEvent::Confirm),
            Phase::Placing => {
                self.fired.clear_all();
                self.target = None;
                self.place(rng, snap)
            }
            Phase::Ready | Phase::PlayAgain => self.lead(rng),
            Phase::Aim => self.aim(rng, snap),
            _ => None,
        }
    }

    fn lead(&mut self, rng: &mut SmallRng) -> Option<InputEvent> {
        if !self.leads {
            return None;
        }
        let left = *self
            .delay
            .get_or_insert_with(|| self.settle + rng.random_range(0..=self.max_delay));
        if left == 0 {
            self.delay = None;
            Some(InputEvent::Confirm)
        } else {
            self.delay = Some(left - 1);
            None
        }
    }

    fn place(&mut self, rng: &mut SmallRng, snap: &Snapshot) -> Option<InputEvent> {
        let ship = snap.ship?;
        let plan = match self.placement {
            Some(plan) if plan.length == ship.length() => plan,
            _ => {
                let Some(plan) = random_placement(rng, &snap.board, ship.length()) else {
                    return Some(InputEvent::Confirm);
                };
                self.placement = Some(plan);
                plan
            }
        };
        if ship.orientation() != plan.orientation {
            return Some(InputEvent::Rotate);
        }
        match toward(ship.anchor(), plan.anchor) {
            Some(dir) => Some(InputEvent::Move(dir)),
            None => {
                self.placement = None;
                Some(InputEvent::Confirm)
            }
        }
    }

    fn aim(&mut self, rng: &mut SmallRng, snap: &Snapshot) -> Option<InputEvent> {
        let target = match self.target {
            Some(t) => t,
            None => {
                let t = self.pick_target(rng, &snap.board);
                self.target = Some(t);
                t
            }
        };
        match toward(snap.cursor, target) {
            Some(dir) => Some(InputEvent::Move(dir)),
            None => {
                let _ = self.fired.set(target.x as usize, target.y as usize);
                self.target = None;
                Some(InputEvent::Confirm)
            }
        }
    }

    /// Unfired neighbours of known hits first, otherwise any unfired cell.
    fn pick_target(&mut self, rng: &mut SmallRng, hits: &Grid) -> Coord {
        if self.fired.count_ones() == GRID_WIDTH * GRID_HEIGHT {
            self.fired = *hits;
        }
        let fired = self.fired;
        let unfired = |x: i8, y: i8| {
            x >= 0
                && y >= 0
                && (x as usize) < GRID_WIDTH
                && (y as usize) < GRID_HEIGHT
                && !fired.get(x as usize, y as usize).unwrap_or(true)
        };

        let mut near = Grid::new();
        for (x, y) in hits.iter_set_bits() {
            let (x, y) = (x as i8, y as i8);
            for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                if unfired(x + dx, y + dy) {
                    let _ = near.set((x + dx) as usize, (y + dy) as usize);
                }
            }
        }
        let pool = if near.is_empty() { !fired } else { near };
        let n = pool.count_ones();
        if n == 0 {
            return Coord::new(0, 0);
        }
        let pick = rng.random_range(0..n);
        pool.iter_set_bits()
            .nth(pick)
            .map(|(x, y)| Coord::new(x as u8, y as u8))
            .unwrap_or(Coord::new(0, 0))
    }
}

impl Pilot for AutoPilot {
    fn keys(&mut self, rng: &mut SmallRng, snapshot: &Snapshot) -> Keys {
        if self.last.any() {
            self.last = Keys::default();
            return self.last;
        }
        self.last = self
            .decide(rng, snapshot)
            .map(Keys::pressing)
            .unwrap_or_default();
        self.last
    }
}

/// A random in-bounds, non-overlapping position for a ship of `length`.
fn random_placement(rng: &mut SmallRng, occupied: &Grid, length: u8) -> Option<PlacementPlan> {
    for _ in 0..100 {
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let anchor = Coord::new(
            rng.random_range(0..GRID_WIDTH as u8),
            rng.random_range(0..GRID_HEIGHT as u8),
        );
        let Ok(ship) = Ship::new(length, anchor, orientation) else {
            continue;
        };
        if matches!(ship.mask(), Ok(mask) if (*occupied & mask).is_empty()) {
            return Some(PlacementPlan {
                length,
                anchor,
                orientation,
            });
        }
    }
    None
}

/// First step from `from` toward `to`, columns before rows.
fn toward(from: Coord, to: Coord) -> Option<Direction> {
    if from.x < to.x {
        Some(Direction::East)
    } else if from.x > to.x {
        Some(Direction::West)
    } else if from.y < to.y {
        Some(Direction::South)
    } else if from.y > to.y {
        Some(Direction::North)
    } else {
        None
    }
}

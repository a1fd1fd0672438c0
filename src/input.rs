//! Edge-triggered input from the five-way navigation switch and the side
//! button.

use crate::common::Direction;
use crate::config::{INPUT_RATE, LOOP_RATE};

/// A discrete input event, already edge-detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum InputEvent {
    Move(Direction),
    /// Five-way switch pushed in.
    Confirm,
    /// Side button pressed.
    Rotate,
}

/// Level sample of every key: `true` while held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keys {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
    pub push: bool,
    pub button: bool,
}

impl Keys {
    /// Only `event`'s key held.
    pub fn pressing(event: InputEvent) -> Self {
        let mut keys = Keys::default();
        match event {
            InputEvent::Move(Direction::North) => keys.north = true,
            InputEvent::Move(Direction::East) => keys.east = true,
            InputEvent::Move(Direction::South) => keys.south = true,
            InputEvent::Move(Direction::West) => keys.west = true,
            InputEvent::Confirm => keys.push = true,
            InputEvent::Rotate => keys.button = true,
        }
        keys
    }

    pub fn any(&self) -> bool {
        self.north || self.east || self.south || self.west || self.push || self.button
    }
}

/// Turns level samples into press events. A held key reports once, on the
/// sample where it goes down.
#[derive(Debug, Default, Clone)]
pub struct EdgeSampler {
    previous: Keys,
}

impl EdgeSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// At most one event per sample; west, east, north, south, push, then
    /// the button win in that order and other edges of the sample are lost.
    pub fn sample(&mut self, keys: Keys) -> Option<InputEvent> {
        let prev = self.previous;
        self.previous = keys;
        let pressed = |now: bool, before: bool| now && !before;

        if pressed(keys.west, prev.west) {
            Some(InputEvent::Move(Direction::West))
        } else if pressed(keys.east, prev.east) {
            Some(InputEvent::Move(Direction::East))
        } else if pressed(keys.north, prev.north) {
            Some(InputEvent::Move(Direction::North))
        } else if pressed(keys.south, prev.south) {
            Some(InputEvent::Move(Direction::South))
        } else if pressed(keys.push, prev.push) {
            Some(InputEvent::Confirm)
        } else if pressed(keys.button, prev.button) {
            Some(InputEvent::Rotate)
        } else {
            None
        }
    }
}

/// Fires once every `every` ticks; gates input sampling to [`INPUT_RATE`].
#[derive(Debug, Clone)]
pub struct Cadence {
    every: u32,
    count: u32,
}

impl Cadence {
    pub fn new(every: u32) -> Self {
        Self {
            every: every.max(1),
            count: 0,
        }
    }

    /// Count one tick; true when a sample is due.
    pub fn ready(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.every {
            self.count = 0;
            true
        } else {
            false
        }
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self::new(LOOP_RATE / INPUT_RATE)
    }
}

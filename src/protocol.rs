//! Wire codec for the infrared link.
//!
//! Every message is a single byte. Strike coordinates are packed as
//! `0b00xxxyyy`; status codes live in `0x40..=0x7F`, so the two ranges never
//! collide. A byte does not say which kind it is, though: the receiver picks
//! the interpretation from the phase it is in, and a byte read the wrong way
//! is simply discarded.

use core::fmt;

use crate::common::Coord;
use crate::link::Link;

/// Returned by [`LinkCodec::get_position`] when no byte is pending.
pub const NO_POSITION: u8 = 0xFF;

/// Bits used for the row in a packed coordinate.
const Y_BITS: u8 = 3;
const Y_MASK: u8 = (1 << Y_BITS) - 1;

/// First and last byte reserved for status codes.
pub const STATUS_FIRST: u8 = 0x40;
pub const STATUS_LAST: u8 = 0x7F;

/// Single-byte game-level messages.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusCode {
    /// Nothing was received. Never transmitted.
    NoResponse = 0x40,
    /// "You go first, I will wait."
    PlayerTwo,
    /// The strike landed on a ship.
    Hit,
    /// The strike found open water.
    Miss,
    /// The sender has sunk everything: the receiver lost.
    Loser,
    /// The sender's turn is over and play continues.
    PlayOn,
    /// The sender wants a new game.
    PlayAgain,
}

impl StatusCode {
    pub const ALL: [StatusCode; 7] = [
        StatusCode::NoResponse,
        StatusCode::PlayerTwo,
        StatusCode::Hit,
        StatusCode::Miss,
        StatusCode::Loser,
        StatusCode::PlayOn,
        StatusCode::PlayAgain,
    ];

    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    /// Decode a status byte; `None` for anything outside the alphabet.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.to_byte() == byte)
    }
}

/// Pack an in-grid coordinate as `0b00xxxyyy`.
pub fn encode_strike(coord: Coord) -> u8 {
    (coord.x << Y_BITS) | (coord.y & Y_MASK)
}

/// Unpack a coordinate byte. `None` when the byte does not name a grid cell,
/// which covers status bytes and [`NO_POSITION`].
pub fn decode_strike(byte: u8) -> Option<Coord> {
    let coord = Coord::new(byte >> Y_BITS, byte & Y_MASK);
    (byte < STATUS_FIRST && coord.in_bounds()).then_some(coord)
}

/// A message leaving this peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outbound {
    Status(StatusCode),
    Strike(Coord),
}

impl Outbound {
    pub fn to_byte(self) -> u8 {
        match self {
            Outbound::Status(code) => code.to_byte(),
            Outbound::Strike(coord) => encode_strike(coord),
        }
    }
}

impl fmt::Display for Outbound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outbound::Status(code) => write!(f, "{:?}", code),
            Outbound::Strike(coord) => write!(f, "Strike{}", coord),
        }
    }
}

/// Status and coordinate messaging over a [`Link`].
pub struct LinkCodec<L: Link> {
    link: L,
}

impl<L: Link> LinkCodec<L> {
    pub fn new(link: L) -> Self {
        Self { link }
    }

    pub fn send_status(&mut self, code: StatusCode) {
        self.link.send(code.to_byte());
    }

    pub fn send_strike(&mut self, coord: Coord) {
        self.link.send(encode_strike(coord));
    }

    pub fn send(&mut self, msg: Outbound) {
        self.link.send(msg.to_byte());
    }

    /// Poll for a status byte. A pending byte is consumed even when it is
    /// not a status code, in which case this reads as no response.
    pub fn get_status(&mut self) -> StatusCode {
        self.link
            .receive()
            .and_then(StatusCode::from_byte)
            .unwrap_or(StatusCode::NoResponse)
    }

    /// Poll for a raw position byte, or [`NO_POSITION`] if none is pending.
    pub fn get_position(&mut self) -> u8 {
        self.link.receive().unwrap_or(NO_POSITION)
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }
}

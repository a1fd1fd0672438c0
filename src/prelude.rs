//! Commonly used types and utilities for ease of import.

pub use crate::{
    Board, Coord, Coordinator, Direction, InputEvent, Keys, Link, LinkCodec, Phase, Renderer,
    Snapshot, StatusCode, StrikeResult,
};
pub use crate::pilot::{AutoPilot, Pilot};

#[cfg(feature = "std")]
pub use crate::link::{in_memory::InMemoryLink, lossy::LossyLink};
#[cfg(feature = "std")]
pub use crate::node::{HeadlessRenderer, PeerNode, SimConfig, SimReport, Simulation};

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitgrid;
mod board;
mod common;
mod config;
pub mod display;
mod game;
pub mod input;
pub mod link;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod node;
pub mod pilot;
pub mod prelude;
pub mod protocol;
mod ship;

pub use bitgrid::{BitGrid, GridError, SetBits};
pub use board::*;
pub use common::*;
pub use config::*;
pub use display::{LedIntent, PhaseCue, Renderer, Scene, Snapshot};
pub use game::*;
pub use input::{InputEvent, Keys};
pub use link::Link;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
#[cfg(feature = "std")]
pub use node::{PeerNode, SimConfig, SimReport, Simulation};
pub use protocol::{LinkCodec, Outbound, StatusCode};
pub use ship::*;

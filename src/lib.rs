#![cfg_attr(not(feature = "std"), no_std)]

//! Two-party tetromino grid-combat protocol engine.
//!
//! The core — piece catalog, boards, fleets, session state machine and the
//! line codec — is `no_std` friendly; transports, the server loop and
//! logging sit behind the default `std` feature.

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitgrid;
mod board;
pub mod codec;
mod config;
#[cfg(feature = "std")]
mod logging;
mod pieces;
mod player;
pub mod protocol;
#[cfg(feature = "std")]
mod server;
mod session;
mod ship;
#[cfg(feature = "std")]
pub mod transport;

pub use bitgrid::{BitGrid, BitGridError, Mask, SetCells};
pub use board::*;
pub use config::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_at};
pub use pieces::*;
pub use player::*;
pub use protocol::*;
#[cfg(feature = "std")]
pub use server::*;
pub use session::*;
pub use ship::*;

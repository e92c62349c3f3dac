//! Event engine for the Novation Launchkey MK2.
//!
//! Raw messages from the device's two MIDI ports are decoded into indexed
//! control events, taking the InControl mode handshake into account, and
//! fanned out to independently written layers. Layers answer with commands
//! (mode switches, LED colours) that are encoded for the current mode.

pub mod config;
pub mod error;
pub mod launchkey;
pub mod layers;
pub mod ports;

pub use error::{Error, Result};

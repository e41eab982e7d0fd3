//! FT800 device driver
//!
//! Binds the board-agnostic protocol in `eve-core` to real hardware:
//!
//! - [`transport`]: `embedded-hal` SPI bus plus chip-select pin as a byte transport
//! - [`ft800`]: power-up sequence, device ID and touch readback
//! - [`demo`]: the demo screens shown by the firmware

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod demo;
pub mod ft800;
pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use ft800::{Ft800, InitError};
pub use transport::{SpiTransport, SpiTransportError};

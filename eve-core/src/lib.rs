//! Board-agnostic host protocol for the FT800 EVE display co-processor
//!
//! This crate contains everything between a raw SPI byte exchange and a
//! complete coprocessor command:
//!
//! - Bus framing (3-byte address prefixes, register and block access)
//! - Chip register map and command opcodes
//! - Command FIFO client (ring-buffer flow control with a retry budget)
//! - String payload encoding for text-bearing widgets
//! - Coprocessor command builders and display-list words
//! - Panel configuration types
//!
//! ```text
//! caller ─▶ Coprocessor ─▶ CommandFifo ─▶ RegisterAccess (Framing) ─▶ Transport
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod coprocessor;
pub mod dl;
pub mod error;
pub mod fifo;
pub mod framing;
pub mod payload;
pub mod regs;

pub use config::{FifoConfig, PanelConfig};
pub use coprocessor::Coprocessor;
pub use error::Error;
pub use fifo::{CommandFifo, Delivery, TryEnqueue};
pub use framing::{Framing, HostCommand, Intent, RegisterAccess};
pub use payload::{Payload, PayloadError};

#[cfg(test)]
pub(crate) mod mock;

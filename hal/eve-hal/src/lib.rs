//! EVE Hardware Abstraction Layer
//!
//! This crate defines the bus abstraction the EVE protocol core is written
//! against. Chip-specific code (an embedded-hal SPI peripheral, a bit-banged
//! bus, a host-side USB bridge) implements [`Transport`]; everything above it
//! is hardware independent.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (eve-firmware, demos)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  eve-core (framing, command FIFO)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  eve-hal (this crate - traits)          │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  test mocks   │
//! │  SPI adapter  │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`spi::Transport`] - Chip-select framed byte exchange

#![no_std]
#![deny(unsafe_code)]

pub mod spi;

// Re-export key items at crate root for convenience
pub use spi::{Mode, Phase, Polarity, SpiConfig, Transport};

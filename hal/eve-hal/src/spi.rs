//! SPI bus abstractions
//!
//! Provides the byte-exchange transport the EVE framing layer drives, plus
//! the electrical configuration a chip-specific HAL applies to its SPI
//! peripheral.

/// Chip-select framed SPI transport
///
/// The EVE chip is driven one transaction at a time: chip-select is asserted,
/// a sequence of single-byte full-duplex exchanges is clocked, and chip-select
/// is released. Implementations own both the SPI peripheral and the
/// chip-select line for the lifetime of the transport.
pub trait Transport {
    /// Error type for bus operations
    type Error;

    /// Assert chip-select (drive it low)
    fn select(&mut self) -> Result<(), Self::Error>;

    /// Release chip-select (drive it high)
    ///
    /// Implementations must make sure every byte of the transaction has been
    /// clocked out before the line is released.
    fn deselect(&mut self) -> Result<(), Self::Error>;

    /// Clock one byte out and return the byte clocked in at the same time
    fn exchange(&mut self, byte: u8) -> Result<u8, Self::Error>;
}

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
}

/// Highest SPI clock the chip accepts before its PLL is running
pub const POWER_UP_MAX_FREQUENCY: u32 = 11_000_000;

impl Default for SpiConfig {
    fn default() -> Self {
        Self::with_mode(20_000_000, Mode::Mode0)
    }
}

impl SpiConfig {
    /// Build a configuration from a frequency and a combined SPI mode
    pub const fn with_mode(frequency: u32, mode: Mode) -> Self {
        let (polarity, phase) = mode.split();
        Self {
            frequency,
            polarity,
            phase,
        }
    }

    /// Slow clock used while the chip still runs from its internal oscillator
    pub const fn power_up() -> Self {
        Self::with_mode(1_000_000, Mode::Mode0)
    }

    /// Combined SPI mode for this configuration
    pub fn mode(&self) -> Mode {
        Mode::from((self.polarity, self.phase))
    }

    /// Check if this configuration is safe to use before clock setup
    pub fn is_power_up_safe(&self) -> bool {
        self.frequency <= POWER_UP_MAX_FREQUENCY
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl Mode {
    /// Split into polarity and phase
    pub const fn split(self) -> (Polarity, Phase) {
        match self {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        mode.split()
    }
}

impl From<(Polarity, Phase)> for Mode {
    fn from((polarity, phase): (Polarity, Phase)) -> Self {
        match (polarity, phase) {
            (Polarity::IdleLow, Phase::CaptureOnFirstTransition) => Mode::Mode0,
            (Polarity::IdleLow, Phase::CaptureOnSecondTransition) => Mode::Mode1,
            (Polarity::IdleHigh, Phase::CaptureOnFirstTransition) => Mode::Mode2,
            (Polarity::IdleHigh, Phase::CaptureOnSecondTransition) => Mode::Mode3,
        }
    }
}

//! Configuration types
//!
//! Panel timing, touch and backlight settings applied during power-up, plus
//! the command FIFO retry budget. Every type has a `Default` matching the
//! stock 480x272 panel, and `const` constructors so build-time
//! generated configuration can be stored in a `const`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::fifo::DEFAULT_RETRY_BUDGET;

/// Command FIFO flow control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FifoConfig {
    /// Attempts made before an append gives up
    pub retry_budget: u16,
}

impl FifoConfig {
    pub const fn new(retry_budget: u16) -> Self {
        Self { retry_budget }
    }
}

impl Default for FifoConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_BUDGET)
    }
}

/// Display scan timing, in PCLK cycles and lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayTiming {
    pub hcycle: u16,
    pub hoffset: u16,
    pub hsync0: u16,
    pub hsync1: u16,
    pub vcycle: u16,
    pub voffset: u16,
    pub vsync0: u16,
    pub vsync1: u16,
    /// Visible width in pixels
    pub hsize: u16,
    /// Visible height in lines
    pub vsize: u16,
    pub swizzle: u8,
    /// 1 = data driven on the PCLK falling edge
    pub pclk_pol: u8,
    pub cspread: u8,
    /// Main clock divisor; written last, since a non-zero value starts the scan
    pub pclk: u8,
}

impl DisplayTiming {
    /// 480x272 WQVGA panel
    pub const WQVGA: Self = Self {
        hcycle: 548,
        hoffset: 43,
        hsync0: 0,
        hsync1: 41,
        vcycle: 292,
        voffset: 12,
        vsync0: 0,
        vsync1: 10,
        hsize: 480,
        vsize: 272,
        swizzle: 0,
        pclk_pol: 1,
        cspread: 1,
        pclk: 5,
    };
}

impl Default for DisplayTiming {
    fn default() -> Self {
        Self::WQVGA
    }
}

/// Resistive touch engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchConfig {
    /// 3 = continuous sampling
    pub mode: u8,
    /// 1 = differential
    pub adc_mode: u8,
    pub oversample: u8,
    /// Touches with a resistance above this are ignored
    pub rz_threshold: u16,
}

impl TouchConfig {
    pub const CONTINUOUS: Self = Self {
        mode: 3,
        adc_mode: 1,
        oversample: 0x0F,
        rz_threshold: 5000,
    };
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self::CONTINUOUS
    }
}

/// Backlight PWM on the chip's dedicated output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BacklightConfig {
    pub pwm_hz: u16,
    /// 0 (off) to 128 (full)
    pub pwm_duty: u8,
}

impl BacklightConfig {
    pub const FULL: Self = Self {
        pwm_hz: 0xFA,
        pwm_duty: 0x80,
    };

    /// Check that the duty cycle is within the chip's 0-128 range
    pub const fn is_valid(&self) -> bool {
        self.pwm_duty <= 128
    }
}

impl Default for BacklightConfig {
    fn default() -> Self {
        Self::FULL
    }
}

/// Everything the power-up sequence writes to the chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    pub timing: DisplayTiming,
    pub touch: TouchConfig,
    pub backlight: BacklightConfig,
    /// Sound effect volume (0-255)
    pub sound_volume: u8,
    pub fifo: FifoConfig,
}

impl PanelConfig {
    pub const fn new(
        timing: DisplayTiming,
        touch: TouchConfig,
        backlight: BacklightConfig,
        sound_volume: u8,
        fifo: FifoConfig,
    ) -> Self {
        Self {
            timing,
            touch,
            backlight,
            sound_volume,
            fifo,
        }
    }

    /// Stock 480x272 WQVGA panel
    pub const fn wqvga() -> Self {
        Self::new(
            DisplayTiming::WQVGA,
            TouchConfig::CONTINUOUS,
            BacklightConfig::FULL,
            0xFF,
            FifoConfig::new(DEFAULT_RETRY_BUDGET),
        )
    }

    /// Screen width in pixels
    pub const fn width(&self) -> u16 {
        self.timing.hsize
    }

    /// Screen height in pixels
    pub const fn height(&self) -> u16 {
        self.timing.vsize
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::wqvga()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_panel_is_wqvga() {
        let panel = PanelConfig::default();
        assert_eq!(panel.width(), 480);
        assert_eq!(panel.height(), 272);
        assert_eq!(panel.timing.hcycle, 548);
        assert_eq!(panel.timing.vcycle, 292);
        assert_eq!(panel.timing.pclk, 5);
        assert_eq!(panel.sound_volume, 0xFF);
    }

    #[test]
    fn test_default_fifo_budget() {
        assert_eq!(FifoConfig::default().retry_budget, 255);
        assert_eq!(PanelConfig::default().fifo, FifoConfig::default());
    }

    #[test]
    fn test_backlight_duty_range() {
        assert!(BacklightConfig::FULL.is_valid());
        let over = BacklightConfig {
            pwm_duty: 129,
            ..BacklightConfig::FULL
        };
        assert!(!over.is_valid());
    }
}

//! FT800 device driver
//!
//! Owns the bus through a [`Coprocessor`] and adds the chip-level pieces
//! that sit outside the command FIFO: the power-up sequence, panel register
//! setup, device identification and touch readback.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use eve_core::config::{FifoConfig, PanelConfig};
use eve_core::dl;
use eve_core::framing::{Framing, HostCommand, RegisterAccess};
use eve_core::regs::*;
use eve_core::Coprocessor;
use eve_hal::Transport;

/// Power-down pulse width, and settle time after release
const POWER_DOWN_MS: u32 = 50;

/// Time for the oscillator to settle after the ACTIVE wake
const WAKE_MS: u32 = 500;

/// GPIO7 drives the panel's DISP enable line
const DISP_ENABLE: u8 = 0x80;

/// Errors during [`Ft800::power_up`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError<E> {
    /// The bus transport failed
    Transport(E),
    /// The power-down pin could not be driven
    PowerPin,
    /// `REG_ID` did not read back as [`CHIP_ID`]
    UnknownDevice(u8),
    /// Backlight duty cycle above 128
    InvalidBacklight,
}

/// FT800 driver
pub struct Ft800<T> {
    cp: Coprocessor<Framing<T>>,
}

impl<T: Transport> Ft800<T> {
    pub fn new(transport: T) -> Self {
        Self {
            cp: Coprocessor::new(Framing::new(transport)),
        }
    }

    pub fn with_config(transport: T, fifo: FifoConfig) -> Self {
        Self {
            cp: Coprocessor::with_config(Framing::new(transport), fifo),
        }
    }

    /// Reset, wake and configure the chip for `panel`
    ///
    /// The bus must run at or below 11 MHz until this returns. Safe to call
    /// again after a failure; the sequence starts with a hard reset.
    pub fn power_up<PD, D>(
        &mut self,
        pd: &mut PD,
        delay: &mut D,
        panel: &PanelConfig,
    ) -> Result<(), InitError<T::Error>>
    where
        PD: OutputPin,
        D: DelayNs,
    {
        if !panel.backlight.is_valid() {
            return Err(InitError::InvalidBacklight);
        }

        pd.set_low().map_err(|_| InitError::PowerPin)?;
        delay.delay_ms(POWER_DOWN_MS);
        pd.set_high().map_err(|_| InitError::PowerPin)?;
        delay.delay_ms(POWER_DOWN_MS);

        let bus = self.cp.regs_mut();
        bus.send_active_wake().map_err(InitError::Transport)?;
        delay.delay_ms(WAKE_MS);

        bus.host_command(HostCommand::ClockExternal)
            .map_err(InitError::Transport)?;
        bus.host_command(HostCommand::Clock48M)
            .map_err(InitError::Transport)?;

        let id = bus.read_u8(REG_ID).map_err(InitError::Transport)?;
        if id != CHIP_ID {
            return Err(InitError::UnknownDevice(id));
        }

        self.configure(panel).map_err(InitError::Transport)?;
        self.cp
            .fifo_mut()
            .set_retry_budget(panel.fifo.retry_budget);
        Ok(())
    }

    /// Panel registers, first display list and backlight
    fn configure(&mut self, panel: &PanelConfig) -> Result<(), T::Error> {
        let bus = self.cp.regs_mut();
        let timing = &panel.timing;

        // Blank the panel while timing changes
        bus.write_u8(REG_GPIO, 0)?;
        bus.write_u8(REG_PCLK, 0)?;

        bus.write_u16(REG_HCYCLE, timing.hcycle)?;
        bus.write_u16(REG_HOFFSET, timing.hoffset)?;
        bus.write_u16(REG_HSYNC0, timing.hsync0)?;
        bus.write_u16(REG_HSYNC1, timing.hsync1)?;
        bus.write_u16(REG_VCYCLE, timing.vcycle)?;
        bus.write_u16(REG_VOFFSET, timing.voffset)?;
        bus.write_u16(REG_VSYNC0, timing.vsync0)?;
        bus.write_u16(REG_VSYNC1, timing.vsync1)?;
        bus.write_u8(REG_SWIZZLE, timing.swizzle)?;
        bus.write_u8(REG_PCLK_POL, timing.pclk_pol)?;
        bus.write_u8(REG_CSPREAD, timing.cspread)?;
        bus.write_u16(REG_HSIZE, timing.hsize)?;
        bus.write_u16(REG_VSIZE, timing.vsize)?;

        bus.write_u8(REG_TOUCH_MODE, panel.touch.mode)?;
        bus.write_u8(REG_TOUCH_ADC_MODE, panel.touch.adc_mode)?;
        bus.write_u8(REG_TOUCH_OVERSAMPLE, panel.touch.oversample)?;
        bus.write_u16(REG_TOUCH_RZTHRESH, panel.touch.rz_threshold)?;
        bus.write_u8(REG_VOL_SOUND, panel.sound_volume)?;

        bus.write_u32(mem::RAM_DL, dl::clear_color_rgb(0, 0, 0))?;
        bus.write_u32(mem::RAM_DL + 4, dl::clear(true, true, true))?;
        bus.write_u32(mem::RAM_DL + 8, dl::display())?;
        bus.write_u8(REG_DLSWAP, DLSWAP_FRAME)?;

        bus.write_u8(REG_GPIO_DIR, DISP_ENABLE)?;
        bus.write_u8(REG_GPIO, DISP_ENABLE)?;
        bus.write_u16(REG_PWM_HZ, panel.backlight.pwm_hz)?;
        bus.write_u8(REG_PWM_DUTY, panel.backlight.pwm_duty)?;

        // Scan-out starts here
        bus.write_u8(REG_PCLK, timing.pclk)
    }

    /// Read the chip ID register
    pub fn device_id(&mut self) -> Result<u8, T::Error> {
        self.cp.regs_mut().read_u8(REG_ID)
    }

    /// Tag of the object currently being touched, 0 when none
    pub fn touch_tag(&mut self) -> Result<u32, T::Error> {
        self.cp.regs_mut().read_u32(REG_TOUCH_TAG)
    }

    pub fn coprocessor(&mut self) -> &mut Coprocessor<Framing<T>> {
        &mut self.cp
    }

    pub fn transport_mut(&mut self) -> &mut T {
        self.cp.regs_mut().transport_mut()
    }

    pub fn release(self) -> T {
        self.cp.into_inner().into_inner()
    }
}

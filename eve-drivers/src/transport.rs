//! SPI byte transport
//!
//! Adapts an `embedded-hal` [`SpiBus`] and a chip-select [`OutputPin`] to
//! the [`Transport`] trait. The bus must be configured for SPI mode 0; see
//! [`eve_hal::SpiConfig`] for the clock limits during power-up.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use eve_hal::Transport;

/// Errors from the SPI bus or the chip-select pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiTransportError<S, P> {
    Spi(S),
    ChipSelect(P),
}

/// Byte transport over an exclusively owned SPI bus
pub struct SpiTransport<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> SpiTransport<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    /// Create a transport, driving chip-select inactive (high)
    pub fn new(spi: SPI, mut cs: CS) -> Result<Self, SpiTransportError<SPI::Error, CS::Error>> {
        cs.set_high().map_err(SpiTransportError::ChipSelect)?;
        Ok(Self { spi, cs })
    }

    /// Access the bus, e.g. to raise the clock after power-up
    pub fn bus_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS> Transport for SpiTransport<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    type Error = SpiTransportError<SPI::Error, CS::Error>;

    fn select(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(SpiTransportError::ChipSelect)
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        // Let the last byte finish shifting out before releasing the chip.
        // Chip-select is released even if the flush fails; the first error wins.
        let flushed = self.spi.flush().map_err(SpiTransportError::Spi);
        let released = self.cs.set_high().map_err(SpiTransportError::ChipSelect);
        flushed.and(released)
    }

    fn exchange(&mut self, byte: u8) -> Result<u8, Self::Error> {
        let mut buf = [byte];
        self.spi
            .transfer_in_place(&mut buf)
            .map_err(SpiTransportError::Spi)?;
        Ok(buf[0])
    }
}

//! Bus framing for the EVE host interface
//!
//! Every SPI transaction with the chip starts with a 3-byte prefix. The top
//! two bits of the first byte carry the transaction intent, the remaining
//! 22 bits the target address (most significant byte first):
//!
//! ```text
//! ┌────────┬──────────────┬────────────┬───────────┬───────────────┐
//! │ 7:6    │ 5:0          │ byte 1     │ byte 2    │ then          │
//! ├────────┼──────────────┼────────────┼───────────┼───────────────┤
//! │ 00     │ addr 21:16   │ addr 15:8  │ addr 7:0  │ dummy, data…  │  read
//! │ 10     │ addr 21:16   │ addr 15:8  │ addr 7:0  │ data…         │  write
//! │ 01     │ command      │ 0x00       │ 0x00      │ -             │  host command
//! │ 00     │ 0            │ 0x00       │ 0x00      │ -             │  active wake
//! └────────┴──────────────┴────────────┴───────────┴───────────────┘
//! ```
//!
//! Multi-byte registers are little-endian: the byte at the lowest address is
//! the least significant one.

use eve_hal::Transport;

use crate::regs::host;

/// Only the low 24 bits of an address are sent on the wire
pub const ADDRESS_MASK: u32 = 0x00FF_FFFF;

/// Bits of the first prefix byte that belong to the address
const PREFIX_ADDRESS_BITS: u8 = 0x3F;

/// Transaction intent, encoded in bits 7:6 of the first byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Intent {
    /// Memory/register read (`00`)
    Read,
    /// Memory/register write (`10`)
    Write,
    /// Host command (`01`)
    HostCommand,
    /// Active wake (`00`, all-zero transaction)
    ActiveWake,
}

impl Intent {
    /// Marker bits ORed into the first byte
    pub const fn marker(self) -> u8 {
        match self {
            Intent::Read | Intent::ActiveWake => 0x00,
            Intent::Write => 0x80,
            Intent::HostCommand => 0x40,
        }
    }
}

/// Build the 3-byte address prefix for a read or write
///
/// Address bits above 24 are discarded; bits 23:22 are overwritten by the
/// intent marker.
pub const fn address_prefix(addr: u32, intent: Intent) -> [u8; 3] {
    let addr = addr & ADDRESS_MASK;
    [
        ((addr >> 16) as u8 & PREFIX_ADDRESS_BITS) | intent.marker(),
        (addr >> 8) as u8,
        addr as u8,
    ]
}

/// Power and clock control commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand {
    /// Clock running, PLL stopped
    Standby,
    /// Clock and PLL stopped
    Sleep,
    /// Core power off
    PowerDown,
    /// Switch to the external crystal
    ClockExternal,
    /// Run the PLL at 48 MHz
    Clock48M,
    /// Run the PLL at 36 MHz
    Clock36M,
    /// Reset the core
    CoreReset,
}

impl HostCommand {
    /// Raw command code
    pub const fn code(self) -> u8 {
        match self {
            HostCommand::Standby => host::STANDBY,
            HostCommand::Sleep => host::SLEEP,
            HostCommand::PowerDown => host::PWRDOWN,
            HostCommand::ClockExternal => host::CLKEXT,
            HostCommand::Clock48M => host::CLK48M,
            HostCommand::Clock36M => host::CLK36M,
            HostCommand::CoreReset => host::CORERST,
        }
    }
}

/// Register and memory access in the chip's address space
///
/// The command FIFO client is written against this trait rather than against
/// [`Framing`] so it can run on top of an in-memory fake chip.
pub trait RegisterAccess {
    /// Error type for the underlying bus
    type Error;

    /// Read `buf.len()` consecutive bytes starting at `addr`
    fn read_bytes(&mut self, addr: u32, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write `data` to consecutive bytes starting at `addr`
    fn write_bytes(&mut self, addr: u32, data: &[u8]) -> Result<(), Self::Error>;

    /// Read an 8-bit register
    fn read_u8(&mut self, addr: u32) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_bytes(addr, &mut buf)?;
        Ok(buf[0])
    }

    /// Read a 16-bit little-endian register
    fn read_u16(&mut self, addr: u32) -> Result<u16, Self::Error> {
        let mut buf = [0u8; 2];
        self.read_bytes(addr, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Read a 32-bit little-endian register
    fn read_u32(&mut self, addr: u32) -> Result<u32, Self::Error> {
        let mut buf = [0u8; 4];
        self.read_bytes(addr, &mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Write an 8-bit register
    fn write_u8(&mut self, addr: u32, value: u8) -> Result<(), Self::Error> {
        self.write_bytes(addr, &[value])
    }

    /// Write a 16-bit little-endian register
    fn write_u16(&mut self, addr: u32, value: u16) -> Result<(), Self::Error> {
        self.write_bytes(addr, &value.to_le_bytes())
    }

    /// Write a 32-bit little-endian register
    fn write_u32(&mut self, addr: u32, value: u32) -> Result<(), Self::Error> {
        self.write_bytes(addr, &value.to_le_bytes())
    }
}

/// Transaction framing on top of a [`Transport`]
///
/// Owns the transport, so a `Framing` is the only user of the bus and its
/// chip-select line. No retries happen at this level.
pub struct Framing<T> {
    transport: T,
}

impl<T: Transport> Framing<T> {
    /// Create a new framing layer
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get the underlying transport mutably (e.g. to re-clock the bus)
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Release the transport
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Send a power/clock host command
    pub fn host_command(&mut self, command: HostCommand) -> Result<(), T::Error> {
        self.send_host_command(command.code())
    }

    /// Send a raw host command code
    ///
    /// The `01` marker is ORed in; codes from [`crate::regs::host`] already
    /// carry it. No acknowledgement is read back.
    pub fn send_host_command(&mut self, code: u8) -> Result<(), T::Error> {
        self.short_transaction(code | Intent::HostCommand.marker())
    }

    /// Send the all-zero ACTIVE transaction that wakes the chip from standby
    pub fn send_active_wake(&mut self) -> Result<(), T::Error> {
        self.short_transaction(host::ACTIVE | Intent::ActiveWake.marker())
    }

    fn short_transaction(&mut self, first: u8) -> Result<(), T::Error> {
        self.transaction(|bus| {
            bus.exchange(first)?;
            bus.exchange(0x00)?;
            bus.exchange(0x00)?;
            Ok(())
        })
    }

    /// Run `f` with chip-select asserted
    ///
    /// Chip-select is released even when `f` fails; the first error wins.
    fn transaction<F, R>(&mut self, f: F) -> Result<R, T::Error>
    where
        F: FnOnce(&mut T) -> Result<R, T::Error>,
    {
        self.transport.select()?;
        let result = f(&mut self.transport);
        let released = self.transport.deselect();
        let value = result?;
        released?;
        Ok(value)
    }
}

impl<T: Transport> RegisterAccess for Framing<T> {
    type Error = T::Error;

    fn read_bytes(&mut self, addr: u32, buf: &mut [u8]) -> Result<(), Self::Error> {
        let prefix = address_prefix(addr, Intent::Read);
        self.transaction(|bus| {
            for byte in prefix {
                bus.exchange(byte)?;
            }
            // Dummy byte while the chip fetches the data
            bus.exchange(0x00)?;
            for slot in buf.iter_mut() {
                *slot = bus.exchange(0x00)?;
            }
            Ok(())
        })
    }

    fn write_bytes(&mut self, addr: u32, data: &[u8]) -> Result<(), Self::Error> {
        let prefix = address_prefix(addr, Intent::Write);
        self.transaction(|bus| {
            for &byte in prefix.iter().chain(data) {
                bus.exchange(byte)?;
            }
            Ok(())
        })
    }
}

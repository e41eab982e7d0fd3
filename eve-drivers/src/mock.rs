//! Test doubles: a byte-level FT800 simulator, an SPI bus with chip-select,
//! a power-down pin and a delay

use core::convert::Infallible;
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, ErrorKind, SpiBus};
use eve_core::regs::{REG_CMD_READ, REG_CMD_WRITE, REG_ID};
use eve_hal::Transport;

/// Something observable the driver did, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    PowerDown(bool),
    DelayMs(u32),
    Host(u8),
    Read(u32),
    Write(u32, Vec<u8>),
}

pub type Log = Rc<RefCell<Vec<Step>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// Decodes framed transactions and backs them with a sparse memory
pub struct SimChip {
    pub log: Log,
    pub memory: BTreeMap<u32, u8>,
    /// Consume every command word as soon as the write pointer moves
    pub auto_drain: bool,
    frame: Vec<u8>,
}

impl SimChip {
    pub fn new(log: Log) -> Self {
        let mut chip = Self {
            log,
            memory: BTreeMap::new(),
            auto_drain: true,
            frame: Vec::new(),
        };
        chip.memory.insert(REG_ID, 0x7C);
        chip
    }

    pub fn set_u32(&mut self, addr: u32, value: u32) {
        for (i, b) in value.to_le_bytes().into_iter().enumerate() {
            self.memory.insert(addr + i as u32, b);
        }
    }

    pub fn get_u32(&self, addr: u32) -> u32 {
        let mut bytes = [0u8; 4];
        for (i, slot) in bytes.iter_mut().enumerate() {
            *slot = *self.memory.get(&(addr + i as u32)).unwrap_or(&0);
        }
        u32::from_le_bytes(bytes)
    }

    fn address(&self) -> u32 {
        ((self.frame[0] as u32 & 0x3F) << 16) | ((self.frame[1] as u32) << 8) | self.frame[2] as u32
    }
}

impl Transport for SimChip {
    type Error = Infallible;

    fn select(&mut self) -> Result<(), Infallible> {
        self.frame.clear();
        Ok(())
    }

    fn deselect(&mut self) -> Result<(), Infallible> {
        if self.frame.len() < 3 {
            return Ok(());
        }
        let marker = self.frame[0] >> 6;
        let addr = self.address();
        match marker {
            0b01 => self.log.borrow_mut().push(Step::Host(self.frame[0])),
            0b00 if self.frame.len() == 3 => self.log.borrow_mut().push(Step::Host(0)),
            0b00 => self.log.borrow_mut().push(Step::Read(addr)),
            _ => {
                let data = self.frame[3..].to_vec();
                for (i, &b) in data.iter().enumerate() {
                    self.memory.insert(addr + i as u32, b);
                }
                if addr == REG_CMD_WRITE && self.auto_drain {
                    let write = self.get_u32(REG_CMD_WRITE);
                    self.set_u32(REG_CMD_READ, write);
                }
                self.log.borrow_mut().push(Step::Write(addr, data));
            }
        }
        Ok(())
    }

    fn exchange(&mut self, byte: u8) -> Result<u8, Infallible> {
        self.frame.push(byte);
        let index = self.frame.len() - 1;
        // Read data starts after 3 address bytes and one dummy
        if index >= 4 && self.frame[0] >> 6 == 0b00 {
            let addr = self.address() + (index - 4) as u32;
            return Ok(*self.memory.get(&addr).unwrap_or(&0));
        }
        Ok(0)
    }
}

pub struct MockPin {
    pub log: Log,
}

impl digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.log.borrow_mut().push(Step::PowerDown(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.log.borrow_mut().push(Step::PowerDown(true));
        Ok(())
    }
}

pub struct MockDelay {
    pub log: Log,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Step::DelayMs(ms));
    }
}

/// What happened on the SPI wire, shared between the bus and the CS pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wire {
    CsLow,
    CsHigh,
    Byte(u8),
    Flush,
}

pub type WireLog = Rc<RefCell<Vec<Wire>>>;

/// Injected SPI bus failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

impl spi::Error for BusFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// SPI bus that records bytes and replays scripted MISO bytes
pub struct MockSpi {
    pub log: WireLog,
    pub miso: VecDeque<u8>,
    pub fail_flush: bool,
}

impl spi::ErrorType for MockSpi {
    type Error = BusFault;
}

impl SpiBus<u8> for MockSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), BusFault> {
        for w in words.iter_mut() {
            self.log.borrow_mut().push(Wire::Byte(0));
            *w = self.miso.pop_front().unwrap_or(0);
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), BusFault> {
        for &w in words {
            self.log.borrow_mut().push(Wire::Byte(w));
            self.miso.pop_front();
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), BusFault> {
        for (i, &w) in write.iter().enumerate() {
            self.log.borrow_mut().push(Wire::Byte(w));
            let r = self.miso.pop_front().unwrap_or(0);
            if let Some(slot) = read.get_mut(i) {
                *slot = r;
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), BusFault> {
        for w in words.iter_mut() {
            self.log.borrow_mut().push(Wire::Byte(*w));
            *w = self.miso.pop_front().unwrap_or(0);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), BusFault> {
        if self.fail_flush {
            return Err(BusFault);
        }
        self.log.borrow_mut().push(Wire::Flush);
        Ok(())
    }
}

/// Chip-select pin logging its edges
pub struct MockCs {
    pub log: WireLog,
}

impl digital::ErrorType for MockCs {
    type Error = Infallible;
}

impl OutputPin for MockCs {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.log.borrow_mut().push(Wire::CsLow);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.log.borrow_mut().push(Wire::CsHigh);
        Ok(())
    }
}

/// A bus and chip-select pin writing to one shared log
pub fn spi_bus(miso: &[u8]) -> (MockSpi, MockCs, WireLog) {
    let log: WireLog = Rc::new(RefCell::new(Vec::new()));
    (
        MockSpi {
            log: log.clone(),
            miso: miso.iter().copied().collect(),
            fail_flush: false,
        },
        MockCs { log: log.clone() },
        log,
    )
}

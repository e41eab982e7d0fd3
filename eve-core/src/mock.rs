//! Test doubles: a recording SPI transport and an in-memory fake chip

use std::collections::{BTreeMap, VecDeque};

use eve_hal::Transport;

use crate::fifo::FIFO_SIZE;
use crate::framing::RegisterAccess;
use crate::regs::{mem::RAM_CMD, REG_CMD_READ, REG_CMD_WRITE};

/// Injected bus failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    Select,
    Deselect,
    Byte(u8),
}

/// Records every bus event and replays scripted response bytes
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub events: Vec<BusEvent>,
    pub responses: VecDeque<u8>,
    /// Fail every exchange once this many bytes have been exchanged
    pub fail_after: Option<usize>,
    exchanged: usize,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: &[u8]) -> Self {
        Self {
            responses: responses.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Bytes clocked out, in order
    pub fn sent(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BusEvent::Byte(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    /// Number of completed select/deselect pairs
    pub fn transactions(&self) -> usize {
        self.events
            .iter()
            .filter(|e| **e == BusEvent::Deselect)
            .count()
    }
}

impl Transport for RecordingTransport {
    type Error = Fault;

    fn select(&mut self) -> Result<(), Fault> {
        self.events.push(BusEvent::Select);
        Ok(())
    }

    fn deselect(&mut self) -> Result<(), Fault> {
        self.events.push(BusEvent::Deselect);
        Ok(())
    }

    fn exchange(&mut self, byte: u8) -> Result<u8, Fault> {
        if self.fail_after.is_some_and(|n| self.exchanged >= n) {
            return Err(Fault);
        }
        self.exchanged += 1;
        self.events.push(BusEvent::Byte(byte));
        Ok(self.responses.pop_front().unwrap_or(0))
    }
}

/// In-memory chip exposing the command FIFO registers and RAM_CMD
#[derive(Debug)]
pub struct FakeChip {
    pub cmd_read: u32,
    pub cmd_write: u32,
    pub ram_cmd: [u8; FIFO_SIZE as usize],
    /// Every other address in the chip
    pub memory: BTreeMap<u32, u8>,
    /// Bytes the chip consumes each time the host polls REG_CMD_READ
    pub drain_per_poll: u32,
    /// Number of REG_CMD_READ polls
    pub read_polls: usize,
    /// Number of writes to REG_CMD_WRITE
    pub write_pointer_updates: usize,
    /// Number of writes into RAM_CMD
    pub ram_writes: usize,
    pub fail: bool,
}

impl FakeChip {
    pub fn new() -> Self {
        Self::with_pointers(0, 0)
    }

    pub fn with_pointers(cmd_read: u32, cmd_write: u32) -> Self {
        Self {
            cmd_read,
            cmd_write,
            ram_cmd: [0; FIFO_SIZE as usize],
            memory: BTreeMap::new(),
            drain_per_poll: 0,
            read_polls: 0,
            write_pointer_updates: 0,
            ram_writes: 0,
            fail: false,
        }
    }

    /// Word stored at a byte offset inside RAM_CMD
    pub fn ram_word(&self, offset: u32) -> u32 {
        let mut bytes = [0u8; 4];
        for (i, slot) in bytes.iter_mut().enumerate() {
            *slot = self.ram_cmd[((offset as usize) + i) % FIFO_SIZE as usize];
        }
        u32::from_le_bytes(bytes)
    }

    /// Words written so far, from a starting byte offset up to `cmd_write`
    pub fn words_from(&self, start: u32) -> Vec<u32> {
        let mut words = Vec::new();
        let mut offset = start;
        while offset != self.cmd_write {
            words.push(self.ram_word(offset));
            offset = offset.wrapping_add(4);
        }
        words
    }

    fn is_ram_cmd(addr: u32) -> bool {
        (RAM_CMD..RAM_CMD + FIFO_SIZE).contains(&addr)
    }
}

impl RegisterAccess for FakeChip {
    type Error = Fault;

    fn read_bytes(&mut self, addr: u32, buf: &mut [u8]) -> Result<(), Fault> {
        if self.fail {
            return Err(Fault);
        }
        match addr {
            REG_CMD_READ => {
                self.read_polls += 1;
                let pending = self.cmd_write.wrapping_sub(self.cmd_read);
                self.cmd_read = self
                    .cmd_read
                    .wrapping_add(self.drain_per_poll.min(pending));
                buf.copy_from_slice(&self.cmd_read.to_le_bytes()[..buf.len()]);
            }
            REG_CMD_WRITE => {
                buf.copy_from_slice(&self.cmd_write.to_le_bytes()[..buf.len()]);
            }
            _ => {
                for (i, slot) in buf.iter_mut().enumerate() {
                    *slot = *self.memory.get(&(addr + i as u32)).unwrap_or(&0);
                }
            }
        }
        Ok(())
    }

    fn write_bytes(&mut self, addr: u32, data: &[u8]) -> Result<(), Fault> {
        if self.fail {
            return Err(Fault);
        }
        if addr == REG_CMD_WRITE {
            let mut bytes = [0u8; 4];
            bytes[..data.len()].copy_from_slice(data);
            self.cmd_write = u32::from_le_bytes(bytes);
            self.write_pointer_updates += 1;
        } else if Self::is_ram_cmd(addr) {
            let offset = (addr - RAM_CMD) as usize;
            for (i, &byte) in data.iter().enumerate() {
                self.ram_cmd[(offset + i) % FIFO_SIZE as usize] = byte;
            }
            self.ram_writes += 1;
        } else {
            for (i, &byte) in data.iter().enumerate() {
                self.memory.insert(addr + i as u32, byte);
            }
        }
        Ok(())
    }
}

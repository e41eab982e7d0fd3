//! Command FIFO client
//!
//! The coprocessor reads its commands from a 4 KiB ring buffer at
//! [`RAM_CMD`]. Two registers describe the ring:
//!
//! - [`REG_CMD_READ`]: advanced by the chip as it consumes commands
//! - [`REG_CMD_WRITE`]: advanced by the host after appending a word
//!
//! The host never caches either pointer. Both are read fresh on every
//! attempt because the chip moves the read pointer asynchronously.
//!
//! # Space accounting
//!
//! `occupied = write - read` is computed with wrapping 32-bit subtraction,
//! which stays correct across pointer wrap as long as the pointers never
//! drift more than [`FIFO_SIZE`] apart. A word is only appended while
//! `FIFO_SIZE - occupied > FIFO_HEADROOM`, so the ring is never filled to the
//! point where `read == write` could mean "full".
//!
//! The modulo is applied to the RAM address only. The value written back to
//! [`REG_CMD_WRITE`] is `write + 4` with no modulo.

use crate::config::FifoConfig;
use crate::framing::RegisterAccess;
use crate::regs::{mem::RAM_CMD, REG_CMD_READ, REG_CMD_WRITE};

/// Size of the command ring buffer in bytes
pub const FIFO_SIZE: u32 = 4096;

/// Size of one command word in bytes
pub const WORD_SIZE: u32 = 4;

/// Free space that must remain *strictly exceeded* before a word is appended
///
/// The check is `free > FIFO_HEADROOM`, i.e. at least 5 free bytes for a
/// 4-byte word.
// TODO: confirm the headroom against the FT800 datasheet; `>= 4` may be the intended bound.
pub const FIFO_HEADROOM: u32 = 4;

/// Default number of attempts made by [`CommandFifo::enqueue`]
pub const DEFAULT_RETRY_BUDGET: u16 = 255;

/// Result of a single append attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TryEnqueue {
    /// The word was written and the write pointer advanced
    Enqueued,
    /// Not enough free space; nothing was written
    Rejected,
}

/// Result of a bounded-retry append
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Delivery {
    /// The word (or every word of a command) is in the ring
    Delivered,
    /// The retry budget ran out while the ring stayed full
    GaveUp,
}

impl Delivery {
    /// Check if the word made it into the ring
    pub fn is_delivered(self) -> bool {
        self == Delivery::Delivered
    }
}

/// Bytes occupied in the ring for a pair of raw pointers
pub const fn occupied(read: u32, write: u32) -> u32 {
    write.wrapping_sub(read)
}

/// Bytes free in the ring for a pair of raw pointers
pub const fn free_space(read: u32, write: u32) -> u32 {
    FIFO_SIZE.wrapping_sub(occupied(read, write))
}

/// Host-side client for the coprocessor command FIFO
pub struct CommandFifo<R> {
    regs: R,
    retry_budget: u16,
}

impl<R: RegisterAccess> CommandFifo<R> {
    /// Create a client with the default retry budget
    pub fn new(regs: R) -> Self {
        Self::with_config(regs, FifoConfig::default())
    }

    /// Create a client from a configuration
    pub fn with_config(regs: R, config: FifoConfig) -> Self {
        Self {
            regs,
            retry_budget: config.retry_budget,
        }
    }

    /// Number of attempts [`enqueue`](Self::enqueue) makes before giving up
    pub fn retry_budget(&self) -> u16 {
        self.retry_budget
    }

    /// Change the retry budget
    pub fn set_retry_budget(&mut self, budget: u16) {
        self.retry_budget = budget;
    }

    /// Access the underlying register interface
    pub fn regs(&self) -> &R {
        &self.regs
    }

    /// Access the underlying register interface mutably
    pub fn regs_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    /// Release the register interface
    pub fn into_inner(self) -> R {
        self.regs
    }

    /// Read both ring pointers, read pointer first
    pub fn pointers(&mut self) -> Result<(u32, u32), R::Error> {
        let read = self.regs.read_u32(REG_CMD_READ)?;
        let write = self.regs.read_u32(REG_CMD_WRITE)?;
        Ok((read, write))
    }

    /// Current free space in bytes
    pub fn free_space(&mut self) -> Result<u32, R::Error> {
        let (read, write) = self.pointers()?;
        Ok(free_space(read, write))
    }

    /// Make one attempt to append `word`
    pub fn try_enqueue(&mut self, word: u32) -> Result<TryEnqueue, R::Error> {
        let (read, write) = self.pointers()?;

        if free_space(read, write) <= FIFO_HEADROOM {
            return Ok(TryEnqueue::Rejected);
        }

        self.regs.write_u32(RAM_CMD + write % FIFO_SIZE, word)?;
        self.regs
            .write_u32(REG_CMD_WRITE, write.wrapping_add(WORD_SIZE))?;
        Ok(TryEnqueue::Enqueued)
    }

    /// Append `word`, polling the chip up to the retry budget
    ///
    /// There is no delay between attempts; each one re-reads the live
    /// pointers, so the loop paces itself on how fast the chip drains.
    pub fn enqueue(&mut self, word: u32) -> Result<Delivery, R::Error> {
        for _ in 0..self.retry_budget {
            if self.try_enqueue(word)? == TryEnqueue::Enqueued {
                return Ok(Delivery::Delivered);
            }
        }
        Ok(Delivery::GaveUp)
    }

    /// Check if the chip has consumed every enqueued word
    pub fn is_idle(&mut self) -> Result<bool, R::Error> {
        let (read, write) = self.pointers()?;
        Ok(read == write)
    }
}

//! Coprocessor command builders
//!
//! Each method emits one complete command (opcode followed by its argument
//! words) through the [`CommandFifo`]. A command stops at the first word the
//! FIFO gives up on and reports [`Delivery::GaveUp`]; the words already sent
//! stay in the ring.

use crate::config::FifoConfig;
use crate::error::Error;
use crate::fifo::{CommandFifo, Delivery};
use crate::framing::RegisterAccess;
use crate::payload::Payload;
use crate::regs::cmd;

/// Pack two signed 16-bit values as `(high << 16) | (low & 0xFFFF)`
const fn pack(low: i16, high: i16) -> u32 {
    ((high as u16 as u32) << 16) | (low as u16 as u32)
}

/// Pack an option word as `(options << 16) | (font & 0xFFFF)`
const fn pack_options(font: i16, options: u16) -> u32 {
    ((options as u32) << 16) | (font as u16 as u32)
}

/// Coprocessor command interface
pub struct Coprocessor<R> {
    fifo: CommandFifo<R>,
}

impl<R: RegisterAccess> Coprocessor<R> {
    pub fn new(regs: R) -> Self {
        Self {
            fifo: CommandFifo::new(regs),
        }
    }

    pub fn with_config(regs: R, config: FifoConfig) -> Self {
        Self {
            fifo: CommandFifo::with_config(regs, config),
        }
    }

    pub fn fifo(&self) -> &CommandFifo<R> {
        &self.fifo
    }

    pub fn fifo_mut(&mut self) -> &mut CommandFifo<R> {
        &mut self.fifo
    }

    /// Direct register access, bypassing the FIFO
    pub fn regs_mut(&mut self) -> &mut R {
        self.fifo.regs_mut()
    }

    pub fn into_inner(self) -> R {
        self.fifo.into_inner()
    }

    /// Check if the chip has executed everything queued so far
    pub fn is_idle(&mut self) -> Result<bool, Error<R::Error>> {
        self.fifo.is_idle().map_err(Error::Transport)
    }

    /// Send a single raw word (typically a display-list command)
    pub fn word(&mut self, word: u32) -> Result<Delivery, Error<R::Error>> {
        self.fifo.enqueue(word).map_err(Error::Transport)
    }

    /// Send raw words in order, stopping at the first one that is not delivered
    pub fn words(&mut self, words: &[u32]) -> Result<Delivery, Error<R::Error>> {
        for &word in words {
            if self.word(word)? == Delivery::GaveUp {
                return Ok(Delivery::GaveUp);
            }
        }
        Ok(Delivery::Delivered)
    }

    /// Send a command whose last argument is a string
    ///
    /// The string is encoded up front, so a payload over
    /// [`MAX_PAYLOAD_BYTES`](crate::payload::MAX_PAYLOAD_BYTES) fails before
    /// any word is sent. An empty string sends nothing.
    fn words_with_text(
        &mut self,
        head: &[u32],
        text: &str,
    ) -> Result<Delivery, Error<R::Error>> {
        let payload = Payload::encode_str(text)?;
        if payload.is_empty() {
            return Ok(Delivery::Delivered);
        }

        if self.words(head)? == Delivery::GaveUp {
            return Ok(Delivery::GaveUp);
        }
        if self.words(payload.words())? == Delivery::GaveUp {
            return Ok(Delivery::GaveUp);
        }
        if payload.needs_terminator() {
            return self.word(0);
        }
        Ok(Delivery::Delivered)
    }

    // ---- Control ----

    /// Start a new display list
    pub fn dl_start(&mut self) -> Result<Delivery, Error<R::Error>> {
        self.word(cmd::DLSTART)
    }

    /// Swap the finished display list onto the screen
    pub fn swap(&mut self) -> Result<Delivery, Error<R::Error>> {
        self.word(cmd::SWAP)
    }

    pub fn load_identity(&mut self) -> Result<Delivery, Error<R::Error>> {
        self.word(cmd::LOADIDENTITY)
    }

    /// Write the current matrix into the display list
    pub fn set_matrix(&mut self) -> Result<Delivery, Error<R::Error>> {
        self.word(cmd::SETMATRIX)
    }

    /// Rotate the current matrix; 65536 units per full turn
    pub fn rotate(&mut self, angle: i32) -> Result<Delivery, Error<R::Error>> {
        self.words(&[cmd::ROTATE, angle as u32])
    }

    /// Translate the current matrix (16.16 fixed point)
    pub fn translate(&mut self, tx: i32, ty: i32) -> Result<Delivery, Error<R::Error>> {
        self.words(&[cmd::TRANSLATE, tx as u32, ty as u32])
    }

    /// Zero `num` bytes of graphics RAM starting at `ptr`
    pub fn memzero(&mut self, ptr: u32, num: u32) -> Result<Delivery, Error<R::Error>> {
        self.words(&[cmd::MEMZERO, ptr, num])
    }

    // ---- Colors ----

    pub fn fg_color(&mut self, rgb: u32) -> Result<Delivery, Error<R::Error>> {
        self.words(&[cmd::FGCOLOR, rgb])
    }

    pub fn bg_color(&mut self, rgb: u32) -> Result<Delivery, Error<R::Error>> {
        self.words(&[cmd::BGCOLOR, rgb])
    }

    pub fn grad_color(&mut self, rgb: u32) -> Result<Delivery, Error<R::Error>> {
        self.words(&[cmd::GRADCOLOR, rgb])
    }

    // ---- Widgets ----

    /// Track touches over a rectangular region, reporting them under `tag`
    pub fn track(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        tag: i16,
    ) -> Result<Delivery, Error<R::Error>> {
        self.words(&[cmd::TRACK, pack(x, y), pack(w, h), tag as u32])
    }

    pub fn spinner(
        &mut self,
        x: i16,
        y: i16,
        style: u16,
        scale: u16,
    ) -> Result<Delivery, Error<R::Error>> {
        self.words(&[
            cmd::SPINNER,
            pack(x, y),
            ((scale as u32) << 16) | style as u32,
        ])
    }

    #[allow(clippy::too_many_arguments)]
    pub fn slider(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        options: u16,
        value: u16,
        range: u16,
    ) -> Result<Delivery, Error<R::Error>> {
        self.words(&[
            cmd::SLIDER,
            pack(x, y),
            pack(w, h),
            ((value as u32) << 16) | options as u32,
            range as u32,
        ])
    }

    /// Fill the screen with a smooth gradient between two points
    pub fn gradient(
        &mut self,
        x0: i16,
        y0: i16,
        rgb0: u32,
        x1: i16,
        y1: i16,
        rgb1: u32,
    ) -> Result<Delivery, Error<R::Error>> {
        self.words(&[cmd::GRADIENT, pack(x0, y0), rgb0, pack(x1, y1), rgb1])
    }

    // ---- Text-bearing widgets ----
    //
    // Strings are capped at MAX_PAYLOAD_BYTES; longer ones fail with
    // `Error::PayloadTooLarge` before anything is sent.

    pub fn text(
        &mut self,
        x: i16,
        y: i16,
        font: i16,
        options: u16,
        text: &str,
    ) -> Result<Delivery, Error<R::Error>> {
        self.words_with_text(
            &[cmd::TEXT, pack(x, y), pack_options(font, options)],
            text,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn button(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        font: i16,
        options: u16,
        label: &str,
    ) -> Result<Delivery, Error<R::Error>> {
        self.words_with_text(
            &[cmd::BUTTON, pack(x, y), pack(w, h), pack_options(font, options)],
            label,
        )
    }

    /// Row of keys, one per character of `keys`
    #[allow(clippy::too_many_arguments)]
    pub fn keys(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        font: i16,
        options: u16,
        keys: &str,
    ) -> Result<Delivery, Error<R::Error>> {
        self.words_with_text(
            &[cmd::KEYS, pack(x, y), pack(w, h), pack_options(font, options)],
            keys,
        )
    }
}

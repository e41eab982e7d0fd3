//! Display-list command words
//!
//! These are written either directly into `RAM_DL` or through the
//! coprocessor FIFO with [`Coprocessor::word`](crate::Coprocessor::word).

/// Set the color used by [`clear`]
pub const fn clear_color_rgb(red: u8, green: u8, blue: u8) -> u32 {
    (2 << 24) | ((red as u32) << 16) | ((green as u32) << 8) | blue as u32
}

/// Set the current drawing color
pub const fn color_rgb(red: u8, green: u8, blue: u8) -> u32 {
    (4 << 24) | ((red as u32) << 16) | ((green as u32) << 8) | blue as u32
}

/// Clear the color, stencil and/or tag buffers
pub const fn clear(color: bool, stencil: bool, tag: bool) -> u32 {
    (38 << 24) | ((color as u32) << 2) | ((stencil as u32) << 1) | tag as u32
}

/// Set the tag value attached to subsequently drawn objects
pub const fn tag(value: u8) -> u32 {
    (3 << 24) | value as u32
}

/// End of display list
pub const fn display() -> u32 {
    0
}

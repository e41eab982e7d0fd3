//! FT800 memory map, registers and command constants

/// Expected value of [`REG_ID`] once the chip is awake
pub const CHIP_ID: u8 = 0x7C;

/// Memory map
pub mod mem {
    /// General purpose graphics RAM (256 KiB)
    pub const RAM_G: u32 = 0x00_0000;
    /// Display list RAM (8 KiB)
    pub const RAM_DL: u32 = 0x10_0000;
    /// Register block
    pub const RAM_REG: u32 = 0x10_2400;
    /// Coprocessor command ring buffer (4 KiB)
    pub const RAM_CMD: u32 = 0x10_8000;
}

/// Chip identification
pub const REG_ID: u32 = 0x10_2400;
/// Frame counter since reset
pub const REG_FRAMES: u32 = 0x10_2404;
/// Clock cycles since reset
pub const REG_CLOCK: u32 = 0x10_2408;
/// Main clock frequency
pub const REG_FREQUENCY: u32 = 0x10_240C;
/// Coprocessor/touch/audio reset control
pub const REG_CPURESET: u32 = 0x10_241C;

/// Horizontal total cycle count
pub const REG_HCYCLE: u32 = 0x10_2428;
/// Horizontal display start offset
pub const REG_HOFFSET: u32 = 0x10_242C;
/// Horizontal display pixel count
pub const REG_HSIZE: u32 = 0x10_2430;
/// Horizontal sync fall offset
pub const REG_HSYNC0: u32 = 0x10_2434;
/// Horizontal sync rise offset
pub const REG_HSYNC1: u32 = 0x10_2438;
/// Vertical total cycle count
pub const REG_VCYCLE: u32 = 0x10_243C;
/// Vertical display start offset
pub const REG_VOFFSET: u32 = 0x10_2440;
/// Vertical display line count
pub const REG_VSIZE: u32 = 0x10_2444;
/// Vertical sync fall offset
pub const REG_VSYNC0: u32 = 0x10_2448;
/// Vertical sync rise offset
pub const REG_VSYNC1: u32 = 0x10_244C;
/// Display list swap control
pub const REG_DLSWAP: u32 = 0x10_2450;
/// Screen rotation
pub const REG_ROTATE: u32 = 0x10_2454;
/// RGB output bit depth
pub const REG_OUTBITS: u32 = 0x10_2458;
/// Output dither enable
pub const REG_DITHER: u32 = 0x10_245C;
/// RGB output pin order
pub const REG_SWIZZLE: u32 = 0x10_2460;
/// Output clock spreading
pub const REG_CSPREAD: u32 = 0x10_2464;
/// PCLK polarity
pub const REG_PCLK_POL: u32 = 0x10_2468;
/// PCLK divisor (0 disables output)
pub const REG_PCLK: u32 = 0x10_246C;

/// Tag of the last TAG query
pub const REG_TAG: u32 = 0x10_2478;
/// Sound effect volume
pub const REG_VOL_SOUND: u32 = 0x10_2480;
/// GPIO pin direction
pub const REG_GPIO_DIR: u32 = 0x10_248C;
/// GPIO pin values
pub const REG_GPIO: u32 = 0x10_2490;
/// Backlight PWM frequency in Hz
pub const REG_PWM_HZ: u32 = 0x10_24BC;
/// Backlight PWM duty cycle (0-128)
pub const REG_PWM_DUTY: u32 = 0x10_24C0;

/// Command FIFO read pointer (advanced by the chip)
pub const REG_CMD_READ: u32 = 0x10_24E4;
/// Command FIFO write pointer (advanced by the host)
pub const REG_CMD_WRITE: u32 = 0x10_24E8;
/// Coprocessor display-list write offset
pub const REG_CMD_DL: u32 = 0x10_24EC;

/// Touch sampling mode
pub const REG_TOUCH_MODE: u32 = 0x10_24F0;
/// Touch ADC mode (single-ended / differential)
pub const REG_TOUCH_ADC_MODE: u32 = 0x10_24F4;
/// Touch charge time
pub const REG_TOUCH_CHARGE: u32 = 0x10_24F8;
/// Touch settle time
pub const REG_TOUCH_SETTLE: u32 = 0x10_24FC;
/// Touch oversampling factor
pub const REG_TOUCH_OVERSAMPLE: u32 = 0x10_2500;
/// Touch resistance threshold
pub const REG_TOUCH_RZTHRESH: u32 = 0x10_2504;
/// Touch screen coordinates
pub const REG_TOUCH_SCREEN_XY: u32 = 0x10_2510;
/// Tag of the currently touched object
pub const REG_TOUCH_TAG: u32 = 0x10_2518;

/// Host commands (short 3-byte transactions)
///
/// Every code already carries the `01` marker in bits 7:6 except
/// [`host::ACTIVE`], which is sent as an all-zero transaction.
pub mod host {
    /// Leave standby/sleep
    pub const ACTIVE: u8 = 0x00;
    /// Clock running, PLL stopped
    pub const STANDBY: u8 = 0x41;
    /// Clock and PLL stopped
    pub const SLEEP: u8 = 0x42;
    /// Core power off
    pub const PWRDOWN: u8 = 0x50;
    /// Select the external crystal
    pub const CLKEXT: u8 = 0x44;
    /// PLL to 48 MHz
    pub const CLK48M: u8 = 0x62;
    /// PLL to 36 MHz
    pub const CLK36M: u8 = 0x61;
    /// Reset the core
    pub const CORERST: u8 = 0x68;
}

/// [`REG_DLSWAP`] values
pub const DLSWAP_DONE: u8 = 0;
/// Swap after the current scan line
pub const DLSWAP_LINE: u8 = 1;
/// Swap after the current frame
pub const DLSWAP_FRAME: u8 = 2;

/// Coprocessor command opcodes
pub mod cmd {
    pub const DLSTART: u32 = 0xFFFF_FF00;
    pub const SWAP: u32 = 0xFFFF_FF01;
    pub const INTERRUPT: u32 = 0xFFFF_FF02;
    pub const BGCOLOR: u32 = 0xFFFF_FF09;
    pub const FGCOLOR: u32 = 0xFFFF_FF0A;
    pub const GRADIENT: u32 = 0xFFFF_FF0B;
    pub const TEXT: u32 = 0xFFFF_FF0C;
    pub const BUTTON: u32 = 0xFFFF_FF0D;
    pub const KEYS: u32 = 0xFFFF_FF0E;
    pub const PROGRESS: u32 = 0xFFFF_FF0F;
    pub const SLIDER: u32 = 0xFFFF_FF10;
    pub const SCROLLBAR: u32 = 0xFFFF_FF11;
    pub const TOGGLE: u32 = 0xFFFF_FF12;
    pub const GAUGE: u32 = 0xFFFF_FF13;
    pub const CLOCK: u32 = 0xFFFF_FF14;
    pub const CALIBRATE: u32 = 0xFFFF_FF15;
    pub const SPINNER: u32 = 0xFFFF_FF16;
    pub const STOP: u32 = 0xFFFF_FF17;
    pub const MEMZERO: u32 = 0xFFFF_FF1C;
    pub const APPEND: u32 = 0xFFFF_FF1E;
    pub const LOADIDENTITY: u32 = 0xFFFF_FF26;
    pub const TRANSLATE: u32 = 0xFFFF_FF27;
    pub const SCALE: u32 = 0xFFFF_FF28;
    pub const ROTATE: u32 = 0xFFFF_FF29;
    pub const SETMATRIX: u32 = 0xFFFF_FF2A;
    pub const TRACK: u32 = 0xFFFF_FF2C;
    pub const LOGO: u32 = 0xFFFF_FF31;
    pub const COLDSTART: u32 = 0xFFFF_FF32;
    pub const GRADCOLOR: u32 = 0xFFFF_FF34;
}

/// Widget option flags
pub mod opt {
    pub const OPT_3D: u16 = 0;
    pub const OPT_FLAT: u16 = 256;
    pub const OPT_SIGNED: u16 = 256;
    pub const OPT_CENTERX: u16 = 512;
    pub const OPT_CENTERY: u16 = 1024;
    pub const OPT_CENTER: u16 = 1536;
    pub const OPT_RIGHTX: u16 = 2048;
    pub const OPT_NOBACK: u16 = 4096;
    pub const OPT_NOTICKS: u16 = 8192;
}

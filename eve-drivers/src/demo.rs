//! Demo screens
//!
//! A title, credits over a gradient, and one touch-tagged button that is
//! drawn flat and darker while pressed.

use eve_core::dl;
use eve_core::fifo::Delivery;
use eve_core::framing::RegisterAccess;
use eve_core::regs::opt;
use eve_core::{Coprocessor, Error};

/// Tag reported in `REG_TOUCH_TAG` while the button is touched
pub const BUTTON_TAG: u8 = 1;

const TITLE: &str = "FT800 Demo";
const CREDIT: &str = "Designed by: Akos Pasztor";
const URL: &str = "http://akospasztor.com";
const BUTTON_LABEL: &str = "Tap to Continue";

const BUTTON_IDLE: u32 = 0x228B22;
const BUTTON_PRESSED: u32 = 0x0A520A;

/// Return early when a command was not delivered
macro_rules! send {
    ($cmd:expr) => {
        if !$cmd?.is_delivered() {
            return Ok(Delivery::GaveUp);
        }
    };
}

/// Blank the screen to black
pub fn clear_screen<R: RegisterAccess>(
    cp: &mut Coprocessor<R>,
) -> Result<Delivery, Error<R::Error>> {
    send!(cp.dl_start());
    send!(cp.words(&[
        dl::clear_color_rgb(0, 0, 0),
        dl::clear(true, true, true),
        dl::display(),
    ]));
    cp.swap()
}

/// Draw the demo screen with the button up or down
pub fn demo_screen<R: RegisterAccess>(
    cp: &mut Coprocessor<R>,
    pressed: bool,
) -> Result<Delivery, Error<R::Error>> {
    send!(cp.dl_start());
    send!(cp.words(&[dl::clear_color_rgb(0, 0, 0), dl::clear(true, true, true)]));
    send!(cp.gradient(0, 0, 0xA1E1FF, 0, 250, 0x000080));
    send!(cp.text(10, 245, 27, 0, CREDIT));
    send!(cp.text(470, 250, 26, opt::OPT_RIGHTX, URL));

    send!(cp.word(dl::color_rgb(0xDE, 0x00, 0x08)));
    send!(cp.text(240, 40, 31, opt::OPT_CENTERX, TITLE));

    send!(cp.words(&[dl::color_rgb(0xFF, 0xFF, 0xFF), dl::tag(BUTTON_TAG)]));
    let (color, options) = if pressed {
        (BUTTON_PRESSED, opt::OPT_FLAT)
    } else {
        (BUTTON_IDLE, opt::OPT_3D)
    };
    send!(cp.fg_color(color));
    send!(cp.button(130, 150, 220, 48, 28, options, BUTTON_LABEL));

    send!(cp.word(dl::display()));
    cp.swap()
}

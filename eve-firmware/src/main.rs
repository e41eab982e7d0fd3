//! FT800 touch demo firmware
//!
//! Brings up an FT800 over SPI0 on an RP2040, then redraws a demo screen in
//! a loop, showing its button pressed while the panel reports the button's
//! touch tag.
//!
//! Wiring:
//!
//! | FT800 | RP2040 |
//! |-------|--------|
//! | SCK   | GPIO18 |
//! | MOSI  | GPIO19 |
//! | MISO  | GPIO16 |
//! | CS#   | GPIO17 |
//! | PD#   | GPIO20 |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::spi::{self, Spi};
use embassy_time::{Delay, Timer};
use eve_core::{Delivery, Error};
use eve_drivers::{demo, Ft800, InitError, SpiTransport};
use eve_hal::{Phase, Polarity, SpiConfig};
use {defmt_rtt as _, panic_probe as _};

/// Panel and bus settings compiled from panel.toml
mod panel {
    include!(concat!(env!("OUT_DIR"), "/panel.rs"));
}

/// Pause after power-up before the first coprocessor command
const SETTLE_MS: u64 = 500;

/// Redraw interval
const FRAME_MS: u64 = 16;

/// Convert a bus configuration into the RP2040 driver's
fn spi_config(config: &SpiConfig) -> spi::Config {
    let mut out = spi::Config::default();
    out.frequency = config.frequency;
    out.polarity = match config.polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    out.phase = match config.phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    out
}

/// Log a screen that did not make it into the command FIFO
fn report<E: Format>(screen: &str, result: Result<Delivery, Error<E>>) {
    match result {
        Ok(Delivery::Delivered) => {}
        Ok(Delivery::GaveUp) => warn!("{}: command FIFO stayed full, frame dropped", screen),
        Err(e) => error!("{}: {}", screen, e),
    }
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("EVE demo starting...");

    let p = embassy_rp::init(Default::default());

    if !panel::SPI_POWER_UP.is_power_up_safe() {
        warn!(
            "power-up SPI clock {} Hz is above the FT800 limit",
            panel::SPI_POWER_UP.frequency
        );
    }

    let spi = Spi::new_blocking(
        p.SPI0,
        p.PIN_18,
        p.PIN_19,
        p.PIN_16,
        spi_config(&panel::SPI_POWER_UP),
    );
    let cs = Output::new(p.PIN_17, Level::High);
    let mut pd = Output::new(p.PIN_20, Level::High);
    let mut delay = Delay;

    let transport = unwrap!(SpiTransport::new(spi, cs));
    let mut ft = Ft800::with_config(transport, panel::PANEL.fifo);

    // The chip may need several resets after the supply comes up
    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        match ft.power_up(&mut pd, &mut delay, &panel::PANEL) {
            Ok(()) => break,
            Err(InitError::InvalidBacklight) => {
                defmt::panic!("panel.toml backlight duty out of range")
            }
            Err(InitError::UnknownDevice(id)) => {
                warn!("power-up attempt {}: unexpected chip id {=u8:#x}", attempts, id)
            }
            Err(e) => warn!("power-up attempt {}: {}", attempts, e),
        }
    }
    info!(
        "FT800 ready after {} attempt(s), {}x{}",
        attempts,
        panel::PANEL.width(),
        panel::PANEL.height()
    );

    Timer::after_millis(SETTLE_MS).await;
    ft.transport_mut()
        .bus_mut()
        .set_frequency(panel::SPI_RUN.frequency);
    debug!("SPI clock raised to {} Hz", panel::SPI_RUN.frequency);

    report("clear", demo::clear_screen(ft.coprocessor()));
    match ft.coprocessor().fifo_mut().free_space() {
        Ok(free) => debug!("command FIFO: {} bytes free", free),
        Err(e) => error!("command FIFO read failed: {}", e),
    }

    let mut pressed = false;
    loop {
        match ft.touch_tag() {
            Ok(tag) => {
                let now = tag == demo::BUTTON_TAG as u32;
                if now != pressed {
                    info!("button {}", if now { "pressed" } else { "released" });
                    pressed = now;
                }
            }
            Err(e) => error!("touch tag read failed: {}", e),
        }

        report("demo", demo::demo_screen(ft.coprocessor(), pressed));
        Timer::after_millis(FRAME_MS).await;
    }
}

//! Build script for eve-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates panel.toml and compiles it into `$OUT_DIR/panel.rs`

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A numeric key allowed in panel.toml
struct Key {
    section: &'static str,
    name: &'static str,
    min: i64,
    max: i64,
}

const fn key(section: &'static str, name: &'static str, min: i64, max: i64) -> Key {
    Key {
        section,
        name,
        min,
        max,
    }
}

const U8: i64 = u8::MAX as i64;
const U16: i64 = u16::MAX as i64;

const KEYS: &[Key] = &[
    key("timing", "hcycle", 0, 4095),
    key("timing", "hoffset", 0, 4095),
    key("timing", "hsync0", 0, 4095),
    key("timing", "hsync1", 0, 4095),
    key("timing", "vcycle", 0, 4095),
    key("timing", "voffset", 0, 4095),
    key("timing", "vsync0", 0, 4095),
    key("timing", "vsync1", 0, 4095),
    key("timing", "hsize", 1, 4095),
    key("timing", "vsize", 1, 4095),
    key("timing", "swizzle", 0, 15),
    key("timing", "pclk_pol", 0, 1),
    key("timing", "cspread", 0, 1),
    key("timing", "pclk", 1, U8),
    key("touch", "mode", 0, 3),
    key("touch", "adc_mode", 0, 1),
    key("touch", "oversample", 1, 15),
    key("touch", "rz_threshold", 0, U16),
    key("backlight", "pwm_hz", 250, 10_000),
    key("backlight", "pwm_duty", 0, 128),
    key("sound", "volume", 0, U8),
    key("fifo", "retry_budget", 1, U16),
    key("spi", "power_up_hz", 100_000, 11_000_000),
    key("spi", "run_hz", 100_000, 30_000_000),
];

fn main() {
    setup_linker();
    let config = validate_config();
    generate_panel(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Print a boxed build error and abort
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.clone()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

/// Validate panel.toml at compile time
fn validate_config() -> toml::Table {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");
    if !config_path.exists() {
        fail(
            "panel.toml not found!",
            &["Create one in the eve-firmware directory.".to_string()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read panel.toml", &[e.to_string()]),
    };

    let config: toml::Table = match toml::from_str(&content) {
        Ok(table) => table,
        Err(e) => fail(
            "Invalid TOML syntax in panel.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();

    for (section, value) in &config {
        let table = match value {
            toml::Value::Table(t) => t,
            _ => {
                errors.push(format!("[{}] must be a table", section));
                continue;
            }
        };

        for (name, value) in table {
            let Some(allowed) = KEYS
                .iter()
                .find(|k| k.section == section && k.name == name)
            else {
                errors.push(format!("[{}] unknown key '{}'", section, name));
                continue;
            };

            match value {
                toml::Value::Integer(v) if (allowed.min..=allowed.max).contains(v) => {}
                toml::Value::Integer(_) => errors.push(format!(
                    "[{}] {} must be {}-{}",
                    section, name, allowed.min, allowed.max
                )),
                _ => errors.push(format!("[{}] {} must be an integer", section, name)),
            }
        }
    }

    if let (Some(hsize), Some(hcycle)) = (
        get(&config, "timing", "hsize"),
        get(&config, "timing", "hcycle"),
    ) {
        if hsize >= hcycle {
            errors.push("[timing] hsize must be smaller than hcycle".to_string());
        }
    }
    if let (Some(vsize), Some(vcycle)) = (
        get(&config, "timing", "vsize"),
        get(&config, "timing", "vcycle"),
    ) {
        if vsize >= vcycle {
            errors.push("[timing] vsize must be smaller than vcycle".to_string());
        }
    }

    if !errors.is_empty() {
        fail("Invalid panel configuration", &errors);
    }

    println!("cargo:warning=panel.toml validated successfully");
    config
}

fn get(config: &toml::Table, section: &str, name: &str) -> Option<i64> {
    config.get(section)?.get(name)?.as_integer()
}

/// Struct literal with the keys present in `section`, the rest from `fallback`
fn struct_literal(config: &toml::Table, ty: &str, section: &str, fallback: &str) -> String {
    let keys: Vec<&Key> = KEYS.iter().filter(|k| k.section == section).collect();
    let mut out = format!("{} {{ ", ty);
    let mut present = 0;
    for k in &keys {
        if let Some(v) = get(config, section, k.name) {
            write!(out, "{}: {}, ", k.name, v).unwrap();
            present += 1;
        }
    }
    if present < keys.len() {
        write!(out, "..{}", fallback).unwrap();
    }
    out.push('}');
    out
}

/// Write `$OUT_DIR/panel.rs`
fn generate_panel(config: &toml::Table) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let timing = struct_literal(config, "DisplayTiming", "timing", "DisplayTiming::WQVGA");
    let touch = struct_literal(config, "TouchConfig", "touch", "TouchConfig::CONTINUOUS");
    let backlight = struct_literal(config, "BacklightConfig", "backlight", "BacklightConfig::FULL");
    let volume = get(config, "sound", "volume").unwrap_or(0xFF);
    let retry_budget = get(config, "fifo", "retry_budget").unwrap_or(255);
    let power_up_hz = get(config, "spi", "power_up_hz").unwrap_or(1_000_000);
    let run_hz = get(config, "spi", "run_hz").unwrap_or(20_000_000);

    let code = format!(
        "// Generated from panel.toml by build.rs\n\
         use eve_core::config::{{BacklightConfig, DisplayTiming, FifoConfig, PanelConfig, TouchConfig}};\n\
         use eve_hal::{{Mode, SpiConfig}};\n\
         \n\
         pub const PANEL: PanelConfig = PanelConfig::new(\n    {},\n    {},\n    {},\n    {},\n    FifoConfig::new({}),\n);\n\
         \n\
         pub const SPI_POWER_UP: SpiConfig = SpiConfig::with_mode({}, Mode::Mode0);\n\
         pub const SPI_RUN: SpiConfig = SpiConfig::with_mode({}, Mode::Mode0);\n",
        timing, touch, backlight, volume, retry_budget, power_up_hz, run_hz
    );

    fs::write(out_dir.join("panel.rs"), code).unwrap();
}

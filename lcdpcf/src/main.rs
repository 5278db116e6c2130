mod config;

use std::env::var;
use dotenv::dotenv;
use log::{debug, info};
use sysinfo::System;
use crate::config::Config;

/// A bell, for custom character slot 0.
const BELL: [u8; 8] = [
    0b00100,
    0b01110,
    0b01110,
    0b01110,
    0b11111,
    0b00000,
    0b00100,
    0b00000,
];

/// Parses a bus address, either decimal or `0x`-prefixed hex.
fn parse_address(address_str: &str) -> eyre::Result<u8> {
    let address_str = address_str.trim();
    let address = match address_str.strip_prefix("0x").or_else(|| address_str.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16)?,
        None => address_str.parse()?,
    };
    if address > 0x7F {
        return Err(eyre::eyre!("Address {:#x} is not a 7-bit I2C address", address));
    }
    Ok(address)
}

/// Loads the JSON config, writing the default one if there is none, then applies the
/// `LCDPCF_I2C_BUS` and `LCDPCF_ADDRESS` environment overrides.
fn load_config() -> eyre::Result<Config> {
    debug!("Trying to load config...");
    let mut config = if let Some(config) = Config::try_load() {
        info!("Config loaded.");
        config
    } else {
        info!("Config not found. Using default");
        let config = Config::default();
        config.save()?;
        info!("Default config saved.");
        config
    };

    if let Ok(bus) = var("LCDPCF_I2C_BUS") {
        config.bus = bus.trim().parse()?;
    }
    if let Ok(address) = var("LCDPCF_ADDRESS") {
        config.address = parse_address(&address)?;
    }

    Ok(config)
}

/// Logs where the program runs and which display it is about to drive.
fn log_banner(config: &Config) {
    let unknown = || "???".to_string();

    info!(
        "lcdpcf {} on {} ({})",
        env!("CARGO_PKG_VERSION"),
        System::host_name().unwrap_or_else(unknown),
        System::cpu_arch(),
    );
    info!(
        "{}, kernel {}",
        System::long_os_version().unwrap_or_else(unknown),
        System::kernel_version().unwrap_or_else(unknown),
    );
    info!("LCD @ /dev/i2c-{}, address {:#04x}", config.bus, config.address);
}

#[cfg(target_os = "linux")]
fn main() -> eyre::Result<()> {
    use lcdpcf_driver::lcd::hd44780::DisplayExt;
    use lcdpcf_driver::lcd::hd44780::driver::I2cHD44780Driver;
    use log::warn;

    dotenv().ok();
    pretty_env_logger::init();

    info!("lcdpcf starting...");
    let config = load_config()?;
    log_banner(&config);

    debug!("Initializing LCD driver...");
    let mut lcd = I2cHD44780Driver::open(config.bus, config.address)?;

    if !lcd.is_alive()? {
        warn!("Nothing answers at {}, is the address right?", lcd.address());
    }

    if !config.cursor {
        lcd.cursor_off()?;
    }
    if !config.blink {
        lcd.blink_off()?;
    }
    if !config.backlight {
        lcd.backlight_off()?;
    }

    lcd.create_char(0, &BELL)?;

    for (line, text) in config.greeting.iter().take(4).enumerate() {
        lcd.set_cursor(0, line as u8)?;
        lcd.print_lossy(text)?;
    }

    debug!("{:?} initialized.", lcd);
    info!("Greeting shown.");

    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn main() -> eyre::Result<()> {
    dotenv().ok();
    pretty_env_logger::init();
    let config = load_config()?;
    log_banner(&config);
    Err(eyre::eyre!(
        "/dev/i2c-{} is only available on Linux",
        config.bus
    ))
}

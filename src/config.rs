// src/config.rs

//! Configuration structures for `led-canvas`.
//!
//! Every section derives `Deserialize` with `#[serde(default)]`, so a config
//! file only needs the fields it wants to change. The file is JSON and is
//! located through the `LED_CANVAS_CONFIG` environment variable; without it
//! the built-in defaults are used.
//!
//! The defaults for the strip section mirror the usual rpi_ws281x wiring:
//! DMA channel 10, data on GPIO 18 (PWM0), GRB byte order at 800 kHz.

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::orientation::{Flip, Rotation};

/// Environment variable naming the JSON config file.
pub const CONFIG_ENV_VAR: &str = "LED_CANVAS_CONFIG";

/// Process-wide configuration, loaded on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

/// Root of the configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Physical strip geometry and driver parameters.
    pub strip: StripConfig,
    /// Initial orientation and composition flags.
    pub display: DisplayConfig,
    /// Command server settings.
    pub server: ServerConfig,
    /// Demo loop settings.
    pub demo: DemoConfig,
}

impl Config {
    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Loads the file named by `LED_CANVAS_CONFIG`, falling back to defaults.
    pub fn from_env() -> Self {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => match Config::load(&path) {
                Ok(config) => {
                    info!("Configuration loaded from {}", path);
                    config
                }
                Err(e) => {
                    warn!("{:#}. Using default configuration.", e);
                    Config::default()
                }
            },
            Err(_) => {
                info!("{} not set, using default configuration.", CONFIG_ENV_VAR);
                Config::default()
            }
        }
    }
}

/// Color byte order expected by the LED chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StripType {
    Rgb,
    Rbg,
    #[default]
    Grb,
    Gbr,
    Brg,
    Bgr,
}

impl StripType {
    /// The shift encoding rpi_ws281x uses for this byte order.
    pub fn ws2811_code(self) -> i32 {
        match self {
            StripType::Rgb => 0x0010_0800,
            StripType::Rbg => 0x0010_0008,
            StripType::Grb => 0x0008_1000,
            StripType::Gbr => 0x0008_0010,
            StripType::Brg => 0x0000_1008,
            StripType::Bgr => 0x0000_0810,
        }
    }
}

/// Physical strip parameters, fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StripConfig {
    /// Physical pixels per row.
    pub width: usize,
    /// Physical rows.
    pub height: usize,
    /// DMA channel used for the transfer.
    pub dma: i32,
    /// GPIO pin carrying the data signal.
    pub gpio: i32,
    /// Global brightness, 0-255.
    pub brightness: u8,
    pub strip_type: StripType,
    /// Signal frequency in Hz.
    pub frequency: u32,
    /// Set when the data line passes through an inverting level shifter.
    pub invert: bool,
}

impl Default for StripConfig {
    fn default() -> Self {
        StripConfig {
            width: 8,
            height: 8,
            dma: 10,
            gpio: 18,
            brightness: 255,
            strip_type: StripType::Grb,
            frequency: 800_000,
            invert: false,
        }
    }
}

/// Orientation and composition flags applied to the strip at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct DisplayConfig {
    pub rotation: Rotation,
    pub flip_x: bool,
    pub flip_y: bool,
    pub background: Color,
    pub transparent: bool,
}

impl DisplayConfig {
    pub fn flip(&self) -> Flip {
        Flip::from_axes(self.flip_x, self.flip_y)
    }
}

/// Command server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the TCP listener binds to.
    pub bind: String,
    /// Period of the auto-render thread in milliseconds.
    pub auto_render_interval_ms: u64,
    /// Whether auto-render starts enabled.
    pub auto_render: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "0.0.0.0:7890".to_string(),
            auto_render_interval_ms: 33,
            auto_render: false,
        }
    }
}

/// Demo loop settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Sleep between frames in milliseconds.
    pub frame_interval_ms: u64,
    /// Stop after this many frames; `None` runs until the process is killed.
    pub max_frames: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            frame_interval_ms: 100,
            max_frames: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = serde_json::from_str(
            r#"{ "strip": { "width": 16, "height": 32 }, "display": { "rotation": 270, "background": 255 } }"#,
        )
        .unwrap();
        assert_eq!((config.strip.width, config.strip.height), (16, 32));
        assert_eq!(config.strip.gpio, 18);
        assert_eq!(config.strip.strip_type, StripType::Grb);
        assert_eq!(config.display.rotation, Rotation::Deg270);
        assert_eq!(config.display.background, Color::BLUE);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn invalid_rotation_is_a_parse_error() {
        let parsed = serde_json::from_str::<Config>(r#"{ "display": { "rotation": 45 } }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn strip_type_codes_match_ws2811_header() {
        assert_eq!(StripType::Grb.ws2811_code(), 0x0008_1000);
        let t: StripType = serde_json::from_str("\"rgb\"").unwrap();
        assert_eq!(t.ws2811_code(), 0x0010_0800);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load("/nonexistent/led-canvas.json").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }
}

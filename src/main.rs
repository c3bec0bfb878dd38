// src/main.rs

use std::sync::Arc;

use anyhow::{bail, Context};
use log::info;

use led_canvas::app::run_demo;
use led_canvas::config::CONFIG;
use led_canvas::server::Server;
use led_canvas::service::SharedCanvas;
use led_canvas::strip::{LedStrip, StripDriver};

const USAGE: &str = "usage: led-canvas [demo|serve]";

#[cfg(feature = "ws2811")]
fn make_driver() -> Box<dyn StripDriver> {
    Box::new(led_canvas::strip::drivers::Ws2811Driver::new())
}

#[cfg(not(feature = "ws2811"))]
fn make_driver() -> Box<dyn StripDriver> {
    log::warn!("Built without the `ws2811` feature; frames go to the headless driver.");
    Box::new(led_canvas::strip::drivers::HeadlessDriver::new())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let mode = std::env::args().nth(1).unwrap_or_else(|| "demo".to_string());
    info!("Starting led-canvas ({})...", mode);

    let config = &*CONFIG;
    let mut strip = LedStrip::new(config.strip.clone(), make_driver());
    strip.init().context("Failed to initialize LED strip")?;
    strip
        .configure(&config.display)
        .context("Failed to apply display configuration")?;

    match mode.as_str() {
        "demo" => {
            run_demo(&mut strip, &config.demo)?;
        }
        "serve" => {
            let server = Server::bind(config.server.bind.as_str())?;
            let canvas = Arc::new(SharedCanvas::new(strip, &config.server)?);
            server.run(canvas)?;
        }
        other => bail!("unknown mode '{}'. {}", other, USAGE),
    }

    info!("led-canvas exited successfully.");
    Ok(())
}

// src/service.rs

//! SharedCanvas - one strip shared by command handlers and the auto-render thread.
//!
//! Threading model:
//! - One `Mutex` guards the whole strip; every command locks it once
//! - The auto-render thread wakes every `auto_render_interval_ms` and renders
//!   while the auto-render flag is set
//! - Dropping the `SharedCanvas` stops and joins the thread

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Context;
use log::*;

use crate::canvas::{PaintDevice, PaintSource};
use crate::command::{Command, Response};
use crate::config::ServerConfig;
use crate::error::Result;
use crate::glyph::{Number3x5, Text4x8};
use crate::orientation::Flip;
use crate::strip::LedStrip;

pub struct SharedCanvas {
    strip: Arc<Mutex<LedStrip>>,
    auto_render: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl SharedCanvas {
    /// Takes ownership of `strip` and spawns the auto-render thread.
    pub fn new(strip: LedStrip, config: &ServerConfig) -> anyhow::Result<Self> {
        let strip = Arc::new(Mutex::new(strip));
        let auto_render = Arc::new(AtomicBool::new(config.auto_render));
        let shutdown = Arc::new(AtomicBool::new(false));
        let interval = Duration::from_millis(config.auto_render_interval_ms.max(1));

        let thread = {
            let strip = Arc::clone(&strip);
            let auto_render = Arc::clone(&auto_render);
            let shutdown = Arc::clone(&shutdown);
            thread::Builder::new()
                .name("auto-render".to_string())
                .spawn(move || auto_render_loop(strip, auto_render, shutdown, interval))
                .context("Failed to spawn auto-render thread")?
        };
        info!("SharedCanvas: auto-render thread spawned ({:?})", interval);

        Ok(Self {
            strip,
            auto_render,
            shutdown,
            thread: Some(thread),
        })
    }

    pub fn auto_render(&self) -> bool {
        self.auto_render.load(Ordering::Acquire)
    }

    pub fn set_auto_render(&self, enabled: bool) {
        self.auto_render.store(enabled, Ordering::Release);
        debug!("SharedCanvas: auto-render {}", enabled);
    }

    /// Runs `f` with exclusive access to the strip.
    pub fn with_strip<R>(&self, f: impl FnOnce(&mut LedStrip) -> R) -> R {
        f(&mut lock(&self.strip))
    }

    /// Applies one command and builds its reply.
    pub fn execute(&self, command: Command) -> Response {
        trace!("SharedCanvas: {:?}", command);
        if let Command::SetAutoRender { enabled } = command {
            self.set_auto_render(enabled);
            return Response::ok();
        }
        match apply(&mut lock(&self.strip), command) {
            Ok(Some(value)) => Response::value(value),
            Ok(None) => Response::ok(),
            Err(e) => {
                warn!("SharedCanvas: command failed: {}", e);
                Response::error(e.to_string())
            }
        }
    }
}

impl Drop for SharedCanvas {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            thread.thread().unpark();
            if thread.join().is_err() {
                error!("SharedCanvas: auto-render thread panicked");
            }
        }
    }
}

fn lock(strip: &Mutex<LedStrip>) -> MutexGuard<'_, LedStrip> {
    strip.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn auto_render_loop(
    strip: Arc<Mutex<LedStrip>>,
    auto_render: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
    interval: Duration,
) {
    info!("auto-render: Thread started");
    let mut health = RenderHealth::default();
    while !shutdown.load(Ordering::Acquire) {
        thread::park_timeout(interval);
        if shutdown.load(Ordering::Acquire) {
            break;
        }
        if auto_render.load(Ordering::Acquire) {
            let result = lock(&strip).render();
            health.record(&result);
        }
    }
    info!("auto-render: Thread stopped");
}

/// Logs render failures once per outage instead of once per frame.
#[derive(Debug, Default)]
struct RenderHealth {
    failures: u64,
}

impl RenderHealth {
    /// Returns true when `result` was logged above `trace`.
    fn record(&mut self, result: &Result<()>) -> bool {
        match result {
            Ok(()) if self.failures > 0 => {
                info!("auto-render: recovered after {} failed frames", self.failures);
                self.failures = 0;
                true
            }
            Ok(()) => false,
            Err(e) => {
                self.failures += 1;
                if self.failures == 1 {
                    warn!("auto-render: render failed: {}", e);
                    true
                } else {
                    trace!("auto-render: render failed again ({}): {}", self.failures, e);
                    false
                }
            }
        }
    }
}

/// Executes a canvas command. Query commands return their value.
fn apply(strip: &mut LedStrip, command: Command) -> Result<Option<u64>> {
    match command {
        Command::Render => strip.render()?,
        Command::DrawPixel { x, y, color } => *strip.pixel_mut(x, y)? = color,
        Command::DrawText {
            x,
            y,
            text,
            color,
            background,
        } => {
            let back = background.unwrap_or_else(|| strip.background());
            let text = Text4x8::new(text).with_color(color).with_background(back);
            strip.draw(&text, x, y, Flip::empty())?;
        }
        Command::DrawNumber { x, y, number, color } => {
            let number = Number3x5::new(number)
                .with_color(color)
                .with_background(strip.background());
            strip.draw(&number, x, y, Flip::empty())?;
        }
        Command::Clear => strip.clear()?,
        Command::Width => return Ok(Some(strip.width() as u64)),
        Command::Height => return Ok(Some(strip.height() as u64)),
        Command::Pixel { x, y } => return Ok(Some(strip.pixel(x, y)?.to_u32() as u64)),
        Command::SetRotate {
            degree,
            flip_x,
            flip_y,
        } => strip.set_rotation(degree, Flip::from_axes(flip_x, flip_y))?,
        Command::SetTransparent { enabled } => strip.set_transparent(enabled),
        Command::SetBackground { color } => strip.set_background(color),
        // Handled by the caller; the flag lives outside the strip.
        Command::SetAutoRender { .. } => {}
    }
    Ok(None)
}

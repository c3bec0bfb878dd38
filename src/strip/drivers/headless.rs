// src/strip/drivers/headless.rs

//! Headless strip driver.
//!
//! Accepts every frame and records it instead of driving hardware. Useful on
//! development machines and as the driver behind tests.

use std::sync::{Arc, Mutex, MutexGuard};

use log::{info, trace};

use crate::color::Color;
use crate::config::StripConfig;
use crate::error::{CanvasError, Result};
use crate::strip::driver::StripDriver;

/// What the headless driver has seen so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessState {
    pub initialized: bool,
    pub frames_rendered: u64,
    pub waits: u64,
    /// Most recent frame, in wiring order.
    pub last_frame: Vec<Color>,
}

/// Cloneable handle onto a [`HeadlessDriver`]'s recorded state.
#[derive(Debug, Clone, Default)]
pub struct HeadlessMonitor(Arc<Mutex<HeadlessState>>);

impl HeadlessMonitor {
    /// Snapshot of the recorded state.
    pub fn state(&self) -> HeadlessState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, HeadlessState> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Default)]
pub struct HeadlessDriver {
    monitor: HeadlessMonitor,
    expected_len: usize,
}

impl HeadlessDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that keeps observing the driver after it is moved into a strip.
    pub fn monitor(&self) -> HeadlessMonitor {
        self.monitor.clone()
    }
}

impl StripDriver for HeadlessDriver {
    fn init(&mut self, config: &StripConfig) -> Result<()> {
        info!(
            "HeadlessDriver: init {}x{} (dma {}, gpio {}, brightness {})",
            config.width, config.height, config.dma, config.gpio, config.brightness
        );
        self.expected_len = config.width * config.height;
        let mut state = self.monitor.lock();
        state.initialized = true;
        state.last_frame = vec![Color::BLACK; self.expected_len];
        Ok(())
    }

    fn render(&mut self, leds: &[Color]) -> Result<()> {
        let mut state = self.monitor.lock();
        if !state.initialized {
            return Err(CanvasError::NotInitialized);
        }
        if leds.len() != self.expected_len {
            return Err(CanvasError::Driver(format!(
                "frame has {} pixels, strip has {}",
                leds.len(),
                self.expected_len
            )));
        }
        state.last_frame.copy_from_slice(leds);
        state.frames_rendered += 1;
        trace!("HeadlessDriver: frame {}", state.frames_rendered);
        Ok(())
    }

    fn wait(&mut self) -> Result<()> {
        self.monitor.lock().waits += 1;
        Ok(())
    }

    fn uninit(&mut self) -> Result<()> {
        info!("HeadlessDriver: uninit");
        self.monitor.lock().initialized = false;
        Ok(())
    }
}

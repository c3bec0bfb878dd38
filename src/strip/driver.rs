// src/strip/driver.rs
//! StripDriver trait - the seam between the canvas and LED hardware.
//!
//! The canvas never talks to hardware directly. It hands its pixel memory to a
//! driver, which owns everything native: DMA setup, GPIO, timing and the
//! transfer itself.
//!
//! ## Lifecycle
//! 1. `init(config)` - allocate native resources for the configured strip
//! 2. `render(leds)` / `wait()` - any number of flushes
//! 3. `uninit()` - release native resources; `init` may be called again

use crate::color::Color;
use crate::config::StripConfig;
use crate::error::Result;

/// Hardware backend for a [`LedStrip`](super::LedStrip).
///
/// `Send` so a strip can be shared behind a mutex between the command server
/// and the auto-render thread.
pub trait StripDriver: Send {
    /// Allocates native resources for `config`.
    fn init(&mut self, config: &StripConfig) -> Result<()>;

    /// Pushes one frame to the LEDs.
    ///
    /// `leds` is in wiring order and holds exactly `width * height` entries.
    /// May block until the previous transfer has completed.
    fn render(&mut self, leds: &[Color]) -> Result<()>;

    /// Blocks until the last `render` has finished transferring.
    fn wait(&mut self) -> Result<()>;

    /// Releases native resources.
    fn uninit(&mut self) -> Result<()>;
}

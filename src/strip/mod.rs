// src/strip/mod.rs

//! `LedStrip` - a writable canvas bound to a physical LED matrix.
//!
//! Pixel memory is laid out serpentine, the way zig-zag wired matrices are
//! chained, so [`LedStrip::render`] hands the buffer to the driver unchanged.
//! Rotation and flips only change how logical coordinates reach that memory.

pub mod driver;
pub mod drivers;

pub use driver::StripDriver;

use log::{debug, error, info, trace};

use crate::canvas::{PaintDevice, PaintSource};
use crate::color::Color;
use crate::config::{DisplayConfig, StripConfig};
use crate::error::{CanvasError, Result};
use crate::layout::Layout;
use crate::orientation::Flip;
use crate::pixmap::Pixmap;

pub struct LedStrip {
    pixmap: Pixmap,
    config: StripConfig,
    driver: Box<dyn StripDriver>,
    initialized: bool,
}

impl LedStrip {
    /// A black strip of `config.width x config.height` physical pixels.
    ///
    /// The driver is not touched until [`init`](Self::init).
    pub fn new(config: StripConfig, driver: Box<dyn StripDriver>) -> Self {
        Self {
            pixmap: Pixmap::with_layout(config.width, config.height, Layout::Serpentine),
            config,
            driver,
            initialized: false,
        }
    }

    pub fn config(&self) -> &StripConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Wiring-order memory, as the next `render` will send it.
    pub fn leds(&self) -> &[Color] {
        self.pixmap.as_slice()
    }

    /// Applies orientation and composition flags from the config file.
    pub fn configure(&mut self, display: &DisplayConfig) -> Result<()> {
        self.pixmap.set_rotation(display.rotation.degrees(), display.flip())?;
        self.pixmap.set_background(display.background);
        self.pixmap.set_transparent(display.transparent);
        debug!(
            "LedStrip: rotation {}, flip {:?}, background {}, transparent {}",
            display.rotation.degrees(),
            display.flip(),
            display.background,
            display.transparent
        );
        Ok(())
    }

    pub fn init(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        self.driver.init(&self.config)?;
        self.initialized = true;
        info!(
            "LedStrip: initialized {}x{} on GPIO {}",
            self.config.width, self.config.height, self.config.gpio
        );
        Ok(())
    }

    /// Flushes the current contents to the LEDs. May block.
    pub fn render(&mut self) -> Result<()> {
        if !self.initialized {
            return Err(CanvasError::NotInitialized);
        }
        trace!("LedStrip: render");
        self.driver.render(self.pixmap.as_slice())
    }

    /// Blocks until the last render has been transferred.
    pub fn wait(&mut self) -> Result<()> {
        if !self.initialized {
            return Err(CanvasError::NotInitialized);
        }
        self.driver.wait()
    }

    pub fn uninit(&mut self) -> Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;
        info!("LedStrip: uninit");
        self.driver.uninit()
    }
}

impl Drop for LedStrip {
    fn drop(&mut self) {
        if let Err(e) = self.uninit() {
            error!("LedStrip: uninit on drop failed: {}", e);
        }
    }
}

impl PaintSource for LedStrip {
    fn width(&self) -> usize {
        self.pixmap.width()
    }

    fn height(&self) -> usize {
        self.pixmap.height()
    }

    fn pixel(&self, x: i32, y: i32) -> Result<Color> {
        self.pixmap.pixel(x, y)
    }

    fn background(&self) -> Color {
        self.pixmap.background()
    }
}

impl PaintDevice for LedStrip {
    fn pixel_mut(&mut self, x: i32, y: i32) -> Result<&mut Color> {
        self.pixmap.pixel_mut(x, y)
    }

    fn set_background(&mut self, color: Color) {
        self.pixmap.set_background(color);
    }

    fn set_transparent(&mut self, transparent: bool) {
        self.pixmap.set_transparent(transparent);
    }

    fn is_transparent(&self) -> bool {
        self.pixmap.is_transparent()
    }

    fn set_rotation(&mut self, degree: i32, flip: Flip) -> Result<()> {
        self.pixmap.set_rotation(degree, flip)
    }

    fn clear(&mut self) -> Result<()> {
        self.pixmap.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::Rotation;
    use drivers::HeadlessDriver;
    use test_log::test;

    fn strip(width: usize, height: usize) -> (LedStrip, drivers::HeadlessMonitor) {
        let driver = HeadlessDriver::new();
        let monitor = driver.monitor();
        let config = StripConfig {
            width,
            height,
            ..StripConfig::default()
        };
        (LedStrip::new(config, Box::new(driver)), monitor)
    }

    #[test]
    fn render_before_init_fails() {
        let (mut s, monitor) = strip(4, 2);
        assert_eq!(s.render(), Err(CanvasError::NotInitialized));
        assert_eq!(s.wait(), Err(CanvasError::NotInitialized));
        assert_eq!(monitor.state().frames_rendered, 0);
    }

    #[test]
    fn frames_arrive_in_serpentine_order() {
        let (mut s, monitor) = strip(4, 2);
        s.init().unwrap();
        *s.pixel_mut(2, 1).unwrap() = Color::RED;
        *s.pixel_mut(0, 0).unwrap() = Color::GREEN;
        s.render().unwrap();

        let state = monitor.state();
        assert_eq!(state.frames_rendered, 1);
        assert_eq!(state.last_frame[0], Color::GREEN);
        // Row 1 runs right to left: x=2 is the sixth LED.
        assert_eq!(state.last_frame[5], Color::RED);
        assert_eq!(state.last_frame.iter().filter(|c| **c != Color::BLACK).count(), 2);
    }

    #[test]
    fn rotated_panel_swaps_logical_size() {
        let (mut s, _) = strip(16, 32);
        s.set_rotation(270, Flip::empty()).unwrap();
        assert_eq!((s.width(), s.height()), (32, 16));
        assert!(s.pixel_mut(31, 15).is_ok());
        assert!(s.pixel_mut(15, 31).is_err());
    }

    #[test]
    fn configure_applies_display_section() {
        let (mut s, _) = strip(16, 32);
        let display = DisplayConfig {
            rotation: Rotation::Deg90,
            background: Color::BLUE,
            transparent: true,
            ..DisplayConfig::default()
        };
        s.configure(&display).unwrap();
        assert_eq!((s.width(), s.height()), (32, 16));
        assert!(s.is_transparent());
        s.clear().unwrap();
        assert!(s.leds().iter().all(|c| *c == Color::BLUE));
    }

    #[test]
    fn drop_uninitializes_driver() {
        let (mut s, monitor) = strip(2, 2);
        assert!(!s.is_initialized());
        s.init().unwrap();
        assert!(s.is_initialized());
        assert!(monitor.state().initialized);
        drop(s);
        assert!(!monitor.state().initialized);
    }
}

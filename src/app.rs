// src/app.rs

//! The demo control loop.
//!
//! Builds a small window tree (two lines of text on a transparent root, a
//! rotated "!!" child drifting diagonally and a "1145" child scrolling
//! sideways) and plays it on a strip: clear, move the children, composite the
//! root into the strip, render, sleep.

use std::time::Duration;

use anyhow::{Context, Result};
use log::*;

use crate::canvas::{PaintDevice, PaintSource};
use crate::color::Color;
use crate::config::DemoConfig;
use crate::glyph::Text4x8;
use crate::orientation::Flip;
use crate::strip::LedStrip;
use crate::window::{Compositor, WindowId};

pub struct Demo {
    compositor: Compositor,
    root: WindowId,
    drifting: WindowId,
    scrolling: WindowId,
}

impl Demo {
    /// Builds the scene for a `width x height` logical canvas.
    pub fn new(width: usize, height: usize) -> crate::error::Result<Self> {
        let mut compositor = Compositor::new();
        let root = compositor.create_window(width, height);
        let drifting = compositor.create_child(root, 0, 0, 8, 8)?;
        let scrolling = compositor.create_child(root, 0, 4, 16, 8)?;

        let window = compositor.window_mut(root)?;
        window.draw(&Text4x8::new("Hello").with_color(Color::RED), 0, 0, Flip::empty())?;
        window.draw(&Text4x8::new("World").with_color(Color::GREEN), 8, 8, Flip::empty())?;
        window.set_transparent(true);

        let window = compositor.window_mut(drifting)?;
        window.draw(&Text4x8::new("!!").with_color(Color::BLUE), 0, 0, Flip::empty())?;
        window.set_rotation(90, Flip::empty())?;

        compositor
            .window_mut(scrolling)?
            .draw(&Text4x8::new("1145").with_color(Color::WHITE), 0, 0, Flip::empty())?;

        debug!("Demo: scene built on {}x{}", width, height);
        Ok(Self {
            compositor,
            root,
            drifting,
            scrolling,
        })
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn root(&self) -> WindowId {
        self.root
    }

    /// Advances the animation by one step without drawing.
    pub fn advance(&mut self) -> crate::error::Result<()> {
        let root = self.compositor.window(self.root)?;
        let (w, h) = (root.width() as i32, root.height() as i32);

        let (x, y) = self.compositor.position(self.drifting)?.unwrap_or((0, 0));
        self.compositor
            .move_window(self.drifting, (x + 1) % w, (y + 1) % h)?;
        let (x, y) = self.compositor.position(self.scrolling)?.unwrap_or((0, 0));
        self.compositor.move_window(self.scrolling, (x + 1) % w, y)?;
        Ok(())
    }

    /// Clears `strip`, advances the scene and composites it into the strip.
    pub fn frame(&mut self, strip: &mut LedStrip) -> crate::error::Result<()> {
        strip.clear()?;
        self.advance()?;
        strip.draw(&self.compositor.window(self.root)?, 0, 0, Flip::empty())
    }
}

/// Plays the demo until `config.max_frames` is reached (forever without it).
///
/// Returns the number of frames rendered.
pub fn run_demo(strip: &mut LedStrip, config: &DemoConfig) -> Result<u64> {
    let mut demo = Demo::new(strip.width(), strip.height()).context("Failed to build demo scene")?;
    let interval = Duration::from_millis(config.frame_interval_ms);
    info!(
        "Demo: starting on {}x{}, {:?} per frame",
        strip.width(),
        strip.height(),
        interval
    );

    let mut frames = 0u64;
    while config.max_frames.map_or(true, |max| frames < max) {
        demo.frame(strip).context("Failed to compose frame")?;
        strip.render().context("Failed to render frame")?;
        frames += 1;
        trace!("Demo: frame {}", frames);
        std::thread::sleep(interval);
    }
    info!("Demo: stopped after {} frames", frames);
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StripConfig;
    use crate::strip::drivers::HeadlessDriver;
    use test_log::test;

    #[test]
    fn children_wrap_around_the_root() {
        let mut demo = Demo::new(32, 16).unwrap();
        for _ in 0..32 {
            demo.advance().unwrap();
        }
        assert_eq!(demo.compositor.position(demo.drifting).unwrap(), Some((0, 0)));
        assert_eq!(demo.compositor.position(demo.scrolling).unwrap(), Some((0, 4)));
    }

    #[test]
    fn run_demo_stops_after_max_frames() {
        let driver = HeadlessDriver::new();
        let monitor = driver.monitor();
        let mut strip = LedStrip::new(
            StripConfig {
                width: 16,
                height: 32,
                ..StripConfig::default()
            },
            Box::new(driver),
        );
        strip.init().unwrap();
        strip.set_rotation(270, Flip::empty()).unwrap();
        strip.set_transparent(true);

        let config = DemoConfig {
            frame_interval_ms: 0,
            max_frames: Some(3),
        };
        assert_eq!(run_demo(&mut strip, &config).unwrap(), 3);
        let state = monitor.state();
        assert_eq!(state.frames_rendered, 3);
        // "Hello" in red stays lit on the transparent root.
        assert!(state.last_frame.contains(&Color::RED));
    }

    #[test]
    fn run_demo_requires_initialized_strip() {
        let mut strip = LedStrip::new(StripConfig::default(), Box::new(HeadlessDriver::new()));
        let config = DemoConfig {
            frame_interval_ms: 0,
            max_frames: Some(1),
        };
        assert!(run_demo(&mut strip, &config).is_err());
    }
}

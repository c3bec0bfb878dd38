// src/canvas.rs

//! Read and write contracts shared by everything that holds pixels.
//!
//! - [`PaintSource`]: anything with a size and readable pixels (glyphs, text,
//!   pixmaps, composited window trees, the strip itself).
//! - [`PaintDevice`]: a source that can also be written to. Composition
//!   (`clear`, `draw`, `flip`) is provided on top of `pixel_mut`, so a device
//!   only has to supply storage, its flags and its orientation.
//!
//! All coordinates are logical. Reads and writes outside
//! `[0, width) x [0, height)` fail with `OutOfRange`; `draw` clips instead.

use crate::color::Color;
use crate::error::Result;
use crate::orientation::Flip;

/// Read-only pixel access.
pub trait PaintSource {
    /// Logical width.
    fn width(&self) -> usize;

    /// Logical height.
    fn height(&self) -> usize;

    /// Color at logical `(x, y)`.
    fn pixel(&self, x: i32, y: i32) -> Result<Color>;

    /// The background color this source declares.
    ///
    /// Compositors treat pixels equal to it as see-through when transparency
    /// is enabled.
    fn background(&self) -> Color {
        Color::BLACK
    }
}

/// Mutable canvas with chroma-key composition.
pub trait PaintDevice: PaintSource {
    /// Mutable reference to the pixel at logical `(x, y)`.
    fn pixel_mut(&mut self, x: i32, y: i32) -> Result<&mut Color>;

    /// Sets the color used by `clear` and as the transparency key.
    fn set_background(&mut self, color: Color);

    fn set_transparent(&mut self, transparent: bool);

    fn is_transparent(&self) -> bool;

    /// Reconfigures the orientation transform. See [`crate::orientation::Orientation::set_rotation`].
    fn set_rotation(&mut self, degree: i32, flip: Flip) -> Result<()>;

    /// Fills every pixel with the background color.
    fn clear(&mut self) -> Result<()> {
        let back = self.background();
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                *self.pixel_mut(x, y)? = back;
            }
        }
        Ok(())
    }

    /// Copies `src` with its top-left corner at `(x, y)`.
    ///
    /// Pixels landing outside this canvas are dropped. With transparency on,
    /// source pixels equal to this canvas's background leave the destination
    /// untouched.
    ///
    /// The key is always the destination's background, never
    /// `src.background()`: a glyph with a black background drawn onto a
    /// transparent canvas keyed on blue still paints its black cells. Give the
    /// glyph the canvas background to get stroke-only text.
    fn draw(&mut self, src: &dyn PaintSource, x: i32, y: i32, flip: Flip) -> Result<()> {
        let (src_w, src_h) = (src.width() as i64, src.height() as i64);
        let (dst_w, dst_h) = (self.width() as i64, self.height() as i64);
        let key = self.is_transparent().then(|| self.background());

        for sy in 0..src_h {
            let oy = if flip.contains(Flip::Y) { src_h - sy - 1 } else { sy };
            let dy = y as i64 + oy;
            if dy < 0 || dy >= dst_h {
                continue;
            }
            for sx in 0..src_w {
                let ox = if flip.contains(Flip::X) { src_w - sx - 1 } else { sx };
                let dx = x as i64 + ox;
                if dx < 0 || dx >= dst_w {
                    continue;
                }
                let color = src.pixel(sx as i32, sy as i32)?;
                if key == Some(color) {
                    continue;
                }
                *self.pixel_mut(dx as i32, dy as i32)? = color;
            }
        }
        Ok(())
    }

    /// Mirrors the canvas contents in place.
    ///
    /// Each pixel is paired with its mirror image and every pair is swapped
    /// once, from the member with the lower row-major position. Pixels on an
    /// odd middle row or column are their own mirror and stay put.
    fn flip(&mut self, flip: Flip) -> Result<()> {
        if flip.is_empty() {
            return Ok(());
        }
        let (w, h) = (self.width(), self.height());
        for y in 0..h {
            for x in 0..w {
                let mx = if flip.contains(Flip::X) { w - x - 1 } else { x };
                let my = if flip.contains(Flip::Y) { h - y - 1 } else { y };
                if (my, mx) <= (y, x) {
                    continue;
                }
                let a = *self.pixel_mut(x as i32, y as i32)?;
                let b = std::mem::replace(self.pixel_mut(mx as i32, my as i32)?, a);
                *self.pixel_mut(x as i32, y as i32)? = b;
            }
        }
        Ok(())
    }
}

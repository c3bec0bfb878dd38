// src/pixmap.rs

//! `Pixmap` - a dense in-memory canvas.
//!
//! Storage is a flat `Vec<Color>` sized to the physical dimensions. Reads and
//! writes go through an [`Orientation`], so rotating a pixmap re-interprets the
//! same memory rather than copying it.

use crate::canvas::{PaintDevice, PaintSource};
use crate::color::Color;
use crate::error::{check_bounds, Result};
use crate::layout::Layout;
use crate::orientation::{Flip, Orientation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    orientation: Orientation,
    pixels: Vec<Color>,
    background: Color,
    transparent: bool,
}

impl Pixmap {
    /// A black `width x height` pixmap with raster layout.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_layout(width, height, Layout::Raster)
    }

    /// A black pixmap whose memory follows `layout`.
    pub fn with_layout(width: usize, height: usize, layout: Layout) -> Self {
        Self {
            orientation: Orientation::new(width, height, layout),
            pixels: vec![Color::BLACK; width * height],
            background: Color::BLACK,
            transparent: false,
        }
    }

    /// Copies every pixel of `src` into a new raster pixmap of the same size.
    ///
    /// The copy inherits the source's declared background.
    pub fn from_source(src: &dyn PaintSource) -> Result<Self> {
        let mut pixmap = Pixmap::new(src.width(), src.height());
        pixmap.background = src.background();
        for y in 0..src.height() as i32 {
            for x in 0..src.width() as i32 {
                *pixmap.pixel_mut(x, y)? = src.pixel(x, y)?;
            }
        }
        Ok(pixmap)
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    /// Raw memory in layout order, independent of rotation.
    pub fn as_slice(&self) -> &[Color] {
        &self.pixels
    }

    /// Sets every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }
}

impl PaintSource for Pixmap {
    fn width(&self) -> usize {
        self.orientation.width()
    }

    fn height(&self) -> usize {
        self.orientation.height()
    }

    fn pixel(&self, x: i32, y: i32) -> Result<Color> {
        let (x, y) = check_bounds(x, y, self.width(), self.height())?;
        Ok(self.pixels[self.orientation.index(x, y)])
    }

    fn background(&self) -> Color {
        self.background
    }
}

impl PaintDevice for Pixmap {
    fn pixel_mut(&mut self, x: i32, y: i32) -> Result<&mut Color> {
        let (x, y) = check_bounds(x, y, self.width(), self.height())?;
        let idx = self.orientation.index(x, y);
        Ok(&mut self.pixels[idx])
    }

    fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    fn set_transparent(&mut self, transparent: bool) {
        self.transparent = transparent;
    }

    fn is_transparent(&self) -> bool {
        self.transparent
    }

    fn set_rotation(&mut self, degree: i32, flip: Flip) -> Result<()> {
        self.orientation.set_rotation(degree, flip)
    }

    fn clear(&mut self) -> Result<()> {
        self.fill(self.background);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CanvasError;
    use test_log::test;

    /// Pixmap where every pixel holds its own row-major position.
    fn numbered(width: usize, height: usize) -> Pixmap {
        let mut p = Pixmap::new(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                *p.pixel_mut(x, y).unwrap() = Color::from_u32((y as u32) * width as u32 + x as u32 + 1);
            }
        }
        p
    }

    fn logical_contents(p: &Pixmap) -> Vec<Color> {
        (0..p.height() as i32)
            .flat_map(|y| (0..p.width() as i32).map(move |x| (x, y)))
            .map(|(x, y)| p.pixel(x, y).unwrap())
            .collect()
    }

    /// Copies what `src` shows under `degree` into a fresh unrotated pixmap.
    fn rotated_copy(src: &Pixmap, degree: i32) -> Pixmap {
        let mut view = src.clone();
        view.set_rotation(degree, Flip::empty()).unwrap();
        Pixmap::from_source(&view).unwrap()
    }

    #[test]
    fn starts_black_and_opaque() {
        let p = Pixmap::new(3, 2);
        assert_eq!(p.background(), Color::BLACK);
        assert!(!p.is_transparent());
        assert!(p.as_slice().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn out_of_range_reads_and_writes_fail() {
        let mut p = Pixmap::new(3, 2);
        assert!(matches!(p.pixel(3, 0), Err(CanvasError::OutOfRange { x: 3, y: 0, .. })));
        assert!(p.pixel(-1, 0).is_err());
        assert!(p.pixel_mut(0, 2).is_err());
    }

    #[test]
    fn rotation_reinterprets_without_copying() {
        let mut p = numbered(4, 3);
        let before = p.as_slice().to_vec();
        p.set_rotation(90, Flip::empty()).unwrap();
        assert_eq!((p.width(), p.height()), (3, 4));
        assert_eq!(p.as_slice(), &before[..]);
        // Logical (0,0) under 90° is physical (0, H-1).
        assert_eq!(p.pixel(0, 0).unwrap(), Color::from_u32(2 * 4 + 1));
    }

    #[test]
    fn rotation_then_inverse_restores_every_pixel() {
        let original = numbered(5, 3);
        for degree in [0, 90, 180, 270] {
            let rotated = rotated_copy(&original, degree);
            let inverse = crate::orientation::Rotation::try_from(degree).unwrap().inverse();
            let restored = rotated_copy(&rotated, inverse.degrees());
            assert_eq!(
                logical_contents(&restored),
                logical_contents(&original),
                "rotation {} did not invert",
                degree
            );
        }
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        let original = numbered(4, 4);
        let mut p = original.clone();
        for _ in 0..4 {
            p = rotated_copy(&p, 90);
        }
        assert_eq!(logical_contents(&p), logical_contents(&original));
        let half = rotated_copy(&rotated_copy(&original, 90), 90);
        assert_eq!(logical_contents(&half), logical_contents(&rotated_copy(&original, 180)));
    }

    #[test]
    fn flip_both_axes_twice_restores_contents() {
        for (w, h) in [(4, 4), (5, 3), (3, 5), (1, 1), (2, 7)] {
            let original = numbered(w, h);
            let mut p = original.clone();
            p.flip(Flip::X | Flip::Y).unwrap();
            p.flip(Flip::X | Flip::Y).unwrap();
            assert_eq!(p, original, "{}x{}", w, h);
        }
    }

    #[test]
    fn flip_moves_each_pixel_to_its_mirror() {
        for (w, h) in [(5, 3), (4, 2), (3, 3)] {
            let original = numbered(w, h);
            for flip in [Flip::X, Flip::Y, Flip::X | Flip::Y] {
                let mut p = original.clone();
                p.flip(flip).unwrap();
                for y in 0..h {
                    for x in 0..w {
                        let mx = if flip.contains(Flip::X) { w - x - 1 } else { x };
                        let my = if flip.contains(Flip::Y) { h - y - 1 } else { y };
                        assert_eq!(
                            p.pixel(mx as i32, my as i32).unwrap(),
                            original.pixel(x as i32, y as i32).unwrap(),
                            "{}x{} {:?} at ({}, {})",
                            w,
                            h,
                            flip,
                            x,
                            y
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn draw_clips_at_every_edge() {
        let mut dst = Pixmap::new(4, 4);
        let mut src = Pixmap::new(3, 3);
        src.fill(Color::RED);
        dst.draw(&src, 2, 2, Flip::empty()).unwrap();
        dst.draw(&src, -2, -2, Flip::empty()).unwrap();
        assert_eq!(dst.pixel(3, 3).unwrap(), Color::RED);
        assert_eq!(dst.pixel(0, 0).unwrap(), Color::RED);
        assert_eq!(dst.pixel(1, 1).unwrap(), Color::BLACK);
        assert_eq!(dst.pixel(2, 1).unwrap(), Color::BLACK);
        dst.draw(&src, 10, 10, Flip::empty()).unwrap();
    }

    #[test]
    fn draw_with_flip_mirrors_source() {
        let src = numbered(3, 2);
        let mut dst = Pixmap::new(3, 2);
        dst.draw(&src, 0, 0, Flip::X).unwrap();
        assert_eq!(dst.pixel(0, 0).unwrap(), src.pixel(2, 0).unwrap());
        dst.draw(&src, 0, 0, Flip::Y).unwrap();
        assert_eq!(dst.pixel(0, 0).unwrap(), src.pixel(0, 1).unwrap());
    }

    #[test]
    fn transparent_draw_skips_key_color() {
        let mut src = Pixmap::new(2, 1);
        *src.pixel_mut(0, 0).unwrap() = Color::BLACK;
        *src.pixel_mut(1, 0).unwrap() = Color::GREEN;

        let mut dst = Pixmap::new(2, 1);
        dst.fill(Color::BLUE);
        dst.set_transparent(true);
        dst.draw(&src, 0, 0, Flip::empty()).unwrap();
        assert_eq!(dst.pixel(0, 0).unwrap(), Color::BLUE);
        assert_eq!(dst.pixel(1, 0).unwrap(), Color::GREEN);

        dst.set_transparent(false);
        dst.draw(&src, 0, 0, Flip::empty()).unwrap();
        assert_eq!(dst.pixel(0, 0).unwrap(), Color::BLACK);
    }

    #[test]
    fn transparent_draw_keys_on_destination_background() {
        use crate::glyph::Ascii4x8;

        let mut dst = Pixmap::new(4, 8);
        dst.set_background(Color::BLUE);
        dst.fill(Color::YELLOW);
        dst.set_transparent(true);

        // Black glyph cells are not the key, so they land.
        let glyph = Ascii4x8::new(' ');
        dst.draw(&glyph, 0, 0, Flip::empty()).unwrap();
        assert_eq!(dst.pixel(0, 0).unwrap(), Color::BLACK);

        dst.fill(Color::YELLOW);
        let glyph = glyph.with_background(Color::BLUE);
        dst.draw(&glyph, 0, 0, Flip::empty()).unwrap();
        assert_eq!(dst.pixel(0, 0).unwrap(), Color::YELLOW);
    }

    #[test]
    fn clear_uses_current_background() {
        let mut p = numbered(3, 3);
        p.set_background(Color::CYAN);
        p.clear().unwrap();
        assert!(p.as_slice().iter().all(|&c| c == Color::CYAN));
    }
}

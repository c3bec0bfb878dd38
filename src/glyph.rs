// src/glyph.rs

//! Drawable glyph sources backed by the static fonts in [`crate::font`].
//!
//! Each source is a [`PaintSource`] that renders lit bits in its foreground
//! color and unlit bits in its background color, so drawing one onto a
//! transparent canvas with a matching background leaves only the strokes.

use crate::canvas::PaintSource;
use crate::color::Color;
use crate::error::{check_bounds, CanvasError, Result};
use crate::font::{
    ascii_bitmap, bit_is_set, ASCII_HEIGHT, ASCII_WIDTH, DIGITS_3X5, DIGIT_HEIGHT, DIGIT_WIDTH,
};

/// Blank columns between digits in a [`Number3x5`].
pub const DIGIT_SPACING: usize = 1;

/// A single 3x5 digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digit3x5 {
    digit: u8,
    pub color: Color,
    pub back: Color,
}

impl Digit3x5 {
    /// White-on-black digit. Fails for anything above 9.
    pub fn new(digit: u8) -> Result<Self> {
        if digit as usize >= DIGITS_3X5.len() {
            return Err(CanvasError::InvalidDigit(digit as u32));
        }
        Ok(Self {
            digit,
            color: Color::WHITE,
            back: Color::BLACK,
        })
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_background(mut self, back: Color) -> Self {
        self.back = back;
        self
    }

    pub fn digit(&self) -> u8 {
        self.digit
    }
}

impl PaintSource for Digit3x5 {
    fn width(&self) -> usize {
        DIGIT_WIDTH
    }

    fn height(&self) -> usize {
        DIGIT_HEIGHT
    }

    fn pixel(&self, x: i32, y: i32) -> Result<Color> {
        let (x, y) = check_bounds(x, y, DIGIT_WIDTH, DIGIT_HEIGHT)?;
        let bits = DIGITS_3X5[self.digit as usize] as u32;
        Ok(if bit_is_set(bits, DIGIT_WIDTH, DIGIT_HEIGHT, x, y) {
            self.color
        } else {
            self.back
        })
    }

    fn background(&self) -> Color {
        self.back
    }
}

/// A row of 3x5 digits with [`DIGIT_SPACING`] blank columns between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number3x5 {
    digits: Vec<u8>,
    pub color: Color,
    pub back: Color,
}

impl Number3x5 {
    pub fn new(number: u64) -> Self {
        let digits = number
            .to_string()
            .bytes()
            .map(|b| b - b'0')
            .collect();
        Self {
            digits,
            color: Color::WHITE,
            back: Color::BLACK,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_background(mut self, back: Color) -> Self {
        self.back = back;
        self
    }
}

impl PaintSource for Number3x5 {
    fn width(&self) -> usize {
        self.digits.len() * (DIGIT_WIDTH + DIGIT_SPACING) - DIGIT_SPACING
    }

    fn height(&self) -> usize {
        DIGIT_HEIGHT
    }

    fn pixel(&self, x: i32, y: i32) -> Result<Color> {
        let (x, y) = check_bounds(x, y, self.width(), self.height())?;
        let cell = x / (DIGIT_WIDTH + DIGIT_SPACING);
        let col = x % (DIGIT_WIDTH + DIGIT_SPACING);
        if col >= DIGIT_WIDTH {
            return Ok(self.back);
        }
        let bits = DIGITS_3X5[self.digits[cell] as usize] as u32;
        Ok(if bit_is_set(bits, DIGIT_WIDTH, DIGIT_HEIGHT, col, y) {
            self.color
        } else {
            self.back
        })
    }

    fn background(&self) -> Color {
        self.back
    }
}

/// A single 4x8 character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ascii4x8 {
    c: char,
    bits: u32,
    pub color: Color,
    pub back: Color,
}

impl Ascii4x8 {
    /// White-on-black character. Non-printable input renders as the unknown glyph.
    pub fn new(c: char) -> Self {
        Self {
            c,
            bits: ascii_bitmap(c),
            color: Color::WHITE,
            back: Color::BLACK,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_background(mut self, back: Color) -> Self {
        self.back = back;
        self
    }

    pub fn char(&self) -> char {
        self.c
    }

    pub fn set_char(&mut self, c: char) {
        self.c = c;
        self.bits = ascii_bitmap(c);
    }
}

impl PaintSource for Ascii4x8 {
    fn width(&self) -> usize {
        ASCII_WIDTH
    }

    fn height(&self) -> usize {
        ASCII_HEIGHT
    }

    fn pixel(&self, x: i32, y: i32) -> Result<Color> {
        let (x, y) = check_bounds(x, y, ASCII_WIDTH, ASCII_HEIGHT)?;
        Ok(if bit_is_set(self.bits, ASCII_WIDTH, ASCII_HEIGHT, x, y) {
            self.color
        } else {
            self.back
        })
    }

    fn background(&self) -> Color {
        self.back
    }
}

/// A line of 4x8 characters with no spacing between cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text4x8 {
    text: String,
    cells: Vec<u32>,
    pub color: Color,
    pub back: Color,
}

impl Text4x8 {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cells = text.chars().map(ascii_bitmap).collect();
        Self {
            text,
            cells,
            color: Color::WHITE,
            back: Color::BLACK,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_background(mut self, back: Color) -> Self {
        self.back = back;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cells = self.text.chars().map(ascii_bitmap).collect();
    }
}

impl From<&str> for Text4x8 {
    fn from(text: &str) -> Self {
        Text4x8::new(text)
    }
}

impl PaintSource for Text4x8 {
    fn width(&self) -> usize {
        self.cells.len() * ASCII_WIDTH
    }

    fn height(&self) -> usize {
        ASCII_HEIGHT
    }

    fn pixel(&self, x: i32, y: i32) -> Result<Color> {
        let (x, y) = check_bounds(x, y, self.width(), self.height())?;
        let bits = self.cells[x / ASCII_WIDTH];
        Ok(if bit_is_set(bits, ASCII_WIDTH, ASCII_HEIGHT, x % ASCII_WIDTH, y) {
            self.color
        } else {
            self.back
        })
    }

    fn background(&self) -> Color {
        self.back
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::ASCII_UNKNOWN;
    use test_log::test;

    fn rows(src: &dyn PaintSource) -> Vec<String> {
        (0..src.height() as i32)
            .map(|y| {
                (0..src.width() as i32)
                    .map(|x| if src.pixel(x, y).unwrap() == Color::BLACK { '.' } else { '#' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn seven_reads_top_down() {
        let seven = Digit3x5::new(7).unwrap();
        assert_eq!(rows(&seven), vec!["###", "..#", "..#", "..#", "..#"]);
    }

    #[test]
    fn digit_above_nine_is_rejected() {
        assert_eq!(Digit3x5::new(10).unwrap_err(), CanvasError::InvalidDigit(10));
    }

    #[test]
    fn digit_pixel_out_of_range() {
        let d = Digit3x5::new(0).unwrap();
        assert!(d.pixel(3, 0).is_err());
        assert!(d.pixel(0, 5).is_err());
    }

    #[test]
    fn number_spaces_digits_apart() {
        let n = Number3x5::new(17).with_color(Color::RED);
        assert_eq!(n.width(), 7);
        assert_eq!(rows(&n), vec![".#..###", ".#....#", ".#....#", ".#....#", ".#....#"]);
        assert_eq!(n.pixel(1, 0).unwrap(), Color::RED);
        assert_eq!(n.pixel(3, 0).unwrap(), Color::BLACK);
        assert_eq!(Number3x5::new(0).width(), 3);
    }

    #[test]
    fn letter_a_has_crossbar() {
        let a = Ascii4x8::new('A');
        assert_eq!(
            rows(&a),
            vec!["....", ".#..", "#.#.", "#.#.", "###.", "#.#.", "#.#.", "...."]
        );
    }

    #[test]
    fn set_char_swaps_bitmap() {
        let mut g = Ascii4x8::new(' ');
        assert_eq!(g.pixel(0, 4).unwrap(), Color::BLACK);
        g.set_char('A');
        assert_eq!(g.char(), 'A');
        assert_eq!(g.pixel(0, 4).unwrap(), Color::WHITE);
    }

    #[test]
    fn unprintable_characters_use_unknown_glyph() {
        for c in ['\u{7f}', '\n', 'é'] {
            let g = Ascii4x8::new(c);
            assert_eq!(g.bits, ASCII_UNKNOWN);
        }
        assert_eq!(Ascii4x8::new(' ').bits, 0);
    }

    #[test]
    fn text_concatenates_cells() {
        let t = Text4x8::from("Hi").with_color(Color::GREEN).with_background(Color::BLUE);
        assert_eq!((t.width(), t.height()), (8, 8));
        assert_eq!(t.background(), Color::BLUE);
        // Second row of 'H' is "#.#." and of 'i' is ".#..".
        let second_row: Vec<Color> = (0..8).map(|x| t.pixel(x, 1).unwrap()).collect();
        assert_eq!(second_row[0], Color::GREEN);
        assert_eq!(second_row[1], Color::BLUE);
        assert_eq!(second_row[5], Color::GREEN);
        assert!(t.pixel(8, 0).is_err());
    }

    #[test]
    fn set_text_recomputes_width() {
        let mut t = Text4x8::new("abc");
        assert_eq!(t.width(), 12);
        t.set_text("");
        assert_eq!(t.width(), 0);
    }
}

// src/font.rs

//! Static bitmap fonts.
//!
//! Rows are stored top row first, most significant bits first: for a glyph
//! `W` pixels wide and `H` pixels tall, pixel `(x, y)` is bit
//! `(H - 1 - y) * W + (W - 1 - x)`.
//!
//! Panels driven by older firmware that indexed bit `y * W + (W - 1 - x)`
//! show these glyphs upside down; this crate renders them upright.

/// Width of a digit in the 3x5 font.
pub const DIGIT_WIDTH: usize = 3;
/// Height of a digit in the 3x5 font.
pub const DIGIT_HEIGHT: usize = 5;

/// Digits 0-9, five rows of three bits each.
pub static DIGITS_3X5: [u16; 10] = [
    0b111_101_101_101_111, // 0
    0b010_010_010_010_010, // 1
    0b111_001_111_100_111, // 2
    0b111_001_111_001_111, // 3
    0b101_101_111_001_001, // 4
    0b111_100_111_001_111, // 5
    0b111_100_111_101_111, // 6
    0b111_001_001_001_001, // 7
    0b111_101_111_101_111, // 8
    0b111_101_111_001_111, // 9
];

/// Width of a character cell in the 4x8 font.
pub const ASCII_WIDTH: usize = 4;
/// Height of a character cell in the 4x8 font.
pub const ASCII_HEIGHT: usize = 8;

/// First codepoint with a glyph in [`ASCII_4X8`].
pub const ASCII_FIRST: u8 = 0x20;

/// Shown for anything outside the printable range: an inverted question mark.
pub const ASCII_UNKNOWN: u32 = !0b0000_0100_1010_0010_0100_0000_0100_0000;

/// Printable ASCII from space (0x20) through tilde (0x7E).
pub static ASCII_4X8: [u32; 95] = [
    0b0000_0000_0000_0000_0000_0000_0000_0000, // 0x20 space
    0b0000_0100_0100_0100_0100_0000_0100_0000, // 0x21 !
    0b0000_1010_1010_0000_0000_0000_0000_0000, // 0x22 "
    0b0000_1010_1110_1010_1010_1110_1010_0000, // 0x23 #
    0b0000_0100_1110_1100_0110_0110_1100_0100, // 0x24 $
    0b0000_0000_1010_0010_0100_1000_1010_0000, // 0x25 %
    0b0000_0100_1010_0100_1010_1000_0110_0000, // 0x26 &
    0b0000_0000_0100_0100_0000_0000_0000_0000, // 0x27 '
    0b0000_0010_0100_0100_0100_0100_0100_0010, // 0x28 (
    0b0000_1000_0100_0100_0100_0100_0100_1000, // 0x29 )
    0b0000_0000_0100_1110_0100_1010_0000_0000, // 0x2A *
    0b0000_0000_0000_0100_1110_0100_0000_0000, // 0x2B +
    0b0000_0000_0000_0000_0000_0000_0100_1000, // 0x2C ,
    0b0000_0000_0000_0000_1110_0000_0000_0000, // 0x2D -
    0b0000_0000_0000_0000_0000_0000_0100_0000, // 0x2E .
    0b0000_0010_0010_0100_0100_0100_1000_1000, // 0x2F /
    0b0000_0100_1010_1110_1010_1010_0100_0000, // 0x30 0
    0b0000_0100_1100_0100_0100_0100_1110_0000, // 0x31 1
    0b0000_1100_0010_0010_0100_1000_1110_0000, // 0x32 2
    0b0000_1100_0010_0100_0010_0010_1100_0000, // 0x33 3
    0b0000_0010_0110_1010_1010_1110_0010_0000, // 0x34 4
    0b0000_1110_1000_1100_0010_0010_1100_0000, // 0x35 5
    0b0000_0110_1000_1100_1010_1010_0100_0000, // 0x36 6
    0b0000_1110_0010_0010_0100_0100_0100_0000, // 0x37 7
    0b0000_0100_1010_0100_1010_1010_0100_0000, // 0x38 8
    0b0000_0100_1010_1010_0110_0010_1100_0000, // 0x39 9
    0b0000_0000_0000_0100_0000_0000_0100_0000, // 0x3A :
    0b0000_0000_0000_0100_0000_0000_0100_1000, // 0x3B ;
    0b0000_0000_0010_0100_1000_0100_0010_0000, // 0x3C <
    0b0000_0000_0000_1110_0000_1110_0000_0000, // 0x3D =
    0b0000_0000_1000_0100_0010_0100_1000_0000, // 0x3E >
    0b0000_0100_1010_0010_0100_0000_0100_0000, // 0x3F ?
    0b0000_0100_1010_1110_1110_1000_0110_0000, // 0x40 @
    0b0000_0100_1010_1010_1110_1010_1010_0000, // 0x41 A
    0b0000_1100_1010_1100_1010_1010_1100_0000, // 0x42 B
    0b0000_0110_1000_1000_1000_1000_0110_0000, // 0x43 C
    0b0000_1100_1010_1010_1010_1010_1100_0000, // 0x44 D
    0b0000_1110_1000_1110_1000_1000_1110_0000, // 0x45 E
    0b0000_1110_1000_1110_1000_1000_1000_0000, // 0x46 F
    0b0000_0110_1000_1000_1010_1010_0110_0000, // 0x47 G
    0b0000_1010_1010_1110_1010_1010_1010_0000, // 0x48 H
    0b0000_1110_0100_0100_0100_0100_1110_0000, // 0x49 I
    0b0000_0010_0010_0010_0010_1010_0100_0000, // 0x4A J
    0b0000_1010_1010_1100_1010_1010_1010_0000, // 0x4B K
    0b0000_1000_1000_1000_1000_1000_1110_0000, // 0x4C L
    0b0000_1010_1110_1110_1010_1010_1010_0000, // 0x4D M
    0b0000_1100_1010_1010_1010_1010_1010_0000, // 0x4E N
    0b0000_0100_1010_1010_1010_1010_0100_0000, // 0x4F O
    0b0000_1100_1010_1010_1100_1000_1000_0000, // 0x50 P
    0b0000_0100_1010_1010_1010_1010_0100_0010, // 0x51 Q
    0b0000_1100_1010_1010_1100_1010_1010_0000, // 0x52 R
    0b0000_0110_1000_0100_0010_0010_1100_0000, // 0x53 S
    0b0000_1110_0100_0100_0100_0100_0100_0000, // 0x54 T
    0b0000_1010_1010_1010_1010_1010_1110_0000, // 0x55 U
    0b0000_1010_1010_1010_1010_1100_1000_0000, // 0x56 V
    0b0000_1010_1010_1010_1110_1110_1010_0000, // 0x57 W
    0b0000_1010_1010_0100_0100_1010_1010_0000, // 0x58 X
    0b0000_1010_1010_1010_0100_0100_0100_0000, // 0x59 Y
    0b0000_1110_0010_0100_0100_1000_1110_0000, // 0x5A Z
    0b0000_0110_0100_0100_0100_0100_0100_0110, // 0x5B [
    0b0000_1000_1000_0100_0100_0100_0010_0010, // 0x5C backslash
    0b0000_0110_0010_0010_0010_0010_0010_0110, // 0x5D ]
    0b0000_0100_1010_0000_0000_0000_0000_0000, // 0x5E ^
    0b0000_0000_0000_0000_0000_0000_0000_1110, // 0x5F _
    0b0000_0100_0010_0000_0000_0000_0000_0000, // 0x60 `
    0b0000_0000_0000_0110_1010_1010_0110_0000, // 0x61 a
    0b0000_1000_1000_1100_1010_1010_1100_0000, // 0x62 b
    0b0000_0000_0000_0110_1000_1000_0110_0000, // 0x63 c
    0b0000_0010_0010_0110_1010_1010_0110_0000, // 0x64 d
    0b0000_0000_0000_0110_1010_1100_0110_0000, // 0x65 e
    0b0000_0010_0100_1110_0100_0100_0100_0000, // 0x66 f
    0b0000_0000_0000_0110_1010_0110_0010_1100, // 0x67 g
    0b0000_1000_1000_1100_1010_1010_1010_0000, // 0x68 h
    0b0000_0100_0000_1100_0100_0100_1110_0000, // 0x69 i
    0b0000_0010_0000_1110_0010_0010_0010_1100, // 0x6A j
    0b0000_1000_1000_1010_1100_1010_1010_0000, // 0x6B k
    0b0000_1100_0100_0100_0100_0100_0110_0000, // 0x6C l
    0b0000_0000_0000_1100_1110_1110_1010_0000, // 0x6D m
    0b0000_0000_0000_1100_1010_1010_1010_0000, // 0x6E n
    0b0000_0000_0000_0100_1010_1010_0100_0000, // 0x6F o
    0b0000_0000_0000_1100_1010_1010_1100_1000, // 0x70 p
    0b0000_0000_0000_0110_1010_1010_0110_0010, // 0x71 q
    0b0000_0000_0000_1010_1100_1000_1000_0000, // 0x72 r
    0b0000_0000_0000_0110_1100_0110_1100_0000, // 0x73 s
    0b0000_0000_0100_1110_0100_0100_0010_0000, // 0x74 t
    0b0000_0000_0000_1010_1010_1010_0110_0000, // 0x75 u
    0b0000_0000_0000_1010_1010_1100_1000_0000, // 0x76 v
    0b0000_0000_0000_1010_1010_1110_1110_0000, // 0x77 w
    0b0000_0000_0000_1010_0100_1010_1010_0000, // 0x78 x
    0b0000_0000_0000_1010_1010_0110_0010_1100, // 0x79 y
    0b0000_0000_0000_1110_0100_1000_1110_0000, // 0x7A z
    0b0000_0010_0100_0100_1000_0100_0100_0010, // 0x7B {
    0b0000_0100_0100_0100_0100_0100_0100_0100, // 0x7C |
    0b0000_1000_0100_0100_0010_0100_0100_1000, // 0x7D }
    0b0000_0000_0000_1100_0110_0000_0000_0000, // 0x7E ~
];

/// Bitmap for `c`, falling back to [`ASCII_UNKNOWN`].
pub fn ascii_bitmap(c: char) -> u32 {
    let code = c as u32;
    if code >= ASCII_FIRST as u32 && code < ASCII_FIRST as u32 + ASCII_4X8.len() as u32 {
        ASCII_4X8[(code - ASCII_FIRST as u32) as usize]
    } else {
        ASCII_UNKNOWN
    }
}

/// Tests whether pixel `(x, y)` of a `width x height` bitmap is lit.
#[inline]
pub fn bit_is_set(bits: u32, width: usize, height: usize, x: usize, y: usize) -> bool {
    bits & (1 << ((height - 1 - y) * width + (width - 1 - x))) != 0
}

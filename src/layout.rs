// src/layout.rs
//
// Layout - wiring order of the pixel memory.
//
// This module is the single source of truth for "which slot in the LED buffer
// holds (x, y)?" once rotation has been resolved. Everything above it works in
// logical coordinates; everything below it is a flat buffer.

use serde::{Deserialize, Serialize};

/// How pixels are laid out in a flat buffer.
///
/// Both variants are bijections from `[0, width) x [0, height)` onto
/// `[0, width * height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Every row runs left to right: `y * width + x`.
    #[default]
    Raster,
    /// Even rows run left to right, odd rows right to left. This is how
    /// LED matrices built from a single snaking strip are wired.
    Serpentine,
}

impl Layout {
    /// Flat offset of `(x, y)` in a `width x height` buffer.
    ///
    /// Only defined for in-range coordinates; callers clip first.
    #[inline]
    pub fn index(self, width: usize, _height: usize, x: usize, y: usize) -> usize {
        match self {
            Layout::Raster => y * width + x,
            Layout::Serpentine => {
                if y % 2 == 0 {
                    y * width + x
                } else {
                    y * width + (width - 1 - x)
                }
            }
        }
    }
}

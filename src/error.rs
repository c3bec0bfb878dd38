// src/error.rs

//! Error type shared by the canvas, compositor and strip layers.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("invalid rotation {0}, expected one of 0, 90, 180, 270")]
    InvalidRotation(i32),
    #[error("pixel ({x}, {y}) out of range for {width}x{height} canvas")]
    OutOfRange {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("no 3x5 glyph for digit {0}")]
    InvalidDigit(u32),
    #[error("window handle {0} is stale or was never created")]
    StaleWindow(String),
    #[error("window {0} has no parent")]
    Orphan(String),
    #[error("adding window {child} under {parent} would create a cycle")]
    Cycle { parent: String, child: String },
    #[error("{child} is not registered under window {parent}")]
    NotAChild { parent: String, child: String },
    #[error("strip driver is not initialized")]
    NotInitialized,
    #[error("strip driver error: {0}")]
    Driver(String),
}

pub type Result<T> = std::result::Result<T, CanvasError>;

/// Returns `OutOfRange` unless `0 <= x < width` and `0 <= y < height`.
pub(crate) fn check_bounds(x: i32, y: i32, width: usize, height: usize) -> Result<(usize, usize)> {
    if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
        return Err(CanvasError::OutOfRange {
            x,
            y,
            width,
            height,
        });
    }
    Ok((x as usize, y as usize))
}

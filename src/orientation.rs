// src/orientation.rs

//! Runtime rotation and mirroring of a canvas.
//!
//! An [`Orientation`] sits between logical `(x, y)` addressing and a
//! [`Layout`]. It never moves pixel data: rotating a canvas only swaps the
//! mapping used to find the physical slot, so a rotation change is a plain
//! field update.
//!
//! ## Coordinate Systems
//!
//! 1. **Logical**: what callers draw to. Dimensions swap for 90° and 270°.
//! 2. **Physical**: `(ux, uy)` after rotation and flips, always within the
//!    construction-time `width x height`.
//! 3. **Offset**: the slot in the flat buffer, produced by the layout.

use bitflags::bitflags;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, Result};
use crate::layout::Layout;

bitflags! {
    /// Axis mirroring applied after rotation, or during a blit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Flip: u8 {
        const X = 1 << 0;
        const Y = 1 << 1;
    }
}

impl Flip {
    pub fn from_axes(flip_x: bool, flip_y: bool) -> Self {
        let mut flip = Flip::empty();
        flip.set(Flip::X, flip_x);
        flip.set(Flip::Y, flip_y);
        flip
    }
}

/// Clockwise display rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg0,
            Rotation::Deg90 => Rotation::Deg270,
            Rotation::Deg180 => Rotation::Deg180,
            Rotation::Deg270 => Rotation::Deg90,
        }
    }

    /// True when logical width and height are swapped relative to physical.
    pub fn is_transposed(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl TryFrom<i32> for Rotation {
    type Error = CanvasError;

    fn try_from(degree: i32) -> Result<Self> {
        match degree {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(CanvasError::InvalidRotation(other)),
        }
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl Serialize for Rotation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.degrees())
    }
}

impl<'de> Deserialize<'de> for Rotation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let degree = i32::deserialize(deserializer)?;
        Rotation::try_from(degree).map_err(serde::de::Error::custom)
    }
}

/// Maps logical coordinates to buffer offsets for a fixed physical size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    layout: Layout,
    width: usize,
    height: usize,
    rotation: Rotation,
    flip: Flip,
}

impl Orientation {
    /// Unrotated, unflipped orientation over a `width x height` physical grid.
    pub fn new(width: usize, height: usize, layout: Layout) -> Self {
        Self {
            layout,
            width,
            height,
            rotation: Rotation::Deg0,
            flip: Flip::empty(),
        }
    }

    /// Reconfigures rotation and flips.
    ///
    /// Fails with `InvalidRotation` for anything other than 0, 90, 180 or 270,
    /// leaving the current configuration untouched.
    pub fn set_rotation(&mut self, degree: i32, flip: Flip) -> Result<()> {
        let rotation = Rotation::try_from(degree)?;
        self.rotation = rotation;
        self.flip = flip;
        debug!(
            "Orientation: {}x{} {:?} now rotated {} flip={:?}",
            self.width, self.height, self.layout, degree, flip
        );
        Ok(())
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn flip(&self) -> Flip {
        self.flip
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Logical width: physical height when rotated by 90° or 270°.
    pub fn width(&self) -> usize {
        if self.rotation.is_transposed() {
            self.height
        } else {
            self.width
        }
    }

    /// Logical height: physical width when rotated by 90° or 270°.
    pub fn height(&self) -> usize {
        if self.rotation.is_transposed() {
            self.width
        } else {
            self.height
        }
    }

    pub fn physical_width(&self) -> usize {
        self.width
    }

    pub fn physical_height(&self) -> usize {
        self.height
    }

    /// Number of pixels backing this orientation.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Physical coordinates of logical `(x, y)`.
    ///
    /// Only defined for `x < self.width()` and `y < self.height()`.
    #[inline]
    pub fn physical(&self, x: usize, y: usize) -> (usize, usize) {
        let (w, h) = (self.width, self.height);
        let (mut ux, mut uy) = match self.rotation {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (y, h - x - 1),
            Rotation::Deg180 => (w - x - 1, h - y - 1),
            Rotation::Deg270 => (w - y - 1, x),
        };
        if self.flip.contains(Flip::X) {
            ux = w - ux - 1;
        }
        if self.flip.contains(Flip::Y) {
            uy = h - uy - 1;
        }
        (ux, uy)
    }

    /// Buffer offset of logical `(x, y)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        let (ux, uy) = self.physical(x, y);
        self.layout.index(self.width, self.height, ux, uy)
    }
}

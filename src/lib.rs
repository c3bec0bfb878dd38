// src/lib.rs

//! Pixel canvases for addressable LED matrices.
//!
//! - [`layout`] and [`orientation`] map logical coordinates onto LED memory
//! - [`canvas`] defines the read/write contracts, [`pixmap`] the in-memory canvas
//! - [`window`] composites trees of windows with chroma-key transparency
//! - [`strip`] binds a canvas to a driver; [`service`] and [`server`] expose
//!   it over a line-delimited JSON protocol ([`command`])
//! - [`app`] is the demo loop

pub mod app;
pub mod canvas;
pub mod color;
pub mod command;
pub mod config;
pub mod error;
pub mod font;
pub mod glyph;
pub mod layout;
pub mod orientation;
pub mod pixmap;
pub mod server;
pub mod service;
pub mod strip;
pub mod window;

pub use canvas::{PaintDevice, PaintSource};
pub use color::Color;
pub use error::{CanvasError, Result};
pub use layout::Layout;
pub use orientation::{Flip, Orientation, Rotation};
pub use pixmap::Pixmap;
pub use strip::{LedStrip, StripDriver};
pub use window::{Compositor, WindowId};

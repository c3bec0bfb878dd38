// src/strip/drivers/mod.rs

pub mod headless;
pub use headless::{HeadlessDriver, HeadlessMonitor, HeadlessState};

#[cfg(feature = "ws2811")]
pub mod ws2811;
#[cfg(feature = "ws2811")]
pub use ws2811::Ws2811Driver;

// src/strip/drivers/ws2811.rs

//! rpi_ws281x driver (feature `ws2811`).
//!
//! Thin FFI wrapper over `libws2811`. The native struct is boxed so its
//! address stays stable between `ws2811_init` and `ws2811_fini`; the library
//! keeps internal pointers into it.

use std::ffi::CStr;
use std::ptr;

use libc::{c_char, c_int, c_void};
use log::{debug, info};

use crate::color::Color;
use crate::config::StripConfig;
use crate::error::{CanvasError, Result};
use crate::strip::driver::StripDriver;

const RPI_PWM_CHANNELS: usize = 2;
const WS2811_SUCCESS: c_int = 0;

#[repr(C)]
struct ws2811_channel_t {
    gpionum: c_int,
    invert: c_int,
    count: c_int,
    strip_type: c_int,
    leds: *mut u32,
    brightness: u8,
    wshift: u8,
    rshift: u8,
    gshift: u8,
    bshift: u8,
    gamma: *mut u8,
}

#[repr(C)]
struct ws2811_t {
    render_wait_time: u64,
    device: *mut c_void,
    rpi_hw: *const c_void,
    freq: u32,
    dmanum: c_int,
    channel: [ws2811_channel_t; RPI_PWM_CHANNELS],
}

extern "C" {
    fn ws2811_init(ws2811: *mut ws2811_t) -> c_int;
    fn ws2811_fini(ws2811: *mut ws2811_t);
    fn ws2811_render(ws2811: *mut ws2811_t) -> c_int;
    fn ws2811_wait(ws2811: *mut ws2811_t) -> c_int;
    fn ws2811_get_return_t_str(state: c_int) -> *const c_char;
}

impl ws2811_channel_t {
    fn unused() -> Self {
        Self {
            gpionum: 0,
            invert: 0,
            count: 0,
            strip_type: 0,
            leds: ptr::null_mut(),
            brightness: 0,
            wshift: 0,
            rshift: 0,
            gshift: 0,
            bshift: 0,
            gamma: ptr::null_mut(),
        }
    }
}

fn check(op: &str, ret: c_int) -> Result<()> {
    if ret == WS2811_SUCCESS {
        return Ok(());
    }
    // SAFETY: the library returns a pointer to a static string for every code.
    let message = unsafe {
        let s = ws2811_get_return_t_str(ret);
        if s.is_null() {
            format!("error code {}", ret)
        } else {
            CStr::from_ptr(s).to_string_lossy().into_owned()
        }
    };
    Err(CanvasError::Driver(format!("{} failed: {}", op, message)))
}

/// Driver for WS281x strips on a Raspberry Pi.
pub struct Ws2811Driver {
    native: Box<ws2811_t>,
    initialized: bool,
}

// SAFETY: the native handle is only touched through `&mut self`, and the
// library has no thread affinity.
unsafe impl Send for Ws2811Driver {}

impl Ws2811Driver {
    pub fn new() -> Self {
        Self {
            native: Box::new(ws2811_t {
                render_wait_time: 0,
                device: ptr::null_mut(),
                rpi_hw: ptr::null(),
                freq: 0,
                dmanum: 0,
                channel: [ws2811_channel_t::unused(), ws2811_channel_t::unused()],
            }),
            initialized: false,
        }
    }

    fn leds_mut(&mut self) -> Result<&mut [u32]> {
        let channel = &self.native.channel[0];
        if !self.initialized || channel.leds.is_null() {
            return Err(CanvasError::NotInitialized);
        }
        // SAFETY: after a successful ws2811_init, `leds` points at `count`
        // u32s owned by the library until ws2811_fini.
        Ok(unsafe { std::slice::from_raw_parts_mut(channel.leds, channel.count as usize) })
    }
}

impl Default for Ws2811Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl StripDriver for Ws2811Driver {
    fn init(&mut self, config: &StripConfig) -> Result<()> {
        let native = &mut *self.native;
        native.freq = config.frequency;
        native.dmanum = config.dma;
        native.channel[0] = ws2811_channel_t {
            gpionum: config.gpio,
            invert: config.invert as c_int,
            count: (config.width * config.height) as c_int,
            strip_type: config.strip_type.ws2811_code(),
            brightness: config.brightness,
            ..ws2811_channel_t::unused()
        };
        native.channel[1] = ws2811_channel_t::unused();

        debug!(
            "Ws2811Driver: init {}x{}, DMA {}, GPIO {}, brightness {}",
            config.width, config.height, config.dma, config.gpio, config.brightness
        );
        // SAFETY: `native` is fully initialized and boxed, so its address is
        // stable for the library's lifetime.
        check("ws2811_init", unsafe { ws2811_init(native) })?;
        self.initialized = true;
        info!("Ws2811Driver: initialized");
        Ok(())
    }

    fn render(&mut self, leds: &[Color]) -> Result<()> {
        let target = self.leds_mut()?;
        if target.len() != leds.len() {
            return Err(CanvasError::Driver(format!(
                "frame has {} pixels, strip has {}",
                leds.len(),
                target.len()
            )));
        }
        for (dst, src) in target.iter_mut().zip(leds) {
            *dst = src.to_u32();
        }
        // SAFETY: initialized above (leds_mut checked it).
        check("ws2811_render", unsafe { ws2811_render(&mut *self.native) })
    }

    fn wait(&mut self) -> Result<()> {
        if !self.initialized {
            return Err(CanvasError::NotInitialized);
        }
        // SAFETY: the handle is initialized.
        check("ws2811_wait", unsafe { ws2811_wait(&mut *self.native) })
    }

    fn uninit(&mut self) -> Result<()> {
        if self.initialized {
            debug!("Ws2811Driver: uninit");
            // SAFETY: the handle is initialized and not used again until the next init.
            unsafe { ws2811_fini(&mut *self.native) };
            self.initialized = false;
        }
        Ok(())
    }
}

impl Drop for Ws2811Driver {
    fn drop(&mut self) {
        let _ = self.uninit();
    }
}

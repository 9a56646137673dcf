//! Driver for the SSD1306 OLED display controller over 4-wire SPI.
//!
//! The driver owns a packed 1-bit-per-pixel framebuffer and talks to the
//! controller through a [`DisplayInterface`]: command bytes with the DC
//! line low, data bytes with it high. Pixel operations mutate only the
//! in-memory buffer; [`Display::flush`] programs the addressing window and
//! streams the whole buffer to the panel.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ssd1306_spi::{Builder, Dimensions, Display, Interface};
//!
//! let interface = Interface::new(spi_device, dc_pin, rst_pin);
//! let config = Builder::new()
//!     .dimensions(Dimensions::new(128, 64)?)
//!     .build()?;
//!
//! let mut display = Display::new(interface, config);
//! display.init(&mut delay)?;
//!
//! display.set_pixel(10, 10, true);
//! display.flush()?;
//! ```
//!
//! With the `graphics` feature (default), [`Display`] implements
//! `embedded-graphics` [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget)
//! for `BinaryColor`.

#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod command;
mod config;
mod display;
mod error;
#[cfg(feature = "graphics")]
mod graphics;
mod interface;

pub use config::{AddressMode, Builder, Config, Dimensions, VccSource};
pub use display::{Display, ScrollDirection, ScrollInterval};
pub use error::{BuilderError, Error, MAX_SEGMENTS};
pub use interface::{DisplayInterface, Interface, InterfaceError};

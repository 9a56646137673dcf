//! Graphics support via embedded-graphics
//!
//! Implements [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget)
//! for [`Display`], so the embedded-graphics primitives (lines, rectangles,
//! circles, text) render into the driver's framebuffer. Call
//! [`Display::flush`] afterwards to put the result on the panel.
//!
//! ## Example
//!
//! ```rust,ignore
//! use embedded_graphics::{
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//!
//! Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
//!     .draw(&mut display)?;
//!
//! display.flush()?;
//! ```

use core::convert::Infallible;

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
};

use crate::display::Display;
use crate::interface::DisplayInterface;

impl<I> OriginDimensions for Display<I>
where
    I: DisplayInterface,
{
    fn size(&self) -> Size {
        let dims = self.dimensions();
        Size::new(dims.width as u32, dims.height as u32)
    }
}

impl<I> DrawTarget for Display<I>
where
    I: DisplayInterface,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<P>(&mut self, pixels: P) -> Result<(), Self::Error>
    where
        P: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                // set_pixel discards anything past the right/bottom edges
                self.set_pixel(point.x as u32, point.y as u32, color.is_on());
            }
        }
        Ok(())
    }
}

//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for communicating with the SSD1306 controller over 4-wire SPI.
//!
//! ## Hardware Requirements
//!
//! The SSD1306 in 4-wire SPI mode requires:
//! - SPI bus (MOSI + SCK, chip select handled by the [`SpiDevice`])
//! - 2 GPIO pins:
//!   - **DC**: Data/Command select (output, low=command, high=data)
//!   - **RST**: Reset (output, active low)
//!
//! ## Example
//!
//! ```rust,ignore
//! use ssd1306_spi::Interface;
//!
//! // Create interface with SPI and GPIO pins
//! let mut interface = Interface::new(spi_device, dc_pin, rst_pin);
//!
//! // Send a command with one argument
//! interface.send_commands(&[0x81, 0x8F])?; // Contrast
//!
//! // Send pixel data
//! interface.send_data(&[0xFF, 0x00, 0xFF])?;
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

/// Trait for hardware interface to the SSD1306 controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// SPI + GPIO implementation that satisfies embedded-hal traits.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. If you need
/// custom behavior (e.g., different pin polarities, a shared bus with
/// manual chip-select control), implement this trait on your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    type Error: Debug;

    /// Send command bytes to the controller
    ///
    /// Unlike some controllers, the SSD1306 takes command arguments on the
    /// command channel, so a command and its arguments are sent as one
    /// slice. The implementation must:
    /// 1. Set DC pin low (command mode)
    /// 2. Send the bytes over SPI
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_commands(&mut self, commands: &[u8]) -> Result<(), Self::Error>;

    /// Send pixel data bytes to the controller RAM
    ///
    /// The implementation must:
    /// 1. Set DC pin high (data mode)
    /// 2. Send the data bytes over SPI
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// The implementation must:
    /// 1. Set RST pin low
    /// 2. Wait at least 10ms
    /// 3. Set RST pin high
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO fails.
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InterfaceError::Spi(e) => write!(f, "SPI error: {e:?}"),
            InterfaceError::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Hardware interface implementation for the SSD1306
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
pub struct Interface<SPI, DC, RST> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
}

impl<SPI, DC, RST> Interface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self { spi, dc, rst }
    }

    /// Release the underlying SPI device and GPIO pins
    ///
    /// Consumes the interface, so the hardware handles can only be
    /// released once.
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST, PinErr> DisplayInterface for Interface<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_commands(&mut self, commands: &[u8]) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(commands).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Spi)?;
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        // Reset sequence: LOW -> wait 10ms -> HIGH
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(10);
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        Ok(())
    }
}

//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Example
//!
//! ```
//! use ssd1306_spi::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Height with no multiplex/COM-pins mapping
//! let result = Dimensions::new(128, 48);
//! assert!(result.is_err());
//! ```

use crate::interface::DisplayInterface;

/// Maximum segment outputs (columns) supported by the SSD1306 controller
pub const MAX_SEGMENTS: u16 = 128;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`]
    /// implementation. The driver never retries: a miswired or disconnected
    /// bus has no recovery value.
    Interface(I::Error),
    /// Scroll page range is empty or exceeds the panel's page count
    InvalidPageRange {
        /// First page of the requested range
        start: u8,
        /// Last page of the requested range
        end: u8,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(_) => write!(f, "Interface error"),
            Error::InvalidPageRange { start, end } => {
                write!(f, "Invalid page range: {start}..={end}")
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Geometry with no known controller parameters
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    UnsupportedGeometry {
        /// Width (columns) requested
        width: u16,
        /// Height (rows) requested
        height: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::MissingDimensions => write!(f, "Dimensions must be specified"),
            BuilderError::UnsupportedGeometry { width, height } => write!(
                f,
                "Unsupported geometry {width}x{height} (width 1..={MAX_SEGMENTS}, height 32 or 64)"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

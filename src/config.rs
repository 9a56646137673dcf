//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_SEGMENTS};

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Width in pixels (segment outputs)
    pub width: u16,
    /// Height in pixels (COM outputs)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::UnsupportedGeometry` if:
    /// - width == 0 or width > MAX_SEGMENTS
    /// - height is not 32 or 64 (the panel heights with a known
    ///   multiplex/COM-pins mapping)
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_SEGMENTS {
            return Err(BuilderError::UnsupportedGeometry { width, height });
        }
        if height != 32 && height != 64 {
            return Err(BuilderError::UnsupportedGeometry { width, height });
        }
        Ok(Self { width, height })
    }

    /// Calculate required framebuffer size in bytes
    pub fn buffer_size(&self) -> usize {
        (self.width as usize * self.height as usize) / 8
    }

    /// Number of pages (bands of 8 pixel rows)
    pub fn pages(&self) -> u8 {
        (self.height / 8) as u8
    }

    /// Multiplex ratio and COM-pins configuration bytes for this height
    ///
    /// Sending the wrong pair can leave the panel blank until power-cycled,
    /// which is why unsupported heights are rejected in [`Dimensions::new`].
    pub(crate) fn multiplex_com_pins(&self) -> (u8, u8) {
        match self.height {
            64 => (0x3F, 0x12),
            _ => (0x1F, 0x02),
        }
    }
}

/// Memory addressing mode
///
/// Governs how the controller auto-increments its RAM cursor after each
/// data byte. The framebuffer kept by [`Display`](crate::display::Display)
/// is page-major with the column varying fastest, which matches
/// [`AddressMode::Horizontal`] auto-increment order; the other modes are
/// selectable for panels wired to expect them, but then the caller owns
/// keeping the transmitted byte order meaningful.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(u8)]
pub enum AddressMode {
    /// Column increments first, wrapping to the next page
    #[default]
    Horizontal = 0x00,
    /// Page increments first, wrapping to the next column
    Vertical = 0x01,
    /// Column increments within a single page
    Page = 0x02,
}

/// Supply source for the OLED panel drive voltage
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum VccSource {
    /// Panel voltage supplied externally; internal charge pump disabled
    External,
    /// Internal charge pump generates the panel voltage
    #[default]
    Internal,
}

impl VccSource {
    /// Argument byte for the charge pump command
    pub(crate) fn charge_pump(&self) -> u8 {
        match self {
            VccSource::External => 0x10,
            VccSource::Internal => 0x14,
        }
    }

    /// Default pre-charge period byte for this supply
    ///
    /// The internal charge pump needs the long phase-2 pre-charge (0xF1);
    /// an external supply uses the datasheet reset value (0x22).
    pub(crate) fn precharge(&self) -> u8 {
        match self {
            VccSource::External => 0x22,
            VccSource::Internal => 0xF1,
        }
    }
}

/// Display configuration
///
/// This struct holds all configurable parameters for the SSD1306 controller.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Memory addressing mode used for init and flush
    pub address_mode: AddressMode,
    /// Panel voltage source (selects the charge pump setting)
    pub vcc_source: VccSource,
    /// Clock divide ratio / oscillator frequency byte
    pub clock_divider: u8,
    /// Contrast level
    pub contrast: u8,
    /// Pre-charge period byte
    pub precharge: u8,
    /// VCOMH deselect level byte
    pub vcom_deselect: u8,
    /// Vertical shift applied by the controller
    pub display_offset: u8,
    /// Display start line (0..=63)
    pub start_line: u8,
    /// Mirror columns (segment remap)
    pub segment_remap: bool,
    /// Scan COM outputs from COM[N-1] to COM0
    pub com_scan_descending: bool,
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use ssd1306_spi::{AddressMode, Builder, Dimensions};
///
/// let config = Builder::new()
///     .dimensions(Dimensions::new(128, 64).unwrap())
///     .address_mode(AddressMode::Horizontal)
///     .contrast(0x8F)
///     .build()
///     .expect("valid configuration");
/// ```
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Memory addressing mode
    address_mode: AddressMode,
    /// Panel voltage source
    vcc_source: VccSource,
    /// Clock divide ratio / oscillator frequency byte
    clock_divider: u8,
    /// Contrast level
    contrast: u8,
    /// Pre-charge period byte; `None` derives it from the VCC source
    precharge: Option<u8>,
    /// VCOMH deselect level byte
    vcom_deselect: u8,
    /// Vertical shift applied by the controller
    display_offset: u8,
    /// Display start line
    start_line: u8,
    /// Mirror columns (segment remap)
    segment_remap: bool,
    /// Scan COM outputs from COM[N-1] to COM0
    com_scan_descending: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            dimensions: None,
            // Horizontal auto-increment matches the page-major framebuffer
            address_mode: AddressMode::Horizontal,
            vcc_source: VccSource::Internal,
            // Default oscillator frequency / divide ratio
            clock_divider: 0x80,
            // Default contrast
            contrast: 0x8F,
            // Pre-charge follows the VCC source unless overridden
            precharge: None,
            // Default VCOMH deselect level (~0.77 x Vcc)
            vcom_deselect: 0x40,
            display_offset: 0x00,
            start_line: 0x00,
            // Column-mirrored, COM-descending matches the common module
            // orientation with the ribbon at the top
            segment_remap: true,
            com_scan_descending: true,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set memory addressing mode
    pub fn address_mode(mut self, mode: AddressMode) -> Self {
        self.address_mode = mode;
        self
    }

    /// Set panel voltage source
    pub fn vcc_source(mut self, source: VccSource) -> Self {
        self.vcc_source = source;
        self
    }

    /// Set clock divide ratio / oscillator frequency
    pub fn clock_divider(mut self, value: u8) -> Self {
        self.clock_divider = value;
        self
    }

    /// Set contrast level
    pub fn contrast(mut self, value: u8) -> Self {
        self.contrast = value;
        self
    }

    /// Set pre-charge period, overriding the VCC-source default
    pub fn precharge(mut self, value: u8) -> Self {
        self.precharge = Some(value);
        self
    }

    /// Set VCOMH deselect level
    pub fn vcom_deselect(mut self, value: u8) -> Self {
        self.vcom_deselect = value;
        self
    }

    /// Set display offset (vertical shift)
    pub fn display_offset(mut self, value: u8) -> Self {
        self.display_offset = value;
        self
    }

    /// Set display start line (masked to 0..=63)
    pub fn start_line(mut self, value: u8) -> Self {
        self.start_line = value & 0x3F;
        self
    }

    /// Set segment remap (column mirroring)
    pub fn segment_remap(mut self, enabled: bool) -> Self {
        self.segment_remap = enabled;
        self
    }

    /// Set COM scan direction (descending scans COM[N-1] to COM0)
    pub fn com_scan_descending(mut self, enabled: bool) -> Self {
        self.com_scan_descending = enabled;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            address_mode: self.address_mode,
            vcc_source: self.vcc_source,
            clock_divider: self.clock_divider,
            contrast: self.contrast,
            precharge: self.precharge.unwrap_or(self.vcc_source.precharge()),
            vcom_deselect: self.vcom_deselect,
            display_offset: self.display_offset,
            start_line: self.start_line,
            segment_remap: self.segment_remap,
            com_scan_descending: self.com_scan_descending,
        })
    }
}

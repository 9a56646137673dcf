// SSD1306 command definitions

// Fundamental
pub const SET_CONTRAST: u8 = 0x81; // Contrast control, 1 argument
pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4; // Output follows RAM content
pub const DISPLAY_ALL_ON: u8 = 0xA5; // Force entire display on
pub const NORMAL_DISPLAY: u8 = 0xA6; // Normal display (1 = lit)
pub const INVERT_DISPLAY: u8 = 0xA7; // Inverse display (0 = lit)
pub const DISPLAY_OFF: u8 = 0xAE; // Display off (sleep mode)
pub const DISPLAY_ON: u8 = 0xAF; // Display on

// Addressing
pub const SET_MEMORY_MODE: u8 = 0x20; // Memory addressing mode, 1 argument
pub const SET_COL_ADDRESS: u8 = 0x21; // Column address window, 2 arguments
pub const SET_PAGE_ADDRESS: u8 = 0x22; // Page address window, 2 arguments

// Hardware configuration
pub const SET_START_LINE: u8 = 0x40; // Display start line, ORed with line 0..=63
pub const SEG_REMAP: u8 = 0xA0; // Segment remap, ORed with 0x01 to mirror columns
pub const SET_MULTIPLEX: u8 = 0xA8; // Multiplex ratio, 1 argument
pub const COM_SCAN_INC: u8 = 0xC0; // COM scan from COM0 to COM[N-1]
pub const COM_SCAN_DEC: u8 = 0xC8; // COM scan from COM[N-1] to COM0
pub const SET_DISPLAY_OFFSET: u8 = 0xD3; // Vertical shift, 1 argument
pub const SET_COM_PINS: u8 = 0xDA; // COM pins hardware configuration, 1 argument

// Timing and power
pub const SET_DISPLAY_CLOCK_DIV: u8 = 0xD5; // Clock divide ratio / oscillator frequency
pub const SET_PRECHARGE: u8 = 0xD9; // Pre-charge period
pub const SET_VCOM_DESELECT: u8 = 0xDB; // VCOMH deselect level
pub const CHARGE_PUMP: u8 = 0x8D; // Charge pump setting, 1 argument

// Scrolling
pub const RIGHT_HORIZ_SCROLL: u8 = 0x26; // Continuous right horizontal scroll
pub const LEFT_HORIZ_SCROLL: u8 = 0x27; // Continuous left horizontal scroll
pub const VERT_AND_RIGHT_HORIZ_SCROLL: u8 = 0x29; // Vertical and right horizontal scroll
pub const VERT_AND_LEFT_HORIZ_SCROLL: u8 = 0x2A; // Vertical and left horizontal scroll
pub const DEACTIVATE_SCROLL: u8 = 0x2E; // Stop scrolling
pub const ACTIVATE_SCROLL: u8 = 0x2F; // Start scrolling as configured
pub const SET_VERT_SCROLL_AREA: u8 = 0xA3; // Vertical scroll area, 2 arguments

//! Core display operations

use alloc::vec;
use alloc::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::command::{
    ACTIVATE_SCROLL, CHARGE_PUMP, COM_SCAN_DEC, COM_SCAN_INC, DEACTIVATE_SCROLL, DISPLAY_ALL_ON,
    DISPLAY_ALL_ON_RESUME, DISPLAY_OFF, DISPLAY_ON, INVERT_DISPLAY, LEFT_HORIZ_SCROLL,
    NORMAL_DISPLAY, RIGHT_HORIZ_SCROLL, SEG_REMAP, SET_COL_ADDRESS, SET_COM_PINS, SET_CONTRAST,
    SET_DISPLAY_CLOCK_DIV, SET_DISPLAY_OFFSET, SET_MEMORY_MODE, SET_MULTIPLEX, SET_PAGE_ADDRESS,
    SET_PRECHARGE, SET_START_LINE, SET_VCOM_DESELECT, SET_VERT_SCROLL_AREA,
    VERT_AND_LEFT_HORIZ_SCROLL, VERT_AND_RIGHT_HORIZ_SCROLL,
};
use crate::config::Config;
use crate::error::Error;
use crate::interface::DisplayInterface;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Horizontal scroll direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollDirection {
    /// Scroll towards higher column addresses
    Right,
    /// Scroll towards lower column addresses
    Left,
}

/// Time interval between scroll steps, in frames
///
/// The controller encodes the interval as a 3-bit value whose ordering is
/// not monotonic; the enum keeps callers away from the raw encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(u8)]
pub enum ScrollInterval {
    /// 2 frames
    Frames2 = 0b111,
    /// 3 frames
    Frames3 = 0b100,
    /// 4 frames
    Frames4 = 0b101,
    /// 5 frames
    #[default]
    Frames5 = 0b000,
    /// 25 frames
    Frames25 = 0b110,
    /// 64 frames
    Frames64 = 0b001,
    /// 128 frames
    Frames128 = 0b010,
    /// 256 frames
    Frames256 = 0b011,
}

/// Core display driver for the SSD1306
///
/// Owns the packed 1-bit-per-pixel framebuffer and translates pixel
/// operations into controller commands and bulk data transfers. Pixel
/// mutations touch only the in-memory buffer; [`flush`](Display::flush)
/// transfers it to the panel.
///
/// The framebuffer is page-major: the byte at `page * width + x` holds the
/// 8 rows `page*8 ..= page*8+7` of column `x`, least-significant bit on top.
///
/// The driver is single-threaded and blocking; callers using it from
/// multiple threads must provide their own mutual exclusion around
/// mutation and flush.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Packed framebuffer, `width * height / 8` bytes
    buffer: Vec<u8>,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// Allocates the zero-filled framebuffer; no hardware traffic is
    /// generated until [`init`](Display::init).
    pub fn new(interface: I, config: Config) -> Self {
        let buffer = vec![0; config.dimensions.buffer_size()];
        Self {
            interface,
            config,
            buffer,
        }
    }

    /// Perform hardware reset and controller initialization
    ///
    /// The register order is load-bearing: the charge pump and memory mode
    /// must be configured before `DISPLAY_ON`.
    ///
    /// # Errors
    ///
    /// Any interface failure aborts initialization and propagates; the
    /// panel state is then undefined until the next successful `init`.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let dims = self.config.dimensions;
        let (multiplex, com_pins) = dims.multiplex_com_pins();

        self.reset(delay)?;

        self.command(&[DISPLAY_OFF])?;
        self.command(&[SET_DISPLAY_CLOCK_DIV, self.config.clock_divider])?;
        self.command(&[SET_MULTIPLEX, multiplex])?;
        self.command(&[SET_COM_PINS, com_pins])?;
        self.command(&[SET_DISPLAY_OFFSET, self.config.display_offset])?;
        self.command(&[SET_START_LINE | self.config.start_line])?;
        self.command(&[CHARGE_PUMP, self.config.vcc_source.charge_pump()])?;
        self.command(&[SET_MEMORY_MODE, self.config.address_mode as u8])?;
        self.command(&[if self.config.segment_remap {
            SEG_REMAP | 0x01
        } else {
            SEG_REMAP
        }])?;
        self.command(&[if self.config.com_scan_descending {
            COM_SCAN_DEC
        } else {
            COM_SCAN_INC
        }])?;
        self.command(&[SET_CONTRAST, self.config.contrast])?;
        self.command(&[SET_PRECHARGE, self.config.precharge])?;
        self.command(&[SET_VCOM_DESELECT, self.config.vcom_deselect])?;
        self.command(&[DISPLAY_ALL_ON_RESUME])?;
        self.command(&[NORMAL_DISPLAY])?;
        self.command(&[DISPLAY_ON])?;

        log::debug!("ssd1306: initialized {}x{} panel", dims.width, dims.height);
        Ok(())
    }

    /// Pulse the reset line (low for 10ms, then high)
    ///
    /// Called by [`init`](Display::init), and independently usable to
    /// recover a wedged panel before re-initializing.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.reset(delay).map_err(Error::Interface)
    }

    /// Transfer the framebuffer to the controller RAM
    ///
    /// Programs the memory mode and the full page/column address window on
    /// every call (the controller does not retain window state reliably
    /// across power states), then streams the whole buffer as one data
    /// transfer.
    pub fn flush(&mut self) -> DisplayResult<I> {
        let dims = self.config.dimensions;

        self.command(&[SET_MEMORY_MODE, self.config.address_mode as u8])?;
        self.command(&[SET_PAGE_ADDRESS, 0, dims.pages() - 1])?;
        self.command(&[SET_COL_ADDRESS, 0, (dims.width - 1) as u8])?;
        self.interface
            .send_data(&self.buffer)
            .map_err(Error::Interface)?;

        log::trace!("ssd1306: flushed {} bytes", self.buffer.len());
        Ok(())
    }

    /// Fill the framebuffer with zero (all pixels off)
    ///
    /// No hardware access; call [`flush`](Display::flush) to apply.
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Fill every framebuffer byte with a raw pattern byte
    ///
    /// No hardware access; call [`flush`](Display::flush) to apply.
    pub fn fill(&mut self, pattern: u8) {
        self.buffer.fill(pattern);
    }

    /// Set or clear a single pixel in the framebuffer
    ///
    /// Out-of-range coordinates are silently ignored so a drawing loop
    /// never faults on a caller mistake.
    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        let dims = self.config.dimensions;
        if x >= dims.width as u32 || y >= dims.height as u32 {
            return;
        }

        let index = (y as usize / 8) * dims.width as usize + x as usize;
        let bit = 1u8 << (y % 8);

        if on {
            self.buffer[index] |= bit;
        } else {
            self.buffer[index] &= !bit;
        }
    }

    /// Read-only view of the packed framebuffer
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Invert the panel rendering (0 = lit)
    ///
    /// Hardware-only; the framebuffer is unchanged.
    pub fn invert(&mut self) -> DisplayResult<I> {
        self.command(&[INVERT_DISPLAY])
    }

    /// Restore normal panel rendering (1 = lit)
    ///
    /// Hardware-only; the framebuffer is unchanged.
    pub fn normal(&mut self) -> DisplayResult<I> {
        self.command(&[NORMAL_DISPLAY])
    }

    /// Set the contrast level
    pub fn set_contrast(&mut self, level: u8) -> DisplayResult<I> {
        self.command(&[SET_CONTRAST, level])
    }

    /// Force every pixel on, or resume following RAM content
    pub fn all_on(&mut self, enabled: bool) -> DisplayResult<I> {
        self.command(&[if enabled {
            DISPLAY_ALL_ON
        } else {
            DISPLAY_ALL_ON_RESUME
        }])
    }

    /// Start a continuous horizontal scroll over a page range
    ///
    /// RAM writes while a scroll is active are undefined per the datasheet;
    /// stop with [`stop_scroll`](Display::stop_scroll) before flushing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageRange`] if `start_page > end_page` or the
    /// range exceeds the panel's page count.
    pub fn start_horizontal_scroll(
        &mut self,
        direction: ScrollDirection,
        start_page: u8,
        end_page: u8,
        interval: ScrollInterval,
    ) -> DisplayResult<I> {
        self.check_page_range(start_page, end_page)?;

        let opcode = match direction {
            ScrollDirection::Right => RIGHT_HORIZ_SCROLL,
            ScrollDirection::Left => LEFT_HORIZ_SCROLL,
        };
        self.command(&[
            opcode,
            0x00,
            start_page,
            interval as u8,
            end_page,
            0x00,
            0xFF,
        ])?;
        self.command(&[ACTIVATE_SCROLL])
    }

    /// Start a combined vertical and horizontal scroll over a page range
    ///
    /// `vertical_offset` is the number of rows shifted per scroll step. The
    /// whole panel height is configured as the scroll area.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageRange`] if `start_page > end_page` or the
    /// range exceeds the panel's page count.
    pub fn start_diagonal_scroll(
        &mut self,
        direction: ScrollDirection,
        start_page: u8,
        end_page: u8,
        interval: ScrollInterval,
        vertical_offset: u8,
    ) -> DisplayResult<I> {
        self.check_page_range(start_page, end_page)?;

        let height = self.config.dimensions.height as u8;
        self.command(&[SET_VERT_SCROLL_AREA, 0x00, height])?;

        let opcode = match direction {
            ScrollDirection::Right => VERT_AND_RIGHT_HORIZ_SCROLL,
            ScrollDirection::Left => VERT_AND_LEFT_HORIZ_SCROLL,
        };
        self.command(&[
            opcode,
            0x00,
            start_page,
            interval as u8,
            end_page,
            vertical_offset,
        ])?;
        self.command(&[ACTIVATE_SCROLL])
    }

    /// Stop any active scroll
    ///
    /// Controller RAM may be corrupted by the scroll; flush afterwards to
    /// restore the framebuffer contents.
    pub fn stop_scroll(&mut self) -> DisplayResult<I> {
        self.command(&[DEACTIVATE_SCROLL])
    }

    /// Release the underlying hardware interface
    ///
    /// Consumes the driver; the framebuffer is dropped and the interface
    /// (and through it the bus and GPIO handles) is handed back exactly
    /// once.
    pub fn release(self) -> I {
        self.interface
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> crate::config::Dimensions {
        self.config.dimensions
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn check_page_range(&self, start_page: u8, end_page: u8) -> DisplayResult<I> {
        if start_page > end_page || end_page >= self.config.dimensions.pages() {
            return Err(Error::InvalidPageRange {
                start: start_page,
                end: end_page,
            });
        }
        Ok(())
    }

    /// Send a command with its argument bytes to the controller
    fn command(&mut self, bytes: &[u8]) -> DisplayResult<I> {
        self.interface.send_commands(bytes).map_err(Error::Interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AddressMode, Builder, Dimensions, VccSource};

    #[derive(Debug)]
    struct MockInterface {
        commands: Vec<Vec<u8>>,
        data: Vec<Vec<u8>>,
        resets: usize,
    }

    impl MockInterface {
        fn new() -> Self {
            Self {
                commands: Vec::new(),
                data: Vec::new(),
                resets: 0,
            }
        }
    }

    impl DisplayInterface for MockInterface {
        type Error = core::convert::Infallible;

        fn send_commands(&mut self, commands: &[u8]) -> Result<(), Self::Error> {
            self.commands.push(commands.to_vec());
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.data.push(data.to_vec());
            Ok(())
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
            self.resets += 1;
            Ok(())
        }
    }

    struct MockDelay;
    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    #[derive(Debug, PartialEq)]
    struct BusError;

    /// Interface whose command channel dies after a fixed number of writes
    #[derive(Debug)]
    struct FailingInterface {
        commands_sent: usize,
        commands_before_failure: usize,
    }

    impl FailingInterface {
        fn new(commands_before_failure: usize) -> Self {
            Self {
                commands_sent: 0,
                commands_before_failure,
            }
        }
    }

    impl DisplayInterface for FailingInterface {
        type Error = BusError;

        fn send_commands(&mut self, _commands: &[u8]) -> Result<(), Self::Error> {
            if self.commands_sent >= self.commands_before_failure {
                return Err(BusError);
            }
            self.commands_sent += 1;
            Ok(())
        }

        fn send_data(&mut self, _data: &[u8]) -> Result<(), Self::Error> {
            Err(BusError)
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn test_display(width: u16, height: u16) -> Display<MockInterface> {
        let config = Builder::new()
            .dimensions(Dimensions::new(width, height).unwrap())
            .build()
            .unwrap();
        Display::new(MockInterface::new(), config)
    }

    #[test]
    fn test_buffer_allocated_and_zeroed_at_construction() {
        let display = test_display(128, 32);
        assert_eq!(display.buffer().len(), 512); // 128 * 32 / 8
        assert!(display.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_set_pixel_packs_page_major() {
        let mut display = test_display(128, 32);

        // (0,0) -> bit 0 of byte 0; (0,8) -> bit 0 of byte 128 (page 1)
        display.set_pixel(0, 0, true);
        display.set_pixel(0, 8, true);
        assert_eq!(display.buffer()[0], 0x01);
        assert_eq!(display.buffer()[128], 0x01);

        // (5,10) -> page 1, bit 2, column 5
        display.set_pixel(5, 10, true);
        assert_eq!(display.buffer()[128 + 5], 0x04);
    }

    #[test]
    fn test_set_pixel_clear_restores_bit() {
        let mut display = test_display(128, 64);
        display.set_pixel(17, 23, true);
        assert_eq!(display.buffer()[2 * 128 + 17], 1 << 7);
        display.set_pixel(17, 23, false);
        assert_eq!(display.buffer()[2 * 128 + 17], 0x00);
    }

    #[test]
    fn test_set_pixel_does_not_alias_neighbours() {
        let mut display = test_display(128, 64);
        display.set_pixel(64, 32, true);

        let touched = display
            .buffer()
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b != 0)
            .collect::<Vec<_>>();
        assert_eq!(touched, vec![(4 * 128 + 64, &0x01u8)]);

        // Clearing an adjacent pixel leaves it alone
        display.set_pixel(63, 32, false);
        display.set_pixel(64, 33, false);
        assert_eq!(display.buffer()[4 * 128 + 64], 0x01);
    }

    #[test]
    fn test_set_pixel_out_of_range_is_silent_noop() {
        let mut display = test_display(128, 32);
        display.set_pixel(128, 0, true);
        display.set_pixel(0, 32, true);
        display.set_pixel(u32::MAX, u32::MAX, true);
        assert!(display.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_clear_zeroes_whole_buffer() {
        let mut display = test_display(128, 64);
        display.fill(0xA5);
        display.clear();
        assert!(display.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_init_command_order_height_64() {
        let mut display = test_display(128, 64);
        let mut delay = MockDelay;
        display.init(&mut delay).unwrap();

        assert_eq!(display.interface.resets, 1);
        assert_eq!(
            display.interface.commands,
            vec![
                vec![0xAE],       // DISPLAY_OFF
                vec![0xD5, 0x80], // clock divider
                vec![0xA8, 0x3F], // multiplex for 64 rows
                vec![0xDA, 0x12], // COM pins for 64 rows
                vec![0xD3, 0x00], // display offset
                vec![0x40],       // start line 0
                vec![0x8D, 0x14], // charge pump, internal VCC
                vec![0x20, 0x00], // memory mode horizontal
                vec![0xA1],       // segment remap
                vec![0xC8],       // COM scan descending
                vec![0x81, 0x8F], // contrast
                vec![0xD9, 0xF1], // pre-charge
                vec![0xDB, 0x40], // VCOM deselect
                vec![0xA4],       // all-on resume
                vec![0xA6],       // normal display
                vec![0xAF],       // DISPLAY_ON
            ]
        );
    }

    #[test]
    fn test_init_height_32_uses_short_panel_parameters() {
        let mut display = test_display(128, 32);
        let mut delay = MockDelay;
        display.init(&mut delay).unwrap();

        assert!(display.interface.commands.contains(&vec![0xA8, 0x1F]));
        assert!(display.interface.commands.contains(&vec![0xDA, 0x02]));
    }

    #[test]
    fn test_init_external_vcc_charge_pump() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 64).unwrap())
            .vcc_source(VccSource::External)
            .build()
            .unwrap();
        let mut display = Display::new(MockInterface::new(), config);
        let mut delay = MockDelay;
        display.init(&mut delay).unwrap();

        assert!(display.interface.commands.contains(&vec![0x8D, 0x10]));
        // Pre-charge period follows the supply as well
        assert!(display.interface.commands.contains(&vec![0xD9, 0x22]));
    }

    #[test]
    fn test_init_propagates_first_bus_failure_without_retry() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 64).unwrap())
            .build()
            .unwrap();
        // DISPLAY_OFF and the clock divider go through, the third write dies
        let mut display = Display::new(FailingInterface::new(2), config);
        let mut delay = MockDelay;

        let result = display.init(&mut delay);
        assert!(matches!(result, Err(Error::Interface(BusError))));
        assert_eq!(display.interface.commands_sent, 2);
    }

    #[test]
    fn test_flush_propagates_data_transfer_failure() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 64).unwrap())
            .build()
            .unwrap();
        // Window commands succeed, the buffer transfer fails
        let mut display = Display::new(FailingInterface::new(usize::MAX), config);

        let result = display.flush();
        assert!(matches!(result, Err(Error::Interface(BusError))));
        assert_eq!(display.interface.commands_sent, 3);
    }

    #[test]
    fn test_flush_propagates_window_command_failure() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 64).unwrap())
            .build()
            .unwrap();
        let mut display = Display::new(FailingInterface::new(0), config);

        let result = display.flush();
        assert!(matches!(result, Err(Error::Interface(BusError))));
        assert_eq!(display.interface.commands_sent, 0);
    }

    #[test]
    fn test_flush_programs_window_every_call() {
        let mut display = test_display(128, 32);
        display.flush().unwrap();
        display.set_pixel(3, 3, true);
        display.flush().unwrap();

        let window = vec![
            vec![0x20, 0x00],       // memory mode horizontal
            vec![0x22, 0x00, 0x03], // pages 0..=3
            vec![0x21, 0x00, 0x7F], // columns 0..=127
        ];
        assert_eq!(display.interface.commands[0..3], window);
        assert_eq!(display.interface.commands[3..6], window);
        assert_eq!(display.interface.data.len(), 2);
        assert_eq!(display.interface.data[1].len(), 512);
        assert_eq!(display.interface.data[1][3], 0x08); // (3,3) -> bit 3
    }

    #[test]
    fn test_flush_honours_configured_address_mode() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 64).unwrap())
            .address_mode(AddressMode::Vertical)
            .build()
            .unwrap();
        let mut display = Display::new(MockInterface::new(), config);
        display.flush().unwrap();

        assert_eq!(display.interface.commands[0], vec![0x20, 0x01]);
        assert_eq!(display.interface.commands[1], vec![0x22, 0x00, 0x07]);
    }

    #[test]
    fn test_invert_and_normal_commands() {
        let mut display = test_display(128, 64);
        display.invert().unwrap();
        display.normal().unwrap();
        assert_eq!(display.interface.commands, vec![vec![0xA7], vec![0xA6]]);
        // Framebuffer untouched
        assert!(display.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_set_contrast_and_all_on() {
        let mut display = test_display(128, 64);
        display.set_contrast(0x42).unwrap();
        display.all_on(true).unwrap();
        display.all_on(false).unwrap();
        assert_eq!(
            display.interface.commands,
            vec![vec![0x81, 0x42], vec![0xA5], vec![0xA4]]
        );
    }

    #[test]
    fn test_horizontal_scroll_setup_bytes() {
        let mut display = test_display(128, 64);
        display
            .start_horizontal_scroll(ScrollDirection::Right, 0, 7, ScrollInterval::Frames5)
            .unwrap();
        assert_eq!(
            display.interface.commands,
            vec![
                vec![0x26, 0x00, 0x00, 0x00, 0x07, 0x00, 0xFF],
                vec![0x2F], // activate
            ]
        );
    }

    #[test]
    fn test_diagonal_scroll_sets_scroll_area_first() {
        let mut display = test_display(128, 32);
        display
            .start_diagonal_scroll(ScrollDirection::Left, 1, 3, ScrollInterval::Frames25, 1)
            .unwrap();
        assert_eq!(
            display.interface.commands,
            vec![
                vec![0xA3, 0x00, 0x20], // fixed area 0, scroll area 32 rows
                vec![0x2A, 0x00, 0x01, 0b110, 0x03, 0x01],
                vec![0x2F],
            ]
        );
    }

    #[test]
    fn test_scroll_rejects_bad_page_range() {
        let mut display = test_display(128, 32);
        let result =
            display.start_horizontal_scroll(ScrollDirection::Left, 2, 1, ScrollInterval::Frames2);
        assert!(matches!(
            result,
            Err(Error::InvalidPageRange { start: 2, end: 1 })
        ));

        let result =
            display.start_horizontal_scroll(ScrollDirection::Left, 0, 4, ScrollInterval::Frames2);
        assert!(matches!(result, Err(Error::InvalidPageRange { .. })));

        // Nothing was sent
        assert!(display.interface.commands.is_empty());
    }

    #[test]
    fn test_stop_scroll() {
        let mut display = test_display(128, 64);
        display.stop_scroll().unwrap();
        assert_eq!(display.interface.commands, vec![vec![0x2E]]);
    }

    #[test]
    fn test_release_returns_interface() {
        let mut display = test_display(128, 64);
        display.stop_scroll().unwrap();
        let interface = display.release();
        assert_eq!(interface.commands.len(), 1);
    }
}

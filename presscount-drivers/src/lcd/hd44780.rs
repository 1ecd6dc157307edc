//! HD44780 16x2 LCD driver over a PCF8574 backpack
//!
//! Protocol layer that turns logical display operations into timed
//! sequences of [`NibbleFrame`]s. The controller gives no busy feedback over
//! this wiring (RW is tied low), so every step is followed by a fixed delay
//! covering its worst-case execution time. These delays are part of the
//! protocol: shortening them makes the controller miss strobes.

use embedded_hal::delay::DelayNs;

use presscount_core::text::{format_radix, TextError, INTEGER_TEXT_CAPACITY};
use presscount_core::traits::{CharacterDisplay, DisplayCommand};
use presscount_hal::I2cBus;

use super::pcf8574::NibbleFrame;

/// HD44780 instructions
pub mod cmd {
    /// Blank DDRAM and home the cursor
    pub const CLEAR_DISPLAY: u8 = 0x01;
    /// Cursor direction and display shift
    pub const ENTRY_MODE_SET: u8 = 0x04;
    /// Display, cursor and blink on/off
    pub const DISPLAY_CONTROL: u8 = 0x08;
    /// Interface width, line count and font
    pub const FUNCTION_SET: u8 = 0x20;
    /// Move the cursor to a DDRAM address
    pub const SET_DDRAM_ADDR: u8 = 0x80;

    /// Entry mode: advance the cursor after each character
    pub const ENTRY_INCREMENT: u8 = 0x02;

    /// Display control: display on
    pub const DISPLAY_ON: u8 = 0x04;

    /// Function set: 8-bit interface
    pub const EIGHT_BIT_MODE: u8 = 0x10;
    /// Function set: two display lines
    pub const TWO_LINE: u8 = 0x08;

    /// 8-bit function set, sent repeatedly to reach a known state
    pub const WAKE_UP: u8 = FUNCTION_SET | EIGHT_BIT_MODE;

    /// DDRAM base of each row
    pub const ROW_0: u8 = SET_DDRAM_ADDR;
    pub const ROW_1: u8 = SET_DDRAM_ADDR | 0x40;
}

/// Wait after power-up before the first wake-up (ms)
pub const POWER_ON_DELAY_MS: u32 = 50;

/// Settling time after every byte (ms)
pub const BYTE_SETTLE_MS: u32 = 1;

/// Extra time a clear needs on top of the byte settle (ms)
pub const CLEAR_DELAY_MS: u32 = 2;

/// Initialization instructions and the wait after each (ms)
///
/// Three wake-ups force 8-bit mode whatever state the controller powered up
/// in, then 0x20 drops to 4-bit mode. From there: 2 lines / 5x8 font,
/// display off, clear, increment without shift, display on.
pub const INIT_SEQUENCE: [(u8, u32); 9] = [
    (cmd::WAKE_UP, 5),
    (cmd::WAKE_UP, 1),
    (cmd::WAKE_UP, 10),
    (cmd::FUNCTION_SET, 10),
    (cmd::FUNCTION_SET | cmd::TWO_LINE, 1),
    (cmd::DISPLAY_CONTROL, 1),
    (cmd::CLEAR_DISPLAY, CLEAR_DELAY_MS),
    (cmd::ENTRY_MODE_SET | cmd::ENTRY_INCREMENT, 1),
    (cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON, 1),
];

/// Errors from the LCD driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdError<E> {
    /// The bus write failed (NACK, timeout, ...)
    Bus(E),
    /// Operation attempted before [`Lcd1602::init`] completed
    NotInitialized,
    /// Integer text did not fit its buffer
    Text(TextError),
}

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdState {
    /// Nothing sent yet, or the last init failed
    Uninitialized,
    /// Init sequence in progress
    Initializing,
    /// Accepting commands
    Ready,
}

/// LCD1602 behind a PCF8574 backpack
pub struct Lcd1602<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    state: LcdState,
}

impl<I2C, D> Lcd1602<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    /// Create a driver for the backpack at 7-bit `address`
    ///
    /// Nothing is sent until [`init`](Self::init).
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            state: LcdState::Uninitialized,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> LcdState {
        self.state
    }

    /// Give back the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Run the power-on initialization sequence
    ///
    /// Safe to call again to recover a display that lost its state. On
    /// failure the driver is left `Uninitialized`.
    pub fn init(&mut self) -> Result<(), LcdError<I2C::Error>> {
        self.state = LcdState::Initializing;

        let result = self.init_sequence();
        self.state = match result {
            Ok(()) => LcdState::Ready,
            Err(_) => LcdState::Uninitialized,
        };
        result
    }

    fn init_sequence(&mut self) -> Result<(), LcdError<I2C::Error>> {
        self.delay.delay_ms(POWER_ON_DELAY_MS);

        for &(instruction, wait_ms) in INIT_SEQUENCE.iter() {
            self.send_command(instruction)?;
            self.delay.delay_ms(wait_ms);
        }

        Ok(())
    }

    /// Blank the display and return the cursor to row 0, column 0
    pub fn clear(&mut self) -> Result<(), LcdError<I2C::Error>> {
        self.ensure_ready()?;
        self.send_command(cmd::CLEAR_DISPLAY)?;
        self.delay.delay_ms(CLEAR_DELAY_MS);
        Ok(())
    }

    /// Move the cursor
    ///
    /// Row 0 starts at DDRAM 0x00 and row 1 at 0x40. Any other row sends
    /// `col` unmodified as an instruction byte, which the controller
    /// interprets as whatever instruction that value encodes.
    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), LcdError<I2C::Error>> {
        self.ensure_ready()?;
        let instruction = match row {
            0 => cmd::ROW_0 | col,
            1 => cmd::ROW_1 | col,
            _ => col,
        };
        self.send_command(instruction)
    }

    /// Write one character at the cursor
    pub fn write_char(&mut self, ch: u8) -> Result<(), LcdError<I2C::Error>> {
        self.ensure_ready()?;
        self.send_data(ch)
    }

    /// Write bytes at the cursor, stopping at the first NUL
    pub fn write_bytes(&mut self, text: &[u8]) -> Result<(), LcdError<I2C::Error>> {
        self.ensure_ready()?;
        for &ch in text.iter().take_while(|&&ch| ch != 0) {
            self.send_data(ch)?;
        }
        Ok(())
    }

    /// Write ASCII text at the cursor
    pub fn write_str(&mut self, text: &str) -> Result<(), LcdError<I2C::Error>> {
        self.write_bytes(text.as_bytes())
    }

    /// Write a decimal integer at the cursor
    pub fn write_integer(&mut self, value: i32) -> Result<(), LcdError<I2C::Error>> {
        let digits =
            format_radix::<INTEGER_TEXT_CAPACITY>(value, 10).map_err(LcdError::Text)?;
        self.write_bytes(&digits)
    }

    /// Carry out one logical display operation
    pub fn execute(&mut self, command: DisplayCommand<'_>) -> Result<(), LcdError<I2C::Error>> {
        match command {
            DisplayCommand::Initialize => self.init(),
            DisplayCommand::ClearAndHome => self.clear(),
            DisplayCommand::SetCursor { row, col } => self.set_cursor(row, col),
            DisplayCommand::WriteChar(ch) => self.write_char(ch),
            DisplayCommand::WriteText(text) => self.write_bytes(text),
        }
    }

    fn ensure_ready(&self) -> Result<(), LcdError<I2C::Error>> {
        match self.state {
            LcdState::Ready => Ok(()),
            _ => Err(LcdError::NotInitialized),
        }
    }

    fn send_command(&mut self, instruction: u8) -> Result<(), LcdError<I2C::Error>> {
        self.send(NibbleFrame::command(instruction))
    }

    fn send_data(&mut self, ch: u8) -> Result<(), LcdError<I2C::Error>> {
        self.send(NibbleFrame::data(ch))
    }

    /// One bus write of four bytes, then the per-byte settle
    fn send(&mut self, frame: NibbleFrame) -> Result<(), LcdError<I2C::Error>> {
        self.i2c
            .write(self.address, frame.as_bytes())
            .map_err(LcdError::Bus)?;
        self.delay.delay_ms(BYTE_SETTLE_MS);
        Ok(())
    }
}

impl<I2C, D> CharacterDisplay for Lcd1602<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    type Error = LcdError<I2C::Error>;

    fn clear(&mut self) -> Result<(), Self::Error> {
        Lcd1602::clear(self)
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error> {
        Lcd1602::set_cursor(self, row, col)
    }

    fn write_char(&mut self, ch: u8) -> Result<(), Self::Error> {
        Lcd1602::write_char(self, ch)
    }

    fn write_bytes(&mut self, text: &[u8]) -> Result<(), Self::Error> {
        Lcd1602::write_bytes(self, text)
    }

    fn write_integer(&mut self, value: i32) -> Result<(), Self::Error> {
        Lcd1602::write_integer(self, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lcd::pcf8574::RegisterSelect;
    use presscount_core::{EdgeCounter, RenderLoop, SharedCounter};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    const ADDR: u8 = 0x27;
    const NS_PER_MS: u64 = 1_000_000;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Write(u8, Vec<u8>),
        DelayNs(u64),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum MockError {
        Timeout,
    }

    /// Bus that records writes and can start failing after N of them
    struct MockBus {
        log: Log,
        fail_after: Option<usize>,
        writes: usize,
    }

    impl I2cBus for MockBus {
        type Error = MockError;

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), MockError> {
            if self.fail_after.is_some_and(|n| self.writes >= n) {
                return Err(MockError::Timeout);
            }
            self.writes += 1;
            self.log.borrow_mut().push(Event::Write(address, data.to_vec()));
            Ok(())
        }
    }

    struct MockDelay {
        log: Log,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.log.borrow_mut().push(Event::DelayNs(ns as u64));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Event::DelayNs(ms as u64 * NS_PER_MS));
        }
    }

    /// One decoded LCD byte and the time waited before and after it
    #[derive(Debug, Clone, Copy)]
    struct Step {
        value: u8,
        rs: RegisterSelect,
        before_ns: u64,
        after_ns: u64,
    }

    fn lcd_with_log(fail_after: Option<usize>) -> (Lcd1602<MockBus, MockDelay>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let bus = MockBus {
            log: log.clone(),
            fail_after,
            writes: 0,
        };
        let delay = MockDelay { log: log.clone() };
        (Lcd1602::new(bus, delay, ADDR), log)
    }

    fn ready_lcd() -> (Lcd1602<MockBus, MockDelay>, Log) {
        let (mut lcd, log) = lcd_with_log(None);
        lcd.init().unwrap();
        log.borrow_mut().clear();
        (lcd, log)
    }

    fn steps(log: &Log) -> Vec<Step> {
        let mut out: Vec<Step> = Vec::new();
        let mut pending_ns = 0;
        for event in log.borrow().iter() {
            match event {
                Event::DelayNs(ns) => pending_ns += ns,
                Event::Write(addr, bytes) => {
                    assert_eq!(*addr, ADDR);
                    assert_eq!(bytes.len(), 4, "one frame per bus write");
                    let (value, rs) = NibbleFrame::decode(bytes).expect("malformed frame");
                    if let Some(prev) = out.last_mut() {
                        prev.after_ns = pending_ns;
                    }
                    out.push(Step {
                        value,
                        rs,
                        before_ns: pending_ns,
                        after_ns: 0,
                    });
                    pending_ns = 0;
                }
            }
        }
        if let Some(last) = out.last_mut() {
            last.after_ns = pending_ns;
        }
        out
    }

    fn commands(log: &Log) -> Vec<u8> {
        steps(log)
            .iter()
            .filter(|s| s.rs == RegisterSelect::Command)
            .map(|s| s.value)
            .collect()
    }

    fn text(log: &Log) -> Vec<u8> {
        steps(log)
            .iter()
            .filter(|s| s.rs == RegisterSelect::Data)
            .map(|s| s.value)
            .collect()
    }

    #[test]
    fn test_init_sequence_bytes_and_delays() {
        let (mut lcd, log) = lcd_with_log(None);
        lcd.init().unwrap();

        let steps = steps(&log);
        let sent: Vec<u8> = steps.iter().map(|s| s.value).collect();
        assert_eq!(sent, [0x30, 0x30, 0x30, 0x20, 0x28, 0x08, 0x01, 0x06, 0x0C]);
        assert!(steps.iter().all(|s| s.rs == RegisterSelect::Command));

        let min_before_ms = [50, 5, 1, 10, 1, 1, 2, 1, 1];
        for (step, min_ms) in steps.iter().zip(min_before_ms) {
            assert!(
                step.before_ns >= min_ms * NS_PER_MS,
                "0x{:02x}: waited {} ns, need {} ms",
                step.value,
                step.before_ns,
                min_ms
            );
        }
        // Clear needs at least 2 ms before the next instruction
        assert!(steps[6].after_ns >= 2 * NS_PER_MS);
        assert!(steps[8].after_ns >= NS_PER_MS);
    }

    #[test]
    fn test_state_transitions() {
        let (mut lcd, log) = lcd_with_log(None);
        assert_eq!(lcd.state(), LcdState::Uninitialized);

        assert_eq!(lcd.write_char(b'x'), Err(LcdError::NotInitialized));
        assert_eq!(lcd.set_cursor(0, 0), Err(LcdError::NotInitialized));
        assert!(log.borrow().is_empty());

        lcd.init().unwrap();
        assert_eq!(lcd.state(), LcdState::Ready);
    }

    #[test]
    fn test_init_failure_leaves_uninitialized() {
        let (mut lcd, _log) = lcd_with_log(Some(4));
        assert_eq!(lcd.init(), Err(LcdError::Bus(MockError::Timeout)));
        assert_eq!(lcd.state(), LcdState::Uninitialized);
    }

    #[test]
    fn test_cursor_addresses() {
        let (mut lcd, log) = ready_lcd();
        lcd.set_cursor(0, 5).unwrap();
        lcd.set_cursor(1, 0).unwrap();
        lcd.set_cursor(1, 15).unwrap();
        assert_eq!(commands(&log), [0x85, 0xC0, 0xCF]);
    }

    #[test]
    fn test_cursor_invalid_row_sends_column() {
        let (mut lcd, log) = ready_lcd();
        lcd.set_cursor(2, 3).unwrap();
        assert_eq!(commands(&log), [0x03]);
    }

    #[test]
    fn test_every_byte_settles() {
        let (mut lcd, log) = ready_lcd();
        lcd.write_str("Hi").unwrap();

        let steps = steps(&log);
        assert_eq!(steps.len(), 2);
        assert!(steps.iter().all(|s| s.after_ns >= NS_PER_MS));
    }

    #[test]
    fn test_write_str() {
        let (mut lcd, log) = ready_lcd();
        lcd.write_str("Count:").unwrap();
        assert_eq!(text(&log), b"Count:");
        assert!(commands(&log).is_empty());
    }

    #[test]
    fn test_write_bytes_stops_at_nul() {
        let (mut lcd, log) = ready_lcd();
        lcd.write_bytes(b"ab\0cd").unwrap();
        assert_eq!(text(&log), b"ab");
    }

    #[test]
    fn test_write_integer() {
        let (mut lcd, log) = ready_lcd();
        lcd.write_integer(-42).unwrap();
        assert_eq!(text(&log), b"-42");
    }

    #[test]
    fn test_write_integer_full_range() {
        // Eleven characters, the widest i32
        let (mut lcd, log) = ready_lcd();
        lcd.write_integer(i32::MIN).unwrap();
        assert_eq!(text(&log), b"-2147483648");
    }

    #[test]
    fn test_clear() {
        let (mut lcd, log) = ready_lcd();
        lcd.clear().unwrap();

        let steps = steps(&log);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].value, cmd::CLEAR_DISPLAY);
        assert!(steps[0].after_ns >= 2 * NS_PER_MS);
    }

    #[test]
    fn test_execute() {
        let (mut lcd, log) = lcd_with_log(None);
        lcd.execute(DisplayCommand::Initialize).unwrap();
        log.borrow_mut().clear();

        lcd.execute(DisplayCommand::ClearAndHome).unwrap();
        lcd.execute(DisplayCommand::SetCursor { row: 1, col: 2 }).unwrap();
        lcd.execute(DisplayCommand::WriteChar(b'#')).unwrap();
        lcd.execute(DisplayCommand::WriteText(b"ok")).unwrap();

        assert_eq!(commands(&log), [0x01, 0xC2]);
        assert_eq!(text(&log), b"#ok");
    }

    #[test]
    fn test_bus_error_propagates() {
        let (mut lcd, log) = lcd_with_log(Some(INIT_SEQUENCE.len() + 1));
        lcd.init().unwrap();
        log.borrow_mut().clear();

        assert_eq!(
            lcd.write_str("ab"),
            Err(LcdError::Bus(MockError::Timeout))
        );
        assert_eq!(text(&log), b"a");
        // A bus failure is transient; the driver stays usable
        assert_eq!(lcd.state(), LcdState::Ready);
    }

    #[test]
    fn test_release() {
        let (lcd, _log) = ready_lcd();
        let (bus, _delay) = lcd.release();
        assert_eq!(bus.writes, INIT_SEQUENCE.len());
    }

    #[test]
    fn test_render_loop_end_to_end() {
        let counter = SharedCounter::new();
        let mut edges = EdgeCounter::new(counter.take_writer().unwrap(), 0);
        let mut render = RenderLoop::new(counter.reader());
        let (mut lcd, log) = ready_lcd();

        render.poll(&mut lcd).unwrap();
        log.borrow_mut().clear();

        edges.on_edge(500);
        render.poll(&mut lcd).unwrap();
        edges.on_edge(1_500);
        render.poll(&mut lcd).unwrap();

        let sent: Vec<(u8, RegisterSelect)> = steps(&log).iter().map(|s| (s.value, s.rs)).collect();
        assert_eq!(
            sent,
            [
                (0x80, RegisterSelect::Command),
                (b'1', RegisterSelect::Data),
                (0x80, RegisterSelect::Command),
                (b'2', RegisterSelect::Data),
            ]
        );
        assert!(!commands(&log).contains(&cmd::CLEAR_DISPLAY));
    }
}

//! Character LCD drivers
//!
//! HD44780-compatible 16x2 modules wired in 4-bit mode through a PCF8574
//! I/O expander. Each LCD byte becomes one [`NibbleFrame`] on the bus.

pub mod hd44780;
pub mod pcf8574;

pub use hd44780::{Lcd1602, LcdError, LcdState};
pub use pcf8574::{NibbleFrame, RegisterSelect};

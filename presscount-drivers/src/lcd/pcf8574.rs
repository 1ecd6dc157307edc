//! PCF8574 backpack framing
//!
//! The backpack latches every byte written to it onto P0-P7:
//!
//! ```text
//! bit  7  6  5  4  3  2  1  0
//!     D7 D6 D5 D4 BL EN RW RS
//! ```
//!
//! Only the LCD's upper four data lines are wired, so an 8-bit value goes
//! over as two nibbles, high first. The LCD latches a nibble on the falling
//! edge of EN, so each nibble is written twice: once with EN high, once
//! with EN low.

/// Control bits in the low nibble of each bus byte
pub mod bits {
    /// Register select: 0 = instruction, 1 = data
    pub const RS: u8 = 0x01;
    /// Read/write: kept at 0 (write)
    pub const RW: u8 = 0x02;
    /// Enable strobe
    pub const EN: u8 = 0x04;
    /// Backlight transistor; always on
    pub const BACKLIGHT: u8 = 0x08;
    /// D4-D7
    pub const DATA_MASK: u8 = 0xF0;
}

/// Which LCD register a byte is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterSelect {
    /// Instruction register (commands)
    Command,
    /// Data register (characters)
    Data,
}

impl RegisterSelect {
    const fn bit(self) -> u8 {
        match self {
            RegisterSelect::Command => 0,
            RegisterSelect::Data => bits::RS,
        }
    }
}

/// The four bus bytes that move one LCD byte across the backpack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NibbleFrame([u8; 4]);

impl NibbleFrame {
    /// Frame `value` for the given register
    pub const fn new(value: u8, rs: RegisterSelect) -> Self {
        let high = value & bits::DATA_MASK;
        let low = (value << 4) & bits::DATA_MASK;
        let ctrl = bits::BACKLIGHT | rs.bit();

        Self([
            high | ctrl | bits::EN,
            high | ctrl,
            low | ctrl | bits::EN,
            low | ctrl,
        ])
    }

    /// Frame an instruction byte
    pub const fn command(value: u8) -> Self {
        Self::new(value, RegisterSelect::Command)
    }

    /// Frame a character byte
    pub const fn data(value: u8) -> Self {
        Self::new(value, RegisterSelect::Data)
    }

    /// Bytes in bus order
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Reassemble the LCD byte and register this frame carries
    ///
    /// Returns `None` if the bytes do not follow the strobe pattern.
    pub fn decode(bytes: &[u8]) -> Option<(u8, RegisterSelect)> {
        let [b0, b1, b2, b3] = <[u8; 4]>::try_from(bytes).ok()?;
        let rs = if b0 & bits::RS != 0 {
            RegisterSelect::Data
        } else {
            RegisterSelect::Command
        };
        let value = (b0 & bits::DATA_MASK) | ((b2 & bits::DATA_MASK) >> 4);

        (Self::new(value, rs).0 == [b0, b1, b2, b3]).then_some((value, rs))
    }
}

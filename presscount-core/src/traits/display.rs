//! Character display trait

use crate::text::format_decimal;

/// A logical operation on a character display
///
/// Built and consumed within one call; never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayCommand<'a> {
    /// Run the controller's power-on initialization sequence
    Initialize,
    /// Blank the display and move the cursor to row 0, column 0
    ClearAndHome,
    /// Move the cursor
    SetCursor {
        /// Row (0-1)
        row: u8,
        /// Column within the row
        col: u8,
    },
    /// Write one byte at the cursor
    WriteChar(u8),
    /// Write bytes at the cursor, stopping at a NUL if there is one
    WriteText(&'a [u8]),
}

/// Trait for character-cell displays
///
/// Implemented by the LCD driver; the render loop only talks to this.
pub trait CharacterDisplay {
    /// Error type for display operations
    type Error;

    /// Blank the display and home the cursor
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Position the cursor
    ///
    /// - `row`: Row number (0-1)
    /// - `col`: Column number
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error>;

    /// Write one character byte at the cursor
    fn write_char(&mut self, ch: u8) -> Result<(), Self::Error>;

    /// Write bytes at the cursor
    ///
    /// A NUL byte ends the text early.
    fn write_bytes(&mut self, text: &[u8]) -> Result<(), Self::Error> {
        for &ch in text.iter().take_while(|&&ch| ch != 0) {
            self.write_char(ch)?;
        }
        Ok(())
    }

    /// Write ASCII text at the cursor
    fn write_str(&mut self, text: &str) -> Result<(), Self::Error> {
        self.write_bytes(text.as_bytes())
    }

    /// Write a decimal integer at the cursor
    fn write_integer(&mut self, value: i32) -> Result<(), Self::Error> {
        self.write_bytes(&format_decimal(value))
    }
}

impl<T: CharacterDisplay + ?Sized> CharacterDisplay for &mut T {
    type Error = T::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        (**self).clear()
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error> {
        (**self).set_cursor(row, col)
    }

    fn write_char(&mut self, ch: u8) -> Result<(), Self::Error> {
        (**self).write_char(ch)
    }

    fn write_bytes(&mut self, text: &[u8]) -> Result<(), Self::Error> {
        (**self).write_bytes(text)
    }

    fn write_integer(&mut self, value: i32) -> Result<(), Self::Error> {
        (**self).write_integer(value)
    }
}

//! Application configuration
//!
//! Compile-time settings for the counter board. Defaults reproduce the
//! reference wiring: PCF8574 backpack at 0x27 on a 100 kHz bus, count shown
//! at the top-left cell.

use presscount_hal::I2cConfig;

/// Default PCF8574 address with A0-A2 pulled high (0x4E as a write address)
pub const DEFAULT_LCD_ADDRESS: u8 = 0x27;

/// Where the count is drawn and how the field is maintained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderConfig {
    /// Row of the first digit
    pub row: u8,
    /// Column of the first digit
    pub col: u8,
    /// What happens to cells left over from a longer previous value
    pub field: FieldPolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            row: 0,
            col: 0,
            field: FieldPolicy::Overwrite,
        }
    }
}

/// Handling of stale characters between renders
///
/// The display is never cleared between renders. A shorter value written
/// over a longer one leaves the longer one's tail visible unless the field
/// is padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldPolicy {
    /// Write only the digits; leftover cells keep their old contents
    Overwrite,
    /// Pad with spaces up to this many cells
    PadTo(u8),
}

/// Board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AppConfig {
    /// 7-bit address of the LCD backpack
    pub lcd_address: u8,
    /// Bus speed and transfer timeout
    pub bus: I2cConfig,
    /// Count placement
    pub render: RenderConfig,
    /// Pause after display init before the first render (ms)
    pub post_init_settle_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lcd_address: DEFAULT_LCD_ADDRESS,
            bus: I2cConfig::STANDARD,
            render: RenderConfig::default(),
            post_init_settle_ms: 10,
        }
    }
}

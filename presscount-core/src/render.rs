//! Render loop
//!
//! Cooperative polling loop that redraws the count whenever it changes.
//! It runs in the main context and only ever reads the shared counter.

use crate::config::{FieldPolicy, RenderConfig};
use crate::counter::CounterReader;
use crate::text::format_decimal;
use crate::traits::CharacterDisplay;

/// Result of one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderOutcome {
    /// Count matched what is on screen; nothing sent
    Unchanged,
    /// Count was redrawn with this value
    Rendered(i32),
}

/// Polls the counter and keeps the display in sync with it
pub struct RenderLoop<'a> {
    counter: CounterReader<'a>,
    config: RenderConfig,
    /// Value currently on screen; `None` until the first successful render
    last_rendered: Option<i32>,
}

impl<'a> RenderLoop<'a> {
    /// Create a render loop with the default placement (row 0, column 0)
    pub fn new(counter: CounterReader<'a>) -> Self {
        Self::with_config(counter, RenderConfig::default())
    }

    /// Create a render loop with explicit placement
    pub fn with_config(counter: CounterReader<'a>, config: RenderConfig) -> Self {
        Self {
            counter,
            config,
            last_rendered: None,
        }
    }

    /// Value last drawn successfully
    pub fn last_rendered(&self) -> Option<i32> {
        self.last_rendered
    }

    /// Check the counter once and redraw if it moved
    ///
    /// The cursor is repositioned before every redraw; the display is never
    /// cleared. If the display fails the cached value is left alone, so the
    /// next poll tries again.
    pub fn poll<D: CharacterDisplay>(&mut self, display: &mut D) -> Result<RenderOutcome, D::Error> {
        let value = self.counter.get();
        if self.last_rendered == Some(value) {
            return Ok(RenderOutcome::Unchanged);
        }

        display.set_cursor(self.config.row, self.config.col)?;

        let digits = format_decimal(value);
        display.write_bytes(&digits)?;
        if let FieldPolicy::PadTo(width) = self.config.field {
            for _ in digits.len()..usize::from(width) {
                display.write_char(b' ')?;
            }
        }

        self.last_rendered = Some(value);
        Ok(RenderOutcome::Rendered(value))
    }

    /// One pass of [`run`](Self::run)
    ///
    /// Polls once. A display error is handed to `on_error` and `None` is
    /// returned; the cache is untouched so the next pass redraws.
    pub fn step<D, E>(&mut self, display: &mut D, on_error: &mut E) -> Option<RenderOutcome>
    where
        D: CharacterDisplay,
        E: FnMut(D::Error),
    {
        match self.poll(display) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                on_error(e);
                None
            }
        }
    }

    /// Poll forever
    ///
    /// `idle` runs between polls (a no-op for a pure busy loop, or a
    /// wait-for-interrupt). Display errors go to `on_error` and the loop
    /// carries on.
    pub fn run<D, I, E>(mut self, display: &mut D, mut idle: I, mut on_error: E) -> !
    where
        D: CharacterDisplay,
        I: FnMut(),
        E: FnMut(D::Error),
    {
        loop {
            self.step(display, &mut on_error);
            idle();
        }
    }
}

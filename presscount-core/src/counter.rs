//! Debounced press counter
//!
//! The count is shared between exactly two contexts: the external interrupt
//! handler, which is the only writer, and the render loop, which only reads.
//! Both sides go through a single word-sized atomic, so no lock is needed.
//! Do not add more fields to [`SharedCounter`] without adding
//! synchronization; the lock-free contract only holds for one word.

use portable_atomic::{AtomicBool, AtomicI32, Ordering};

use presscount_hal::time::elapsed_ms;
use presscount_hal::{EdgeInterrupt, MonotonicClock};

/// Edges closer together than this are treated as contact bounce
pub const DEBOUNCE_WINDOW_MS: u32 = 40;

/// Process-wide press count
///
/// Lives in a `static`. Hand [`SharedCounter::take_writer`] to the interrupt
/// side once and [`SharedCounter::reader`] to whoever displays it.
pub struct SharedCounter {
    value: AtomicI32,
    writer_taken: AtomicBool,
}

impl Default for SharedCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedCounter {
    /// A counter starting at zero
    pub const fn new() -> Self {
        Self {
            value: AtomicI32::new(0),
            writer_taken: AtomicBool::new(false),
        }
    }

    /// Claim the write side
    ///
    /// Returns `None` if it was already claimed.
    pub fn take_writer(&self) -> Option<CounterWriter<'_>> {
        if self.writer_taken.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(CounterWriter { counter: self })
        }
    }

    /// A read-only view of the count
    pub fn reader(&self) -> CounterReader<'_> {
        CounterReader { counter: self }
    }
}

/// Write side of a [`SharedCounter`]; there is at most one
pub struct CounterWriter<'a> {
    counter: &'a SharedCounter,
}

impl CounterWriter<'_> {
    /// Add one press and return the new count
    ///
    /// Saturates at `i32::MAX` so the count never goes backwards. Load and
    /// store are separate because this is the only writer.
    pub fn increment(&mut self) -> i32 {
        let next = self.get().saturating_add(1);
        self.counter.value.store(next, Ordering::Release);
        next
    }

    /// Current count
    pub fn get(&self) -> i32 {
        self.counter.value.load(Ordering::Relaxed)
    }
}

/// Read side of a [`SharedCounter`]
#[derive(Clone, Copy)]
pub struct CounterReader<'a> {
    counter: &'a SharedCounter,
}

impl CounterReader<'_> {
    /// Current count
    pub fn get(&self) -> i32 {
        self.counter.value.load(Ordering::Acquire)
    }
}

/// Result of feeding one edge to the [`EdgeCounter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// Edge counted; carries the new total
    Accepted(i32),
    /// Edge fell inside the debounce window of the previous one
    Rejected,
}

/// Interrupt-side state machine
///
/// Owns the counter's write side and the time of the last edge it saw.
pub struct EdgeCounter<'a> {
    writer: CounterWriter<'a>,
    last_edge_ms: u32,
}

impl<'a> EdgeCounter<'a> {
    /// Create the edge counter
    ///
    /// `now_ms` seeds the debounce timestamp, so an edge within
    /// [`DEBOUNCE_WINDOW_MS`] of construction is rejected.
    pub fn new(writer: CounterWriter<'a>, now_ms: u32) -> Self {
        Self {
            writer,
            last_edge_ms: now_ms,
        }
    }

    /// Handle one rising edge observed at `now_ms`
    ///
    /// The timestamp is updated even for rejected edges, so a burst of
    /// bounces keeps pushing the window out until the contact settles.
    pub fn on_edge(&mut self, now_ms: u32) -> EdgeOutcome {
        let elapsed = elapsed_ms(self.last_edge_ms, now_ms);
        self.last_edge_ms = now_ms;

        if elapsed > DEBOUNCE_WINDOW_MS {
            EdgeOutcome::Accepted(self.writer.increment())
        } else {
            EdgeOutcome::Rejected
        }
    }

    /// Interrupt entry point: acknowledge `line`, then count the edge
    pub fn on_interrupt<L, C>(&mut self, line: &mut L, clock: &C) -> EdgeOutcome
    where
        L: EdgeInterrupt,
        C: MonotonicClock,
    {
        line.clear_pending();
        self.on_edge(clock.now_ms())
    }

    /// Current count
    pub fn count(&self) -> i32 {
        self.writer.get()
    }

    /// Time of the most recent edge, accepted or not
    pub fn last_edge_ms(&self) -> u32 {
        self.last_edge_ms
    }
}

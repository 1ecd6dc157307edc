//! Millisecond clock backed by the embassy time driver

use embassy_time::Instant;

use presscount_hal::MonotonicClock;

/// Uptime clock read from the embassy time driver
///
/// Safe to read from interrupt context. The 64-bit tick count is truncated
/// to 32 bits, so the value wraps like a SysTick-based millisecond counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MonotonicClock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}

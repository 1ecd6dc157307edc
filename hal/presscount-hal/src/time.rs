//! Time source abstractions

/// Monotonic millisecond clock
///
/// Non-decreasing, millisecond resolution, counted from boot. The value
/// wraps at `u32::MAX` (about 49.7 days); consumers must compare timestamps
/// with wrapping subtraction.
pub trait MonotonicClock {
    /// Milliseconds since boot
    fn now_ms(&self) -> u32;
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds elapsed from `earlier` to `now`, tolerating one wraparound
#[inline]
pub const fn elapsed_ms(earlier: u32, now: u32) -> u32 {
    now.wrapping_sub(earlier)
}

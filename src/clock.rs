//! Millisecond clock arithmetic.
//!
//! Every timer in the firmware is expressed as a start timestamp plus a
//! duration.  The clock source is a `u32` millisecond counter that wraps
//! after ~49.7 days, so absolute timestamps are never compared directly:
//! all checks go through [`elapsed`], which subtracts with wrap-around.
//!
//! ```text
//!   since            now (wrapped)
//!     │                 │
//!  ───┼─────────────────┼──▶ u32::MAX ─▶ 0 ──▶
//!     └──── elapsed ────┘
//! ```
//!
//! The subtraction is correct as long as the real elapsed time is below
//! `2^32` ms, i.e. as long as the loop keeps ticking.  Configured durations
//! are capped at [`MAX_DURATION_MS`] so a window can never alias.

/// Milliseconds since boot, wrapping.
pub type Millis = u32;

/// Longest duration any timer may be configured with.
pub const MAX_DURATION_MS: Millis = u32::MAX / 2;

/// Milliseconds between `since` and `now`, tolerant of counter wrap.
#[inline]
pub const fn elapsed(now: Millis, since: Millis) -> Millis {
    now.wrapping_sub(since)
}

/// `true` once at least `duration` ms have passed since `since`.
#[inline]
pub const fn has_elapsed(now: Millis, since: Millis, duration: Millis) -> bool {
    elapsed(now, since) >= duration
}

/// Rate limiter for periodic work that must not run every tick
/// (status rendering, telemetry).
///
/// Re-arms from the instant it fired, so a slow loop stretches the
/// period instead of bursting to catch up.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    period_ms: Millis,
    last: Millis,
}

impl Interval {
    /// First fire happens one full period after `start`.
    pub const fn new(period_ms: Millis, start: Millis) -> Self {
        Self {
            period_ms,
            last: start,
        }
    }

    /// Returns `true` (and re-arms) when the period has elapsed.
    pub fn poll(&mut self, now: Millis) -> bool {
        if has_elapsed(now, self.last, self.period_ms) {
            self.last = now;
            true
        } else {
            false
        }
    }

    pub fn period_ms(&self) -> Millis {
        self.period_ms
    }
}

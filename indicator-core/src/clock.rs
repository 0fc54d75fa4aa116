//! Wrapping millisecond and microsecond timestamps.
//!
//! Both counters are free-running `u32` values that overflow (about 49.7 days
//! for milliseconds, about 71.6 minutes for microseconds). Every comparison in
//! the crate goes through [`Millis::has_reached`] or a `wrapping_since`
//! subtraction, so an overflow between two readings never corrupts a delta.

use core::fmt;

/// Coarse monotonic timestamp used for scheduling and staleness.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Millis(pub u32);

impl Millis {
    /// Milliseconds elapsed since `earlier`, modulo 2^32.
    #[must_use]
    pub const fn wrapping_since(self, earlier: Millis) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Returns a timestamp `delta` milliseconds later, wrapping on overflow.
    #[must_use]
    pub const fn wrapping_add(self, delta: u32) -> Millis {
        Millis(self.0.wrapping_add(delta))
    }

    /// Returns `true` once `self` is at or past `deadline`.
    ///
    /// The signed reinterpretation of the modular difference keeps this valid
    /// across wraparound as long as the two values are less than 2^31 ms apart.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn has_reached(self, deadline: Millis) -> bool {
        (self.0.wrapping_sub(deadline.0) as i32) >= 0
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Fine monotonic timestamp used to measure pulse widths.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Micros(pub u32);

impl Micros {
    /// Microseconds elapsed since `earlier`, modulo 2^32.
    #[must_use]
    pub const fn wrapping_since(self, earlier: Micros) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    #[must_use]
    pub const fn wrapping_add(self, delta: u32) -> Micros {
        Micros(self.0.wrapping_add(delta))
    }
}

impl fmt::Display for Micros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

/// Source of both monotonic clocks.
pub trait Clock {
    /// Current coarse time.
    fn now_ms(&self) -> Millis;

    /// Current fine time.
    fn now_us(&self) -> Micros;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_survive_counter_wraparound() {
        let before = Micros(u32::MAX - 99);
        let after = Micros(1_400);
        assert_eq!(after.wrapping_since(before), 1_500);

        let before = Millis(u32::MAX - 9);
        let after = before.wrapping_add(25);
        assert_eq!(after, Millis(15));
        assert_eq!(after.wrapping_since(before), 25);
    }

    #[test]
    fn deadline_checks_use_modular_distance() {
        let deadline = Millis(u32::MAX - 5);
        assert!(!Millis(u32::MAX - 6).has_reached(deadline));
        assert!(Millis(u32::MAX - 5).has_reached(deadline));
        assert!(Millis(3).has_reached(deadline));

        let deadline = Millis(10);
        assert!(!Millis(u32::MAX).has_reached(deadline));
        assert!(Millis(10).has_reached(deadline));
    }
}

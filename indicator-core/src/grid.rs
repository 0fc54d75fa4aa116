//! Drift-free periodic deadlines.
//!
//! A [`PeriodicGrid`] fires on fixed multiples of its period measured from the
//! origin it was created with. A late poll fires once and then jumps straight
//! to the next grid point in the future; it never fires a burst to catch up and
//! never re-bases the grid on the late poll time.

use core::fmt;

use crate::clock::Millis;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GridError {
    ZeroPeriod,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::ZeroPeriod => f.write_str("grid period must be non-zero"),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PeriodicGrid {
    next: Millis,
    period_ms: u32,
}

impl PeriodicGrid {
    /// Grid whose first deadline is `origin + period_ms`.
    ///
    /// # Errors
    ///
    /// [`GridError::ZeroPeriod`] when `period_ms` is zero.
    pub const fn new(origin: Millis, period_ms: u32) -> Result<Self, GridError> {
        Self::with_first_deadline(origin.wrapping_add(period_ms), period_ms)
    }

    /// Grid whose first deadline is `first` itself.
    ///
    /// # Errors
    ///
    /// [`GridError::ZeroPeriod`] when `period_ms` is zero.
    pub const fn with_first_deadline(first: Millis, period_ms: u32) -> Result<Self, GridError> {
        if period_ms == 0 {
            return Err(GridError::ZeroPeriod);
        }
        Ok(Self {
            next: first,
            period_ms,
        })
    }

    #[must_use]
    pub const fn next_deadline(&self) -> Millis {
        self.next
    }

    /// Returns `true` if a deadline has passed, advancing past `now` in whole periods.
    pub fn poll(&mut self, now: Millis) -> bool {
        if !now.has_reached(self.next) {
            return false;
        }
        let behind = now.wrapping_since(self.next);
        let steps = behind / self.period_ms + 1;
        self.next = self.next.wrapping_add(steps.wrapping_mul(self.period_ms));
        true
    }
}

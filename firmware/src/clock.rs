//! Embassy time base truncated to the wrapping counters used by the core.

#![cfg_attr(not(target_os = "none"), allow(dead_code))]

use embassy_time::Instant;
use indicator_core::clock::{Micros, Millis};

/// Low 32 bits of the millisecond tick count.
#[allow(clippy::cast_possible_truncation)]
pub fn millis(instant: Instant) -> Millis {
    Millis(instant.as_millis() as u32)
}

/// Low 32 bits of the microsecond tick count.
#[allow(clippy::cast_possible_truncation)]
pub fn micros(instant: Instant) -> Micros {
    Micros(instant.as_micros() as u32)
}

/// [`Clock`](indicator_core::clock::Clock) backed by the embassy time driver.
#[cfg(target_os = "none")]
#[derive(Copy, Clone, Debug, Default)]
pub struct EmbassyClock;

#[cfg(target_os = "none")]
impl indicator_core::clock::Clock for EmbassyClock {
    fn now_ms(&self) -> Millis {
        millis(Instant::now())
    }

    fn now_us(&self) -> Micros {
        micros(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_wraps_instead_of_saturating() {
        let instant = Instant::from_micros(u64::from(u32::MAX) + 1_501);
        assert_eq!(micros(instant), Micros(1_500));

        let instant = Instant::from_millis(u64::from(u32::MAX) + 11);
        assert_eq!(millis(instant), Millis(10));
    }
}

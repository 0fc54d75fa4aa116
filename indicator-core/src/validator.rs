//! Freshness and plausibility checks on a captured sample.

use core::fmt;

use crate::capture::PulseSample;
use crate::clock::Millis;
use crate::config::SignalConfig;

/// Why a signal is or is not usable.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SignalStatus {
    Valid,
    /// No pulse has ever been captured.
    NoSignal,
    /// The last good pulse is older than the timeout.
    Stale,
    /// The stored width is outside the plausible band.
    OutOfRange,
}

impl SignalStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SignalStatus::Valid => "valid",
            SignalStatus::NoSignal => "no-signal",
            SignalStatus::Stale => "stale",
            SignalStatus::OutOfRange => "out-of-range",
        }
    }
}

impl fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A sample judged against the current time.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ValidatedSignal {
    pub width_us: Option<u16>,
    /// Milliseconds since the sample completed.
    pub age_ms: Option<u32>,
    pub status: SignalStatus,
}

impl ValidatedSignal {
    pub const NONE: Self = Self {
        width_us: None,
        age_ms: None,
        status: SignalStatus::NoSignal,
    };

    /// `true` when the sample is recent enough, regardless of width.
    #[must_use]
    pub const fn is_fresh(&self) -> bool {
        matches!(self.status, SignalStatus::Valid | SignalStatus::OutOfRange)
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self.status, SignalStatus::Valid)
    }

    /// Width usable for classification, `None` for any stale or implausible signal.
    #[must_use]
    pub const fn usable_width(&self) -> Option<u16> {
        if self.is_valid() { self.width_us } else { None }
    }
}

/// Judges `sample` at time `now`. Staleness is checked first and dominates width.
#[must_use]
pub fn validate(sample: Option<PulseSample>, now: Millis, config: &SignalConfig) -> ValidatedSignal {
    let Some(sample) = sample else {
        return ValidatedSignal::NONE;
    };

    // A sample published after `now` was read is fresh, not 2^32 ms old.
    let age_ms = if now.has_reached(sample.completed_at) {
        now.wrapping_since(sample.completed_at)
    } else {
        0
    };
    let status = if age_ms > config.timeout_ms {
        SignalStatus::Stale
    } else if !config.band.contains(sample.width_us) {
        SignalStatus::OutOfRange
    } else {
        SignalStatus::Valid
    };

    ValidatedSignal {
        width_us: Some(sample.width_us),
        age_ms: Some(age_ms),
        status,
    }
}

//! Compile-time configuration surface.
//!
//! Receiver variants disagree on the plausible pulse band, the decision
//! thresholds and LED polarity, so all of them are plain values here. Nothing is
//! persisted; firmware builds pick a preset and validate it at boot.

use core::fmt;

use crate::led::{Color, Polarity};

/// Plausible pulse widths in microseconds.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PulseBand {
    pub min_us: u16,
    pub max_us: u16,
    /// Whether `max_us` itself is accepted at capture time.
    pub upper_inclusive: bool,
}

impl PulseBand {
    /// 0.8 ms to 2.2 ms, both bounds exclusive at capture.
    pub const STANDARD: Self = Self {
        min_us: 800,
        max_us: 2_200,
        upper_inclusive: false,
    };

    /// 0.5 ms to 2.5 ms for receivers with extended travel.
    pub const WIDE: Self = Self {
        min_us: 500,
        max_us: 2_500,
        upper_inclusive: false,
    };

    /// Capture filter: strictly above `min_us`, upper bound per calibration.
    #[must_use]
    pub const fn admits_capture(&self, width_us: u16) -> bool {
        if width_us <= self.min_us {
            return false;
        }
        if self.upper_inclusive {
            width_us <= self.max_us
        } else {
            width_us < self.max_us
        }
    }

    /// Inclusive range check used when re-validating a stored sample.
    #[must_use]
    pub const fn contains(&self, width_us: u16) -> bool {
        width_us >= self.min_us && width_us <= self.max_us
    }
}

impl Default for PulseBand {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Independent LOW/HIGH decision thresholds with a dead zone between them.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Thresholds {
    /// Widths at or below this value classify as LOW.
    pub low_max_us: u16,
    /// Widths at or above this value classify as HIGH.
    pub high_min_us: u16,
}

impl Thresholds {
    pub const STANDARD: Self = Self {
        low_max_us: 1_300,
        high_min_us: 1_700,
    };

    /// Returns `true` when the bands touch or overlap and no dead zone exists.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.high_min_us <= self.low_max_us
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Everything the validator and classifier need.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SignalConfig {
    pub band: PulseBand,
    pub thresholds: Thresholds,
    /// A sample older than this is stale.
    pub timeout_ms: u32,
}

impl SignalConfig {
    pub const STANDARD: Self = Self {
        band: PulseBand::STANDARD,
        thresholds: Thresholds::STANDARD,
        timeout_ms: 300,
    };
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A bounded blink: `times` ON phases toggled every `period_ms`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BlinkSpec {
    pub color: Color,
    pub times: u8,
    pub period_ms: u32,
}

impl BlinkSpec {
    #[must_use]
    pub const fn new(color: Color, times: u8, period_ms: u32) -> Self {
        Self {
            color,
            times,
            period_ms,
        }
    }

    /// Toggle period for `hz` full blinks per second.
    #[must_use]
    pub const fn period_for_hz(hz: u32) -> u32 {
        match 1_000_u32.checked_div(hz) {
            Some(period_ms) => period_ms,
            None => 0,
        }
    }
}

/// Blink rendered when the classifier enters LOW or HIGH. NEUTRAL keeps the LED dark.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StatePatterns {
    pub low: Option<BlinkSpec>,
    pub high: Option<BlinkSpec>,
}

impl StatePatterns {
    pub const DEFAULT_TIMES: u8 = 3;
    pub const DEFAULT_HZ: u32 = 3;

    pub const STANDARD: Self = Self {
        low: Some(BlinkSpec::new(
            Color::Red,
            Self::DEFAULT_TIMES,
            BlinkSpec::period_for_hz(Self::DEFAULT_HZ),
        )),
        high: Some(BlinkSpec::new(
            Color::Green,
            Self::DEFAULT_TIMES,
            BlinkSpec::period_for_hz(Self::DEFAULT_HZ),
        )),
    };
}

impl Default for StatePatterns {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Top-level configuration for one indicator channel.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct IndicatorConfig {
    pub signal: SignalConfig,
    pub patterns: StatePatterns,
    pub polarity: Polarity,
    /// Cadence of the external watchdog heartbeat.
    pub heartbeat_period_ms: u32,
    /// Cadence of periodic status logging.
    pub status_period_ms: u32,
    /// Upper bound on the control loop sleep between iterations.
    pub loop_period_ms: u32,
}

impl IndicatorConfig {
    pub const STANDARD: Self = Self {
        signal: SignalConfig::STANDARD,
        patterns: StatePatterns::STANDARD,
        polarity: Polarity::ActiveHigh,
        heartbeat_period_ms: 100,
        status_period_ms: 500,
        loop_period_ms: 1,
    };

    /// Checks the relationships the runtime relies on but never asserts itself.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let band = self.signal.band;
        let thresholds = self.signal.thresholds;

        if band.max_us <= band.min_us {
            return Err(ConfigError::EmptyPulseBand);
        }
        if thresholds.is_degenerate() {
            return Err(ConfigError::DegenerateThresholds);
        }
        if thresholds.low_max_us < band.min_us || thresholds.high_min_us > band.max_us {
            return Err(ConfigError::ThresholdsOutsideBand);
        }
        if self.signal.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        for spec in [self.patterns.low, self.patterns.high].into_iter().flatten() {
            if spec.period_ms == 0 {
                return Err(ConfigError::ZeroBlinkPeriod);
            }
            if spec.times == 0 {
                return Err(ConfigError::ZeroBlinkCount);
            }
        }
        if self.heartbeat_period_ms == 0 || self.status_period_ms == 0 || self.loop_period_ms == 0 {
            return Err(ConfigError::ZeroSchedulePeriod);
        }
        Ok(())
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Configuration mistakes detected by [`IndicatorConfig::validate`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    EmptyPulseBand,
    DegenerateThresholds,
    ThresholdsOutsideBand,
    ZeroTimeout,
    ZeroBlinkPeriod,
    ZeroBlinkCount,
    ZeroSchedulePeriod,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ConfigError::EmptyPulseBand => "pulse band max must exceed min",
            ConfigError::DegenerateThresholds => "high threshold must exceed low threshold",
            ConfigError::ThresholdsOutsideBand => "thresholds must lie inside the pulse band",
            ConfigError::ZeroTimeout => "signal timeout must be non-zero",
            ConfigError::ZeroBlinkPeriod => "blink period must be non-zero",
            ConfigError::ZeroBlinkCount => "blink count must be non-zero",
            ConfigError::ZeroSchedulePeriod => "heartbeat, status and loop periods must be non-zero",
        };
        f.write_str(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_is_valid() {
        assert_eq!(IndicatorConfig::STANDARD.validate(), Ok(()));
        assert_eq!(IndicatorConfig::STANDARD.patterns.high.map(|p| p.period_ms), Some(333));
    }

    #[test]
    fn blink_period_from_rate() {
        assert_eq!(BlinkSpec::period_for_hz(3), 333);
        assert_eq!(BlinkSpec::period_for_hz(1_000), 1);
        assert_eq!(BlinkSpec::period_for_hz(0), 0);
    }

    #[test]
    fn capture_band_excludes_both_edges_by_default() {
        let band = PulseBand::STANDARD;
        assert!(!band.admits_capture(800));
        assert!(band.admits_capture(801));
        assert!(band.admits_capture(2_199));
        assert!(!band.admits_capture(2_200));

        let inclusive = PulseBand {
            upper_inclusive: true,
            ..PulseBand::STANDARD
        };
        assert!(inclusive.admits_capture(2_200));
        assert!(!inclusive.admits_capture(800));
    }

    #[test]
    fn validation_flags_degenerate_thresholds() {
        let mut config = IndicatorConfig::STANDARD;
        config.signal.thresholds = Thresholds {
            low_max_us: 1_500,
            high_min_us: 1_500,
        };
        assert_eq!(config.validate(), Err(ConfigError::DegenerateThresholds));
    }

    #[test]
    fn validation_flags_zero_blink_period() {
        let mut config = IndicatorConfig::STANDARD;
        config.patterns.low = Some(BlinkSpec::new(Color::Red, 3, 0));
        assert_eq!(config.validate(), Err(ConfigError::ZeroBlinkPeriod));
    }

    #[test]
    fn wide_band_accepts_thresholds_from_standard_preset() {
        let mut config = IndicatorConfig::STANDARD;
        config.signal.band = PulseBand::WIDE;
        assert_eq!(config.validate(), Ok(()));

        config.signal.thresholds.low_max_us = 400;
        assert_eq!(config.validate(), Err(ConfigError::ThresholdsOutsideBand));
    }
}

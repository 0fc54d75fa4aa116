//! Indicator configuration built into this image.

#![cfg_attr(not(target_os = "none"), allow(dead_code))]

use indicator_core::config::IndicatorConfig;

/// Thresholds, band, patterns and cadences flashed with the firmware.
pub const INDICATOR_CONFIG: IndicatorConfig = IndicatorConfig::STANDARD;

/// Settle time for the safe-mode jumper pull-up before it is sampled.
pub const OVERRIDE_SETTLE_US: u64 = 100;

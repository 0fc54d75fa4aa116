//! Logging sinks for decoder events.
//!
//! On target every helper emits through defmt over RTT; host builds print to
//! stdout so the same call sites can be exercised by unit tests.

#![cfg_attr(not(target_os = "none"), allow(dead_code))]

use indicator_core::blink::BlinkError;
use indicator_core::capture::CaptureCounters;
use indicator_core::classifier::CommandState;
use indicator_core::clock::Millis;
use indicator_core::grid::{GridError, PeriodicGrid};
use indicator_core::safe_mode::BootMode;
use indicator_core::telemetry::{StatusReport, Transition};
use indicator_core::validator::ValidatedSignal;

/// Emits a [`StatusReport`] on a drift-free grid.
pub struct StatusLogger {
    grid: PeriodicGrid,
}

impl StatusLogger {
    /// First report is due one period after `now`.
    pub fn new(now: Millis, period_ms: u32) -> Result<Self, GridError> {
        Ok(Self {
            grid: PeriodicGrid::new(now, period_ms)?,
        })
    }

    /// Logs and returns a report when the status grid point has passed.
    pub fn poll(
        &mut self,
        now: Millis,
        signal: &ValidatedSignal,
        state: CommandState,
        counters: CaptureCounters,
    ) -> Option<StatusReport> {
        if !self.grid.poll(now) {
            return None;
        }
        let report = StatusReport::new(now, signal, state, counters);
        emit_status(&report);
        Some(report)
    }
}

#[cfg(target_os = "none")]
fn emit_status(report: &StatusReport) {
    defmt::info!("telemetry:{}", defmt::Display2Format(report));
}

#[cfg(not(target_os = "none"))]
fn emit_status(report: &StatusReport) {
    println!("telemetry:{report}");
}

#[cfg(target_os = "none")]
pub fn log_boot_mode(mode: BootMode) {
    match mode {
        BootMode::Normal => defmt::info!("boot: {=str} mode, arming RC capture", mode.label()),
        BootMode::Safe => defmt::warn!(
            "boot: {=str} mode, RC capture disabled until override is released",
            mode.label()
        ),
    }
}

#[cfg(not(target_os = "none"))]
pub fn log_boot_mode(mode: BootMode) {
    println!("boot: {} mode", mode.label());
}

#[cfg(target_os = "none")]
pub fn log_transition(transition: &Transition) {
    defmt::info!("rc:state {}", defmt::Display2Format(transition));
}

#[cfg(not(target_os = "none"))]
pub fn log_transition(transition: &Transition) {
    println!("rc:state {transition}");
}

#[cfg(target_os = "none")]
pub fn log_blink_error(state: CommandState, error: BlinkError) {
    defmt::warn!(
        "led: pattern for {=str} not started: {}",
        state.label(),
        defmt::Display2Format(&error)
    );
}

#[cfg(not(target_os = "none"))]
pub fn log_blink_error(state: CommandState, error: BlinkError) {
    println!("led: pattern for {} not started: {error}", state.label());
}

#[cfg(target_os = "none")]
pub fn log_safe_blink_done(now: Millis) {
    defmt::info!("safe: boot blink complete t={=u32}ms, idling", now.0);
}

#[cfg(not(target_os = "none"))]
pub fn log_safe_blink_done(now: Millis) {
    println!("safe: boot blink complete t={now}, idling");
}

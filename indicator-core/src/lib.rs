#![cfg_attr(not(test), no_std)]

// Portable logic for the RC pulse indicator.
//
// Everything here runs the same on the STM32 firmware and on host tooling:
// time is passed in explicitly, hardware sits behind small traits, and the only
// state shared with interrupt context lives in `capture::SampleCell`.

pub mod blink;
pub mod capture;
pub mod classifier;
pub mod clock;
pub mod config;
pub mod console;
pub mod controller;
pub mod grid;
pub mod led;
pub mod liveness;
pub mod safe_mode;
pub mod telemetry;
pub mod validator;

//! Board wiring for the STM32G0 indicator board.
//!
//! | Signal            | Pin  | Notes                                   |
//! |-------------------|------|-----------------------------------------|
//! | RC PWM input      | PA8  | EXTI8, both edges, internal pull-down   |
//! | LED red           | PB3  |                                         |
//! | LED green         | PB4  |                                         |
//! | LED blue          | PB5  |                                         |
//! | Safe-mode jumper  | PB6  | pull-up, asserted when shorted to GND   |
//! | Watchdog kick     | PB7  | toggled every heartbeat period          |

#![cfg(target_os = "none")]

pub mod led;
pub mod watchdog;

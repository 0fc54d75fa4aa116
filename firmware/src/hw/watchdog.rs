use embassy_stm32::gpio::Output;
use indicator_core::liveness::Heartbeat;

/// Kick line of an external watchdog; every beat is one edge.
pub struct WatchdogPin<'d> {
    pin: Output<'d>,
}

impl<'d> WatchdogPin<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl Heartbeat for WatchdogPin<'_> {
    fn beat(&mut self) {
        self.pin.toggle();
    }
}

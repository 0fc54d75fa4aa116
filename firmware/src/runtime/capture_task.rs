use embassy_stm32::exti::ExtiInput;
use embassy_time::Instant;
use indicator_core::capture::{Edge, PulseCapture};
use indicator_core::config::PulseBand;

use super::SAMPLES;
use crate::clock::{micros, millis};

/// Edge handler: timestamps every transition and publishes in-band widths.
#[embassy_executor::task]
pub async fn run(mut input: ExtiInput<'static>, band: PulseBand) -> ! {
    let mut capture = PulseCapture::new(band);
    loop {
        input.wait_for_any_edge().await;
        let now = Instant::now();
        let edge = Edge::from_level(input.is_high());
        capture.on_edge(edge, micros(now), millis(now), &SAMPLES);
    }
}

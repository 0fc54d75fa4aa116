use indicator_core::blink::{BlinkScheduler, TickOutcome};
use indicator_core::clock::Millis;
use indicator_core::led::{Color, Rgb, RgbOutput};

#[derive(Default)]
struct RecordingLed {
    writes: Vec<Rgb>,
}

impl RecordingLed {
    fn lit_phases(&self) -> usize {
        self.writes.iter().filter(|rgb| !rgb.is_off()).count()
    }

    fn current(&self) -> Rgb {
        self.writes.last().copied().unwrap_or(Rgb::OFF)
    }
}

impl RgbOutput for RecordingLed {
    fn write(&mut self, rgb: Rgb) {
        self.writes.push(rgb);
    }
}

#[test]
fn plays_exactly_the_requested_number_of_blinks() {
    for times in 1..=5u8 {
        let mut led = RecordingLed::default();
        let mut blink = BlinkScheduler::new();
        blink.start(&mut led, Color::Green, times, 100, Millis(0)).unwrap();

        let mut toggles = 0;
        let mut finished = false;
        for now in 0..=(u32::from(times) * 2 + 3) * 100 {
            match blink.tick(&mut led, Millis(now)) {
                TickOutcome::Toggled { .. } => toggles += 1,
                TickOutcome::Finished => {
                    toggles += 1;
                    finished = true;
                }
                TickOutcome::Inactive | TickOutcome::Waiting => {}
            }
        }

        assert!(finished, "pattern of {times} should finish");
        assert_eq!(toggles, usize::from(times) * 2);
        assert_eq!(led.lit_phases(), usize::from(times));
        assert!(led.current().is_off());
        assert!(!blink.is_active());

        let writes = led.writes.len();
        assert_eq!(blink.tick(&mut led, Millis(100_000)), TickOutcome::Inactive);
        assert_eq!(led.writes.len(), writes, "finished pattern must not write again");
    }
}

#[test]
fn restarting_cancels_without_a_stray_toggle() {
    let mut led = RecordingLed::default();
    let mut blink = BlinkScheduler::new();

    blink.start(&mut led, Color::Red, 3, 100, Millis(0)).unwrap();
    assert_eq!(blink.tick(&mut led, Millis(100)), TickOutcome::Toggled { lit: true });
    assert_eq!(led.current(), Color::Red.rgb());

    // Replace mid-ON: the channel goes dark immediately and stays dark until
    // the new pattern's first deadline.
    blink.start(&mut led, Color::Green, 2, 100, Millis(150)).unwrap();
    assert!(led.current().is_off());
    let marker = led.writes.len();

    for now in 151..=1_000 {
        blink.tick(&mut led, Millis(now));
    }

    let after_restart = &led.writes[marker..];
    assert!(
        after_restart.iter().all(|rgb| rgb.is_off() || *rgb == Color::Green.rgb()),
        "cancelled red pattern leaked a toggle"
    );
    assert_eq!(after_restart.iter().filter(|rgb| !rgb.is_off()).count(), 2);
    assert_eq!(after_restart.first(), Some(&Color::Green.rgb()));
}

#[test]
fn delayed_ticks_stay_on_the_start_grid() {
    let mut led = RecordingLed::default();
    let mut blink = BlinkScheduler::new();
    let start = Millis(5_000);
    blink.start(&mut led, Color::Blue, 10, 40, start).unwrap();

    for stall in [37, 205, 3, 999, 41] {
        let deadline = blink.pattern().unwrap().next_deadline();
        let now = deadline.wrapping_add(stall);
        assert!(matches!(blink.tick(&mut led, now), TickOutcome::Toggled { .. }));

        let next = blink.pattern().unwrap().next_deadline();
        assert_eq!(next.wrapping_since(start) % 40, 0, "deadline drifted off grid");
        assert!(!now.has_reached(next), "deadline must be in the future");
    }
}

#[test]
fn schedule_crosses_millisecond_wraparound() {
    let mut led = RecordingLed::default();
    let mut blink = BlinkScheduler::new();
    let start = Millis(u32::MAX - 150);
    blink.start(&mut led, Color::Red, 1, 100, start).unwrap();

    assert_eq!(blink.tick(&mut led, start.wrapping_add(99)), TickOutcome::Waiting);
    assert_eq!(
        blink.tick(&mut led, start.wrapping_add(100)),
        TickOutcome::Toggled { lit: true }
    );
    assert_eq!(blink.tick(&mut led, start.wrapping_add(200)), TickOutcome::Finished);
    assert!(led.current().is_off());
}

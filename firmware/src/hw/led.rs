use embassy_stm32::gpio::{Level, Output, Speed};
use indicator_core::led::{Polarity, Rgb, RgbOutput};

/// Three discrete GPIO drivers forming one tri-color LED.
pub struct RgbLed<'d> {
    red: Output<'d>,
    green: Output<'d>,
    blue: Output<'d>,
    polarity: Polarity,
}

impl<'d> RgbLed<'d> {
    pub const SPEED: Speed = Speed::Low;

    pub fn new(red: Output<'d>, green: Output<'d>, blue: Output<'d>, polarity: Polarity) -> Self {
        let mut led = Self {
            red,
            green,
            blue,
            polarity,
        };
        led.off();
        led
    }

    /// Level every channel starts at so the LED is dark from reset.
    pub fn dark_level(polarity: Polarity) -> Level {
        Level::from(polarity.level(false))
    }

    fn level(&self, lit: bool) -> Level {
        Level::from(self.polarity.level(lit))
    }
}

impl RgbOutput for RgbLed<'_> {
    fn write(&mut self, rgb: Rgb) {
        let (red, green, blue) = (self.level(rgb.red), self.level(rgb.green), self.level(rgb.blue));
        self.red.set_level(red);
        self.green.set_level(green);
        self.blue.set_level(blue);
    }
}

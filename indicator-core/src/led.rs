//! Tri-color indicator abstraction.
//!
//! Colors are a closed set; [`Color::rgb`] is the single place that maps a
//! color to the three channel drivers. Electrical polarity stays with the
//! driver implementing [`RgbOutput`].

use core::fmt;

/// Per-channel on/off request for a tri-color LED.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Rgb {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl Rgb {
    pub const OFF: Self = Self::new(false, false, false);

    #[must_use]
    pub const fn new(red: bool, green: bool, blue: bool) -> Self {
        Self { red, green, blue }
    }

    /// Returns `true` when every channel is dark.
    #[must_use]
    pub const fn is_off(self) -> bool {
        !(self.red || self.green || self.blue)
    }
}

/// Named colors the indicator can show.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Color {
    Off,
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    White,
}

impl Color {
    /// Channel mix for this color.
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            Color::Off => Rgb::OFF,
            Color::Red => Rgb::new(true, false, false),
            Color::Green => Rgb::new(false, true, false),
            Color::Blue => Rgb::new(false, false, true),
            Color::Yellow => Rgb::new(true, true, false),
            Color::Cyan => Rgb::new(false, true, true),
            Color::Magenta => Rgb::new(true, false, true),
            Color::White => Rgb::new(true, true, true),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Color::Off => "off",
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Cyan => "cyan",
            Color::Magenta => "magenta",
            Color::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Electrical polarity of the LED drivers.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Polarity {
    /// Driving the pin high lights the LED.
    #[default]
    ActiveHigh,
    /// Driving the pin low lights the LED (common-anode parts).
    ActiveLow,
}

impl Polarity {
    /// Pin level (`true` == high) that produces the requested light state.
    #[must_use]
    pub const fn level(self, lit: bool) -> bool {
        match self {
            Polarity::ActiveHigh => lit,
            Polarity::ActiveLow => !lit,
        }
    }
}

/// Sink for composited LED states.
pub trait RgbOutput {
    /// Drives all three channels at once.
    fn write(&mut self, rgb: Rgb);

    /// Forces every channel dark.
    fn off(&mut self) {
        self.write(Rgb::OFF);
    }
}

impl<T: RgbOutput + ?Sized> RgbOutput for &mut T {
    fn write(&mut self, rgb: Rgb) {
        (**self).write(rgb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_colors_light_two_channels() {
        assert_eq!(Color::Yellow.rgb(), Rgb::new(true, true, false));
        assert_eq!(Color::Cyan.rgb(), Rgb::new(false, true, true));
        assert!(Color::Off.rgb().is_off());
        assert!(!Color::White.rgb().is_off());
    }

    #[test]
    fn active_low_inverts_levels() {
        assert!(Polarity::ActiveHigh.level(true));
        assert!(!Polarity::ActiveLow.level(true));
        assert!(Polarity::ActiveLow.level(false));
    }
}

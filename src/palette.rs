//! Fixed colors used by the charts.
//!
//! - the rank-1 highlight and the sequential "Reds" gradient for the bar chart
//! - one color per pole for the donut charts

use crate::domain::{Pole, Rgb};
use crate::error::DataError;

/// Color of the top-ranked bar.
pub const HIGHLIGHT: Rgb = Rgb(255, 0, 0);

/// Sequential "Reds", ordered light to dark.
pub const REDS: [Rgb; 9] = [
    Rgb::from_hex(0xFFF5F0),
    Rgb::from_hex(0xFEE0D2),
    Rgb::from_hex(0xFCBBA1),
    Rgb::from_hex(0xFC9272),
    Rgb::from_hex(0xFB6A4A),
    Rgb::from_hex(0xEF3B2C),
    Rgb::from_hex(0xCB181D),
    Rgb::from_hex(0xA50F15),
    Rgb::from_hex(0x67000D),
];

/// An ordered, non-empty light-to-dark color sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientPalette {
    colors: Vec<Rgb>,
}

impl GradientPalette {
    /// `colors` must be ordered light to dark.
    pub fn new(colors: Vec<Rgb>) -> Result<Self, DataError> {
        if colors.is_empty() {
            return Err(DataError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn reds() -> Self {
        Self {
            colors: REDS.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// The `i`-th color counting from the dark end; saturates at the lightest color.
    pub fn darkest_first(&self, i: usize) -> Rgb {
        let last = self.colors.len() - 1;
        self.colors[last - i.min(last)]
    }
}

impl Default for GradientPalette {
    fn default() -> Self {
        Self::reds()
    }
}

/// Donut color for a pole.
pub fn pole_color(pole: Pole) -> Rgb {
    match pole {
        Pole::E => Rgb::from_hex(0xF07167),
        Pole::I => Rgb::from_hex(0x00B2CA),
        Pole::S => Rgb::from_hex(0x6930C3),
        Pole::N => Rgb::from_hex(0xFFC300),
        Pole::T => Rgb::from_hex(0x0096C7),
        Pole::F => Rgb::from_hex(0xFF884B),
        Pole::J => Rgb::from_hex(0x1A759F),
        Pole::P => Rgb::from_hex(0xA9E5BB),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reds_run_light_to_dark() {
        for pair in REDS.windows(2) {
            assert!(pair[0].brightness() > pair[1].brightness());
        }
    }

    #[test]
    fn darkest_first_saturates_at_lightest() {
        let p = GradientPalette::reds();
        assert_eq!(p.darkest_first(0), Rgb::from_hex(0x67000D));
        assert_eq!(p.darkest_first(8), Rgb::from_hex(0xFFF5F0));
        assert_eq!(p.darkest_first(50), Rgb::from_hex(0xFFF5F0));
    }

    #[test]
    fn empty_palette_rejected() {
        assert_eq!(GradientPalette::new(Vec::new()), Err(DataError::EmptyPalette));
    }
}

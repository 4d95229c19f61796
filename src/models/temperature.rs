use std::fmt;

/// Full scale of the simulated 12 bit ADC (330.0°) in tenths of a degree.
const FULL_SCALE_TENTHS: u32 = 3300;
const ADC_STEPS: u32 = 4096;

/// A dialled temperature, held in tenths of a degree like the dial itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Temperature {
    tenths: u16,
}

impl Temperature {
    pub const MIN_TENTHS: u16 = 100;
    pub const MAX_TENTHS: u16 = 400;
    pub const INITIAL_TENTHS: u16 = 200;
    pub const SINGLE_STEP: u16 = 1;
    pub const PAGE_STEP: u16 = 10;

    /// Clamps `tenths` into the dial range.
    pub fn from_tenths(tenths: i32) -> Self {
        let clamped = tenths.clamp(Self::MIN_TENTHS as i32, Self::MAX_TENTHS as i32);
        Self {
            tenths: clamped as u16,
        }
    }

    pub fn tenths(&self) -> u16 {
        self.tenths
    }

    pub fn degrees(&self) -> f32 {
        self.tenths as f32 / 10.0
    }

    /// Raw ADC count for this temperature, `trunc(degrees * 4096 / 330)`.
    ///
    /// Computed on the integer tenths so the truncation never depends on
    /// float rounding.
    pub fn adc(&self) -> u16 {
        (self.tenths as u32 * ADC_STEPS / FULL_SCALE_TENTHS) as u16
    }

    /// Text shown next to the dial, e.g. `Temperatur: 20.0°`.
    pub fn label(&self) -> String {
        format!("Temperatur: {self}°")
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self {
            tenths: Self::INITIAL_TENTHS,
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tenths / 10, self.tenths % 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_twenty_degrees() {
        let temp = Temperature::default();
        assert_eq!(temp.tenths(), 200);
        assert_eq!(temp.degrees(), 20.0);
        assert_eq!(temp.label(), "Temperatur: 20.0°");
    }

    #[test]
    fn test_from_tenths_clamps_to_dial_range() {
        assert_eq!(Temperature::from_tenths(0).tenths(), 100);
        assert_eq!(Temperature::from_tenths(-50).tenths(), 100);
        assert_eq!(Temperature::from_tenths(401).tenths(), 400);
        assert_eq!(Temperature::from_tenths(257).tenths(), 257);
    }

    #[test]
    fn test_label_for_every_dial_value() {
        for tenths in Temperature::MIN_TENTHS..=Temperature::MAX_TENTHS {
            let temp = Temperature::from_tenths(tenths as i32);
            let expected = format!("Temperatur: {:.1}°", tenths as f64 / 10.0);
            assert_eq!(temp.label(), expected);
        }
    }

    #[test]
    fn test_adc_conversion() {
        // 20.0 * 4096 / 330 = 248.24
        assert_eq!(Temperature::from_tenths(200).adc(), 248);
        // 40.0 * 4096 / 330 = 496.48
        assert_eq!(Temperature::from_tenths(400).adc(), 496);
        // 10.0 * 4096 / 330 = 124.12
        assert_eq!(Temperature::from_tenths(100).adc(), 124);
    }

    #[test]
    fn test_adc_matches_float_truncation() {
        for tenths in Temperature::MIN_TENTHS..=Temperature::MAX_TENTHS {
            let temp = Temperature::from_tenths(tenths as i32);
            let expected = (tenths as f64 / 10.0 * 4096.0 / 330.0) as u16;
            assert_eq!(temp.adc(), expected, "tenths = {}", tenths);
        }
    }
}

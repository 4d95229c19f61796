use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::temperature::Temperature;

/// Marker the consumer uses to recognise a temperature reading.
pub const TEMPERATURE_OPCODE: u8 = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadingError {
    #[error("Missing {0} field")]
    MissingField(&'static str),

    #[error("Invalid {field} field: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("Unexpected trailing data: {0:?}")]
    TrailingData(String),
}

/// One sample as it travels through a sensor file: `"<opcode> <high> <low>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub opcode: u8,
    pub high: u8,
    pub low: u8,
}

impl Reading {
    pub fn from_temperature(temperature: Temperature) -> Self {
        let [high, low] = temperature.adc().to_be_bytes();
        Self {
            opcode: TEMPERATURE_OPCODE,
            high,
            low,
        }
    }

    pub fn adc(&self) -> u16 {
        u16::from_be_bytes([self.high, self.low])
    }

    /// Converts the ADC count back into degrees. Truncation on the writing
    /// side means this sits up to one ADC step below the dialled value.
    pub fn degrees(&self) -> f32 {
        self.adc() as f32 * 330.0 / 4096.0
    }

    pub fn is_temperature(&self) -> bool {
        self.opcode == TEMPERATURE_OPCODE
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.opcode, self.high, self.low)
    }
}

impl FromStr for Reading {
    type Err = ReadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();

        let mut next = |field: &'static str| -> Result<u8, ReadingError> {
            let value = fields.next().ok_or(ReadingError::MissingField(field))?;
            value.parse::<u8>().map_err(|_| ReadingError::InvalidField {
                field,
                value: value.to_string(),
            })
        };

        let opcode = next("opcode")?;
        let high = next("high byte")?;
        let low = next("low byte")?;

        let rest: Vec<&str> = fields.collect();
        if !rest.is_empty() {
            return Err(ReadingError::TrailingData(rest.join(" ")));
        }

        Ok(Self { opcode, high, low })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_text_for_dial_extremes() {
        let cases = [(100, "6 0 124"), (200, "6 0 248"), (400, "6 1 240")];
        for (tenths, expected) in cases {
            let reading = Reading::from_temperature(Temperature::from_tenths(tenths));
            assert_eq!(reading.to_string(), expected);
        }
    }

    #[test]
    fn test_parse_wire_text() {
        let reading: Reading = "6 1 240".parse().unwrap();
        assert_eq!(
            reading,
            Reading {
                opcode: 6,
                high: 1,
                low: 240
            }
        );
        assert_eq!(reading.adc(), 496);
        assert!(reading.is_temperature());
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        let reading: Reading = "  6\t0   248\n".parse().unwrap();
        assert_eq!(reading.adc(), 248);
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        assert_eq!(
            "".parse::<Reading>(),
            Err(ReadingError::MissingField("opcode"))
        );
        assert_eq!(
            "6 0".parse::<Reading>(),
            Err(ReadingError::MissingField("low byte"))
        );
        assert_eq!(
            "6 x 1".parse::<Reading>(),
            Err(ReadingError::InvalidField {
                field: "high byte",
                value: "x".to_string()
            })
        );
        assert_eq!(
            "6 0 256".parse::<Reading>(),
            Err(ReadingError::InvalidField {
                field: "low byte",
                value: "256".to_string()
            })
        );
        assert_eq!(
            "6 0 1 2".parse::<Reading>(),
            Err(ReadingError::TrailingData("2".to_string()))
        );
    }

    #[test]
    fn test_decoded_degrees_stay_within_one_step() {
        let step = 330.0 / 4096.0;
        for tenths in Temperature::MIN_TENTHS..=Temperature::MAX_TENTHS {
            let temp = Temperature::from_tenths(tenths as i32);
            let decoded = Reading::from_temperature(temp).degrees();
            assert!(decoded <= temp.degrees() + 1e-4);
            assert!(temp.degrees() - decoded < step + 1e-4);
        }
    }

    #[test]
    fn test_decode_twenty_degrees() {
        let reading: Reading = "6 0 248".parse().unwrap();
        assert!((reading.degrees() - 19.98).abs() < 0.01);
    }
}

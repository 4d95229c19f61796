//! Consumer side of the sensor files: sample a channel the way the heater
//! controller does and decide whether to heat.

use log::{error, warn};

use crate::ipc::{IpcError, SensorFile};
use crate::models::Reading;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub reading: Reading,
    pub temperature: f32,
    pub heater_on: bool,
}

/// The heater runs while the measured temperature is below the target.
pub fn heater_on(temperature: f32, target: f32) -> bool {
    temperature < target
}

pub fn sample(sensor: &SensorFile, target: f32) -> Result<Sample, IpcError> {
    let reading = sensor.read()?;
    if !reading.is_temperature() {
        warn!(
            "Channel {}: unexpected opcode {}",
            sensor.channel(),
            reading.opcode
        );
    }
    let temperature = reading.degrees();
    Ok(Sample {
        reading,
        temperature,
        heater_on: heater_on(temperature, target),
    })
}

impl Sample {
    /// `[<time>;<temperature>;<heater 0|1>]`
    pub fn line(&self, time: &str) -> String {
        format!(
            "[{};{:.2};{}]",
            time, self.temperature, self.heater_on as u8
        )
    }
}

/// One step of the sampling loop. Read failures are logged and yield `None`
/// so the caller can keep polling.
pub fn sample_line(sensor: &SensorFile, target: f32, time: &str) -> Option<String> {
    match sample(sensor, target) {
        Ok(sample) => Some(sample.line(time)),
        Err(e) => {
            error!(
                "Problem getting values from channel {}: {}",
                sensor.channel(),
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Temperature;
    use std::fs;
    use tempfile::TempDir;

    fn sensor_in(dir: &TempDir) -> SensorFile {
        SensorFile::new(0, dir.path().join("wiringPiSPI_0"))
    }

    #[test]
    fn test_heater_switches_at_target() {
        assert!(heater_on(19.9, 20.0));
        assert!(!heater_on(20.0, 20.0));
        assert!(!heater_on(20.1, 20.0));
    }

    #[test]
    fn test_sample_below_and_above_target() {
        let dir = TempDir::new().unwrap();
        let sensor = sensor_in(&dir);
        sensor
            .write(&Reading::from_temperature(Temperature::from_tenths(200)))
            .unwrap();

        // 248 counts decode to 19.98°, just under a 20.0° target.
        let cold = sample(&sensor, 20.0).unwrap();
        assert!(cold.heater_on);
        assert_eq!(cold.reading.adc(), 248);

        let warm = sample(&sensor, 19.9).unwrap();
        assert!(!warm.heater_on);
    }

    #[test]
    fn test_line_format() {
        let sample = Sample {
            reading: "6 0 248".parse().unwrap(),
            temperature: 19.980469,
            heater_on: true,
        };
        assert_eq!(sample.line("12:00:00"), "[12:00:00;19.98;1]");

        let sample = Sample {
            reading: "6 1 240".parse().unwrap(),
            temperature: 39.96,
            heater_on: false,
        };
        assert_eq!(sample.line("08:15:30"), "[08:15:30;39.96;0]");
    }

    #[test]
    fn test_missing_file_is_not_ready() {
        let dir = TempDir::new().unwrap();
        let sensor = sensor_in(&dir);
        assert!(matches!(
            sample(&sensor, 20.0),
            Err(IpcError::NotReady { .. })
        ));
        assert_eq!(sample_line(&sensor, 20.0, "00:00:00"), None);
    }

    #[test]
    fn test_unexpected_opcode_is_still_sampled() {
        let dir = TempDir::new().unwrap();
        let sensor = sensor_in(&dir);
        fs::write(sensor.path(), "5 0 248").unwrap();

        let sample = sample(&sensor, 20.0).unwrap();
        assert!(!sample.reading.is_temperature());
        assert_eq!(sample.reading.opcode, 5);
        assert_eq!(sample.reading.adc(), 248);
    }

    #[test]
    fn test_loop_keeps_going_after_malformed_reading() {
        let dir = TempDir::new().unwrap();
        let sensor = sensor_in(&dir);

        fs::write(sensor.path(), "6 zero").unwrap();
        assert_eq!(sample_line(&sensor, 20.0, "10:00:00"), None);

        sensor
            .write(&Reading::from_temperature(Temperature::from_tenths(400)))
            .unwrap();
        assert_eq!(
            sample_line(&sensor, 20.0, "10:00:01"),
            Some("[10:00:01;39.96;0]".to_string())
        );
    }
}

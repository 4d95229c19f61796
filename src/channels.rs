use log::{info, warn};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::config::IpcConfig;
use crate::ipc::SensorFile;

pub const DEFAULT_CHANNEL: u32 = 0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    #[error("channel must be a non-negative integer, got {0:?}")]
    Invalid(String),
}

/// Parses one channel argument. Used as the clap value parser.
pub fn parse_channel(arg: &str) -> Result<u32, ChannelError> {
    arg.trim()
        .parse::<u32>()
        .map_err(|_| ChannelError::Invalid(arg.to_string()))
}

/// The deduplicated set of channels to simulate, in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSet {
    channels: BTreeSet<u32>,
}

impl ChannelSet {
    pub fn from_args<I: IntoIterator<Item = u32>>(args: I) -> Self {
        let mut channels: BTreeSet<u32> = args.into_iter().collect();
        if channels.is_empty() {
            channels.insert(DEFAULT_CHANNEL);
        }
        Self { channels }
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.channels.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn contains(&self, channel: u32) -> bool {
        self.channels.contains(&channel)
    }

    pub fn sensor_files(&self, config: &IpcConfig) -> Vec<SensorFile> {
        self.iter()
            .map(|channel| SensorFile::for_channel(config, channel))
            .collect()
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::from_args(std::iter::empty())
    }
}

/// Removes the sensor file of every requested channel, whether or not its
/// window ever wrote one. Failures are printed to stderr, logged and skipped.
///
/// Returns the number of channels whose file could not be removed.
pub fn cleanup(config: &IpcConfig, channels: &ChannelSet) -> usize {
    let mut failures = 0;
    for sensor in channels.sensor_files(config) {
        match sensor.remove() {
            Ok(()) => info!("Removed temperature sensor (channel {})", sensor.channel()),
            Err(e) => {
                let message = format!(
                    "The temperature sensor (channel {}) could not be removed: {}",
                    sensor.channel(),
                    e
                );
                // Printed regardless of the configured log level
                eprintln!("{}", message);
                warn!("{}", message);
                failures += 1;
            }
        }
    }
    failures
}

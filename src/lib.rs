pub mod channels;
pub mod config;
pub mod ipc;
pub mod models;
pub mod probe;
pub mod simulator;

mod renderer;

use crate::channels::ChannelSet;
use crate::config::AppConfig;
use anyhow::Context;
use log::{error, info, warn};

/// Runs the simulation for `channels` and removes their sensor files afterwards,
/// whether the event loop ended normally or not.
pub fn run(config: &AppConfig, channels: &ChannelSet) -> anyhow::Result<()> {
    let list: Vec<String> = channels.iter().map(|c| c.to_string()).collect();
    info!("Starting temperature simulation for channel(s) {}", list.join(", "));

    let result = simulator::launch(config, channels);

    let failures = channels::cleanup(&config.ipc, channels);
    if failures > 0 {
        warn!("{} sensor file(s) were left behind", failures);
    }

    match result {
        Ok(_) => info!("Simulation finished"),
        Err(e) => {
            error!("Simulation error: {e:#}");
            // Print chain of error causes
            for cause in e.chain().skip(1) {
                error!("Caused by: {cause}");
            }
            return Err(e).context("Application failed to run");
        }
    }

    Ok(())
}

use clap::Parser;
use env_logger::{Builder, WriteStyle};
use log::error;
use tempsim::channels::{parse_channel, ChannelSet};
use tempsim::config::AppConfig;

#[derive(Parser)]
#[command(author, version, about = "Temperature sensor simulation", long_about = None)]
struct Args {
    /// Channels to simulate, one window each (default: 0)
    #[arg(value_parser = parse_channel, allow_negative_numbers = true)]
    channels: Vec<u32>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration first (without logging)
    let config = AppConfig::new().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {:#}", e);
        // Fall back to default configuration
        AppConfig::default()
    });

    // Initialise logger with a configured log level
    Builder::new()
        .filter_level(config.get_log_level())
        .write_style(WriteStyle::Always)
        .format_timestamp_secs()
        .init();

    let channels = ChannelSet::from_args(args.channels);

    if let Err(e) = tempsim::run(&config, &channels) {
        error!("Application error: {}", e);
        return Err(e);
    }
    Ok(())
}

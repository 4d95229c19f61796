//! Reads a simulated sensor the way the heater controller does: sample the
//! channel file at a fixed interval and decide whether to heat.

use chrono::Local;
use clap::Parser;
use env_logger::{Builder, WriteStyle};
use std::thread;
use std::time::Duration;
use tempsim::channels::{parse_channel, DEFAULT_CHANNEL};
use tempsim::config::AppConfig;
use tempsim::ipc::SensorFile;
use tempsim::probe;

#[derive(Parser, Debug)]
#[command(author, version, about = "Read a simulated temperature sensor", long_about = None)]
struct Args {
    /// Channel to read
    #[arg(
        value_parser = parse_channel,
        allow_negative_numbers = true,
        default_value_t = DEFAULT_CHANNEL
    )]
    channel: u32,

    /// Seconds between samples
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Target temperature; the heater is on below it
    #[arg(long, default_value_t = 20.0)]
    target: f32,

    /// Take a single sample and exit
    #[arg(long)]
    once: bool,
}

fn now() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = AppConfig::new().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {:#}", e);
        AppConfig::default()
    });

    Builder::new()
        .filter_level(config.get_log_level())
        .write_style(WriteStyle::Always)
        .format_timestamp_secs()
        .init();

    let sensor = SensorFile::for_channel(&config.ipc, args.channel);

    if args.once {
        let sample = probe::sample(&sensor, args.target)?;
        println!("{}", sample.line(&now()));
        return Ok(());
    }

    loop {
        if let Some(line) = probe::sample_line(&sensor, args.target, &now()) {
            println!("{}", line);
        }
        thread::sleep(Duration::from_secs(args.interval));
    }
}

use anyhow::{Context, Result};
use config::{Config, File};
use log::{debug, info, LevelFilter};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "tempsim.ini";

fn default_directory() -> String {
    "/tmp".to_string()
}

fn default_prefix() -> String {
    "wiringPiSPI".to_string()
}

fn default_title() -> String {
    "Temperatur Simulation".to_string()
}

fn default_width() -> f32 {
    240.0
}

fn default_height() -> f32 {
    320.0
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where the per-channel sensor files live.
#[derive(Debug, Deserialize, Clone)]
pub struct IpcConfig {
    #[serde(default = "default_directory")]
    pub directory: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub ipc: IpcConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for IpcConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            prefix: default_prefix(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ipc: IpcConfig::default(),
            window: WindowConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl IpcConfig {
    /// Path of the sensor file for `channel`, e.g. `/tmp/wiringPiSPI_0`.
    pub fn channel_path(&self, channel: u32) -> PathBuf {
        Path::new(&self.directory).join(format!("{}_{}", self.prefix, channel))
    }
}

impl AppConfig {
    /// Loads `tempsim.ini` from the working directory, falling back to the
    /// built-in defaults when the file does not exist.
    pub fn new() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if !path.exists() {
            debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn get_log_level(&self) -> LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info, // Default to Info if invalid
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        debug!("Loading configuration from {}", config_path.display());

        let config = Config::builder()
            .add_source(File::from(config_path).format(config::FileFormat::Ini))
            .build()
            .context(format!("Failed to load config from {}", config_path.display()))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize config")?;

        Ok(app_config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_path = path.as_ref();

        let mut config_str = String::new();

        config_str.push_str(&format!(
            "[ipc]\ndirectory = {}\nprefix = {}\n\n",
            self.ipc.directory, self.ipc.prefix
        ));

        config_str.push_str(&format!(
            "[window]\ntitle = {}\nwidth = {}\nheight = {}\n\n",
            self.window.title, self.window.width, self.window.height
        ));

        config_str.push_str(&format!("[logging]\nlevel = {}\n", self.logging.level));

        fs::write(config_path, config_str)
            .context(format!("Failed to save config to {}", config_path.display()))?;

        info!("Configuration saved to {}", config_path.display());
        Ok(())
    }
}

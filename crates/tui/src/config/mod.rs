use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Web app URL of the sheet script. Without it the dashboard stays empty
    /// and every write is refused locally.
    pub endpoint: Option<String>,
    /// IANA zone for "today". Unset means the system local date.
    pub timezone: Option<String>,
    pub log_file: Option<String>,
    pub log_level: String,
    pub tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timezone: None,
            log_file: None,
            log_level: "info".to_string(),
            tick_ms: 200,
        }
    }
}

impl AppConfig {
    /// The configured endpoint, treating a blank value as unset.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
    }
}

#[derive(Debug, Parser)]
#[command(name = "storetunnel_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the sheet endpoint URL.
    #[arg(long)]
    endpoint: Option<String>,
    /// Override timezone used for "today" (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Append logs to this file (the terminal is owned by the UI).
    #[arg(long)]
    log_file: Option<String>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("STORETUNNEL_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(endpoint) = args.endpoint {
        settings.endpoint = Some(endpoint);
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = Some(timezone);
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = Some(log_file);
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}

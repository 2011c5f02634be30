use std::env;
use std::ops::RangeInclusive;
use std::time::Duration;

use tracing::info;

use super::probe_config::ProbeConfig;
use crate::error::{Error, Result};
use crate::http_probe::transport::DEFAULT_TIMEOUT;
use crate::scoring::{DEFAULT_ATTEMPTS, MAX_ATTEMPTS};

const MAX_URL_WIDTH: usize = 60;
const MAX_TIMEOUT_SECONDS: u64 = 600;

pub struct AppConfig {
    pub config: ProbeConfig,
    pub timeout: Duration,
    pub attempts: usize,
    pub max_url_width: usize,
}

/// Load the application configuration from a YAML file and environment variables.
/// The file is taken from `CONFIG_FILE` (default `config.yml`); `PROBE_TIMEOUT_SECONDS`
/// and `PROBE_ATTEMPTS` override the transport timeout and the sampling count.
/// A `.env` file in the working directory is honoured when present.
pub fn load_config() -> Result<AppConfig> {
    let _ = dotenvy::dotenv();
    load_config_from(|name| env::var(name).ok())
}

/// Same as [`load_config`], reading variables through `lookup` instead of the
/// process environment.
pub fn load_config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<AppConfig> {
    let config_file_location = lookup("CONFIG_FILE").unwrap_or_else(|| "config.yml".to_string());
    let config_str =
        std::fs::read_to_string(&config_file_location).map_err(|source| Error::ConfigRead {
            path: config_file_location.clone(),
            source,
        })?;
    let config = ProbeConfig::from_yaml(&config_str)?;
    info!(
        "Loaded {} targets from {}",
        config.targets.len(),
        config_file_location
    );

    let timeout = Duration::from_secs(parse_number(
        "PROBE_TIMEOUT_SECONDS",
        lookup("PROBE_TIMEOUT_SECONDS"),
        DEFAULT_TIMEOUT.as_secs(),
        1..=MAX_TIMEOUT_SECONDS,
    )?);
    let attempts = parse_number(
        "PROBE_ATTEMPTS",
        lookup("PROBE_ATTEMPTS"),
        DEFAULT_ATTEMPTS as u64,
        1..=MAX_ATTEMPTS as u64,
    )? as usize;

    let max_url_width = url_column_width(&config);

    Ok(AppConfig {
        config,
        timeout,
        attempts,
        max_url_width,
    })
}

fn parse_number(
    name: &'static str,
    raw: Option<String>,
    default: u64,
    allowed: RangeInclusive<u64>,
) -> Result<u64> {
    let Some(value) = raw else {
        return Ok(default);
    };
    match value.trim().parse::<u64>() {
        Ok(number) if allowed.contains(&number) => Ok(number),
        _ => Err(Error::InvalidEnv { name, value }),
    }
}

fn url_column_width(config: &ProbeConfig) -> usize {
    config
        .targets
        .iter()
        .map(|t| t.url.trim().len())
        .max()
        .unwrap_or(10)
        .min(MAX_URL_WIDTH)
}

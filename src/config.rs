use anyhow::{anyhow, Result};
use serde_derive::Deserialize;
use std::str::FromStr;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub(crate) fn load_app_config() -> Result<AppConfig> {
    match envy::from_env::<AppConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load AppConfig: {}", err)),
    }
}

fn default_interval_sec() -> u64 {
    3600
}

// Two provider requests at up to 120s each must fit inside the task timeout.
fn default_task_timeout_seconds() -> u64 {
    300
}

#[derive(Deserialize, Debug)]
pub struct CollectorConfig {
    #[serde(default = "default_interval_sec")]
    pub interval_sec: u64,
    #[serde(default = "default_task_timeout_seconds")]
    pub task_timeout_seconds: u64,
}

pub fn load_collector_config() -> Result<CollectorConfig> {
    match envy::prefixed("COLLECTOR_").from_env::<CollectorConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load CollectorConfig: {}", err)),
    }
}

fn default_sign_in_url() -> String {
    "https://online.e-redes.pt/listeners/api.php/ms/auth/auth/signin".to_string()
}

fn default_usage_url() -> String {
    "https://online.e-redes.pt/listeners/api.php/ms/reading/data-usage/sysgrid/get".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_success_status_codes() -> Vec<u16> {
    vec![200]
}

fn default_history_interval_hours() -> u64 {
    24
}

/// Provider access configuration.
///
/// `extra_headers` uses a `Name=Value;Name2=Value2` notation; a `Host` entry
/// (any casing) is applied to the request target rather than as a plain
/// header. `start_date`, when set, is sent verbatim as the window start on
/// every cycle. `dry_run` signs in with a fixed-token fake and never touches
/// the usage endpoint.
#[derive(Deserialize, Debug, Clone)]
pub struct EredesConfig {
    pub username: String,
    pub password: String,
    pub cpe: String,
    #[serde(default = "default_sign_in_url")]
    pub sign_in_url: String,
    #[serde(default = "default_usage_url")]
    pub usage_url: String,
    #[serde(default)]
    pub extra_headers: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub insecure_skip_verify: bool,
    #[serde(default = "default_success_status_codes")]
    pub success_status_codes: Vec<u16>,
    #[serde(default = "default_history_interval_hours")]
    pub history_interval_hours: u64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub dry_run: bool,
}

pub(crate) fn load_eredes_config() -> Result<EredesConfig> {
    match envy::prefixed("EREDES_").from_env::<EredesConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load EredesConfig: {}", err)),
    }
}

fn default_measurement() -> String {
    "eredes".to_string()
}

fn default_records_path() -> String {
    "Body.Result.utilitiesDevices.0.meterLoadCurves.0.loadCurves".to_string()
}

fn default_timestamp_field() -> String {
    "date".to_string()
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

fn default_value_fields() -> Vec<String> {
    vec!["value".to_string()]
}

/// Field mapping for turning raw usage payloads into readings.
#[derive(Deserialize, Debug, Clone)]
pub struct ParserConfig {
    #[serde(default = "default_measurement")]
    pub measurement: String,
    #[serde(default = "default_records_path")]
    pub records_path: String,
    #[serde(default = "default_timestamp_field")]
    pub timestamp_field: String,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default = "default_value_fields")]
    pub value_fields: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            measurement: default_measurement(),
            records_path: default_records_path(),
            timestamp_field: default_timestamp_field(),
            timestamp_format: default_timestamp_format(),
            value_fields: default_value_fields(),
        }
    }
}

pub(crate) fn load_parser_config() -> Result<ParserConfig> {
    match envy::prefixed("EREDES_PARSER_").from_env::<ParserConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load ParserConfig: {}", err)),
    }
}

#[derive(Deserialize, Debug)]
pub struct InfluxConfig {
    pub url: String,
    pub token: String,
    pub org: String,
    pub bucket: String,
}

pub fn load_influx_config() -> Result<InfluxConfig> {
    match envy::prefixed("INFLUXDB_").from_env::<InfluxConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load InfluxConfig: {}", err)),
    }
}

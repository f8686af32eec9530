use std::env;
use std::path::PathBuf;

use crate::error::{TrackerError, TrackerResult};

const DEFAULT_BASE_URL: &str = "https://www.okx.com";
const DEFAULT_INST_TYPE: &str = "SWAP";
const DEFAULT_POLL_INTERVAL_SECS: f64 = 15.0;
const DEFAULT_LOG_PATH: &str = "data/logs/trade_journal.log";
const DEFAULT_EXPORT_PATH: &str = "data/positions.csv";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub secret_key: String,
    pub passphrase: String,
    pub base_url: String,
    pub inst_type: String,
    pub poll_interval_secs: f64,
    pub log_path: PathBuf,
    pub export_path: PathBuf,
    pub bind_addr: String,
}

impl Config {
    /// Reads the full configuration surface from the environment. The three
    /// credential variables are required; everything else has a default.
    pub fn from_env() -> TrackerResult<Self> {
        let api_key = require_var("OKX_API_KEY")?;
        let secret_key = require_var("OKX_SECRET_KEY")?;
        let passphrase = require_var("OKX_PASSPHRASE")?;

        let base_url = env::var("OKX_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();
        let inst_type = env::var("OKX_INST_TYPE").unwrap_or_else(|_| DEFAULT_INST_TYPE.into());

        let poll_interval_secs = match env::var("POLL_INTERVAL") {
            Ok(raw) => raw.parse::<f64>().map_err(|_| {
                TrackerError::Configuration(format!("Invalid POLL_INTERVAL: {}", raw))
            })?,
            Err(_) => DEFAULT_POLL_INTERVAL_SECS,
        };
        if poll_interval_secs <= 0.0 {
            return Err(TrackerError::Configuration(format!(
                "POLL_INTERVAL must be positive, got {}",
                poll_interval_secs
            )));
        }

        let log_path = env::var("TRADE_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_PATH));
        let export_path = env::var("EXPORT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_EXPORT_PATH));
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());

        Ok(Self {
            api_key,
            secret_key,
            passphrase,
            base_url,
            inst_type,
            poll_interval_secs,
            log_path,
            export_path,
            bind_addr,
        })
    }

    /// Instrument-type filter for the positions endpoint. An empty
    /// `OKX_INST_TYPE` disables the filter.
    pub fn inst_type_filter(&self) -> Option<&str> {
        if self.inst_type.is_empty() {
            None
        } else {
            Some(&self.inst_type)
        }
    }
}

fn require_var(key: &str) -> TrackerResult<String> {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| TrackerError::Configuration(format!("Missing {} in environment", key)))
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::config::Config;
use crate::data::{PositionsEnvelope, RawPosition};
use crate::error::{TrackerError, TrackerResult};
use crate::sign::{path_with_query, signed_headers, Credentials};

const POSITIONS_PATH: &str = "/api/v5/account/positions";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Seam between the refresh path and the exchange, so the poller can be
/// driven by a stub in tests.
#[async_trait]
pub trait PositionsSource: Send + Sync {
    async fn fetch_positions(&self, inst_type: Option<&str>) -> TrackerResult<Vec<RawPosition>>;
}

pub struct OkxClient {
    http: Client,
    creds: Credentials,
    base_url: String,
}

impl OkxClient {
    pub fn new(cfg: &Config) -> TrackerResult<Self> {
        let creds = Credentials {
            api_key: cfg.api_key.clone(),
            secret_key: cfg.secret_key.clone(),
            passphrase: cfg.passphrase.clone(),
        };
        creds.validate()?;

        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            creds,
            base_url: cfg.base_url.clone(),
        })
    }

    /// Drops the pooled connections. Consumes the client so the pool is
    /// released exactly once, after the poll task has been stopped.
    pub fn close(self) {
        info!("Exchange client closed");
    }
}

#[async_trait]
impl PositionsSource for OkxClient {
    async fn fetch_positions(&self, inst_type: Option<&str>) -> TrackerResult<Vec<RawPosition>> {
        let params: Vec<(&str, &str)> = match inst_type {
            Some(t) => vec![("instType", t)],
            None => Vec::new(),
        };
        let headers = signed_headers(&self.creds, "GET", POSITIONS_PATH, &params, None)?;
        let target = path_with_query(POSITIONS_PATH, &params);
        let url = format!("{}{}", self.base_url, target);

        let response = self.http.get(&url).headers(headers).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::ExchangeApi {
                status: status.as_u16(),
                message: response.text().await?,
            });
        }

        let envelope: PositionsEnvelope = response.json().await?;
        debug!("Fetched {} raw position records", envelope.data.len());
        Ok(envelope.data)
    }
}

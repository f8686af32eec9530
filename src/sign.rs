use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use sha2::Sha256;

use crate::error::{TrackerError, TrackerResult};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub secret_key: String,
    pub passphrase: String,
}

impl Credentials {
    /// Header-safety check so bad credentials fail at client construction
    /// rather than on the first request.
    pub fn validate(&self) -> TrackerResult<()> {
        header_value(&self.api_key)?;
        header_value(&self.passphrase)?;
        Ok(())
    }
}

pub fn signature(secret_key: &[u8], msg: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret_key)
        .expect("HMAC can take keys of any size");
    mac.update(msg.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

pub fn render_query(params: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

/// Path plus canonical query string. The signed path and the requested path
/// must be byte-identical, so both sides go through this helper.
pub fn path_with_query(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, render_query(params))
    }
}

pub fn prehash(timestamp: &str, method: &str, path_with_query: &str, body: &str) -> String {
    format!(
        "{}{}{}{}",
        timestamp,
        method.to_uppercase(),
        path_with_query,
        body
    )
}

/// Assembles the OKX credential header set for one request: ISO-8601
/// millisecond timestamp, base64 HMAC-SHA256 over the pre-hash string, key
/// and passphrase headers, JSON content type.
pub fn signed_headers(
    creds: &Credentials,
    method: &str,
    path: &str,
    params: &[(&str, &str)],
    body: Option<&serde_json::Value>,
) -> TrackerResult<HeaderMap> {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let body_str = body.map(|b| b.to_string()).unwrap_or_default();
    let target = path_with_query(path, params);
    let sign = signature(
        creds.secret_key.as_bytes(),
        &prehash(&timestamp, method, &target, &body_str),
    );

    let mut headers = HeaderMap::new();
    headers.insert("OK-ACCESS-KEY", header_value(&creds.api_key)?);
    headers.insert("OK-ACCESS-SIGN", header_value(&sign)?);
    headers.insert("OK-ACCESS-TIMESTAMP", header_value(&timestamp)?);
    headers.insert("OK-ACCESS-PASSPHRASE", header_value(&creds.passphrase)?);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

fn header_value(value: &str) -> TrackerResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| {
        TrackerError::Configuration(
            "Credential contains characters not allowed in an HTTP header".into(),
        )
    })
}

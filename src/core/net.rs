// src/core/net.rs
// Blocking HTTP GET with a fixed retry loop. The run is sequential, so no
// async runtime.

use std::time::Duration;

use reqwest::Url;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};

/// Anything that can GET a URL and hand back the body.
/// A non-success status must come back as `Error::Status`.
pub trait HttpGet {
    fn get(&self, url: &Url) -> Result<String>;
}

pub struct HttpClient {
    inner: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let inner = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { inner })
    }
}

impl HttpGet for HttpClient {
    fn get(&self, url: &Url) -> Result<String> {
        let resp = self.inner.get(url.clone()).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status { status: status.as_u16(), url: url.to_string() });
        }
        Ok(resp.text()?)
    }
}

/// Build `base?k=v&...` with proper escaping.
pub fn build_url(base: &str, query: &[(&str, &str)]) -> Result<Url> {
    Url::parse_with_params(base, query).map_err(|e| Error::Url(format!("{base}: {e}")))
}

/// Up to `attempts` tries, back to back. Returns the first success or the
/// last failure.
pub fn get_with_retry(client: &dyn HttpGet, url: &Url, attempts: usize) -> Result<String> {
    let attempts = attempts.max(1);
    let mut last = None;
    for attempt in 1..=attempts {
        match client.get(url) {
            Ok(body) => return Ok(body),
            Err(e) => {
                logw!("GET {} failed (attempt {}/{}): {}", url, attempt, attempts, e);
                last = Some(e);
            }
        }
    }
    Err(last.unwrap_or_else(|| Error::Url(url.to_string())))
}

//! Single-shot blocking page fetch
//!
//! Uses ureq (simple blocking HTTP). One GET per call, no retries, no caching.

use std::io::ErrorKind;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Request headers and deadline for [`fetch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Sent in this order; names are matched case-insensitively on replace
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    /// Browser-like header set with a 30 second deadline
    fn default() -> Self {
        let headers = [
            ("User-Agent", USER_AGENT),
            (
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
            ("Accept-Language", "en-US,en;q=0.9,es;q=0.8"),
            ("Referer", "https://arxiv.org/"),
            ("Connection", "keep-alive"),
            ("Upgrade-Insecure-Requests", "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            headers,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl FetchConfig {
    /// Set a header, replacing any existing header with the same name
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            Some(slot) => slot.1 = value,
            None => self.headers.push((name, value)),
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Parse `url` and require an absolute http(s) URL
pub fn validate_url(url: &str) -> Result<url::Url> {
    let parsed = url::Url::parse(url)
        .map_err(|e| Error::InvalidArgument(format!("malformed URL `{}`: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(parsed),
        scheme => Err(Error::InvalidArgument(format!(
            "unsupported URL `{}`: expected absolute http or https, got scheme `{}`",
            url, scheme
        ))),
    }
}

/// GET `url` and return the body as text.
///
/// The body is decoded using the charset from `Content-Type`, falling back
/// to UTF-8.
pub fn fetch(url: &str, config: &FetchConfig) -> Result<String> {
    validate_url(url)?;

    // Proxy settings are not read from the environment
    let agent = ureq::Agent::new_with_config(
        ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .proxy(None)
            .build(),
    );

    let mut request = agent.get(url);
    for (name, value) in &config.headers {
        request = request.header(name.as_str(), value.as_str());
    }

    debug!(url, headers = config.headers.len(), timeout = ?config.timeout, "GET");

    let response = request.call().map_err(|e| classify(url, config.timeout, e))?;
    let status = response.status().as_u16();

    let body = response
        .into_body()
        .read_to_string()
        .map_err(|e| classify(url, config.timeout, e))?;

    debug!(url, status, bytes = body.len(), "fetched");
    Ok(body)
}

/// Map a ureq failure onto the crate taxonomy
fn classify(url: &str, timeout: Duration, err: ureq::Error) -> Error {
    match err {
        ureq::Error::StatusCode(status) => Error::HttpStatus {
            url: url.to_string(),
            status,
        },
        ureq::Error::Timeout(_) => Error::Timeout {
            url: url.to_string(),
            timeout,
        },
        ureq::Error::Io(ref io)
            if matches!(io.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) =>
        {
            Error::Timeout {
                url: url.to_string(),
                timeout,
            }
        }
        other => Error::Network {
            url: url.to_string(),
            message: other.to_string(),
        },
    }
}

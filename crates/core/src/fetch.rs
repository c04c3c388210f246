//! Page fetching from URLs, files, and stdin, plus outbound link probing.
//!
//! The page fetch is bounded by [`FetchConfig::timeout`]; exceeding it
//! surfaces [`SiterateError::Timeout`] instead of hanging the request.

use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::{Serialize, Serializer};
use tokio::task::JoinSet;
use url::Url;

use crate::{Result, SiterateError};

static HAS_HTTP_SCHEME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid regex"));
static HAS_ANY_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z][a-z0-9+.\-]*://").expect("valid regex"));

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/124.0 Safari/537.36"
                .to_string(),
        }
    }
}

impl FetchConfig {
    fn client(&self) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(self.timeout))
            .user_agent(&self.user_agent)
            .build()
            .map_err(SiterateError::HttpError)
    }
}

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects.
    pub url: Url,
    pub status: u16,
    pub html: String,
}

/// Normalizes user input into an absolute http(s) URL.
///
/// Surrounding whitespace is trimmed and `https://` is prepended when no
/// scheme is present. Schemes other than http(s) are rejected.
///
/// # Errors
///
/// Returns [`SiterateError::InvalidUrl`] for empty input or anything that
/// does not parse as an http(s) URL with a host.
pub fn normalize_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SiterateError::InvalidUrl("URL is required".to_string()));
    }

    let candidate = if HAS_HTTP_SCHEME.is_match(trimmed) {
        trimmed.to_string()
    } else if HAS_ANY_SCHEME.is_match(trimmed) {
        return Err(SiterateError::InvalidUrl(format!("{} is not an http(s) address", trimmed)));
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&candidate).map_err(|e| SiterateError::InvalidUrl(format!("{}: {}", trimmed, e)))?;

    if url.host_str().is_none_or(str::is_empty) {
        return Err(SiterateError::InvalidUrl(format!("{} has no host", trimmed)));
    }

    Ok(url)
}

/// Fetches a page and returns its status and body.
///
/// Non-success responses are errors: 403 becomes [`SiterateError::AccessDenied`],
/// every other 4xx/5xx becomes [`SiterateError::HttpStatus`].
pub async fn fetch_page(url: &Url, config: &FetchConfig) -> Result<FetchedPage> {
    let client = config.client()?;
    let timeout = config.timeout;
    let map_err = |e: reqwest::Error| {
        if e.is_timeout() { SiterateError::Timeout { timeout } } else { SiterateError::HttpError(e) }
    };

    let response = client
        .get(url.clone())
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(map_err)?;

    let status = response.status();
    if status == StatusCode::FORBIDDEN {
        return Err(SiterateError::AccessDenied { status: status.as_u16() });
    }
    if !status.is_success() {
        return Err(SiterateError::HttpStatus { status: status.as_u16() });
    }

    let final_url = response.url().clone();
    let html = response.text().await.map_err(map_err)?;

    Ok(FetchedPage { url: final_url, status: status.as_u16(), html })
}

/// Reads HTML content from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(SiterateError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(SiterateError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(SiterateError::from)?;

    Ok(buffer)
}

/// Result of probing one outbound link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// The link answered with this HTTP status.
    Status(u16),
    /// The request did not complete.
    Failed,
}

impl Serialize for LinkStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            LinkStatus::Status(code) => serializer.serialize_u16(*code),
            LinkStatus::Failed => serializer.serialize_str("failed"),
        }
    }
}

/// An outbound link and how it answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkCheck {
    pub url: String,
    pub status: LinkStatus,
}

/// Checks at most `limit` links concurrently with a single GET each.
///
/// A failed check is recorded as [`LinkStatus::Failed`] and never aborts the
/// batch. Results keep the order of `links`.
pub async fn check_outbound_links(links: &[String], limit: usize, config: &FetchConfig) -> Vec<LinkCheck> {
    let targets: Vec<String> = links.iter().take(limit).cloned().collect();
    let Ok(client) = config.client() else {
        return targets.into_iter().map(|url| LinkCheck { url, status: LinkStatus::Failed }).collect();
    };

    let mut checks = JoinSet::new();
    for (index, url) in targets.iter().cloned().enumerate() {
        let client = client.clone();
        checks.spawn(async move {
            let status = match client.get(&url).send().await {
                Ok(response) => LinkStatus::Status(response.status().as_u16()),
                Err(_) => LinkStatus::Failed,
            };
            (index, status)
        });
    }

    let mut statuses = vec![LinkStatus::Failed; targets.len()];
    while let Some(joined) = checks.join_next().await {
        if let Ok((index, status)) = joined {
            statuses[index] = status;
        }
    }

    targets
        .into_iter()
        .zip(statuses)
        .map(|(url, status)| LinkCheck { url, status })
        .collect()
}

//! Error types for Siterate operations.
//!
//! This module defines the main error type [`SiterateError`], which covers
//! every fault that aborts an analysis (bad input, failed fetch, unparseable
//! body), and two local error types that never abort one:
//! [`ScoringError`] for a single category and [`JudgeError`] for the AI judge.
//!
//! # Example
//!
//! ```rust
//! use siterate_core::{SiterateError, normalize_url};
//!
//! match normalize_url("   ") {
//!     Ok(url) => println!("Analyzing {}", url),
//!     Err(e) => {
//!         assert_eq!(e.status_code(), 400);
//!         println!("{}: {}", e.kind(), e);
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::score::Category;

/// Classification of a failed page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// The request exceeded the configured timeout.
    Timeout,
    /// DNS, connection or protocol failure.
    Network,
    /// The server answered with a 4xx or 5xx status.
    HttpStatus,
}

/// Main error type for analysis operations.
///
/// Only these variants cause an analysis to fail. Anything that goes wrong
/// after a page was fetched and parsed degrades to a neutral score instead.
#[derive(Error, Debug)]
pub enum SiterateError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other transport problems.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when fetching the page exceeds the configured timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The target site refused automated access.
    #[error("Access denied by target site (HTTP {status})")]
    AccessDenied { status: u16 },

    /// The target site answered with a non-success status.
    #[error("Target site responded with HTTP {status}")]
    HttpStatus { status: u16 },

    /// Missing or malformed URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML could not be used for analysis.
    ///
    /// Returned for empty response bodies and invalid CSS selectors.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read and write errors.
    #[error("I/O error: {0}")]
    WriteError(#[from] std::io::Error),

    /// Report serialization errors.
    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SiterateError {
    /// Returns the fetch classification for errors raised while retrieving the page.
    pub fn fetch_kind(&self) -> Option<FetchErrorKind> {
        match self {
            SiterateError::Timeout { .. } => Some(FetchErrorKind::Timeout),
            SiterateError::HttpError(e) if e.is_timeout() => Some(FetchErrorKind::Timeout),
            SiterateError::HttpError(_) => Some(FetchErrorKind::Network),
            SiterateError::AccessDenied { .. } | SiterateError::HttpStatus { .. } => Some(FetchErrorKind::HttpStatus),
            _ => None,
        }
    }

    /// HTTP-style status code a caller should present for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            SiterateError::InvalidUrl(_) => 400,
            SiterateError::AccessDenied { .. } => 403,
            _ => 500,
        }
    }

    /// Short human-readable error summary, distinct from the detailed message.
    pub fn kind(&self) -> &'static str {
        match self {
            SiterateError::InvalidUrl(_) => "URL is required and must be a valid http(s) address",
            SiterateError::AccessDenied { .. } => "Target site blocked automated access",
            SiterateError::HtmlParseError(_) => "Failed to parse page",
            SiterateError::FileNotFound(_) | SiterateError::WriteError(_) => "Failed to read input",
            _ => "Failed to fetch URL",
        }
    }
}

/// Failure of a single category scorer.
///
/// Recovered by the aggregator, which substitutes a neutral score.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// The scorer produced a value outside its scale.
    #[error("{category} score {value} is outside {min}..={max}")]
    OutOfRange { category: Category, value: f64, min: f64, max: f64 },

    /// The AI judge could not produce a usable judgment.
    #[error("AI judgment unavailable: {0}")]
    Judge(String),

    /// Any other scorer failure.
    #[error("{0}")]
    Failed(String),
}

/// Errors from the AI judgment adapter.
#[derive(Error, Debug)]
pub enum JudgeError {
    /// No API key configured for the backend.
    #[error("OPENAI_API_KEY environment variable not set")]
    MissingApiKey,

    /// A judge setting could not be parsed.
    #[error("Invalid judge configuration: {0}")]
    Config(String),

    /// The request to the backend failed or returned a non-success status.
    #[error("Judge request failed: {0}")]
    Transport(String),

    /// The backend response was not valid JSON.
    #[error("Judge returned malformed JSON: {0}")]
    MalformedJson(String),

    /// The JSON was well formed but broke the output contract.
    #[error("Judge response violates contract at `{field}`: {reason}")]
    Contract { field: String, reason: String },
}

impl From<JudgeError> for ScoringError {
    fn from(err: JudgeError) -> Self {
        ScoringError::Judge(err.to_string())
    }
}

/// Result type alias for SiterateError.
pub type Result<T> = std::result::Result<T, SiterateError>;

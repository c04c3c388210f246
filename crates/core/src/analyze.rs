//! Main analysis API.
//!
//! [`Analyzer`] runs one page through fetch, parse, extraction, scoring and
//! aggregation. Only input, fetch and parse failures abort an analysis; a
//! failing scorer or AI judge degrades to neutral scores and the analysis
//! still completes.
//!
//! # Example
//!
//! ```rust,no_run
//! use siterate_core::{Analyzer, AnalyzerConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = Analyzer::with_config(AnalyzerConfig::builder().timeout(5).build());
//! let report = analyzer.analyze("example.com").await?;
//! println!("{}: {:.1}/10", report.url, report.overall_rating);
//! # Ok(())
//! # }
//! ```

use std::fmt;

use tracing::{debug, info, warn};

use crate::aggregate::{CategoryOutcome, aggregate, aggregate_judgment};
use crate::error::ScoringError;
use crate::facts::{PageFacts, extract_facts};
use crate::fetch::{FetchConfig, check_outbound_links, fetch_page, normalize_url};
use crate::heuristics::{CategoryScorer, HeuristicScorer};
use crate::judge::{AnalysisMode, Judge, OpenAiJudge, judge_website};
use crate::parse::Document;
use crate::report::{LinkReport, SiteReport};
use crate::score::{Category, Scale};
use crate::{Result, SiterateError};

/// Configuration for an [`Analyzer`].
///
/// # Example
///
/// ```rust
/// use siterate_core::{AnalysisMode, AnalyzerConfig};
///
/// let config = AnalyzerConfig::builder()
///     .mode(AnalysisMode::Roast)
///     .check_links(true)
///     .build();
/// assert_eq!(config.link_check_limit, 5);
/// ```
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Page fetch settings (default timeout: 10 seconds).
    pub fetch: FetchConfig,

    /// Tone of the AI judgment (default: professional).
    pub mode: AnalysisMode,

    /// Whether to check outbound links (default: false).
    pub check_links: bool,

    /// Maximum number of outbound links to check (default: 5).
    pub link_check_limit: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { fetch: FetchConfig::default(), mode: AnalysisMode::default(), check_links: false, link_check_limit: 5 }
    }
}

impl AnalyzerConfig {
    /// Creates a new builder for AnalyzerConfig.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::new()
    }
}

/// Builder for AnalyzerConfig.
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AnalyzerConfig::default() }
    }

    /// Sets the page fetch timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.fetch.timeout = secs;
        self
    }

    /// Sets the User-Agent sent with the page fetch.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Sets the AI judgment tone.
    pub fn mode(mut self, value: AnalysisMode) -> Self {
        self.config.mode = value;
        self
    }

    /// Sets whether outbound links are checked.
    pub fn check_links(mut self, value: bool) -> Self {
        self.config.check_links = value;
        self
    }

    /// Sets the maximum number of links to check.
    pub fn link_check_limit(mut self, value: usize) -> Self {
        self.config.link_check_limit = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> AnalyzerConfig {
        self.config
    }
}

impl Default for AnalyzerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Stages of one analysis. `Failed` is reachable from fetching and parsing only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    Fetching,
    Parsing,
    Extracting,
    Scoring,
    Aggregating,
    Done,
    Failed,
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisStage::Fetching => "fetching",
            AnalysisStage::Parsing => "parsing",
            AnalysisStage::Extracting => "extracting",
            AnalysisStage::Scoring => "scoring",
            AnalysisStage::Aggregating => "aggregating",
            AnalysisStage::Done => "done",
            AnalysisStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Runs website analyses.
///
/// The heuristic scorers always run. The AI path runs only when a [`Judge`]
/// was injected with [`Analyzer::with_judge`]; tests substitute a fake judge.
///
/// # Example
///
/// ```rust
/// use siterate_core::Analyzer;
///
/// # #[tokio::main]
/// # async fn main() {
/// let analyzer = Analyzer::new();
/// let html = "<html><head><title>Hi</title></head><body><p>Hello</p></body></html>";
/// let report = analyzer.analyze_html("https://example.com/", 200, html).await.unwrap();
/// assert_eq!(report.title.as_deref(), Some("Hi"));
/// # }
/// ```
pub struct Analyzer<J = OpenAiJudge> {
    config: AnalyzerConfig,
    scorers: Vec<Box<dyn CategoryScorer>>,
    judge: Option<J>,
}

impl Analyzer {
    /// Creates a heuristic-only analyzer with default settings.
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Creates a heuristic-only analyzer with a custom configuration.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config, scorers: HeuristicScorer::all(), judge: None }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl<J: Judge> Analyzer<J> {
    /// Creates an analyzer that also runs the AI path through `judge`.
    pub fn with_judge(config: AnalyzerConfig, judge: J) -> Self {
        Self { config, scorers: HeuristicScorer::all(), judge: Some(judge) }
    }

    /// Replaces the category scorers used on the heuristic path.
    pub fn with_scorers(mut self, scorers: Vec<Box<dyn CategoryScorer>>) -> Self {
        self.scorers = scorers;
        self
    }

    /// Fetches a URL and analyzes it.
    ///
    /// `https://` is prepended when the input has no scheme.
    ///
    /// # Errors
    ///
    /// Returns [`SiterateError::InvalidUrl`] before any request is made for bad
    /// input, a fetch error if the page cannot be retrieved, or
    /// [`SiterateError::HtmlParseError`] if the body is empty.
    pub async fn analyze(&self, input: &str) -> Result<SiteReport> {
        let url = normalize_url(input)?;

        debug!(%url, stage = %AnalysisStage::Fetching, "analysis stage");
        let page = fetch_page(&url, &self.config.fetch)
            .await
            .inspect_err(|e| warn!(%url, stage = %AnalysisStage::Failed, error = %e, "fetch failed"))?;

        self.analyze_html(page.url.as_str(), page.status, &page.html).await
    }

    /// Analyzes already-fetched HTML.
    ///
    /// Runs every stage after fetching; `status` is reported as the page's HTTP status.
    pub async fn analyze_html(&self, url: &str, status: u16, html: &str) -> Result<SiteReport> {
        let facts = self.extract(url, status, html)?;

        debug!(url, stage = %AnalysisStage::Scoring, "analysis stage");
        let heuristics = async { self.score_heuristics(&facts) };
        let judgment = async {
            match &self.judge {
                Some(judge) => Some(judge_website(judge, &facts, self.config.mode).await),
                None => None,
            }
        };
        let links = async {
            if self.config.check_links {
                let limit = self.config.link_check_limit;
                Some(check_outbound_links(&facts.outbound_links, limit, &self.config.fetch).await)
            } else {
                None
            }
        };
        let (outcomes, judgment, checked_links) = tokio::join!(heuristics, judgment, links);

        debug!(url, stage = %AnalysisStage::Aggregating, "analysis stage");
        let scores = aggregate(Scale::TenPoint, outcomes);
        let ai = judgment.map(|result| {
            if let Err(e) = &result {
                warn!(url, error = %e, "AI judgment failed, using neutral defaults");
            }
            aggregate_judgment(result)
        });

        info!(
            url,
            overall = scores.overall_score,
            degraded = scores.degraded.len(),
            ai = ai.is_some(),
            stage = %AnalysisStage::Done,
            "analysis complete"
        );

        Ok(SiteReport::new(facts, self.config.mode, scores, ai, checked_links))
    }

    /// Fetches a URL and checks its outbound links without scoring.
    pub async fn scrape_links(&self, input: &str) -> Result<LinkReport> {
        let url = normalize_url(input)?;
        let page = fetch_page(&url, &self.config.fetch).await?;
        let facts = self.extract(page.url.as_str(), page.status, &page.html)?;
        let checked_links =
            check_outbound_links(&facts.outbound_links, self.config.link_check_limit, &self.config.fetch).await;

        Ok(LinkReport {
            status: facts.http_status,
            title: facts.title,
            has_forms: facts.has_forms,
            total_links: facts.outbound_links.len(),
            checked_links,
        })
    }

    /// Parses and extracts facts. The document never outlives this call.
    fn extract(&self, url: &str, status: u16, html: &str) -> Result<PageFacts> {
        debug!(url, stage = %AnalysisStage::Parsing, bytes = html.len(), "analysis stage");
        let doc = Document::parse(html).inspect_err(
            |e: &SiterateError| warn!(url, stage = %AnalysisStage::Failed, error = %e, "parse failed"),
        )?;

        debug!(url, stage = %AnalysisStage::Extracting, "analysis stage");
        Ok(extract_facts(&doc, url, status))
    }

    /// Runs every scorer. A heuristic category with no scorer is reported as failed.
    fn score_heuristics(&self, facts: &PageFacts) -> Vec<CategoryOutcome> {
        let mut outcomes: Vec<CategoryOutcome> = self
            .scorers
            .iter()
            .map(|scorer| (scorer.category(), scorer.score(facts)))
            .collect();

        for category in Category::HEURISTIC {
            if !outcomes.iter().any(|(scored, _)| *scored == category) {
                outcomes.push((category, Err(ScoringError::Failed("no scorer configured".to_string()))));
            }
        }
        outcomes
    }
}

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use siterate_core::{AnalyzerConfig, JudgeError, OpenAiConfig, OpenAiJudge};
use tracing::info;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_REQUEST_TIMEOUT: u64 = 60;

/// Server settings read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address (`SITERATE_ADDR`).
    pub addr: SocketAddr,

    /// Upper bound on one HTTP request, AI judgment included (`SITERATE_REQUEST_TIMEOUT`).
    pub request_timeout: Duration,

    /// Base analyzer settings; requests override mode and link checking.
    pub analyzer: AnalyzerConfig,

    /// OpenAI settings, present only when `OPENAI_API_KEY` is set.
    pub openai: Option<OpenAiConfig>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let addr = env::var("SITERATE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let addr = addr
            .parse()
            .with_context(|| format!("SITERATE_ADDR is not a socket address: {}", addr))?;

        let request_timeout = match env::var("SITERATE_REQUEST_TIMEOUT") {
            Ok(value) => parse_secs("SITERATE_REQUEST_TIMEOUT", &value)?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT,
        };

        let mut builder = AnalyzerConfig::builder();
        if let Ok(value) = env::var("SITERATE_FETCH_TIMEOUT") {
            builder = builder.timeout(parse_secs("SITERATE_FETCH_TIMEOUT", &value)?);
        }

        let openai = match OpenAiConfig::from_env() {
            Ok(config) => Some(config),
            Err(JudgeError::MissingApiKey) => None,
            Err(e) => return Err(e).context("Invalid OpenAI configuration"),
        };

        let config = Self {
            addr,
            request_timeout: Duration::from_secs(request_timeout),
            analyzer: builder.build(),
            openai,
        };
        config.check_timeouts()?;
        Ok(config)
    }

    /// The fetch and the AI judgment run back to back and must both fit
    /// inside the request timeout.
    pub fn check_timeouts(&self) -> anyhow::Result<()> {
        let fetch = self.analyzer.fetch.timeout;
        let judge = self.openai.as_ref().map_or(0, |openai| openai.timeout);
        let request = self.request_timeout.as_secs();

        if request <= fetch + judge {
            bail!(
                "SITERATE_REQUEST_TIMEOUT ({}s) must exceed SITERATE_FETCH_TIMEOUT ({}s) plus OPENAI_TIMEOUT ({}s)",
                request,
                fetch,
                judge
            );
        }
        Ok(())
    }

    /// Builds the OpenAI judge when configured. AI scoring is off otherwise.
    pub fn judge(&self) -> anyhow::Result<Option<OpenAiJudge>> {
        let Some(openai) = &self.openai else {
            info!("AI scoring disabled, OPENAI_API_KEY not set");
            return Ok(None);
        };

        let judge = OpenAiJudge::new(openai.clone()).context("Failed to build the OpenAI client")?;
        info!(model = judge.model(), timeout = openai.timeout, "AI scoring enabled");
        Ok(Some(judge))
    }
}

fn parse_secs(name: &str, value: &str) -> anyhow::Result<u64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("{} must be a whole number of seconds, got {:?}", name, value))
}

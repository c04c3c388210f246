//! AI judgment of a page.
//!
//! The adapter turns [`PageFacts`] into a prompt, hands it to a [`Judge`]
//! backend, and validates the JSON the backend returns. A response that
//! parses but breaks the output contract is a [`JudgeError::Contract`], kept
//! apart from transport failures so contract drift is visible in logs.
//!
//! # Example
//!
//! ```rust
//! use siterate_core::judge::{AnalysisMode, parse_judgment};
//!
//! let mode: AnalysisMode = "roast".parse().unwrap();
//! assert_eq!(mode, AnalysisMode::Roast);
//!
//! let raw = r#"{"overallScore": 70, "categories": {"design": 70, "content": 65,
//!     "performance": 80, "accessibility": 60, "seo": 75},
//!     "feedback": "Solid.", "recommendations": ["Add alt text"]}"#;
//! let judgment = parse_judgment(raw).unwrap();
//! assert_eq!(judgment.recommendations.len(), 1);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::JudgeError;
use crate::facts::PageFacts;
use crate::score::{Category, Scale};

const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Leaves room for a 10 s page fetch inside a 60 s request.
const DEFAULT_JUDGE_TIMEOUT: u64 = 45;

/// Tone of the AI judgment. Never affects heuristic scores or the output contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    #[default]
    Professional,
    Roast,
}

impl FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "professional" | "pro" => Ok(Self::Professional),
            "roast" => Ok(Self::Roast),
            _ => Err(format!("Invalid mode: {}. Valid options: professional, roast", s)),
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::Professional => f.write_str("professional"),
            AnalysisMode::Roast => f.write_str("roast"),
        }
    }
}

/// Prompt pair sent to a judge backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgePrompt {
    pub mode: AnalysisMode,
    pub system: String,
    pub user: String,
}

/// Output contract appended to every prompt, independent of mode.
const OUTPUT_CONTRACT: &str = r#"Format the response as a JSON object with the following structure:
{
  "overallScore": number,
  "categories": {
    "design": number,
    "content": number,
    "performance": number,
    "accessibility": number,
    "seo": number
  },
  "feedback": string,
  "recommendations": string[]
}
Every score is an integer from 0 to 100. Respond with the JSON object only."#;

/// Builds the judge prompt for a page.
pub fn build_prompt(facts: &PageFacts, mode: AnalysisMode) -> JudgePrompt {
    let system = match mode {
        AnalysisMode::Professional => {
            "You are a professional website analyst. Provide detailed, constructive feedback \
             and specific recommendations for improvement."
        }
        AnalysisMode::Roast => {
            "You are a savage, satirical website critic who roasts websites with sharp humor. \
             Mock the weaknesses mercilessly, but keep every score an honest assessment."
        }
    };

    let ask = match mode {
        AnalysisMode::Professional => "Analyze this website and provide a detailed rating:",
        AnalysisMode::Roast => "Roast this website and rate it without mercy:",
    };

    let headings = if facts.headings.is_empty() { "none".to_string() } else { facts.headings.join(", ") };

    let user = format!(
        "{ask}
URL: {url}
Title: {title}
Meta Description: {description}
Headings: {headings}
Number of Links: {links}
Number of Images: {images}
Number of Buttons: {buttons}
Word Count: {words}

Please provide:
1. An overall score out of 100
2. Individual scores for:
   - Design (out of 100)
   - Content (out of 100)
   - Performance (out of 100)
   - Accessibility (out of 100)
   - SEO (out of 100)
3. {feedback}
4. Specific recommendations for improvement

{contract}",
        url = facts.url,
        title = facts.title_or_sentinel(),
        description = facts.meta_description.as_deref().unwrap_or(""),
        links = facts.link_count,
        images = facts.image_count,
        buttons = facts.button_count,
        words = facts.word_count,
        feedback = match mode {
            AnalysisMode::Professional => "Detailed feedback",
            AnalysisMode::Roast => "A brutal, funny roast as the feedback",
        },
        contract = OUTPUT_CONTRACT,
    );

    JudgePrompt { mode, system: system.to_string(), user }
}

/// Validated judgment returned by an AI backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiJudgment {
    /// Overall score as reported by the judge.
    pub overall_score: f64,
    pub categories: BTreeMap<Category, f64>,
    pub feedback: String,
    pub recommendations: Vec<String>,
}

/// A backend that answers a [`JudgePrompt`] with raw response text.
pub trait Judge: Send + Sync {
    fn judge(&self, prompt: &JudgePrompt) -> impl Future<Output = Result<String, JudgeError>> + Send;
}

/// Prompts `judge` about a page and validates its answer.
pub async fn judge_website<J: Judge>(judge: &J, facts: &PageFacts, mode: AnalysisMode) -> Result<AiJudgment, JudgeError> {
    let prompt = build_prompt(facts, mode);
    let raw = judge.judge(&prompt).await?;
    parse_judgment(&raw)
}

/// Parses and validates a judge response against the output contract.
///
/// Missing fields, wrong types and out-of-range scores are all
/// [`JudgeError::Contract`]; nothing is defaulted or clamped.
pub fn parse_judgment(raw: &str) -> Result<AiJudgment, JudgeError> {
    let value: Value =
        serde_json::from_str(strip_code_fence(raw)).map_err(|e| JudgeError::MalformedJson(e.to_string()))?;
    let root = value
        .as_object()
        .ok_or_else(|| contract("$", "expected a JSON object"))?;

    let overall_score = bounded_score(root, "overallScore", "overallScore")?;

    let categories_obj = root
        .get("categories")
        .ok_or_else(|| contract("categories", "missing"))?
        .as_object()
        .ok_or_else(|| contract("categories", "expected an object"))?;

    let mut categories = BTreeMap::new();
    for category in Category::JUDGED {
        let field = format!("categories.{}", category.key());
        categories.insert(category, bounded_score(categories_obj, category.key(), &field)?);
    }

    let feedback = root
        .get("feedback")
        .ok_or_else(|| contract("feedback", "missing"))?
        .as_str()
        .ok_or_else(|| contract("feedback", "expected a string"))?
        .to_string();

    let recommendations = root
        .get("recommendations")
        .ok_or_else(|| contract("recommendations", "missing"))?
        .as_array()
        .ok_or_else(|| contract("recommendations", "expected an array"))?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| contract(&format!("recommendations[{}]", i), "expected a string"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AiJudgment { overall_score, categories, feedback, recommendations })
}

fn bounded_score(obj: &Map<String, Value>, key: &str, field: &str) -> Result<f64, JudgeError> {
    let value = obj
        .get(key)
        .ok_or_else(|| contract(field, "missing"))?
        .as_f64()
        .ok_or_else(|| contract(field, "expected a number"))?;

    let scale = Scale::Hundred;
    if !scale.contains(value) {
        return Err(contract(
            field,
            &format!("{} is outside {}..={}", value, scale.min(), scale.max()),
        ));
    }

    Ok(value)
}

fn contract(field: &str, reason: &str) -> JudgeError {
    JudgeError::Contract { field: field.to_string(), reason: reason.to_string() }
}

/// Removes a surrounding Markdown code fence, if the model added one.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Connection settings for the OpenAI chat completions API.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl OpenAiConfig {
    /// Creates a config with default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_JUDGE_TIMEOUT,
        }
    }

    /// Reads `OPENAI_API_KEY`, and optionally `OPENAI_MODEL`, `OPENAI_BASE_URL`
    /// and `OPENAI_TIMEOUT` (seconds).
    pub fn from_env() -> Result<Self, JudgeError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(JudgeError::MissingApiKey)?;

        let mut config = Self::new(api_key);
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.model = model;
        }
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(timeout) = std::env::var("OPENAI_TIMEOUT") {
            config.timeout = parse_timeout(&timeout)?;
        }
        Ok(config)
    }
}

fn parse_timeout(value: &str) -> Result<u64, JudgeError> {
    match value.trim().parse() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(JudgeError::Config(format!(
            "OPENAI_TIMEOUT must be a positive number of seconds, got {:?}",
            value
        ))),
    }
}

/// [`Judge`] backed by the OpenAI chat completions API in JSON mode.
#[derive(Debug, Clone)]
pub struct OpenAiJudge {
    config: OpenAiConfig,
    client: Client,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiJudge {
    pub fn new(config: OpenAiConfig) -> Result<Self, JudgeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|e| JudgeError::Transport(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn from_env() -> Result<Self, JudgeError> {
        Self::new(OpenAiConfig::from_env()?)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl Judge for OpenAiJudge {
    async fn judge(&self, prompt: &JudgePrompt) -> Result<String, JudgeError> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user },
            ],
            "response_format": { "type": "json_object" },
        });

        let endpoint = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| JudgeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(JudgeError::Transport(format!("{}: {}", status, text)));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| JudgeError::Transport(format!("unexpected API response: {}", e)))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| JudgeError::Transport("no content in response".to_string()))
    }
}

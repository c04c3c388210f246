pub mod aggregate;
pub mod analyze;
pub mod error;
pub mod facts;
pub mod fetch;
pub mod formatters;
pub mod heuristics;
pub mod judge;
pub mod parse;
pub mod report;
pub mod score;

pub use aggregate::{CategoryOutcome, aggregate, aggregate_judgment, overall_feedback, rating_feedback};
pub use analyze::{AnalysisStage, Analyzer, AnalyzerConfig, AnalyzerConfigBuilder};
pub use error::{FetchErrorKind, JudgeError, Result, ScoringError, SiterateError};
pub use facts::{HeadingCounts, PageFacts, extract_facts};
pub use fetch::{FetchConfig, FetchedPage, LinkCheck, LinkStatus, check_outbound_links, normalize_url};
pub use fetch::{fetch_file, fetch_page, fetch_stdin};
pub use formatters::{JsonConfig, TextConfig, convert_to_json, convert_to_text};
pub use heuristics::{CategoryScorer, HeuristicScorer, content_score, design_score, seo_score};
pub use judge::{AiJudgment, AnalysisMode, Judge, JudgePrompt, OpenAiConfig, OpenAiJudge, build_prompt, parse_judgment};
pub use parse::Document;
pub use report::{AiCategories, AiReport, ErrorBody, LinkReport, SiteReport};
pub use score::{Category, CategoryScore, Scale, ScoreBundle, Tier};

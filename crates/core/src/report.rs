//! Result payloads returned to callers.
//!
//! [`SiteReport`] is the canonical payload: heuristic scores on the 1-10
//! scale at the top level, with the 0-100 AI judgment kept in its own
//! optional [`AiReport`] so the two scales are never mixed.

use serde::Serialize;

use crate::SiterateError;
use crate::facts::PageFacts;
use crate::fetch::LinkCheck;
use crate::judge::AnalysisMode;
use crate::score::{Category, CategoryScore, ScoreBundle};

/// The complete result of analyzing one page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteReport {
    pub url: String,
    pub mode: AnalysisMode,
    pub status: u16,
    pub title: Option<String>,
    pub images: usize,
    pub buttons: usize,
    pub links: usize,
    pub word_count: usize,

    pub design_rating: f64,
    pub design_feedback: String,
    pub design_issues: Vec<String>,
    pub seo_rating: f64,
    pub seo_feedback: String,
    pub seo_issues: Vec<String>,
    pub content_rating: f64,
    pub content_feedback: String,
    pub content_issues: Vec<String>,
    pub overall_rating: f64,
    pub overall_feedback: String,
    /// Heuristic categories that fell back to the neutral score.
    pub degraded: Vec<Category>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai: Option<AiReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_links: Option<Vec<LinkCheck>>,

    #[serde(skip)]
    pub facts: PageFacts,
    #[serde(skip)]
    pub scores: ScoreBundle,
}

impl SiteReport {
    /// Assembles the payload from the extracted facts and finished bundles.
    pub fn new(
        facts: PageFacts,
        mode: AnalysisMode,
        scores: ScoreBundle,
        ai: Option<ScoreBundle>,
        checked_links: Option<Vec<LinkCheck>>,
    ) -> Self {
        let (design_rating, design_feedback, design_issues) = category_fields(&scores, Category::Design);
        let (seo_rating, seo_feedback, seo_issues) = category_fields(&scores, Category::Seo);
        let (content_rating, content_feedback, content_issues) = category_fields(&scores, Category::Content);

        Self {
            url: facts.url.clone(),
            mode,
            status: facts.http_status,
            title: facts.title.clone(),
            images: facts.image_count,
            buttons: facts.button_count,
            links: facts.link_count,
            word_count: facts.word_count,
            design_rating,
            design_feedback,
            design_issues,
            seo_rating,
            seo_feedback,
            seo_issues,
            content_rating,
            content_feedback,
            content_issues,
            overall_rating: scores.overall_score,
            overall_feedback: scores.overall_feedback.clone(),
            degraded: scores.degraded.clone(),
            ai: ai.as_ref().map(AiReport::from),
            checked_links,
            facts,
            scores,
        }
    }
}

fn category_fields(scores: &ScoreBundle, category: Category) -> (f64, String, Vec<String>) {
    let score = scores
        .get(category)
        .cloned()
        .unwrap_or_else(|| CategoryScore::unavailable(category, scores.scale));
    (score.value, score.feedback, score.issues)
}

/// Per-category AI scores, all on the 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AiCategories {
    pub design: f64,
    pub content: f64,
    pub performance: f64,
    pub accessibility: f64,
    pub seo: f64,
}

/// AI judgment section of a [`SiteReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiReport {
    pub overall_score: f64,
    pub overall_feedback: String,
    pub categories: AiCategories,
    pub feedback: String,
    pub recommendations: Vec<String>,
    pub degraded: Vec<Category>,
}

impl From<&ScoreBundle> for AiReport {
    fn from(bundle: &ScoreBundle) -> Self {
        Self {
            overall_score: bundle.overall_score,
            overall_feedback: bundle.overall_feedback.clone(),
            categories: AiCategories {
                design: bundle.value(Category::Design),
                content: bundle.value(Category::Content),
                performance: bundle.value(Category::Performance),
                accessibility: bundle.value(Category::Accessibility),
                seo: bundle.value(Category::Seo),
            },
            feedback: bundle
                .commentary
                .clone()
                .unwrap_or_else(|| "Unable to analyze this website with AI at this time.".to_string()),
            recommendations: bundle.recommendations.clone(),
            degraded: bundle.degraded.clone(),
        }
    }
}

/// Result of the link-checking scrape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkReport {
    pub status: u16,
    pub title: Option<String>,
    pub has_forms: bool,
    pub total_links: usize,
    pub checked_links: Vec<LinkCheck>,
}

/// Error payload for callers: a short `error` plus human-readable `details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, details: Option<String>) -> Self {
        Self { error: error.into(), details }
    }
}

impl From<&SiterateError> for ErrorBody {
    fn from(err: &SiterateError) -> Self {
        Self { error: err.kind().to_string(), details: Some(err.to_string()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;
    use crate::aggregate::{aggregate, aggregate_judgment};
    use crate::error::JudgeError;
    use crate::facts::extract_facts;
    use crate::heuristics::HeuristicScorer;

    fn sample_report(ai: Option<ScoreBundle>) -> SiteReport {
        let doc = Document::parse("<html><head><title>Hi</title></head><body><img src=x><button>b</button></body></html>")
            .unwrap();
        let facts = extract_facts(&doc, "https://example.com/", 200);
        let outcomes = HeuristicScorer::all()
            .iter()
            .map(|scorer| (scorer.category(), scorer.score(&facts)))
            .collect();
        let scores = aggregate(crate::score::Scale::TenPoint, outcomes);
        SiteReport::new(facts, AnalysisMode::Professional, scores, ai, None)
    }

    #[test]
    fn test_report_payload_shape() {
        let json = serde_json::to_value(sample_report(None)).unwrap();

        assert_eq!(json["status"], 200);
        assert_eq!(json["title"], "Hi");
        assert_eq!(json["images"], 1);
        assert_eq!(json["buttons"], 1);
        assert_eq!(json["mode"], "professional");
        assert_eq!(json["designRating"], 1.0);
        assert!(json["seoFeedback"].as_str().unwrap().starts_with("SEO analysis found"));
        assert!(json.get("overallRating").is_some());
        assert!(json.get("ai").is_none());
        assert!(json.get("checkedLinks").is_none());
        assert!(json.get("facts").is_none());
    }

    #[test]
    fn test_report_with_degraded_ai() {
        let ai = aggregate_judgment(Err(JudgeError::MissingApiKey));
        let report = sample_report(Some(ai));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["ai"]["categories"]["performance"], 50.0);
        assert_eq!(json["ai"]["overallScore"], 50.0);
        assert_eq!(json["ai"]["degraded"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_error_body_from_error() {
        let err = SiterateError::AccessDenied { status: 403 };
        let body = ErrorBody::from(&err);

        assert_eq!(body.error, "Target site blocked automated access");
        assert!(body.details.unwrap().contains("403"));
    }
}

//! Rule-based scoring of design, SEO and content.
//!
//! Each category starts at 10 and loses a fixed number of points per
//! missing signal, never dropping below 1. Issues are listed in a fixed
//! order so identical pages always produce identical output.

use crate::ScoringError;
use crate::facts::PageFacts;
use crate::score::{Category, CategoryScore, Scale};

/// Points lost per missing design signal.
pub const DESIGN_PENALTY: f64 = 2.0;
/// Points lost per SEO or content issue.
pub const ISSUE_PENALTY: f64 = 1.0;

/// Below this many words content is considered too short.
pub const MIN_WORDS: usize = 300;
/// Above this many words content should organize data in tables.
pub const TABLE_WORDS: usize = 1000;
/// Above this many words content should include video.
pub const VIDEO_WORDS: usize = 2000;

/// A source of one category score.
///
/// Implementations are evaluated independently; an `Err` from one never
/// prevents the others from running.
pub trait CategoryScorer: Send + Sync {
    fn category(&self) -> Category;

    fn score(&self, facts: &PageFacts) -> Result<CategoryScore, ScoringError>;
}

/// The built-in rule-based scorer for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicScorer {
    category: Category,
}

impl HeuristicScorer {
    /// Creates a scorer for a heuristic category, or `None` for AI-only categories.
    pub fn new(category: Category) -> Option<Self> {
        Category::HEURISTIC.contains(&category).then_some(Self { category })
    }

    /// Scorers for design, SEO and content.
    pub fn all() -> Vec<Box<dyn CategoryScorer>> {
        Category::HEURISTIC
            .into_iter()
            .map(|category| Box::new(Self { category }) as Box<dyn CategoryScorer>)
            .collect()
    }
}

impl CategoryScorer for HeuristicScorer {
    fn category(&self) -> Category {
        self.category
    }

    fn score(&self, facts: &PageFacts) -> Result<CategoryScore, ScoringError> {
        let score = match self.category {
            Category::Design => design_score(facts),
            Category::Seo => seo_score(facts),
            Category::Content => content_score(facts),
            other => return Err(ScoringError::Failed(format!("no heuristic rules for {}", other))),
        };

        let scale = Scale::TenPoint;
        if !scale.contains(score.value) {
            return Err(ScoringError::OutOfRange {
                category: self.category,
                value: score.value,
                min: scale.min(),
                max: scale.max(),
            });
        }

        Ok(score)
    }
}

/// Scores visual design signals: viewport, favicon, font, stylesheet, framework.
pub fn design_score(facts: &PageFacts) -> CategoryScore {
    let checks = [
        (facts.has_viewport_meta, "Missing responsive viewport meta tag"),
        (facts.has_favicon, "No favicon detected"),
        (facts.has_custom_font, "No custom fonts detected"),
        (facts.has_stylesheet, "No CSS stylesheets found"),
        (facts.has_modern_css_framework, "No modern CSS framework detected"),
    ];

    build_score(
        Category::Design,
        missing(&checks),
        DESIGN_PENALTY,
        "Good design implementation with responsive meta tag, favicon, and proper styling.",
    )
}

/// Scores the eight on-page SEO signals.
pub fn seo_score(facts: &PageFacts) -> CategoryScore {
    let checks = [
        (facts.has_title(), "Missing title tag"),
        (facts.has_meta_description, "Missing meta description"),
        (facts.heading_counts.h1 > 0, "No H1 heading found"),
        (facts.heading_counts.h2 > 0, "No H2 headings found"),
        (facts.has_alt_text_on_images, "Images missing alt tags"),
        (facts.has_canonical, "No canonical URL specified"),
        (facts.has_open_graph, "Missing Open Graph meta tags"),
        (facts.has_twitter_card, "Missing Twitter Card meta tags"),
    ];

    build_score(
        Category::Seo,
        missing(&checks),
        ISSUE_PENALTY,
        "Excellent SEO implementation with all key meta tags and proper structure.",
    )
}

/// Scores content richness.
///
/// The table and video checks only apply to long pages, so a short page is
/// penalized for brevity but never for lacking long-form structure.
pub fn content_score(facts: &PageFacts) -> CategoryScore {
    let words = facts.word_count;
    let checks = [
        (words >= MIN_WORDS, "Content is too short (less than 300 words)"),
        (facts.has_images(), "No images found in content"),
        (facts.has_links(), "No links found in content"),
        (facts.has_lists, "No lists found in content"),
        (
            facts.has_tables || words <= TABLE_WORDS,
            "Long content without tables for data organization",
        ),
        (facts.has_interactive_elements(), "No interactive elements found"),
        (facts.has_video_embed || words <= VIDEO_WORDS, "Long content without video elements"),
    ];

    build_score(
        Category::Content,
        missing(&checks),
        ISSUE_PENALTY,
        "Rich content with good mix of text, media, and interactive elements.",
    )
}

fn missing(checks: &[(bool, &str)]) -> Vec<String> {
    checks
        .iter()
        .filter(|(passed, _)| !passed)
        .map(|(_, issue)| issue.to_string())
        .collect()
}

fn build_score(category: Category, issues: Vec<String>, penalty: f64, positive: &str) -> CategoryScore {
    let scale = Scale::TenPoint;
    let value = (scale.max() - issues.len() as f64 * penalty).max(scale.min());
    let feedback = if issues.is_empty() {
        positive.to_string()
    } else {
        format!(
            "{} analysis found {} issues: {}.",
            category,
            issues.len(),
            issues.join(", ")
        )
    };

    CategoryScore::new(value, issues, feedback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;
    use crate::facts::extract_facts;

    fn facts_for(html: &str) -> PageFacts {
        let doc = Document::parse(html).unwrap();
        extract_facts(&doc, "https://example.com/", 200)
    }

    #[test]
    fn test_design_floor() {
        let facts = facts_for("<html><body><p>plain</p></body></html>");
        let score = design_score(&facts);

        assert_eq!(score.value, 1.0);
        assert_eq!(
            score.issues,
            vec![
                "Missing responsive viewport meta tag",
                "No favicon detected",
                "No custom fonts detected",
                "No CSS stylesheets found",
                "No modern CSS framework detected",
            ]
        );
        assert!(score.feedback.starts_with("Design analysis found 5 issues: Missing responsive"));
        assert!(score.feedback.ends_with("framework detected."));
    }

    #[test]
    fn test_design_partial() {
        let facts = facts_for(
            r#"<head><meta name="viewport" content="width=device-width"><link rel="stylesheet" href="/a.css"></head><body></body>"#,
        );
        let score = design_score(&facts);

        assert_eq!(score.value, 4.0);
        assert_eq!(score.issues.len(), 3);
        assert_eq!(score.issues[0], "No favicon detected");
    }

    #[test]
    fn test_seo_all_signals() {
        let facts = facts_for(
            r#"<html><head>
                <title>Page</title>
                <meta name="description" content="About">
                <link rel="canonical" href="https://example.com/">
                <meta property="og:title" content="Page">
                <meta name="twitter:card" content="summary">
            </head><body>
                <h1>One</h1><h2>Two</h2><img src="x.png" alt="x">
            </body></html>"#,
        );
        let score = seo_score(&facts);

        assert_eq!(score.value, 10.0);
        assert!(score.issues.is_empty());
        assert_eq!(
            score.feedback,
            "Excellent SEO implementation with all key meta tags and proper structure."
        );
    }

    #[test]
    fn test_seo_nothing_present() {
        let facts = facts_for("<p>hi</p>");
        let score = seo_score(&facts);

        assert_eq!(score.issues.len(), 8);
        assert_eq!(score.value, 2.0);
    }

    #[test]
    fn test_content_short_page_skips_long_form_checks() {
        let facts = facts_for("<body><p>short</p></body>");
        let score = content_score(&facts);

        assert!(score.issues.contains(&"Content is too short (less than 300 words)".to_string()));
        assert!(!score.issues.iter().any(|issue| issue.starts_with("Long content")));
        assert_eq!(score.value, 10.0 - score.issues.len() as f64);
    }

    #[test]
    fn test_heuristic_scorer_rejects_ai_only_category() {
        assert!(HeuristicScorer::new(Category::Performance).is_none());
        assert!(HeuristicScorer::new(Category::Seo).is_some());
    }

    #[test]
    fn test_heuristic_scorer_scores_in_range() {
        let facts = facts_for("<p>hi</p>");
        for scorer in HeuristicScorer::all() {
            let score = scorer.score(&facts).unwrap();
            assert!(Scale::TenPoint.contains(score.value), "{} out of range", scorer.category());
        }
    }
}

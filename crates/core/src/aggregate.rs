//! Combining category scores into a [`ScoreBundle`].
//!
//! A category whose scorer failed is not dropped: it is replaced by the
//! scale's neutral value and an apologetic feedback line, so the overall
//! mean always exists and a single failure only lowers confidence.

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::{JudgeError, ScoringError};
use crate::judge::AiJudgment;
use crate::score::{Category, CategoryScore, Scale, ScoreBundle, Tier};

/// Outcome of one category scorer.
pub type CategoryOutcome = (Category, Result<CategoryScore, ScoringError>);

/// Builds a bundle from per-category outcomes on one scale.
///
/// Failed categories become [`CategoryScore::unavailable`] and are listed in
/// [`ScoreBundle::degraded`]. The overall score is the arithmetic mean of every
/// category in the bundle; with no categories at all it is the neutral value.
pub fn aggregate(scale: Scale, outcomes: Vec<CategoryOutcome>) -> ScoreBundle {
    let mut categories = BTreeMap::new();
    let mut degraded = Vec::new();

    for (category, outcome) in outcomes {
        let score = match outcome {
            Ok(score) if scale.contains(score.value) => score,
            Ok(score) => {
                warn!(%category, value = score.value, "score outside scale, using neutral default");
                degraded.push(category);
                CategoryScore::unavailable(category, scale)
            }
            Err(e) => {
                warn!(%category, error = %e, "category analysis failed, using neutral default");
                degraded.push(category);
                CategoryScore::unavailable(category, scale)
            }
        };
        categories.insert(category, score);
    }

    let overall_score = if categories.is_empty() {
        scale.neutral()
    } else {
        categories.values().map(|score| score.value).sum::<f64>() / categories.len() as f64
    };

    ScoreBundle {
        scale,
        overall_feedback: overall_feedback(scale, overall_score).to_string(),
        categories,
        degraded,
        overall_score,
        commentary: None,
        recommendations: Vec::new(),
    }
}

/// Builds the 0-100 bundle for the AI path.
///
/// A failed judgment degrades every judged category to the neutral value.
pub fn aggregate_judgment(judgment: Result<AiJudgment, JudgeError>) -> ScoreBundle {
    let scale = Scale::Hundred;

    match judgment {
        Ok(judgment) => {
            let outcomes = Category::JUDGED
                .into_iter()
                .map(|category| {
                    let outcome = match judgment.categories.get(&category) {
                        Some(&value) => Ok(CategoryScore::new(
                            value,
                            Vec::new(),
                            rating_feedback(category, scale.to_ten_point(value)),
                        )),
                        None => Err(ScoringError::Failed(format!("judge did not score {}", category))),
                    };
                    (category, outcome)
                })
                .collect();

            let mut bundle = aggregate(scale, outcomes);
            bundle.commentary = Some(judgment.feedback);
            bundle.recommendations = judgment.recommendations;
            bundle
        }
        Err(e) => {
            let err = ScoringError::from(e);
            let outcomes = Category::JUDGED
                .into_iter()
                .map(|category| (category, Err(err.clone())))
                .collect();
            aggregate(scale, outcomes)
        }
    }
}

/// Summary sentence for an overall score.
pub fn overall_feedback(scale: Scale, overall: f64) -> &'static str {
    match scale.tier(overall) {
        Tier::Excellent => "Excellent website! Strong fundamentals with only minor refinements left.",
        Tier::Good => "Good website overall, with some clear opportunities for improvement.",
        Tier::NeedsImprovement => "This website has room for improvement. Start with the issues listed above.",
    }
}

/// Feedback sentence for a category rated on the 10-point scale.
pub fn rating_feedback(category: Category, rating: f64) -> &'static str {
    let band = if rating >= 9.0 {
        0
    } else if rating >= 7.0 {
        1
    } else if rating >= 5.0 {
        2
    } else {
        3
    };

    let sentences: [&str; 4] = match category {
        Category::Design => [
            "Excellent design with modern aesthetics, great visual hierarchy, and responsive layout.",
            "Good design with clean layout and decent visual appeal. Some minor improvements possible.",
            "Average design. Consider improving visual hierarchy and user experience.",
            "Design needs significant improvement. Focus on layout, responsiveness, and visual appeal.",
        ],
        Category::Seo => [
            "Outstanding SEO implementation with proper meta tags, structure, and optimization.",
            "Good SEO practices in place. Some opportunities for improvement in meta tags and structure.",
            "Basic SEO elements present. Consider enhancing meta descriptions and content structure.",
            "SEO needs attention. Focus on implementing basic SEO elements and improving content structure.",
        ],
        Category::Content => [
            "Exceptional content quality with clear messaging, good grammar, and engaging material.",
            "Good content with clear communication and decent engagement. Minor improvements possible.",
            "Average content quality. Consider improving clarity and engagement.",
            "Content needs improvement. Focus on clarity, grammar, and user engagement.",
        ],
        Category::Performance => [
            "Excellent performance. Pages should load quickly and stay responsive.",
            "Good performance with a few heavy resources worth trimming.",
            "Average performance. Consider reducing page weight and render-blocking resources.",
            "Performance needs attention. Large or blocking resources are likely slowing the page down.",
        ],
        Category::Accessibility => [
            "Excellent accessibility with well-labelled content and clear structure.",
            "Good accessibility. A few labels or contrast issues may remain.",
            "Average accessibility. Review alt text, labels, and heading order.",
            "Accessibility needs significant work. Many visitors may struggle to use this page.",
        ],
    };

    sentences[band]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(category: Category, value: f64) -> CategoryOutcome {
        (category, Ok(CategoryScore::new(value, Vec::new(), "fine")))
    }

    fn failed(category: Category) -> CategoryOutcome {
        (category, Err(ScoringError::Failed("boom".to_string())))
    }

    #[test]
    fn test_mean_of_present_categories() {
        let bundle = aggregate(
            Scale::TenPoint,
            vec![ok(Category::Design, 10.0), ok(Category::Seo, 5.0), ok(Category::Content, 7.0)],
        );

        assert!((bundle.overall_score - 22.0 / 3.0).abs() < 1e-9);
        assert!(!bundle.is_degraded());
        assert_eq!(bundle.overall_feedback, overall_feedback(Scale::TenPoint, 7.0));
    }

    #[test]
    fn test_failed_category_uses_neutral_default() {
        let bundle = aggregate(
            Scale::TenPoint,
            vec![ok(Category::Design, 9.0), ok(Category::Seo, 9.0), failed(Category::Content)],
        );

        assert!((bundle.overall_score - 23.0 / 3.0).abs() < 1e-9);
        assert_eq!(bundle.degraded, vec![Category::Content]);

        let content = bundle.get(Category::Content).unwrap();
        assert_eq!(content.value, 5.0);
        assert_eq!(content.feedback, "Unable to analyze content at this time.");
        assert!(content.issues.is_empty());
    }

    #[test]
    fn test_out_of_scale_score_is_degraded() {
        let bundle = aggregate(Scale::TenPoint, vec![ok(Category::Design, 0.0)]);
        assert_eq!(bundle.degraded, vec![Category::Design]);
        assert_eq!(bundle.value(Category::Design), 5.0);
    }

    #[test]
    fn test_empty_outcomes_are_neutral() {
        let bundle = aggregate(Scale::TenPoint, Vec::new());
        assert_eq!(bundle.overall_score, 5.0);
        assert!(bundle.categories.is_empty());
    }

    #[test]
    fn test_overall_feedback_tiers() {
        assert!(overall_feedback(Scale::TenPoint, 8.0).starts_with("Excellent"));
        assert!(overall_feedback(Scale::TenPoint, 6.0).starts_with("Good"));
        assert!(overall_feedback(Scale::TenPoint, 5.9).contains("room for improvement"));

        assert!(overall_feedback(Scale::Hundred, 80.0).starts_with("Excellent"));
        assert!(overall_feedback(Scale::Hundred, 8.0).contains("room for improvement"));
    }

    #[test]
    fn test_aggregate_judgment_success() {
        let judgment = AiJudgment {
            overall_score: 99.0,
            categories: Category::JUDGED.into_iter().zip([90.0, 70.0, 80.0, 60.0, 50.0]).collect(),
            feedback: "Nice".to_string(),
            recommendations: vec!["Ship it".to_string()],
        };

        let bundle = aggregate_judgment(Ok(judgment));

        assert_eq!(bundle.scale, Scale::Hundred);
        assert_eq!(bundle.overall_score, 70.0);
        assert_eq!(bundle.commentary.as_deref(), Some("Nice"));
        assert_eq!(bundle.recommendations, vec!["Ship it"]);
        assert_eq!(
            bundle.get(Category::Design).unwrap().feedback,
            rating_feedback(Category::Design, 9.0)
        );
    }

    #[test]
    fn test_aggregate_judgment_failure_is_neutral() {
        let bundle = aggregate_judgment(Err(JudgeError::Transport("offline".to_string())));

        assert_eq!(bundle.overall_score, 50.0);
        assert_eq!(bundle.degraded.len(), 5);
        assert_eq!(
            bundle.get(Category::Performance).unwrap().feedback,
            "Unable to analyze performance at this time."
        );
    }

    #[test]
    fn test_rating_feedback_bands() {
        assert!(rating_feedback(Category::Seo, 9.5).starts_with("Outstanding"));
        assert!(rating_feedback(Category::Seo, 7.0).starts_with("Good"));
        assert!(rating_feedback(Category::Content, 5.0).starts_with("Average"));
        assert!(rating_feedback(Category::Design, 2.0).starts_with("Design needs"));
    }
}

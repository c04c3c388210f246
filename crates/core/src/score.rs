//! Score types shared by the heuristic and AI scoring paths.
//!
//! The two paths use different scales ([`Scale::TenPoint`] and
//! [`Scale::Hundred`]). Values from one scale are never averaged or compared
//! with values from the other; every threshold is looked up through the scale.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A quality dimension that can be scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Design,
    Seo,
    Content,
    Performance,
    Accessibility,
}

impl Category {
    /// Categories scored by the rule-based path, in report order.
    pub const HEURISTIC: [Category; 3] = [Category::Design, Category::Seo, Category::Content];

    /// Categories the AI judge must score.
    pub const JUDGED: [Category; 5] = [
        Category::Design,
        Category::Content,
        Category::Performance,
        Category::Accessibility,
        Category::Seo,
    ];

    /// JSON key used for this category.
    pub fn key(self) -> &'static str {
        match self {
            Category::Design => "design",
            Category::Seo => "seo",
            Category::Content => "content",
            Category::Performance => "performance",
            Category::Accessibility => "accessibility",
        }
    }

    /// Lowercase noun used inside sentences ("Unable to analyze SEO ...").
    pub fn noun(self) -> &'static str {
        match self {
            Category::Seo => "SEO",
            other => other.key(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Design => "Design",
            Category::Seo => "SEO",
            Category::Content => "Content",
            Category::Performance => "Performance",
            Category::Accessibility => "Accessibility",
        };
        f.write_str(label)
    }
}

/// Qualitative band of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    Excellent,
    Good,
    NeedsImprovement,
}

/// Numeric range a score is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Scale {
    /// Heuristic path: 1 to 10.
    TenPoint,
    /// AI path: 0 to 100.
    Hundred,
}

impl Scale {
    pub fn min(self) -> f64 {
        match self {
            Scale::TenPoint => 1.0,
            Scale::Hundred => 0.0,
        }
    }

    pub fn max(self) -> f64 {
        match self {
            Scale::TenPoint => 10.0,
            Scale::Hundred => 100.0,
        }
    }

    /// Mid-scale value substituted for a category that failed to compute.
    pub fn neutral(self) -> f64 {
        match self {
            Scale::TenPoint => 5.0,
            Scale::Hundred => 50.0,
        }
    }

    pub fn contains(self, value: f64) -> bool {
        value.is_finite() && value >= self.min() && value <= self.max()
    }

    /// Maps a value onto the 10-point scale.
    pub fn to_ten_point(self, value: f64) -> f64 {
        match self {
            Scale::TenPoint => value,
            Scale::Hundred => value / 10.0,
        }
    }

    /// Classifies a value: 8/6 on the 10-point scale, 80/60 on the 100-point scale.
    pub fn tier(self, value: f64) -> Tier {
        let (excellent, good) = match self {
            Scale::TenPoint => (8.0, 6.0),
            Scale::Hundred => (80.0, 60.0),
        };

        if value >= excellent {
            Tier::Excellent
        } else if value >= good {
            Tier::Good
        } else {
            Tier::NeedsImprovement
        }
    }
}

/// Score, issues and feedback for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub value: f64,
    pub issues: Vec<String>,
    pub feedback: String,
}

impl CategoryScore {
    pub fn new(value: f64, issues: Vec<String>, feedback: impl Into<String>) -> Self {
        Self { value, issues, feedback: feedback.into() }
    }

    /// Neutral stand-in for a category whose analysis failed.
    pub fn unavailable(category: Category, scale: Scale) -> Self {
        Self {
            value: scale.neutral(),
            issues: Vec::new(),
            feedback: format!("Unable to analyze {} at this time.", category.noun()),
        }
    }
}

/// All category scores of one analysis plus the derived overall score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBundle {
    pub scale: Scale,
    pub categories: BTreeMap<Category, CategoryScore>,
    /// Categories that were replaced by the neutral default.
    pub degraded: Vec<Category>,
    pub overall_score: f64,
    pub overall_feedback: String,
    /// Free-text judgment from the AI path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

impl ScoreBundle {
    pub fn get(&self, category: Category) -> Option<&CategoryScore> {
        self.categories.get(&category)
    }

    /// Score value for a category, or the neutral value if it is absent.
    pub fn value(&self, category: Category) -> f64 {
        self.get(category).map_or(self.scale.neutral(), |score| score.value)
    }

    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_bounds() {
        assert!(Scale::TenPoint.contains(1.0));
        assert!(Scale::TenPoint.contains(10.0));
        assert!(!Scale::TenPoint.contains(0.0));
        assert!(!Scale::TenPoint.contains(10.5));
        assert!(Scale::Hundred.contains(0.0));
        assert!(!Scale::Hundred.contains(101.0));
        assert!(!Scale::Hundred.contains(f64::NAN));
    }

    #[test]
    fn test_tier_thresholds_per_scale() {
        assert_eq!(Scale::TenPoint.tier(8.0), Tier::Excellent);
        assert_eq!(Scale::TenPoint.tier(7.9), Tier::Good);
        assert_eq!(Scale::TenPoint.tier(6.0), Tier::Good);
        assert_eq!(Scale::TenPoint.tier(5.9), Tier::NeedsImprovement);

        assert_eq!(Scale::Hundred.tier(80.0), Tier::Excellent);
        assert_eq!(Scale::Hundred.tier(60.0), Tier::Good);
        assert_eq!(Scale::Hundred.tier(8.0), Tier::NeedsImprovement);
    }

    #[test]
    fn test_unavailable_feedback() {
        let score = CategoryScore::unavailable(Category::Seo, Scale::TenPoint);
        assert_eq!(score.value, 5.0);
        assert_eq!(score.feedback, "Unable to analyze SEO at this time.");

        let score = CategoryScore::unavailable(Category::Design, Scale::Hundred);
        assert_eq!(score.value, 50.0);
        assert_eq!(score.feedback, "Unable to analyze design at this time.");
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Accessibility).unwrap();
        assert_eq!(json, "\"accessibility\"");
    }
}

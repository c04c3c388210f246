use crate::fetch::LinkStatus;
use crate::report::{AiReport, SiteReport};

/// Configuration for plain text output
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// List individual issues under each category
    pub include_issues: bool,

    /// Include the AI recommendations list
    pub include_recommendations: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { include_issues: true, include_recommendations: true }
    }
}

/// Render a report as a plain text summary
pub fn convert_to_text(report: &SiteReport, config: &TextConfig) -> String {
    let mut output = String::new();

    output.push_str(&generate_header(report));
    output.push('\n');

    let categories = [
        ("Design", report.design_rating, &report.design_feedback, &report.design_issues),
        ("SEO", report.seo_rating, &report.seo_feedback, &report.seo_issues),
        ("Content", report.content_rating, &report.content_feedback, &report.content_issues),
    ];

    for (label, rating, feedback, issues) in categories {
        output.push_str(&format!("{:<8} {:>4.1}/10  {}\n", label, rating, feedback));
        if config.include_issues {
            for issue in issues {
                output.push_str(&format!("           - {}\n", issue));
            }
        }
    }

    output.push_str(&format!(
        "{:<8} {:>4.1}/10  {}\n",
        "Overall", report.overall_rating, report.overall_feedback
    ));

    if let Some(ai) = &report.ai {
        output.push('\n');
        output.push_str(&generate_ai_section(ai, config));
    }

    if let Some(links) = &report.checked_links {
        output.push_str("\nChecked links\n");
        for link in links {
            let status = match link.status {
                LinkStatus::Status(code) => code.to_string(),
                LinkStatus::Failed => "failed".to_string(),
            };
            output.push_str(&format!("  {:>6}  {}\n", status, link.url));
        }
    }

    output.trim_end().to_string()
}

/// Generate a header from page facts
fn generate_header(report: &SiteReport) -> String {
    let title = report.title.as_deref().unwrap_or("(no title)");
    let mut header = String::new();

    header.push_str(title);
    header.push('\n');
    header.push_str(&"=".repeat(title.chars().count()));
    header.push('\n');
    header.push_str(&format!(
        "URL: {} | Status: {} | Words: {} | Images: {} | Buttons: {} | Links: {}\n",
        report.url, report.status, report.word_count, report.images, report.buttons, report.links
    ));

    header
}

fn generate_ai_section(ai: &AiReport, config: &TextConfig) -> String {
    let mut section = String::from("AI judgment\n");

    let scores = [
        ("Design", ai.categories.design),
        ("Content", ai.categories.content),
        ("Perf", ai.categories.performance),
        ("Access", ai.categories.accessibility),
        ("SEO", ai.categories.seo),
    ];
    for (label, value) in scores {
        section.push_str(&format!("{:<8} {:>5.1}/100\n", label, value));
    }
    section.push_str(&format!(
        "{:<8} {:>5.1}/100  {}\n",
        "Overall", ai.overall_score, ai.overall_feedback
    ));
    section.push_str(&format!("\n{}\n", ai.feedback));

    if config.include_recommendations && !ai.recommendations.is_empty() {
        section.push_str("\nRecommendations\n");
        for (i, recommendation) in ai.recommendations.iter().enumerate() {
            section.push_str(&format!("  {}. {}\n", i + 1, recommendation));
        }
    }

    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::LinkCheck;
    use crate::{AnalysisMode, Document, HeuristicScorer, Scale, aggregate, extract_facts};

    fn report(checked_links: Option<Vec<LinkCheck>>) -> SiteReport {
        let doc = Document::parse("<html><head><title>Text Page</title></head><body><p>words here</p></body></html>")
            .unwrap();
        let facts = extract_facts(&doc, "https://example.com/", 200);
        let outcomes = HeuristicScorer::all()
            .iter()
            .map(|scorer| (scorer.category(), scorer.score(&facts)))
            .collect();
        SiteReport::new(
            facts,
            AnalysisMode::Professional,
            aggregate(Scale::TenPoint, outcomes),
            None,
            checked_links,
        )
    }

    #[test]
    fn test_text_header() {
        let text = convert_to_text(&report(None), &TextConfig::default());
        assert!(text.starts_with("Text Page\n=========\n"));
        assert!(text.contains("Words: 2"));
    }

    #[test]
    fn test_text_lists_issues() {
        let text = convert_to_text(&report(None), &TextConfig::default());
        assert!(text.contains("- No favicon detected"));
        assert!(text.contains("Overall"));
    }

    #[test]
    fn test_text_without_issues() {
        let config = TextConfig { include_issues: false, ..Default::default() };
        let text = convert_to_text(&report(None), &config);
        assert!(!text.contains("- No favicon detected"));
    }

    #[test]
    fn test_text_checked_links() {
        let links = vec![LinkCheck { url: "https://a.example".into(), status: LinkStatus::Failed }];
        let text = convert_to_text(&report(Some(links)), &TextConfig::default());
        assert!(text.contains("failed  https://a.example"));
    }
}

//! Library API integration tests
use rstest::rstest;
use siterate_core::*;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).expect("fixture should exist")
}

fn facts_for(html: &str) -> PageFacts {
    let doc = Document::parse(html).expect("should parse");
    extract_facts(&doc, "https://example.com/", 200)
}

/// Body with exactly `words` words and optional table and video markup.
fn page_with_words(words: usize, table: bool, video: bool) -> String {
    let text = vec!["word"; words].join(" ");
    let table = if table { "<table><tr><td></td></tr></table>" } else { "" };
    let video = if video { "<video src=\"clip.mp4\"></video>" } else { "" };
    format!("<html><body><p>{}</p>{}{}</body></html>", text, table, video)
}

#[tokio::test]
async fn test_end_to_end_minimal_page() {
    let html = read_fixture("minimal.html");
    let report = Analyzer::new()
        .analyze_html("https://example.com/", 200, &html)
        .await
        .expect("should analyze");

    assert_eq!(report.title.as_deref(), Some("Test"));
    assert_eq!(report.images, 1);
    assert_eq!(report.word_count, 50);

    assert_eq!(report.design_rating, 1.0);
    assert!(report.seo_rating <= 5.0);
    assert_eq!(report.seo_rating, 3.0);

    assert!(
        report
            .content_issues
            .contains(&"Content is too short (less than 300 words)".to_string())
    );
    assert!(!report.content_issues.contains(&"No images found in content".to_string()));
    assert_eq!(report.content_rating, 10.0 - report.content_issues.len() as f64);

    let expected = (report.design_rating + report.seo_rating + report.content_rating) / 3.0;
    assert!((report.overall_rating - expected).abs() < 1e-9);
    assert!(report.overall_feedback.contains("room for improvement"));
}

#[tokio::test]
async fn test_end_to_end_full_featured_page() {
    let html = read_fixture("full_featured.html");
    let report = Analyzer::new()
        .analyze_html("https://acme.example/", 200, &html)
        .await
        .expect("should analyze");

    assert_eq!(report.design_rating, 10.0);
    assert_eq!(report.seo_rating, 10.0);
    assert_eq!(
        report.seo_feedback,
        "Excellent SEO implementation with all key meta tags and proper structure."
    );
    assert_eq!(report.content_rating, 10.0);
    assert_eq!(report.overall_rating, 10.0);
    assert!(report.overall_feedback.starts_with("Excellent"));
}

#[test]
fn test_design_floor_without_any_signal() {
    let facts = facts_for("<html><head></head><body><p>no styling at all</p></body></html>");
    let score = design_score(&facts);
    assert_eq!(score.value, 1.0);
    assert_eq!(score.issues.len(), 5);
}

#[rstest]
#[case(299, true)]
#[case(300, false)]
#[case(0, true)]
fn test_too_short_boundary(#[case] words: usize, #[case] expect_issue: bool) {
    let facts = facts_for(&page_with_words(words, false, false));
    assert_eq!(facts.word_count, words);

    let score = content_score(&facts);
    let has_issue = score.issues.iter().any(|issue| issue.starts_with("Content is too short"));
    assert_eq!(has_issue, expect_issue);
}

#[rstest]
#[case(1001, false, true)]
#[case(1001, true, false)]
#[case(1000, false, false)]
#[case(999, false, false)]
#[case(999, true, false)]
fn test_long_content_table_boundary(#[case] words: usize, #[case] table: bool, #[case] expect_issue: bool) {
    let facts = facts_for(&page_with_words(words, table, false));
    let score = content_score(&facts);
    let has_issue = score.issues.iter().any(|issue| issue.contains("without tables"));
    assert_eq!(has_issue, expect_issue);
}

#[rstest]
#[case(2001, false, true)]
#[case(2001, true, false)]
#[case(2000, false, false)]
fn test_long_content_video_boundary(#[case] words: usize, #[case] video: bool, #[case] expect_issue: bool) {
    let facts = facts_for(&page_with_words(words, true, video));
    let score = content_score(&facts);
    let has_issue = score.issues.iter().any(|issue| issue.contains("without video"));
    assert_eq!(has_issue, expect_issue);
}

#[test]
fn test_aggregate_examples() {
    let scores = [(Category::Design, 10.0), (Category::Seo, 5.0), (Category::Content, 7.0)];
    let outcomes = scores
        .into_iter()
        .map(|(category, value)| (category, Ok(CategoryScore::new(value, Vec::new(), "ok"))))
        .collect();
    let bundle = aggregate(Scale::TenPoint, outcomes);
    assert!((bundle.overall_score - 7.333_333).abs() < 1e-3);

    let outcomes = vec![
        (Category::Design, Ok(CategoryScore::new(9.0, Vec::new(), "ok"))),
        (Category::Seo, Ok(CategoryScore::new(9.0, Vec::new(), "ok"))),
        (Category::Content, Err(ScoringError::Failed("boom".to_string()))),
    ];
    let bundle = aggregate(Scale::TenPoint, outcomes);
    assert!((bundle.overall_score - 7.67).abs() < 0.01);
}

#[test]
fn test_extraction_is_deterministic() {
    let html = read_fixture("full_featured.html");
    assert_eq!(facts_for(&html), facts_for(&html));
}

#[test]
fn test_edge_case_empty() {
    let html = read_fixture("empty_content.html");
    assert!(matches!(Document::parse(&html), Err(SiterateError::HtmlParseError(_))));
}

#[tokio::test]
async fn test_edge_case_malformed() {
    let html = read_fixture("malformed_html.html");
    let report = Analyzer::new()
        .analyze_html("https://example.com/", 200, &html)
        .await
        .expect("malformed HTML is still scored");

    assert_eq!(report.title.as_deref(), Some("Broken"));
    assert!(report.word_count > 0);
    assert!(report.degraded.is_empty());
}

#[test]
fn test_missing_performance_is_contract_error() {
    let raw = r#"{"overallScore": 80, "categories": {"design": 80, "content": 80, "accessibility": 80, "seo": 80},
        "feedback": "ok", "recommendations": []}"#;
    assert!(matches!(
        parse_judgment(raw),
        Err(JudgeError::Contract { field, .. }) if field == "categories.performance"
    ));
}

#[test]
fn test_report_json_payload() {
    let html = read_fixture("minimal.html");
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let report = runtime
        .block_on(Analyzer::new().analyze_html("https://example.com/", 200, &html))
        .unwrap();

    let json = convert_to_json(&report, &JsonConfig::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    for key in [
        "status",
        "title",
        "images",
        "buttons",
        "designRating",
        "designFeedback",
        "seoRating",
        "seoFeedback",
        "contentRating",
        "contentFeedback",
        "overallRating",
        "overallFeedback",
    ] {
        assert!(value.get(key).is_some(), "missing {}", key);
    }
}

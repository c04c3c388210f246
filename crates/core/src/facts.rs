use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::Document;

/// Stylesheet URLs that indicate a modern CSS framework.
static CSS_FRAMEWORK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(tailwind|bootstrap|bulma)").expect("valid regex"));

const VIDEO_EMBEDS: &str = r#"video, iframe[src*="youtube"], iframe[src*="vimeo"]"#;
const FORM_CONTROLS: &str = "input, select, textarea";

/// Number of headings per level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeadingCounts {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub h4: usize,
    pub h5: usize,
    pub h6: usize,
}

/// Structural and semantic signals extracted from one fetched page.
///
/// Built once per analysis by [`extract_facts`] and never modified.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFacts {
    pub url: String,
    pub http_status: u16,
    /// Text of `<title>`; `None` when missing or blank.
    pub title: Option<String>,
    pub meta_description: Option<String>,
    /// Texts of all h1-h3 headings in document order.
    pub headings: Vec<String>,
    pub heading_counts: HeadingCounts,
    pub image_count: usize,
    pub button_count: usize,
    pub link_count: usize,
    /// Absolute http(s) link targets in document order.
    pub outbound_links: Vec<String>,

    pub has_viewport_meta: bool,
    pub has_favicon: bool,
    pub has_stylesheet: bool,
    pub has_custom_font: bool,
    pub has_modern_css_framework: bool,

    pub has_meta_description: bool,
    pub has_canonical: bool,
    pub has_open_graph: bool,
    pub has_twitter_card: bool,
    pub has_alt_text_on_images: bool,

    pub has_lists: bool,
    pub has_tables: bool,
    pub has_forms: bool,
    pub has_form_controls: bool,
    pub has_video_embed: bool,

    pub word_count: usize,
    #[serde(skip)]
    pub body_text: String,
}

impl PageFacts {
    pub fn has_title(&self) -> bool {
        self.title.is_some()
    }

    pub fn has_images(&self) -> bool {
        self.image_count > 0
    }

    pub fn has_links(&self) -> bool {
        self.link_count > 0
    }

    /// Forms or standalone input, select and textarea controls.
    pub fn has_interactive_elements(&self) -> bool {
        self.has_forms || self.has_form_controls
    }

    /// Title text, or a sentinel for prompts and display.
    pub fn title_or_sentinel(&self) -> &str {
        self.title.as_deref().unwrap_or("not found")
    }
}

/// Extracts [`PageFacts`] from a parsed document.
///
/// Never fails: markup that matches nothing produces absent flags and zero counts.
pub fn extract_facts(doc: &Document, url: &str, http_status: u16) -> PageFacts {
    let body_text = doc.body_text();
    let word_count = body_text.split_whitespace().count();

    let stylesheet_hrefs: Vec<String> = doc
        .select(r#"link[rel~="stylesheet"][href]"#)
        .unwrap_or_default()
        .iter()
        .filter_map(|el| el.attr("href"))
        .map(str::to_string)
        .collect();

    let meta_description = doc
        .select(r#"meta[name="description"]"#)
        .ok()
        .and_then(|els| els.first().and_then(|el| el.attr("content")).map(str::trim))
        .filter(|content| !content.is_empty())
        .map(str::to_string);

    let headings = doc
        .select("h1, h2, h3")
        .unwrap_or_default()
        .iter()
        .map(|el| el.text().split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|text| !text.is_empty())
        .collect();

    let outbound_links = doc
        .select("a[href]")
        .unwrap_or_default()
        .iter()
        .filter_map(|el| el.attr("href"))
        .map(str::trim)
        .filter(|href| is_absolute_http(href))
        .map(str::to_string)
        .collect();

    PageFacts {
        url: url.to_string(),
        http_status,
        title: doc.title(),
        meta_description,
        headings,
        heading_counts: HeadingCounts {
            h1: doc.count("h1"),
            h2: doc.count("h2"),
            h3: doc.count("h3"),
            h4: doc.count("h4"),
            h5: doc.count("h5"),
            h6: doc.count("h6"),
        },
        image_count: doc.count("img"),
        button_count: doc.count("button"),
        link_count: doc.count("a"),
        outbound_links,

        has_viewport_meta: doc.exists(r#"meta[name="viewport"]"#),
        has_favicon: doc.exists(r#"link[rel~="icon"]"#),
        has_stylesheet: !stylesheet_hrefs.is_empty(),
        has_custom_font: stylesheet_hrefs.iter().any(|href| href.to_lowercase().contains("font")),
        has_modern_css_framework: stylesheet_hrefs.iter().any(|href| CSS_FRAMEWORK.is_match(href)),

        has_meta_description: doc.exists(r#"meta[name="description"]"#),
        has_canonical: doc.exists(r#"link[rel="canonical"]"#),
        has_open_graph: doc.exists(r#"meta[property^="og:"]"#),
        has_twitter_card: doc.exists(r#"meta[name^="twitter:"]"#),
        has_alt_text_on_images: doc.exists("img[alt]"),

        has_lists: doc.exists("ul, ol"),
        has_tables: doc.exists("table"),
        has_forms: doc.exists("form"),
        has_form_controls: doc.exists(FORM_CONTROLS),
        has_video_embed: doc.exists(VIDEO_EMBEDS),

        word_count,
        body_text,
    }
}

fn is_absolute_http(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <meta name="description" content="  A page about widgets  ">
            <meta property="og:title" content="Widgets">
            <meta name="twitter:card" content="summary">
            <link rel="shortcut icon" href="/favicon.ico">
            <link rel="canonical" href="https://example.com/widgets">
            <link rel="stylesheet" href="https://fonts.googleapis.com/css2?family=Inter">
            <link rel="stylesheet" href="/css/bootstrap.min.css">
            <title>Widgets</title>
        </head>
        <body>
            <h1>All about <em>widgets</em></h1>
            <h2>Sizes</h2>
            <h3>Small</h3>
            <h4>Footnote</h4>
            <p>Widgets come in many sizes.</p>
            <img src="a.png" alt="A widget">
            <img src="b.png">
            <ul><li>One</li></ul>
            <table><tr><td>1</td></tr></table>
            <form><input type="text"><button>Go</button></form>
            <iframe src="https://www.youtube.com/embed/xyz"></iframe>
            <a href="/local">Local</a>
            <a href="https://example.org/a">External</a>
            <a href="HTTP://example.net">Shouting</a>
            <a>No href</a>
        </body>
        </html>
    "#;

    fn facts_for(html: &str) -> PageFacts {
        let doc = Document::parse(html).unwrap();
        extract_facts(&doc, "https://example.com/", 200)
    }

    #[test]
    fn test_extract_full_page() {
        let facts = facts_for(FULL_PAGE);

        assert_eq!(facts.title.as_deref(), Some("Widgets"));
        assert_eq!(facts.meta_description.as_deref(), Some("A page about widgets"));
        assert_eq!(facts.headings, vec!["All about widgets", "Sizes", "Small"]);
        assert_eq!(facts.heading_counts.h1, 1);
        assert_eq!(facts.heading_counts.h4, 1);
        assert_eq!(facts.heading_counts.h6, 0);
        assert_eq!(facts.image_count, 2);
        assert_eq!(facts.button_count, 1);
        assert_eq!(facts.link_count, 4);
        assert_eq!(facts.outbound_links, vec!["https://example.org/a", "HTTP://example.net"]);

        assert!(facts.has_viewport_meta);
        assert!(facts.has_favicon);
        assert!(facts.has_stylesheet);
        assert!(facts.has_custom_font);
        assert!(facts.has_modern_css_framework);
        assert!(facts.has_meta_description);
        assert!(facts.has_canonical);
        assert!(facts.has_open_graph);
        assert!(facts.has_twitter_card);
        assert!(facts.has_alt_text_on_images);
        assert!(facts.has_lists);
        assert!(facts.has_tables);
        assert!(facts.has_forms);
        assert!(facts.has_form_controls);
        assert!(facts.has_video_embed);
    }

    #[test]
    fn test_extract_bare_page() {
        let facts = facts_for("<p>just text</p>");

        assert_eq!(facts.title, None);
        assert_eq!(facts.title_or_sentinel(), "not found");
        assert_eq!(facts.word_count, 2);
        assert_eq!(facts.image_count, 0);
        assert!(!facts.has_viewport_meta);
        assert!(!facts.has_stylesheet);
        assert!(!facts.has_interactive_elements());
        assert!(facts.outbound_links.is_empty());
    }

    #[test]
    fn test_broken_markup_yields_absent_flags() {
        let facts = facts_for("<<<div <img <<<");

        assert!(!facts.has_lists);
        assert!(!facts.has_tables);
        assert!(!facts.has_alt_text_on_images);
        assert_eq!(facts.button_count, 0);
    }

    #[test]
    fn test_empty_body_has_zero_words() {
        let facts = facts_for("<html><head><title>T</title></head><body>   </body></html>");
        assert_eq!(facts.word_count, 0);
        assert!(facts.body_text.is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        assert_eq!(facts_for(FULL_PAGE), facts_for(FULL_PAGE));
    }

    #[test]
    fn test_stylesheet_without_font_or_framework() {
        let facts = facts_for(r#"<head><link rel="stylesheet" href="/site.css"></head><body>x</body>"#);
        assert!(facts.has_stylesheet);
        assert!(!facts.has_custom_font);
        assert!(!facts.has_modern_css_framework);
    }
}

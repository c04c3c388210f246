//! HTML parsing and DOM queries.
//!
//! This module provides the [`Document`] and [`Element`] types the feature
//! extractor queries with CSS selectors.
//!
//! # Example
//!
//! ```rust
//! use siterate_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! assert_eq!(doc.count("p.content"), 1);
//! assert!(doc.exists("h1"));
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{Result, SiterateError};

/// Elements whose text never counts as visible body copy.
const NON_VISIBLE_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Represents a parsed HTML document.
///
/// Parsing is lenient: broken or partial markup still yields a document, and
/// queries on it simply match nothing.
///
/// # Example
///
/// ```rust
/// use siterate_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// # Errors
    ///
    /// Returns [`SiterateError::HtmlParseError`] if the input is empty or whitespace only.
    pub fn parse(html: &str) -> Result<Self> {
        if html.trim().is_empty() {
            return Err(SiterateError::HtmlParseError("document is empty".to_string()));
        }

        Ok(Self { html: Html::parse_document(html) })
    }

    /// Selects all elements matching a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SiterateError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use siterate_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Number of elements matching a selector. Invalid selectors match nothing.
    pub fn count(&self, selector: &str) -> usize {
        match parse_selector(selector) {
            Ok(sel) => self.html.select(&sel).count(),
            Err(_) => 0,
        }
    }

    /// Whether at least one element matches a selector.
    pub fn exists(&self, selector: &str) -> bool {
        match parse_selector(selector) {
            Ok(sel) => self.html.select(&sel).next().is_some(),
            Err(_) => false,
        }
    }

    /// Gets the trimmed text of the first `<title>` element, if non-empty.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|title| !title.is_empty())
    }

    /// Visible text of `<body>` with whitespace runs collapsed to single spaces.
    ///
    /// Text inside script, style, noscript and template elements is skipped.
    pub fn body_text(&self) -> String {
        let Ok(selector) = Selector::parse("body") else {
            return String::new();
        };
        let Some(body) = self.html.select(&selector).next() else {
            return String::new();
        };

        let mut words: Vec<&str> = Vec::new();
        for node in body.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element().map(|el| el.name()))
                .is_some_and(|name| NON_VISIBLE_TAGS.contains(&name));
            if !hidden {
                words.extend(text.split_whitespace());
            }
        }

        words.join(" ")
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SiterateError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// A single element of a parsed [`Document`].
///
/// # Example
///
/// ```rust
/// use siterate_core::parse::Document;
///
/// let html = r#"<a href="https://example.com">Link text</a>"#;
/// let doc = Document::parse(html).unwrap();
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the concatenated text of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute, or `None` if it is absent.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }
}

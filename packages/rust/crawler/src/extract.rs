//! Readable-content extraction from raw HTML.
//!
//! Captures the page title and image references, strips non-content
//! elements, and selects the main content region (`<main>`, falling back
//! to `<body>`). A page with neither contributes zero documents.

use scraper::{Html, Selector};
use url::Url;

/// Content pulled out of a fetched page, ready for Markdown conversion.
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    /// Page title, falling back to the URL string when absent.
    pub title: String,
    /// Inner HTML of the main content region, with non-content elements removed.
    pub main_html: String,
    /// Absolute image URLs in first-seen order.
    pub image_urls: Vec<String>,
}

/// Extract readable content from `html`, resolving relative image sources
/// against `base_url`. Returns `None` when no content region exists.
pub fn extract(html: &str, base_url: &Url) -> Option<ExtractedContent> {
    let doc = Html::parse_document(html);

    let title_sel = Selector::parse("title").unwrap();
    let title = doc
        .select(&title_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| base_url.to_string());

    // Image references come from the full document, before stripping,
    // in first-seen order.
    let img_sel = Selector::parse("img[src]").unwrap();
    let mut image_urls = Vec::new();
    for el in doc.select(&img_sel) {
        if let Some(src) = el.value().attr("src") {
            if let Ok(absolute) = base_url.join(src) {
                image_urls.push(absolute.to_string());
            }
        }
    }

    let main_sel = Selector::parse("main").unwrap();
    let body_sel = Selector::parse("body").unwrap();
    let region = doc
        .select(&main_sel)
        .next()
        .or_else(|| doc.select(&body_sel).next())?;

    let main_html = strip_noncontent(&region.inner_html());

    Some(ExtractedContent {
        title,
        main_html,
        image_urls,
    })
}

/// Remove scripts, styles, and page chrome from a content fragment.
fn strip_noncontent(html: &str) -> String {
    let doc = Html::parse_fragment(html);
    let chrome_sel = Selector::parse("script, style, nav, header, footer").unwrap();

    let mut result = html.to_string();
    for el in doc.select(&chrome_sel) {
        result = result.replace(&el.html(), "");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/docs/page").unwrap()
    }

    #[test]
    fn extracts_title_and_main() {
        let html = r#"<html><head><title>My Page</title></head>
            <body><main><h1>Content</h1><p>Body text.</p></main></body></html>"#;

        let content = extract(html, &base()).unwrap();
        assert_eq!(content.title, "My Page");
        assert!(content.main_html.contains("Body text."));
    }

    #[test]
    fn title_falls_back_to_url() {
        let html = "<html><body><main><p>Text</p></main></body></html>";
        let content = extract(html, &base()).unwrap();
        assert_eq!(content.title, "https://example.com/docs/page");
    }

    #[test]
    fn falls_back_to_body_without_main() {
        let html = "<html><body><h1>Plain</h1><p>Body only.</p></body></html>";
        let content = extract(html, &base()).unwrap();
        assert!(content.main_html.contains("Body only."));
    }

    #[test]
    fn strips_chrome_elements() {
        let html = r#"<html><body><main>
            <nav><a href="/">Home</a></nav>
            <p>Keep this.</p>
            <script>track()</script>
            <footer>Copyright</footer>
        </main></body></html>"#;

        let content = extract(html, &base()).unwrap();
        assert!(content.main_html.contains("Keep this."));
        assert!(!content.main_html.contains("track()"));
        assert!(!content.main_html.contains("Copyright"));
        assert!(!content.main_html.contains("Home"));
    }

    #[test]
    fn images_resolved_and_ordered() {
        let html = r#"<html><body>
            <img src="/logo.png">
            <main>
                <img src="figures/one.jpg">
                <img src="https://cdn.example.com/two.jpg">
            </main>
        </body></html>"#;

        let content = extract(html, &base()).unwrap();
        assert_eq!(
            content.image_urls,
            vec![
                "https://example.com/logo.png",
                "https://example.com/docs/figures/one.jpg",
                "https://cdn.example.com/two.jpg",
            ]
        );
    }

    #[test]
    fn empty_document_yields_empty_content() {
        let content = extract("", &base()).unwrap();
        assert!(content.main_html.trim().is_empty());
        assert!(content.image_urls.is_empty());
    }
}

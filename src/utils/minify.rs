//! HTML minification for generated pages.

/// Minify HTML using the `minify_html` crate.
///
/// Closing tags and the `<html>`/`<head>` opening tags are kept so that
/// hand-written layouts survive unchanged apart from whitespace and comments.
pub fn minify_html(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    minify_html::minify(html, &cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_html_basic() {
        let html = b"<html>\n  <head>\n  </head>\n  <body>\n    <p>Hello</p>\n  </body>\n</html>";
        let result = minify_html(html);
        let result_str = String::from_utf8_lossy(&result);

        assert!(!result_str.contains("\n  "));
        assert!(result_str.contains("<p>Hello</p>"));
        assert!(result.len() < html.len());
    }

    #[test]
    fn test_minify_html_drops_comments() {
        let result = minify_html(b"<p>Hello World</p><!-- note -->");
        let result_str = String::from_utf8_lossy(&result);

        assert!(result_str.contains("Hello World"));
        assert!(!result_str.contains("note"));
    }
}

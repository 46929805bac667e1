//! Leading `---` metadata blocks.
//!
//! ```text
//! ---
//! layout: default
//! title: "Council Meeting"
//! ---
//! body starts here
//! ```

use crate::{config::KEY_VALUE_LINE, template::strip_quote_chars};
use serde::Serialize;
use std::collections::BTreeMap;

/// Page variables exposed to templates as `page.*`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter(BTreeMap<String, String>);

impl FrontMatter {
    /// Split a document into its front matter and body.
    ///
    /// Without a well-formed leading block the front matter is empty and the
    /// body is the whole input.
    pub fn split(source: &str) -> (Self, &str) {
        match find_block(source) {
            Some((block, body)) => (Self::parse_block(block), body),
            None => (Self::default(), source),
        }
    }

    fn parse_block(block: &str) -> Self {
        let vars = block
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter_map(|line| KEY_VALUE_LINE.captures(line))
            .map(|caps| (caps[1].to_owned(), strip_quote_chars(&caps[2]).to_owned()))
            .collect();
        Self(vars)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Name of the layout this page asks for.
    pub fn layout(&self) -> Option<&str> {
        self.get("layout")
    }

    #[allow(unused)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Locate `(block, body)`.
///
/// The opening `---` must be the first line; the block closes at the first
/// later line that is exactly `---` and ends with a line break.
fn find_block(source: &str) -> Option<(&str, &str)> {
    let rest = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))?;

    let mut search = 0;
    while let Some(offset) = rest[search..].find("\n---") {
        let newline = search + offset;
        let after = &rest[newline + "\n---".len()..];
        let body = after
            .strip_prefix('\n')
            .or_else(|| after.strip_prefix("\r\n"));

        if let Some(body) = body {
            let block = &rest[..newline];
            let block = block.strip_suffix('\r').unwrap_or(block);
            return Some((block, body));
        }
        search = newline + 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_front_matter() {
        for source in ["# Hello\n", "", "text\n---\nmore\n", " ---\nkey: v\n---\n"] {
            let (front, body) = FrontMatter::split(source);
            assert!(front.is_empty());
            assert_eq!(body, source);
        }
    }

    #[test]
    fn test_basic_block() {
        let (front, body) = FrontMatter::split("---\nlayout: default\ntitle: About\n---\n# Hello\n");
        assert_eq!(front.layout(), Some("default"));
        assert_eq!(front.get("title"), Some("About"));
        assert_eq!(body, "# Hello\n");
    }

    #[test]
    fn test_crlf_block() {
        let (front, body) = FrontMatter::split("---\r\ntitle: Win\r\n---\r\nbody\r\n");
        assert_eq!(front.get("title"), Some("Win"));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_quote_stripping() {
        let (front, _) = FrontMatter::split(
            "---\na: \"double\"\nb: 'single'\nc: \"mixed'\nd: it's\n---\n",
        );
        assert_eq!(front.get("a"), Some("double"));
        assert_eq!(front.get("b"), Some("single"));
        assert_eq!(front.get("c"), Some("mixed"));
        assert_eq!(front.get("d"), Some("it's"));
    }

    #[test]
    fn test_no_inline_comment_stripping() {
        let (front, _) = FrontMatter::split("---\ntitle: Budget # 2024\n---\n");
        assert_eq!(front.get("title"), Some("Budget # 2024"));
    }

    #[test]
    fn test_closing_delimiter_needs_line_break() {
        let source = "---\ntitle: x\n---";
        let (front, body) = FrontMatter::split(source);
        assert!(front.is_empty());
        assert_eq!(body, source);
    }

    #[test]
    fn test_closing_delimiter_must_be_exact() {
        let (front, body) = FrontMatter::split("---\ntitle: x\n----\nmore: y\n---\nbody");
        assert_eq!(front.get("title"), Some("x"));
        assert_eq!(front.get("more"), Some("y"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_empty_block() {
        let (front, body) = FrontMatter::split("---\n\n---\nbody");
        assert!(front.is_empty());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_body_keeps_later_delimiters() {
        let (_, body) = FrontMatter::split("---\na: 1\n---\ntop\n---\nbottom\n");
        assert_eq!(body, "top\n---\nbottom\n");
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let (front, _) = FrontMatter::split("---\ntitle: one\ntitle: two\n---\n");
        assert_eq!(front.get("title"), Some("two"));
    }
}

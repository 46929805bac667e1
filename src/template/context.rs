//! Variables visible to a page while it is rendered.

use crate::{config::SiteConfig, page::FrontMatter};
use serde::Serialize;
use serde_json::Value;

/// `{ site, page, content? }` for one render pass.
///
/// `content` is only present while a layout wraps a page body.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageContext<'a> {
    pub site: &'a SiteConfig,
    pub page: &'a FrontMatter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<&'a str>,
}

impl<'a> PageContext<'a> {
    pub const fn new(site: &'a SiteConfig, page: &'a FrontMatter) -> Self {
        Self {
            site,
            page,
            content: None,
        }
    }

    pub const fn with_content(self, content: &'a str) -> Self {
        Self {
            content: Some(content),
            ..self
        }
    }

    /// Value tree used for dotted-path lookup.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

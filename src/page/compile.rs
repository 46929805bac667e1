//! Single page compilation.
//!
//! # Stages
//!
//! ```text
//! Loaded ─► FrontMatterExtracted ─► BodyConverted ─► IncludesResolved
//!                                                         │
//!                        ┌── layout declared and loaded ──┤
//!                        ▼                                │
//!                  LayoutApplied ─────────────────────────┤
//!                                                         ▼
//!                                   VariablesResolved ─► Written
//! ```

use super::{FrontMatter, markdown};
use crate::{
    config::SiteConfig,
    log,
    template::{self, PageContext, TemplateStore},
    utils::minify::minify_html,
};
use anyhow::{Context, Result};
use std::{borrow::Cow, fmt, fs, path::Path};

/// Source format, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Markdown,
    Html,
}

impl SourceKind {
    /// `None` for files that are not pages.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("md") => Some(Self::Markdown),
            Some("html") => Some(Self::Html),
            _ => None,
        }
    }
}

/// Compilation stages that can fail, reported in error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loaded,
    LayoutApplied,
    VariablesResolved,
    Written,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Loaded => "load",
            Self::LayoutApplied => "layout",
            Self::VariablesResolved => "variables",
            Self::Written => "write",
        };
        f.write_str(name)
    }
}

/// Compiles pages against one site's variables and templates.
#[derive(Debug, Clone, Copy)]
pub struct PageCompiler<'a> {
    site: &'a SiteConfig,
    templates: &'a TemplateStore,
    minify: bool,
}

impl<'a> PageCompiler<'a> {
    pub const fn new(site: &'a SiteConfig, templates: &'a TemplateStore) -> Self {
        Self {
            site,
            templates,
            minify: false,
        }
    }

    pub const fn minify(self, minify: bool) -> Self {
        Self { minify, ..self }
    }

    /// Run every in-memory stage on a document.
    pub fn render(&self, source: &str, kind: SourceKind) -> Result<String> {
        let (front, body) = FrontMatter::split(source);

        let body: Cow<'_, str> = match kind {
            SourceKind::Markdown => Cow::Owned(markdown::to_html(body)),
            SourceKind::Html => Cow::Borrowed(body),
        };

        let mut html = template::resolve_includes(&body, self.templates);

        if let Some(layout) = front.layout().and_then(|name| self.templates.layout(name)) {
            let layout = template::resolve_includes(layout, self.templates);
            let context = PageContext::new(self.site, &front)
                .with_content(&html)
                .to_value()
                .with_context(|| Stage::LayoutApplied.to_string())?;
            html = template::render(&layout, &context);
        }

        let context = PageContext::new(self.site, &front)
            .to_value()
            .with_context(|| Stage::VariablesResolved.to_string())?;
        Ok(template::render(&html, &context))
    }

    /// Compile `source` and write the result to `output`.
    ///
    /// Parent directories of `output` are created as needed.
    pub fn compile(&self, source: &Path, output: &Path, kind: SourceKind) -> Result<()> {
        let text = fs::read_to_string(source)
            .with_context(|| format!("[{}] Failed to read {}", Stage::Loaded, source.display()))?;

        let html = self
            .render(&text, kind)
            .with_context(|| format!("Failed to compile {}", source.display()))?;

        let html = if self.minify {
            minify_html(html.as_bytes())
        } else {
            html.into_bytes()
        };

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, html)
            .with_context(|| format!("[{}] Failed to write {}", Stage::Written, output.display()))?;

        log!("content"; "{}", output.display());
        Ok(())
    }
}

//! Site building orchestration.
//!
//! # Build Order
//!
//! ```text
//! Site::build()
//!     │
//!     ├── clear output directory
//!     ├── load _includes/ and _layouts/
//!     ├── index.md | index.html   ──► index.html
//!     ├── _pages/*.{md,html}      ──► <stem>.html
//!     ├── _posts/YYYY-MM-DD-*.md  ──► posts/<slug>.html
//!     └── assets/                 ──► assets/
//! ```
//!
//! Every step runs in sequence. The first error aborts the build and leaves
//! the partially written output in place.

use crate::{
    config::{BuilderConfig, ConfigError, SiteConfig},
    log,
    page::{PageCompiler, SourceKind},
    template::TemplateStore,
    utils::fs::{copy_dir, list_files},
};
use anyhow::{Context, Result};
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

/// `2024-01-05-meeting-notes.md` → slug `meeting-notes`.
static POST_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}-(.+)\.md$").unwrap());

/// Output directory for compiled posts.
const POSTS_OUTPUT: &str = "posts";

/// Output directory for copied assets.
const ASSETS_OUTPUT: &str = "assets";

/// Counts reported after a successful build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub assets: usize,
}

/// One build invocation: settings plus the site variables loaded for it.
#[derive(Debug, Clone)]
pub struct Site {
    config: BuilderConfig,
    variables: SiteConfig,
}

impl Site {
    /// Load site variables, falling back to the defaults when the config file
    /// is missing or unreadable.
    pub fn new(config: BuilderConfig) -> Self {
        let path = &config.build.config;
        let variables = match SiteConfig::from_path(path) {
            Ok(variables) => {
                log!("config"; "loaded {} variables from {}", variables.len(), path.display());
                variables
            }
            Err(ConfigError::NotFound(_)) => SiteConfig::default(),
            Err(err) => {
                log!("warn"; "{err:#}, using defaults");
                SiteConfig::default()
            }
        };

        Self { config, variables }
    }

    pub const fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Regenerate the whole output directory.
    pub fn build(&self) -> Result<BuildSummary> {
        self.config.validate()?;
        let build = &self.config.build;
        let output = &build.output;

        log!("build"; "building site...");
        clear_output(output)?;

        let templates = TemplateStore::load(&build.includes, &build.layouts)?;
        log!(
            "build";
            "{} includes, {} layouts",
            templates.include_count(),
            templates.layout_count()
        );
        let compiler = PageCompiler::new(&self.variables, &templates).minify(build.minify);

        let mut summary = BuildSummary::default();

        if let Some((source, kind)) = find_index(&build.root) {
            compiler.compile(&source, &output.join("index.html"), kind)?;
            summary.pages += 1;
        }

        for (source, kind) in page_sources(&build.pages)? {
            let Some(stem) = source.file_stem() else {
                continue;
            };
            // `budget.2024.md` keeps its dots: `budget.2024.html`
            let dest = output.join(format!("{}.html", stem.to_string_lossy()));
            compiler.compile(&source, &dest, kind)?;
            summary.pages += 1;
        }

        if build.posts.is_dir() {
            let posts_output = output.join(POSTS_OUTPUT);
            fs::create_dir_all(&posts_output)
                .with_context(|| format!("Failed to create {}", posts_output.display()))?;

            for (source, slug) in post_sources(&build.posts)? {
                let dest = posts_output.join(format!("{slug}.html"));
                compiler.compile(&source, &dest, SourceKind::Markdown)?;
                summary.pages += 1;
            }
        }

        if build.assets.is_dir() {
            summary.assets = copy_dir(&build.assets, &output.join(ASSETS_OUTPUT))?;
        }

        log!("build"; "done: {} pages, {} assets", summary.pages, summary.assets);
        Ok(summary)
    }
}

/// Delete and recreate the output directory.
fn clear_output(output: &Path) -> Result<()> {
    if output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Root index document; markdown wins over html.
fn find_index(root: &Path) -> Option<(PathBuf, SourceKind)> {
    [("index.md", SourceKind::Markdown), ("index.html", SourceKind::Html)]
        .into_iter()
        .map(|(name, kind)| (root.join(name), kind))
        .find(|(path, _)| path.is_file())
}

/// Files in the pages directory that are markdown or html.
fn page_sources(dir: &Path) -> Result<Vec<(PathBuf, SourceKind)>> {
    Ok(list_files(dir)?
        .into_iter()
        .filter_map(|path| SourceKind::from_path(&path).map(|kind| (path, kind)))
        .collect())
}

/// Date-prefixed markdown posts with their output slug.
fn post_sources(dir: &Path) -> Result<Vec<(PathBuf, String)>> {
    Ok(list_files(dir)?
        .into_iter()
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?;
            let slug = post_slug(name)?.to_owned();
            Some((path, slug))
        })
        .collect())
}

/// Slug of a `YYYY-MM-DD-slug.md` filename; the date is discarded.
pub fn post_slug(file_name: &str) -> Option<&str> {
    POST_FILENAME
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

// ============================================================================
// Tests
// ============================================================================

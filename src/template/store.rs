//! Include and layout fragments loaded from the site source.

use crate::utils::fs::list_files;
use anyhow::{Context, Result};
use std::{collections::BTreeMap, fs, path::Path};

/// Raw template text keyed by filename stem.
pub type Fragments = BTreeMap<String, String>;

/// The two template namespaces, read once per build.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    includes: Fragments,
    layouts: Fragments,
}

impl TemplateStore {
    /// Load both namespaces. A missing directory leaves its namespace empty.
    pub fn load(includes_dir: &Path, layouts_dir: &Path) -> Result<Self> {
        Ok(Self {
            includes: load_fragments(includes_dir)?,
            layouts: load_fragments(layouts_dir)?,
        })
    }

    pub const fn from_parts(includes: Fragments, layouts: Fragments) -> Self {
        Self { includes, layouts }
    }

    /// Look up an include by name; a trailing `.html` is ignored.
    pub fn include(&self, name: &str) -> Option<&str> {
        let name = name.strip_suffix(".html").unwrap_or(name);
        self.includes.get(name).map(String::as_str)
    }

    pub fn layout(&self, name: &str) -> Option<&str> {
        self.layouts.get(name).map(String::as_str)
    }

    pub fn include_count(&self) -> usize {
        self.includes.len()
    }

    pub fn layout_count(&self) -> usize {
        self.layouts.len()
    }
}

/// Read every `*.html` file directly inside `dir`.
fn load_fragments(dir: &Path) -> Result<Fragments> {
    let mut fragments = Fragments::new();

    for path in list_files(dir)? {
        if path.extension().is_none_or(|ext| ext != "html") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read template {}", path.display()))?;
        fragments.insert(stem.to_owned(), content);
    }

    Ok(fragments)
}

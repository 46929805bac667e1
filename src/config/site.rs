//! Site variables loaded from `_config.yml`.
//!
//! The file is not real YAML: only flat `key: value` lines are understood.
//!
//! ```text
//! # comment lines are skipped
//! title: Town of Wiley    # inline comments are stripped
//! baseurl: "/wiley"       # one layer of matching quotes is removed
//! url: ""                 # empty string
//! ```

use super::{defaults, error::ConfigError};
use regex::Regex;
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::Path,
    sync::LazyLock,
};

/// `key: value` line shared by the config file and front matter blocks.
pub static KEY_VALUE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_]+):(?-u:\s)*(.+)$").unwrap());

/// Global variables exposed to templates as `site.*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SiteConfig(BTreeMap<String, String>);

impl Default for SiteConfig {
    fn default() -> Self {
        defaults::site::VARIABLES
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }
}

impl FromIterator<(String, String)> for SiteConfig {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl SiteConfig {
    /// Parse the `key: value` dialect. Never fails; unknown lines are ignored.
    pub fn parse(content: &str) -> Self {
        let mut vars = BTreeMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some(caps) = KEY_VALUE_LINE.captures(line) else {
                continue;
            };
            vars.insert(caps[1].to_owned(), parse_value(&caps[2]));
        }

        Self(vars)
    }

    /// Load variables from a config file.
    ///
    /// Callers decide on the fallback: [`ConfigError::NotFound`] when the file
    /// is absent, [`ConfigError::Io`] when it exists but cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(ConfigError::NotFound(path.to_path_buf()))
            }
            Err(err) => Err(ConfigError::Io(path.to_path_buf(), err)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[allow(unused)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Normalize a raw config value: inline comment, quotes, empty literals.
fn parse_value(raw: &str) -> String {
    let mut value = raw.trim();

    if let Some(idx) = value.find(" #")
        && idx > 0
    {
        value = value[..idx].trim();
    }

    value = strip_matching_quotes(value);

    if value == "\"\"" || value == "''" {
        value = "";
    }

    value.to_owned()
}

/// Remove one layer of quotes when the value starts and ends with the same one.
fn strip_matching_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.starts_with(quote) && value.ends_with(quote) {
            return value
                .strip_prefix(quote)
                .and_then(|v| v.strip_suffix(quote))
                .unwrap_or_default();
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_basic() {
        let config = SiteConfig::parse("title: Test Town\nlang: en\n");
        assert_eq!(config.get("title"), Some("Test Town"));
        assert_eq!(config.get("lang"), Some("en"));
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let config = SiteConfig::parse("# heading\n\n   # indented comment\ntitle: A\nnot a pair\n");
        assert_eq!(config.len(), 1);
        assert_eq!(config.get("title"), Some("A"));
    }

    #[test]
    fn test_parse_inline_comment() {
        let config = SiteConfig::parse("title: Wiley # the town\nurl: http://x/#anchor\n");
        assert_eq!(config.get("title"), Some("Wiley"));
        // `#` without a leading space is part of the value
        assert_eq!(config.get("url"), Some("http://x/#anchor"));
    }

    #[test]
    fn test_parse_quotes() {
        let config = SiteConfig::parse(
            "a: \"double\"\nb: 'single'\nc: \"mixed'\nd: \"\"\ne: ''\nf: \"\"\"\"\n",
        );
        assert_eq!(config.get("a"), Some("double"));
        assert_eq!(config.get("b"), Some("single"));
        assert_eq!(config.get("c"), Some("\"mixed'"));
        assert_eq!(config.get("d"), Some(""));
        assert_eq!(config.get("e"), Some(""));
        assert_eq!(config.get("f"), Some(""));
    }

    #[test]
    fn test_parse_quoted_value_with_comment() {
        let config = SiteConfig::parse("baseurl: \"/wiley\" # subpath\n");
        assert_eq!(config.get("baseurl"), Some("/wiley"));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let config = SiteConfig::parse("title: First\ntitle: Second\n");
        assert_eq!(config.get("title"), Some("Second"));
        assert_eq!(config.len(), 1);
    }

    #[test]
    fn test_parse_requires_value() {
        let config = SiteConfig::parse("empty:\nkey-with-dash: x\n");
        assert!(config.is_empty());
    }

    #[test]
    fn test_default_variables() {
        let config = SiteConfig::default();
        assert_eq!(config.get("title"), Some("Town of Wiley"));
        assert_eq!(config.get("description"), Some("Official Website"));
        assert_eq!(config.get("baseurl"), Some(""));
        assert_eq!(config.get("url"), Some(""));
        assert_eq!(config.get("lang"), Some("en"));
    }

    #[test]
    fn test_from_path_missing() {
        let dir = tempdir().unwrap();
        let result = SiteConfig::from_path(&dir.path().join("_config.yml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_from_path_reads_file_without_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: Test Town\n").unwrap();

        let config = SiteConfig::from_path(&path).unwrap();
        assert_eq!(config.get("title"), Some("Test Town"));
        assert_eq!(config.get("lang"), None);
    }

    #[test]
    fn test_from_path_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let result = SiteConfig::from_path(dir.path());
        assert!(matches!(result, Err(ConfigError::Io(..))));
    }

    #[test]
    fn test_serializes_as_flat_map() {
        let config = SiteConfig::parse("title: T\n");
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["title"], "T");
    }
}

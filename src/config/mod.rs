//! Configuration management.
//!
//! Two layers:
//!
//! | Type            | Source                    | Purpose                                |
//! |-----------------|---------------------------|----------------------------------------|
//! | `BuilderConfig` | defaults + CLI flags      | source layout, output, dev server      |
//! | `SiteConfig`    | `_config.yml` in the root | `site.*` variables for templates       |

mod build;
pub mod defaults;
mod error;
mod serve;
mod site;

pub use build::BuildConfig;
pub use error::ConfigError;
pub use serve::ServeConfig;
pub use site::{KEY_VALUE_LINE, SiteConfig};

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

/// Settings for one generator invocation.
#[derive(Debug, Clone, Default)]
pub struct BuilderConfig {
    /// Source layout and output settings
    pub build: BuildConfig,

    /// Development server settings
    pub serve: ServeConfig,
}

impl BuilderConfig {
    /// Settings for a site rooted at `root` with the default layout.
    #[allow(unused)]
    pub fn with_root(root: &Path) -> Self {
        Self {
            build: BuildConfig::with_root(root),
            serve: ServeConfig::default(),
        }
    }

    /// Build settings from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = Self::default();
        config.update_with_cli(cli);
        config
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.build.root, cli.root.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.build.config = cli.config.clone();

        if let Some(args) = cli.build_args() {
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
        }

        if let Some(Commands::Serve {
            interface, port, ..
        }) = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
        }

        let root = Self::normalize_path(&self.build.root);
        self.build.rebase(&root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Reject output locations that a clean build would destroy the source with.
    pub fn validate(&self) -> Result<()> {
        let root = Self::normalize_path(&self.build.root);
        let output = Self::normalize_path(&self.build.output);

        if root.starts_with(&output) {
            bail!(ConfigError::Validation(format!(
                "output directory `{}` contains the site source",
                output.display()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    #[test]
    fn test_from_cli_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["jekyllish", "-r", root, "build"]).unwrap();
        let config = BuilderConfig::from_cli(&cli);

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.build.root, root);
        assert_eq!(config.build.output, root.join("_site"));
        assert_eq!(config.build.config, root.join("_config.yml"));
        assert!(!config.build.minify);
        assert_eq!(config.serve.port, 3000);
    }

    #[test]
    fn test_from_cli_serve_overrides() {
        let dir = tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from([
            "jekyllish", "-r", root, "-o", "public", "serve", "-i", "0.0.0.0", "-p", "8080",
            "--minify",
        ])
        .unwrap();
        let config = BuilderConfig::from_cli(&cli);

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.build.output, root.join("public"));
        assert_eq!(config.serve.interface, "0.0.0.0");
        assert_eq!(config.serve.port, 8080);
        assert!(config.build.minify);
    }

    #[test]
    fn test_validate_rejects_output_at_root() {
        let dir = tempdir().unwrap();
        let mut config = BuilderConfig::with_root(dir.path());
        assert!(config.validate().is_ok());

        config.build.output = dir.path().to_path_buf();
        assert!(config.validate().is_err());

        config.build.output = dir.path().parent().unwrap().to_path_buf();
        assert!(config.validate().is_err());
    }
}

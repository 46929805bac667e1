//! Build settings: where the site source lives and where output goes.

use super::defaults;
use educe::Educe;
use std::path::{Path, PathBuf};

/// Source layout and output settings.
///
/// All directories are relative to `root` until
/// [`BuilderConfig::update_with_cli`](super::BuilderConfig::update_with_cli)
/// normalizes them into absolute paths.
#[derive(Debug, Clone, Educe)]
#[educe(Default)]
pub struct BuildConfig {
    /// Site source directory.
    #[educe(Default = defaults::build::root())]
    pub root: PathBuf,

    /// Site variables file (`key: value` lines).
    #[educe(Default = defaults::build::config())]
    pub config: PathBuf,

    /// Generated site, wiped on every build.
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Partial fragments for `{% include name %}`.
    #[educe(Default = defaults::build::includes())]
    pub includes: PathBuf,

    /// Page wrappers selected by `layout:` front matter.
    #[educe(Default = defaults::build::layouts())]
    pub layouts: PathBuf,

    /// Flat directory of standalone pages.
    #[educe(Default = defaults::build::pages())]
    pub pages: PathBuf,

    /// Flat directory of `YYYY-MM-DD-slug.md` posts.
    #[educe(Default = defaults::build::posts())]
    pub posts: PathBuf,

    /// Static files copied verbatim.
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    /// Minify generated HTML.
    #[educe(Default = false)]
    pub minify: bool,
}

impl BuildConfig {
    /// Build settings rooted at `root`, with every directory resolved under it.
    pub fn with_root(root: &Path) -> Self {
        let mut config = Self::default();
        config.rebase(root);
        config
    }

    /// Join every relative directory onto `root`.
    pub(super) fn rebase(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        for dir in [
            &mut self.config,
            &mut self.output,
            &mut self.includes,
            &mut self.layouts,
            &mut self.pages,
            &mut self.posts,
            &mut self.assets,
        ] {
            *dir = root.join(&*dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.config, PathBuf::from("_config.yml"));
        assert_eq!(config.output, PathBuf::from("_site"));
        assert_eq!(config.includes, PathBuf::from("_includes"));
        assert_eq!(config.layouts, PathBuf::from("_layouts"));
        assert_eq!(config.pages, PathBuf::from("_pages"));
        assert_eq!(config.posts, PathBuf::from("_posts"));
        assert_eq!(config.assets, PathBuf::from("assets"));
        assert!(!config.minify);
    }

    #[test]
    fn test_with_root() {
        let config = BuildConfig::with_root(Path::new("/srv/site"));
        assert_eq!(config.root, PathBuf::from("/srv/site"));
        assert_eq!(config.output, PathBuf::from("/srv/site/_site"));
        assert_eq!(config.posts, PathBuf::from("/srv/site/_posts"));
    }
}

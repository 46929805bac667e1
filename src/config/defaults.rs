//! Default values for configuration fields.

// ============================================================================
// Site Variable Defaults
// ============================================================================

/// Site variables used when no config file can be read.
pub mod site {
    pub const VARIABLES: &[(&str, &str)] = &[
        ("title", "Town of Wiley"),
        ("description", "Official Website"),
        ("baseurl", ""),
        ("url", ""),
        ("lang", "en"),
    ];
}

// ============================================================================
// Build Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> PathBuf {
        "./".into()
    }

    pub fn config() -> PathBuf {
        "_config.yml".into()
    }

    pub fn output() -> PathBuf {
        "_site".into()
    }

    pub fn includes() -> PathBuf {
        "_includes".into()
    }

    pub fn layouts() -> PathBuf {
        "_layouts".into()
    }

    pub fn pages() -> PathBuf {
        "_pages".into()
    }

    pub fn posts() -> PathBuf {
        "_posts".into()
    }

    pub fn assets() -> PathBuf {
        "assets".into()
    }
}

// ============================================================================
// Serve Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub const fn port() -> u16 {
        3000
    }
}

//! Development server settings.

use super::defaults;
use educe::Educe;

/// Interface and port for `serve`.
#[derive(Debug, Clone, Educe)]
#[educe(Default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// HTTP port number (default: 3000).
    #[educe(Default = defaults::serve::port())]
    pub port: u16,
}

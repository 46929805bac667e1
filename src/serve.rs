//! Development server for the generated site.
//!
//! Serves files from the build output directory over plain HTTP using
//! `tiny_http`. There is no rebuild on change; restart `serve` to pick up
//! edits.
//!
//! ```text
//! GET /about.html?v=2
//!       │
//!       ├── percent-decode, drop query
//!       ├── "/" ──► "/index.html"
//!       ├── ".." segment ──► 404
//!       └── <output>/about.html
//!             ├── regular file ──► 200 + Content-Type by extension
//!             └── otherwise    ──► 404 "Not Found"
//! ```

use crate::{config::BuilderConfig, log};
use anyhow::{Context, Result, anyhow};
use std::{
    borrow::Cow,
    fs,
    net::{IpAddr, SocketAddr},
    path::{Component, Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Body of every 404 response.
const NOT_FOUND_BODY: &str = "Not Found";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Serve the output directory until Ctrl+C.
pub fn serve_site(config: &BuilderConfig) -> Result<()> {
    let interface: IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid interface address: {}", config.serve.interface))?;

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    let root = &config.build.output;
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, root) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// A response decided before touching the socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    fn not_found() -> Self {
        Self {
            status: 404,
            content_type: "text/plain",
            body: NOT_FOUND_BODY.into(),
        }
    }
}

fn handle_request(request: Request, root: &Path) -> Result<()> {
    let reply = respond(root, request.url());
    if reply.status != 200 {
        log!("serve"; "{} {}", reply.status, request.url());
    }

    let header = Header::from_bytes("Content-Type", reply.content_type)
        .map_err(|()| anyhow!("invalid content type: {}", reply.content_type))?;
    let response = Response::from_data(reply.body)
        .with_status_code(StatusCode(reply.status))
        .with_header(header);

    request.respond(response)?;
    Ok(())
}

/// Decide the reply for a request URL against the output directory.
pub fn respond(root: &Path, url: &str) -> Reply {
    let Some(path) = resolve_request_path(root, url) else {
        return Reply::not_found();
    };
    if !path.is_file() {
        return Reply::not_found();
    }

    match fs::read(&path) {
        Ok(body) => Reply {
            status: 200,
            content_type: guess_content_type(&path),
            body,
        },
        Err(e) => {
            log!("serve"; "failed to read {}: {e}", path.display());
            Reply::not_found()
        }
    }
}

/// Map a request URL onto a path under `root`.
///
/// `None` when the decoded path tries to leave `root`.
pub fn resolve_request_path(root: &Path, url: &str) -> Option<PathBuf> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let decoded = urlencoding::decode(path).unwrap_or(Cow::Borrowed(path));

    let relative = match decoded.trim_start_matches('/') {
        "" => "index.html",
        rest => rest,
    };

    let relative = Path::new(relative);
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return None;
    }

    Some(root.join(relative))
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Returns `text/plain` for unknown extensions.
pub fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html",
        Some("css") => "text/css",
        Some("js" | "mjs") => "text/javascript",
        Some("json") => "application/json",
        Some("xml") => "application/xml",

        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",

        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",

        Some("pdf") => "application/pdf",

        _ => "text/plain",
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Terminal output.
//!
//! Every line is `[module] message`. The module tag is colored by kind and
//! single-line messages are clipped so they never wrap.
//!
//! ```ignore
//! log!("content"; "{}", output.display());
//! log!("warn"; "{raw}: {err}");
//! ```

use colored::{ColoredString, Colorize};
use crossterm::terminal;
use std::{
    io::{Write, stdout},
    sync::OnceLock,
};

/// Columns assumed when the terminal size is unknown (pipes, CI).
const FALLBACK_WIDTH: usize = 120;

static WIDTH: OnceLock<usize> = OnceLock::new();

/// Write one `[module] message` line to stdout.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

pub fn log(module: &str, message: &str) {
    let width = *WIDTH.get_or_init(|| {
        terminal::size()
            .map(|(cols, _)| usize::from(cols))
            .unwrap_or(FALLBACK_WIDTH)
    });

    // error chains span several lines and are printed whole
    let message = if message.contains('\n') {
        message
    } else {
        clip(message, width.saturating_sub(tag_width(module)))
    };

    let mut out = stdout().lock();
    writeln!(out, "{} {message}", tag(module)).ok();
    out.flush().ok();
}

/// Display width of `[module] `.
const fn tag_width(module: &str) -> usize {
    module.len() + 3
}

fn tag(module: &str) -> ColoredString {
    let text = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "error" => text.bright_red().bold(),
        "warn" => text.bright_magenta().bold(),
        "serve" => text.bright_blue().bold(),
        "build" => text.bright_green().bold(),
        _ => text.bright_yellow().bold(),
    }
}

/// Longest prefix of `s` that fits in `max` bytes on a char boundary.
fn clip(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let end = (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0);
    &s[..end]
}

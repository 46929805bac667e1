//! Template dialect: `{{ expr }}` variables and `{% tag %}` directives.
//!
//! # Passes
//!
//! ```text
//! source ──tokenize──► [Literal | Variable | Tag]
//!                              │
//!        resolve_includes ─────┤  Include tags → fragment text, rest verbatim
//!        render ───────────────┘  Variables → values, tags removed
//! ```
//!
//! Rendering never fails: unknown paths and malformed expressions become
//! empty strings.

mod context;
mod expr;
mod parse;
mod store;

pub use context::PageContext;
pub use expr::{Expression, strip_quote_chars};
pub use parse::{Directive, Node, tokenize};
pub use store::{Fragments, TemplateStore};

use crate::log;
use serde_json::Value;

/// Replace every resolvable `{% include name %}` with the fragment's raw text.
///
/// Fragments are inserted verbatim: their own includes are not expanded and
/// their variables wait for [`render`]. Unresolved include tags are kept.
pub fn resolve_includes(source: &str, store: &TemplateStore) -> String {
    let mut out = String::with_capacity(source.len());
    for node in tokenize(source) {
        let fragment = match node {
            Node::Tag {
                directive: Directive::Include(name),
                ..
            } => store.include(name),
            _ => None,
        };
        out.push_str(fragment.unwrap_or(node.raw()));
    }
    out
}

/// Expand variables and strip tags.
pub fn render(source: &str, context: &Value) -> String {
    let mut out = String::with_capacity(source.len());
    for node in tokenize(source) {
        match node {
            Node::Literal(text) => out.push_str(text),
            Node::Variable { raw, expr } => match Expression::parse(expr) {
                Ok(expr) => out.push_str(&expr.evaluate(context)),
                Err(err) => log!("warn"; "{raw}: {err}"),
            },
            Node::Tag { .. } => {}
        }
    }
    out
}

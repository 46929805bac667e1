//! Expressions inside `{{ ... }}`.
//!
//! ```text
//! page.title | default: 'Untitled'
//! ^^^^^^^^^^   ^^^^^^^^^^^^^^^^^^^
//! head         filters (left to right)
//! ```
//!
//! The head is a dotted path into the page context or a quoted string
//! literal. Unknown filters are accepted and ignored.

use serde_json::Value;
use thiserror::Error;

/// Errors from parsing an expression. Rendering treats them as empty output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("empty expression")]
    Empty,

    #[error("empty path segment in `{0}`")]
    EmptySegment(String),

    #[error("unterminated string literal")]
    UnterminatedQuote,

    #[error("empty filter")]
    EmptyFilter,
}

/// Left side of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// `site.title` → `["site", "title"]`
    Path(Vec<String>),
    /// `'/assets/site.css'`
    Literal(String),
}

/// A `| filter` applied to the current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `default: 'X'` replaces undefined, null or empty values.
    Default(String),
    /// `relative_url` prefixes `site.baseurl` onto a string literal head.
    /// Ignored after a path head.
    RelativeUrl,
    /// Any other filter name, ignored.
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub head: Head,
    pub filters: Vec<Filter>,
}

impl Expression {
    pub fn parse(source: &str) -> Result<Self, ExprError> {
        let mut segments = split_pipes(source)?.into_iter();
        let head = segments.next().unwrap_or_default();
        let head = parse_head(head)?;
        let filters = segments.map(parse_filter).collect::<Result<_, _>>()?;
        Ok(Self { head, filters })
    }

    /// Evaluate against a context value and render the result as text.
    ///
    /// Undefined values render as an empty string.
    pub fn evaluate(&self, context: &Value) -> String {
        let (mut value, literal) = match &self.head {
            Head::Path(path) => (lookup(context, path).cloned(), false),
            Head::Literal(text) => (Some(Value::String(text.clone())), true),
        };

        for filter in &self.filters {
            value = filter.apply(value, context, literal);
        }

        match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text,
            Some(other) => other.to_string(),
        }
    }
}

impl Filter {
    fn apply(&self, value: Option<Value>, context: &Value, literal: bool) -> Option<Value> {
        match self {
            Self::Default(fallback) => match value {
                None | Some(Value::Null) => Some(Value::String(fallback.clone())),
                Some(Value::String(text)) if text.is_empty() => {
                    Some(Value::String(fallback.clone()))
                }
                value => value,
            },
            Self::RelativeUrl if !literal => value,
            Self::RelativeUrl => {
                let baseurl = context
                    .get("site")
                    .and_then(|site| site.get("baseurl"))
                    .and_then(Value::as_str)
                    .filter(|base| !base.is_empty());
                match (value, baseurl) {
                    (Some(Value::String(path)), Some(base)) => {
                        Some(Value::String(format!("{base}{path}")))
                    }
                    (value, _) => value,
                }
            }
            Self::Unknown(_) => value,
        }
    }
}

/// Follow a dotted path. A missing key or `null` anywhere yields `None`.
pub fn lookup<'v>(root: &'v Value, path: &[String]) -> Option<&'v Value> {
    path.iter()
        .try_fold(root, |current, key| match current.get(key.as_str()) {
            None | Some(Value::Null) => None,
            Some(next) => Some(next),
        })
}

/// Split on `|` outside of quotes.
///
/// A quote opens only at the start of a segment or right after `:`, and
/// closes only where the segment ends, so `'Town's Page'` is one string.
fn split_pipes(source: &str) -> Result<Vec<&str>, ExprError> {
    let mut segments = Vec::new();
    let mut quote = None;
    let mut start = 0;

    for (idx, ch) in source.char_indices() {
        match quote {
            None => match ch {
                '"' | '\'' if opens_quote(&source[start..idx]) => quote = Some(ch),
                '|' => {
                    segments.push(source[start..idx].trim());
                    start = idx + 1;
                }
                _ => {}
            },
            Some(open) if ch == open && closes_quote(&source[idx + 1..]) => quote = None,
            Some(_) => {}
        }
    }

    if quote.is_some() {
        return Err(ExprError::UnterminatedQuote);
    }
    segments.push(source[start..].trim());
    Ok(segments)
}

fn opens_quote(before: &str) -> bool {
    let before = before.trim_end();
    before.is_empty() || before.ends_with(':')
}

fn closes_quote(after: &str) -> bool {
    let after = after.trim_start();
    after.is_empty() || after.starts_with('|')
}

fn parse_head(head: &str) -> Result<Head, ExprError> {
    if head.is_empty() {
        return Err(ExprError::Empty);
    }

    for quote in ['"', '\''] {
        if let Some(rest) = head.strip_prefix(quote) {
            return rest
                .strip_suffix(quote)
                .map(|text| Head::Literal(text.to_owned()))
                .ok_or(ExprError::UnterminatedQuote);
        }
    }

    let path: Vec<String> = head.split('.').map(|s| s.trim().to_owned()).collect();
    if path.iter().any(String::is_empty) {
        return Err(ExprError::EmptySegment(head.to_owned()));
    }
    Ok(Head::Path(path))
}

fn parse_filter(segment: &str) -> Result<Filter, ExprError> {
    if segment.is_empty() {
        return Err(ExprError::EmptyFilter);
    }

    if let Some(arg) = segment.strip_prefix("default:") {
        return Ok(Filter::Default(strip_quote_chars(arg.trim()).to_owned()));
    }

    let name = segment.split(':').next().unwrap_or_default().trim();
    Ok(match name {
        "relative_url" => Filter::RelativeUrl,
        _ => Filter::Unknown(name.to_owned()),
    })
}

/// Drop one leading and one trailing quote character, independently.
pub fn strip_quote_chars(value: &str) -> &str {
    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}

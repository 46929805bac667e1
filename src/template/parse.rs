//! Tokenizer for the `{{ expr }}` / `{% tag %}` dialect.
//!
//! A template is split into a flat list of [`Node`]s. There is no nesting and
//! no escaping: a delimiter pair that is not properly closed is plain text.
//!
//! - `{{ inner }}` is a variable when `inner` is non-empty and has no `}`.
//! - `{% inner %}` is a tag when `inner` has no `%`.

/// One piece of a tokenized template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    /// Text copied through unchanged.
    Literal(&'a str),
    /// `{{ expr }}`; `raw` is the full source including braces.
    Variable { raw: &'a str, expr: &'a str },
    /// `{% directive %}`; `raw` is the full source including delimiters.
    Tag {
        raw: &'a str,
        directive: Directive<'a>,
    },
}

/// The body of a `{% ... %}` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `{% include name %}`
    Include(&'a str),
    /// Anything else, never evaluated.
    Other(&'a str),
}

impl<'a> Directive<'a> {
    fn parse(inner: &'a str) -> Self {
        let mut words = inner.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("include"), Some(name), None) => Self::Include(name),
            _ => Self::Other(inner),
        }
    }
}

impl Node<'_> {
    /// Source text of this node.
    pub fn raw(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Variable { raw, .. } | Self::Tag { raw, .. } => raw,
        }
    }
}

/// Split a template into nodes. Concatenating every [`Node::raw`] yields
/// the input unchanged.
pub fn tokenize(source: &str) -> Vec<Node<'_>> {
    let bytes = source.as_bytes();
    let mut nodes = Vec::new();
    let mut literal_start = 0;
    let mut pos = 0;

    while let Some(offset) = source[pos..].find('{') {
        let open = pos + offset;
        let scanned = match bytes.get(open + 1) {
            Some(b'{') => scan_variable(source, open),
            Some(b'%') => scan_tag(source, open),
            _ => None,
        };

        match scanned {
            Some((node, end)) => {
                if literal_start < open {
                    nodes.push(Node::Literal(&source[literal_start..open]));
                }
                nodes.push(node);
                literal_start = end;
                pos = end;
            }
            None => pos = open + 1,
        }
    }

    if literal_start < source.len() {
        nodes.push(Node::Literal(&source[literal_start..]));
    }

    nodes
}

/// Scan `{{ ... }}` starting at `open`. Returns the node and the end offset.
fn scan_variable(source: &str, open: usize) -> Option<(Node<'_>, usize)> {
    let inner_start = open + 2;
    let close = inner_start + source[inner_start..].find('}')?;
    if close == inner_start || !source[close..].starts_with("}}") {
        return None;
    }

    let end = close + 2;
    let node = Node::Variable {
        raw: &source[open..end],
        expr: source[inner_start..close].trim(),
    };
    Some((node, end))
}

/// Scan `{% ... %}` starting at `open`. Returns the node and the end offset.
fn scan_tag(source: &str, open: usize) -> Option<(Node<'_>, usize)> {
    let inner_start = open + 2;
    let close = inner_start + source[inner_start..].find('%')?;
    if !source[close..].starts_with("%}") {
        return None;
    }

    let end = close + 2;
    let node = Node::Tag {
        raw: &source[open..end],
        directive: Directive::parse(source[inner_start..close].trim()),
    };
    Some((node, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concat(nodes: &[Node<'_>]) -> String {
        nodes.iter().map(Node::raw).collect()
    }

    #[test]
    fn test_plain_text() {
        let nodes = tokenize("<p>hello</p>");
        assert_eq!(nodes, vec![Node::Literal("<p>hello</p>")]);
    }

    #[test]
    fn test_variable_and_literals() {
        let nodes = tokenize("<h1>{{ site.title }}</h1>");
        assert_eq!(
            nodes,
            vec![
                Node::Literal("<h1>"),
                Node::Variable {
                    raw: "{{ site.title }}",
                    expr: "site.title"
                },
                Node::Literal("</h1>"),
            ]
        );
    }

    #[test]
    fn test_include_tag() {
        let nodes = tokenize("{% include header.html %}");
        assert_eq!(
            nodes,
            vec![Node::Tag {
                raw: "{% include header.html %}",
                directive: Directive::Include("header.html"),
            }]
        );
    }

    #[test]
    fn test_other_tags() {
        let nodes = tokenize("a{% seo %}b{%%}c{% include a b %}");
        let directives: Vec<_> = nodes
            .iter()
            .filter_map(|n| match n {
                Node::Tag { directive, .. } => Some(*directive),
                _ => None,
            })
            .collect();
        assert_eq!(
            directives,
            vec![
                Directive::Other("seo"),
                Directive::Other(""),
                Directive::Other("include a b"),
            ]
        );
    }

    #[test]
    fn test_unclosed_delimiters_are_literal() {
        for source in ["{{ open", "{% open", "{{ a } b }}", "{% 50% off %}", "{{}}", "{ x }"] {
            let nodes = tokenize(source);
            assert!(
                nodes.iter().all(|n| matches!(n, Node::Literal(_))),
                "{source} should be literal: {nodes:?}"
            );
            assert_eq!(concat(&nodes), source);
        }
    }

    #[test]
    fn test_whitespace_only_variable() {
        let nodes = tokenize("{{ }}");
        assert_eq!(
            nodes,
            vec![Node::Variable {
                raw: "{{ }}",
                expr: ""
            }]
        );
    }

    #[test]
    fn test_roundtrip_raw() {
        let source = "x {{ a | default: 'b' }} {% if x %}{{ content }}{% endif %} {y}";
        assert_eq!(concat(&tokenize(source)), source);
    }

    #[test]
    fn test_multibyte_text() {
        let nodes = tokenize("café {{ page.title }} ✓");
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[2], Node::Literal(" ✓"));
    }
}

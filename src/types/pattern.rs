use std::fmt;

use super::link::Href;

/// One piece of a compiled URL component pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Part {
    Literal(String),
    /// `*`: any sequence of characters, including `/` and the empty string.
    Wildcard,
    /// `:name`: one non-empty run of characters without `/`.
    Segment,
}

/// Pattern for a single URL component (pathname, search or hash).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ComponentPattern {
    pub(crate) parts: Vec<Part>,
}

impl ComponentPattern {
    pub(crate) fn new(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    /// A pattern equivalent to `*`.
    pub(crate) fn any() -> Self {
        Self {
            parts: vec![Part::Wildcard],
        }
    }

    pub(crate) fn matches(&self, input: &str) -> bool {
        match_parts(&self.parts, input)
    }
}

/// Tracks every byte offset of `input` the parts consumed so far can end at.
/// Each part is one pass over the input, so matching is linear in
/// `parts.len() * input.len()` whatever the number of wildcards.
fn match_parts(parts: &[Part], input: &str) -> bool {
    let mut reachable = vec![false; input.len() + 1];
    reachable[0] = true;

    for part in parts {
        let mut next = vec![false; input.len() + 1];
        match part {
            Part::Literal(lit) => {
                for (i, _) in input.char_indices() {
                    if reachable[i] && input[i..].starts_with(lit.as_str()) {
                        next[i + lit.len()] = true;
                    }
                }
            }
            Part::Wildcard => {
                let mut open = false;
                for i in boundaries(input) {
                    open |= reachable[i];
                    next[i] = open;
                }
            }
            Part::Segment => {
                let mut open = false;
                for (i, c) in input.char_indices() {
                    if c == '/' {
                        open = false;
                        continue;
                    }
                    open |= reachable[i];
                    if open {
                        next[i + c.len_utf8()] = true;
                    }
                }
            }
        }
        if !next.contains(&true) {
            return false;
        }
        reachable = next;
    }

    reachable[input.len()]
}

fn boundaries(input: &str) -> impl Iterator<Item = usize> + '_ {
    input
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(input.len()))
}

/// A parsed `href_matches` pattern.
///
/// Supports an optional `scheme://host` origin, then pathname, `?search` and
/// `#hash` components built from literals, `*` and `:name` groups. An omitted
/// search or hash component matches anything. Patterns without an origin only
/// match same-origin links; no pattern matches a non-`http(s)` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPattern {
    pub(crate) source: String,
    pub(crate) origin: Option<String>,
    pub(crate) pathname: ComponentPattern,
    pub(crate) search: Option<ComponentPattern>,
    pub(crate) hash: Option<ComponentPattern>,
}

impl UrlPattern {
    /// Parse a pattern string.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`](crate::ParseError) if the pattern is malformed.
    pub fn parse(pattern: &str) -> Result<Self, crate::ParseError> {
        crate::parse::parse_pattern(pattern)
    }

    /// The pattern text as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Test a link URL against this pattern. `same_origin` says whether the
    /// URL belongs to the document's own origin.
    #[must_use]
    pub fn matches(&self, href: &Href, same_origin: bool) -> bool {
        let origin_ok = match &self.origin {
            None => same_origin,
            Some(expected) => *expected == href.origin(),
        };
        href.is_http()
            && origin_ok
            && self.pathname.matches(href.pathname())
            && self.search.as_ref().is_none_or(|p| p.matches(href.search()))
            && self.hash.as_ref().is_none_or(|p| p.matches(href.hash()))
    }
}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

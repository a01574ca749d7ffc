use std::fmt;
use std::ops::Not;

use serde::{Deserialize, Serialize};

use super::pattern::UrlPattern;
use super::selector::SelectorList;

/// User-facing predicate tree. Serializes to the host's `where` object:
/// `{"and": [...]}`, `{"or": [...]}`, `{"not": {...}}`,
/// `{"href_matches": "..."}`, `{"selector_matches": "..."}`.
///
/// Patterns and selectors are kept as strings; they are parsed into
/// [`CompiledPredicate`] by [`RuleSet::compile()`](super::RuleSet::compile).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    HrefMatches(String),
    SelectorMatches(String),
}

/// Predicate with every pattern and selector parsed and ready to match.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CompiledPredicate {
    And(Vec<CompiledPredicate>),
    Or(Vec<CompiledPredicate>),
    Not(Box<CompiledPredicate>),
    Href(UrlPattern),
    Selector(SelectorList),
}

impl Predicate {
    /// Conjunction of every predicate in `items`.
    #[must_use]
    pub fn all(items: impl IntoIterator<Item = Predicate>) -> Predicate {
        Predicate::And(items.into_iter().collect())
    }

    /// Disjunction of every predicate in `items`.
    #[must_use]
    pub fn any(items: impl IntoIterator<Item = Predicate>) -> Predicate {
        Predicate::Or(items.into_iter().collect())
    }

    /// `self AND other`. Appends to `self` when it is already an `and` list,
    /// so chained calls produce one flat list.
    #[must_use]
    pub fn and(self, other: Predicate) -> Predicate {
        match self {
            Predicate::And(mut items) => {
                items.push(other);
                Predicate::And(items)
            }
            first => Predicate::And(vec![first, other]),
        }
    }

    /// `self OR other`, flattened like [`and`](Self::and).
    #[must_use]
    pub fn or(self, other: Predicate) -> Predicate {
        match self {
            Predicate::Or(mut items) => {
                items.push(other);
                Predicate::Or(items)
            }
            first => Predicate::Or(vec![first, other]),
        }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Predicate::And(items) | Predicate::Or(items) => {
                1 + items.iter().map(Predicate::node_count).sum::<usize>()
            }
            Predicate::Not(inner) => 1 + inner.node_count(),
            Predicate::HrefMatches(_) | Predicate::SelectorMatches(_) => 1,
        }
    }
}

impl Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Predicate {
        Predicate::Not(Box::new(self))
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Predicate], op: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " {op} ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, ")")
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::And(items) => write_joined(f, items, "AND"),
            Predicate::Or(items) => write_joined(f, items, "OR"),
            Predicate::Not(inner) => write!(f, "NOT {inner}"),
            Predicate::HrefMatches(pattern) => write!(f, "href_matches {pattern:?}"),
            Predicate::SelectorMatches(selector) => write!(f, "selector_matches {selector:?}"),
        }
    }
}

#[must_use]
pub fn href_matches(pattern: &str) -> Predicate {
    Predicate::HrefMatches(pattern.to_owned())
}

#[must_use]
pub fn selector_matches(selector: &str) -> Predicate {
    Predicate::SelectorMatches(selector.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_matches_creates_leaf() {
        assert_eq!(href_matches("/*"), Predicate::HrefMatches("/*".to_owned()));
    }

    #[test]
    fn and_chaining_stays_flat() {
        let p = href_matches("/*")
            .and(!href_matches("/logout"))
            .and(!href_matches("/signout"));
        match p {
            Predicate::And(items) => assert_eq!(items.len(), 3),
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn or_chaining_stays_flat() {
        let p = href_matches("/a").or(href_matches("/b")).or(href_matches("/c"));
        match p {
            Predicate::Or(items) => assert_eq!(items.len(), 3),
            other => panic!("expected Or, got {other:?}"),
        }
    }

    #[test]
    fn and_of_or_nests() {
        let p = href_matches("/a").or(href_matches("/b")).and(href_matches("/c"));
        match p {
            Predicate::And(items) => {
                assert!(matches!(items[0], Predicate::Or(_)));
                assert_eq!(items[1], href_matches("/c"));
            }
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn not_wraps() {
        let p = !selector_matches("[data-no-prefetch]");
        assert_eq!(
            p,
            Predicate::Not(Box::new(Predicate::SelectorMatches(
                "[data-no-prefetch]".to_owned()
            )))
        );
    }

    #[test]
    fn display_infix() {
        let p = href_matches("/*").and(!selector_matches(".x"));
        assert_eq!(
            p.to_string(),
            r#"(href_matches "/*" AND NOT selector_matches ".x")"#
        );
    }

    #[test]
    fn node_count_counts_every_node() {
        let p = Predicate::all([href_matches("/*"), !href_matches("/logout")]);
        assert_eq!(p.node_count(), 4);
    }

    #[test]
    fn serializes_to_host_shape() {
        let p = href_matches("/*").and(!href_matches("/logout"));
        assert_eq!(
            serde_json::to_string(&p).unwrap(),
            r#"{"and":[{"href_matches":"/*"},{"not":{"href_matches":"/logout"}}]}"#
        );
    }
}

use std::fmt;

use super::link::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttrOp {
    /// `[attr=value]`
    Equals,
    /// `[attr~=value]`
    Includes,
    /// `[attr^=value]`
    Prefix,
    /// `[attr$=value]`
    Suffix,
    /// `[attr*=value]`
    Substring,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttrSelector {
    pub(crate) name: String,
    pub(crate) test: Option<(AttrOp, String)>,
}

impl AttrSelector {
    fn matches(&self, element: &Element) -> bool {
        let Some(actual) = element.get_attr(&self.name) else {
            return false;
        };
        match &self.test {
            None => true,
            Some((AttrOp::Equals, v)) => actual == v,
            Some((AttrOp::Includes, v)) => {
                !v.is_empty() && actual.split_ascii_whitespace().any(|word| word == v)
            }
            Some((AttrOp::Prefix, v)) => !v.is_empty() && actual.starts_with(v.as_str()),
            Some((AttrOp::Suffix, v)) => !v.is_empty() && actual.ends_with(v.as_str()),
            Some((AttrOp::Substring, v)) => !v.is_empty() && actual.contains(v.as_str()),
        }
    }
}

/// A compound selector such as `a.nav[data-x]`. `tag == None` is `*`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Compound {
    pub(crate) tag: Option<String>,
    pub(crate) ids: Vec<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: Vec<AttrSelector>,
}

impl Compound {
    pub(crate) fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.ids.is_empty()
            && self.classes.is_empty()
            && self.attributes.is_empty()
    }

    fn matches(&self, element: &Element) -> bool {
        self.tag
            .as_deref()
            .is_none_or(|tag| tag.eq_ignore_ascii_case(element.tag()))
            && self.ids.iter().all(|id| element.id() == Some(id.as_str()))
            && self
                .classes
                .iter()
                .all(|class| element.classes().any(|c| c == class))
            && self.attributes.iter().all(|attr| attr.matches(element))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Combinator {
    Descendant,
    Child,
}

/// A complex selector stored subject-first: `subject` matches the link
/// element, and `chain` walks outward through its ancestors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ComplexSelector {
    pub(crate) subject: Compound,
    pub(crate) chain: Vec<(Combinator, Compound)>,
}

impl ComplexSelector {
    fn matches(&self, element: &Element, ancestors: &[Element]) -> bool {
        self.subject.matches(element) && match_chain(&self.chain, ancestors)
    }
}

fn match_chain(chain: &[(Combinator, Compound)], ancestors: &[Element]) -> bool {
    let Some(((combinator, compound), rest)) = chain.split_first() else {
        return true;
    };
    match combinator {
        Combinator::Child => ancestors.split_first().is_some_and(|(parent, outer)| {
            compound.matches(parent) && match_chain(rest, outer)
        }),
        Combinator::Descendant => (0..ancestors.len())
            .any(|i| compound.matches(&ancestors[i]) && match_chain(rest, &ancestors[i + 1..])),
    }
}

/// A parsed `selector_matches` selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    pub(crate) source: String,
    pub(crate) selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Parse a selector list.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`](crate::ParseError) for syntax outside the
    /// supported subset.
    pub fn parse(selector: &str) -> Result<Self, crate::ParseError> {
        crate::parse::parse_selector(selector)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True when any selector in the list matches `element`, given its
    /// ancestors nearest first.
    #[must_use]
    pub fn matches(&self, element: &Element, ancestors: &[Element]) -> bool {
        self.selectors
            .iter()
            .any(|selector| selector.matches(element, ancestors))
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(selector: &str, element: &Element, ancestors: &[Element]) -> bool {
        SelectorList::parse(selector)
            .unwrap()
            .matches(element, ancestors)
    }

    #[test]
    fn attribute_presence() {
        let marked = Element::new("a").attr("data-no-prefetch", "");
        let plain = Element::new("a");
        assert!(matches("[data-no-prefetch]", &marked, &[]));
        assert!(!matches("[data-no-prefetch]", &plain, &[]));
    }

    #[test]
    fn attribute_operators() {
        let el = Element::new("a").attr("rel", "nofollow external").attr("href", "/goals/1");
        assert!(matches("[rel~=external]", &el, &[]));
        assert!(!matches("[rel~=ext]", &el, &[]));
        assert!(matches("[href^='/goals']", &el, &[]));
        assert!(matches("[href$=\"/1\"]", &el, &[]));
        assert!(matches("[href*=als]", &el, &[]));
        assert!(matches("[href='/goals/1']", &el, &[]));
        assert!(!matches("[href^='']", &el, &[]));
    }

    #[test]
    fn tag_id_and_class() {
        let el = Element::new("a").attr("id", "cta").class("button").class("big");
        assert!(matches("a#cta.button.big", &el, &[]));
        assert!(matches("A", &el, &[]));
        assert!(matches("*", &el, &[]));
        assert!(!matches("button", &el, &[]));
        assert!(!matches(".small", &el, &[]));
    }

    #[test]
    fn descendant_combinator_searches_all_ancestors() {
        let el = Element::new("a");
        let ancestors = [Element::new("li"), Element::new("ul"), Element::new("nav")];
        assert!(matches("nav a", &el, &ancestors));
        assert!(matches("nav ul a", &el, &ancestors));
        assert!(!matches("footer a", &el, &ancestors));
    }

    #[test]
    fn child_combinator_checks_parent_only() {
        let el = Element::new("a");
        let ancestors = [Element::new("li"), Element::new("nav")];
        assert!(matches("li > a", &el, &ancestors));
        assert!(!matches("nav > a", &el, &ancestors));
        assert!(matches("nav > li > a", &el, &ancestors));
    }

    #[test]
    fn selector_list_matches_any() {
        let el = Element::new("a").class("logout");
        assert!(matches("[data-no-prefetch], .logout", &el, &[]));
    }
}

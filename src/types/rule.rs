use std::fmt;

use serde::{Deserialize, Serialize};

use super::eagerness::Eagerness;
use super::predicate::{CompiledPredicate, Predicate};

/// What the host does with a link that matches a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Prefetch,
    Prerender,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::Prefetch, Action::Prerender];

    /// The key of this action's list in the JSON rule set.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Prefetch => "prefetch",
            Action::Prerender => "prerender",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a rule inside a [`RuleSet`](super::RuleSet), e.g. `prefetch[0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId {
    pub action: Action,
    pub index: usize,
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.action, self.index)
    }
}

/// A document rule: which links qualify (`where`) and how eagerly the host
/// should act on them.
///
/// `tag` and `referrer_policy` are passed through to the host and left out of
/// the JSON when unset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeculationRule {
    #[serde(rename = "where")]
    pub predicate: Predicate,
    #[serde(default)]
    pub eagerness: Eagerness,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer_policy: Option<String>,
}

impl SpeculationRule {
    /// A rule with the default (`conservative`) eagerness.
    #[must_use]
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            eagerness: Eagerness::default(),
            tag: None,
            referrer_policy: None,
        }
    }

    #[must_use]
    pub fn eagerness(mut self, eagerness: Eagerness) -> Self {
        self.eagerness = eagerness;
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_owned());
        self
    }

    #[must_use]
    pub fn referrer_policy(mut self, policy: &str) -> Self {
        self.referrer_policy = Some(policy.to_owned());
        self
    }
}

/// A rule whose predicate has been parsed and validated.
#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) id: RuleId,
    pub(crate) predicate: CompiledPredicate,
    pub(crate) eagerness: Eagerness,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::href_matches;

    #[test]
    fn rule_id_display() {
        let id = RuleId {
            action: Action::Prerender,
            index: 2,
        };
        assert_eq!(id.to_string(), "prerender[2]");
    }

    #[test]
    fn new_rule_is_conservative() {
        let rule = SpeculationRule::new(href_matches("/goals"));
        assert_eq!(rule.eagerness, Eagerness::Conservative);
        assert!(rule.tag.is_none());
    }

    #[test]
    fn optional_fields_are_omitted() {
        let rule = SpeculationRule::new(href_matches("/goals")).eagerness(Eagerness::Eager);
        assert_eq!(
            serde_json::to_string(&rule).unwrap(),
            r#"{"where":{"href_matches":"/goals"},"eagerness":"eager"}"#
        );
    }

    #[test]
    fn optional_fields_are_written_when_set() {
        let rule = SpeculationRule::new(href_matches("/goals"))
            .tag("goals")
            .referrer_policy("no-referrer");
        assert_eq!(
            serde_json::to_string(&rule).unwrap(),
            r#"{"where":{"href_matches":"/goals"},"eagerness":"conservative","tag":"goals","referrer_policy":"no-referrer"}"#
        );
    }
}

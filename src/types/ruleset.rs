use std::fmt;

use serde::{Deserialize, Serialize};

use super::eagerness::Eagerness;
use super::error::CompileError;
use super::evaluation_report::EvaluationReport;
use super::link::Link;
use super::predicate::{href_matches, selector_matches};
use super::rule::{Action, CompiledRule, SpeculationRule};
use super::verdict::Verdict;
use crate::serial::SerializedRuleSet;

/// Builder for constructing a [`RuleSet`].
///
/// # Example
///
/// ```
/// use specrules::{Eagerness, RuleSetBuilder, SpeculationRule, href_matches};
///
/// let rules = RuleSetBuilder::new()
///     .prefetch(SpeculationRule::new(href_matches("/*")).eagerness(Eagerness::Moderate))
///     .prerender(SpeculationRule::new(href_matches("/goals")).eagerness(Eagerness::Eager))
///     .build();
/// assert_eq!(rules.prefetch().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    prefetch: Vec<SpeculationRule>,
    prerender: Vec<SpeculationRule>,
}

impl RuleSetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a prefetch rule.
    #[must_use]
    pub fn prefetch(mut self, rule: SpeculationRule) -> Self {
        self.prefetch.push(rule);
        self
    }

    /// Append a prerender rule.
    #[must_use]
    pub fn prerender(mut self, rule: SpeculationRule) -> Self {
        self.prerender.push(rule);
        self
    }

    /// Append a rule to the list for `action`.
    #[must_use]
    pub fn rule(self, action: Action, rule: SpeculationRule) -> Self {
        match action {
            Action::Prefetch => self.prefetch(rule),
            Action::Prerender => self.prerender(rule),
        }
    }

    #[must_use]
    pub fn build(self) -> RuleSet {
        RuleSet {
            prefetch: self.prefetch,
            prerender: self.prerender,
        }
    }
}

/// A declarative speculation rule set: ordered prefetch and prerender rules.
///
/// The value is immutable once built. It serializes to the host JSON format
/// with [`to_json()`](Self::to_json) and is checked and made matchable by
/// [`compile()`](Self::compile).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
    #[serde(default)]
    prefetch: Vec<SpeculationRule>,
    #[serde(default)]
    prerender: Vec<SpeculationRule>,
}

impl RuleSet {
    #[must_use]
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::new()
    }

    /// The site's rule set.
    ///
    /// Prefetch, with moderate eagerness, every same-origin link except the
    /// logout and signout endpoints and links marked `data-no-prefetch`.
    /// Prerender `/goals` eagerly.
    #[must_use]
    pub fn standard() -> Self {
        RuleSetBuilder::new()
            .prefetch(
                SpeculationRule::new(
                    href_matches("/*")
                        .and(!href_matches("/logout"))
                        .and(!href_matches("/signout"))
                        .and(!selector_matches("[data-no-prefetch]")),
                )
                .eagerness(Eagerness::Moderate),
            )
            .prerender(SpeculationRule::new(href_matches("/goals")).eagerness(Eagerness::Eager))
            .build()
    }

    #[must_use]
    pub fn prefetch(&self) -> &[SpeculationRule] {
        &self.prefetch
    }

    #[must_use]
    pub fn prerender(&self) -> &[SpeculationRule] {
        &self.prerender
    }

    #[must_use]
    pub fn rules(&self, action: Action) -> &[SpeculationRule] {
        match action {
            Action::Prefetch => &self.prefetch,
            Action::Prerender => &self.prerender,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefetch.is_empty() && self.prerender.is_empty()
    }

    /// Parse every pattern and selector and validate the predicate trees.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] for an empty `and`/`or` list or a pattern or
    /// selector that does not parse.
    pub fn compile(&self) -> Result<CompiledRuleSet, CompileError> {
        crate::compile::compile(self)
    }

    /// Serialize to compact JSON in the host format.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if encoding fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        crate::serial::encode(self, false)
    }

    /// Serialize to indented JSON in the host format.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if encoding fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        crate::serial::encode(self, true)
    }

    /// Serialize to the value handed to a [`RuleSink`](crate::RuleSink).
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if encoding fails.
    pub fn to_serialized(&self) -> Result<SerializedRuleSet, serde_json::Error> {
        self.to_json().map(SerializedRuleSet::new)
    }

    /// Parse a JSON rule set in the host format and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`SpecrulesError`](crate::SpecrulesError) on malformed JSON or
    /// compile failure.
    pub fn from_json(input: &str) -> Result<Self, crate::SpecrulesError> {
        crate::serial::decode(input)
    }

    /// Read a JSON rule set file.
    ///
    /// # Errors
    ///
    /// Returns [`SpecrulesError`](crate::SpecrulesError) on I/O, JSON or
    /// compile failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::SpecrulesError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json(&input)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RuleSet({} prefetch, {} prerender)",
            self.prefetch.len(),
            self.prerender.len(),
        )
    }
}

/// A validated rule set ready to match links. Immutable and thread-safe; can
/// live behind `Arc`.
#[derive(Debug, Clone)]
pub struct CompiledRuleSet {
    pub(crate) source: RuleSet,
    pub(crate) prefetch: Vec<CompiledRule>,
    pub(crate) prerender: Vec<CompiledRule>,
}

impl CompiledRuleSet {
    /// The declarative rule set this was compiled from.
    #[must_use]
    pub fn rule_set(&self) -> &RuleSet {
        &self.source
    }

    /// True when any rule of `action` matches `link`.
    #[must_use]
    pub fn matches(&self, action: Action, link: &Link) -> bool {
        crate::evaluate::strongest(self.compiled(action), link).is_some()
    }

    /// The strongest eagerness per action among the rules matching `link`.
    pub fn evaluate(&self, link: &Link) -> Verdict {
        crate::evaluate::evaluate(&self.prefetch, &self.prerender, link)
    }

    /// Evaluate with diagnostics: matching rule ids and timing.
    pub fn evaluate_detailed(&self, link: &Link) -> EvaluationReport {
        crate::evaluate::evaluate_detailed(&self.prefetch, &self.prerender, link)
    }

    fn compiled(&self, action: Action) -> &[CompiledRule] {
        match action {
            Action::Prefetch => &self.prefetch,
            Action::Prerender => &self.prerender,
        }
    }
}

impl fmt::Display for CompiledRuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Compiled{}", self.source)
    }
}

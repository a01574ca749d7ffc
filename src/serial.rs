//! JSON encoding of rule sets in the host's speculation rules format.
//!
//! ## Format
//!
//! ```text
//! {
//!   "prefetch":  [ { "where": <predicate>, "eagerness": "moderate" } ],
//!   "prerender": [ { "where": <predicate>, "eagerness": "eager" } ]
//! }
//!
//! <predicate> := { "and": [<predicate>, ...] }
//!              | { "or": [<predicate>, ...] }
//!              | { "not": <predicate> }
//!              | { "href_matches": "<pattern>" }
//!              | { "selector_matches": "<selector>" }
//! ```
//!
//! Encoding is deterministic: keys are always written in the order above and
//! both lists are always present. Decoding accepts missing lists and a missing
//! `eagerness` (`conservative`), and rejects unknown keys.

use std::fmt;

use crate::types::RuleSet;
use crate::SpecrulesError;

/// The `type` attribute of the script element the host reads rules from.
pub const SCRIPT_TYPE: &str = "speculationrules";

pub(crate) fn encode(rules: &RuleSet, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(rules)
    } else {
        serde_json::to_string(rules)
    }
}

pub(crate) fn decode(input: &str) -> Result<RuleSet, SpecrulesError> {
    let rules: RuleSet = serde_json::from_str(input)?;
    rules.compile()?;
    Ok(rules)
}

/// The JSON text of a rule set, as handed to a [`RuleSink`](crate::RuleSink).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerializedRuleSet(String);

impl SerializedRuleSet {
    pub(crate) fn new(json: String) -> Self {
        Self(json)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// The text to place inside the script element. Every `<` is written as
    /// `\u003c`, which keeps the JSON equivalent and stops it from closing
    /// the element early.
    #[must_use]
    pub fn script_text(&self) -> String {
        self.0.replace('<', "\\u003c")
    }

    /// The full `<script type="speculationrules">` element.
    #[must_use]
    pub fn script_tag(&self) -> String {
        format!(
            "<script type=\"{SCRIPT_TYPE}\">{}</script>",
            self.script_text()
        )
    }

    /// Parse the JSON back into a [`RuleSet`].
    ///
    /// # Errors
    ///
    /// Returns [`SpecrulesError`] on malformed JSON or compile failure.
    pub fn parse(&self) -> Result<RuleSet, SpecrulesError> {
        decode(&self.0)
    }
}

impl AsRef<str> for SerializedRuleSet {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SerializedRuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

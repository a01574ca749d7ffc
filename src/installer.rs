use thiserror::Error;

use crate::capability::{FeatureDetector, SPECULATION_RULES_FEATURE};
use crate::serial::SerializedRuleSet;
use crate::sink::{PublishError, RuleSink};
use crate::{CompileError, RuleSet};

/// Outcome of an install.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Installation {
    /// The host does not support speculation rules; nothing was attached.
    Skipped,
    /// The rule set was attached. Holds the JSON that was published.
    Published(SerializedRuleSet),
}

impl Installation {
    #[must_use]
    pub fn is_published(&self) -> bool {
        matches!(self, Installation::Published(_))
    }
}

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("refusing to install invalid speculation rules: {0}")]
    Compile(#[from] CompileError),

    #[error("failed to encode speculation rules: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// The rule set attached on every page load. Pure and deterministic.
#[must_use]
pub fn build_rule_set() -> RuleSet {
    RuleSet::standard()
}

/// Attach the standard rule set to `sink` if `detector` reports support for
/// speculation rules. Run once per page load.
///
/// # Errors
///
/// Returns [`InstallError`] when encoding fails or the sink refuses the rule
/// set. An unsupported host is not an error.
///
/// # Example
///
/// ```
/// use specrules::{Document, install};
///
/// let mut document = Document::new();
/// let outcome = install(&true, &mut document).unwrap();
/// assert!(outcome.is_published());
/// assert_eq!(document.speculation_rules().count(), 1);
/// ```
pub fn install<D, S>(detector: &D, sink: &mut S) -> Result<Installation, InstallError>
where
    D: FeatureDetector + ?Sized,
    S: RuleSink + ?Sized,
{
    install_rules(&build_rule_set(), detector, sink)
}

/// Same as [`install`] with a caller-supplied rule set. The rule set is
/// compiled first; nothing reaches the sink unless it compiles.
///
/// # Errors
///
/// Returns [`InstallError`] when the rule set does not compile, encoding
/// fails or the sink refuses the rule set.
pub fn install_rules<D, S>(
    rules: &RuleSet,
    detector: &D,
    sink: &mut S,
) -> Result<Installation, InstallError>
where
    D: FeatureDetector + ?Sized,
    S: RuleSink + ?Sized,
{
    if !detector.supports(SPECULATION_RULES_FEATURE) {
        tracing::debug!("speculation rules unsupported; skipping install");
        return Ok(Installation::Skipped);
    }

    if let Err(e) = rules.compile() {
        tracing::warn!(error = %e, "invalid speculation rules not attached");
        return Err(e.into());
    }

    let serialized = rules.to_serialized()?;
    tracing::debug!(
        bytes = serialized.as_str().len(),
        prefetch = rules.prefetch().len(),
        prerender = rules.prerender().len(),
        "publishing speculation rules"
    );

    if let Err(e) = sink.publish(serialized.clone()) {
        tracing::warn!(error = %e, "speculation rules not attached");
        return Err(e.into());
    }
    Ok(Installation::Published(serialized))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{href_matches, Document, Predicate, SpeculationRule, StaticFeatures};

    #[test]
    fn unsupported_host_is_a_no_op() {
        let mut sink: Vec<SerializedRuleSet> = Vec::new();
        let outcome = install(&false, &mut sink).unwrap();
        assert_eq!(outcome, Installation::Skipped);
        assert!(sink.is_empty());
    }

    #[test]
    fn supported_host_gets_one_block() {
        let mut sink: Vec<SerializedRuleSet> = Vec::new();
        let outcome = install(&true, &mut sink).unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(outcome, Installation::Published(sink[0].clone()));
        assert_eq!(sink[0].parse().unwrap(), build_rule_set());
    }

    #[test]
    fn detector_is_asked_for_speculationrules() {
        let asked = Cell::new(None);
        let detector = |name: &str| {
            asked.set(Some(name.to_owned()));
            false
        };
        let mut sink: Vec<SerializedRuleSet> = Vec::new();
        let _ = install(&detector, &mut sink).unwrap();
        assert_eq!(asked.take().as_deref(), Some("speculationrules"));
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let features = StaticFeatures::new().with(SPECULATION_RULES_FEATURE);
        let mut first: Vec<SerializedRuleSet> = Vec::new();
        let mut second: Vec<SerializedRuleSet> = Vec::new();
        let _ = install(&features, &mut first).unwrap();
        let _ = install(&features, &mut second).unwrap();
        assert_eq!(first[0].as_str(), second[0].as_str());
    }

    #[test]
    fn second_install_on_document_is_refused() {
        let mut doc = Document::new();
        assert!(install(&true, &mut doc).unwrap().is_published());
        let err = install(&true, &mut doc).unwrap_err();
        assert!(matches!(
            err,
            InstallError::Publish(PublishError::AlreadyAttached)
        ));
        assert_eq!(doc.speculation_rules().count(), 1);
    }

    #[test]
    fn install_custom_rules() {
        let rules = RuleSet::default();
        let mut sink: Vec<SerializedRuleSet> = Vec::new();
        let _ = install_rules(&rules, &true, &mut sink).unwrap();
        assert_eq!(sink[0].as_str(), r#"{"prefetch":[],"prerender":[]}"#);
    }

    #[test]
    fn invalid_rules_never_reach_the_sink() {
        let rules = RuleSet::builder()
            .prefetch(SpeculationRule::new(href_matches("/*").and(!href_matches("logout"))))
            .build();
        let mut sink: Vec<SerializedRuleSet> = Vec::new();
        let err = install_rules(&rules, &true, &mut sink).unwrap_err();
        assert!(matches!(
            err,
            InstallError::Compile(CompileError::InvalidPattern { .. })
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn invalid_rules_are_ignored_on_unsupported_hosts() {
        let rules = RuleSet::builder()
            .prefetch(SpeculationRule::new(Predicate::And(vec![])))
            .build();
        let mut sink: Vec<SerializedRuleSet> = Vec::new();
        assert_eq!(
            install_rules(&rules, &false, &mut sink).unwrap(),
            Installation::Skipped
        );
    }

    #[test]
    fn works_through_trait_objects() {
        let detector: &dyn FeatureDetector = &true;
        let mut doc = Document::new();
        let sink: &mut dyn RuleSink = &mut doc;
        assert!(install(detector, sink).unwrap().is_published());
    }
}

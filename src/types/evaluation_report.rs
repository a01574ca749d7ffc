use std::fmt;
use std::time::Duration;

use super::rule::RuleId;
use super::verdict::Verdict;

/// Detailed evaluation report returned by
/// [`CompiledRuleSet::evaluate_detailed()`](super::CompiledRuleSet::evaluate_detailed).
///
/// Contains the verdict, which rules matched the link, and the wall-clock
/// duration of the evaluation.
#[derive(Debug, Clone)]
#[must_use]
pub struct EvaluationReport {
    verdict: Verdict,
    matched: Vec<RuleId>,
    duration: Duration,
}

impl EvaluationReport {
    pub(crate) fn new(verdict: Verdict, matched: Vec<RuleId>, duration: Duration) -> Self {
        Self {
            verdict,
            matched,
            duration,
        }
    }

    /// The evaluation verdict, same as
    /// [`CompiledRuleSet::evaluate()`](super::CompiledRuleSet::evaluate).
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Rules whose predicate matched, prefetch rules first, each list in
    /// declaration order.
    #[must_use]
    pub fn matched(&self) -> &[RuleId] {
        &self.matched
    }

    /// Wall-clock duration of the evaluation.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "verdict: {}", self.verdict)?;
        let matched: Vec<String> = self.matched.iter().map(ToString::to_string).collect();
        write!(f, ", matched: [{}]", matched.join(", "))?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}

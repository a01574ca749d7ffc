use thiserror::Error;

use crate::serial::SerializedRuleSet;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("a speculation rules block is already attached to the document")]
    AlreadyAttached,

    #[error("sink rejected rule set: {0}")]
    Rejected(String),
}

/// Receives serialized rule sets and attaches them where the host will read
/// them.
pub trait RuleSink {
    /// Attach one rule set.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] if the sink refuses the rule set.
    fn publish(&mut self, rules: SerializedRuleSet) -> Result<(), PublishError>;
}

/// Collects every published rule set. Never refuses.
impl RuleSink for Vec<SerializedRuleSet> {
    fn publish(&mut self, rules: SerializedRuleSet) -> Result<(), PublishError> {
        self.push(rules);
        Ok(())
    }
}

impl<S: RuleSink + ?Sized> RuleSink for &mut S {
    fn publish(&mut self, rules: SerializedRuleSet) -> Result<(), PublishError> {
        (**self).publish(rules)
    }
}

use thiserror::Error;

use super::rule::RuleId;
use crate::ParseError;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("empty '{combinator}' list in rule {rule}")]
    EmptyCombinator {
        rule: RuleId,
        combinator: &'static str,
    },

    #[error("invalid href pattern '{pattern}' in rule {rule}")]
    InvalidPattern {
        rule: RuleId,
        pattern: String,
        #[source]
        source: ParseError,
    },

    #[error("invalid selector '{selector}' in rule {rule}")]
    InvalidSelector {
        rule: RuleId,
        selector: String,
        #[source]
        source: ParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Action;

    fn id(action: Action, index: usize) -> RuleId {
        RuleId { action, index }
    }

    #[test]
    fn empty_combinator_message() {
        let err = CompileError::EmptyCombinator {
            rule: id(Action::Prefetch, 0),
            combinator: "and",
        };
        assert_eq!(err.to_string(), "empty 'and' list in rule prefetch[0]");
    }

    #[test]
    fn invalid_pattern_message() {
        let err = CompileError::InvalidPattern {
            rule: id(Action::Prerender, 1),
            pattern: "goals".into(),
            source: ParseError::new("goals", "expected '/'"),
        };
        assert_eq!(
            err.to_string(),
            "invalid href pattern 'goals' in rule prerender[1]"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn invalid_selector_message() {
        let err = CompileError::InvalidSelector {
            rule: id(Action::Prefetch, 0),
            selector: "[".into(),
            source: ParseError::new("[", "expected attribute name"),
        };
        assert_eq!(err.to_string(), "invalid selector '[' in rule prefetch[0]");
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How aggressively the host should act on a matching rule.
///
/// Variants are declared from least to most eager, so the derived `Ord`
/// gives `Immediate > Eager > Moderate > Conservative`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Eagerness {
    /// Act on pointer-down or touch-start.
    #[default]
    Conservative,
    /// Act on hover or focus.
    Moderate,
    /// Act as soon as the link is in view.
    Eager,
    /// Act as soon as the rule is seen.
    Immediate,
}

impl Eagerness {
    pub const ALL: [Eagerness; 4] = [
        Eagerness::Conservative,
        Eagerness::Moderate,
        Eagerness::Eager,
        Eagerness::Immediate,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Eagerness::Conservative => "conservative",
            Eagerness::Moderate => "moderate",
            Eagerness::Eager => "eager",
            Eagerness::Immediate => "immediate",
        }
    }
}

impl fmt::Display for Eagerness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the four eagerness keywords.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown eagerness '{0}'; expected immediate, eager, moderate or conservative")]
pub struct UnknownEagerness(pub String);

impl FromStr for Eagerness {
    type Err = UnknownEagerness;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Eagerness::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| UnknownEagerness(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_most_eager_first() {
        assert!(Eagerness::Immediate > Eagerness::Eager);
        assert!(Eagerness::Eager > Eagerness::Moderate);
        assert!(Eagerness::Moderate > Eagerness::Conservative);
    }

    #[test]
    fn default_is_conservative() {
        assert_eq!(Eagerness::default(), Eagerness::Conservative);
    }

    #[test]
    fn parse_keywords() {
        for e in Eagerness::ALL {
            assert_eq!(e.as_str().parse::<Eagerness>().unwrap(), e);
        }
    }

    #[test]
    fn parse_unknown_keyword() {
        let err = "eventually".parse::<Eagerness>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown eagerness 'eventually'; expected immediate, eager, moderate or conservative"
        );
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(
            serde_json::to_string(&Eagerness::Moderate).unwrap(),
            "\"moderate\""
        );
        let e: Eagerness = serde_json::from_str("\"eager\"").unwrap();
        assert_eq!(e, Eagerness::Eager);
    }
}

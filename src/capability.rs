use std::collections::BTreeSet;

/// The feature name hosts report for declarative speculation rules.
pub const SPECULATION_RULES_FEATURE: &str = "speculationrules";

/// Answers whether the host environment supports a named feature.
///
/// Implemented for closures, for [`StaticFeatures`], and for `bool` (support
/// everything or nothing).
pub trait FeatureDetector {
    fn supports(&self, feature: &str) -> bool;
}

impl<F> FeatureDetector for F
where
    F: Fn(&str) -> bool,
{
    fn supports(&self, feature: &str) -> bool {
        self(feature)
    }
}

impl FeatureDetector for bool {
    fn supports(&self, _feature: &str) -> bool {
        *self
    }
}

/// A fixed set of supported feature names, e.g. derived from a user agent on
/// the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticFeatures {
    features: BTreeSet<String>,
}

impl StaticFeatures {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, feature: &str) -> Self {
        self.features.insert(feature.to_owned());
        self
    }
}

impl FeatureDetector for StaticFeatures {
    fn supports(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }
}

impl<'a> FromIterator<&'a str> for StaticFeatures {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().map(str::to_owned).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_detector() {
        let detector = |name: &str| name == SPECULATION_RULES_FEATURE;
        assert!(detector.supports("speculationrules"));
        assert!(!detector.supports("importmap"));
    }

    #[test]
    fn bool_detector() {
        assert!(true.supports("anything"));
        assert!(!false.supports(SPECULATION_RULES_FEATURE));
    }

    #[test]
    fn static_features() {
        let features = StaticFeatures::new().with("importmap");
        assert!(features.supports("importmap"));
        assert!(!features.supports(SPECULATION_RULES_FEATURE));

        let collected: StaticFeatures = ["speculationrules", "module"].into_iter().collect();
        assert!(collected.supports(SPECULATION_RULES_FEATURE));
    }
}

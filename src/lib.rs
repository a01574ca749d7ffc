mod capability;
mod compile;
mod config;
mod document;
mod error;
mod evaluate;
mod installer;
pub mod parse;
pub mod serial;
mod sink;
mod types;

pub use capability::{FeatureDetector, SPECULATION_RULES_FEATURE, StaticFeatures};
pub use config::{ConfigError, PrefetchConfig, PrerenderConfig, RulesConfig};
pub use document::{Document, HeadNode};
pub use error::SpecrulesError;
pub use installer::{InstallError, Installation, build_rule_set, install, install_rules};
pub use parse::ParseError;
pub use serial::SerializedRuleSet;
pub use sink::{PublishError, RuleSink};
pub use types::{
    Action, CompileError, CompiledRuleSet, Eagerness, Element, EvaluationReport, Href, Link,
    Predicate, RuleId, RuleSet, RuleSetBuilder, SelectorList, SpeculationRule, UnknownEagerness,
    UrlPattern, Verdict, href_matches, selector_matches,
};

mod eagerness;
mod error;
mod evaluation_report;
mod link;
pub(crate) mod pattern;
mod predicate;
mod rule;
mod ruleset;
pub(crate) mod selector;
mod verdict;

pub use eagerness::{Eagerness, UnknownEagerness};
pub use error::CompileError;
pub use evaluation_report::EvaluationReport;
pub use link::{Element, Href, Link};
pub use pattern::UrlPattern;
pub(crate) use predicate::CompiledPredicate;
pub use predicate::{Predicate, href_matches, selector_matches};
pub(crate) use rule::CompiledRule;
pub use rule::{Action, RuleId, SpeculationRule};
pub use ruleset::{CompiledRuleSet, RuleSet, RuleSetBuilder};
pub use selector::SelectorList;
pub use verdict::Verdict;

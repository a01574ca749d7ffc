use std::time::Instant;

use crate::types::{CompiledPredicate, CompiledRule, EvaluationReport, Link, Verdict};
use crate::Eagerness;

pub(crate) fn evaluate(
    prefetch: &[CompiledRule],
    prerender: &[CompiledRule],
    link: &Link,
) -> Verdict {
    Verdict::new(strongest(prefetch, link), strongest(prerender, link))
}

pub(crate) fn evaluate_detailed(
    prefetch: &[CompiledRule],
    prerender: &[CompiledRule],
    link: &Link,
) -> EvaluationReport {
    let start = Instant::now();

    let mut matched = Vec::new();
    let mut strongest_matched = |rules: &[CompiledRule]| {
        let mut best = None;
        for rule in rules {
            if eval_predicate(&rule.predicate, link) {
                matched.push(rule.id);
                best = best.max(Some(rule.eagerness));
            }
        }
        best
    };
    let prefetch = strongest_matched(prefetch);
    let prerender = strongest_matched(prerender);

    EvaluationReport::new(Verdict::new(prefetch, prerender), matched, start.elapsed())
}

/// Highest eagerness among the rules matching `link`.
pub(crate) fn strongest(rules: &[CompiledRule], link: &Link) -> Option<Eagerness> {
    rules
        .iter()
        .filter(|rule| eval_predicate(&rule.predicate, link))
        .map(|rule| rule.eagerness)
        .max()
}

pub(crate) fn eval_predicate(predicate: &CompiledPredicate, link: &Link) -> bool {
    match predicate {
        CompiledPredicate::And(items) => items.iter().all(|p| eval_predicate(p, link)),
        CompiledPredicate::Or(items) => items.iter().any(|p| eval_predicate(p, link)),
        CompiledPredicate::Not(inner) => !eval_predicate(inner, link),
        CompiledPredicate::Href(pattern) => link
            .href()
            .is_some_and(|href| pattern.matches(href, link.is_same_origin())),
        CompiledPredicate::Selector(selector) => {
            selector.matches(link.element(), link.ancestors())
        }
    }
}

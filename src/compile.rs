use crate::parse::{parse_pattern, parse_selector};
use crate::types::{
    Action, CompileError, CompiledPredicate, CompiledRule, CompiledRuleSet, Predicate, RuleId,
    RuleSet,
};

pub(crate) fn compile(rules: &RuleSet) -> Result<CompiledRuleSet, CompileError> {
    let prefetch = compile_list(rules, Action::Prefetch)?;
    let prerender = compile_list(rules, Action::Prerender)?;

    tracing::debug!(
        prefetch = prefetch.len(),
        prerender = prerender.len(),
        "compiled speculation rules"
    );

    Ok(CompiledRuleSet {
        source: rules.clone(),
        prefetch,
        prerender,
    })
}

fn compile_list(rules: &RuleSet, action: Action) -> Result<Vec<CompiledRule>, CompileError> {
    rules
        .rules(action)
        .iter()
        .enumerate()
        .map(|(index, rule)| {
            let id = RuleId { action, index };
            Ok(CompiledRule {
                id,
                predicate: compile_predicate(&rule.predicate, id)?,
                eagerness: rule.eagerness,
            })
        })
        .collect()
}

fn compile_predicate(predicate: &Predicate, id: RuleId) -> Result<CompiledPredicate, CompileError> {
    match predicate {
        Predicate::And(items) => compile_items(items, id, "and").map(CompiledPredicate::And),
        Predicate::Or(items) => compile_items(items, id, "or").map(CompiledPredicate::Or),
        Predicate::Not(inner) => {
            compile_predicate(inner, id).map(|p| CompiledPredicate::Not(Box::new(p)))
        }
        Predicate::HrefMatches(pattern) => parse_pattern(pattern)
            .map(CompiledPredicate::Href)
            .map_err(|source| CompileError::InvalidPattern {
                rule: id,
                pattern: pattern.clone(),
                source,
            }),
        Predicate::SelectorMatches(selector) => parse_selector(selector)
            .map(CompiledPredicate::Selector)
            .map_err(|source| CompileError::InvalidSelector {
                rule: id,
                selector: selector.clone(),
                source,
            }),
    }
}

fn compile_items(
    items: &[Predicate],
    id: RuleId,
    combinator: &'static str,
) -> Result<Vec<CompiledPredicate>, CompileError> {
    if items.is_empty() {
        return Err(CompileError::EmptyCombinator {
            rule: id,
            combinator,
        });
    }
    items.iter().map(|p| compile_predicate(p, id)).collect()
}

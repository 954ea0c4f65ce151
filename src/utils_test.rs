//! Test helpers shared by the per-rule test modules.

use crate::engine::Engine;
use crate::facts::{DefaultFacts, SemanticFacts};
use crate::finding::Finding;
use crate::parser::parse_source;
use crate::rules::builtin_rule_set;

/// Run a single built-in rule over a source snippet and return its
/// findings.
pub fn check_code(text: &str, rule: &str) -> Vec<Finding> {
    check_code_with(text, rule, &DefaultFacts)
}

/// Same as [`check_code`] with an explicit semantic facts provider.
pub fn check_code_with(text: &str, rule: &str, facts: &dyn SemanticFacts) -> Vec<Finding> {
    let mut set = builtin_rule_set();
    set.retain(|r| r.name() == rule);
    assert!(!set.is_empty(), "no built-in rule named `{rule}`");

    let tree = parse_source(text).unwrap_or_else(|e| panic!("cannot parse `{text}`: {e}"));
    let engine = Engine::new(&set, facts);
    let out = engine
        .run(&tree)
        .unwrap_or_else(|e| panic!("engine failed on `{text}`: {e}"));
    out.findings
}

/// Assert that the snippet triggers the rule with a message containing
/// `msg`.
pub fn expect_finding(text: &str, rule: &str, msg: &str) {
    expect_finding_with(text, rule, msg, &DefaultFacts);
}

pub fn expect_finding_with(text: &str, rule: &str, msg: &str, facts: &dyn SemanticFacts) {
    let findings = check_code_with(text, rule, facts);
    assert!(
        findings.iter().any(|f| f.message.contains(msg)),
        "expected a `{rule}` finding containing {msg:?} on `{text}`, got: {:?}",
        findings.iter().map(|f| &f.message).collect::<Vec<_>>()
    );
}

/// Assert that the snippet does not trigger the rule at all.
pub fn expect_no_finding(text: &str, rule: &str) {
    expect_no_finding_with(text, rule, &DefaultFacts);
}

pub fn expect_no_finding_with(text: &str, rule: &str, facts: &dyn SemanticFacts) {
    let findings = check_code_with(text, rule, facts);
    assert!(
        findings.is_empty(),
        "expected no `{rule}` finding on `{text}`, got: {:?}",
        findings.iter().map(|f| &f.message).collect::<Vec<_>>()
    );
}

/// Assert that the snippet triggers the rule with exactly this rendered
/// suggestion.
pub fn expect_suggestion(text: &str, rule: &str, expected: &str) {
    expect_suggestion_with(text, rule, expected, &DefaultFacts);
}

pub fn expect_suggestion_with(
    text: &str,
    rule: &str,
    expected: &str,
    facts: &dyn SemanticFacts,
) {
    let findings = check_code_with(text, rule, facts);
    let suggestions: Vec<&str> = findings
        .iter()
        .filter_map(|f| f.suggestion.as_deref())
        .collect();
    assert!(
        suggestions.contains(&expected),
        "expected `{rule}` to suggest {expected:?} on `{text}`, got: {suggestions:?}"
    );
}

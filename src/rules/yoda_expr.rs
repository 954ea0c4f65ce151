use crate::rule::{Category, Rule, RuleBuilder};

/// Checks for comparisons with the constant on the left-hand side
/// (`nil != err`, `0 != n`).
pub(crate) fn rules() -> Vec<RuleBuilder> {
    vec![Rule::new("yoda_expr")
        .category(Category::Readability)
        .pattern("nil != $_")
        .pattern("0 != $_")
        .report("yoda-style expression")]
}

use crate::condition::Condition;
use crate::rule::{Category, Rule, RuleBuilder};

/// Checks for full-range slicing (`s[:]`) of strings and slices, which is
/// a copy-free no-op.
pub(crate) fn rules() -> Vec<RuleBuilder> {
    vec![
        Rule::new("unslice")
            .category(Category::Readability)
            .pattern("$s[:]")
            .when(Condition::type_is("s", "string"))
            .suggest("$s"),
        Rule::new("unslice")
            .category(Category::Readability)
            .pattern("$s[:]")
            .when(Condition::type_is("s", "[]$_"))
            .suggest("$s"),
    ]
}

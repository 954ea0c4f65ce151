use crate::condition::Condition;
use crate::rule::{Category, Rule, RuleBuilder};

/// Checks for `s[len(s)]`, which always panics on a slice; the last
/// element is `s[len(s)-1]`.
pub(crate) fn rules() -> Vec<RuleBuilder> {
    vec![Rule::new("off_by_one")
        .category(Category::Correctness)
        .pattern("$s[len($s)]")
        .when(Condition::type_is("s", "[]$elem") & Condition::pure("s"))
        .report("index expr always panics; maybe you wanted $s[len($s)-1]?")]
}

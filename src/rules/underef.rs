use crate::condition::Condition;
use crate::rule::{Category, Rule, RuleBuilder};

/// Checks for explicit pointer dereference before indexing an array
/// pointer (`(*arr)[i]`); indexing dereferences implicitly.
pub(crate) fn rules() -> Vec<RuleBuilder> {
    vec![Rule::new("underef")
        .category(Category::Readability)
        .pattern("(*$arr)[$i]")
        .when(Condition::type_is("arr", "*[$_]$_"))
        .suggest("$arr[$i]")]
}

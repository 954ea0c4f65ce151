use crate::rule::{Category, Rule, RuleBuilder};

/// ## What it does
///
/// Checks for boolean expressions with a redundant outer negation:
/// `!!x`, `!(x != y)`, `!(x == y)`.
///
/// ## Why is this bad?
///
/// The negation can always be folded into the inner expression, which is
/// shorter and reads without mental double-negation.
///
/// ## Example
///
/// ```text
/// !!done
/// !(a != b)
/// ```
///
/// Use instead:
/// ```text
/// done
/// a == b
/// ```
pub(crate) fn rules() -> Vec<RuleBuilder> {
    vec![
        Rule::new("bool_simplify")
            .category(Category::Readability)
            .pattern("!!$x")
            .suggest("$x"),
        Rule::new("bool_simplify")
            .category(Category::Readability)
            .pattern("!($x != $y)")
            .suggest("$x == $y"),
        Rule::new("bool_simplify")
            .category(Category::Readability)
            .pattern("!($x == $y)")
            .suggest("$x != $y"),
    ]
}

use crate::rule::{Category, Rule, RuleBuilder};

/// ## What it does
///
/// Checks for assignments that can be written with a compound assignment
/// operator or with `++`/`--`.
///
/// ## Why is this bad?
///
/// `x = x + 1` repeats the assignee for no benefit; `x++` and `x += y`
/// say the same thing more directly.
///
/// ## Example
///
/// ```text
/// x = x + 1
/// x = x * n
/// ```
///
/// Use instead:
/// ```text
/// x++
/// x *= n
/// ```
pub(crate) fn rules() -> Vec<RuleBuilder> {
    // `++` and `--` are declared before the generic forms so they take
    // precedence over `+= 1`/`-= 1`.
    vec![
        Rule::new("assign_op")
            .category(Category::Readability)
            .pattern("$x = $x + 1")
            .suggest("$x++"),
        Rule::new("assign_op")
            .category(Category::Readability)
            .pattern("$x = $x - 1")
            .suggest("$x--"),
        Rule::new("assign_op")
            .category(Category::Readability)
            .pattern("$x = $x * $y")
            .suggest("$x *= $y"),
        Rule::new("assign_op")
            .category(Category::Readability)
            .pattern("$x = $x / $y")
            .suggest("$x /= $y"),
        Rule::new("assign_op")
            .category(Category::Readability)
            .pattern("$x = $x % $y")
            .suggest("$x %= $y"),
        Rule::new("assign_op")
            .category(Category::Readability)
            .pattern("$x = $x + $y")
            .suggest("$x += $y"),
        Rule::new("assign_op")
            .category(Category::Readability)
            .pattern("$x = $x - $y")
            .suggest("$x -= $y"),
        Rule::new("assign_op")
            .category(Category::Readability)
            .pattern("$x = $x & $y")
            .suggest("$x &= $y"),
        Rule::new("assign_op")
            .category(Category::Readability)
            .pattern("$x = $x | $y")
            .suggest("$x |= $y"),
        Rule::new("assign_op")
            .category(Category::Readability)
            .pattern("$x = $x ^ $y")
            .suggest("$x ^= $y"),
        Rule::new("assign_op")
            .category(Category::Readability)
            .pattern("$x = $x << $y")
            .suggest("$x <<= $y"),
        Rule::new("assign_op")
            .category(Category::Readability)
            .pattern("$x = $x >> $y")
            .suggest("$x >>= $y"),
        Rule::new("assign_op")
            .category(Category::Readability)
            .pattern("$x = $x &^ $y")
            .suggest("$x &^= $y"),
    ]
}

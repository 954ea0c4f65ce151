use crate::condition::Condition;
use crate::rule::{Category, Rule, RuleBuilder};

/// ## What it does
///
/// Checks for binary expressions whose left and right operands are the
/// same expression, e.g. `x == x` or `a.Len() / a.Len()`.
///
/// ## Why is this bad?
///
/// An operator applied to two copies of the same operand is almost always
/// a typo for a comparison against something else. The rule only fires
/// when the operand is side-effect free: two calls to an impure function
/// can legitimately yield different values.
///
/// ## Example
///
/// ```text
/// min = a.Len() < a.Len()
/// ```
pub(crate) fn rules() -> Vec<RuleBuilder> {
    vec![Rule::new("dup_sub_expr")
        .category(Category::Suspicious)
        .pattern("$x || $x")
        .pattern("$x && $x")
        .pattern("$x | $x")
        .pattern("$x & $x")
        .pattern("$x ^ $x")
        .pattern("$x < $x")
        .pattern("$x > $x")
        .pattern("$x &^ $x")
        .pattern("$x % $x")
        .pattern("$x == $x")
        .pattern("$x != $x")
        .pattern("$x <= $x")
        .pattern("$x >= $x")
        .pattern("$x / $x")
        .pattern("$x - $x")
        .when(Condition::pure("x"))
        .report("suspicious identical LHS and RHS")]
}

#[cfg(test)]
mod tests {
    use crate::facts::FactsTable;
    use crate::utils_test::*;

    #[test]
    fn test_no_lint_dup_sub_expr() {
        expect_no_finding("a == b", "dup_sub_expr");
        expect_no_finding("a + a", "dup_sub_expr");

        // Calls are not known to be pure, so the condition fails closed.
        expect_no_finding("f() == f()", "dup_sub_expr");

        // An expressly impure call never fires.
        let mut facts = FactsTable::new();
        facts.mark_impure("readRand()");
        expect_no_finding_with("readRand() == readRand()", "dup_sub_expr", &facts);
    }

    #[test]
    fn test_lint_dup_sub_expr() {
        let msg = "suspicious identical LHS and RHS";
        expect_finding("x == x", "dup_sub_expr", msg);
        expect_finding("x != x", "dup_sub_expr", msg);
        expect_finding("a.b < a.b", "dup_sub_expr", msg);
        expect_finding("v[i] - v[i]", "dup_sub_expr", msg);

        let mut facts = FactsTable::new();
        facts.mark_pure("a.Len()");
        expect_finding_with("a.Len() == a.Len()", "dup_sub_expr", msg, &facts);
    }

    #[test]
    fn test_exactly_one_finding_per_node() {
        let findings = check_code("x == x", "dup_sub_expr");
        assert_eq!(findings.len(), 1);
    }
}

use crate::rule::{Category, Rule, RuleBuilder};

/// Checks for three-statement value swaps through a temporary, which can
/// be a single tuple assignment.
pub(crate) fn rules() -> Vec<RuleBuilder> {
    vec![Rule::new("val_swap")
        .category(Category::Readability)
        .pattern("$tmp := $x; $x = $y; $y = $tmp")
        .suggest("$x, $y = $y, $x")]
}

#[cfg(test)]
mod tests {
    use crate::utils_test::*;

    #[test]
    fn test_no_lint_val_swap() {
        expect_no_finding("tmp := a; a = b; b = other", "val_swap");
        expect_no_finding("tmp := a; a = b", "val_swap");
        // A statement between the steps breaks the window.
        expect_no_finding("tmp := a; log(a); a = b; b = tmp", "val_swap");
    }

    #[test]
    fn test_lint_val_swap() {
        expect_suggestion("tmp := a; a = b; b = tmp", "val_swap", "a, b = b, a");
        // The swap is found inside a larger statement sequence too.
        expect_suggestion(
            "setup()\ntmp := x[i]\nx[i] = x[j]\nx[j] = tmp\ndone()",
            "val_swap",
            "x[i], x[j] = x[j], x[i]",
        );
    }
}

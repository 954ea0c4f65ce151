use crate::rule::{Category, Rule, RuleBuilder};

/// Checks for `switch true { ... }`; the tag is implied when omitted.
pub(crate) fn rules() -> Vec<RuleBuilder> {
    vec![Rule::new("switch_true")
        .category(Category::Readability)
        .pattern("switch true { $*_ }")
        .report("can omit true in switch")]
}

#[cfg(test)]
mod tests {
    use crate::utils_test::*;

    #[test]
    fn test_no_lint_switch_true() {
        expect_no_finding("switch mode { case fast: run() }", "switch_true");
    }

    #[test]
    fn test_lint_switch_true() {
        expect_finding(
            "switch true { case ready: run(); default: wait() }",
            "switch_true",
            "can omit true in switch",
        );
        expect_finding("switch true { }", "switch_true", "can omit true in switch");
    }
}

use crate::rule::{Category, Rule, RuleBuilder};

/// Checks for consecutive single-element appends to the same destination;
/// one call appending both elements avoids growing the slice twice.
pub(crate) fn rules() -> Vec<RuleBuilder> {
    vec![Rule::new("append_combine")
        .category(Category::Performance)
        .pattern("$dst = append($x, $a); $dst = append($x, $b)")
        .suggest("$dst = append($x, $a, $b)")]
}

#[cfg(test)]
mod tests {
    use crate::utils_test::*;

    #[test]
    fn test_no_lint_append_combine() {
        expect_no_finding("xs = append(xs, a)", "append_combine");
        expect_no_finding("xs = append(xs, a); ys = append(ys, b)", "append_combine");
    }

    #[test]
    fn test_lint_append_combine() {
        expect_suggestion(
            "xs = append(xs, a); xs = append(xs, b)",
            "append_combine",
            "xs = append(xs, a, b)",
        );
    }
}

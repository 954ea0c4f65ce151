use crate::rule::{Category, Rule, RuleBuilder};

/// ## What it does
///
/// Checks for `len` comparisons that are always true, always false, or
/// needlessly indirect: `len(x) >= 0`, `len(x) < 0`, `len(x) <= 0`.
///
/// ## Why is this bad?
///
/// `len` never returns a negative value, so the first two comparisons are
/// constants and the third is a roundabout `len(x) == 0`.
pub(crate) fn rules() -> Vec<RuleBuilder> {
    vec![
        Rule::new("sloppy_len")
            .category(Category::Correctness)
            .pattern("len($_) >= 0")
            .report("$$ is always true"),
        Rule::new("sloppy_len")
            .category(Category::Correctness)
            .pattern("len($_) < 0")
            .report("$$ is always false"),
        Rule::new("sloppy_len")
            .category(Category::Correctness)
            .pattern("len($s) <= 0")
            .suggest("len($s) == 0"),
    ]
}

#[cfg(test)]
mod tests {
    use crate::utils_test::*;

    #[test]
    fn test_no_lint_sloppy_len() {
        expect_no_finding("len(xs) > 0", "sloppy_len");
        expect_no_finding("len(xs) == 0", "sloppy_len");
        expect_no_finding("cap(xs) >= 0", "sloppy_len");
    }

    #[test]
    fn test_lint_sloppy_len() {
        expect_finding("len(xs) >= 0", "sloppy_len", "len(xs) >= 0 is always true");
        expect_finding("len(parts(x)) < 0", "sloppy_len", "len(parts(x)) < 0 is always false");
        expect_suggestion("len(xs) <= 0", "sloppy_len", "len(xs) == 0");
    }
}

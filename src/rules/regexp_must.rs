use crate::condition::Condition;
use crate::rule::{Category, Rule, RuleBuilder};

/// Checks for `regexp.Compile` on a constant pattern, where
/// `regexp.MustCompile` avoids threading an error that cannot happen.
pub(crate) fn rules() -> Vec<RuleBuilder> {
    vec![Rule::new("regexp_must")
        .category(Category::Performance)
        .pattern("regexp.Compile($pat)")
        .pattern("regexp.CompilePOSIX($pat)")
        .when(Condition::constant("pat"))
        .report("can use MustCompile for const patterns")]
}

#[cfg(test)]
mod tests {
    use crate::facts::FactsTable;
    use crate::utils_test::*;

    #[test]
    fn test_no_lint_regexp_must() {
        // A runtime-built pattern genuinely needs the error path.
        expect_no_finding("regexp.Compile(userInput)", "regexp_must");
        expect_no_finding("regexp.Compile(prefix + suffix)", "regexp_must");
    }

    #[test]
    fn test_lint_regexp_must() {
        let msg = "can use MustCompile for const patterns";
        expect_finding("regexp.Compile(\"[a-z]+\")", "regexp_must", msg);
        expect_finding("regexp.CompilePOSIX(\"a*\")", "regexp_must", msg);

        // A declared constant reported by the facts provider counts too.
        let mut facts = FactsTable::new();
        facts.mark_const("defaultPattern");
        expect_finding_with("regexp.Compile(defaultPattern)", "regexp_must", msg, &facts);
    }
}

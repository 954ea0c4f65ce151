use crate::condition::Condition;
use crate::rule::{Category, Rule, RuleBuilder};

/// Checks for `copy(b, []byte(s))` where `s` is a string; `copy` accepts
/// a string source directly, skipping the conversion allocation.
pub(crate) fn rules() -> Vec<RuleBuilder> {
    vec![Rule::new("string_x_bytes")
        .category(Category::Performance)
        .pattern("copy($b, []byte($s))")
        .when(Condition::type_is("s", "string"))
        .suggest("copy($b, $s)")]
}

#[cfg(test)]
mod tests {
    use crate::facts::FactsTable;
    use crate::utils_test::*;

    #[test]
    fn test_no_lint_string_x_bytes() {
        let mut facts = FactsTable::new();
        facts.set_type("data", "[]byte");

        expect_no_finding_with("copy(buf, []byte(data))", "string_x_bytes", &facts);
        expect_no_finding("copy(buf, s)", "string_x_bytes");
    }

    #[test]
    fn test_lint_string_x_bytes() {
        let mut facts = FactsTable::new();
        facts.set_type("s", "string");

        expect_suggestion_with("copy(buf, []byte(s))", "string_x_bytes", "copy(buf, s)", &facts);
    }
}

use crate::rule::{Category, Rule, RuleBuilder};

/// ## What it does
///
/// Checks for calls whose argument values make the call useless:
/// `strings.Replace(..., 0)` replaces nothing, and a one-argument
/// `append` returns its input unchanged.
pub(crate) fn rules() -> Vec<RuleBuilder> {
    vec![
        Rule::new("bad_call")
            .category(Category::Correctness)
            .pattern("strings.Replace($_, $_, $_, 0)")
            .pattern("bytes.Replace($_, $_, $_, 0)")
            .pattern("strings.SplitN($_, $_, 0)")
            .pattern("bytes.SplitN($_, $_, 0)")
            .report("n=0 argument does nothing, maybe n=-1 is intended?"),
        Rule::new("bad_call")
            .category(Category::Correctness)
            .pattern("append($_)")
            .report("append called with 1 argument does nothing"),
    ]
}

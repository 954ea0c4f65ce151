use crate::condition::Condition;
use crate::rule::{Category, Rule, RuleBuilder};

/// ## What it does
///
/// Checks for map literals that repeat a key.
///
/// ## Why is this bad?
///
/// The later entry silently overwrites the earlier one. The diagnostic is
/// anchored at the duplicated key rather than the whole literal, and the
/// first conflicting pair in positional order is the one reported.
///
/// ## Example
///
/// ```text
/// map[string]int{red: 1, blue: 2, red: 3}
/// ```
pub(crate) fn rules() -> Vec<RuleBuilder> {
    vec![Rule::new("dup_map_key")
        .category(Category::Suspicious)
        .pattern("map[$_]$_{$*_, $k: $_, $*_, $k: $_, $*_}")
        .when(Condition::pure("k"))
        .report("suspicious duplicate key $k")
        .at("k")]
}

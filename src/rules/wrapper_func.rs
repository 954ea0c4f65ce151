use crate::rule::{Category, Rule, RuleBuilder};

/// ## What it does
///
/// Checks for call spellings that have a dedicated wrapper in the
/// standard library: `strings.SplitN(s, sep, -1)` is `strings.Split`,
/// `strings.Map(unicode.ToUpper, s)` is `strings.ToUpper`, and so on.
///
/// ## Why is this bad?
///
/// The wrapper states the intent directly and avoids the magic argument.
///
/// ## Example
///
/// ```text
/// strings.Replace(s, old, new, -1)
/// ```
///
/// Use instead:
/// ```text
/// strings.ReplaceAll(s, old, new)
/// ```
pub(crate) fn rules() -> Vec<RuleBuilder> {
    vec![
        Rule::new("wrapper_func")
            .category(Category::Readability)
            .pattern("strings.SplitN($s, $sep, -1)")
            .suggest("strings.Split($s, $sep)"),
        Rule::new("wrapper_func")
            .category(Category::Readability)
            .pattern("strings.Replace($s, $old, $new, -1)")
            .suggest("strings.ReplaceAll($s, $old, $new)"),
        Rule::new("wrapper_func")
            .category(Category::Readability)
            .pattern("strings.TrimFunc($s, unicode.IsSpace)")
            .suggest("strings.TrimSpace($s)"),
        Rule::new("wrapper_func")
            .category(Category::Readability)
            .pattern("strings.Map(unicode.ToUpper, $s)")
            .suggest("strings.ToUpper($s)"),
        Rule::new("wrapper_func")
            .category(Category::Readability)
            .pattern("strings.Map(unicode.ToLower, $s)")
            .suggest("strings.ToLower($s)"),
        Rule::new("wrapper_func")
            .category(Category::Readability)
            .pattern("strings.Map(unicode.ToTitle, $s)")
            .suggest("strings.ToTitle($s)"),
        Rule::new("wrapper_func")
            .category(Category::Readability)
            .pattern("bytes.SplitN($s, $sep, -1)")
            .suggest("bytes.Split($s, $sep)"),
        Rule::new("wrapper_func")
            .category(Category::Readability)
            .pattern("bytes.Replace($s, $old, $new, -1)")
            .suggest("bytes.ReplaceAll($s, $old, $new)"),
        Rule::new("wrapper_func")
            .category(Category::Readability)
            .pattern("bytes.TrimFunc($s, unicode.IsSpace)")
            .suggest("bytes.TrimSpace($s)"),
        Rule::new("wrapper_func")
            .category(Category::Readability)
            .pattern("bytes.Map(unicode.ToUpper, $s)")
            .suggest("bytes.ToUpper($s)"),
        Rule::new("wrapper_func")
            .category(Category::Readability)
            .pattern("bytes.Map(unicode.ToLower, $s)")
            .suggest("bytes.ToLower($s)"),
        Rule::new("wrapper_func")
            .category(Category::Readability)
            .pattern("bytes.Map(unicode.ToTitle, $s)")
            .suggest("bytes.ToTitle($s)"),
    ]
}

use crate::rule::{Category, Rule, RuleBuilder};

/// ## What it does
///
/// Checks for calls to well-known functions where two arguments that are
/// expected to differ are the same expression, e.g.
/// `strings.Contains(s, s)` or `copy(dst, dst)`.
///
/// ## Why is this bad?
///
/// For these functions a duplicated argument makes the call a no-op or a
/// constant, which is almost certainly not what was meant.
///
/// ## Example
///
/// ```text
/// strings.HasPrefix(name, name)
/// math.Max(x, x)
/// ```
pub(crate) fn rules() -> Vec<RuleBuilder> {
    vec![Rule::new("dup_arg")
        .category(Category::Suspicious)
        .pattern("math.Max($x, $x)")
        .pattern("math.Min($x, $x)")
        .pattern("strings.Contains($x, $x)")
        .pattern("strings.Compare($x, $x)")
        .pattern("strings.EqualFold($x, $x)")
        .pattern("strings.HasPrefix($x, $x)")
        .pattern("strings.HasSuffix($x, $x)")
        .pattern("strings.Index($x, $x)")
        .pattern("strings.LastIndex($x, $x)")
        .pattern("strings.Split($x, $x)")
        .pattern("strings.SplitAfter($x, $x)")
        .pattern("strings.SplitAfterN($x, $x, $_)")
        .pattern("strings.SplitN($x, $x, $_)")
        .pattern("strings.ReplaceAll($_, $x, $x)")
        .pattern("strings.Replace($_, $x, $x, $_)")
        .pattern("bytes.Contains($x, $x)")
        .pattern("bytes.Compare($x, $x)")
        .pattern("bytes.Equal($x, $x)")
        .pattern("bytes.EqualFold($x, $x)")
        .pattern("bytes.HasPrefix($x, $x)")
        .pattern("bytes.HasSuffix($x, $x)")
        .pattern("bytes.Index($x, $x)")
        .pattern("bytes.LastIndex($x, $x)")
        .pattern("bytes.Split($x, $x)")
        .pattern("bytes.SplitAfter($x, $x)")
        .pattern("bytes.SplitAfterN($x, $x, $_)")
        .pattern("bytes.SplitN($x, $x, $_)")
        .pattern("bytes.ReplaceAll($_, $x, $x)")
        .pattern("bytes.Replace($_, $x, $x, $_)")
        .pattern("reflect.Copy($x, $x)")
        .pattern("reflect.DeepEqual($x, $x)")
        .pattern("io.Copy($x, $x)")
        .pattern("copy($x, $x)")
        .report("suspicious duplicated args in $$")]
}

#[cfg(test)]
mod tests {
    use crate::utils_test::*;

    #[test]
    fn test_no_lint_dup_arg() {
        expect_no_finding("strings.Contains(s, sub)", "dup_arg");
        expect_no_finding("copy(dst, src)", "dup_arg");
        expect_no_finding("strings.Replace(s, old, new, -1)", "dup_arg");
        // Unknown functions are not covered by the pattern list.
        expect_no_finding("eq(x, x)", "dup_arg");
    }

    #[test]
    fn test_lint_dup_arg() {
        expect_finding(
            "strings.Contains(s, s)",
            "dup_arg",
            "suspicious duplicated args in strings.Contains(s, s)",
        );
        expect_finding("math.Max(x, x)", "dup_arg", "math.Max(x, x)");
        expect_finding("copy(buf, buf)", "dup_arg", "copy(buf, buf)");
        expect_finding("strings.SplitN(s, s, 3)", "dup_arg", "strings.SplitN(s, s, 3)");
        // Only the second and third arguments must coincide here.
        expect_finding(
            "strings.Replace(s, old, old, 1)",
            "dup_arg",
            "strings.Replace(s, old, old, 1)",
        );
    }
}

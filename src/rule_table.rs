use std::fmt::Display;
use std::fmt::Formatter;

/// The set of rule names enabled for a run, resolved from `--select-rules`
/// and `--ignore-rules` (names or category codes) against the built-in
/// registry.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    pub enabled: Vec<String>,
}

impl RuleTable {
    /// Creates a new empty rule table.
    pub fn empty() -> Self {
        Self { enabled: Vec::new() }
    }

    /// Returns whether the given rule should be checked.
    #[inline]
    pub fn enabled(&self, rule: &str) -> bool {
        self.enabled.iter().any(|r| r == rule)
    }

    /// Returns whether any of the given rules should be checked.
    #[inline]
    pub fn any_enabled(&self, rules: Vec<&str>) -> bool {
        self.enabled.iter().any(|r| rules.contains(&r.as_str()))
    }

    /// Enables the given rule.
    #[inline]
    pub fn enable(&mut self, rule: &str) {
        if !self.enabled(rule) {
            self.enabled.push(rule.to_string());
        }
    }

    /// Disables the given rule.
    #[inline]
    pub fn disable(&mut self, rule: &str) {
        self.enabled.retain(|x| x != rule);
    }
}

impl Display for RuleTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Enabled rules: {}", self.enabled.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let mut rt = RuleTable::empty();
        assert!(!rt.enabled("foo"));

        rt.enable("foo");
        assert!(rt.enabled("foo"));

        rt.enable("bar");
        assert!(rt.enabled("bar"));

        // Enabling twice does not duplicate the entry.
        rt.enable("bar");
        assert_eq!(rt.enabled.iter().filter(|r| *r == "bar").count(), 1);

        assert!(rt.any_enabled(["bar", "baz"].to_vec()));
        assert!(!rt.any_enabled(["baz", "baz2"].to_vec()));

        rt.disable("bar");
        assert!(!rt.enabled("bar"));
    }
}

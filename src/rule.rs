//! Rule declaration and compilation.
//!
//! Rules are declared through a fluent builder and compiled once into an
//! immutable [`RuleSet`] at load time. A rule that fails to compile is
//! reported and dropped; the rest of the set still loads.

use serde::{Deserialize, Serialize};

use crate::bindings::Bindings;
use crate::condition::Condition;
use crate::error::RuleError;
use crate::parser::{parse_pattern_text, RawParseError};
use crate::pattern::Pattern;
use crate::render::{render_with, RenderError};
use crate::template::MessageTemplate;
use crate::tree::{NodeKind, SyntaxNode};

/// Rule categories, used for selection on the command line.
///
/// * CORR: correctness, code that is outright wrong or useless
/// * SUSP: suspicious, code that is most likely wrong or useless
/// * PERF: performance, code that can be written to run faster
/// * READ: readability, code is correct but can be written in a way that
///   is easier to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Correctness,
    Suspicious,
    Performance,
    Readability,
}

impl Category {
    pub fn code(&self) -> &'static str {
        match self {
            Category::Correctness => "CORR",
            Category::Suspicious => "SUSP",
            Category::Performance => "PERF",
            Category::Readability => "READ",
        }
    }
}

/// A suggestion template: pattern-parsed so rendering can re-parenthesize
/// spliced bindings by precedence.
#[derive(Clone, Debug)]
pub struct SuggestTemplate {
    source: String,
    tree: SyntaxNode,
}

impl SuggestTemplate {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn render<'a>(&'a self, bindings: &Bindings<'_, 'a>) -> Result<String, RenderError> {
        render_with(&self.tree, bindings)
    }
}

/// A compiled rule: pattern alternatives tried in declaration order, an
/// optional side condition, and report/suggest actions.
#[derive(Clone, Debug)]
pub struct Rule {
    name: String,
    category: Category,
    patterns: Vec<Pattern>,
    condition: Option<Condition>,
    report: Option<MessageTemplate>,
    suggest: Option<SuggestTemplate>,
    at: Option<String>,
}

impl Rule {
    pub fn new(name: &str) -> RuleBuilder {
        RuleBuilder {
            name: name.to_string(),
            category: Category::Readability,
            patterns: Vec::new(),
            condition: None,
            report: None,
            suggest: None,
            at: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    pub fn report(&self) -> Option<&MessageTemplate> {
        self.report.as_ref()
    }

    pub fn suggest(&self) -> Option<&SuggestTemplate> {
        self.suggest.as_ref()
    }

    pub fn at(&self) -> Option<&str> {
        self.at.as_deref()
    }
}

/// Fluent rule declaration, mirroring the
/// `Match(...).Where(...).Report(...).Suggest(...).At(...)` chain of the
/// source DSL. Nothing is compiled until [`RuleBuilder::compile`].
#[derive(Clone, Debug)]
pub struct RuleBuilder {
    name: String,
    category: Category,
    patterns: Vec<String>,
    condition: Option<Condition>,
    report: Option<String>,
    suggest: Option<String>,
    at: Option<String>,
}

impl RuleBuilder {
    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Add a pattern alternative. Alternatives are tried in declaration
    /// order; the first structural match wins per target node.
    pub fn pattern(mut self, source: &str) -> Self {
        self.patterns.push(source.to_string());
        self
    }

    /// Guard the rule with a side condition over bound metavariables.
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn report(mut self, message: &str) -> Self {
        self.report = Some(message.to_string());
        self
    }

    pub fn suggest(mut self, replacement: &str) -> Self {
        self.suggest = Some(replacement.to_string());
        self
    }

    /// Anchor the finding at a metavariable's match instead of the full
    /// match span.
    pub fn at(mut self, var: &str) -> Self {
        self.at = Some(var.to_string());
        self
    }

    pub fn compile(self) -> Result<Rule, RuleError> {
        if self.patterns.is_empty() {
            return Err(RuleError::EmptyRule);
        }
        if self.report.is_none() && self.suggest.is_none() {
            return Err(RuleError::Syntax {
                message: "rule has neither a report message nor a suggestion".to_string(),
                offset: 0,
            });
        }

        let mut patterns = Vec::with_capacity(self.patterns.len());
        for source in &self.patterns {
            patterns.push(Pattern::compile(source)?);
        }

        // Union of names bound by any alternative; templates may only
        // reference these.
        let bound: Vec<&str> = patterns
            .iter()
            .flat_map(|p| p.vars().iter().map(String::as_str))
            .collect();

        let report = self.report.as_deref().map(MessageTemplate::parse);
        if let Some(report) = &report {
            for var in report.vars() {
                if !bound.contains(&var) {
                    return Err(RuleError::UnboundTemplateVar { name: var.to_string() });
                }
            }
        }

        let suggest = match self.suggest.as_deref() {
            None => None,
            Some(source) => Some(compile_suggest(source, &bound)?),
        };

        if let Some(at) = &self.at {
            if !bound.contains(&at.as_str()) {
                return Err(RuleError::UnboundTemplateVar { name: at.clone() });
            }
        }

        Ok(Rule {
            name: self.name,
            category: self.category,
            patterns,
            condition: self.condition,
            report,
            suggest,
            at: self.at,
        })
    }
}

fn compile_suggest(source: &str, bound: &[&str]) -> Result<SuggestTemplate, RuleError> {
    let tree = parse_pattern_text(source).map_err(|e| match e {
        RawParseError::Syntax { message, offset } => RuleError::Syntax { message, offset },
        RawParseError::UnknownConstruct { construct, .. } => {
            RuleError::UnknownConstruct { construct }
        }
    })?;
    let tree = if tree.children.len() == 1 {
        tree.children.into_iter().next().expect("length checked")
    } else {
        tree
    };
    check_suggest_vars(&tree, bound)?;
    Ok(SuggestTemplate { source: source.to_string(), tree })
}

fn check_suggest_vars(node: &SyntaxNode, bound: &[&str]) -> Result<(), RuleError> {
    match &node.kind {
        NodeKind::MetaVar(name) | NodeKind::VariadicMetaVar(name) => {
            if !bound.contains(&name.as_str()) {
                return Err(RuleError::UnboundTemplateVar { name: name.clone() });
            }
        }
        NodeKind::Wildcard | NodeKind::VariadicWildcard => {
            return Err(RuleError::UnboundTemplateVar { name: "_".to_string() });
        }
        _ => {}
    }
    for child in &node.children {
        check_suggest_vars(child, bound)?;
    }
    Ok(())
}

/// An immutable compiled rule set.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Keep only the rules accepted by `keep`. Used for rule selection
    /// before the set is handed to the engine.
    pub fn retain<F: FnMut(&Rule) -> bool>(&mut self, keep: F) {
        self.rules.retain(keep);
    }
}

/// One rule that failed to compile, reported alongside the surviving set.
#[derive(Debug)]
pub struct RuleCompileError {
    pub rule: String,
    pub error: RuleError,
}

/// Collects rule builders and compiles them collect-and-continue: a
/// failure in one rule never prevents the others from loading.
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    builders: Vec<RuleBuilder>,
}

impl RuleSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(&mut self, builder: RuleBuilder) -> &mut Self {
        self.builders.push(builder);
        self
    }

    pub fn extend(&mut self, builders: impl IntoIterator<Item = RuleBuilder>) -> &mut Self {
        self.builders.extend(builders);
        self
    }

    pub fn compile(self) -> (RuleSet, Vec<RuleCompileError>) {
        let mut rules = Vec::with_capacity(self.builders.len());
        let mut errors = Vec::new();
        for builder in self.builders {
            let name = builder.name.clone();
            match builder.compile() {
                Ok(rule) => rules.push(rule),
                Err(error) => errors.push(RuleCompileError { rule: name, error }),
            }
        }
        (RuleSet { rules }, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_compiles_a_complete_rule() {
        let rule = Rule::new("dup_sub_expr")
            .category(Category::Suspicious)
            .pattern("$x == $x")
            .pattern("$x != $x")
            .when(Condition::pure("x"))
            .report("suspicious identical LHS and RHS")
            .compile()
            .unwrap();

        assert_eq!(rule.name(), "dup_sub_expr");
        assert_eq!(rule.category().code(), "SUSP");
        assert_eq!(rule.patterns().len(), 2);
        assert_eq!(rule.patterns()[0].source(), "$x == $x");
        assert!(rule.condition().is_some());
    }

    #[test]
    fn rule_without_patterns_is_rejected() {
        let err = Rule::new("empty").report("msg").compile().unwrap_err();
        assert!(matches!(err, RuleError::EmptyRule));
    }

    #[test]
    fn rule_without_action_is_rejected() {
        let err = Rule::new("silent").pattern("$x").compile().unwrap_err();
        assert!(matches!(err, RuleError::Syntax { .. }));
    }

    #[test]
    fn template_vars_must_be_bound_by_some_alternative() {
        let err = Rule::new("bad_report")
            .pattern("$x == $x")
            .report("replace $y with nil")
            .compile()
            .unwrap_err();
        assert!(matches!(err, RuleError::UnboundTemplateVar { ref name } if name == "y"));

        let err = Rule::new("bad_suggest")
            .pattern("$x == $x")
            .suggest("$y")
            .compile()
            .unwrap_err();
        assert!(matches!(err, RuleError::UnboundTemplateVar { ref name } if name == "y"));

        let err = Rule::new("bad_at")
            .pattern("$x == $x")
            .report("dup")
            .at("k")
            .compile()
            .unwrap_err();
        assert!(matches!(err, RuleError::UnboundTemplateVar { ref name } if name == "k"));
    }

    #[test]
    fn set_builder_collects_and_continues() {
        let mut builder = RuleSetBuilder::new();
        builder
            .rule(Rule::new("good").pattern("!!$x").suggest("$x"))
            .rule(Rule::new("broken").pattern("f(").report("oops"))
            .rule(Rule::new("also_good").pattern("$x == $x").report("dup"));

        let (set, errors) = builder.compile();
        assert_eq!(set.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "broken");
        assert!(matches!(errors[0].error, RuleError::Syntax { .. }));
    }
}

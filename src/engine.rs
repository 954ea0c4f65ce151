//! Rule application over a target tree.
//!
//! One pre-order traversal per run: parents are visited before children,
//! so outer matches take priority for overlapping rules. At each node
//! every rule's alternatives are tried in declaration order; the first
//! alternative that structurally matches is the one whose condition is
//! evaluated, and a satisfied condition emits exactly one finding.

use std::fmt;

use crate::bindings::Binding;
use crate::error::MalformedTreeError;
use crate::facts::SemanticFacts;
use crate::finding::Finding;
use crate::matcher::{match_pattern, Budget, MatchHit, MatchInterrupt};
use crate::render::render_stmts;
use crate::rule::{Rule, RuleSet};
use crate::tree::{NodeKind, Span, SyntaxNode};

/// Whether traversal continues into the children of a node that produced
/// a finding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overlap {
    /// Visit matched children too, reporting nested issues.
    #[default]
    Descend,
    /// Skip the children of a matched node to avoid overlapping reports
    /// for the same construct.
    SkipMatched,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EngineConfig {
    pub overlap: Overlap,
    /// Per-attempt matcher step budget; `None` is unlimited.
    pub match_budget: Option<u64>,
}

/// Non-finding diagnostics produced during a run, kept distinct from
/// findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineDiagnostic {
    /// A single rule-node attempt exhausted its match budget and was
    /// abandoned; the traversal itself continued.
    MatchBudgetExceeded { rule: String, span: Span },
}

impl fmt::Display for EngineDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EngineDiagnostic::MatchBudgetExceeded { rule, span } => write!(
                f,
                "match budget exceeded for rule `{}` at offset {}",
                rule, span.start
            ),
        }
    }
}

#[derive(Debug, Default)]
pub struct RunOutput {
    /// Findings in traversal order.
    pub findings: Vec<Finding>,
    pub diagnostics: Vec<EngineDiagnostic>,
}

/// Applies an immutable rule set to target trees. The engine holds no
/// per-run state, so one engine can serve any number of trees, including
/// concurrently.
pub struct Engine<'a> {
    rules: &'a RuleSet,
    facts: &'a dyn SemanticFacts,
    config: EngineConfig,
}

impl<'a> Engine<'a> {
    pub fn new(rules: &'a RuleSet, facts: &'a dyn SemanticFacts) -> Self {
        Self::with_config(rules, facts, EngineConfig::default())
    }

    pub fn with_config(
        rules: &'a RuleSet,
        facts: &'a dyn SemanticFacts,
        config: EngineConfig,
    ) -> Self {
        Self { rules, facts, config }
    }

    pub fn run(&self, root: &SyntaxNode) -> Result<RunOutput, MalformedTreeError> {
        let mut out = RunOutput::default();
        self.visit(root, &mut out)?;
        Ok(out)
    }

    fn visit(&self, node: &SyntaxNode, out: &mut RunOutput) -> Result<(), MalformedTreeError> {
        if node.kind.is_pattern_only() {
            return Err(MalformedTreeError::new(format!(
                "target tree contains a {}",
                node.kind.label()
            )));
        }

        // Parens are grouping, not structure: matching sees through them,
        // so attempting rules at a paren node would duplicate the report
        // made at its content node.
        if matches!(node.kind, NodeKind::Paren) {
            for child in &node.children {
                self.visit(child, out)?;
            }
            return Ok(());
        }

        // Rules sharing a name form a group (one declared rule per
        // action variant); after one of them produces a finding here, the
        // rest of the group is skipped for this node.
        let mut fired: Vec<&str> = Vec::new();
        for rule in self.rules.rules() {
            if fired.iter().any(|name| *name == rule.name()) {
                continue;
            }
            match self.try_rule(rule, node) {
                RuleOutcome::NoMatch => {}
                RuleOutcome::Finding(finding) => {
                    fired.push(rule.name());
                    out.findings.push(finding);
                }
                RuleOutcome::BudgetExceeded => {
                    out.diagnostics.push(EngineDiagnostic::MatchBudgetExceeded {
                        rule: rule.name().to_string(),
                        span: node.span,
                    });
                }
            }
        }

        if !fired.is_empty() && self.config.overlap == Overlap::SkipMatched {
            return Ok(());
        }
        for child in &node.children {
            self.visit(child, out)?;
        }
        Ok(())
    }

    fn try_rule(&self, rule: &Rule, node: &SyntaxNode) -> RuleOutcome {
        // One budget per rule-node attempt, shared across alternatives.
        let mut budget = Budget::new(self.config.match_budget);
        for pattern in rule.patterns() {
            match match_pattern(pattern, node, &mut budget) {
                Err(MatchInterrupt::BudgetExceeded) => return RuleOutcome::BudgetExceeded,
                Ok(None) => continue,
                Ok(Some(hit)) => {
                    // First structurally matching alternative wins; a
                    // failed condition does not fall through to later
                    // alternatives.
                    if let Some(condition) = rule.condition() {
                        if !condition.eval(&hit.bindings, self.facts) {
                            return RuleOutcome::NoMatch;
                        }
                    }
                    return match self.emit(rule, &hit) {
                        Some(finding) => RuleOutcome::Finding(finding),
                        None => RuleOutcome::NoMatch,
                    };
                }
            }
        }
        RuleOutcome::NoMatch
    }

    fn emit<'b>(&self, rule: &'b Rule, hit: &MatchHit<'_, 'b>) -> Option<Finding> {
        let full_match = render_stmts(&hit.matched);

        let suggestion = match rule.suggest() {
            None => None,
            Some(template) => match template.render(&hit.bindings) {
                Ok(rendered) => Some(rendered),
                Err(e) => {
                    tracing::warn!(
                        rule = rule.name(),
                        error = %e.message,
                        "cannot render suggestion"
                    );
                    None
                }
            },
        };

        let message = match (rule.report(), &suggestion) {
            (Some(template), _) => template.render(&hit.bindings, &full_match),
            (None, Some(suggestion)) => format!("suggested: {suggestion}"),
            (None, None) => return None,
        };

        let anchor = rule.at().and_then(|var| match hit.bindings.get(var) {
            Some(Binding::One(node)) => Some(node.span),
            Some(Binding::Many(seq)) => seq.first().map(|n| n.span),
            None => {
                tracing::trace!(rule = rule.name(), var, "anchor metavariable unbound");
                None
            }
        });

        Some(Finding {
            rule: rule.name().to_string(),
            category: rule.category(),
            message,
            // Filled in by the per-file check layer.
            filename: std::path::PathBuf::new(),
            span: hit.span(),
            location: None,
            suggestion,
            anchor,
        })
    }
}

enum RuleOutcome {
    NoMatch,
    Finding(Finding),
    BudgetExceeded,
}

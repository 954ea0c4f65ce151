//! Lockstep structural matching of a compiled pattern against a target
//! tree.
//!
//! Matching is purely a function of (pattern, node, incoming bindings):
//! it never mutates the target tree and keeps no state beyond the binding
//! log, so repeated attempts are idempotent. Variadic metavariables
//! trigger a backtracking search over the splits of the remaining sibling
//! sequence, shortest split first, restoring the binding snapshot between
//! attempts.

use crate::bindings::Bindings;
use crate::pattern::{Pattern, PatternNode, PatternRoot};
use crate::tree::{NodeKind, Span, SyntaxNode};

/// Abnormal termination of a single match attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchInterrupt {
    /// The step budget ran out; the attempt is abandoned. Only this one
    /// rule-node attempt is affected, never the whole traversal.
    BudgetExceeded,
}

/// Step counter guarding against pathological backtracking on adversarial
/// variadic patterns. Each matcher step costs one unit.
#[derive(Clone, Copy, Debug)]
pub struct Budget {
    remaining: Option<u64>,
}

impl Budget {
    pub fn unlimited() -> Self {
        Self { remaining: None }
    }

    pub fn limited(steps: u64) -> Self {
        Self { remaining: Some(steps) }
    }

    pub fn new(limit: Option<u64>) -> Self {
        Self { remaining: limit }
    }

    fn tick(&mut self) -> Result<(), MatchInterrupt> {
        match &mut self.remaining {
            None => Ok(()),
            Some(0) => Err(MatchInterrupt::BudgetExceeded),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
        }
    }
}

/// A successful structural match: the final bindings plus the matched
/// node(s) — one node for expression patterns, a statement window for
/// multi-statement patterns.
#[derive(Debug)]
pub struct MatchHit<'p, 't> {
    pub bindings: Bindings<'p, 't>,
    pub matched: Vec<&'t SyntaxNode>,
}

impl MatchHit<'_, '_> {
    /// Source span covered by the match.
    pub fn span(&self) -> Span {
        self.matched
            .iter()
            .map(|n| n.span)
            .reduce(Span::cover)
            .unwrap_or_else(Span::empty)
    }
}

/// Attempt `pattern` against `node`. `Ok(None)` is a plain mismatch;
/// `Err` is a budget abort.
pub fn match_pattern<'p, 't>(
    pattern: &'p Pattern,
    node: &'t SyntaxNode,
    budget: &mut Budget,
) -> Result<Option<MatchHit<'p, 't>>, MatchInterrupt> {
    match pattern.root() {
        PatternRoot::Node(root) => {
            let mut bindings = Bindings::new();
            if match_node(root, node, &mut bindings, budget)? {
                Ok(Some(MatchHit { bindings, matched: vec![node.strip_parens()] }))
            } else {
                Ok(None)
            }
        }
        PatternRoot::Stmts(stmts) => match_stmt_window(stmts, node, budget),
    }
}

/// Multi-statement patterns match a contiguous window of a statement
/// list's children, earliest window first.
fn match_stmt_window<'p, 't>(
    stmts: &'p [PatternNode],
    node: &'t SyntaxNode,
    budget: &mut Budget,
) -> Result<Option<MatchHit<'p, 't>>, MatchInterrupt> {
    if !matches!(node.kind, NodeKind::StmtList) {
        return Ok(None);
    }
    let children = &node.children;
    let variadic = stmts.iter().any(PatternNode::is_variadic);
    for start in 0..children.len() {
        let remaining = children.len() - start;
        // Without a statement-level variadic the window length is fixed.
        let lengths: Vec<usize> = if variadic {
            (1..=remaining).collect()
        } else if stmts.len() <= remaining {
            vec![stmts.len()]
        } else {
            break;
        };
        for len in lengths {
            let window = &children[start..start + len];
            let mut bindings = Bindings::new();
            if match_seq(stmts, window, &mut bindings, budget)? {
                return Ok(Some(MatchHit {
                    bindings,
                    matched: window.iter().collect(),
                }));
            }
        }
    }
    Ok(None)
}

/// Match a single pattern node against a single target node.
pub(crate) fn match_node<'p, 't>(
    pat: &'p PatternNode,
    node: &'t SyntaxNode,
    bindings: &mut Bindings<'p, 't>,
    budget: &mut Budget,
) -> Result<bool, MatchInterrupt> {
    budget.tick()?;
    let node = node.strip_parens();
    match pat {
        PatternNode::Wildcard => Ok(true),
        PatternNode::MetaVar(name) => Ok(bindings.bind_one(name, node)),
        // A variadic only makes sense inside a sibling sequence; against a
        // single node it never matches.
        PatternNode::VariadicMetaVar(_) | PatternNode::VariadicWildcard => Ok(false),
        PatternNode::Literal { kind, children } => {
            if *kind != node.kind {
                return Ok(false);
            }
            match_seq(children, &node.children, bindings, budget)
        }
    }
}

/// Match a pattern sequence against a sibling sequence, backtracking over
/// variadic splits. Each failed split restores the binding snapshot taken
/// before the attempt.
fn match_seq<'p, 't>(
    pats: &'p [PatternNode],
    nodes: &'t [SyntaxNode],
    bindings: &mut Bindings<'p, 't>,
    budget: &mut Budget,
) -> Result<bool, MatchInterrupt> {
    budget.tick()?;
    let Some((first, rest_pats)) = pats.split_first() else {
        return Ok(nodes.is_empty());
    };
    match first {
        PatternNode::VariadicWildcard => {
            for take in 0..=nodes.len() {
                let snapshot = bindings.snapshot();
                if match_seq(rest_pats, &nodes[take..], bindings, budget)? {
                    return Ok(true);
                }
                bindings.restore(snapshot);
            }
            Ok(false)
        }
        PatternNode::VariadicMetaVar(name) => {
            for take in 0..=nodes.len() {
                let snapshot = bindings.snapshot();
                let prefix: Vec<&SyntaxNode> = nodes[..take].iter().collect();
                if bindings.bind_many(name, &prefix)
                    && match_seq(rest_pats, &nodes[take..], bindings, budget)?
                {
                    return Ok(true);
                }
                bindings.restore(snapshot);
            }
            Ok(false)
        }
        _ => {
            let Some((node, rest_nodes)) = nodes.split_first() else {
                return Ok(false);
            };
            let snapshot = bindings.snapshot();
            if match_node(first, node, bindings, budget)?
                && match_seq(rest_pats, rest_nodes, bindings, budget)?
            {
                return Ok(true);
            }
            bindings.restore(snapshot);
            Ok(false)
        }
    }
}

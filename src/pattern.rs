//! Pattern compilation.
//!
//! A pattern source string is parsed with the shared front-end (with
//! metavariables enabled) and lowered into an immutable matcher tree.
//! Lowering validates metavariable placement: variadic metavariables are
//! only legal where a variable-length sibling list exists.

use crate::error::RuleError;
use crate::parser::{parse_pattern_text, RawParseError};
use crate::tree::{NodeKind, SyntaxNode};

/// One node of a compiled matcher tree, mirroring the pattern's shape.
#[derive(Clone, Debug)]
pub enum PatternNode {
    /// A literal node shape: the kind tag must match exactly and the
    /// children match positionally.
    Literal { kind: NodeKind, children: Vec<PatternNode> },
    /// `$name` — matches any single node and binds it.
    MetaVar(String),
    /// `$_` — matches any single node, binds nothing.
    Wildcard,
    /// `$*name` — matches zero or more siblings and binds the sequence.
    VariadicMetaVar(String),
    /// `$*_` — matches zero or more siblings, binds nothing.
    VariadicWildcard,
}

impl PatternNode {
    pub fn is_variadic(&self) -> bool {
        matches!(
            self,
            PatternNode::VariadicMetaVar(_) | PatternNode::VariadicWildcard
        )
    }
}

/// The compiled root: a single expression/statement pattern matches one
/// node, a multi-statement pattern matches a window of sibling statements.
#[derive(Clone, Debug)]
pub enum PatternRoot {
    Node(PatternNode),
    Stmts(Vec<PatternNode>),
}

/// An immutable compiled pattern.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    root: PatternRoot,
    vars: Vec<String>,
}

impl Pattern {
    pub fn compile(source: &str) -> Result<Pattern, RuleError> {
        let tree = parse_pattern_text(source).map_err(|e| match e {
            RawParseError::Syntax { message, offset } => RuleError::Syntax { message, offset },
            RawParseError::UnknownConstruct { construct, .. } => {
                RuleError::UnknownConstruct { construct }
            }
        })?;
        debug_assert!(matches!(tree.kind, NodeKind::StmtList));

        if tree.children.is_empty() {
            return Err(RuleError::Syntax { message: "empty pattern".to_string(), offset: 0 });
        }

        let mut vars = Vec::new();
        let stmt_count = tree.children.len();
        let mut lowered = Vec::with_capacity(stmt_count);
        for child in &tree.children {
            // Statement positions admit variadics only in multi-statement
            // patterns; a pattern that is nothing but a variadic matches
            // nothing meaningful and is rejected below.
            lowered.push(lower(child, stmt_count > 1, &mut vars)?);
        }

        let root = if lowered.len() == 1 {
            let single = lowered.pop().expect("length checked");
            if single.is_variadic() {
                return Err(RuleError::Syntax {
                    message: "pattern cannot be a bare variadic metavariable".to_string(),
                    offset: 0,
                });
            }
            PatternRoot::Node(single)
        } else {
            PatternRoot::Stmts(lowered)
        };

        Ok(Pattern { source: source.to_string(), root, vars })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &PatternRoot {
        &self.root
    }

    /// Metavariable names bound by this pattern, in order of first
    /// occurrence.
    pub fn vars(&self) -> &[String] {
        &self.vars
    }
}

fn lower(
    node: &SyntaxNode,
    variadic_ok: bool,
    vars: &mut Vec<String>,
) -> Result<PatternNode, RuleError> {
    match &node.kind {
        NodeKind::MetaVar(name) => {
            record_var(vars, name);
            Ok(PatternNode::MetaVar(name.clone()))
        }
        NodeKind::Wildcard => Ok(PatternNode::Wildcard),
        NodeKind::VariadicMetaVar(name) => {
            if !variadic_ok {
                return Err(variadic_misplaced(node));
            }
            record_var(vars, name);
            Ok(PatternNode::VariadicMetaVar(name.clone()))
        }
        NodeKind::VariadicWildcard => {
            if !variadic_ok {
                return Err(variadic_misplaced(node));
            }
            Ok(PatternNode::VariadicWildcard)
        }
        // Parens carry no structure; matching sees through them.
        NodeKind::Paren => lower(&node.children[0], variadic_ok, vars),
        kind => {
            let mut children = Vec::with_capacity(node.children.len());
            for (index, child) in node.children.iter().enumerate() {
                children.push(lower(child, child_allows_variadic(kind, index), vars)?);
            }
            Ok(PatternNode::Literal { kind: kind.clone(), children })
        }
    }
}

/// Whether the child at `index` of a node of kind `kind` sits in a
/// variable-length sibling list.
fn child_allows_variadic(kind: &NodeKind, index: usize) -> bool {
    match kind {
        // Index 0 is the callee / the literal's type.
        NodeKind::Call | NodeKind::Composite => index >= 1,
        NodeKind::ExprList | NodeKind::StmtList => true,
        NodeKind::Switch { has_tag } => !has_tag || index >= 1,
        NodeKind::CaseClause { is_default } => *is_default || index >= 1,
        _ => false,
    }
}

fn variadic_misplaced(node: &SyntaxNode) -> RuleError {
    RuleError::Syntax {
        message: "variadic metavariable is only allowed in argument, element or \
                  statement positions"
            .to_string(),
        offset: node.span.start,
    }
}

fn record_var(vars: &mut Vec<String>, name: &str) {
    if !vars.iter().any(|v| v == name) {
        vars.push(name.to_string());
    }
}

//! The semantic facts boundary.
//!
//! The engine never computes types, constant-ness or purity itself; it
//! consumes answers from a [`SemanticFacts`] provider. Every method
//! returns `Option`: `None` means the fact is unavailable for that node,
//! which makes the querying predicate fail closed.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::render::render;
use crate::tree::{NodeKind, SyntaxNode};

pub trait SemanticFacts: Sync {
    /// Declared static type of the expression, e.g. `"string"` or
    /// `"[]byte"`.
    fn type_of(&self, node: &SyntaxNode) -> Option<String>;

    /// Whether the expression is a compile-time constant.
    fn is_const(&self, node: &SyntaxNode) -> Option<bool>;

    /// Whether evaluating the expression is free of observable side
    /// effects and safe to repeat.
    fn is_pure(&self, node: &SyntaxNode) -> Option<bool>;

    /// Whether the expression's type satisfies the named capability
    /// (interface).
    fn implements(&self, node: &SyntaxNode, capability: &str) -> Option<bool>;
}

/// Purely syntactic approximation of semantic facts, used when no real
/// front-end is attached: literals are constants, operator trees over
/// pure operands are pure, calls are unknown. Type information is never
/// available.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFacts;

impl SemanticFacts for DefaultFacts {
    fn type_of(&self, _node: &SyntaxNode) -> Option<String> {
        None
    }

    fn is_const(&self, node: &SyntaxNode) -> Option<bool> {
        match &node.kind {
            NodeKind::Int(_) | NodeKind::Str(_) => Some(true),
            NodeKind::Unary(_) | NodeKind::Paren => self.is_const(&node.children[0]),
            // An identifier may name a declared constant; we cannot tell.
            _ => None,
        }
    }

    fn is_pure(&self, node: &SyntaxNode) -> Option<bool> {
        match &node.kind {
            NodeKind::Ident(_) | NodeKind::Int(_) | NodeKind::Str(_) => Some(true),
            NodeKind::Unary(_)
            | NodeKind::Binary(_)
            | NodeKind::Paren
            | NodeKind::Selector(_)
            | NodeKind::Index
            | NodeKind::Slice(_)
            | NodeKind::KeyValue => {
                if node
                    .children
                    .iter()
                    .all(|c| self.is_pure(c) == Some(true))
                {
                    Some(true)
                } else {
                    None
                }
            }
            NodeKind::Assign(_) | NodeKind::IncDec(_) => Some(false),
            // A call may or may not have effects; only a real provider
            // knows.
            _ => None,
        }
    }

    fn implements(&self, _node: &SyntaxNode, _capability: &str) -> Option<bool> {
        None
    }
}

/// Table-backed provider: explicit per-expression entries keyed by the
/// expression's rendered text, falling back to [`DefaultFacts`] for
/// anything unlisted. Used in tests and by embedders that carry their own
/// analysis results.
#[derive(Debug, Default)]
pub struct FactsTable {
    types: FxHashMap<String, String>,
    constants: FxHashSet<String>,
    pure: FxHashSet<String>,
    impure: FxHashSet<String>,
    capabilities: FxHashMap<String, FxHashSet<String>>,
}

impl FactsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_type(&mut self, expr: &str, ty: &str) -> &mut Self {
        self.types.insert(expr.to_string(), ty.to_string());
        self
    }

    pub fn mark_const(&mut self, expr: &str) -> &mut Self {
        self.constants.insert(expr.to_string());
        self
    }

    pub fn mark_pure(&mut self, expr: &str) -> &mut Self {
        self.pure.insert(expr.to_string());
        self
    }

    pub fn mark_impure(&mut self, expr: &str) -> &mut Self {
        self.impure.insert(expr.to_string());
        self
    }

    pub fn add_capability(&mut self, expr: &str, capability: &str) -> &mut Self {
        self.capabilities
            .entry(expr.to_string())
            .or_default()
            .insert(capability.to_string());
        self
    }
}

impl SemanticFacts for FactsTable {
    fn type_of(&self, node: &SyntaxNode) -> Option<String> {
        self.types.get(&render(node)).cloned()
    }

    fn is_const(&self, node: &SyntaxNode) -> Option<bool> {
        if self.constants.contains(&render(node)) {
            return Some(true);
        }
        DefaultFacts.is_const(node)
    }

    fn is_pure(&self, node: &SyntaxNode) -> Option<bool> {
        let key = render(node);
        if self.pure.contains(&key) {
            return Some(true);
        }
        if self.impure.contains(&key) {
            return Some(false);
        }
        DefaultFacts.is_pure(node)
    }

    fn implements(&self, node: &SyntaxNode, capability: &str) -> Option<bool> {
        self.capabilities
            .get(&render(node))
            .map(|caps| caps.contains(capability))
    }
}

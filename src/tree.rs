use serde::{Deserialize, Serialize};

/// Half-open byte range into the original source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn empty() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    Deref,
    Ref,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
            UnaryOp::Deref => "*",
            UnaryOp::Ref => "&",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    LogicalOr,
    LogicalAnd,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    BitOr,
    BitXor,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    BitAnd,
    AndNot,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::LogicalOr => "||",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::BitAnd => "&",
            BinaryOp::AndNot => "&^",
        }
    }

    /// Binding strength, higher binds tighter. Mirrors Go's five levels.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::LogicalOr => 1,
            BinaryOp::LogicalAnd => 2,
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge => 3,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::BitOr | BinaryOp::BitXor => 4,
            BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::Rem
            | BinaryOp::Shl
            | BinaryOp::Shr
            | BinaryOp::BitAnd
            | BinaryOp::AndNot => 5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Define,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    AndNotAssign,
}

impl AssignOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Define => ":=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::RemAssign => "%=",
            AssignOp::AndAssign => "&=",
            AssignOp::OrAssign => "|=",
            AssignOp::XorAssign => "^=",
            AssignOp::ShlAssign => "<<=",
            AssignOp::ShrAssign => ">>=",
            AssignOp::AndNotAssign => "&^=",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncDecOp {
    Inc,
    Dec,
}

impl IncDecOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            IncDecOp::Inc => "++",
            IncDecOp::Dec => "--",
        }
    }
}

/// Which bounds a slice expression carries: `a[:]`, `a[lo:]`, `a[:hi]`,
/// `a[lo:hi]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliceForm {
    Full,
    Low,
    High,
    Both,
}

/// Kind tag of a syntax node. The tag plus the ordered child list is the
/// entire boundary contract with the front-end: matching compares tags
/// exactly and children positionally.
///
/// Child layout per kind:
/// - `Unary`, `IncDec`, `Paren`: `[operand]`
/// - `Binary`, `Assign`, `KeyValue`, `Index`, `MapType`: `[left, right]`
/// - `Call`: `[callee, args...]`
/// - `Slice`: `[base]` / `[base, low]` / `[base, high]` / `[base, low, high]`
/// - `Selector`: `[base]`, field name in the tag
/// - `Composite`: `[type, elements...]`
/// - `ArrayType`: `[elem]` unsized, `[len, elem]` sized
/// - `Switch`: `[tag, clauses...]` or `[clauses...]`
/// - `CaseClause`: `[guard, body...]` or `[body...]` for `default`
/// - `ExprList`, `StmtList`: the listed items
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Ident(String),
    Int(i64),
    Str(String),
    Unary(UnaryOp),
    Binary(BinaryOp),
    Assign(AssignOp),
    IncDec(IncDecOp),
    Call,
    Index,
    Slice(SliceForm),
    Selector(String),
    Paren,
    KeyValue,
    Composite,
    MapType,
    ArrayType { sized: bool },
    ExprList,
    StmtList,
    Switch { has_tag: bool },
    CaseClause { is_default: bool },

    // Pattern-only kinds. Legal in pattern trees and suggestion templates,
    // never in a target tree.
    MetaVar(String),
    Wildcard,
    VariadicMetaVar(String),
    VariadicWildcard,
}

impl NodeKind {
    /// Kinds that may only appear in pattern trees. A target tree
    /// containing one of these is malformed.
    pub fn is_pattern_only(&self) -> bool {
        matches!(
            self,
            NodeKind::MetaVar(_)
                | NodeKind::Wildcard
                | NodeKind::VariadicMetaVar(_)
                | NodeKind::VariadicWildcard
        )
    }

    pub fn is_variadic(&self) -> bool {
        matches!(self, NodeKind::VariadicMetaVar(_) | NodeKind::VariadicWildcard)
    }

    /// Short label for diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Ident(_) => "identifier",
            NodeKind::Int(_) => "int literal",
            NodeKind::Str(_) => "string literal",
            NodeKind::Unary(_) => "unary expression",
            NodeKind::Binary(_) => "binary expression",
            NodeKind::Assign(_) => "assignment",
            NodeKind::IncDec(_) => "inc/dec statement",
            NodeKind::Call => "call",
            NodeKind::Index => "index expression",
            NodeKind::Slice(_) => "slice expression",
            NodeKind::Selector(_) => "selector",
            NodeKind::Paren => "parenthesized expression",
            NodeKind::KeyValue => "key/value element",
            NodeKind::Composite => "composite literal",
            NodeKind::MapType => "map type",
            NodeKind::ArrayType { .. } => "array type",
            NodeKind::ExprList => "expression list",
            NodeKind::StmtList => "statement list",
            NodeKind::Switch { .. } => "switch statement",
            NodeKind::CaseClause { .. } => "case clause",
            NodeKind::MetaVar(_) => "metavariable",
            NodeKind::Wildcard => "wildcard",
            NodeKind::VariadicMetaVar(_) => "variadic metavariable",
            NodeKind::VariadicWildcard => "variadic wildcard",
        }
    }
}

/// A node of the target syntax tree: a kind tag, an ordered child list and
/// a source span. Supplied by an external front-end (or by the built-in
/// expression parser); the engine never mutates it.
#[derive(Clone, Debug)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub children: Vec<SyntaxNode>,
    pub span: Span,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, children: Vec<SyntaxNode>, span: Span) -> Self {
        Self { kind, children, span }
    }

    pub fn leaf(kind: NodeKind, span: Span) -> Self {
        Self { kind, children: Vec::new(), span }
    }

    /// The node with any parenthesis wrappers removed. Parens carry no
    /// structure of their own; matching and equality see through them.
    pub fn strip_parens(&self) -> &SyntaxNode {
        let mut node = self;
        while matches!(node.kind, NodeKind::Paren) {
            match node.children.first() {
                Some(inner) => node = inner,
                None => break,
            }
        }
        node
    }

    /// Structural equality over the normalized shape: spans are ignored
    /// and parentheses are transparent on both sides. This is the equality
    /// rule applied to repeated metavariables.
    pub fn structural_eq(&self, other: &SyntaxNode) -> bool {
        let a = self.strip_parens();
        let b = other.strip_parens();
        a.kind == b.kind
            && a.children.len() == b.children.len()
            && a.children
                .iter()
                .zip(b.children.iter())
                .all(|(x, y)| x.structural_eq(y))
    }
}

/// Positional structural equality of two node sequences, used for repeated
/// variadic metavariables.
pub fn seq_structural_eq(a: &[&SyntaxNode], b: &[&SyntaxNode]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.structural_eq(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str, start: usize) -> SyntaxNode {
        SyntaxNode::leaf(
            NodeKind::Ident(name.to_string()),
            Span::new(start, start + name.len()),
        )
    }

    #[test]
    fn structural_eq_ignores_spans() {
        let a = ident("x", 0);
        let b = ident("x", 40);
        assert!(a.structural_eq(&b));
        assert!(!a.structural_eq(&ident("y", 0)));
    }

    #[test]
    fn structural_eq_sees_through_parens() {
        let inner = ident("x", 1);
        let wrapped = SyntaxNode::new(NodeKind::Paren, vec![inner], Span::new(0, 3));
        assert!(wrapped.structural_eq(&ident("x", 10)));
    }

    #[test]
    fn structural_eq_compares_children() {
        let sum = |l: &str, r: &str| {
            SyntaxNode::new(
                NodeKind::Binary(BinaryOp::Add),
                vec![ident(l, 0), ident(r, 4)],
                Span::new(0, 5),
            )
        };
        assert!(sum("a", "b").structural_eq(&sum("a", "b")));
        assert!(!sum("a", "b").structural_eq(&sum("b", "a")));
    }

    #[test]
    fn span_cover() {
        assert_eq!(Span::new(2, 5).cover(Span::new(4, 9)), Span::new(2, 9));
    }
}

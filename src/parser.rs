//! Recursive-descent parser for the expression/statement subset that
//! patterns and target snippets are written in.
//!
//! The same grammar serves both modes; the only difference is whether
//! metavariable tokens are legal. The parse result is a uniform
//! [`SyntaxNode`] tree rooted at a statement list.

use crate::error::ParseError;
use crate::lexer::{tokenize, Token, TokenKind};
use crate::tree::{
    AssignOp, BinaryOp, IncDecOp, NodeKind, SliceForm, Span, SyntaxNode, UnaryOp,
};

/// Parser-internal error, keeping malformed input distinct from
/// recognized-but-unsupported constructs. Mapped to [`ParseError`] for
/// target source and to `RuleError` for patterns.
#[derive(Debug)]
pub(crate) enum RawParseError {
    Syntax { message: String, offset: usize },
    UnknownConstruct { construct: String, offset: usize },
}

impl From<ParseError> for RawParseError {
    fn from(e: ParseError) -> Self {
        RawParseError::Syntax { message: e.message, offset: e.offset }
    }
}

impl From<RawParseError> for ParseError {
    fn from(e: RawParseError) -> Self {
        match e {
            RawParseError::Syntax { message, offset } => ParseError::new(message, offset),
            RawParseError::UnknownConstruct { construct, offset } => {
                ParseError::new(format!("unsupported construct `{construct}`"), offset)
            }
        }
    }
}

/// Parse a target source snippet. Metavariables are rejected.
pub fn parse_source(src: &str) -> Result<SyntaxNode, ParseError> {
    let tokens = tokenize(src, false)?;
    Parser::new(tokens).parse_program().map_err(ParseError::from)
}

/// Parse pattern text, where metavariables are legal.
pub(crate) fn parse_pattern_text(src: &str) -> Result<SyntaxNode, RawParseError> {
    let tokens = tokenize(src, true)?;
    Parser::new(tokens).parse_program()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

type PResult<T> = Result<T, RawParseError>;

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        if self.peek_kind() == &kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("expected {}", kind.describe())))
        }
    }

    fn prev_span(&self) -> Span {
        if self.pos == 0 {
            Span::empty()
        } else {
            self.tokens[self.pos - 1].span
        }
    }

    fn unexpected(&self, context: &str) -> RawParseError {
        let token = self.peek();
        if let TokenKind::Reserved(kw) = &token.kind {
            return RawParseError::UnknownConstruct {
                construct: kw.clone(),
                offset: token.span.start,
            };
        }
        RawParseError::Syntax {
            message: format!("{context}, found {}", token.kind.describe()),
            offset: token.span.start,
        }
    }

    fn parse_program(&mut self) -> PResult<SyntaxNode> {
        let start = self.peek().span;
        let mut stmts = Vec::new();
        loop {
            while self.eat(&TokenKind::Semi) {}
            if matches!(self.peek_kind(), TokenKind::Eof) {
                break;
            }
            stmts.push(self.parse_stmt()?);
            match self.peek_kind() {
                TokenKind::Semi | TokenKind::Eof => {}
                _ => return Err(self.unexpected("expected `;` or end of input")),
            }
        }
        let span = match (stmts.first(), stmts.last()) {
            (Some(first), Some(last)) => first.span.cover(last.span),
            _ => Span::new(start.start, start.start),
        };
        Ok(SyntaxNode::new(NodeKind::StmtList, stmts, span))
    }

    fn parse_stmt(&mut self) -> PResult<SyntaxNode> {
        if matches!(self.peek_kind(), TokenKind::Switch) {
            return self.parse_switch();
        }
        self.parse_simple_stmt()
    }

    fn parse_simple_stmt(&mut self) -> PResult<SyntaxNode> {
        let first = self.parse_expr()?;
        let mut lhs = vec![first];
        while self.eat(&TokenKind::Comma) {
            lhs.push(self.parse_expr()?);
        }

        if let Some(op) = assign_op(self.peek_kind()) {
            self.advance();
            let mut rhs = vec![self.parse_expr()?];
            while self.eat(&TokenKind::Comma) {
                rhs.push(self.parse_expr()?);
            }
            let lhs = into_expr_or_list(lhs);
            let rhs = into_expr_or_list(rhs);
            let span = lhs.span.cover(rhs.span);
            return Ok(SyntaxNode::new(NodeKind::Assign(op), vec![lhs, rhs], span));
        }

        if lhs.len() > 1 {
            return Err(self.unexpected("expected assignment after expression list"));
        }
        let expr = lhs.pop().expect("at least one expression");

        let incdec = match self.peek_kind() {
            TokenKind::Inc => Some(IncDecOp::Inc),
            TokenKind::Dec => Some(IncDecOp::Dec),
            _ => None,
        };
        if let Some(op) = incdec {
            self.advance();
            let span = expr.span.cover(self.prev_span());
            return Ok(SyntaxNode::new(NodeKind::IncDec(op), vec![expr], span));
        }

        Ok(expr)
    }

    fn parse_switch(&mut self) -> PResult<SyntaxNode> {
        let start = self.advance().span;
        let tag = if matches!(self.peek_kind(), TokenKind::LBrace) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::LBrace)?;

        let mut children: Vec<SyntaxNode> = Vec::new();
        let has_tag = tag.is_some();
        if let Some(tag) = tag {
            children.push(tag);
        }
        loop {
            while self.eat(&TokenKind::Semi) {}
            match self.peek_kind() {
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                TokenKind::Case => {
                    let case_start = self.advance().span;
                    let guard = self.parse_expr()?;
                    self.expect(TokenKind::Colon)?;
                    let mut body = vec![guard];
                    self.parse_clause_body(&mut body)?;
                    let span = case_start.cover(self.prev_span());
                    children.push(SyntaxNode::new(
                        NodeKind::CaseClause { is_default: false },
                        body,
                        span,
                    ));
                }
                TokenKind::Default => {
                    let case_start = self.advance().span;
                    self.expect(TokenKind::Colon)?;
                    let mut body = Vec::new();
                    self.parse_clause_body(&mut body)?;
                    let span = case_start.cover(self.prev_span());
                    children.push(SyntaxNode::new(
                        NodeKind::CaseClause { is_default: true },
                        body,
                        span,
                    ));
                }
                // Pattern bodies may stand in for the clause list, as in
                // `switch true { $*_ }`.
                TokenKind::MetaVar(_)
                | TokenKind::Wildcard
                | TokenKind::VariadicMetaVar(_)
                | TokenKind::VariadicWildcard => {
                    children.push(self.parse_primary()?);
                }
                _ => return Err(self.unexpected("expected `case`, `default` or `}`")),
            }
        }
        let span = start.cover(self.prev_span());
        Ok(SyntaxNode::new(NodeKind::Switch { has_tag }, children, span))
    }

    fn parse_clause_body(&mut self, out: &mut Vec<SyntaxNode>) -> PResult<()> {
        loop {
            while self.eat(&TokenKind::Semi) {}
            match self.peek_kind() {
                TokenKind::Case | TokenKind::Default | TokenKind::RBrace => return Ok(()),
                TokenKind::Eof => return Err(self.unexpected("expected `}`")),
                _ => out.push(self.parse_stmt()?),
            }
        }
    }

    fn parse_expr(&mut self) -> PResult<SyntaxNode> {
        self.parse_binary(1)
    }

    fn parse_binary(&mut self, min_prec: u8) -> PResult<SyntaxNode> {
        let mut left = self.parse_unary()?;
        while let Some(op) = binary_op(self.peek_kind()) {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();
            let right = self.parse_binary(prec + 1)?;
            let span = left.span.cover(right.span);
            left = SyntaxNode::new(NodeKind::Binary(op), vec![left, right], span);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> PResult<SyntaxNode> {
        let op = match self.peek_kind() {
            TokenKind::Not => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Star => Some(UnaryOp::Deref),
            TokenKind::Amp => Some(UnaryOp::Ref),
            _ => None,
        };
        if let Some(op) = op {
            let start = self.advance().span;
            let operand = self.parse_unary()?;
            let span = start.cover(operand.span);
            return Ok(SyntaxNode::new(NodeKind::Unary(op), vec![operand], span));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> PResult<SyntaxNode> {
        let mut base = self.parse_primary()?;
        loop {
            match self.peek_kind() {
                TokenKind::LParen => {
                    self.advance();
                    let mut children = vec![base];
                    self.parse_comma_list(&mut children, TokenKind::RParen)?;
                    let span = children[0].span.cover(self.prev_span());
                    base = SyntaxNode::new(NodeKind::Call, children, span);
                }
                TokenKind::LBrack => {
                    self.advance();
                    base = self.parse_index_or_slice(base)?;
                }
                TokenKind::Dot => {
                    self.advance();
                    let token = self.advance();
                    let TokenKind::Ident(field) = token.kind else {
                        return Err(RawParseError::Syntax {
                            message: format!(
                                "expected field name after `.`, found {}",
                                token.kind.describe()
                            ),
                            offset: token.span.start,
                        });
                    };
                    let span = base.span.cover(token.span);
                    base = SyntaxNode::new(NodeKind::Selector(field), vec![base], span);
                }
                _ => return Ok(base),
            }
        }
    }

    fn parse_index_or_slice(&mut self, base: SyntaxNode) -> PResult<SyntaxNode> {
        // `[` already consumed.
        if self.eat(&TokenKind::Colon) {
            if self.eat(&TokenKind::RBrack) {
                let span = base.span.cover(self.prev_span());
                return Ok(SyntaxNode::new(NodeKind::Slice(SliceForm::Full), vec![base], span));
            }
            let high = self.parse_expr()?;
            self.expect(TokenKind::RBrack)?;
            let span = base.span.cover(self.prev_span());
            return Ok(SyntaxNode::new(
                NodeKind::Slice(SliceForm::High),
                vec![base, high],
                span,
            ));
        }
        let first = self.parse_expr()?;
        if self.eat(&TokenKind::RBrack) {
            let span = base.span.cover(self.prev_span());
            return Ok(SyntaxNode::new(NodeKind::Index, vec![base, first], span));
        }
        self.expect(TokenKind::Colon)?;
        if self.eat(&TokenKind::RBrack) {
            let span = base.span.cover(self.prev_span());
            return Ok(SyntaxNode::new(
                NodeKind::Slice(SliceForm::Low),
                vec![base, first],
                span,
            ));
        }
        let high = self.parse_expr()?;
        self.expect(TokenKind::RBrack)?;
        let span = base.span.cover(self.prev_span());
        Ok(SyntaxNode::new(
            NodeKind::Slice(SliceForm::Both),
            vec![base, first, high],
            span,
        ))
    }

    /// Parse a comma-separated list up to (and including) `close`,
    /// appending the items to `out`. Allows a trailing comma.
    fn parse_comma_list(&mut self, out: &mut Vec<SyntaxNode>, close: TokenKind) -> PResult<()> {
        if self.eat(&close) {
            return Ok(());
        }
        loop {
            out.push(self.parse_composite_elem(&close)?);
            if self.eat(&TokenKind::Comma) {
                if self.eat(&close) {
                    return Ok(());
                }
                continue;
            }
            self.expect(close)?;
            return Ok(());
        }
    }

    /// One element of a call argument or composite element list: an
    /// expression, optionally `key: value`.
    fn parse_composite_elem(&mut self, close: &TokenKind) -> PResult<SyntaxNode> {
        let expr = self.parse_expr()?;
        if close == &TokenKind::RBrace && self.eat(&TokenKind::Colon) {
            let value = self.parse_expr()?;
            let span = expr.span.cover(value.span);
            return Ok(SyntaxNode::new(NodeKind::KeyValue, vec![expr, value], span));
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> PResult<SyntaxNode> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(SyntaxNode::leaf(NodeKind::Ident(name), token.span))
            }
            TokenKind::Int(value) => {
                self.advance();
                Ok(SyntaxNode::leaf(NodeKind::Int(value), token.span))
            }
            TokenKind::Str(value) => {
                self.advance();
                Ok(SyntaxNode::leaf(NodeKind::Str(value), token.span))
            }
            TokenKind::MetaVar(name) => {
                self.advance();
                Ok(SyntaxNode::leaf(NodeKind::MetaVar(name), token.span))
            }
            TokenKind::Wildcard => {
                self.advance();
                Ok(SyntaxNode::leaf(NodeKind::Wildcard, token.span))
            }
            TokenKind::VariadicMetaVar(name) => {
                self.advance();
                Ok(SyntaxNode::leaf(NodeKind::VariadicMetaVar(name), token.span))
            }
            TokenKind::VariadicWildcard => {
                self.advance();
                Ok(SyntaxNode::leaf(NodeKind::VariadicWildcard, token.span))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                let span = token.span.cover(self.prev_span());
                Ok(SyntaxNode::new(NodeKind::Paren, vec![inner], span))
            }
            TokenKind::Map => {
                self.advance();
                self.expect(TokenKind::LBrack)?;
                let key = self.parse_unary()?;
                self.expect(TokenKind::RBrack)?;
                let value = self.parse_unary()?;
                let span = token.span.cover(value.span);
                let map_type = SyntaxNode::new(NodeKind::MapType, vec![key, value], span);
                self.maybe_composite(map_type)
            }
            TokenKind::LBrack => {
                self.advance();
                let array_type = if self.eat(&TokenKind::RBrack) {
                    let elem = self.parse_unary()?;
                    let span = token.span.cover(elem.span);
                    SyntaxNode::new(NodeKind::ArrayType { sized: false }, vec![elem], span)
                } else {
                    let len = self.parse_expr()?;
                    self.expect(TokenKind::RBrack)?;
                    let elem = self.parse_unary()?;
                    let span = token.span.cover(elem.span);
                    SyntaxNode::new(NodeKind::ArrayType { sized: true }, vec![len, elem], span)
                };
                self.maybe_composite(array_type)
            }
            TokenKind::Reserved(kw) => Err(RawParseError::UnknownConstruct {
                construct: kw,
                offset: token.span.start,
            }),
            _ => Err(self.unexpected("expected expression")),
        }
    }

    /// A map/array type followed by `{...}` is a composite literal.
    fn maybe_composite(&mut self, type_node: SyntaxNode) -> PResult<SyntaxNode> {
        if !self.eat(&TokenKind::LBrace) {
            return Ok(type_node);
        }
        let mut children = vec![type_node];
        self.parse_comma_list(&mut children, TokenKind::RBrace)?;
        let span = children[0].span.cover(self.prev_span());
        Ok(SyntaxNode::new(NodeKind::Composite, children, span))
    }
}

fn into_expr_or_list(mut exprs: Vec<SyntaxNode>) -> SyntaxNode {
    if exprs.len() == 1 {
        return exprs.pop().expect("len checked");
    }
    let span = exprs
        .first()
        .expect("non-empty list")
        .span
        .cover(exprs.last().expect("non-empty list").span);
    SyntaxNode::new(NodeKind::ExprList, exprs, span)
}

fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::OrOr => BinaryOp::LogicalOr,
        TokenKind::AndAnd => BinaryOp::LogicalAnd,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::NotEq => BinaryOp::Ne,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::Le => BinaryOp::Le,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::Ge => BinaryOp::Ge,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::Caret => BinaryOp::BitXor,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Rem,
        TokenKind::Shl => BinaryOp::Shl,
        TokenKind::Shr => BinaryOp::Shr,
        TokenKind::Amp => BinaryOp::BitAnd,
        TokenKind::AndNot => BinaryOp::AndNot,
        _ => return None,
    })
}

fn assign_op(kind: &TokenKind) -> Option<AssignOp> {
    Some(match kind {
        TokenKind::Assign => AssignOp::Assign,
        TokenKind::Define => AssignOp::Define,
        TokenKind::AddAssign => AssignOp::AddAssign,
        TokenKind::SubAssign => AssignOp::SubAssign,
        TokenKind::MulAssign => AssignOp::MulAssign,
        TokenKind::DivAssign => AssignOp::DivAssign,
        TokenKind::RemAssign => AssignOp::RemAssign,
        TokenKind::AndAssign => AssignOp::AndAssign,
        TokenKind::OrAssign => AssignOp::OrAssign,
        TokenKind::XorAssign => AssignOp::XorAssign,
        TokenKind::ShlAssign => AssignOp::ShlAssign,
        TokenKind::ShrAssign => AssignOp::ShrAssign,
        TokenKind::AndNotAssign => AssignOp::AndNotAssign,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_stmt(src: &str) -> SyntaxNode {
        let root = parse_source(src).unwrap();
        assert_eq!(root.children.len(), 1, "expected a single statement");
        root.children.into_iter().next().unwrap()
    }

    fn parse_pattern_stmt(src: &str) -> SyntaxNode {
        let root = parse_pattern_text(src).unwrap();
        assert_eq!(root.children.len(), 1, "expected a single statement");
        root.children.into_iter().next().unwrap()
    }

    #[test]
    fn precedence_shapes_the_tree() {
        let node = parse_stmt("a + b * c");
        assert_eq!(node.kind, NodeKind::Binary(BinaryOp::Add));
        assert_eq!(node.children[1].kind, NodeKind::Binary(BinaryOp::Mul));

        let node = parse_stmt("a == b || c == d");
        assert_eq!(node.kind, NodeKind::Binary(BinaryOp::LogicalOr));
        assert_eq!(node.children[0].kind, NodeKind::Binary(BinaryOp::Eq));
    }

    #[test]
    fn parses_calls_selectors_and_indexing() {
        let node = parse_stmt("strings.Replace(s, old, new, -1)");
        assert_eq!(node.kind, NodeKind::Call);
        assert_eq!(node.children.len(), 5);
        assert_eq!(node.children[0].kind, NodeKind::Selector("Replace".to_string()));
        assert_eq!(node.children[4].kind, NodeKind::Unary(UnaryOp::Neg));

        let node = parse_stmt("s[len(s)]");
        assert_eq!(node.kind, NodeKind::Index);

        let node = parse_stmt("s[:]");
        assert_eq!(node.kind, NodeKind::Slice(SliceForm::Full));
        assert_eq!(node.children.len(), 1);

        let node = parse_stmt("s[1:n]");
        assert_eq!(node.kind, NodeKind::Slice(SliceForm::Both));
        assert_eq!(node.children.len(), 3);
    }

    #[test]
    fn parses_assignments_and_incdec() {
        let node = parse_stmt("x = x + 1");
        assert_eq!(node.kind, NodeKind::Assign(AssignOp::Assign));

        let node = parse_stmt("x, y = y, x");
        assert_eq!(node.kind, NodeKind::Assign(AssignOp::Assign));
        assert_eq!(node.children[0].kind, NodeKind::ExprList);
        assert_eq!(node.children[1].kind, NodeKind::ExprList);

        let node = parse_stmt("i++");
        assert_eq!(node.kind, NodeKind::IncDec(IncDecOp::Inc));
    }

    #[test]
    fn parses_multiple_statements() {
        let root = parse_source("tmp := x; x = y; y = tmp").unwrap();
        assert_eq!(root.kind, NodeKind::StmtList);
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.children[0].kind, NodeKind::Assign(AssignOp::Define));

        // Newlines separate statements too.
        let root = parse_source("a()\nb()\n").unwrap();
        assert_eq!(root.children.len(), 2);
    }

    #[test]
    fn parses_composite_literals() {
        let node = parse_pattern_stmt("map[$_]$_{$*_, $k: $_, $*_, $k: $_, $*_}");
        assert_eq!(node.kind, NodeKind::Composite);
        assert_eq!(node.children[0].kind, NodeKind::MapType);
        assert_eq!(node.children.len(), 6);
        assert_eq!(node.children[2].kind, NodeKind::KeyValue);
    }

    #[test]
    fn parses_conversion_through_array_type() {
        let node = parse_stmt("copy(b, []byte(s))");
        assert_eq!(node.kind, NodeKind::Call);
        let conversion = &node.children[2];
        assert_eq!(conversion.kind, NodeKind::Call);
        assert_eq!(conversion.children[0].kind, NodeKind::ArrayType { sized: false });
    }

    #[test]
    fn parses_switch() {
        let node = parse_pattern_stmt("switch true { $*_ }");
        assert_eq!(node.kind, NodeKind::Switch { has_tag: true });
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[1].kind, NodeKind::VariadicWildcard);

        let node = parse_stmt("switch x { case 1: f(); case 2: g(); default: h() }");
        assert_eq!(node.kind, NodeKind::Switch { has_tag: true });
        assert_eq!(node.children.len(), 4);
        assert_eq!(node.children[3].kind, NodeKind::CaseClause { is_default: true });
    }

    #[test]
    fn reserved_keyword_is_unknown_construct() {
        let err = parse_pattern_text("select { }").unwrap_err();
        assert!(matches!(err, RawParseError::UnknownConstruct { ref construct, .. }
            if construct == "select"));

        let err = parse_source("go f()").unwrap_err();
        assert!(err.message.contains("unsupported construct `go`"));
    }

    #[test]
    fn malformed_input_is_a_syntax_error() {
        assert!(parse_source("f(").is_err());
        assert!(parse_source("a +").is_err());
        assert!(parse_source("a b").is_err());
    }

    #[test]
    fn spans_cover_the_statement() {
        let node = parse_stmt("x = y + 1");
        assert_eq!(node.span, Span::new(0, 9));
        assert_eq!(node.children[1].span, Span::new(4, 9));
    }
}

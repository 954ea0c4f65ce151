//! Rendering of syntax trees back to source text.
//!
//! Rendering is precedence-aware: a subtree is parenthesized whenever its
//! operator binds weaker than the position it is spliced into, so a
//! suggestion rendered from a template stays semantically equivalent to
//! the tree it denotes. Used both for `$$`/metavariable substitution in
//! findings and for displaying matched nodes.

use std::fmt::Write as _;

use crate::bindings::{Binding, Bindings};
use crate::tree::{NodeKind, SliceForm, SyntaxNode, UnaryOp};

/// A template tree referenced a metavariable with no usable binding.
#[derive(Debug)]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

const PREC_EXPR: u8 = 0;
const PREC_UNARY: u8 = 6;
const PREC_POSTFIX: u8 = 7;

/// Render a tree as-is. Metavariables render in their `$name` spelling.
pub fn render(node: &SyntaxNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node, PREC_EXPR, None).expect("rendering without bindings is infallible");
    out
}

/// Render a template tree, substituting bound metavariables. Variadic
/// bindings expand in list positions and disappear when empty.
pub fn render_with<'a>(node: &'a SyntaxNode, bindings: &Bindings<'_, 'a>) -> Result<String, RenderError> {
    let mut out = String::new();
    write_node(&mut out, node, PREC_EXPR, Some(bindings))?;
    Ok(out)
}

/// Render a run of sibling statements, as needed for `$$` on a
/// multi-statement match.
pub fn render_stmts(nodes: &[&SyntaxNode]) -> String {
    nodes
        .iter()
        .map(|n| render(n))
        .collect::<Vec<_>>()
        .join("; ")
}

fn precedence(kind: &NodeKind) -> u8 {
    match kind {
        NodeKind::Binary(op) => op.precedence(),
        NodeKind::Unary(_) => PREC_UNARY,
        NodeKind::Assign(_)
        | NodeKind::IncDec(_)
        | NodeKind::ExprList
        | NodeKind::StmtList
        | NodeKind::Switch { .. }
        | NodeKind::CaseClause { .. }
        | NodeKind::KeyValue => PREC_EXPR,
        _ => PREC_POSTFIX,
    }
}

/// The node a metavariable reference stands for, if it resolves to a
/// single node. Used for context-sensitive decisions (e.g. `-` next to `-`).
fn effective<'a>(node: &'a SyntaxNode, bindings: Option<&Bindings<'_, 'a>>) -> &'a SyntaxNode {
    if let NodeKind::MetaVar(name) = &node.kind {
        if let Some(Binding::One(bound)) = bindings.and_then(|b| b.get(name)) {
            return *bound;
        }
    }
    node
}

fn write_node<'a>(
    out: &mut String,
    node: &'a SyntaxNode,
    min_prec: u8,
    bindings: Option<&Bindings<'_, 'a>>,
) -> Result<(), RenderError> {
    match &node.kind {
        NodeKind::MetaVar(name) => {
            let Some(bindings) = bindings else {
                out.push('$');
                out.push_str(name);
                return Ok(());
            };
            match bindings.get(name) {
                Some(Binding::One(bound)) => write_node(out, bound, min_prec, None),
                Some(Binding::Many(seq)) => {
                    let rendered =
                        seq.iter().map(|n| render(n)).collect::<Vec<_>>().join(", ");
                    out.push_str(&rendered);
                    Ok(())
                }
                None => Err(RenderError::new(format!("`${name}` is not bound"))),
            }
        }
        NodeKind::VariadicMetaVar(name) => {
            let Some(bindings) = bindings else {
                out.push_str("$*");
                out.push_str(name);
                return Ok(());
            };
            match bindings.get(name) {
                Some(Binding::Many(seq)) => {
                    let rendered =
                        seq.iter().map(|n| render(n)).collect::<Vec<_>>().join(", ");
                    out.push_str(&rendered);
                    Ok(())
                }
                Some(Binding::One(bound)) => write_node(out, bound, min_prec, None),
                None => Err(RenderError::new(format!("`$*{name}` is not bound"))),
            }
        }
        NodeKind::Wildcard => {
            if bindings.is_some() {
                return Err(RenderError::new("`$_` cannot appear in a rendered template"));
            }
            out.push_str("$_");
            Ok(())
        }
        NodeKind::VariadicWildcard => {
            if bindings.is_some() {
                return Err(RenderError::new("`$*_` cannot appear in a rendered template"));
            }
            out.push_str("$*_");
            Ok(())
        }
        _ => {
            let needs_paren = precedence(&node.kind) < min_prec;
            if needs_paren {
                out.push('(');
            }
            write_shape(out, node, bindings)?;
            if needs_paren {
                out.push(')');
            }
            Ok(())
        }
    }
}

fn write_shape<'a>(
    out: &mut String,
    node: &'a SyntaxNode,
    bindings: Option<&Bindings<'_, 'a>>,
) -> Result<(), RenderError> {
    let children = &node.children;
    match &node.kind {
        NodeKind::Ident(name) => out.push_str(name),
        NodeKind::Int(value) => {
            let _ = write!(out, "{value}");
        }
        NodeKind::Str(value) => {
            out.push('"');
            for c in value.chars() {
                match c {
                    '\\' => out.push_str("\\\\"),
                    '"' => out.push_str("\\\""),
                    '\n' => out.push_str("\\n"),
                    '\t' => out.push_str("\\t"),
                    other => out.push(other),
                }
            }
            out.push('"');
        }
        NodeKind::Unary(op) => {
            out.push_str(op.symbol());
            let operand = &children[0];
            // `-(-x)` and `&(&x)`, not `--x` and `&&x`.
            let clashes = matches!(
                (op, &effective(operand, bindings).kind),
                (UnaryOp::Neg, NodeKind::Unary(UnaryOp::Neg))
                    | (UnaryOp::Ref, NodeKind::Unary(UnaryOp::Ref))
            );
            if clashes {
                out.push('(');
                write_node(out, operand, PREC_EXPR, bindings)?;
                out.push(')');
            } else {
                write_node(out, operand, PREC_UNARY, bindings)?;
            }
        }
        NodeKind::Binary(op) => {
            let prec = op.precedence();
            write_node(out, &children[0], prec, bindings)?;
            let _ = write!(out, " {} ", op.symbol());
            write_node(out, &children[1], prec + 1, bindings)?;
        }
        NodeKind::Assign(op) => {
            write_node(out, &children[0], PREC_EXPR, bindings)?;
            let _ = write!(out, " {} ", op.symbol());
            write_node(out, &children[1], PREC_EXPR, bindings)?;
        }
        NodeKind::IncDec(op) => {
            write_node(out, &children[0], PREC_UNARY, bindings)?;
            out.push_str(op.symbol());
        }
        NodeKind::Call => {
            write_node(out, &children[0], PREC_POSTFIX, bindings)?;
            out.push('(');
            write_list(out, &children[1..], ", ", bindings)?;
            out.push(')');
        }
        NodeKind::Index => {
            write_node(out, &children[0], PREC_POSTFIX, bindings)?;
            out.push('[');
            write_node(out, &children[1], PREC_EXPR, bindings)?;
            out.push(']');
        }
        NodeKind::Slice(form) => {
            write_node(out, &children[0], PREC_POSTFIX, bindings)?;
            out.push('[');
            match form {
                SliceForm::Full => out.push(':'),
                SliceForm::Low => {
                    write_node(out, &children[1], PREC_EXPR, bindings)?;
                    out.push(':');
                }
                SliceForm::High => {
                    out.push(':');
                    write_node(out, &children[1], PREC_EXPR, bindings)?;
                }
                SliceForm::Both => {
                    write_node(out, &children[1], PREC_EXPR, bindings)?;
                    out.push(':');
                    write_node(out, &children[2], PREC_EXPR, bindings)?;
                }
            }
            out.push(']');
        }
        NodeKind::Selector(field) => {
            write_node(out, &children[0], PREC_POSTFIX, bindings)?;
            out.push('.');
            out.push_str(field);
        }
        NodeKind::Paren => {
            out.push('(');
            write_node(out, &children[0], PREC_EXPR, bindings)?;
            out.push(')');
        }
        NodeKind::KeyValue => {
            write_node(out, &children[0], PREC_EXPR, bindings)?;
            out.push_str(": ");
            write_node(out, &children[1], PREC_EXPR, bindings)?;
        }
        NodeKind::Composite => {
            write_node(out, &children[0], PREC_POSTFIX, bindings)?;
            out.push('{');
            write_list(out, &children[1..], ", ", bindings)?;
            out.push('}');
        }
        NodeKind::MapType => {
            out.push_str("map[");
            write_node(out, &children[0], PREC_EXPR, bindings)?;
            out.push(']');
            write_node(out, &children[1], PREC_UNARY, bindings)?;
        }
        NodeKind::ArrayType { sized } => {
            out.push('[');
            if *sized {
                write_node(out, &children[0], PREC_EXPR, bindings)?;
                out.push(']');
                write_node(out, &children[1], PREC_UNARY, bindings)?;
            } else {
                out.push(']');
                write_node(out, &children[0], PREC_UNARY, bindings)?;
            }
        }
        NodeKind::ExprList => {
            write_list(out, children, ", ", bindings)?;
        }
        NodeKind::StmtList => {
            write_list(out, children, "; ", bindings)?;
        }
        NodeKind::Switch { has_tag } => {
            out.push_str("switch");
            let clauses = if *has_tag {
                out.push(' ');
                write_node(out, &children[0], PREC_EXPR, bindings)?;
                &children[1..]
            } else {
                &children[..]
            };
            out.push_str(" { ");
            write_list(out, clauses, "; ", bindings)?;
            out.push_str(" }");
        }
        NodeKind::CaseClause { is_default } => {
            let body = if *is_default {
                out.push_str("default: ");
                &children[..]
            } else {
                out.push_str("case ");
                write_node(out, &children[0], PREC_EXPR, bindings)?;
                out.push_str(": ");
                &children[1..]
            };
            write_list(out, body, "; ", bindings)?;
        }
        NodeKind::MetaVar(_)
        | NodeKind::Wildcard
        | NodeKind::VariadicMetaVar(_)
        | NodeKind::VariadicWildcard => unreachable!("handled in write_node"),
    }
    Ok(())
}

/// Render a child list. Variadic metavariables expand inline and
/// contribute nothing (not even a separator) when bound to zero nodes.
fn write_list<'a>(
    out: &mut String,
    nodes: &'a [SyntaxNode],
    sep: &str,
    bindings: Option<&Bindings<'_, 'a>>,
) -> Result<(), RenderError> {
    let mut pieces: Vec<String> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let (NodeKind::VariadicMetaVar(name), Some(bindings)) = (&node.kind, bindings) {
            match bindings.get(name) {
                Some(Binding::Many(seq)) => {
                    pieces.extend(seq.iter().map(|n| render(n)));
                    continue;
                }
                Some(Binding::One(bound)) => {
                    pieces.push(render(bound));
                    continue;
                }
                None => return Err(RenderError::new(format!("`$*{name}` is not bound"))),
            }
        }
        let mut piece = String::new();
        write_node(&mut piece, node, PREC_EXPR, bindings)?;
        pieces.push(piece);
    }
    out.push_str(&pieces.join(sep));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_pattern_text, parse_source};
    use crate::tree::SyntaxNode;

    fn expr(src: &str) -> SyntaxNode {
        parse_source(src).unwrap().children.into_iter().next().unwrap()
    }

    fn template(src: &str) -> SyntaxNode {
        parse_pattern_text(src)
            .unwrap()
            .children
            .into_iter()
            .next()
            .unwrap()
    }

    #[test]
    fn round_trips_plain_expressions() {
        for src in [
            "a + b * c",
            "(a + b) * c",
            "strings.Replace(s, old, new, -1)",
            "s[len(s)]",
            "s[:]",
            "x, y = y, x",
            "i++",
            "!ok",
            "a &^ b",
            "map[string]int{a: 1, b: 2}",
            "copy(b, []byte(s))",
        ] {
            assert_eq!(render(&expr(src)), src, "round-trip of `{src}`");
        }
    }

    #[test]
    fn substitution_adds_parens_for_precedence() {
        let tmpl = template("$x * 2");
        let bound = expr("a + b");
        let mut bindings = Bindings::new();
        assert!(bindings.bind_one("x", &bound));
        insta::assert_snapshot!(render_with(&tmpl, &bindings).unwrap(), @"(a + b) * 2");
    }

    #[test]
    fn substitution_keeps_tight_operands_bare() {
        let tmpl = template("$x++");
        let bound = expr("i");
        let mut bindings = Bindings::new();
        assert!(bindings.bind_one("x", &bound));
        assert_eq!(render_with(&tmpl, &bindings).unwrap(), "i++");
    }

    #[test]
    fn negation_does_not_collapse_into_decrement() {
        let tmpl = template("-$x");
        let bound = expr("-a");
        let mut bindings = Bindings::new();
        assert!(bindings.bind_one("x", &bound));
        assert_eq!(render_with(&tmpl, &bindings).unwrap(), "-(-a)");
    }

    #[test]
    fn variadic_expansion_in_argument_lists() {
        let tmpl = template("f($*xs, last)");
        let a = expr("a");
        let b = expr("b + c");
        let mut bindings = Bindings::new();
        assert!(bindings.bind_many("xs", &[&a, &b]));
        assert_eq!(render_with(&tmpl, &bindings).unwrap(), "f(a, b + c, last)");

        let mut empty = Bindings::new();
        assert!(empty.bind_many("xs", &[]));
        assert_eq!(render_with(&tmpl, &empty).unwrap(), "f(last)");
    }

    #[test]
    fn unbound_template_var_is_an_error() {
        let tmpl = template("$x + 1");
        let bindings = Bindings::new();
        assert!(render_with(&tmpl, &bindings).is_err());
    }

    #[test]
    fn string_literals_are_requoted() {
        assert_eq!(render(&expr(r#"f("a\"b\n")"#)), r#"f("a\"b\n")"#);
    }
}

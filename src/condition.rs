//! Side conditions gating accepted matches.
//!
//! A condition is a small predicate tree over bound metavariables,
//! evaluated only after the structural match succeeds. `&`/`|`/`!` on
//! [`Condition`] values mirror the `&&`/`||`/`!` combinators of the rule
//! DSL. Evaluation short-circuits, and a predicate whose semantic facts
//! are unavailable is false rather than an error: a rule whose condition
//! cannot be evaluated must not fire.

use crate::bindings::{Binding, Bindings};
use crate::facts::SemanticFacts;
use crate::tree::SyntaxNode;

#[derive(Clone, Debug)]
pub enum Condition {
    /// The binding is a compile-time constant.
    Const(String),
    /// The binding is side-effect free.
    Pure(String),
    /// The binding's type matches a type shape, e.g. `[]$elem`.
    TypeIs(String, TypeShape),
    /// The binding's type satisfies a named capability.
    TypeImplements(String, String),
    /// Two bindings have identical types.
    TypeIdentical(String, String),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn constant(var: &str) -> Self {
        Condition::Const(var.to_string())
    }

    pub fn pure(var: &str) -> Self {
        Condition::Pure(var.to_string())
    }

    pub fn type_is(var: &str, shape: &str) -> Self {
        Condition::TypeIs(var.to_string(), TypeShape::new(shape))
    }

    pub fn type_implements(var: &str, capability: &str) -> Self {
        Condition::TypeImplements(var.to_string(), capability.to_string())
    }

    pub fn type_identical(var: &str, other: &str) -> Self {
        Condition::TypeIdentical(var.to_string(), other.to_string())
    }

    pub fn eval(&self, bindings: &Bindings, facts: &dyn SemanticFacts) -> bool {
        match self {
            Condition::And(a, b) => a.eval(bindings, facts) && b.eval(bindings, facts),
            Condition::Or(a, b) => a.eval(bindings, facts) || b.eval(bindings, facts),
            Condition::Not(inner) => !inner.eval(bindings, facts),
            Condition::Const(var) => {
                self.all_bound(bindings, var, |node| facts.is_const(node))
            }
            Condition::Pure(var) => self.all_bound(bindings, var, |node| facts.is_pure(node)),
            Condition::TypeIs(var, shape) => self.all_bound(bindings, var, |node| {
                facts.type_of(node).map(|ty| shape.matches(&ty))
            }),
            Condition::TypeImplements(var, capability) => {
                self.all_bound(bindings, var, |node| facts.implements(node, capability))
            }
            Condition::TypeIdentical(var, other) => {
                let lhs = self.types_of(bindings, var, facts);
                let rhs = self.types_of(bindings, other, facts);
                match (lhs, rhs) {
                    (Some(a), Some(b)) => a == b,
                    _ => {
                        tracing::trace!(var = %var, other = %other, "type unavailable, condition is false");
                        false
                    }
                }
            }
        }
    }

    /// Apply a fact query to every node bound to `var`. An unbound name
    /// or an unavailable fact fails closed.
    fn all_bound<F>(&self, bindings: &Bindings, var: &str, query: F) -> bool
    where
        F: Fn(&SyntaxNode) -> Option<bool>,
    {
        let nodes = match bindings.get(var) {
            Some(Binding::One(node)) => vec![*node],
            Some(Binding::Many(seq)) => seq.iter().copied().collect(),
            None => {
                tracing::trace!(var = %var, "condition references an unbound metavariable");
                return false;
            }
        };
        nodes.into_iter().all(|node| match query(node) {
            Some(answer) => answer,
            None => {
                tracing::trace!(var = %var, "semantic fact unavailable, condition is false");
                false
            }
        })
    }

    fn types_of(
        &self,
        bindings: &Bindings,
        var: &str,
        facts: &dyn SemanticFacts,
    ) -> Option<String> {
        match bindings.get(var) {
            Some(Binding::One(node)) => facts.type_of(node),
            _ => None,
        }
    }
}

impl std::ops::BitAnd for Condition {
    type Output = Condition;
    fn bitand(self, rhs: Condition) -> Condition {
        Condition::And(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::BitOr for Condition {
    type Output = Condition;
    fn bitor(self, rhs: Condition) -> Condition {
        Condition::Or(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Not for Condition {
    type Output = Condition;
    fn not(self) -> Condition {
        Condition::Not(Box::new(self))
    }
}

/// A type shape such as `string`, `[]$elem` or `*[$_]$_`: literal tokens
/// must appear verbatim in the type, `$`-segments match any single
/// balanced type operand.
#[derive(Clone, Debug)]
pub struct TypeShape {
    source: String,
    tokens: Vec<ShapeToken>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum ShapeToken {
    Text(String),
    Any,
}

impl TypeShape {
    pub fn new(source: &str) -> Self {
        let tokens = shape_tokens(source);
        Self { source: source.to_string(), tokens }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, ty: &str) -> bool {
        let ty_tokens: Vec<String> = type_tokens(ty);
        match_tokens(&self.tokens, &ty_tokens)
    }
}

fn shape_tokens(source: &str) -> Vec<ShapeToken> {
    let mut tokens = Vec::new();
    let bytes = source.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() {
            i += 1;
        } else if c == b'$' {
            i += 1;
            while i < bytes.len() && (bytes[i] == b'_' || bytes[i].is_ascii_alphanumeric()) {
                i += 1;
            }
            tokens.push(ShapeToken::Any);
        } else if is_word_byte(c) {
            let start = i;
            while i < bytes.len() && is_word_byte(bytes[i]) {
                i += 1;
            }
            tokens.push(ShapeToken::Text(source[start..i].to_string()));
        } else {
            tokens.push(ShapeToken::Text((c as char).to_string()));
            i += 1;
        }
    }
    tokens
}

fn type_tokens(ty: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let bytes = ty.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() {
            i += 1;
        } else if is_word_byte(c) {
            let start = i;
            while i < bytes.len() && is_word_byte(bytes[i]) {
                i += 1;
            }
            tokens.push(ty[start..i].to_string());
        } else {
            tokens.push((c as char).to_string());
            i += 1;
        }
    }
    tokens
}

fn is_word_byte(c: u8) -> bool {
    c == b'_' || c == b'.' || c.is_ascii_alphanumeric()
}

fn match_tokens(shape: &[ShapeToken], ty: &[String]) -> bool {
    match shape.first() {
        None => ty.is_empty(),
        Some(ShapeToken::Text(text)) => {
            ty.first().map(String::as_str) == Some(text.as_str())
                && match_tokens(&shape[1..], &ty[1..])
        }
        Some(ShapeToken::Any) => match consume_operand(ty, 0) {
            Some(next) => match_tokens(&shape[1..], &ty[next..]),
            None => false,
        },
    }
}

/// Consume one balanced type operand starting at `i`: `*T`, `[...]T`,
/// `map[K]V` or a bare name. Returns the index after the operand.
fn consume_operand(tokens: &[String], i: usize) -> Option<usize> {
    let token = tokens.get(i)?;
    match token.as_str() {
        "*" => consume_operand(tokens, i + 1),
        "[" => {
            let close = find_close(tokens, i, "[", "]")?;
            consume_operand(tokens, close + 1)
        }
        "map" => {
            if tokens.get(i + 1).map(String::as_str) != Some("[") {
                return Some(i + 1);
            }
            let close = find_close(tokens, i + 1, "[", "]")?;
            consume_operand(tokens, close + 1)
        }
        t if t.chars().next().is_some_and(is_word_char) => Some(i + 1),
        _ => None,
    }
}

fn is_word_char(c: char) -> bool {
    c == '_' || c == '.' || c.is_ascii_alphanumeric()
}

fn find_close(tokens: &[String], open_at: usize, open: &str, close: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, token) in tokens[open_at..].iter().enumerate() {
        if token == open {
            depth += 1;
        } else if token == close {
            depth -= 1;
            if depth == 0 {
                return Some(open_at + offset);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{DefaultFacts, FactsTable};
    use crate::parser::parse_source;
    use crate::tree::SyntaxNode;

    fn expr(src: &str) -> SyntaxNode {
        parse_source(src).unwrap().children.into_iter().next().unwrap()
    }

    #[test]
    fn type_shapes_match_balanced_operands() {
        let shape = TypeShape::new("[]$elem");
        assert!(shape.matches("[]string"));
        assert!(shape.matches("[][]byte"));
        assert!(!shape.matches("string"));
        assert!(!shape.matches("map[string]int"));

        let shape = TypeShape::new("*[$_]$_");
        assert!(shape.matches("*[4]int"));
        assert!(!shape.matches("*[]int"));
        assert!(!shape.matches("[4]int"));

        let shape = TypeShape::new("string");
        assert!(shape.matches("string"));
        assert!(!shape.matches("[]string"));

        let shape = TypeShape::new("map[$_]$v");
        assert!(shape.matches("map[string][]byte"));
    }

    #[test]
    fn unavailable_facts_fail_closed() {
        let node = expr("f()");
        let mut bindings = Bindings::new();
        assert!(bindings.bind_one("x", &node));

        // DefaultFacts cannot answer purity for a call.
        assert!(!Condition::pure("x").eval(&bindings, &DefaultFacts));
        // Unbound names fail closed too.
        assert!(!Condition::pure("y").eval(&bindings, &DefaultFacts));
    }

    #[test]
    fn boolean_combinators_short_circuit() {
        let lit = expr("1");
        let mut bindings = Bindings::new();
        assert!(bindings.bind_one("x", &lit));

        let cond = Condition::constant("x") | Condition::type_is("x", "string");
        assert!(cond.eval(&bindings, &DefaultFacts));

        let cond = Condition::constant("x") & !Condition::pure("x");
        assert!(!cond.eval(&bindings, &DefaultFacts));
    }

    #[test]
    fn type_identical_compares_reported_types() {
        let a = expr("a");
        let b = expr("b");
        let mut bindings = Bindings::new();
        assert!(bindings.bind_one("x", &a));
        assert!(bindings.bind_one("y", &b));

        let mut table = FactsTable::new();
        table.set_type("a", "[]byte").set_type("b", "[]byte");
        assert!(Condition::type_identical("x", "y").eval(&bindings, &table));

        table.set_type("b", "string");
        assert!(!Condition::type_identical("x", "y").eval(&bindings, &table));
    }

    #[test]
    fn type_is_queries_the_provider() {
        let node = expr("s");
        let mut bindings = Bindings::new();
        assert!(bindings.bind_one("s", &node));

        let mut table = FactsTable::new();
        table.set_type("s", "[]int");
        assert!(Condition::type_is("s", "[]$elem").eval(&bindings, &table));
        assert!(!Condition::type_is("s", "string").eval(&bindings, &table));
    }
}

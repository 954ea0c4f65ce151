//! Message templates.
//!
//! Report messages substitute `$name` with the rendered binding and `$$`
//! with the full matched text. Suggestion templates are *not* handled
//! here: they are parsed as pattern trees and rendered precedence-aware
//! (see `render`), because their output is code, not prose.

use crate::bindings::{Binding, Bindings};
use crate::render::render;

#[derive(Clone, Debug, PartialEq)]
enum Segment {
    Text(String),
    Var(String),
    FullMatch,
}

/// A compiled report-message template.
#[derive(Clone, Debug)]
pub struct MessageTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl MessageTemplate {
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '$' {
                text.push(c);
                continue;
            }
            match chars.peek() {
                Some('$') => {
                    chars.next();
                    flush(&mut segments, &mut text);
                    segments.push(Segment::FullMatch);
                }
                Some(c2) if *c2 == '_' || c2.is_ascii_alphanumeric() => {
                    flush(&mut segments, &mut text);
                    let mut name = String::new();
                    while let Some(c2) = chars.peek() {
                        if *c2 == '_' || c2.is_ascii_alphanumeric() {
                            name.push(*c2);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    segments.push(Segment::Var(name));
                }
                // A lone `$` is literal text.
                _ => text.push('$'),
            }
        }
        flush(&mut segments, &mut text);
        Self { source: source.to_string(), segments }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Metavariable names the template references.
    pub fn vars(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Var(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Substitute bindings into the template. An unbound reference keeps
    /// its `$name` spelling; rules are validated at compile time, so this
    /// only happens when a different alternative matched.
    pub fn render(&self, bindings: &Bindings, full_match: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::FullMatch => out.push_str(full_match),
                Segment::Var(name) => match bindings.get(name) {
                    Some(Binding::One(node)) => out.push_str(&render(node)),
                    Some(Binding::Many(seq)) => {
                        let rendered =
                            seq.iter().map(|n| render(n)).collect::<Vec<_>>().join(", ");
                        out.push_str(&rendered);
                    }
                    None => {
                        tracing::warn!(var = %name, "message template var unbound by the matched alternative");
                        out.push('$');
                        out.push_str(name);
                    }
                },
            }
        }
        out
    }
}

fn flush(segments: &mut Vec<Segment>, text: &mut String) {
    if !text.is_empty() {
        segments.push(Segment::Text(std::mem::take(text)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;
    use crate::tree::SyntaxNode;

    fn expr(src: &str) -> SyntaxNode {
        parse_source(src).unwrap().children.into_iter().next().unwrap()
    }

    #[test]
    fn substitutes_vars_and_full_match() {
        let template = MessageTemplate::parse("suspicious duplicate key $k in $$");
        let key = expr("name");
        let mut bindings = Bindings::new();
        assert!(bindings.bind_one("k", &key));

        assert_eq!(
            template.render(&bindings, "map[string]int{...}"),
            "suspicious duplicate key name in map[string]int{...}"
        );
    }

    #[test]
    fn collects_referenced_vars() {
        let template = MessageTemplate::parse("replace $v with nil");
        assert_eq!(template.vars().collect::<Vec<_>>(), ["v"]);
    }

    #[test]
    fn lone_dollar_is_literal() {
        let template = MessageTemplate::parse("costs $ 5");
        let bindings = Bindings::new();
        assert_eq!(template.render(&bindings, ""), "costs $ 5");
    }
}

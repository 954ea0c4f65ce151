use thiserror::Error;

/// Error raised while parsing a target source snippet.
///
/// Parsing errors are fatal for the file they occur in, but never for the
/// whole run: the caller collects them and keeps checking other files.
#[derive(Debug, Error)]
#[error("parse error at offset {offset}: {message}")]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self { message: message.into(), offset }
    }
}

/// Error raised while compiling a single rule.
///
/// A rule that fails to compile is dropped from the set; the remaining
/// rules still load (collect-and-continue).
#[derive(Debug, Error)]
pub enum RuleError {
    /// The pattern or template text is malformed.
    #[error("syntax error in pattern at offset {offset}: {message}")]
    Syntax { message: String, offset: usize },

    /// The pattern uses a construct the pattern grammar does not support.
    #[error("unknown construct in pattern: {construct}")]
    UnknownConstruct { construct: String },

    /// A template references a metavariable that no pattern alternative
    /// of the rule binds.
    #[error("template references `${name}`, which no pattern alternative binds")]
    UnboundTemplateVar { name: String },

    /// A rule has no pattern alternative at all.
    #[error("rule has no pattern")]
    EmptyRule,
}

impl From<ParseError> for RuleError {
    fn from(e: ParseError) -> Self {
        RuleError::Syntax { message: e.message, offset: e.offset }
    }
}

/// The target tree handed to the engine is corrupt, e.g. it contains
/// pattern-only nodes such as metavariables. Fails the whole traversal.
#[derive(Debug, Error)]
#[error("malformed target tree: {message}")]
pub struct MalformedTreeError {
    pub message: String,
}

impl MalformedTreeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_error_display() {
        let err = RuleError::Syntax { message: "unterminated string".to_string(), offset: 7 };
        assert_eq!(
            err.to_string(),
            "syntax error in pattern at offset 7: unterminated string"
        );

        let err = RuleError::UnknownConstruct { construct: "select".to_string() };
        assert_eq!(err.to_string(), "unknown construct in pattern: select");

        let err = RuleError::UnboundTemplateVar { name: "x".to_string() };
        assert_eq!(
            err.to_string(),
            "template references `$x`, which no pattern alternative binds"
        );
    }
}

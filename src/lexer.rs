use crate::error::ParseError;
use crate::tree::Span;

/// Token stream element produced by [`tokenize`].
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Int(i64),
    Str(String),

    // Pattern-only tokens, rejected when lexing target source.
    MetaVar(String),
    Wildcard,
    VariadicMetaVar(String),
    VariadicWildcard,

    LParen,
    RParen,
    LBrack,
    RBrack,
    LBrace,
    RBrace,
    Comma,
    Semi,
    Colon,
    Dot,

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
    Inc,
    Dec,

    OrOr,
    AndAnd,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Shl,
    Shr,
    AndNot,
    Not,

    // Supported keywords.
    Map,
    Switch,
    Case,
    Default,

    /// A reserved keyword the grammar does not support (`select`, `for`,
    /// `func`, ...). The parser turns this into an unknown-construct error.
    Reserved(String),

    Eof,
}

impl TokenKind {
    /// Human-readable description for error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::Int(v) => format!("integer `{v}`"),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::MetaVar(name) => format!("metavariable `${name}`"),
            TokenKind::Wildcard => "wildcard `$_`".to_string(),
            TokenKind::VariadicMetaVar(name) => format!("variadic metavariable `$*{name}`"),
            TokenKind::VariadicWildcard => "variadic wildcard `$*_`".to_string(),
            TokenKind::Reserved(kw) => format!("keyword `{kw}`"),
            TokenKind::Eof => "end of input".to_string(),
            other => format!("`{}`", other.symbol()),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrack => "[",
            TokenKind::RBrack => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Semi => ";",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::Assign => "=",
            TokenKind::Define => ":=",
            TokenKind::AddAssign => "+=",
            TokenKind::SubAssign => "-=",
            TokenKind::MulAssign => "*=",
            TokenKind::DivAssign => "/=",
            TokenKind::RemAssign => "%=",
            TokenKind::AndAssign => "&=",
            TokenKind::OrAssign => "|=",
            TokenKind::XorAssign => "^=",
            TokenKind::ShlAssign => "<<=",
            TokenKind::ShrAssign => ">>=",
            TokenKind::AndNotAssign => "&^=",
            TokenKind::Inc => "++",
            TokenKind::Dec => "--",
            TokenKind::OrOr => "||",
            TokenKind::AndAnd => "&&",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Shl => "<<",
            TokenKind::Shr => ">>",
            TokenKind::AndNot => "&^",
            TokenKind::Not => "!",
            TokenKind::Map => "map",
            TokenKind::Switch => "switch",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            _ => unreachable!("symbol() called on a token with payload"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Reserved words the grammar does not model. Lexed as [`TokenKind::Reserved`]
/// so the parser can report them as unknown constructs.
const RESERVED: &[&str] = &[
    "break",
    "chan",
    "const",
    "continue",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "type",
    "var",
];

struct Lexer<'s> {
    src: &'s [u8],
    pos: usize,
    allow_metavars: bool,
    tokens: Vec<Token>,
}

/// Tokenize `src`. With `allow_metavars`, `$name`, `$_`, `$*name` and `$*_`
/// are legal tokens (pattern mode); without, `$` is a lex error (target
/// source mode). Newlines terminate statements the way Go's automatic
/// semicolon insertion does.
pub fn tokenize(src: &str, allow_metavars: bool) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer { src: src.as_bytes(), pos: 0, allow_metavars, tokens: Vec::new() };
    lexer.run()?;
    Ok(lexer.tokens)
}

impl<'s> Lexer<'s> {
    fn run(&mut self) -> Result<(), ParseError> {
        loop {
            self.skip_blanks();
            let start = self.pos;
            let Some(c) = self.peek() else {
                self.push(TokenKind::Eof, start);
                return Ok(());
            };
            match c {
                b'0'..=b'9' => self.lex_int()?,
                b'"' => self.lex_str()?,
                b'$' => self.lex_metavar()?,
                c if c == b'_' || c.is_ascii_alphabetic() => self.lex_word(),
                _ => self.lex_operator()?,
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token { kind, span: Span::new(start, self.pos) });
    }

    /// Skip whitespace and `//` comments. A newline after a token that can
    /// end a statement becomes a semicolon.
    fn skip_blanks(&mut self) {
        loop {
            match self.peek() {
                Some(b'\n') => {
                    if self.ends_statement() {
                        let start = self.pos;
                        self.pos += 1;
                        self.push(TokenKind::Semi, start);
                    } else {
                        self.pos += 1;
                    }
                }
                Some(c) if c.is_ascii_whitespace() => self.pos += 1,
                Some(b'/') if self.peek_at(1) == Some(b'/') => {
                    while let Some(c) = self.peek() {
                        if c == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => return,
            }
        }
    }

    fn ends_statement(&self) -> bool {
        matches!(
            self.tokens.last().map(|t| &t.kind),
            Some(
                TokenKind::Ident(_)
                    | TokenKind::Int(_)
                    | TokenKind::Str(_)
                    | TokenKind::MetaVar(_)
                    | TokenKind::Wildcard
                    | TokenKind::VariadicMetaVar(_)
                    | TokenKind::VariadicWildcard
                    | TokenKind::RParen
                    | TokenKind::RBrack
                    | TokenKind::RBrace
                    | TokenKind::Inc
                    | TokenKind::Dec
            )
        )
    }

    fn lex_int(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.src[start..self.pos]).expect("digits are ascii");
        let value = text
            .parse::<i64>()
            .map_err(|_| ParseError::new(format!("integer literal `{text}` out of range"), start))?;
        self.push(TokenKind::Int(value), start);
        Ok(())
    }

    fn lex_str(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    return Err(ParseError::new("unterminated string literal", start));
                }
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    let escaped = self.peek_at(1).ok_or_else(|| {
                        ParseError::new("unterminated string literal", start)
                    })?;
                    let c = match escaped {
                        b'n' => '\n',
                        b't' => '\t',
                        b'\\' => '\\',
                        b'"' => '"',
                        other => {
                            return Err(ParseError::new(
                                format!("unsupported escape `\\{}`", other as char),
                                self.pos,
                            ));
                        }
                    };
                    value.push(c);
                    self.pos += 2;
                }
                Some(c) => {
                    value.push(c as char);
                    self.pos += 1;
                }
            }
        }
        self.push(TokenKind::Str(value), start);
        Ok(())
    }

    fn lex_metavar(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        if !self.allow_metavars {
            return Err(ParseError::new(
                "metavariables are not allowed in target source",
                start,
            ));
        }
        self.pos += 1;
        let variadic = self.peek() == Some(b'*');
        if variadic {
            self.pos += 1;
        }
        let name_start = self.pos;
        while matches!(self.peek(), Some(c) if c == b'_' || c.is_ascii_alphanumeric()) {
            self.pos += 1;
        }
        if name_start == self.pos {
            return Err(ParseError::new("`$` must be followed by a name or `_`", start));
        }
        let name = std::str::from_utf8(&self.src[name_start..self.pos])
            .expect("metavariable names are ascii")
            .to_string();
        let kind = match (variadic, name.as_str()) {
            (false, "_") => TokenKind::Wildcard,
            (true, "_") => TokenKind::VariadicWildcard,
            (false, _) => TokenKind::MetaVar(name),
            (true, _) => TokenKind::VariadicMetaVar(name),
        };
        self.push(kind, start);
        Ok(())
    }

    fn lex_word(&mut self) {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c == b'_' || c.is_ascii_alphanumeric()) {
            self.pos += 1;
        }
        let word = std::str::from_utf8(&self.src[start..self.pos]).expect("idents are ascii");
        let kind = match word {
            "map" => TokenKind::Map,
            "switch" => TokenKind::Switch,
            "case" => TokenKind::Case,
            "default" => TokenKind::Default,
            w if RESERVED.contains(&w) => TokenKind::Reserved(w.to_string()),
            w => TokenKind::Ident(w.to_string()),
        };
        self.push(kind, start);
    }

    fn lex_operator(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let rest = &self.src[self.pos..];
        // Longest match first.
        let table: &[(&[u8], TokenKind)] = &[
            (b"&^=", TokenKind::AndNotAssign),
            (b"<<=", TokenKind::ShlAssign),
            (b">>=", TokenKind::ShrAssign),
            (b":=", TokenKind::Define),
            (b"==", TokenKind::EqEq),
            (b"!=", TokenKind::NotEq),
            (b"<=", TokenKind::Le),
            (b">=", TokenKind::Ge),
            (b"&&", TokenKind::AndAnd),
            (b"||", TokenKind::OrOr),
            (b"<<", TokenKind::Shl),
            (b">>", TokenKind::Shr),
            (b"&^", TokenKind::AndNot),
            (b"++", TokenKind::Inc),
            (b"--", TokenKind::Dec),
            (b"+=", TokenKind::AddAssign),
            (b"-=", TokenKind::SubAssign),
            (b"*=", TokenKind::MulAssign),
            (b"/=", TokenKind::DivAssign),
            (b"%=", TokenKind::RemAssign),
            (b"&=", TokenKind::AndAssign),
            (b"|=", TokenKind::OrAssign),
            (b"^=", TokenKind::XorAssign),
            (b"(", TokenKind::LParen),
            (b")", TokenKind::RParen),
            (b"[", TokenKind::LBrack),
            (b"]", TokenKind::RBrack),
            (b"{", TokenKind::LBrace),
            (b"}", TokenKind::RBrace),
            (b",", TokenKind::Comma),
            (b";", TokenKind::Semi),
            (b":", TokenKind::Colon),
            (b".", TokenKind::Dot),
            (b"=", TokenKind::Assign),
            (b"<", TokenKind::Lt),
            (b">", TokenKind::Gt),
            (b"+", TokenKind::Plus),
            (b"-", TokenKind::Minus),
            (b"*", TokenKind::Star),
            (b"/", TokenKind::Slash),
            (b"%", TokenKind::Percent),
            (b"&", TokenKind::Amp),
            (b"|", TokenKind::Pipe),
            (b"^", TokenKind::Caret),
            (b"!", TokenKind::Not),
        ];
        for (symbol, kind) in table {
            if rest.starts_with(symbol) {
                self.pos += symbol.len();
                self.push(kind.clone(), start);
                return Ok(());
            }
        }
        Err(ParseError::new(
            format!("unexpected character `{}`", rest[0] as char),
            start,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src, true).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_operators_longest_first() {
        assert_eq!(
            kinds("a &^= b &^ c"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::AndNotAssign,
                TokenKind::Ident("b".into()),
                TokenKind::AndNot,
                TokenKind::Ident("c".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_metavariables() {
        assert_eq!(
            kinds("$x $_ $*xs $*_"),
            vec![
                TokenKind::MetaVar("x".into()),
                TokenKind::Wildcard,
                TokenKind::VariadicMetaVar("xs".into()),
                TokenKind::VariadicWildcard,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn rejects_metavariables_in_source_mode() {
        let err = tokenize("$x", false).unwrap_err();
        assert!(err.message.contains("not allowed in target source"));
    }

    #[test]
    fn newline_terminates_statement() {
        assert_eq!(
            kinds("a()\nb"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Semi,
                TokenKind::Ident("b".into()),
                TokenKind::Eof,
            ]
        );
        // No semicolon after a token that cannot end a statement.
        assert_eq!(
            kinds("a +\nb"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Plus,
                TokenKind::Ident("b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn reserved_keywords_are_flagged() {
        assert_eq!(kinds("select"), vec![TokenKind::Reserved("select".into()), TokenKind::Eof]);
    }

    #[test]
    fn string_escapes() {
        assert_eq!(
            kinds(r#""a\"b""#),
            vec![TokenKind::Str("a\"b".into()), TokenKind::Eof]
        );
        assert!(tokenize("\"abc", true).is_err());
    }

    #[test]
    fn line_comments_are_skipped() {
        assert_eq!(
            kinds("a // trailing\nb"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Semi,
                TokenKind::Ident("b".into()),
                TokenKind::Eof,
            ]
        );
    }
}

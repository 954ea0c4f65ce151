use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::location::Location;
use crate::rule::Category;
use crate::tree::Span;

/// The engine's output record for one accepted rule application: rule
/// identity, rendered message, source span and the optional rendered
/// replacement.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Finding {
    pub rule: String,
    pub category: Category,
    pub message: String,
    pub filename: PathBuf,
    pub span: Span,
    pub location: Option<Location>,
    /// Rendered replacement text, when the rule carries a suggestion.
    pub suggestion: Option<String>,
    /// Span of the `At(...)` anchor, when the rule overrides the
    /// diagnostic position.
    pub anchor: Option<Span>,
}

impl Finding {
    /// The span emitters should point at: the anchor when present, the
    /// full match otherwise.
    pub fn report_span(&self) -> Span {
        self.anchor.unwrap_or(self.span)
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (row, col) = match self.location {
            Some(loc) => (loc.row(), loc.column()),
            None => (0, 0),
        };
        write!(
            f,
            "{} [{}:{}] {} {}",
            self.filename.to_string_lossy().white(),
            row,
            col,
            self.rule.red(),
            self.message
        )?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " Suggestion: `{suggestion}`")?;
        }
        Ok(())
    }
}

impl Ord for Finding {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare first by filename, then by span
        match self.filename.cmp(&other.filename) {
            Ordering::Equal => self.span.cmp(&other.span),
            other => other,
        }
    }
}

impl PartialOrd for Finding {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(file: &str, start: usize) -> Finding {
        Finding {
            rule: "dup_arg".to_string(),
            category: Category::Suspicious,
            message: "suspicious duplicated args".to_string(),
            filename: file.into(),
            span: Span::new(start, start + 4),
            location: None,
            suggestion: None,
            anchor: None,
        }
    }

    #[test]
    fn orders_by_filename_then_span() {
        let mut findings = vec![finding("b.vx", 0), finding("a.vx", 9), finding("a.vx", 2)];
        findings.sort();
        assert_eq!(findings[0].filename, PathBuf::from("a.vx"));
        assert_eq!(findings[0].span.start, 2);
        assert_eq!(findings[2].filename, PathBuf::from("b.vx"));
    }

    #[test]
    fn anchor_overrides_the_reported_span() {
        let mut f = finding("a.vx", 0);
        assert_eq!(f.report_span(), Span::new(0, 4));
        f.anchor = Some(Span::new(2, 3));
        assert_eq!(f.report_span(), Span::new(2, 3));
    }
}

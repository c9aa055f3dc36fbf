//! trylang_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! The binder never stops on a semantic error. It records a `Diagnostic`
//! into a `DiagnosticCollection` and keeps going; formatting the collection
//! for a terminal is left to the embedder.

use std::fmt;
use trylang_core::text::TextSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl DiagnosticCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
        }
    }
}

/// A message template. `{0}`, `{1}`, ... are filled from the report's
/// arguments in order.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

impl DiagnosticMessage {
    /// Substitute `args` into the template.
    pub fn render(&self, args: &[&str]) -> String {
        let mut text = String::with_capacity(self.message.len());
        let mut rest = self.message;
        while let Some(open) = rest.find('{') {
            text.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let slot = after
                .find('}')
                .and_then(|close| after[..close].parse::<usize>().ok().map(|i| (i, close)));
            match slot {
                Some((index, close)) if index < args.len() => {
                    text.push_str(args[index]);
                    rest = &after[close + 1..];
                }
                _ => {
                    text.push('{');
                    rest = after;
                }
            }
        }
        text.push_str(rest);
        text
    }
}

/// A reported problem, located in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: TextSpan,
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message_text: String,
}

impl Diagnostic {
    pub fn new(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            span,
            code: message.code,
            category: message.category,
            message_text: message.render(args),
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} TL{}: {}",
            self.span,
            self.category.as_str(),
            self.code,
            self.message_text
        )
    }
}

/// Diagnostics in the order they were reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, span: TextSpan, message: &DiagnosticMessage, args: &[&str]) {
        self.diagnostics.push(Diagnostic::new(span, message, args));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    /// Stable sort by source position.
    pub fn sort(&mut self) {
        self.diagnostics
            .sort_by_key(|d| (d.span.start, d.span.length));
    }
}

impl<'a> IntoIterator for &'a DiagnosticCollection {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for DiagnosticCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.diagnostics
            .iter()
            .try_for_each(|diagnostic| writeln!(f, "{diagnostic}"))
    }
}

pub mod messages {
    use super::{DiagnosticCategory, DiagnosticMessage};

    const fn error(code: u32, message: &'static str) -> DiagnosticMessage {
        DiagnosticMessage {
            code,
            category: DiagnosticCategory::Error,
            message,
        }
    }

    pub const UNDEFINED_VARIABLE: DiagnosticMessage =
        error(1001, "Variable '{0}' doesn't exist.");
    pub const UNDEFINED_UNARY_OPERATOR: DiagnosticMessage =
        error(1002, "Unary operator '{0}' is not defined for type '{1}'.");
    pub const UNDEFINED_BINARY_OPERATOR: DiagnosticMessage =
        error(1003, "Binary operator '{0}' is not defined for types '{1}' and '{2}'.");
    pub const CANNOT_CONVERT: DiagnosticMessage =
        error(1004, "Cannot convert type '{0}' to '{1}'.");
    pub const VARIABLE_ALREADY_DECLARED: DiagnosticMessage =
        error(1005, "Variable '{0}' is already declared.");
    pub const CANNOT_ASSIGN_READ_ONLY: DiagnosticMessage =
        error(1006, "Variable '{0}' is read-only and cannot be assigned to.");
    pub const UNDEFINED_TYPE: DiagnosticMessage = error(1007, "Type '{0}' doesn't exist.");
    pub const UNEXPECTED_SYNTAX: DiagnosticMessage =
        error(1008, "Unexpected syntax '{0}' where {1} was expected.");
}

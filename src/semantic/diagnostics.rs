//! Diagnostics — per-document problem reporting.
//!
//! Link errors and validation warnings are recoverable: they are collected
//! per document so a single report covers every unresolved reference, not
//! just the first one. Fatal builder errors live in [`crate::model`].

use std::fmt;

use crate::base::Span;

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// A diagnostic message with source location.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Diagnostic code (e.g. "E0001")
    pub code: Option<&'static str>,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            severity: Severity::Error,
            code: None,
            message: message.into(),
            span,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self {
            severity: Severity::Warning,
            code: None,
            message: message.into(),
            span,
        }
    }

    /// Set the diagnostic code.
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.span.start.line,
            self.span.start.column,
            self.severity.as_str(),
            self.message
        )
    }
}

/// Standard diagnostic codes.
///
/// - **E0001-E0099**: link and definition errors
/// - **W0001-W0099**: validation warnings
pub mod codes {
    /// A reference's text resolves to nothing in local scope nor any
    /// import prefix.
    pub const UNRESOLVED_REFERENCE: &str = "E0001";
    /// A reference resolved to a node of the wrong kind (e.g. a property
    /// where a type was expected).
    pub const WRONG_REFERENCE_KIND: &str = "E0002";
    /// Two declarations share a qualified name.
    pub const DUPLICATE_DEFINITION: &str = "E0003";
    /// A namespace declaring zero types.
    pub const EMPTY_NAMESPACE: &str = "W0001";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::error("could not resolve reference to 'Areal'", Span::point(4, 12))
            .with_code(codes::UNRESOLVED_REFERENCE);
        assert_eq!(diag.code, Some("E0001"));
        assert_eq!(
            diag.to_string(),
            "4:12: error: could not resolve reference to 'Areal'"
        );
    }

    #[test]
    fn test_severity() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
        assert_eq!(Severity::Warning.as_str(), "warning");
    }
}

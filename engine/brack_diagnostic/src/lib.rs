//! Structured diagnostics for render failures.
//!
//! The renderer's grammar errors convert into these span-carrying
//! diagnostics; front ends (the CLI) render them against the tag source.

use brack_ir::Span;
use std::fmt;

/// Severity level of a diagnostic.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with source location.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Error code (e.g. B0001).
    pub code: Option<String>,
    /// Main message.
    pub message: String,
    /// Primary span where the error occurred.
    pub span: Span,
    /// Additional labels.
    pub labels: Vec<Label>,
    /// Notes attached to this diagnostic.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Diagnostic {
            severity: Severity::Error,
            code: None,
            message: message.into(),
            span,
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Add an error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Add a primary label at the main span.
    #[must_use]
    pub fn with_label(mut self, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span: self.span,
            message: message.into(),
            is_primary: true,
        });
        self
    }

    /// Add a secondary label at a different span.
    #[must_use]
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
            is_primary: false,
        });
        self
    }

    /// Add a note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Check if this is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// A label pointing to a span in the source.
#[derive(Clone, Debug)]
pub struct Label {
    /// Span in the source.
    pub span: Span,
    /// Label message.
    pub message: String,
    /// Whether this is the primary label.
    pub is_primary: bool,
}

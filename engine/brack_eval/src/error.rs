//! Render error taxonomy.
//!
//! `GrammarError` aborts a whole render; `FunctionError` is call-local
//! and becomes content under the error-as-content policy. Keeping the
//! two as separate types makes the render loop's choice deterministic
//! instead of relying on catch-all handlers.

use brack_diagnostic::Diagnostic;
use brack_ir::Span;
use brack_math::MathError;
use thiserror::Error;

/// Fatal structural failure: the bracket/comma grammar was violated.
///
/// The render produces no partial output; the caller surfaces the error
/// (typically as a single parse-failure message to the tag author).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A `]` at nesting level 0.
    #[error("unmatched closing bracket")]
    UnmatchedCloseBracket { span: Span },

    /// A call group whose function name is not followed by `:`.
    #[error("expected `:` after function name `{name}`")]
    MissingIndicator { name: String, span: Span },

    /// A token in a position the call grammar does not allow.
    #[error("unexpected {found} in call group")]
    UnexpectedToken { found: &'static str, span: Span },

    /// Input ended inside an open call group.
    #[error("unexpected end of input inside a call group")]
    UnexpectedEnd { span: Span },
}

impl GrammarError {
    /// Source span the error points at.
    pub fn span(&self) -> Span {
        match self {
            GrammarError::UnmatchedCloseBracket { span }
            | GrammarError::MissingIndicator { span, .. }
            | GrammarError::UnexpectedToken { span, .. }
            | GrammarError::UnexpectedEnd { span } => *span,
        }
    }

    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            GrammarError::UnmatchedCloseBracket { .. } => "B0001",
            GrammarError::MissingIndicator { .. } => "B0002",
            GrammarError::UnexpectedToken { .. } => "B0003",
            GrammarError::UnexpectedEnd { .. } => "B0004",
        }
    }

    /// Convert to a diagnostic for source-context reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self {
            GrammarError::UnmatchedCloseBracket { .. } => "this bracket closes nothing",
            GrammarError::MissingIndicator { .. } => "name ends here without `:`",
            GrammarError::UnexpectedToken { .. } => "not valid at this position",
            GrammarError::UnexpectedEnd { .. } => "the call group opened here is never closed",
        };
        Diagnostic::error(self.to_string(), self.span())
            .with_code(self.code())
            .with_label(label)
    }
}

/// Call-local failure while resolving or invoking one tag function.
///
/// Rendered as content at the call site: the display text below (or the
/// provider's fallback string) is what the tag author sees.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FunctionError {
    /// The provider has no function with this name.
    #[error("unknown function `{0}`")]
    Unknown(String),

    /// The name fails the `^[A-Za-z_]+$` pattern.
    #[error("invalid function name `{0}`")]
    InvalidName(String),

    /// A built-in called with the wrong number of arguments.
    #[error("`{name}` expects {expected}, got {found} argument(s)")]
    WrongArity {
        name: &'static str,
        expected: &'static str,
        found: usize,
    },

    /// Failure inside the `math` built-in.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Free-form failure from a caller-registered handler.
    #[error("{0}")]
    Message(String),
}

impl FunctionError {
    /// Convenience constructor for custom handlers.
    pub fn message(text: impl Into<String>) -> Self {
        FunctionError::Message(text.into())
    }
}

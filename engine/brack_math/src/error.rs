//! Error taxonomy for the arithmetic sub-language.
//!
//! Every variant's display text is user-facing: the renderer embeds it
//! in the tag output under the error-as-content policy, so messages name
//! what the author wrote, not engine internals.

use thiserror::Error;

/// Failure while lexing, parsing, or evaluating a `math` expression.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MathError {
    /// A character sequence outside the token whitelist.
    #[error("illegal token `{found}` in expression")]
    IllegalToken { found: String },

    /// A whitelisted token in a position the grammar does not allow.
    #[error("unexpected {found} in expression")]
    UnexpectedToken { found: String },

    /// Input ended where the grammar required more.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// Parenthesis/call nesting beyond the supported depth.
    #[error("expression is nested too deeply")]
    TooDeep,

    /// A binary operator applied to operand kinds it is not defined for.
    #[error("operator `{op}` is not defined for {lhs} and {rhs}")]
    InvalidOperator {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    /// A unary operator applied to an operand kind it is not defined for.
    #[error("operator `{op}` is not defined for {operand}")]
    InvalidUnaryOperator {
        op: &'static str,
        operand: &'static str,
    },

    /// A call to a function outside the whitelist.
    #[error("undefined function `{0}`")]
    UndefinedFunction(String),

    /// A reference to a constant outside the whitelist.
    #[error("undefined constant `{0}`")]
    UndefinedName(String),

    /// A whitelisted function called with the wrong number of arguments.
    #[error("`{function}` expects {expected} argument(s), got {found}")]
    WrongArity {
        function: String,
        expected: &'static str,
        found: usize,
    },

    /// A whitelisted function called with the wrong operand kind.
    #[error("`{function}` expects {expected} arguments, got {found}")]
    WrongArgType {
        function: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Keyword-style arguments (`f(x=1)`) are not part of the grammar.
    #[error("keyword arguments are not supported")]
    KeywordArgument,

    /// Exponentiation clamp: the operands were rejected before computing.
    #[error("operand too large for `**` (base limit 200000, exponent limit 500)")]
    OperandTooLarge,

    /// Shift amount outside `0..=63`.
    #[error("invalid shift amount {amount}")]
    InvalidShift { amount: i64 },

    /// Division or modulo by zero (integer or float).
    #[error("division by zero")]
    DivisionByZero,

    /// A 64-bit integer result did not fit.
    #[error("integer overflow")]
    Overflow,
}

//! The call-tree parser/evaluator.
//!
//! Single pass over the token stream: call groups are parsed and
//! evaluated as they close, depth-first, so a function is invoked only
//! after every one of its arguments (literal or nested call) has
//! resolved to a string, strictly left to right.

use smallvec::SmallVec;
use tracing::{debug, trace};

use brack_ir::{Span, Token, TokenKind};

use crate::cursor::Cursor;
use crate::error::{FunctionError, GrammarError};
use crate::provider::FunctionProvider;
use crate::stack::ensure_sufficient_stack;

/// Render tag source against a provider.
///
/// Convenience wrapper around [`Renderer`].
pub fn render(
    source: &str,
    provider: &mut impl FunctionProvider,
) -> Result<String, GrammarError> {
    Renderer::new(provider).render(source)
}

/// Renders tag source to its final string.
///
/// The renderer borrows its provider for the duration of a render; all
/// per-invocation state (nesting, argument lists, the output buffer)
/// lives on the render call itself, so one renderer can be reused
/// across sequential renders but never shared between concurrent ones.
pub struct Renderer<'p, P: FunctionProvider> {
    provider: &'p mut P,
}

impl<'p, P: FunctionProvider> Renderer<'p, P> {
    pub fn new(provider: &'p mut P) -> Self {
        Renderer { provider }
    }

    /// Render tag source.
    ///
    /// Grammar errors abort the whole render with no partial output.
    /// Call-local failures render as inline error text (or the
    /// provider's fallback) at the call site.
    pub fn render(&mut self, source: &str) -> Result<String, GrammarError> {
        let tokens = brack_lexer::lex(source);
        trace!(tokens = tokens.len(), "render start");
        let mut cursor = Cursor::new(tokens);
        let mut out = String::new();
        while let Some(Token { kind, span }) = cursor.advance() {
            match kind {
                TokenKind::Text(ch) => out.push(ch),
                TokenKind::BlockStart => {
                    let value = self.call_group(&mut cursor)?;
                    out.push_str(&value);
                }
                TokenKind::BlockEnd => {
                    return Err(GrammarError::UnmatchedCloseBracket { span })
                }
                // The lexer only emits the remaining kinds inside a call
                // group; reject them if a stream ever surfaces one here.
                other => {
                    return Err(GrammarError::UnexpectedToken {
                        found: other.describe(),
                        span,
                    })
                }
            }
        }
        Ok(out)
    }

    /// Parse and evaluate one call group, `BlockStart` already consumed.
    ///
    /// Returns the call's rendered value. Recurses per nested group;
    /// the stack grows on demand, so nesting depth is unbounded.
    fn call_group(&mut self, cursor: &mut Cursor) -> Result<String, GrammarError> {
        ensure_sufficient_stack(|| self.call_group_inner(cursor))
    }

    fn call_group_inner(&mut self, cursor: &mut Cursor) -> Result<String, GrammarError> {
        let (name, name_span) = match cursor.advance() {
            Some(Token {
                kind: TokenKind::Function(name),
                span,
            }) => (name, span),
            Some(token) => {
                return Err(GrammarError::UnexpectedToken {
                    found: token.kind.describe(),
                    span: token.span,
                })
            }
            None => {
                return Err(GrammarError::UnexpectedEnd {
                    span: cursor.last_span(),
                })
            }
        };
        match cursor.advance() {
            Some(Token {
                kind: TokenKind::Indicator,
                ..
            }) => {}
            _ => {
                return Err(GrammarError::MissingIndicator {
                    name,
                    span: name_span,
                })
            }
        }

        let mut args: SmallVec<[String; 4]> = SmallVec::new();
        loop {
            let Some(Token { kind, span }) = cursor.advance() else {
                return Err(GrammarError::UnexpectedEnd {
                    span: cursor.last_span(),
                });
            };
            match kind {
                TokenKind::Argument(text) => args.push(text),
                // A comma must introduce another argument: either a
                // literal or a nested call group.
                TokenKind::Comma => match cursor.peek() {
                    Some(next)
                        if matches!(
                            next.kind,
                            TokenKind::Argument(_) | TokenKind::BlockStart
                        ) => {}
                    Some(next) => {
                        return Err(GrammarError::UnexpectedToken {
                            found: next.kind.describe(),
                            span: next.span,
                        })
                    }
                    None => return Err(GrammarError::UnexpectedEnd { span }),
                },
                // A nested call's rendered value lands as the next
                // argument of this group.
                TokenKind::BlockStart => {
                    let value = self.call_group(cursor)?;
                    args.push(value);
                }
                TokenKind::BlockEnd => return Ok(self.dispatch(&name, &args, name_span)),
                other => {
                    return Err(GrammarError::UnexpectedToken {
                        found: other.describe(),
                        span,
                    })
                }
            }
        }
    }

    /// Resolve and invoke one call, converting any failure to content.
    fn dispatch(&mut self, name: &str, args: &[String], span: Span) -> String {
        let result = if is_valid_name(name) {
            self.provider.invoke(name, args)
        } else {
            Err(FunctionError::InvalidName(name.to_string()))
        };
        match result {
            Ok(value) => value,
            Err(error) => {
                debug!(%error, function = name, offset = span.start, "tag function failed");
                match self.provider.fallback() {
                    Some(text) => text.to_string(),
                    None => error.to_string(),
                }
            }
        }
    }
}

/// Function names must match `^[A-Za-z_]+$`.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphabetic() || b == b'_')
}

//! FIFO cursor over the token stream.
//!
//! Tokens are owned by the stream and handed out exactly once, in
//! order; the renderer never backtracks.

use brack_ir::{Span, Token};

pub(crate) struct Cursor {
    tokens: std::vec::IntoIter<Token>,
    /// Span of the most recently consumed token, for end-of-input errors.
    last_span: Span,
}

impl Cursor {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Cursor {
            tokens: tokens.into_iter(),
            last_span: Span::DUMMY,
        }
    }

    /// Consume and return the next token.
    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.next();
        if let Some(t) = &token {
            self.last_span = t.span;
        }
        token
    }

    /// Look at the next token without consuming it.
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.as_slice().first()
    }

    /// Span of the most recently consumed token.
    pub(crate) fn last_span(&self) -> Span {
        self.last_span
    }
}

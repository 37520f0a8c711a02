//! Lexer for tag source.
//!
//! Converts raw tag text into a flat token stream distinguishing literal
//! text from bracketed call syntax. The lexer recognizes two modes:
//!
//! - **Text**: every character passes through as an individual
//!   [`TokenKind::Text`] token (the renderer coalesces runs).
//! - **Call syntax**, entered at `[`: a function name runs up to the `:`
//!   indicator, then comma-separated arguments run up to the matching
//!   `]`. A nested `[` inside an argument opens another group at
//!   arbitrary depth; the interrupted argument buffer resumes once the
//!   nested group closes.
//!
//! The lexer never fails. Malformed structure (an unmatched `]`, a name
//! with no `:`, input ending inside a group) still produces tokens — the
//! renderer is responsible for rejecting them. Open groups are tracked
//! with an explicit stack, so lexing never recurses no matter how deeply
//! brackets nest.

use brack_ir::{Span, Token, TokenKind};
use tracing::trace;

/// Lex tag source into its token stream.
///
/// An empty source produces zero tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    lexer.run();
    trace!(tokens = lexer.tokens.len(), "lexed tag source");
    lexer.tokens
}

/// Scanning mode.
#[derive(Copy, Clone)]
enum State {
    /// Outside any call group.
    Text,
    /// Reading a function name; `start` is the byte offset just past `[`.
    ///
    /// Every character belongs to the name until a `:` ends it or input
    /// runs out. `[`, `]` and `,` have no special meaning here.
    Name { start: usize },
    /// Reading the arguments of the innermost open group.
    Args,
}

/// Pending argument text for one open call group.
struct ArgBuffer {
    /// Accumulated text, possibly resumed across nested groups.
    text: String,
    /// Byte offset where the pending text began.
    start: usize,
}

impl ArgBuffer {
    fn new() -> Self {
        ArgBuffer {
            text: String::new(),
            start: 0,
        }
    }
}

struct Lexer<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    /// Argument buffers of the open call groups, innermost last.
    groups: Vec<ArgBuffer>,
    state: State,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Lexer {
            source,
            tokens: Vec::new(),
            groups: Vec::new(),
            state: State::Text,
        }
    }

    fn run(&mut self) {
        let source = self.source;
        for (pos, ch) in source.char_indices() {
            match self.state {
                State::Text => self.text_char(pos, ch),
                State::Name { start } => self.name_char(start, pos, ch),
                State::Args => self.arg_char(pos, ch),
            }
        }
        self.finish();
    }

    fn text_char(&mut self, pos: usize, ch: char) {
        match ch {
            '[' => {
                self.push(TokenKind::BlockStart, pos..pos + 1);
                self.state = State::Name { start: pos + 1 };
            }
            // An unmatched `]` still becomes a BlockEnd; the renderer
            // rejects it at level 0.
            ']' => self.push(TokenKind::BlockEnd, pos..pos + 1),
            _ => self.push(TokenKind::Text(ch), pos..pos + ch.len_utf8()),
        }
    }

    fn name_char(&mut self, start: usize, pos: usize, ch: char) {
        if ch == ':' {
            let name = self.source[start..pos].to_string();
            self.push(TokenKind::Function(name), start..pos);
            self.push(TokenKind::Indicator, pos..pos + 1);
            self.groups.push(ArgBuffer::new());
            self.state = State::Args;
        }
    }

    fn arg_char(&mut self, pos: usize, ch: char) {
        match ch {
            ',' => {
                self.flush_argument(pos);
                self.push(TokenKind::Comma, pos..pos + 1);
            }
            '[' => {
                self.push(TokenKind::BlockStart, pos..pos + 1);
                self.state = State::Name { start: pos + 1 };
            }
            ']' => {
                self.flush_argument(pos);
                self.push(TokenKind::BlockEnd, pos..pos + 1);
                self.groups.pop();
                if self.groups.is_empty() {
                    self.state = State::Text;
                }
            }
            _ => {
                if let Some(group) = self.groups.last_mut() {
                    if group.text.is_empty() {
                        group.start = pos;
                    }
                    group.text.push(ch);
                }
            }
        }
    }

    /// Emit the innermost group's pending argument, trimmed, if non-empty.
    fn flush_argument(&mut self, end: usize) {
        if let Some(group) = self.groups.last_mut() {
            let text = group.text.trim();
            if !text.is_empty() {
                let span = Span::from_range(group.start..end);
                self.tokens
                    .push(Token::new(TokenKind::Argument(text.to_string()), span));
            }
            group.text.clear();
        }
    }

    /// Handle end of input: an unterminated name still yields a Function
    /// token, and a dangling argument buffer flushes without a BlockEnd.
    fn finish(&mut self) {
        let len = self.source.len();
        match self.state {
            State::Text => {}
            State::Name { start } => {
                let name = self.source[start..].to_string();
                self.push(TokenKind::Function(name), start..len);
            }
            State::Args => self.flush_argument(len),
        }
    }

    fn push(&mut self, kind: TokenKind, range: std::ops::Range<usize>) {
        self.tokens.push(Token::new(kind, Span::from_range(range)));
    }
}

#[cfg(test)]
mod tests;

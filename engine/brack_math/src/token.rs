//! Lexer for arithmetic expressions, built on logos.

use logos::Logos;

use super::MathError;

/// Raw token recognized by logos (before literal cooking).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    Float,

    #[regex(r"[0-9][0-9_]*")]
    Int,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[token("**")]
    StarStar,
    #[token("//")]
    SlashSlash,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token("=")]
    Assign,
}

/// Cooked token consumed by the parser.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Tok {
    Int(i64),
    Float(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    SlashSlash,
    Percent,
    StarStar,
    Amp,
    Pipe,
    Caret,
    Shl,
    Shr,
    Tilde,
    LParen,
    RParen,
    Comma,
    Assign,
}

impl Tok {
    /// Short description for `UnexpectedToken` messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Tok::Int(v) => format!("number `{v}`"),
            Tok::Float(v) => format!("number `{v}`"),
            Tok::Ident(name) => format!("name `{name}`"),
            Tok::Plus => "`+`".to_string(),
            Tok::Minus => "`-`".to_string(),
            Tok::Star => "`*`".to_string(),
            Tok::Slash => "`/`".to_string(),
            Tok::SlashSlash => "`//`".to_string(),
            Tok::Percent => "`%`".to_string(),
            Tok::StarStar => "`**`".to_string(),
            Tok::Amp => "`&`".to_string(),
            Tok::Pipe => "`|`".to_string(),
            Tok::Caret => "`^`".to_string(),
            Tok::Shl => "`<<`".to_string(),
            Tok::Shr => "`>>`".to_string(),
            Tok::Tilde => "`~`".to_string(),
            Tok::LParen => "`(`".to_string(),
            Tok::RParen => "`)`".to_string(),
            Tok::Comma => "`,`".to_string(),
            Tok::Assign => "`=`".to_string(),
        }
    }
}

/// Lex an expression into cooked tokens.
///
/// Integer literals that do not fit `i64` are an overflow error (the
/// sub-language has no big integers); any unrecognized character is an
/// `IllegalToken`.
pub(crate) fn lex(source: &str) -> Result<Vec<Tok>, MathError> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);
    while let Some(result) = lexer.next() {
        let raw = result.map_err(|()| MathError::IllegalToken {
            found: lexer.slice().to_string(),
        })?;
        let tok = match raw {
            RawToken::Int => {
                let text = lexer.slice().replace('_', "");
                let value = text.parse::<i64>().map_err(|_| MathError::Overflow)?;
                Tok::Int(value)
            }
            RawToken::Float => {
                let text = lexer.slice().replace('_', "");
                let value = text.parse::<f64>().map_err(|_| MathError::IllegalToken {
                    found: lexer.slice().to_string(),
                })?;
                Tok::Float(value)
            }
            RawToken::Ident => Tok::Ident(lexer.slice().to_string()),
            RawToken::Plus => Tok::Plus,
            RawToken::Minus => Tok::Minus,
            RawToken::Star => Tok::Star,
            RawToken::Slash => Tok::Slash,
            RawToken::SlashSlash => Tok::SlashSlash,
            RawToken::Percent => Tok::Percent,
            RawToken::StarStar => Tok::StarStar,
            RawToken::Amp => Tok::Amp,
            RawToken::Pipe => Tok::Pipe,
            RawToken::Caret => Tok::Caret,
            RawToken::Shl => Tok::Shl,
            RawToken::Shr => Tok::Shr,
            RawToken::Tilde => Tok::Tilde,
            RawToken::LParen => Tok::LParen,
            RawToken::RParen => Tok::RParen,
            RawToken::Comma => Tok::Comma,
            RawToken::Assign => Tok::Assign,
        };
        tokens.push(tok);
    }
    Ok(tokens)
}

//! Pratt parser for arithmetic expressions.
//!
//! Binding powers follow Python's operator table: `|` binds loosest,
//! then `^`, `&`, shifts, additive, multiplicative, unary `-`/`~`, and
//! `**` tightest. `**` is right-associative and binds tighter than a
//! unary minus on its left, so `-2 ** 2` parses as `-(2 ** 2)`.

use super::ast::{BinaryOp, Expr, UnaryOp};
use super::error::MathError;
use super::number::Number;
use super::token::{lex, Tok};

/// Binding power of the prefix operators (`-`, `~`).
const UNARY_BP: u8 = 13;

/// Maximum parenthesis/call nesting. Deeper input is rejected rather
/// than risking the recursion growing without bound on adversarial
/// expressions.
const MAX_DEPTH: usize = 256;

/// Parse an expression into its tree.
pub fn parse(source: &str) -> Result<Expr, MathError> {
    let tokens = lex(source)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expression(0)?;
    match parser.next() {
        None => Ok(expr),
        Some(tok) => Err(MathError::UnexpectedToken {
            found: tok.describe(),
        }),
    }
}

struct Parser {
    tokens: Vec<Tok>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Tok> {
        self.tokens.get(self.pos)
    }

    fn peek2(&self) -> Option<&Tok> {
        self.tokens.get(self.pos + 1)
    }

    fn next(&mut self) -> Option<Tok> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expression(&mut self, min_bp: u8) -> Result<Expr, MathError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(MathError::TooDeep);
        }
        let result = self.expression_inner(min_bp);
        self.depth -= 1;
        result
    }

    fn expression_inner(&mut self, min_bp: u8) -> Result<Expr, MathError> {
        let mut lhs = self.primary()?;
        loop {
            let Some(tok) = self.peek() else { break };
            let Some((lbp, rbp, op)) = infix_binding_power(tok) else {
                break;
            };
            if lbp < min_bp {
                break;
            }
            self.pos += 1;
            let rhs = self.expression(rbp)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn primary(&mut self) -> Result<Expr, MathError> {
        match self.next() {
            None => Err(MathError::UnexpectedEnd),
            Some(Tok::Int(v)) => Ok(Expr::Number(Number::Int(v))),
            Some(Tok::Float(v)) => Ok(Expr::Number(Number::Float(v))),
            Some(Tok::Minus) => self.prefix(UnaryOp::Neg),
            Some(Tok::Tilde) => self.prefix(UnaryOp::BitNot),
            Some(Tok::LParen) => {
                let expr = self.expression(0)?;
                match self.next() {
                    Some(Tok::RParen) => Ok(expr),
                    Some(tok) => Err(MathError::UnexpectedToken {
                        found: tok.describe(),
                    }),
                    None => Err(MathError::UnexpectedEnd),
                }
            }
            Some(Tok::Ident(name)) => {
                if matches!(self.peek(), Some(Tok::LParen)) {
                    self.pos += 1;
                    let args = self.call_args()?;
                    Ok(Expr::Call { name, args })
                } else {
                    Ok(Expr::Constant(name))
                }
            }
            Some(other) => Err(MathError::UnexpectedToken {
                found: other.describe(),
            }),
        }
    }

    fn prefix(&mut self, op: UnaryOp) -> Result<Expr, MathError> {
        let operand = self.expression(UNARY_BP)?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn call_args(&mut self) -> Result<Vec<Expr>, MathError> {
        let mut args = Vec::new();
        if matches!(self.peek(), Some(Tok::RParen)) {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            // `f(x=1)` is a keyword argument; reject it before the name
            // would parse as a constant lookup.
            if matches!(self.peek(), Some(Tok::Ident(_)))
                && matches!(self.peek2(), Some(Tok::Assign))
            {
                return Err(MathError::KeywordArgument);
            }
            args.push(self.expression(0)?);
            match self.next() {
                Some(Tok::Comma) => {}
                Some(Tok::RParen) => return Ok(args),
                Some(other) => {
                    return Err(MathError::UnexpectedToken {
                        found: other.describe(),
                    })
                }
                None => return Err(MathError::UnexpectedEnd),
            }
        }
    }
}

fn infix_binding_power(tok: &Tok) -> Option<(u8, u8, BinaryOp)> {
    let powers = match tok {
        Tok::Pipe => (1, 2, BinaryOp::BitOr),
        Tok::Caret => (3, 4, BinaryOp::BitXor),
        Tok::Amp => (5, 6, BinaryOp::BitAnd),
        Tok::Shl => (7, 8, BinaryOp::Shl),
        Tok::Shr => (7, 8, BinaryOp::Shr),
        Tok::Plus => (9, 10, BinaryOp::Add),
        Tok::Minus => (9, 10, BinaryOp::Sub),
        Tok::Star => (11, 12, BinaryOp::Mul),
        Tok::Slash => (11, 12, BinaryOp::Div),
        Tok::SlashSlash => (11, 12, BinaryOp::FloorDiv),
        Tok::Percent => (11, 12, BinaryOp::Rem),
        // Right-associative: the right side binds one step looser.
        Tok::StarStar => (16, 15, BinaryOp::Pow),
        _ => return None,
    };
    Some(powers)
}

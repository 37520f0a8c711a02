//! Tree-walking evaluator for arithmetic expressions.
//!
//! Operator semantics follow the sub-language contract: true division
//! always yields a float, floor division floors toward negative
//! infinity, modulo takes the divisor's sign, and bitwise operators are
//! defined on integers only. Integer results are 64-bit; anything that
//! does not fit is a reported overflow, never a silent wrap.

use super::ast::{BinaryOp, Expr, UnaryOp};
use super::error::MathError;
use super::number::Number;
use super::parse::parse;

/// Exponentiation clamp: largest base magnitude accepted by `**`.
const MAX_POW_BASE: f64 = 200_000.0;
/// Exponentiation clamp: largest exponent magnitude accepted by `**`.
const MAX_POW_EXPONENT: f64 = 500.0;

/// Parse and evaluate an expression in one step.
pub fn eval_str(source: &str) -> Result<Number, MathError> {
    eval(&parse(source)?)
}

/// Evaluate a parsed expression tree.
pub fn eval(expr: &Expr) -> Result<Number, MathError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Constant(name) => {
            constant(name).ok_or_else(|| MathError::UndefinedName(name.clone()))
        }
        Expr::Unary { op, operand } => apply_unary(*op, eval(operand)?),
        Expr::Binary { op, lhs, rhs } => apply_binary(*op, eval(lhs)?, eval(rhs)?),
        Expr::Call { name, args } => {
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval(arg)?);
            }
            apply_function(name, &values)
        }
    }
}

/// Named-constant whitelist. Lookup is case-insensitive.
fn constant(name: &str) -> Option<Number> {
    let number = match name.to_ascii_lowercase().as_str() {
        "pi" => Number::Float(std::f64::consts::PI),
        "e" => Number::Float(std::f64::consts::E),
        "tau" => Number::Float(std::f64::consts::TAU),
        "inf" | "infinity" => Number::Float(f64::INFINITY),
        "nan" => Number::Float(f64::NAN),
        // Physical constants, SI units.
        "c" => Number::Int(299_792_458),
        "g" => Number::Float(9.806_65),
        "na" | "avogadro" => Number::Float(6.022_140_76e23),
        "atm" => Number::Int(101_325),
        "h" | "planck" => Number::Float(6.626_070_15e-34),
        _ => return None,
    };
    Some(number)
}

fn apply_unary(op: UnaryOp, operand: Number) -> Result<Number, MathError> {
    match (op, operand) {
        (UnaryOp::Neg, Number::Int(v)) => v
            .checked_neg()
            .map(Number::Int)
            .ok_or(MathError::Overflow),
        (UnaryOp::Neg, Number::Float(v)) => Ok(Number::Float(-v)),
        (UnaryOp::BitNot, Number::Int(v)) => Ok(Number::Int(!v)),
        (UnaryOp::BitNot, Number::Float(_)) => Err(MathError::InvalidUnaryOperator {
            op: op.symbol(),
            operand: operand.kind(),
        }),
    }
}

fn apply_binary(op: BinaryOp, lhs: Number, rhs: Number) -> Result<Number, MathError> {
    match op {
        BinaryOp::Add => arith(lhs, rhs, i64::checked_add, |a, b| a + b),
        BinaryOp::Sub => arith(lhs, rhs, i64::checked_sub, |a, b| a - b),
        BinaryOp::Mul => arith(lhs, rhs, i64::checked_mul, |a, b| a * b),
        BinaryOp::Div => {
            if rhs.is_zero() {
                return Err(MathError::DivisionByZero);
            }
            Ok(Number::Float(lhs.as_f64() / rhs.as_f64()))
        }
        BinaryOp::FloorDiv => floor_div(lhs, rhs),
        BinaryOp::Rem => floor_mod(lhs, rhs),
        BinaryOp::Pow => pow(lhs, rhs),
        BinaryOp::BitAnd => bitwise(op, lhs, rhs, |a, b| a & b),
        BinaryOp::BitOr => bitwise(op, lhs, rhs, |a, b| a | b),
        BinaryOp::BitXor => bitwise(op, lhs, rhs, |a, b| a ^ b),
        BinaryOp::Shl => shift_left(op, lhs, rhs),
        BinaryOp::Shr => shift_right(op, lhs, rhs),
    }
}

/// Int/int stays int (checked); any float promotes both sides.
fn arith(
    lhs: Number,
    rhs: Number,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Number, MathError> {
    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => {
            int_op(a, b).map(Number::Int).ok_or(MathError::Overflow)
        }
        _ => Ok(Number::Float(float_op(lhs.as_f64(), rhs.as_f64()))),
    }
}

fn floor_div(lhs: Number, rhs: Number) -> Result<Number, MathError> {
    if rhs.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => {
            let q = a.checked_div(b).ok_or(MathError::Overflow)?;
            let r = a.checked_rem(b).ok_or(MathError::Overflow)?;
            // Floor toward negative infinity, not toward zero.
            Ok(Number::Int(if r != 0 && (r < 0) != (b < 0) {
                q - 1
            } else {
                q
            }))
        }
        _ => Ok(Number::Float((lhs.as_f64() / rhs.as_f64()).floor())),
    }
}

fn floor_mod(lhs: Number, rhs: Number) -> Result<Number, MathError> {
    if rhs.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => {
            let r = a.checked_rem(b).ok_or(MathError::Overflow)?;
            // The result takes the divisor's sign.
            Ok(Number::Int(if r != 0 && (r < 0) != (b < 0) {
                r + b
            } else {
                r
            }))
        }
        _ => {
            let (a, b) = (lhs.as_f64(), rhs.as_f64());
            Ok(Number::Float(a - (a / b).floor() * b))
        }
    }
}

fn pow(lhs: Number, rhs: Number) -> Result<Number, MathError> {
    // Clamp before computing anything; huge powers must cost nothing.
    if lhs.magnitude() > MAX_POW_BASE || rhs.magnitude() > MAX_POW_EXPONENT {
        return Err(MathError::OperandTooLarge);
    }
    if lhs.is_zero() && rhs.as_f64() < 0.0 {
        return Err(MathError::DivisionByZero);
    }
    match (lhs, rhs) {
        (Number::Int(base), Number::Int(exp)) if exp >= 0 => {
            let exp = u32::try_from(exp).map_err(|_| MathError::OperandTooLarge)?;
            base.checked_pow(exp)
                .map(Number::Int)
                .ok_or(MathError::Overflow)
        }
        _ => Ok(Number::Float(lhs.as_f64().powf(rhs.as_f64()))),
    }
}

fn bitwise(
    op: BinaryOp,
    lhs: Number,
    rhs: Number,
    f: fn(i64, i64) -> i64,
) -> Result<Number, MathError> {
    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => Ok(Number::Int(f(a, b))),
        _ => Err(MathError::InvalidOperator {
            op: op.symbol(),
            lhs: lhs.kind(),
            rhs: rhs.kind(),
        }),
    }
}

fn shift_amount(b: i64) -> Result<u32, MathError> {
    u32::try_from(b)
        .ok()
        .filter(|&amount| amount < 64)
        .ok_or(MathError::InvalidShift { amount: b })
}

fn shift_left(op: BinaryOp, lhs: Number, rhs: Number) -> Result<Number, MathError> {
    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => {
            let amount = shift_amount(b)?;
            let shifted = a.wrapping_shl(amount);
            // Round-trip check: bits shifted off the top are an overflow.
            if shifted.wrapping_shr(amount) != a {
                return Err(MathError::Overflow);
            }
            Ok(Number::Int(shifted))
        }
        _ => Err(MathError::InvalidOperator {
            op: op.symbol(),
            lhs: lhs.kind(),
            rhs: rhs.kind(),
        }),
    }
}

fn shift_right(op: BinaryOp, lhs: Number, rhs: Number) -> Result<Number, MathError> {
    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => {
            let amount = shift_amount(b)?;
            Ok(Number::Int(a.wrapping_shr(amount)))
        }
        _ => Err(MathError::InvalidOperator {
            op: op.symbol(),
            lhs: lhs.kind(),
            rhs: rhs.kind(),
        }),
    }
}

/// Function whitelist dispatch.
fn apply_function(name: &str, args: &[Number]) -> Result<Number, MathError> {
    match name {
        "sin" => unary_float(name, args, f64::sin),
        "cos" => unary_float(name, args, f64::cos),
        "tan" => unary_float(name, args, f64::tan),
        "asin" => unary_float(name, args, f64::asin),
        "acos" => unary_float(name, args, f64::acos),
        "atan" => unary_float(name, args, f64::atan),
        "sinh" => unary_float(name, args, f64::sinh),
        "cosh" => unary_float(name, args, f64::cosh),
        "tanh" => unary_float(name, args, f64::tanh),
        "asinh" => unary_float(name, args, f64::asinh),
        "acosh" => unary_float(name, args, f64::acosh),
        "atanh" => unary_float(name, args, f64::atanh),
        "sqrt" => unary_float(name, args, f64::sqrt),
        "exp" => unary_float(name, args, f64::exp),
        "log" => log(args),
        "log2" => unary_float(name, args, f64::log2),
        "log10" => unary_float(name, args, f64::log10),
        "erf" => unary_float(name, args, libm::erf),
        "erfc" => unary_float(name, args, libm::erfc),
        "gamma" => unary_float(name, args, libm::tgamma),
        "lgamma" => unary_float(name, args, libm::lgamma),
        "ceil" => rounding(name, args, f64::ceil),
        "floor" => rounding(name, args, f64::floor),
        "trunc" => rounding(name, args, f64::trunc),
        "round" => rounding(name, args, f64::round_ties_even),
        "abs" => abs(args),
        "gcd" => gcd(args),
        "hypot" => binary_float(name, args, f64::hypot),
        _ => Err(MathError::UndefinedFunction(name.to_string())),
    }
}

fn expect_one(name: &str, args: &[Number]) -> Result<Number, MathError> {
    match args {
        [x] => Ok(*x),
        _ => Err(MathError::WrongArity {
            function: name.to_string(),
            expected: "1",
            found: args.len(),
        }),
    }
}

fn unary_float(name: &str, args: &[Number], f: fn(f64) -> f64) -> Result<Number, MathError> {
    let x = expect_one(name, args)?;
    Ok(Number::Float(f(x.as_f64())))
}

fn binary_float(name: &str, args: &[Number], f: fn(f64, f64) -> f64) -> Result<Number, MathError> {
    match args {
        [x, y] => Ok(Number::Float(f(x.as_f64(), y.as_f64()))),
        _ => Err(MathError::WrongArity {
            function: name.to_string(),
            expected: "2",
            found: args.len(),
        }),
    }
}

/// Rounding functions return integers; an integer input passes through.
fn rounding(name: &str, args: &[Number], f: fn(f64) -> f64) -> Result<Number, MathError> {
    match expect_one(name, args)? {
        n @ Number::Int(_) => Ok(n),
        Number::Float(v) => float_to_int(f(v)),
    }
}

fn float_to_int(value: f64) -> Result<Number, MathError> {
    if !value.is_finite() || value < i64::MIN as f64 || value > i64::MAX as f64 {
        return Err(MathError::Overflow);
    }
    Ok(Number::Int(value as i64))
}

fn log(args: &[Number]) -> Result<Number, MathError> {
    match args {
        [x] => Ok(Number::Float(x.as_f64().ln())),
        [x, base] => Ok(Number::Float(x.as_f64().log(base.as_f64()))),
        _ => Err(MathError::WrongArity {
            function: "log".to_string(),
            expected: "1 or 2",
            found: args.len(),
        }),
    }
}

fn abs(args: &[Number]) -> Result<Number, MathError> {
    match expect_one("abs", args)? {
        Number::Int(v) => v.checked_abs().map(Number::Int).ok_or(MathError::Overflow),
        Number::Float(v) => Ok(Number::Float(v.abs())),
    }
}

fn gcd(args: &[Number]) -> Result<Number, MathError> {
    let (a, b) = match args {
        [Number::Int(a), Number::Int(b)] => (*a, *b),
        [Number::Float(_), _] | [_, Number::Float(_)] => {
            return Err(MathError::WrongArgType {
                function: "gcd".to_string(),
                expected: "int",
                found: "float",
            })
        }
        _ => {
            return Err(MathError::WrongArity {
                function: "gcd".to_string(),
                expected: "2",
                found: args.len(),
            })
        }
    };
    let value = gcd_u64(a.unsigned_abs(), b.unsigned_abs());
    i64::try_from(value)
        .map(Number::Int)
        .map_err(|_| MathError::Overflow)
}

fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

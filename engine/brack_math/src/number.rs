//! Numeric values for the arithmetic sub-language.

use std::fmt;

/// A 64-bit integer or float.
///
/// Mixed-kind binary operations promote to float; true division always
/// yields a float. Integer overflow is a reported error, never a wrap.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Widen to f64 (lossy for integers above 2^53).
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    /// Operand kind name used in error messages.
    pub fn kind(self) -> &'static str {
        match self {
            Number::Int(_) => "int",
            Number::Float(_) => "float",
        }
    }

    /// Absolute magnitude, used by the exponentiation clamp.
    pub(crate) fn magnitude(self) -> f64 {
        self.as_f64().abs()
    }

    pub(crate) fn is_zero(self) -> bool {
        match self {
            Number::Int(v) => v == 0,
            Number::Float(v) => v == 0.0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            Number::Float(v) if v.is_nan() => write!(f, "nan"),
            Number::Float(v) => write!(f, "{v}"),
        }
    }
}

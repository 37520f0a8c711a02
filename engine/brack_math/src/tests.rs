use super::{eval_str, MathError, Number};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn eval_int(source: &str) -> i64 {
    match eval_str(source) {
        Ok(Number::Int(v)) => v,
        other => panic!("expected integer from `{source}`, got {other:?}"),
    }
}

fn eval_float(source: &str) -> f64 {
    match eval_str(source) {
        Ok(Number::Float(v)) => v,
        other => panic!("expected float from `{source}`, got {other:?}"),
    }
}

#[test_case("1 + 2", 3 ; "addition")]
#[test_case("7 - 10", -3 ; "subtraction")]
#[test_case("6 * 7", 42 ; "multiplication")]
#[test_case("7 // 2", 3 ; "floor division")]
#[test_case("-7 // 2", -4 ; "floor division floors toward negative infinity")]
#[test_case("-7 // -2", 3 ; "floor division with negative divisor")]
#[test_case("7 % 3", 1 ; "modulo")]
#[test_case("-7 % 3", 2 ; "modulo takes divisor sign")]
#[test_case("7 % -3", -2 ; "modulo with negative divisor")]
#[test_case("2 ** 8", 256 ; "power")]
#[test_case("2 ** 3 ** 2", 512 ; "power right associative")]
#[test_case("-2 ** 2", -4 ; "unary minus looser than power")]
#[test_case("1 << 6", 64 ; "shift left")]
#[test_case("255 >> 4", 15 ; "shift right")]
#[test_case("12 & 10", 8 ; "bitwise and")]
#[test_case("12 | 3", 15 ; "bitwise or")]
#[test_case("12 ^ 10", 6 ; "bitwise xor")]
#[test_case("~5", -6 ; "bitwise not")]
#[test_case("2 + 3 * 4", 14 ; "precedence")]
#[test_case("(2 + 3) * 4", 20 ; "parentheses")]
#[test_case("1 + 2 << 3", 24 ; "shift looser than addition")]
fn integer_results(source: &str, expected: i64) {
    assert_eq!(eval_int(source), expected);
}

#[test]
fn true_division_always_floats() {
    assert_eq!(eval_str("7 / 2"), Ok(Number::Float(3.5)));
    assert_eq!(eval_str("4 / 2"), Ok(Number::Float(2.0)));
}

#[test]
fn mixed_operands_promote_to_float() {
    assert_eq!(eval_str("2.5 + 1"), Ok(Number::Float(3.5)));
    assert_eq!(eval_str("7.0 // 2"), Ok(Number::Float(3.0)));
}

#[test]
fn float_modulo_takes_divisor_sign() {
    let v = eval_float("-7.5 % 2");
    assert!((v - 0.5).abs() < 1e-12, "got {v}");
}

#[test]
fn constants_are_case_insensitive() {
    let pi = eval_float("PI");
    assert!((pi - std::f64::consts::PI).abs() < 1e-15);
    assert_eq!(eval_str("c"), Ok(Number::Int(299_792_458)));
    assert_eq!(eval_str("atm"), Ok(Number::Int(101_325)));
}

#[test]
fn undefined_constant_is_reported() {
    assert_eq!(
        eval_str("bogus"),
        Err(MathError::UndefinedName("bogus".to_string()))
    );
}

#[test]
fn whitelisted_functions() {
    assert_eq!(eval_str("sqrt(16)"), Ok(Number::Float(4.0)));
    assert_eq!(eval_str("hypot(3, 4)"), Ok(Number::Float(5.0)));
    assert_eq!(eval_str("gcd(12, 18)"), Ok(Number::Int(6)));
    assert_eq!(eval_str("ceil(1.2)"), Ok(Number::Int(2)));
    assert_eq!(eval_str("floor(-1.2)"), Ok(Number::Int(-2)));
    assert_eq!(eval_str("trunc(-1.8)"), Ok(Number::Int(-1)));
    let log = eval_float("log(8, 2)");
    assert!((log - 3.0).abs() < 1e-12);
    let gamma = eval_float("gamma(5)");
    assert!((gamma - 24.0).abs() < 1e-9);
    let erf = eval_float("erf(0)");
    assert!(erf.abs() < 1e-15);
}

#[test]
fn round_is_ties_to_even() {
    assert_eq!(eval_str("round(2.5)"), Ok(Number::Int(2)));
    assert_eq!(eval_str("round(3.5)"), Ok(Number::Int(4)));
    assert_eq!(eval_str("round(2.6)"), Ok(Number::Int(3)));
}

#[test]
fn undefined_function_is_reported() {
    assert_eq!(
        eval_str("max(1, 2)"),
        Err(MathError::UndefinedFunction("max".to_string()))
    );
}

#[test]
fn power_clamp_rejects_large_base() {
    assert_eq!(eval_str("200001 ** 2"), Err(MathError::OperandTooLarge));
    // The boundary itself is allowed (and overflows i64 well before the
    // clamp would matter for small exponents).
    assert_eq!(eval_str("200000 ** 2"), Ok(Number::Int(40_000_000_000)));
}

#[test]
fn power_clamp_rejects_large_exponent() {
    assert_eq!(eval_str("2 ** 501"), Err(MathError::OperandTooLarge));
}

#[test]
fn in_range_power_still_overflows_at_i64() {
    assert_eq!(eval_str("2 ** 500"), Err(MathError::Overflow));
}

#[test]
fn division_by_zero_in_all_forms() {
    assert_eq!(eval_str("1 / 0"), Err(MathError::DivisionByZero));
    assert_eq!(eval_str("1.0 / 0.0"), Err(MathError::DivisionByZero));
    assert_eq!(eval_str("1 // 0"), Err(MathError::DivisionByZero));
    assert_eq!(eval_str("1 % 0"), Err(MathError::DivisionByZero));
    assert_eq!(eval_str("0 ** -1"), Err(MathError::DivisionByZero));
}

#[test]
fn bitwise_on_floats_is_invalid_operator() {
    assert_eq!(
        eval_str("1.5 & 2"),
        Err(MathError::InvalidOperator {
            op: "&",
            lhs: "float",
            rhs: "int",
        })
    );
    assert_eq!(
        eval_str("~1.5"),
        Err(MathError::InvalidUnaryOperator {
            op: "~",
            operand: "float",
        })
    );
}

#[test]
fn shift_amount_is_bounded() {
    assert_eq!(
        eval_str("1 << 64"),
        Err(MathError::InvalidShift { amount: 64 })
    );
    assert_eq!(
        eval_str("1 << (0 - 1)"),
        Err(MathError::InvalidShift { amount: -1 })
    );
    assert_eq!(eval_str("3 << 62"), Err(MathError::Overflow));
}

#[test]
fn integer_overflow_is_reported() {
    assert_eq!(
        eval_str("9223372036854775807 + 1"),
        Err(MathError::Overflow)
    );
    assert_eq!(eval_str("-(-9223372036854775807 - 1)"), Err(MathError::Overflow));
}

#[test]
fn wrong_arity_is_reported() {
    assert_eq!(
        eval_str("sin(1, 2)"),
        Err(MathError::WrongArity {
            function: "sin".to_string(),
            expected: "1",
            found: 2,
        })
    );
}

#[test]
fn gcd_requires_integers() {
    assert_eq!(
        eval_str("gcd(1.5, 2)"),
        Err(MathError::WrongArgType {
            function: "gcd".to_string(),
            expected: "int",
            found: "float",
        })
    );
}

#[test]
fn display_matches_tag_rendering() {
    assert_eq!(eval_str("2 ** 8").map(|n| n.to_string()), Ok("256".to_string()));
    assert_eq!(eval_str("7 / 2").map(|n| n.to_string()), Ok("3.5".to_string()));
    assert_eq!(eval_str("8.0 / 2").map(|n| n.to_string()), Ok("4".to_string()));
}

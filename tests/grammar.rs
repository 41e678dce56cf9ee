use formulary::{
    ErrorKind, ExpressionError, evaluate_expression,
    interpreter::{
        parser::core::{evaluate, evaluate_with_depth},
        symbols::SymbolTable,
    },
};

fn assert_value(src: &str, expected: f64) {
    match evaluate_expression(src) {
        Ok(value) => assert!((value - expected).abs() < 1e-9,
                             "'{src}' evaluated to {value}, expected {expected}"),
        Err(e) => panic!("'{src}' failed: {e}"),
    }
}

fn assert_failure(src: &str, kind: ErrorKind) {
    match evaluate_expression(src) {
        Ok(value) => panic!("'{src}' evaluated to {value} but was expected to fail"),
        Err(e) => assert_eq!(e.kind(), kind, "'{src}' failed with {e}"),
    }
}

fn symbols(bindings: &[(&str, f64)]) -> SymbolTable {
    let mut table = SymbolTable::new();
    for (name, value) in bindings {
        table.define(name, *value).unwrap();
    }
    table
}

#[test]
fn arithmetic_matches_floating_point() {
    let table = symbols(&[("x", 7.5), ("y", -2.25)]);
    let cases: [(&str, fn(f64, f64) -> f64); 5] = [("x + y", |a, b| a + b),
                                                   ("x - y", |a, b| a - b),
                                                   ("x * y", |a, b| a * b),
                                                   ("x / y", |a, b| a / b),
                                                   ("x % y", |a, b| a % b)];
    for (src, op) in cases {
        assert_eq!(evaluate(src, &table), Ok(op(7.5, -2.25)), "{src}");
    }
    assert_eq!(evaluate("x ^ y", &symbols(&[("x", 7.5), ("y", 2.0)])), Ok(56.25));
}

#[test]
fn precedence() {
    assert_value("1 + 2 * 3", 7.0);
    assert_value("(1 + 2) * 3", 9.0);
    assert_value("2 * 3 ^ 2", 18.0);
    assert_value("10 - 4 - 3", 3.0);
    assert_value("100 / 10 / 5", 2.0);
    assert_value("7 % 4 * 2", 6.0);
    assert_value("1 + 2 == 3", 1.0);
}

#[test]
fn subtraction_consumes_one_operand_and_continues() {
    assert_value("10 - 2 + 3", 11.0);
    assert_value("10 - 2 - 3 + 1", 6.0);
}

#[test]
fn unary_signs() {
    assert_value("-3 + 5", 2.0);
    assert_value("+3", 3.0);
    assert_value("-2 ^ 2", 4.0);
    assert_value("2 * -3", -6.0);
    assert_failure("--3", ErrorKind::Syntax);
}

#[test]
fn power_is_a_single_application() {
    assert_value("2 ^ 10", 1024.0);
    assert_value("4 ^ 0.5", 2.0);
    assert_value("(-2) ^ 3", -8.0);
    assert_value("(-4) ^ -2", 0.0625);
    assert_failure("2 ^ 3 ^ 2", ErrorKind::Syntax);
}

#[test]
fn fractional_root_of_negative_fails() {
    assert_failure("(-8) ^ (1/3)", ErrorKind::Runtime);
    assert_failure("(-4) ^ 0.5", ErrorKind::Runtime);
    assert_failure("(-4) ^ -0.5", ErrorKind::Runtime);
}

#[test]
fn zero_division_and_modulo_fail() {
    assert_failure("1/0", ErrorKind::Runtime);
    assert_failure("5%0", ErrorKind::Runtime);
    assert_failure("1 / (2 - 2)", ErrorKind::Runtime);
    assert_eq!(evaluate_expression("1/0"),
               Err(ExpressionError::DivisionByZero { position: 1 }));
}

#[test]
fn comparisons_yield_zero_or_one() {
    assert_value("3 > 2", 1.0);
    assert_value("3 < 2", 0.0);
    assert_value("2 >= 2", 1.0);
    assert_value("2 <= 1", 0.0);
    assert_value("2 != 2", 0.0);
    assert_value("2 == 2", 1.0);
}

#[test]
fn comparisons_chain_sequentially() {
    assert_value("3 > 2 > 1", 0.0);
    assert_value("1 < 2 < 3", 1.0);
    assert_value("1 == 1 == 1", 1.0);
}

#[test]
fn logical_operators() {
    assert_value("1 and 0", 0.0);
    assert_value("2 and 3", 1.0);
    assert_value("0 or 0", 0.0);
    assert_value("0 or 5", 1.0);
    assert_value("1 > 2 or 3 > 2", 1.0);
    assert_value("0 and 1 or 1", 1.0);
}

#[test]
fn concatenation_joins_digits() {
    assert_value("12 ~ 34", 1234.0);
    assert_value("1 ~ 0 ~ 5", 105.0);
    assert_value("-1 ~ 2", -12.0);
    assert_value("2 ~ 3 * 2", 46.0);
    assert_failure("1.5 ~ 2", ErrorKind::Runtime);
    assert_failure("1 ~ 2.5", ErrorKind::Runtime);
    assert_failure("9999999999 ~ 9999999999", ErrorKind::Runtime);
}

#[test]
fn concatenation_of_bound_values() {
    let table = symbols(&[("a1", 12.0), ("a2", 34.0)]);
    assert_eq!(evaluate("a1~a2", &table), Ok(1234.0));
}

#[test]
fn functions() {
    assert_value("sin(0)", 0.0);
    assert_value("cos(0)", 1.0);
    assert_value("tan(0)", 0.0);
    assert_value("asin(1)", std::f64::consts::FRAC_PI_2);
    assert_value("acos(1)", 0.0);
    assert_value("atan(1)", std::f64::consts::FRAC_PI_4);
    assert_value("exp(0)", 1.0);
    assert_value("log(e)", 1.0);
    assert_value("log10(1000)", 3.0);
    assert_value("sqrt(16)", 4.0);
    assert_value("sqrt(2 + 2) * 2", 4.0);
}

#[test]
fn int_truncates_toward_zero() {
    assert_value("int(2.7)", 2.0);
    assert_value("int(-2.7)", -2.0);
    assert_value("int(3)", 3.0);
}

#[test]
fn function_domains() {
    assert_failure("sqrt(-1)", ErrorKind::Runtime);
    assert_failure("log(0)", ErrorKind::Runtime);
    assert_failure("log(0.5)", ErrorKind::Runtime);
    assert_failure("log10(0)", ErrorKind::Runtime);
    assert_value("log(1)", 0.0);
    assert_value("log10(1)", 0.0);
    assert_eq!(evaluate_expression("2 + log(0)"),
               Err(ExpressionError::DomainError { function: "log",
                                                  argument: 0.0,
                                                  position: 4, }));
}

#[test]
fn exp10_is_not_supported() {
    assert_failure("exp10(2)", ErrorKind::Syntax);
}

#[test]
fn function_calls_need_parentheses() {
    assert!(matches!(evaluate_expression("sqrt 4"),
                     Err(ExpressionError::ExpectedOpeningParen { .. })));
    assert!(matches!(evaluate_expression("sqrt(4"),
                     Err(ExpressionError::ExpectedClosingParen { .. })));
    assert!(matches!(evaluate_expression("(1 + 2"),
                     Err(ExpressionError::ExpectedClosingParen { .. })));
}

#[test]
fn parentheses_hold_additive_expressions_only() {
    assert_failure("(1 < 2)", ErrorKind::Syntax);
    assert_failure("sqrt(1 and 1)", ErrorKind::Syntax);
}

#[test]
fn reserved_constants() {
    assert_value("pi * 2", 6.283_185_307);
    assert_value("e", std::f64::consts::E);
    let mut table = SymbolTable::new();
    assert!(matches!(table.define("pi", 3.0),
                     Err(ExpressionError::ConstantReassignment { .. })));
    assert!(matches!(table.define("e", 3.0),
                     Err(ExpressionError::ConstantReassignment { .. })));
}

#[test]
fn assignment_is_not_part_of_the_grammar() {
    assert_failure("pi=3", ErrorKind::Lexical);
    assert_failure("x = 3", ErrorKind::Lexical);
}

#[test]
fn unknown_symbols() {
    assert_eq!(evaluate_expression("1 + foo"),
               Err(ExpressionError::UnknownSymbol { name:     "foo".to_string(),
                                                    position: 4, }));
}

#[test]
fn number_literals() {
    assert_value("1e3", 1000.0);
    assert_value("2.5E-1", 0.25);
    assert_value(".5 + 2.", 2.5);
    assert_value("1e3 + 1", 1001.0);
}

#[test]
fn lexical_errors() {
    assert_failure("1e", ErrorKind::Lexical);
    assert_failure("1e+", ErrorKind::Lexical);
    assert_failure(". 5", ErrorKind::Lexical);
    assert_failure("!1", ErrorKind::Lexical);
    assert_failure("1 $ 2", ErrorKind::Lexical);
    assert_failure("3 # 1", ErrorKind::Lexical);
}

#[test]
fn malformed_input() {
    assert_failure("", ErrorKind::Syntax);
    assert_failure("1 +", ErrorKind::Syntax);
    assert_failure("1 2", ErrorKind::Syntax);
    assert_failure(")", ErrorKind::Syntax);
    assert_failure("*3", ErrorKind::Syntax);
}

#[test]
fn nesting_is_bounded() {
    let deep = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert!(matches!(evaluate_expression(&deep),
                     Err(ExpressionError::NestingTooDeep { limit: 256, .. })));

    let shallow = format!("{}1{}", "(".repeat(8), ")".repeat(8));
    let table = SymbolTable::new();
    assert_eq!(evaluate_with_depth(&shallow, &table, 8), Ok(1.0));
    assert!(evaluate_with_depth(&shallow, &table, 7).is_err());
}

use std::collections::BTreeMap;

use formulary::{
    EngineError, EngineOptions, ErrorKind, ExpressionEngine, ExpressionError,
    error::{Diagnostic, Origin},
};
use pretty_assertions::assert_eq;

fn engine(values: &[(&str, f64)], expressions: &[(&str, &str)]) -> ExpressionEngine {
    let mut engine = ExpressionEngine::new();
    for (id, value) in values {
        engine.insert_value(*id, *value);
    }
    for (id, source) in expressions {
        engine.insert_expression(*id, *source);
    }
    engine
}

fn results(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter()
         .map(|(id, value)| ((*id).to_string(), *value))
         .collect()
}

fn assert_success(engine: &mut ExpressionEngine, expected: &[(&str, f64)]) {
    match engine.evaluate() {
        Ok(actual) => assert_eq!(actual, results(expected)),
        Err(e) => panic!("Evaluation failed: {e}"),
    }
}

fn assert_failure(engine: &mut ExpressionEngine, kind: ErrorKind) -> EngineError {
    match engine.evaluate() {
        Ok(actual) => panic!("Evaluation succeeded with {actual:?} but was expected to fail"),
        Err(e) => {
            assert_eq!(e.kind(), kind, "unexpected failure: {e}");
            e
        },
    }
}

#[test]
fn reference_scenario() {
    let mut e = engine(&[("a1", 5.0)], &[("a", "a1+1")]);
    assert_success(&mut e, &[("a", 6.0)]);
    assert_eq!(e.get_result("a"), Some(6.0));
}

#[test]
fn chain_is_evaluated_dependencies_first() {
    let mut e = engine(&[("a1", 5.0)], &[("a3", "a2*2"), ("a2", "a1+1")]);
    assert_success(&mut e, &[("a2", 6.0), ("a3", 12.0)]);
}

#[test]
fn registration_order_does_not_matter() {
    let mut e = engine(&[("base", 2.0)],
                       &[("a", "d + b"), ("b", "c * 10"), ("c", "base + 1"), ("d", "c ~ b")]);
    assert_success(&mut e, &[("a", 360.0), ("b", 30.0), ("c", 3.0), ("d", 330.0)]);
}

#[test]
fn evaluation_is_idempotent() {
    let mut e = engine(&[("x", 3.0), ("y", 4.0)],
                       &[("h", "sqrt(sq)"), ("sq", "x^2 + y^2"), ("big", "h > 4")]);
    let first = e.evaluate().unwrap();
    let second = e.evaluate().unwrap();
    assert_eq!(first, second);
    assert_eq!(first, results(&[("big", 1.0), ("h", 5.0), ("sq", 25.0)]));
}

#[test]
fn inserts_overwrite() {
    let mut e = engine(&[("a1", 5.0)], &[("a", "a1 + 1")]);
    e.insert_value("a1", 10.0);
    e.insert_expression("a", "a1 * 2");
    assert_success(&mut e, &[("a", 20.0)]);
}

#[test]
fn each_evaluation_starts_from_scratch() {
    let mut e = engine(&[("a1", 5.0)], &[("a", "a1 + 1")]);
    assert_success(&mut e, &[("a", 6.0)]);
    e.insert_value("a1", 1.0);
    e.insert_expression("b", "a * 3");
    assert_success(&mut e, &[("a", 2.0), ("b", 6.0)]);
}

#[test]
fn empty_engine_evaluates_to_nothing() {
    let mut e = ExpressionEngine::new();
    assert_success(&mut e, &[]);
}

#[test]
fn values_alone_produce_no_results() {
    let mut e = engine(&[("a1", 5.0)], &[]);
    assert_success(&mut e, &[]);
    assert_eq!(e.get_result("a1"), None);
}

#[test]
fn reserved_constants_resolve_without_registration() {
    let mut e = engine(&[], &[("tau", "pi*2")]);
    let results = e.evaluate().unwrap();
    assert!((results["tau"] - 6.283_185_307).abs() < 1e-9);
}

#[test]
fn expression_shadows_value_with_same_id() {
    let mut e = engine(&[("a", 1.0)], &[("a", "2"), ("b", "a * 10")]);
    assert_success(&mut e, &[("a", 2.0), ("b", 20.0)]);
}

#[test]
fn direct_cycle_fails() {
    let mut e = engine(&[], &[("a", "b + 1"), ("b", "a + 1")]);
    let err = assert_failure(&mut e, ErrorKind::CyclicDependency);
    let cycles: Vec<Vec<&str>> = err.cycles().iter().map(|c| c.ids().collect()).collect();
    assert_eq!(cycles, vec![vec!["a", "b"]]);
    assert_eq!(err.to_string(), "a={b + 1} -> b={a + 1} -> a");
    assert_eq!(e.get_result("a"), None);
}

#[test]
fn transitive_cycle_fails() {
    let mut e = engine(&[("v", 1.0)], &[("a", "b"), ("b", "c"), ("c", "a + v"), ("ok", "v")]);
    let err = assert_failure(&mut e, ErrorKind::CyclicDependency);
    assert_eq!(err.cycles().len(), 1);
    assert_eq!(err.cycles()[0].ids().collect::<Vec<_>>(), ["a", "b", "c"]);
}

#[test]
fn self_reference_is_a_cycle() {
    let mut e = engine(&[], &[("a", "a + 1")]);
    let err = assert_failure(&mut e, ErrorKind::CyclicDependency);
    assert_eq!(err.to_string(), "a={a + 1} -> a");
}

#[test]
fn every_independent_cycle_is_reported() {
    let mut e = engine(&[], &[("a", "b"), ("b", "a"), ("x", "y"), ("y", "x")]);
    let err = assert_failure(&mut e, ErrorKind::CyclicDependency);
    assert_eq!(err.cycles().len(), 2);
    assert_eq!(err.to_string(), "a={b} -> b={a} -> a\nx={y} -> y={x} -> x");
}

#[test]
fn missing_identifier_fails_before_evaluation() {
    let mut e = engine(&[("a1", 1.0)], &[("a", "a1 + missing"), ("b", "1 / 0")]);
    let err = assert_failure(&mut e, ErrorKind::Parsing);
    assert_eq!(err.diagnostics(),
               [Diagnostic { id:     "a".to_string(),
                             origin: Origin::Expression { index:  0,
                                                          source: "a1 + missing".to_string(), },
                             error:  ExpressionError::UnknownSymbol { name:     "missing".to_string(),
                                                                      position: 5, }, }]);
    assert!(err.to_string().contains("missing"));
}

#[test]
fn every_missing_identifier_is_collected() {
    let mut e = engine(&[], &[("a", "p + q"), ("b", "r")]);
    let err = assert_failure(&mut e, ErrorKind::Parsing);
    let missing: Vec<&str> = err.diagnostics()
                                .iter()
                                .map(|d| match &d.error {
                                    ExpressionError::UnknownSymbol { name, .. } => name.as_str(),
                                    other => panic!("unexpected {other}"),
                                })
                                .collect();
    assert_eq!(missing, ["p", "q", "r"]);
}

#[test]
fn missing_identifiers_are_reported_before_cycles() {
    let mut e = engine(&[], &[("a", "b"), ("b", "a + nope")]);
    assert_failure(&mut e, ErrorKind::Parsing);
}

#[test]
fn lexical_error_during_extraction() {
    let mut e = engine(&[], &[("a", "1 = 1")]);
    let err = assert_failure(&mut e, ErrorKind::Parsing);
    assert_eq!(err.diagnostics()[0].error.kind(), ErrorKind::Lexical);
}

#[test]
fn runtime_failures_are_collected_across_expressions() {
    let mut e = engine(&[("zero", 0.0)],
                       &[("a", "1 / zero"), ("b", "sqrt(-1)"), ("c", "1.5 ~ 2"), ("d", "2 + 2")]);
    let err = assert_failure(&mut e, ErrorKind::Parsing);
    let failed: Vec<(&str, ErrorKind)> = err.diagnostics()
                                            .iter()
                                            .map(|d| (d.id.as_str(), d.error.kind()))
                                            .collect();
    assert_eq!(failed,
               [("a", ErrorKind::Runtime), ("b", ErrorKind::Runtime), ("c", ErrorKind::Runtime)]);
    assert_eq!(e.get_result("d"), None);
}

#[test]
fn syntax_failures_during_evaluation() {
    let mut e = engine(&[], &[("a", "(1 + 2"), ("b", "exp10(1)")]);
    let err = assert_failure(&mut e, ErrorKind::Parsing);
    assert!(err.diagnostics()
               .iter()
               .all(|d| d.error.kind() == ErrorKind::Syntax));
    assert_eq!(err.diagnostics().len(), 2);
}

#[test]
fn dependents_of_a_failed_expression_also_fail() {
    let mut e = engine(&[], &[("a", "1 / 0"), ("b", "a + 1")]);
    let err = assert_failure(&mut e, ErrorKind::Parsing);
    let ids: Vec<&str> = err.diagnostics().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
}

#[test]
fn failed_evaluation_clears_previous_results() {
    let mut e = engine(&[("a1", 5.0)], &[("a", "a1 + 1")]);
    assert_success(&mut e, &[("a", 6.0)]);
    e.insert_expression("b", "a / 0");
    assert_failure(&mut e, ErrorKind::Parsing);
    assert_eq!(e.get_result("a"), None);
}

#[test]
fn reserved_identifiers_cannot_be_registered() {
    let mut e = engine(&[("pi", 3.0)], &[("x", "pi")]);
    let err = assert_failure(&mut e, ErrorKind::Parsing);
    assert_eq!(err.diagnostics()[0].origin, Origin::Value(3.0));
    assert_eq!(err.diagnostics()[0].error.kind(), ErrorKind::Syntax);

    let mut e = engine(&[], &[("e", "2")]);
    let err = assert_failure(&mut e, ErrorKind::Parsing);
    assert!(matches!(err.diagnostics()[0].error,
                     ExpressionError::ConstantReassignment { .. }));
}

#[test]
fn concatenation_of_values() {
    let mut e = engine(&[("a1", 12.0), ("a2", 34.0)], &[("r", "a1~a2")]);
    assert_success(&mut e, &[("r", 1234.0)]);
}

#[test]
fn nesting_limit_is_configurable() {
    let mut e = ExpressionEngine::with_options(EngineOptions { max_depth: 2 });
    e.insert_expression("ok", "((1))");
    e.insert_expression("deep", "(((1)))");
    let err = assert_failure(&mut e, ErrorKind::Parsing);
    assert_eq!(err.diagnostics().len(), 1);
    assert_eq!(err.diagnostics()[0].id, "deep");
    assert!(matches!(err.diagnostics()[0].error,
                     ExpressionError::NestingTooDeep { limit: 2, .. }));
}

#[test]
fn long_dependency_chain() {
    let mut e = ExpressionEngine::new();
    e.insert_value("v0", 0.0);
    for i in 1..=2_000 {
        e.insert_expression(format!("v{i}"), format!("v{} + 1", i - 1));
    }
    let results = e.evaluate().unwrap();
    assert_eq!(results.len(), 2_000);
    assert_eq!(results["v2000"], 2_000.0);
}

#[test]
fn id_count_counts_referencing_expressions() {
    let e = engine(&[("a1", 1.0), ("a2", 2.0), ("a3", 3.0)],
                   &[("x", "a1 + a1 * a2"), ("y", "a1 + x"), ("z", "pi")]);
    let counts = e.id_count();
    let expected: BTreeMap<String, usize> = [("a1", 2), ("a2", 1), ("a3", 0)].into_iter()
                                                                           .map(|(id, n)| (id.to_string(), n))
                                                                           .collect();
    assert_eq!(counts, expected);
    assert_eq!(e.unique_ids(), ["a1", "a2"]);
}

#[test]
fn id_count_skips_expressions_that_do_not_lex() {
    let e = engine(&[("a1", 1.0)], &[("bad", "a1 = 2"), ("good", "a1")]);
    assert_eq!(e.id_count()["a1"], 1);
}

#[test]
fn registered_bindings_are_inspectable() {
    let e = engine(&[("b", 2.0), ("a", 1.0)], &[("y", "a + b"), ("x", "a")]);
    assert_eq!(e.values().collect::<Vec<_>>(), [("a", 1.0), ("b", 2.0)]);
    assert_eq!(e.expressions().collect::<Vec<_>>(), [("x", "a"), ("y", "a + b")]);
}

//! # formulary
//!
//! formulary evaluates a set of named numeric expressions that may reference
//! each other and caller-supplied values. It discovers the dependencies between
//! expressions, rejects unresolved identifiers and dependency cycles, and
//! evaluates every expression after the ones it references, whatever order
//! they were registered in.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

/// Orchestrates evaluation of named expressions.
///
/// This module declares the [`ExpressionEngine`] that owns registered values
/// and expressions, together with its [`EngineOptions`].
///
/// # Responsibilities
/// - Extracts referenced identifiers and validates them before evaluating.
/// - Builds the dependency graph and rejects cycles.
/// - Evaluates expressions dependencies first, collecting every failure.
/// - Reports value usage counts.
pub mod engine;
/// Provides the error types for single expressions and whole passes.
///
/// # Responsibilities
/// - Classifies failures as lexical, syntax or runtime.
/// - Aggregates per-expression diagnostics and dependency cycles.
/// - Attaches byte offsets and expression text for user feedback.
pub mod error;
/// Directed dependency graph with topological ordering and cycle detection.
pub mod graph;
/// Lexes, parses and evaluates one expression.
///
/// This module ties together the lexer, the recursive-descent parser that
/// evaluates while it parses, and the symbol table identifiers resolve
/// against.
///
/// # Responsibilities
/// - Tokenizes expression text.
/// - Evaluates the grammar with operator precedence and math-domain checks.
/// - Keeps reserved constants immutable.
pub mod interpreter;
/// General utilities for exact numeric conversion.
pub mod util;

pub use engine::{EngineOptions, ExpressionEngine};
pub use error::{EngineError, ErrorKind, ExpressionError};

use crate::interpreter::{parser::core::evaluate, symbols::SymbolTable};

/// Evaluates a single expression that references only the reserved constants
/// `pi` and `e`.
///
/// # Errors
/// Returns the first lexical, syntax or runtime error in the expression.
///
/// # Examples
/// ```
/// use formulary::{ErrorKind, evaluate_expression};
///
/// assert_eq!(evaluate_expression("2 ^ 10 % 1000"), Ok(24.0));
/// assert_eq!(evaluate_expression("12 ~ 34"), Ok(1234.0));
///
/// let err = evaluate_expression("1 / 0").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Runtime);
/// ```
pub fn evaluate_expression(source: &str) -> Result<f64, ExpressionError> {
    evaluate(source, &SymbolTable::new())
}

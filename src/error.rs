/// Aggregate failures.
///
/// Defines the errors returned by the expression engine once a whole pass has
/// run: the collected per-expression diagnostics, and the list of dependency
/// cycles found in the graph.
pub mod engine_error;
/// Single-expression failures.
///
/// Defines every error that lexing, parsing or evaluating one expression can
/// produce, together with the [`ErrorKind`] classification and the byte offset
/// of the offending token.
pub mod expression_error;

pub use engine_error::{CycleLink, DependencyCycle, Diagnostic, EngineError, Origin};
pub use expression_error::{ErrorKind, ExpressionError};

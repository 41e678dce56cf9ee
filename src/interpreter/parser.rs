/// Parser state and entry points.
///
/// Holds the [`core::Parser`] context that binds a lexer to a symbol table,
/// the nesting guard, and the top-level `evaluate` functions.
pub mod core;

/// Binary operator levels.
///
/// Logical `or`/`and`, comparisons, addition, multiplication and the single
/// power application, from lowest to highest precedence.
pub mod binary;

/// Unary, concatenation and primary levels.
///
/// Handles leading signs, the `~` digit join, identifiers, literals,
/// parenthesized subexpressions and function calls.
pub mod unary;

/// Builtin function evaluation.
///
/// Applies a function keyword to its argument, enforcing each function's
/// domain.
pub mod function;

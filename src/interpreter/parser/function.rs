use crate::{
    error::ExpressionError,
    interpreter::{lexer::Function, parser::core::ParseResult},
};

/// Applies a builtin function to its argument.
///
/// Domain rules:
/// - `tan` rejects arguments whose cosine is exactly zero.
/// - `log` and `log10` reject arguments below `1`.
/// - `sqrt` rejects negative arguments.
/// - `int` rounds toward zero: ceiling for negative arguments, floor
///   otherwise.
/// - `exp10` is recognized by the lexer but cannot be evaluated.
///
/// The trigonometric inverses follow `f64` semantics outside `[-1, 1]`.
///
/// # Parameters
/// - `function`: The function keyword.
/// - `argument`: The evaluated argument.
/// - `position`: Byte offset of the keyword, for error reporting.
///
/// # Errors
/// [`ExpressionError::DomainError`] when the argument violates the rules above,
/// [`ExpressionError::UnsupportedFunction`] for `exp10`.
///
/// # Example
/// ```
/// use formulary::interpreter::{lexer::Function, parser::function::apply_function};
///
/// assert_eq!(apply_function(Function::Log, 1.0, 0), Ok(0.0));
/// assert_eq!(apply_function(Function::Int, -2.7, 0), Ok(-2.0));
/// assert!(apply_function(Function::Sqrt, -1.0, 0).is_err());
/// ```
#[allow(clippy::float_cmp)]
pub fn apply_function(function: Function, argument: f64, position: usize) -> ParseResult<f64> {
    let domain_error = || ExpressionError::DomainError { function: function.name(),
                                                         argument,
                                                         position };
    match function {
        Function::Sin => Ok(argument.sin()),
        Function::Cos => Ok(argument.cos()),
        Function::Tan if argument.cos() == 0.0 => Err(domain_error()),
        Function::Tan => Ok(argument.tan()),
        Function::Asin => Ok(argument.asin()),
        Function::Acos => Ok(argument.acos()),
        Function::Atan => Ok(argument.atan()),
        Function::Exp => Ok(argument.exp()),
        Function::Log | Function::Log10 if argument < 1.0 => Err(domain_error()),
        Function::Log => Ok(argument.ln()),
        Function::Log10 => Ok(argument.log10()),
        Function::Sqrt if argument < 0.0 => Err(domain_error()),
        Function::Sqrt => Ok(argument.sqrt()),
        Function::Int if argument < 0.0 => Ok(argument.ceil()),
        Function::Int => Ok(argument.floor()),
        Function::Exp10 => Err(ExpressionError::UnsupportedFunction { function: function.name()
                                                                                .to_string(),
                                                                      position }),
    }
}

use thiserror::Error;

/// The class a failure belongs to.
///
/// The first three kinds describe a problem inside a single expression; the last
/// two are the aggregates reported by [`crate::engine::ExpressionEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A malformed token.
    Lexical,
    /// An unresolved identifier, malformed grammar or illegal assignment target.
    Syntax,
    /// Zero division, a math-domain violation or a non-integral concatenation.
    Runtime,
    /// One or more lexical, syntax or runtime failures collected in one pass.
    Parsing,
    /// Every dependency cycle found in one pass.
    CyclicDependency,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Lexical => "Lexical error",
            Self::Syntax => "Syntax error",
            Self::Runtime => "Runtime error",
            Self::Parsing => "Parsing error",
            Self::CyclicDependency => "Cyclic dependency error",
        };
        f.write_str(name)
    }
}

/// Represents every failure that can occur while lexing, parsing or evaluating one
/// expression.
///
/// Each variant records `position`, the byte offset of the offending token inside
/// the expression text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    /// A character sequence that does not form a valid token.
    #[error("not a valid token '{token}' at position {position}")]
    InvalidToken {
        /// The offending text.
        token:    String,
        /// Byte offset in the expression text.
        position: usize,
    },
    /// An identifier with no value in the symbol table.
    #[error("symbol '{name}' not found at position {position}")]
    UnknownSymbol {
        /// The identifier.
        name:     String,
        /// Byte offset in the expression text.
        position: usize,
    },
    /// A token that cannot start or continue the expression at this point.
    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// The offending token text.
        token:    String,
        /// Byte offset in the expression text.
        position: usize,
    },
    /// The text ended in the middle of an expression.
    #[error("unexpected end of input at position {position}")]
    UnexpectedEndOfInput {
        /// Byte offset in the expression text.
        position: usize,
    },
    /// A function keyword that is not followed by `(`.
    #[error("missing ( after function name '{function}' at position {position}")]
    ExpectedOpeningParen {
        /// The function keyword.
        function: String,
        /// Byte offset in the expression text.
        position: usize,
    },
    /// A subexpression or argument that is not closed by `)`.
    #[error("missing ) after {context} at position {position}")]
    ExpectedClosingParen {
        /// What was being closed.
        context:  &'static str,
        /// Byte offset in the expression text.
        position: usize,
    },
    /// A function keyword that is recognized but cannot be evaluated.
    #[error("function '{function}' is not supported at position {position}")]
    UnsupportedFunction {
        /// The function keyword.
        function: String,
        /// Byte offset in the expression text.
        position: usize,
    },
    /// An attempt to redefine `pi` or `e`.
    #[error("attempt to modify the constant '{name}'")]
    ConstantReassignment {
        /// The reserved identifier.
        name: String,
    },
    /// Parentheses or function arguments nested beyond the configured limit.
    #[error("expression nested deeper than {limit} levels at position {position}")]
    NestingTooDeep {
        /// The configured limit.
        limit:    usize,
        /// Byte offset in the expression text.
        position: usize,
    },
    /// Division or modulo by exactly zero.
    #[error("attempt to divide by zero at position {position}")]
    DivisionByZero {
        /// Byte offset of the operator.
        position: usize,
    },
    /// A function argument outside the function's domain.
    #[error("invalid argument to {function}: {argument} at position {position}")]
    DomainError {
        /// The function keyword.
        function: &'static str,
        /// The rejected argument.
        argument: f64,
        /// Byte offset of the function keyword.
        position: usize,
    },
    /// A fractional power of a negative base.
    #[error("attempt to take root of a negative number at position {position}")]
    NegativeRoot {
        /// Byte offset of the `^` operator.
        position: usize,
    },
    /// A `~` operand with a fractional part.
    #[error("attempting to join two non-integer numbers ({left} ~ {right}) at position {position}")]
    NonIntegralConcatenation {
        /// Left operand.
        left:     f64,
        /// Right operand.
        right:    f64,
        /// Byte offset of the `~` operator.
        position: usize,
    },
    /// A `~` right operand below zero.
    #[error("cannot join a negative number ({right}) at position {position}")]
    NegativeConcatenation {
        /// Right operand.
        right:    f64,
        /// Byte offset of the `~` operator.
        position: usize,
    },
    /// A `~` result that does not fit an exactly representable integer.
    #[error("joined number is too large at position {position}")]
    ConcatenationOverflow {
        /// Byte offset of the `~` operator.
        position: usize,
    },
}

impl ExpressionError {
    /// Returns the class of this failure.
    ///
    /// # Example
    /// ```
    /// use formulary::error::{ErrorKind, ExpressionError};
    ///
    /// let err = ExpressionError::DivisionByZero { position: 1 };
    /// assert_eq!(err.kind(), ErrorKind::Runtime);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidToken { .. } => ErrorKind::Lexical,
            Self::UnknownSymbol { .. }
            | Self::UnexpectedToken { .. }
            | Self::UnexpectedEndOfInput { .. }
            | Self::ExpectedOpeningParen { .. }
            | Self::ExpectedClosingParen { .. }
            | Self::UnsupportedFunction { .. }
            | Self::ConstantReassignment { .. }
            | Self::NestingTooDeep { .. } => ErrorKind::Syntax,
            Self::DivisionByZero { .. }
            | Self::DomainError { .. }
            | Self::NegativeRoot { .. }
            | Self::NonIntegralConcatenation { .. }
            | Self::NegativeConcatenation { .. }
            | Self::ConcatenationOverflow { .. } => ErrorKind::Runtime,
        }
    }

    /// Returns the byte offset of the failure, when it points into expression text.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::ConstantReassignment { .. } => None,
            Self::InvalidToken { position, .. }
            | Self::UnknownSymbol { position, .. }
            | Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::ExpectedOpeningParen { position, .. }
            | Self::ExpectedClosingParen { position, .. }
            | Self::UnsupportedFunction { position, .. }
            | Self::NestingTooDeep { position, .. }
            | Self::DivisionByZero { position }
            | Self::DomainError { position, .. }
            | Self::NegativeRoot { position }
            | Self::NonIntegralConcatenation { position, .. }
            | Self::NegativeConcatenation { position, .. }
            | Self::ConcatenationOverflow { position } => Some(*position),
        }
    }
}

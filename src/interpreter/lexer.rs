use std::fmt;

use logos::Logos;

use crate::error::ExpressionError;

/// Represents a lexical token in an expression.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens of the expression grammar.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// Numeric literal tokens, such as `3`, `3.14`, `2.`, `.5` or `2.1e-10`.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// A number whose exponent marker is not followed by digits, such as `1e`
    /// or `2.5E+`. Never reaches the parser; [`Lexer`] reports it as a lexical
    /// error.
    #[regex(r"[0-9]+(\.[0-9]*)?[eE][+-]?")]
    #[regex(r"\.[0-9]+[eE][+-]?")]
    MalformedExponent,
    /// Function keywords such as `sin` or `sqrt`.
    #[token("sin", |_| Function::Sin)]
    #[token("cos", |_| Function::Cos)]
    #[token("tan", |_| Function::Tan)]
    #[token("asin", |_| Function::Asin)]
    #[token("acos", |_| Function::Acos)]
    #[token("atan", |_| Function::Atan)]
    #[token("log", |_| Function::Log)]
    #[token("exp", |_| Function::Exp)]
    #[token("log10", |_| Function::Log10)]
    #[token("exp10", |_| Function::Exp10)]
    #[token("sqrt", |_| Function::Sqrt)]
    #[token("int", |_| Function::Int)]
    Function(Function),
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// Identifier tokens; names of values or expressions such as `a1`.
    #[regex(r"[a-zA-Z][a-zA-Z0-9]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `~`
    #[token("~")]
    Tilde,
    /// Spaces, tabs, newlines and feeds.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

/// The builtin functions recognized by the lexer.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Function {
    /// `sin`
    Sin,
    /// `cos`
    Cos,
    /// `tan`
    Tan,
    /// `asin`
    Asin,
    /// `acos`
    Acos,
    /// `atan`
    Atan,
    /// `log`, the natural logarithm.
    Log,
    /// `exp`
    Exp,
    /// `log10`
    Log10,
    /// `exp10`; recognized but has no evaluation.
    Exp10,
    /// `sqrt`
    Sqrt,
    /// `int`, truncation toward zero.
    Int,
}

impl Function {
    /// Returns the keyword spelling of the function.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Log => "log",
            Self::Exp => "exp",
            Self::Log10 => "log10",
            Self::Exp10 => "exp10",
            Self::Sqrt => "sqrt",
            Self::Int => "int",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Identifier(name) => f.write_str(name),
            Self::Function(function) => f.write_str(function.name()),
            Self::MalformedExponent => f.write_str("<malformed exponent>"),
            Self::Ignored => f.write_str(" "),
            Self::And => f.write_str("and"),
            Self::Or => f.write_str("or"),
            Self::EqualEqual => f.write_str("=="),
            Self::BangEqual => f.write_str("!="),
            Self::LessEqual => f.write_str("<="),
            Self::GreaterEqual => f.write_str(">="),
            Self::Less => f.write_str("<"),
            Self::Greater => f.write_str(">"),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::Percent => f.write_str("%"),
            Self::Caret => f.write_str("^"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::Tilde => f.write_str("~"),
        }
    }
}

/// Parses a numeric literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed value if successful.
/// - `None`: If the token slice is not a valid number.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// A forward-only token stream over one expression with a single token of
/// lookahead.
///
/// The lexer holds the expression text exclusively for the duration of one
/// parse and cannot be rewound; a fresh lexer is needed to scan the text again.
/// `current()` returning `None` marks the end of input.
///
/// # Example
/// ```
/// use formulary::interpreter::lexer::{Lexer, Token};
///
/// let mut lexer = Lexer::new("a1 + 2").unwrap();
/// assert_eq!(lexer.current(), Some(&Token::Identifier("a1".to_string())));
/// lexer.advance().unwrap();
/// assert_eq!(lexer.current(), Some(&Token::Plus));
/// assert_eq!(lexer.position(), 3);
/// ```
pub struct Lexer<'src> {
    inner:    logos::Lexer<'src, Token>,
    current:  Option<Token>,
    position: usize,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned on the first token of `source`.
    ///
    /// # Errors
    /// Returns [`ExpressionError::InvalidToken`] if the first token is malformed.
    pub fn new(source: &'src str) -> Result<Self, ExpressionError> {
        let mut lexer = Self { inner:    Token::lexer(source),
                               current:  None,
                               position: 0, };
        lexer.advance()?;
        Ok(lexer)
    }

    /// Returns the current token, or `None` at the end of input.
    #[must_use]
    pub const fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// Returns the byte offset of the current token, or the length of the
    /// text at the end of input.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Moves to the next token. Advancing past the end of input is a no-op.
    ///
    /// # Errors
    /// Returns [`ExpressionError::InvalidToken`] on an unrecognized character,
    /// a `.` without digits, a lone `=` or `!`, or an exponent marker without
    /// digits.
    pub fn advance(&mut self) -> Result<(), ExpressionError> {
        match self.inner.next() {
            None => {
                self.current = None;
                self.position = self.inner.source().len();
                Ok(())
            },
            Some(Ok(Token::MalformedExponent) | Err(())) => {
                self.position = self.inner.span().start;
                Err(ExpressionError::InvalidToken { token:    self.inner.slice().to_string(),
                                                    position: self.position, })
            },
            Some(Ok(token)) => {
                self.current = Some(token);
                self.position = self.inner.span().start;
                Ok(())
            },
        }
    }

    /// Returns the current token and its position, then advances.
    ///
    /// # Errors
    /// Propagates lexical errors from [`Lexer::advance`].
    pub fn bump(&mut self) -> Result<Option<(Token, usize)>, ExpressionError> {
        let token = self.current.take().map(|token| (token, self.position));
        self.advance()?;
        Ok(token)
    }
}

/// Returns every plain identifier in `source`, with its byte offset, in order
/// of appearance.
///
/// Function keywords, `and` and `or` are not identifiers. Repeated identifiers
/// are reported once per occurrence. Nothing is evaluated.
///
/// # Errors
/// Returns [`ExpressionError::InvalidToken`] at the first malformed token.
///
/// # Example
/// ```
/// use formulary::interpreter::lexer::identifiers;
///
/// let ids = identifiers("sqrt(a1) + b * a1").unwrap();
/// let names: Vec<&str> = ids.iter().map(|(name, _)| name.as_str()).collect();
/// assert_eq!(names, ["a1", "b", "a1"]);
///
/// assert!(identifiers("a = 1").is_err());
/// ```
pub fn identifiers(source: &str) -> Result<Vec<(String, usize)>, ExpressionError> {
    let mut lexer = Lexer::new(source)?;
    let mut ids = Vec::new();

    while let Some((token, position)) = lexer.bump()? {
        if let Token::Identifier(name) = token {
            ids.push((name, position));
        }
    }

    Ok(ids)
}

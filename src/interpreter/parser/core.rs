use crate::{
    error::ExpressionError,
    interpreter::{
        lexer::{Lexer, Token},
        symbols::SymbolTable,
    },
};

/// Result type used by the parser.
///
/// Every parsing function either yields the number its grammar rule evaluates
/// to, or the [`ExpressionError`] that stopped it.
pub type ParseResult<T> = Result<T, ExpressionError>;

/// Default limit on nested parentheses and function arguments.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Evaluation context for one expression.
///
/// The parser owns the lexer over the expression text and reads from a symbol
/// table it borrows. Each grammar rule evaluates eagerly while it parses; no
/// syntax tree is built. A parser is consumed by [`Parser::parse`] and cannot
/// be reused.
pub struct Parser<'src, 'sym> {
    lexer:     Lexer<'src>,
    symbols:   &'sym SymbolTable,
    depth:     usize,
    max_depth: usize,
}

impl<'src, 'sym> Parser<'src, 'sym> {
    /// Creates a parser over `source` that resolves identifiers in `symbols`.
    ///
    /// # Errors
    /// Returns a lexical error if the first token is malformed.
    pub fn new(source: &'src str,
               symbols: &'sym SymbolTable,
               max_depth: usize)
               -> ParseResult<Self> {
        Ok(Self { lexer: Lexer::new(source)?,
                  symbols,
                  depth: 0,
                  max_depth })
    }

    /// Parses and evaluates the whole expression.
    ///
    /// Grammar: `expression := logical_or <end of input>`
    ///
    /// # Errors
    /// Returns the first lexical, syntax or runtime error encountered, or
    /// [`ExpressionError::UnexpectedToken`] if input remains after a complete
    /// expression.
    pub fn parse(mut self) -> ParseResult<f64> {
        let value = self.parse_logical_or()?;
        match self.current() {
            None => Ok(value),
            Some(token) => Err(ExpressionError::UnexpectedToken { token:    token.to_string(),
                                                                  position: self.position(), }),
        }
    }

    pub(super) const fn current(&self) -> Option<&Token> {
        self.lexer.current()
    }

    pub(super) const fn position(&self) -> usize {
        self.lexer.position()
    }

    pub(super) fn advance(&mut self) -> ParseResult<()> {
        self.lexer.advance()
    }

    pub(super) fn bump(&mut self) -> ParseResult<Option<(Token, usize)>> {
        self.lexer.bump()
    }

    pub(super) fn lookup(&self, name: String, position: usize) -> ParseResult<f64> {
        self.symbols
            .get(&name)
            .ok_or(ExpressionError::UnknownSymbol { name, position })
    }

    /// Runs `rule` one nesting level deeper.
    ///
    /// # Errors
    /// Returns [`ExpressionError::NestingTooDeep`] once the configured limit is
    /// exceeded, otherwise whatever `rule` returns.
    pub(super) fn nested<T>(&mut self,
                            rule: impl FnOnce(&mut Self) -> ParseResult<T>)
                            -> ParseResult<T> {
        if self.depth >= self.max_depth {
            return Err(ExpressionError::NestingTooDeep { limit:    self.max_depth,
                                                         position: self.position(), });
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Consumes a `)` closing `context`.
    pub(super) fn expect_closing(&mut self, context: &'static str) -> ParseResult<()> {
        if matches!(self.current(), Some(Token::RParen)) {
            return self.advance();
        }
        Err(ExpressionError::ExpectedClosingParen { context,
                                                    position: self.position() })
    }
}

/// Evaluates `source` against `symbols` with the default nesting limit.
///
/// # Errors
/// Returns the first lexical, syntax or runtime error in the expression.
///
/// # Example
/// ```
/// use formulary::interpreter::{parser::core::evaluate, symbols::SymbolTable};
///
/// let mut symbols = SymbolTable::new();
/// symbols.define("a1", 5.0).unwrap();
///
/// assert_eq!(evaluate("a1 + 1", &symbols), Ok(6.0));
/// assert!(evaluate("a2 + 1", &symbols).is_err());
/// ```
pub fn evaluate(source: &str, symbols: &SymbolTable) -> ParseResult<f64> {
    evaluate_with_depth(source, symbols, DEFAULT_MAX_DEPTH)
}

/// Evaluates `source` against `symbols`, allowing at most `max_depth` nested
/// parentheses or function arguments.
///
/// # Errors
/// Returns the first lexical, syntax or runtime error in the expression.
pub fn evaluate_with_depth(source: &str,
                           symbols: &SymbolTable,
                           max_depth: usize)
                           -> ParseResult<f64> {
    Parser::new(source, symbols, max_depth)?.parse()
}

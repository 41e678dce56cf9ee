use crate::{
    error::ExpressionError,
    interpreter::{
        lexer::{Function, Token},
        parser::{
            core::{ParseResult, Parser},
            function::apply_function,
        },
    },
    util::num::join_integers,
};

impl Parser<'_, '_> {
    /// Parses an optional leading sign.
    ///
    /// At most one sign is accepted, and it applies to the whole concatenation
    /// that follows: `-1 ~ 2` is `-(12)`. The sign binds tighter than `^`, so
    /// `-2 ^ 2` is `4`.
    ///
    /// Grammar:
    /// ```text
    ///     unary := ("+" | "-")? concatenation
    /// ```
    pub(crate) fn parse_unary(&mut self) -> ParseResult<f64> {
        match self.current() {
            Some(Token::Plus) => {
                self.advance()?;
                self.parse_concatenation()
            },
            Some(Token::Minus) => {
                self.advance()?;
                Ok(-self.parse_concatenation()?)
            },
            _ => self.parse_concatenation(),
        }
    }

    /// Parses a chain of `~`.
    ///
    /// Grammar:
    /// ```text
    ///     concatenation := primary ("~" primary)*
    /// ```
    /// # Errors
    /// Any error from [`join_integers`] for non-integral, negative or oversized
    /// operands.
    pub(crate) fn parse_concatenation(&mut self) -> ParseResult<f64> {
        let mut result = self.parse_primary()?;
        while matches!(self.current(), Some(Token::Tilde)) {
            let position = self.position();
            self.advance()?;
            let right = self.parse_primary()?;
            result = join_integers(result, right, position)?;
        }
        Ok(result)
    }

    /// Parses a primary expression.
    ///
    /// Parentheses and function arguments enclose an additive expression, not
    /// a full one, so comparisons and logical operators must stay at the top
    /// level.
    ///
    /// Grammar:
    /// ```text
    ///     primary := identifier
    ///              | number
    ///              | "(" additive ")"
    ///              | function "(" additive ")"
    /// ```
    /// # Errors
    /// - [`ExpressionError::UnknownSymbol`] for an identifier missing from the
    ///   symbol table.
    /// - [`ExpressionError::UnexpectedToken`] or
    ///   [`ExpressionError::UnexpectedEndOfInput`] when no primary starts here.
    pub(crate) fn parse_primary(&mut self) -> ParseResult<f64> {
        let position = self.position();
        match self.bump()? {
            Some((Token::Identifier(name), position)) => self.lookup(name, position),
            Some((Token::Number(value), _)) => Ok(value),
            Some((Token::LParen, _)) => self.parse_grouping(),
            Some((Token::Function(function), position)) => {
                self.parse_function_call(function, position)
            },
            Some((token, position)) => Err(ExpressionError::UnexpectedToken { token:
                                                                                  token.to_string(),
                                                                              position }),
            None => Err(ExpressionError::UnexpectedEndOfInput { position }),
        }
    }

    /// Parses the remainder of `"(" additive ")"` after the opening
    /// parenthesis.
    fn parse_grouping(&mut self) -> ParseResult<f64> {
        self.nested(|parser| {
                let value = parser.parse_additive()?;
                parser.expect_closing("subexpression")?;
                Ok(value)
            })
    }

    /// Parses the parenthesized argument following a function keyword and
    /// applies the function to it.
    fn parse_function_call(&mut self, function: Function, position: usize) -> ParseResult<f64> {
        if !matches!(self.current(), Some(Token::LParen)) {
            return Err(ExpressionError::ExpectedOpeningParen { function: function.name()
                                                                                 .to_string(),
                                                               position: self.position(), });
        }
        self.advance()?;

        let argument = self.nested(|parser| {
                               let value = parser.parse_additive()?;
                               parser.expect_closing("function argument")?;
                               Ok(value)
                           })?;
        apply_function(function, argument, position)
    }
}

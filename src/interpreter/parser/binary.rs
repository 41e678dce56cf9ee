use crate::{
    error::ExpressionError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

/// The comparison operators of the equality level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
}

impl Comparison {
    /// Maps a token to its comparison operator.
    ///
    /// # Example
    /// ```
    /// use formulary::interpreter::{lexer::Token, parser::binary::Comparison};
    ///
    /// assert_eq!(Comparison::from_token(&Token::LessEqual), Some(Comparison::LessEqual));
    /// assert_eq!(Comparison::from_token(&Token::Plus), None);
    /// ```
    #[must_use]
    pub const fn from_token(token: &Token) -> Option<Self> {
        match token {
            Token::EqualEqual => Some(Self::Equal),
            Token::BangEqual => Some(Self::NotEqual),
            Token::Less => Some(Self::Less),
            Token::LessEqual => Some(Self::LessEqual),
            Token::Greater => Some(Self::Greater),
            Token::GreaterEqual => Some(Self::GreaterEqual),
            _ => None,
        }
    }

    /// Compares two numbers, returning `1` or `0`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        truth(match self {
                  Self::Equal => left == right,
                  Self::NotEqual => left != right,
                  Self::Less => left < right,
                  Self::LessEqual => left <= right,
                  Self::Greater => left > right,
                  Self::GreaterEqual => left >= right,
              })
    }
}

/// Converts a boolean into the numbers `1` and `0`.
#[must_use]
pub fn truth(value: bool) -> f64 {
    f64::from(u8::from(value))
}

impl Parser<'_, '_> {
    /// Parses a chain of `or`.
    ///
    /// Both operands are always evaluated; the result is `1` if either is
    /// nonzero, else `0`.
    ///
    /// The rule is: `logical_or := logical_and ("or" logical_and)*`
    pub(crate) fn parse_logical_or(&mut self) -> ParseResult<f64> {
        let mut result = self.parse_logical_and()?;
        while matches!(self.current(), Some(Token::Or)) {
            self.advance()?;
            let right = self.parse_logical_and()?;
            result = truth(result != 0.0 || right != 0.0);
        }
        Ok(result)
    }

    /// Parses a chain of `and`.
    ///
    /// Both operands are always evaluated; the result is `1` if both are
    /// nonzero, else `0`.
    ///
    /// The rule is: `logical_and := equality ("and" equality)*`
    pub(crate) fn parse_logical_and(&mut self) -> ParseResult<f64> {
        let mut result = self.parse_equality()?;
        while matches!(self.current(), Some(Token::And)) {
            self.advance()?;
            let right = self.parse_equality()?;
            result = truth(result != 0.0 && right != 0.0);
        }
        Ok(result)
    }

    /// Parses comparisons.
    ///
    /// Comparisons apply left to right, each producing `0` or `1`, so
    /// `3 > 2 > 1` is `(3 > 2) > 1`, which is `0`.
    ///
    /// The rule is: `equality := additive (("==" | "!=" | "<" | "<=" | ">" |
    /// ">=") additive)*`
    pub(crate) fn parse_equality(&mut self) -> ParseResult<f64> {
        let mut result = self.parse_additive()?;
        while let Some(comparison) = self.current().and_then(Comparison::from_token) {
            self.advance()?;
            let right = self.parse_additive()?;
            result = comparison.apply(result, right);
        }
        Ok(result)
    }

    /// Parses addition and subtraction.
    ///
    /// Each operator consumes exactly one right operand, left-associatively.
    ///
    /// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
    pub(crate) fn parse_additive(&mut self) -> ParseResult<f64> {
        let mut result = self.parse_multiplicative()?;
        loop {
            match self.current() {
                Some(Token::Plus) => {
                    self.advance()?;
                    result += self.parse_multiplicative()?;
                },
                Some(Token::Minus) => {
                    self.advance()?;
                    result -= self.parse_multiplicative()?;
                },
                _ => break,
            }
        }
        Ok(result)
    }

    /// Parses multiplication, division and modulo.
    ///
    /// A right operand of exactly zero for `/` or `%` fails with
    /// [`ExpressionError::DivisionByZero`]. Modulo keeps the sign of the left
    /// operand.
    ///
    /// The rule is: `multiplicative := power (("*" | "/" | "%") power)*`
    pub(crate) fn parse_multiplicative(&mut self) -> ParseResult<f64> {
        let mut result = self.parse_power()?;
        loop {
            let position = self.position();
            match self.current() {
                Some(Token::Star) => {
                    self.advance()?;
                    result *= self.parse_power()?;
                },
                Some(Token::Slash) => {
                    self.advance()?;
                    result /= nonzero(self.parse_power()?, position)?;
                },
                Some(Token::Percent) => {
                    self.advance()?;
                    result %= nonzero(self.parse_power()?, position)?;
                },
                _ => break,
            }
        }
        Ok(result)
    }

    /// Parses a single optional exponentiation.
    ///
    /// `^` is not chained: `2 ^ 3 ^ 2` leaves the second `^` unconsumed, which
    /// the caller reports as an unexpected token.
    ///
    /// The rule is: `power := unary ("^" unary)?`
    ///
    /// # Errors
    /// [`ExpressionError::NegativeRoot`] when the base is negative and the
    /// exponent's magnitude lies strictly between 0 and 1.
    pub(crate) fn parse_power(&mut self) -> ParseResult<f64> {
        let base = self.parse_unary()?;
        if !matches!(self.current(), Some(Token::Caret)) {
            return Ok(base);
        }

        let position = self.position();
        self.advance()?;
        let exponent = self.parse_unary()?;
        check_root_domain(base, exponent, position)?;
        Ok(base.powf(exponent))
    }
}

#[allow(clippy::float_cmp)]
fn nonzero(divisor: f64, position: usize) -> ParseResult<f64> {
    if divisor == 0.0 {
        return Err(ExpressionError::DivisionByZero { position });
    }
    Ok(divisor)
}

/// Rejects fractional powers of negative numbers.
///
/// The check is on the exponent's magnitude only, so `(-8) ^ (1/3)` fails even
/// though the real cube root exists.
fn check_root_domain(base: f64, exponent: f64, position: usize) -> ParseResult<()> {
    if base >= 0.0 {
        return Ok(());
    }
    let magnitude = exponent.abs();
    if magnitude <= 0.0 || magnitude >= 1.0 {
        return Ok(());
    }
    Err(ExpressionError::NegativeRoot { position })
}

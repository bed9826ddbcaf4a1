//! CSS Values & Units Level 3: §4 Numbers
//! Spec: <https://www.w3.org/TR/css-values-3/#numeric-types>

use crate::ParseError;
use cssparser::{Parser, ParserInput, Token};

/// A CSS <number>
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Number(pub f32);

/// Parse a CSS <number> (§4.2). Accepts integer or real numbers.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is not a `<number>`.
pub fn parse_number(input: &mut Parser) -> Result<Number, ParseError> {
    input
        .next()
        .map_or(Err(ParseError::UnexpectedToken), |token| {
            if let Token::Number { value, .. } = token.clone() {
                if value.is_finite() {
                    Ok(Number(value))
                } else {
                    Err(ParseError::NonFinite)
                }
            } else {
                Err(ParseError::UnexpectedToken)
            }
        })
}

/// Parse a complete string as a single `<number>`, rejecting trailing input.
///
/// # Errors
/// Returns a `ParseError` when the text is not exactly one finite number.
pub fn parse_number_str(text: &str) -> Result<Number, ParseError> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let number = parse_number(&mut parser)?;
    if parser.is_exhausted() {
        Ok(number)
    } else {
        Err(ParseError::TrailingInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_and_real_numbers() {
        assert_eq!(parse_number_str("3"), Ok(Number(3.0)));
        assert_eq!(parse_number_str(" 0.5 "), Ok(Number(0.5)));
        assert_eq!(parse_number_str("-2"), Ok(Number(-2.0)));
    }

    #[test]
    fn rejects_trailing_tokens_and_dimensions() {
        assert_eq!(parse_number_str("1 2"), Err(ParseError::TrailingInput));
        assert_eq!(parse_number_str("1px"), Err(ParseError::UnexpectedToken));
    }
}

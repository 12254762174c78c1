#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum ParseError {
    #[error("empty response")]
    Empty,

    #[error("response is not a decimal number")]
    NotNumeric,
}

/// Parses a raw device response into a value.
///
/// Surrounding whitespace and control characters are ignored. The rest must be a whole decimal
/// number (`[+-]digits[.digits]`), a number followed by anything else is rejected rather than
/// truncated.
pub fn parse(raw: &str) -> Result<f64, ParseError> {
    let token = raw.trim_matches(|c: char| c.is_whitespace() || c.is_control());
    if token.is_empty() {
        return Err(ParseError::Empty);
    }
    if !is_decimal(token) {
        return Err(ParseError::NotNumeric);
    }

    // grammar is a subset of what f64 accepts, so this only fails on pathological input
    let value = token.parse::<f64>().map_err(|_| ParseError::NotNumeric)?;
    Ok(value)
}

fn is_decimal(token: &str) -> bool {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let digits = |part: &str| !part.is_empty() && part.bytes().all(|byte| byte.is_ascii_digit());

    digits(integer) && fraction.is_none_or(digits)
}

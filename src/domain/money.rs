use std::fmt;

/// Balances and transfer amounts, in whole units.
/// Signed: range checks belong to the ledger, not the type.
pub type Amount = i64;

/// Parse a trimmed line of user input into an [`Amount`].
/// Example: "30" -> 30, " -5 " -> -5, "+7" -> 7
///
/// Only an optional sign followed by decimal digits is accepted. Whether the
/// value is in range (positive, non-negative) is decided by the ledger.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseAmountError::InvalidFormat(trimmed.to_string()));
    }

    trimmed
        .parse()
        .map_err(|_| ParseAmountError::OutOfRange(trimmed.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat(input) => {
                write!(f, "'{}' is not a whole number", input)
            }
            ParseAmountError::OutOfRange(input) => write!(f, "'{}' is too large", input),
        }
    }
}

impl std::error::Error for ParseAmountError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("30"), Ok(30));
        assert_eq!(parse_amount("  100\n"), Ok(100));
        assert_eq!(parse_amount("0"), Ok(0));
        assert_eq!(parse_amount("-5"), Ok(-5));
        assert_eq!(parse_amount("+7"), Ok(7));
    }

    #[test]
    fn test_parse_amount_invalid() {
        assert!(matches!(
            parse_amount("abc"),
            Err(ParseAmountError::InvalidFormat(_))
        ));
        assert!(parse_amount("").is_err());
        assert!(parse_amount("-").is_err());
        assert!(parse_amount("12.5").is_err());
        assert!(parse_amount("1 000").is_err());
    }

    #[test]
    fn test_parse_amount_overflow() {
        assert_eq!(
            parse_amount("99999999999999999999"),
            Err(ParseAmountError::OutOfRange(
                "99999999999999999999".to_string()
            ))
        );
    }
}

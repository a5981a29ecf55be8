use nom::{
    character::complete::{char, digit1, space0, u32},
    sequence::delimited,
};
use nom_miette::expect;

use super::errors::{NotationErrorKind, ParseResult};

/// Number = digit , { digit } ;
pub fn number(i: &str) -> ParseResult<u32> {
    u32(i)
}

/// Digits = digit , { digit } ;
pub fn digits(i: &str) -> ParseResult<&str> {
    digit1(i)
}

/// Comma = { " " } , "," , { " " } ;
pub fn comma(i: &str) -> ParseResult<char> {
    let parser = delimited(space0, char(','), space0);
    expect(parser, NotationErrorKind::ExpectedComma)(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number() {
        // Valid Numbers
        assert_eq!(number("1"), Ok(("", 1)));
        assert_eq!(number("0"), Ok(("", 0)));
        assert_eq!(number("042"), Ok(("", 42)));
        // Invalid Numbers
        assert!(number("").is_err());
        assert!(number("R3").is_err());
        assert!(number("-1").is_err());
        assert!(number("99999999999").is_err());
        // Multiple Numbers
        assert_eq!(number("3)"), Ok((")", 3)));
        assert_eq!(number("12:R3"), Ok((":R3", 12)));
    }

    #[test]
    fn test_digits() {
        assert_eq!(digits("01,3)"), Ok((",3)", "01")));
        assert_eq!(digits("7"), Ok(("", "7")));
        assert!(digits(",3").is_err());
        assert!(digits("").is_err());
    }

    #[test]
    fn test_comma() {
        // Valid Commas
        assert_eq!(comma(","), Ok(("", ',')));
        assert_eq!(comma(" , "), Ok(("", ',')));
        assert_eq!(comma(",PEPTIDE2"), Ok(("PEPTIDE2", ',')));
        assert_eq!(comma("  ,  PEPTIDE2"), Ok(("PEPTIDE2", ',')));
        // Invalid Commas
        assert!(comma("").is_err());
        assert!(comma(";").is_err());
        assert!(comma("  PEPTIDE2").is_err());
    }
}

mod error;
mod grammar;
mod parser;

pub use error::ParseError;
pub use parser::{ParsedRule, ParsedRules};

/// Parse rule text into a [`ParsedRules`].
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not valid rule text.
pub fn parse(input: &str) -> Result<ParsedRules, ParseError> {
    use winnow::Parser;
    grammar::parse_rules
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}

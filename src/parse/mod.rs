mod error;
mod pattern;
mod selector;

pub use error::ParseError;

use crate::types::{SelectorList, UrlPattern};

/// Parse an `href_matches` pattern into a [`UrlPattern`].
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not a valid pattern.
pub fn parse_pattern(input: &str) -> Result<UrlPattern, ParseError> {
    use winnow::Parser;
    pattern::url_pattern
        .parse(input)
        .map(|mut parsed| {
            parsed.source = input.to_owned();
            parsed
        })
        .map_err(|e| ParseError::new(input, e.to_string()))
}

/// Parse a `selector_matches` selector list into a [`SelectorList`].
///
/// # Errors
///
/// Returns [`ParseError`] if the input is outside the supported selector
/// subset.
pub fn parse_selector(input: &str) -> Result<SelectorList, ParseError> {
    use winnow::Parser;
    selector::selector_list
        .parse(input)
        .map(|selectors| SelectorList {
            source: input.to_owned(),
            selectors,
        })
        .map_err(|e| ParseError::new(input, e.to_string()))
}

use thiserror::Error;

/// Errors raised while normalizing rule entries into a rule set.
///
/// Surfaced by the first [`resolve()`](super::UrlResolver::resolve) call,
/// since the rule set is built lazily. `index` is the entry's position in
/// declaration order, starting at 0.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("rule entry #{index} has no action matcher")]
    MissingMatcher { index: usize },

    #[error("rule entry #{index} has a matcher that matches nothing")]
    EmptyMatcher { index: usize },

    #[error("rule entry #{index} has no URL value")]
    MissingUrl { index: usize },
}

/// Errors raised by [`BaseUrlFormatter`](super::BaseUrlFormatter).
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("absolute URL requested but no base URL is configured")]
    MissingBase,

    #[error("invalid base URL: {0}")]
    InvalidBase(url::ParseError),

    #[error("cannot resolve '{path}' against the base URL")]
    Resolve {
        path: String,
        source: url::ParseError,
    },
}

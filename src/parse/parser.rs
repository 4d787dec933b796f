use crate::types::{ActionMatcher, UrlSpec};

/// The result of parsing rule text.
#[derive(Debug)]
pub struct ParsedRules {
    pub rules: Vec<ParsedRule>,
    /// Set by a `default <url>` line; the last one wins.
    pub default_url: Option<UrlSpec>,
}

/// One parsed rule line. The text form only carries literal URLs; computed
/// URLs are declared programmatically.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedRule {
    pub matcher: ActionMatcher,
    pub url: UrlSpec,
    pub permission: Option<String>,
}

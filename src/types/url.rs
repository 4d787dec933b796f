use std::fmt;

use url::Url;

use super::error::FormatError;

/// A structured URL value: a path plus optional query parameters.
///
/// This is the value rules carry and [`resolve()`](super::UrlResolver::resolve)
/// returns. It stays structured until a [`UrlFormatter`] turns it into a
/// string. The empty spec (`UrlSpec::default()`) means "no URL available"
/// and is what an empty default yields when no rule matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UrlSpec {
    path: String,
    #[cfg_attr(feature = "serde", serde(default))]
    params: Vec<(String, String)>,
}

impl UrlSpec {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Append a query parameter. Parameters keep insertion order.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// True for the empty spec, i.e. "no URL available".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty() && self.params.is_empty()
    }
}

impl From<&str> for UrlSpec {
    fn from(path: &str) -> Self {
        UrlSpec::new(path)
    }
}

impl From<String> for UrlSpec {
    fn from(path: String) -> Self {
        UrlSpec::new(path)
    }
}

/// Debug-friendly rendering without percent-encoding. Use a
/// [`UrlFormatter`] for a real URL string.
impl fmt::Display for UrlSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        for (i, (k, v)) in self.params.iter().enumerate() {
            write!(f, "{}{k}={v}", if i == 0 { '?' } else { '&' })?;
        }
        Ok(())
    }
}

/// The formatting seam: turns a [`UrlSpec`] into a URL string.
///
/// Formatting failures are the formatter's own and propagate unwrapped
/// through [`resolve_str()`](super::UrlResolver::resolve_str).
pub trait UrlFormatter: Send + Sync {
    /// Format `url` as a string. With `absolute`, the result must be an
    /// absolute URL.
    fn format(&self, url: &UrlSpec, absolute: bool) -> Result<String, FormatError>;
}

/// Default [`UrlFormatter`]: percent-encodes the query and, when a base URL
/// is configured, joins paths against it for absolute output.
#[derive(Debug, Clone)]
pub struct BaseUrlFormatter {
    base: Option<Url>,
}

impl BaseUrlFormatter {
    /// A formatter with a base URL, e.g. `"https://example.com"`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidBase`] if `base` is not a valid
    /// absolute URL.
    pub fn new(base: &str) -> Result<Self, FormatError> {
        let base = Url::parse(base).map_err(FormatError::InvalidBase)?;
        Ok(Self { base: Some(base) })
    }

    /// A formatter without a base URL. Relative output only; asking for an
    /// absolute URL fails with [`FormatError::MissingBase`].
    #[must_use]
    pub fn relative() -> Self {
        Self { base: None }
    }

    fn render_relative(url: &UrlSpec) -> String {
        if url.params().is_empty() {
            return url.path().to_owned();
        }
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(url.params())
            .finish();
        format!("{}?{query}", url.path())
    }
}

impl UrlFormatter for BaseUrlFormatter {
    fn format(&self, url: &UrlSpec, absolute: bool) -> Result<String, FormatError> {
        let relative = Self::render_relative(url);
        if !absolute {
            return Ok(relative);
        }
        let base = self.base.as_ref().ok_or(FormatError::MissingBase)?;
        let joined = base.join(&relative).map_err(|source| FormatError::Resolve {
            path: url.path().to_owned(),
            source,
        })?;
        Ok(joined.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_builder() {
        let spec = UrlSpec::new("/items").param("id", "5").param("tab", "info");
        assert_eq!(spec.path(), "/items");
        assert_eq!(
            spec.params(),
            &[
                ("id".to_owned(), "5".to_owned()),
                ("tab".to_owned(), "info".to_owned())
            ]
        );
    }

    #[test]
    fn empty_spec() {
        assert!(UrlSpec::default().is_empty());
        assert!(!UrlSpec::new("/").is_empty());
    }

    #[test]
    fn display_without_encoding() {
        let spec = UrlSpec::new("/items").param("id", "5").param("q", "a b");
        assert_eq!(spec.to_string(), "/items?id=5&q=a b");
    }

    #[test]
    fn from_str_is_plain_path() {
        let spec = UrlSpec::from("/items/view");
        assert_eq!(spec.path(), "/items/view");
        assert!(spec.params().is_empty());
    }

    #[test]
    fn relative_formatting() {
        let f = BaseUrlFormatter::relative();
        let spec = UrlSpec::new("/items").param("id", "5");
        assert_eq!(f.format(&spec, false).unwrap(), "/items?id=5");
    }

    #[test]
    fn relative_formatting_encodes_query() {
        let f = BaseUrlFormatter::relative();
        let spec = UrlSpec::new("/search").param("q", "a b&c");
        assert_eq!(f.format(&spec, false).unwrap(), "/search?q=a+b%26c");
    }

    #[test]
    fn absolute_formatting_joins_base() {
        let f = BaseUrlFormatter::new("https://host").unwrap();
        let spec = UrlSpec::new("/items").param("id", "5");
        assert_eq!(f.format(&spec, true).unwrap(), "https://host/items?id=5");
    }

    #[test]
    fn absolute_without_base_fails() {
        let f = BaseUrlFormatter::relative();
        let result = f.format(&UrlSpec::new("/items"), true);
        assert!(matches!(result, Err(FormatError::MissingBase)));
    }

    #[test]
    fn invalid_base_rejected() {
        assert!(matches!(
            BaseUrlFormatter::new("not a url"),
            Err(FormatError::InvalidBase(_))
        ));
    }

    #[test]
    fn empty_spec_formats_to_base() {
        let f = BaseUrlFormatter::new("https://host/app").unwrap();
        assert_eq!(f.format(&UrlSpec::default(), true).unwrap(), "https://host/app");
    }
}

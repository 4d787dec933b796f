use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::error::ConfigError;
use super::identity::{Anonymous, DenyAll, IdentitySource, PermissionOracle};
use super::rule::{RuleEntry, RuleSet, UrlValue};
use super::url::{BaseUrlFormatter, UrlFormatter, UrlSpec};
use crate::WaymarkError;

type RuleProvider<E> = Box<dyn Fn() -> Vec<RuleEntry<E>> + Send + Sync>;

/// Builder for a [`UrlResolver`].
///
/// Rules are declared in priority order; the first matching rule wins at
/// resolution time. Collaborators default to the most restrictive stock
/// implementations: anonymous identity, deny-all oracle, relative-only
/// formatter.
///
/// # Example
///
/// ```
/// use waymark::ResolverBuilder;
///
/// let resolver = ResolverBuilder::new()
///     .rule(|r| r.action("view").to("/items/view"))
///     .rule(|r| r.any().to("/items"))
///     .default_url("/home")
///     .build();
///
/// let url = resolver.resolve("view", &()).unwrap();
/// assert_eq!(url.path(), "/items/view");
/// ```
pub struct ResolverBuilder<E> {
    entries: Vec<RuleEntry<E>>,
    provider: Option<RuleProvider<E>>,
    default_url: UrlSpec,
    identity: Arc<dyn IdentitySource>,
    oracle: Arc<dyn PermissionOracle>,
    formatter: Arc<dyn UrlFormatter>,
}

impl<E> Default for ResolverBuilder<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            provider: None,
            default_url: UrlSpec::default(),
            identity: Arc::new(Anonymous),
            oracle: Arc::new(DenyAll),
            formatter: Arc::new(BaseUrlFormatter::relative()),
        }
    }
}

impl<E> ResolverBuilder<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a rule. The closure configures the entry's matcher, URL, and
    /// optional permission requirement.
    ///
    /// Entries are only validated when the rule set is built, on the first
    /// [`resolve()`](UrlResolver::resolve) call; an incomplete entry fails
    /// there with [`ConfigError`].
    #[must_use]
    pub fn rule(mut self, f: impl FnOnce(RuleEntry<E>) -> RuleEntry<E>) -> Self {
        self.entries.push(f(RuleEntry::new()));
        self
    }

    /// Append rules from the compact text form, e.g.
    /// `rule "update" requires can_edit -> /items/update`.
    ///
    /// A `default` line in the text overrides any previously configured
    /// default URL.
    ///
    /// # Errors
    ///
    /// Returns [`WaymarkError::Parse`] if the input is not valid rule text.
    pub fn rules_text(mut self, input: &str) -> Result<Self, WaymarkError> {
        let parsed = crate::parse::parse(input)?;
        for rule in parsed.rules {
            let mut entry = RuleEntry::new().matcher(rule.matcher).to(rule.url);
            if let Some(permission) = rule.permission {
                entry = entry.requires(permission);
            }
            self.entries.push(entry);
        }
        if let Some(default_url) = parsed.default_url {
            self.default_url = default_url;
        }
        Ok(self)
    }

    /// Read a file and append the rules it contains.
    ///
    /// # Errors
    ///
    /// Returns [`WaymarkError`] on I/O or parse failure.
    pub fn rules_file(self, path: impl AsRef<std::path::Path>) -> Result<Self, WaymarkError> {
        let input = std::fs::read_to_string(path)?;
        self.rules_text(&input)
    }

    /// Supply rules through a provider invoked once, when the rule set is
    /// first built. Replaces any entries added via [`rule()`](Self::rule).
    #[must_use]
    pub fn rules_with(mut self, f: impl Fn() -> Vec<RuleEntry<E>> + Send + Sync + 'static) -> Self {
        self.provider = Some(Box::new(f));
        self
    }

    /// The URL returned when no rule matches. Defaults to the empty
    /// [`UrlSpec`], meaning "no URL available".
    #[must_use]
    pub fn default_url(mut self, url: impl Into<UrlSpec>) -> Self {
        self.default_url = url.into();
        self
    }

    #[must_use]
    pub fn identity(mut self, source: impl IdentitySource + 'static) -> Self {
        self.identity = Arc::new(source);
        self
    }

    #[must_use]
    pub fn oracle(mut self, oracle: impl PermissionOracle + 'static) -> Self {
        self.oracle = Arc::new(oracle);
        self
    }

    #[must_use]
    pub fn formatter(mut self, formatter: impl UrlFormatter + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Finish the builder. Construction never fails; rule validation is
    /// deferred to the first resolution.
    #[must_use]
    pub fn build(self) -> UrlResolver<E> {
        UrlResolver {
            entries: self.entries,
            provider: self.provider,
            default_url: self.default_url,
            identity: self.identity,
            oracle: self.oracle,
            formatter: self.formatter,
            rules: OnceCell::new(),
        }
    }
}

/// Resolves action identifiers to URL values by evaluating rules in
/// declaration order.
///
/// The rule set is built lazily on the first [`resolve()`](Self::resolve)
/// call and memoized for the resolver's lifetime; the build is guarded, so
/// sharing a resolver across threads builds it exactly once.
pub struct UrlResolver<E> {
    entries: Vec<RuleEntry<E>>,
    provider: Option<RuleProvider<E>>,
    default_url: UrlSpec,
    identity: Arc<dyn IdentitySource>,
    oracle: Arc<dyn PermissionOracle>,
    formatter: Arc<dyn UrlFormatter>,
    rules: OnceCell<RuleSet<E>>,
}

impl<E> UrlResolver<E> {
    /// Resolve `action` for the current caller to a structured URL value.
    ///
    /// The first declared rule that matches the action (and whose permission
    /// requirement, if any, the oracle grants to the current identity) wins.
    /// A computed URL is invoked with `entity`. When no rule matches, the
    /// configured default is returned; matching nothing is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`WaymarkError::Config`] if a rule entry is malformed. The
    /// rule set is built on the first call, so that is where a bad
    /// configuration surfaces.
    pub fn resolve(&self, action: &str, entity: &E) -> Result<UrlSpec, WaymarkError> {
        let rules = self.rule_set()?;
        let identity = self.identity.current();
        let chosen =
            crate::resolve::first_match(rules, action, identity.as_ref(), self.oracle.as_ref());
        Ok(match chosen {
            Some(UrlValue::Literal(spec)) => spec.clone(),
            Some(UrlValue::Computed(f)) => f(entity),
            None => self.default_url.clone(),
        })
    }

    /// Resolve `action` and format the result as an absolute URL string.
    ///
    /// # Errors
    ///
    /// Returns [`WaymarkError::Config`] for a malformed rule entry and
    /// [`WaymarkError::Format`] if the formatter rejects the chosen value.
    pub fn resolve_str(&self, action: &str, entity: &E) -> Result<String, WaymarkError> {
        let spec = self.resolve(action, entity)?;
        Ok(self.formatter.format(&spec, true)?)
    }

    fn rule_set(&self) -> Result<&RuleSet<E>, ConfigError> {
        self.rules.get_or_try_init(|| {
            let entries = match &self.provider {
                Some(provider) => provider(),
                None => self.entries.clone(),
            };
            crate::normalize::normalize(entries)
        })
    }
}

impl<E> fmt::Display for UrlResolver<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rules.get() {
            Some(rules) => write!(f, "UrlResolver({} rules)", rules.len()),
            None => write!(f, "UrlResolver({} entries, unbuilt)", self.entries.len()),
        }
    }
}

use std::fmt;
use std::sync::Arc;

use super::identity::{Identity, PermissionOracle};
use super::matcher::ActionMatcher;
use super::url::UrlSpec;

type ComputeFn<E> = Arc<dyn Fn(&E) -> UrlSpec + Send + Sync>;

/// A rule's URL: either a literal value or a computation over the owning
/// entity, invoked once per resolution.
pub(crate) enum UrlValue<E> {
    Literal(UrlSpec),
    Computed(ComputeFn<E>),
}

impl<E> Clone for UrlValue<E> {
    fn clone(&self) -> Self {
        match self {
            UrlValue::Literal(spec) => UrlValue::Literal(spec.clone()),
            UrlValue::Computed(f) => UrlValue::Computed(Arc::clone(f)),
        }
    }
}

impl<E> fmt::Debug for UrlValue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlValue::Literal(spec) => f.debug_tuple("Literal").field(spec).finish(),
            UrlValue::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A raw rule entry under construction.
///
/// Passed to the closure given to
/// [`ResolverBuilder::rule()`](super::ResolverBuilder::rule). An entry needs
/// a matcher (via [`action()`](Self::action), [`one_of()`](Self::one_of), or
/// [`any()`](Self::any)) and a URL (via [`to()`](Self::to) or
/// [`compute()`](Self::compute)); entries missing either fail normalization
/// with [`ConfigError`](super::ConfigError) on the first resolve.
pub struct RuleEntry<E> {
    pub(crate) matcher: Option<ActionMatcher>,
    pub(crate) url: Option<UrlValue<E>>,
    pub(crate) permission: Option<String>,
}

impl<E> Default for RuleEntry<E> {
    fn default() -> Self {
        Self {
            matcher: None,
            url: None,
            permission: None,
        }
    }
}

impl<E> Clone for RuleEntry<E> {
    fn clone(&self) -> Self {
        Self {
            matcher: self.matcher.clone(),
            url: self.url.clone(),
            permission: self.permission.clone(),
        }
    }
}

impl<E> fmt::Debug for RuleEntry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEntry")
            .field("matcher", &self.matcher)
            .field("url", &self.url)
            .field("permission", &self.permission)
            .finish()
    }
}

impl<E> RuleEntry<E> {
    /// Start an empty entry; chain the builder methods to fill it in.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Match exactly one action identifier.
    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.matcher = Some(ActionMatcher::Exact(action.into()));
        self
    }

    /// Match any action in the given set.
    #[must_use]
    pub fn one_of<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matcher = Some(ActionMatcher::OneOf(
            actions.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Match every action.
    #[must_use]
    pub fn any(mut self) -> Self {
        self.matcher = Some(ActionMatcher::Any);
        self
    }

    /// Set an explicit matcher, e.g. one parsed from the text form.
    #[must_use]
    pub fn matcher(mut self, matcher: ActionMatcher) -> Self {
        self.matcher = Some(matcher);
        self
    }

    /// Use a literal URL value.
    #[must_use]
    pub fn to(mut self, url: impl Into<UrlSpec>) -> Self {
        self.url = Some(UrlValue::Literal(url.into()));
        self
    }

    /// Compute the URL from the owning entity at resolution time.
    #[must_use]
    pub fn compute(mut self, f: impl Fn(&E) -> UrlSpec + Send + Sync + 'static) -> Self {
        self.url = Some(UrlValue::Computed(Arc::new(f)));
        self
    }

    /// Require a permission: the rule only matches callers the oracle
    /// reports as holding it.
    #[must_use]
    pub fn requires(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }
}

/// A normalized rule: matcher and URL present, permission optional.
pub(crate) struct Rule<E> {
    pub(crate) matcher: ActionMatcher,
    pub(crate) url: UrlValue<E>,
    pub(crate) permission: Option<String>,
}

impl<E> Rule<E> {
    /// Pure predicate: does this rule apply to `action` for `identity`?
    ///
    /// The oracle is consulted only when the rule carries a permission
    /// requirement.
    pub(crate) fn matches(
        &self,
        action: &str,
        identity: Option<&Identity>,
        oracle: &dyn PermissionOracle,
    ) -> bool {
        if !self.matcher.matches(action) {
            return false;
        }
        match &self.permission {
            Some(permission) => oracle.is_granted(permission, identity),
            None => true,
        }
    }
}

impl<E> fmt::Debug for Rule<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("matcher", &self.matcher)
            .field("url", &self.url)
            .field("permission", &self.permission)
            .finish()
    }
}

/// The normalized, immutable rule list. Declaration order is evaluation
/// priority; built once per resolver and never rebuilt.
pub(crate) struct RuleSet<E> {
    pub(crate) rules: Vec<Rule<E>>,
}

impl<E> RuleSet<E> {
    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Rule<E>> {
        self.rules.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.rules.len()
    }
}

impl<E> fmt::Debug for RuleSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet").field("rules", &self.rules).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::identity::{AllowAll, DenyAll, GrantTable};

    fn rule(matcher: ActionMatcher, permission: Option<&str>) -> Rule<()> {
        Rule {
            matcher,
            url: UrlValue::Literal(UrlSpec::new("/x")),
            permission: permission.map(str::to_owned),
        }
    }

    #[test]
    fn entry_builder_collects_fields() {
        let entry: RuleEntry<()> = RuleEntry::new()
            .action("update")
            .to("/items/update")
            .requires("can_edit");
        assert_eq!(entry.matcher, Some(ActionMatcher::Exact("update".into())));
        assert_eq!(entry.permission.as_deref(), Some("can_edit"));
        assert!(matches!(entry.url, Some(UrlValue::Literal(_))));
    }

    #[test]
    fn entry_without_matcher_or_url() {
        let entry: RuleEntry<()> = RuleEntry::new();
        assert!(entry.matcher.is_none());
        assert!(entry.url.is_none());
        assert!(entry.permission.is_none());
    }

    #[test]
    fn unpermissioned_rule_ignores_oracle() {
        let r = rule(ActionMatcher::Exact("view".into()), None);
        assert!(r.matches("view", None, &DenyAll));
        assert!(!r.matches("update", None, &AllowAll));
    }

    #[test]
    fn permissioned_rule_consults_oracle() {
        let r = rule(ActionMatcher::Exact("update".into()), Some("can_edit"));
        let table = GrantTable::new().grant("can_edit", "alice");
        let alice = Identity::new("alice");
        let bob = Identity::new("bob");

        assert!(r.matches("update", Some(&alice), &table));
        assert!(!r.matches("update", Some(&bob), &table));
        // Action mismatch short-circuits before the permission check
        assert!(!r.matches("view", Some(&alice), &table));
    }

    #[test]
    fn anonymous_needs_explicit_grant() {
        let r = rule(ActionMatcher::Any, Some("can_view"));
        let denied = GrantTable::new().grant("can_view", "alice");
        let granted = GrantTable::new().grant_anonymous("can_view");
        assert!(!r.matches("view", None, &denied));
        assert!(r.matches("view", None, &granted));
    }

    #[test]
    fn computed_value_clones_share_the_closure() {
        let value: UrlValue<i64> = UrlValue::Computed(Arc::new(|id: &i64| {
            UrlSpec::new("/items").param("id", id.to_string())
        }));
        let cloned = value.clone();
        match (value, cloned) {
            (UrlValue::Computed(a), UrlValue::Computed(b)) => {
                assert!(Arc::ptr_eq(&a, &b));
            }
            other => panic!("expected two Computed values, got {other:?}"),
        }
    }
}

use crate::types::{Identity, PermissionOracle, RuleSet, UrlValue};

/// Find the first rule that applies to `action` for the given identity and
/// return its URL value.
///
/// Rules are checked in declaration order and iteration stops at the first
/// match; declaration order is the sole specificity mechanism. `None` means
/// no rule matched, which the caller resolves with its default URL.
pub(crate) fn first_match<'a, E>(
    rules: &'a RuleSet<E>,
    action: &str,
    identity: Option<&Identity>,
    oracle: &dyn PermissionOracle,
) -> Option<&'a UrlValue<E>> {
    rules
        .iter()
        .find(|rule| rule.matches(action, identity, oracle))
        .map(|rule| &rule.url)
}

use crate::types::{ConfigError, Rule, RuleEntry, RuleSet};

/// Normalize raw rule entries into an immutable [`RuleSet`], preserving
/// declaration order exactly.
///
/// Runs once, when the owning resolver first resolves. Validation only;
/// neither the identity source nor the permission oracle is consulted here.
pub(crate) fn normalize<E>(entries: Vec<RuleEntry<E>>) -> Result<RuleSet<E>, ConfigError> {
    let mut rules = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let matcher = entry
            .matcher
            .ok_or(ConfigError::MissingMatcher { index })?;
        if matcher.is_empty() {
            return Err(ConfigError::EmptyMatcher { index });
        }
        let url = entry.url.ok_or(ConfigError::MissingUrl { index })?;
        rules.push(Rule {
            matcher,
            url,
            permission: entry.permission,
        });
    }
    Ok(RuleSet { rules })
}

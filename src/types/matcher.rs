use std::fmt;

/// Matching strategy comparing an action identifier against a rule.
///
/// Built via [`RuleEntry::action()`](super::rule::RuleEntry::action),
/// [`RuleEntry::one_of()`](super::rule::RuleEntry::one_of), or
/// [`RuleEntry::any()`](super::rule::RuleEntry::any), or parsed from the
/// text form with [`parse`](crate::parse::parse).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionMatcher {
    /// Matches exactly one action identifier.
    Exact(String),
    /// Matches any action in the set.
    OneOf(Vec<String>),
    /// Matches every action. The text form spells this `*`.
    Any,
}

impl ActionMatcher {
    /// Whether this matcher applies to the given action identifier.
    #[must_use]
    pub fn matches(&self, action: &str) -> bool {
        match self {
            ActionMatcher::Exact(name) => name == action,
            ActionMatcher::OneOf(names) => names.iter().any(|n| n == action),
            ActionMatcher::Any => true,
        }
    }

    /// A matcher that can never match anything is a configuration error,
    /// caught during normalization.
    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        match self {
            ActionMatcher::Exact(name) => name.is_empty(),
            ActionMatcher::OneOf(names) => names.is_empty() || names.iter().all(String::is_empty),
            ActionMatcher::Any => false,
        }
    }
}

impl fmt::Display for ActionMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionMatcher::Exact(name) => write!(f, "\"{name}\""),
            ActionMatcher::OneOf(names) => {
                let mut first = true;
                for name in names {
                    if !first {
                        write!(f, " | ")?;
                    }
                    write!(f, "\"{name}\"")?;
                    first = false;
                }
                Ok(())
            }
            ActionMatcher::Any => write!(f, "*"),
        }
    }
}

impl From<&str> for ActionMatcher {
    fn from(action: &str) -> Self {
        ActionMatcher::Exact(action.to_owned())
    }
}

impl From<String> for ActionMatcher {
    fn from(action: String) -> Self {
        ActionMatcher::Exact(action)
    }
}

//! Shared proptest strategies generating rule configurations alongside a
//! reference model of what resolution should return.

use proptest::prelude::*;

use waymark::{FixedIdentity, GrantTable, Identity, ResolverBuilder, UrlResolver, UrlSpec};

pub const ACTIONS: &[&str] = &["view", "index", "update", "delete", "other"];
pub const PERMISSIONS: &[&str] = &["can_view", "can_edit"];

#[derive(Debug, Clone)]
pub enum GenMatcher {
    Exact(String),
    OneOf(Vec<String>),
    Any,
}

impl GenMatcher {
    fn matches(&self, action: &str) -> bool {
        match self {
            GenMatcher::Exact(name) => name == action,
            GenMatcher::OneOf(names) => names.iter().any(|n| n == action),
            GenMatcher::Any => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenRule {
    pub matcher: GenMatcher,
    pub permission: Option<String>,
}

/// A generated configuration: rules get paths `/r0`, `/r1`, ... so the
/// winning rule is identifiable from the resolved URL.
#[derive(Debug, Clone)]
pub struct GenConfig {
    pub rules: Vec<GenRule>,
    /// Permissions granted to the identity `"alice"`.
    pub grants: Vec<String>,
    /// Whether the caller is `"alice"` or anonymous.
    pub signed_in: bool,
}

impl GenConfig {
    pub fn build(&self) -> UrlResolver<()> {
        let mut builder = ResolverBuilder::new().default_url("/default");
        for (index, rule) in self.rules.iter().enumerate() {
            let rule = rule.clone();
            builder = builder.rule(move |r| {
                let r = match &rule.matcher {
                    GenMatcher::Exact(name) => r.action(name.clone()),
                    GenMatcher::OneOf(names) => r.one_of(names.clone()),
                    GenMatcher::Any => r.any(),
                };
                let r = r.to(format!("/r{index}"));
                match &rule.permission {
                    Some(permission) => r.requires(permission.clone()),
                    None => r,
                }
            });
        }

        let mut oracle = GrantTable::new();
        for permission in &self.grants {
            oracle = oracle.grant(permission.clone(), "alice");
        }
        builder = builder.oracle(oracle);
        if self.signed_in {
            builder = builder.identity(FixedIdentity(Identity::new("alice")));
        }
        builder.build()
    }

    fn granted(&self, permission: &str) -> bool {
        self.signed_in && self.grants.iter().any(|g| g == permission)
    }

    /// Whether rule `index` applies to `action` for the configured caller.
    pub fn applicable(&self, index: usize, action: &str) -> bool {
        let rule = &self.rules[index];
        if !rule.matcher.matches(action) {
            return false;
        }
        match &rule.permission {
            Some(permission) => self.granted(permission),
            None => true,
        }
    }

    /// Reference model: first declared rule whose matcher matches and whose
    /// permission (if any) is granted; otherwise the default.
    pub fn expected(&self, action: &str) -> UrlSpec {
        for index in 0..self.rules.len() {
            if self.applicable(index, action) {
                return UrlSpec::new(format!("/r{index}"));
            }
        }
        UrlSpec::new("/default")
    }
}

pub fn arb_action() -> impl Strategy<Value = String> {
    prop::sample::select(ACTIONS.to_vec()).prop_map(str::to_owned)
}

fn arb_matcher() -> impl Strategy<Value = GenMatcher> {
    prop_oneof![
        4 => arb_action().prop_map(GenMatcher::Exact),
        3 => prop::collection::vec(arb_action(), 1..4).prop_map(GenMatcher::OneOf),
        1 => Just(GenMatcher::Any),
    ]
}

fn arb_rule() -> impl Strategy<Value = GenRule> {
    (
        arb_matcher(),
        prop::option::of(prop::sample::select(PERMISSIONS.to_vec()).prop_map(str::to_owned)),
    )
        .prop_map(|(matcher, permission)| GenRule {
            matcher,
            permission,
        })
}

pub fn arb_config() -> impl Strategy<Value = GenConfig> {
    (
        prop::collection::vec(arb_rule(), 0..8),
        prop::collection::vec(prop::sample::select(PERMISSIONS.to_vec()).prop_map(str::to_owned), 0..3),
        any::<bool>(),
    )
        .prop_map(|(rules, grants, signed_in)| GenConfig {
            rules,
            grants,
            signed_in,
        })
}

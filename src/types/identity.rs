use std::collections::{HashMap, HashSet};

/// The caller identity used for permission checks. Opaque to the resolver:
/// only the [`PermissionOracle`] interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    id: String,
}

impl Identity {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Supplies the current caller identity. `None` means anonymous.
pub trait IdentitySource: Send + Sync {
    fn current(&self) -> Option<Identity>;
}

/// Decides whether an identity holds a named permission. Treated as a black
/// box by the resolver; `identity` is `None` for anonymous callers.
pub trait PermissionOracle: Send + Sync {
    fn is_granted(&self, permission: &str, identity: Option<&Identity>) -> bool;
}

impl<F> IdentitySource for F
where
    F: Fn() -> Option<Identity> + Send + Sync,
{
    fn current(&self) -> Option<Identity> {
        self()
    }
}

impl<F> PermissionOracle for F
where
    F: Fn(&str, Option<&Identity>) -> bool + Send + Sync,
{
    fn is_granted(&self, permission: &str, identity: Option<&Identity>) -> bool {
        self(permission, identity)
    }
}

/// Identity source for anonymous callers. The builder default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl IdentitySource for Anonymous {
    fn current(&self) -> Option<Identity> {
        None
    }
}

/// Identity source that always reports the same caller.
#[derive(Debug, Clone)]
pub struct FixedIdentity(pub Identity);

impl IdentitySource for FixedIdentity {
    fn current(&self) -> Option<Identity> {
        Some(self.0.clone())
    }
}

/// Oracle denying every permission. The builder default: with it, any rule
/// carrying a permission requirement never matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl PermissionOracle for DenyAll {
    fn is_granted(&self, _permission: &str, _identity: Option<&Identity>) -> bool {
        false
    }
}

/// Oracle granting every permission, anonymous callers included.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionOracle for AllowAll {
    fn is_granted(&self, _permission: &str, _identity: Option<&Identity>) -> bool {
        true
    }
}

/// In-memory oracle mapping permissions to the identities holding them.
///
/// Anonymous callers are denied unless the permission was granted with
/// [`grant_anonymous()`](Self::grant_anonymous).
#[derive(Debug, Clone, Default)]
pub struct GrantTable {
    grants: HashMap<String, HashSet<String>>,
    anonymous: HashSet<String>,
}

impl GrantTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `permission` to the identity with the given id.
    #[must_use]
    pub fn grant(mut self, permission: impl Into<String>, id: impl Into<String>) -> Self {
        self.grants
            .entry(permission.into())
            .or_default()
            .insert(id.into());
        self
    }

    /// Grant `permission` to anonymous callers.
    #[must_use]
    pub fn grant_anonymous(mut self, permission: impl Into<String>) -> Self {
        self.anonymous.insert(permission.into());
        self
    }
}

impl PermissionOracle for GrantTable {
    fn is_granted(&self, permission: &str, identity: Option<&Identity>) -> bool {
        match identity {
            Some(identity) => self
                .grants
                .get(permission)
                .is_some_and(|ids| ids.contains(identity.id())),
            None => self.anonymous.contains(permission),
        }
    }
}

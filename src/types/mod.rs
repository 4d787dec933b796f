mod error;
mod identity;
mod matcher;
mod resolver;
mod rule;
mod url;

pub use error::{ConfigError, FormatError};
pub use identity::{
    AllowAll, Anonymous, DenyAll, FixedIdentity, GrantTable, Identity, IdentitySource,
    PermissionOracle,
};
pub use matcher::ActionMatcher;
pub use resolver::{ResolverBuilder, UrlResolver};
pub use rule::RuleEntry;
pub(crate) use rule::{Rule, RuleSet, UrlValue};
pub use url::{BaseUrlFormatter, UrlFormatter, UrlSpec};

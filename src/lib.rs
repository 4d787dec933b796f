mod error;
mod normalize;
mod resolve;
mod types;

pub mod parse;

pub use error::WaymarkError;
pub use types::{
    ActionMatcher, AllowAll, Anonymous, BaseUrlFormatter, ConfigError, DenyAll, FixedIdentity,
    FormatError, GrantTable, Identity, IdentitySource, PermissionOracle, ResolverBuilder,
    RuleEntry, UrlFormatter, UrlResolver, UrlSpec,
};

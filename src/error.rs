use thiserror::Error;

use crate::parse::ParseError;
use crate::{ConfigError, FormatError};

/// Unified error type covering rule parsing, normalization, formatting,
/// and I/O.
///
/// Returned by [`UrlResolver::resolve()`](crate::UrlResolver::resolve) and
/// the builder's text/file loading methods. Collaborator errors pass
/// through transparently; nothing is wrapped or retried.
#[derive(Debug, Error)]
pub enum WaymarkError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

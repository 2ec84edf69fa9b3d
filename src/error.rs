//! Configuration build errors
//!
//! Every variant is fatal: the launcher either produces a complete config or
//! exits before any child work begins.

use thiserror::Error;

use crate::identity::IdentityError;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// uid/gid were not supplied and the unprivileged account could not be
    /// resolved.
    #[error("failed to resolve the unprivileged account: {0}")]
    Identity(#[from] IdentityError),

    /// An explicitly supplied list exceeds the entry cap.
    #[error("too many {list} entries: {count} supplied, at most {max} allowed")]
    TooManyEntries { list: &'static str, count: usize, max: usize },
}

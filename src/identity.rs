//! Unprivileged account resolution
//!
//! Looks up the conventional `nobody` account in the passwd database. The
//! launcher drops to these ids whenever the caller does not name an explicit
//! uid/gid. A missing account is a hard error, never a silent fallback to 0.

use nix::unistd::User;
use thiserror::Error;

/// The account whose ids are used when none are supplied.
pub const UNPRIVILEGED_ACCOUNT: &str = "nobody";

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("passwd lookup for `{name}` failed: {source}")]
    Lookup { name: &'static str, source: nix::Error },
    #[error("account `{name}` does not exist")]
    Missing { name: &'static str },
}

/// Resolve the unprivileged account's `(uid, gid)`.
pub fn unprivileged_ids() -> Result<(u32, u32), IdentityError> {
    let user = User::from_name(UNPRIVILEGED_ACCOUNT)
        .map_err(|source| IdentityError::Lookup { name: UNPRIVILEGED_ACCOUNT, source })?
        .ok_or(IdentityError::Missing { name: UNPRIVILEGED_ACCOUNT })?;
    Ok((user.uid.as_raw(), user.gid.as_raw()))
}

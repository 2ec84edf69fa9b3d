//! Resource ceiling values with an explicit "no limit" sentinel.

use std::fmt;

use serde::{Serialize, Serializer};

/// A resource ceiling: either a finite positive quantity or no limit at all.
///
/// Raw CLI input follows the launcher's historical contract: an absent value
/// requests no limit, and so does an explicit `0`. A finite limit is
/// therefore always > 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Finite ceiling. Milliseconds, bytes, or a count depending on field.
    Limited(u64),
    /// No ceiling requested.
    Unlimited,
}

impl Limit {
    /// Normalize a raw CLI value: absent or `0` means [`Limit::Unlimited`].
    pub fn from_raw(raw: Option<u64>) -> Self {
        match raw {
            None | Some(0) => Limit::Unlimited,
            Some(v) => Limit::Limited(v),
        }
    }

    /// Normalize a raw CLI value whose fallback is a finite default rather
    /// than [`Limit::Unlimited`]. Used by the stack-size field only.
    pub fn from_raw_or_default(raw: Option<u64>, default: u64) -> Self {
        match raw {
            None | Some(0) => Limit::Limited(default),
            Some(v) => Limit::Limited(v),
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Limit::Unlimited)
    }

    /// The finite value, if any.
    pub fn value(&self) -> Option<u64> {
        match self {
            Limit::Limited(v) => Some(*v),
            Limit::Unlimited => None,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Limited(v) => write!(f, "{}", v),
            Limit::Unlimited => f.write_str("unlimited"),
        }
    }
}

// Finite limits encode as plain numbers; `Unlimited` encodes as null so a
// consumer across a process boundary can never confuse it with a magnitude.
impl Serialize for Limit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Limit::Limited(v) => serializer.serialize_u64(*v),
            Limit::Unlimited => serializer.serialize_none(),
        }
    }
}

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use rug::Integer;

use crate::error::Error;

/// Identifier encrypted ahead of the descriptor blocks.
///
/// It is an ordinary plaintext and must lie in `[0, n)` for the key it is
/// encrypted under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityToken(Integer);

impl IdentityToken {
    pub fn new(value: Integer) -> Self {
        Self(value)
    }

    /// `device << 64 | nanos`.
    pub fn from_device(device: u64, nanos: u64) -> Self {
        Self((Integer::from(device) << 64u32) + nanos)
    }

    /// Token for `device` stamped with nanoseconds since the Unix epoch.
    ///
    /// A time before the epoch is stamped 0 and one past `u64::MAX`
    /// nanoseconds (year 2554) is stamped `u64::MAX`; both are logged.
    pub fn from_time(device: u64, time: SystemTime) -> Self {
        let nanos: u64 = match time.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => u64::try_from(elapsed.as_nanos()).unwrap_or_else(|_| {
                tracing::warn!(device, "timestamp overflows 64 bits, saturating");
                u64::MAX
            }),
            Err(e) => {
                tracing::warn!(device, behind = ?e.duration(), "clock is before the Unix epoch, stamping 0");
                0
            }
        };
        Self::from_device(device, nanos)
    }

    /// Token for `device` stamped with the current time.
    pub fn now(device: u64) -> Self {
        Self::from_time(device, SystemTime::now())
    }

    pub fn as_integer(&self) -> &Integer {
        &self.0
    }
}

impl fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IdentityToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Integer::from_str_radix(s.trim(), 10)
            .map(Self)
            .map_err(|e| Error::malformed("identity token", format!("{s:?}: {e}")))
    }
}

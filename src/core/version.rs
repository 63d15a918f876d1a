//! Interface versions.
//!
//! Interface packages carry a two-part `major.minor` version, conventionally
//! embedded in the module name after an `@` (e.g. `android.hardware.nfc@1.0`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A `major.minor` interface version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Version { major, minor }
    }
}

/// Error parsing an interface version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid interface version `{0}`: expected `major.minor`")]
pub struct VersionError(String);

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionError(s.to_string());
        let (major, minor) = s.split_once('.').ok_or_else(invalid)?;
        Ok(Version {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Split a versioned module name like `foo@1.0` into base name and version.
///
/// Returns `None` when the name carries no parseable version suffix.
pub fn split_versioned_name(name: &str) -> Option<(&str, Version)> {
    let (base, version) = name.rsplit_once('@')?;
    Some((base, version.parse().ok()?))
}

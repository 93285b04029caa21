use std::fmt;

use serde::Serialize;

/// A normalized, absolute navigation target.
///
/// Only the input classifier constructs these, so a `Destination` always
/// carries one of the `http`, `https`, `ftp` or `file` schemes and never
/// contains whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Destination(String);

impl Destination {
    pub(crate) fn new_unchecked(url: String) -> Self {
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Lowercased scheme, without the trailing colon.
    pub fn scheme(&self) -> String {
        self.0
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .unwrap_or_default()
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Destination {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Destination> for String {
    fn from(d: Destination) -> Self {
        d.0
    }
}

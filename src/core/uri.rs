//! Relative-or-absolute URI references

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// A URI reference that is either absolute or relative
///
/// Parsing never fails: anything that is not an absolute URL is kept
/// verbatim as a relative reference.
///
/// ```
/// use halite::core::uri::UriRef;
///
/// assert!(UriRef::parse("http://example.com/x").is_absolute());
/// assert!(!UriRef::parse("/x").is_absolute());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UriRef {
    Absolute(Url),
    Relative(String),
}

impl UriRef {
    /// Parse a string as a relative-or-absolute reference
    pub fn parse(input: &str) -> Self {
        match Url::parse(input) {
            Ok(url) => UriRef::Absolute(url),
            Err(_) => UriRef::Relative(input.to_string()),
        }
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self, UriRef::Absolute(_))
    }

    /// Resolve against a base URL; absolute references are returned as-is
    pub fn resolve(&self, base: &Url) -> Result<Url, url::ParseError> {
        match self {
            UriRef::Absolute(url) => Ok(url.clone()),
            UriRef::Relative(path) => base.join(path),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            UriRef::Absolute(url) => url.as_str(),
            UriRef::Relative(path) => path,
        }
    }
}

impl fmt::Display for UriRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UriRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(UriRef::parse(s))
    }
}

impl From<&str> for UriRef {
    fn from(s: &str) -> Self {
        UriRef::parse(s)
    }
}

impl From<Url> for UriRef {
    fn from(url: Url) -> Self {
        UriRef::Absolute(url)
    }
}

impl Serialize for UriRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UriRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(UriRef::parse(&raw))
    }
}

use crate::error::NameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const CHARSET: &str = ".12345abcdefghijklmnopqrstuvwxyz";
const MAX_LEN: usize = 13;

/// An on-chain account or proposal name.
///
/// Names hold up to 12 characters from `.12345a-z`, plus an optional 13th
/// character restricted to `.12345a-j`. Trailing dots carry no information and
/// are dropped, so `"alice."` and `"alice"` are the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Validates `value` and returns it in canonical form.
    pub fn new(value: impl AsRef<str>) -> Result<Self, NameError> {
        let value = value.as_ref();
        if value.chars().count() > MAX_LEN {
            return Err(NameError::TooLong(value.to_string()));
        }

        for (position, character) in value.chars().enumerate() {
            let allowed = if position == MAX_LEN - 1 {
                // The 13th character only has four bits available.
                &CHARSET[..16]
            } else {
                CHARSET
            };
            if !allowed.contains(character) {
                return Err(NameError::InvalidCharacter {
                    name: value.to_string(),
                    character,
                    position,
                });
            }
        }

        Ok(Self(value.trim_end_matches('.').to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Name {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Name {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

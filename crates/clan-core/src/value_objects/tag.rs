//! Tag - the game's identifier for players and clans
//!
//! Tags are written as `#` followed by characters from a fixed alphabet.
//! Input is normalized before validation: surrounding whitespace is trimmed,
//! letters are uppercased, the letter `O` is read as the digit `0`, and a
//! missing `#` prefix is added.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A normalized player or clan tag, always starting with `#`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(String);

impl Tag {
    /// Characters the game uses in tags
    pub const ALPHABET: &'static str = "0289PYLQGRJCUV";

    /// Maximum number of characters after the `#`
    pub const MAX_LEN: usize = 11;

    /// Normalize and validate a raw tag
    pub fn parse(raw: &str) -> Result<Self, TagParseError> {
        let body: String = raw
            .trim()
            .trim_start_matches('#')
            .chars()
            .map(|c| match c.to_ascii_uppercase() {
                'O' => '0',
                other => other,
            })
            .collect();

        if body.is_empty() {
            return Err(TagParseError::Empty);
        }
        if body.len() > Self::MAX_LEN {
            return Err(TagParseError::TooLong { max: Self::MAX_LEN });
        }
        if let Some(c) = body.chars().find(|c| !Self::ALPHABET.contains(*c)) {
            return Err(TagParseError::InvalidCharacter(c));
        }

        Ok(Self(format!("#{body}")))
    }

    /// The tag including its `#` prefix
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tag without its `#` prefix
    #[inline]
    pub fn body(&self) -> &str {
        &self.0[1..]
    }

    /// Percent-encoded form for use in URL path segments (`%23ABC`)
    pub fn url_encoded(&self) -> String {
        format!("%23{}", self.body())
    }
}

/// Error when parsing a tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagParseError {
    #[error("tag is empty")]
    Empty,

    #[error("tag is longer than {max} characters")]
    TooLong { max: usize },

    #[error("invalid character '{0}' in tag")]
    InvalidCharacter(char),
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Tag {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Tag::parse(&s).map_err(serde::de::Error::custom)
    }
}

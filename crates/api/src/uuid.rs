use serde::de::Visitor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseUuidError {
    #[error("expected 32 hex digits, found {0}")]
    Length(usize),
    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
}

/// A player UUID.
///
/// Displayed in the canonical dashed lowercase form. Parsing accepts dashed or
/// undashed input in any case, so equality is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerUuid(pub u128);

impl PlayerUuid {
    /// The 32 digit form without dashes, as used by the Mojang session server.
    pub fn simple(&self) -> String {
        format!("{:032x}", self.0)
    }
}

impl fmt::Display for PlayerUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hex = self.simple();
        hex.insert(8, '-');
        hex.insert(13, '-');
        hex.insert(18, '-');
        hex.insert(23, '-');
        f.write_str(&hex)
    }
}

impl FromStr for PlayerUuid {
    type Err = ParseUuidError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().replace('-', "");
        if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseUuidError::InvalidDigit(c));
        }
        if hex.len() != 32 {
            return Err(ParseUuidError::Length(hex.len()));
        }
        u128::from_str_radix(&hex, 16)
            .map(PlayerUuid)
            .map_err(|_| ParseUuidError::Length(hex.len()))
    }
}

impl Serialize for PlayerUuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

struct PlayerUuidVisitor;

impl<'de> Visitor<'de> for PlayerUuidVisitor {
    type Value = PlayerUuid;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a hyphenated uuid string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for PlayerUuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(PlayerUuidVisitor)
    }
}

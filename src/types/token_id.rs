// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! ERC-721 token identifier type

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{B256, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a single ERC-721 token
///
/// Token ids are `uint256` on-chain. They are ordered numerically, displayed in
/// decimal and serialized as decimal strings so that ids above `u64::MAX` survive
/// a JSON round trip without precision loss.
///
/// # Examples
///
/// ```
/// use holderscan::TokenId;
///
/// let id: TokenId = "0x8c".parse().unwrap();
/// assert_eq!(id, TokenId::from(140u64));
/// assert_eq!(id.to_string(), "140");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(U256);

impl TokenId {
    /// Create a token id from a raw `uint256`
    pub const fn new(id: U256) -> Self {
        Self(id)
    }

    /// Decode a token id from an indexed event topic
    pub fn from_topic(topic: B256) -> Self {
        Self(U256::from_be_bytes(topic.0))
    }

    /// Get the inner U256 value
    pub const fn as_u256(&self) -> U256 {
        self.0
    }
}

impl From<u64> for TokenId {
    fn from(id: u64) -> Self {
        Self(U256::from(id))
    }
}

impl From<U256> for TokenId {
    fn from(id: U256) -> Self {
        Self(id)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a token id string is neither decimal nor `0x` hex
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid token id: {0:?}")]
pub struct ParseTokenIdError(String);

impl FromStr for TokenId {
    type Err = ParseTokenIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) if !hex.is_empty() => U256::from_str_radix(hex, 16),
            Some(_) => return Err(ParseTokenIdError(s.to_string())),
            None if !trimmed.is_empty() => U256::from_str_radix(trimmed, 10),
            None => return Err(ParseTokenIdError(s.to_string())),
        };

        parsed
            .map(Self)
            .map_err(|_| ParseTokenIdError(s.to_string()))
    }
}

impl Serialize for TokenId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TokenId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(u64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
            Repr::Number(number) => Ok(Self::from(number)),
        }
    }
}

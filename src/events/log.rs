// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Raw `eth_getLogs` records as stored on disk
//!
//! Every field is kept as text until decode time so that a malformed record
//! produces an [`InputFormatError`] naming its index instead of a generic serde
//! message about "line 1 column 48213".

use std::fs;
use std::path::Path;
use std::str::FromStr;

use alloy_primitives::{hex, Address, B256, U256};
use serde::Deserialize;
use tracing::debug;

use crate::errors::InputFormatError;
use crate::spans;
use crate::types::position::EventPosition;

/// A hex quantity (`"0x1a"`) or a plain JSON integer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    /// JSON number
    Number(u64),
    /// Hex or decimal string
    Text(String),
}

impl Quantity {
    fn parse(&self) -> Option<u64> {
        match self {
            Quantity::Number(n) => Some(*n),
            Quantity::Text(text) => {
                let text = text.trim();
                match text.strip_prefix("0x") {
                    Some(hex) => u64::from_str_radix(hex, 16).ok(),
                    None => text.parse().ok(),
                }
            }
        }
    }
}

/// One log record as returned by `eth_getLogs`
///
/// Only `topics` is required by the format; which other fields must be present
/// depends on what the record is decoded into.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLog {
    /// Emitting contract
    #[serde(default)]
    pub address: Option<String>,
    /// Indexed topics, topic 0 being the event signature hash
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    /// Non-indexed data section
    #[serde(default)]
    pub data: Option<String>,
    /// Block the log was emitted in
    #[serde(default)]
    pub block_number: Option<Quantity>,
    /// Index of the log within its block
    #[serde(default)]
    pub log_index: Option<Quantity>,
    /// Transaction that emitted the log
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

impl RawLog {
    /// Topics of the record, failing if the field is absent
    pub(crate) fn topics(&self, index: usize) -> Result<&[String], InputFormatError> {
        self.topics
            .as_deref()
            .ok_or_else(|| InputFormatError::missing_field(index, "topics"))
    }

    /// Parse topic `n` as a 32-byte word
    pub(crate) fn topic(&self, index: usize, n: usize) -> Result<B256, InputFormatError> {
        let topics = self.topics(index)?;
        let raw = topics
            .get(n)
            .ok_or_else(|| InputFormatError::decode_failed(index, format!("missing topic {n}")))?;
        B256::from_str(raw.trim()).map_err(|_| {
            InputFormatError::invalid_hex(index, format!("topics[{n}]"), raw)
        })
    }

    /// Parse topic `n` as a left-padded address
    pub(crate) fn topic_address(
        &self,
        index: usize,
        n: usize,
    ) -> Result<Address, InputFormatError> {
        let word = self.topic(index, n)?;
        if word.0[..12].iter().any(|byte| *byte != 0) {
            return Err(InputFormatError::decode_failed(
                index,
                format!("topics[{n}] is not a left-padded address: {word}"),
            ));
        }
        Ok(Address::from_word(word))
    }

    /// Parse the data section as a single `uint256`
    pub(crate) fn data_word(&self, index: usize) -> Result<U256, InputFormatError> {
        let raw = self
            .data
            .as_deref()
            .ok_or_else(|| InputFormatError::missing_field(index, "data"))?;
        let bytes =
            hex::decode(raw.trim()).map_err(|_| InputFormatError::invalid_hex(index, "data", raw))?;
        if bytes.len() != 32 {
            return Err(InputFormatError::decode_failed(
                index,
                format!("data holds {} bytes, expected a 32-byte uint256", bytes.len()),
            ));
        }
        Ok(U256::from_be_slice(&bytes))
    }

    /// Parse the emitting contract address, if present
    pub(crate) fn contract(&self, index: usize) -> Result<Option<Address>, InputFormatError> {
        self.address
            .as_deref()
            .map(|raw| {
                Address::from_str(raw.trim())
                    .map_err(|_| InputFormatError::invalid_hex(index, "address", raw))
            })
            .transpose()
    }

    /// Parse the transaction hash, if present
    pub(crate) fn tx_hash(&self, index: usize) -> Result<Option<B256>, InputFormatError> {
        self.transaction_hash
            .as_deref()
            .map(|raw| {
                B256::from_str(raw.trim())
                    .map_err(|_| InputFormatError::invalid_hex(index, "transactionHash", raw))
            })
            .transpose()
    }

    /// Chronological position of the record
    pub(crate) fn position(&self, index: usize) -> Result<EventPosition, InputFormatError> {
        let block_number = parse_quantity(index, "blockNumber", self.block_number.as_ref())?;
        let log_index = parse_quantity(index, "logIndex", self.log_index.as_ref())?;
        Ok(EventPosition {
            index,
            block_number,
            log_index,
        })
    }
}

fn parse_quantity(
    index: usize,
    field: &'static str,
    value: Option<&Quantity>,
) -> Result<Option<u64>, InputFormatError> {
    match value {
        None => Ok(None),
        Some(quantity) => quantity.parse().map(Some).ok_or_else(|| {
            let raw = match quantity {
                Quantity::Number(n) => n.to_string(),
                Quantity::Text(text) => text.clone(),
            };
            InputFormatError::invalid_hex(index, field, raw)
        }),
    }
}

/// Load a JSON array of raw log records from `path`
pub fn load_logs(path: impl AsRef<Path>) -> Result<Vec<RawLog>, InputFormatError> {
    let path = path.as_ref();
    let span = spans::load_logs(path);
    let _guard = span.enter();

    let contents = fs::read_to_string(path).map_err(|e| InputFormatError::read(path, e))?;
    let logs: Vec<RawLog> =
        serde_json::from_str(&contents).map_err(|e| InputFormatError::parse(path, e))?;

    debug!(path = %path.display(), records = logs.len(), "Loaded log records");
    Ok(logs)
}

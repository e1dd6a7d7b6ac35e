// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for reading and decoding input files.
//!
//! Every variant that concerns a single log record carries the record's index
//! in the input array so a failing run points straight at the bad entry.

use std::path::PathBuf;

use crate::types::position::EventPosition;

/// Errors raised while loading or decoding input records.
///
/// These are always fatal: silently skipping a malformed Transfer log would
/// under-count holdings.
///
/// # Examples
///
/// ```rust,ignore
/// use holderscan::{decode_nft_transfers, InputFormatError};
///
/// match decode_nft_transfers(&logs) {
///     Ok(events) => println!("{} transfers", events.len()),
///     Err(InputFormatError::MissingField { index, field }) => {
///         eprintln!("record {index} has no {field}");
///     }
///     Err(e) => eprintln!("bad input: {e}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum InputFormatError {
    /// The input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The input file is not valid JSON of the expected shape.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        /// File that was being parsed
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// A record lacks a required field.
    #[error("Record {index}: missing field `{field}`")]
    MissingField {
        /// Index of the record in the input array
        index: usize,
        /// Name of the missing field
        field: &'static str,
    },

    /// A field holds something that is not valid hex of the expected width.
    #[error("Record {index}: invalid {field} {value:?}")]
    InvalidHex {
        /// Index of the record in the input array
        index: usize,
        /// Name of the offending field
        field: String,
        /// The raw value as it appeared in the input
        value: String,
    },

    /// A keyed input file uses something other than an address as a key.
    #[error("Failed to parse {}: key {key:?} is not an address", path.display())]
    InvalidAddressKey {
        /// File that was being parsed
        path: PathBuf,
        /// The key as it appeared in the file
        key: String,
    },

    /// A record is well-formed JSON but is not the expected event.
    #[error("Record {index}: {details}")]
    DecodeFailed {
        /// Index of the record in the input array
        index: usize,
        /// Why the record could not be decoded
        details: String,
    },

    /// A record is positioned before the one preceding it.
    ///
    /// Replay is only meaningful over chronologically ordered events.
    #[error("{current} precedes the earlier {previous}; events must be in chain order")]
    OutOfOrder {
        /// Position of the offending record
        current: EventPosition,
        /// Position of the record it should have followed
        previous: EventPosition,
    },
}

impl InputFormatError {
    /// Create a `MissingField` error.
    pub fn missing_field(index: usize, field: &'static str) -> Self {
        Self::MissingField { index, field }
    }

    /// Create an `InvalidHex` error.
    pub fn invalid_hex(index: usize, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidHex {
            index,
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a `DecodeFailed` error.
    pub fn decode_failed(index: usize, details: impl Into<String>) -> Self {
        Self::DecodeFailed {
            index,
            details: details.into(),
        }
    }

    /// Create an `InvalidAddressKey` error for `path`.
    pub fn invalid_address_key(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self::InvalidAddressKey {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Create a `Read` error for `path`.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a `Parse` error for `path`.
    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_record() {
        let err = InputFormatError::missing_field(3, "topics");
        assert_eq!(err.to_string(), "Record 3: missing field `topics`");

        let err = InputFormatError::invalid_hex(7, "topics[3]", "0xzz");
        assert_eq!(err.to_string(), "Record 7: invalid topics[3] \"0xzz\"");
    }

    #[test]
    fn out_of_order_message_names_both_positions() {
        let err = InputFormatError::OutOfOrder {
            current: EventPosition::in_block(5, 9, 0),
            previous: EventPosition::in_block(4, 10, 1),
        };
        let message = err.to_string();
        assert!(message.contains("record 5 (block 9, log 0)"));
        assert!(message.contains("record 4 (block 10, log 1)"));
    }
}

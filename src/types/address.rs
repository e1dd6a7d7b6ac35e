// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Address formatting and parsing helpers shared by reports and configuration

use std::str::FromStr;

use alloy_primitives::{hex, Address};
use serde::Serializer;

/// Lowercase `0x`-prefixed hex, the form every report uses
pub fn to_lower_hex(address: &Address) -> String {
    hex::encode_prefixed(address)
}

/// Serde helper writing an address as lowercase hex
pub(crate) fn serialize_lowercase<S: Serializer>(
    address: &Address,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_lower_hex(address))
}

/// Serde helper writing an optional address as lowercase hex
pub(crate) fn serialize_lowercase_opt<S: Serializer>(
    address: &Option<Address>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match address {
        Some(address) => serialize_lowercase(address, serializer),
        None => serializer.serialize_none(),
    }
}

/// Serde helper writing a list of addresses as lowercase hex
pub(crate) fn serialize_lowercase_seq<S: Serializer>(
    addresses: &[Address],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(addresses.iter().map(to_lower_hex))
}

/// Parse a comma separated address list, ignoring blank entries
pub fn parse_address_list(value: &str) -> Result<Vec<Address>, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| Address::from_str(item).map_err(|e| format!("{item}: {e}")))
        .collect()
}

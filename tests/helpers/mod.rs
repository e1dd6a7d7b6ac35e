// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for holderscan integration tests
//!
//! Builds `eth_getLogs`-shaped JSON records so the pipelines can be exercised
//! end to end without a node.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use alloy_primitives::{address, Address, B256, U256};
use holderscan::events::TRANSFER_TOPIC;
use holderscan::types::address::to_lower_hex;
use serde_json::{json, Value};

pub const ALICE: Address = address!("1111111111111111111111111111111111111111");
pub const BOB: Address = address!("2222222222222222222222222222222222222222");
pub const CAROL: Address = address!("3333333333333333333333333333333333333333");
pub const DAVE: Address = address!("4444444444444444444444444444444444444444");
pub const DEAD: Address = address!("000000000000000000000000000000000000dEaD");

/// Address left-padded into a 32-byte topic
pub fn address_topic(address: Address) -> String {
    B256::left_padding_from(address.as_slice()).to_string()
}

/// Quantity as a 32-byte word
pub fn word(value: U256) -> String {
    B256::from(value).to_string()
}

/// ERC-721 Transfer record with a hex block number and log index
pub fn nft_log(from: Address, to: Address, token_id: u64, block: u64, log_index: u64) -> Value {
    json!({
        "address": "0x31e0f919c67cedd2bc3e294340dc900735810311",
        "topics": [
            TRANSFER_TOPIC.to_string(),
            address_topic(from),
            address_topic(to),
            word(U256::from(token_id)),
        ],
        "data": "0x",
        "blockNumber": format!("{block:#x}"),
        "logIndex": format!("{log_index:#x}"),
        "transactionHash": word(U256::from(block * 1_000 + log_index)),
    })
}

/// ERC-721 Transfer record without any position fields
pub fn bare_nft_log(from: Address, to: Address, token_id: u64) -> Value {
    json!({
        "topics": [
            TRANSFER_TOPIC.to_string(),
            address_topic(from),
            address_topic(to),
            word(U256::from(token_id)),
        ],
    })
}

/// ERC-20 Transfer record, block number given as a JSON integer
pub fn erc20_log(from: Address, to: Address, value: U256, block: u64) -> Value {
    json!({
        "address": "0x0a6045b79151d0a54dbd5227082445750a023af2",
        "topics": [
            TRANSFER_TOPIC.to_string(),
            address_topic(from),
            address_topic(to),
        ],
        "data": word(value),
        "blockNumber": block,
        "logIndex": 0,
    })
}

/// Write records as a JSON array file under `dir`
pub fn write_logs(dir: &Path, name: &str, records: &[Value]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(records).unwrap()).unwrap();
    path
}

/// Lowercase hex form used by every report
pub fn lower(address: Address) -> String {
    to_lower_hex(&address)
}

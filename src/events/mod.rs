// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Event decoding for ERC-721 and ERC-20 Transfer logs.
//!
//! This module handles:
//! - Transfer event definitions and the shared signature topic
//! - Loading raw `eth_getLogs` records from disk
//! - Strict decoding into ownership changes and value transfers

pub mod definitions;
pub mod log;
pub mod transfers;

pub use definitions::TRANSFER_TOPIC;
pub use log::{load_logs, Quantity, RawLog};
pub use transfers::{
    decode_fungible_transfer, decode_fungible_transfers, decode_nft_transfer,
    decode_nft_transfers, FungibleTransfer, TransferEvent,
};

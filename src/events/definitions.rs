// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Canonical Transfer event definitions for log decoding
//!
//! ERC-20 and ERC-721 share the signature `Transfer(address,address,uint256)`,
//! so both produce the same topic 0. They differ in where the `uint256` lives:
//!
//! - **ERC-721**: `tokenId` is indexed, giving 4 topics and empty data
//! - **ERC-20**: `value` is in the data section, giving 3 topics
//!
//! The topic count is therefore what tells the two apart.
//!
//! # Example: checking a topic
//!
//! ```rust
//! use alloy_sol_types::SolEvent;
//! use holderscan::events::definitions::{erc20, erc721};
//!
//! assert_eq!(erc721::Transfer::SIGNATURE, "Transfer(address,address,uint256)");
//! assert_eq!(erc721::Transfer::SIGNATURE_HASH, erc20::Transfer::SIGNATURE_HASH);
//! ```

use std::fmt::Debug;

use alloy_primitives::B256;
use alloy_sol_types::SolEvent;

/// ERC-721 event definitions
pub mod erc721 {
    use alloy_sol_types::sol;

    sol! {
        /// ERC-721 Transfer event
        ///
        /// Emitted on every ownership change, including:
        /// - Minting (from = 0x0)
        /// - Burning (to = 0x0)
        event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);
    }
}

/// ERC-20 event definitions
pub mod erc20 {
    use alloy_sol_types::sol;

    sol! {
        /// ERC-20 Transfer event
        ///
        /// `value` is the raw amount, not adjusted for decimals.
        event Transfer(address indexed from, address indexed to, uint256 value);
    }
}

/// Topic 0 shared by ERC-20 and ERC-721 Transfer logs
pub const TRANSFER_TOPIC: B256 = <erc721::Transfer as SolEvent>::SIGNATURE_HASH;

/// Topic count of an ERC-721 Transfer log
pub const ERC721_TOPIC_COUNT: usize = 4;

/// Topic count of an ERC-20 Transfer log
pub const ERC20_TOPIC_COUNT: usize = 3;

impl Debug for erc721::Transfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Transfer(from: {}, to: {}, tokenId: {})",
            self.from, self.to, self.tokenId
        )
    }
}

impl Debug for erc20::Transfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Transfer(from: {}, to: {}, value: {})",
            self.from, self.to, self.value
        )
    }
}

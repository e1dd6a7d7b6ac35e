// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Well-known addresses and constants
//!
//! Burn sinks plus the sale holderscan is usually pointed at.

use alloy_primitives::{address, Address};

/// Conventional burn sink, `0x...dEaD`
///
/// Not a burn address for NFT replay unless configured; the burns job adds it
/// by default.
pub const DEAD_ADDRESS: Address = address!("000000000000000000000000000000000000dEaD");

/// Default number of decimals for ERC-20 amounts
pub const DEFAULT_DECIMALS: u8 = 18;

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "exports";

/// The ZOO-for-EGG sale
pub mod tokens {
    use alloy_primitives::U256;

    use super::*;

    /// Address that received ZOO payments for EGG NFTs
    pub const EGG_PURCHASE_ADDRESS: Address = address!("28dad8427f127664365109c4a9406c8bc7844718");

    /// Whole ZOO paid per EGG NFT
    pub const ZOO_PER_EGG: u64 = 4_200_000;

    /// Raw per-EGG price for a ZOO token with `decimals` decimals
    ///
    /// This is the value `unit_price` expects. Returns `None` if it does not
    /// fit in 256 bits.
    pub fn egg_unit_price(decimals: u8) -> Option<U256> {
        U256::from(10u64)
            .checked_pow(U256::from(decimals))?
            .checked_mul(U256::from(ZOO_PER_EGG))
    }
}

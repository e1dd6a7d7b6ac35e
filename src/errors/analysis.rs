// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for burn, purchase and allocation analysis.

use alloy_primitives::Address;

use crate::types::address::to_lower_hex;

/// Errors raised by the aggregation passes that sit on top of replay.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// A unit price of zero would make every payment buy infinitely many units.
    #[error("Unit price must be greater than zero")]
    ZeroUnitPrice,

    /// An accumulated amount no longer fits in 256 bits or in a count.
    #[error("Amount overflow while accumulating for {}", to_lower_hex(address))]
    AmountOverflow {
        /// Address whose running total overflowed
        address: Address,
    },

    /// A raw amount could not be rendered as a decimal.
    #[error("Failed to convert {value} to a decimal with {decimals} decimals")]
    DecimalConversion {
        /// Raw amount, in decimal
        value: String,
        /// Decimal count that was requested
        decimals: u8,
    },
}

impl AnalysisError {
    /// Create an `AmountOverflow` error for `address`.
    pub fn amount_overflow(address: Address) -> Self {
        Self::AmountOverflow { address }
    }

    /// Create a `DecimalConversion` error.
    pub fn decimal_conversion(value: impl ToString, decimals: u8) -> Self {
        Self::DecimalConversion {
            value: value.to_string(),
            decimals,
        }
    }
}

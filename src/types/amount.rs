// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Raw ERC-20 amount formatting

use std::str::FromStr;

use alloy_primitives::U256;
use bigdecimal::BigDecimal;
use serde::Serializer;

/// Largest decimal count whose scale factor still fits in a `U256`
pub const MAX_DECIMALS: u8 = 77;

/// Format a raw token amount with `decimals` fractional digits.
///
/// Trailing zeros are trimmed and scientific notation is never used, so
/// `1_500_000_000_000_000_000` with 18 decimals renders as `1.5`.
pub fn format_units(raw: U256, decimals: u8) -> String {
    if decimals == 0 {
        return raw.to_string();
    }

    let Some(divisor) = U256::from(10u64).checked_pow(U256::from(decimals)) else {
        return raw.to_string();
    };
    let whole = raw / divisor;
    let fractional = raw % divisor;

    let fractional_str = format!("{:0>width$}", fractional.to_string(), width = decimals as usize);
    let trimmed = fractional_str.trim_end_matches('0');

    if trimmed.is_empty() {
        format!("{}", whole)
    } else {
        format!("{}.{}", whole, trimmed)
    }
}

/// Convert a raw token amount to a [`BigDecimal`] for JSON reports
pub fn to_bigdecimal(raw: U256, decimals: u8) -> Option<BigDecimal> {
    BigDecimal::from_str(&format_units(raw, decimals)).ok()
}

/// Serde helper writing a `U256` as a decimal string instead of hex
pub(crate) fn serialize_decimal<S: Serializer>(
    value: &U256,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

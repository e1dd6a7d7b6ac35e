// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! ERC-20 burn totals
//!
//! Sums every ERC-20 transfer into a burn sink per sender. Totals are exact
//! `U256` sums; the decimal columns are derived from them for readability.

use std::collections::BTreeMap;

use alloy_primitives::{Address, BlockNumber, B256, U256};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AnalysisError;
use crate::events::FungibleTransfer;
use crate::output::TabularReport;
use crate::spans;
use crate::types::address::{serialize_lowercase, to_lower_hex};
use crate::types::amount::{format_units, serialize_decimal, to_bigdecimal};
use crate::types::burn::BurnAddresses;

/// Default number of individual burns kept in a report
pub const DEFAULT_DETAIL_LIMIT: usize = 1000;

/// Total burned by one sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnerTotal {
    /// Sender of the burns
    #[serde(serialize_with = "serialize_lowercase")]
    pub address: Address,
    /// Raw amount burned
    #[serde(serialize_with = "serialize_decimal")]
    pub total_burned: U256,
    /// Amount burned, scaled by token decimals
    pub total_burned_decimal: BigDecimal,
}

/// A single burn transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnDetail {
    /// Transaction that burned, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<B256>,
    /// Block of the burn, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<BlockNumber>,
    /// Sender
    #[serde(serialize_with = "serialize_lowercase")]
    pub from: Address,
    /// Raw amount
    #[serde(serialize_with = "serialize_decimal")]
    pub amount: U256,
    /// Scaled amount
    pub amount_decimal: BigDecimal,
}

/// Burn totals ready to be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnReport {
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
    /// Decimals used for the scaled columns
    pub decimals: u8,
    /// Number of burn transfers
    pub total_burns: usize,
    /// Number of distinct senders
    pub unique_burners: usize,
    /// Raw amount burned overall
    #[serde(serialize_with = "serialize_decimal")]
    pub total_burned: U256,
    /// Scaled amount burned overall
    pub total_burned_decimal: BigDecimal,
    /// Per-sender totals, largest first
    pub burns_by_address: Vec<BurnerTotal>,
    /// Individual burns in log order, capped at the detail limit
    pub burn_details: Vec<BurnDetail>,
}

impl TabularReport for BurnReport {
    fn csv_header(&self) -> &'static str {
        "address,total_burned_wei,total_burned_decimal"
    }

    fn csv_rows(&self) -> Vec<String> {
        self.burns_by_address
            .iter()
            .map(|burner| {
                format!(
                    "{},{},{}",
                    to_lower_hex(&burner.address),
                    burner.total_burned,
                    format_units(burner.total_burned, self.decimals)
                )
            })
            .collect()
    }
}

/// CSV projection of a report's individual burns
pub struct BurnDetailsTable<'a>(pub &'a BurnReport);

impl TabularReport for BurnDetailsTable<'_> {
    fn csv_header(&self) -> &'static str {
        "tx_hash,block_number,from_address,amount_wei,amount_decimal"
    }

    fn csv_rows(&self) -> Vec<String> {
        self.0
            .burn_details
            .iter()
            .map(|burn| {
                format!(
                    "{},{},{},{},{}",
                    burn.tx_hash.map(|h| h.to_string()).unwrap_or_default(),
                    burn.block_number.map(|b| b.to_string()).unwrap_or_default(),
                    to_lower_hex(&burn.from),
                    burn.amount,
                    format_units(burn.amount, self.0.decimals)
                )
            })
            .collect()
    }
}

/// Aggregates ERC-20 transfers into burn sinks
#[derive(Debug, Clone)]
pub struct BurnScanner {
    burn_addresses: BurnAddresses,
    decimals: u8,
    detail_limit: usize,
}

impl BurnScanner {
    /// Create a scanner for the given sinks and token decimals
    pub fn new(burn_addresses: BurnAddresses, decimals: u8) -> Self {
        Self {
            burn_addresses,
            decimals,
            detail_limit: DEFAULT_DETAIL_LIMIT,
        }
    }

    /// Keep at most `limit` individual burns in the report
    pub fn with_detail_limit(mut self, limit: usize) -> Self {
        self.detail_limit = limit;
        self
    }

    /// Sum burns per sender
    ///
    /// Transfers whose recipient is not a burn sink are ignored.
    pub fn summarize(&self, transfers: &[FungibleTransfer]) -> Result<BurnReport, AnalysisError> {
        let span = spans::summarize_burns(transfers.len());
        let _guard = span.enter();

        let mut per_sender: BTreeMap<Address, U256> = BTreeMap::new();
        let mut details = Vec::new();
        let mut total_burns = 0usize;
        let mut total = U256::ZERO;

        for transfer in transfers
            .iter()
            .filter(|t| self.burn_addresses.contains(&t.to))
        {
            total_burns += 1;

            let entry = per_sender.entry(transfer.from).or_default();
            *entry = entry
                .checked_add(transfer.value)
                .ok_or_else(|| AnalysisError::amount_overflow(transfer.from))?;
            total = total
                .checked_add(transfer.value)
                .ok_or_else(|| AnalysisError::amount_overflow(transfer.from))?;

            if details.len() < self.detail_limit {
                details.push(BurnDetail {
                    tx_hash: transfer.tx_hash,
                    block_number: transfer.position.block_number,
                    from: transfer.from,
                    amount: transfer.value,
                    amount_decimal: self.decimal(transfer.value)?,
                });
            }
        }

        let mut burns_by_address = per_sender
            .into_iter()
            .map(|(address, total_burned)| -> Result<BurnerTotal, AnalysisError> {
                Ok(BurnerTotal {
                    address,
                    total_burned,
                    total_burned_decimal: self.decimal(total_burned)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        burns_by_address.sort_by(|a, b| {
            b.total_burned
                .cmp(&a.total_burned)
                .then_with(|| a.address.cmp(&b.address))
        });

        debug!(
            kept_details = details.len(),
            detail_limit = self.detail_limit,
            "Collected burn details"
        );
        info!(
            total_burns,
            unique_burners = burns_by_address.len(),
            total_burned = %format_units(total, self.decimals),
            "Summarized burns"
        );

        Ok(BurnReport {
            generated_at: Utc::now(),
            decimals: self.decimals,
            total_burns,
            unique_burners: burns_by_address.len(),
            total_burned: total,
            total_burned_decimal: self.decimal(total)?,
            burns_by_address,
            burn_details: details,
        })
    }

    fn decimal(&self, raw: U256) -> Result<BigDecimal, AnalysisError> {
        to_bigdecimal(raw, self.decimals)
            .ok_or_else(|| AnalysisError::decimal_conversion(raw, self.decimals))
    }
}

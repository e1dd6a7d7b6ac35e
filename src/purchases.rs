// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Purchase versus holding reconciliation
//!
//! NFTs sold for an ERC-20 payment leave two traces: the payment transfer into
//! the sale address and, if delivered, the NFT in the buyer's wallet. This
//! module sums payments per buyer, converts them into units at a fixed price and
//! compares the result with a [`HolderSummary`].
//!
//! # Example
//!
//! ```rust,ignore
//! use holderscan::{PurchaseAnalyzer, HolderSummary};
//!
//! let analyzer = PurchaseAnalyzer::new(sale_address, unit_price)?;
//! let report = analyzer.analyze(&payments, &holders)?;
//! println!("{} units never delivered", report.summary.total_undelivered);
//! ```

use std::collections::BTreeMap;

use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AnalysisError;
use crate::events::FungibleTransfer;
use crate::holders::HolderSummary;
use crate::output::TabularReport;
use crate::spans;
use crate::types::address::{serialize_lowercase, to_lower_hex};
use crate::types::amount::serialize_decimal;

/// What one buyer paid and received
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    /// Buyer
    #[serde(serialize_with = "serialize_lowercase")]
    pub address: Address,
    /// Raw amount paid into the sale address
    #[serde(serialize_with = "serialize_decimal")]
    pub paid: U256,
    /// Whole units covered by the payment
    pub units_purchased: u64,
    /// Units currently held
    pub units_held: u64,
}

impl Purchase {
    /// Purchased minus held; positive means undelivered
    pub fn difference(&self) -> i128 {
        i128::from(self.units_purchased) - i128::from(self.units_held)
    }
}

/// A buyer whose holdings do not match their payments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Discrepancy {
    /// Buyer
    #[serde(serialize_with = "serialize_lowercase")]
    pub address: Address,
    /// Units paid for
    pub purchased: u64,
    /// Units held
    pub held: u64,
    /// `purchased - held`
    pub difference: i128,
}

/// Totals over the whole analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseSummary {
    /// Buyers who paid for at least one unit
    pub total_purchasers: usize,
    /// Units paid for across all buyers
    pub total_units_purchased: u64,
    /// Units held across all holders, buyers or not
    pub total_delivered: u64,
    /// Sum of positive differences
    pub total_undelivered: u64,
}

/// Purchase reconciliation ready to be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReport {
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
    /// Address payments were sent to
    #[serde(serialize_with = "serialize_lowercase")]
    pub purchase_address: Address,
    /// Raw payment amount per unit
    #[serde(serialize_with = "serialize_decimal")]
    pub unit_price: U256,
    /// Every buyer, by address
    pub purchases: Vec<Purchase>,
    /// Buyers whose holdings differ from their payments, by address
    pub discrepancies: Vec<Discrepancy>,
    /// Totals
    pub summary: PurchaseSummary,
}

impl TabularReport for PurchaseReport {
    fn csv_header(&self) -> &'static str {
        "address,paid,units_purchased,units_held,difference"
    }

    fn csv_rows(&self) -> Vec<String> {
        self.purchases
            .iter()
            .map(|purchase| {
                format!(
                    "{},{},{},{},{}",
                    to_lower_hex(&purchase.address),
                    purchase.paid,
                    purchase.units_purchased,
                    purchase.units_held,
                    purchase.difference()
                )
            })
            .collect()
    }
}

/// Reconciles payments into a sale address against NFT holdings
#[derive(Debug, Clone)]
pub struct PurchaseAnalyzer {
    purchase_address: Address,
    unit_price: U256,
}

impl PurchaseAnalyzer {
    /// Create an analyzer. A zero `unit_price` is rejected.
    pub fn new(purchase_address: Address, unit_price: U256) -> Result<Self, AnalysisError> {
        if unit_price.is_zero() {
            return Err(AnalysisError::ZeroUnitPrice);
        }
        Ok(Self {
            purchase_address,
            unit_price,
        })
    }

    /// Compare payments into the sale address with current holdings
    ///
    /// Transfers to any other address are ignored. Buyers whose total does not
    /// cover a single unit are dropped.
    pub fn analyze(
        &self,
        payments: &[FungibleTransfer],
        holders: &HolderSummary,
    ) -> Result<PurchaseReport, AnalysisError> {
        let span = spans::analyze_purchases(self.purchase_address, payments.len());
        let _guard = span.enter();

        let mut paid: BTreeMap<Address, U256> = BTreeMap::new();
        for payment in payments.iter().filter(|p| p.to == self.purchase_address) {
            let entry = paid.entry(payment.from).or_default();
            *entry = entry
                .checked_add(payment.value)
                .ok_or_else(|| AnalysisError::amount_overflow(payment.from))?;
        }

        let mut purchases = Vec::new();
        let mut discrepancies = Vec::new();
        let mut summary = PurchaseSummary::default();

        for (address, amount) in paid {
            let units_purchased = u64::try_from(amount / self.unit_price)
                .map_err(|_| AnalysisError::amount_overflow(address))?;
            if units_purchased == 0 {
                continue;
            }
            let units_held = holders.count_of(&address) as u64;
            let purchase = Purchase {
                address,
                paid: amount,
                units_purchased,
                units_held,
            };

            summary.total_purchasers += 1;
            summary.total_units_purchased = summary
                .total_units_purchased
                .checked_add(units_purchased)
                .ok_or_else(|| AnalysisError::amount_overflow(address))?;

            let difference = purchase.difference();
            if difference != 0 {
                if units_held == 0 {
                    warn!(
                        buyer = %to_lower_hex(&address),
                        purchased = units_purchased,
                        "Buyer holds nothing"
                    );
                }
                if difference > 0 {
                    summary.total_undelivered = u64::try_from(difference)
                        .ok()
                        .and_then(|undelivered| summary.total_undelivered.checked_add(undelivered))
                        .ok_or_else(|| AnalysisError::amount_overflow(address))?;
                }
                discrepancies.push(Discrepancy {
                    address,
                    purchased: units_purchased,
                    held: units_held,
                    difference,
                });
            }
            purchases.push(purchase);
        }
        summary.total_delivered = holders.total_tokens() as u64;

        info!(
            purchasers = summary.total_purchasers,
            purchased = summary.total_units_purchased,
            delivered = summary.total_delivered,
            undelivered = summary.total_undelivered,
            discrepancies = discrepancies.len(),
            "Reconciled purchases"
        );

        Ok(PurchaseReport {
            generated_at: Utc::now(),
            purchase_address: self.purchase_address,
            unit_price: self.unit_price,
            purchases,
            discrepancies,
            summary,
        })
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Holder aggregation
//!
//! Groups an [`OwnershipSnapshot`] by owner and projects it into a sorted
//! [`HolderReport`]. Sorting is by descending token count with ties broken by
//! ascending address, so repeated runs over the same logs produce byte-identical
//! output.
//!
//! # Example
//!
//! ```rust
//! use alloy_primitives::{address, Address};
//! use holderscan::{HolderReport, HolderSummary, ReportMetadata, TransferEvent, TransferReplayer};
//!
//! let alice = address!("1111111111111111111111111111111111111111");
//! let bob = address!("2222222222222222222222222222222222222222");
//! let events = vec![
//!     TransferEvent::new(Address::ZERO, alice, 5u64, 0),
//!     TransferEvent::new(alice, bob, 5u64, 1),
//! ];
//!
//! let outcome = TransferReplayer::default().replay(&events).unwrap();
//! let summary = HolderSummary::from_snapshot(&outcome.snapshot);
//! let report = HolderReport::new(&summary, ReportMetadata::default());
//!
//! assert_eq!(report.total_holders, 1);
//! assert_eq!(report.holders[0].address, bob);
//! assert_eq!(report.holders[0].token_count, 1);
//! ```

mod distribution;

pub use distribution::HolderDistribution;

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use alloy_primitives::{Address, BlockNumber};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::output::TabularReport;
use crate::snapshot::OwnershipSnapshot;
use crate::spans;
use crate::types::address::{
    serialize_lowercase, serialize_lowercase_opt, serialize_lowercase_seq, to_lower_hex,
};
use crate::types::token_id::TokenId;

/// Tokens held by a single address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolderTokens {
    token_ids: BTreeSet<TokenId>,
}

impl HolderTokens {
    /// Held token ids in ascending order
    pub fn token_ids(&self) -> &BTreeSet<TokenId> {
        &self.token_ids
    }

    /// Number of held tokens, always equal to `token_ids().len()`
    pub fn count(&self) -> usize {
        self.token_ids.len()
    }

    /// Whether `token_id` is held
    pub fn contains(&self, token_id: &TokenId) -> bool {
        self.token_ids.contains(token_id)
    }
}

/// Mapping from owner to the tokens it holds
///
/// Addresses whose set becomes empty are removed, so every key is a holder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolderSummary(BTreeMap<Address, HolderTokens>);

impl HolderSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Group a snapshot by owner
    pub fn from_snapshot(snapshot: &OwnershipSnapshot) -> Self {
        let span = spans::aggregate_holders(snapshot.len());
        let _guard = span.enter();

        let mut summary = Self::new();
        for (token_id, owner) in snapshot.iter() {
            summary.insert(*owner, *token_id);
        }

        debug!(
            holders = summary.len(),
            tokens = summary.total_tokens(),
            "Aggregated holders"
        );
        summary
    }

    /// Add `token_id` to `owner`'s set. Returns `false` if it was already there.
    pub fn insert(&mut self, owner: Address, token_id: TokenId) -> bool {
        self.0.entry(owner).or_default().token_ids.insert(token_id)
    }

    /// Remove `token_id` from `owner`'s set, dropping the owner once empty.
    ///
    /// Returns `false` if `owner` did not hold the token.
    pub fn remove(&mut self, owner: &Address, token_id: &TokenId) -> bool {
        let Some(tokens) = self.0.get_mut(owner) else {
            return false;
        };
        let removed = tokens.token_ids.remove(token_id);
        if tokens.token_ids.is_empty() {
            self.0.remove(owner);
        }
        removed
    }

    /// Tokens held by `owner`
    pub fn get(&self, owner: &Address) -> Option<&HolderTokens> {
        self.0.get(owner)
    }

    /// Number of tokens held by `owner`, zero for non-holders
    pub fn count_of(&self, owner: &Address) -> usize {
        self.0.get(owner).map_or(0, HolderTokens::count)
    }

    /// Number of holders
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nobody holds anything
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all holders' counts
    pub fn total_tokens(&self) -> usize {
        self.0.values().map(HolderTokens::count).sum()
    }

    /// Iterate over holders in address order
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &HolderTokens)> {
        self.0.iter()
    }

    /// Holders sorted by descending count, then ascending address
    pub fn sorted_records(&self) -> Vec<HolderRecord> {
        let mut records: Vec<HolderRecord> = self
            .0
            .iter()
            .map(|(address, tokens)| HolderRecord {
                address: *address,
                token_ids: tokens.token_ids.iter().copied().collect(),
                token_count: tokens.count(),
            })
            .collect();
        records.sort_by_key(|record| (Reverse(record.token_count), record.address));
        records
    }

    /// Bucket holders by how many tokens they hold
    pub fn distribution(&self) -> HolderDistribution {
        self.0.values().map(HolderTokens::count).collect()
    }
}

/// One row of a holder report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderRecord {
    /// Holder address
    #[serde(serialize_with = "serialize_lowercase")]
    pub address: Address,
    /// Held token ids, ascending
    pub token_ids: Vec<TokenId>,
    /// `token_ids.len()`
    pub token_count: usize,
}

impl HolderRecord {
    /// `address,token_count,token_ids` with ids joined by `;`
    pub fn csv_row(&self) -> String {
        let ids = self
            .token_ids
            .iter()
            .map(TokenId::to_string)
            .collect::<Vec<_>>()
            .join(";");
        format!("{},{},{}", to_lower_hex(&self.address), self.token_count, ids)
    }
}

/// Context stamped onto a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMetadata {
    /// Collection contract the logs came from
    pub contract: Option<Address>,
    /// Block the snapshot is valid at
    pub snapshot_block: Option<BlockNumber>,
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// Burn events seen while replaying
    pub burned_tokens: usize,
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self {
            contract: None,
            snapshot_block: None,
            generated_at: Utc::now(),
            burned_tokens: 0,
        }
    }
}

/// Holder snapshot ready to be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderReport {
    /// Collection contract, when known
    #[serde(
        serialize_with = "serialize_lowercase_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub contract: Option<Address>,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
    /// Block the snapshot is valid at, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_block: Option<BlockNumber>,
    /// Number of holders
    pub total_holders: usize,
    /// Number of live tokens
    pub total_tokens: usize,
    /// Burn events seen while replaying
    pub burned_tokens: usize,
    /// Holders per holding-size bucket
    pub distribution: HolderDistribution,
    /// Every holder in ascending address order
    ///
    /// Holding a single token is enough to qualify.
    #[serde(serialize_with = "serialize_lowercase_seq")]
    pub eligible_addresses: Vec<Address>,
    /// Holders, largest first
    pub holders: Vec<HolderRecord>,
}

impl HolderReport {
    /// Build a report from a summary
    pub fn new(summary: &HolderSummary, metadata: ReportMetadata) -> Self {
        let holders = summary.sorted_records();
        Self {
            contract: metadata.contract,
            generated_at: metadata.generated_at,
            snapshot_block: metadata.snapshot_block,
            total_holders: holders.len(),
            total_tokens: holders.iter().map(|h| h.token_count).sum(),
            burned_tokens: metadata.burned_tokens,
            distribution: summary.distribution(),
            eligible_addresses: summary.iter().map(|(address, _)| *address).collect(),
            holders,
        }
    }
}

impl TabularReport for HolderReport {
    fn csv_header(&self) -> &'static str {
        "address,token_count,token_ids"
    }

    fn csv_rows(&self) -> Vec<String> {
        self.holders.iter().map(HolderRecord::csv_row).collect()
    }
}

/// One-column projection of [`HolderReport::eligible_addresses`]
#[derive(Debug, Clone, Copy)]
pub struct EligibleAddressTable<'a>(pub &'a HolderReport);

impl TabularReport for EligibleAddressTable<'_> {
    fn csv_header(&self) -> &'static str {
        "address"
    }

    fn csv_rows(&self) -> Vec<String> {
        self.0.eligible_addresses.iter().map(to_lower_hex).collect()
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Token allocation plan
//!
//! Combines a hand-maintained list of known holders with the holders found by
//! replay and prices every token at a fixed amount. Known holders always win:
//! a scanned holder already present in the known list is skipped, and scanned
//! holders in the excluded set are only counted as reserved.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{AnalysisError, InputFormatError};
use crate::holders::HolderSummary;
use crate::output::TabularReport;
use crate::spans;
use crate::types::address::{serialize_lowercase, to_lower_hex};
use crate::types::amount::serialize_decimal;
use crate::types::token_id::TokenId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KnownHolderEntry {
    #[serde(default)]
    token_ids: Vec<TokenId>,
}

/// Holders supplied out of band, keyed by address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownHolders(BTreeMap<Address, BTreeSet<TokenId>>);

impl KnownHolders {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a `{ "0xaddr": { "tokenIds": [...] } }` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputFormatError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| InputFormatError::read(path, e))?;
        Self::from_json(&contents).map_err(|e| match e {
            KnownHoldersError::Json(source) => InputFormatError::parse(path, source),
            KnownHoldersError::Address(key) => InputFormatError::invalid_address_key(path, key),
        })
    }

    /// Parse the known holders JSON document
    fn from_json(contents: &str) -> Result<Self, KnownHoldersError> {
        let raw: BTreeMap<String, KnownHolderEntry> =
            serde_json::from_str(contents).map_err(KnownHoldersError::Json)?;

        let mut holders = Self::new();
        for (key, entry) in raw {
            let address =
                Address::from_str(key.trim()).map_err(|_| KnownHoldersError::Address(key))?;
            holders.insert(address, entry.token_ids);
        }
        debug!(known = holders.len(), "Parsed known holders");
        Ok(holders)
    }

    /// Add tokens for `address`, merging with any already listed
    pub fn insert(&mut self, address: Address, token_ids: impl IntoIterator<Item = TokenId>) {
        self.0.entry(address).or_default().extend(token_ids);
    }

    /// Whether `address` is listed
    pub fn contains(&self, address: &Address) -> bool {
        self.0.contains_key(address)
    }

    /// Number of listed addresses
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over listed addresses in order
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &BTreeSet<TokenId>)> {
        self.0.iter()
    }
}

enum KnownHoldersError {
    Json(serde_json::Error),
    Address(String),
}

/// Where an allocation entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationSource {
    /// The known holders file
    Known,
    /// Transfer-log replay
    Scan,
}

impl fmt::Display for AllocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known => f.write_str("known"),
            Self::Scan => f.write_str("scan"),
        }
    }
}

/// One address's allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationEntry {
    /// Recipient
    #[serde(serialize_with = "serialize_lowercase")]
    pub address: Address,
    /// `token_ids.len()`
    pub tokens: usize,
    /// Tokens the allocation is paid for, ascending
    pub token_ids: Vec<TokenId>,
    /// `tokens` times the per-token amount
    #[serde(serialize_with = "serialize_decimal")]
    pub amount: U256,
    /// Whether the entry came from the known list or the scan
    pub source: AllocationSource,
}

/// An address present on one side of the known/scanned comparison only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderGap {
    /// Holder address
    #[serde(serialize_with = "serialize_lowercase")]
    pub address: Address,
    /// Tokens that side attributes to the address, ascending
    pub token_ids: Vec<TokenId>,
}

/// Totals over the plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSummary {
    /// Entries in the plan
    pub total_addresses: usize,
    /// Tokens across all entries
    pub total_tokens: usize,
    /// Amount across all entries
    #[serde(serialize_with = "serialize_decimal")]
    pub total_amount: U256,
    /// Entries taken from the known list
    pub from_known: usize,
    /// Entries taken from the scan
    pub from_scan: usize,
    /// Tokens held by excluded addresses, left out of the plan
    pub reserved_tokens: usize,
}

/// Allocation plan ready to be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPlan {
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
    /// Raw amount per token
    #[serde(serialize_with = "serialize_decimal")]
    pub amount_per_token: U256,
    /// Totals
    pub summary: AllocationSummary,
    /// Entries sorted by address
    pub allocations: Vec<AllocationEntry>,
    /// Known holders that hold nothing according to the scan, by address
    pub missing_from_scan: Vec<HolderGap>,
    /// Scanned holders that are neither known nor excluded, by address
    pub not_in_known: Vec<HolderGap>,
}

impl TabularReport for AllocationPlan {
    fn csv_header(&self) -> &'static str {
        "address,tokens,amount,source"
    }

    fn csv_rows(&self) -> Vec<String> {
        self.allocations
            .iter()
            .map(|entry| {
                format!(
                    "{},{},{},{}",
                    to_lower_hex(&entry.address),
                    entry.tokens,
                    entry.amount,
                    entry.source
                )
            })
            .collect()
    }
}

/// Builds an [`AllocationPlan`] from known and scanned holders
#[derive(Debug, Clone)]
pub struct AllocationBuilder {
    amount_per_token: U256,
    excluded: BTreeSet<Address>,
}

impl AllocationBuilder {
    /// Price every allocated token at `amount_per_token` raw units
    pub fn new(amount_per_token: U256) -> Self {
        Self {
            amount_per_token,
            excluded: BTreeSet::new(),
        }
    }

    /// Leave `addresses` out of the scanned entries
    pub fn with_excluded(mut self, addresses: impl IntoIterator<Item = Address>) -> Self {
        self.excluded.extend(addresses);
        self
    }

    /// Merge known and scanned holders into a plan
    pub fn build(
        &self,
        known: &KnownHolders,
        scanned: &HolderSummary,
    ) -> Result<AllocationPlan, AnalysisError> {
        let span = spans::build_allocations(known.len(), scanned.len());
        let _guard = span.enter();

        let mut entries: BTreeMap<Address, AllocationEntry> = BTreeMap::new();
        let mut summary = AllocationSummary::default();
        let mut missing_from_scan = Vec::new();
        let mut not_in_known = Vec::new();

        for (address, token_ids) in known.iter() {
            if scanned.get(address).is_none() {
                missing_from_scan.push(HolderGap {
                    address: *address,
                    token_ids: token_ids.iter().copied().collect(),
                });
            }
            let entry = self.entry(*address, token_ids.iter().copied(), AllocationSource::Known)?;
            entries.insert(*address, entry);
            summary.from_known += 1;
        }

        for (address, tokens) in scanned.iter() {
            if entries.contains_key(address) {
                continue;
            }
            if self.excluded.contains(address) {
                debug!(
                    address = %to_lower_hex(address),
                    tokens = tokens.count(),
                    "Reserved holder left out"
                );
                summary.reserved_tokens += tokens.count();
                continue;
            }
            not_in_known.push(HolderGap {
                address: *address,
                token_ids: tokens.token_ids().iter().copied().collect(),
            });
            let entry = self.entry(
                *address,
                tokens.token_ids().iter().copied(),
                AllocationSource::Scan,
            )?;
            entries.insert(*address, entry);
            summary.from_scan += 1;
        }

        for entry in entries.values() {
            summary.total_addresses += 1;
            summary.total_tokens += entry.tokens;
            summary.total_amount = summary
                .total_amount
                .checked_add(entry.amount)
                .ok_or_else(|| AnalysisError::amount_overflow(entry.address))?;
        }

        info!(
            addresses = summary.total_addresses,
            tokens = summary.total_tokens,
            from_known = summary.from_known,
            from_scan = summary.from_scan,
            reserved_tokens = summary.reserved_tokens,
            missing_from_scan = missing_from_scan.len(),
            not_in_known = not_in_known.len(),
            "Built allocation plan"
        );

        Ok(AllocationPlan {
            generated_at: Utc::now(),
            amount_per_token: self.amount_per_token,
            summary,
            allocations: entries.into_values().collect(),
            missing_from_scan,
            not_in_known,
        })
    }

    fn entry(
        &self,
        address: Address,
        token_ids: impl Iterator<Item = TokenId>,
        source: AllocationSource,
    ) -> Result<AllocationEntry, AnalysisError> {
        let token_ids: Vec<TokenId> = token_ids.collect();
        let amount = self
            .amount_per_token
            .checked_mul(U256::from(token_ids.len()))
            .ok_or_else(|| AnalysisError::amount_overflow(address))?;
        Ok(AllocationEntry {
            address,
            tokens: token_ids.len(),
            token_ids,
            amount,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const A: Address = address!("1111111111111111111111111111111111111111");
    const B: Address = address!("2222222222222222222222222222222222222222");
    const C: Address = address!("3333333333333333333333333333333333333333");
    const RESERVED: Address = address!("4444444444444444444444444444444444444444");

    fn id(n: u64) -> TokenId {
        TokenId::from(n)
    }

    fn scanned() -> HolderSummary {
        let mut summary = HolderSummary::new();
        summary.insert(A, id(1));
        summary.insert(C, id(2));
        summary.insert(C, id(3));
        summary.insert(RESERVED, id(4));
        summary.insert(RESERVED, id(5));
        summary
    }

    #[test]
    fn known_holders_take_precedence() {
        let mut known = KnownHolders::new();
        known.insert(A, [id(140), id(141)]);
        known.insert(B, [id(142)]);

        let plan = AllocationBuilder::new(U256::from(1_000u64))
            .with_excluded([RESERVED])
            .build(&known, &scanned())
            .unwrap();

        let rows: Vec<_> = plan
            .allocations
            .iter()
            .map(|e| (e.address, e.tokens, e.source))
            .collect();
        assert_eq!(
            rows,
            vec![
                (A, 2, AllocationSource::Known),
                (B, 1, AllocationSource::Known),
                (C, 2, AllocationSource::Scan),
            ]
        );
        assert_eq!(plan.summary.from_known, 2);
        assert_eq!(plan.summary.from_scan, 1);
        assert_eq!(plan.summary.reserved_tokens, 2);
        assert_eq!(plan.summary.total_tokens, 5);
        assert_eq!(plan.summary.total_amount, U256::from(5_000u64));
    }

    #[test]
    fn plan_lists_holders_on_one_side_only() {
        let mut known = KnownHolders::new();
        known.insert(A, [id(1)]);
        known.insert(B, [id(142), id(143)]);

        let plan = AllocationBuilder::new(U256::from(1u64))
            .with_excluded([RESERVED])
            .build(&known, &scanned())
            .unwrap();

        assert_eq!(
            plan.missing_from_scan,
            vec![HolderGap {
                address: B,
                token_ids: vec![id(142), id(143)],
            }]
        );
        assert_eq!(
            plan.not_in_known,
            vec![HolderGap {
                address: C,
                token_ids: vec![id(2), id(3)],
            }]
        );

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["missingFromScan"][0]["address"], to_lower_hex(&B));
        assert_eq!(json["notInKnown"][0]["tokenIds"], serde_json::json!(["2", "3"]));
    }

    #[test]
    fn csv_uses_lowercase_source() {
        let plan = AllocationBuilder::new(U256::from(7u64))
            .build(&KnownHolders::new(), &scanned())
            .unwrap();
        assert_eq!(plan.csv_header(), "address,tokens,amount,source");
        assert_eq!(plan.csv_rows()[0], format!("{},1,7,scan", to_lower_hex(&A)));

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["allocations"][0]["source"], "scan");
        assert_eq!(json["summary"]["totalAmount"], "35");
    }

    #[test]
    fn amount_overflow_is_an_error() {
        let err = AllocationBuilder::new(U256::MAX)
            .build(&KnownHolders::new(), &scanned())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::AmountOverflow { .. }));
    }

    #[test]
    fn parses_known_holder_file() {
        let json = r#"{
            "0x1111111111111111111111111111111111111111": { "tokenIds": ["140", "0x8d"] },
            "0x2222222222222222222222222222222222222222": { "tokenIds": [142] }
        }"#;
        let Ok(known) = KnownHolders::from_json(json) else {
            panic!("known holders should parse");
        };
        assert_eq!(known.len(), 2);
        let ids: Vec<_> = known.iter().next().unwrap().1.iter().copied().collect();
        assert_eq!(ids, vec![id(140), id(141)]);
    }

    #[test]
    fn load_reports_bad_address_by_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("known.json");
        fs::write(
            &path,
            r#"{
                "0x1111111111111111111111111111111111111111": { "tokenIds": ["1"] },
                "0xnope": { "tokenIds": ["2"] }
            }"#,
        )
        .unwrap();

        let err = KnownHolders::load(&path).unwrap_err();
        assert!(err.to_string().contains("\"0xnope\""));
        assert!(matches!(
            err,
            InputFormatError::InvalidAddressKey { ref key, .. } if key == "0xnope"
        ));
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! # holderscan
//!
//! Offline ownership analysis over already-downloaded EVM `Transfer` logs.
//!
//! The core is a deterministic replay of ERC-721 transfers into an
//! [`OwnershipSnapshot`], grouped by owner into a [`HolderSummary`]. Around it
//! sit ERC-20 burn totals, a purchase versus holding reconciliation, and an
//! allocation plan builder. Every report is written as both JSON and CSV.
//!
//! ```rust
//! use alloy_primitives::{address, Address};
//! use holderscan::{TransferEvent, TransferReplayer};
//!
//! let a = address!("1111111111111111111111111111111111111111");
//! let b = address!("2222222222222222222222222222222222222222");
//! let c = address!("3333333333333333333333333333333333333333");
//!
//! let events = vec![
//!     TransferEvent::new(a, b, 1u64, 0),
//!     TransferEvent::new(b, c, 1u64, 1),
//!     TransferEvent::new(c, Address::ZERO, 1u64, 2),
//! ];
//! let outcome = TransferReplayer::default().replay(&events).unwrap();
//!
//! assert!(outcome.holders.is_empty());
//! assert_eq!(outcome.holders.total_tokens(), 0);
//! ```

mod allocation;
pub mod bootstrap;
mod burns;
mod config;
mod errors;
pub mod events;
mod holders;
mod output;
mod purchases;
mod replay;
mod snapshot;
mod spans;
pub mod types;

pub use allocation::{
    AllocationBuilder, AllocationEntry, AllocationPlan, AllocationSource, AllocationSummary,
    HolderGap, KnownHolders,
};
pub use bootstrap::{run_allocations, run_burns, run_holders, run_job, run_purchases};
pub use burns::{
    BurnDetail, BurnDetailsTable, BurnReport, BurnScanner, BurnerTotal, DEFAULT_DETAIL_LIMIT,
};
pub use config::constants;
pub use config::{HolderscanConfig, HolderscanConfigBuilder, Job};
pub use errors::*;
pub use events::{FungibleTransfer, RawLog, TransferEvent};
pub use holders::{
    EligibleAddressTable, HolderDistribution, HolderRecord, HolderReport, HolderSummary,
    HolderTokens, ReportMetadata,
};
pub use output::{write_csv, write_json, ReportWriter, TabularReport, WrittenFiles};
pub use purchases::{Discrepancy, Purchase, PurchaseAnalyzer, PurchaseReport, PurchaseSummary};
pub use replay::{LookupInconsistency, ReplayOutcome, ReplayStats, TransferReplayer};
pub use snapshot::OwnershipSnapshot;
pub use types::burn::BurnAddresses;
pub use types::position::EventPosition;
pub use types::token_id::{ParseTokenIdError, TokenId};

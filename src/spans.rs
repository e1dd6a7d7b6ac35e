// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for holderscan operations.
//!
//! Telemetry is kept out of the business logic: instead of `#[instrument]`
//! attributes, each instrumented operation has a span helper here.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     let _guard = span.enter();
//!     // Business logic here
//! }
//! ```

use std::path::Path;

use alloy_primitives::Address;
use tracing::{Level, Span};

use crate::config::Job;

/// Create span for a whole pipeline run.
///
/// Parent: None (root span)
/// Children: every other span in this module
#[inline]
pub(crate) fn run_job(job: Job) -> Span {
    tracing::span!(Level::INFO, "holderscan.run_job", job = %job)
}

/// Create span for loading a log file from disk.
///
/// Parent: run_job span
#[inline]
pub(crate) fn load_logs(path: &Path) -> Span {
    tracing::debug_span!("holderscan.load_logs", path = %path.display())
}

/// Create span for replaying ERC-721 transfers into a snapshot.
///
/// Parent: run_job span
/// Children: none (lookup inconsistencies are logged as events)
#[inline]
pub(crate) fn replay_transfers(event_count: usize, burn_address_count: usize) -> Span {
    tracing::info_span!(
        "holderscan.replay_transfers",
        event_count = event_count,
        burn_address_count = burn_address_count,
    )
}

/// Create span for grouping a snapshot by owner.
///
/// Parent: run_job span
#[inline]
pub(crate) fn aggregate_holders(token_count: usize) -> Span {
    tracing::debug_span!("holderscan.aggregate_holders", token_count = token_count)
}

/// Create span for summing burns per sender.
///
/// Parent: run_job span
#[inline]
pub(crate) fn summarize_burns(transfer_count: usize) -> Span {
    tracing::info_span!("holderscan.summarize_burns", transfer_count = transfer_count)
}

/// Create span for comparing purchases against holdings.
///
/// Parent: run_job span
#[inline]
pub(crate) fn analyze_purchases(purchase_address: Address, payment_count: usize) -> Span {
    tracing::info_span!(
        "holderscan.analyze_purchases",
        purchase_address = %purchase_address,
        payment_count = payment_count,
    )
}

/// Create span for building the allocation plan.
///
/// Parent: run_job span
#[inline]
pub(crate) fn build_allocations(known_count: usize, scanned_count: usize) -> Span {
    tracing::info_span!(
        "holderscan.build_allocations",
        known_count = known_count,
        scanned_count = scanned_count,
    )
}

/// Create span for writing one report's JSON and CSV files.
///
/// Parent: run_job span
#[inline]
pub(crate) fn write_report(dir: &Path, stem: &str) -> Span {
    tracing::debug_span!(
        "holderscan.write_report",
        dir = %dir.display(),
        stem = stem,
    )
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Job pipelines: load logs, decode, compute, write reports.

use std::path::Path;

use tracing::{info, warn};

use crate::allocation::{AllocationBuilder, AllocationPlan, KnownHolders};
use crate::burns::{BurnDetailsTable, BurnReport, BurnScanner};
use crate::config::{HolderscanConfig, Job};
use crate::errors::{ConfigError, HolderscanError};
use crate::events::{decode_fungible_transfers, decode_nft_transfers, load_logs};
use crate::holders::{EligibleAddressTable, HolderReport, ReportMetadata};
use crate::output::ReportWriter;
use crate::purchases::{PurchaseAnalyzer, PurchaseReport};
use crate::replay::{ReplayOutcome, TransferReplayer};
use crate::spans;
use crate::types::burn::BurnAddresses;

/// Main entry point for the binary.
pub fn run() -> anyhow::Result<()> {
    let config = HolderscanConfig::from_env()?;
    run_job(&config)?;
    Ok(())
}

/// Run whichever job `config` names.
pub fn run_job(config: &HolderscanConfig) -> Result<(), HolderscanError> {
    let span = spans::run_job(config.job);
    let _guard = span.enter();

    info!(
        input = %config.input.display(),
        output_dir = %config.output_dir.display(),
        "Starting run"
    );

    match config.job {
        Job::Holders => run_holders(config).map(|_| ()),
        Job::Burns => run_burns(config).map(|_| ()),
        Job::Purchases => run_purchases(config).map(|_| ()),
        Job::Allocations => run_allocations(config).map(|_| ()),
    }
}

/// Replay NFT transfers and write the holder snapshot plus the eligible list.
pub fn run_holders(config: &HolderscanConfig) -> Result<HolderReport, HolderscanError> {
    let outcome = replay_file(&config.input, &config.burn_addresses)?;
    let metadata = ReportMetadata {
        contract: config.contract,
        snapshot_block: config.snapshot_block,
        burned_tokens: outcome.stats.burns,
        ..Default::default()
    };
    let report = HolderReport::new(&outcome.holders, metadata);

    let writer = ReportWriter::new(&config.output_dir);
    let stem = config.file_stem();
    writer.write(stem, &report)?;
    writer.write_table(&format!("{stem}_eligible"), &EligibleAddressTable(&report))?;
    info!(
        holders = report.total_holders,
        tokens = report.total_tokens,
        burned = report.burned_tokens,
        "Holder snapshot complete"
    );
    Ok(report)
}

/// Sum ERC-20 burns and write the totals plus a detail table.
pub fn run_burns(config: &HolderscanConfig) -> Result<BurnReport, HolderscanError> {
    let logs = load_logs(&config.input)?;
    let transfers = decode_fungible_transfers(&logs)?;
    let report =
        BurnScanner::new(config.burn_addresses.clone(), config.decimals).summarize(&transfers)?;

    let writer = ReportWriter::new(&config.output_dir);
    let stem = config.file_stem();
    writer.write(stem, &report)?;
    writer.write_table(&format!("{stem}_details"), &BurnDetailsTable(&report))?;
    Ok(report)
}

/// Compare payments into the purchase address with replayed holdings.
pub fn run_purchases(config: &HolderscanConfig) -> Result<PurchaseReport, HolderscanError> {
    let purchase_address = config
        .purchase_address
        .ok_or_else(|| ConfigError::missing("HOLDERSCAN_PURCHASE_ADDRESS"))?;
    let unit_price = config
        .unit_price
        .ok_or_else(|| ConfigError::missing("HOLDERSCAN_UNIT_PRICE"))?;
    let holders_input = config
        .holders_input
        .as_deref()
        .ok_or_else(|| ConfigError::missing("HOLDERSCAN_HOLDERS_INPUT"))?;

    let analyzer = PurchaseAnalyzer::new(purchase_address, unit_price)?;
    let logs = load_logs(&config.input)?;
    let payments = decode_fungible_transfers(&logs)?;
    let outcome = replay_file(holders_input, &config.burn_addresses)?;

    let report = analyzer.analyze(&payments, &outcome.holders)?;
    ReportWriter::new(&config.output_dir).write(config.file_stem(), &report)?;
    Ok(report)
}

/// Merge known holders with replayed holders into an allocation plan.
///
/// Holdings come from `holders_input` when set, otherwise from `input`.
pub fn run_allocations(config: &HolderscanConfig) -> Result<AllocationPlan, HolderscanError> {
    let amount_per_token = config
        .amount_per_token
        .ok_or_else(|| ConfigError::missing("HOLDERSCAN_AMOUNT_PER_TOKEN"))?;

    let known = match &config.known_holders {
        Some(path) => KnownHolders::load(path)?,
        None => KnownHolders::new(),
    };
    let nft_logs = config.holders_input.as_deref().unwrap_or(config.input.as_path());
    let outcome = replay_file(nft_logs, &config.burn_addresses)?;

    let plan = AllocationBuilder::new(amount_per_token)
        .with_excluded(config.excluded.iter().copied())
        .build(&known, &outcome.holders)?;
    ReportWriter::new(&config.output_dir).write(config.file_stem(), &plan)?;
    Ok(plan)
}

fn replay_file(
    path: &Path,
    burn_addresses: &BurnAddresses,
) -> Result<ReplayOutcome, HolderscanError> {
    let logs = load_logs(path)?;
    let events = decode_nft_transfers(&logs)?;
    let outcome = TransferReplayer::new(burn_addresses.clone()).replay(&events)?;

    if !outcome.inconsistencies.is_empty() {
        warn!(
            count = outcome.inconsistencies.len(),
            path = %path.display(),
            "Replay finished with lookup inconsistencies; the log set may be incomplete"
        );
    }
    Ok(outcome)
}

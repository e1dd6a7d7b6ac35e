// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests: log files in, JSON and CSV reports out

mod helpers;

use std::fs;

use alloy_primitives::{Address, U256};
use helpers::*;
use holderscan::{
    run_allocations, run_burns, run_holders, run_purchases, HolderscanConfigBuilder,
    HolderscanError, InputFormatError, Job,
};
use serde_json::Value;

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn csv_lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn holders_job_writes_matching_json_and_csv() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_logs(
        dir.path(),
        "lux.json",
        &[
            nft_log(Address::ZERO, ALICE, 5, 1, 0),
            nft_log(ALICE, BOB, 5, 2, 0),
            nft_log(Address::ZERO, CAROL, 8, 3, 0),
            nft_log(Address::ZERO, CAROL, 7, 3, 1),
            nft_log(Address::ZERO, DAVE, 9, 3, 2),
        ],
    );
    let out = dir.path().join("exports");
    let config = HolderscanConfigBuilder::new(Job::Holders, &input)
        .output_dir(&out)
        .prefix("lux_nft_holders")
        .snapshot_block(3)
        .build()
        .unwrap();

    let report = run_holders(&config).unwrap();
    assert_eq!(report.total_holders, 3);
    assert_eq!(report.total_tokens, 4);

    let json = read_json(&out.join("lux_nft_holders.json"));
    assert_eq!(json["totalHolders"], 3);
    assert_eq!(json["snapshotBlock"], 3);
    assert_eq!(json["holders"][0]["address"], lower(CAROL));
    assert_eq!(json["holders"][0]["tokenIds"], serde_json::json!(["7", "8"]));
    assert_eq!(json["holders"][1]["address"], lower(BOB));
    assert_eq!(json["holders"][2]["address"], lower(DAVE));

    let lines = csv_lines(&out.join("lux_nft_holders.csv"));
    assert_eq!(lines[0], "address,token_count,token_ids");
    let holders = json["holders"].as_array().unwrap();
    assert_eq!(lines.len() - 1, holders.len());
    for (line, holder) in lines[1..].iter().zip(holders) {
        let ids: Vec<&str> = holder["tokenIds"]
            .as_array()
            .unwrap()
            .iter()
            .map(|id| id.as_str().unwrap())
            .collect();
        let expected = format!(
            "{},{},{}",
            holder["address"].as_str().unwrap(),
            holder["tokenCount"],
            ids.join(";")
        );
        assert_eq!(line, &expected);
    }
}

#[test]
fn holders_job_counts_burns_and_writes_eligible_list() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_logs(
        dir.path(),
        "lux.json",
        &[
            nft_log(Address::ZERO, CAROL, 1, 1, 0),
            nft_log(Address::ZERO, ALICE, 2, 1, 1),
            nft_log(Address::ZERO, BOB, 3, 1, 2),
            nft_log(BOB, Address::ZERO, 3, 2, 0),
        ],
    );
    let out = dir.path().join("exports");
    let config = HolderscanConfigBuilder::new(Job::Holders, &input)
        .output_dir(&out)
        .prefix("lux")
        .build()
        .unwrap();

    let report = run_holders(&config).unwrap();
    assert_eq!(report.burned_tokens, 1);
    assert_eq!(report.eligible_addresses, vec![ALICE, CAROL]);

    let json = read_json(&out.join("lux.json"));
    assert_eq!(json["burnedTokens"], 1);
    assert_eq!(
        json["eligibleAddresses"],
        serde_json::json!([lower(ALICE), lower(CAROL)])
    );

    let lines = csv_lines(&out.join("lux_eligible.csv"));
    assert_eq!(
        lines,
        vec!["address".to_string(), lower(ALICE), lower(CAROL)]
    );
}

#[test]
fn unpositioned_logs_replay_in_array_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_logs(
        dir.path(),
        "bare.json",
        &[
            bare_nft_log(Address::ZERO, ALICE, 5),
            bare_nft_log(ALICE, BOB, 5),
        ],
    );
    let config = HolderscanConfigBuilder::new(Job::Holders, &input)
        .output_dir(dir.path())
        .build()
        .unwrap();

    let report = run_holders(&config).unwrap();
    assert_eq!(report.holders.len(), 1);
    assert_eq!(report.holders[0].address, BOB);
    assert!(dir.path().join("holders.json").exists());
}

#[test]
fn out_of_order_blocks_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_logs(
        dir.path(),
        "shuffled.json",
        &[
            nft_log(Address::ZERO, ALICE, 1, 10, 0),
            nft_log(Address::ZERO, BOB, 2, 9, 4),
        ],
    );
    let out = dir.path().join("out");
    let config = HolderscanConfigBuilder::new(Job::Holders, &input)
        .output_dir(&out)
        .build()
        .unwrap();

    let err = run_holders(&config).unwrap_err();
    assert!(matches!(
        err,
        HolderscanError::Input(InputFormatError::OutOfOrder { .. })
    ));
    assert!(!out.exists());
}

#[test]
fn malformed_record_names_its_index() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_logs(
        dir.path(),
        "mixed.json",
        &[
            nft_log(Address::ZERO, ALICE, 1, 1, 0),
            erc20_log(ALICE, BOB, U256::from(1u64), 2),
        ],
    );
    let config = HolderscanConfigBuilder::new(Job::Holders, &input)
        .output_dir(dir.path())
        .build()
        .unwrap();

    let err = run_holders(&config).unwrap_err();
    assert!(matches!(
        err,
        HolderscanError::Input(InputFormatError::DecodeFailed { index: 1, .. })
    ));
}

#[test]
fn missing_input_file_is_an_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = HolderscanConfigBuilder::new(Job::Holders, dir.path().join("absent.json"))
        .output_dir(dir.path())
        .build()
        .unwrap();

    let err = run_holders(&config).unwrap_err();
    assert!(matches!(
        err,
        HolderscanError::Input(InputFormatError::Read { .. })
    ));
}

#[test]
fn burns_job_writes_totals_and_details() {
    let dir = tempfile::tempdir().unwrap();
    let one = U256::from(10u64).pow(U256::from(18u64));
    let input = write_logs(
        dir.path(),
        "zoo.json",
        &[
            erc20_log(ALICE, DEAD, one * U256::from(3u64), 1),
            erc20_log(BOB, Address::ZERO, one / U256::from(2u64), 2),
            erc20_log(ALICE, BOB, one * U256::from(100u64), 3),
        ],
    );
    let config = HolderscanConfigBuilder::new(Job::Burns, &input)
        .output_dir(dir.path())
        .build()
        .unwrap();

    let report = run_burns(&config).unwrap();
    assert_eq!(report.total_burns, 2);
    assert_eq!(report.unique_burners, 2);

    let json = read_json(&dir.path().join("burns.json"));
    assert_eq!(json["totalBurned"], "3500000000000000000");
    assert_eq!(json["burnsByAddress"][0]["address"], lower(ALICE));

    let totals = csv_lines(&dir.path().join("burns.csv"));
    assert_eq!(
        totals,
        vec![
            "address,total_burned_wei,total_burned_decimal".to_string(),
            format!("{},3000000000000000000,3", lower(ALICE)),
            format!("{},500000000000000000,0.5", lower(BOB)),
        ]
    );

    let details = csv_lines(&dir.path().join("burns_details.csv"));
    assert_eq!(details.len(), 3);
    assert!(details[1].starts_with(",1,"));
}

#[test]
fn purchases_job_reports_undelivered_units() {
    let dir = tempfile::tempdir().unwrap();
    let sale = holderscan::constants::tokens::EGG_PURCHASE_ADDRESS;
    let payments = write_logs(
        dir.path(),
        "zoo.json",
        &[
            erc20_log(ALICE, sale, U256::from(200u64), 1),
            erc20_log(BOB, sale, U256::from(100u64), 2),
        ],
    );
    let eggs = write_logs(
        dir.path(),
        "egg.json",
        &[
            nft_log(Address::ZERO, ALICE, 1, 1, 0),
            nft_log(Address::ZERO, BOB, 2, 2, 0),
        ],
    );
    let config = HolderscanConfigBuilder::new(Job::Purchases, &payments)
        .holders_input(&eggs)
        .purchase_address(sale)
        .unit_price(U256::from(100u64))
        .output_dir(dir.path())
        .build()
        .unwrap();

    let report = run_purchases(&config).unwrap();
    assert_eq!(report.summary.total_purchasers, 2);
    assert_eq!(report.summary.total_units_purchased, 3);
    assert_eq!(report.summary.total_delivered, 2);
    assert_eq!(report.summary.total_undelivered, 1);
    assert_eq!(report.discrepancies.len(), 1);
    assert_eq!(report.discrepancies[0].address, ALICE);

    let lines = csv_lines(&dir.path().join("purchases.csv"));
    assert_eq!(lines[0], "address,paid,units_purchased,units_held,difference");
    assert_eq!(lines[1], format!("{},200,2,1,1", lower(ALICE)));
}

#[test]
fn purchases_job_respects_configured_burn_addresses() {
    let dir = tempfile::tempdir().unwrap();
    let sale = holderscan::constants::tokens::EGG_PURCHASE_ADDRESS;
    let payments = write_logs(
        dir.path(),
        "zoo.json",
        &[erc20_log(ALICE, sale, U256::from(100u64), 1)],
    );
    let eggs = write_logs(
        dir.path(),
        "egg.json",
        &[
            nft_log(Address::ZERO, ALICE, 1, 1, 0),
            nft_log(ALICE, DEAD, 1, 2, 0),
        ],
    );
    let config = HolderscanConfigBuilder::new(Job::Purchases, &payments)
        .holders_input(&eggs)
        .purchase_address(sale)
        .unit_price(U256::from(100u64))
        .burn_addresses([DEAD])
        .output_dir(dir.path())
        .build()
        .unwrap();

    let report = run_purchases(&config).unwrap();
    assert_eq!(report.summary.total_delivered, 0);
    assert_eq!(report.summary.total_undelivered, 1);
    assert_eq!(report.discrepancies[0].held, 0);
}

#[test]
fn allocations_job_merges_known_and_scanned_holders() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_logs(
        dir.path(),
        "lux.json",
        &[
            nft_log(Address::ZERO, ALICE, 1, 1, 0),
            nft_log(Address::ZERO, BOB, 2, 1, 1),
            nft_log(Address::ZERO, DAVE, 3, 1, 2),
        ],
    );
    let known = dir.path().join("known.json");
    fs::write(
        &known,
        format!(
            r#"{{ "{}": {{ "tokenIds": ["140", "141"] }} }}"#,
            lower(CAROL)
        ),
    )
    .unwrap();

    let config = HolderscanConfigBuilder::new(Job::Allocations, &input)
        .known_holders(&known)
        .excluded([DAVE])
        .amount_per_token(U256::from(1_000u64))
        .prefix("allocations_lux")
        .output_dir(dir.path())
        .build()
        .unwrap();

    let plan = run_allocations(&config).unwrap();
    assert_eq!(plan.summary.total_addresses, 3);
    assert_eq!(plan.summary.from_known, 1);
    assert_eq!(plan.summary.from_scan, 2);
    assert_eq!(plan.summary.reserved_tokens, 1);
    assert_eq!(plan.summary.total_amount, U256::from(4_000u64));

    let lines = csv_lines(&dir.path().join("allocations_lux.csv"));
    assert_eq!(
        lines,
        vec![
            "address,tokens,amount,source".to_string(),
            format!("{},1,1000,scan", lower(ALICE)),
            format!("{},1,1000,scan", lower(BOB)),
            format!("{},2,2000,known", lower(CAROL)),
        ]
    );

    let json = read_json(&dir.path().join("allocations_lux.json"));
    assert_eq!(json["missingFromScan"][0]["address"], lower(CAROL));
    assert_eq!(json["missingFromScan"].as_array().unwrap().len(), 1);
    let not_in_known: Vec<&str> = json["notInKnown"]
        .as_array()
        .unwrap()
        .iter()
        .map(|gap| gap["address"].as_str().unwrap())
        .collect();
    assert_eq!(not_in_known, vec![lower(ALICE), lower(BOB)]);
}

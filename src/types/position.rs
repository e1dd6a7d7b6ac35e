// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chronological position of a log record

use std::cmp::Ordering;
use std::fmt;

use alloy_primitives::BlockNumber;
use serde::Serialize;

/// Where an event sits in the chain history
///
/// `index` is the record's position in the input array and is always present.
/// `block_number` and `log_index` are only known when the log record carried
/// them; events without a block are ordered by array position alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPosition {
    /// Index of the record in the input file
    pub index: usize,
    /// Block the log was emitted in, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<BlockNumber>,
    /// Index of the log within its block, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_index: Option<u64>,
}

impl EventPosition {
    /// Position known only by array index
    pub const fn at_index(index: usize) -> Self {
        Self {
            index,
            block_number: None,
            log_index: None,
        }
    }

    /// Position with block coordinates
    pub const fn in_block(index: usize, block_number: BlockNumber, log_index: u64) -> Self {
        Self {
            index,
            block_number: Some(block_number),
            log_index: Some(log_index),
        }
    }

    /// Compare the on-chain coordinates of two positions.
    ///
    /// Returns `None` when either side lacks a block number, in which case the
    /// relative order cannot be checked and array order is trusted. A missing
    /// log index compares as equal within the same block.
    pub fn chain_order(&self, other: &Self) -> Option<Ordering> {
        let (a, b) = (self.block_number?, other.block_number?);
        match a.cmp(&b) {
            Ordering::Equal => match (self.log_index, other.log_index) {
                (Some(x), Some(y)) => Some(x.cmp(&y)),
                _ => Some(Ordering::Equal),
            },
            ord => Some(ord),
        }
    }
}

impl fmt::Display for EventPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {}", self.index)?;
        if let Some(block) = self.block_number {
            write!(f, " (block {block}")?;
            if let Some(log) = self.log_index {
                write!(f, ", log {log}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transfer-log replay
//!
//! Folds an ordered list of ERC-721 [`TransferEvent`]s into the terminal
//! [`OwnershipSnapshot`]. Each call to [`TransferReplayer::replay`] starts from
//! empty state, so replaying the same log twice yields identical results.
//!
//! # Ordering
//!
//! Events must be in chain order. When records carry block coordinates the
//! replayer checks that they never go backwards and fails with
//! [`InputFormatError::OutOfOrder`] otherwise. Records without coordinates are
//! trusted to be in array order.
//!
//! # Incomplete logs
//!
//! A transfer whose `from` is not the token's recorded owner means the log set
//! is missing something. That is recorded as a [`LookupInconsistency`] and
//! logged at `warn`; the token still moves to `to`.
//!
//! # Example
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
//!
//! let outcome = TransferReplayer::default().replay(&events).unwrap();
//! assert!(outcome.holders.is_empty());
//! assert_eq!(outcome.snapshot.len(), 0);
//! ```

use std::cmp::Ordering;

use alloy_primitives::Address;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::InputFormatError;
use crate::events::TransferEvent;
use crate::holders::HolderSummary;
use crate::snapshot::OwnershipSnapshot;
use crate::spans;
use crate::types::address::{serialize_lowercase, serialize_lowercase_opt, to_lower_hex};
use crate::types::burn::BurnAddresses;
use crate::types::position::EventPosition;
use crate::types::token_id::TokenId;

/// A transfer whose sender does not match the recorded owner
///
/// Recoverable: upstream logs may be incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupInconsistency {
    /// Token being moved
    pub token_id: TokenId,
    /// `from` of the event
    #[serde(serialize_with = "serialize_lowercase")]
    pub claimed_owner: Address,
    /// Owner according to the replay so far, `None` if the token was not live
    #[serde(serialize_with = "serialize_lowercase_opt")]
    pub recorded_owner: Option<Address>,
    /// Position of the event
    pub position: EventPosition,
}

/// Counters collected during a replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayStats {
    /// Events applied
    pub events: usize,
    /// Events from the zero address
    pub mints: usize,
    /// Events to a burn address
    pub burns: usize,
    /// Events that are neither mints nor burns
    pub transfers: usize,
}

/// Terminal state of a replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayOutcome {
    /// Token to owner
    pub snapshot: OwnershipSnapshot,
    /// Owner to tokens, maintained alongside the snapshot
    pub holders: HolderSummary,
    /// Event counters
    pub stats: ReplayStats,
    /// Transfers whose sender did not match the recorded owner
    pub inconsistencies: Vec<LookupInconsistency>,
}

/// Replays ERC-721 Transfer events into ownership state
#[derive(Debug, Clone, Default)]
pub struct TransferReplayer {
    burn_addresses: BurnAddresses,
}

impl TransferReplayer {
    /// Create a replayer treating `burn_addresses` as token destruction
    pub fn new(burn_addresses: BurnAddresses) -> Self {
        Self { burn_addresses }
    }

    /// Burn sinks in effect
    pub fn burn_addresses(&self) -> &BurnAddresses {
        &self.burn_addresses
    }

    /// Apply every event in order, starting from empty state
    pub fn replay(&self, events: &[TransferEvent]) -> Result<ReplayOutcome, InputFormatError> {
        let span = spans::replay_transfers(events.len(), self.burn_addresses.len());
        let _guard = span.enter();

        let mut state = ReplayState::default();
        for event in events {
            state.check_order(event.position)?;
            state.apply(event, &self.burn_addresses);
        }

        let outcome = state.finish();
        info!(
            events = outcome.stats.events,
            mints = outcome.stats.mints,
            burns = outcome.stats.burns,
            live_tokens = outcome.snapshot.len(),
            holders = outcome.holders.len(),
            inconsistencies = outcome.inconsistencies.len(),
            "Replayed transfer log"
        );
        Ok(outcome)
    }
}

#[derive(Default)]
struct ReplayState {
    snapshot: OwnershipSnapshot,
    holders: HolderSummary,
    stats: ReplayStats,
    inconsistencies: Vec<LookupInconsistency>,
    last_positioned: Option<EventPosition>,
}

impl ReplayState {
    fn check_order(&mut self, position: EventPosition) -> Result<(), InputFormatError> {
        if position.block_number.is_none() {
            return Ok(());
        }
        if let Some(previous) = self.last_positioned {
            if position.chain_order(&previous) == Some(Ordering::Less) {
                return Err(InputFormatError::OutOfOrder {
                    current: position,
                    previous,
                });
            }
        }
        self.last_positioned = Some(position);
        Ok(())
    }

    fn apply(&mut self, event: &TransferEvent, burn_addresses: &BurnAddresses) {
        self.stats.events += 1;
        let is_mint = event.from == Address::ZERO;
        let is_burn = burn_addresses.contains(&event.to);
        match (is_mint, is_burn) {
            (true, _) => self.stats.mints += 1,
            (false, true) => self.stats.burns += 1,
            (false, false) => self.stats.transfers += 1,
        }

        let recorded_owner = self.snapshot.release(&event.token_id);
        if let Some(owner) = recorded_owner {
            self.holders.remove(&owner, &event.token_id);
        }

        let consistent = match recorded_owner {
            Some(owner) => owner == event.from,
            None => is_mint,
        };
        if !consistent {
            warn!(
                token_id = %event.token_id,
                claimed_owner = %to_lower_hex(&event.from),
                recorded_owner = ?recorded_owner.map(|owner| to_lower_hex(&owner)),
                position = %event.position,
                "Transfer sender does not hold the token; log set may be incomplete"
            );
            self.inconsistencies.push(LookupInconsistency {
                token_id: event.token_id,
                claimed_owner: event.from,
                recorded_owner,
                position: event.position,
            });
        }

        if !is_burn {
            self.snapshot.assign(event.token_id, event.to);
            self.holders.insert(event.to, event.token_id);
        }
    }

    fn finish(self) -> ReplayOutcome {
        ReplayOutcome {
            snapshot: self.snapshot,
            holders: self.holders,
            stats: self.stats,
            inconsistencies: self.inconsistencies,
        }
    }
}

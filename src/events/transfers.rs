// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Decoded Transfer events
//!
//! Turns [`RawLog`] records into [`TransferEvent`] (ERC-721) and
//! [`FungibleTransfer`] (ERC-20) values. Decoding is strict: a record that is
//! not the expected Transfer shape fails the whole batch.

use alloy_primitives::{Address, B256, U256};
use serde::Serialize;
use tracing::trace;

use super::definitions::{erc20, erc721, ERC20_TOPIC_COUNT, ERC721_TOPIC_COUNT, TRANSFER_TOPIC};
use super::log::RawLog;
use crate::errors::InputFormatError;
use crate::types::address::serialize_lowercase;
use crate::types::position::EventPosition;
use crate::types::token_id::TokenId;

/// A single ERC-721 ownership change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferEvent {
    /// Previous owner, zero for mints
    #[serde(serialize_with = "serialize_lowercase")]
    pub from: Address,
    /// New owner, a burn address for burns
    #[serde(serialize_with = "serialize_lowercase")]
    pub to: Address,
    /// Token that moved
    pub token_id: TokenId,
    /// Where the event sits in chain history
    pub position: EventPosition,
}

impl TransferEvent {
    /// Event at `index` with no block coordinates
    pub fn new(from: Address, to: Address, token_id: impl Into<TokenId>, index: usize) -> Self {
        Self {
            from,
            to,
            token_id: token_id.into(),
            position: EventPosition::at_index(index),
        }
    }

    /// Attach block coordinates
    pub fn at(mut self, block_number: u64, log_index: u64) -> Self {
        self.position.block_number = Some(block_number);
        self.position.log_index = Some(log_index);
        self
    }

    /// Whether this event creates the token
    pub fn is_mint(&self) -> bool {
        self.from == Address::ZERO
    }

    fn from_log(event: erc721::Transfer, position: EventPosition) -> Self {
        Self {
            from: event.from,
            to: event.to,
            token_id: TokenId::new(event.tokenId),
            position,
        }
    }
}

/// A single ERC-20 value transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FungibleTransfer {
    /// Sender
    pub from: Address,
    /// Recipient
    pub to: Address,
    /// Raw amount, not adjusted for decimals
    pub value: U256,
    /// Emitting token contract, when the log carried it
    pub token: Option<Address>,
    /// Transaction that emitted the log, when known
    pub tx_hash: Option<B256>,
    /// Where the event sits in chain history
    pub position: EventPosition,
}

impl FungibleTransfer {
    fn from_log(
        event: erc20::Transfer,
        token: Option<Address>,
        tx_hash: Option<B256>,
        position: EventPosition,
    ) -> Self {
        Self {
            from: event.from,
            to: event.to,
            value: event.value,
            token,
            tx_hash,
            position,
        }
    }
}

fn check_signature(
    log: &RawLog,
    index: usize,
    expected_topics: usize,
) -> Result<(), InputFormatError> {
    let topics = log.topics(index)?;
    if topics.len() != expected_topics {
        return Err(InputFormatError::decode_failed(
            index,
            format!(
                "expected {expected_topics} topics for a Transfer log, found {}",
                topics.len()
            ),
        ));
    }

    let signature = log.topic(index, 0)?;
    if signature != TRANSFER_TOPIC {
        return Err(InputFormatError::decode_failed(
            index,
            format!("topic 0 {signature} is not the Transfer signature"),
        ));
    }
    Ok(())
}

/// Decode one ERC-721 Transfer log
pub fn decode_nft_transfer(index: usize, log: &RawLog) -> Result<TransferEvent, InputFormatError> {
    check_signature(log, index, ERC721_TOPIC_COUNT)?;

    let event = erc721::Transfer {
        from: log.topic_address(index, 1)?,
        to: log.topic_address(index, 2)?,
        tokenId: TokenId::from_topic(log.topic(index, 3)?).as_u256(),
    };
    let position = log.position(index)?;

    trace!(index, ?event, "Decoded ERC-721 transfer");
    Ok(TransferEvent::from_log(event, position))
}

/// Decode one ERC-20 Transfer log
pub fn decode_fungible_transfer(
    index: usize,
    log: &RawLog,
) -> Result<FungibleTransfer, InputFormatError> {
    check_signature(log, index, ERC20_TOPIC_COUNT)?;

    let event = erc20::Transfer {
        from: log.topic_address(index, 1)?,
        to: log.topic_address(index, 2)?,
        value: log.data_word(index)?,
    };
    let token = log.contract(index)?;
    let tx_hash = log.tx_hash(index)?;
    let position = log.position(index)?;

    trace!(index, ?event, "Decoded ERC-20 transfer");
    Ok(FungibleTransfer::from_log(event, token, tx_hash, position))
}

/// Decode every record as an ERC-721 Transfer, preserving input order
pub fn decode_nft_transfers(logs: &[RawLog]) -> Result<Vec<TransferEvent>, InputFormatError> {
    logs.iter()
        .enumerate()
        .map(|(index, log)| decode_nft_transfer(index, log))
        .collect()
}

/// Decode every record as an ERC-20 Transfer, preserving input order
pub fn decode_fungible_transfers(
    logs: &[RawLog],
) -> Result<Vec<FungibleTransfer>, InputFormatError> {
    logs.iter()
        .enumerate()
        .map(|(index, log)| decode_fungible_transfer(index, log))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::log::Quantity;
    use alloy_primitives::address;

    const SIG: &str = "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";

    fn topic_for(address: Address) -> String {
        format!("0x{:0>64}", alloy_primitives::hex::encode(address))
    }

    fn nft_log(from: Address, to: Address, token: u64) -> RawLog {
        RawLog {
            topics: Some(vec![
                SIG.to_string(),
                topic_for(from),
                topic_for(to),
                format!("0x{token:064x}"),
            ]),
            data: Some("0x".into()),
            ..Default::default()
        }
    }

    #[test]
    fn decodes_mint() {
        let alice = address!("1111111111111111111111111111111111111111");
        let event = decode_nft_transfer(0, &nft_log(Address::ZERO, alice, 5)).unwrap();
        assert!(event.is_mint());
        assert_eq!(event.to, alice);
        assert_eq!(event.token_id, TokenId::from(5u64));
        assert_eq!(event.position, EventPosition::at_index(0));
    }

    #[test]
    fn rejects_erc20_shape_as_nft() {
        let alice = address!("1111111111111111111111111111111111111111");
        let mut log = nft_log(Address::ZERO, alice, 5);
        log.topics.as_mut().unwrap().pop();
        let err = decode_nft_transfer(2, &log).unwrap_err();
        assert!(matches!(err, InputFormatError::DecodeFailed { index: 2, .. }));
    }

    #[test]
    fn rejects_other_signature() {
        let alice = address!("1111111111111111111111111111111111111111");
        let mut log = nft_log(Address::ZERO, alice, 5);
        log.topics.as_mut().unwrap()[0] = format!("0x{:064x}", 1);
        let err = decode_nft_transfer(0, &log).unwrap_err();
        assert!(err.to_string().contains("not the Transfer signature"));
    }

    #[test]
    fn rejects_non_hex_token_id() {
        let alice = address!("1111111111111111111111111111111111111111");
        let mut log = nft_log(Address::ZERO, alice, 5);
        log.topics.as_mut().unwrap()[3] = "0xnothex".into();
        let err = decode_nft_transfer(9, &log).unwrap_err();
        assert!(matches!(err, InputFormatError::InvalidHex { index: 9, .. }));
    }

    #[test]
    fn batch_decode_stops_at_first_bad_record() {
        let alice = address!("1111111111111111111111111111111111111111");
        let good = nft_log(Address::ZERO, alice, 1);
        let bad = RawLog::default();
        let err = decode_nft_transfers(&[good.clone(), good, bad]).unwrap_err();
        assert!(matches!(err, InputFormatError::MissingField { index: 2, .. }));
    }

    #[test]
    fn decodes_erc20_value_and_metadata() {
        let alice = address!("1111111111111111111111111111111111111111");
        let dead = address!("000000000000000000000000000000000000dEaD");
        let log = RawLog {
            address: Some("0x09e2b83fe5485a7c8beaa5dffd1d324a2b2d5c13".into()),
            topics: Some(vec![SIG.to_string(), topic_for(alice), topic_for(dead)]),
            data: Some(format!("0x{:064x}", 1_000u64)),
            block_number: Some(Quantity::Text("0xff".into())),
            log_index: Some(Quantity::Number(3)),
            transaction_hash: Some(format!("0x{:064x}", 0xabcu64)),
        };

        let transfer = decode_fungible_transfer(0, &log).unwrap();
        assert_eq!(transfer.from, alice);
        assert_eq!(transfer.to, dead);
        assert_eq!(transfer.value, U256::from(1_000u64));
        assert_eq!(
            transfer.token,
            Some(address!("09e2b83fe5485a7c8beaa5dffd1d324a2b2d5c13"))
        );
        assert_eq!(transfer.position, EventPosition::in_block(0, 255, 3));
        assert!(transfer.tx_hash.is_some());
    }

    #[test]
    fn erc20_requires_data() {
        let alice = address!("1111111111111111111111111111111111111111");
        let log = RawLog {
            topics: Some(vec![SIG.to_string(), topic_for(alice), topic_for(alice)]),
            ..Default::default()
        };
        let err = decode_fungible_transfer(1, &log).unwrap_err();
        assert!(matches!(
            err,
            InputFormatError::MissingField {
                index: 1,
                field: "data"
            }
        ));
    }
}

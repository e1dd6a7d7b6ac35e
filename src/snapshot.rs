// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Point-in-time token ownership

use std::collections::BTreeMap;

use alloy_primitives::Address;

use crate::types::token_id::TokenId;

/// Mapping from token id to its current owner
///
/// Burned and never-minted tokens are absent, so `len()` is the number of live
/// tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnershipSnapshot(BTreeMap<TokenId, Address>);

impl OwnershipSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Current owner of `token_id`, if it is live
    pub fn owner_of(&self, token_id: &TokenId) -> Option<Address> {
        self.0.get(token_id).copied()
    }

    /// Number of live tokens
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no token is live
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(token, owner)` pairs in token order
    pub fn iter(&self) -> impl Iterator<Item = (&TokenId, &Address)> {
        self.0.iter()
    }

    /// Record `owner` as the holder of `token_id`, returning the previous owner
    pub(crate) fn assign(&mut self, token_id: TokenId, owner: Address) -> Option<Address> {
        self.0.insert(token_id, owner)
    }

    /// Drop `token_id` from the snapshot, returning the owner it had
    pub(crate) fn release(&mut self, token_id: &TokenId) -> Option<Address> {
        self.0.remove(token_id)
    }
}

impl FromIterator<(TokenId, Address)> for OwnershipSnapshot {
    fn from_iter<T: IntoIterator<Item = (TokenId, Address)>>(iter: T) -> Self {
        Self(BTreeMap::from_iter(iter))
    }
}

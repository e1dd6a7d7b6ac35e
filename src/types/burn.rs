// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Set of addresses treated as token destruction

use std::collections::BTreeSet;

use alloy_primitives::Address;

/// Addresses whose incoming transfers destroy the token
///
/// The zero address is always a member and cannot be removed. Extra sinks such
/// as `0x...dEaD` are added explicitly.
///
/// # Examples
///
/// ```
/// use alloy_primitives::{address, Address};
/// use holderscan::BurnAddresses;
///
/// let burns = BurnAddresses::default().with(address!("000000000000000000000000000000000000dEaD"));
/// assert!(burns.contains(&Address::ZERO));
/// assert_eq!(burns.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnAddresses(BTreeSet<Address>);

impl BurnAddresses {
    /// Only the zero address
    pub fn zero_only() -> Self {
        Self(BTreeSet::from([Address::ZERO]))
    }

    /// Add another burn sink
    pub fn with(mut self, address: Address) -> Self {
        self.0.insert(address);
        self
    }

    /// Add several burn sinks
    pub fn extend(&mut self, addresses: impl IntoIterator<Item = Address>) {
        self.0.extend(addresses);
    }

    /// Whether `address` destroys tokens sent to it
    pub fn contains(&self, address: &Address) -> bool {
        self.0.contains(address)
    }

    /// Number of burn sinks, zero address included
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty (never, since the zero address is fixed)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over burn sinks in address order
    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.0.iter()
    }
}

impl Default for BurnAddresses {
    fn default() -> Self {
        Self::zero_only()
    }
}

impl FromIterator<Address> for BurnAddresses {
    fn from_iter<T: IntoIterator<Item = Address>>(iter: T) -> Self {
        let mut burns = Self::zero_only();
        burns.extend(iter);
        burns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn zero_address_always_present() {
        let burns: BurnAddresses = [address!("000000000000000000000000000000000000dEaD")]
            .into_iter()
            .collect();
        assert!(burns.contains(&Address::ZERO));
        assert_eq!(burns.len(), 2);
        assert!(!burns.is_empty());
    }

    #[test]
    fn duplicates_collapse() {
        let burns = BurnAddresses::default().with(Address::ZERO);
        assert_eq!(burns.len(), 1);
    }

    #[test]
    fn regular_address_is_not_a_burn() {
        let burns = BurnAddresses::default();
        assert!(!burns.contains(&address!("1111111111111111111111111111111111111111")));
    }
}

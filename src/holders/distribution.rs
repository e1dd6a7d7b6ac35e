// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Holder count buckets

use serde::Serialize;

/// Number of holders per holding-size bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HolderDistribution {
    /// Holders of exactly one token
    #[serde(rename = "1")]
    pub single: usize,
    /// Holders of two to five tokens
    #[serde(rename = "2-5")]
    pub two_to_five: usize,
    /// Holders of six to ten tokens
    #[serde(rename = "6-10")]
    pub six_to_ten: usize,
    /// Holders of eleven or more tokens
    #[serde(rename = "11+")]
    pub eleven_plus: usize,
}

impl HolderDistribution {
    /// Count one holder with `token_count` tokens. Zero is ignored.
    pub fn record(&mut self, token_count: usize) {
        match token_count {
            0 => {}
            1 => self.single += 1,
            2..=5 => self.two_to_five += 1,
            6..=10 => self.six_to_ten += 1,
            _ => self.eleven_plus += 1,
        }
    }

    /// Total holders across all buckets
    pub fn total(&self) -> usize {
        self.single + self.two_to_five + self.six_to_ten + self.eleven_plus
    }
}

impl FromIterator<usize> for HolderDistribution {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut distribution = Self::default();
        for count in iter {
            distribution.record(count);
        }
        distribution
    }
}

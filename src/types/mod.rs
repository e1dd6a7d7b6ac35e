// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types shared across holderscan.
//!
//! This module provides newtype wrappers and small value types for:
//! - ERC-721 token identifiers
//! - Chronological event positions
//! - Burn address sets
//! - Raw ERC-20 amount formatting and address formatting helpers

pub mod address;
pub mod amount;
pub mod burn;
pub mod position;
pub mod token_id;

// Note: Public types are re-exported from lib.rs, not here

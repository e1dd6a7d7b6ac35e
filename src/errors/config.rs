// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for environment configuration.

/// Errors raised while reading [`HolderscanConfig`](crate::HolderscanConfig)
/// from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("Missing configuration: {var}")]
    Missing {
        /// Environment variable name
        var: String,
    },

    /// A variable is set but cannot be parsed.
    #[error("Invalid configuration {var}: {details}")]
    Invalid {
        /// Environment variable name
        var: String,
        /// Why the value was rejected
        details: String,
    },
}

impl ConfigError {
    /// Create a `Missing` error for `var`.
    pub fn missing(var: impl Into<String>) -> Self {
        Self::Missing { var: var.into() }
    }

    /// Create an `Invalid` error for `var`.
    pub fn invalid(var: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Invalid {
            var: var.into(),
            details: details.into(),
        }
    }
}

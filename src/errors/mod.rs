// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the holderscan library.
//!
//! This module follows a hybrid approach:
//!
//! - **Concern-specific errors** for fine-grained handling ([`InputFormatError`],
//!   [`OutputWriteError`], [`ConfigError`], [`AnalysisError`])
//! - **Unified error type** ([`HolderscanError`]) for pipelines that only need to
//!   report what went wrong
//!
//! A token moved by an address that does not currently hold it is *not* an
//! error. Upstream log sets may be incomplete, so the replayer records a
//! [`LookupInconsistency`](crate::LookupInconsistency), logs a warning and keeps
//! going.
//!
//! # Examples
//!
//! ```rust,ignore
//! use holderscan::{run_holders, HolderscanError, InputFormatError};
//!
//! match run_holders(&config) {
//!     Ok(report) => println!("{} holders", report.total_holders),
//!     Err(HolderscanError::Input(InputFormatError::OutOfOrder { current, .. })) => {
//!         eprintln!("re-sort the log file, first bad entry is {current}");
//!     }
//!     Err(e) => eprintln!("run failed: {e}"),
//! }
//! ```

mod analysis;
mod config;
mod input;
mod output;

pub use analysis::AnalysisError;
pub use config::ConfigError;
pub use input::InputFormatError;
pub use output::OutputWriteError;

/// Unified error type for all holderscan operations.
///
/// Concern-specific errors convert via `From`, so `?` propagates naturally.
#[derive(Debug, thiserror::Error)]
pub enum HolderscanError {
    /// Malformed or unreadable input.
    #[error("Input format error: {0}")]
    Input(#[from] InputFormatError),

    /// Failure writing a report.
    #[error("Output write error: {0}")]
    Output(#[from] OutputWriteError),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid analysis parameters or overflowing totals.
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_concern_errors_with_prefix() {
        let err: HolderscanError = InputFormatError::missing_field(0, "topics").into();
        assert_eq!(
            err.to_string(),
            "Input format error: Record 0: missing field `topics`"
        );

        let err: HolderscanError = AnalysisError::ZeroUnitPrice.into();
        assert!(matches!(err, HolderscanError::Analysis(_)));

        let err: HolderscanError = ConfigError::missing("HOLDERSCAN_INPUT").into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing configuration: HOLDERSCAN_INPUT"
        );
    }
}

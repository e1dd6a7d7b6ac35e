// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for writing report files.

use std::path::PathBuf;

/// Errors raised while writing JSON or CSV reports. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum OutputWriteError {
    /// Creating, writing or flushing a file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Destination file or directory
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Serializing the report to JSON failed.
    #[error("Failed to serialize {}: {source}", path.display())]
    Serialize {
        /// Destination file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },
}

impl OutputWriteError {
    /// Create an `Io` error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a `Serialize` error for `path`.
    pub fn serialize(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Serialize {
            path: path.into(),
            source,
        }
    }
}

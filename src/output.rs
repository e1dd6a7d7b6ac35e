// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! JSON and CSV report writers
//!
//! Every report is written twice: a structured JSON document and a flat CSV
//! table. Both come from the same in-memory report value, and the CSV rows are
//! derived from the same record list the JSON serializes, so the two agree row
//! for row.
//!
//! # Examples
//!
//! ```rust,ignore
//! use holderscan::{HolderReport, ReportWriter};
//!
//! let writer = ReportWriter::new("exports/lux-analysis");
//! let files = writer.write("lux_nft_holders", &report)?;
//! println!("wrote {} and {}", files.json.display(), files.csv.display());
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::errors::OutputWriteError;
use crate::spans;

/// A report with a flat comma-separated projection
pub trait TabularReport {
    /// Header line, without trailing newline
    fn csv_header(&self) -> &'static str;

    /// One line per row, without trailing newline, in output order
    fn csv_rows(&self) -> Vec<String>;
}

/// Paths produced by [`ReportWriter::write`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    /// The JSON document
    pub json: PathBuf,
    /// The CSV table
    pub csv: PathBuf,
}

/// Writes reports into a single output directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    /// Create a writer targeting `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `<stem>.json` and `<stem>.csv`
    pub fn write<R>(&self, stem: &str, report: &R) -> Result<WrittenFiles, OutputWriteError>
    where
        R: Serialize + TabularReport,
    {
        let span = spans::write_report(&self.dir, stem);
        let _guard = span.enter();

        self.ensure_dir()?;
        let json = self.dir.join(format!("{stem}.json"));
        let csv = self.dir.join(format!("{stem}.csv"));

        write_json(&json, report)?;
        write_csv(&csv, report)?;

        info!(json = %json.display(), csv = %csv.display(), "Wrote report");
        Ok(WrittenFiles { json, csv })
    }

    /// Write only a CSV table as `<stem>.csv`
    pub fn write_table<R: TabularReport>(
        &self,
        stem: &str,
        table: &R,
    ) -> Result<PathBuf, OutputWriteError> {
        self.ensure_dir()?;
        let csv = self.dir.join(format!("{stem}.csv"));
        write_csv(&csv, table)?;
        info!(csv = %csv.display(), "Wrote table");
        Ok(csv)
    }

    fn ensure_dir(&self) -> Result<(), OutputWriteError> {
        fs::create_dir_all(&self.dir).map_err(|e| OutputWriteError::io(&self.dir, e))
    }
}

/// Write `value` as pretty-printed JSON
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), OutputWriteError> {
    let file = File::create(path).map_err(|e| OutputWriteError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| OutputWriteError::serialize(path, e))?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| OutputWriteError::io(path, e))
}

/// Write the CSV projection of `table`
pub fn write_csv<R: TabularReport + ?Sized>(
    path: &Path,
    table: &R,
) -> Result<(), OutputWriteError> {
    let file = File::create(path).map_err(|e| OutputWriteError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    let mut write_line = |line: &str| -> std::io::Result<()> {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")
    };

    write_line(table.csv_header()).map_err(|e| OutputWriteError::io(path, e))?;
    for row in table.csv_rows() {
        write_line(&row).map_err(|e| OutputWriteError::io(path, e))?;
    }
    writer.flush().map_err(|e| OutputWriteError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Table {
        rows: Vec<(String, u32)>,
    }

    impl TabularReport for Table {
        fn csv_header(&self) -> &'static str {
            "name,value"
        }

        fn csv_rows(&self) -> Vec<String> {
            self.rows
                .iter()
                .map(|(name, value)| format!("{name},{value}"))
                .collect()
        }
    }

    #[test]
    fn writes_both_projections() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("nested"));
        let table = Table {
            rows: vec![("a".into(), 1), ("b".into(), 2)],
        };

        let files = writer.write("report", &table).unwrap();

        let csv = fs::read_to_string(&files.csv).unwrap();
        assert_eq!(csv, "name,value\na,1\nb,2\n");

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&files.json).unwrap()).unwrap();
        assert_eq!(json["rows"][1][0], "b");
    }

    #[test]
    fn empty_table_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());
        let path = writer.write_table("empty", &Table { rows: vec![] }).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "name,value\n");
    }

    #[test]
    fn unwritable_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let writer = ReportWriter::new(blocker.join("sub"));
        let err = writer.write_table("t", &Table { rows: vec![] }).unwrap_err();
        assert!(matches!(err, OutputWriteError::Io { .. }));
    }
}

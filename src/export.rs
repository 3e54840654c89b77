//! CSV export of the final ledger.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::harvest::LedgerEntry;

/// Consumes the final ledger snapshot and produces the report artifact.
pub trait ExportSink {
    fn write(&mut self, entries: &[LedgerEntry]) -> Result<()>;
}

/// Writes the report as CSV, one row per student:
/// `S-number,Programmingsignoffs,Designsignoffs`.
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_to<W: Write>(writer: W, entries: &[LedgerEntry]) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["S-number", "Programmingsignoffs", "Designsignoffs"])?;

        for entry in entries {
            let programming = entry.programming_points.to_string();
            let design = entry.design_points.to_string();
            csv.write_record([entry.student_number.as_str(), &programming, &design])?;
        }

        csv.flush()?;
        Ok(())
    }
}

impl ExportSink for CsvExporter {
    fn write(&mut self, entries: &[LedgerEntry]) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("failed to create {}", self.path.display()))?;
        Self::write_to(file, entries)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

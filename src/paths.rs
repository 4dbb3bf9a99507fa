//! Per-run output layout.
//!
//! Raw downloads accumulate under `<out>/raw/`; each run's reports land in a
//! fresh `<out>/<timestamp>/` directory so earlier runs are never overwritten.

use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory and file layout for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub out_dir: PathBuf,
    pub raw_dir: PathBuf,
    pub report_dir: PathBuf,
    pub billing_file: PathBuf,
}

impl RunPaths {
    pub fn new(out_dir: &Path, timestamp: &str) -> Self {
        let raw_dir = out_dir.join("raw");
        let report_dir = out_dir.join(timestamp);
        let billing_file = raw_dir.join(format!("{timestamp}.billing.csv"));
        Self {
            out_dir: out_dir.to_path_buf(),
            raw_dir,
            report_dir,
            billing_file,
        }
    }

    /// Creates the output root, raw-download and report directories,
    /// create-if-absent.
    pub fn create_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;
        fs::create_dir_all(&self.raw_dir)?;
        fs::create_dir_all(&self.report_dir)?;
        Ok(())
    }
}

/// Timestamp label that namespaces one run's output, local time.
pub fn run_timestamp() -> String {
    Local::now().format("%Y%m%dT%H%M%S").to_string()
}

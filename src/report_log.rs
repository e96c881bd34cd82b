//! Per-graph report log
//!
//! Every report is appended to `<dir>/log_graphNN.txt` (two-digit graph index) below a
//! timestamped header line. Writes are serialized by a lock so that concurrent callers never
//! interleave their reports.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use crate::error::Result;

/// Appends timestamped reports to per-graph text files
#[derive(Debug)]
pub struct ReportLog {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl ReportLog {
    /// Creates a log writing into `dir`; the directory is created on first use
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file receiving the reports of graph `graph_index`
    pub fn path_for(&self, graph_index: u32) -> PathBuf {
        self.dir.join(format!("log_graph{:02}.txt", graph_index))
    }

    /// Appends `report` under a header with the current local time and returns the file path
    pub fn append(&self, graph_index: u32, report: &str) -> Result<PathBuf> {
        self.append_at(graph_index, report, Local::now().naive_local())
    }

    /// Appends `report` under a header with the given timestamp and returns the file path
    pub fn append_at(&self, graph_index: u32, report: &str, at: NaiveDateTime) -> Result<PathBuf> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(graph_index);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

        writeln!(file, "{}", header_line(at))?;
        write!(file, "{}", report)?;
        if !report.ends_with('\n') {
            writeln!(file)?;
        }
        writeln!(file)?;

        debug!(path = %path.display(), bytes = report.len(), "appended report");
        Ok(path)
    }
}

/// Formats the header line preceding every report
pub fn header_line(at: NaiveDateTime) -> String {
    format!("=== REPORT GENERATED AT {} ===", at.format("%d/%m/%Y %H:%M:%S"))
}

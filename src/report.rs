// Run report logging
//
// Appends one JSON line per worker report to a file when enabled. Write
// failures are logged and otherwise ignored so a broken report file never
// stops a search run.

use log::error;
use parking_lot::Mutex;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Arc;

use crate::driver::WorkerReport;

/// Represents a single report line
#[derive(Debug, Serialize)]
struct ReportEntry<'a> {
    rows: usize,
    columns: usize,
    budget_secs: u64,
    worker: &'a WorkerReport,
    timestamp: String,
}

/// Shared report writer
#[derive(Clone)]
pub struct RunReporter {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl RunReporter {
    /// Creates a new reporter
    /// If enabled is true, initializes the report file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("Run report enabled: {}", log_file_path);
                RunReporter {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create run report file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled reporter (no-op)
    pub fn disabled() -> Self {
        RunReporter {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Appends one worker report
    pub fn log_worker(&self, rows: usize, columns: usize, budget_secs: u64, worker: &WorkerReport) {
        if !self.enabled {
            return;
        }

        let entry = ReportEntry {
            rows,
            columns,
            budget_secs,
            worker,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let json_line = match serde_json::to_string(&entry) {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to serialize run report entry: {}", e);
                return;
            }
        };

        let mut file_guard = self.file.lock();
        if let Some(file) = file_guard.as_mut() {
            if let Err(e) = writeln!(file, "{}", json_line) {
                error!("Failed to write run report entry: {}", e);
            } else if let Err(e) = file.flush() {
                error!("Failed to flush run report: {}", e);
            }
        }
    }
}

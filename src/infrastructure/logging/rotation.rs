//! Retention cleanup for rotated log files.
//!
//! The rolling appender creates timestamped files; this module deletes those
//! older than the retention window. Runs synchronously at startup.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Deletes rotated log files older than the retention window.
#[derive(Debug, Clone, Copy)]
pub struct LogPruner {
    retention_days: u32,
}

impl LogPruner {
    /// Create a pruner keeping `retention_days` days of files.
    pub const fn new(retention_days: u32) -> Self {
        Self { retention_days }
    }

    /// Delete log files in `log_dir` older than the retention cutoff.
    ///
    /// Only files whose extension starts with `log` are considered, which
    /// covers both live files (`groundwork.log`) and rotated ones
    /// (`groundwork.log.2026-08-07`).
    ///
    /// # Returns
    /// Number of files deleted.
    pub fn prune(&self, log_dir: impl AsRef<Path>) -> Result<usize> {
        let log_dir = log_dir.as_ref();

        if !log_dir.exists() {
            debug!(path = %log_dir.display(), "log directory does not exist, nothing to prune");
            return Ok(0);
        }

        let cutoff = Utc::now() - Duration::days(i64::from(self.retention_days));
        let mut deleted_count = 0;

        let entries = fs::read_dir(log_dir).context("failed to read log directory")?;

        for entry in entries {
            let entry = entry.context("failed to read directory entry")?;
            let path = entry.path();

            if !is_log_file(&path) {
                continue;
            }

            let metadata = fs::metadata(&path).context("failed to get file metadata")?;
            let modified = metadata
                .modified()
                .context("failed to get file modification time")?;
            let modified_dt: DateTime<Utc> = modified.into();

            if modified_dt < cutoff {
                fs::remove_file(&path).context("failed to delete old log file")?;
                info!(
                    path = %path.display(),
                    age_days = (Utc::now() - modified_dt).num_days(),
                    "deleted old log file"
                );
                deleted_count += 1;
            }
        }

        if deleted_count > 0 {
            info!(count = deleted_count, "pruned old log files");
        }

        Ok(deleted_count)
    }

    /// Prune, reporting failure as a warning rather than an error. Cleanup
    /// must never block startup.
    pub fn prune_best_effort(&self, log_dir: impl AsRef<Path>) {
        if let Err(err) = self.prune(&log_dir) {
            warn!(error = %err, "log retention cleanup failed");
        }
    }
}

// Rotated files look like `groundwork.log.2026-08-07`, so match any
// extension beginning with "log" as well as the timestamp suffix case
// where the extension is the date itself.
fn is_log_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.contains(".log")
}

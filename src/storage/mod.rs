//! Session report export.
//!
//! A finished session (summary plus every iteration) is written as pretty
//! JSON. The target may be a file or a directory; a directory gets a
//! timestamped file name so repeated runs never clobber each other.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::engine::miner::SessionReport;

/// File name used when the export target is a directory.
pub fn report_file_name(report: &SessionReport) -> String {
    format!(
        "qrisc_session_{}.json",
        report.completed_at.format("%Y%m%d_%H%M%S")
    )
}

/// Resolve the final file path for an export target.
pub fn resolve_target(report: &SessionReport, target: &Path) -> PathBuf {
    if target.is_dir() {
        target.join(report_file_name(report))
    } else {
        target.to_path_buf()
    }
}

/// Export a session report and return the path it was written to.
///
/// Missing parent directories are created. The JSON goes to a `.tmp`
/// sibling first and is renamed into place, so readers never see a
/// partial report.
pub fn save_report(report: &SessionReport, target: &Path) -> Result<PathBuf> {
    let path = resolve_target(report, target);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory {}", parent.display()))?;
    }

    let json = serde_json::to_vec_pretty(report).context("Failed to serialise session report")?;

    let mut tmp = path.clone().into_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    std::fs::write(&tmp, &json)
        .with_context(|| format!("Failed to write session report to {}", tmp.display()))?;
    if let Err(e) = std::fs::rename(&tmp, &path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("Failed to move session report to {}", path.display()));
    }

    info!(
        path = %path.display(),
        bytes = json.len(),
        iterations = report.iterations.len(),
        interrupted = report.interrupted,
        "Session report exported"
    );
    Ok(path)
}

/// Read an exported session report back.
pub fn load_report(path: &Path) -> Result<SessionReport> {
    if !path.is_file() {
        bail!("Session report {} does not exist", path.display());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read session report from {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse session report from {}", path.display()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

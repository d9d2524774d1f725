//! Machine-readable summary of one harness run.

use std::path::Path;

use crate::foundation::error::{BlitError, BlitResult};
use crate::harness::driver::{HarnessKind, RunMode};
use crate::oracle::golden::CheckpointMismatch;

/// What a run did and whether it passed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RunReport {
    /// Which harness ran.
    pub harness: HarnessKind,
    /// Engine name.
    pub engine: String,
    /// Iteration range and checking mode.
    pub mode: RunMode,
    /// Iterations completed.
    pub iterations_run: usize,
    /// Golden checkpoints compared.
    pub checkpoints_checked: usize,
    /// Every failed checkpoint, in iteration order.
    pub mismatches: Vec<CheckpointMismatch>,
    /// Operations the engine declined to run.
    pub declined: usize,
    /// Running digest after the last iteration (zero in single-iteration mode).
    pub final_digest: u32,
}

impl RunReport {
    /// `true` unless a checked run hit a mismatch.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> BlitResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BlitError::serde(e.to_string()))
    }

    /// Write the JSON form to `path`, creating parent directories.
    pub fn write_json(&self, path: &Path) -> BlitResult<()> {
        use anyhow::Context as _;

        let json = self.to_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create report dir '{}'", parent.display()))?;
        }
        std::fs::write(path, json).with_context(|| format!("write report '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/harness/report.rs"]
mod tests;

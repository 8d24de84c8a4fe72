use std::path::PathBuf;

use crate::checker::Finding;
use crate::walker::{AppliedRename, RenameFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Check,
    Rename,
}

/// Aggregated outcome of one invocation, consumed by the output formatters.
///
/// `check` fills only `findings`; `rename` also carries what was mutated and
/// what could not be, plus the residual findings of the post-rename
/// path-length re-validation (renaming is one pass, not a fix point).
#[derive(Debug, Clone)]
pub struct Report {
    pub mode: ReportMode,
    pub findings: Vec<Finding>,
    pub renames: Vec<AppliedRename>,
    pub removed_dirs: Vec<PathBuf>,
    pub failures: Vec<RenameFailure>,
    pub residual: Vec<Finding>,
}

impl Report {
    #[must_use]
    pub const fn check(findings: Vec<Finding>) -> Self {
        Self {
            mode: ReportMode::Check,
            findings,
            renames: Vec::new(),
            removed_dirs: Vec::new(),
            failures: Vec::new(),
            residual: Vec::new(),
        }
    }

    #[must_use]
    pub const fn rename(
        findings: Vec<Finding>,
        renames: Vec<AppliedRename>,
        removed_dirs: Vec<PathBuf>,
        failures: Vec<RenameFailure>,
        residual: Vec<Finding>,
    ) -> Self {
        Self {
            mode: ReportMode::Rename,
            findings,
            renames,
            removed_dirs,
            failures,
            residual,
        }
    }

    /// Whether anything remains wrong: detected findings, failed mutations,
    /// or residual overlength paths. Drives the exit code.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty() || !self.failures.is_empty() || !self.residual.is_empty()
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

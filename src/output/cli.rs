use std::collections::HashSet;
use std::fmt::Write;

use crate::checker::{CharOccurrence, Finding, FindingKind};
use crate::error::Result;
use crate::report::{Report, ReportMode};

use super::ReportFormatter;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Human-readable output; offending characters are marked inline in red.
pub struct CliFormatter {
    use_colors: bool,
    verbose: u8,
}

impl CliFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    /// Render a path with the recorded character positions marked in bold
    /// red. Positions are character indices into the displayed path string.
    fn highlight_path(&self, path: &str, occurrences: &[CharOccurrence]) -> String {
        if !self.use_colors {
            return path.to_string();
        }

        let positions: HashSet<usize> = occurrences.iter().map(|occ| occ.position).collect();
        let mut out = String::with_capacity(path.len());
        for (index, c) in path.chars().enumerate() {
            if positions.contains(&index) {
                let _ = write!(out, "{}{}{c}{}", ansi::BOLD, ansi::RED, ansi::RESET);
            } else {
                out.push(c);
            }
        }
        out
    }

    fn format_finding(&self, finding: &Finding, out: &mut String) {
        let label = finding.kind_label().to_uppercase();
        match &finding.kind {
            FindingKind::InvalidCharacters { occurrences } => {
                let path = self.highlight_path(&finding.path.display().to_string(), occurrences);
                let _ = writeln!(out, "✗ {}: {path}", self.colorize(&label, ansi::RED));
                let _ = writeln!(out, "   {}", finding.detail());
            }
            FindingKind::EmptyDirectory => {
                let _ = writeln!(
                    out,
                    "⚠ {}: {}",
                    self.colorize(&label, ansi::YELLOW),
                    finding.path.display()
                );
            }
            FindingKind::PathTooLong { .. }
            | FindingKind::RenameCollision { .. }
            | FindingKind::RenameFailed { .. } => {
                let _ = writeln!(
                    out,
                    "✗ {}: {}",
                    self.colorize(&label, ansi::RED),
                    finding.path.display()
                );
                let _ = writeln!(out, "   {}", finding.detail());
            }
        }
    }

    fn format_check(&self, report: &Report, out: &mut String) {
        for finding in &report.findings {
            self.format_finding(finding, out);
        }

        if report.findings.is_empty() {
            let _ = writeln!(out, "{}", self.colorize("✓ All paths comply", ansi::GREEN));
        } else {
            let _ = writeln!(out, "{} finding(s)", report.findings.len());
        }
    }

    fn format_rename(&self, report: &Report, out: &mut String) {
        if self.verbose > 0 {
            for rename in &report.renames {
                let _ = writeln!(
                    out,
                    "→ {}: {} -> {}",
                    self.colorize("RENAMED", ansi::GREEN),
                    rename.from.display(),
                    rename.to.display()
                );
            }
        }

        for removed in &report.removed_dirs {
            let _ = writeln!(
                out,
                "⊘ {}: {}",
                self.colorize("REMOVED", ansi::CYAN),
                removed.display()
            );
        }

        for finding in &report.findings {
            self.format_finding(finding, out);
        }
        for failure in &report.failures {
            let _ = writeln!(
                out,
                "✗ {}: {}",
                self.colorize("RENAME_FAILED", ansi::RED),
                failure.path.display()
            );
            let _ = writeln!(out, "   {}", failure.reason);
        }
        for finding in &report.residual {
            self.format_finding(finding, out);
        }

        let _ = writeln!(
            out,
            "Renamed {} entr(ies), removed {} director(ies), {} failure(s), {} remaining finding(s)",
            report.renames.len(),
            report.removed_dirs.len(),
            report.failures.len(),
            report.findings.len() + report.residual.len()
        );
    }
}

impl ReportFormatter for CliFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let mut out = String::new();
        match report.mode {
            ReportMode::Check => self.format_check(report, &mut out),
            ReportMode::Rename => self.format_rename(report, &mut out),
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

use std::path::PathBuf;

use super::*;
use crate::checker::{CharOccurrence, Finding, FindingKind};
use crate::report::Report;
use crate::walker::{AppliedRename, RenameFailure};

fn formatter() -> CliFormatter {
    CliFormatter::new(ColorMode::Never)
}

fn colored() -> CliFormatter {
    CliFormatter::new(ColorMode::Always)
}

fn invalid_finding() -> Finding {
    Finding {
        path: PathBuf::from("/base/a<b.txt"),
        kind: FindingKind::InvalidCharacters {
            occurrences: vec![CharOccurrence {
                character: '<',
                position: 7,
            }],
        },
    }
}

#[test]
fn clean_check_reports_compliance() {
    let output = formatter().format(&Report::check(Vec::new())).unwrap();
    assert!(output.contains("All paths comply"));
}

#[test]
fn check_findings_are_listed_with_details() {
    let report = Report::check(vec![
        invalid_finding(),
        Finding {
            path: PathBuf::from("/base/too-long"),
            kind: FindingKind::PathTooLong {
                length: 270,
                limit: 260,
            },
        },
    ]);

    let output = formatter().format(&report).unwrap();
    assert!(output.contains("INVALID_CHARACTER: /base/a<b.txt"));
    assert!(output.contains("'<' at 7"));
    assert!(output.contains("PATH_TOO_LONG: /base/too-long"));
    assert!(output.contains("exceeds limit 260 by 10"));
    assert!(output.contains("2 finding(s)"));
}

#[test]
fn empty_dir_findings_use_warning_marker() {
    let report = Report::check(vec![Finding {
        path: PathBuf::from("/base/empty"),
        kind: FindingKind::EmptyDirectory,
    }]);

    let output = formatter().format(&report).unwrap();
    assert!(output.contains("⚠ EMPTY_DIR: /base/empty"));
}

#[test]
fn colors_mark_offending_characters_inline() {
    let report = Report::check(vec![invalid_finding()]);
    let output = colored().format(&report).unwrap();
    // The '<' at position 7 is wrapped in bold red.
    assert!(output.contains("\x1b[1m\x1b[31m<\x1b[0m"));
}

#[test]
fn no_color_output_has_no_escape_codes() {
    let report = Report::check(vec![invalid_finding()]);
    let output = formatter().format(&report).unwrap();
    assert!(!output.contains('\x1b'));
}

#[test]
fn rename_summary_counts_everything() {
    let report = Report::rename(
        Vec::new(),
        vec![AppliedRename {
            node: 1,
            from: PathBuf::from("/base/a<.txt"),
            to: PathBuf::from("/base/a_.txt"),
        }],
        vec![PathBuf::from("/base/empty")],
        vec![RenameFailure {
            path: PathBuf::from("/base/stuck.txt"),
            reason: "permission denied".to_string(),
        }],
        Vec::new(),
    );

    let output = formatter().format(&report).unwrap();
    assert!(output.contains("⊘ REMOVED: /base/empty"));
    assert!(output.contains("RENAME_FAILED: /base/stuck.txt"));
    assert!(output.contains("permission denied"));
    assert!(output.contains("Renamed 1 entr(ies), removed 1 director(ies), 1 failure(s)"));
}

#[test]
fn rename_list_appears_only_when_verbose() {
    let report = Report::rename(
        Vec::new(),
        vec![AppliedRename {
            node: 1,
            from: PathBuf::from("/base/a<.txt"),
            to: PathBuf::from("/base/a_.txt"),
        }],
        Vec::new(),
        Vec::new(),
        Vec::new(),
    );

    let quiet = formatter().format(&report).unwrap();
    assert!(!quiet.contains("RENAMED:"));

    let verbose = CliFormatter::with_verbose(ColorMode::Never, 1)
        .format(&report)
        .unwrap();
    assert!(verbose.contains("RENAMED: /base/a<.txt -> /base/a_.txt"));
}

#[test]
fn collisions_and_residuals_are_reported() {
    let report = Report::rename(
        vec![Finding {
            path: PathBuf::from("/base"),
            kind: FindingKind::RenameCollision {
                target_name: "a_.txt".to_string(),
            },
        }],
        Vec::new(),
        Vec::new(),
        Vec::new(),
        vec![Finding {
            path: PathBuf::from("/base/still-long"),
            kind: FindingKind::PathTooLong {
                length: 280,
                limit: 260,
            },
        }],
    );

    let output = formatter().format(&report).unwrap();
    assert!(output.contains("RENAME_COLLISION: /base"));
    assert!(output.contains("\"a_.txt\""));
    assert!(output.contains("PATH_TOO_LONG: /base/still-long"));
    assert!(output.contains("2 remaining finding(s)"));
}

use std::fmt::Write;

use crate::checker::Finding;
use crate::error::Result;
use crate::report::Report;

use super::ReportFormatter;

/// CSV output with the stable column order `path,finding_kind,detail`.
pub struct CsvFormatter;

impl ReportFormatter for CsvFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let mut out = String::from("path,finding_kind,detail\n");

        for finding in &report.findings {
            write_finding(&mut out, finding);
        }
        for failure in &report.failures {
            write_row(
                &mut out,
                &failure.path.display().to_string(),
                "rename_failed",
                &failure.reason,
            );
        }
        for finding in &report.residual {
            write_finding(&mut out, finding);
        }

        Ok(out)
    }
}

fn write_finding(out: &mut String, finding: &Finding) {
    write_row(
        out,
        &finding.path.display().to_string(),
        finding.kind_label(),
        &finding.detail(),
    );
}

fn write_row(out: &mut String, path: &str, kind: &str, detail: &str) {
    let _ = writeln!(out, "{},{},{}", escape(path), escape(kind), escape(detail));
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
#[path = "csv_tests.rs"]
mod tests;

use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use webloc_core::RunReport;

/// Human-readable run summary. Failed and quarantined paths are listed
/// literally so they can be handled by hand.
pub fn render_summary(report: &RunReport, finished_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    let mode = if report.dry_run { " (dry run)" } else { "" };
    let _ = writeln!(
        out,
        "webloc_tidy finished at {}{}",
        finished_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        mode
    );
    if report.cancelled {
        let _ = writeln!(out, "cancelled before any change was made");
    }

    let removed = report.duplicates.iter().filter(|d| d.removed).count();
    let _ = writeln!(out, "processed:   {}", report.processed);
    let _ = writeln!(out, "duplicates:  {} ({} removed)", report.duplicate_count(), removed);
    if report.dry_run {
        let _ = writeln!(out, "would rename: {}", report.would_rename.len());
    } else {
        let _ = writeln!(out, "renamed:     {}", report.renamed_count());
    }
    let _ = writeln!(out, "unchanged:   {}", report.skipped.len());
    if !report.degraded.is_empty() {
        let _ = writeln!(out, "kept name:   {}", report.degraded.len());
    }
    let _ = writeln!(out, "failed:      {}", report.failed_count());
    let _ = writeln!(out, "quarantined: {}", report.quarantined_count());

    for entry in &report.would_rename {
        let _ = writeln!(
            out,
            "Would rename: '{}' -> '{}'",
            entry.from.display(),
            entry.to.display()
        );
    }
    if !report.failed.is_empty() {
        let _ = writeln!(out, "\nFailed:");
        for failure in &report.failed {
            let _ = writeln!(out, "  {}: {}", failure.path.display(), failure.reason);
        }
    }
    if !report.quarantined.is_empty() {
        let _ = writeln!(out, "\nQuarantined:");
        for path in &report.quarantined {
            let _ = writeln!(out, "  {}", path.display());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::TimeZone;
    use webloc_core::{FailureEntry, RenameEntry};

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn dry_run_lists_intended_renames() {
        let mut report = RunReport::new(true);
        report.processed = 4;
        report.would_rename.push(RenameEntry {
            from: PathBuf::from("/l/a.webloc"),
            to: PathBuf::from("/l/b.webloc"),
        });
        report.quarantined.push(PathBuf::from("/l/q.webloc"));

        let text = render_summary(&report, at());
        assert!(text.starts_with("webloc_tidy finished at 2024-05-01T12:00:00Z (dry run)\n"));
        assert!(text.contains("would rename: 1\n"));
        assert!(text.contains("Would rename: '/l/a.webloc' -> '/l/b.webloc'\n"));
        assert!(text.contains("\nQuarantined:\n  /l/q.webloc\n"));
    }

    #[test]
    fn failures_are_listed_with_reason() {
        let mut report = RunReport::new(false);
        report.failed.push(FailureEntry {
            path: PathBuf::from("/l/x.webloc"),
            reason: "permission denied".into(),
        });
        let text = render_summary(&report, at());
        assert!(text.contains("renamed:     0\n"));
        assert!(text.contains("\nFailed:\n  /l/x.webloc: permission denied\n"));
    }
}

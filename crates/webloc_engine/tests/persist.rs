use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use webloc_core::{FailureEntry, RunReport};
use webloc_engine::{write_atomically, write_remediation_script, write_report_json};

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("report.json");

    write_atomically(&target, "first").unwrap();
    let written = write_atomically(&target, "second").unwrap();
    assert_eq!(written, target);
    assert_eq!(fs::read_to_string(&target).unwrap(), "second");

    let leftovers = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn atomic_write_creates_missing_directory() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("out").join("report.json");
    write_atomically(&target, "{}").unwrap();
    assert!(target.is_file());
}

#[test]
fn no_partial_file_when_parent_is_a_file() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let result = write_atomically(&blocker.join("report.json"), "data");
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
}

#[test]
fn report_json_lists_quarantined_paths() {
    let temp = TempDir::new().unwrap();
    let mut report = RunReport::new(false);
    report.processed = 2;
    report.quarantined.push(PathBuf::from("/links/stuck.webloc"));

    let target = write_report_json(&temp.path().join("report.json"), &report).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(target).unwrap()).unwrap();
    assert_eq!(json["processed"], 2);
    assert_eq!(json["quarantined"][0], "/links/stuck.webloc");
    assert_eq!(json["cancelled"], false);
}

#[test]
fn remediation_script_covers_failed_and_quarantined() {
    let temp = TempDir::new().unwrap();
    let mut report = RunReport::new(false);
    report.failed.push(FailureEntry {
        path: PathBuf::from("/links/it's.webloc"),
        reason: "denied".into(),
    });
    report.quarantined.push(PathBuf::from("/links/stuck.webloc"));

    let script = write_remediation_script(
        &temp.path().join("remediate.sh"),
        &report.remediation_paths(),
    )
    .unwrap();
    let text = fs::read_to_string(&script).unwrap();
    assert!(text.contains(r#"mv -n -- '/links/it'\''s.webloc' "$FOLDER"/"#));
    assert!(text.contains(r#"mv -n -- '/links/stuck.webloc' "$FOLDER"/"#));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&script).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}

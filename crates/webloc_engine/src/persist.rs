use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use webloc_core::RunReport;

/// Folder the remediation script moves problem shortcuts into.
pub const REMEDIATION_FOLDER: &str = "FAILED_INSTANCE_FOLDER";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes `content` to `target` through a temp file in the same directory,
/// so readers see either the old file or the complete new one.
pub fn write_atomically(target: &Path, content: &str) -> Result<PathBuf, PersistError> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !dir.is_dir() {
        fs::create_dir_all(&dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(target).map_err(|e| PersistError::Io(e.error))?;
    Ok(target.to_path_buf())
}

pub fn write_report_json(target: &Path, report: &RunReport) -> Result<PathBuf, PersistError> {
    let json = serde_json::to_string_pretty(report)?;
    write_atomically(target, &json)
}

/// POSIX shell script moving every failed and quarantined shortcut into
/// [`REMEDIATION_FOLDER`].
pub fn render_remediation_script(paths: &[PathBuf]) -> String {
    let mut script = String::from("#!/bin/sh\nset -u\n");
    script.push_str(&format!("FOLDER={}\n", shell_quote(REMEDIATION_FOLDER)));
    script.push_str("mkdir -p \"$FOLDER\"\n");
    for path in paths {
        script.push_str(&format!(
            "mv -n -- {} \"$FOLDER\"/\n",
            shell_quote(&path.to_string_lossy())
        ));
    }
    script
}

pub fn write_remediation_script(target: &Path, paths: &[PathBuf]) -> Result<PathBuf, PersistError> {
    let written = write_atomically(target, &render_remediation_script(paths))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&written, fs::Permissions::from_mode(0o755))?;
    }
    Ok(written)
}

fn shell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_quotes_are_escaped() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn script_moves_each_path() {
        let script = render_remediation_script(&[
            PathBuf::from("/links/a b.webloc"),
            PathBuf::from("/links/c.webloc"),
        ]);
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains("FOLDER='FAILED_INSTANCE_FOLDER'\n"));
        assert!(script.contains("mv -n -- '/links/a b.webloc' \"$FOLDER\"/\n"));
        assert!(script.contains("mv -n -- '/links/c.webloc' \"$FOLDER\"/\n"));
    }
}

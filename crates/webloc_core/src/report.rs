use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateEntry {
    pub path: PathBuf,
    pub duplicate_of: PathBuf,
    pub removed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameEntry {
    pub from: PathBuf,
    pub to: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything a run did or would have done, accumulated by the pipeline and
/// rendered by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub dry_run: bool,
    pub cancelled: bool,
    pub processed: usize,
    pub duplicates: Vec<DuplicateEntry>,
    pub renamed: Vec<RenameEntry>,
    /// Renames a dry run would have performed.
    pub would_rename: Vec<RenameEntry>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<FailureEntry>,
    pub quarantined: Vec<PathBuf>,
    /// Records the simplification service gave no usable name; they keep their prior name.
    pub degraded: Vec<PathBuf>,
}

impl RunReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len()
    }

    pub fn renamed_count(&self) -> usize {
        self.renamed.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn quarantined_count(&self) -> usize {
        self.quarantined.len()
    }

    /// Paths that need manual attention: failures first, then quarantined records.
    pub fn remediation_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.failed.iter().map(|f| f.path.clone()).collect();
        for path in &self.quarantined {
            if !paths.contains(path) {
                paths.push(path.clone());
            }
        }
        paths
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.quarantined.is_empty()
    }
}

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Index of a record in the run's record list. Batches and the quarantine
/// refer to records through this id instead of holding copies.
pub type RecordId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordStatus {
    Pending,
    Duplicate,
    Named,
    Renamed,
    Failed,
}

impl RecordStatus {
    /// Forward-only lifecycle: `Pending -> {Duplicate | Named -> Renamed | Failed}`.
    pub fn can_advance_to(self, next: RecordStatus) -> bool {
        use RecordStatus::*;
        matches!(
            (self, next),
            (Pending, Duplicate)
                | (Pending, Named)
                | (Pending, Failed)
                | (Named, Renamed)
                | (Named, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RecordStatus::Duplicate | RecordStatus::Renamed | RecordStatus::Failed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("illegal status transition {from:?} -> {to:?} for {path}")]
pub struct TransitionError {
    pub path: String,
    pub from: RecordStatus,
    pub to: RecordStatus,
}

/// One shortcut file on disk and what the pipeline has learned about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutRecord {
    path: PathBuf,
    canonical_url: String,
    raw_title: Option<String>,
    final_name: Option<String>,
    status: RecordStatus,
}

impl ShortcutRecord {
    pub fn new(path: impl Into<PathBuf>, canonical_url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            canonical_url: canonical_url.into(),
            raw_title: None,
            final_name: None,
            status: RecordStatus::Pending,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn canonical_url(&self) -> &str {
        &self.canonical_url
    }

    pub fn raw_title(&self) -> Option<&str> {
        self.raw_title.as_deref()
    }

    pub fn final_name(&self) -> Option<&str> {
        self.final_name.as_deref()
    }

    pub fn status(&self) -> RecordStatus {
        self.status
    }

    /// File name without its extension, as currently on disk.
    pub fn current_stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Extension including the leading dot (`".webloc"`), or empty.
    pub fn extension_with_dot(&self) -> String {
        self.path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    }

    /// Length in characters of the directory holding this shortcut.
    pub fn directory_len(&self) -> usize {
        self.path
            .parent()
            .map(|dir| dir.to_string_lossy().chars().count())
            .unwrap_or(0)
    }

    /// Title is recorded at most once; later resolutions are ignored.
    pub fn set_raw_title(&mut self, title: impl Into<String>) {
        if self.raw_title.is_none() {
            self.raw_title = Some(title.into());
        }
    }

    pub fn mark_duplicate(&mut self) -> Result<(), TransitionError> {
        self.advance(RecordStatus::Duplicate)
    }

    pub fn mark_named(&mut self, final_name: impl Into<String>) -> Result<(), TransitionError> {
        self.advance(RecordStatus::Named)?;
        self.final_name = Some(final_name.into());
        Ok(())
    }

    pub fn mark_renamed(&mut self, new_path: impl Into<PathBuf>) -> Result<(), TransitionError> {
        self.advance(RecordStatus::Renamed)?;
        self.path = new_path.into();
        Ok(())
    }

    pub fn mark_failed(&mut self) -> Result<(), TransitionError> {
        self.advance(RecordStatus::Failed)
    }

    fn advance(&mut self, next: RecordStatus) -> Result<(), TransitionError> {
        if !self.status.can_advance_to(next) {
            return Err(TransitionError {
                path: self.path.display().to_string(),
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

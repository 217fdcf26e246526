use std::collections::HashSet;
use std::path::{Path, PathBuf};

use engine_logging::{engine_info, engine_warn};
use webloc_core::{max_name_len, RecordStatus, ShortcutRecord, PLATFORM_PATH_LIMIT};

use crate::fs::FileSystem;

/// Whole-file-name length (extension included) applied when a name still
/// exceeds the platform limit after sanitizing.
pub const HARD_TRUNCATE_LEN: usize = 250;

const MAX_COLLISION_TAG: usize = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    Apply,
    DryRun,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Renamed(PathBuf),
    /// Dry-run report of the rename that would have happened.
    WouldRename(PathBuf),
    Skipped,
    Failed(String),
}

/// Applies final names to the filesystem, one record at a time. A failure
/// is confined to its record.
pub struct RenameExecutor<'a> {
    fs: &'a dyn FileSystem,
    mode: CommitMode,
    claimed: HashSet<PathBuf>,
}

impl<'a> RenameExecutor<'a> {
    pub fn new(fs: &'a dyn FileSystem, mode: CommitMode) -> Self {
        Self {
            fs,
            mode,
            claimed: HashSet::new(),
        }
    }

    pub fn commit(&mut self, record: &mut ShortcutRecord) -> Outcome {
        if record.status() != RecordStatus::Named {
            return Outcome::Skipped;
        }
        let Some(final_name) = record.final_name().filter(|n| !n.trim().is_empty()) else {
            return Outcome::Skipped;
        };

        let source = record.path().to_path_buf();
        let dir = source.parent().map(Path::to_path_buf).unwrap_or_default();
        let ext = record.extension_with_dot();
        let dir_len = record.directory_len();

        let Some(destination) = self.free_destination(&dir, final_name, &ext, dir_len, &source) else {
            let reason = format!("no free name for '{final_name}{ext}'");
            engine_warn!("{}: {}", source.display(), reason);
            return fail(record, reason);
        };
        if destination == source {
            self.claimed.insert(source);
            return Outcome::Skipped;
        }

        match self.mode {
            CommitMode::DryRun => {
                engine_info!("would rename '{}' -> '{}'", source.display(), destination.display());
                self.claimed.insert(destination.clone());
                Outcome::WouldRename(destination)
            }
            CommitMode::Apply => match self.fs.rename(&source, &destination) {
                Ok(()) => {
                    engine_info!("renamed '{}' -> '{}'", source.display(), destination.display());
                    self.claimed.insert(destination.clone());
                    match record.mark_renamed(destination.clone()) {
                        Ok(()) => Outcome::Renamed(destination),
                        Err(err) => Outcome::Failed(err.to_string()),
                    }
                }
                Err(err) => {
                    engine_warn!("rename of '{}' failed: {}", source.display(), err);
                    fail(record, err.to_string())
                }
            },
        }
    }

    /// First untaken name among `stem`, `stem (2)` .. `stem (99)`. The source
    /// itself counts as free: a file already at one of them stays put.
    fn free_destination(
        &self,
        dir: &Path,
        stem: &str,
        ext: &str,
        dir_len: usize,
        source: &Path,
    ) -> Option<PathBuf> {
        let tags = std::iter::once(String::new())
            .chain((2..=MAX_COLLISION_TAG).map(|n| format!(" ({n})")));
        for tag in tags {
            let candidate = dir.join(fit_file_name(stem, &tag, ext, dir_len));
            if candidate == source {
                return Some(candidate);
            }
            let taken = self.claimed.contains(&candidate)
                || (self.fs.exists(&candidate) && !same_name_ignoring_case(&candidate, source));
            if !taken {
                return Some(candidate);
            }
        }
        None
    }
}

fn fail(record: &mut ShortcutRecord, reason: String) -> Outcome {
    match record.mark_failed() {
        Ok(()) => Outcome::Failed(reason),
        Err(err) => Outcome::Failed(format!("{reason}; {err}")),
    }
}

/// Joins name parts. A collision tag takes its room from the stem so the name
/// stays within the directory's budget; a name still over the platform limit is
/// cut so that the whole name fits in [`HARD_TRUNCATE_LEN`].
pub fn fit_file_name(stem: &str, tag: &str, ext: &str, directory_len: usize) -> String {
    let tag_len = tag.chars().count();
    let ext_len = ext.chars().count();
    let budget = max_name_len(ext_len, directory_len);
    let stem = if tag_len > 0 && stem.chars().count() + tag_len > budget {
        let cut: String = stem.chars().take(budget.saturating_sub(tag_len)).collect();
        cut.trim_end().to_string()
    } else {
        stem.to_string()
    };

    let name = format!("{stem}{tag}{ext}");
    if name.chars().count() <= PLATFORM_PATH_LIMIT {
        return name;
    }
    let keep = HARD_TRUNCATE_LEN.saturating_sub(tag_len + ext_len);
    let stem: String = stem.chars().take(keep).collect();
    format!("{}{tag}{ext}", stem.trim_end())
}

/// Case-insensitive filesystems report a case-only rename target as existing.
fn same_name_ignoring_case(a: &Path, b: &Path) -> bool {
    a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
}

//! One normalization run over a set of scanned shortcuts.
//!
//! Stages run in order on a single task: canonicalize and dedup, resolve
//! titles, name survivors, confirm, remove duplicates, commit renames.

use std::path::PathBuf;

use engine_logging::{engine_debug, engine_info, engine_warn, set_record_position};
use webloc_core::{
    canonicalize_url, compose_final_name, compose_prefixed_name, sanitize_name, Decision, DedupStore, DuplicateEntry,
    FailureEntry, RecordId, RenameEntry, RunReport, ShortcutRecord, NAME_SEPARATOR,
};

use crate::fs::FileSystem;
use crate::rename::{CommitMode, Outcome, RenameExecutor};
use crate::resolver::{Resolution, TitleResolver};
use crate::ShortcutInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Report intended renames without touching the filesystem.
    pub dry_run: bool,
    pub remove_duplicates: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            dry_run: false,
            remove_duplicates: true,
        }
    }
}

/// Destructive operations a run is about to perform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitPlan {
    pub renames: Vec<RenameEntry>,
    pub removals: Vec<PathBuf>,
}

impl CommitPlan {
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty() && self.removals.is_empty()
    }
}

/// Last chance to abort before any file is touched.
pub trait ConfirmationGate {
    fn confirm(&mut self, plan: &CommitPlan) -> bool;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysProceed;

impl ConfirmationGate for AlwaysProceed {
    fn confirm(&mut self, _plan: &CommitPlan) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct PipelineOutput {
    pub report: RunReport,
    pub records: Vec<ShortcutRecord>,
}

pub struct Pipeline<'a> {
    settings: PipelineSettings,
    resolver: TitleResolver<'a>,
    fs: &'a dyn FileSystem,
}

impl<'a> Pipeline<'a> {
    pub fn new(settings: PipelineSettings, resolver: TitleResolver<'a>, fs: &'a dyn FileSystem) -> Self {
        Self {
            settings,
            resolver,
            fs,
        }
    }

    pub async fn run(&self, inputs: Vec<ShortcutInput>, gate: &mut dyn ConfirmationGate) -> PipelineOutput {
        let mut report = RunReport::new(self.settings.dry_run);
        report.processed = inputs.len();

        let (mut records, survivors) = dedup(inputs, &mut report);
        engine_info!(
            "{} shortcuts, {} unique, {} duplicates ({:?} naming)",
            records.len(),
            survivors.len(),
            report.duplicates.len(),
            self.resolver.strategy()
        );

        let resolution = self.resolver.resolve(&mut records, &survivors).await;
        let named = name_records(&mut records, &survivors, &resolution, &mut report);

        if self.settings.dry_run {
            self.commit(&mut records, &named, CommitMode::DryRun, &mut report);
            return PipelineOutput { report, records };
        }

        let plan = self.plan(&records, &named, &report);
        if !plan.is_empty() && !gate.confirm(&plan) {
            engine_info!("cancelled before commit; nothing changed");
            report.cancelled = true;
            return PipelineOutput { report, records };
        }

        if self.settings.remove_duplicates {
            self.remove_duplicates(&mut report);
        }
        self.commit(&mut records, &named, CommitMode::Apply, &mut report);
        PipelineOutput { report, records }
    }

    fn plan(&self, records: &[ShortcutRecord], named: &[RecordId], report: &RunReport) -> CommitPlan {
        let mut preview = RenameExecutor::new(self.fs, CommitMode::DryRun);
        let mut renames = Vec::new();
        for id in named {
            let mut copy = records[*id].clone();
            if let Outcome::WouldRename(to) = preview.commit(&mut copy) {
                renames.push(RenameEntry {
                    from: records[*id].path().to_path_buf(),
                    to,
                });
            }
        }
        let removals = if self.settings.remove_duplicates {
            report.duplicates.iter().map(|d| d.path.clone()).collect()
        } else {
            Vec::new()
        };
        CommitPlan { renames, removals }
    }

    fn remove_duplicates(&self, report: &mut RunReport) {
        for entry in report.duplicates.iter_mut() {
            match self.fs.remove(&entry.path) {
                Ok(()) => {
                    engine_info!("removed duplicate '{}'", entry.path.display());
                    entry.removed = true;
                }
                Err(err) => {
                    engine_warn!("could not remove duplicate '{}': {}", entry.path.display(), err);
                    report.failed.push(FailureEntry {
                        path: entry.path.clone(),
                        reason: format!("duplicate removal failed: {err}"),
                    });
                }
            }
        }
    }

    fn commit(
        &self,
        records: &mut [ShortcutRecord],
        named: &[RecordId],
        mode: CommitMode,
        report: &mut RunReport,
    ) {
        let mut executor = RenameExecutor::new(self.fs, mode);
        for (position, id) in named.iter().enumerate() {
            set_record_position(Some((position, named.len())));
            let record = &mut records[*id];
            let from = record.path().to_path_buf();
            match executor.commit(record) {
                Outcome::Renamed(to) => report.renamed.push(RenameEntry { from, to }),
                Outcome::WouldRename(to) => report.would_rename.push(RenameEntry { from, to }),
                Outcome::Skipped => report.skipped.push(from),
                Outcome::Failed(reason) => report.failed.push(FailureEntry { path: from, reason }),
            }
        }
        set_record_position(None);
    }
}

fn dedup(inputs: Vec<ShortcutInput>, report: &mut RunReport) -> (Vec<ShortcutRecord>, Vec<RecordId>) {
    let mut store = DedupStore::new();
    let mut records = Vec::with_capacity(inputs.len());
    let mut survivors = Vec::new();

    for input in inputs {
        let canonical = canonicalize_url(&input.url);
        if canonical != input.url.trim() {
            engine_debug!("canonical url {} -> {}", input.url, canonical);
        }
        let mut record = ShortcutRecord::new(input.path, canonical);
        match store.offer(&record) {
            Decision::First => survivors.push(records.len()),
            Decision::Duplicate { of } => {
                engine_info!("'{}' duplicates '{}'", record.path().display(), of.display());
                if let Err(err) = record.mark_duplicate() {
                    engine_warn!("{}", err);
                }
                report.duplicates.push(DuplicateEntry {
                    path: record.path().to_path_buf(),
                    duplicate_of: of,
                    removed: false,
                });
            }
        }
        records.push(record);
    }
    (records, survivors)
}

/// Computes a final name for every survivor outside the quarantine and
/// returns the ids that reached `Named`.
fn name_records(
    records: &mut [ShortcutRecord],
    survivors: &[RecordId],
    resolution: &Resolution,
    report: &mut RunReport,
) -> Vec<RecordId> {
    let mut named = Vec::new();
    for (position, id) in survivors.iter().enumerate() {
        set_record_position(Some((position, survivors.len())));
        let record = &mut records[*id];
        if resolution.quarantine.contains(*id) {
            report.quarantined.push(record.path().to_path_buf());
            continue;
        }

        let reserved = record.extension_with_dot().chars().count();
        let dir_len = record.directory_len();
        let stem = record.current_stem();
        let degraded = resolution.degraded.contains(id);
        let name = if degraded {
            report.degraded.push(record.path().to_path_buf());
            Some(sanitize_name(&stem, reserved, dir_len)).filter(|n| !n.trim().is_empty())
        } else if let Some(prefix) = resolution.prefixes.get(id) {
            let raw = record.raw_title().unwrap_or_default();
            let body = raw
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix(NAME_SEPARATOR))
                .unwrap_or(raw);
            compose_prefixed_name(record.canonical_url(), prefix, body, reserved, dir_len)
        } else {
            let raw = record.raw_title().map(str::to_string).unwrap_or(stem);
            compose_final_name(record.canonical_url(), &raw, reserved, dir_len)
        };

        match name {
            Some(name) => {
                engine_debug!("final name '{}'", name);
                match record.mark_named(name) {
                    Ok(()) => named.push(*id),
                    Err(err) => engine_warn!("{}", err),
                }
            }
            None => {
                engine_info!("no usable name for '{}', leaving it", record.path().display());
                report.skipped.push(record.path().to_path_buf());
            }
        }
    }
    set_record_position(None);
    named
}

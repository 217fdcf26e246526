//! Webloc core: pure naming rules, deduplication and batch state machines.
mod batch;
mod canonical;
mod dedup;
mod naming;
mod record;
mod report;
mod rules;
mod sanitize;

pub use batch::{
    reattach_prefix, split_name_prefix, Batch, BatchPolicy, BatchQueue, BatchState,
    FailureDecision, QuarantineSet,
};
pub use canonical::canonicalize_url;
pub use dedup::{Decision, DedupStore};
pub use naming::{compose_final_name, compose_prefixed_name, normalize_fetched_title};
pub use record::{RecordId, RecordStatus, ShortcutRecord, TransitionError};
pub use report::{DuplicateEntry, FailureEntry, RenameEntry, RunReport};
pub use rules::{
    apply_rules, last_segment, match_rule, rule_candidate, PlatformRule, SuffixCleaner, FALLBACK_PREFIX,
    NAME_SEPARATOR, PLATFORM_RULES,
};
pub use sanitize::{max_name_len, sanitize_name, PLATFORM_PATH_LIMIT};

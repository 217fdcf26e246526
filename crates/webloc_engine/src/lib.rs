//! Webloc engine: collaborators, title resolution and the rename pipeline.
mod batch;
mod decode;
mod extract;
mod fetch;
mod fs;
mod persist;
mod pipeline;
mod rename;
mod resolver;
mod scan;
mod shortcut;
mod simplify;
mod types;

pub use batch::{BatchOutcome, BatchRetryProcessor};
pub use decode::{decode_page, DecodeError, DecodedPage};
pub use extract::extract_title;
pub use fetch::{FetchSettings, PageTitleFetcher, ReqwestTitleFetcher};
pub use fs::{FileSystem, StdFileSystem};
pub use persist::{
    render_remediation_script, write_atomically, write_remediation_script, write_report_json,
    PersistError, REMEDIATION_FOLDER,
};
pub use pipeline::{
    AlwaysProceed, CommitPlan, ConfirmationGate, Pipeline, PipelineOutput, PipelineSettings,
};
pub use rename::{fit_file_name, CommitMode, Outcome, RenameExecutor, HARD_TRUNCATE_LEN};
pub use resolver::{Resolution, TitleResolver};
pub use scan::{scan_shortcuts, SHORTCUT_EXTENSION};
pub use shortcut::{PlistShortcutStore, ShortcutStore};
pub use simplify::{
    build_prompt, parse_simplified, OpenRouterSimplifier, ServiceSettings, SimplificationService,
};
pub use types::{FailureKind, FetchError, NamingStrategy, ServiceError, ShortcutInput};

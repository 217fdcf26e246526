use std::collections::HashMap;

use engine_logging::{engine_info, engine_warn, set_record_position};
use webloc_core::{normalize_fetched_title, QuarantineSet, RecordId, ShortcutRecord};

use crate::batch::BatchRetryProcessor;
use crate::fetch::PageTitleFetcher;
use crate::NamingStrategy;

#[derive(Debug, Default)]
pub struct Resolution {
    pub quarantine: QuarantineSet,
    /// Direct mode: records left without a raw title. The rule engine names
    /// them from their current file name.
    pub untitled: Vec<RecordId>,
    /// Batch mode: records the service gave no usable entry for. They keep
    /// their pre-batch name.
    pub degraded: Vec<RecordId>,
    /// Batch mode: display prefixes carried over from file names. Names for
    /// these records keep the prefix verbatim.
    pub prefixes: HashMap<RecordId, String>,
}

/// Picks the naming strategy for a whole run.
pub enum TitleResolver<'a> {
    Direct { fetcher: &'a dyn PageTitleFetcher },
    Batch { processor: BatchRetryProcessor<'a> },
}

impl<'a> TitleResolver<'a> {
    pub fn direct(fetcher: &'a dyn PageTitleFetcher) -> Self {
        TitleResolver::Direct { fetcher }
    }

    pub fn batch(processor: BatchRetryProcessor<'a>) -> Self {
        TitleResolver::Batch { processor }
    }

    pub fn strategy(&self) -> NamingStrategy {
        match self {
            TitleResolver::Direct { .. } => NamingStrategy::Direct,
            TitleResolver::Batch { .. } => NamingStrategy::Batch,
        }
    }

    pub async fn resolve(&self, records: &mut [ShortcutRecord], ids: &[RecordId]) -> Resolution {
        match self {
            TitleResolver::Direct { fetcher } => resolve_direct(*fetcher, records, ids).await,
            TitleResolver::Batch { processor } => {
                let outcome = processor.run(records, ids).await;
                engine_info!(
                    "simplification done: {} requests, {} quarantined",
                    outcome.requests,
                    outcome.quarantine.len()
                );
                Resolution {
                    quarantine: outcome.quarantine,
                    untitled: Vec::new(),
                    degraded: outcome.degraded,
                    prefixes: outcome.prefixes,
                }
            }
        }
    }
}

async fn resolve_direct(
    fetcher: &dyn PageTitleFetcher,
    records: &mut [ShortcutRecord],
    ids: &[RecordId],
) -> Resolution {
    let mut untitled = Vec::new();
    for (position, id) in ids.iter().enumerate() {
        set_record_position(Some((position, ids.len())));
        let record = &mut records[*id];
        match fetcher.fetch_title(record.canonical_url()).await {
            Ok(Some(title)) => {
                let title = normalize_fetched_title(&title);
                if title.is_empty() {
                    untitled.push(*id);
                } else {
                    engine_info!("title: '{}'", title);
                    record.set_raw_title(title);
                }
            }
            Ok(None) => {
                engine_info!("no title at {}", record.canonical_url());
                untitled.push(*id);
            }
            Err(err) => {
                engine_warn!("title fetch failed for {}: {}", record.canonical_url(), err);
                untitled.push(*id);
            }
        }
    }
    set_record_position(None);
    Resolution {
        quarantine: QuarantineSet::default(),
        untitled,
        degraded: Vec::new(),
        prefixes: HashMap::new(),
    }
}

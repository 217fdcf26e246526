use std::collections::HashMap;

use engine_logging::{engine_info, engine_warn};
use tokio::time::Instant;
use webloc_core::{
    reattach_prefix, split_name_prefix, BatchPolicy, BatchQueue, FailureDecision, QuarantineSet,
    RecordId, ShortcutRecord,
};

use crate::simplify::SimplificationService;

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub quarantine: QuarantineSet,
    /// Records that came back without a usable entry and keep their pre-batch name.
    pub degraded: Vec<RecordId>,
    /// Display prefixes reattached to simplified names, by record.
    pub prefixes: HashMap<RecordId, String>,
    /// Number of requests sent to the service, retries included.
    pub requests: usize,
}

/// Drives the simplification service over batches with bounded retry.
pub struct BatchRetryProcessor<'a> {
    service: &'a dyn SimplificationService,
    policy: BatchPolicy,
}

impl<'a> BatchRetryProcessor<'a> {
    pub fn new(service: &'a dyn SimplificationService, policy: BatchPolicy) -> Self {
        Self { service, policy }
    }

    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    pub async fn run(&self, records: &mut [ShortcutRecord], ids: &[RecordId]) -> BatchOutcome {
        let mut queue = BatchQueue::partition(ids, self.policy.batch_size, self.policy.max_attempts);
        let total = queue.total_batches();
        let mut degraded = Vec::new();
        let mut prefixes = HashMap::new();
        let mut requests = 0;

        while let Some(batch) = queue.next_batch() {
            let started = Instant::now();
            let stems: Vec<String> = batch.records.iter().map(|id| records[*id].current_stem()).collect();
            let names: Vec<String> = stems
                .iter()
                .map(|stem| split_name_prefix(stem).1.to_string())
                .collect();

            engine_info!(
                "batch {}/{} attempt {} ({} names)",
                batch.id + 1,
                total,
                batch.attempts + 1,
                names.len()
            );
            requests += 1;

            match self.service.simplify_batch(&names).await {
                Ok(slots) => {
                    for (slot, (id, stem)) in batch.records.iter().zip(&stems).enumerate() {
                        match slots.get(slot).cloned().flatten() {
                            Some(simplified) => {
                                let (prefix, _) = split_name_prefix(stem);
                                records[*id].set_raw_title(reattach_prefix(prefix, &simplified));
                                if let Some(prefix) = prefix {
                                    prefixes.insert(*id, prefix.to_string());
                                }
                            }
                            None => {
                                engine_warn!("no simplified name for {}, keeping it", stem);
                                degraded.push(*id);
                            }
                        }
                    }
                    let done = queue.succeed(batch);
                    let elapsed = started.elapsed();
                    engine_info!(
                        "batch {}/{} succeeded in {:.2}s",
                        done.id + 1,
                        total,
                        elapsed.as_secs_f64()
                    );
                    if !queue.is_drained() {
                        tokio::time::sleep(self.policy.min_interval.saturating_sub(elapsed)).await;
                    }
                }
                Err(err) => {
                    let id = batch.id;
                    match queue.fail(batch) {
                        FailureDecision::Requeued { attempts } => engine_warn!(
                            "batch {}/{} failed (attempt {}): {}; requeued",
                            id + 1,
                            total,
                            attempts,
                            err
                        ),
                        FailureDecision::Quarantined { records: lost } => engine_warn!(
                            "batch {}/{} failed: {}; quarantining {} records",
                            id + 1,
                            total,
                            err,
                            lost.len()
                        ),
                    }
                }
            }
        }

        BatchOutcome {
            quarantine: queue.into_quarantine(),
            degraded,
            prefixes,
            requests,
        }
    }
}

//! Batch lifecycle for the simplification path.
//!
//! Batches move `Queued -> InFlight -> {Succeeded | AttemptFailed}`. A failed
//! batch is requeued at the back while it has attempts left and is otherwise
//! quarantined whole. The queue is strictly FIFO.

use std::collections::VecDeque;
use std::time::Duration;

use crate::record::RecordId;
use crate::rules::NAME_SEPARATOR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
    pub batch_size: usize,
    /// Total attempts per batch, including the first.
    pub max_attempts: u32,
    /// Minimum time between the start of one successful batch and the next request.
    pub min_interval: Duration,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            batch_size: 5,
            max_attempts: 2,
            min_interval: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Queued,
    InFlight,
    Succeeded,
    AttemptFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub id: usize,
    pub records: Vec<RecordId>,
    pub attempts: u32,
    pub state: BatchState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureDecision {
    Requeued { attempts: u32 },
    Quarantined { records: Vec<RecordId> },
}

/// Records whose batch exhausted its attempts. Insertion-ordered, no repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuarantineSet {
    records: Vec<RecordId>,
}

impl QuarantineSet {
    pub fn insert(&mut self, id: RecordId) -> bool {
        if self.records.contains(&id) {
            return false;
        }
        self.records.push(id);
        true
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.records.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug)]
pub struct BatchQueue {
    queue: VecDeque<Batch>,
    max_attempts: u32,
    total_batches: usize,
    quarantine: QuarantineSet,
}

impl BatchQueue {
    /// Splits `records` into order-preserving chunks of `batch_size` (at least 1).
    pub fn partition(records: &[RecordId], batch_size: usize, max_attempts: u32) -> Self {
        let queue: VecDeque<Batch> = records
            .chunks(batch_size.max(1))
            .enumerate()
            .map(|(id, chunk)| Batch {
                id,
                records: chunk.to_vec(),
                attempts: 0,
                state: BatchState::Queued,
            })
            .collect();
        let total_batches = queue.len();
        Self {
            queue,
            max_attempts: max_attempts.max(1),
            total_batches,
            quarantine: QuarantineSet::default(),
        }
    }

    pub fn total_batches(&self) -> usize {
        self.total_batches
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_drained(&self) -> bool {
        self.queue.is_empty()
    }

    /// Takes the next ready batch and marks it in flight.
    pub fn next_batch(&mut self) -> Option<Batch> {
        let mut batch = self.queue.pop_front()?;
        batch.state = BatchState::InFlight;
        Some(batch)
    }

    pub fn succeed(&mut self, mut batch: Batch) -> Batch {
        batch.attempts += 1;
        batch.state = BatchState::Succeeded;
        batch
    }

    pub fn fail(&mut self, mut batch: Batch) -> FailureDecision {
        batch.attempts += 1;
        batch.state = BatchState::AttemptFailed;
        if batch.attempts < self.max_attempts {
            let attempts = batch.attempts;
            batch.state = BatchState::Queued;
            self.queue.push_back(batch);
            return FailureDecision::Requeued { attempts };
        }
        for id in &batch.records {
            self.quarantine.insert(*id);
        }
        FailureDecision::Quarantined {
            records: batch.records,
        }
    }

    pub fn into_quarantine(self) -> QuarantineSet {
        self.quarantine
    }
}

/// Splits a file stem into its display prefix and the part sent for
/// simplification: `"       YouTube - Title"` gives
/// `(Some("       YouTube"), "Title")`.
pub fn split_name_prefix(stem: &str) -> (Option<&str>, &str) {
    match stem.split_once(NAME_SEPARATOR) {
        Some((prefix, rest)) => (Some(prefix), rest),
        None => (None, stem),
    }
}

/// Reattaches a prefix removed by [`split_name_prefix`].
pub fn reattach_prefix(prefix: Option<&str>, simplified: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}{NAME_SEPARATOR}{simplified}"),
        None => simplified.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_preserves_order_and_size() {
        let ids: Vec<RecordId> = (0..12).collect();
        let mut queue = BatchQueue::partition(&ids, 5, 2);
        assert_eq!(queue.total_batches(), 3);
        let sizes: Vec<_> = std::iter::from_fn(|| queue.next_batch())
            .map(|b| b.records)
            .collect();
        assert_eq!(sizes, vec![vec![0, 1, 2, 3, 4], vec![5, 6, 7, 8, 9], vec![10, 11]]);
    }

    #[test]
    fn failed_batch_is_requeued_at_back() {
        let ids: Vec<RecordId> = (0..4).collect();
        let mut queue = BatchQueue::partition(&ids, 2, 2);
        let first = queue.next_batch().unwrap();
        assert_eq!(first.state, BatchState::InFlight);
        assert_eq!(queue.fail(first), FailureDecision::Requeued { attempts: 1 });

        let second = queue.next_batch().unwrap();
        assert_eq!(second.id, 1);
        let retried = queue.next_batch().unwrap();
        assert_eq!(retried.id, 0);
        assert_eq!(retried.attempts, 1);
    }

    #[test]
    fn exhausted_batch_is_quarantined_once() {
        let ids: Vec<RecordId> = vec![3, 4];
        let mut queue = BatchQueue::partition(&ids, 5, 2);
        let batch = queue.next_batch().unwrap();
        queue.fail(batch);
        let batch = queue.next_batch().unwrap();
        assert_eq!(
            queue.fail(batch),
            FailureDecision::Quarantined {
                records: vec![3, 4]
            }
        );
        assert!(queue.is_drained());
        let quarantine = queue.into_quarantine();
        assert_eq!(quarantine.iter().collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn single_attempt_policy_quarantines_immediately() {
        let mut queue = BatchQueue::partition(&[0], 5, 1);
        let batch = queue.next_batch().unwrap();
        assert!(matches!(queue.fail(batch), FailureDecision::Quarantined { .. }));
    }

    #[test]
    fn success_counts_the_attempt() {
        let mut queue = BatchQueue::partition(&[0], 5, 2);
        let batch = queue.next_batch().unwrap();
        let done = queue.succeed(batch);
        assert_eq!(done.attempts, 1);
        assert_eq!(done.state, BatchState::Succeeded);
    }

    #[test]
    fn prefix_split_and_reattach() {
        assert_eq!(
            split_name_prefix("       YouTube - Long - Title"),
            (Some("       YouTube"), "Long - Title")
        );
        assert_eq!(split_name_prefix("No prefix"), (None, "No prefix"));
        assert_eq!(
            reattach_prefix(Some("       YouTube"), "Short"),
            "       YouTube - Short"
        );
        assert_eq!(reattach_prefix(None, "Short"), "Short");
    }
}

//! Append-only store of accepted batches and their submission lists.

use crate::{Batch, BatchId, SubmissionId};

#[derive(Clone, Debug, Default)]
pub struct BatchLedger {
    batches: Vec<Batch>,

    /// Ordered submission ids per batch, indexed like `batches`.
    submission_index: Vec<Vec<SubmissionId>>,
}

impl BatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> BatchId {
        self.batches.len() as BatchId
    }

    pub fn count(&self) -> u64 {
        self.batches.len() as u64
    }

    pub fn append(&mut self, batch: Batch, submissions: Vec<SubmissionId>) -> BatchId {
        debug_assert_eq!(batch.num_signatures(), submissions.len() as u64);
        let id = self.next_id();
        self.batches.push(batch);
        self.submission_index.push(submissions);
        id
    }

    pub fn get(&self, id: BatchId) -> Option<&Batch> {
        usize::try_from(id).ok().and_then(|idx| self.batches.get(idx))
    }

    /// Submission ids of a batch in input order; empty for unknown ids.
    pub fn submissions(&self, id: BatchId) -> &[SubmissionId] {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.submission_index.get(idx))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

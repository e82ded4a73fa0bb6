//! Append-only store of signed-message records.

use crate::{SignatureSubmission, SignedMessage, SubmissionId};

/// Dense-id arena of [`SignatureSubmission`]s; an id is its allocation index.
#[derive(Clone, Debug, Default)]
pub struct SubmissionLedger {
    entries: Vec<SignatureSubmission>,
}

impl SubmissionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next appended record will get.
    pub fn next_id(&self) -> SubmissionId {
        self.entries.len() as SubmissionId
    }

    /// Number of records, which is also the submission counter.
    pub fn count(&self) -> u64 {
        self.entries.len() as u64
    }

    pub fn append(&mut self, message: SignedMessage, included: bool) -> SubmissionId {
        let id = self.next_id();
        self.entries.push(SignatureSubmission::new(message, included));
        id
    }

    pub fn get(&self, id: SubmissionId) -> Option<&SignatureSubmission> {
        usize::try_from(id).ok().and_then(|idx| self.entries.get(idx))
    }

    /// Whether the record exists and was created by an accepted batch.
    pub fn is_included(&self, id: SubmissionId) -> bool {
        self.get(id).is_some_and(|s| s.included())
    }
}

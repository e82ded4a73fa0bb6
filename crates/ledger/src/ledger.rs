//! The three ledgers combined behind one exclusively-owned structure.

use serde::{Deserialize, Serialize};
use zkbatch_primitives::{Address, StateRoot};

use crate::{
    Batch, BatchId, BatchLedger, L2State, SignatureSubmission, SignedMessage, StateLedger,
    SubmissionId, SubmissionLedger,
};

/// A fully validated batch waiting to be committed.
///
/// Built only from inputs that already passed every check, so committing it cannot fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingBatch {
    new_state_root: StateRoot,
    proposer: Address,
    timestamp: u64,
    messages: Vec<SignedMessage>,
}

impl PendingBatch {
    /// Returns `None` for an empty message list; a batch always carries signatures.
    pub fn new(
        new_state_root: StateRoot,
        proposer: Address,
        timestamp: u64,
        messages: Vec<SignedMessage>,
    ) -> Option<Self> {
        if messages.is_empty() {
            return None;
        }
        Some(Self {
            new_state_root,
            proposer,
            timestamp,
            messages,
        })
    }

    pub fn messages(&self) -> &[SignedMessage] {
        &self.messages
    }
}

/// Outcome of committing a [`PendingBatch`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReceipt {
    pub batch_id: BatchId,
    pub block_number: u64,
    pub first_submission_id: SubmissionId,
    pub num_signatures: u64,
}

impl BatchReceipt {
    /// Submission ids the batch was assigned, in input order.
    pub fn submission_ids(&self) -> impl Iterator<Item = SubmissionId> {
        self.first_submission_id..self.first_submission_id + self.num_signatures
    }
}

/// Submission, batch and state ledgers, mutated only through [`RollupLedger::commit_batch`]
/// and [`RollupLedger::register_submission`].
#[derive(Clone, Debug, Default)]
pub struct RollupLedger {
    submissions: SubmissionLedger,
    batches: BatchLedger,
    state: StateLedger,
}

impl RollupLedger {
    pub fn new(genesis_root: StateRoot) -> Self {
        Self {
            submissions: SubmissionLedger::new(),
            batches: BatchLedger::new(),
            state: StateLedger::new(genesis_root),
        }
    }

    /// Appends every record of the batch and advances the state.
    pub fn commit_batch(&mut self, pending: PendingBatch) -> BatchReceipt {
        let PendingBatch {
            new_state_root,
            proposer,
            timestamp,
            messages,
        } = pending;

        let batch_id = self.batches.next_id();
        let first_submission_id = self.submissions.next_id();
        let block_number = self.state.next_block_number();
        let num_signatures = messages.len() as u64;

        let ids: Vec<SubmissionId> = messages
            .into_iter()
            .map(|msg| self.submissions.append(msg, true))
            .collect();

        let batch = Batch::new_verified(
            new_state_root,
            num_signatures,
            timestamp,
            proposer,
            block_number,
        );
        self.batches.append(batch, ids);
        self.state.advance(new_state_root);

        BatchReceipt {
            batch_id,
            block_number,
            first_submission_id,
            num_signatures,
        }
    }

    /// Appends a standalone, not-included submission.
    pub fn register_submission(&mut self, message: SignedMessage) -> SubmissionId {
        self.submissions.append(message, false)
    }

    pub fn batch(&self, id: BatchId) -> Option<&Batch> {
        self.batches.get(id)
    }

    pub fn batch_submissions(&self, id: BatchId) -> &[SubmissionId] {
        self.batches.submissions(id)
    }

    pub fn submission(&self, id: SubmissionId) -> Option<&SignatureSubmission> {
        self.submissions.get(id)
    }

    pub fn is_submission_included(&self, id: SubmissionId) -> bool {
        self.submissions.is_included(id)
    }

    pub fn l2_state(&self) -> L2State {
        self.state.snapshot()
    }

    pub fn submission_count(&self) -> u64 {
        self.submissions.count()
    }

    pub fn batch_count(&self) -> u64 {
        self.state.batch_count()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use zkbatch_primitives::{Buf32, FieldElement};

    use super::*;

    fn msgs(n: usize, seed: u64) -> Vec<SignedMessage> {
        (0..n as u64)
            .map(|i| {
                SignedMessage::new(
                    FieldElement::from_u64(seed + i),
                    FieldElement::from_u64(seed + i + 100),
                    FieldElement::from_u64(seed + i + 200),
                )
            })
            .collect()
    }

    fn pending(root: u8, n: usize) -> PendingBatch {
        PendingBatch::new(Buf32::new([root; 32]), Address::new([1; 20]), 42, msgs(n, 0)).unwrap()
    }

    #[test]
    fn test_empty_pending_batch_is_unrepresentable() {
        assert!(PendingBatch::new(Buf32::zero(), Address::zero(), 0, vec![]).is_none());
    }

    #[test]
    fn test_commit_batch_two_signatures() {
        let mut ledger = RollupLedger::new(Buf32::zero());
        let receipt = ledger.commit_batch(pending(9, 2));

        assert_eq!(
            receipt,
            BatchReceipt {
                batch_id: 0,
                block_number: 1,
                first_submission_id: 0,
                num_signatures: 2,
            }
        );
        assert_eq!(receipt.submission_ids().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(
            ledger.l2_state(),
            L2State {
                state_root: Buf32::new([9; 32]),
                block_number: 1,
                batch_count: 1
            }
        );
        assert_eq!(ledger.submission_count(), 2);
        assert_eq!(ledger.batch_submissions(0), &[0, 1]);
        assert!(ledger.is_submission_included(0));
        assert!(ledger.is_submission_included(1));

        let batch = ledger.batch(0).unwrap();
        assert!(batch.verified());
        assert_eq!(batch.timestamp(), 42);
        assert_eq!(batch.proposer(), Address::new([1; 20]));
    }

    #[test]
    fn test_registration_interleaves_with_batches() {
        let mut ledger = RollupLedger::new(Buf32::zero());
        let standalone = ledger.register_submission(msgs(1, 7)[0]);
        let receipt = ledger.commit_batch(pending(1, 3));

        assert_eq!(standalone, 0);
        assert_eq!(receipt.first_submission_id, 1);
        assert_eq!(ledger.batch_submissions(0), &[1, 2, 3]);
        assert!(!ledger.is_submission_included(standalone));
        assert_eq!(ledger.l2_state().block_number, 1);
    }

    proptest! {
        #[test]
        fn proptest_counters_track_committed_batches(
            ops in prop::collection::vec((any::<bool>(), 1usize..6), 1..24)
        ) {
            let mut ledger = RollupLedger::new(Buf32::zero());
            let mut expected_subs = 0u64;
            let mut expected_batches = 0u64;

            for (i, (is_batch, n)) in ops.into_iter().enumerate() {
                if is_batch {
                    let before = ledger.l2_state();
                    let receipt = ledger.commit_batch(pending(i as u8, n));
                    let after = ledger.l2_state();

                    prop_assert_eq!(after.block_number, before.block_number + 1);
                    prop_assert_eq!(after.batch_count, before.batch_count + 1);
                    prop_assert_eq!(receipt.first_submission_id, expected_subs);
                    prop_assert_eq!(
                        ledger.batch_submissions(receipt.batch_id).len() as u64,
                        ledger.batch(receipt.batch_id).unwrap().num_signatures()
                    );
                    expected_subs += n as u64;
                    expected_batches += 1;
                } else {
                    let id = ledger.register_submission(msgs(1, i as u64)[0]);
                    prop_assert_eq!(id, expected_subs);
                    expected_subs += 1;
                }

                let state = ledger.l2_state();
                prop_assert_eq!(state.block_number, state.batch_count);
                prop_assert_eq!(state.batch_count, expected_batches);
                prop_assert_eq!(ledger.submission_count(), expected_subs);
            }
        }
    }
}

//! Rebuilding ledger history from the event stream alone.

use thiserror::Error;
use tracing::debug;
use zkbatch_ledger::{BatchId, PendingBatch, RollupLedger, SignedMessage};
use zkbatch_primitives::{Address, StateRoot, VerifierId};

use crate::{RollupEvent, SequencedEvent};

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ReplayError {
    #[error("event {seq}: expected sequence number {expected}")]
    SequenceGap { seq: u64, expected: u64 },

    #[error("event {seq}: expected batch id {expected}, got {got}")]
    BatchIdGap { seq: u64, expected: u64, got: u64 },

    #[error("event {seq}: expected submission id {expected}, got {got}")]
    SubmissionIdGap { seq: u64, expected: u64, got: u64 },

    #[error("event {seq}: submission accepted outside of batch {batch_id}")]
    OrphanSubmission { seq: u64, batch_id: BatchId },

    #[error("event {seq}: state advanced without an accepted batch")]
    OrphanStateAdvance { seq: u64 },

    #[error("event {seq}: batch {batch_id} is still open")]
    UnterminatedBatch { seq: u64, batch_id: BatchId },

    #[error("event {seq}: batch {batch_id} declares no signatures")]
    EmptyBatch { seq: u64, batch_id: BatchId },

    #[error("event {seq}: batch declared {expected} signatures, saw {got}")]
    SignatureCountMismatch { seq: u64, expected: u64, got: u64 },

    #[error("event {seq}: state advance disagrees with accepted batch")]
    StateMismatch { seq: u64 },

    #[error("event {seq}: verifier update from {got}, active is {expected}")]
    VerifierMismatch {
        seq: u64,
        expected: VerifierId,
        got: VerifierId,
    },

    #[error("stream ended inside batch {batch_id}")]
    Truncated { batch_id: BatchId },
}

/// Header of a batch whose submissions are still being collected.
#[derive(Debug)]
struct OpenBatch {
    batch_id: BatchId,
    state_root: StateRoot,
    num_signatures: u64,
    proposer: Address,
    timestamp: u64,
    block_number: u64,
    messages: Vec<SignedMessage>,
}

/// Ledger contents reconstructed from a complete event stream.
#[derive(Debug)]
pub struct HistoryIndex {
    ledger: RollupLedger,
    verifier: Option<VerifierId>,
    next_seq: u64,
}

impl HistoryIndex {
    /// Replays `events`, starting from an empty ledger at `genesis_root`.
    ///
    /// The stream must start at sequence number 0 and contain only whole batches.
    pub fn replay(genesis_root: StateRoot, events: &[SequencedEvent]) -> Result<Self, ReplayError> {
        let mut index = Self {
            ledger: RollupLedger::new(genesis_root),
            verifier: None,
            next_seq: 0,
        };
        let mut open: Option<OpenBatch> = None;

        for sev in events {
            index.check_seq(sev.seq)?;
            open = index.apply(sev.seq, &sev.event, open)?;
        }

        if let Some(batch) = open {
            return Err(ReplayError::Truncated {
                batch_id: batch.batch_id,
            });
        }

        debug!(
            events = events.len(),
            batches = index.ledger.batch_count(),
            submissions = index.ledger.submission_count(),
            "replayed event stream"
        );
        Ok(index)
    }

    pub fn ledger(&self) -> &RollupLedger {
        &self.ledger
    }

    /// Latest verifier seen in a rotation event, if any.
    pub fn verifier(&self) -> Option<VerifierId> {
        self.verifier
    }

    fn check_seq(&mut self, seq: u64) -> Result<(), ReplayError> {
        if seq != self.next_seq {
            return Err(ReplayError::SequenceGap {
                seq,
                expected: self.next_seq,
            });
        }
        self.next_seq += 1;
        Ok(())
    }

    fn apply(
        &mut self,
        seq: u64,
        event: &RollupEvent,
        open: Option<OpenBatch>,
    ) -> Result<Option<OpenBatch>, ReplayError> {
        match (event, open) {
            (
                RollupEvent::SubmissionAccepted {
                    batch_id,
                    submission_id,
                    message,
                },
                Some(mut batch),
            ) => {
                if *batch_id != batch.batch_id {
                    return Err(ReplayError::OrphanSubmission {
                        seq,
                        batch_id: *batch_id,
                    });
                }
                let expected = self.ledger.submission_count() + batch.messages.len() as u64;
                if *submission_id != expected {
                    return Err(ReplayError::SubmissionIdGap {
                        seq,
                        expected,
                        got: *submission_id,
                    });
                }
                batch.messages.push(*message);
                Ok(Some(batch))
            }

            (RollupEvent::SubmissionAccepted { batch_id, .. }, None) => {
                Err(ReplayError::OrphanSubmission {
                    seq,
                    batch_id: *batch_id,
                })
            }

            (
                RollupEvent::StateAdvanced {
                    state_root,
                    block_number,
                    batch_count,
                },
                Some(batch),
            ) => {
                self.close_batch(seq, batch, *state_root, *block_number, *batch_count)?;
                Ok(None)
            }

            (RollupEvent::StateAdvanced { .. }, None) => {
                Err(ReplayError::OrphanStateAdvance { seq })
            }

            // Everything below starts outside of a batch.
            (_, Some(batch)) => Err(ReplayError::UnterminatedBatch {
                seq,
                batch_id: batch.batch_id,
            }),

            (
                RollupEvent::BatchAccepted {
                    batch_id,
                    state_root,
                    num_signatures,
                    proposer,
                    timestamp,
                    block_number,
                },
                None,
            ) => {
                let expected = self.ledger.batch_count();
                if *batch_id != expected {
                    return Err(ReplayError::BatchIdGap {
                        seq,
                        expected,
                        got: *batch_id,
                    });
                }
                if *num_signatures == 0 {
                    return Err(ReplayError::EmptyBatch {
                        seq,
                        batch_id: *batch_id,
                    });
                }
                Ok(Some(OpenBatch {
                    batch_id: *batch_id,
                    state_root: *state_root,
                    num_signatures: *num_signatures,
                    proposer: *proposer,
                    timestamp: *timestamp,
                    block_number: *block_number,
                    messages: Vec::new(),
                }))
            }

            (
                RollupEvent::SubmissionRegistered {
                    submission_id,
                    message,
                    ..
                },
                None,
            ) => {
                let expected = self.ledger.submission_count();
                if *submission_id != expected {
                    return Err(ReplayError::SubmissionIdGap {
                        seq,
                        expected,
                        got: *submission_id,
                    });
                }
                self.ledger.register_submission(*message);
                Ok(None)
            }

            (RollupEvent::VerifierUpdated { old, new }, None) => {
                if let Some(active) = self.verifier {
                    if active != *old {
                        return Err(ReplayError::VerifierMismatch {
                            seq,
                            expected: active,
                            got: *old,
                        });
                    }
                }
                self.verifier = Some(*new);
                Ok(None)
            }
        }
    }

    fn close_batch(
        &mut self,
        seq: u64,
        batch: OpenBatch,
        state_root: StateRoot,
        block_number: u64,
        batch_count: u64,
    ) -> Result<(), ReplayError> {
        let got = batch.messages.len() as u64;
        if got != batch.num_signatures {
            return Err(ReplayError::SignatureCountMismatch {
                seq,
                expected: batch.num_signatures,
                got,
            });
        }

        let expected_block = self.ledger.l2_state().block_number + 1;
        if state_root != batch.state_root
            || block_number != batch.block_number
            || block_number != expected_block
            || batch_count != batch.batch_id + 1
        {
            return Err(ReplayError::StateMismatch { seq });
        }

        let batch_id = batch.batch_id;
        let pending = PendingBatch::new(
            batch.state_root,
            batch.proposer,
            batch.timestamp,
            batch.messages,
        )
        .ok_or(ReplayError::EmptyBatch { seq, batch_id })?;
        self.ledger.commit_batch(pending);
        Ok(())
    }
}

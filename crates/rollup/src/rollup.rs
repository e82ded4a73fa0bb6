//! Batch acceptance orchestration.

use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use zkbatch_config::RollupConfig;
use zkbatch_ledger::{
    Batch, BatchId, BatchReceipt, L2State, PendingBatch, RollupLedger, SignatureSubmission,
    SignedMessage, SubmissionId,
};
use zkbatch_primitives::{Address, FieldElement, StateRoot, VerifierId};
use zkbatch_proof::{build_public_inputs, ProofInput, VerifierHandle};

use crate::{Clock, EventLog, RollupError, RollupEvent, RollupResult, SequencedEvent, SequencerGate};

/// Inputs of one batch submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSubmission {
    pub new_state_root: StateRoot,
    pub message_hashes: Vec<FieldElement>,
    pub public_keys_x: Vec<FieldElement>,
    pub public_keys_y: Vec<FieldElement>,
    pub proof: ProofInput,
}

impl BatchSubmission {
    pub fn num_signatures(&self) -> usize {
        self.message_hashes.len()
    }

    fn messages(&self) -> Vec<SignedMessage> {
        self.message_hashes
            .iter()
            .zip(&self.public_keys_x)
            .zip(&self.public_keys_y)
            .map(|((hash, x), y)| SignedMessage::new(*hash, *x, *y))
            .collect()
    }
}

/// Everything mutable, behind the single lock.
#[derive(Debug)]
struct CoreState {
    ledger: RollupLedger,
    verifier: VerifierHandle,
    events: EventLog,
    last_timestamp: u64,
}

/// Rollup ledger instance with exactly one authorized writer.
pub struct RollupCore {
    gate: SequencerGate,
    clock: Arc<dyn Clock>,
    inner: Mutex<CoreState>,
}

impl RollupCore {
    /// Creates a core at `genesis_root` with no batches.
    pub fn new(
        sequencer: Address,
        genesis_root: StateRoot,
        verifier: VerifierHandle,
        clock: Arc<dyn Clock>,
    ) -> RollupResult<Self> {
        if verifier.is_null() {
            return Err(RollupError::InvalidVerifierReference);
        }

        Ok(Self {
            gate: SequencerGate::new(sequencer),
            clock,
            inner: Mutex::new(CoreState {
                ledger: RollupLedger::new(genesis_root),
                verifier,
                events: EventLog::new(),
                last_timestamp: 0,
            }),
        })
    }

    pub fn from_config(
        config: &RollupConfig,
        verifier: VerifierHandle,
        clock: Arc<dyn Clock>,
    ) -> RollupResult<Self> {
        Self::new(
            config.ledger.sequencer,
            config.ledger.genesis_state_root,
            verifier,
            clock,
        )
    }

    pub fn sequencer(&self) -> Address {
        self.gate.sequencer()
    }

    /// Validates a batch against its proof and, if everything checks out, commits it.
    ///
    /// Checks run in a fixed order: authorization, non-empty, lengths, proof decoding,
    /// verification. Any error leaves the ledger and the event log untouched.
    #[instrument(
        skip_all,
        fields(caller = %caller, num_signatures = submission.num_signatures())
    )]
    pub fn submit_batch_with_proof(
        &self,
        caller: Address,
        submission: BatchSubmission,
    ) -> RollupResult<BatchReceipt> {
        let mut state = self.inner.lock();

        let messages = self
            .validate_batch(&state, caller, &submission)
            .inspect_err(|err| debug!(%err, "rejected batch"))?;

        let timestamp = self.clock.now().max(state.last_timestamp);
        state.last_timestamp = timestamp;

        let pending = PendingBatch::new(submission.new_state_root, caller, timestamp, messages)
            .ok_or(RollupError::EmptyBatch)?;

        let CoreState { ledger, events, .. } = &mut *state;
        let receipt = ledger.commit_batch(pending);
        events.extend(batch_events(ledger, &receipt));

        info!(
            batch_id = receipt.batch_id,
            block_number = receipt.block_number,
            state_root = %submission.new_state_root,
            "accepted batch"
        );
        Ok(receipt)
    }

    /// Runs every pre-commit check and returns the messages to store.
    fn validate_batch(
        &self,
        state: &CoreState,
        caller: Address,
        submission: &BatchSubmission,
    ) -> RollupResult<Vec<SignedMessage>> {
        self.gate.authorize(caller)?;

        let n = submission.message_hashes.len();
        if n == 0 {
            return Err(RollupError::EmptyBatch);
        }
        if submission.public_keys_x.len() != n || submission.public_keys_y.len() != n {
            return Err(RollupError::LengthMismatch {
                message_hashes: n,
                public_keys_x: submission.public_keys_x.len(),
                public_keys_y: submission.public_keys_y.len(),
            });
        }

        let proof = submission.proof.resolve()?;
        let public_inputs = build_public_inputs(
            &submission.message_hashes,
            &submission.public_keys_x,
            &submission.public_keys_y,
        );

        if !state.verifier.verify(&proof, &public_inputs) {
            return Err(RollupError::InvalidProof {
                verifier: state.verifier.id(),
            });
        }

        Ok(submission.messages())
    }

    /// Registers a standalone signature. Open to any caller.
    pub fn submit_signature(&self, caller: Address, message: SignedMessage) -> SubmissionId {
        let mut state = self.inner.lock();
        let CoreState { ledger, events, .. } = &mut *state;

        let submission_id = ledger.register_submission(message);
        events.extend([RollupEvent::SubmissionRegistered {
            submission_id,
            submitter: caller,
            message,
        }]);

        trace!(%caller, submission_id, "registered submission");
        submission_id
    }

    /// Replaces the active verifier. Past batches keep their verified flag.
    #[instrument(skip_all, fields(caller = %caller, new = %verifier.id()))]
    pub fn update_verifier(&self, caller: Address, verifier: VerifierHandle) -> RollupResult<()> {
        self.gate.authorize(caller)?;
        if verifier.is_null() {
            debug!("rejected null verifier reference");
            return Err(RollupError::InvalidVerifierReference);
        }

        let mut state = self.inner.lock();
        let old = state.verifier.id();
        let new = verifier.id();
        state.verifier = verifier;
        state
            .events
            .extend([RollupEvent::VerifierUpdated { old, new }]);

        info!(%old, %new, "updated verifier");
        Ok(())
    }

    pub fn get_batch(&self, id: BatchId) -> Option<Batch> {
        self.inner.lock().ledger.batch(id).copied()
    }

    pub fn get_batch_submissions(&self, id: BatchId) -> Vec<SubmissionId> {
        self.inner.lock().ledger.batch_submissions(id).to_vec()
    }

    pub fn get_l2_state(&self) -> L2State {
        self.inner.lock().ledger.l2_state()
    }

    pub fn is_submission_included(&self, id: SubmissionId) -> bool {
        self.inner.lock().ledger.is_submission_included(id)
    }

    pub fn get_submission(&self, id: SubmissionId) -> Option<SignatureSubmission> {
        self.inner.lock().ledger.submission(id).copied()
    }

    pub fn submission_count(&self) -> u64 {
        self.inner.lock().ledger.submission_count()
    }

    pub fn batch_count(&self) -> u64 {
        self.inner.lock().ledger.batch_count()
    }

    pub fn active_verifier_id(&self) -> VerifierId {
        self.inner.lock().verifier.id()
    }

    /// Events with sequence number at or after `cursor`.
    pub fn events_since(&self, cursor: u64) -> Vec<SequencedEvent> {
        self.inner.lock().events.since(cursor).to_vec()
    }
}

impl Debug for RollupCore {
    #[expect(clippy::absolute_paths, reason = "qualified Result avoids ambiguity")]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RollupCore")
            .field("gate", &self.gate)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// Events for a freshly committed batch, in emission order.
fn batch_events(ledger: &RollupLedger, receipt: &BatchReceipt) -> Vec<RollupEvent> {
    let mut out = Vec::with_capacity(receipt.num_signatures as usize + 2);

    if let Some(batch) = ledger.batch(receipt.batch_id) {
        out.push(RollupEvent::BatchAccepted {
            batch_id: receipt.batch_id,
            state_root: batch.state_root(),
            num_signatures: batch.num_signatures(),
            proposer: batch.proposer(),
            timestamp: batch.timestamp(),
            block_number: batch.block_number(),
        });
    }

    for submission_id in receipt.submission_ids() {
        if let Some(sub) = ledger.submission(submission_id) {
            out.push(RollupEvent::SubmissionAccepted {
                batch_id: receipt.batch_id,
                submission_id,
                message: *sub.message(),
            });
        }
    }

    let state = ledger.l2_state();
    out.push(RollupEvent::StateAdvanced {
        state_root: state.state_root,
        block_number: state.block_number,
        batch_count: state.batch_count,
    });
    out
}

//! Ledger record types.

use serde::{Deserialize, Serialize};
use zkbatch_primitives::{Address, FieldElement, StateRoot};

/// Dense identifier of a [`SignatureSubmission`], shared by both origins.
pub type SubmissionId = u64;

/// Dense identifier of a [`Batch`].
pub type BatchId = u64;

/// The public part of one signed message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignedMessage {
    pub message_hash: FieldElement,
    pub public_key_x: FieldElement,
    pub public_key_y: FieldElement,
}

impl SignedMessage {
    pub fn new(
        message_hash: FieldElement,
        public_key_x: FieldElement,
        public_key_y: FieldElement,
    ) -> Self {
        Self {
            message_hash,
            public_key_x,
            public_key_y,
        }
    }
}

/// A stored signed-message record.
///
/// `included` is fixed at creation: standalone registrations are never linked to a
/// batch afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureSubmission {
    message: SignedMessage,
    included: bool,
}

impl SignatureSubmission {
    pub fn new(message: SignedMessage, included: bool) -> Self {
        Self { message, included }
    }

    pub fn message(&self) -> &SignedMessage {
        &self.message
    }

    pub fn message_hash(&self) -> FieldElement {
        self.message.message_hash
    }

    pub fn public_key_x(&self) -> FieldElement {
        self.message.public_key_x
    }

    pub fn public_key_y(&self) -> FieldElement {
        self.message.public_key_y
    }

    pub fn included(&self) -> bool {
        self.included
    }
}

/// An accepted batch. Only verified batches are ever stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Batch {
    state_root: StateRoot,
    num_signatures: u64,
    timestamp: u64,
    proposer: Address,
    verified: bool,
    block_number: u64,
}

impl Batch {
    pub fn new_verified(
        state_root: StateRoot,
        num_signatures: u64,
        timestamp: u64,
        proposer: Address,
        block_number: u64,
    ) -> Self {
        Self {
            state_root,
            num_signatures,
            timestamp,
            proposer,
            verified: true,
            block_number,
        }
    }

    /// Root after this batch was applied.
    pub fn state_root(&self) -> StateRoot {
        self.state_root
    }

    pub fn num_signatures(&self) -> u64 {
        self.num_signatures
    }

    /// Acceptance time from the ledger's clock, in seconds.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn proposer(&self) -> Address {
        self.proposer
    }

    pub fn verified(&self) -> bool {
        self.verified
    }

    /// L2 block this batch produced.
    pub fn block_number(&self) -> u64 {
        self.block_number
    }
}

/// Snapshot of the L2 state commitment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2State {
    pub state_root: StateRoot,
    pub block_number: u64,
    pub batch_count: u64,
}

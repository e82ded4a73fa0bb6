//! Batch acceptance error taxonomy.

use thiserror::Error;
use zkbatch_primitives::{Address, VerifierId};
use zkbatch_proof::ProofDecodeError;

pub type RollupResult<T> = Result<T, RollupError>;

/// Pre-commit failures. Returning any of these guarantees the ledger is unchanged.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RollupError {
    #[error("caller {caller} is not the sequencer")]
    Unauthorized { caller: Address },

    #[error("verifier reference must not be null")]
    InvalidVerifierReference,

    #[error("batch contains no signatures")]
    EmptyBatch,

    #[error(
        "input lengths differ: {message_hashes} hashes, {public_keys_x} x-coords, {public_keys_y} y-coords"
    )]
    LengthMismatch {
        message_hashes: usize,
        public_keys_x: usize,
        public_keys_y: usize,
    },

    #[error(transparent)]
    ProofDecode(#[from] ProofDecodeError),

    #[error("proof rejected by verifier {verifier}")]
    InvalidProof { verifier: VerifierId },
}

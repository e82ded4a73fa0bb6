//! Proof-side plumbing for batch acceptance: the structured proof type, its flat byte
//! codec, the public-input layout and the verifier capability the ledger delegates to.

mod calldata;
pub mod codec;
mod errors;
mod public_inputs;
mod types;
mod verifier;

pub use calldata::CalldataProof;
pub use codec::{decode, encode, RAW_PROOF_LEN, WORD_LEN};
pub use errors::{CalldataError, ProofDecodeError, ProofDecodeResult};
pub use public_inputs::{build_public_inputs, INPUTS_PER_SIGNATURE};
pub use types::{ProofInput, StructuredProof, PROOF_WORD_COUNT};
pub use verifier::{ProofVerifier, VerifierHandle};

#[cfg(feature = "test-utils")]
pub use verifier::MockProofVerifier;

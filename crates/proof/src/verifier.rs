//! Proof verification capability.

use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};

use zkbatch_primitives::{FieldElement, VerifierId};

use crate::StructuredProof;

/// External succinct-proof verifier.
///
/// Implementations must be deterministic for identical inputs and must not mutate any
/// state observable to the ledger. Anything other than a definite `true` is treated as a
/// rejection by callers.
#[cfg_attr(feature = "test-utils", mockall::automock)]
pub trait ProofVerifier: Send + Sync {
    fn verify(&self, proof: &StructuredProof, public_inputs: &[FieldElement]) -> bool;
}

/// A verifier together with the reference it was registered under.
#[derive(Clone)]
pub struct VerifierHandle {
    id: VerifierId,
    verifier: Arc<dyn ProofVerifier>,
}

impl VerifierHandle {
    pub fn new(id: VerifierId, verifier: impl ProofVerifier + 'static) -> Self {
        Self::from_arc(id, Arc::new(verifier))
    }

    pub fn from_arc(id: VerifierId, verifier: Arc<dyn ProofVerifier>) -> Self {
        Self { id, verifier }
    }

    pub fn id(&self) -> VerifierId {
        self.id
    }

    /// Whether this is the null reference.
    pub fn is_null(&self) -> bool {
        self.id.is_zero()
    }

    pub fn verify(&self, proof: &StructuredProof, public_inputs: &[FieldElement]) -> bool {
        self.verifier.verify(proof, public_inputs)
    }
}

impl Debug for VerifierHandle {
    #[expect(clippy::absolute_paths, reason = "qualified Result avoids ambiguity")]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifierHandle")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedVerifier(bool);

    impl ProofVerifier for FixedVerifier {
        fn verify(&self, _proof: &StructuredProof, _public_inputs: &[FieldElement]) -> bool {
            self.0
        }
    }

    #[test]
    fn test_handle_delegates() {
        let proof = StructuredProof::default();
        let yes = VerifierHandle::new(VerifierId::new([1; 20]), FixedVerifier(true));
        let no = VerifierHandle::new(VerifierId::new([2; 20]), FixedVerifier(false));

        assert!(yes.verify(&proof, &[]));
        assert!(!no.verify(&proof, &[]));
    }

    #[test]
    fn test_null_reference() {
        let handle = VerifierHandle::new(VerifierId::zero(), FixedVerifier(true));
        assert!(handle.is_null());
        assert!(!VerifierHandle::new(VerifierId::new([9; 20]), FixedVerifier(true)).is_null());
    }
}

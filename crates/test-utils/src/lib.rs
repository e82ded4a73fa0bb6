//! Deterministic fixtures and generators for zkbatch tests.

use std::sync::Arc;

use arbitrary::{Arbitrary, Unstructured};
use parking_lot::Mutex;
use rand_core::{CryptoRngCore, OsRng};
use zkbatch_ledger::SignedMessage;
use zkbatch_primitives::{Address, FieldElement, VerifierId};
use zkbatch_proof::{ProofVerifier, StructuredProof, VerifierHandle};

/// The default buffer size for the `ArbitraryGenerator`.
const ARB_GEN_LEN: usize = 4_096;

/// Draws [`Arbitrary`] values from OS randomness through a reusable byte buffer.
#[derive(Debug)]
pub struct ArbitraryGenerator {
    buf: Vec<u8>,
}

impl Default for ArbitraryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ArbitraryGenerator {
    /// Creates a generator with the default buffer size.
    pub fn new() -> Self {
        Self::new_with_size(ARB_GEN_LEN)
    }

    pub fn new_with_size(s: usize) -> Self {
        Self { buf: vec![0u8; s] }
    }

    /// Generates an arbitrary instance of type `T` using [`OsRng`].
    pub fn generate<T>(&mut self) -> T
    where
        T: for<'a> Arbitrary<'a>,
    {
        self.generate_with_rng::<T, OsRng>(&mut OsRng)
    }

    /// Generates an arbitrary instance of type `T` from bytes drawn out of `rng`.
    ///
    /// # Panics
    ///
    /// If no instance could be built after a few refills of the buffer.
    pub fn generate_with_rng<T, R>(&mut self, rng: &mut R) -> T
    where
        T: for<'a> Arbitrary<'a>,
        R: CryptoRngCore,
    {
        const MAX_ATTEMPTS: usize = 16;
        let mut last_error = None;

        for _ in 0..MAX_ATTEMPTS {
            rng.fill_bytes(&mut self.buf);
            let mut u = Unstructured::new(&self.buf);
            match T::arbitrary(&mut u) {
                Ok(value) => return value,
                Err(err) => last_error = Some(err),
            }
        }

        let error_msg = last_error
            .map(|err| err.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        panic!("Failed to generate arbitrary instance: {error_msg}");
    }
}

/// Verifier that accepts every proof.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAllVerifier;

impl ProofVerifier for AcceptAllVerifier {
    fn verify(&self, _proof: &StructuredProof, _public_inputs: &[FieldElement]) -> bool {
        true
    }
}

/// Verifier that rejects every proof.
#[derive(Clone, Copy, Debug, Default)]
pub struct RejectAllVerifier;

impl ProofVerifier for RejectAllVerifier {
    fn verify(&self, _proof: &StructuredProof, _public_inputs: &[FieldElement]) -> bool {
        false
    }
}

#[derive(Debug, Default)]
struct Recording {
    calls: usize,
    last: Option<(StructuredProof, Vec<FieldElement>)>,
}

/// Verifier returning a fixed answer and recording what it was asked.
///
/// Clones share the same record, so a test can keep one clone while the core owns another.
#[derive(Clone, Debug, Default)]
pub struct RecordingVerifier {
    accept: bool,
    record: Arc<Mutex<Recording>>,
}

impl RecordingVerifier {
    pub fn new(accept: bool) -> Self {
        Self {
            accept,
            record: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.record.lock().calls
    }

    pub fn last_public_inputs(&self) -> Option<Vec<FieldElement>> {
        self.record.lock().last.as_ref().map(|(_, inputs)| inputs.clone())
    }

    pub fn last_proof(&self) -> Option<StructuredProof> {
        self.record.lock().last.as_ref().map(|(proof, _)| *proof)
    }
}

impl ProofVerifier for RecordingVerifier {
    fn verify(&self, proof: &StructuredProof, public_inputs: &[FieldElement]) -> bool {
        let mut rec = self.record.lock();
        rec.calls += 1;
        rec.last = Some((*proof, public_inputs.to_vec()));
        self.accept
    }
}

pub fn sequencer_address() -> Address {
    Address::new([0x5e; 20])
}

pub fn outsider_address() -> Address {
    Address::new([0x0b; 20])
}

/// Non-null verifier reference, distinct per `tag`.
pub fn test_verifier_id(tag: u8) -> VerifierId {
    let mut bytes = [0u8; 20];
    bytes[0] = 0xfe;
    bytes[19] = tag;
    VerifierId::new(bytes)
}

/// Handle around `verifier` registered as [`test_verifier_id`]`(tag)`.
pub fn verifier_handle(tag: u8, verifier: impl ProofVerifier + 'static) -> VerifierHandle {
    VerifierHandle::new(test_verifier_id(tag), verifier)
}

/// `n` distinct messages; `seed` keeps batches from different calls apart.
pub fn sample_messages(n: usize, seed: u64) -> Vec<SignedMessage> {
    (0..n as u64)
        .map(|i| {
            let base = seed.wrapping_mul(1_000).wrapping_add(i * 3);
            SignedMessage::new(
                FieldElement::from_u64(base),
                FieldElement::from_u64(base + 1),
                FieldElement::from_u64(base + 2),
            )
        })
        .collect()
}

/// `n` messages with arbitrary field words.
pub fn random_messages(arb: &mut ArbitraryGenerator, n: usize) -> Vec<SignedMessage> {
    (0..n)
        .map(|_| {
            let [hash, x, y]: [FieldElement; 3] = arb.generate();
            SignedMessage::new(hash, x, y)
        })
        .collect()
}

/// Splits messages into the parallel hash / x / y columns a batch carries.
pub fn split_messages(
    messages: &[SignedMessage],
) -> (Vec<FieldElement>, Vec<FieldElement>, Vec<FieldElement>) {
    let hashes = messages.iter().map(|m| m.message_hash).collect();
    let xs = messages.iter().map(|m| m.public_key_x).collect();
    let ys = messages.iter().map(|m| m.public_key_y).collect();
    (hashes, xs, ys)
}

/// Proof with distinct, recognizable words `1..=8`.
pub fn sample_proof() -> StructuredProof {
    let mut words = [FieldElement::zero(); 8];
    for (i, w) in words.iter_mut().enumerate() {
        *w = FieldElement::from_u64(i as u64 + 1);
    }
    StructuredProof::from_words(words)
}

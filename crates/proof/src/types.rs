//! Structured proof representation.

use serde::{Deserialize, Serialize};
use tracing::debug;
use zkbatch_primitives::FieldElement;

use crate::{codec, ProofDecodeResult};

/// Number of field elements making up a structured proof.
pub const PROOF_WORD_COUNT: usize = 8;

/// A pairing-based succinct proof: two G1 points around one G2 point.
///
/// `b` keeps the coordinate order the verifier expects; this type never reorders limbs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructuredProof {
    a: [FieldElement; 2],
    b: [[FieldElement; 2]; 2],
    c: [FieldElement; 2],
}

impl StructuredProof {
    pub fn new(a: [FieldElement; 2], b: [[FieldElement; 2]; 2], c: [FieldElement; 2]) -> Self {
        Self { a, b, c }
    }

    /// Builds a proof from words in canonical order `[A0, A1, B00, B01, B10, B11, C0, C1]`.
    pub fn from_words(w: [FieldElement; PROOF_WORD_COUNT]) -> Self {
        Self {
            a: [w[0], w[1]],
            b: [[w[2], w[3]], [w[4], w[5]]],
            c: [w[6], w[7]],
        }
    }

    /// Returns the words in canonical order.
    pub fn to_words(&self) -> [FieldElement; PROOF_WORD_COUNT] {
        let Self { a, b, c } = self;
        [a[0], a[1], b[0][0], b[0][1], b[1][0], b[1][1], c[0], c[1]]
    }

    pub fn a(&self) -> &[FieldElement; 2] {
        &self.a
    }

    pub fn b(&self) -> &[[FieldElement; 2]; 2] {
        &self.b
    }

    pub fn c(&self) -> &[FieldElement; 2] {
        &self.c
    }
}

/// A proof as it arrives with a batch, either already structured or in the flat byte layout.
///
/// Serialized as `{"structured": {..}}` or `{"raw": "<hex>"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofInput {
    Structured(StructuredProof),
    Raw(#[serde(with = "hex::serde")] Vec<u8>),
}

impl ProofInput {
    /// Produces the structured form, decoding raw bytes if needed.
    pub fn resolve(&self) -> ProofDecodeResult<StructuredProof> {
        match self {
            ProofInput::Structured(proof) => Ok(*proof),
            ProofInput::Raw(bytes) => codec::decode(bytes).inspect_err(|err| {
                debug!(len = bytes.len(), %err, "rejecting undecodable raw proof");
            }),
        }
    }
}

impl From<StructuredProof> for ProofInput {
    fn from(value: StructuredProof) -> Self {
        ProofInput::Structured(value)
    }
}

impl From<Vec<u8>> for ProofInput {
    fn from(value: Vec<u8>) -> Self {
        ProofInput::Raw(value)
    }
}

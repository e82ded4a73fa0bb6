//! Field-element-sized words as they travel between the ledger and a proof system.

use arbitrary::Arbitrary;

/// A 32-byte big-endian word holding one field element.
///
/// No reduction or curve-membership checks happen here; the proof system owns those.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Arbitrary)]
pub struct FieldElement([u8; 32]);
impl_buf!(FieldElement, 32);

impl FieldElement {
    /// Builds a word whose low 8 bytes hold `v`.
    pub fn from_u64(v: u64) -> Self {
        let mut data = [0u8; 32];
        data[24..].copy_from_slice(&v.to_be_bytes());
        Self(data)
    }

    /// Reads one word from exactly 32 big-endian bytes.
    pub fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; 32]>::try_from(bytes).ok().map(Self)
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0
    }
}

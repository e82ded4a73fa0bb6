//! Flat byte layout for structured proofs.
//!
//! The layout is eight consecutive 32-byte big-endian words in the order
//! `[A0, A1, B00, B01, B10, B11, C0, C1]`, 256 bytes in total. Bytes past the
//! last word are ignored.

use zkbatch_primitives::FieldElement;

use crate::{ProofDecodeError, ProofDecodeResult, StructuredProof, PROOF_WORD_COUNT};

/// Width of one encoded word.
pub const WORD_LEN: usize = 32;

/// Minimum length of a raw proof.
pub const RAW_PROOF_LEN: usize = WORD_LEN * PROOF_WORD_COUNT;

/// Decodes the flat layout into a [`StructuredProof`].
pub fn decode(bytes: &[u8]) -> ProofDecodeResult<StructuredProof> {
    if bytes.len() < RAW_PROOF_LEN {
        return Err(ProofDecodeError::TooShort {
            len: bytes.len(),
            expected: RAW_PROOF_LEN,
        });
    }

    let mut words = [FieldElement::zero(); PROOF_WORD_COUNT];
    for (idx, word) in words.iter_mut().enumerate() {
        *word = read_word(bytes, idx * WORD_LEN)?;
    }

    Ok(StructuredProof::from_words(words))
}

/// Encodes a proof into exactly [`RAW_PROOF_LEN`] bytes.
pub fn encode(proof: &StructuredProof) -> Vec<u8> {
    proof
        .to_words()
        .iter()
        .flat_map(|w| w.to_be_bytes())
        .collect()
}

fn read_word(bytes: &[u8], offset: usize) -> ProofDecodeResult<FieldElement> {
    offset
        .checked_add(WORD_LEN)
        .and_then(|end| bytes.get(offset..end))
        .and_then(FieldElement::from_be_slice)
        .ok_or(ProofDecodeError::OutOfBounds {
            offset,
            len: bytes.len(),
        })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn layout_with_word_markers() -> Vec<u8> {
        // every byte of word i holds i + 1 so misplaced words are obvious
        (0..PROOF_WORD_COUNT)
            .flat_map(|i| [i as u8 + 1; WORD_LEN])
            .collect()
    }

    #[test]
    fn test_decode_reads_words_in_fixed_order() {
        let proof = decode(&layout_with_word_markers()).unwrap();
        let marker = |i: u8| FieldElement::new([i; WORD_LEN]);

        assert_eq!(proof.a(), &[marker(1), marker(2)]);
        assert_eq!(proof.b(), &[[marker(3), marker(4)], [marker(5), marker(6)]]);
        assert_eq!(proof.c(), &[marker(7), marker(8)]);
    }

    #[test]
    fn test_decode_words_are_big_endian() {
        let mut bytes = vec![0u8; RAW_PROOF_LEN];
        bytes[WORD_LEN - 1] = 0x2a;
        let proof = decode(&bytes).unwrap();
        assert_eq!(proof.a()[0], FieldElement::from_u64(0x2a));
    }

    #[test]
    fn test_decode_too_short() {
        assert_eq!(
            decode(&[]),
            Err(ProofDecodeError::TooShort {
                len: 0,
                expected: RAW_PROOF_LEN
            })
        );
        assert_eq!(
            decode(&[0u8; RAW_PROOF_LEN - 1]),
            Err(ProofDecodeError::TooShort {
                len: RAW_PROOF_LEN - 1,
                expected: RAW_PROOF_LEN
            })
        );
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut bytes = layout_with_word_markers();
        let expected = decode(&bytes).unwrap();
        bytes.extend_from_slice(&[0xff; 17]);
        assert_eq!(decode(&bytes), Ok(expected));
    }

    #[test]
    fn test_read_word_out_of_bounds() {
        let bytes = [0u8; 40];
        assert_eq!(
            read_word(&bytes, 10),
            Err(ProofDecodeError::OutOfBounds {
                offset: 10,
                len: 40
            })
        );
        assert_eq!(
            read_word(&bytes, usize::MAX),
            Err(ProofDecodeError::OutOfBounds {
                offset: usize::MAX,
                len: 40
            })
        );
        assert!(read_word(&bytes, 8).is_ok());
    }

    proptest! {
        #[test]
        fn proptest_encode_decode(words in any::<[[u8; WORD_LEN]; PROOF_WORD_COUNT]>()) {
            let proof = StructuredProof::from_words(words.map(FieldElement::new));
            let bytes = encode(&proof);
            prop_assert_eq!(bytes.len(), RAW_PROOF_LEN);
            prop_assert_eq!(decode(&bytes), Ok(proof));
        }

        #[test]
        fn proptest_short_input_always_rejected(bytes in prop::collection::vec(any::<u8>(), 0..RAW_PROOF_LEN)) {
            let is_too_short = matches!(decode(&bytes), Err(ProofDecodeError::TooShort { .. }));
            prop_assert!(is_too_short);
        }
    }
}

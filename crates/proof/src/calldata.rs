//! Calldata-style textual proof form emitted by prover tooling.
//!
//! Elements are strings, either `0x`/`0X`-prefixed hex or plain decimal, e.g.
//! `{"a": ["0x..", "0x.."], "b": [["..", ".."], ["..", ".."]], "c": ["..", ".."]}`.

use ethnum::U256;
use serde::{Deserialize, Serialize};
use zkbatch_primitives::FieldElement;

use crate::{CalldataError, StructuredProof, PROOF_WORD_COUNT};

/// Element names in canonical word order, for error reporting.
const WORD_PATHS: [&str; PROOF_WORD_COUNT] = [
    "a[0]", "a[1]", "b[0][0]", "b[0][1]", "b[1][0]", "b[1][1]", "c[0]", "c[1]",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalldataProof {
    pub a: [String; 2],
    pub b: [[String; 2]; 2],
    pub c: [String; 2],
}

impl CalldataProof {
    /// Renders a proof with every element as `0x`-prefixed hex.
    pub fn from_proof(proof: &StructuredProof) -> Self {
        let [a0, a1, b00, b01, b10, b11, c0, c1] = proof.to_words().map(|w| w.to_string());
        Self {
            a: [a0, a1],
            b: [[b00, b01], [b10, b11]],
            c: [c0, c1],
        }
    }

    /// Parses every element into a field word.
    pub fn parse(&self) -> Result<StructuredProof, CalldataError> {
        let raw = [
            &self.a[0],
            &self.a[1],
            &self.b[0][0],
            &self.b[0][1],
            &self.b[1][0],
            &self.b[1][1],
            &self.c[0],
            &self.c[1],
        ];

        let mut words = [FieldElement::zero(); PROOF_WORD_COUNT];
        for ((word, value), path) in words.iter_mut().zip(raw).zip(WORD_PATHS) {
            *word = parse_element(path, value)?;
        }
        Ok(StructuredProof::from_words(words))
    }
}

fn parse_element(path: &'static str, value: &str) -> Result<FieldElement, CalldataError> {
    let trimmed = value.trim();
    let hex_digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"));
    let parsed = match hex_digits {
        Some(hex) => U256::from_str_radix(hex, 16).map_err(|_| CalldataError::InvalidHex {
            path,
            value: value.to_owned(),
        })?,
        None => U256::from_str_radix(trimmed, 10).map_err(|_| CalldataError::InvalidDecimal {
            path,
            value: value.to_owned(),
        })?,
    };
    Ok(FieldElement::new(parsed.to_be_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: [&str; 8]) -> CalldataProof {
        CalldataProof {
            a: [v[0].into(), v[1].into()],
            b: [[v[2].into(), v[3].into()], [v[4].into(), v[5].into()]],
            c: [v[6].into(), v[7].into()],
        }
    }

    #[test]
    fn test_parse_decimal_and_hex() {
        let calldata = strings(["1", "0x2", "3", "0x04", "5", "6", "7", "0x8"]);
        let proof = calldata.parse().unwrap();
        let expected: Vec<_> = (1..=8).map(FieldElement::from_u64).collect();
        assert_eq!(proof.to_words().to_vec(), expected);
    }

    #[test]
    fn test_parse_reports_element_path() {
        let calldata = strings(["1", "2", "3", "4", "5", "x9", "7", "8"]);
        assert_eq!(
            calldata.parse(),
            Err(CalldataError::InvalidDecimal {
                path: "b[1][1]",
                value: "x9".into()
            })
        );

        let calldata = strings(["1", "2", "3", "4", "5", "6", "0xzz", "8"]);
        assert!(matches!(
            calldata.parse(),
            Err(CalldataError::InvalidHex { path: "c[0]", .. })
        ));
    }

    #[test]
    fn test_uppercase_hex_prefix() {
        let calldata = strings(["0X1f", "0x1F", "0", "0", "0", "0", "0", "0"]);
        let proof = calldata.parse().unwrap();
        assert_eq!(proof.a(), &[FieldElement::from_u64(31); 2]);
    }

    #[test]
    fn test_full_width_value() {
        let max = format!("0x{}", "ff".repeat(32));
        let calldata = strings([&max, "0", "0", "0", "0", "0", "0", "0"]);
        let proof = calldata.parse().unwrap();
        assert_eq!(proof.a()[0], FieldElement::new([0xff; 32]));
    }

    #[test]
    fn test_json_shape() {
        let proof = StructuredProof::from_words([FieldElement::from_u64(5); 8]);
        let json = serde_json::to_value(CalldataProof::from_proof(&proof)).unwrap();
        assert_eq!(json["b"][1][0], serde_json::json!(FieldElement::from_u64(5).to_string()));

        let back: CalldataProof = serde_json::from_value(json).unwrap();
        assert_eq!(back.parse(), Ok(proof));
    }
}

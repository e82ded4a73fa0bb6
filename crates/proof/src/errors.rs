//! Proof handling error types.

use thiserror::Error;

pub type ProofDecodeResult<T> = Result<T, ProofDecodeError>;

/// Failures decoding the flat proof byte layout.
///
/// Both are pure validation failures; nothing is read past the point of failure.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ProofDecodeError {
    /// Input is shorter than the fixed raw proof length.
    #[error("raw proof too short: got {len} bytes, need {expected}")]
    TooShort { len: usize, expected: usize },

    /// A word read would run past the end of the buffer.
    #[error("word read at offset {offset} exceeds buffer of {len} bytes")]
    OutOfBounds { offset: usize, len: usize },
}

/// Failures parsing the calldata-style proof representation.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum CalldataError {
    #[error("element {path}: invalid hex word {value:?}")]
    InvalidHex { path: &'static str, value: String },

    #[error("element {path}: invalid decimal word {value:?}")]
    InvalidDecimal { path: &'static str, value: String },
}

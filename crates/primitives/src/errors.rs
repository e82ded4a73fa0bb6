//! Errors during parsing of primitives.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BufParseError {
    #[error("invalid hex for {expected_len}-byte buffer: {source}")]
    InvalidHex {
        expected_len: usize,
        #[source]
        source: hex::FromHexError,
    },
}

//! Collection of generic data types shared across the zkbatch crates.

#[macro_use]
mod macros;

pub mod buf;
pub mod errors;
pub mod field;

pub use buf::{Address, Buf32, StateRoot, VerifierId};
pub use errors::BufParseError;
pub use field::FieldElement;

//! Utilities shared by zkbatch binaries.

pub mod logging;

//! Batch acceptance core of the zkbatch rollup ledger.
//!
//! [`RollupCore`] takes batches of signed messages together with one succinct proof,
//! checks them in a fixed order and advances the L2 state only when the proof verifies.

mod clock;
mod errors;
mod events;
mod gate;
mod replay;
mod rollup;

#[cfg(any(test, feature = "test-utils"))]
pub use clock::MockClock;
pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::{RollupError, RollupResult};
pub use events::{EventLog, RollupEvent, SequencedEvent};
pub use gate::SequencerGate;
pub use replay::{HistoryIndex, ReplayError};
pub use rollup::{BatchSubmission, RollupCore};

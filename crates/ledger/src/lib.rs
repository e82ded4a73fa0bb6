//! Append-only ledgers backing the rollup: signature submissions, accepted batches and
//! the L2 state commitment.

mod batches;
mod ledger;
mod state;
mod submissions;
mod types;

pub use batches::BatchLedger;
pub use ledger::{BatchReceipt, PendingBatch, RollupLedger};
pub use state::StateLedger;
pub use submissions::SubmissionLedger;
pub use types::{Batch, BatchId, L2State, SignatureSubmission, SignedMessage, SubmissionId};

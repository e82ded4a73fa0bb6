//! Current L2 state commitment.

use zkbatch_primitives::StateRoot;

use crate::L2State;

/// Root and counters advanced once per accepted batch.
///
/// `block_number` and `batch_count` only move together through [`StateLedger::advance`].
#[derive(Clone, Debug, Default)]
pub struct StateLedger {
    state_root: StateRoot,
    block_number: u64,
    batch_count: u64,
}

impl StateLedger {
    pub fn new(genesis_root: StateRoot) -> Self {
        Self {
            state_root: genesis_root,
            block_number: 0,
            batch_count: 0,
        }
    }

    pub fn state_root(&self) -> StateRoot {
        self.state_root
    }

    pub fn block_number(&self) -> u64 {
        self.block_number
    }

    pub fn batch_count(&self) -> u64 {
        self.batch_count
    }

    /// Block number the next accepted batch will produce.
    pub fn next_block_number(&self) -> u64 {
        self.block_number + 1
    }

    pub fn snapshot(&self) -> L2State {
        L2State {
            state_root: self.state_root,
            block_number: self.block_number,
            batch_count: self.batch_count,
        }
    }

    pub(crate) fn advance(&mut self, new_root: StateRoot) {
        self.block_number += 1;
        self.batch_count += 1;
        self.state_root = new_root;
    }
}

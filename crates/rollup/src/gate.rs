//! Sequencer-only authorization.

use zkbatch_primitives::Address;

use crate::{RollupError, RollupResult};

/// Authorization boundary for batch submission and verifier rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequencerGate {
    sequencer: Address,
}

impl SequencerGate {
    pub fn new(sequencer: Address) -> Self {
        Self { sequencer }
    }

    pub fn sequencer(&self) -> Address {
        self.sequencer
    }

    pub fn authorize(&self, caller: Address) -> RollupResult<()> {
        if caller != self.sequencer {
            return Err(RollupError::Unauthorized { caller });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_sequencer_passes() {
        let gate = SequencerGate::new(Address::new([1; 20]));
        assert_eq!(gate.authorize(Address::new([1; 20])), Ok(()));
        assert_eq!(
            gate.authorize(Address::new([2; 20])),
            Err(RollupError::Unauthorized {
                caller: Address::new([2; 20])
            })
        );
        assert!(gate.authorize(Address::zero()).is_err());
    }
}

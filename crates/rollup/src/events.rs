//! Record stream emitted by the rollup core.
//!
//! Within one accepted batch the order is always: [`RollupEvent::BatchAccepted`], one
//! [`RollupEvent::SubmissionAccepted`] per signature in input order, then
//! [`RollupEvent::StateAdvanced`]. Observers rebuild history by replaying the stream.

use serde::{Deserialize, Serialize};
use zkbatch_ledger::{BatchId, SignedMessage, SubmissionId};
use zkbatch_primitives::{Address, StateRoot, VerifierId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RollupEvent {
    BatchAccepted {
        batch_id: BatchId,
        state_root: StateRoot,
        num_signatures: u64,
        proposer: Address,
        timestamp: u64,
        block_number: u64,
    },

    SubmissionAccepted {
        batch_id: BatchId,
        submission_id: SubmissionId,
        message: SignedMessage,
    },

    StateAdvanced {
        state_root: StateRoot,
        block_number: u64,
        batch_count: u64,
    },

    SubmissionRegistered {
        submission_id: SubmissionId,
        submitter: Address,
        message: SignedMessage,
    },

    VerifierUpdated {
        old: VerifierId,
        new: VerifierId,
    },
}

/// An event with its position in the stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedEvent {
    pub seq: u64,
    #[serde(flatten)]
    pub event: RollupEvent,
}

/// Append-only event log; `seq` is dense from 0.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<SequencedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> u64 {
        self.events.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(crate) fn extend(&mut self, events: impl IntoIterator<Item = RollupEvent>) {
        for event in events {
            let seq = self.len();
            self.events.push(SequencedEvent { seq, event });
        }
    }

    /// Events with `seq >= cursor`.
    pub fn since(&self, cursor: u64) -> &[SequencedEvent] {
        let start = usize::try_from(cursor)
            .unwrap_or(usize::MAX)
            .min(self.events.len());
        &self.events[start..]
    }
}

#[cfg(test)]
mod tests {
    use zkbatch_primitives::FieldElement;

    use super::*;

    fn registered(id: u64) -> RollupEvent {
        RollupEvent::SubmissionRegistered {
            submission_id: id,
            submitter: Address::new([3; 20]),
            message: SignedMessage::new(
                FieldElement::from_u64(1),
                FieldElement::from_u64(2),
                FieldElement::from_u64(3),
            ),
        }
    }

    #[test]
    fn test_since_cursor() {
        let mut log = EventLog::new();
        assert!(log.is_empty());
        log.extend([registered(0), registered(1), registered(2)]);

        assert_eq!(log.len(), 3);
        assert_eq!(log.since(0).len(), 3);
        assert_eq!(log.since(2)[0].seq, 2);
        assert!(log.since(3).is_empty());
        assert!(log.since(u64::MAX).is_empty());
    }

    #[test]
    fn test_json_is_tagged() {
        let event = SequencedEvent {
            seq: 7,
            event: RollupEvent::VerifierUpdated {
                old: VerifierId::new([1; 20]),
                new: VerifierId::new([2; 20]),
            },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "verifier_updated");
        assert_eq!(json["seq"], 7);

        let back: SequencedEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}

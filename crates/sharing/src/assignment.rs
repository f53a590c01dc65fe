use serde::{Deserialize, Serialize};

use sharetab_core::{Quantity, SessionParticipantId, ValueObject};

/// A participant's claim on an expense's pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub participant: SessionParticipantId,
    pub share: Quantity,
}

impl Assignment {
    pub fn new(participant: SessionParticipantId, share: Quantity) -> Self {
        Self { participant, share }
    }
}

impl ValueObject for Assignment {}

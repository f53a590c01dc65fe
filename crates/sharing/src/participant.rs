use core::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use sharetab_core::{DomainError, DomainResult, Entity, ParticipantId, Quantity, SessionParticipantId};

use crate::Assignment;

/// Accepted number of people a single participant entry may stand for.
pub const PERSON_COUNT_RANGE: RangeInclusive<u8> = 1..=10;

/// A participant within one session.
///
/// `person_count` covers entries like "Anna +1"; it drives the default
/// expense's auto-assignment and the head count in the request text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParticipant {
    pub id: SessionParticipantId,
    pub participant_id: ParticipantId,
    pub name: String,
    pub person_count: u8,
}

impl SessionParticipant {
    pub fn new(
        id: SessionParticipantId,
        participant_id: ParticipantId,
        name: impl Into<String>,
        person_count: u8,
    ) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("participant name must not be empty"));
        }
        if !PERSON_COUNT_RANGE.contains(&person_count) {
            return Err(DomainError::validation(format!(
                "person_count must be between {} and {}",
                PERSON_COUNT_RANGE.start(),
                PERSON_COUNT_RANGE.end()
            )));
        }
        Ok(Self {
            id,
            participant_id,
            name,
            person_count,
        })
    }
}

impl Entity for SessionParticipant {
    type Id = SessionParticipantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Initial assignments for a session's default expense: everyone claims one
/// unit per person they stand for.
pub fn default_assignments(participants: &[SessionParticipant]) -> Vec<Assignment> {
    participants
        .iter()
        .map(|p| Assignment::new(p.id, Quantity::whole(u64::from(p.person_count))))
        .collect()
}

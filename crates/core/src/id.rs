//! Strongly-typed identifiers used across the domain.
//!
//! All ids are UUIDv7 and roughly sort by creation time.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::from_str(s.trim())
                    .map(Self)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {e}", stringify!($name))))
            }
        }
    };
}

uuid_id!(
    /// One visit that participants join and run a tab in.
    SessionId
);

uuid_id!(
    /// A person, independent of any session.
    ParticipantId
);

uuid_id!(
    /// A participant's membership in one session.
    ///
    /// Assignments and bills are keyed by this, not by [`ParticipantId`].
    SessionParticipantId
);

uuid_id!(
    /// Expense aggregate id.
    ExpenseId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_through_display() {
        let id = ExpenseId::new();
        let parsed: ExpenseId = format!(" {id} ").parse().unwrap();
        assert_eq!(parsed, id);
        assert_eq!(Uuid::from(id), *id.as_uuid());
    }

    #[test]
    fn parse_rejects_garbage_with_type_name() {
        let err = "not-a-uuid".parse::<SessionParticipantId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) if msg.starts_with("SessionParticipantId") => {}
            other => panic!("Expected InvalidId, got {other:?}"),
        }
    }
}

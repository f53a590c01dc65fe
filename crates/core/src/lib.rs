//! `sharetab-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the sharing and
//! billing crates (no infrastructure concerns).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod quantity;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot, ExpectedVersion};
pub use entity::{Entity, index_by_id};
pub use error::{DomainError, DomainResult};
pub use id::{ExpenseId, ParticipantId, SessionId, SessionParticipantId};
pub use quantity::Quantity;
pub use value_object::ValueObject;

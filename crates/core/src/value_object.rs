//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two
/// [`Quantity`](crate::Quantity) values with the same half-unit count are the
/// same quantity, while two participants with the same name are still
/// different entities.
///
/// To "modify" a value object, create a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

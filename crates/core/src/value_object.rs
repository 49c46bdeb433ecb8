//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and defined entirely by their attribute
/// values: two instances with the same values are the same value. `Money`
/// and `ProductId` are value objects; a `Product` (which keeps its identity
/// while its stock changes) is an entity.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

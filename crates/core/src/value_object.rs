//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. A grouping key is the canonical example here: two lots
//! whose keys compare equal belong to the same group, regardless of which
//! record produced the key.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value. To "modify" one, build a
/// new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct GroupKey { name: String, category: String }
///
/// impl ValueObject for GroupKey {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

//! Entity traits: identity + the registration contract.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Contract for entity types tracked in a [`Registry`](crate::Registry).
///
/// The uniqueness predicate is supplied explicitly by each entity type and
/// evaluated by the registry against every already-registered instance, once,
/// at registration time. Types without a uniqueness rule keep the default.
pub trait Registered: Entity {
    /// Human-readable entity kind used in diagnostics and duplicate errors.
    const KIND: &'static str;

    /// Uniqueness predicate: does `self` conflict with an existing instance?
    fn is_duplicate_of(&self, _other: &Self) -> bool {
        false
    }
}

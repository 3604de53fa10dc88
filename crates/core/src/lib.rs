//! `ordermill-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identity, the error model, and the generic instance registry every entity
//! type registers itself into at construction time.

pub mod entity;
pub mod error;
pub mod id;
pub mod registry;

pub use entity::{Entity, Registered};
pub use error::{DomainError, DomainResult};
pub use id::EntityId;
pub use registry::{Registry, Shared};
